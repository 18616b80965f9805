pub mod lifecycle;
pub mod home;
pub mod points;
pub mod detail;
