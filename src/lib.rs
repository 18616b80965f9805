pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod notice;
pub mod types;

// Services and ports, then the screens and session built on them
pub mod app;
pub mod context;
pub mod infra;
pub mod screens;
pub mod session;
