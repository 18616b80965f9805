pub mod http_client;
pub mod link_opener;
pub mod location;
