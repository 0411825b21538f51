pub mod config;
pub mod host;
pub mod session;
pub mod types;
