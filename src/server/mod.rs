pub mod config;
mod envelope;
mod http_layers;
mod jobs;
pub(self) mod session;
pub mod state;
mod users;

pub mod server;

pub use config::ServerConfig;
pub use http_layers::RequestsLoggingLevel;
#[allow(unused_imports)] // Used by main.rs
pub use server::run_server;
