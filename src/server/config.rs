use super::RequestsLoggingLevel;

#[derive(Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub requests_logging_level: RequestsLoggingLevel,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: 3000,
            requests_logging_level: RequestsLoggingLevel::Path,
        }
    }
}
