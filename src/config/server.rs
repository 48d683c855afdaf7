use std::net::SocketAddr;
use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Default browser origin of the scouting front end during development.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// Browser origins allowed to call the API with credentials.
    pub cors_origins: Vec<String>,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    #[must_use]
    pub fn new(jwt: JwtConfig) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            data_dir: PathBuf::from("./data"),
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            jwt,
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("scoutbook.db")
    }
}
