//! HTTP server configuration

use anyhow::{Context, Result};
use std::env;

/// Address the HTTP server listens on
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `HOST`: Interface to bind (default: "0.0.0.0")
    /// - `PORT`: Port to listen on (default: 3000)
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = match env::var("PORT") {
            Ok(port) => port
                .parse()
                .with_context(|| format!("Invalid PORT value: {}", port))?,
            Err(_) => 3000,
        };

        Ok(Self { host, port })
    }

    /// `host:port` string for binding the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
