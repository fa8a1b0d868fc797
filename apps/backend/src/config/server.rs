use std::env;

use crate::error::AppError;

/// Bind address for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Reads `RPS_HOST` (default `0.0.0.0`) and `RPS_PORT` (default `3001`).
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("RPS_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("RPS_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("RPS_PORT must be a port number, got '{raw}'"))
            })?,
            Err(_) => 3001,
        };
        Ok(Self { host, port })
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

/// Reads `RPS_TXN_RETRIES`: how many times a transaction is attempted in
/// total before a lost race is reported to the caller.
pub fn txn_attempts_from_env() -> Result<u32, AppError> {
    match env::var("RPS_TXN_RETRIES") {
        Ok(raw) => match raw.parse::<u32>() {
            Ok(n) if n >= 1 => Ok(n),
            _ => Err(AppError::config(format!(
                "RPS_TXN_RETRIES must be a positive integer, got '{raw}'"
            ))),
        },
        Err(_) => Ok(3),
    }
}
