use bazaar_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Secret used to sign and verify bearer tokens
    pub jwt_secret: String,
    /// Bearer token lifetime in seconds
    pub jwt_expires_in: i64,
    /// API key for the geocoding service. Only required when the
    /// application runs against the real service.
    pub geocoder_api_key: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find JWT_SECRET environment variable. Going to create one.");
                info!("Bearer tokens signed by this process will not survive a restart.");
                create_random_secret(32)
            }
        };

        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let default_jwt_expires_in = 60 * 60 * 24; // 1 day
        let jwt_expires_in = match std::env::var("JWT_EXPIRES_IN") {
            Ok(expires_in) => match expires_in.parse::<i64>() {
                Ok(expires_in) if expires_in > 0 => expires_in,
                _ => {
                    warn!(
                        "The given JWT_EXPIRES_IN: {} is not valid, falling back to the default: {} seconds.",
                        expires_in, default_jwt_expires_in
                    );
                    default_jwt_expires_in
                }
            },
            Err(_) => default_jwt_expires_in,
        };

        let geocoder_api_key = std::env::var("MAPQUEST_API_KEY").ok();

        Self {
            port,
            jwt_secret,
            jwt_expires_in,
            geocoder_api_key,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
