use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_addr: String,
    pub data_dir: PathBuf,
    pub users_file: PathBuf,
    pub jwt_secret: String,
    pub session_ttl_seconds: i64,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let config_builder = config::Config::builder()
            .add_source(
                config::File::with_name(&format!("config/{}", env)).required(false), // Allow missing config file, fallback to ENV
            )
            // Override with environment variables (prefix: APP_)
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        let settings = config_builder.build()?;

        let bind_addr = settings
            .get_string("server.bind_addr")
            .or_else(|_| env::var("BIND_ADDR"))
            .unwrap_or_else(|_| "0.0.0.0:8081".to_string());

        let data_dir = settings
            .get_string("storage.data_dir")
            .or_else(|_| env::var("DATA_DIR"))
            .unwrap_or_else(|_| "data".to_string());

        let users_file = settings
            .get_string("storage.users_file")
            .or_else(|_| env::var("USERS_FILE"))
            .unwrap_or_else(|_| format!("{}/users.json", data_dir));

        let jwt_secret = settings
            .get_string("auth.jwt_secret")
            .or_else(|_| env::var("JWT_SECRET"))
            .unwrap_or_else(|_| {
                if env == "prod" {
                    panic!("FATAL: JWT_SECRET must be set in production!");
                }
                eprintln!("WARNING: Using default JWT_SECRET (dev mode only!)");
                "dev-secret-only-for-local-testing".to_string()
            });

        let session_ttl_seconds = settings
            .get_int("auth.session_ttl_seconds")
            .ok()
            .or_else(|| {
                env::var("SESSION_TTL_SECONDS")
                    .ok()
                    .and_then(|v| v.parse::<i64>().ok())
            })
            .unwrap_or(86400); // Default: 24 hours

        Ok(Config {
            bind_addr,
            data_dir: PathBuf::from(data_dir),
            users_file: PathBuf::from(users_file),
            jwt_secret,
            session_ttl_seconds,
        })
    }
}
