use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Static content host (where the JSON manifests live)
    pub content_base_url: String,

    // Web servers
    pub site_host: String,
    pub site_port: u16,
    pub admin_host: String,
    pub admin_port: u16,

    // Admin
    pub admin_password: String,
    pub session_secret: String,
}

impl Config {
    /// Load the full configuration. Panics with a clear message if
    /// required vars are missing.
    pub fn from_env() -> Self {
        Self {
            content_base_url: required_env("CONTENT_BASE_URL"),
            site_host: env::var("SITE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            site_port: env::var("SITE_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("SITE_PORT must be a number"),
            admin_host: env::var("ADMIN_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            admin_port: env::var("ADMIN_PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .expect("ADMIN_PORT must be a number"),
            admin_password: required_env("ADMIN_PASSWORD"),
            session_secret: env::var("SESSION_SECRET").unwrap_or_default(),
        }
    }

    /// Minimal config for the public site (no admin credential needed).
    pub fn site_from_env() -> Self {
        Self {
            content_base_url: required_env("CONTENT_BASE_URL"),
            site_host: env::var("SITE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            site_port: env::var("SITE_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("SITE_PORT must be a number"),
            admin_host: String::new(),
            admin_port: 0,
            admin_password: String::new(),
            session_secret: String::new(),
        }
    }

    /// Config for the admin panel server.
    pub fn admin_from_env() -> Self {
        Self {
            content_base_url: required_env("CONTENT_BASE_URL"),
            site_host: String::new(),
            site_port: 0,
            admin_host: env::var("ADMIN_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            admin_port: env::var("ADMIN_PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .expect("ADMIN_PORT must be a number"),
            admin_password: required_env("ADMIN_PASSWORD"),
            session_secret: env::var("SESSION_SECRET").unwrap_or_default(),
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
