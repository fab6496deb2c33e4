use std::env;

pub struct AppConfig {
    pub angel_base_url: String,
    pub http_bind: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            angel_base_url: env_var("ANGEL_BASE_URL", "http://127.0.0.1:8080/angel"),
            http_bind: env_var("HTTP_BIND", "0.0.0.0:8090"),
        }
    }
}

fn env_var(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
