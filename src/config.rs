use std::env;

/// Credential settings consumed by token issuance and verification.
/// Carried by value so the signing code never reads ambient state.
#[derive(Clone)]
pub struct AuthConfig {
    pub secret_key: String,
    pub access_token_expire_minutes: i64,
    pub refresh_token_expire_days: i64,
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
    pub auth: AuthConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            auth: AuthConfig {
                secret_key: env::var("AUTH_SECRET_KEY").expect("AUTH_SECRET_KEY must be set"),
                access_token_expire_minutes: env::var("AUTH_ACCESS_TOKEN_EXPIRE_MINUTES")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .expect("AUTH_ACCESS_TOKEN_EXPIRE_MINUTES must be a number"),
                refresh_token_expire_days: env::var("AUTH_REFRESH_TOKEN_EXPIRE_DAYS")
                    .unwrap_or_else(|_| "7".to_string())
                    .parse()
                    .expect("AUTH_REFRESH_TOKEN_EXPIRE_DAYS must be a number"),
            },
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}
