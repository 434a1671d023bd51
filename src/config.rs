use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub auth: AuthConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Redis,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub redis_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub bcrypt_cost: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub secure: bool,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    // In-memory store and the cheapest bcrypt cost; used by the router tests.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
            },
            store: StoreConfig {
                backend: StoreBackend::Memory,
                redis_url: String::new(),
            },
            auth: AuthConfig {
                bcrypt_cost: 4,
            },
            session: SessionConfig {
                secure: false,
            },
        }
    }
}
