use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,

    // Inserts the sample cash cards on startup
    pub seed_sample_data: bool,

    // Pagination
    pub default_page_size: u32,
    pub max_page_size: u32,

    // Security
    pub password_hash_iterations: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        // Load .env file if it exists (for local development)
        let _ = dotenvy::dotenv();

        let config = config::Config::builder()
            .set_default("database_url", "sqlite://cashcard.db?mode=rwc")?
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("max_connections", 5)?
            .set_default("seed_sample_data", true)?
            .set_default("default_page_size", 20)?
            .set_default("max_page_size", 2000)?
            .set_default("password_hash_iterations", 100_000)?
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(Self {
            database_url: config.get("database_url")?,
            host: config.get("host")?,
            port: config.get("port")?,
            max_connections: config.get("max_connections")?,

            seed_sample_data: config.get("seed_sample_data")?,

            default_page_size: config.get("default_page_size")?,
            max_page_size: config.get("max_page_size")?,

            password_hash_iterations: config.get("password_hash_iterations")?,
        })
    }

    /// Configuration for an in-memory database, used by tests and local demos.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            max_connections: 1,
            seed_sample_data: true,
            default_page_size: 20,
            max_page_size: 2000,
            password_hash_iterations: 1_000,
        }
    }
}
