use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub host: String,
    // env sources hand everything over as strings
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub db_path: String,
}

impl Settings {
    // defaults, then an optional trivia.toml, then TRIVIA_* env vars
    pub fn load() -> Result<Settings, config::ConfigError> {
        config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("db_path", "trivia.db")?
            .add_source(config::File::with_name("trivia").required(false))
            .add_source(config::Environment::with_prefix("TRIVIA"))
            .build()?
            .try_deserialize()
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
