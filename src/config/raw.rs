use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_CONFIG_FILE: &str = include_str!("nrl.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db: Option<Db>,
    pub obstacles: Option<Obstacles>,
    pub drafts: Option<Drafts>,
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub connection_sqlite: String,
    pub connection_pool_size: u8,
}

impl Default for Db {
    fn default() -> Self {
        Config::default().db.expect("DB configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Obstacles {
    pub access: Option<String>,
}

impl Default for Obstacles {
    fn default() -> Self {
        Config::default()
            .obstacles
            .expect("Obstacles configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Drafts {
    pub dir: PathBuf,
}

impl Default for Drafts {
    fn default() -> Self {
        Config::default().drafts.expect("Drafts configuration")
    }
}
