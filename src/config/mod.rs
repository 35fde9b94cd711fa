use anyhow::{anyhow, Result};
use nrl_core::entities::AccessPolicy;
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "nrl.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";

pub struct Config {
    pub db: Db,
    pub obstacles: Obstacles,
    pub drafts: Drafts,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(db_url) = env::var(ENV_NAME_DB_URL) {
            cfg.db.conn_sqlite = db_url;
        }
        Ok(cfg)
    }
}

pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u8,
}

pub struct Obstacles {
    pub access_policy: AccessPolicy,
}

pub struct Drafts {
    /// File system directory for draft geometries.
    pub dir: PathBuf,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            db,
            obstacles,
            drafts,
        } = from;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
        } = db.unwrap_or_default();
        if connection_pool_size == 0 {
            return Err(anyhow!("The connection pool must not be empty"));
        }
        let db = Db {
            conn_sqlite: connection_sqlite,
            conn_pool_size: connection_pool_size,
        };

        let raw::Obstacles { access } = obstacles.unwrap_or_default();
        let access_policy = match access {
            Some(access) => access
                .parse()
                .map_err(|_| anyhow!("Invalid obstacle access policy '{access}'"))?,
            None => AccessPolicy::default(),
        };
        log::info!("Obstacle access policy: {access_policy}");
        let obstacles = Obstacles { access_policy };

        let raw::Drafts { dir } = drafts.unwrap_or_default();
        let drafts = Drafts { dir };

        Ok(Self {
            db,
            obstacles,
            drafts,
        })
    }
}
