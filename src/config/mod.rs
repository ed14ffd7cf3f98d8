use anyhow::{anyhow, Result};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "eventhub.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";
const ENV_NAME_SESSION_SECRET: &str = "JWT_SECRET";

pub struct Config {
    pub db: Db,
    pub webserver: WebServer,
    pub session: Session,
    pub identity: Identity,
    pub images: Images,
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
                    raw::Config::default()
                }
                _ => return Err(err.into()),
            },
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(db_url) = env::var(ENV_NAME_DB_URL) {
            cfg.db.conn_sqlite = db_url;
        }
        if let Ok(secret) = env::var(ENV_NAME_SESSION_SECRET) {
            cfg.session.secret = Some(secret);
        }
        Ok(cfg)
    }
}

pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u8,
}

pub struct WebServer {
    pub enable_cors: bool,
}

pub struct Session {
    pub secret: Option<String>,
    pub valid_for: Duration,
}

pub struct Identity {
    /// File system directory of the local identity provider.
    pub dir: PathBuf,
}

pub struct Images {
    pub upload_dir: PathBuf,
    /// Maximum size of an uploaded image in bytes.
    pub max_size: u64,
    /// URL prefix under which uploaded images are served.
    pub public_path: String,
}

fn section<T>(value: Option<T>, default: Option<T>, name: &str) -> Result<T> {
    value
        .or(default)
        .ok_or_else(|| anyhow!("Missing '{name}' configuration"))
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            db,
            webserver,
            session,
            identity,
            images,
        } = from;
        let defaults = raw::Config::try_default()?;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
        } = section(db, defaults.db, "db")?;
        if connection_pool_size == 0 {
            return Err(anyhow!("The connection pool must not be empty"));
        }
        let db = Db {
            conn_sqlite: connection_sqlite,
            conn_pool_size: connection_pool_size,
        };

        let raw::WebServer { cors } = section(webserver, defaults.webserver, "webserver")?;
        let webserver = WebServer { enable_cors: cors };

        let raw::Session { secret, valid_for } = section(session, defaults.session, "session")?;
        if valid_for.is_zero() {
            return Err(anyhow!("Sessions must be valid for a non-zero duration"));
        }
        let secret = secret.filter(|s| !s.trim().is_empty());
        let session = Session { secret, valid_for };

        let raw::Identity { dir } = section(identity, defaults.identity, "identity")?;
        let identity = Identity { dir };

        let raw::Images {
            upload_dir,
            max_size,
            public_path,
        } = section(images, defaults.images, "images")?;
        if max_size == 0 {
            return Err(anyhow!("The maximum image size must not be zero"));
        }
        let images = Images {
            upload_dir,
            max_size,
            public_path: public_path.trim_end_matches('/').to_owned(),
        };

        Ok(Self {
            db,
            webserver,
            session,
            identity,
            images,
        })
    }
}
