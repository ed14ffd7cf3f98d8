use std::{fs, path::PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use eventhub_db_sqlite::Connections;
use eventhub_gateways::{identity::LocalIdentityProvider, image_store::FileSystemImageStore};
use eventhub_webserver::{Cfg, JwtState};

use crate::config::Config;

/// Backend for discovering and booking events
#[derive(Parser)]
#[command(name = "eventhub", version)]
struct Args {
    /// Path to the configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config_file: Option<PathBuf>,

    /// URL of the SQLite database (overrides the configuration)
    #[arg(long, global = true, value_name = "DATABASE_URL")]
    db_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the web server (default)
    Serve {
        /// Allow requests from any origin
        #[arg(long)]
        enable_cors: bool,

        /// Directory for uploaded images (overrides the configuration)
        #[arg(long, value_name = "DIR")]
        upload_dir: Option<PathBuf>,
    },
    /// Run the database migrations and exit
    Migrate,
}

fn connect(cfg: &Config) -> Result<Connections> {
    let pool_size = u32::from(cfg.db.conn_pool_size);
    log::info!(
        "Connecting to SQLite database '{}' (pool size = {pool_size})",
        cfg.db.conn_sqlite
    );
    let connections = Connections::init(&cfg.db.conn_sqlite, pool_size)?;
    eventhub_db_sqlite::run_embedded_database_migrations(connections.exclusive()?)?;
    Ok(connections)
}

pub async fn run() -> Result<()> {
    let args = Args::parse();
    let mut cfg = Config::try_load_from_file_or_default(args.config_file.as_ref())?;
    if let Some(db_url) = args.db_url {
        cfg.db.conn_sqlite = db_url;
    }

    match args.command.unwrap_or(Command::Serve {
        enable_cors: false,
        upload_dir: None,
    }) {
        Command::Migrate => {
            connect(&cfg)?;
            log::info!("Database is up to date");
        }
        Command::Serve {
            enable_cors,
            upload_dir,
        } => {
            if let Some(dir) = upload_dir {
                cfg.images.upload_dir = dir;
            }
            let connections = connect(&cfg)?;

            fs::create_dir_all(&cfg.identity.dir)?;
            log::info!(
                "Storing identities in {}",
                cfg.identity.dir.display()
            );
            let identity = LocalIdentityProvider::try_new(&cfg.identity.dir)?;

            log::info!(
                "Storing uploaded images in {}",
                cfg.images.upload_dir.display()
            );
            let images =
                FileSystemImageStore::try_new(&cfg.images.upload_dir, cfg.images.public_path)?;

            let jwt_state = JwtState::new(cfg.session.secret.as_deref(), cfg.session.valid_for);
            let web_cfg = Cfg {
                max_image_size: cfg.images.max_size,
            };
            eventhub_webserver::run(
                connections,
                enable_cors || cfg.webserver.enable_cors,
                web_cfg,
                jwt_state,
                Box::new(identity),
                Box::new(images),
            )
            .await;
        }
    }
    Ok(())
}
