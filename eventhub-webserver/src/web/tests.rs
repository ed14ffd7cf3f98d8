use std::time::Duration;

use eventhub_gateways::{identity::LocalIdentityProvider, image_store::FileSystemImageStore};
use rocket::{config::Config as RocketCfg, local::blocking::Client, Route};
use tempfile::TempDir;

use crate::web::{jwt, sqlite, Cfg};

pub mod prelude {
    pub use rocket::{
        http::{ContentType, Header, Status},
        local::blocking::{Client, LocalResponse},
    };

    pub use super::{rocket_test_setup, TestEnv};
}

pub const IMAGE_PREFIX: &str = "/api/image";

/// Keeps the temporary directories alive for the duration of a test.
pub struct TestEnv {
    pub db: sqlite::Connections,
    pub upload_dir: TempDir,
    _identity_dir: TempDir,
}

pub fn rocket_test_setup(mounts: Vec<(&'static str, Vec<Route>)>, cfg: Cfg) -> (Client, TestEnv) {
    let _ = env_logger::builder().is_test(true).try_init();
    let connections = eventhub_db_sqlite::Connections::init(":memory:", 1).unwrap();
    eventhub_db_sqlite::run_embedded_database_migrations(connections.exclusive().unwrap())
        .unwrap();
    let db = sqlite::Connections::from(connections);

    let identity_dir = tempfile::tempdir().unwrap();
    let upload_dir = tempfile::tempdir().unwrap();
    let gateways = super::Gateways {
        identity: Box::new(LocalIdentityProvider::try_new(identity_dir.path()).unwrap()),
        images: Box::new(FileSystemImageStore::try_new(upload_dir.path(), IMAGE_PREFIX).unwrap()),
    };
    let options = super::InstanceOptions {
        mounts,
        rocket_cfg: Some(RocketCfg::debug_default()),
        cfg,
    };
    let jwt_state = jwt::JwtState::new(Some("test secret"), Duration::from_secs(60 * 60));
    let rocket = super::rocket_instance(options, db.clone(), jwt_state, gateways);
    let client = Client::tracked(rocket).unwrap();
    let env = TestEnv {
        db,
        upload_dir,
        _identity_dir: identity_dir,
    };
    (client, env)
}
