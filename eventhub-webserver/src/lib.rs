#[macro_use]
extern crate log;

use eventhub_core::gateways::{identity::IdentityGateway, image::ImageGateway};
use eventhub_db_sqlite::Connections;

mod web;

pub use web::{jwt::JwtState, Cfg};

pub async fn run(
    connections: Connections,
    enable_cors: bool,
    cfg: Cfg,
    jwt_state: JwtState,
    identity: Box<dyn IdentityGateway + Send + Sync>,
    images: Box<dyn ImageGateway + Send + Sync>,
) {
    web::run(
        connections.into(),
        enable_cors,
        cfg,
        jwt_state,
        identity,
        images,
    )
    .await;
}
