use eventhub_core::gateways::{identity::IdentityGateway, image::ImageGateway};
use rocket::{
    config::Config as RocketCfg,
    data::{ByteUnit, Limits},
    figment::Figment,
    Rocket, Route,
};

pub mod api;
mod guards;
pub mod jwt;
mod sqlite;

#[cfg(test)]
pub mod tests;

#[derive(Debug, Clone)]
pub struct Cfg {
    /// Maximum size of an uploaded image in bytes.
    pub max_image_size: u64,
}

pub(crate) struct InstanceOptions {
    mounts: Vec<(&'static str, Vec<Route>)>,
    rocket_cfg: Option<RocketCfg>,
    cfg: Cfg,
}

pub(crate) struct Gateways {
    identity: Box<dyn IdentityGateway + Send + Sync>,
    images: Box<dyn ImageGateway + Send + Sync>,
}

// Uploads up to the configured size must pass rocket's own limits,
// larger ones are rejected by the use case with a proper message.
fn upload_limits(max_image_size: u64) -> Limits {
    let file = ByteUnit::from(max_image_size) + ByteUnit::Kibibyte(64);
    Limits::default()
        .limit("file", file)
        .limit("data-form", file + ByteUnit::Kibibyte(64))
}

pub(crate) fn rocket_instance(
    options: InstanceOptions,
    db: sqlite::Connections,
    jwt_state: jwt::JwtState,
    gateways: Gateways,
) -> Rocket<rocket::Build> {
    let InstanceOptions {
        mounts,
        rocket_cfg,
        cfg,
    } = options;
    let Gateways { identity, images } = gateways;

    let figment = match rocket_cfg {
        Some(cfg) => Figment::from(cfg),
        None => RocketCfg::figment(),
    }
    .merge(("limits", upload_limits(cfg.max_image_size)));

    info!(
        "Serving images under {} (max. {} bytes)",
        images.public_prefix(),
        cfg.max_image_size
    );

    let mut instance = rocket::custom(figment)
        .manage(db)
        .manage(jwt_state)
        .manage(guards::Identity(identity))
        .manage(guards::Images(images))
        .manage(cfg)
        .register("/", api::catchers());

    for (m, r) in mounts {
        instance = instance.mount(m, r);
    }
    instance
}

fn mounts() -> Vec<(&'static str, Vec<Route>)> {
    vec![("/api", api::routes())]
}

pub async fn run(
    db: sqlite::Connections,
    enable_cors: bool,
    cfg: Cfg,
    jwt_state: jwt::JwtState,
    identity: Box<dyn IdentityGateway + Send + Sync>,
    images: Box<dyn ImageGateway + Send + Sync>,
) {
    let options = InstanceOptions {
        mounts: mounts(),
        rocket_cfg: None,
        cfg,
    };
    let gateways = Gateways { identity, images };
    let instance = rocket_instance(options, db, jwt_state, gateways);
    let server_task = if enable_cors {
        match rocket_cors::CorsOptions::default().to_cors() {
            Ok(cors) => instance.attach(cors).launch(),
            Err(err) => {
                error!("Invalid CORS configuration: {err}");
                return;
            }
        }
    } else {
        instance.launch()
    };
    if let Err(err) = server_task.await {
        error!("Unable to run web server: {err}");
    }
}
