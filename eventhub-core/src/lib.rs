pub use eventhub_entities as entities;

pub mod gateways;
pub mod repositories;
pub mod usecases;
pub mod util;
