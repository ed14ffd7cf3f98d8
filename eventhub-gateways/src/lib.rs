pub mod identity;
pub mod image_store;
