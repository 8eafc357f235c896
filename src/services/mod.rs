pub mod builder;
pub mod encoder;
pub mod normalizer;
pub mod pairing;
pub mod reconcile;
pub mod schema;
pub mod selection;
pub mod status;
