pub mod data_store;
pub mod processor;
pub mod schema;
pub mod stats;
