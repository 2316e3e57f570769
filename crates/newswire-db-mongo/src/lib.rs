//! MongoDB implementation of the Newswire `DocumentStore` trait.

pub mod client;
pub mod config;
pub mod convert;
pub mod storage;

pub use config::MongoConfig;
pub use storage::MongoStore;
