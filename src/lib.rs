pub mod config;
pub mod db_mongo;
pub mod error;
pub mod session;
pub mod store;
