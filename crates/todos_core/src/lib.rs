pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod persistence;
pub mod storage;
pub mod store;

pub use store::TaskStore;
