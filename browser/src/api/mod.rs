pub mod provider;
pub mod store;
pub mod types;
