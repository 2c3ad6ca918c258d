//! Scene model, region resolution, and the two-tier scene store.

pub mod cache;
pub mod config;
pub mod id;
pub mod model;
pub mod region;
pub mod store;
