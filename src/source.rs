//! Interfaces to the external media index, plus an in-memory implementation.

pub mod collection;
pub mod media;
pub mod memory;
