//! Token bundle and secret wrappers.

pub mod data;
pub mod secret;
