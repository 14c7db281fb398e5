//! Provider configuration (data) and the built-in presets.
//!
//! `config` holds [`ProviderConfig`], its validated builder, and the enums describing how a
//! provider expects credentials, verbs, and access tokens. `preset` maps
//! [`SupportedProvider`] identifiers to ready-made configurations.

pub mod config;
pub mod preset;

pub use config::*;
pub use preset::*;
