//! Auth-domain identifiers, scope lists, token bundles, and profile shaping.

pub mod id;
pub mod id_token;
pub mod profile;
pub mod scope;
pub mod token;

pub use id::*;
pub use id_token::*;
pub use profile::*;
pub use scope::*;
pub use token::{data::*, secret::*};
