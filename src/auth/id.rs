//! Provider and client identity strings.
//!
//! Both are free-form values chosen by the provider or the integrator; the only rule is that
//! they are non-empty, so names such as `My IdP` are accepted as-is.

// std
use std::ops::Deref;
// self
use crate::_prelude::*;

/// Error returned when an identity string is empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
#[error("{kind} identifier cannot be empty.")]
pub struct IdentifierError {
	/// Kind of identifier (provider, client).
	pub kind: &'static str,
}

macro_rules! identity_string {
	($(#[$meta:meta])* $name:ident => $kind:literal) => {
		$(#[$meta])*
		#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Wraps a non-empty identity string.
			pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
				Self::try_from(value.into())
			}

			/// Returns the identity string.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				if value.is_empty() {
					return Err(IdentifierError { kind: $kind });
				}

				Ok(Self(value))
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.debug_tuple(stringify!($name)).field(&self.0).finish()
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

identity_string! {
	/// Name of the OAuth provider a configuration targets.
	ProviderId => "Provider"
}
identity_string! {
	/// OAuth 2.0 client identifier issued by the provider.
	ClientId => "Client"
}
