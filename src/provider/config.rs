//! Provider configuration: endpoints, credentials, and request quirks.
//!
//! A [`ProviderConfig`] is pure data. It is built once, either from a preset or through
//! [`ProviderConfigBuilder`], and then owned by a client for its whole lifetime.

/// Builder API for assembling provider configurations.
pub mod builder;
/// Grant and response type labels.
pub mod grant;
/// Provider-specific request quirks.
pub mod quirks;

pub use builder::*;
pub use grant::*;
pub use quirks::*;

// self
use crate::{
	_prelude::*,
	auth::{ClientId, ProviderId, ScopeList, Secret},
};

/// Immutable provider configuration consumed by the client.
///
/// Endpoints are composed by plain string concatenation (`host + uri`), matching how
/// providers document them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProviderConfigBuilder")]
pub struct ProviderConfig {
	/// Provider name.
	pub provider_name: ProviderId,
	/// OAuth client identifier.
	pub client_id: ClientId,
	/// OAuth client secret.
	pub client_secret: Secret,
	/// Host serving the authorization endpoint.
	pub auth_host: String,
	/// Host serving the token endpoint; resolved to `auth_host` when not configured.
	pub token_host: String,
	/// Path of the authorization endpoint.
	pub auth_uri: String,
	/// Path of the token endpoint.
	pub token_uri: String,
	/// Requested scopes, in order.
	pub scope: ScopeList,
	/// Separator used to join [`scope`](Self::scope).
	pub scope_separator: String,
	/// Parameter name for the client identifier.
	pub client_id_name: String,
	/// Parameter name for the client secret.
	pub client_secret_name: String,
	/// Parameter name for the redirect URL on authorize URLs.
	pub redirect_name: String,
	/// Verb used for token exchange and refresh.
	pub method: RequestMethod,
	/// Placement of client credentials on token endpoint calls.
	pub auth_mode: ClientAuthMode,
	/// Placement of the access token on resource requests.
	pub auth_method: AccessTokenMethod,
	/// Profile endpoint used when no identity token is available.
	pub profile_url: Option<String>,
}
impl ProviderConfig {
	/// Creates a new builder for the provided provider name.
	pub fn builder(provider_name: ProviderId) -> ProviderConfigBuilder {
		ProviderConfigBuilder::new(provider_name)
	}

	/// Full authorization endpoint (`auth_host + auth_uri`).
	pub fn authorize_endpoint(&self) -> String {
		format!("{}{}", self.auth_host, self.auth_uri)
	}

	/// Full token endpoint (`token_host + token_uri`).
	pub fn token_endpoint(&self) -> String {
		format!("{}{}", self.token_host, self.token_uri)
	}

	/// Scope parameter value, joined with the configured separator.
	pub fn joined_scope(&self) -> String {
		self.scope.join(&self.scope_separator)
	}
}
