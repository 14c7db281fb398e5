// self
use crate::{
	_prelude::*,
	auth::{ClientId, IdentifierError, ProviderId, ScopeList, ScopeValidationError, Secret},
	provider::{AccessTokenMethod, ClientAuthMode, ProviderConfig, RequestMethod},
};

/// Errors raised while constructing or validating provider configurations.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ProviderConfigError {
	/// A required field was not supplied (or is empty).
	#[error("Provider configuration is missing `{field}`.")]
	MissingField {
		/// Name of the missing field.
		field: &'static str,
	},
	/// An endpoint does not form an absolute URL.
	#[error("The {endpoint} endpoint is not a valid URL: {url}.")]
	InvalidEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Provider or client identifier failed validation.
	#[error(transparent)]
	Identifier(#[from] IdentifierError),
	/// Scope list failed validation.
	#[error(transparent)]
	Scope(#[from] ScopeValidationError),
	/// Scope separators must be non-empty and printable.
	#[error("Scope separator {separator:?} must be non-empty and printable.")]
	InvalidScopeSeparator {
		/// Invalid separator that was supplied.
		separator: String,
	},
}

/// Builder for [`ProviderConfig`] values, seeded with the documented defaults.
///
/// Deserializing a [`ProviderConfig`] goes through this builder, so partial documents merge
/// over the same defaults and pass the same validation.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ProviderConfigBuilder {
	/// Provider name.
	pub provider_name: Option<ProviderId>,
	/// OAuth client identifier.
	pub client_id: Option<ClientId>,
	/// OAuth client secret.
	pub client_secret: Option<Secret>,
	/// Host serving the authorization endpoint.
	pub auth_host: Option<String>,
	/// Host serving the token endpoint (defaults to `auth_host`).
	pub token_host: Option<String>,
	/// Path of the authorization endpoint.
	pub auth_uri: Option<String>,
	/// Path of the token endpoint.
	pub token_uri: Option<String>,
	/// Requested scopes.
	pub scope: ScopeList,
	/// Scope separator (defaults to `,`).
	pub scope_separator: String,
	/// Client identifier parameter name (defaults to `client_id`).
	pub client_id_name: String,
	/// Client secret parameter name (defaults to `client_secret`).
	pub client_secret_name: String,
	/// Redirect parameter name (defaults to `redirect_uri`).
	pub redirect_name: String,
	/// Token endpoint verb (defaults to POST).
	pub method: RequestMethod,
	/// Client credential placement (defaults to the basic-auth header).
	pub auth_mode: ClientAuthMode,
	/// Access token placement (defaults to the bearer header).
	pub auth_method: AccessTokenMethod,
	/// Optional profile endpoint.
	pub profile_url: Option<String>,
}
impl ProviderConfigBuilder {
	/// Creates a new builder seeded with the provided name.
	pub fn new(provider_name: ProviderId) -> Self {
		Self { provider_name: Some(provider_name), ..Default::default() }
	}

	/// Sets the client identifier.
	pub fn client_id(mut self, client_id: ClientId) -> Self {
		self.client_id = Some(client_id);

		self
	}

	/// Sets the client secret.
	pub fn client_secret(mut self, secret: impl Into<Secret>) -> Self {
		self.client_secret = Some(secret.into());

		self
	}

	/// Sets the authorization host (for example `https://accounts.google.com`).
	pub fn auth_host(mut self, host: impl Into<String>) -> Self {
		self.auth_host = Some(host.into());

		self
	}

	/// Sets a dedicated token host.
	pub fn token_host(mut self, host: impl Into<String>) -> Self {
		self.token_host = Some(host.into());

		self
	}

	/// Sets the authorization endpoint path.
	pub fn auth_uri(mut self, uri: impl Into<String>) -> Self {
		self.auth_uri = Some(uri.into());

		self
	}

	/// Sets the token endpoint path.
	pub fn token_uri(mut self, uri: impl Into<String>) -> Self {
		self.token_uri = Some(uri.into());

		self
	}

	/// Sets the requested scopes.
	pub fn scope(mut self, scope: ScopeList) -> Self {
		self.scope = scope;

		self
	}

	/// Overrides the scope separator.
	pub fn scope_separator(mut self, separator: impl Into<String>) -> Self {
		self.scope_separator = separator.into();

		self
	}

	/// Overrides the client identifier parameter name.
	pub fn client_id_name(mut self, name: impl Into<String>) -> Self {
		self.client_id_name = name.into();

		self
	}

	/// Overrides the client secret parameter name.
	pub fn client_secret_name(mut self, name: impl Into<String>) -> Self {
		self.client_secret_name = name.into();

		self
	}

	/// Overrides the redirect parameter name.
	pub fn redirect_name(mut self, name: impl Into<String>) -> Self {
		self.redirect_name = name.into();

		self
	}

	/// Overrides the token endpoint verb.
	pub fn method(mut self, method: RequestMethod) -> Self {
		self.method = method;

		self
	}

	/// Overrides the client credential placement.
	pub fn auth_mode(mut self, mode: ClientAuthMode) -> Self {
		self.auth_mode = mode;

		self
	}

	/// Overrides the access token placement.
	pub fn auth_method(mut self, method: AccessTokenMethod) -> Self {
		self.auth_method = method;

		self
	}

	/// Sets the profile endpoint.
	pub fn profile_url(mut self, url: impl Into<String>) -> Self {
		self.profile_url = Some(url.into());

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ProviderConfig, ProviderConfigError> {
		let provider_name =
			self.provider_name.ok_or(ProviderConfigError::MissingField { field: "provider_name" })?;
		let client_id =
			self.client_id.ok_or(ProviderConfigError::MissingField { field: "client_id" })?;
		let client_secret = self
			.client_secret
			.filter(|secret| !secret.is_empty())
			.ok_or(ProviderConfigError::MissingField { field: "client_secret" })?;
		let auth_host = required(self.auth_host, "auth_host")?;
		let auth_uri = required(self.auth_uri, "auth_uri")?;
		let token_uri = required(self.token_uri, "token_uri")?;
		let token_host =
			self.token_host.filter(|host| !host.is_empty()).unwrap_or_else(|| auth_host.clone());
		let config = ProviderConfig {
			provider_name,
			client_id,
			client_secret,
			auth_host,
			token_host,
			auth_uri,
			token_uri,
			scope: self.scope,
			scope_separator: self.scope_separator,
			client_id_name: required(Some(self.client_id_name), "client_id_name")?,
			client_secret_name: required(Some(self.client_secret_name), "client_secret_name")?,
			redirect_name: required(Some(self.redirect_name), "redirect_name")?,
			method: self.method,
			auth_mode: self.auth_mode,
			auth_method: self.auth_method,
			profile_url: self.profile_url.filter(|url| !url.is_empty()),
		};

		config.validate()?;

		Ok(config)
	}
}
impl Default for ProviderConfigBuilder {
	fn default() -> Self {
		Self {
			provider_name: None,
			client_id: None,
			client_secret: None,
			auth_host: None,
			token_host: None,
			auth_uri: None,
			token_uri: None,
			scope: ScopeList::default(),
			scope_separator: ",".into(),
			client_id_name: "client_id".into(),
			client_secret_name: "client_secret".into(),
			redirect_name: "redirect_uri".into(),
			method: RequestMethod::default(),
			auth_mode: ClientAuthMode::default(),
			auth_method: AccessTokenMethod::default(),
			profile_url: None,
		}
	}
}
impl TryFrom<ProviderConfigBuilder> for ProviderConfig {
	type Error = ProviderConfigError;

	fn try_from(builder: ProviderConfigBuilder) -> Result<Self, Self::Error> {
		builder.build()
	}
}

impl ProviderConfig {
	/// Validates invariants for the configuration.
	fn validate(&self) -> Result<(), ProviderConfigError> {
		validate_endpoint("authorization", &self.authorize_endpoint())?;
		validate_endpoint("token", &self.token_endpoint())?;

		if let Some(profile_url) = self.profile_url.as_deref() {
			validate_endpoint("profile", profile_url)?;
		}

		validate_scope_separator(&self.scope_separator)
	}
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ProviderConfigError> {
	value.filter(|value| !value.is_empty()).ok_or(ProviderConfigError::MissingField { field })
}

fn validate_endpoint(endpoint: &'static str, url: &str) -> Result<(), ProviderConfigError> {
	Url::parse(url).map(|_| ()).map_err(|source| ProviderConfigError::InvalidEndpoint {
		endpoint,
		url: url.to_owned(),
		source,
	})
}

fn validate_scope_separator(separator: &str) -> Result<(), ProviderConfigError> {
	if separator.is_empty() || separator.chars().any(char::is_control) {
		Err(ProviderConfigError::InvalidScopeSeparator { separator: separator.to_owned() })
	} else {
		Ok(())
	}
}
