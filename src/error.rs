//! Client-level error types shared across token, resource, and profile operations.

// self
use crate::{
	_prelude::*,
	auth::IdTokenError,
	provider::{AccessTokenMethod, ProviderConfigError, RequestMethod},
};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure or non-success status from the token endpoint.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Identity token could not be decoded.
	#[error(transparent)]
	IdToken(#[from] IdTokenError),

	/// Token lacks a field the requested operation depends on.
	#[error("Token is missing the `{field}` field.")]
	MissingTokenField {
		/// Name of the absent token field.
		field: &'static str,
	},
	/// Token type is not `bearer`.
	#[error("Token type `{token_type}` is not supported; expected a bearer token.")]
	UnsupportedTokenType {
		/// Token type reported by the provider.
		token_type: String,
	},
	/// Request method cannot carry the access token the way the provider expects.
	#[error(
		"Request method `{request_method}` cannot present the access token using `{auth_method}`."
	)]
	InvalidMethodCombination {
		/// Method chosen for the resource request.
		request_method: RequestMethod,
		/// Configured access token presentation.
		auth_method: AccessTokenMethod,
	},
	/// Resource endpoint answered with a non-200 status.
	#[error("Resource request failed with status {status}: {body}.")]
	Resource {
		/// HTTP status code returned by the resource endpoint.
		status: u16,
		/// Raw response body, kept for diagnostics.
		body: String,
	},
	/// Token endpoint responded with a body that is not a token document.
	#[error("Token endpoint returned a malformed token response.")]
	TokenResponse {
		/// Structured parsing failure, including the offending JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Profile endpoint returned something other than a JSON object.
	#[error("Profile endpoint returned a non-object payload: {body}.")]
	ProfileResponse {
		/// Raw payload rendered as JSON.
		body: String,
	},
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Provider configuration failed validation.
	#[error(transparent)]
	Provider(#[from] ProviderConfigError),
	/// Provider name is not one of the built-in presets.
	#[error("Provider `{name}` has no built-in configuration.")]
	UnknownProvider {
		/// Name that failed the lookup.
		name: String,
	},
	/// Neither an identity token, an explicit URL, nor a configured profile URL is available.
	#[error("Neither an id_token, an explicit URL, nor a configured profile URL is available.")]
	MissingProfileUrl,
	/// A request URL could not be parsed.
	#[error("URL `{url}` is invalid.")]
	InvalidUrl {
		/// URL that failed to parse.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	pub(crate) fn invalid_url(url: &str, source: url::ParseError) -> Self {
		Self::InvalidUrl { url: url.to_owned(), source }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
impl From<ProviderConfigError> for Error {
	fn from(e: ProviderConfigError) -> Self {
		ConfigError::from(e).into()
	}
}

/// Transport-level failures (network, IO, unexpected token endpoint status).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
	/// Transport reported a failure that carries only a message.
	#[error("HTTP client error occurred while calling the provider: {message}.")]
	Other {
		/// Message supplied by the transport.
		message: String,
	},
	/// Token endpoint answered with a non-success status.
	#[error("Token endpoint responded with status {status}: {body}.")]
	UnexpectedStatus {
		/// HTTP status code.
		status: u16,
		/// Raw response body.
		body: String,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn messages_carry_diagnostics() {
		let err = Error::Resource { status: 403, body: "{\"error\":\"denied\"}".into() };

		assert_eq!(err.to_string(), "Resource request failed with status 403: {\"error\":\"denied\"}.");

		let err = Error::InvalidMethodCombination {
			request_method: RequestMethod::Post,
			auth_method: AccessTokenMethod::UriQuery,
		};

		assert_eq!(
			err.to_string(),
			"Request method `post` cannot present the access token using `uri-query`."
		);
	}

	#[test]
	fn provider_errors_lift_into_config() {
		let err = Error::from(ProviderConfigError::MissingField { field: "client_id" });

		assert!(matches!(err, Error::Config(ConfigError::Provider(_))));
	}
}
