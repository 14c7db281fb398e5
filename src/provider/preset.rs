//! Built-in provider presets.
//!
//! The preset set is closed: [`SupportedProvider`] enumerates every provider with a built-in
//! configuration and [`PRESETS`] maps each one to its constructor. Adding a provider means
//! adding a variant and a table row.

// self
use crate::{
	_prelude::*,
	auth::{ClientId, ProviderId, ScopeList},
	error::ConfigError,
	provider::{ProviderConfig, ProviderConfigBuilder, ProviderConfigError, RequestMethod},
};

/// Constructor signature shared by every preset: `(client_id, client_secret)`.
pub type PresetFn = fn(&str, &str) -> Result<ProviderConfig, ProviderConfigError>;

/// Closed table of preset constructors.
pub const PRESETS: [(SupportedProvider, PresetFn); 3] = [
	(SupportedProvider::Google, google),
	(SupportedProvider::Facebook, facebook),
	(SupportedProvider::Strava, strava),
];

/// Providers with a built-in configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedProvider {
	/// Google accounts (OpenID Connect).
	Google,
	/// Facebook Login.
	Facebook,
	/// Strava.
	Strava,
}
impl SupportedProvider {
	/// Every supported provider, in table order.
	pub const ALL: [SupportedProvider; 3] =
		[SupportedProvider::Google, SupportedProvider::Facebook, SupportedProvider::Strava];

	/// Returns the lowercase provider name.
	pub fn as_str(self) -> &'static str {
		match self {
			SupportedProvider::Google => "google",
			SupportedProvider::Facebook => "facebook",
			SupportedProvider::Strava => "strava",
		}
	}

	fn constructor(self) -> PresetFn {
		// Rows follow declaration order.
		PRESETS[self as usize].1
	}
}
impl Display for SupportedProvider {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for SupportedProvider {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|provider| provider.as_str() == s)
			.ok_or_else(|| ConfigError::UnknownProvider { name: s.to_owned() })
	}
}

impl ProviderConfig {
	/// Returns the complete preset configuration for `provider`.
	pub fn for_provider(
		provider: SupportedProvider,
		client_id: &str,
		client_secret: &str,
	) -> Result<Self, ProviderConfigError> {
		(provider.constructor())(client_id, client_secret)
	}

	/// Looks `name` up in the preset table.
	///
	/// Names outside the table fail with [`ConfigError::UnknownProvider`].
	pub fn by_name(name: &str, client_id: &str, client_secret: &str) -> Result<Self> {
		let provider = name.parse::<SupportedProvider>()?;

		Ok(Self::for_provider(provider, client_id, client_secret)?)
	}
}

fn preset(
	provider: SupportedProvider,
	client_id: &str,
	client_secret: &str,
	scope: &[&str],
) -> Result<ProviderConfigBuilder, ProviderConfigError> {
	Ok(ProviderConfig::builder(ProviderId::new(provider.as_str())?)
		.client_id(ClientId::new(client_id)?)
		.client_secret(client_secret)
		.scope(ScopeList::new(scope.iter().copied())?))
}

fn google(client_id: &str, client_secret: &str) -> Result<ProviderConfig, ProviderConfigError> {
	preset(SupportedProvider::Google, client_id, client_secret, &["openid", "profile", "email"])?
		.auth_host("https://accounts.google.com")
		.auth_uri("/o/oauth2/v2/auth")
		.token_host("https://www.googleapis.com")
		.token_uri("/oauth2/v4/token")
		.scope_separator(" ")
		.method(RequestMethod::Post)
		.profile_url("https://www.googleapis.com/oauth2/v3/userinfo")
		.build()
}

fn facebook(client_id: &str, client_secret: &str) -> Result<ProviderConfig, ProviderConfigError> {
	preset(SupportedProvider::Facebook, client_id, client_secret, &[])?
		.auth_host("https://www.facebook.com")
		.auth_uri("/v17.0/dialog/oauth")
		.token_host("https://graph.facebook.com")
		.token_uri("/v17.0/oauth/access_token")
		.method(RequestMethod::Get)
		.profile_url("https://graph.facebook.com/me")
		.build()
}

fn strava(client_id: &str, client_secret: &str) -> Result<ProviderConfig, ProviderConfigError> {
	preset(
		SupportedProvider::Strava,
		client_id,
		client_secret,
		&["profile:read_all", "activity:read_all"],
	)?
	.auth_host("https://www.strava.com")
	.auth_uri("/oauth/authorize")
	.token_uri("/api/v3/oauth/token")
	.scope_separator(",")
	.method(RequestMethod::Post)
	.profile_url("https://www.strava.com/api/v3/athlete")
	.build()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::provider::AccessTokenMethod;

	#[test]
	fn table_covers_every_provider_once() {
		for provider in SupportedProvider::ALL {
			assert_eq!(PRESETS.iter().filter(|(p, _)| *p == provider).count(), 1);
			assert_eq!(PRESETS[provider as usize].0, provider);

			let config = ProviderConfig::for_provider(provider, "id", "secret")
				.expect("Preset should build.");

			assert_eq!(&*config.provider_name, provider.as_str());
			assert_eq!(config.auth_method, AccessTokenMethod::Header);
			assert!(config.profile_url.is_some());
		}
	}

	#[test]
	fn presets_match_provider_documentation() {
		let google = ProviderConfig::for_provider(SupportedProvider::Google, "id", "secret")
			.expect("Google preset should build.");

		assert_eq!(google.authorize_endpoint(), "https://accounts.google.com/o/oauth2/v2/auth");
		assert_eq!(google.token_endpoint(), "https://www.googleapis.com/oauth2/v4/token");
		assert_eq!(google.joined_scope(), "openid profile email");

		let facebook = ProviderConfig::for_provider(SupportedProvider::Facebook, "id", "secret")
			.expect("Facebook preset should build.");

		assert_eq!(facebook.method, RequestMethod::Get);
		assert_eq!(facebook.joined_scope(), "");

		let strava = ProviderConfig::for_provider(SupportedProvider::Strava, "id", "secret")
			.expect("Strava preset should build.");

		assert_eq!(strava.token_endpoint(), "https://www.strava.com/api/v3/oauth/token");
		assert_eq!(strava.joined_scope(), "profile:read_all,activity:read_all");
	}

	#[test]
	fn unknown_names_are_rejected() {
		let err = ProviderConfig::by_name("github", "id", "secret")
			.expect_err("Unknown provider must be rejected.");

		assert!(matches!(
			err,
			Error::Config(ConfigError::UnknownProvider { ref name }) if name == "github"
		));
		assert_eq!("strava".parse::<SupportedProvider>().ok(), Some(SupportedProvider::Strava));
	}
}
