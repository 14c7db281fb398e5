//! Builds authorization URLs for every built-in provider and shows how a custom provider is
//! configured from a JSON document.

// crates.io
use color_eyre::Result;
// self
use oauth2_quirks::{
	client::{OAuth2Client, random_state},
	provider::{ProviderConfig, ResponseType, SupportedProvider},
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let state = random_state();

	for provider in SupportedProvider::ALL {
		let config = ProviderConfig::for_provider(provider, "demo-client", "demo-secret")?;
		let client = OAuth2Client::new(config);

		println!(
			"{provider}: {}",
			client.generate_authorize_url(
				"https://app.example.com/oauth/callback",
				Some(&state),
				ResponseType::Code
			)
		);
	}

	let custom: ProviderConfig = serde_json::from_str(
		r#"{
			"provider_name": "acme",
			"client_id": "demo-client",
			"client_secret": "demo-secret",
			"auth_host": "https://login.acme.example",
			"auth_uri": "/oauth/authorize",
			"token_host": "https://api.acme.example",
			"token_uri": "/oauth/token",
			"scope": ["profile", "email"],
			"scope_separator": " ",
			"auth_mode": "params",
			"auth_method": "uri-query",
			"method": "get"
		}"#,
	)?;

	println!("Token endpoint for {}: {}.", custom.provider_name, custom.token_endpoint());
	println!(
		"acme: {}",
		OAuth2Client::new(custom).generate_authorize_url(
			"https://app.example.com/oauth/callback",
			None,
			ResponseType::Code
		)
	);

	Ok(())
}
