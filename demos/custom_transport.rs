//! Demonstrates registering a custom HTTP transport and error mapper.
//!
//! 1. Implement [`HttpTransport`] so the client can obtain an [`AsyncHttpClient`] handle.
//! 2. Provide a [`TransportErrorMapper`] that understands the transport's error type.
//! 3. Pass both to [`OAuth2Client::with_http_client`].
//!
//! The transport below answers every token request with a canned token and every resource
//! request with a canned profile, so the demo runs offline.

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
};
// crates.io
use color_eyre::Result;
// self
use oauth2_quirks::{
	auth::TokenData,
	client::OAuth2Client,
	error::{Error, TransportError},
	http::HttpTransport,
	oauth::{
		TransportErrorMapper,
		oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse},
	},
	obs::FlowKind,
	provider::{GrantType, ProviderConfig, SupportedProvider},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config =
		ProviderConfig::for_provider(SupportedProvider::Strava, "demo-client", "demo-secret")?;
	let client: OAuth2Client<CannedHttpClient, CannedTransportErrorMapper> =
		OAuth2Client::with_http_client(config, CannedHttpClient, CannedTransportErrorMapper)
			.with_refresh_observer(|previous: &TokenData, refreshed: &TokenData| {
				println!(
					"Refreshed token (was {:?}, now expires at {:?}).",
					previous.expire_at, refreshed.expire_at
				);
			});
	let token = client.exchange_token("demo-code", GrantType::AuthorizationCode, None).await?;

	println!("Exchanged code; token expires at {:?}.", token.expire_at);

	let profile = client.get_profile(&token, None, None, None).await?;

	println!("Signed in as {:?} ({:?}).", profile.sub, profile.name);

	let refreshed = client.refresh_token(&token).await?;

	println!("Refresh kept the refresh token: {}.", refreshed.refresh_token.is_some());

	Ok(())
}

#[derive(Debug)]
struct CannedTransportError;
impl Display for CannedTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Canned transport failed.")
	}
}
impl StdError for CannedTransportError {}

#[derive(Clone, Copy, Debug, Default)]
struct CannedHttpClient;
impl HttpTransport for CannedHttpClient {
	type Handle = CannedHandle;
	type TransportError = CannedTransportError;

	fn handle(&self) -> Self::Handle {
		CannedHandle
	}
}

struct CannedHandle;
impl<'c> AsyncHttpClient<'c> for CannedHandle {
	type Error = HttpClientError<CannedTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let body = if request.uri().path().ends_with("/oauth/token") {
			r#"{"access_token":"demo-access","token_type":"Bearer","expires_in":21600,"refresh_token":"demo-refresh"}"#
		} else {
			r#"{"id":134815,"firstname":"Marianne","name":"Marianne V."}"#
		};

		Box::pin(async move { Ok(HttpResponse::new(body.as_bytes().to_vec())) })
	}
}

#[derive(Clone, Copy, Debug, Default)]
struct CannedTransportErrorMapper;
impl TransportErrorMapper<CannedTransportError> for CannedTransportErrorMapper {
	fn map_transport_error(
		&self,
		flow: FlowKind,
		err: HttpClientError<CannedTransportError>,
	) -> Error {
		TransportError::Other { message: format!("{flow} failed: {err}") }.into()
	}
}
