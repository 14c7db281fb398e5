//! Token endpoint calls: authorization code exchange and refresh.

// self
use crate::{
	_prelude::*,
	auth::TokenData,
	client::OAuth2Client,
	error::TransportError,
	http::{HttpTransport, OutboundRequest, parse_retry_after},
	oauth::TransportErrorMapper,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::{ClientAuthMode, GrantType},
};

impl<C, M> OAuth2Client<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Exchanges an authorization code (or another grant's credential) for a token.
	///
	/// Parameters are sent in the order `grant_type, scope, code[, redirect_uri]`, followed by
	/// the client credentials when the provider expects them as parameters. The returned token
	/// has `expire_at` derived from `expires_in`.
	pub async fn exchange_token(
		&self,
		code: &str,
		grant_type: GrantType,
		redirect_uri: Option<&str>,
	) -> Result<TokenData> {
		const KIND: FlowKind = FlowKind::Exchange;

		let span = FlowSpan::new(KIND, "exchange_token", &self.config.provider_name);

		obs::record_flow_outcome(KIND, &self.config.provider_name, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let mut params = vec![
					("grant_type".to_owned(), grant_type.as_str().to_owned()),
					("scope".to_owned(), self.config.joined_scope()),
					("code".to_owned(), code.to_owned()),
				];

				if let Some(redirect_uri) = redirect_uri {
					params.push(("redirect_uri".to_owned(), redirect_uri.to_owned()));
				}

				self.request_token(KIND, params).await
			})
			.await;

		obs::record_flow_result(KIND, &self.config.provider_name, &result);

		result
	}

	/// Refreshes `token` against the token endpoint.
	///
	/// Fails with [`Error::MissingTokenField`] before any I/O when `token` has no refresh
	/// token. The previous refresh token is carried over when the provider does not rotate it,
	/// and the registered observer sees `(token, refreshed)` before the refreshed token is
	/// returned. `token` itself is never modified.
	pub async fn refresh_token(&self, token: &TokenData) -> Result<TokenData> {
		const KIND: FlowKind = FlowKind::Refresh;

		let span = FlowSpan::new(KIND, "refresh_token", &self.config.provider_name);

		obs::record_flow_outcome(KIND, &self.config.provider_name, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let refresh_token = token
					.refresh_token
					.as_ref()
					.ok_or(Error::MissingTokenField { field: "refresh_token" })?;

				self.refresh_metrics.record_attempt();

				let params = vec![
					("grant_type".to_owned(), GrantType::RefreshToken.as_str().to_owned()),
					("scope".to_owned(), self.config.joined_scope()),
					("refresh_token".to_owned(), refresh_token.expose().to_owned()),
				];
				let mut refreshed = self.request_token(KIND, params).await.inspect_err(|_| {
					self.refresh_metrics.record_failure();
				})?;

				if refreshed.refresh_token.is_none() {
					refreshed.refresh_token = Some(refresh_token.clone());
				}
				if let Some(observer) = &self.refresh_observer {
					observer.on_refresh(token, &refreshed);
				}

				self.refresh_metrics.record_success();

				Ok(refreshed)
			})
			.await;

		obs::record_flow_result(KIND, &self.config.provider_name, &result);

		result
	}

	/// Sends a token endpoint request, placing client credentials per the configured mode.
	async fn request_token(
		&self,
		flow: FlowKind,
		params: Vec<(String, String)>,
	) -> Result<TokenData> {
		let config = &self.config;
		let mut request = OutboundRequest::new(config.method, config.token_endpoint()).params(params);

		request = match config.auth_mode {
			ClientAuthMode::Header =>
				request.basic_auth(&*config.client_id, config.client_secret.expose()),
			ClientAuthMode::Params => request
				.param(&config.client_id_name, &*config.client_id)
				.param(&config.client_secret_name, config.client_secret.expose()),
		};

		let response = self.send(flow, request).await?;
		let status = response.status();

		if !status.is_success() {
			return Err(TransportError::UnexpectedStatus {
				status: status.as_u16(),
				body: String::from_utf8_lossy(response.body()).into_owned(),
				retry_after: parse_retry_after(response.headers()),
			}
			.into());
		}

		let mut deserializer = serde_json::Deserializer::from_slice(response.body());
		let token: TokenData = serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::TokenResponse { source, status: status.as_u16() })?;

		Ok(token.refined())
	}
}
