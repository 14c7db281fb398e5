//! Protected resource requests with transparent refresh of expired tokens.

// std
use std::borrow::Cow;
// self
use crate::{
	_prelude::*,
	auth::{TokenData, TokenStatus},
	client::OAuth2Client,
	http::{HttpTransport, OutboundRequest},
	oauth::TransportErrorMapper,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::{AccessTokenMethod, RequestMethod},
};

/// Extra parameters sent with a resource request, in key order.
pub type ResourceParams = BTreeMap<String, String>;

impl<C, M> OAuth2Client<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches a protected resource with `token`.
	///
	/// `request_method` defaults to the configured method. Combinations that cannot carry the
	/// access token (`post` with `uri-query`, `get` with `form-encoded`) fail before any
	/// request is made. An expired token is refreshed exactly once; the refreshed token is used
	/// for this call only and reaches callers through the refresh observer.
	///
	/// Status 200 yields the decoded JSON body, or the raw body as a JSON string when it is not
	/// JSON. Any other status fails with [`Error::Resource`].
	pub async fn get_resource(
		&self,
		url: &str,
		params: &ResourceParams,
		token: &TokenData,
		request_method: Option<RequestMethod>,
	) -> Result<Value> {
		const KIND: FlowKind = FlowKind::Resource;

		let span = FlowSpan::new(KIND, "get_resource", &self.config.provider_name);

		obs::record_flow_outcome(KIND, &self.config.provider_name, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let method = request_method.unwrap_or(self.config.method);
				let auth_method = self.config.auth_method;

				if !auth_method.compatible_with(method) {
					return Err(Error::InvalidMethodCombination { request_method: method, auth_method });
				}

				let token = match token.status_at(OffsetDateTime::now_utc()) {
					TokenStatus::Fresh => Cow::Borrowed(token),
					TokenStatus::Expired => {
						self.refresh_metrics.record_expired();
						obs::record_expired_token(token.expire_at);

						Cow::Owned(self.refresh_token(token).await?)
					},
				};

				if !token.is_bearer() {
					return Err(Error::UnsupportedTokenType { token_type: token.token_type.clone() });
				}

				let mut request = OutboundRequest::new(method, url)
					.params(params.iter().map(|(name, value)| (name.as_str(), value.as_str())));

				request = match auth_method {
					AccessTokenMethod::Header => request.bearer(token.access_token.expose()),
					AccessTokenMethod::FormEncoded | AccessTokenMethod::UriQuery =>
						request.param("access_token", token.access_token.expose()),
				};

				let response = self.send(KIND, request).await?;
				let status = response.status().as_u16();

				if status != 200 {
					return Err(Error::Resource {
						status,
						body: String::from_utf8_lossy(response.body()).into_owned(),
					});
				}

				Ok(serde_json::from_slice(response.body()).unwrap_or_else(|_| {
					Value::String(String::from_utf8_lossy(response.body()).into_owned())
				}))
			})
			.await;

		obs::record_flow_result(KIND, &self.config.provider_name, &result);

		result
	}
}
