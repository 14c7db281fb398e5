//! Profile resolution from identity tokens or profile endpoints.

// self
use crate::{
	_prelude::*,
	auth::{Profile, TokenData, decode_id_token},
	client::{OAuth2Client, ResourceParams},
	error::ConfigError,
	http::HttpTransport,
	oauth::TransportErrorMapper,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::RequestMethod,
};

impl<C, M> OAuth2Client<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Resolves the user's profile.
	///
	/// A decodable identity token wins. Otherwise the profile is fetched from `url`, or the
	/// configured profile URL, through [`get_resource`](Self::get_resource); a payload with
	/// `id` but no `sub` has `id` copied into `sub`.
	pub async fn get_profile(
		&self,
		token: &TokenData,
		url: Option<&str>,
		params: Option<&ResourceParams>,
		request_method: Option<RequestMethod>,
	) -> Result<Profile> {
		const KIND: FlowKind = FlowKind::Profile;

		let span = FlowSpan::new(KIND, "get_profile", &self.config.provider_name);

		obs::record_flow_outcome(KIND, &self.config.provider_name, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				if let Some(raw) = token.id_token.as_deref() {
					match decode_id_token(raw) {
						Ok(claims) => return Ok(claims.into()),
						Err(e) => obs::record_id_token_fallback(&e),
					}
				}

				let url = url
					.or(self.config.profile_url.as_deref())
					.ok_or(ConfigError::MissingProfileUrl)?;
				let empty = ResourceParams::new();
				let payload = self
					.get_resource(url, params.unwrap_or(&empty), token, request_method)
					.await?;

				Profile::from_resource(payload)
					.map_err(|payload| Error::ProfileResponse { body: payload.to_string() })
			})
			.await;

		obs::record_flow_result(KIND, &self.config.provider_name, &result);

		result
	}

	/// Decodes the token's identity token into a [`Profile`] without verifying its signature.
	///
	/// `email` is read from the token's `email` claim. Earlier clients copied `sub` into
	/// `email`; callers that relied on that must read [`Profile::sub`] instead.
	pub fn extract_id_token(&self, token: &TokenData) -> Result<Profile> {
		let raw =
			token.id_token.as_deref().ok_or(Error::MissingTokenField { field: "id_token" })?;

		Ok(decode_id_token(raw)?.into())
	}
}
