//! Token bundles exchanged with providers, plus expiry derivation and lifecycle helpers.

// self
use crate::{_prelude::*, auth::token::secret::Secret};

/// Lifecycle status of a token relative to an instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStatus {
	/// No expiry is known, or the expiry lies strictly in the future.
	Fresh,
	/// The expiry instant has been reached.
	Expired,
}

/// Opaque token bundle returned by the token endpoint and handed back by callers.
///
/// Values are never mutated in place: [`refined_at`](Self::refined_at) and the client's
/// refresh path return new bundles, leaving the caller's copy untouched. Fields the provider
/// returns beyond the standard set are preserved in [`extra`](Self::extra).
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenData {
	/// Access token presented to resource endpoints.
	pub access_token: Secret,
	/// Refresh token, if the provider issued one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<Secret>,
	/// Token type; only `bearer` (any case) is usable for resource requests.
	pub token_type: String,
	/// Scope string echoed by the provider.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub scope: Option<String>,
	/// Compact identity token (`header.claims.signature`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id_token: Option<String>,
	/// Relative lifetime in seconds, as reported by the provider.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expires_in: Option<i64>,
	/// Absolute expiry instant, derived once at ingestion from `expires_in`.
	#[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
	pub expire_at: Option<OffsetDateTime>,
	/// Provider-specific fields that are not part of the standard token response.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}
impl TokenData {
	/// Creates a bundle holding only an access token and its type.
	pub fn new(access_token: impl Into<Secret>, token_type: impl Into<String>) -> Self {
		Self {
			access_token: access_token.into(),
			refresh_token: None,
			token_type: token_type.into(),
			scope: None,
			id_token: None,
			expires_in: None,
			expire_at: None,
			extra: BTreeMap::new(),
		}
	}

	/// Sets the refresh token.
	pub fn with_refresh_token(mut self, token: impl Into<Secret>) -> Self {
		self.refresh_token = Some(token.into());

		self
	}

	/// Sets the identity token.
	pub fn with_id_token(mut self, token: impl Into<String>) -> Self {
		self.id_token = Some(token.into());

		self
	}

	/// Sets the relative lifetime in seconds.
	pub fn with_expires_in(mut self, seconds: i64) -> Self {
		self.expires_in = Some(seconds);

		self
	}

	/// Sets the absolute expiry instant.
	pub fn with_expire_at(mut self, instant: OffsetDateTime) -> Self {
		self.expire_at = Some(instant);

		self
	}

	/// Returns a copy with `expire_at` derived from `expires_in` relative to `now`.
	///
	/// Derivation only happens when `expires_in` is present and non-zero and `expire_at` is
	/// absent, so refining an already refined bundle is a no-op.
	pub fn refined_at(&self, now: OffsetDateTime) -> Self {
		let mut refined = self.clone();

		if refined.expire_at.is_some() {
			return refined;
		}
		if let Some(seconds) = refined.expires_in.filter(|seconds| *seconds != 0) {
			refined.expire_at = now.checked_add(Duration::seconds(seconds));
		}

		refined
	}

	/// Convenience helper that refines against the current UTC instant.
	pub fn refined(&self) -> Self {
		self.refined_at(OffsetDateTime::now_utc())
	}

	/// Computes the lifecycle status at a given instant.
	pub fn status_at(&self, instant: OffsetDateTime) -> TokenStatus {
		match self.expire_at {
			Some(expire_at) if expire_at <= instant => TokenStatus::Expired,
			_ => TokenStatus::Fresh,
		}
	}

	/// Returns `true` if the token has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		matches!(self.status_at(instant), TokenStatus::Expired)
	}

	/// Returns `true` if the token is expired relative to the current clock.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}

	/// Returns `true` if the token type is `bearer`, compared case-insensitively.
	pub fn is_bearer(&self) -> bool {
		self.token_type.eq_ignore_ascii_case("bearer")
	}
}
impl Debug for TokenData {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenData")
			.field("access_token", &self.access_token)
			.field("refresh_token", &self.refresh_token)
			.field("token_type", &self.token_type)
			.field("scope", &self.scope)
			.field("id_token", &self.id_token.as_ref().map(|_| "<redacted>"))
			.field("expires_in", &self.expires_in)
			.field("expire_at", &self.expire_at)
			.field("extra", &self.extra.keys().collect::<Vec<_>>())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn refine_derives_expiry_once() {
		let now = macros::datetime!(2025-01-01 00:00 UTC);
		let token = TokenData::new("access", "Bearer").with_expires_in(3600);
		let refined = token.refined_at(now);

		assert_eq!(refined.expire_at, Some(macros::datetime!(2025-01-01 01:00 UTC)));
		assert_eq!(token.expire_at, None, "The source bundle must stay untouched.");

		let again = refined.refined_at(macros::datetime!(2025-06-01 00:00 UTC));

		assert_eq!(again, refined, "Refining twice must be idempotent.");
	}

	#[test]
	fn refine_keeps_absolute_only_tokens() {
		let expire_at = macros::datetime!(2030-01-01 00:00 UTC);
		let token = TokenData::new("access", "bearer").with_expire_at(expire_at);

		assert_eq!(token.refined().expire_at, Some(expire_at));
		assert_eq!(TokenData::new("a", "bearer").with_expires_in(0).refined().expire_at, None);
	}

	#[test]
	fn status_flips_at_the_expiry_instant() {
		let expire_at = macros::datetime!(2025-01-01 01:00 UTC);
		let token = TokenData::new("access", "bearer").with_expire_at(expire_at);

		assert_eq!(token.status_at(macros::datetime!(2025-01-01 00:59 UTC)), TokenStatus::Fresh);
		assert_eq!(token.status_at(expire_at), TokenStatus::Expired);
		assert!(token.is_expired_at(macros::datetime!(2025-01-01 02:00 UTC)));
		assert_eq!(TokenData::new("a", "bearer").status_at(expire_at), TokenStatus::Fresh);
	}

	#[test]
	fn deserializes_provider_payloads_and_keeps_extras() {
		let token: TokenData = serde_json::from_str(
			"{\"access_token\":\"a1\",\"token_type\":\"Bearer\",\"expires_in\":21600,\"refresh_token\":\"r1\",\"athlete\":{\"id\":7}}",
		)
		.expect("Strava-style token payload should deserialize.");

		assert_eq!(token.access_token.expose(), "a1");
		assert_eq!(token.refresh_token.as_ref().map(Secret::expose), Some("r1"));
		assert!(token.is_bearer());
		assert_eq!(token.extra.get("athlete"), Some(&serde_json::json!({ "id": 7 })));

		let encoded = serde_json::to_value(token.refined_at(macros::datetime!(2025-01-01 00:00 UTC)))
			.expect("Token should serialize.");

		assert_eq!(encoded["expire_at"], "2025-01-01T06:00:00Z");
		assert_eq!(encoded["athlete"]["id"], 7);
	}

	#[test]
	fn debug_output_redacts_secrets() {
		let token = TokenData::new("visible?", "bearer").with_id_token("a.b.c");
		let rendered = format!("{token:?}");

		assert!(!rendered.contains("visible?"));
		assert!(!rendered.contains("a.b.c"));
	}
}
