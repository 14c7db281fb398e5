//! Unverified identity token claim extraction.
//!
//! Identity tokens are compact `header.claims.signature` strings. This module only reads the
//! claims segment; signatures are not validated, so callers must obtain tokens directly from
//! the provider's token endpoint over TLS.

// crates.io
use base64::{
	Engine as _, alphabet,
	engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
// self
use crate::_prelude::*;

const LENIENT: GeneralPurposeConfig =
	GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// Failures raised while decoding an identity token.
#[derive(Debug, ThisError)]
pub enum IdTokenError {
	/// The token is not made of three dot-separated segments.
	#[error("Identity token must have 3 dot-separated segments, found {segments}.")]
	Malformed {
		/// Number of segments found.
		segments: usize,
	},
	/// The claims segment is not valid base64.
	#[error("Identity token claims are not valid base64.")]
	Base64(#[from] base64::DecodeError),
	/// The claims segment is not a JSON object.
	#[error("Identity token claims are not a JSON object.")]
	Claims(#[from] serde_json::Error),
}

/// Claims read from an identity token.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IdTokenClaims {
	/// Subject identifier.
	#[serde(default)]
	pub sub: Option<String>,
	/// Email address claim.
	#[serde(default)]
	pub email: Option<String>,
	/// Whether the provider verified the email address.
	#[serde(default, deserialize_with = "lenient_bool")]
	pub email_verified: Option<bool>,
	/// Avatar URL.
	#[serde(default)]
	pub picture: Option<String>,
	/// Display name.
	#[serde(default)]
	pub name: Option<String>,
	/// Remaining claims (`iss`, `aud`, `exp`, ...).
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}

/// Decodes the claims segment of a compact identity token without verifying its signature.
pub fn decode_id_token(raw: &str) -> Result<IdTokenClaims, IdTokenError> {
	let segments = raw.split('.').collect::<Vec<_>>();

	if segments.len() != 3 {
		return Err(IdTokenError::Malformed { segments: segments.len() });
	}

	let payload = segments[1];
	let bytes = URL_SAFE_LENIENT.decode(payload).or_else(|_| STANDARD_LENIENT.decode(payload))?;

	Ok(serde_json::from_slice(&bytes)?)
}

/// Accepts booleans and the strings `"true"`/`"false"`, which some providers emit.
pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	Ok(match Option::<Value>::deserialize(deserializer)? {
		Some(value) => bool_from_value(&value),
		None => None,
	})
}

pub(crate) fn bool_from_value(value: &Value) -> Option<bool> {
	match value {
		Value::Bool(flag) => Some(*flag),
		Value::String(text) if text.eq_ignore_ascii_case("true") => Some(true),
		Value::String(text) if text.eq_ignore_ascii_case("false") => Some(false),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
	// self
	use super::*;

	fn compact(claims: &Value) -> String {
		format!("eyJhbGciOiJub25lIn0.{}.sig", URL_SAFE_NO_PAD.encode(claims.to_string()))
	}

	#[test]
	fn decodes_claims_segment() {
		let raw = compact(&serde_json::json!({
			"sub": "1100",
			"email": "ada@example.com",
			"email_verified": "true",
			"name": "Ada",
			"iss": "https://accounts.google.com"
		}));
		let claims = decode_id_token(&raw).expect("Well-formed identity token should decode.");

		assert_eq!(claims.sub.as_deref(), Some("1100"));
		assert_eq!(claims.email.as_deref(), Some("ada@example.com"));
		assert_eq!(claims.email_verified, Some(true));
		assert_eq!(claims.picture, None);
		assert_eq!(claims.extra.get("iss"), Some(&Value::from("https://accounts.google.com")));
	}

	#[test]
	fn accepts_padded_standard_alphabet() {
		let payload = STANDARD.encode("{\"sub\":\"??>\"}");
		let claims = decode_id_token(&format!("h.{payload}.s"))
			.expect("Standard alphabet with padding should decode.");

		assert_eq!(claims.sub.as_deref(), Some("??>"));
	}

	#[test]
	fn rejects_malformed_tokens() {
		assert!(matches!(
			decode_id_token("not-a-jwt"),
			Err(IdTokenError::Malformed { segments: 1 })
		));
		assert!(matches!(decode_id_token("a.%%%.c"), Err(IdTokenError::Base64(_))));

		let not_json = URL_SAFE_NO_PAD.encode("plain text");

		assert!(matches!(decode_id_token(&format!("a.{not_json}.c")), Err(IdTokenError::Claims(_))));
	}
}
