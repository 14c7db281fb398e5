//! Normalized user profile resolved from identity tokens or profile endpoints.

// crates.io
use serde_json::Map;
// self
use crate::{
	_prelude::*,
	auth::id_token::{IdTokenClaims, bool_from_value, lenient_bool},
};

/// Normalized, read-only user profile.
///
/// `sub` is the canonical subject identifier. Profile endpoints that only return `id`
/// (Facebook, Strava) have it copied into `sub`; every other field of the payload is kept
/// in [`extra`](Self::extra).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
	/// Subject identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sub: Option<String>,
	/// Email address.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Whether the provider verified the email address.
	#[serde(default, deserialize_with = "lenient_bool", skip_serializing_if = "Option::is_none")]
	pub email_verified: Option<bool>,
	/// Avatar URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub picture: Option<String>,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Remaining fields returned by the provider.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}
impl Profile {
	/// Shapes a profile endpoint payload, copying `id` into `sub` when `sub` is absent.
	///
	/// Fields with unexpected types (for example Facebook's nested `picture` object) stay in
	/// `extra` instead of failing the conversion. Non-object payloads are handed back as the
	/// error.
	pub fn from_resource(payload: Value) -> Result<Self, Value> {
		let Value::Object(mut fields) = payload else {
			return Err(payload);
		};
		let sub = take_identifier(&mut fields, "sub")
			.or_else(|| fields.get("id").and_then(identifier_from_value));
		let email = take_string(&mut fields, "email");
		let email_verified = match fields.get("email_verified").and_then(bool_from_value) {
			Some(flag) => {
				fields.remove("email_verified");

				Some(flag)
			},
			None => None,
		};
		let picture = take_string(&mut fields, "picture");
		let name = take_string(&mut fields, "name");

		Ok(Self { sub, email, email_verified, picture, name, extra: fields.into_iter().collect() })
	}
}
impl From<IdTokenClaims> for Profile {
	fn from(claims: IdTokenClaims) -> Self {
		let IdTokenClaims { sub, email, email_verified, picture, name, extra } = claims;

		Self { sub, email, email_verified, picture, name, extra }
	}
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
	match fields.get(key) {
		Some(Value::String(_)) => match fields.remove(key) {
			Some(Value::String(text)) => Some(text),
			_ => None,
		},
		_ => None,
	}
}

fn take_identifier(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
	let value = fields.get(key).and_then(identifier_from_value)?;

	fields.remove(key);

	Some(value)
}

fn identifier_from_value(value: &Value) -> Option<String> {
	match value {
		Value::String(text) => Some(text.clone()),
		Value::Number(number) => Some(number.to_string()),
		_ => None,
	}
}
