//! Ordered scope lists joined with a provider-specific separator.

// std
use std::slice::Iter;
// crates.io
use serde::{Deserializer, Serializer, de::Error as DeError, ser::SerializeSeq};
// self
use crate::_prelude::*;

/// Errors emitted when validating scopes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ScopeValidationError {
	/// Empty scope entries are not allowed.
	#[error("Scope entries cannot be empty.")]
	Empty,
}

/// Scopes requested from a provider, kept exactly as configured.
///
/// Entries are joined in order with no deduplication, so the `scope` parameter is reproducible
/// byte for byte. An entry may itself hold several space-delimited scopes.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ScopeList(Arc<[String]>);
impl ScopeList {
	/// Creates a validated scope list from any iterator.
	pub fn new<I, S>(scopes: I) -> Result<Self, ScopeValidationError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let entries = scopes
			.into_iter()
			.map(|scope| {
				let owned: String = scope.into();

				if owned.is_empty() { Err(ScopeValidationError::Empty) } else { Ok(owned) }
			})
			.collect::<Result<Vec<_>, _>>()?;

		Ok(Self(Arc::from(entries)))
	}

	/// Number of scopes.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if no scopes are defined.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns true if the list contains the provided scope.
	pub fn contains(&self, scope: &str) -> bool {
		self.0.iter().any(|candidate| candidate == scope)
	}

	/// Iterator over scopes in configuration order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	/// Joins the scopes with `separator` into a single `scope` parameter value.
	pub fn join(&self, separator: &str) -> String {
		self.0.join(separator)
	}

	/// Returns the underlying slice of scope strings.
	pub fn as_slice(&self) -> &[String] {
		&self.0
	}
}
impl Debug for ScopeList {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ScopeList").field(&self.0).finish()
	}
}
impl Display for ScopeList {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.join(" "))
	}
}

/// Iterator over scope strings.
pub struct ScopeIter<'a> {
	inner: Iter<'a, String>,
}
impl<'a> Iterator for ScopeIter<'a> {
	type Item = &'a str;

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next().map(|s| s.as_str())
	}
}
impl<'a> IntoIterator for &'a ScopeList {
	type IntoIter = ScopeIter<'a>;
	type Item = &'a str;

	fn into_iter(self) -> Self::IntoIter {
		ScopeIter { inner: self.0.iter() }
	}
}
impl TryFrom<Vec<String>> for ScopeList {
	type Error = ScopeValidationError;

	fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl FromStr for ScopeList {
	type Err = ScopeValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.is_empty() {
			return Ok(Self::default());
		}
		if s.chars().all(char::is_whitespace) {
			return Err(ScopeValidationError::Empty);
		}

		Self::new(s.split_whitespace())
	}
}
impl Serialize for ScopeList {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut seq = serializer.serialize_seq(Some(self.0.len()))?;

		for scope in self.0.iter() {
			seq.serialize_element(scope)?;
		}

		seq.end()
	}
}
impl<'de> Deserialize<'de> for ScopeList {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let values = <Vec<String>>::deserialize(deserializer)?;

		ScopeList::new(values).map_err(DeError::custom)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn join_preserves_configured_order() {
		let scopes = ScopeList::new(["openid", "profile", "email"])
			.expect("Scope list fixture should be valid.");

		assert_eq!(scopes.join(" "), "openid profile email");
		assert_eq!(scopes.join(","), "openid,profile,email");
		assert_eq!(ScopeList::default().join(","), "");
	}

	#[test]
	fn repeated_entries_are_joined_as_configured() {
		let scopes = ScopeList::new(["a", "a", "b"]).expect("Scope list fixture should be valid.");

		assert_eq!(scopes.join(","), "a,a,b");
		assert_eq!(scopes.len(), 3);
		assert!(scopes.contains("b"));
	}

	#[test]
	fn entries_may_hold_spaces() {
		let scopes = ScopeList::new(["openid profile", "email"])
			.expect("Space-delimited entries should be accepted.");

		assert_eq!(scopes.join(","), "openid profile,email");
		assert_eq!(scopes.iter().collect::<Vec<_>>(), vec!["openid profile", "email"]);
	}

	#[test]
	fn empty_entries_error() {
		assert_eq!(ScopeList::new(["a", ""]), Err(ScopeValidationError::Empty));
		assert!(ScopeList::from_str("").is_ok(), "Empty string represents an empty list.");
		assert!(ScopeList::from_str("   ").is_err(), "Whitespace-only input must be rejected.");
	}

	#[test]
	fn serde_keeps_order() {
		let scopes: ScopeList = serde_json::from_str("[\"profile:read_all\",\"activity:read_all\"]")
			.expect("Scope list should deserialize.");

		assert_eq!(scopes.join(","), "profile:read_all,activity:read_all");
		assert_eq!(
			serde_json::to_string(&scopes).expect("Scope list should serialize."),
			"[\"profile:read_all\",\"activity:read_all\"]"
		);
	}
}
