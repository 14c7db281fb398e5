// self
use crate::_prelude::*;

/// HTTP verb used for a request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestMethod {
	/// Parameters travel as a form-encoded body.
	#[default]
	Post,
	/// Parameters travel in the query string.
	Get,
}
impl RequestMethod {
	/// Returns the lowercase label used in configuration files.
	pub fn as_str(self) -> &'static str {
		match self {
			RequestMethod::Post => "post",
			RequestMethod::Get => "get",
		}
	}
}
impl Display for RequestMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Where client credentials travel on token endpoint calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientAuthMode {
	/// HTTP Basic authentication with `client_id:client_secret`.
	#[default]
	Header,
	/// Named request parameters (`client_id_name`/`client_secret_name`).
	Params,
}
impl ClientAuthMode {
	/// Returns the lowercase label used in configuration files.
	pub fn as_str(self) -> &'static str {
		match self {
			ClientAuthMode::Header => "header",
			ClientAuthMode::Params => "params",
		}
	}
}
impl Display for ClientAuthMode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// How the access token is presented to resource endpoints (RFC 6750 section 2).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessTokenMethod {
	/// `Authorization: Bearer <token>` header.
	#[default]
	Header,
	/// `access_token` form body parameter; requires POST.
	FormEncoded,
	/// `access_token` query parameter; requires GET.
	UriQuery,
}
impl AccessTokenMethod {
	/// Returns the kebab-case label used in configuration files.
	pub fn as_str(self) -> &'static str {
		match self {
			AccessTokenMethod::Header => "header",
			AccessTokenMethod::FormEncoded => "form-encoded",
			AccessTokenMethod::UriQuery => "uri-query",
		}
	}

	/// Returns false when `method` cannot carry the token this way.
	pub fn compatible_with(self, method: RequestMethod) -> bool {
		!matches!(
			(method, self),
			(RequestMethod::Post, AccessTokenMethod::UriQuery)
				| (RequestMethod::Get, AccessTokenMethod::FormEncoded)
		)
	}
}
impl Display for AccessTokenMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn incompatible_pairs_are_exactly_two() {
		let methods = [RequestMethod::Post, RequestMethod::Get];
		let placements =
			[AccessTokenMethod::Header, AccessTokenMethod::FormEncoded, AccessTokenMethod::UriQuery];
		let rejected = methods
			.iter()
			.flat_map(|method| placements.iter().map(move |placement| (*method, *placement)))
			.filter(|(method, placement)| !placement.compatible_with(*method))
			.collect::<Vec<_>>();

		assert_eq!(
			rejected,
			vec![
				(RequestMethod::Post, AccessTokenMethod::UriQuery),
				(RequestMethod::Get, AccessTokenMethod::FormEncoded),
			]
		);
	}

	#[test]
	fn serde_labels_match_configuration_files() {
		assert_eq!(
			serde_json::from_str::<AccessTokenMethod>("\"form-encoded\"")
				.expect("Kebab-case label should deserialize."),
			AccessTokenMethod::FormEncoded
		);
		assert_eq!(
			serde_json::from_str::<ClientAuthMode>("\"params\"")
				.expect("Lowercase label should deserialize."),
			ClientAuthMode::Params
		);
		assert_eq!(RequestMethod::Get.to_string(), "get");
	}
}
