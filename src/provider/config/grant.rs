// self
use crate::_prelude::*;

/// OAuth 2.0 grant types accepted by the token endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Authorization Code grant.
	#[default]
	AuthorizationCode,
	/// Refresh Token grant.
	RefreshToken,
	/// Client Credentials grant.
	ClientCredentials,
	/// Resource Owner Password Credentials grant.
	Password,
}
impl GrantType {
	/// Returns the RFC 6749 identifier for the grant type.
	pub fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::RefreshToken => "refresh_token",
			GrantType::ClientCredentials => "client_credentials",
			GrantType::Password => "password",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// `response_type` requested from the authorization endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
	/// Authorization code flow.
	#[default]
	Code,
	/// Implicit flow.
	Token,
}
impl ResponseType {
	/// Returns the wire value.
	pub fn as_str(self) -> &'static str {
		match self {
			ResponseType::Code => "code",
			ResponseType::Token => "token",
		}
	}
}
impl Display for ResponseType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
