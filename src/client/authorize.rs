// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*,
	client::OAuth2Client,
	http::HttpTransport,
	oauth::TransportErrorMapper,
	provider::ResponseType,
};

const STATE_LEN: usize = 32;
// Matches the unreserved set of a URI component: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'_')
	.remove(b'.')
	.remove(b'!')
	.remove(b'~')
	.remove(b'*')
	.remove(b'\'')
	.remove(b'(')
	.remove(b')');

impl<C, M> OAuth2Client<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Builds the authorization URL the user agent is redirected to.
	///
	/// Parameters appear in a fixed order: client id, scope, redirect URL, response type and
	/// the optional state. The client id and redirect URL are percent-encoded; the joined scope
	/// and the state are inserted verbatim. The result depends only on the inputs.
	pub fn generate_authorize_url(
		&self,
		redirect_url: &str,
		state: Option<&str>,
		response_type: ResponseType,
	) -> String {
		let config = &self.config;
		let mut url = format!(
			"{endpoint}?{client_id_name}={client_id}&scope={scope}&{redirect_name}={redirect}&response_type={response_type}",
			endpoint = config.authorize_endpoint(),
			client_id_name = config.client_id_name,
			client_id = encode(&config.client_id),
			scope = config.joined_scope(),
			redirect_name = config.redirect_name,
			redirect = encode(redirect_url),
		);

		if let Some(state) = state {
			url.push_str("&state=");
			url.push_str(state);
		}

		url
	}
}

/// Generates a random alphanumeric value suitable for the `state` parameter.
pub fn random_state() -> String {
	rand::rng().sample_iter(&Alphanumeric).take(STATE_LEN).map(char::from).collect()
}

fn encode(value: &str) -> String {
	utf8_percent_encode(value, URI_COMPONENT).to_string()
}
