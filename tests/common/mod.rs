//! Recording transport shared by the integration tests.

#![allow(dead_code)]

// std
use std::{
	collections::VecDeque,
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
	sync::Arc,
};
// crates.io
use parking_lot::Mutex;
// self
use oauth2_quirks::{
	auth::{ClientId, ProviderId, ScopeList},
	client::OAuth2Client,
	http::HttpTransport,
	oauth::{
		GenericTransportErrorMapper,
		oauth2::{
			AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
			http::{HeaderMap, HeaderValue, StatusCode},
		},
	},
	provider::{ProviderConfig, ProviderConfigBuilder},
	url::form_urlencoded,
};

pub type TestClient = OAuth2Client<RecordingTransport, GenericTransportErrorMapper>;

#[derive(Debug)]
pub struct FakeTransportError;
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Fake transport failure.")
	}
}
impl StdError for FakeTransportError {}

/// Request captured by [`RecordingTransport`].
#[derive(Clone, Debug)]
pub struct RecordedRequest {
	pub method: String,
	pub uri: String,
	pub headers: HeaderMap,
	pub body: String,
}
impl RecordedRequest {
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|value| value.to_str().ok())
	}

	pub fn query_pairs(&self) -> Vec<(String, String)> {
		let query = self.uri.split_once('?').map(|(_, query)| query).unwrap_or_default();

		form_urlencoded::parse(query.as_bytes()).into_owned().collect()
	}

	pub fn body_pairs(&self) -> Vec<(String, String)> {
		form_urlencoded::parse(self.body.as_bytes()).into_owned().collect()
	}

	pub fn path(&self) -> &str {
		self.uri.split_once('?').map(|(path, _)| path).unwrap_or(&self.uri)
	}
}

#[derive(Default)]
struct State {
	requests: Vec<RecordedRequest>,
	responses: VecDeque<HttpResponse>,
}

/// Fake transport that records every request and replays queued responses in order.
#[derive(Clone, Default)]
pub struct RecordingTransport(Arc<Mutex<State>>);
impl RecordingTransport {
	pub fn respond(&self, status: u16, body: &str) -> &Self {
		self.respond_with(status, body, &[])
	}

	pub fn respond_with(&self, status: u16, body: &str, headers: &[(&'static str, &str)]) -> &Self {
		let mut response = HttpResponse::new(body.as_bytes().to_vec());

		*response.status_mut() = StatusCode::from_u16(status).expect("Status fixture should be valid.");

		for (name, value) in headers {
			response.headers_mut().insert(
				*name,
				HeaderValue::from_str(value).expect("Header fixture should be valid."),
			);
		}

		self.0.lock().responses.push_back(response);

		self
	}

	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.0.lock().requests.clone()
	}
}
impl HttpTransport for RecordingTransport {
	type Handle = RecordingHandle;
	type TransportError = FakeTransportError;

	fn handle(&self) -> Self::Handle {
		RecordingHandle(self.0.clone())
	}
}

pub struct RecordingHandle(Arc<Mutex<State>>);
impl<'c> AsyncHttpClient<'c> for RecordingHandle {
	type Error = HttpClientError<FakeTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let result = {
			let mut state = self.0.lock();

			state.requests.push(RecordedRequest {
				method: request.method().to_string(),
				uri: request.uri().to_string(),
				headers: request.headers().clone(),
				body: String::from_utf8_lossy(request.body()).into_owned(),
			});
			state
				.responses
				.pop_front()
				.ok_or_else(|| HttpClientError::Reqwest(Box::new(FakeTransportError)))
		};

		Box::pin(async move { result })
	}
}

/// Builder for the `idp.example` fixture provider.
pub fn config() -> ProviderConfigBuilder {
	ProviderConfig::builder(ProviderId::new("idp").expect("Provider fixture should be valid."))
		.client_id(ClientId::new("abc").expect("Client fixture should be valid."))
		.client_secret("shh")
		.auth_host("https://idp.example")
		.auth_uri("/authorize")
		.token_uri("/token")
		.scope(ScopeList::new(["a", "b"]).expect("Scope fixture should be valid."))
		.scope_separator(" ")
}

pub fn client(config: ProviderConfig, transport: &RecordingTransport) -> TestClient {
	OAuth2Client::with_http_client(config, transport.clone(), GenericTransportErrorMapper)
}

pub fn pairs(values: &[(&str, &str)]) -> Vec<(String, String)> {
	values.iter().map(|(name, value)| ((*name).to_owned(), (*value).to_owned())).collect()
}
