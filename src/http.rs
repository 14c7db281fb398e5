//! Transport primitives for token, resource, and profile requests.
//!
//! The module exposes [`HttpTransport`], the crate's only dependency on an HTTP stack, and
//! [`OutboundRequest`], the transport-neutral description of a request that the client
//! assembles before encoding it into an [`HttpRequest`]. Custom transports implement
//! [`HttpTransport`] and hand out [`AsyncHttpClient`] handles; the default
//! [`ReqwestHttpClient`] is available behind the `reqwest` feature.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use oauth2::{
	AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
	http::{
		HeaderMap, HeaderValue, Method,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER},
	},
};
use time::format_description::well_known::Rfc2822;
use url::form_urlencoded;
// self
use crate::{_prelude::*, error::ConfigError, provider::RequestMethod};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Abstraction over HTTP transports capable of executing the client's requests.
///
/// Callers provide an implementation (typically behind `Arc<T>`) and the client requests
/// short-lived [`AsyncHttpClient`] handles for each call. Implementations must be
/// `Send + Sync + 'static` so they can be shared across client clones, and the handles they
/// return must own whatever state the request needs so their futures stay `Send`.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle executing a single request.
	///
	/// The request future returned by [`AsyncHttpClient::call`] must be `Send` so the
	/// client's futures inherit the same guarantee.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds an [`AsyncHttpClient`] handle for the next request.
	fn handle(&self) -> Self::Handle;
}

/// Transport-neutral request assembled by the client before encoding.
///
/// Parameters keep their insertion order. GET requests carry them in the query string; POST
/// requests carry them as an `application/x-www-form-urlencoded` body.
#[derive(Clone, PartialEq, Eq)]
pub struct OutboundRequest {
	/// Request verb.
	pub method: RequestMethod,
	/// Target URL, possibly already carrying a query string.
	pub url: String,
	/// Ordered request parameters.
	pub params: Vec<(String, String)>,
	/// HTTP basic credentials (`client_id`, `client_secret`).
	pub basic_auth: Option<(String, String)>,
	/// Bearer token presented in the `Authorization` header.
	pub bearer: Option<String>,
}
impl OutboundRequest {
	/// Creates a request without parameters or credentials.
	pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
		Self { method, url: url.into(), params: Vec::new(), basic_auth: None, bearer: None }
	}

	/// Appends a parameter.
	pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.push((name.into(), value.into()));

		self
	}

	/// Appends every parameter from `params`, in iteration order.
	pub fn params<I, K, V>(mut self, params: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.params.extend(params.into_iter().map(|(name, value)| (name.into(), value.into())));

		self
	}

	/// Attaches HTTP basic credentials.
	pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
		self.basic_auth = Some((username.into(), password.into()));

		self
	}

	/// Attaches a bearer token.
	pub fn bearer(mut self, token: impl Into<String>) -> Self {
		self.bearer = Some(token.into());

		self
	}

	/// Encodes the request into the [`HttpRequest`] consumed by transports.
	pub fn into_http(self) -> Result<HttpRequest> {
		let mut url = Url::parse(&self.url).map_err(|e| ConfigError::invalid_url(&self.url, e))?;
		let (method, body) = match self.method {
			RequestMethod::Get => {
				if !self.params.is_empty() {
					url.query_pairs_mut().extend_pairs(&self.params);
				}

				(Method::GET, None)
			},
			RequestMethod::Post => (
				Method::POST,
				Some(form_urlencoded::Serializer::new(String::new()).extend_pairs(&self.params).finish()),
			),
		};
		let mut builder = oauth2::http::Request::builder()
			.method(method)
			.uri(url.as_str())
			.header(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));

		if let Some((username, password)) = &self.basic_auth {
			let encoded = STANDARD.encode(format!("{username}:{password}"));

			builder = builder.header(AUTHORIZATION, format!("Basic {encoded}"));
		}
		if let Some(token) = &self.bearer {
			builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
		}
		if body.is_some() {
			builder = builder.header(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
		}

		let request = builder
			.body(body.map(String::into_bytes).unwrap_or_default())
			.map_err(ConfigError::from)?;

		Ok(request)
	}
}
impl Debug for OutboundRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OutboundRequest")
			.field("method", &self.method)
			.field("url", &self.url)
			.field("params", &self.params.iter().map(|(name, _)| name).collect::<Vec<_>>())
			.field("basic_auth", &self.basic_auth.as_ref().map(|_| "<redacted>"))
			.field("bearer", &self.bearer.as_ref().map(|_| "<redacted>"))
			.finish()
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Token endpoints return results directly, so any custom [`ReqwestClient`] should disable
/// redirect following.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestHttpClient {
	type Handle = ReqwestHandle;
	type TransportError = ReqwestError;

	fn handle(&self) -> Self::Handle {
		ReqwestHandle(self.0.clone())
	}
}

/// Handle returned by [`ReqwestHttpClient`] that satisfies [`HttpTransport`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHandle(ReqwestClient);
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for ReqwestHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.0.clone();

		Box::pin(async move {
			let response =
				client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

/// Reads a `Retry-After` hint expressed either in seconds or as an RFC 2822 date.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<i64>() {
		return (secs >= 0).then(|| Duration::seconds(secs));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}
