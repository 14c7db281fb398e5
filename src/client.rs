//! The OAuth 2.0 client and its operations.
//!
//! [`OAuth2Client`] owns a validated [`ProviderConfig`], a shared transport, and the mapper
//! that classifies transport failures. Operations are split by concern: `authorize` builds
//! redirect URLs, `token` exchanges and refreshes tokens, `resource` performs protected
//! requests with transparent refresh, and `profile` resolves the signed-in user.

mod authorize;
mod metrics;
mod profile;
mod resource;
mod token;

pub use authorize::*;
pub use metrics::*;
pub use resource::*;

// crates.io
use oauth2::{AsyncHttpClient, HttpResponse};
// self
use crate::{
	_prelude::*,
	auth::TokenData,
	http::{HttpTransport, OutboundRequest},
	oauth::TransportErrorMapper,
	obs::FlowKind,
	provider::ProviderConfig,
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestOAuth2Client = OAuth2Client<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Receives every successful refresh as `(previous, refreshed)`.
///
/// Closures with the matching signature implement this trait, so callers can persist the
/// rotated token without wrapping it in a type.
pub trait RefreshObserver
where
	Self: Send + Sync,
{
	/// Called once per successful refresh, before the refreshed token is returned.
	fn on_refresh(&self, previous: &TokenData, refreshed: &TokenData);
}
impl<F> RefreshObserver for F
where
	F: Fn(&TokenData, &TokenData) + Send + Sync,
{
	fn on_refresh(&self, previous: &TokenData, refreshed: &TokenData) {
		self(previous, refreshed)
	}
}

/// Provider-agnostic OAuth 2.0 client.
///
/// The client is immutable after construction. Clones share the transport, the error mapper,
/// the observer, and the refresh counters.
pub struct OAuth2Client<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP transport used for every outbound request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Shared counters for refresh outcomes.
	pub refresh_metrics: Arc<RefreshMetrics>,
	config: Arc<ProviderConfig>,
	refresh_observer: Option<Arc<dyn RefreshObserver>>,
}
impl<C, M> OAuth2Client<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		config: ProviderConfig,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			refresh_metrics: Default::default(),
			config: Arc::new(config),
			refresh_observer: None,
		}
	}

	/// Registers the observer notified after every successful refresh.
	pub fn with_refresh_observer(mut self, observer: impl RefreshObserver + 'static) -> Self {
		self.refresh_observer = Some(Arc::new(observer));

		self
	}

	/// Provider configuration backing this client.
	pub fn config(&self) -> &ProviderConfig {
		&self.config
	}

	async fn send(&self, flow: FlowKind, request: OutboundRequest) -> Result<HttpResponse> {
		let request = request.into_http()?;
		let handle = self.http_client.handle();

		handle.call(request).await.map_err(|e| self.transport_mapper.map_transport_error(flow, e))
	}
}
#[cfg(feature = "reqwest")]
impl OAuth2Client<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a new client for `config` backed by a default reqwest transport.
	pub fn new(config: ProviderConfig) -> Self {
		Self::with_http_client(
			config,
			ReqwestHttpClient::default(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}
impl<C, M> Clone for OAuth2Client<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			transport_mapper: Arc::clone(&self.transport_mapper),
			refresh_metrics: Arc::clone(&self.refresh_metrics),
			config: Arc::clone(&self.config),
			refresh_observer: self.refresh_observer.clone(),
		}
	}
}
impl<C, M> Debug for OAuth2Client<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuth2Client")
			.field("provider", &self.config.provider_name)
			.field("client_id", &self.config.client_id)
			.field("refresh_observer_set", &self.refresh_observer.is_some())
			.finish()
	}
}
