//! HTTP client wrapper: transports and the authenticated request pipeline

mod client;
mod transport;

pub use client::{ApiClient, ApiRequest, RequestOptions, TokenSource, build_url, dispatch};
#[cfg(feature = "hydrate")]
pub use transport::GlooTransport;
#[cfg(feature = "ssr")]
pub use transport::ReqwestTransport;
#[cfg(any(feature = "hydrate", feature = "ssr"))]
pub use transport::default_transport;
pub use transport::{HttpRequest, HttpResponse, Method, Transport};
