//! HTTP layer: transport abstraction, query encoding, and `ServiceHttp`.

pub mod client;
pub mod query;
pub mod transport;

pub use client::ServiceHttp;
pub use query::{Query, QueryValue};
#[cfg(feature = "http")]
pub use transport::ReqwestTransport;
pub use transport::{Headers, HttpRequest, Method, RawResponse, RequestBody, Transport};
