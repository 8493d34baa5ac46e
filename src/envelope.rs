//! Response envelopes and response-shape selection.
//!
//! Every successful call answers with a JSON envelope:
//!
//! ```text
//! { "result": <payload>, "server_node_addr": "...", "ee_node_alias": "...", ... }
//! ```
//!
//! Callers pick, per call and at the type level, whether they get just the
//! payload ([`ResultOnly`]) or the whole [`Envelope`] ([`FullEnvelope`]).
//! Endpoints that may answer with raw bytes instead of JSON use [`Content`].

use crate::error::HttpError;
use crate::http::RawResponse;
use crate::shared::serde_util::null_default;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The full wire envelope around a call's `result`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub result: T,
    #[serde(default, deserialize_with = "null_default::deserialize")]
    pub server_node_addr: String,
    #[serde(default, deserialize_with = "null_default::deserialize")]
    pub evm_network: String,
    #[serde(
        rename = "ee_node_alias",
        default,
        deserialize_with = "null_default::deserialize"
    )]
    pub node_alias: String,
    #[serde(
        rename = "ee_node_address",
        default,
        deserialize_with = "null_default::deserialize"
    )]
    pub node_address: String,
    #[serde(
        rename = "ee_node_eth_address",
        default,
        deserialize_with = "null_default::deserialize"
    )]
    pub node_eth_address: String,
    #[serde(
        rename = "ee_node_network",
        default,
        deserialize_with = "null_default::deserialize"
    )]
    pub node_network: String,
    #[serde(
        rename = "ee_node_ver",
        default,
        deserialize_with = "null_default::deserialize"
    )]
    pub node_version: String,
    /// Any other top-level fields, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<T> Envelope<T> {
    /// An envelope with empty metadata.
    pub fn new(result: T) -> Self {
        Self {
            result,
            server_node_addr: String::new(),
            evm_network: String::new(),
            node_alias: String::new(),
            node_address: String::new(),
            node_eth_address: String::new(),
            node_network: String::new(),
            node_version: String::new(),
            extra: Map::new(),
        }
    }

    pub fn into_result(self) -> T {
        self.result
    }

    /// Transform the payload, keeping metadata untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            result: f(self.result),
            server_node_addr: self.server_node_addr,
            evm_network: self.evm_network,
            node_alias: self.node_alias,
            node_address: self.node_address,
            node_eth_address: self.node_eth_address,
            node_network: self.node_network,
            node_version: self.node_version,
            extra: self.extra,
        }
    }
}

impl<T> Envelope<Content<T>> {
    /// Envelope synthesized for a non-JSON response: the response itself is
    /// the result and no server metadata is available.
    pub fn binary(response: RawResponse) -> Self {
        Envelope::new(Content::Binary(response))
    }
}

// ─── Response modes ──────────────────────────────────────────────────────────

/// Type-level choice of response shape.
pub trait ResponseMode {
    type Output<T>;

    fn select<T>(envelope: Envelope<T>) -> Self::Output<T>;
}

/// Return only `envelope.result` (the default for every operation).
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultOnly;

/// Return the complete envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullEnvelope;

impl ResponseMode for ResultOnly {
    type Output<T> = T;

    fn select<T>(envelope: Envelope<T>) -> T {
        envelope.result
    }
}

impl ResponseMode for FullEnvelope {
    type Output<T> = Envelope<T>;

    fn select<T>(envelope: Envelope<T>) -> Envelope<T> {
        envelope
    }
}

// ─── Content ─────────────────────────────────────────────────────────────────

/// Payload of an endpoint that answers either with JSON or with raw bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum Content<T> {
    Decoded(T),
    /// Non-JSON response, exposed as-is for `text()` / `bytes()` / `array_buffer()`.
    Binary(RawResponse),
}

impl<T> Content<T> {
    pub fn is_binary(&self) -> bool {
        matches!(self, Content::Binary(_))
    }

    pub fn as_decoded(&self) -> Option<&T> {
        match self {
            Content::Decoded(t) => Some(t),
            Content::Binary(_) => None,
        }
    }

    pub fn as_binary(&self) -> Option<&RawResponse> {
        match self {
            Content::Binary(r) => Some(r),
            Content::Decoded(_) => None,
        }
    }

    pub fn into_decoded(self) -> Option<T> {
        match self {
            Content::Decoded(t) => Some(t),
            Content::Binary(_) => None,
        }
    }

    pub fn into_binary(self) -> Option<RawResponse> {
        match self {
            Content::Binary(r) => Some(r),
            Content::Decoded(_) => None,
        }
    }
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

/// Decode the body as `Envelope<T>`, regardless of the declared content type.
pub fn parse_envelope<T: DeserializeOwned>(resp: &RawResponse) -> Result<Envelope<T>, HttpError> {
    resp.json()
}

/// Decode a JSON envelope when the response declares JSON; otherwise wrap the
/// raw response in a synthesized envelope.
pub fn parse_content<T: DeserializeOwned>(
    resp: RawResponse,
) -> Result<Envelope<Content<T>>, HttpError> {
    if resp.is_json() {
        Ok(parse_envelope::<T>(&resp)?.map(Content::Decoded))
    } else {
        Ok(Envelope::binary(resp))
    }
}

pub fn resolve<T: DeserializeOwned, M: ResponseMode>(
    resp: &RawResponse,
) -> Result<M::Output<T>, HttpError> {
    parse_envelope::<T>(resp).map(M::select)
}

pub fn resolve_content<T: DeserializeOwned, M: ResponseMode>(
    resp: RawResponse,
) -> Result<M::Output<Content<T>>, HttpError> {
    parse_content::<T>(resp).map(M::select)
}
