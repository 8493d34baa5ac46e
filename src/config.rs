//! Client configuration resolution.
//!
//! Every setting is resolved in the same order: explicit option, then the
//! environment (see [`EnvSource`]), then the built-in default from
//! [`crate::network`].

use crate::network::{
    ensure_protocol, DEFAULT_CSTORE_URL, DEFAULT_R1FS_URL, ENV_CHAINSTORE_PEERS,
    ENV_CSTORE_API_URL, ENV_EE_CSTORE_API_URL, ENV_EE_R1FS_API_URL, ENV_R1FS_API_URL,
};
use crate::upload::MultipartKind;
use std::collections::HashMap;

// ─── ExecutionContext ────────────────────────────────────────────────────────

/// Where the client runs. Only affects the default multipart implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionContext {
    #[default]
    Server,
    Browser,
}

impl ExecutionContext {
    pub fn default_multipart_kind(self) -> MultipartKind {
        match self {
            ExecutionContext::Server => MultipartKind::Streaming,
            ExecutionContext::Browser => MultipartKind::Native,
        }
    }
}

// ─── EnvSource ───────────────────────────────────────────────────────────────

/// Explicit view of the environment used during configuration.
///
/// Injected variables are consulted before the process environment. Empty
/// values count as unset.
#[derive(Debug, Clone)]
pub struct EnvSource {
    injected: HashMap<String, String>,
    process: bool,
}

impl Default for EnvSource {
    fn default() -> Self {
        Self::process()
    }
}

impl EnvSource {
    /// Process environment only.
    pub fn process() -> Self {
        Self {
            injected: HashMap::new(),
            process: true,
        }
    }

    /// Injected variables first, then the process environment.
    pub fn injected(vars: HashMap<String, String>) -> Self {
        Self {
            injected: vars,
            process: true,
        }
    }

    /// Injected variables only; the process environment is never read.
    pub fn isolated(vars: HashMap<String, String>) -> Self {
        Self {
            injected: vars,
            process: false,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(v) = self.injected.get(key).filter(|v| !v.is_empty()) {
            return Some(v.clone());
        }
        if self.process {
            return std::env::var(key).ok().filter(|v| !v.is_empty());
        }
        None
    }

    /// First non-empty value among `keys`, in order.
    pub fn first(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|k| self.get(k))
    }
}

// ─── EdgeConfig ──────────────────────────────────────────────────────────────

/// Caller-supplied options, all optional.
#[derive(Debug, Clone, Default)]
pub struct EdgeOptions {
    pub cstore_url: Option<String>,
    pub r1fs_url: Option<String>,
    pub chainstore_peers: Option<Vec<String>>,
    /// Peer list as JSON text; used when no explicit list is given.
    pub chainstore_peers_json: Option<String>,
    pub verbose: Option<bool>,
    pub debug: Option<bool>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeConfig {
    pub cstore_url: String,
    pub r1fs_url: String,
    pub chainstore_peers: Vec<String>,
    pub verbose: bool,
}

impl EdgeConfig {
    pub fn resolve(options: &EdgeOptions, env: &EnvSource) -> Self {
        let cstore_url = options
            .cstore_url
            .clone()
            .or_else(|| env.first(&[ENV_CSTORE_API_URL, ENV_EE_CSTORE_API_URL]))
            .unwrap_or_else(|| DEFAULT_CSTORE_URL.to_string());
        let r1fs_url = options
            .r1fs_url
            .clone()
            .or_else(|| env.first(&[ENV_R1FS_API_URL, ENV_EE_R1FS_API_URL]))
            .unwrap_or_else(|| DEFAULT_R1FS_URL.to_string());

        let chainstore_peers = match &options.chainstore_peers {
            Some(peers) => peers.clone(),
            None => options
                .chainstore_peers_json
                .clone()
                .or_else(|| env.get(ENV_CHAINSTORE_PEERS))
                .map(|raw| parse_peers(&raw))
                .unwrap_or_default(),
        };

        Self {
            cstore_url: ensure_protocol(&cstore_url),
            r1fs_url: ensure_protocol(&r1fs_url),
            chainstore_peers,
            verbose: options.verbose.or(options.debug).unwrap_or(false),
        }
    }
}

/// Parse a JSON array of peer addresses. Invalid input yields no peers.
pub fn parse_peers(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(peers) => peers,
        Err(e) => {
            tracing::warn!(error = %e, "failed to parse chainstore peers, using empty list");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_environment() {
        let cfg = EdgeConfig::resolve(&EdgeOptions::default(), &EnvSource::isolated(HashMap::new()));
        assert_eq!(cfg.cstore_url, "http://localhost:31234");
        assert_eq!(cfg.r1fs_url, "http://localhost:31235");
        assert!(cfg.chainstore_peers.is_empty());
        assert!(!cfg.verbose);
    }

    #[test]
    fn test_explicit_beats_environment() {
        let env = EnvSource::isolated(vars(&[
            ("CSTORE_API_URL", "env-cstore:1"),
            ("EE_CHAINSTORE_PEERS", r#"["p1"]"#),
        ]));
        let opts = EdgeOptions {
            cstore_url: Some("https://explicit".into()),
            chainstore_peers: Some(vec!["mine".into()]),
            ..Default::default()
        };
        let cfg = EdgeConfig::resolve(&opts, &env);
        assert_eq!(cfg.cstore_url, "https://explicit");
        assert_eq!(cfg.chainstore_peers, vec!["mine".to_string()]);
    }

    #[test]
    fn test_environment_key_order() {
        let env = EnvSource::isolated(vars(&[
            ("EE_CHAINSTORE_API_URL", "ee-cstore:9"),
            ("R1FS_API_URL", "r1fs-primary:1"),
            ("EE_R1FS_API_URL", "r1fs-secondary:2"),
            ("CSTORE_API_URL", ""),
        ]));
        let cfg = EdgeConfig::resolve(&EdgeOptions::default(), &env);
        assert_eq!(cfg.cstore_url, "http://ee-cstore:9");
        assert_eq!(cfg.r1fs_url, "http://r1fs-primary:1");
    }

    #[test]
    fn test_peers_from_environment() {
        let env = EnvSource::isolated(vars(&[("EE_CHAINSTORE_PEERS", r#"["a","b"]"#)]));
        let cfg = EdgeConfig::resolve(&EdgeOptions::default(), &env);
        assert_eq!(cfg.chainstore_peers, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_malformed_peers_fall_back_to_empty() {
        let env = EnvSource::isolated(vars(&[("EE_CHAINSTORE_PEERS", "not json")]));
        let cfg = EdgeConfig::resolve(&EdgeOptions::default(), &env);
        assert!(cfg.chainstore_peers.is_empty());
        assert!(parse_peers(r#"{"a":1}"#).is_empty());
    }

    #[test]
    fn test_peers_json_option() {
        let opts = EdgeOptions {
            chainstore_peers_json: Some(r#"["x"]"#.into()),
            ..Default::default()
        };
        let env = EnvSource::isolated(vars(&[("EE_CHAINSTORE_PEERS", r#"["env"]"#)]));
        assert_eq!(EdgeConfig::resolve(&opts, &env).chainstore_peers, vec!["x".to_string()]);
    }

    #[test]
    fn test_verbose_falls_back_to_debug() {
        let env = EnvSource::isolated(HashMap::new());
        let debug_only = EdgeOptions {
            debug: Some(true),
            ..Default::default()
        };
        assert!(EdgeConfig::resolve(&debug_only, &env).verbose);

        let both = EdgeOptions {
            verbose: Some(false),
            debug: Some(true),
            ..Default::default()
        };
        assert!(!EdgeConfig::resolve(&both, &env).verbose);
    }

    #[test]
    fn test_injected_checked_before_process() {
        let env = EnvSource::injected(vars(&[("EDGE_SDK_TEST_ONLY_KEY", "injected")]));
        assert_eq!(env.get("EDGE_SDK_TEST_ONLY_KEY").as_deref(), Some("injected"));
        assert_eq!(EnvSource::isolated(HashMap::new()).get("PATH"), None);
    }

    #[test]
    fn test_context_default_multipart_kind() {
        assert_eq!(ExecutionContext::Server.default_multipart_kind(), MultipartKind::Streaming);
        assert_eq!(ExecutionContext::Browser.default_multipart_kind(), MultipartKind::Native);
    }
}
