//! Network defaults and environment keys for edge node services.

/// Default cstore (chain store) API address.
pub const DEFAULT_CSTORE_URL: &str = "localhost:31234";

/// Default r1fs (file store) API address.
pub const DEFAULT_R1FS_URL: &str = "localhost:31235";

// ── Environment keys ─────────────────────────────────────────────────────────

pub const ENV_CSTORE_API_URL: &str = "CSTORE_API_URL";
pub const ENV_EE_CSTORE_API_URL: &str = "EE_CHAINSTORE_API_URL";
pub const ENV_R1FS_API_URL: &str = "R1FS_API_URL";
pub const ENV_EE_R1FS_API_URL: &str = "EE_R1FS_API_URL";
/// JSON array of peer addresses used for replication fan-out.
pub const ENV_CHAINSTORE_PEERS: &str = "EE_CHAINSTORE_PEERS";

/// Prefix `http://` unless the URL already names an http(s) scheme.
pub fn ensure_protocol(url: &str) -> String {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{}", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_protocol() {
        assert_eq!(ensure_protocol("localhost:31234"), "http://localhost:31234");
        assert_eq!(ensure_protocol("http://node:1"), "http://node:1");
        assert_eq!(ensure_protocol("https://node"), "https://node");
        assert_eq!(ensure_protocol("HTTPS://node"), "HTTPS://node");
    }

    #[test]
    fn test_defaults_get_scheme() {
        assert_eq!(ensure_protocol(DEFAULT_R1FS_URL), "http://localhost:31235");
    }
}
