//! Wire bodies for cstore mutations.

use serde::Serialize;

/// Body of `POST /set`.
#[derive(Debug, Clone, Serialize)]
pub struct SetBody<'a> {
    pub key: &'a str,
    pub value: String,
    pub chainstore_peers: &'a [String],
}

/// Body of `POST /hset`.
#[derive(Debug, Clone, Serialize)]
pub struct HSetBody<'a> {
    pub hkey: &'a str,
    pub key: &'a str,
    pub value: String,
    pub chainstore_peers: &'a [String],
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_body_always_carries_peers() {
        let body = SetBody {
            key: "k",
            value: "v".into(),
            chainstore_peers: &[],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"key": "k", "value": "v", "chainstore_peers": []})
        );
    }
}
