//! Small helpers shared by the domain modules.

pub mod serde_util;

use crate::error::SdkError;

/// Fail with `"<field> is required"` when `value` is empty.
pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), SdkError> {
    if value.is_empty() {
        return Err(SdkError::required(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("cid", "Qm1").is_ok());
        let err = require_non_empty("cid", "").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: cid is required");
    }
}
