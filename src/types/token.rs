use crate::error::{HistoryError, Result};
use std::fmt;

/// A validated, lowercased `0x`-prefixed 20 byte token address.
///
/// Only values of this type are ever interpolated into outbound queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenAddress(String);

impl TokenAddress {
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_lowercase();

        let hex_part = normalized
            .strip_prefix("0x")
            .ok_or_else(|| HistoryError::InvalidTokenAddress(raw.to_string()))?;

        match hex::decode(hex_part) {
            Ok(bytes) if bytes.len() == 20 => Ok(Self(normalized)),
            _ => Err(HistoryError::InvalidTokenAddress(raw.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
