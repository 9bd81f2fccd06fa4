use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// One indexed transfer, reduced to the block it happened in.
///
/// The indexer sends both fields as integer strings; they are parsed here so
/// every later comparison is numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    #[serde(deserialize_with = "deserialize_u64")]
    pub block_number: u64,
    #[serde(deserialize_with = "deserialize_u64")]
    pub block_timestamp: u64,
}

impl TransferRecord {
    pub fn new(block_number: u64, block_timestamp: u64) -> Self {
        Self {
            block_number,
            block_timestamp,
        }
    }
}

/// Which side of a transfer the token address is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    From,
    To,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::From => "from",
            Direction::To => "to",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn deserialize_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(u64),
    }

    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s.trim().parse().map_err(de::Error::custom),
        StringOrNumber::Number(n) => Ok(n),
    }
}
