use serde::{Deserialize, Serialize};

use super::MetricPoint;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub window_key: u64,
    pub block_number: u64,
    pub timestamp: String,
    pub price: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumePoint {
    pub window_key: u64,
    pub block_number: u64,
    pub timestamp: String,
    pub volume: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityPoint {
    pub window_key: u64,
    pub block_number: u64,
    pub timestamp: String,
    pub liquidity: String,
}

impl From<MetricPoint> for PricePoint {
    fn from(point: MetricPoint) -> Self {
        Self {
            window_key: point.window_key,
            block_number: point.block_number,
            timestamp: point.timestamp,
            price: point.value,
        }
    }
}

impl From<MetricPoint> for VolumePoint {
    fn from(point: MetricPoint) -> Self {
        Self {
            window_key: point.window_key,
            block_number: point.block_number,
            timestamp: point.timestamp,
            volume: point.value,
        }
    }
}

impl From<MetricPoint> for LiquidityPoint {
    fn from(point: MetricPoint) -> Self {
        Self {
            window_key: point.window_key,
            block_number: point.block_number,
            timestamp: point.timestamp,
            liquidity: point.value,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub interval: Option<String>,
}
