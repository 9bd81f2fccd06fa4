use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Width of the time buckets a series is aggregated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowSize {
    Hour,
    Day,
}

impl WindowSize {
    pub fn seconds(&self) -> u64 {
        match self {
            WindowSize::Hour => 3600,
            WindowSize::Day => 86400,
        }
    }

    /// Start of the window containing `timestamp` (unix seconds).
    pub fn window_key(&self, timestamp: u64) -> u64 {
        let size = self.seconds();
        timestamp / size * size
    }

    /// Key of the window immediately before `window_key`, if there is one.
    pub fn previous_key(&self, window_key: u64) -> Option<u64> {
        window_key.checked_sub(self.seconds())
    }
}

impl FromStr for WindowSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hour" | "hourly" | "1h" => Ok(WindowSize::Hour),
            "day" | "daily" | "1d" => Ok(WindowSize::Day),
            other => Err(format!("unknown interval '{}', expected hour or day", other)),
        }
    }
}

impl fmt::Display for WindowSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowSize::Hour => f.write_str("hour"),
            WindowSize::Day => f.write_str("day"),
        }
    }
}

/// The market indicator a series is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Price,
    Volume,
    Liquidity,
}

impl MetricKind {
    /// Ticker field holding the raw value for this metric.
    pub fn ticker_field(&self) -> TickerField {
        match self {
            MetricKind::Price => TickerField::LastPrice,
            MetricKind::Volume => TickerField::TargetVolume,
            MetricKind::Liquidity => TickerField::LiquidityInUsd,
        }
    }

    pub fn default_window(&self) -> WindowSize {
        match self {
            MetricKind::Price => WindowSize::Hour,
            MetricKind::Volume | MetricKind::Liquidity => WindowSize::Day,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::Price => f.write_str("price"),
            MetricKind::Volume => f.write_str("volume"),
            MetricKind::Liquidity => f.write_str("liquidity"),
        }
    }
}

/// Ticker fields that may be requested. Query construction only ever uses
/// these names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickerField {
    LastPrice,
    TargetVolume,
    LiquidityInUsd,
}

impl TickerField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TickerField::LastPrice => "last_price",
            TickerField::TargetVolume => "target_volume",
            TickerField::LiquidityInUsd => "liquidity_in_usd",
        }
    }
}

/// One point of a resolved series: a populated window, the block it was
/// sampled at and the value observed there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricPoint {
    pub window_key: u64,
    pub timestamp: String,
    pub block_number: u64,
    pub value: String,
}
