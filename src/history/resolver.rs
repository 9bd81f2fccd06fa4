use super::bucketer::{representative_block, WindowMap};
use crate::config::{TickerQueryMode, VolumeGapPolicy};
use crate::error::{HistoryError, Result};
use crate::graphql::{queries, GraphQlTransport};
use crate::types::{MetricKind, TickerField, TokenAddress, WindowSize};
use bigdecimal::num_bigint::BigInt;
use bigdecimal::BigDecimal;
use futures_util::stream::{self, StreamExt};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use tracing::warn;

/// A window's value before its timestamp label is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPoint {
    pub window_key: u64,
    pub block_number: u64,
    pub value: String,
}

/// Result of resolving one window. Failures stay local to their window.
#[derive(Debug)]
pub enum WindowOutcome {
    Resolved(ResolvedPoint),
    /// No point by policy, e.g. a volume window without a previous window.
    Skipped { window_key: u64 },
    Failed { window_key: u64, error: HistoryError },
}

impl WindowOutcome {
    pub fn window_key(&self) -> u64 {
        match self {
            WindowOutcome::Resolved(point) => point.window_key,
            WindowOutcome::Skipped { window_key } | WindowOutcome::Failed { window_key, .. } => *window_key,
        }
    }
}

/// Samples the ticker at each window's representative block.
pub struct PointResolver<'a> {
    transport: &'a dyn GraphQlTransport,
    token: &'a TokenAddress,
    ticker_query: TickerQueryMode,
    volume_gap_policy: VolumeGapPolicy,
    concurrency: usize,
}

impl<'a> PointResolver<'a> {
    pub fn new(
        transport: &'a dyn GraphQlTransport,
        token: &'a TokenAddress,
        ticker_query: TickerQueryMode,
        volume_gap_policy: VolumeGapPolicy,
        concurrency: usize,
    ) -> Self {
        Self {
            transport,
            token,
            ticker_query,
            volume_gap_policy,
            concurrency: concurrency.max(1),
        }
    }

    /// Resolve every populated window in ascending key order.
    ///
    /// At most `concurrency` windows are in flight at once; the output order
    /// does not depend on it.
    pub async fn resolve(&self, windows: &WindowMap, kind: MetricKind, window: WindowSize) -> Vec<WindowOutcome> {
        stream::iter(windows.keys().copied())
            .map(|window_key| self.resolve_window(windows, window_key, kind, window))
            .buffered(self.concurrency)
            .collect()
            .await
    }

    async fn resolve_window(
        &self,
        windows: &WindowMap,
        window_key: u64,
        kind: MetricKind,
        window: WindowSize,
    ) -> WindowOutcome {
        let block_number = windows
            .get(&window_key)
            .and_then(|transfers| representative_block(transfers));
        let Some(block_number) = block_number else {
            return WindowOutcome::Skipped { window_key };
        };

        let value = match kind {
            MetricKind::Price | MetricKind::Liquidity => {
                self.ticker_value(block_number, kind.ticker_field()).await.map(Some)
            }
            MetricKind::Volume => self.volume_delta(windows, window_key, block_number, window).await,
        };

        match value {
            Ok(Some(value)) => WindowOutcome::Resolved(ResolvedPoint {
                window_key,
                block_number,
                value,
            }),
            Ok(None) => WindowOutcome::Skipped { window_key },
            Err(error) => {
                warn!(
                    "Failed to resolve {} for {} at block {} (window {}): {}",
                    kind, self.token, block_number, window_key, error
                );
                WindowOutcome::Failed { window_key, error }
            }
        }
    }

    /// Volume traded during the window: the cumulative counter at this
    /// window's block minus the counter at the previous window's block.
    async fn volume_delta(
        &self,
        windows: &WindowMap,
        window_key: u64,
        block_number: u64,
        window: WindowSize,
    ) -> Result<Option<String>> {
        let previous_block = window
            .previous_key(window_key)
            .and_then(|key| windows.get(&key))
            .and_then(|transfers| representative_block(transfers));

        let (current, previous) = match previous_block {
            Some(previous_block) => {
                let (current, previous) = tokio::try_join!(
                    self.ticker_value(block_number, TickerField::TargetVolume),
                    self.ticker_value(previous_block, TickerField::TargetVolume),
                )?;
                (parse_counter(&current)?, parse_counter(&previous)?)
            }
            None => match self.volume_gap_policy {
                VolumeGapPolicy::Skip => return Ok(None),
                VolumeGapPolicy::Zero => {
                    let current = self.ticker_value(block_number, TickerField::TargetVolume).await?;
                    (parse_counter(&current)?, Counter::Exact(Decimal::ZERO))
                }
            },
        };

        Ok(Some(current.delta(previous)))
    }

    /// Raw value of `field` on the ticker as of `block_number`, `"0"` when
    /// there is no ticker or no such field.
    async fn ticker_value(&self, block_number: u64, field: TickerField) -> Result<String> {
        let value = match self.ticker_query {
            TickerQueryMode::Scoped => {
                let query = queries::scoped_ticker_query(self.token, block_number, field);
                let data = self.transport.request(&query).await?;
                data.get("ticker")
                    .filter(|ticker| ticker.is_object())
                    .map(|ticker| field_value(ticker, field))
            }
            TickerQueryMode::Unscoped => {
                let query = queries::unscoped_ticker_query(block_number, field);
                let data = self.transport.request(&query).await?;
                data.get("tickers")
                    .and_then(Value::as_array)
                    .and_then(|tickers| tickers.first())
                    .map(|ticker| field_value(ticker, field))
            }
        };

        Ok(value.unwrap_or_else(|| "0".to_string()))
    }
}

fn field_value(ticker: &Value, field: TickerField) -> String {
    match ticker.get(field.as_str()) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "0".to_string(),
    }
}

/// A cumulative volume counter. Values that fit `Decimal` without rounding
/// stay exact there; anything wider (raw 18-decimal units, exponents) is
/// carried as a `BigDecimal`.
#[derive(Debug, Clone, PartialEq)]
enum Counter {
    Exact(Decimal),
    Wide(BigDecimal),
}

impl Counter {
    fn into_wide(self) -> BigDecimal {
        match self {
            Counter::Exact(d) => BigDecimal::new(BigInt::from(d.mantissa()), i64::from(d.scale())),
            Counter::Wide(b) => b,
        }
    }

    /// `self - previous`, rendered without trailing zeros.
    fn delta(self, previous: Counter) -> String {
        if let (Counter::Exact(current), Counter::Exact(prev)) = (&self, &previous) {
            if let Some(delta) = current.checked_sub(*prev) {
                return delta.normalize().to_string();
            }
        }

        (self.into_wide() - previous.into_wide())
            .normalized()
            .to_plain_string()
    }
}

fn parse_counter(raw: &str) -> Result<Counter> {
    let raw = raw.trim();
    Decimal::from_str_exact(raw)
        .map(Counter::Exact)
        .or_else(|_| BigDecimal::from_str(raw).map(Counter::Wide))
        .map_err(|_| HistoryError::InvalidCounter(raw.to_string()))
}
