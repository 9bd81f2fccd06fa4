//! Market history pipeline.
//!
//! transfers (from + to) -> merge -> windows -> ticker samples -> labelled points

pub mod assembler;
pub mod bucketer;
pub mod fetcher;
pub mod merge;
pub mod resolver;

pub use assembler::{assemble, format_window_label};
pub use bucketer::{group_transfers, representative_block, WindowMap};
pub use fetcher::TransferFetcher;
pub use merge::merge_transfers;
pub use resolver::{PointResolver, ResolvedPoint, WindowOutcome};

use crate::config::HistoryConfig;
use crate::error::Result;
use crate::graphql::GraphQlTransport;
use crate::types::{Direction, MetricKind, MetricPoint, TokenAddress, WindowSize};
use std::sync::Arc;
use tracing::info;

/// Builds metric series for a token. Nothing is kept between calls.
#[derive(Clone)]
pub struct HistoryService {
    transport: Arc<dyn GraphQlTransport>,
    config: HistoryConfig,
}

impl HistoryService {
    pub fn new(transport: Arc<dyn GraphQlTransport>, config: HistoryConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Series of `kind` for `raw_token`, one point per populated window,
    /// oldest first.
    ///
    /// An invalid address is rejected before any query is sent. Any failure
    /// while fetching transfers fails the whole call; failures while sampling
    /// a single window only drop that window.
    pub async fn history(&self, raw_token: &str, kind: MetricKind, window: WindowSize) -> Result<Vec<MetricPoint>> {
        let token = TokenAddress::parse(raw_token)?;
        let transport = self.transport.as_ref();

        let fetcher = TransferFetcher::new(transport, self.config.page_size);
        let (from, to) = tokio::try_join!(
            fetcher.fetch(&token, Direction::From),
            fetcher.fetch(&token, Direction::To),
        )?;

        let transfers = merge_transfers(from, to);
        let windows = group_transfers(&transfers, window);

        let resolver = PointResolver::new(
            transport,
            &token,
            self.config.ticker_query,
            self.config.volume_gap_policy,
            self.config.window_concurrency,
        );
        let outcomes = resolver.resolve(&windows, kind, window).await;
        let points = assemble(outcomes);

        info!(
            "📈 {} history for {}: {} transfers, {} {} windows, {} points",
            kind,
            token,
            transfers.len(),
            windows.len(),
            window,
            points.len()
        );

        Ok(points)
    }

    pub async fn price_history(&self, raw_token: &str) -> Result<Vec<MetricPoint>> {
        self.history(raw_token, MetricKind::Price, MetricKind::Price.default_window()).await
    }

    pub async fn volume_history(&self, raw_token: &str) -> Result<Vec<MetricPoint>> {
        self.history(raw_token, MetricKind::Volume, MetricKind::Volume.default_window()).await
    }

    pub async fn liquidity_history(&self, raw_token: &str) -> Result<Vec<MetricPoint>> {
        self.history(raw_token, MetricKind::Liquidity, MetricKind::Liquidity.default_window()).await
    }
}
