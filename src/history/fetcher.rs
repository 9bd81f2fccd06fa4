use crate::error::{HistoryError, Result};
use crate::graphql::{queries, GraphQlTransport};
use crate::types::{Direction, TokenAddress, TransferRecord};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct TransfersPage {
    transfers: Vec<TransferRecord>,
}

/// Exhaustive, paginated retrieval of the transfers touching a token.
pub struct TransferFetcher<'a> {
    transport: &'a dyn GraphQlTransport,
    page_size: usize,
}

impl<'a> TransferFetcher<'a> {
    pub fn new(transport: &'a dyn GraphQlTransport, page_size: usize) -> Self {
        Self {
            transport,
            page_size: page_size.max(1),
        }
    }

    /// Fetch every transfer where `token` is on the `direction` side, in
    /// fetch order.
    ///
    /// Pages are requested with a growing `skip` until one comes back shorter
    /// than the page size. Any failing page fails the whole fetch; a partial
    /// result is never returned.
    pub async fn fetch(&self, token: &TokenAddress, direction: Direction) -> Result<Vec<TransferRecord>> {
        let mut transfers = Vec::new();
        let mut skip = 0;
        let mut pages = 0usize;

        loop {
            let query = queries::transfers_query(token, direction, self.page_size, skip);
            let data = self.transport.request(&query).await?;
            let page = parse_transfers_page(data)?;
            pages += 1;

            let fetched = page.len();
            transfers.extend(page);

            if fetched < self.page_size {
                break;
            }
            skip += self.page_size;
        }

        debug!(
            "Fetched {} '{}' transfers for {} in {} pages",
            transfers.len(),
            direction,
            token,
            pages
        );

        Ok(transfers)
    }
}

fn parse_transfers_page(data: Value) -> Result<Vec<TransferRecord>> {
    serde_json::from_value::<TransfersPage>(data)
        .map(|page| page.transfers)
        .map_err(|e| HistoryError::UnexpectedResponse(format!("transfers page: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::mock::{query_arg, MockTransport};
    use serde_json::json;

    fn token() -> TokenAddress {
        TokenAddress::parse("0x1111111111111111111111111111111111111111").unwrap()
    }

    /// Serves `total` transfers, one per block, `first` at a time.
    fn paged_source(total: u64) -> MockTransport {
        MockTransport::new(move |query| {
            let first = query_arg(query, "first").unwrap();
            let skip = query_arg(query, "skip").unwrap();
            let end = (skip + first).min(total);
            let transfers: Vec<_> = (skip..end)
                .map(|i| json!({"blockNumber": i.to_string(), "blockTimestamp": (i * 10).to_string()}))
                .collect();
            Ok(json!({ "transfers": transfers }))
        })
    }

    #[tokio::test]
    async fn test_fetch_paginates_until_short_page() {
        let transport = paged_source(250);
        let fetcher = TransferFetcher::new(&transport, 100);

        let transfers = fetcher.fetch(&token(), Direction::From).await.unwrap();

        assert_eq!(transfers.len(), 250);
        assert_eq!(transport.call_count(), 3);
        assert!(transfers
            .iter()
            .enumerate()
            .all(|(i, t)| t.block_number == i as u64));

        let skips: Vec<u64> = transport
            .queries()
            .iter()
            .map(|q| query_arg(q, "skip").unwrap())
            .collect();
        assert_eq!(skips, vec![0, 100, 200]);
    }

    #[tokio::test]
    async fn test_fetch_exact_multiple_ends_on_empty_page() {
        let transport = paged_source(200);
        let fetcher = TransferFetcher::new(&transport, 100);

        let transfers = fetcher.fetch(&token(), Direction::To).await.unwrap();

        assert_eq!(transfers.len(), 200);
        assert_eq!(transport.call_count(), 3);
        assert!(transport.queries()[0].contains(r#"to: "0x1111111111111111111111111111111111111111""#));
    }

    #[tokio::test]
    async fn test_fetch_empty_source() {
        let transport = paged_source(0);
        let fetcher = TransferFetcher::new(&transport, 1000);

        let transfers = fetcher.fetch(&token(), Direction::From).await.unwrap();

        assert!(transfers.is_empty());
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_on_later_page_aborts() {
        let transport = MockTransport::new(|query| {
            if query_arg(query, "skip") == Some(0) {
                let transfers: Vec<_> = (0..2)
                    .map(|i| json!({"blockNumber": i.to_string(), "blockTimestamp": "1"}))
                    .collect();
                Ok(json!({ "transfers": transfers }))
            } else {
                Err(HistoryError::Transport("connection reset".to_string()))
            }
        });
        let fetcher = TransferFetcher::new(&transport, 2);

        let result = fetcher.fetch(&token(), Direction::From).await;

        assert!(matches!(result, Err(HistoryError::Transport(_))));
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_fetch_rejects_malformed_page() {
        let transport = MockTransport::new(|_| Ok(json!({ "transfer": [] })));
        let fetcher = TransferFetcher::new(&transport, 10);

        let result = fetcher.fetch(&token(), Direction::From).await;

        assert!(matches!(result, Err(HistoryError::UnexpectedResponse(_))));
    }
}
