//! GraphQL documents sent to the indexer.
//!
//! Every interpolated value is either a validated [`TokenAddress`], an integer,
//! or a name from a closed enum, so no caller-supplied text reaches a query.

use crate::types::{Direction, TickerField, TokenAddress};

/// One page of transfers touching `token` on the given side, oldest first.
pub fn transfers_query(token: &TokenAddress, direction: Direction, first: usize, skip: usize) -> String {
    format!(
        r#"{{
  transfers(first: {first}, skip: {skip}, orderBy: blockTimestamp, orderDirection: asc, where: {{ {direction}: "{token}" }}) {{
    blockNumber
    blockTimestamp
  }}
}}"#,
        first = first,
        skip = skip,
        direction = direction.as_str(),
        token = token.as_str(),
    )
}

/// The ticker with id `token` as of `block`. Answers `{"ticker": {..} | null}`.
pub fn scoped_ticker_query(token: &TokenAddress, block: u64, field: TickerField) -> String {
    format!(
        r#"{{
  ticker(block: {{number: {block}}}, id: "{token}") {{
    {field}
  }}
}}"#,
        block = block,
        token = token.as_str(),
        field = field.as_str(),
    )
}

/// All tickers as of `block`. Answers `{"tickers": [..]}`.
pub fn unscoped_ticker_query(block: u64, field: TickerField) -> String {
    format!(
        r#"{{
  tickers(block: {{number: {block}}}) {{
    {field}
  }}
}}"#,
        block = block,
        field = field.as_str(),
    )
}
