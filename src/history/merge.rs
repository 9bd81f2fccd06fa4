use crate::types::TransferRecord;
use std::collections::BTreeMap;

/// Merge the `from` and `to` transfer sets into one time-ordered sequence
/// holding a single record per block.
///
/// Records are ordered by timestamp, then by block number, so blocks sharing
/// a timestamp always come out in the same order.
pub fn merge_transfers(
    from: impl IntoIterator<Item = TransferRecord>,
    to: impl IntoIterator<Item = TransferRecord>,
) -> Vec<TransferRecord> {
    let by_block: BTreeMap<u64, TransferRecord> = from
        .into_iter()
        .chain(to)
        .map(|transfer| (transfer.block_number, transfer))
        .collect();

    let mut merged: Vec<TransferRecord> = by_block.into_values().collect();
    merged.sort_by_key(|t| (t.block_timestamp, t.block_number));
    merged
}
