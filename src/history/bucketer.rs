use crate::types::{TransferRecord, WindowSize};
use std::collections::BTreeMap;

/// Populated windows keyed by window start. Empty windows are never present.
pub type WindowMap = BTreeMap<u64, Vec<TransferRecord>>;

/// Group time-ordered transfers into fixed-width windows.
///
/// Each window keeps the input order of its records, so a sorted input gives
/// sorted windows.
pub fn group_transfers(transfers: &[TransferRecord], window: WindowSize) -> WindowMap {
    let mut windows = WindowMap::new();

    for transfer in transfers {
        windows
            .entry(window.window_key(transfer.block_timestamp))
            .or_default()
            .push(*transfer);
    }

    windows
}

/// The block sampled for a window: its latest transfer.
pub fn representative_block(transfers: &[TransferRecord]) -> Option<u64> {
    transfers.last().map(|t| t.block_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_hour() {
        let transfers = vec![
            TransferRecord::new(1, 0),
            TransferRecord::new(2, 3700),
            TransferRecord::new(3, 3700),
        ];

        let windows = group_transfers(&transfers, WindowSize::Hour);

        assert_eq!(windows.keys().copied().collect::<Vec<_>>(), vec![0, 3600]);
        assert_eq!(windows[&0], vec![TransferRecord::new(1, 0)]);
        assert_eq!(
            windows[&3600],
            vec![TransferRecord::new(2, 3700), TransferRecord::new(3, 3700)]
        );
        assert_eq!(representative_block(&windows[&3600]), Some(3));
    }

    #[test]
    fn test_group_is_sparse() {
        let transfers = vec![TransferRecord::new(1, 10), TransferRecord::new(2, 86400 * 5 + 1)];

        let windows = group_transfers(&transfers, WindowSize::Day);

        assert_eq!(windows.len(), 2);
        assert!(windows.contains_key(&0));
        assert!(windows.contains_key(&(86400 * 5)));
    }

    #[test]
    fn test_every_record_falls_inside_its_window() {
        let transfers: Vec<_> = (0..200u64).map(|i| TransferRecord::new(i, i * 1237)).collect();

        for size in [WindowSize::Hour, WindowSize::Day] {
            let windows = group_transfers(&transfers, size);
            let total: usize = windows.values().map(Vec::len).sum();
            assert_eq!(total, transfers.len());

            for (key, records) in &windows {
                assert!(records
                    .iter()
                    .all(|t| *key <= t.block_timestamp && t.block_timestamp < key + size.seconds()));
            }
        }
    }

    #[test]
    fn test_representative_block_of_empty_window() {
        assert_eq!(representative_block(&[]), None);
    }
}
