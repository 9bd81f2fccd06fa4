use super::resolver::WindowOutcome;
use crate::types::MetricPoint;
use chrono::DateTime;
use tracing::debug;

/// `Jan 5, 2024, 3:00:00 PM`, always rendered in UTC.
const LABEL_FORMAT: &str = "%b %-d, %Y, %-I:%M:%S %p";

/// Human readable UTC label for a window start given in unix seconds.
pub fn format_window_label(window_key: u64) -> String {
    i64::try_from(window_key)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format(LABEL_FORMAT).to_string())
        .unwrap_or_else(|| window_key.to_string())
}

/// Keep the resolved windows, in the order they were resolved, and label them.
pub fn assemble(outcomes: Vec<WindowOutcome>) -> Vec<MetricPoint> {
    let total = outcomes.len();
    let mut skipped = 0;
    let mut failed = 0;

    let points: Vec<MetricPoint> = outcomes
        .into_iter()
        .filter_map(|outcome| match outcome {
            WindowOutcome::Resolved(point) => Some(MetricPoint {
                window_key: point.window_key,
                timestamp: format_window_label(point.window_key),
                block_number: point.block_number,
                value: point.value,
            }),
            WindowOutcome::Skipped { .. } => {
                skipped += 1;
                None
            }
            WindowOutcome::Failed { .. } => {
                failed += 1;
                None
            }
        })
        .collect();

    debug!(
        "Assembled {} of {} windows ({} skipped, {} failed)",
        points.len(),
        total,
        skipped,
        failed
    );

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HistoryError;
    use crate::history::resolver::ResolvedPoint;

    fn resolved(window_key: u64, value: &str) -> WindowOutcome {
        WindowOutcome::Resolved(ResolvedPoint {
            window_key,
            block_number: window_key / 10,
            value: value.to_string(),
        })
    }

    #[test]
    fn test_format_window_label() {
        assert_eq!(format_window_label(0), "Jan 1, 1970, 12:00:00 AM");
        assert_eq!(format_window_label(1_704_466_800), "Jan 5, 2024, 3:00:00 PM");
        assert_eq!(format_window_label(86400 * 40), "Feb 10, 1970, 12:00:00 AM");
    }

    #[test]
    fn test_assemble_drops_skipped_and_failed() {
        let outcomes = vec![
            WindowOutcome::Skipped { window_key: 0 },
            resolved(3600, "1.0"),
            WindowOutcome::Failed {
                window_key: 7200,
                error: HistoryError::Transport("boom".to_string()),
            },
            resolved(10800, "2.0"),
        ];

        let points = assemble(outcomes);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].window_key, 3600);
        assert_eq!(points[0].timestamp, "Jan 1, 1970, 1:00:00 AM");
        assert_eq!(points[0].block_number, 360);
        assert_eq!(points[1].value, "2.0");
    }
}
