//! Tests for decode session statistics

use super::super::stats::DecodeStats;

#[test]
fn test_decode_stats_calculation() {
    let stats = DecodeStats {
        lines_read: 11,
        records_decoded: 9,
        blank_lines_skipped: 0,
    };

    assert_eq!(stats.data_lines(), 10);
    assert_eq!(stats.success_rate(), 90.0);
}

#[test]
fn test_blank_lines_excluded_from_rate() {
    let stats = DecodeStats {
        lines_read: 6,
        records_decoded: 4,
        blank_lines_skipped: 1,
    };

    assert_eq!(stats.success_rate(), 100.0);
}

#[test]
fn test_decode_stats_empty() {
    let empty_stats = DecodeStats::new();

    assert_eq!(empty_stats.lines_read, 0);
    assert_eq!(empty_stats.records_decoded, 0);
    assert_eq!(empty_stats.data_lines(), 0);
    assert_eq!(empty_stats.success_rate(), 0.0);
}
