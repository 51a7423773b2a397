use std::io::Cursor;
use std::path::Path;

use aer_input::tagged::{parse_tagged, read_tagged_log, InputError};

const SIMULATOR_LOG: &str = "\
00:01.000 ID:2 [PERF] PDR=80.0% Latency=70.0 ms Throughput=4.0
00:01.500 ID:2 [HARVEST] psolar=0.40J, stored=10.00J, consumed=0.10J
00:02.000 ID:3 [PERF] PDR=90.0% Latency=50.0 ms Throughput=5.0
00:02.100 ID:3 [ATTACK] Sinkhole detected (ack_ratio=0.20)
00:02.200 ID:4 [FP] False positive: rank (confidence=0.40)
00:02.300 ID:4 [ATTACK] Blackhole detected (confidence=0.91)
00:02.400 ID:4 [HARVEST] psolar=0.00J, stored=20.00J, consumed=0.20J
00:03.000 ID:5 plain line PDR=10.0%
";

#[test]
fn test_parse_simulator_log() {
    let series = parse_tagged(Cursor::new(SIMULATOR_LOG)).unwrap();
    assert_eq!(series.pdr, vec![80.0, 90.0]);
    assert_eq!(series.latency, vec![70.0, 50.0]);
    assert_eq!(series.throughput, vec![4.0, 5.0]);
    assert_eq!(series.stored_energy, vec![10.0, 20.0]);
    assert_eq!(series.attack_count, 2);
    assert_eq!(series.false_positive_count, 1);

    let summary = series.summary();
    assert_eq!(summary.avg_pdr_percent, 85.0);
    assert_eq!(summary.avg_latency, 60.0);
    assert_eq!(summary.avg_throughput, 4.5);
    assert_eq!(summary.avg_stored_energy, 15.0);
}

#[test]
fn test_empty_log_summarises_to_zero() {
    let summary = parse_tagged(Cursor::new("")).unwrap().summary();
    assert_eq!(summary.avg_pdr_percent, 0.0);
    assert_eq!(summary.avg_stored_energy, 0.0);
    assert_eq!(summary.attack_count, 0);
}

#[test]
fn test_missing_log_reports_path() {
    let result = read_tagged_log(Path::new("does/not/exist.log"));
    match result {
        Err(InputError::Io { path, .. }) => assert_eq!(path, Path::new("does/not/exist.log")),
        Ok(_) => panic!("missing file must fail"),
    }
}
