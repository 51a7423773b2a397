use aer_core::error::SimError;
use aer_core::time::TimeS;
use aer_core::trace::{QosSample, SecurityEvent, SecurityLog};
use aer_testutils::trace::{constant_qos, energy_trace};

#[test]
fn test_lifetime_of_survivor_is_horizon() {
    let trace = energy_trace(0, 10.0, vec![10.0, 8.0, 6.0, 4.0]);
    assert_eq!(trace.lifetime(), TimeS::from(180u64));
    assert_eq!(trace.death_index(), None);
    assert!(trace.is_alive_at(3));
    assert!(!trace.is_alive_at(4));
    assert_eq!(trace.min_energy(), 4.0);
    assert_eq!(trace.final_energy(), 4.0);
}

#[test]
fn test_lifetime_of_depleted_node() {
    let trace = energy_trace(1, 10.0, vec![10.0, 5.0, 0.0, 0.0]);
    assert_eq!(trace.death_index(), Some(2));
    assert_eq!(trace.lifetime(), TimeS::from(120u64));
    assert!(trace.is_alive_at(1));
    assert!(!trace.is_alive_at(2));
    assert_eq!(trace.min_energy(), 0.0);
}

#[test]
fn test_qos_trace_alignment() {
    let sample = QosSample {
        pdr: 0.5,
        latency: 40.0,
        throughput: 3.0,
    };
    let trace = constant_qos(2, 4, sample);
    assert_eq!(trace.len(), 4);
    assert_eq!(trace.pdr().len(), trace.latency().len());
    assert_eq!(trace.sample(3), Some(sample));
    assert_eq!(trace.sample(4), None);
}

#[test]
fn test_security_log_sets() {
    let mut log = SecurityLog::default();
    log.record_attack(TimeS::from(60u64), true).unwrap();
    log.record_attack(TimeS::from(120u64), false).unwrap();
    log.record_false_positive(TimeS::from(0u64)).unwrap();

    assert_eq!(log.total_attacks(), 2);
    assert_eq!(log.detected_count(), 1);
    assert_eq!(log.missed(), &[TimeS::from(120u64)]);
    assert_eq!(log.false_positive_count(), 1);
    assert_eq!(
        log.events(),
        vec![
            (TimeS::from(0u64), SecurityEvent::FalsePositive),
            (TimeS::from(60u64), SecurityEvent::Detected),
            (TimeS::from(120u64), SecurityEvent::Missed),
        ]
    );
}

#[test]
fn test_false_positive_cannot_overlap_attack() {
    let mut log = SecurityLog::default();
    log.record_attack(TimeS::from(60u64), false).unwrap();
    let result = log.record_false_positive(TimeS::from(60u64));
    assert!(matches!(result, Err(SimError::Inconsistent(_))));
    assert_eq!(log.false_positive_count(), 0);
}

#[test]
fn test_attack_cannot_overlap_false_positive() {
    let mut log = SecurityLog::default();
    log.record_false_positive(TimeS::from(60u64)).unwrap();
    let result = log.record_attack(TimeS::from(60u64), true);
    assert!(matches!(result, Err(SimError::Inconsistent(_))));
    assert_eq!(log.total_attacks(), 0);
    assert!(log.detected().is_empty());
    assert_eq!(log.false_positives(), &[TimeS::from(60u64)]);
}

#[test]
fn test_attack_time_is_recorded_once() {
    let mut log = SecurityLog::default();
    log.record_attack(TimeS::from(60u64), true).unwrap();
    let result = log.record_attack(TimeS::from(60u64), false);
    assert!(matches!(result, Err(SimError::Inconsistent(_))));
    assert_eq!(log.attacks(), &[TimeS::from(60u64)]);
    assert_eq!(log.detected(), &[TimeS::from(60u64)]);
    assert!(log.missed().is_empty());
}

#[test]
fn test_long_alternating_log_keeps_sets_disjoint() {
    let mut log = SecurityLog::default();
    for step in 0..200_000u64 {
        let time = TimeS::from(step);
        if step % 2 == 0 {
            log.record_attack(time, step % 4 == 0).unwrap();
        } else {
            log.record_false_positive(time).unwrap();
        }
    }
    assert_eq!(log.total_attacks(), 100_000);
    assert_eq!(log.detected_count(), 50_000);
    assert_eq!(log.false_positive_count(), 100_000);
    assert!(log.record_false_positive(TimeS::from(199_998u64)).is_err());
}
