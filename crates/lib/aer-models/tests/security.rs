use aer_core::config::SecuritySettings;
use aer_core::time::TimeS;
use aer_models::security::SecurityProcess;
use aer_models::stream::{StreamKind, StreamSeeder};

fn grid(steps: u64) -> impl Iterator<Item = TimeS> {
    (0..steps).map(|k| TimeS::from(k * 60))
}

fn run(settings: SecuritySettings, steps: u64, seed: u64) -> aer_core::trace::SecurityLog {
    let mut stream = StreamSeeder::new(seed).network_stream(StreamKind::Security);
    SecurityProcess::new(settings)
        .run(grid(steps), &mut stream)
        .unwrap()
}

#[test]
fn test_detected_subset_and_disjoint_alarms() {
    let settings = SecuritySettings {
        attack_probability: 0.3,
        detection_rate: 0.7,
        false_positive_probability: 0.2,
    };
    let log = run(settings, 500, 12345);

    assert!(log.total_attacks() > 0);
    assert!(log.detected().iter().all(|t| log.attacks().contains(t)));
    assert!(log.missed().iter().all(|t| log.attacks().contains(t)));
    assert!(log.false_positives().iter().all(|t| !log.attacks().contains(t)));
    assert_eq!(
        log.detected().len() + log.missed().len(),
        log.attacks().len()
    );
}

#[test]
fn test_certain_attacks_and_detection() {
    let settings = SecuritySettings {
        attack_probability: 1.0,
        detection_rate: 1.0,
        false_positive_probability: 1.0,
    };
    let log = run(settings, 11, 1);
    assert_eq!(log.total_attacks(), 11);
    assert_eq!(log.detected_count(), 11);
    assert_eq!(log.false_positive_count(), 0);
}

#[test]
fn test_quiet_network() {
    let settings = SecuritySettings {
        attack_probability: 0.0,
        detection_rate: 0.85,
        false_positive_probability: 0.0,
    };
    let log = run(settings, 61, 12345);
    assert_eq!(log.total_attacks(), 0);
    assert!(log.events().is_empty());
}

#[test]
fn test_alarms_without_attacks() {
    let settings = SecuritySettings {
        attack_probability: 0.0,
        detection_rate: 0.85,
        false_positive_probability: 1.0,
    };
    let log = run(settings, 11, 3);
    assert_eq!(log.total_attacks(), 0);
    assert_eq!(log.false_positive_count(), 11);
}

#[test]
fn test_same_seed_same_log() {
    let settings = SecuritySettings::default();
    assert_eq!(run(settings, 61, 99), run(settings, 61, 99));
}
