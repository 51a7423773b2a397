use aer_core::node::{Node, NodeClass, NodeId};
use aer_core::time::TimeS;
use aer_core::trace::EnergyTrace;
use aer_models::qos::{QosModel, LATENCY_FLOOR, OFFLINE_SAMPLE, PDR_CEILING, PDR_FLOOR};
use aer_models::stream::{StreamKind, StreamSeeder};
use aer_testutils::config::reference_config;

fn battery(id: u32) -> Node {
    Node::builder()
        .id(NodeId::from(id))
        .class(NodeClass::Battery)
        .build()
}

#[test]
fn test_samples_respect_bounds() {
    let config = reference_config();
    let model = QosModel::new(&config);
    let mut stream = StreamSeeder::new(config.seed).node_stream(NodeId::from(0), StreamKind::Qos);
    for ratio in [0.0, 0.25, 0.5, 1.0] {
        for _ in 0..200 {
            let sample = model.sample(ratio, &mut stream);
            assert!((PDR_FLOOR..=PDR_CEILING).contains(&sample.pdr));
            assert!(sample.latency >= LATENCY_FLOOR);
            assert!(sample.throughput >= 0.0);
            assert_eq!(sample.throughput, 6.0 * sample.pdr);
        }
    }
}

#[test]
fn test_full_battery_pdr_near_base() {
    let config = reference_config();
    let model = QosModel::new(&config);
    let mut stream = StreamSeeder::new(config.seed).node_stream(NodeId::from(3), StreamKind::Qos);
    let sample = model.sample(1.0, &mut stream);
    assert!((0.8 - 1e-9..=0.9 + 1e-9).contains(&sample.pdr));
    assert!(sample.latency <= 50.0 + 0.2 * 200.0 + 10.0 + 1e-9);
}

#[test]
fn test_dead_node_reports_offline_defaults() {
    let config = reference_config();
    let model = QosModel::new(&config);
    let samples = vec![2000.0, 1000.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    let energy = EnergyTrace::new(
        battery(2),
        2000.0,
        samples,
        config.step_size,
        config.duration,
    );
    let mut stream = StreamSeeder::new(config.seed).node_stream(NodeId::from(2), StreamKind::Qos);
    let trace = model.trace(&energy, &mut stream);

    assert_eq!(trace.len(), 11);
    assert_ne!(trace.sample(1), Some(OFFLINE_SAMPLE));
    assert!((2..11).all(|idx| trace.sample(idx) == Some(OFFLINE_SAMPLE)));
}

#[test]
fn test_short_energy_trace_is_padded() {
    let config = reference_config();
    let model = QosModel::new(&config);
    let energy = EnergyTrace::new(
        battery(4),
        2000.0,
        vec![2000.0, 1999.0, 1998.0],
        config.step_size,
        TimeS::from(120u64),
    );
    let mut stream = StreamSeeder::new(config.seed).node_stream(NodeId::from(4), StreamKind::Qos);
    let trace = model.trace(&energy, &mut stream);

    assert_eq!(trace.len(), config.step_count());
    assert_eq!(trace.node_id(), NodeId::from(4));
    assert!((3..11).all(|idx| trace.sample(idx) == Some(OFFLINE_SAMPLE)));
}
