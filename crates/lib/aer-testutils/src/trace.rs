use aer_core::node::{Node, NodeClass, NodeId};
use aer_core::time::TimeS;
use aer_core::trace::{EnergyTrace, QosSample, QosTrace};

pub const STEP: TimeS = TimeS(60);

pub fn battery_node(id: u32) -> Node {
    Node::builder()
        .id(NodeId::from(id))
        .class(NodeClass::Battery)
        .build()
}

/// Energy trace on a 60 s grid whose horizon is the last grid point.
pub fn energy_trace(id: u32, initial: f64, samples: Vec<f64>) -> EnergyTrace {
    let horizon = STEP * (samples.len().saturating_sub(1)) as u64;
    EnergyTrace::new(battery_node(id), initial, samples, STEP, horizon)
}

pub fn constant_qos(id: u32, steps: usize, sample: QosSample) -> QosTrace {
    let mut trace = QosTrace::with_capacity(NodeId::from(id), steps);
    (0..steps).for_each(|_| trace.push(sample));
    trace
}
