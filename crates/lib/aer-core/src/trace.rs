use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::error::{SimError, SimResult};
use crate::node::{Node, NodeClass, NodeId};
use crate::time::TimeS;

/// Residual energy of one node at every grid point. Once a sample reaches zero all later
/// samples are zero.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyTrace {
    node: Node,
    initial_capacity: f64,
    samples: Vec<f64>,
    death_index: Option<usize>,
    lifetime: TimeS,
}

impl EnergyTrace {
    pub fn new(
        node: Node,
        initial_capacity: f64,
        samples: Vec<f64>,
        step_size: TimeS,
        horizon: TimeS,
    ) -> Self {
        let death_index = samples.iter().position(|energy| *energy <= 0.0);
        let lifetime = match death_index {
            Some(idx) => step_size * idx as u64,
            None => horizon,
        };
        Self {
            node,
            initial_capacity,
            samples,
            death_index,
            lifetime,
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node.id
    }

    pub fn class(&self) -> NodeClass {
        self.node.class
    }

    pub fn initial_capacity(&self) -> f64 {
        self.initial_capacity
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn sample(&self, step_idx: usize) -> Option<f64> {
        self.samples.get(step_idx).copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time of the first depleted sample, or the horizon end if the node survived.
    pub fn lifetime(&self) -> TimeS {
        self.lifetime
    }

    pub fn death_index(&self) -> Option<usize> {
        self.death_index
    }

    pub fn is_alive_at(&self, step_idx: usize) -> bool {
        match self.death_index {
            Some(idx) => step_idx < idx && step_idx < self.samples.len(),
            None => step_idx < self.samples.len(),
        }
    }

    pub fn min_energy(&self) -> f64 {
        self.samples
            .iter()
            .copied()
            .fold(self.initial_capacity, f64::min)
    }

    pub fn final_energy(&self) -> f64 {
        self.samples.last().copied().unwrap_or(self.initial_capacity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QosSample {
    pub pdr: f64,
    pub latency: f64,
    pub throughput: f64,
}

/// Per-node QoS series, index-aligned with the node's energy trace.
#[derive(Debug, Clone, PartialEq)]
pub struct QosTrace {
    node_id: NodeId,
    pdr: Vec<f64>,
    latency: Vec<f64>,
    throughput: Vec<f64>,
}

impl QosTrace {
    pub fn with_capacity(node_id: NodeId, steps: usize) -> Self {
        Self {
            node_id,
            pdr: Vec::with_capacity(steps),
            latency: Vec::with_capacity(steps),
            throughput: Vec::with_capacity(steps),
        }
    }

    pub fn push(&mut self, sample: QosSample) {
        self.pdr.push(sample.pdr);
        self.latency.push(sample.latency);
        self.throughput.push(sample.throughput);
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn pdr(&self) -> &[f64] {
        &self.pdr
    }

    pub fn latency(&self) -> &[f64] {
        &self.latency
    }

    pub fn throughput(&self) -> &[f64] {
        &self.throughput
    }

    pub fn sample(&self, step_idx: usize) -> Option<QosSample> {
        Some(QosSample {
            pdr: *self.pdr.get(step_idx)?,
            latency: *self.latency.get(step_idx)?,
            throughput: *self.throughput.get(step_idx)?,
        })
    }

    pub fn len(&self) -> usize {
        self.pdr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pdr.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SecurityEvent {
    Detected,
    Missed,
    FalsePositive,
}

impl Display for SecurityEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SecurityEvent::Detected => write!(f, "Detected"),
            SecurityEvent::Missed => write!(f, "Missed"),
            SecurityEvent::FalsePositive => write!(f, "FalsePositive"),
        }
    }
}

/// Attack and alarm instants of a run. Every detected or missed time is an attack time, no
/// false-positive time is, and no instant is recorded twice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityLog {
    attacks: Vec<TimeS>,
    detected: Vec<TimeS>,
    missed: Vec<TimeS>,
    false_positives: Vec<TimeS>,
    recorded: BTreeSet<TimeS>,
}

impl SecurityLog {
    pub fn record_attack(&mut self, time: TimeS, detected: bool) -> SimResult<()> {
        self.claim(time, "attack")?;
        self.attacks.push(time);
        if detected {
            self.detected.push(time);
        } else {
            self.missed.push(time);
        }
        Ok(())
    }

    pub fn record_false_positive(&mut self, time: TimeS) -> SimResult<()> {
        self.claim(time, "false positive")?;
        self.false_positives.push(time);
        Ok(())
    }

    fn claim(&mut self, time: TimeS, event: &str) -> SimResult<()> {
        if !self.recorded.insert(time) {
            return Err(SimError::Inconsistent(format!(
                "{} at {} coincides with an earlier security event",
                event, time
            )));
        }
        Ok(())
    }

    pub fn attacks(&self) -> &[TimeS] {
        &self.attacks
    }

    pub fn detected(&self) -> &[TimeS] {
        &self.detected
    }

    pub fn missed(&self) -> &[TimeS] {
        &self.missed
    }

    pub fn false_positives(&self) -> &[TimeS] {
        &self.false_positives
    }

    pub fn total_attacks(&self) -> u64 {
        self.attacks.len() as u64
    }

    pub fn detected_count(&self) -> u64 {
        self.detected.len() as u64
    }

    pub fn false_positive_count(&self) -> u64 {
        self.false_positives.len() as u64
    }

    /// All events ordered by time.
    pub fn events(&self) -> Vec<(TimeS, SecurityEvent)> {
        let mut events: Vec<(TimeS, SecurityEvent)> = self
            .detected
            .iter()
            .map(|time| (*time, SecurityEvent::Detected))
            .chain(self.missed.iter().map(|time| (*time, SecurityEvent::Missed)))
            .chain(
                self.false_positives
                    .iter()
                    .map(|time| (*time, SecurityEvent::FalsePositive)),
            )
            .collect();
        events.sort_by_key(|(time, _)| *time);
        events
    }
}
