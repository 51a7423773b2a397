use aer_core::config::{QosSettings, SimulationConfig};
use aer_core::trace::{EnergyTrace, QosSample, QosTrace};

use crate::stream::RngStream;

pub const PDR_FLOOR: f64 = 0.1;
pub const PDR_CEILING: f64 = 0.98;
pub const LATENCY_FLOOR: f64 = 20.0;

/// Reported for every step at which the node has no live energy sample.
pub const OFFLINE_SAMPLE: QosSample = QosSample {
    pdr: 0.1,
    latency: 100.0,
    throughput: 0.6,
};

#[derive(Copy, Clone, Debug)]
pub struct QosModel {
    settings: QosSettings,
    step_count: usize,
}

impl QosModel {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            settings: config.qos,
            step_count: config.step_count(),
        }
    }

    /// QoS of a live node holding `energy_ratio` of its initial capacity.
    pub fn sample(&self, energy_ratio: f64, stream: &mut RngStream) -> QosSample {
        let settings = &self.settings;
        let pdr_noise = stream.uniform(-settings.pdr_jitter, settings.pdr_jitter);
        let pdr = (settings.base_pdr - settings.energy_factor * (1.0 - energy_ratio) + pdr_noise)
            .clamp(PDR_FLOOR, PDR_CEILING);

        let latency_noise = stream.uniform(-settings.latency_jitter, settings.latency_jitter);
        let latency = (settings.base_latency + (1.0 - pdr) * settings.latency_spread
            + latency_noise)
            .max(LATENCY_FLOOR);

        QosSample {
            pdr,
            latency,
            throughput: settings.packet_rate * pdr,
        }
    }

    /// One sample per grid point, whatever the length of the energy trace.
    pub fn trace(&self, energy: &EnergyTrace, stream: &mut RngStream) -> QosTrace {
        let mut trace = QosTrace::with_capacity(energy.node_id(), self.step_count);
        for step_idx in 0..self.step_count {
            let sample = match energy.sample(step_idx) {
                Some(level) if energy.is_alive_at(step_idx) => {
                    self.sample(level / energy.initial_capacity(), stream)
                }
                _ => OFFLINE_SAMPLE,
            };
            trace.push(sample);
        }
        trace
    }
}
