use std::f64::consts::PI;

use log::debug;

use aer_core::config::{EnergySettings, SimulationConfig};
use aer_core::node::{Node, NodeClass};
use aer_core::time::TimeS;
use aer_core::trace::EnergyTrace;

use crate::stream::{NodeStreams, RngStream};

/// A source that adds energy back to a node during a step.
pub trait Harvester {
    fn harvest(&self, time: TimeS, step_minutes: f64, stream: &mut RngStream) -> f64;
}

#[derive(Copy, Clone, Debug)]
pub enum HarvestType {
    Solar(SolarHarvester),
    Absent,
}

impl HarvestType {
    pub fn for_class(class: NodeClass, settings: &EnergySettings) -> Self {
        match class {
            NodeClass::Solar => HarvestType::Solar(SolarHarvester::with_settings(settings)),
            NodeClass::Battery => HarvestType::Absent,
        }
    }
}

impl Harvester for HarvestType {
    fn harvest(&self, time: TimeS, step_minutes: f64, stream: &mut RngStream) -> f64 {
        match self {
            HarvestType::Solar(solar) => solar.harvest(time, step_minutes, stream),
            HarvestType::Absent => 0.0,
        }
    }
}

/// Harvest that follows a sinusoidal day, anchored at the start of the run, with a
/// multiplicative jitter.
#[derive(Copy, Clone, Debug)]
pub struct SolarHarvester {
    pub rate: f64,
    pub jitter_min: f64,
    pub jitter_max: f64,
    pub day_length: TimeS,
}

impl SolarHarvester {
    pub fn with_settings(settings: &EnergySettings) -> Self {
        Self {
            rate: settings.harvest_rate,
            jitter_min: settings.harvest_jitter_min,
            jitter_max: settings.harvest_jitter_max,
            day_length: settings.day_length,
        }
    }

    /// Irradiance factor in `[0, 1]` at the given time.
    pub fn diurnal_factor(&self, time: TimeS) -> f64 {
        let phase = 2.0 * PI * time.as_f64() / self.day_length.as_f64();
        phase.sin() * 0.5 + 0.5
    }
}

impl Harvester for SolarHarvester {
    fn harvest(&self, time: TimeS, step_minutes: f64, stream: &mut RngStream) -> f64 {
        let jitter = stream.uniform(self.jitter_min, self.jitter_max);
        self.rate * step_minutes * self.diurnal_factor(time) * jitter
    }
}

#[derive(Copy, Clone, Debug)]
pub struct EnergyModel {
    settings: EnergySettings,
    step_size: TimeS,
    duration: TimeS,
    step_count: usize,
}

impl EnergyModel {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            settings: config.energy,
            step_size: config.step_size,
            duration: config.duration,
            step_count: config.step_count(),
        }
    }

    /// Residual energy of `node` at every grid point, starting from the full capacity.
    /// A depleted node stops drawing variates and stays at zero.
    pub fn trace(&self, node: Node, streams: &mut NodeStreams) -> EnergyTrace {
        let harvester = HarvestType::for_class(node.class, &self.settings);
        let step_minutes = self.step_size.as_minutes();
        let mut energy = self.settings.initial_capacity;
        let mut samples = Vec::with_capacity(self.step_count);
        samples.push(energy);

        for step_idx in 1..self.step_count {
            if energy > 0.0 {
                let time = self.step_size * step_idx as u64;
                let drain = self.settings.drain_rate * step_minutes
                    + streams.drain.uniform(0.0, self.settings.drain_jitter);
                let harvested = harvester.harvest(time, step_minutes, &mut streams.harvest);
                energy = (energy + harvested - drain).max(0.0);
            }
            samples.push(energy);
        }

        let trace = EnergyTrace::new(
            node,
            self.settings.initial_capacity,
            samples,
            self.step_size,
            self.duration,
        );
        debug!(
            "Node {} ({}) ends at {:.3} with lifetime {}",
            node.id,
            node.class,
            trace.final_energy(),
            trace.lifetime()
        );
        trace
    }
}
