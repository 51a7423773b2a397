use serde::Deserialize;
use typed_builder::TypedBuilder;

use crate::error::{SimError, SimResult};
use crate::node::{Node, NodeClass, NodeId};
use crate::time::TimeS;

/// Seconds in one diurnal harvesting cycle.
pub const DAY_LENGTH: TimeS = TimeS(24 * 3600);

/// Parameters of the residual-energy model. Rates are given per minute and scaled by the
/// step width, so a 60 s step applies them once.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct EnergySettings {
    pub initial_capacity: f64,
    pub drain_rate: f64,
    pub drain_jitter: f64,
    pub harvest_rate: f64,
    pub harvest_jitter_min: f64,
    pub harvest_jitter_max: f64,
    pub day_length: TimeS,
}

impl Default for EnergySettings {
    fn default() -> Self {
        Self {
            initial_capacity: 2000.0,
            drain_rate: 0.1,
            drain_jitter: 0.02,
            harvest_rate: 0.05,
            harvest_jitter_min: 0.8,
            harvest_jitter_max: 1.2,
            day_length: DAY_LENGTH,
        }
    }
}

impl EnergySettings {
    fn validate(&self) -> SimResult<()> {
        check_positive("initial_capacity", self.initial_capacity)?;
        check_non_negative("drain_rate", self.drain_rate)?;
        check_non_negative("drain_jitter", self.drain_jitter)?;
        check_non_negative("harvest_rate", self.harvest_rate)?;
        check_non_negative("harvest_jitter_min", self.harvest_jitter_min)?;
        check_non_negative("harvest_jitter_max", self.harvest_jitter_max)?;
        if self.harvest_jitter_min > self.harvest_jitter_max {
            return Err(SimError::Configuration(format!(
                "harvest jitter range [{}, {}] is empty",
                self.harvest_jitter_min, self.harvest_jitter_max
            )));
        }
        if self.day_length.is_zero() {
            return Err(SimError::Configuration("day_length must be positive".into()));
        }
        Ok(())
    }
}

/// Parameters of the QoS surrogate. `packet_rate` is the nominal packets per minute.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct QosSettings {
    pub base_pdr: f64,
    pub energy_factor: f64,
    pub pdr_jitter: f64,
    pub base_latency: f64,
    pub latency_spread: f64,
    pub latency_jitter: f64,
    pub packet_rate: f64,
}

impl Default for QosSettings {
    fn default() -> Self {
        Self {
            base_pdr: 0.85,
            energy_factor: 0.1,
            pdr_jitter: 0.05,
            base_latency: 50.0,
            latency_spread: 200.0,
            latency_jitter: 10.0,
            packet_rate: 6.0,
        }
    }
}

impl QosSettings {
    fn validate(&self) -> SimResult<()> {
        check_ratio("base_pdr", self.base_pdr)?;
        check_non_negative("energy_factor", self.energy_factor)?;
        check_non_negative("pdr_jitter", self.pdr_jitter)?;
        check_non_negative("base_latency", self.base_latency)?;
        check_non_negative("latency_spread", self.latency_spread)?;
        check_non_negative("latency_jitter", self.latency_jitter)?;
        check_positive("packet_rate", self.packet_rate)
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SecuritySettings {
    pub attack_probability: f64,
    pub detection_rate: f64,
    pub false_positive_probability: f64,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            attack_probability: 0.1,
            detection_rate: 0.85,
            false_positive_probability: 0.02,
        }
    }
}

impl SecuritySettings {
    fn validate(&self) -> SimResult<()> {
        check_ratio("attack_probability", self.attack_probability)?;
        check_ratio("detection_rate", self.detection_rate)?;
        check_ratio("false_positive_probability", self.false_positive_probability)
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct AggregateSettings {
    /// Percentage of nodes that must be dead for the network to count as dead.
    pub lifetime_percentile: f64,
}

impl Default for AggregateSettings {
    fn default() -> Self {
        Self {
            lifetime_percentile: 20.0,
        }
    }
}

impl AggregateSettings {
    fn validate(&self) -> SimResult<()> {
        if !(0.0..=100.0).contains(&self.lifetime_percentile) {
            return Err(SimError::Configuration(format!(
                "lifetime_percentile {} is outside [0, 100]",
                self.lifetime_percentile
            )));
        }
        Ok(())
    }
}

/// Everything one run needs. The config is never mutated once a simulation is built from it.
#[derive(Debug, Clone, Copy, PartialEq, TypedBuilder)]
pub struct SimulationConfig {
    pub node_count: u32,
    pub step_size: TimeS,
    pub duration: TimeS,
    pub solar_ratio: f64,
    /// Share of mobile nodes. Only topology generation reads it.
    #[builder(default)]
    pub mobile_ratio: f64,
    pub seed: u64,
    #[builder(default)]
    pub energy: EnergySettings,
    #[builder(default)]
    pub qos: QosSettings,
    #[builder(default)]
    pub security: SecuritySettings,
    #[builder(default)]
    pub aggregate: AggregateSettings,
}

impl SimulationConfig {
    pub fn validate(&self) -> SimResult<()> {
        if self.node_count == 0 {
            return Err(SimError::Configuration(
                "node_count must be at least 1".into(),
            ));
        }
        if self.step_size.is_zero() {
            return Err(SimError::Configuration("step_size must be positive".into()));
        }
        if self.duration.is_zero() {
            return Err(SimError::Configuration("duration must be positive".into()));
        }
        if self.duration.as_u64() % self.step_size.as_u64() != 0 {
            return Err(SimError::Configuration(format!(
                "duration {} is not a multiple of step_size {}",
                self.duration, self.step_size
            )));
        }
        check_ratio("solar_ratio", self.solar_ratio)?;
        check_ratio("mobile_ratio", self.mobile_ratio)?;
        self.energy.validate()?;
        self.qos.validate()?;
        self.security.validate()?;
        self.aggregate.validate()
    }

    pub fn solar_count(&self) -> u32 {
        (self.node_count as f64 * self.solar_ratio).floor() as u32
    }

    pub fn battery_count(&self) -> u32 {
        self.node_count - self.solar_count()
    }

    /// Number of grid points, both ends of the horizon included.
    pub fn step_count(&self) -> usize {
        (self.duration / self.step_size) as usize + 1
    }

    pub fn time_grid(&self) -> impl Iterator<Item = TimeS> + '_ {
        (0..self.step_count() as u64).map(|k| self.step_size * k)
    }

    pub fn time_at(&self, step_idx: usize) -> TimeS {
        self.step_size * step_idx as u64
    }

    /// Nodes in id order. The first `solar_count` ids are solar.
    pub fn nodes(&self) -> Vec<Node> {
        let solar_count = self.solar_count();
        (0..self.node_count)
            .map(|idx| {
                let class = if idx < solar_count {
                    NodeClass::Solar
                } else {
                    NodeClass::Battery
                };
                Node::builder().id(NodeId::from(idx)).class(class).build()
            })
            .collect()
    }

    /// Packets a node is expected to send over the whole horizon at the nominal rate.
    pub fn expected_packets(&self) -> f64 {
        self.qos.packet_rate * self.duration.as_minutes()
    }
}

fn check_ratio(name: &str, value: f64) -> SimResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SimError::Configuration(format!(
            "{} {} is outside [0, 1]",
            name, value
        )));
    }
    Ok(())
}

fn check_non_negative(name: &str, value: f64) -> SimResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SimError::Configuration(format!(
            "{} must be a finite non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}

fn check_positive(name: &str, value: f64) -> SimResult<()> {
    check_non_negative(name, value)?;
    if value == 0.0 {
        return Err(SimError::Configuration(format!("{} must be positive", name)));
    }
    Ok(())
}
