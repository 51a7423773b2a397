use aer_core::config::{SecuritySettings, SimulationConfig};
use aer_core::time::TimeS;

pub const REFERENCE_SEED: u64 = 12345;

/// Ten nodes, 30 % solar, ten minutes in one-minute steps.
pub fn reference_config() -> SimulationConfig {
    SimulationConfig::builder()
        .node_count(10)
        .step_size(TimeS::from(60u64))
        .duration(TimeS::from(600u64))
        .solar_ratio(0.3)
        .seed(REFERENCE_SEED)
        .build()
}

/// The full-hour, forty-node evaluation scenario.
pub fn evaluation_config() -> SimulationConfig {
    SimulationConfig::builder()
        .node_count(40)
        .step_size(TimeS::from(60u64))
        .duration(TimeS::from(3600u64))
        .solar_ratio(0.3)
        .mobile_ratio(0.3)
        .seed(REFERENCE_SEED)
        .build()
}

pub fn config_without_attacks() -> SimulationConfig {
    SimulationConfig {
        security: SecuritySettings {
            attack_probability: 0.0,
            false_positive_probability: 0.0,
            ..SecuritySettings::default()
        },
        ..reference_config()
    }
}

pub fn reference_config_with<F>(edit: F) -> SimulationConfig
where
    F: FnOnce(&mut SimulationConfig),
{
    let mut config = reference_config();
    edit(&mut config);
    config
}
