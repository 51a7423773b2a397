use serde::Serialize;
use typed_builder::TypedBuilder;

/// Scalar summary of one run. Built once by the aggregator and never changed afterwards.
/// Lifetimes are in seconds.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, TypedBuilder)]
pub struct MetricsRecord {
    pub avg_lifetime: f64,
    pub network_lifetime: f64,
    pub avg_energy_per_packet: f64,
    pub avg_pdr: f64,
    pub avg_latency: f64,
    pub avg_throughput: f64,
    pub avg_residual_energy: f64,
    pub total_attacks: u64,
    pub detected_attacks: u64,
    pub false_positives: u64,
    pub detection_rate: f64,
    /// False alarms per attack, with at least one attack in the denominator.
    pub false_positive_rate: f64,
    pub f1_score: f64,
}

/// Figures extracted from an external simulator's tagged log lines. The simulated record maps
/// onto the same fields so both sources can be compared or substituted.
#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq)]
pub struct LogMetrics {
    pub avg_pdr_percent: f64,
    pub avg_latency: f64,
    pub avg_throughput: f64,
    pub avg_stored_energy: f64,
    /// Attacks the detector flagged.
    pub attack_count: u64,
    pub false_positive_count: u64,
}

impl From<&MetricsRecord> for LogMetrics {
    fn from(record: &MetricsRecord) -> Self {
        Self {
            avg_pdr_percent: record.avg_pdr * 100.0,
            avg_latency: record.avg_latency,
            avg_throughput: record.avg_throughput,
            avg_stored_energy: record.avg_residual_energy,
            attack_count: record.detected_attacks,
            false_positive_count: record.false_positives,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_maps_onto_log_schema() {
        let record = MetricsRecord::builder()
            .avg_lifetime(3600.0)
            .network_lifetime(3600.0)
            .avg_energy_per_packet(0.02)
            .avg_pdr(0.5)
            .avg_latency(82.0)
            .avg_throughput(5.04)
            .avg_residual_energy(1993.5)
            .total_attacks(7)
            .detected_attacks(6)
            .false_positives(1)
            .detection_rate(6.0 / 7.0)
            .false_positive_rate(1.0 / 7.0)
            .f1_score(0.857)
            .build();
        let log_metrics = LogMetrics::from(&record);
        assert_eq!(log_metrics.avg_pdr_percent, 50.0);
        assert_eq!(log_metrics.avg_stored_energy, 1993.5);
        assert_eq!(log_metrics.attack_count, 6);
        assert_eq!(log_metrics.false_positive_count, 1);
    }
}
