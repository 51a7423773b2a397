use aer_core::config::SimulationConfig;
use aer_core::error::{SimError, SimResult};
use aer_core::metrics::MetricsRecord;
use aer_core::trace::{EnergyTrace, QosTrace, SecurityLog};

/// Reduces frozen traces to a [`MetricsRecord`]. Holds only constants taken from the config, so
/// aggregating the same traces twice gives the same record.
///
/// Degenerate inputs:
/// * no nodes, or a node with no samples, is an [`SimError::EmptyData`] error;
/// * no attacks gives a detection rate and F1-score of 0.
#[derive(Copy, Clone, Debug)]
pub struct Aggregator {
    lifetime_percentile: f64,
    expected_packets: f64,
}

impl Aggregator {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            lifetime_percentile: config.aggregate.lifetime_percentile,
            expected_packets: config.expected_packets(),
        }
    }

    pub fn aggregate(
        &self,
        energy: &[EnergyTrace],
        qos: &[QosTrace],
        security: &SecurityLog,
    ) -> SimResult<MetricsRecord> {
        Self::check_alignment(energy, qos)?;

        let lifetimes: Vec<f64> = energy.iter().map(|t| t.lifetime().as_f64()).collect();
        let avg_lifetime = mean(&lifetimes, "average lifetime")?;
        let network_lifetime =
            percentile(&lifetimes, self.lifetime_percentile, "network lifetime")?;

        let consumed: f64 = energy
            .iter()
            .map(|t| t.initial_capacity() - t.min_energy())
            .sum();
        let avg_energy_per_packet = consumed / (energy.len() as f64 * self.expected_packets);
        let final_energy: Vec<f64> = energy.iter().map(|t| t.final_energy()).collect();

        let avg_pdr = mean_of_means(qos, QosTrace::pdr, "packet delivery ratio")?;
        let avg_latency = mean_of_means(qos, QosTrace::latency, "latency")?;
        let avg_throughput = mean_of_means(qos, QosTrace::throughput, "throughput")?;

        let total_attacks = security.total_attacks();
        let detected_attacks = security.detected_count();
        let false_positives = security.false_positive_count();

        Ok(MetricsRecord::builder()
            .avg_lifetime(avg_lifetime)
            .network_lifetime(network_lifetime)
            .avg_energy_per_packet(avg_energy_per_packet)
            .avg_pdr(avg_pdr)
            .avg_latency(avg_latency)
            .avg_throughput(avg_throughput)
            .avg_residual_energy(mean(&final_energy, "residual energy")?)
            .total_attacks(total_attacks)
            .detected_attacks(detected_attacks)
            .false_positives(false_positives)
            .detection_rate(detection_rate(detected_attacks, total_attacks))
            .false_positive_rate(false_positive_rate(false_positives, total_attacks))
            .f1_score(f1_score(detected_attacks, false_positives, total_attacks))
            .build())
    }

    fn check_alignment(energy: &[EnergyTrace], qos: &[QosTrace]) -> SimResult<()> {
        if energy.len() != qos.len() {
            return Err(SimError::Inconsistent(format!(
                "{} energy traces but {} QoS traces",
                energy.len(),
                qos.len()
            )));
        }
        for (energy_trace, qos_trace) in energy.iter().zip(qos) {
            if energy_trace.node_id() != qos_trace.node_id() {
                return Err(SimError::Inconsistent(format!(
                    "energy trace of node {} paired with QoS trace of node {}",
                    energy_trace.node_id(),
                    qos_trace.node_id()
                )));
            }
            if energy_trace.len() != qos_trace.len() {
                return Err(SimError::Inconsistent(format!(
                    "node {} has {} energy samples but {} QoS samples",
                    energy_trace.node_id(),
                    energy_trace.len(),
                    qos_trace.len()
                )));
            }
        }
        Ok(())
    }
}

pub fn mean(values: &[f64], what: &'static str) -> SimResult<f64> {
    if values.is_empty() {
        return Err(SimError::EmptyData(what));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Percentile with linear interpolation between the two closest ranks.
pub fn percentile(values: &[f64], pct: f64, what: &'static str) -> SimResult<f64> {
    if values.is_empty() {
        return Err(SimError::EmptyData(what));
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    Ok(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

fn mean_of_means(
    traces: &[QosTrace],
    series: fn(&QosTrace) -> &[f64],
    what: &'static str,
) -> SimResult<f64> {
    let node_means = traces
        .iter()
        .map(|trace| mean(series(trace), what))
        .collect::<SimResult<Vec<f64>>>()?;
    mean(&node_means, what)
}

/// Share of attacks that were detected, 0 when there were none.
pub fn detection_rate(detected: u64, total_attacks: u64) -> f64 {
    detected as f64 / total_attacks.max(1) as f64
}

pub fn false_positive_rate(false_positives: u64, total_attacks: u64) -> f64 {
    false_positives as f64 / total_attacks.max(1) as f64
}

/// F1 of the detector. Defined as 0 when no attack happened or when precision and recall are
/// both zero.
pub fn f1_score(detected: u64, false_positives: u64, total_attacks: u64) -> f64 {
    if total_attacks == 0 {
        return 0.0;
    }
    let precision = detected as f64 / (detected + false_positives).max(1) as f64;
    let recall = detected as f64 / total_attacks as f64;
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}
