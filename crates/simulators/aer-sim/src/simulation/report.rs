use log::info;

use aer_core::metrics::{LogMetrics, MetricsRecord};
use aer_core::time::SECONDS_PER_MINUTE;

pub(crate) fn summary_lines(metrics: &MetricsRecord) -> Vec<String> {
    vec![
        format!(
            "Average node lifetime: {:.1} min",
            metrics.avg_lifetime / SECONDS_PER_MINUTE
        ),
        format!(
            "Network lifetime: {:.1} min",
            metrics.network_lifetime / SECONDS_PER_MINUTE
        ),
        format!(
            "Energy per packet: {:.3} mAh/packet",
            metrics.avg_energy_per_packet
        ),
        format!("Average PDR: {:.1}%", metrics.avg_pdr * 100.0),
        format!("Average latency: {:.1} ms", metrics.avg_latency),
        format!("Average throughput: {:.1} pkt/min", metrics.avg_throughput),
        format!(
            "Attacks detected: {} of {} ({:.1}%)",
            metrics.detected_attacks,
            metrics.total_attacks,
            metrics.detection_rate * 100.0
        ),
        format!(
            "False positives: {} ({:.1}% of attacks)",
            metrics.false_positives,
            metrics.false_positive_rate * 100.0
        ),
        format!("F1-score: {:.1}%", metrics.f1_score * 100.0),
    ]
}

pub(crate) fn comparison_lines(simulated: &LogMetrics, external: &LogMetrics) -> Vec<String> {
    let row = |name: &str, ours: f64, theirs: f64| {
        format!("{:<22}{:>12.2}{:>12.2}", name, ours, theirs)
    };
    vec![
        format!("{:<22}{:>12}{:>12}", "", "simulated", "log"),
        row("PDR (%)", simulated.avg_pdr_percent, external.avg_pdr_percent),
        row("Latency", simulated.avg_latency, external.avg_latency),
        row("Throughput", simulated.avg_throughput, external.avg_throughput),
        row(
            "Stored energy",
            simulated.avg_stored_energy,
            external.avg_stored_energy,
        ),
        row(
            "Attacks detected",
            simulated.attack_count as f64,
            external.attack_count as f64,
        ),
        row(
            "False positives",
            simulated.false_positive_count as f64,
            external.false_positive_count as f64,
        ),
    ]
}

pub(crate) fn print_lines(lines: &[String]) {
    for line in lines {
        info!("{}", line);
        println!("{}", line);
    }
}
