use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use aer_core::metrics::LogMetrics;

pub const PERF_TAG: &str = "[PERF]";
pub const HARVEST_TAG: &str = "[HARVEST]";
pub const ATTACK_TAG: &str = "[ATTACK]";
pub const FALSE_POSITIVE_TAG: &str = "[FP]";

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read simulator log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Values collected from the tagged lines of an external simulator log, in log order.
///
/// Recognised lines:
/// * `[PERF] ... PDR=<x>% ... Latency=<x> ... Throughput=<x>`
/// * `[HARVEST] ... stored=<x>J`
/// * `[ATTACK] ...` and `[FP] ...`, counted once per line
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TaggedSeries {
    pub pdr: Vec<f64>,
    pub latency: Vec<f64>,
    pub throughput: Vec<f64>,
    pub stored_energy: Vec<f64>,
    pub attack_count: u64,
    pub false_positive_count: u64,
}

impl TaggedSeries {
    pub fn add_line(&mut self, line: &str) {
        if let Some(pdr) = tagged_value(line, PERF_TAG, "PDR=", Some('%')) {
            self.pdr.push(pdr);
        }
        if let Some(latency) = tagged_value(line, PERF_TAG, "Latency=", None) {
            self.latency.push(latency);
        }
        if let Some(throughput) = tagged_value(line, PERF_TAG, "Throughput=", None) {
            self.throughput.push(throughput);
        }
        if let Some(stored) = tagged_value(line, HARVEST_TAG, "stored=", Some('J')) {
            self.stored_energy.push(stored);
        }
        if line.contains(ATTACK_TAG) {
            self.attack_count += 1;
        }
        if line.contains(FALSE_POSITIVE_TAG) {
            self.false_positive_count += 1;
        }
    }

    /// Averages of every series; a series without samples averages to 0.
    pub fn summary(&self) -> LogMetrics {
        LogMetrics {
            avg_pdr_percent: mean_or_zero(&self.pdr),
            avg_latency: mean_or_zero(&self.latency),
            avg_throughput: mean_or_zero(&self.throughput),
            avg_stored_energy: mean_or_zero(&self.stored_energy),
            attack_count: self.attack_count,
            false_positive_count: self.false_positive_count,
        }
    }
}

pub fn parse_tagged<R: BufRead>(reader: R) -> io::Result<TaggedSeries> {
    let mut series = TaggedSeries::default();
    for line in reader.lines() {
        series.add_line(&line?);
    }
    debug!(
        "Parsed {} PDR, {} latency, {} throughput and {} harvest samples",
        series.pdr.len(),
        series.latency.len(),
        series.throughput.len(),
        series.stored_energy.len()
    );
    Ok(series)
}

pub fn read_tagged_log(log_file: &Path) -> Result<TaggedSeries, InputError> {
    let to_error = |source| InputError::Io {
        path: log_file.to_path_buf(),
        source,
    };
    let file = File::open(log_file).map_err(to_error)?;
    let series = parse_tagged(BufReader::new(file)).map_err(to_error)?;
    info!(
        "Read {} attacks and {} false positives from {}",
        series.attack_count,
        series.false_positive_count,
        log_file.display()
    );
    Ok(series)
}

/// The number following the last `key` after `tag` on the line. When `suffix` is given the
/// number must be followed by it.
fn tagged_value(line: &str, tag: &str, key: &str, suffix: Option<char>) -> Option<f64> {
    let tagged = &line[line.find(tag)? + tag.len()..];
    tagged
        .rmatch_indices(key)
        .find_map(|(idx, _)| number_at(&tagged[idx + key.len()..], suffix))
}

fn number_at(text: &str, suffix: Option<char>) -> Option<f64> {
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(text.len());
    if let Some(suffix) = suffix {
        if !text[end..].starts_with(suffix) {
            return None;
        }
    }
    text[..end].parse().ok()
}

fn mean_or_zero(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_needs_its_tag() {
        assert_eq!(
            tagged_value("[PERF] node=3 PDR=87.5%", PERF_TAG, "PDR=", Some('%')),
            Some(87.5)
        );
        assert_eq!(
            tagged_value("PDR=87.5% [PERF]", PERF_TAG, "PDR=", Some('%')),
            None
        );
    }

    #[test]
    fn value_needs_its_suffix() {
        assert_eq!(
            tagged_value("[HARVEST] stored=1.25J", HARVEST_TAG, "stored=", Some('J')),
            Some(1.25)
        );
        assert_eq!(
            tagged_value("[HARVEST] stored=1.25mJ", HARVEST_TAG, "stored=", Some('J')),
            None
        );
        assert_eq!(
            tagged_value("[HARVEST] stored=J", HARVEST_TAG, "stored=", Some('J')),
            None
        );
    }
}
