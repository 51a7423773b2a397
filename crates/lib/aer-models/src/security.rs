use log::trace;

use aer_core::config::SecuritySettings;
use aer_core::error::SimResult;
use aer_core::time::TimeS;
use aer_core::trace::SecurityLog;

use crate::stream::RngStream;

/// Draws attacks, their detection outcome and spurious alarms on the time grid.
///
/// At each instant the first variate decides whether an attack happens. An attack draws a
/// second variate for detection; a missed attack only lowers recall. A quiet instant draws
/// instead against the false-positive probability, so alarms never share an instant with an
/// attack.
#[derive(Copy, Clone, Debug)]
pub struct SecurityProcess {
    settings: SecuritySettings,
}

impl SecurityProcess {
    pub fn new(settings: SecuritySettings) -> Self {
        Self { settings }
    }

    pub fn run<I>(&self, grid: I, stream: &mut RngStream) -> SimResult<SecurityLog>
    where
        I: IntoIterator<Item = TimeS>,
    {
        let mut log = SecurityLog::default();
        for time in grid {
            if stream.unit() < self.settings.attack_probability {
                let detected = stream.unit() < self.settings.detection_rate;
                trace!("Attack at {} detected: {}", time, detected);
                log.record_attack(time, detected)?;
            } else if stream.unit() < self.settings.false_positive_probability {
                trace!("False alarm at {}", time);
                log.record_false_positive(time)?;
            }
        }
        Ok(log)
    }
}
