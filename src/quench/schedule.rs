// src/quench/schedule.rs

use serde::{Deserialize, Serialize};

/// Temperature range (Kelvin) the anneal walks down.
///
/// Checkpoints are `start_temp - k * temp_step` for as long as they stay
/// strictly above `end_temp`. The schedule is empty (not an error) when
/// `start_temp <= end_temp`, when `temp_step <= 0`, or when any value is not
/// finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureSchedule {
    pub start_temp: f64,
    pub end_temp: f64,
    pub temp_step: f64,
}

impl Default for TemperatureSchedule {
    fn default() -> Self {
        Self {
            start_temp: 3000.0,
            end_temp: 500.0,
            temp_step: 500.0,
        }
    }
}

/// One checkpoint expanded into its cool and hold stages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnealStep {
    /// Temperature the cool stage starts at (the checkpoint itself).
    pub cool_from: f64,
    /// Temperature the cool stage ends at.
    pub cool_to: f64,
    /// Constant temperature of the hold stage.
    pub hold_at: f64,
}

impl TemperatureSchedule {
    pub fn new(start_temp: f64, end_temp: f64, temp_step: f64) -> Self {
        Self {
            start_temp,
            end_temp,
            temp_step,
        }
    }

    /// Whether at least one checkpoint exists.
    pub fn is_annealing(&self) -> bool {
        self.start_temp.is_finite()
            && self.end_temp.is_finite()
            && self.temp_step.is_finite()
            && self.temp_step > 0.0
            && self.start_temp > self.end_temp
    }

    /// `ceil((start - end) / step)`, or 0 for an empty schedule.
    pub fn checkpoint_count(&self) -> usize {
        if !self.is_annealing() {
            return 0;
        }
        ((self.start_temp - self.end_temp) / self.temp_step).ceil() as usize
    }

    /// Decreasing checkpoints, starting at `start_temp`.
    ///
    /// Each value is computed from its index rather than by repeated
    /// subtraction, so rounding does not accumulate along the schedule.
    pub fn checkpoints(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.checkpoint_count()).map(move |k| self.start_temp - k as f64 * self.temp_step)
    }

    pub fn steps(&self) -> impl Iterator<Item = AnnealStep> + '_ {
        self.checkpoints().map(move |t| {
            let next = t - self.temp_step;
            AnnealStep {
                cool_from: t,
                cool_to: next,
                hold_at: next,
            }
        })
    }
}
