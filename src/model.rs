//! Telemetry data types.

use crate::error::{DriveError, Result};
use crate::stats::Accumulator;
use std::fmt;

pub const TIME_LABEL: &str = "Time (s)";
pub const VELOCITY_LABEL: &str = "Velocity (m/s)";
pub const ACCELERATION_LABEL: &str = "Acceleration (m/s²)";
pub const DISTANCE_LABEL: &str = "Distance (m)";

/// Record of the drive at a single time step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub time: f64,
    pub velocity: f64,
    pub acceleration: f64,
    pub distance: f64,
}

/// Time-indexed drive telemetry.
///
/// Stored column-wise; all four columns always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySeries {
    time: Vec<f64>,
    velocity: Vec<f64>,
    acceleration: Vec<f64>,
    distance: Vec<f64>,
}

impl TelemetrySeries {
    /// Assemble a series from its four columns.
    ///
    /// # Errors
    /// Returns [`DriveError::InvalidArgument`] if the column lengths differ.
    pub fn from_columns(
        time: Vec<f64>,
        velocity: Vec<f64>,
        acceleration: Vec<f64>,
        distance: Vec<f64>,
    ) -> Result<Self> {
        let len = time.len();
        if [velocity.len(), acceleration.len(), distance.len()]
            .iter()
            .any(|&col_len| col_len != len)
        {
            return Err(DriveError::InvalidArgument {
                name: "columns",
                reason: format!("all columns must have length {len}"),
            });
        }
        Ok(Self {
            time,
            velocity,
            acceleration,
            distance,
        })
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    pub fn acceleration(&self) -> &[f64] {
        &self.acceleration
    }

    pub fn distance(&self) -> &[f64] {
        &self.distance
    }

    /// Get the record at index `idx`, if any.
    pub fn record(&self, idx: usize) -> Option<Record> {
        Some(Record {
            time: *self.time.get(idx)?,
            velocity: self.velocity[idx],
            acceleration: self.acceleration[idx],
            distance: self.distance[idx],
        })
    }

    pub fn records(&self) -> impl Iterator<Item = Record> + '_ {
        (0..self.len()).filter_map(|idx| self.record(idx))
    }
}

/// Descriptive statistics of a [`TelemetrySeries`].
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStatistics {
    pub mean_velocity: f64,
    pub max_velocity: f64,
    pub min_velocity: f64,
    pub total_distance: f64,
    pub data_points: usize,
}

impl SummaryStatistics {
    /// Reduce a series to its summary statistics.
    ///
    /// # Errors
    /// Returns [`DriveError::NoData`] if the series has no records.
    pub fn from_series(series: &TelemetrySeries) -> Result<Self> {
        let total_distance = *series.distance().last().ok_or(DriveError::NoData)?;

        let mut acc = Accumulator::new();
        series.velocity().iter().for_each(|&val| acc.add(val));
        let report = acc.report();

        Ok(Self {
            mean_velocity: report.mean,
            max_velocity: report.max,
            min_velocity: report.min,
            total_distance,
            data_points: report.n_vals,
        })
    }
}

impl fmt::Display for SummaryStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mean Velocity: {:.2}", self.mean_velocity)?;
        writeln!(f, "Max Velocity: {:.2}", self.max_velocity)?;
        writeln!(f, "Min Velocity: {:.2}", self.min_velocity)?;
        writeln!(f, "Total Distance: {:.2}", self.total_distance)?;
        write!(f, "Data Points: {:.2}", self.data_points as f64)
    }
}
