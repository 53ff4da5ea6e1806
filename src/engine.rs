use crate::error::{DriveError, Result};
use crate::model::TelemetrySeries;
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use rand_distr::Normal;

/// Standard deviation of the velocity noise.
pub const VELOCITY_NOISE: f64 = 0.1;
/// Standard deviation of the acceleration noise.
pub const ACCELERATION_NOISE: f64 = 0.05;

/// Sample drive data generator.
///
/// Owns the random number generator used for the measurement noise,
/// so equal seeds reproduce equal series.
pub struct Generator {
    rng: ChaCha12Rng,
}

impl Generator {
    /// Create a `Generator` seeded from the operating system.
    pub fn from_os_rng() -> Result<Self> {
        let rng = ChaCha12Rng::try_from_os_rng().map_err(|error| DriveError::Rng(error.into()))?;
        Ok(Self { rng })
    }

    /// Create a `Generator` with a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    /// Generate a series of `points` records spanning `duration` seconds.
    ///
    /// Velocity follows `sin(t)` and acceleration follows `cos(t)`, each with
    /// independent Gaussian noise. Distance integrates velocity with a
    /// left-rectangle rule of step `duration / points`.
    ///
    /// # Errors
    /// Returns [`DriveError::InvalidArgument`] if `duration` is not a
    /// positive finite number or `points` is zero.
    pub fn generate(&mut self, duration: f64, points: usize) -> Result<TelemetrySeries> {
        check_duration(duration)?;
        check_points(points)?;

        let time = linspace(duration, points);

        let vel_noise = self.sample_noise(VELOCITY_NOISE, points)?;
        let acc_noise = self.sample_noise(ACCELERATION_NOISE, points)?;

        let velocity: Vec<_> = time
            .iter()
            .zip(vel_noise)
            .map(|(t, noise)| t.sin() + noise)
            .collect();
        let acceleration: Vec<_> = time
            .iter()
            .zip(acc_noise)
            .map(|(t, noise)| t.cos() + noise)
            .collect();

        let step = duration / points as f64;
        let distance = velocity
            .iter()
            .scan(0.0, |sum, &vel| {
                *sum += vel;
                Some(*sum * step)
            })
            .collect();

        log::debug!("generated {points} records over {duration} s");

        TelemetrySeries::from_columns(time, velocity, acceleration, distance)
    }

    fn sample_noise(&mut self, std_dev: f64, n_vals: usize) -> Result<Vec<f64>> {
        let dist = Normal::new(0.0, std_dev).map_err(|error| DriveError::InvalidArgument {
            name: "std_dev",
            reason: error.to_string(),
        })?;
        Ok((0..n_vals).map(|_| dist.sample(&mut self.rng)).collect())
    }
}

fn check_duration(duration: f64) -> Result<()> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(DriveError::InvalidArgument {
            name: "duration",
            reason: format!("must be a positive finite number, but is {duration}"),
        });
    }
    Ok(())
}

fn check_points(points: usize) -> Result<()> {
    if points == 0 {
        return Err(DriveError::InvalidArgument {
            name: "points",
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

/// Evenly spaced values over `[0, stop]`, both endpoints included.
fn linspace(stop: f64, n_vals: usize) -> Vec<f64> {
    if n_vals == 1 {
        return vec![0.0];
    }
    let delta = stop / (n_vals - 1) as f64;
    (0..n_vals)
        .map(|idx| if idx == n_vals - 1 { stop } else { idx as f64 * delta })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_demo_shape() {
        let series = Generator::from_seed(0).generate(10.0, 100).unwrap();
        assert_eq!(series.len(), 100);
        assert_eq!(series.time()[0], 0.0);
        assert_eq!(series.time()[99], 10.0);
        assert_eq!(series.velocity().len(), 100);
        assert_eq!(series.acceleration().len(), 100);
        assert_eq!(series.distance().len(), 100);
    }

    #[test]
    fn time_is_strictly_increasing() {
        let mut generator = Generator::from_seed(1);
        for (duration, points) in [(10.0, 100), (0.001, 7), (3.5, 2), (1e4, 12_345)] {
            let series = generator.generate(duration, points).unwrap();
            let time = series.time();
            assert_eq!(time.len(), points);
            assert_eq!(time[0], 0.0);
            assert_eq!(time[points - 1], duration);
            assert!(time.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn single_point_series() {
        let series = Generator::from_seed(2).generate(5.0, 1).unwrap();
        assert_eq!(series.time(), &[0.0]);
        assert_eq!(series.distance()[0], series.velocity()[0] * 5.0);
    }

    #[test]
    fn distance_is_scaled_running_sum() {
        let (duration, points) = (10.0, 100);
        let series = Generator::from_seed(3).generate(duration, points).unwrap();
        let step = duration / points as f64;

        let mut sum = 0.0;
        for (vel, dist) in series.velocity().iter().zip(series.distance()) {
            sum += vel;
            assert!((dist - step * sum).abs() < 1e-12);
        }
    }

    #[test]
    fn noise_stays_near_the_waves() {
        let series = Generator::from_seed(4).generate(10.0, 1000).unwrap();
        for rec in series.records() {
            // Ten standard deviations.
            assert!((rec.velocity - rec.time.sin()).abs() < 10.0 * VELOCITY_NOISE);
            assert!((rec.acceleration - rec.time.cos()).abs() < 10.0 * ACCELERATION_NOISE);
        }
    }

    #[test]
    fn velocity_and_acceleration_noise_differ() {
        let series = Generator::from_seed(5).generate(10.0, 100).unwrap();
        let n_equal = series
            .records()
            .filter(|rec| {
                let vel_noise = (rec.velocity - rec.time.sin()) / VELOCITY_NOISE;
                let acc_noise = (rec.acceleration - rec.time.cos()) / ACCELERATION_NOISE;
                (vel_noise - acc_noise).abs() < 1e-9
            })
            .count();
        assert_eq!(n_equal, 0);
    }

    #[test]
    fn equal_seeds_reproduce_series() {
        let series_a = Generator::from_seed(42).generate(10.0, 100).unwrap();
        let series_b = Generator::from_seed(42).generate(10.0, 100).unwrap();
        let series_c = Generator::from_seed(43).generate(10.0, 100).unwrap();
        assert_eq!(series_a, series_b);
        assert_ne!(series_a, series_c);
    }

    #[test]
    fn consecutive_draws_differ() {
        let mut generator = Generator::from_seed(6);
        let series_a = generator.generate(10.0, 100).unwrap();
        let series_b = generator.generate(10.0, 100).unwrap();
        assert_eq!(series_a.time(), series_b.time());
        assert_ne!(series_a.velocity(), series_b.velocity());
    }

    #[test]
    fn invalid_arguments_are_rejected() {
        let mut generator = Generator::from_seed(7);
        for duration in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                generator.generate(duration, 10),
                Err(DriveError::InvalidArgument {
                    name: "duration",
                    ..
                })
            ));
        }
        assert!(matches!(
            generator.generate(10.0, 0),
            Err(DriveError::InvalidArgument { name: "points", .. })
        ));
    }

    #[test]
    fn os_seeded_generator_works() {
        let series = Generator::from_os_rng().unwrap().generate(1.0, 10).unwrap();
        assert_eq!(series.len(), 10);
    }
}
