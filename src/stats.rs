/// Streaming accumulator of count, mean, min and max.
pub struct Accumulator {
    n_vals: usize,
    mean: f64,
    min: f64,
    max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccumulatorReport {
    pub n_vals: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self {
            n_vals: 0,
            mean: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn add(&mut self, val: f64) {
        self.n_vals += 1;

        let diff = val - self.mean;
        self.mean += diff / self.n_vals as f64;

        self.min = self.min.min(val);
        self.max = self.max.max(val);
    }

    /// Report the accumulated values.
    ///
    /// All statistics are NaN when nothing was added.
    pub fn report(&self) -> AccumulatorReport {
        if self.n_vals == 0 {
            return AccumulatorReport {
                n_vals: 0,
                mean: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
            };
        }
        AccumulatorReport {
            n_vals: self.n_vals,
            // Rounding in the running mean must not leave the observed range.
            mean: self.mean.max(self.min).min(self.max),
            min: self.min,
            max: self.max,
        }
    }
}
