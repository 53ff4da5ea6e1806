use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fmt::Debug,
    fs,
    ops::{Bound, RangeBounds},
    path::{Path, PathBuf},
};

/// Demo configuration parameters.
///
/// Loaded from a TOML file (see [`Config::from_file`]); every key is optional.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Time span of the generated data in seconds.
    pub duration: f64,
    /// Number of generated records.
    pub points: usize,
    /// Seed of the noise generator (OS entropy if absent).
    pub seed: Option<u64>,

    pub output: OutputConfig,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory of the rendered plots.
    pub dir: PathBuf,
    /// Render plots at all.
    pub plots: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration: 10.0,
            points: 100,
            seed: None,
            output: OutputConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            plots: true,
        }
    }
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or deserialized.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to deserialize config")
    }

    /// Check all parameters.
    ///
    /// Run after any overrides have been applied.
    pub fn validate(&self) -> Result<()> {
        check_num(self.duration, (Bound::Included(f64::EPSILON), Bound::Included(1e6)))
            .context("invalid duration")?;
        check_num(self.points, 1..=10_000_000).context("invalid number of points")?;
        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
