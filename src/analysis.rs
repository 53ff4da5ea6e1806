use crate::engine::Generator;
use crate::error::{DriveError, Result};
use crate::model::{SummaryStatistics, TelemetrySeries};
use crate::render::RenderSink;
use std::path::Path;

/// Drive data analyzer.
///
/// Owns at most one series and at most one summary of it. Generating new
/// data discards both; the summary is only recomputed by [`Analyzer::analyze_data`].
pub struct Analyzer {
    generator: Generator,
    data: Option<TelemetrySeries>,
    results: Option<SummaryStatistics>,
}

impl Analyzer {
    pub fn new(generator: Generator) -> Self {
        Self {
            generator,
            data: None,
            results: None,
        }
    }

    /// Replace the current series with freshly generated sample data.
    ///
    /// On error the current series and summary are kept.
    pub fn generate_sample_data(&mut self, duration: f64, points: usize) -> Result<&TelemetrySeries> {
        let series = self.generator.generate(duration, points)?;
        self.results = None;
        Ok(self.data.insert(series))
    }

    /// Compute and store the summary of the current series.
    ///
    /// # Errors
    /// Returns [`DriveError::NoData`] if no series has been generated.
    pub fn analyze_data(&mut self) -> Result<&SummaryStatistics> {
        let series = self.data.as_ref().ok_or(DriveError::NoData)?;
        let results = SummaryStatistics::from_series(series)?;
        Ok(self.results.insert(results))
    }

    pub fn data(&self) -> Option<&TelemetrySeries> {
        self.data.as_ref()
    }

    pub fn results(&self) -> Option<&SummaryStatistics> {
        self.results.as_ref()
    }

    pub fn plot_velocity<S: RenderSink>(&self, sink: &mut S, path: Option<&Path>) -> Result<()> {
        let series = self.data.as_ref().ok_or(DriveError::NoData)?;
        sink.render_velocity(series, path)
    }

    pub fn plot_comprehensive<S: RenderSink>(
        &self,
        sink: &mut S,
        path: Option<&Path>,
    ) -> Result<()> {
        let series = self.data.as_ref().ok_or(DriveError::NoData)?;
        sink.render_overview(series, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<(&'static str, usize, Option<PathBuf>)>,
    }

    impl RenderSink for RecordingSink {
        fn render_velocity(
            &mut self,
            series: &TelemetrySeries,
            output_path: Option<&Path>,
        ) -> Result<()> {
            self.calls
                .push(("velocity", series.len(), output_path.map(Path::to_path_buf)));
            Ok(())
        }

        fn render_overview(
            &mut self,
            series: &TelemetrySeries,
            output_path: Option<&Path>,
        ) -> Result<()> {
            self.calls
                .push(("overview", series.len(), output_path.map(Path::to_path_buf)));
            Ok(())
        }
    }

    fn analyzer() -> Analyzer {
        Analyzer::new(Generator::from_seed(11))
    }

    #[test]
    fn analyze_without_data_fails() {
        let mut analyzer = analyzer();
        assert!(analyzer.data().is_none());
        assert!(matches!(analyzer.analyze_data(), Err(DriveError::NoData)));
        assert!(analyzer.results().is_none());
    }

    #[test]
    fn analyze_default_demo() {
        let mut analyzer = analyzer();
        analyzer.generate_sample_data(10.0, 100).unwrap();
        let last_distance = *analyzer.data().unwrap().distance().last().unwrap();

        let results = analyzer.analyze_data().unwrap().clone();
        assert_eq!(results.data_points, 100);
        assert_eq!(results.total_distance, last_distance);
        assert!(results.min_velocity <= results.mean_velocity);
        assert!(results.mean_velocity <= results.max_velocity);
        assert_eq!(analyzer.results(), Some(&results));
    }

    #[test]
    fn analyze_does_not_mutate_series() {
        let mut analyzer = analyzer();
        let before = analyzer.generate_sample_data(4.0, 64).unwrap().clone();
        analyzer.analyze_data().unwrap();
        assert_eq!(analyzer.data(), Some(&before));
    }

    #[test]
    fn regeneration_discards_previous_state() {
        let mut analyzer = analyzer();
        analyzer.generate_sample_data(10.0, 100).unwrap();
        analyzer.analyze_data().unwrap();

        let series = analyzer.generate_sample_data(2.0, 37).unwrap().clone();
        assert!(analyzer.results().is_none());

        let results = analyzer.analyze_data().unwrap();
        let expected = SummaryStatistics::from_series(&series).unwrap();
        assert_eq!(results, &expected);
        assert_eq!(results.data_points, 37);
        assert_eq!(results.total_distance, *series.distance().last().unwrap());
    }

    #[test]
    fn failed_generation_keeps_previous_state() {
        let mut analyzer = analyzer();
        let series = analyzer.generate_sample_data(10.0, 100).unwrap().clone();
        let results = analyzer.analyze_data().unwrap().clone();

        assert!(matches!(
            analyzer.generate_sample_data(-1.0, 100),
            Err(DriveError::InvalidArgument { .. })
        ));
        assert!(matches!(
            analyzer.generate_sample_data(10.0, 0),
            Err(DriveError::InvalidArgument { .. })
        ));
        assert_eq!(analyzer.data(), Some(&series));
        assert_eq!(analyzer.results(), Some(&results));
    }

    #[test]
    fn plots_forward_series_to_sink() {
        let mut analyzer = analyzer();
        let mut sink = RecordingSink::default();
        analyzer.generate_sample_data(10.0, 50).unwrap();

        let path = PathBuf::from("velocity.png");
        analyzer.plot_velocity(&mut sink, Some(&path)).unwrap();
        analyzer.plot_comprehensive(&mut sink, None).unwrap();

        assert_eq!(
            sink.calls,
            vec![("velocity", 50, Some(path)), ("overview", 50, None)]
        );
    }

    #[test]
    fn plots_without_data_fail() {
        let analyzer = analyzer();
        let mut sink = RecordingSink::default();
        assert!(matches!(
            analyzer.plot_velocity(&mut sink, None),
            Err(DriveError::NoData)
        ));
        assert!(matches!(
            analyzer.plot_comprehensive(&mut sink, None),
            Err(DriveError::NoData)
        ));
        assert!(sink.calls.is_empty());
    }
}
