//! Plot rendering.

use crate::error::{DriveError, Result};
use crate::model::{
    ACCELERATION_LABEL, DISTANCE_LABEL, TIME_LABEL, TelemetrySeries, VELOCITY_LABEL,
};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const VELOCITY_FILE: &str = "velocity.png";
pub const OVERVIEW_FILE: &str = "overview.png";

/// Consumer of telemetry plots.
///
/// Implementations only read the series.
pub trait RenderSink {
    /// Draw velocity against time.
    fn render_velocity(&mut self, series: &TelemetrySeries, output_path: Option<&Path>)
    -> Result<()>;

    /// Draw velocity, acceleration and distance against a shared time axis.
    fn render_overview(&mut self, series: &TelemetrySeries, output_path: Option<&Path>)
    -> Result<()>;
}

/// Sink that draws nothing.
pub struct NullSink;

impl RenderSink for NullSink {
    fn render_velocity(&mut self, series: &TelemetrySeries, _: Option<&Path>) -> Result<()> {
        log::info!("skipped velocity plot of {} records", series.len());
        Ok(())
    }

    fn render_overview(&mut self, series: &TelemetrySeries, _: Option<&Path>) -> Result<()> {
        log::info!("skipped overview plot of {} records", series.len());
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub velocity_size: (u32, u32),
    pub overview_size: (u32, u32),
    pub margin: i32,
    pub label_area: i32,
    pub caption_size: u32,
    pub label_size: u32,
    pub line_width: u32,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            velocity_size: (3000, 1800),
            overview_size: (3600, 3000),
            margin: 40,
            label_area: 160,
            caption_size: 64,
            label_size: 40,
            line_width: 4,
        }
    }
}

/// Sink that writes PNG files.
///
/// Plots without an explicit path go to a default file name in `out_dir`.
pub struct BitmapSink {
    out_dir: PathBuf,
    style: PlotStyle,
}

impl BitmapSink {
    pub fn new<P: AsRef<Path>>(out_dir: P, style: PlotStyle) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
            style,
        }
    }

    fn resolve(&self, output_path: Option<&Path>, default_file: &str) -> Result<PathBuf> {
        let path = match output_path {
            Some(path) => path.to_path_buf(),
            None => self.out_dir.join(default_file),
        };
        if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|error| {
                DriveError::Render(format!("failed to create {parent:?}: {error}"))
            })?;
        }
        Ok(path)
    }
}

impl RenderSink for BitmapSink {
    fn render_velocity(
        &mut self,
        series: &TelemetrySeries,
        output_path: Option<&Path>,
    ) -> Result<()> {
        check_series(series)?;
        let path = self.resolve(output_path, VELOCITY_FILE)?;
        {
            let root = BitMapBackend::new(&path, self.style.velocity_size).into_drawing_area();
            root.fill(&WHITE)?;
            let panel = Panel {
                values: series.velocity(),
                color: BLUE,
                y_desc: VELOCITY_LABEL,
                caption: Some("Drive Velocity Analysis"),
                x_desc: true,
                legend: Some("Velocity"),
            };
            draw_panel(&root, series.time(), &panel, &self.style)?;
            root.present()?;
        }
        log::info!("saved {path:?}");
        Ok(())
    }

    fn render_overview(
        &mut self,
        series: &TelemetrySeries,
        output_path: Option<&Path>,
    ) -> Result<()> {
        check_series(series)?;
        let path = self.resolve(output_path, OVERVIEW_FILE)?;
        {
            let root = BitMapBackend::new(&path, self.style.overview_size).into_drawing_area();
            root.fill(&WHITE)?;
            let panels = [
                Panel {
                    values: series.velocity(),
                    color: BLUE,
                    y_desc: VELOCITY_LABEL,
                    caption: Some("Drive Performance Metrics"),
                    x_desc: false,
                    legend: None,
                },
                Panel {
                    values: series.acceleration(),
                    color: RED,
                    y_desc: ACCELERATION_LABEL,
                    caption: None,
                    x_desc: false,
                    legend: None,
                },
                Panel {
                    values: series.distance(),
                    color: GREEN,
                    y_desc: DISTANCE_LABEL,
                    caption: None,
                    x_desc: true,
                    legend: None,
                },
            ];
            let areas = root.split_evenly((panels.len(), 1));
            for (area, panel) in areas.iter().zip(&panels) {
                draw_panel(area, series.time(), panel, &self.style)?;
            }
            root.present()?;
        }
        log::info!("saved {path:?}");
        Ok(())
    }
}

struct Panel<'a> {
    values: &'a [f64],
    color: RGBColor,
    y_desc: &'a str,
    caption: Option<&'a str>,
    /// Label the time axis.
    x_desc: bool,
    legend: Option<&'a str>,
}

fn check_series(series: &TelemetrySeries) -> Result<()> {
    if series.is_empty() {
        return Err(DriveError::Render("telemetry series has no records".into()));
    }
    Ok(())
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    time: &[f64],
    panel: &Panel<'_>,
    style: &PlotStyle,
) -> Result<()> {
    let (t_min, t_max) = axis_bounds(time);
    let (y_min, y_max) = axis_bounds(panel.values);

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(style.margin)
        .set_label_area_size(LabelAreaPosition::Left, style.label_area)
        .set_label_area_size(LabelAreaPosition::Bottom, style.label_area);
    if let Some(caption) = panel.caption {
        builder.caption(caption, ("sans-serif", style.caption_size));
    }
    let mut chart = builder.build_cartesian_2d(t_min..t_max, y_min..y_max)?;

    {
        let mut mesh = chart.configure_mesh();
        mesh.light_line_style(&BLACK.mix(0.05))
            .bold_line_style(&BLACK.mix(0.3))
            .label_style(("sans-serif", style.label_size))
            .axis_desc_style(("sans-serif", style.label_size))
            .y_desc(panel.y_desc);
        if panel.x_desc {
            mesh.x_desc(TIME_LABEL);
        }
        mesh.draw()?;
    }

    let color = panel.color;
    let width = style.line_width;
    let points = time.iter().copied().zip(panel.values.iter().copied());
    let anno = chart.draw_series(LineSeries::new(points, color.stroke_width(width)))?;

    if let Some(legend) = panel.legend {
        anno.label(legend).legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 40, y)], color.stroke_width(width))
        });
        chart
            .configure_series_labels()
            .label_font(("sans-serif", style.label_size))
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    Ok(())
}

/// Range covering all finite values, widened when degenerate.
fn axis_bounds(vals: &[f64]) -> (f64, f64) {
    let (min, max) = vals
        .iter()
        .copied()
        .filter(|val| val.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), val| {
            (min.min(val), max.max(val))
        });
    if !min.is_finite() {
        return (-1.0, 1.0);
    }
    if max - min < f64::EPSILON {
        return (min - 1.0, max + 1.0);
    }
    (min, max)
}
