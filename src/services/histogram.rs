use plotters::prelude::*;
use thiserror::Error;

use crate::services::simulation_types::HistogramBin;

#[derive(Error, Debug)]
pub enum HistogramError {
    #[error("failed to render histogram: {0}")]
    Render(String),
}

/// Splits `[min, max]` of the samples into `bin_count` equal-width bins.
///
/// Identical samples collapse into a single bin with probability 1. Any
/// non-finite sample, NaN included, produces no bins.
pub fn compute_histogram(samples: &[f64], bin_count: usize) -> Vec<HistogramBin> {
    if samples.is_empty() || samples.iter().any(|sample| !sample.is_finite()) {
        return Vec::new();
    }

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let total = samples.len();
    if min == max {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: total,
            probability: 1.0,
        }];
    }

    let bin_count = bin_count.max(1);
    let last_index = bin_count - 1;
    let width = (max - min) / bin_count as f64;

    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|index| {
            let start = min + index as f64 * width;
            let end = if index == last_index { max } else { start + width };
            HistogramBin {
                start,
                end,
                count: 0,
                probability: 0.0,
            }
        })
        .collect();

    for sample in samples {
        let clamped = sample.clamp(min, max);
        let index = if width > 0.0 {
            ((clamped - min) / width).floor() as usize
        } else {
            0
        };
        bins[index.min(last_index)].count += 1;
    }

    for bin in &mut bins {
        bin.probability = bin.count as f64 / total as f64;
    }

    bins
}

pub fn write_histogram_png(output_path: &str, bins: &[HistogramBin]) -> Result<(), HistogramError> {
    render_histogram_png(output_path, bins)
}

fn render_histogram_png(output_path: &str, bins: &[HistogramBin]) -> Result<(), HistogramError> {
    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        return Ok(());
    };

    let mut min_value = first.start;
    let mut max_value = last.end;
    if max_value - min_value < f64::EPSILON {
        min_value -= 1.0;
        max_value += 1.0;
    }
    let max_count = bins.iter().map(|bin| bin.count).max().unwrap_or(1);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Closed Revenue Distribution", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(min_value..max_value, 0..(max_count + 1))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Closed revenue")
        .y_desc("Iterations")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_label_formatter(&|value| format!("{value:.0}"))
        .draw()
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let bar_color = RGBColor(30, 122, 204);
    let bar_style = ShapeStyle::from(&bar_color).filled();
    let single_bin_width = (max_value - min_value) / 10.0;
    chart
        .draw_series(bins.iter().map(|bin| {
            let end = if bin.end > bin.start {
                bin.end
            } else {
                bin.start + single_bin_width
            };
            Rectangle::new([(bin.start, 0), (end, bin.count)], bar_style)
        }))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| HistogramError::Render(e.to_string()))?;
    Ok(())
}
