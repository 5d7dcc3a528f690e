//! Chart rendering for the dashboard's display region.
//!
//! Each aggregate view is packaged as a `ChartView` and drawn with
//! `egui_plot`. The chart region holds at most one view at a time; showing
//! a new one fully replaces the previous content (immediate mode redraws
//! the region every frame from the current state).

use egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Line, MarkerShape, Plot, PlotPoints, Points};

use crate::RatingHistogram;

/// Messages shown in place of a chart when an aggregate is empty.
pub const MSG_NO_GENRE_DATA: &str = "No genre data available.";
pub const MSG_NO_YEAR_DATA: &str = "No release year data available.";
pub const MSG_NO_DIRECTOR_DATA: &str = "No director data available.";
pub const MSG_NO_RATING_DATA: &str = "No ratings data available.";

/// Message shown in the table region when the genre filter matches nothing.
pub const MSG_NO_MOVIES_FOUND: &str = "No Movies Found in Selected Genre!";

const BAR_COLOR: Color32 = Color32::from_rgb(63, 142, 140);
const TREND_COLOR: Color32 = Color32::from_rgb(100, 149, 237);
const HISTOGRAM_COLOR: Color32 = Color32::from_rgb(235, 165, 60);
const DENSITY_COLOR: Color32 = Color32::from_rgb(190, 60, 50);

/// A fully computed chart, ready to draw.
#[derive(Debug, Clone)]
pub enum ChartView {
    /// Labeled count bars (top genres, top directors), already ordered.
    TopCounts {
        id: &'static str,
        title: String,
        labels: Vec<String>,
        counts: Vec<u32>,
    },
    /// Movies per year, ascending, with a marker at each point.
    YearTrend { title: String, points: Vec<[f64; 2]> },
    /// Ratings histogram with the density curve overlay.
    Ratings {
        title: String,
        histogram: RatingHistogram,
    },
}

impl ChartView {
    /// Packages a top-N (label, count) view as a bar chart.
    pub fn top_counts(id: &'static str, title: &str, entries: Vec<(String, u32)>) -> Self {
        let (labels, counts) = entries.into_iter().unzip();
        ChartView::TopCounts {
            id,
            title: title.to_string(),
            labels,
            counts,
        }
    }

    /// Packages the year trend as line-chart points.
    pub fn year_trend(title: &str, trend: Vec<(i32, u32)>) -> Self {
        ChartView::YearTrend {
            title: title.to_string(),
            points: trend
                .into_iter()
                .map(|(year, count)| [year as f64, count as f64])
                .collect(),
        }
    }

    pub fn ratings(title: &str, histogram: RatingHistogram) -> Self {
        ChartView::Ratings {
            title: title.to_string(),
            histogram,
        }
    }

    /// Draws the chart, filling the available space of the chart region.
    pub fn show(&self, ui: &mut Ui) {
        match self {
            ChartView::TopCounts {
                id,
                title,
                labels,
                counts,
            } => show_top_counts(ui, id, title, labels, counts),
            ChartView::YearTrend { title, points } => show_year_trend(ui, title, points),
            ChartView::Ratings { title, histogram } => show_ratings(ui, title, histogram),
        }
    }
}

/// Displays a styled text message in place of a chart or table.
pub fn show_message(ui: &mut Ui, message: &str) {
    ui.centered_and_justified(|ui| {
        ui.label(RichText::new(message).color(Color32::RED).size(18.0));
    });
}

fn chart_title(ui: &mut Ui, title: &str) {
    ui.vertical_centered(|ui| {
        ui.strong(title);
    });
}

fn show_top_counts(ui: &mut Ui, id: &str, title: &str, labels: &[String], counts: &[u32]) {
    chart_title(ui, title);

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(index, &count)| {
            Bar::new(index as f64, count as f64)
                .width(0.6)
                .name(&labels[index])
        })
        .collect();

    let chart = BarChart::new(title.to_string(), bars).color(BAR_COLOR);

    // The axis formatter closure outlives this call, so it owns its labels.
    let axis_labels = labels.to_vec();

    Plot::new(id.to_string())
        .x_axis_formatter(move |mark, _range| {
            let index = mark.value.round();
            // Only label integer positions that correspond to a bar.
            if (mark.value - index).abs() > 0.01 || index < 0.0 {
                return String::new();
            }
            axis_labels.get(index as usize).cloned().unwrap_or_default()
        })
        .y_axis_label("Number of Movies")
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

fn show_year_trend(ui: &mut Ui, title: &str, points: &[[f64; 2]]) {
    chart_title(ui, title);

    let line = Line::new("Movies", PlotPoints::from(points.to_vec()))
        .color(TREND_COLOR)
        .width(2.0);
    let markers = Points::new("Movies", PlotPoints::from(points.to_vec()))
        .shape(MarkerShape::Circle)
        .radius(3.0)
        .color(TREND_COLOR);

    Plot::new("release_year_trend")
        .x_axis_label("Year")
        .y_axis_label("Number of Movies")
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.line(line);
            plot_ui.points(markers);
        });
}

fn show_ratings(ui: &mut Ui, title: &str, histogram: &RatingHistogram) {
    chart_title(ui, title);

    let bar_width = histogram.bin_width();
    let bars: Vec<Bar> = histogram
        .bins
        .iter()
        .map(|bin| {
            Bar::new((bin.lower + bin.upper) / 2.0, bin.count as f64).width(bar_width * 0.95)
        })
        .collect();

    let chart = BarChart::new("Ratings", bars).color(HISTOGRAM_COLOR);
    let density = Line::new("Density", PlotPoints::from(histogram.density.clone()))
        .color(DENSITY_COLOR)
        .width(2.0);

    Plot::new("ratings_distribution")
        .x_axis_label("IMDb Rating")
        .y_axis_label("Frequency")
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
            plot_ui.line(density);
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_trend_maps_pairs_to_plot_points() {
        let view = ChartView::year_trend("Movies Released Over Time", vec![(1994, 2), (2001, 1)]);

        let ChartView::YearTrend { points, .. } = view else {
            panic!("expected a YearTrend view");
        };
        assert_eq!(points, vec![[1994.0, 2.0], [2001.0, 1.0]]);
    }

    #[test]
    fn top_counts_keeps_label_and_count_alignment() {
        let view = ChartView::top_counts(
            "genres",
            "Top 10 Movie Genres",
            vec![("Drama".to_string(), 7), ("Crime".to_string(), 3)],
        );

        let ChartView::TopCounts { labels, counts, .. } = view else {
            panic!("expected a TopCounts view");
        };
        assert_eq!(labels, vec!["Drama", "Crime"]);
        assert_eq!(counts, vec![7, 3]);
    }
}
