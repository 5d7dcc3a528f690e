//! Aggregate views over the movie dataset.
//!
//! Every chart handler recomputes its view from the full in-memory table on
//! each invocation. All functions here are pure: dataset in, summary out.
//! Empty summaries are represented as empty vectors / `None`, and the UI
//! layer decides which message to display instead of a chart.

use std::collections::{BTreeMap, HashMap};
use std::f64::consts::PI;

use crate::{MovieDataset, MovieRecord};

/// Maximum number of entries in the "top genres" and "top directors" views.
pub const TOP_N: usize = 10;

/// Fixed bin count for the ratings histogram.
pub const HISTOGRAM_BINS: usize = 10;

/// Number of sample points for the smoothed density curve.
const DENSITY_SAMPLES: usize = 200;

/// Counts occurrences per genre tag across all records and returns the top
/// 10 by descending count. Ties are broken alphabetically so the chart is
/// deterministic.
pub fn genre_distribution(dataset: &MovieDataset) -> Vec<(String, u32)> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for record in dataset.records() {
        for tag in &record.genres {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }
    top_n(counts)
}

/// Counts records per release year, ordered by year ascending, one entry
/// per distinct year present in the data.
pub fn release_year_trend(dataset: &MovieDataset) -> Vec<(i32, u32)> {
    let mut counts: BTreeMap<i32, u32> = BTreeMap::new();
    for record in dataset.records() {
        *counts.entry(record.year).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// Counts records per director (records without a director are skipped)
/// and returns the top 10 by descending count, alphabetical tiebreak.
pub fn top_directors(dataset: &MovieDataset) -> Vec<(String, u32)> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for record in dataset.records() {
        if let Some(director) = &record.director {
            *counts.entry(director.as_str()).or_insert(0) += 1;
        }
    }
    top_n(counts)
}

/// Records whose genre field contains `token` as a case-insensitive
/// substring, in source order.
pub fn filter_by_genre<'a>(dataset: &'a MovieDataset, token: &str) -> Vec<&'a MovieRecord> {
    dataset
        .records()
        .iter()
        .filter(|record| record.matches_genre(token))
        .collect()
}

/// Sorts counted entries by count descending, then name ascending, and
/// keeps the first `TOP_N`.
fn top_n(counts: HashMap<&str, u32>) -> Vec<(String, u32)> {
    let mut entries: Vec<(String, u32)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(TOP_N);
    entries
}

/// One histogram bin over the rating axis: `[lower, upper)`, last bin
/// inclusive of the maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u32,
}

/// The ratings distribution view: a fixed-bin histogram plus a smoothed
/// density curve (Gaussian KDE) scaled to the count axis so it overlays
/// the bars directly.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingHistogram {
    pub bins: Vec<HistogramBin>,
    /// (rating, scaled density) sample points for the overlay curve.
    pub density: Vec<[f64; 2]>,
}

impl RatingHistogram {
    pub fn bin_width(&self) -> f64 {
        self.bins.first().map_or(0.0, |bin| bin.upper - bin.lower)
    }
}

/// Builds the ratings histogram, or `None` when every rating is missing.
pub fn rating_histogram(dataset: &MovieDataset) -> Option<RatingHistogram> {
    let ratings: Vec<f64> = dataset
        .records()
        .iter()
        .filter_map(|record| record.rating)
        .filter(|value| value.is_finite())
        .collect();

    if ratings.is_empty() {
        return None;
    }

    let mut min = ratings.iter().cloned().fold(f64::INFINITY, f64::min);
    let mut max = ratings.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    // All ratings identical: spread the bins over a unit interval so the
    // histogram still has a visible extent.
    if max - min < f64::EPSILON {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / HISTOGRAM_BINS as f64;

    let mut counts = vec![0u32; HISTOGRAM_BINS];
    for value in &ratings {
        let index = (((value - min) / width) as usize).min(HISTOGRAM_BINS - 1);
        counts[index] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count,
        })
        .collect();

    let density = density_curve(&ratings, min, max, width);

    Some(RatingHistogram { bins, density })
}

/// Samples the Gaussian KDE over the histogram range and scales it by
/// `n * bin_width` so the curve lines up with the count axis.
fn density_curve(values: &[f64], min: f64, max: f64, bin_width: f64) -> Vec<[f64; 2]> {
    let bandwidth = silverman_bandwidth(values).max(bin_width * 0.25);
    let n = values.len() as f64;
    let norm = 1.0 / (n * bandwidth * (2.0 * PI).sqrt());

    let start = min - bandwidth;
    let span = (max + bandwidth) - start;
    let step = span / (DENSITY_SAMPLES - 1) as f64;

    (0..DENSITY_SAMPLES)
        .map(|i| {
            let x = start + i as f64 * step;
            let kde: f64 = values
                .iter()
                .map(|value| {
                    let u = (x - value) / bandwidth;
                    (-0.5 * u * u).exp()
                })
                .sum::<f64>()
                * norm;
            [x, kde * n * bin_width]
        })
        .collect()
}

/// Silverman's rule of thumb: `0.9 * min(std, IQR / 1.34) * n^(-1/5)`.
/// Returns 0.0 for degenerate inputs; the caller applies a floor.
fn silverman_bandwidth(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std = variance.sqrt();

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let iqr = quantile(&sorted, 0.75) - quantile(&sorted, 0.25);

    let spread = if iqr > 0.0 {
        std.min(iqr / 1.34)
    } else {
        std
    };

    0.9 * spread * (n as f64).powf(-0.2)
}

/// Linear-interpolated quantile of an already sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let low = position.floor() as usize;
    let high = position.ceil() as usize;
    let fraction = position - low as f64;
    sorted[low] + (sorted[high] - sorted[low]) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, genres: &str, director: Option<&str>, year: i32, rating: Option<f64>) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            genres: genres
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
            director: director.map(str::to_string),
            year,
            rating,
        }
    }

    fn crime_and_comedy() -> MovieDataset {
        MovieDataset::from_records(vec![
            movie("The Godfather", "Crime, Drama", Some("Francis Ford Coppola"), 1972, Some(9.2)),
            movie("Airplane!", "Comedy", Some("Jim Abrahams"), 1980, Some(7.7)),
        ])
    }

    #[test]
    fn genre_distribution_counts_flattened_tags() {
        let dataset = crime_and_comedy();
        let distribution = genre_distribution(&dataset);

        assert_eq!(
            distribution,
            vec![
                ("Comedy".to_string(), 1),
                ("Crime".to_string(), 1),
                ("Drama".to_string(), 1),
            ]
        );
    }

    #[test]
    fn genre_distribution_caps_at_ten_sorted_descending() {
        // 12 genres: "G00" appears 13 times, "G01" 12 times, ... "G11" once.
        let mut records = Vec::new();
        for i in 0..12 {
            for _ in 0..(13 - i) {
                records.push(movie("x", &format!("G{i:02}"), None, 2000, None));
            }
        }
        let dataset = MovieDataset::from_records(records);

        let distribution = genre_distribution(&dataset);
        assert_eq!(distribution.len(), TOP_N);
        assert!(distribution.windows(2).all(|pair| pair[0].1 >= pair[1].1));
        assert_eq!(distribution[0], ("G00".to_string(), 13));
        // "G10" (count 3) and "G11" (count 2) fall off the end.
        assert!(distribution.iter().all(|(name, _)| name != "G10" && name != "G11"));
    }

    #[test]
    fn top_n_ties_break_alphabetically() {
        let dataset = MovieDataset::from_records(vec![
            movie("a", "Western", None, 2000, None),
            movie("b", "Action", None, 2000, None),
            movie("c", "Mystery", None, 2000, None),
        ]);

        let distribution = genre_distribution(&dataset);
        assert_eq!(
            distribution.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>(),
            vec!["Action", "Mystery", "Western"]
        );
    }

    #[test]
    fn release_year_trend_scenario() {
        // Dataset with years {1994, 1994, 2001} yields exactly two points.
        let dataset = MovieDataset::from_records(vec![
            movie("a", "Drama", None, 1994, None),
            movie("b", "Drama", None, 1994, None),
            movie("c", "Drama", None, 2001, None),
        ]);

        assert_eq!(release_year_trend(&dataset), vec![(1994, 2), (2001, 1)]);
    }

    #[test]
    fn release_year_trend_is_ascending_with_distinct_years() {
        let dataset = MovieDataset::from_records(vec![
            movie("a", "", None, 2010, None),
            movie("b", "", None, 1950, None),
            movie("c", "", None, 1980, None),
            movie("d", "", None, 1950, None),
        ]);

        let trend = release_year_trend(&dataset);
        assert_eq!(trend, vec![(1950, 2), (1980, 1), (2010, 1)]);
        assert!(trend.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn top_directors_skips_missing_and_caps_at_ten() {
        let mut records = vec![movie("x", "", None, 2000, None)];
        for i in 0..12 {
            for _ in 0..(i + 1) {
                records.push(movie("y", "", Some(&format!("D{i:02}")), 2000, None));
            }
        }
        let dataset = MovieDataset::from_records(records);

        let directors = top_directors(&dataset);
        assert_eq!(directors.len(), TOP_N);
        assert_eq!(directors[0], ("D11".to_string(), 12));
        assert!(directors.windows(2).all(|pair| pair[0].1 >= pair[1].1));
    }

    #[test]
    fn filter_by_genre_scenario() {
        // "Crime" against {"Crime, Drama"; "Comedy"} matches exactly the first row.
        let dataset = crime_and_comedy();

        let matches = filter_by_genre(&dataset, "Crime");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "The Godfather");
    }

    #[test]
    fn filter_by_genre_absent_token_yields_empty_not_error() {
        let dataset = crime_and_comedy();
        assert!(filter_by_genre(&dataset, "Documentary").is_empty());
    }

    #[test]
    fn filter_by_genre_is_case_insensitive() {
        let dataset = crime_and_comedy();
        assert_eq!(filter_by_genre(&dataset, "cRiMe").len(), 1);
    }

    #[test]
    fn empty_dataset_yields_empty_views() {
        let dataset = MovieDataset::default();

        assert!(genre_distribution(&dataset).is_empty());
        assert!(release_year_trend(&dataset).is_empty());
        assert!(top_directors(&dataset).is_empty());
        assert!(rating_histogram(&dataset).is_none());
        assert!(filter_by_genre(&dataset, "Drama").is_empty());
    }

    #[test]
    fn rating_histogram_has_fixed_bins_and_preserves_counts() {
        let records: Vec<MovieRecord> = (0..50)
            .map(|i| movie("x", "", None, 2000, Some(7.0 + (i as f64) * 0.04)))
            .chain(std::iter::once(movie("no rating", "", None, 2000, None)))
            .collect();
        let dataset = MovieDataset::from_records(records);

        let histogram = rating_histogram(&dataset).unwrap();
        assert_eq!(histogram.bins.len(), HISTOGRAM_BINS);

        let total: u32 = histogram.bins.iter().map(|bin| bin.count).sum();
        assert_eq!(total, 50); // The rating-less record is excluded.

        // Bin edges tile [min, max] without gaps.
        for pair in histogram.bins.windows(2) {
            assert!((pair[0].upper - pair[1].lower).abs() < 1e-9);
        }

        // Density curve exists and is non-negative.
        assert!(!histogram.density.is_empty());
        assert!(histogram.density.iter().all(|point| point[1] >= 0.0));
    }

    #[test]
    fn rating_histogram_none_when_all_ratings_missing() {
        let dataset = MovieDataset::from_records(vec![
            movie("a", "Drama", None, 1994, None),
            movie("b", "Drama", None, 1995, None),
        ]);

        assert!(rating_histogram(&dataset).is_none());
    }

    #[test]
    fn rating_histogram_handles_identical_ratings() {
        let dataset = MovieDataset::from_records(vec![
            movie("a", "", None, 2000, Some(8.0)),
            movie("b", "", None, 2001, Some(8.0)),
        ]);

        let histogram = rating_histogram(&dataset).unwrap();
        assert_eq!(histogram.bins.len(), HISTOGRAM_BINS);
        assert_eq!(histogram.bins.iter().map(|bin| bin.count).sum::<u32>(), 2);
        assert!(histogram.bin_width() > 0.0);
    }
}
