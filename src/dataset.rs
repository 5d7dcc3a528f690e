//! Typed representation of the movie dataset.
//!
//! The CSV is read into a Polars `DataFrame` first (see `loader.rs`), then
//! converted here into plain `MovieRecord` values with a dedicated
//! parse/validate step. Rows whose release year cannot be coerced to an
//! integer are dropped and surfaced as `RowIssue` diagnostics.

use polars::prelude::*;

use crate::{MovieDashError, MovieDashResult};

/// Column names expected in the movie metadata CSV.
pub const COL_TITLE: &str = "Series_Title";
pub const COL_GENRE: &str = "Genre";
pub const COL_DIRECTOR: &str = "Director";
pub const COL_YEAR: &str = "Released_Year";
pub const COL_RATING: &str = "IMDB_Rating";

/// Separator between genre tags within the genre column.
pub const GENRE_SEPARATOR: char = ',';

/// One row of the movie dataset after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    /// Movie title.
    pub title: String,
    /// Individual genre tags, split from the comma-separated genre field.
    /// Empty if the field was absent.
    pub genres: Vec<String>,
    /// Director name, if present.
    pub director: Option<String>,
    /// Release year. Always valid: rows failing year coercion never become records.
    pub year: i32,
    /// IMDb rating, if present.
    pub rating: Option<f64>,
}

impl MovieRecord {
    /// The genre field as a single display string ("Crime, Drama").
    pub fn genre_field(&self) -> String {
        self.genres.join(", ")
    }

    /// Case-insensitive substring match of `token` against the genre field.
    pub fn matches_genre(&self, token: &str) -> bool {
        let needle = token.to_lowercase();
        self.genre_field().to_lowercase().contains(&needle)
    }
}

/// Diagnostic for a row dropped during load because its release year
/// could not be coerced to an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    /// 0-based row index in the source DataFrame.
    pub row: usize,
    /// The offending year cell, if any text was present.
    pub year_value: Option<String>,
}

/// The in-memory movie table: an ordered collection of validated records,
/// immutable after construction, plus the precomputed genre tag list used
/// to populate the filter ComboBox.
#[derive(Debug, Clone, Default)]
pub struct MovieDataset {
    records: Vec<MovieRecord>,
    /// Deduplicated, alphabetically sorted list of all genre tags seen.
    genre_tags: Vec<String>,
}

impl MovieDataset {
    /// Builds a dataset directly from records; used by aggregation tests
    /// and by `from_dataframe`.
    pub fn from_records(records: Vec<MovieRecord>) -> Self {
        let mut tags: Vec<String> = records
            .iter()
            .flat_map(|record| record.genres.iter().cloned())
            .collect();
        tags.sort();
        tags.dedup();

        MovieDataset {
            records,
            genre_tags: tags,
        }
    }

    /// Converts a freshly read DataFrame into typed records.
    ///
    /// All columns are read as text (schema inference is disabled in the
    /// loader), so every coercion happens here:
    /// - the year cell must parse as an integer (or a whole float such as
    ///   "1994.0"); rows that fail are dropped and reported as `RowIssue`s;
    /// - an unparseable rating cell degrades to a missing rating;
    /// - the genre field is split on `,` into trimmed tags.
    ///
    /// ### Errors
    ///
    /// Returns `MovieDashError::MissingColumn` if any required column is
    /// absent, which the caller treats as a whole-file load failure.
    pub fn from_dataframe(df: &DataFrame) -> MovieDashResult<(Self, Vec<RowIssue>)> {
        let titles = required_column(df, COL_TITLE)?;
        let genres = required_column(df, COL_GENRE)?;
        let directors = required_column(df, COL_DIRECTOR)?;
        let years = required_column(df, COL_YEAR)?;
        let ratings = required_column(df, COL_RATING)?;

        let mut records = Vec::with_capacity(df.height());
        let mut issues = Vec::new();

        for row in 0..df.height() {
            let year_text = cell_text(years, row);

            // Loader invariant: only rows with a numeric release year are retained.
            let Some(year) = year_text.as_deref().and_then(parse_year) else {
                issues.push(RowIssue {
                    row,
                    year_value: year_text,
                });
                continue;
            };

            records.push(MovieRecord {
                title: cell_text(titles, row).unwrap_or_default(),
                genres: split_genres(cell_text(genres, row).as_deref()),
                director: cell_text(directors, row),
                year,
                rating: cell_text(ratings, row).and_then(|text| text.parse::<f64>().ok()),
            });
        }

        Ok((Self::from_records(records), issues))
    }

    /// The validated records, in source order.
    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// The precomputed, sorted, deduplicated genre tag list.
    pub fn genre_tags(&self) -> &[String] {
        &self.genre_tags
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Looks up a required column, mapping the Polars "not found" error to a
/// domain error that names the column.
fn required_column<'a>(df: &'a DataFrame, name: &str) -> MovieDashResult<&'a Column> {
    df.column(name)
        .map_err(|_| MovieDashError::MissingColumn(name.to_string()))
}

/// Extracts a cell as trimmed text. Nulls and blank cells yield `None`.
fn cell_text(column: &Column, row: usize) -> Option<String> {
    let text = match column.get(row) {
        Ok(AnyValue::String(s)) => s.to_string(),
        Ok(AnyValue::StringOwned(s)) => s.to_string(),
        Ok(AnyValue::Null) => return None,
        Ok(other) => other.to_string(),
        Err(_) => return None,
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Coerces a year cell to an integer. Accepts plain integers and whole
/// floats ("1994", "1994.0"); anything else (e.g. the stray "PG" values in
/// the IMDb dump) is rejected.
fn parse_year(text: &str) -> Option<i32> {
    if let Ok(year) = text.parse::<i32>() {
        return Some(year);
    }
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(|value| value as i32)
}

/// Splits the comma-separated genre field into trimmed, non-empty tags.
fn split_genres(field: Option<&str>) -> Vec<String> {
    field
        .map(|text| {
            text.split(GENRE_SEPARATOR)
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_df() -> DataFrame {
        df!(
            COL_TITLE => &[Some("The Shawshank Redemption"), Some("The Godfather"), Some("Apollo 13")],
            COL_GENRE => &[Some("Drama"), Some("Crime, Drama"), None],
            COL_DIRECTOR => &[Some("Frank Darabont"), Some("Francis Ford Coppola"), Some("Ron Howard")],
            COL_YEAR => &[Some("1994"), Some("1972"), Some("PG")],
            COL_RATING => &[Some("9.3"), Some("9.2"), Some("x")],
        )
        .unwrap()
    }

    #[test]
    fn rows_with_bad_years_are_dropped_with_diagnostics() {
        let (dataset, issues) = MovieDataset::from_dataframe(&sample_df()).unwrap();

        assert_eq!(dataset.len(), 2);
        assert!(dataset.records().iter().all(|r| r.year > 0));

        assert_eq!(
            issues,
            vec![RowIssue {
                row: 2,
                year_value: Some("PG".to_string()),
            }]
        );
    }

    #[test]
    fn unparseable_rating_degrades_to_missing() {
        let df = df!(
            COL_TITLE => &["A"],
            COL_GENRE => &[Some("Drama")],
            COL_DIRECTOR => &[Some("Someone")],
            COL_YEAR => &["1994.0"],
            COL_RATING => &["not a number"],
        )
        .unwrap();

        let (dataset, issues) = MovieDataset::from_dataframe(&df).unwrap();
        assert!(issues.is_empty());
        assert_eq!(dataset.records()[0].year, 1994);
        assert_eq!(dataset.records()[0].rating, None);
    }

    #[test]
    fn genre_field_splits_into_trimmed_tags() {
        let (dataset, _) = MovieDataset::from_dataframe(&sample_df()).unwrap();

        let godfather = &dataset.records()[1];
        assert_eq!(godfather.genres, vec!["Crime", "Drama"]);
        assert_eq!(godfather.genre_field(), "Crime, Drama");

        // Absent genre field -> no tags.
        assert!(dataset.records().iter().all(|r| r.title != "Apollo 13"));
    }

    #[test]
    fn genre_tags_are_sorted_and_deduplicated() {
        let (dataset, _) = MovieDataset::from_dataframe(&sample_df()).unwrap();
        assert_eq!(dataset.genre_tags(), ["Crime", "Drama"]);
    }

    #[test]
    fn genre_match_is_case_insensitive_substring() {
        let (dataset, _) = MovieDataset::from_dataframe(&sample_df()).unwrap();
        let godfather = &dataset.records()[1];

        assert!(godfather.matches_genre("crime"));
        assert!(godfather.matches_genre("DRAMA"));
        assert!(!godfather.matches_genre("Comedy"));
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let df = df!(
            COL_TITLE => &["A"],
            COL_GENRE => &[Some("Drama")],
            COL_YEAR => &["1994"],
            COL_RATING => &["8.0"],
        )
        .unwrap();

        let err = MovieDataset::from_dataframe(&df).unwrap_err();
        assert!(matches!(err, MovieDashError::MissingColumn(name) if name == COL_DIRECTOR));
    }

    #[test]
    fn empty_dataframe_yields_empty_dataset() {
        let df = df!(
            COL_TITLE => &Vec::<String>::new(),
            COL_GENRE => &Vec::<String>::new(),
            COL_DIRECTOR => &Vec::<String>::new(),
            COL_YEAR => &Vec::<String>::new(),
            COL_RATING => &Vec::<String>::new(),
        )
        .unwrap();

        let (dataset, issues) = MovieDataset::from_dataframe(&df).unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.genre_tags().is_empty());
        assert!(issues.is_empty());
    }
}
