//! The filter results table: (title, rating, year) rows rendered with
//! `egui_extras::TableBuilder`.

use egui::{Align, Direction, Layout, TextStyle, Ui};
use egui_extras::{Column, TableBuilder};

use crate::MovieRecord;

/// One rendered table row.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRow {
    pub title: String,
    pub rating: Option<f64>,
    pub year: i32,
}

/// The table shown after a genre filter: a snapshot of the matching
/// records, fully rebuilt on every filter invocation.
#[derive(Debug, Clone, Default)]
pub struct FilteredTable {
    rows: Vec<MovieRow>,
}

impl FilteredTable {
    pub fn from_matches(matches: &[&MovieRecord]) -> Self {
        FilteredTable {
            rows: matches
                .iter()
                .map(|record| MovieRow {
                    title: record.title.clone(),
                    rating: record.rating,
                    year: record.year,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the table into the table region.
    pub fn render(&self, ui: &mut Ui) {
        let style = ui.style();
        let text_height = TextStyle::Body.resolve(style).size + style.spacing.item_spacing.y;
        let header_height = style.spacing.interact_size.y + 2.0 * style.spacing.item_spacing.y;

        let centered = Layout::centered_and_justified(Direction::LeftToRight);

        TableBuilder::new(ui)
            .striped(true) // Alternate row background colors for better readability.
            .column(Column::remainder().at_least(200.0).clip(true)) // Title
            .column(Column::auto().at_least(110.0)) // Rating
            .column(Column::auto().at_least(110.0)) // Year
            .auto_shrink([false, false])
            .header(header_height, |mut header| {
                header.col(|ui| {
                    ui.strong("Series Title");
                });
                header.col(|ui| {
                    ui.strong("IMDB Rating");
                });
                header.col(|ui| {
                    ui.strong("Released Year");
                });
            })
            .body(|body| {
                body.rows(text_height, self.rows.len(), |mut table_row| {
                    let row = &self.rows[table_row.index()];

                    table_row.col(|ui| {
                        ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                            ui.label(&row.title);
                        });
                    });
                    table_row.col(|ui| {
                        ui.with_layout(centered, |ui| {
                            ui.label(format_rating(row.rating));
                        });
                    });
                    table_row.col(|ui| {
                        ui.with_layout(centered, |ui| {
                            // Year rendered as a plain integer.
                            ui.label(row.year.to_string());
                        });
                    });
                });
            });
    }
}

/// Missing ratings display as an empty cell.
fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(value) => format!("{value:.1}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_of_matches_keeps_order_and_fields() {
        let records = [
            MovieRecord {
                title: "The Godfather".to_string(),
                genres: vec!["Crime".to_string(), "Drama".to_string()],
                director: Some("Francis Ford Coppola".to_string()),
                year: 1972,
                rating: Some(9.2),
            },
            MovieRecord {
                title: "Unrated".to_string(),
                genres: vec!["Drama".to_string()],
                director: None,
                year: 2001,
                rating: None,
            },
        ];
        let matches: Vec<&MovieRecord> = records.iter().collect();

        let table = FilteredTable::from_matches(&matches);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.rows[0],
            MovieRow {
                title: "The Godfather".to_string(),
                rating: Some(9.2),
                year: 1972,
            }
        );
    }

    #[test]
    fn rating_formatting() {
        assert_eq!(format_rating(Some(9.2)), "9.2");
        assert_eq!(format_rating(Some(8.0)), "8.0");
        assert_eq!(format_rating(None), "");
    }
}
