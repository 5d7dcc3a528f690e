use crate::{
    ChartView, Error, FilteredTable, LoadSettings, MSG_NO_DIRECTOR_DATA, MSG_NO_GENRE_DATA,
    MSG_NO_MOVIES_FOUND, MSG_NO_RATING_DATA, MSG_NO_YEAR_DATA, MovieDashResult, MovieDataset,
    MyStyle, Notification, filter_by_genre, genre_distribution, open_file, rating_histogram,
    release_year_trend, show_message, top_directors,
};

use egui::{
    CentralPanel, Color32, ComboBox, Context, Frame, Hyperlink, RichText, Stroke, TopBottomPanel,
    ViewportCommand, menu, style::Visuals, warn_if_debug_build, widgets,
};
use std::sync::Arc;
use tokio::sync::oneshot::{self, Receiver, error::TryRecvError};
use tracing::{error, info};

/// Type alias for a Result with a `MovieDataset`.
pub type DatasetResult = MovieDashResult<MovieDataset>;
/// Type alias for a boxed, dynamically dispatched Future that returns a `DatasetResult`.
pub type DataFuture = Box<dyn Future<Output = DatasetResult> + Unpin + Send + 'static>;

/// Current content of the chart region. Assigning a new value is the
/// "idempotent clear": the region is redrawn from this state every frame,
/// so nothing ever layers on top of previous content.
enum ChartContent {
    Empty,
    Chart(ChartView),
    Message(&'static str),
}

/// Current content of the table region.
enum TableContent {
    Empty,
    Table(FilteredTable),
    Message(&'static str),
}

/// The main application struct for the movie dashboard.
pub struct MovieDashApp {
    /// The loaded movie table. Shared, immutable after load; an empty
    /// dataset is the degraded-but-functional state after a load failure.
    pub dataset: Arc<MovieDataset>,
    /// Path and delimiter used for the current/next load.
    pub load_settings: LoadSettings,
    /// Genre token currently selected in the filter ComboBox.
    pub selected_genre: Option<String>,
    /// Optional notification window for displaying errors.
    pub notification: Option<Box<dyn Notification>>,

    chart: ChartContent,
    table: TableContent,

    /// Tokio runtime for asynchronous operations (file loading, dialogs).
    runtime: tokio::runtime::Runtime,
    /// Channel for receiving the result of asynchronous dataset loading.
    pipe: Option<Receiver<DatasetResult>>,
    /// Vector of active asynchronous tasks. Used to prevent the app from hanging.
    tasks: Vec<tokio::task::JoinHandle<()>>,
    /// True while the initial (startup) load is pending: its failure only
    /// logs and degrades to an empty dataset, without a notification window.
    startup_load: bool,
}

impl Default for MovieDashApp {
    fn default() -> Self {
        Self {
            dataset: Arc::new(MovieDataset::default()),
            load_settings: LoadSettings::default(),
            selected_genre: None,
            notification: None,
            chart: ChartContent::Empty,
            table: TableContent::Empty,
            runtime: tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("Failed to build Tokio runtime"),
            pipe: None,
            tasks: Vec::new(),
            startup_load: false,
        }
    }
}

impl MovieDashApp {
    /// Creates a new `MovieDashApp` instance without loading data.
    pub fn new(cc: &eframe::CreationContext<'_>) -> MovieDashResult<Self> {
        cc.egui_ctx.set_style_init(Visuals::dark());
        Ok(Default::default())
    }

    /// Creates a new `MovieDashApp` and schedules the startup dataset load.
    pub fn new_with_future(
        cc: &eframe::CreationContext<'_>,
        settings: LoadSettings,
        future: DataFuture,
    ) -> MovieDashResult<Self> {
        let mut app: Self = Default::default();
        cc.egui_ctx.set_style_init(Visuals::dark());
        app.load_settings = settings;
        app.startup_load = true;
        app.run_data_future(future, &cc.egui_ctx);
        Ok(app)
    }

    /// Checks if a Notification is active and displays it.
    fn check_notification(&mut self, ctx: &Context) {
        if let Some(notification) = &mut self.notification {
            if !notification.show(ctx) {
                self.notification = None; // Remove closed Notification.
            }
        }
    }

    /// Checks if there is a pending dataset load. If a result is available,
    /// process it; if the operation is still in progress, keep it in the
    /// `pipe`. Returns `true` while loading is pending.
    fn check_data_pending(&mut self) -> bool {
        // Attempt to take ownership of the receiver. If it's None (no pending operation), return false.
        let Some(mut output) = self.pipe.take() else {
            return false;
        };

        match output.try_recv() {
            Ok(data_result) => {
                match data_result {
                    Ok(dataset) => {
                        info!(
                            "Loaded {} movie records ({} distinct genre tags).",
                            dataset.len(),
                            dataset.genre_tags().len()
                        );

                        // A new dataset invalidates the previous selection and views.
                        self.selected_genre = None;
                        self.chart = ChartContent::Empty;
                        self.table = TableContent::Empty;
                        self.dataset = Arc::new(dataset);
                        self.startup_load = false;
                        false
                    }
                    Err(err) => {
                        error!("Error loading dataset: {err}");

                        // Startup failures degrade silently to the empty
                        // dataset; user-initiated loads raise a window.
                        if !self.startup_load {
                            self.notification = Some(Box::new(Error {
                                message: err.to_string(),
                            }));
                        }
                        self.startup_load = false;
                        false
                    }
                }
            }
            Err(try_recv_error) => match try_recv_error {
                // The channel is empty (data not yet available). This is the normal "pending" state.
                TryRecvError::Empty => {
                    self.pipe = Some(output);
                    true
                }
                // The channel is closed (the sender was dropped). Unexpected error state.
                TryRecvError::Closed => {
                    let err_msg = "Dataset load terminated without response.".to_string();
                    self.notification = Some(Box::new(Error {
                        message: err_msg.clone(),
                    }));
                    error!("{err_msg}");
                    false
                }
            },
        }
    }

    /// Runs a `DataFuture` to load the dataset asynchronously.
    ///
    /// Takes a future, spawns a Tokio task, and sets up a channel to receive the result.
    fn run_data_future(&mut self, future: DataFuture, ctx: &Context) {
        // Before scheduling a new future, ensure no tasks are stuck.
        self.tasks.retain(|task| !task.is_finished());

        let (tx, rx) = oneshot::channel::<DatasetResult>();
        self.pipe = Some(rx);

        // Clone the context for use within the asynchronous task (to request repaints).
        let ctx_clone = ctx.clone();

        let handle = self.runtime.spawn(async move {
            let data = future.await;
            if tx.send(data).is_err() {
                error!("Receiver dropped before dataset could be sent.");
            }

            // Request a repaint of the UI to display the loaded data.
            ctx_clone.request_repaint();
        });

        self.tasks.push(handle); // Track the task.
    }

    /// Schedules a load of `path`, keeping the configured delimiter.
    fn load_path(&mut self, path: &std::path::Path, ctx: &Context) {
        self.load_settings = self.load_settings.with_path(path);
        let future = crate::load_dataset(self.load_settings.clone());
        self.run_data_future(Box::new(Box::pin(future)), ctx);
    }

    // --- Chart handlers: each recomputes its aggregate from the full
    // in-memory table and replaces the chart region content. ---

    fn show_genre_distribution(&mut self) {
        info!("Displaying genre distribution...");
        let distribution = genre_distribution(&self.dataset);
        self.chart = if distribution.is_empty() {
            ChartContent::Message(MSG_NO_GENRE_DATA)
        } else {
            ChartContent::Chart(ChartView::top_counts(
                "genre_distribution",
                "Top 10 Movie Genres",
                distribution,
            ))
        };
    }

    fn show_release_year_trend(&mut self) {
        info!("Displaying release year trend...");
        let trend = release_year_trend(&self.dataset);
        self.chart = if trend.is_empty() {
            ChartContent::Message(MSG_NO_YEAR_DATA)
        } else {
            ChartContent::Chart(ChartView::year_trend("Movies Released Over Time", trend))
        };
    }

    fn show_top_directors(&mut self) {
        info!("Displaying top directors...");
        let directors = top_directors(&self.dataset);
        self.chart = if directors.is_empty() {
            ChartContent::Message(MSG_NO_DIRECTOR_DATA)
        } else {
            ChartContent::Chart(ChartView::top_counts(
                "top_directors",
                "Top 10 Directors",
                directors,
            ))
        };
    }

    fn show_ratings_distribution(&mut self) {
        info!("Displaying ratings distribution...");
        self.chart = match rating_histogram(&self.dataset) {
            Some(histogram) => {
                ChartContent::Chart(ChartView::ratings("Distribution of IMDb Ratings", histogram))
            }
            None => ChartContent::Message(MSG_NO_RATING_DATA),
        };
    }

    /// Rebuilds the table region from the selected genre token.
    fn filter_movies(&mut self) {
        info!("Filtering movies by genre...");

        let Some(token) = self.selected_genre.clone() else {
            self.table = TableContent::Message(MSG_NO_MOVIES_FOUND);
            return;
        };

        let matches = filter_by_genre(&self.dataset, &token);
        self.table = if matches.is_empty() {
            TableContent::Message(MSG_NO_MOVIES_FOUND)
        } else {
            TableContent::Table(FilteredTable::from_matches(&matches))
        };
    }
}

impl eframe::App for MovieDashApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        // Check and display any active Notifications (errors).
        self.check_notification(ctx);

        // Poll the pending dataset load once per frame.
        let pending = self.check_data_pending();

        // Handle dropped files.
        if let Some(dropped_file) = ctx.input(|i| i.raw.dropped_files.last().cloned()) {
            if let Some(path) = &dropped_file.path {
                let path = path.clone();
                self.load_path(&path, ctx);
            }
        }

        // Layout:
        //
        //  | menu_bar        widgets |
        //  ---------------------------
        //  | title                   |
        //  | buttons + genre filter  |
        //  ---------------------------
        //  |        chart            |
        //  ---------------------------
        //  |        table            |
        //  ---------------------------
        //  | status footer           |

        TopBottomPanel::top("top_panel").show(ctx, |ui| {
            menu::bar(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.menu_button("File", |ui| {
                        if ui.button("Open").clicked() {
                            // Open a file dialog to select a CSV file.
                            if let Ok(path) = self.runtime.block_on(open_file()) {
                                self.load_path(&path, ctx);
                            }
                            ui.close_menu();
                        }

                        ui.menu_button("About", |ui| {
                            Frame::default()
                                .stroke(Stroke::new(1.0, Color32::GRAY))
                                .outer_margin(2.0)
                                .inner_margin(10.0)
                                .show(ui, |ui| {
                                    let version = env!("CARGO_PKG_VERSION");
                                    let description = env!("CARGO_PKG_DESCRIPTION");

                                    ui.label(RichText::new("Movie Dash").size(24.0));
                                    ui.label(format!("Version: {version}"));
                                    ui.label(description);
                                    ui.horizontal(|ui| {
                                        let url = "https://github.com/emilk/egui";
                                        let heading = Hyperlink::from_label_and_url("egui", url);
                                        ui.label("Built with ");
                                        ui.add(heading).on_hover_text(url);
                                    });
                                });
                        });

                        if ui.button("Quit").clicked() {
                            // Close the application.
                            ui.ctx().send_viewport_cmd(ViewportCommand::Close);
                        }
                    });

                    // Add spacing to align theme switch to the right.
                    let delta = ui.available_width() - 15.0;
                    if delta > 0.0 {
                        ui.add_space(delta);
                        widgets::global_theme_preference_switch(ui);
                    }
                });
            });
        });

        TopBottomPanel::top("controls_panel").show(ctx, |ui| {
            if pending {
                ui.disable();
            }

            ui.vertical_centered(|ui| {
                ui.heading("🎬 Movie Analytics Dashboard");
            });

            // Chart trigger buttons.
            ui.horizontal(|ui| {
                if ui.button("Genre Distribution").clicked() {
                    self.show_genre_distribution();
                }
                if ui.button("Release Year Trend").clicked() {
                    self.show_release_year_trend();
                }
                if ui.button("Top Directors").clicked() {
                    self.show_top_directors();
                }
                if ui.button("Ratings Distribution").clicked() {
                    self.show_ratings_distribution();
                }
            });

            // Genre filter row, fed by the dataset's precomputed tag list.
            ui.horizontal(|ui| {
                ui.label("Select Genre:");

                let dataset = self.dataset.clone();
                ComboBox::from_id_salt("genre_select")
                    .selected_text(
                        self.selected_genre
                            .clone()
                            .unwrap_or_else(|| "Select Genre".to_string()),
                    )
                    .width(220.0)
                    .show_ui(ui, |ui| {
                        for tag in dataset.genre_tags() {
                            ui.selectable_value(
                                &mut self.selected_genre,
                                Some(tag.clone()),
                                tag,
                            );
                        }
                    });

                if ui.button("Filter Movies").clicked() {
                    self.filter_movies();
                }
            });

            ui.add_space(4.0);
        });

        TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.dataset.is_empty() {
                    ui.label("no dataset loaded");
                } else {
                    ui.label(format!(
                        "{} — {} records",
                        self.load_settings.path.display(),
                        self.dataset.len()
                    ));
                }
            });
        });

        // Table region above the status bar.
        TopBottomPanel::bottom("table_panel")
            .resizable(true)
            .default_height(260.0)
            .show(ctx, |ui| match &self.table {
                TableContent::Table(table) => table.render(ui),
                TableContent::Message(message) => show_message(ui, message),
                TableContent::Empty => {
                    ui.centered_and_justified(|ui| {
                        ui.label("Select a genre and press \"Filter Movies\" to list titles.");
                    });
                }
            });

        // Chart region.
        // CentralPanel must be added after all other panels in the egui layout!
        CentralPanel::default().show(ctx, |ui| {
            warn_if_debug_build(ui);

            if pending {
                ui.disable();
            }

            match &self.chart {
                ChartContent::Chart(view) => view.show(ui),
                ChartContent::Message(message) => show_message(ui, message),
                ChartContent::Empty => {
                    ui.centered_and_justified(|ui| {
                        if pending {
                            ui.spinner();
                        } else if self.dataset.is_empty() {
                            ui.label("Drop a movie CSV here, or open one via File → Open.");
                        } else {
                            ui.label("Pick a visualization above.");
                        }
                    });
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MovieRecord;

    fn movie(title: &str, genres: &[&str], year: i32, rating: Option<f64>) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            genres: genres.iter().map(|tag| tag.to_string()).collect(),
            director: Some("Someone".to_string()),
            year,
            rating,
        }
    }

    fn app_with(records: Vec<MovieRecord>) -> MovieDashApp {
        MovieDashApp {
            dataset: Arc::new(MovieDataset::from_records(records)),
            ..Default::default()
        }
    }

    #[test]
    fn empty_dataset_every_handler_shows_a_message() {
        let mut app = app_with(Vec::new());

        app.show_genre_distribution();
        assert!(matches!(app.chart, ChartContent::Message(MSG_NO_GENRE_DATA)));

        app.show_release_year_trend();
        assert!(matches!(app.chart, ChartContent::Message(MSG_NO_YEAR_DATA)));

        app.show_top_directors();
        assert!(matches!(
            app.chart,
            ChartContent::Message(MSG_NO_DIRECTOR_DATA)
        ));

        app.show_ratings_distribution();
        assert!(matches!(
            app.chart,
            ChartContent::Message(MSG_NO_RATING_DATA)
        ));

        assert!(app.dataset.genre_tags().is_empty());
    }

    #[test]
    fn handlers_produce_charts_when_data_exists() {
        let mut app = app_with(vec![
            movie("A", &["Drama"], 1994, Some(8.5)),
            movie("B", &["Crime", "Drama"], 1972, Some(9.2)),
        ]);

        app.show_genre_distribution();
        assert!(matches!(app.chart, ChartContent::Chart(_)));

        app.show_release_year_trend();
        assert!(matches!(app.chart, ChartContent::Chart(_)));

        app.show_top_directors();
        assert!(matches!(app.chart, ChartContent::Chart(_)));

        app.show_ratings_distribution();
        assert!(matches!(app.chart, ChartContent::Chart(_)));
    }

    #[test]
    fn ratings_with_no_values_shows_message_even_with_records() {
        let mut app = app_with(vec![movie("A", &["Drama"], 1994, None)]);

        app.show_ratings_distribution();
        assert!(matches!(
            app.chart,
            ChartContent::Message(MSG_NO_RATING_DATA)
        ));
    }

    #[test]
    fn filter_builds_table_for_matches_and_message_otherwise() {
        let mut app = app_with(vec![
            movie("The Godfather", &["Crime", "Drama"], 1972, Some(9.2)),
            movie("Airplane!", &["Comedy"], 1980, Some(7.7)),
        ]);

        app.selected_genre = Some("Crime".to_string());
        app.filter_movies();
        match &app.table {
            TableContent::Table(table) => assert_eq!(table.len(), 1),
            _ => panic!("expected a table with one matching row"),
        }

        app.selected_genre = Some("Documentary".to_string());
        app.filter_movies();
        assert!(matches!(
            app.table,
            TableContent::Message(MSG_NO_MOVIES_FOUND)
        ));
    }

    #[test]
    fn filter_without_selection_shows_no_movies_message() {
        let mut app = app_with(vec![movie("A", &["Drama"], 1994, None)]);

        app.filter_movies();
        assert!(matches!(
            app.table,
            TableContent::Message(MSG_NO_MOVIES_FOUND)
        ));
    }
}
