#![warn(clippy::all)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use movie_dash::{Arguments, LoadSettings, MovieDashApp, load_dataset};
use tracing::error;

/*
cargo fmt
cargo test -- --nocapture
cargo run -- --help
cargo run -- imdb_top_1000.csv
cargo doc --open
cargo b -r && cargo install --path=.
*/

fn main() -> eframe::Result<()> {
    // Initialize the tracing subscriber for logging.
    // Use RUST_LOG environment variable to set logging level. eg `export RUST_LOG=info`
    tracing_subscriber::fmt::init();

    // Parse command-line arguments.
    let args = Arguments::build();

    // Configure the native options for the eframe application.
    let native_options = eframe::NativeOptions {
        centered: true,
        persist_window: true,
        vsync: true,
        viewport: egui::ViewportBuilder::default().with_drag_and_drop(true),
        ..Default::default()
    };

    // Run the eframe application.
    eframe::run_native(
        "Movie Analytics Dashboard",
        native_options,
        Box::new(move |creation_context| {
            // Always schedule the startup load: if the path is missing or
            // unparseable the app starts with an empty dataset and every
            // view shows its "no data" message instead of aborting.
            let app = match LoadSettings::new(&args) {
                Ok(settings) => {
                    // RUST_LOG=debug cargo run -- movies.csv
                    tracing::debug!("main()\nLoadSettings: {settings:#?}");

                    let future = load_dataset(settings.clone());
                    MovieDashApp::new_with_future(
                        creation_context,
                        settings,
                        Box::new(Box::pin(future)),
                    )
                }
                Err(err) => {
                    // Bad delimiter argument: start without data.
                    error!("Invalid arguments: {err}");
                    MovieDashApp::new(creation_context)
                }
            };

            match app {
                Ok(app) => Ok(Box::new(app)),
                Err(err) => {
                    error!("Failed to initialize MovieDashApp: {}", err); // Log
                    panic!("Failed to initialize MovieDashApp: {err}"); // Panic
                }
            }
        }),
    )
}
