use clap::Parser;
use std::path::PathBuf;

/// Default delimiter for the movie CSV file.
pub const DEFAULT_CSV_DELIMITER: &str = ",";

// https://stackoverflow.com/questions/74068168/clap-rs-not-printing-colors-during-help
fn get_styles() -> clap::builder::Styles {
    let cyan = anstyle::Color::Ansi(anstyle::AnsiColor::Cyan);
    let green = anstyle::Color::Ansi(anstyle::AnsiColor::Green);
    let yellow = anstyle::Color::Ansi(anstyle::AnsiColor::Yellow);

    clap::builder::Styles::styled()
        .placeholder(anstyle::Style::new().fg_color(Some(yellow)))
        .usage(anstyle::Style::new().fg_color(Some(cyan)).bold())
        .header(
            anstyle::Style::new()
                .fg_color(Some(cyan))
                .bold()
                .underline(),
        )
        .literal(anstyle::Style::new().fg_color(Some(green)))
}

// https://docs.rs/clap/latest/clap/struct.Command.html#method.help_template
const APPLET_TEMPLATE: &str = "\
{before-help}
{about-with-newline}
{usage-heading} {usage}

{all-args}
{after-help}";

const EX1: &str = r#" movie-dash imdb_top_1000.csv"#;
const EX2: &str = r#" movie-dash -d ';' movies.csv"#;

/// Command-line arguments for the movie dashboard application.
#[derive(Parser, Debug, Clone)]
#[command(
    // Read from `Cargo.toml`.
    author, version, about,
    long_about = None,
    next_line_help = true,
    help_template = APPLET_TEMPLATE,
    styles = get_styles(),
    after_help = format!("EXAMPLES:\n{EX1}\n{EX2}")
)]
pub struct Arguments {
    /// CSV delimiter character. [Default: ',']
    #[arg(
        short = 'd',
        long,
        default_value = DEFAULT_CSV_DELIMITER,
        help = "CSV delimiter character",
        long_help = "Sets the delimiter used when parsing the movie CSV file."
    )]
    pub delimiter: String,

    /// Optional path to the movie metadata CSV file.
    #[arg(
        value_name = "FILE_PATH",
        default_value = "imdb_top_1000.csv",
        required = false,
        help = "Path to the movie metadata CSV file [Optional]",
        long_help = "Path to the input CSV file.\n\
        If the file does not exist or cannot be parsed, the dashboard starts\n\
        with an empty dataset and every view shows a 'no data' message.\n\
        A file can also be loaded later via the File menu or drag-and-drop."
    )]
    pub path: PathBuf,
}

impl Arguments {
    /// Build `Arguments` struct.
    pub fn build() -> Arguments {
        Arguments::parse()
    }
}
