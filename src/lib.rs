#![warn(clippy::all)]
#![doc = include_str!("../README.md")]

// Modules that make up the movie dashboard library.
mod aggregate;
mod args;
mod chart;
mod dataset;
mod error;
mod file_dialog;
mod layout;
mod loader;
mod table;
mod traits;

// Publicly expose the contents of these modules.
pub use self::{
    aggregate::*,
    args::*,
    chart::*,
    dataset::*,
    error::*,
    file_dialog::*,
    layout::*,
    loader::*,
    table::*,
    traits::*,
};
