//! Electrode report model
//!
//! Turns an implantation shopping list and per-electrode error metrics into a
//! slide deck description: a title slide, a shopping-list placeholder, an
//! error table, and one slide per electrode with its matched error row and a
//! colored label chip. Workbooks are decoded into cell grids with `calamine`;
//! the deck is written as JSON.

pub mod deck;
pub mod inputs;
pub mod matching;
pub mod patient;
pub mod runner;
pub mod sheet;
pub mod style;
pub mod workbook;

pub use deck::{assemble, write_deck, Deck, Slide};
pub use inputs::{ErrorMetrics, ShoppingList};
pub use matching::{match_error_row, ErrorMatch, MatchRule};
pub use patient::Patient;
pub use runner::run;
pub use sheet::{Cell, Record};
