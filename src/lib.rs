//! xlsxnorm - Pure-Rust Excel date normalizer and time stripper
//!
//! This crate loads a spreadsheet, rewrites every textual date or date-time
//! cell into canonical `YYYY-MM-DD` / `YYYY-MM-DD HH:MM` form, optionally
//! strips the time-of-day component from chosen columns, and serializes the
//! result back to an XLSX file with text formatting forced on mutated columns.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxnorm::SessionBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a session with default settings
//!     let mut session = SessionBuilder::new().build()?;
//!
//!     // Load the first sheet of the input workbook
//!     session.load(File::open("visits.xlsx")?)?;
//!
//!     // Canonicalize every textual date cell (runs exactly once)
//!     session.normalize()?;
//!
//!     // Strip the time component from every datetime-bearing column
//!     for column in session.datetime_columns() {
//!         session.strip_time(column)?;
//!     }
//!
//!     // Export the current table; stripped columns are written as text
//!     let bytes = session.export()?;
//!     std::fs::write("visits_normalized.xlsx", bytes)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! For in-memory input, use `Cursor`:
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use xlsxnorm::SessionBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = SessionBuilder::new().build()?;
//! let excel_data: Vec<u8> = vec![]; // Your Excel file bytes
//! session.load(Cursor::new(excel_data))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Sheet Selection and Previews
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxnorm::{PreviewFormat, SessionBuilder, SheetSelector};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = SessionBuilder::new()
//!         .with_sheet_selector(SheetSelector::Name("Data".to_string()))
//!         .build()?;
//!
//!     session.load(File::open("visits.xlsx")?)?;
//!     session.normalize()?;
//!
//!     // Render the current table for display
//!     println!("{}", session.render_preview(PreviewFormat::Markdown)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Recognition Rules
//!
//! A text cell is recognized as a date when it consists of day, month and a
//! four-digit year separated by any non-digit characters (`05/07/2023`,
//! `5.7.2023`, `05 07 2023`), optionally followed by an `H:MM` time. Values
//! that match the pattern but do not form a real calendar date (`31-02-2024`)
//! are left untouched; one unrecognizable cell never blocks the rest of the
//! table.

mod api;
mod clean;
mod error;
mod normalize;
mod preview;
mod reader;
mod recognize;
mod session;
mod strip;
mod types;
mod writer;

// 公開API
pub use api::{PreviewFormat, SheetSelector};
pub use clean::{clean, zero_columns};
pub use error::XlsxNormError;
pub use normalize::{is_datetime_like_column, normalize};
pub use recognize::recognize;
pub use session::{Session, SessionBuilder};
pub use strip::strip_time;
pub use types::{CellValue, Table};
