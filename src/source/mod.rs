//! Record sources feeding the grouping engine.
//!
//! A source must hand over records whose identity fields are all present.
//! The CSV source enforces this at the header: a file lacking `Name`,
//! `Username` or `Email` is rejected before any record is produced.

pub mod csv;

pub use self::csv::{load_profiles, read_profiles, SourceError};
