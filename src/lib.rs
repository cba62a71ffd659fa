//! Reading Log Library
//!
//! This library provides the core functionality for the reading-log CLI tool.
//! It decodes a reading-history CSV export into typed records and renders
//! them as a reading list sorted by date read.

pub mod cli;
pub mod csv_handler;
pub mod error;
pub mod report;
