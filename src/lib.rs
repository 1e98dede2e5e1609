//! Read-only report engine for BDD test runs.
//!
//! A run document (features → scenarios → steps) is validated once into a
//! [`model::report_model::Report`]. Feature status is rolled up from
//! scenarios by [`status::aggregator`], and [`view::view_model::ReportView`]
//! tracks the selected feature and which step log panels are open. The
//! renderers in [`report`] only read from the view.

pub mod cli;
pub mod error;
pub mod ingest;
pub mod model;
pub mod report;
pub mod status;
pub mod view;
