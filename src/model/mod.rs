pub mod identity;
pub mod report_model;
