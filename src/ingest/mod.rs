pub mod loader;
pub mod raw_model;
