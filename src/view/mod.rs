pub mod disclosure;
pub mod selection;
pub mod view_model;
