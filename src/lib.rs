pub mod app;
pub mod datatypes;
pub mod util;
