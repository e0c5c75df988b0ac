pub mod breakdown;
pub mod ui;
