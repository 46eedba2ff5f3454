pub mod theme;
pub mod ui;
