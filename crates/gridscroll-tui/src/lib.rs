pub mod adapter;
pub mod app;
pub mod event;
pub mod table;
pub mod theme;
pub mod widgets;

pub use app::{App, TableLayout};
pub use theme::Theme;
