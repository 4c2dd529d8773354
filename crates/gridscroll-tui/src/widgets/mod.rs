mod body;
mod header;
mod scrollbar;
mod status_bar;

pub use body::BodyWidget;
pub use header::HeaderWidget;
pub use scrollbar::ProxyScrollbarWidget;
pub use status_bar::StatusBarWidget;
