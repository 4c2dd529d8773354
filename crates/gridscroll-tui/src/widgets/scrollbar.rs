use gridscroll_core::scroll::Clock;
use ratatui::{
    style::Style,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use crate::app::App;

pub struct ProxyScrollbarWidget;

impl ProxyScrollbarWidget {
    /// Native-style scrollbar driven by the proxy viewport's offset
    pub fn render<C: Clock>(frame: &mut Frame, app: &App<C>) {
        let area = app.layout.scrollbar;
        let viewport = area.width as usize;
        let max_offset = app.table.scroll_width().saturating_sub(viewport);
        if max_offset == 0 {
            return;
        }

        let position = app.columns_scrolled(&app.proxy).min(max_offset);
        let mut state = ScrollbarState::new(max_offset)
            .position(position)
            .viewport_content_length(viewport);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::HorizontalBottom)
            .begin_symbol(None)
            .end_symbol(None)
            .thumb_style(Style::default().fg(app.theme.thumb))
            .track_style(Style::default().fg(app.theme.track));

        frame.render_stateful_widget(scrollbar, area, &mut state);
    }
}
