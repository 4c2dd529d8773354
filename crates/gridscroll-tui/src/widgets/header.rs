use gridscroll_core::scroll::Clock;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::table::visible_slice;

pub struct HeaderWidget;

impl HeaderWidget {
    /// Column titles, following the header viewport's offset
    pub fn render<C: Clock>(frame: &mut Frame, app: &App<C>) {
        let style = Style::default()
            .fg(app.theme.header)
            .bg(app.theme.bg2)
            .add_modifier(Modifier::BOLD);

        let name = Paragraph::new(Line::styled(" name", style)).style(style);
        frame.render_widget(name, app.layout.header_name);

        let area: Rect = app.layout.header;
        let offset = app.columns_scrolled(&app.header);
        let titles = visible_slice(&app.table.header_line(), offset, area.width as usize);
        frame.render_widget(Paragraph::new(Line::styled(titles, style)).style(style), area);
    }
}
