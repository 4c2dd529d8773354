use gridscroll_core::scroll::Clock;
use ratatui::{
    style::Style,
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::table::visible_slice;

pub struct BodyWidget;

impl BodyWidget {
    /// Sticky name column plus the visible window of the scrollable columns
    pub fn render<C: Clock>(frame: &mut Frame, app: &App<C>) {
        let names_area = app.layout.names;
        let body_area = app.layout.body;
        let offset = app.columns_scrolled(&app.body);
        let last = (app.row_offset + body_area.height as usize).min(app.table.rows);

        let mut names = Vec::with_capacity(body_area.height as usize);
        let mut cells = Vec::with_capacity(body_area.height as usize);
        for row in app.row_offset..last {
            let bg = if row % 2 == 0 {
                app.theme.bg0
            } else {
                app.theme.bg1
            };
            names.push(Line::styled(
                app.table.row_name(row),
                Style::default().fg(app.theme.sticky).bg(bg),
            ));
            cells.push(Line::styled(
                visible_slice(&app.table.row_line(row), offset, body_area.width as usize),
                Style::default().fg(app.theme.fg0).bg(bg),
            ));
        }

        let base = Style::default().bg(app.theme.bg0);
        frame.render_widget(Paragraph::new(names).style(base), names_area);
        frame.render_widget(Paragraph::new(cells).style(base), body_area);
    }
}
