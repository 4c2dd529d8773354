use gridscroll_core::scroll::Clock;
use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render<C: Clock>(frame: &mut Frame, app: &App<C>) {
        let area = app.layout.status;
        let state = app.engine.state();

        let signal = app
            .last_signal()
            .map(|kind| kind.name())
            .unwrap_or("-");
        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            format!(
                " x {:.0}/{:.0} | rows {}-{} of {} | {}{}",
                -state.x,
                -state.max_scroll_x,
                app.row_offset + 1,
                (app.row_offset + app.visible_rows()).min(app.table.rows),
                app.table.rows,
                signal,
                if state.is_animating { " ~" } else { "" },
            )
        };

        let help_hint = " q:quit ←/→:scroll 1-9:column r:refresh e:enable m:drag ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.chars().count() + help_hint.chars().count());

        let text_style = if state.enabled {
            Style::default().fg(app.theme.fg0).bg(app.theme.bg2)
        } else {
            Style::default().fg(app.theme.warning).bg(app.theme.bg2)
        };
        let line = Line::from(vec![
            Span::styled(status_text, text_style),
            Span::styled(" ".repeat(padding_len), Style::default().bg(app.theme.bg2)),
            Span::styled(
                help_hint,
                Style::default().fg(app.theme.grey2).bg(app.theme.bg2),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
