use std::io;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use gridscroll_core::AppConfig;
use gridscroll_tui::{
    app::{App, TableLayout},
    event::EventHandler,
    widgets::{BodyWidget, HeaderWidget, ProxyScrollbarWidget, StatusBarWidget},
};

/// Poll timeout while nothing animates
const TICK_RATE_MS: u64 = 250;

pub fn run(config: &AppConfig) -> Result<()> {
    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("gridscroll"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = EventHandler::new(TICK_RATE_MS, config.ui.frame_interval());
    let result = main_loop(&mut terminal, &mut app, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    app.engine.destroy();
    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    loop {
        app.tick();

        terminal.draw(|frame| {
            app.set_layout(TableLayout::split(frame.area()));
            HeaderWidget::render(frame, app);
            BodyWidget::render(frame, app);
            ProxyScrollbarWidget::render(frame, app);
            StatusBarWidget::render(frame, app);
        })?;

        // Poll at frame rate while frames or timers are pending
        let event = if app.needs_frames() {
            event_handler.next_frame()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            app.handle_event(event);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
