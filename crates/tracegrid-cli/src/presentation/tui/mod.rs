mod app;
mod ui;

use std::io;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracegrid_runtime::LoaderEvent;

pub use app::TableApp;

/// Relative times drift; re-read the clock this often
const CLOCK_REFRESH: Duration = Duration::from_secs(30);

pub struct TuiTableView;

impl TuiTableView {
    /// Run until the user quits; `events` carries finished related-runs reads
    pub fn run(mut app: TableApp, events: Option<Receiver<LoaderEvent>>) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = event_loop(&mut terminal, &mut app, events.as_ref());

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut TableApp,
    events: Option<&Receiver<LoaderEvent>>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();
    let mut last_clock = Instant::now();

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
                KeyCode::Char('s') => app.cycle_sort(),
                KeyCode::Char('r') => app.reverse_sort(),
                KeyCode::Char('R') => app.refetch_selected(),
                _ => {}
            }
        }

        if let Some(rx) = events {
            while let Ok(event) = rx.try_recv() {
                app.on_loader_event(&event);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
        if last_clock.elapsed() >= CLOCK_REFRESH {
            app.refresh();
            last_clock = Instant::now();
        }
    }
}
