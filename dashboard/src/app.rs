use crate::fetch::{FetchOutcome, Fetcher};
use crate::state::DashboardState;
use crate::{ui, view};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedReceiver;

/// Main UI loop. One logical thread: completed fetches are drained from the
/// channel and applied between frames, key events are handled synchronously,
/// and a fixed-interval tick re-issues the background fetches unconditionally
/// (no in-flight guard; stale responses are discarded by sequence number).
pub fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    mut fetcher: Fetcher,
    mut rx: UnboundedReceiver<FetchOutcome>,
    interval: Duration,
    range_hours: i64,
) -> Result<()> {
    let mut state = DashboardState::new(range_hours);

    // Initial refresh, then the timer takes over
    fetcher.fetch_employees();
    fetcher.fetch_recent_activity();
    state.tick_clock();
    let mut last_tick = Instant::now();

    loop {
        while let Ok(outcome) = rx.try_recv() {
            state.apply(outcome);
        }

        terminal.draw(|f| ui::render(f, &state))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(key, &mut state, &mut fetcher) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= interval {
            fetcher.fetch_employees();
            fetcher.fetch_recent_activity();
            state.tick_clock();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

/// Returns true when the app should quit.
fn handle_key(key: KeyEvent, state: &mut DashboardState, fetcher: &mut Fetcher) -> bool {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Esc => {
            if state.search.is_empty() {
                return true;
            }
            state.search.clear();
        }
        KeyCode::Tab => state.tab = state.tab.next(),
        KeyCode::Up => {
            let visible = view::employee_rows(state).len();
            state.move_cursor(-1, visible);
        }
        KeyCode::Down => {
            let visible = view::employee_rows(state).len();
            state.move_cursor(1, visible);
        }
        KeyCode::Enter => {
            let rows = view::employee_rows(state);
            if let Some(row) = rows.get(state.cursor) {
                let username = row.username.clone();
                state.select(username.clone());
                refresh_detail_panels(state, fetcher, username);
            }
        }
        KeyCode::Left => state.status_filter = state.status_filter.prev(),
        KeyCode::Right => state.status_filter = state.status_filter.next(),
        KeyCode::PageUp | KeyCode::PageDown => {
            state.cycle_range(key.code == KeyCode::PageDown);
            if let Some(username) = state.selected.clone() {
                // Panels go back to "loading" for the new range
                state.detail = None;
                state.usage = None;
                refresh_detail_panels(state, fetcher, username);
            }
        }
        KeyCode::Backspace => {
            state.search.pop();
        }
        KeyCode::Char(c) => state.search.push(c),
        _ => {}
    }
    false
}

fn refresh_detail_panels(state: &DashboardState, fetcher: &mut Fetcher, username: String) {
    let range = state.range();
    fetcher.fetch_employee_activity(username.clone(), range);
    fetcher.fetch_employee_stats(username, range);
}
