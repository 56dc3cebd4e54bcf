use crate::state::{DashboardState, Tab};
use crate::view::{self, DetailView, UsageView};
use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Row, Table, Tabs,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

fn status_color(status: staff_monitor_common::EmployeeStatus) -> Color {
    match status {
        staff_monitor_common::EmployeeStatus::Active => Color::Green,
        staff_monitor_common::EmployeeStatus::Idle => Color::Yellow,
        staff_monitor_common::EmployeeStatus::Offline => Color::DarkGray,
    }
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        if out.width() + 1 >= max_width {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}

fn placeholder(text: &str, title: &str) -> Paragraph<'static> {
    Paragraph::new(text.to_string())
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
}

pub fn render(f: &mut Frame, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Summary counters
            Constraint::Length(1), // Tab bar
            Constraint::Min(0),    // Active pane
            Constraint::Length(1), // Key hints
        ])
        .split(f.size());

    render_header(f, chunks[0], state);
    render_summary(f, chunks[1], state);
    render_tabs(f, chunks[2], state);
    match state.tab {
        Tab::Employees => render_employees_pane(f, chunks[3], state),
        Tab::Activity => render_activity_pane(f, chunks[3], state),
    }
    render_hints(f, chunks[4]);
}

fn render_header(f: &mut Frame, area: Rect, state: &DashboardState) {
    let counts = view::summary(&state.employees);
    let header = Line::from(vec![
        Span::styled(
            " Staff Monitor ",
            Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan),
        ),
        Span::raw(format!("| {} ", state.clock.format("%d.%m.%Y %H:%M:%S"))),
        Span::styled(
            format!("| {} online", counts.active),
            Style::default().fg(Color::Green),
        ),
    ]);
    f.render_widget(Paragraph::new(header), area);
}

fn render_summary(f: &mut Frame, area: Rect, state: &DashboardState) {
    let counts = view::summary(&state.employees);
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let counters = [
        ("Total", counts.total, Color::White),
        ("Active", counts.active, Color::Green),
        ("Idle", counts.idle, Color::Yellow),
        ("Offline", counts.offline, Color::DarkGray),
    ];
    for (i, (label, value, color)) in counters.iter().enumerate() {
        let widget = Paragraph::new(value.to_string())
            .style(Style::default().fg(*color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(*label));
        f.render_widget(widget, cells[i]);
    }
}

fn render_tabs(f: &mut Frame, area: Rect, state: &DashboardState) {
    let tabs = Tabs::new(vec!["Employees", "Recent activity"])
        .select(state.tab.index())
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    f.render_widget(tabs, area);
}

fn render_employees_pane(f: &mut Frame, area: Rect, state: &DashboardState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_employee_list(f, columns[0], state);

    let panels = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(columns[1]);
    render_detail_table(f, panels[0], state);
    render_usage_chart(f, panels[1], state);
}

fn render_employee_list(f: &mut Frame, area: Rect, state: &DashboardState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let filter_line = Line::from(vec![
        Span::raw(" search: "),
        Span::styled(
            if state.search.is_empty() {
                "-".to_string()
            } else {
                state.search.clone()
            },
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(format!(
            "  status: {}  range: {}h",
            state.status_filter.label(),
            state.range_hours()
        )),
    ]);
    f.render_widget(Paragraph::new(filter_line), sections[0]);

    let rows = view::employee_rows(state);
    let width = sections[1].width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let marker = if row.selected { "▶ " } else { "  " };
            let text = truncate(
                &format!("{}{} — {}", marker, row.username, row.computer_name),
                width.saturating_sub(10),
            );
            let line = Line::from(vec![
                Span::raw(text),
                Span::styled(
                    format!(" [{}]", row.status.label()),
                    Style::default().fg(status_color(row.status)),
                ),
            ]);
            if row.selected {
                ListItem::new(line).style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                ListItem::new(line)
            }
        })
        .collect();

    let title = format!("Employees ({})", rows.len());
    if items.is_empty() {
        f.render_widget(placeholder("No matching employees", &title), sections[1]);
        return;
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let cursor = state.cursor.min(rows.len().saturating_sub(1));
    let mut list_state = ListState::default().with_selected(Some(cursor));
    f.render_stateful_widget(list, sections[1], &mut list_state);
}

fn render_detail_table(f: &mut Frame, area: Rect, state: &DashboardState) {
    let title = match state.selected.as_deref() {
        Some(username) => format!("Activity — {}", username),
        None => "Activity".to_string(),
    };

    let rows = match view::detail_view(state) {
        DetailView::NoSelection => {
            f.render_widget(placeholder("Select an employee from the list", &title), area);
            return;
        }
        DetailView::Loading => {
            f.render_widget(placeholder("Loading…", &title), area);
            return;
        }
        DetailView::NoData => {
            f.render_widget(placeholder("No data for the selected period", &title), area);
            return;
        }
        DetailView::Rows(rows) => rows,
    };

    let width = area.width as usize;
    let table_rows: Vec<Row> = rows
        .into_iter()
        .map(|row| {
            Row::new(vec![
                row.time,
                truncate(&row.window, width * 2 / 5),
                row.process,
                row.duration,
            ])
        })
        .collect();

    let table = Table::new(
        table_rows,
        [
            Constraint::Length(19),
            Constraint::Percentage(40),
            Constraint::Percentage(25),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec!["Time", "Window", "Process", "Duration"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(table, area);
}

fn render_usage_chart(f: &mut Frame, area: Rect, state: &DashboardState) {
    let title = "Application usage";

    let bars = match view::usage_view(state) {
        UsageView::NoSelection => {
            f.render_widget(placeholder("Select an employee from the list", title), area);
            return;
        }
        UsageView::Loading => {
            f.render_widget(placeholder("Loading…", title), area);
            return;
        }
        UsageView::NoData => {
            f.render_widget(placeholder("No stats for the selected period", title), area);
            return;
        }
        UsageView::Bars(bars) => bars,
    };

    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    // One gauge line per application, top apps first, as many as fit
    let visible = bars.len().min(inner.height as usize);
    if visible == 0 {
        return;
    }
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); visible])
        .split(inner);

    for (bar, slot) in bars.into_iter().take(visible).zip(slots.iter()) {
        let label = format!(
            "{} — {}",
            truncate(&bar.app, inner.width.saturating_sub(14) as usize),
            bar.duration
        );
        let gauge = Gauge::default()
            .percent(bar.percent)
            .label(label)
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black));
        f.render_widget(gauge, *slot);
    }
}

fn render_activity_pane(f: &mut Frame, area: Rect, state: &DashboardState) {
    let rows = view::recent_rows(&state.activities);
    if rows.is_empty() {
        f.render_widget(placeholder("No activity data", "Recent activity"), area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = rows
        .into_iter()
        .map(|row| {
            let text = Text::from(vec![
                Line::from(vec![
                    Span::styled(
                        row.username,
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {}", row.time),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(truncate(&row.window, width)),
                Line::from(Span::styled(
                    format!("process: {} ({})", row.process, row.duration),
                    Style::default().fg(Color::DarkGray),
                )),
            ]);
            ListItem::new(text)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Recent activity"));
    f.render_widget(list, area);
}

fn render_hints(f: &mut Frame, area: Rect) {
    let hints = Paragraph::new(
        " Tab panes | ↑↓ move | Enter select | ←→ status filter | PgUp/PgDn range | type to search | Esc clear/quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hints, area);
}
