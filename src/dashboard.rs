use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame, Terminal,
};
use std::{io, time::Duration};

use crate::pipeline::RankedRow;
use crate::qualify::{clip, Qualification};

/// Moves the selection one row, wrapping at both ends.
fn step(selected: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let next = match selected {
        None => 0,
        Some(i) if forward => (i + 1) % len,
        Some(0) => len - 1,
        Some(i) => i - 1,
    };
    Some(next)
}

// `sim` is always clipped for display; with a qualification every score is.
fn row_cells(rank: usize, row: &RankedRow, qualification: Option<&Qualification>) -> Vec<String> {
    let shown = match qualification {
        Some(_) => clip(row),
        None => RankedRow {
            sim: row.sim.clamp(0.0, 1.0),
            ..row.clone()
        },
    };
    let mut cells = vec![
        format!("{}", rank + 1),
        shown.candidate,
        format!("{:.3}", shown.skills),
        format!("{:.3}", shown.sim),
        format!("{:.3}", shown.exp_score),
        format!("{:.2}", shown.exp_years),
        format!("{:.2}", shown.exp_target),
        format!("{:.3}", shown.total),
    ];
    if let Some(q) = qualification {
        cells.push(if q.is_qualified(row) { "yes" } else { "no" }.to_string());
    }
    cells
}

/// Interactive table of ranked candidates. Up/Down (or k/j) to move, q or Esc to quit.
pub fn run_dashboard(
    rows: &[RankedRow],
    title: &str,
    qualification: Option<&Qualification>,
) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut table_state = TableState::default();
    table_state.select(step(None, rows.len(), true));

    let result = event_loop(&mut terminal, rows, title, qualification, &mut table_state);

    // Restore terminal even when drawing failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    rows: &[RankedRow],
    title: &str,
    qualification: Option<&Qualification>,
    table_state: &mut TableState,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, rows, title, qualification, table_state))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Down | KeyCode::Char('j') => {
                        table_state.select(step(table_state.selected(), rows.len(), true));
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        table_state.select(step(table_state.selected(), rows.len(), false));
                    }
                    _ => {}
                }
            }
        }
    }
}

fn ui(
    f: &mut Frame,
    rows: &[RankedRow],
    title: &str,
    qualification: Option<&Qualification>,
    table_state: &mut TableState,
) {
    let rects = Layout::default()
        .constraints([Constraint::Percentage(100)].as_ref())
        .margin(1)
        .split(f.size());

    let selected_style = Style::default().add_modifier(Modifier::REVERSED).fg(Color::Yellow);
    let normal_style = Style::default().fg(Color::White);
    let mut headers = vec![
        "#", "Candidate", "Skills", "Sim", "Exp score", "Exp years", "Exp target", "Total",
    ];
    if qualification.is_some() {
        headers.push("Qualified");
    }
    let header_cells = headers
        .into_iter()
        .map(|h| Cell::from(h).style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells)
        .style(normal_style)
        .height(1)
        .bottom_margin(1);

    let table_rows = rows.iter().enumerate().map(|(i, item)| {
        let style = match qualification {
            Some(q) if !q.is_qualified(item) => Style::default().fg(Color::DarkGray),
            Some(_) => Style::default().fg(Color::Green),
            None => normal_style,
        };
        Row::new(row_cells(i, item, qualification).into_iter().map(Cell::from)).style(style)
    });

    let mut col_widths = vec![
        Constraint::Length(4),  // Rank
        Constraint::Min(20),    // Candidate
        Constraint::Length(8),  // Skills
        Constraint::Length(8),  // Sim
        Constraint::Length(10), // Exp score
        Constraint::Length(10), // Exp years
        Constraint::Length(11), // Exp target
        Constraint::Length(8),  // Total
    ];
    if qualification.is_some() {
        col_widths.push(Constraint::Length(10));
    }

    let table = Table::new(table_rows, col_widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(format!(" {title} ")))
        .highlight_style(selected_style)
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, rects[0], table_state);
}
