use std::io;
use std::time::Duration;

use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Terminal,
};

use crate::board::{Board, Card, Lanes};
use crate::project::{DueFlag, Status};
use crate::storage::Storage;

/// Lane selection and in-lane card selection. Pure view state; the board
/// knows nothing about it.
#[derive(Debug, Default)]
struct Selection {
    lane: usize,
    card: usize,
}

pub fn run_app<B: Backend, S: Storage>(
    terminal: &mut Terminal<B>,
    board: &mut Board<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut selection = Selection::default();

    loop {
        let today = Local::now().date_naive();

        {
            let lanes = board.lanes(today);
            clamp_selection(&mut selection, &lanes);

            terminal.draw(|f| {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints(vec![Constraint::Length(1), Constraint::Min(0)])
                    .split(f.area());

                let clock = Local::now().format("%b %d, %Y at %I:%M:%S %p");
                f.render_widget(
                    Paragraph::new(format!(
                        " {clock}   a: add  d: delete  \u{2190}\u{2192}: lane  \u{2191}\u{2193}: card  Enter/Backspace: move  q: quit"
                    )),
                    rows[0],
                );

                let chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints(vec![
                        Constraint::Percentage(33),
                        Constraint::Percentage(33),
                        Constraint::Percentage(34),
                    ])
                    .split(rows[1]);

                for (i, status) in Status::LANES.iter().enumerate() {
                    let cards = lanes.lane(status);
                    let items: Vec<ListItem> = cards
                        .iter()
                        .enumerate()
                        .map(|(j, card)| card_item(card, selection.lane == i && selection.card == j))
                        .collect();

                    let list = List::new(items).block(
                        Block::default()
                            .title(format!("{} ({})", status.title(), cards.len()))
                            .borders(Borders::ALL)
                            .border_style(if selection.lane == i {
                                Style::default().fg(Color::Cyan)
                            } else {
                                Style::default()
                            }),
                    );

                    f.render_widget(list, chunks[i]);
                }
            })?;
        }

        // Poll with a timeout so the clock line keeps ticking.
        if !event::poll(Duration::from_secs(1))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') => return Ok(()),
            KeyCode::Char('a') => {
                if let Some((name, kind, due_date)) = prompt_new_project() {
                    board.create_project(name, kind, due_date)?;
                }
                terminal.clear()?;
            }
            KeyCode::Char('d') => {
                if let Some(id) = selected_id(board, &selection, today) {
                    board.delete_project(&id)?;
                }
            }
            KeyCode::Left => {
                if selection.lane > 0 {
                    selection.lane -= 1;
                    selection.card = 0;
                }
            }
            KeyCode::Right => {
                if selection.lane < Status::LANES.len() - 1 {
                    selection.lane += 1;
                    selection.card = 0;
                }
            }
            KeyCode::Up => {
                selection.card = selection.card.saturating_sub(1);
            }
            KeyCode::Down => {
                let len = board.lanes(today).lane(&Status::LANES[selection.lane]).len();
                if selection.card + 1 < len {
                    selection.card += 1;
                }
            }
            KeyCode::Enter => {
                // Move the selected card one lane to the right.
                if selection.lane + 1 < Status::LANES.len() {
                    if let Some(id) = selected_id(board, &selection, today) {
                        board.move_project(&id, Status::LANES[selection.lane + 1].clone())?;
                    }
                }
            }
            KeyCode::Backspace => {
                if selection.lane > 0 {
                    if let Some(id) = selected_id(board, &selection, today) {
                        board.move_project(&id, Status::LANES[selection.lane - 1].clone())?;
                    }
                }
            }
            _ => {}
        }
    }
}

fn selected_id<S: Storage>(
    board: &Board<S>,
    selection: &Selection,
    today: chrono::NaiveDate,
) -> Option<String> {
    board
        .lanes(today)
        .lane(&Status::LANES[selection.lane])
        .get(selection.card)
        .map(|card| card.project.id.clone())
}

fn clamp_selection(selection: &mut Selection, lanes: &Lanes<'_>) {
    let len = lanes.lane(&Status::LANES[selection.lane]).len();
    selection.card = selection.card.min(len.saturating_sub(1));
}

/// One card: name header, type and due-date lines, tinted yellow when due
/// today and red when overdue (the original's bg-warning / bg-danger).
fn card_item<'a>(card: &Card<'a>, selected: bool) -> ListItem<'a> {
    let tint = match card.flag {
        DueFlag::DueToday => Style::default().bg(Color::Yellow).fg(Color::Black),
        DueFlag::Overdue => Style::default().bg(Color::Red).fg(Color::White),
        DueFlag::None => Style::default(),
    };
    let mut header = tint.add_modifier(Modifier::BOLD);
    if selected {
        header = header.add_modifier(Modifier::REVERSED);
    }

    let due = if card.project.due_date.is_empty() {
        "-".to_string()
    } else {
        card.project.due_date.clone()
    };

    ListItem::new(vec![
        Line::from(Span::styled(card.project.name.clone(), header)),
        Line::from(Span::styled(format!("  Type: {}", card.project.kind), tint)),
        Line::from(Span::styled(format!("  Due Date: {due}"), tint)),
        Line::from(""),
    ])
}

/// Drops out of raw mode for a plain three-field form on stdin, the same
/// way the original's submit form collects name, type, and due date. Name
/// and type are required; an empty answer cancels the add.
fn prompt_new_project() -> Option<(String, String, String)> {
    let name = prompt("Project name")?;
    if name.is_empty() {
        return None;
    }
    let kind = prompt("Project type")?;
    if kind.is_empty() {
        return None;
    }
    let due_date = prompt("Due date (DD/MM/YYYY, blank for none)")?;
    Some((name, kind, due_date))
}

fn prompt(message: &str) -> Option<String> {
    disable_raw_mode().ok();
    println!("{}", message);
    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_ok() {
        enable_raw_mode().ok();
        Some(input.trim().to_string())
    } else {
        enable_raw_mode().ok();
        None
    }
}
