//! Presentation layer: draws derived state and registers click targets.
//!
//! Purely reads the game state; every user intent goes back through
//! `InputEvent`, so this module stays swappable.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::game::actions;
use crate::game::state::{CaseKind, GameState};
use crate::input::{is_narrow_layout, ClickState};

pub fn render(state: &GameState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(area);

    render_header(f, state, main_chunks[0]);

    if is_narrow_layout(area.width) {
        render_narrow(f, state, main_chunks[1], click_state);
    } else {
        render_wide(f, state, main_chunks[1], click_state);
    }

    render_help(f, main_chunks[2]);

    // Overlay goes last so its click target sits on top.
    render_notice(f, state, area, click_state);
}

fn render_header(f: &mut Frame, state: &GameState, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Case Clicker",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            format!("{} coins", state.balance),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            format!("level {}", state.level),
            Style::default().fg(Color::Green),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(header, area);
}

/// Wide layout: collect button + cases on the left, upgrades + log on the right.
fn render_wide(
    f: &mut Frame,
    state: &GameState,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(5)])
        .split(cols[0]);
    render_collect_button(f, state, left[0], click_state);
    render_cases(f, state, left[1], click_state);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(state.upgrades.len() as u16 + 2),
            Constraint::Min(3),
        ])
        .split(cols[1]);
    render_upgrades(f, state, right[0], click_state);
    render_log(f, state, right[1]);
}

/// Narrow layout: everything stacked, log takes the leftovers.
fn render_narrow(
    f: &mut Frame,
    state: &GameState,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(CaseKind::all().len() as u16 + 2),
            Constraint::Length(state.upgrades.len() as u16 + 2),
            Constraint::Min(3),
        ])
        .split(area);
    render_collect_button(f, state, chunks[0], click_state);
    render_cases(f, state, chunks[1], click_state);
    render_upgrades(f, state, chunks[2], click_state);
    render_log(f, state, chunks[3]);
}

fn render_collect_button(
    f: &mut Frame,
    state: &GameState,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let flashing = state.click_flash > 0;
    let button_style = if flashing {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    };
    let lines = vec![
        Line::from(Span::styled("[ COLLECT ]", button_style)),
        Line::from(Span::styled(
            format!("+{} per click", state.click_power),
            Style::default().fg(Color::Gray),
        )),
    ];
    let button = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Tap to collect "),
        )
        .alignment(Alignment::Center);
    f.render_widget(button, area);

    click_state
        .borrow_mut()
        .add_click_target(area, actions::CLICK_COIN);
}

fn render_cases(
    f: &mut Frame,
    state: &GameState,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let items: Vec<ListItem> = CaseKind::all()
        .iter()
        .map(|kind| {
            let affordable = state.can_afford(kind.cost());
            let opening = state.pending_reveals.iter().any(|r| r.kind == *kind);
            let name_style = if affordable {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let mut spans = vec![
                Span::styled(
                    format!(" [{}] ", kind.key()),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{:<12}", kind.name()), name_style),
                Span::styled(
                    format!(" {:>4} coins ", kind.cost()),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    format!("({})", kind.reward_range()),
                    Style::default().fg(Color::Gray),
                ),
            ];
            if opening {
                spans.push(Span::styled(
                    "  opening...",
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Cases "),
    );
    f.render_widget(list, area);

    let mut cs = click_state.borrow_mut();
    for (i, _) in CaseKind::all().iter().enumerate() {
        cs.add_row_target(area, area.y + 1 + i as u16, actions::OPEN_CASE_BASE + i as u16);
    }
}

fn render_upgrades(
    f: &mut Frame,
    state: &GameState,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut items: Vec<ListItem> = Vec::new();
    let mut cs = click_state.borrow_mut();
    let mut row = area.y + 1;
    let mut letter = b'a';

    for (slot, upgrade) in state.upgrades.iter().enumerate() {
        if upgrade.purchased {
            items.push(ListItem::new(Line::from(Span::styled(
                format!("     {:<14} owned", upgrade.name),
                Style::default().fg(Color::DarkGray),
            ))));
        } else {
            let affordable = state.can_afford(upgrade.cost);
            let name_style = if affordable {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            items.push(ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" [{}] ", letter as char),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{:<14}", upgrade.name), name_style),
                Span::styled(
                    format!(" {:>4} coins", upgrade.cost),
                    Style::default().fg(Color::Yellow),
                ),
            ])));
            cs.add_row_target(area, row, actions::BUY_UPGRADE_BASE + slot as u16);
            letter += 1;
        }
        row += 1;
    }
    drop(cs);

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Upgrades "),
    );
    f.render_widget(list, area);
}

fn render_log(f: &mut Frame, state: &GameState, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = state.log.len().saturating_sub(visible);

    let lines: Vec<Line> = state.log[start..]
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(&entry.text, style))
        })
        .collect();

    let log = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Log "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(log, area);
}

fn render_help(f: &mut Frame, area: Rect) {
    let help = Paragraph::new(Line::from(Span::styled(
        "[Space] Collect   [1-3] Open case   [A-F] Buy upgrade",
        Style::default().fg(Color::DarkGray),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(help, area);
}

/// Draw the front of the notice queue as a centered overlay.
fn render_notice(
    f: &mut Frame,
    state: &GameState,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let Some(message) = state.current_notice() else {
        return;
    };

    let width = (message.len() as u16 + 6).clamp(24, area.width.saturating_sub(4));
    let rect = centered_rect(area, width, 5);

    f.render_widget(Clear, rect);
    let notice = Paragraph::new(vec![
        Line::from(Span::styled(
            message,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[tap to close]",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)),
    )
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(notice, rect);

    click_state
        .borrow_mut()
        .add_click_target(rect, actions::CLOSE_NOTICE);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}
