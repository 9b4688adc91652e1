use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::game::GameState;

use super::app::{Prompt, MENU_ITEMS};

pub fn render_menu(
    frame: &mut Frame,
    state: &GameState,
    menu_index: usize,
    message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Menu items
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, state, chunks[0]);

    let mut lines = Vec::new();
    for (i, item) in MENU_ITEMS.iter().enumerate() {
        if i == menu_index {
            lines.push(Line::from(Span::styled(
                format!("> {item}"),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::from(format!("  {item}")));
        }
    }
    let menu = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Menu"));
    frame.render_widget(menu, chunks[1]);

    render_message(frame, message, chunks[2]);
    render_controls(frame, "↑/↓: Select  |  Enter: Confirm  |  Q: Quit", chunks[3]);
}

pub fn render_prompt(
    frame: &mut Frame,
    state: &GameState,
    prompt: &Prompt,
    input: &str,
    slots: &[String],
    message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Question + input
            Constraint::Min(5),    // Extra context (save slots)
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, state, chunks[0]);

    let question = match prompt {
        Prompt::ResizeRows => "How many rows?",
        Prompt::ResizeCols { .. } => "How many columns?",
        Prompt::WinLength => "How many in a row for a win?",
        Prompt::SaveName => "Save under which name?",
        Prompt::LoadName => "Load which saved board?",
        Prompt::LoadMode => "Continue against the (c)omputer or another huma(n)?",
    };

    let input_line = if matches!(prompt, Prompt::LoadMode) {
        Line::from(question)
    } else {
        Line::from(vec![
            Span::raw(format!("{question} ")),
            Span::styled(
                format!("{input}_"),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ])
    };
    let input_widget = Paragraph::new(input_line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(input_widget, chunks[1]);

    if matches!(prompt, Prompt::LoadName) {
        let lines: Vec<Line> = if slots.is_empty() {
            vec![Line::from("(no saved boards)")]
        } else {
            slots.iter().map(|s| Line::from(s.as_str())).collect()
        };
        let list = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Saved boards"));
        frame.render_widget(list, chunks[2]);
    }

    render_message(frame, message, chunks[3]);
    let controls = if matches!(prompt, Prompt::LoadMode) {
        "C: Computer  |  N: Two players  |  Esc: Back to menu"
    } else {
        "Type a value  |  Enter: Confirm  |  Esc: Back to menu"
    };
    render_controls(frame, controls, chunks[4]);
}

fn render_header(frame: &mut Frame, state: &GameState, area: Rect) {
    let status = format!(
        "{} rows x {} columns  |  {} in a row to win",
        state.rows(),
        state.cols(),
        state.win_length(),
    );
    let header = Paragraph::new(status)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Connect-{}", state.win_length())),
        );
    frame.render_widget(header, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, text: &str, area: Rect) {
    let controls = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));
    frame.render_widget(controls, area);
}
