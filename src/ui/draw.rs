use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use super::helpers::{format_length, numbered_title, popup_area, status_style};
use crate::session::{InputMode, Phase, SessionView};

/// Rows used by the progress header.
const HEADER_HEIGHT: u16 = 3;
/// Rows used by the guess box.
const INPUT_HEIGHT: u16 = 3;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// Draw one full screen for `view`.
pub(crate) fn draw_session(frame: &mut Frame, view: &SessionView) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    draw_header(frame, chunks[0], view);
    match view.mode {
        InputMode::LineBuffered => draw_numbered_titles(frame, chunks[1], view),
        InputMode::CharStream => draw_candidates(frame, chunks[1], view),
    }
    draw_input(frame, chunks[2], view);
    draw_footer(frame, chunks[3], view);

    if matches!(view.phase, Phase::Done | Phase::Terminated) {
        draw_game_over(frame, area, view);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, view: &SessionView) {
    let playing = match (view.playing, view.clip_length, view.mode) {
        (true, Some(length), _) => format!("Playing audio ({})...", format_length(length)),
        (true, None, _) => "Playing audio...".to_string(),
        (false, _, InputMode::CharStream) => "Press space to hear it again.".to_string(),
        (false, _, InputMode::LineBuffered) => "Enter r to hear it again.".to_string(),
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(view.progress(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(playing, Style::default().fg(Color::DarkGray)),
    ])];
    if let Some(answer) = &view.answer {
        lines.push(Line::from(Span::styled(
            format!("Debug: Correct answer is {answer}"),
            Style::default().fg(Color::Magenta),
        )));
    }

    let header = Paragraph::new(lines).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn draw_numbered_titles(frame: &mut Frame, area: Rect, view: &SessionView) {
    let items: Vec<ListItem> = view
        .titles
        .iter()
        .enumerate()
        .map(|(index, title)| ListItem::new(numbered_title(index + 1, title)))
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("List of songs"),
    );
    frame.render_widget(list, area);
}

fn draw_candidates(frame: &mut Frame, area: Rect, view: &SessionView) {
    let block = Block::default().borders(Borders::ALL).title("Matches");

    if view.buffer.is_empty() {
        let hint = Paragraph::new(format!(
            "Start typing the song title. {} songs to choose from.",
            view.titles.len()
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let highlight = match view.candidates.len() {
        1 => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().add_modifier(Modifier::BOLD),
    };
    let items: Vec<ListItem> = view
        .candidates
        .iter()
        .map(|title| ListItem::new(Line::from(Span::styled(title.clone(), highlight))))
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}

fn draw_input(frame: &mut Frame, area: Rect, view: &SessionView) {
    let (title, prompt) = match view.mode {
        InputMode::LineBuffered => ("Choice", "Enter your choice: "),
        InputMode::CharStream => ("Guess", "> "),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let paragraph =
        Paragraph::new(Span::raw(format!("{prompt}{}", view.buffer))).block(block.clone());
    frame.render_widget(paragraph, area);

    if view.phase == Phase::Playing {
        let inner = block.inner(area);
        let cursor_x = inner.x + prompt.len() as u16 + view.buffer.chars().count() as u16;
        frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, view: &SessionView) {
    let block = Block::default().borders(Borders::TOP);
    frame.render_widget(block.clone(), area);
    let inner = block.inner(area);

    let status_line = match &view.status {
        Some(status) => Line::from(vec![Span::styled(
            status.text.clone(),
            status_style(status.kind),
        )]),
        None => Line::from(""),
    };

    let paragraph = Paragraph::new(vec![status_line, footer_instructions(view.mode)])
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

fn footer_instructions(mode: InputMode) -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    match mode {
        InputMode::CharStream => Line::from(vec![
            Span::styled("[a-z]", key_style),
            Span::raw(" Guess   "),
            Span::styled("[Space]", key_style),
            Span::raw(" Replay   "),
            Span::styled("[Enter]", key_style),
            Span::raw(" Exact title   "),
            Span::styled("[Tab]", key_style),
            Span::raw(" Skip   "),
            Span::styled("[?]", key_style),
            Span::raw(" Answer   "),
            Span::styled("[Esc]", key_style),
            Span::raw(" Quit"),
        ]),
        InputMode::LineBuffered => Line::from(vec![
            Span::styled("[number]", key_style),
            Span::raw(" Guess   "),
            Span::styled("[r]", key_style),
            Span::raw(" Replay   "),
            Span::styled("[s]", key_style),
            Span::raw(" Skip   "),
            Span::styled("[a]", key_style),
            Span::raw(" Answer   "),
            Span::styled("[q]", key_style),
            Span::raw(" Quit"),
        ]),
    }
}

fn draw_game_over(frame: &mut Frame, area: Rect, view: &SessionView) {
    let popup = popup_area(area, 60, 5);
    frame.render_widget(Clear, popup);

    let (headline, style) = match view.phase {
        Phase::Done => (
            "Congratulations! You've guessed all the tunes correctly!",
            Style::default().fg(Color::Green),
        ),
        _ => ("Thanks for playing!", Style::default()),
    };
    let text = vec![
        Line::from(Span::styled(headline, style.add_modifier(Modifier::BOLD))),
        Line::from(format!("{} of {} answered correctly.", view.correct, view.total)),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Game over"));
    frame.render_widget(paragraph, popup);
}
