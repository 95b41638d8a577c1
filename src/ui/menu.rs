use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{SetupField, SetupForm, HOME_ENTRIES};
use crate::db::history::SessionSummary;
use crate::ui::key_hint;
use crate::ui::sessions::format_session_item;

fn draw_panel_header(area: Rect, title: &str, f: &mut Frame) {
    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Left)
        .block(Block::default());

    f.render_widget(header, area);
}

pub fn draw_home(f: &mut Frame, selected_index: usize, history: &[SessionSummary], api_url: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(HOME_ENTRIES.len() as u16 + 3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(f.area());

    let title = Paragraph::new(format!("Wortquiz v{}", env!("CARGO_PKG_VERSION")))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let games_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(chunks[1]);
    draw_panel_header(games_chunks[0], "Games", f);

    let items: Vec<ListItem> = HOME_ENTRIES
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if i == selected_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if i == selected_index { "> " } else { "  " };
            ListItem::new(format!("{}{}", marker, entry.label())).style(style)
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(list, games_chunks[1]);

    let history_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(chunks[2]);
    draw_panel_header(history_chunks[0], "Recent Sessions", f);

    let history_items: Vec<ListItem> = if history.is_empty() {
        vec![ListItem::new("No past sessions").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        history
            .iter()
            .map(|s| ListItem::new(format_session_item(s)))
            .collect()
    };
    let history_list = List::new(history_items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(history_list, history_chunks[1]);

    let footer_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[3]);

    let api_status = Paragraph::new(vec![Line::from(api_url.to_string())])
        .style(Style::default().fg(Color::Green))
        .block(Block::default().borders(Borders::ALL).title("Server"));
    f.render_widget(api_status, footer_chunks[0]);

    let help = Paragraph::new(vec![Line::from(vec![
        key_hint("↑/↓"),
        Span::from(" Navigate  "),
        key_hint("Enter"),
        Span::from(" Select  "),
        key_hint("Esc/Ctrl+C"),
        Span::from(" Quit"),
    ])])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, footer_chunks[1]);
}

fn field_line(label: &str, value: String, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let marker = if focused { "> " } else { "  " };
    Line::from(vec![
        Span::styled(format!("{}{:<12}", marker, label), label_style),
        Span::from(value),
    ])
}

pub fn draw_setup(f: &mut Frame, form: &SetupForm) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(9),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new(form.game.title())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let mut lines = vec![
        field_line(
            "Name",
            if form.player_name.is_empty() {
                "[Type your name...]".to_string()
            } else {
                form.player_name.clone()
            },
            form.focused == SetupField::PlayerName,
        ),
        field_line(
            "Words",
            format!("< {} >", form.word_count),
            form.focused == SetupField::WordCount,
        ),
    ];
    if form.uses_difficulty() {
        lines.push(field_line(
            "Difficulty",
            format!("< {} >", form.difficulty),
            form.focused == SetupField::Difficulty,
        ));
        lines.push(field_line(
            "Direction",
            form.direction.label().to_string(),
            form.focused == SetupField::Direction,
        ));
        lines.push(field_line(
            "Hints",
            if form.hint_enabled { "On" } else { "Off" }.to_string(),
            form.focused == SetupField::Hint,
        ));
    }
    lines.push(field_line(
        "Scoring",
        form.scoring.label().to_string(),
        form.focused == SetupField::Scoring,
    ));

    let fields = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Setup"));
    f.render_widget(fields, chunks[1]);

    if form.focused == SetupField::PlayerName {
        let name_width = crate::utils::width_before(&form.player_name, usize::MAX) as u16;
        f.set_cursor_position((chunks[1].x + 1 + 14 + name_width, chunks[1].y + 1));
    }

    let status = match &form.error {
        Some(error) => Paragraph::new(error.as_str()).style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        None => Paragraph::new("Press Enter to start").style(Style::default().fg(Color::DarkGray)),
    }
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[2]);

    let help = Paragraph::new(vec![Line::from(vec![
        key_hint("Tab/↑/↓"),
        Span::from(" Field  "),
        key_hint("←/→"),
        Span::from(" Change  "),
        key_hint("Enter"),
        Span::from(" Start  "),
        key_hint("Esc"),
        Span::from(" Back"),
    ])])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);
}
