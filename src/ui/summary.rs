use crate::session::QuizSession;
use crate::ui::key_hint;
use crate::ui::layout::calculate_summary_chunks;
use crate::utils::truncate_string;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_summary(f: &mut Frame, session: &QuizSession, personal_best: Option<i64>) {
    let layout = calculate_summary_chunks(f.area());
    let state = &session.state;

    let title = Paragraph::new(format!(
        "Game Over - {}",
        state.config.game.title()
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let mut score_text = Text::default();
    if let Some(error) = &session.fetch_error {
        score_text.push_line(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    } else if state.is_empty() {
        score_text.push_line(Line::from(Span::styled(
            "No words were available for this game.",
            Style::default().fg(Color::Yellow),
        )));
    }
    score_text.push_line(Line::from(vec![
        Span::from(format!("{}, your final score: ", state.config.player_name)),
        Span::styled(
            state.points.to_string(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    score_text.push_line(Line::from(format!(
        "Correct answers: {} / {}",
        state.correct_count(),
        state.len()
    )));
    if let Some(best) = personal_best {
        let note = if state.points > best {
            format!("New personal best! (previous {})", best)
        } else {
            format!("Personal best: {}", best)
        };
        score_text.push_line(Line::from(note));
    }
    let score = Paragraph::new(score_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Score"));
    f.render_widget(score, layout.score_area);

    let mut outcomes_text = Text::default();
    for (i, outcome) in state.outcomes.iter().enumerate() {
        let (mark, color) = if outcome.correct {
            ("[✓]", Color::Green)
        } else {
            ("[✗]", Color::Red)
        };
        outcomes_text.push_line(Line::from(vec![
            Span::styled(mark, Style::default().fg(color)),
            Span::from(format!(
                " {}. {} ({:+})",
                i + 1,
                truncate_string(&outcome.word, 40),
                outcome.points_delta
            )),
        ]));
        if !outcome.correct {
            outcomes_text.push_line(Line::from(format!(
                "    You: {}  Correct: {}",
                truncate_string(&outcome.given, 30),
                outcome.expected
            )));
        }
    }
    let outcomes = Paragraph::new(outcomes_text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Answers"));
    f.render_widget(outcomes, layout.outcomes_area);

    let help = Paragraph::new(Line::from(vec![
        key_hint("r"),
        Span::from(" Play Again  "),
        key_hint("m"),
        Span::from(" Main Menu  "),
        key_hint("Esc"),
        Span::from(" Quit"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
