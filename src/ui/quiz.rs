use crate::engine::{self, AnswerMode, Phase};
use crate::models::{ArticleChoice, GameKind, WordEntry, PLURAL_MARKER};
use crate::session::QuizSession;
use crate::ui::key_hint;
use crate::ui::layout::calculate_quiz_chunks;
use crate::utils::width_before;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

pub fn draw_quiz(f: &mut Frame, session: &QuizSession, personal_best: Option<i64>) {
    let layout = calculate_quiz_chunks(f.area());
    let state = &session.state;

    let mut header_text = format!(
        "{} - {} - Points: {}",
        state.config.game.title(),
        state.config.player_name,
        state.points
    );
    if state.correct_streak > 1 {
        header_text.push_str(&format!("  Streak: {}", state.correct_streak));
    }
    if let Some(best) = personal_best {
        header_text.push_str(&format!("  Best: {}", best));
    }
    let header = Paragraph::new(header_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green))
        .percent(state.progress_percent())
        .label(format!(
            "Question {} / {}",
            state.question_number(),
            state.len()
        ));
    f.render_widget(progress, layout.progress_area);

    let mut prompt_text = Text::default();
    prompt_text.push_line(Line::from(Span::styled(
        state.prompt().unwrap_or_default().to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    if state.config.answer_mode == AnswerMode::Article
        && let Some(entry) = state.current_word()
    {
        prompt_text.push_line(Line::from(Span::styled(
            success_rate_label(entry),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if let Some(hint) = state.hint() {
        prompt_text.push_line(Line::from(""));
        prompt_text.push_line(Line::from(Span::styled(
            format!("Hint: {}...", hint),
            Style::default().fg(Color::DarkGray),
        )));
    }
    let prompt_title = match state.config.game {
        GameKind::Articles => "Which article?",
        GameKind::Vocabulary => "Translate",
    };
    let prompt = Paragraph::new(prompt_text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(prompt_title));
    f.render_widget(prompt, layout.prompt_area);

    let answered = matches!(state.phase(), Phase::InProgress { answered: true });
    match state.config.answer_mode {
        AnswerMode::Article => draw_article_choices(f, layout.answer_area, answered),
        AnswerMode::FreeText(_) => {
            let input = Paragraph::new(if session.input_buffer.is_empty() && !answered {
                "[Type your answer here...]"
            } else {
                session.input_buffer.as_str()
            })
            .block(Block::default().borders(Borders::ALL).title("Your Answer"));
            f.render_widget(input, layout.answer_area);

            if !answered {
                let col = width_before(&session.input_buffer, session.cursor_position) as u16;
                f.set_cursor_position((layout.answer_area.x + 1 + col, layout.answer_area.y + 1));
            }
        }
    }

    let mut feedback_lines = Vec::new();
    match state.last_answer_correct {
        Some(true) => feedback_lines.push(Line::from(Span::styled(
            "Correct!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))),
        Some(false) => {
            let expected = state.expected_answer().unwrap_or_default();
            feedback_lines.push(Line::from(Span::styled(
                "Wrong!",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            feedback_lines.push(Line::from(format!("Correct answer: {}", expected)));
        }
        None => {}
    }
    if answered
        && let Some(meaning) = state
            .current_word()
            .and_then(|entry| meaning_line(entry, state.config.answer_mode))
    {
        feedback_lines.push(Line::from(meaning));
    }
    let feedback = Paragraph::new(feedback_lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(feedback, layout.feedback_area);

    let mut help_spans = Vec::new();
    if answered {
        help_spans.extend([key_hint("Enter"), Span::from(" Next  ")]);
    } else if state.config.answer_mode == AnswerMode::Article {
        help_spans.extend([key_hint("1-4"), Span::from(" Choose  ")]);
    } else {
        help_spans.extend([key_hint("Enter"), Span::from(" Submit  ")]);
    }
    help_spans.extend([
        key_hint("Esc"),
        Span::from(" Quit to Menu  "),
        key_hint("Ctrl+C"),
        Span::from(" Exit App"),
    ]);
    let help = Paragraph::new(Line::from(help_spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

/// Historical success rate shown under the article prompt.
pub(crate) fn success_rate_label(entry: &WordEntry) -> String {
    format!("(Success Rate: {:.2}%)", entry.success_rate)
}

/// The translation reminder shown once a question is answered. Plural
/// entries and words without a translation have none.
pub(crate) fn meaning_line(entry: &WordEntry, mode: AnswerMode) -> Option<String> {
    let translation = entry.translation.trim();
    if translation.is_empty() || translation == PLURAL_MARKER {
        return None;
    }
    Some(match mode {
        AnswerMode::FreeText(engine::Direction::TranslationToWord) => {
            format!("{} means \"{}\" in German.", translation, entry.word)
        }
        AnswerMode::Article | AnswerMode::FreeText(engine::Direction::WordToTranslation) => {
            format!("{} means \"{}\" in English.", entry.word, translation)
        }
    })
}

fn draw_article_choices(f: &mut Frame, area: ratatui::layout::Rect, answered: bool) {
    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (i, choice) in ArticleChoice::ALL.iter().enumerate() {
        let style = if answered {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        };
        let button = Paragraph::new(format!("[{}] {}", i + 1, choice.label()))
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(button, buttons[i]);
    }
}

pub fn draw_loading(f: &mut Frame, game: GameKind) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(f.area());

    let title = Paragraph::new(game.title())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new(Line::from(vec![
        Span::from("Loading words...  "),
        key_hint("Esc"),
        Span::from(" Cancel"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Quit Game")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("Return to the main menu? Your score will not be saved.")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Return to Menu)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Continue Quiz)  "),
        key_hint("Ctrl+C"),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
