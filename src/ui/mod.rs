pub mod layout;
mod menu;
mod quiz;
mod sessions;
mod statistics;
mod summary;

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

pub use layout::{calculate_quiz_chunks, calculate_statistics_chunks, calculate_summary_chunks};
pub use menu::{draw_home, draw_setup};
pub use quiz::{draw_loading, draw_quit_confirmation, draw_quiz};
pub use sessions::{format_session_date, format_session_item};
pub use statistics::draw_statistics;
pub use summary::draw_summary;

/// A key name styled for the help bars.
pub(crate) fn key_hint(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}
