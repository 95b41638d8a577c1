use crate::app::StatisticsView;
use crate::stats::{chart_bars, leaderboard};
use crate::ui::key_hint;
use crate::ui::layout::calculate_statistics_chunks;
use crate::utils::truncate_string;
use ratatui::{
    layout::{Alignment, Constraint},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Paragraph, Row, Table},
    Frame,
};

const NAME_WIDTH: usize = 16;

pub fn draw_statistics(f: &mut Frame, view: &StatisticsView) {
    let layout = calculate_statistics_chunks(f.area());

    let filter = view.filter.map(|g| g.title()).unwrap_or("All Games");
    let header = Paragraph::new(format!("Average Scores - {}", filter))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let rows = leaderboard(&view.records, view.filter);

    if view.loading || view.error.is_some() || rows.is_empty() {
        let (message, color) = if view.loading {
            ("Loading scores...".to_string(), Color::Yellow)
        } else if let Some(error) = &view.error {
            (error.clone(), Color::Red)
        } else {
            ("No scores yet.".to_string(), Color::DarkGray)
        };
        let body = Paragraph::new(message)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(body, layout.table_area.union(layout.chart_area));
    } else {
        let table_rows: Vec<Row> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                Row::new(vec![
                    format!("{}", i + 1),
                    truncate_string(&row.player, NAME_WIDTH),
                    row.average_display(),
                    row.games_played.to_string(),
                    format!("{}", row.best),
                ])
            })
            .collect();
        let table = Table::new(
            table_rows,
            [
                Constraint::Length(3),
                Constraint::Length(NAME_WIDTH as u16),
                Constraint::Length(8),
                Constraint::Length(6),
                Constraint::Length(6),
            ],
        )
        .header(
            Row::new(vec!["#", "Player", "Average", "Games", "Best"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title("Leaderboard"));
        f.render_widget(table, layout.table_area);

        let bars = chart_bars(&rows);
        let bar_refs: Vec<(&str, u64)> = bars
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
            .collect();
        let chart = BarChart::default()
            .block(Block::default().borders(Borders::ALL).title("Chart"))
            .data(bar_refs.as_slice())
            .bar_width(7)
            .bar_gap(2)
            .bar_style(Style::default().fg(Color::Cyan))
            .value_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(chart, layout.chart_area);
    }

    let help = Paragraph::new(Line::from(vec![
        key_hint("r"),
        Span::from(" Reload  "),
        key_hint("g"),
        Span::from(" Filter Game  "),
        key_hint("Esc/m"),
        Span::from(" Main Menu"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
