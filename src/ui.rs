pub mod charting;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, AppState};
use crate::diff::{diff_chars, CharOutcome};
use crate::history::format_duration;
use crate::session::Clock;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_bold() -> Style {
    bold().add_modifier(Modifier::DIM)
}

impl<C: Clock> Widget for &App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Typing => render_typing(self, area, buf),
            AppState::Results => render_results(self, area, buf),
        }
    }
}

/// Styled spans for the reference text with the typed input laid over it
pub fn prompt_spans<'a>(reference: &str, typed: &str) -> Vec<Span<'a>> {
    let green_bold = bold().fg(Color::Green);
    let red_bold = bold().fg(Color::Red);
    let caret = dim_bold().add_modifier(Modifier::UNDERLINED);

    let mut caret_placed = false;
    diff_chars(reference, typed)
        .into_iter()
        .map(|d| match d.outcome {
            CharOutcome::Correct => Span::styled(d.char.to_string(), green_bold),
            CharOutcome::Incorrect | CharOutcome::Extra => Span::styled(
                match d.char {
                    ' ' => "·".to_owned(),
                    c => c.to_string(),
                },
                if d.outcome == CharOutcome::Extra {
                    red_bold.add_modifier(Modifier::CROSSED_OUT)
                } else {
                    red_bold
                },
            ),
            CharOutcome::Pending if !caret_placed => {
                caret_placed = true;
                Span::styled(d.char.to_string(), caret)
            }
            CharOutcome::Pending => Span::styled(d.char.to_string(), dim_bold()),
        })
        .collect()
}

fn render_typing<C: Clock>(app: &App<C>, area: Rect, buf: &mut Buffer) {
    let Some(reference) = app.reference_text() else {
        Paragraph::new(Span::styled("no text available", bold().fg(Color::Yellow)))
            .alignment(Alignment::Center)
            .render(area, buf);
        return;
    };
    let prompt = reference.body();

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let prompt_occupied_lines = if prompt.width() <= max_chars_per_line as usize {
        1
    } else {
        ((prompt.width() as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16
    };
    let padding = area.height.saturating_sub(prompt_occupied_lines) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(padding.saturating_sub(2)),
            Constraint::Length(2),
            Constraint::Length(prompt_occupied_lines),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

    let timer = if app.controller.is_running() {
        let snapshot = app.controller.snapshot();
        format!(
            "{:.1}   {} wpm   {}% acc",
            app.remaining_seconds(),
            snapshot.wpm,
            snapshot.accuracy
        )
    } else {
        format!("{:.1}", app.remaining_seconds())
    };
    Paragraph::new(Span::styled(timer, dim_bold()))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    Paragraph::new(Line::from(prompt_spans(prompt, app.typed_text())))
        .alignment(if prompt_occupied_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);

    let config = app.store.config();
    let mut info = format!(
        "{} · {} · {} · {}s",
        reference.mode,
        reference.difficulty,
        config.language.name(),
        config.duration.as_secs()
    );
    if let Some(challenge) = &app.challenge {
        info = format!("{}  ({info})", challenge.title);
    }
    Paragraph::new(Span::styled(
        info,
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);
}

fn render_results<C: Clock>(app: &App<C>, area: Rect, buf: &mut Buffer) {
    let Some(summary) = &app.last_summary else {
        return;
    };
    let bold_style = bold();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),    // chart
            Constraint::Length(1), // metrics
            Constraint::Length(1), // session details
            Constraint::Length(1), // challenge
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
        ])
        .split(area);

    let samples = app.controller.wpm_history();
    let (overall_duration, highest_wpm) =
        charting::compute_chart_params(samples, summary.elapsed_seconds);
    let points: Vec<(f64, f64)> = samples.iter().copied().map(Into::into).collect();
    let datasets = vec![Dataset::default()
        .marker(ratatui::symbols::Marker::Braille)
        .style(Style::default().fg(Color::Magenta))
        .graph_type(GraphType::Line)
        .data(&points)];

    Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("seconds")
                .bounds([0.0, overall_duration])
                .labels(vec![
                    Span::styled("0", bold_style),
                    Span::styled(charting::format_label(overall_duration), bold_style),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .bounds([0.0, highest_wpm])
                .labels(vec![
                    Span::styled("0", bold_style),
                    Span::styled(charting::format_label(highest_wpm), bold_style),
                ]),
        )
        .render(chunks[0], buf);

    let metrics = summary.metrics;
    Paragraph::new(Span::styled(
        format!(
            "{} wpm   {}% acc   {}% consistency",
            metrics.wpm, metrics.accuracy, metrics.consistency
        ),
        bold_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    let history = app.history.summary(chrono::Local::now().date_naive());
    Paragraph::new(Span::styled(
        format!(
            "{} mistakes in {:.1}s   ·   {} tests, avg {} wpm, best {} wpm, {} typed",
            summary.mistakes,
            summary.elapsed_seconds,
            history.total_tests,
            history.average_wpm,
            history.best_wpm,
            format_duration(history.total_time)
        ),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    if let Some(outcome) = &app.last_outcome {
        let (verdict, color) = if outcome.passed() {
            ("challenge passed", Color::Green)
        } else {
            ("challenge missed", Color::Red)
        };
        Paragraph::new(Span::styled(
            format!(
                "{verdict}   score {}   streak {}",
                outcome.score, app.challenge_stats.current_streak
            ),
            bold().fg(color),
        ))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);
    }

    Paragraph::new(Span::styled(
        "(←/r)etry / (→/n)ew / (esc)ape",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[5], buf);
}
