//! TUI rendering with ratatui
//!
//! Visualizations for the question oracle interface.

use super::app::{App, MessageStyle};
use super::session::Outcome;
use crate::oracle::entropy_uniform;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Sparkline, Wrap},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_main_panel(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);

    render_status(f, app, chunks[2]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let items = app.session.oracle().items();
    let title = format!(
        "🎯 QUESTION ORACLE - {} objects, {} attributes",
        items.len(),
        items.num_attributes()
    );
    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_main_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45), // Question and answers
            Constraint::Percentage(25), // Candidates
            Constraint::Percentage(30), // History
        ])
        .split(area);

    render_question(f, app, chunks[0]);
    render_candidates(f, app, chunks[1]);
    render_history(f, app, chunks[2]);
}

fn render_question(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Question ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let content = match &app.outcome {
        Outcome::Asking(question) => {
            let mut lines = vec![
                Line::from(vec![
                    Span::raw("What is its "),
                    Span::styled(
                        question.name.clone(),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("?"),
                ]),
                Line::from(format!(
                    "Expected: {:.3} more questions",
                    question.expected_cost
                )),
                Line::from(""),
            ];

            for (i, option) in question.options.iter().enumerate() {
                let marker = if i == app.selected { "▶" } else { " " };
                let style = if i == app.selected {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                lines.push(Line::from(vec![
                    Span::raw(format!("{marker} {}. ", i + 1)),
                    Span::styled(option.value.clone(), style),
                    Span::styled(
                        format!("  ({} left)", option.count),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]));
            }
            lines
        }
        Outcome::Identified(id) => vec![
            Line::from(Span::styled(
                format!("🎉 It's {id}!"),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "Found in {} questions",
                app.session.history().len()
            )),
        ],
        Outcome::Indistinguishable(ids) => vec![
            Line::from(Span::styled(
                "🔗 No attribute separates these objects:",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(ids.join(", ")),
            Line::from(format!(
                "{:.3} bits left",
                entropy_uniform(ids.len())
            )),
        ],
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_candidates(f: &mut Frame, app: &App, area: Rect) {
    let candidates = app.session.candidates();

    let content = if candidates.len() <= 12 {
        candidates
            .iter()
            .map(|id| Line::from(format!("  • {id}")))
            .collect()
    } else {
        vec![
            Line::from(format!("{} candidates remaining", candidates.len())),
            Line::from(format!(
                "Information needed: {:.2} bits",
                app.session.entropy()
            )),
        ]
    };

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(" Candidates ")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Green)),
    );

    f.render_widget(paragraph, area);
}

fn render_history(f: &mut Frame, app: &App, area: Rect) {
    let history = app.session.history();
    let history_items: Vec<ListItem> = history
        .iter()
        .enumerate()
        .rev()
        .take(5)
        .map(|(i, step)| {
            let content = format!(
                "{}: {} = {} [{:.2} bits] {} → {}",
                i + 1,
                step.attribute,
                step.answer,
                step.information_gained(),
                step.candidates_before,
                step.candidates_after
            );
            ListItem::new(content)
        })
        .collect();

    let list =
        List::new(history_items).block(Block::default().title(" History ").borders(Borders::ALL));

    f.render_widget(list, area);
}

fn render_info_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Information gauge
            Constraint::Percentage(40), // Entropy sparkline
            Constraint::Min(4),         // Messages
        ])
        .split(area);

    render_search_progress(f, app, chunks[0]);
    render_entropy_trend(f, app, chunks[1]);
    render_messages(f, app, chunks[2]);
}

fn render_search_progress(f: &mut Frame, app: &App, area: Rect) {
    let total_bits = app.prior_entropy;
    let bits_gained = total_bits - app.session.entropy();
    let ratio = if total_bits > 0.0 {
        (bits_gained / total_bits).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Information Gained ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio)
        .label(format!(
            "{bits_gained:.2}/{total_bits:.2} bits | {} candidates",
            app.session.candidates_count()
        ));

    f.render_widget(gauge, area);
}

fn render_entropy_trend(f: &mut Frame, app: &App, area: Rect) {
    // Sparkline needs integers; millibits keep three decimals
    let data: Vec<u64> = app
        .session
        .entropies()
        .iter()
        .map(|bits| (bits * 1000.0).round() as u64)
        .collect();

    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .title(" Entropy per Question ")
                .borders(Borders::ALL),
        )
        .data(&data)
        .max((app.prior_entropy * 1000.0).round().max(1.0) as u64)
        .style(Style::default().fg(Color::Magenta));

    f.render_widget(sparkline, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(20),
            Constraint::Percentage(50),
        ])
        .split(area);

    let stats_text = format!(
        "Games: {} | Identified: {}",
        app.stats.total_games, app.stats.identified
    );
    let stats = Paragraph::new(stats_text).alignment(Alignment::Center);
    f.render_widget(stats, chunks[0]);

    let cached = format!("Solved states: {}", app.session.oracle().cached_states());
    let cached = Paragraph::new(cached).alignment(Alignment::Center);
    f.render_widget(cached, chunks[1]);

    let help_text = if app.is_finished() {
        "q: Quit | n: New Game | u: Undo"
    } else {
        "↑/↓: Select | Enter/1-9: Answer | u: Undo | n: New | q: Quit"
    };

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}
