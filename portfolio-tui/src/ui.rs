//! UI rendering module.
//!
//! Draws the dashboard (search, skills, timeline, project list), the project
//! detail page, the about page and the help overlay from [`App`] state.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, LogLevel, Pane};
use crate::navigation::View;
use crate::theme::{colors, styles};
use crate::timeline::TimelineWidget;
use crate::views::year_range;

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(colors::BG_DARK));
    frame.render_widget(bg_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header / search
            Constraint::Min(10),   // Main content
            Constraint::Length(5), // Log area
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    match app.view() {
        View::Dashboard => render_dashboard(frame, app, chunks[1]),
        View::Detail => render_detail(frame, app, chunks[1]),
        View::About => render_about(frame, app, chunks[1]),
    }
    render_logs(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

fn pane_border(app: &App, pane: Pane) -> Style {
    if app.view() == View::Dashboard && app.focus == pane {
        styles::border_focused()
    } else {
        styles::border()
    }
}

/// Title plus the search input
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.view() == View::Dashboard && app.focus == Pane::Search;

    let mut spans = vec![Span::styled(" / ", styles::key_hint())];
    if app.filter.search_term.is_empty() && !editing {
        spans.push(Span::styled("Search projects...", styles::text_hint()));
    } else {
        spans.push(Span::styled(app.filter.search_term.clone(), styles::text()));
    }
    if editing {
        spans.push(Span::styled("█", styles::success()));
    }

    let input = Paragraph::new(Line::from(spans))
        .style(if editing { styles::input_focused() } else { styles::text() })
        .block(
            Block::default()
                .title(" Portfolio ")
                .title_style(styles::title_accent())
                .title(
                    Line::from(Span::styled(header_location(app), styles::text_dim()))
                        .alignment(Alignment::Right),
                )
                .borders(Borders::ALL)
                .border_style(pane_border(app, Pane::Search))
                .style(Style::default().bg(colors::BG_MEDIUM)),
        );

    frame.render_widget(input, area);
}

/// View name, plus the focused pane on the dashboard
fn header_location(app: &App) -> String {
    match app.view() {
        View::Dashboard => format!(" {} > {} ", app.view().name(), app.focus.name()),
        view => format!(" {} ", view.name()),
    }
}

fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
        .split(area);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(columns[1]);

    render_skills(frame, app, columns[0]);

    match app.chart.as_ref() {
        Some(chart) => frame.render_widget(
            TimelineWidget::new(chart).focused(app.focus == Pane::Timeline),
            right[0],
        ),
        None => {
            let block = Block::default()
                .title(" Timeline ")
                .title_style(styles::title_accent())
                .borders(Borders::ALL)
                .border_style(pane_border(app, Pane::Timeline))
                .style(Style::default().bg(colors::BG_MEDIUM));
            frame.render_widget(block, right[0]);
            render_empty_state(frame, right[0], "No data", app.is_loading);
        }
    }

    render_projects(frame, app, right[1]);
}

/// Skill panel: tag and count, active skill highlighted
fn render_skills(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Pane::Skills;
    let width = app.skills.iter().map(|s| s.tag.chars().count()).max().unwrap_or(0);

    let items: Vec<ListItem> = app
        .skills
        .iter()
        .enumerate()
        .map(|(i, skill)| {
            let is_cursor = focused && i == app.skill_selected;
            let style = if is_cursor {
                styles::selected()
            } else if skill.active {
                styles::facet_active()
            } else {
                styles::tag()
            };
            let marker = if skill.active { "● " } else { "  " };

            ListItem::new(Line::from(vec![
                Span::styled(marker, if skill.active { styles::warning() } else { styles::text_dim() }),
                Span::styled(format!("{:width$}", skill.tag, width = width), style),
                Span::styled(format!(" {:>3}", skill.count), styles::text_dim()),
            ]))
        })
        .collect();

    let title = match &app.filter.active_skill {
        Some(skill) => format!(" Skills [{}] ", skill),
        None => " Skills ".to_string(),
    };

    let list = List::new(items).block(
        Block::default()
            .title(title)
            .title_style(styles::title_accent())
            .borders(Borders::ALL)
            .border_style(pane_border(app, Pane::Skills))
            .style(Style::default().bg(colors::BG_DARK)),
    );

    let mut state = ListState::default().with_selected(focused.then_some(app.skill_selected));
    frame.render_stateful_widget(list, area, &mut state);

    if app.skills.is_empty() {
        render_empty_state(frame, area, "No skills", app.is_loading);
    }
}

/// Project list: name, year and tag chips
fn render_projects(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Pane::Projects;

    let items: Vec<ListItem> = app
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i == app.list_selected {
                if focused {
                    styles::selected()
                } else {
                    styles::selected_dim()
                }
            } else {
                styles::text()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:28}", row.name), style),
                Span::styled(" │ ", styles::border_dim()),
                Span::styled(format!("{:>6}", row.year), styles::info()),
                Span::styled(" │ ", styles::border_dim()),
                Span::styled(row.tags.clone(), styles::tag()),
            ]))
        })
        .collect();

    let title = format!(" Projects ({}/{}) ", app.rows.len(), app.records.len());
    let list = List::new(items).block(
        Block::default()
            .title(title)
            .title_style(styles::title_accent())
            .borders(Borders::ALL)
            .border_style(pane_border(app, Pane::Projects))
            .style(Style::default().bg(colors::BG_DARK)),
    );

    let mut state = ListState::default().with_selected(Some(app.list_selected));
    frame.render_stateful_widget(list, area, &mut state);

    if app.rows.is_empty() {
        render_empty_state(frame, area, "No projects match the filters", app.is_loading);
    }
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Project ")
        .title_style(styles::title_accent())
        .title(
            Line::from(Span::styled(" Esc: back ", styles::text_hint())).alignment(Alignment::Right),
        )
        .borders(Borders::ALL)
        .border_style(styles::border_focused())
        .style(Style::default().bg(colors::BG_MEDIUM));

    let Some(detail) = app.detail.as_ref() else {
        frame.render_widget(block, area);
        render_empty_state(frame, area, "No project selected", false);
        return;
    };

    let tags: Vec<Span> = detail
        .tags
        .iter()
        .flat_map(|t| [Span::styled(format!("#{}", t), styles::tag()), Span::raw(" ")])
        .collect();

    let mut text = vec![
        Line::from(Span::styled(
            detail.name.clone(),
            Style::default()
                .fg(colors::FG_PRIMARY)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )),
        Line::from(vec![
            Span::styled("Year: ", styles::text_dim()),
            Span::styled(detail.year.clone(), styles::info()),
            Span::styled("   ID: ", styles::text_dim()),
            Span::styled(detail.id.to_string(), styles::text_dim()),
        ]),
        Line::from(tags),
        Line::from(""),
    ];
    text.extend(
        detail
            .description
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), styles::text()))),
    );

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_about(frame: &mut Frame, app: &App, area: Rect) {
    let years = match year_range(&app.records) {
        Some((lo, hi)) if lo == hi => lo.to_string(),
        Some((lo, hi)) => format!("{} - {}", lo, hi),
        None => "-".to_string(),
    };
    let mut skills: Vec<&str> = app.skills.iter().map(|s| s.tag.as_str()).collect();
    skills.sort_unstable();

    let field = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {:12}", label), styles::text_dim()),
            Span::styled(value, styles::text()),
        ])
    };

    let mut text = vec![
        Line::from(Span::styled("Portfolio", styles::title_accent())),
        Line::from(Span::styled(
            "Projects from a published spreadsheet, filterable by skill, year and text.",
            styles::text_dim(),
        )),
        Line::from(""),
        Line::from(Span::styled("Dataset", styles::section())),
        field("Source", app.source_label.clone()),
        field("Projects", app.records.len().to_string()),
        field("Years", years),
        field("Skills", skills.len().to_string()),
    ];
    if let Some(reason) = &app.offline_reason {
        text.push(Line::from(vec![
            Span::styled(format!("  {:12}", "Offline"), styles::text_dim()),
            Span::styled(reason.clone(), styles::warning()),
        ]));
    }

    text.push(Line::from(""));
    text.push(Line::from(Span::styled("History", styles::section())));
    for url in app.navigator.history().iter().rev().take(8) {
        text.push(Line::from(Span::styled(format!("  {}", url), styles::text_dim())));
    }
    text.push(Line::from(Span::styled(
        format!("  {}", app.navigator.location()),
        styles::text(),
    )));

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .title(" About ")
                .title_style(styles::title_accent())
                .borders(Borders::ALL)
                .border_style(styles::border_focused())
                .style(Style::default().bg(colors::BG_MEDIUM)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_logs(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .logs
        .iter()
        .rev()
        .take(area.height.saturating_sub(2) as usize)
        .map(|entry| {
            let (prefix, color) = match entry.level {
                LogLevel::Info => ("i", colors::BLUE),
                LogLevel::Success => ("+", colors::GREEN),
                LogLevel::Warning => ("!", colors::YELLOW),
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("[{}] ", prefix), Style::default().fg(color)),
                Span::styled(entry.message.as_str(), styles::text_dim()),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Log ")
            .title_style(Style::default().fg(colors::FG_DIM))
            .borders(Borders::ALL)
            .border_style(styles::border_dim())
            .style(Style::default().bg(colors::BG_DARK)),
    );

    frame.render_widget(list, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let style = if app.offline_reason.is_some() {
        styles::warning()
    } else {
        styles::text_dim()
    };
    let bar = Paragraph::new(Line::from(Span::styled(app.status_text(), style)))
        .style(Style::default().bg(colors::BG_MEDIUM));
    frame.render_widget(bar, area);
}

fn render_empty_state(frame: &mut Frame, area: Rect, message: &str, is_loading: bool) {
    let text = if is_loading { "Loading..." } else { message };

    let paragraph = Paragraph::new(text)
        .style(styles::text_dim())
        .alignment(Alignment::Center);

    let inner = Block::default().borders(Borders::ALL).inner(area);
    let y = inner.y + inner.height / 2;
    let centered = Rect::new(inner.x, y, inner.width, 1);

    frame.render_widget(paragraph, centered);
}

fn help_line(keys: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:16}", keys), styles::key_hint()),
        Span::raw(action),
    ])
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(58, 22, area);
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().fg(colors::BLUE).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Dashboard", styles::section())),
        help_line("Tab/Shift+Tab", "Cycle panes"),
        help_line("j/k or Up/Down", "Move in skills and projects"),
        help_line("h/l or Left/Right", "Move along the timeline"),
        help_line("Enter", "Toggle skill / year, open project"),
        help_line("/", "Search"),
        help_line("x", "Clear all filters"),
        help_line("a", "About"),
        Line::from(""),
        Line::from(Span::styled("Project", styles::section())),
        help_line("j/k", "Scroll description"),
        help_line("Esc/Backspace/b", "Back to dashboard"),
        Line::from(""),
        Line::from(Span::styled("General", styles::section())),
        help_line("?", "Toggle this help"),
        help_line("q/Ctrl+C", "Quit"),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .title_style(styles::title())
                .borders(Borders::ALL)
                .border_style(styles::border())
                .style(Style::default().bg(colors::BG_MEDIUM)),
        )
        .style(styles::text());

    frame.render_widget(paragraph, popup_area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Numeric, ProjectRecord};
    use crate::navigation::resolve_location;
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        let mut app = App::new(resolve_location("/").unwrap(), "test sheet");
        app.load_records(vec![
            ProjectRecord {
                id: Numeric::Value(1),
                name: "Ledger".to_string(),
                year: Numeric::Value(2019),
                tags: vec!["Rust".to_string()],
                description: "Double-entry\nbookkeeping".to_string(),
            },
            ProjectRecord {
                id: Numeric::Value(2),
                name: "Crawler".to_string(),
                year: Numeric::Invalid("soon".to_string()),
                tags: vec!["Go".to_string()],
                description: String::new(),
            },
        ]);
        app
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_dashboard_lists_projects_and_skills() {
        let screen = draw(&app());
        assert!(screen.contains("Ledger"));
        assert!(screen.contains("Crawler"));
        assert!(screen.contains("soon"), "invalid year shows raw text");
        assert!(screen.contains("#Rust"));
        assert!(screen.contains("Projects (2/2)"));
        assert!(screen.contains("Dashboard > Projects"));
    }

    #[test]
    fn test_detail_view_shows_description_lines() {
        let mut app = app();
        app.open_project(1);
        let screen = draw(&app);
        assert!(screen.contains("Double-entry"));
        assert!(screen.contains("bookkeeping"));
        assert!(screen.contains("?p=1"), "status bar shows location");
    }

    #[test]
    fn test_about_and_help_render() {
        let mut app = app();
        app.show_view(View::About);
        let screen = draw(&app);
        assert!(screen.contains("test sheet"));
        assert!(screen.contains("2019"));

        app.show_help = true;
        let screen = draw(&app);
        assert!(screen.contains("Keyboard Shortcuts"));
    }
}
