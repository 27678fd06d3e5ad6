//! Timeline chart: projects per year.
//!
//! [`TimelineChart`] is the chart handle. The application creates it on the
//! first full render and feeds every later render through [`TimelineChart::update`],
//! so the keyboard cursor survives filter changes. [`TimelineWidget`] draws
//! the handle with ratatui's line chart.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};

use crate::theme::{colors, styles};
use crate::views::TimelineSeries;

/// Chart handle owned by the application for the session
#[derive(Debug, Clone)]
pub struct TimelineChart {
    series: TimelineSeries,
    /// Point under the keyboard cursor
    cursor: usize,
    /// Number of updates since creation
    revision: u64,
}

impl TimelineChart {
    /// Create the chart from its first series. The cursor starts on the
    /// active year, or the most recent year.
    pub fn create(series: TimelineSeries) -> Self {
        let cursor = series
            .active_index
            .unwrap_or_else(|| series.len().saturating_sub(1));
        Self {
            series,
            cursor,
            revision: 0,
        }
    }

    /// Replace the data in place
    pub fn update(&mut self, series: TimelineSeries) {
        self.series = series;
        self.cursor = self.cursor.min(self.series.len().saturating_sub(1));
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn series(&self) -> &TimelineSeries {
        &self.series
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Year of the point at `index`, used by the click handler
    pub fn year_at(&self, index: usize) -> Option<i64> {
        self.series.year_at(index)
    }

    /// Move the cursor towards earlier years
    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor towards later years
    pub fn cursor_right(&mut self) {
        if self.cursor + 1 < self.series.len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_first(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_last(&mut self) {
        self.cursor = self.series.len().saturating_sub(1);
    }
}

/// Line chart widget for a [`TimelineChart`]
pub struct TimelineWidget<'a> {
    chart: &'a TimelineChart,
    focused: bool,
}

impl<'a> TimelineWidget<'a> {
    pub fn new(chart: &'a TimelineChart) -> Self {
        Self {
            chart,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn title(&self) -> Line<'static> {
        let series = self.chart.series();
        let mut spans = vec![Span::styled(" Timeline ", styles::title_accent())];
        if let Some(year) = series.year_at(self.chart.cursor()) {
            let count = series.values[self.chart.cursor()];
            spans.push(Span::styled(
                format!("| {}: {} project{} ", year, count, if count == 1 { "" } else { "s" }),
                styles::text_dim(),
            ));
        }
        Line::from(spans)
    }

    /// First, middle and last year labels
    fn x_labels(series: &TimelineSeries) -> Vec<Span<'static>> {
        let n = series.len();
        let mut picks = vec![0, n / 2, n.saturating_sub(1)];
        picks.dedup();
        picks
            .into_iter()
            .filter_map(|i| series.labels.get(i).cloned())
            .map(|label| Span::styled(label, styles::text_dim()))
            .collect()
    }
}

impl Widget for TimelineWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let series = self.chart.series();
        let block = Block::default()
            .title(self.title())
            .borders(Borders::ALL)
            .border_style(if self.focused {
                styles::border_focused()
            } else {
                styles::border()
            })
            .style(Style::default().bg(colors::BG_MEDIUM));

        if series.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            buf.set_string(inner.x + 1, inner.y, "No dated projects", styles::text_dim());
            return;
        }

        let points: Vec<(f64, f64)> = series
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v as f64))
            .collect();

        let active: Vec<(f64, f64)> = series
            .active_index
            .and_then(|i| points.get(i).copied())
            .into_iter()
            .collect();

        let cursor: Vec<(f64, f64)> = if self.focused {
            points.get(self.chart.cursor()).copied().into_iter().collect()
        } else {
            Vec::new()
        };

        let datasets = vec![
            Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(colors::GREEN))
                .data(&points),
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(colors::GREEN_LIGHT))
                .data(&points),
            Dataset::default()
                .marker(Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(
                    Style::default()
                        .fg(colors::BG_DARK)
                        .bg(colors::YELLOW)
                        .add_modifier(Modifier::BOLD),
                )
                .data(&active),
            Dataset::default()
                .marker(Marker::Bar)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(colors::BLUE_LIGHT))
                .data(&cursor),
        ];
        let x_max = (series.len().saturating_sub(1)).max(1) as f64;
        let y_max = series.peak() as f64;

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .style(styles::border_dim())
                    .bounds([0.0, x_max])
                    .labels(Self::x_labels(series)),
            )
            .y_axis(
                Axis::default()
                    .style(styles::border_dim())
                    .bounds([0.0, y_max])
                    .labels(vec![
                        Span::styled("0", styles::text_dim()),
                        Span::styled(y_max.to_string(), styles::text_dim()),
                    ]),
            );

        chart.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn series(years: &[i64], values: &[u64], active_index: Option<usize>) -> TimelineSeries {
        TimelineSeries {
            years: years.to_vec(),
            labels: years.iter().map(|y| y.to_string()).collect(),
            values: values.to_vec(),
            active_index,
        }
    }

    #[test]
    fn test_create_starts_on_active_or_latest() {
        let chart = TimelineChart::create(series(&[2019, 2020, 2021], &[1, 0, 2], None));
        assert_eq!(chart.cursor(), 2);

        let chart = TimelineChart::create(series(&[2019, 2020, 2021], &[1, 0, 2], Some(0)));
        assert_eq!(chart.cursor(), 0);
        assert_eq!(chart.revision(), 0);
    }

    #[test]
    fn test_update_keeps_cursor_in_range() {
        let mut chart = TimelineChart::create(series(&[2019, 2020, 2021], &[1, 0, 2], None));
        chart.update(series(&[2019], &[1], None));
        assert_eq!(chart.cursor(), 0);
        assert_eq!(chart.revision(), 1);

        chart.update(series(&[], &[], None));
        assert_eq!(chart.cursor(), 0);
        assert_eq!(chart.year_at(chart.cursor()), None);
    }

    #[test]
    fn test_cursor_movement_is_bounded() {
        let mut chart = TimelineChart::create(series(&[2020, 2021], &[1, 1], Some(0)));
        chart.cursor_left();
        assert_eq!(chart.cursor(), 0);
        chart.cursor_right();
        chart.cursor_right();
        assert_eq!(chart.cursor(), 1);
        assert_eq!(chart.year_at(chart.cursor()), Some(2021));
        chart.cursor_first();
        assert_eq!(chart.cursor(), 0);
        chart.cursor_last();
        assert_eq!(chart.cursor(), 1);
    }

    #[test]
    fn test_widget_renders_title_with_cursor_year() {
        let chart = TimelineChart::create(series(&[2020, 2021], &[3, 1], Some(0)));
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        TimelineWidget::new(&chart).focused(true).render(area, &mut buf);

        let top: String = (0..area.width).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(top.contains("Timeline"), "title row: {top}");
        assert!(top.contains("2020: 3 projects"), "title row: {top}");
    }

    #[test]
    fn test_widget_renders_empty_state() {
        let chart = TimelineChart::create(TimelineSeries::default());
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        TimelineWidget::new(&chart).render(area, &mut buf);

        let row: String = (0..area.width).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains("No dated projects"), "row: {row}");
    }
}
