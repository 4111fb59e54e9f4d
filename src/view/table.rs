//! Table widget: search line, sorted header, current page, footer.
//!
//! Text layout is done by plain functions ([`table_lines`],
//! [`footer_line`]) so it can be checked without a terminal; the widget
//! only places and styles those lines.

use crate::format::NumberFormat;
use crate::model::{Column, Country};
use crate::state::{SortDirection, ViewState};
use crate::view::styles::TableStyles;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Gap between columns.
const COLUMN_GAP: &str = "  ";

/// Number of pages needed for `total` matches; at least 1.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

// ===== Text layout =====

#[derive(Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

fn header_label(column: Option<Column>, view: &ViewState) -> String {
    let Some(column) = column else {
        return "Flag".to_string();
    };
    match view.active_sort() {
        Some((sorted, SortDirection::Ascending)) if sorted == column => {
            format!("{} ▲", column.title())
        }
        Some((sorted, SortDirection::Descending)) if sorted == column => {
            format!("{} ▼", column.title())
        }
        _ => column.title().to_string(),
    }
}

fn pad(cell: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.width()));
    match align {
        Align::Left => format!("{cell}{fill}"),
        Align::Right => format!("{fill}{cell}"),
    }
}

/// Header followed by one line per record, columns padded to fit.
///
/// Trailing whitespace is trimmed from every line.
pub fn table_lines(view: &ViewState, items: &[Country], format: &dyn NumberFormat) -> Vec<String> {
    const ALIGN: [Align; 4] = [Align::Left, Align::Left, Align::Right, Align::Right];

    let [name, area, population] = Column::ALL.map(|column| header_label(Some(column), view));
    let header = [header_label(None, view), name, area, population];
    let rows: Vec<[String; 4]> = items
        .iter()
        .map(|c| {
            [
                c.flag.to_uppercase(),
                c.name.clone(),
                format.format(c.area),
                format.format(c.population),
            ]
        })
        .collect();

    let mut widths = header.clone().map(|h| h.width());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    std::iter::once(&header)
        .chain(rows.iter())
        .map(|cells| {
            let padded: Vec<String> = cells
                .iter()
                .zip(widths)
                .zip(ALIGN)
                .map(|((cell, width), align)| pad(cell, width, align))
                .collect();
            padded.join(COLUMN_GAP).trim_end().to_string()
        })
        .collect()
}

/// Status line: page position, match count, loading indicator.
pub fn footer_line(view: &ViewState, total: usize, loading: bool) -> String {
    let pages = page_count(total, view.page_size());
    let noun = if total == 1 { "country" } else { "countries" };
    let mut line = format!(
        "Page {}/{} | {} {} | {} per page",
        view.page(),
        pages,
        total,
        noun,
        view.page_size()
    );
    if loading {
        line.push_str(" | Loading...");
    }
    line
}

// ===== TableSnapshot =====

/// Everything the widget needs for one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSnapshot {
    /// View parameters at draw time.
    pub view: ViewState,
    /// Last published page.
    pub items: Vec<Country>,
    /// Last published match count.
    pub total: usize,
    /// Whether a recomputation is in flight.
    pub loading: bool,
}

// ===== TableView =====

/// Renders a [`TableSnapshot`].
pub struct TableView<'a> {
    snapshot: &'a TableSnapshot,
    format: &'a dyn NumberFormat,
    styles: TableStyles,
}

impl<'a> TableView<'a> {
    /// Create a widget for one frame.
    pub fn new(snapshot: &'a TableSnapshot, format: &'a dyn NumberFormat, styles: TableStyles) -> Self {
        Self {
            snapshot,
            format,
            styles,
        }
    }
}

impl Widget for TableView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title(" Countries ");
        let inner = block.inner(area);
        block.render(area, buf);

        let [search_area, table_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        let snapshot = self.snapshot;
        Paragraph::new(Line::from(vec![
            Span::raw("Search: "),
            Span::styled(snapshot.view.search_term().to_string(), self.styles.search),
        ]))
        .render(search_area, buf);

        let mut lines = table_lines(&snapshot.view, &snapshot.items, self.format).into_iter();
        let mut rendered: Vec<Line> = Vec::new();
        if let Some(header) = lines.next() {
            rendered.push(Line::styled(header, self.styles.header));
        }
        rendered.extend(lines.map(Line::raw));
        if snapshot.items.is_empty() && !snapshot.loading {
            rendered.push(Line::styled("No countries found", self.styles.empty));
        }
        Paragraph::new(rendered).render(table_area, buf);

        let footer = footer_line(&snapshot.view, snapshot.total, snapshot.loading);
        let footer_style = if snapshot.loading {
            self.styles.loading
        } else {
            ratatui::style::Style::default()
        };
        Paragraph::new(Line::styled(footer, footer_style)).render(footer_area, buf);
    }
}
