use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell as TuiCell, Paragraph, Row, Table},
};
use tracegrid_engine::{BadgeColor, BadgeVariant, Cell, ColumnMeta, SeedColor, SortDirection, Tone};

use super::app::TableApp;

/// Tallest the detail pane grows, borders included
const MAX_DETAIL_HEIGHT: u16 = 14;

pub(crate) fn draw(f: &mut Frame, app: &mut TableApp) {
    let detail_height = (app.columns().len() as u16 + 2).min(MAX_DETAIL_HEIGHT);
    let [table_area, detail_area, footer_area] = Layout::vertical([
        Constraint::Min(5),
        Constraint::Length(detail_height),
        Constraint::Length(2),
    ])
    .areas(f.area());

    render_table(f, table_area, app);
    render_detail(f, detail_area, app);
    render_footer(f, footer_area, app);
}

fn tone_to_color(tone: Tone) -> Color {
    match tone {
        Tone::Positive => Color::Green,
        Tone::Negative => Color::Red,
        Tone::Warning => Color::Yellow,
        Tone::Accent => Color::Cyan,
        Tone::Muted => Color::DarkGray,
        Tone::Neutral => Color::White,
    }
}

fn seed_to_color(seed: SeedColor) -> Color {
    let (r, g, b) = seed.rgb();
    Color::Rgb(r, g, b)
}

fn spans(cell: &Cell, out: &mut Vec<Span<'static>>) {
    match cell {
        Cell::Empty => {}
        Cell::Group { items } => {
            for item in items.iter().filter(|item| !item.is_empty()) {
                if !out.is_empty() {
                    out.push(Span::raw(" "));
                }
                spans(item, out);
            }
        }
        Cell::Tooltip { content, .. } => spans(content, out),
        Cell::Text { text, tone } => {
            let style = tone.map_or_else(Style::default, |t| Style::default().fg(tone_to_color(t)));
            out.push(Span::styled(text.clone(), style));
        }
        Cell::Badge(badge) => {
            let color = match badge.color {
                BadgeColor::Tone(tone) => tone_to_color(tone),
                BadgeColor::Seed(seed) => seed_to_color(seed),
            };
            let style = match badge.variant {
                BadgeVariant::Filled => Style::default().fg(Color::Black).bg(color),
                BadgeVariant::Outline => Style::default().fg(color),
            };
            out.push(Span::styled(format!(" {} ", badge.text), style));
        }
        Cell::Glyph { glyph, tone } => {
            out.push(Span::styled(glyph.symbol(), Style::default().fg(tone_to_color(*tone))));
        }
        Cell::Link { label, .. } => {
            out.push(Span::styled(
                label.clone(),
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::UNDERLINED),
            ));
        }
        Cell::Avatar {
            initials,
            name,
            color,
        } => {
            out.push(Span::styled(
                initials.clone(),
                Style::default()
                    .fg(seed_to_color(*color))
                    .add_modifier(Modifier::BOLD),
            ));
            out.push(Span::raw(format!(" {name}")));
        }
        Cell::Feedback(chip) => {
            let style = Style::default().fg(tone_to_color(chip.tone()));
            out.push(Span::styled(cell.plain_text(), style));
        }
        Cell::Payload { text, is_error } => {
            let style = if *is_error {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Gray)
            };
            out.push(Span::styled(text.clone(), style));
        }
    }
}

fn cell_line(cell: &Cell) -> Line<'static> {
    let mut out = Vec::new();
    spans(cell, &mut out);
    Line::from(out)
}

fn header_label(column: &ColumnMeta, app: &TableApp) -> String {
    match app.sort() {
        Some(sort) if sort.column_id == column.id => {
            let arrow = match sort.direction {
                SortDirection::Ascending => "▲",
                SortDirection::Descending => "▼",
            };
            format!("{} {arrow}", column.header)
        }
        _ => column.header.clone(),
    }
}

/// Preferred sizes are in pixel-like units; roughly six per terminal cell
fn column_width(column: &ColumnMeta) -> Constraint {
    let header = column.header.chars().count() as u16 + 2;
    match column.size {
        Some(size) => Constraint::Length((size / 6).max(header)),
        None => Constraint::Min(header.max(10)),
    }
}

fn render_table(f: &mut Frame, area: Rect, app: &mut TableApp) {
    let columns = app.columns();
    let widths: Vec<Constraint> = columns.iter().map(|column| column_width(column)).collect();
    let header = Row::new(
        columns
            .iter()
            .map(|column| TuiCell::from(header_label(column, app))),
    )
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app
        .rows()
        .iter()
        .map(|row| Row::new(row.cells.iter().map(|cell| TuiCell::from(cell_line(cell)))))
        .collect();

    let title = format!(" Runs ({}) ", rows.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("› ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_detail(f: &mut Frame, area: Rect, app: &TableApp) {
    let lines: Vec<Line> = match app.selected_row() {
        Some(row) => app
            .columns()
            .iter()
            .zip(&row.cells)
            .map(|(column, cell)| {
                let mut line = vec![Span::styled(
                    format!("{}: ", column.header),
                    Style::default().fg(Color::Gray),
                )];
                let mut value = Vec::new();
                spans(cell, &mut value);
                line.extend(value);
                if let Some(tooltip) = cell.tooltip() {
                    line.push(Span::styled(
                        format!("  ({tooltip})"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                Line::from(line)
            })
            .collect(),
        None => vec![Line::from("No run selected")],
    };

    let title = app
        .selected_row()
        .map_or_else(|| " Run ".to_string(), |row| format!(" Run {} ", row.run_id));
    let detail = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(detail, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &TableApp) {
    let mut text = String::from("q quit  j/k move  s sort  r reverse  R refetch related");
    let pending = app.pending_reads();
    if pending > 0 {
        text.push_str(&format!("  ⏳ {pending} loading"));
    }
    if let Some(status) = app.status() {
        text.push_str("  │ ");
        text.push_str(status);
    }

    let footer = Paragraph::new(Line::from(text)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(footer, area);
}
