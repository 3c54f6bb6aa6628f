use std::fmt;

use owo_colors::{OwoColorize, Style};
use tracegrid_engine::format::truncate;
use tracegrid_engine::{BadgeColor, BadgeVariant, Cell, SeedColor, Tone};

use super::view_models::{ColumnListEntry, TableViewModel};

/// Widest a console column may grow
const MAX_COLUMN_WIDTH: usize = 48;
const COLUMN_GAP: &str = "  ";

fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Positive => Style::new().green(),
        Tone::Negative => Style::new().red(),
        Tone::Warning => Style::new().yellow(),
        Tone::Accent => Style::new().cyan(),
        Tone::Muted => Style::new().dimmed(),
        Tone::Neutral => Style::new(),
    }
}

fn seed_style(seed: SeedColor) -> Style {
    let (r, g, b) = seed.rgb();
    Style::new().truecolor(r, g, b)
}

fn badge_style(color: BadgeColor, variant: BadgeVariant) -> Style {
    let style = match color {
        BadgeColor::Tone(tone) => tone_style(tone),
        BadgeColor::Seed(seed) => seed_style(seed),
    };
    match variant {
        BadgeVariant::Filled => style.bold(),
        BadgeVariant::Outline => style,
    }
}

/// Style of the dominant piece of a cell
fn cell_style(cell: &Cell) -> Style {
    match cell {
        Cell::Empty | Cell::Payload { is_error: false, .. } => Style::new(),
        Cell::Text { tone, .. } => tone.map(tone_style).unwrap_or_default(),
        Cell::Badge(badge) => badge_style(badge.color, badge.variant),
        Cell::Glyph { tone, .. } => tone_style(*tone),
        Cell::Group { items } => items.first().map(cell_style).unwrap_or_default(),
        Cell::Link { .. } => Style::new().underline(),
        Cell::Avatar { color, .. } => seed_style(*color),
        Cell::Feedback(chip) => tone_style(chip.tone()),
        Cell::Payload { is_error: true, .. } => tone_style(Tone::Negative),
        Cell::Tooltip { content, .. } => cell_style(content),
    }
}

/// Colour each part of a cell separately
fn paint(cell: &Cell) -> String {
    match cell {
        Cell::Group { items } => items
            .iter()
            .filter(|item| !item.is_empty())
            .map(paint)
            .collect::<Vec<_>>()
            .join(" "),
        Cell::Tooltip { content, .. } => paint(content),
        other => other.plain_text().style(cell_style(other)).to_string(),
    }
}

fn width(text: &str) -> usize {
    text.chars().count()
}

/// Aligned text table; `color` adds ANSI styles
pub struct ConsoleTableView<'a> {
    data: &'a TableViewModel,
    color: bool,
}

impl<'a> ConsoleTableView<'a> {
    pub fn new(data: &'a TableViewModel, color: bool) -> Self {
        Self { data, color }
    }

    fn widths(&self, texts: &[Vec<String>]) -> Vec<usize> {
        self.data
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let widest = texts
                    .iter()
                    .map(|row| width(&row[idx]))
                    .max()
                    .unwrap_or(0);
                widest
                    .max(width(&column.header))
                    .min(MAX_COLUMN_WIDTH)
                    .max(column.min_size.map(usize::from).unwrap_or(0).min(4))
            })
            .collect()
    }
}

impl<'a> fmt::Display for ConsoleTableView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data.rows.is_empty() {
            return writeln!(f, "No runs.");
        }

        let texts: Vec<Vec<String>> = self
            .data
            .rows
            .iter()
            .map(|row| row.cells.iter().map(Cell::plain_text).collect())
            .collect();
        let widths = self.widths(&texts);

        let header: Vec<String> = self
            .data
            .columns
            .iter()
            .zip(&widths)
            .map(|(column, &w)| format!("{:<w$}", truncate(&column.header, w)))
            .collect();
        let header = header.join(COLUMN_GAP);
        if self.color {
            writeln!(f, "{}", header.trim_end().bold())?;
        } else {
            writeln!(f, "{}", header.trim_end())?;
        }
        let total: usize =
            widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);
        writeln!(f, "{}", "-".repeat(total))?;

        for (row, row_texts) in self.data.rows.iter().zip(&texts) {
            let mut line = String::new();
            let columns = row.cells.iter().zip(row_texts).zip(&widths);
            for (idx, ((cell, text), &w)) in columns.enumerate() {
                if idx > 0 {
                    line.push_str(COLUMN_GAP);
                }
                let fits = width(text) <= w;
                let shown = if fits { text.clone() } else { truncate(text, w) };
                let padding = " ".repeat(w.saturating_sub(width(&shown)));

                if !self.color {
                    line.push_str(&shown);
                } else if fits {
                    line.push_str(&paint(cell));
                } else {
                    line.push_str(&shown.style(cell_style(cell)).to_string());
                }
                line.push_str(&padding);
            }
            writeln!(f, "{}", line.trim_end())?;
        }

        Ok(())
    }
}

pub struct ColumnListView<'a> {
    entries: &'a [ColumnListEntry],
}

impl<'a> ColumnListView<'a> {
    pub fn new(entries: &'a [ColumnListEntry]) -> Self {
        Self { entries }
    }
}

impl<'a> fmt::Display for ColumnListView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_width = self
            .entries
            .iter()
            .map(|entry| width(&entry.name))
            .max()
            .unwrap_or(0);
        for entry in self.entries {
            writeln!(f, "{:<name_width$}  {}", entry.name, entry.description)?;
        }
        Ok(())
    }
}
