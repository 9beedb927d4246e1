// Wed Aug 05 2026 - Alex

use crate::heap::ChunkRecord;
use colored::*;
use std::cmp::max;

pub struct TableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<usize>,
    use_color: bool,
    max_cell_width: usize,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            headers: Vec::new(),
            rows: Vec::new(),
            column_widths: Vec::new(),
            use_color: true,
            max_cell_width: 48,
        }
    }

    pub fn with_headers(mut self, headers: &[&str]) -> Self {
        self.headers = headers.iter().map(|s| s.to_string()).collect();
        self.column_widths = self.headers.iter().map(|h| h.len()).collect();
        self
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn with_max_cell_width(mut self, width: usize) -> Self {
        self.max_cell_width = max(width, 4);
        self
    }

    pub fn add_row(&mut self, row: &[String]) {
        let clipped: Vec<String> = row.iter().map(|cell| self.clip(cell)).collect();
        for (i, cell) in clipped.iter().enumerate() {
            let width = cell.chars().count();
            if i < self.column_widths.len() {
                self.column_widths[i] = max(self.column_widths[i], width);
            } else {
                self.column_widths.push(width);
            }
        }
        self.rows.push(clipped);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        if !self.headers.is_empty() {
            out.push_str(&self.format_row(&self.headers, true));
            out.push('\n');
            let rule: Vec<String> = self
                .column_widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect();
            out.push_str(&self.format_row(&rule, false));
            out.push('\n');
        }

        for row in &self.rows {
            out.push_str(&self.format_row(row, false));
            out.push('\n');
        }

        out
    }

    fn clip(&self, cell: &str) -> String {
        if cell.chars().count() <= self.max_cell_width {
            return cell.to_string();
        }
        let mut clipped: String = cell.chars().take(self.max_cell_width - 3).collect();
        clipped.push_str("...");
        clipped
    }

    fn format_row(&self, cells: &[String], header: bool) -> String {
        let formatted: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let width = self.column_widths.get(i).copied().unwrap_or(cell.len());
                let padded = format!("{:<width$}", cell, width = width);
                if header && self.use_color {
                    padded.cyan().bold().to_string()
                } else {
                    padded
                }
            })
            .collect();
        formatted.join("  ").trim_end().to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render_records(records: &[ChunkRecord], use_color: bool) -> String {
    let payload_width = terminal_size::terminal_size()
        .map(|(w, _)| max(w.0 as usize / 4, 16))
        .unwrap_or(48);

    let mut table = TableBuilder::new()
        .with_headers(ChunkRecord::columns())
        .with_color(use_color)
        .with_max_cell_width(payload_width);

    for record in records {
        table.add_row(&record.row());
    }

    table.render()
}
