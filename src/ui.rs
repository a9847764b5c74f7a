//! Terminal UI utilities.
//!
//! A small box-drawing table used by `kiln build --dry-run`/`--verbose` to
//! show the synthesized target set.

use colored::*;
use console::measure_text_width;

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        if row.len() == self.headers.len() {
            self.rows.push(row);
        }
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| measure_text_width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(measure_text_width(cell));
            }
        }
        widths
    }

    pub fn print(&self) {
        if self.headers.is_empty() {
            return;
        }
        let widths = self.column_widths();

        let border = |left: &str, mid: &str, right: &str| {
            let spans: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("  {}{}{}", left, spans.join(mid), right)
        };

        println!("{}", border("┌", "┬", "┐"));
        print!("  │");
        for (header, width) in self.headers.iter().zip(&widths) {
            let pad = width - measure_text_width(header);
            print!(" {}{} │", header.bold(), " ".repeat(pad));
        }
        println!();
        println!("{}", border("├", "┼", "┤"));
        for row in &self.rows {
            print!("  │");
            for (cell, width) in row.iter().zip(&widths) {
                let pad = width.saturating_sub(measure_text_width(cell));
                print!(" {}{} │", cell, " ".repeat(pad));
            }
            println!();
        }
        println!("{}", border("└", "┴", "┘"));
    }
}
