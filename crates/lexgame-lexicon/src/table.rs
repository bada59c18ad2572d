//! Plain-text tables for debug output.

use std::fmt::Write as _;

/// Render rows of cells as a pipe-delimited table with padded columns.
///
/// Rows may have different lengths; missing cells are simply not drawn.
pub fn render_table(rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = Vec::new();
    for row in rows {
        for (col, cell) in row.iter().enumerate() {
            match widths.get_mut(col) {
                Some(width) => *width = (*width).max(cell.chars().count()),
                None => widths.push(cell.chars().count()),
            }
        }
    }

    let mut out = String::new();
    for row in rows {
        out.push('|');
        for (cell, width) in row.iter().zip(&widths) {
            let _ = write!(out, " {cell:<width$} |");
        }
        out.push('\n');
    }
    out
}
