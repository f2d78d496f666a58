use crate::model::board::BoardResult;
use crate::model::table::Table;

pub fn to_json(boards: &[BoardResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(boards)
}

/// Plain-text rendering: a heading per board followed by an aligned table.
/// Absent and null cells render as empty.
pub fn to_text(boards: &[BoardResult]) -> String {
    let mut out = String::new();
    for (i, board) in boards.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("== {} ({} items)\n", board.name, board.table.rows().len()));
        if board.table.is_empty() {
            out.push_str("(no items)\n");
            continue;
        }
        render_table(&board.table, &mut out);
    }
    out
}

fn render_table(table: &Table, out: &mut String) {
    let labels: Vec<&str> = table.labels().collect();
    let cells: Vec<Vec<&str>> = (0..table.rows().len())
        .map(|row| {
            labels
                .iter()
                .map(|label| table.cell(row, label).unwrap_or(""))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = labels
        .iter()
        .enumerate()
        .map(|(col, label)| {
            cells
                .iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(label.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    push_line(out, &labels, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
    push_line(out, &rule, &widths);
    for row in &cells {
        push_line(out, row, &widths);
    }
}

fn push_line(out: &mut String, cells: &[&str], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}
