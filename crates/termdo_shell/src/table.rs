//! Table layout for `ls`.

use termdo_api::Task;
use time::macros::format_description;
use time::OffsetDateTime;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const SEP: &str = "  ";
const TITLE_FLOOR: usize = 10;
const DESC_FLOOR: usize = 12;
const HEADERS: [&str; 6] = ["ID", "TITLE", "DESCRIPTION", "DONE", "CREATED", "UPDATED"];

pub(crate) fn format_date_time(value: OffsetDateTime) -> String {
    value
        .format(format_description!(
            "[day]/[month]/[year] [hour]:[minute]"
        ))
        .unwrap_or_else(|_| "-".to_string())
}

fn format_date(value: OffsetDateTime) -> String {
    value
        .format(format_description!("[day]/[month]/[year]"))
        .unwrap_or_else(|_| "-".to_string())
}

/// Render the task table: a header row, a divider, and one row per task.
///
/// Column widths auto-size to content; when the table would exceed the
/// terminal width, the title column shrinks first (down to its floor), then
/// the description column. Truncated cells end with an ellipsis. When even
/// the minimal header would occupy more than half the terminal width, the
/// date columns drop their time component.
pub fn render(tasks: &[Task], cols: usize) -> Vec<String> {
    let cols = cols.max(1);

    let header_min = HEADERS.iter().map(|header| header.width()).sum::<usize>()
        + SEP.width() * (HEADERS.len() - 1);
    let date_only = header_min > cols / 2;
    let render_date = if date_only {
        format_date
    } else {
        format_date_time
    };

    let rows: Vec<[String; 6]> = tasks
        .iter()
        .map(|task| {
            [
                task.id.to_string(),
                task.title.clone(),
                task.description.clone(),
                if task.is_completed { "yes" } else { "no" }.to_string(),
                render_date(task.created_at),
                render_date(task.updated_at),
            ]
        })
        .collect();

    let mut widths: [usize; 6] = [0; 6];
    for (index, header) in HEADERS.iter().enumerate() {
        widths[index] = header.width();
    }
    for row in &rows {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(cell.width());
        }
    }

    let table_width =
        |widths: &[usize; 6]| widths.iter().sum::<usize>() + SEP.width() * (widths.len() - 1);

    let mut overflow = table_width(&widths).saturating_sub(cols);
    if overflow > 0 && widths[1] > TITLE_FLOOR {
        let take = (widths[1] - TITLE_FLOOR).min(overflow);
        widths[1] -= take;
        overflow -= take;
    }
    if overflow > 0 && widths[2] > DESC_FLOOR {
        let take = (widths[2] - DESC_FLOOR).min(overflow);
        widths[2] -= take;
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);

    let header_cells: Vec<String> = HEADERS
        .iter()
        .enumerate()
        .map(|(index, header)| fit(header, widths[index]))
        .collect();
    lines.push(header_cells.join(SEP).trim_end().to_string());

    let divider_cells: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    lines.push(divider_cells.join(SEP));

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(index, cell)| fit(cell, widths[index]))
            .collect();
        lines.push(cells.join(SEP).trim_end().to_string());
    }

    lines
}

/// Pad or truncate a cell to an exact width; truncation ends with `…`.
fn fit(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if text.width() <= width {
        let padding = width - text.width();
        return format!("{text}{}", " ".repeat(padding));
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > width.saturating_sub(1) {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push('…');
    used += 1;
    format!("{out}{}", " ".repeat(width - used))
}
