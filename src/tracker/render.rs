//! Line composition for the bar.

use super::options::Theme;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Columns reserved for the separators and the percentage text.
const LAYOUT_ALLOWANCE: usize = 12;

pub(crate) fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Display width of a label.
pub(crate) fn label_width(label: &str) -> usize {
    label.chars().count()
}

/// Bar width that fits `columns` next to the label and the side texts.
pub(crate) fn fit_width(columns: usize, prefix: &str, left_text: &str, right_text: &str) -> usize {
    columns.saturating_sub(
        label_width(prefix) + LAYOUT_ALLOWANCE + left_text.len() + right_text.len(),
    )
}

/// Bracketed glyph run, or empty when nothing is filled yet.
pub(crate) fn compose_bar(theme: &Theme, saucer_size: usize, width: usize) -> String {
    if saucer_size == 0 {
        return String::new();
    }
    let mut bar = String::with_capacity(width + 8);
    bar.push_str(&theme.left);
    bar.push_str(&theme.filled.repeat(saucer_size - 1));
    bar.push_str(&theme.leading_edge);
    bar.push_str(&theme.padding.repeat(width.saturating_sub(saucer_size)));
    bar.push_str(&theme.right);
    bar
}

/// Percentage text from the raw ratio, two decimals.
pub(crate) fn percent_text(units_done: u64, max_units: u64) -> String {
    let pct = if max_units == 0 {
        0.0
    } else {
        units_done as f64 * 100.0 / max_units as f64
    };
    format!("{pct:.2}%")
}

/// Full line, carriage-return prefixed.
pub(crate) fn compose_line(
    timestamp: &str,
    prefix: &str,
    bar: &str,
    units_done: u64,
    max_units: u64,
) -> String {
    format!(
        "\r{} {} {} {}",
        timestamp,
        prefix,
        bar,
        percent_text(units_done, max_units)
    )
}

/// Blanks `width` columns and returns the cursor to column 0.
pub(crate) fn erase_sequence(width: usize) -> String {
    format!("\r{}\r", " ".repeat(width))
}
