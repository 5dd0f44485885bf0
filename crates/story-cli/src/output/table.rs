#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN: usize = 4;

/// Render rows under `headers` as space-aligned columns.
///
/// Columns keep the order given. When `max_width` is set the widest column
/// is narrowed first and overflowing cells end in `…`.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(column, header)| {
            rows.iter()
                .filter_map(|row| row.get(column))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    if let Some(max_width) = options.max_width {
        shrink_to(&mut widths, headers, max_width);
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    let header_line = join_cells(headers.iter().map(|h| (*h).to_string()), &widths, None);
    lines.push("-".repeat(header_line.chars().count()));
    lines.insert(0, header_line);

    for row in rows {
        let cells = (0..widths.len()).map(|column| {
            row.get(column)
                .cloned()
                .unwrap_or_else(|| String::from("-"))
        });
        lines.push(join_cells(cells, &widths, Some(options.color)));
    }
    lines.join("\n")
}

fn join_cells(
    cells: impl Iterator<Item = String>,
    widths: &[usize],
    color: Option<bool>,
) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| {
            let text = clip(&cell, width);
            let pad = " ".repeat(width.saturating_sub(text.chars().count()));
            let right_align = color.is_some() && is_numeric(&text);
            let text = if color == Some(true) {
                paint(&text)
            } else {
                text
            };
            if right_align {
                format!("{pad}{text}")
            } else {
                format!("{text}{pad}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn shrink_to(widths: &mut [usize], headers: &[&str], max_width: usize) {
    let gaps = widths.len().saturating_sub(1) * 2;
    while widths.iter().sum::<usize>() + gaps > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(column, width)| **width > headers[*column].len().max(MIN_COLUMN))
            .max_by_key(|(_, width)| **width)
            .map(|(column, _)| column);
        let Some(column) = widest else {
            break;
        };
        widths[column] -= 1;
    }
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Color cache and presenter states.
fn paint(value: &str) -> String {
    let code = match value {
        "fresh" | "exhausted" | "upstream" => "32",
        "stale" | "partial" | "cache" | "coalesced" => "33",
        "missing" | "corrupt" | "empty" | "discarded" => "31",
        _ => return value.to_string(),
    };
    format!("\u{1b}[{code}m{value}\u{1b}[0m")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn columns_keep_order_and_align() {
        let rows = vec![
            vec!["1".to_string(), "Acme".to_string()],
            vec!["200".to_string(), "Globex Corporation".to_string()],
        ];
        let table = render_table(&["id", "company"], &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "id   company");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "  1  Acme");
        assert_eq!(lines[3], "200  Globex Corporation");
    }

    #[test]
    fn narrow_terminal_truncates_widest_column() {
        let rows = vec![vec![
            "7".to_string(),
            "A very long program name that will not fit".to_string(),
        ]];
        let table = render_table(
            &["id", "program"],
            &rows,
            TableOptions {
                max_width: Some(20),
                color: false,
            },
        );
        let last = table.lines().last().unwrap();
        assert!(last.ends_with('…'));
        assert!(last.chars().count() <= 20);
    }

    #[test]
    fn missing_cells_render_as_dash() {
        let table = render_table(&["a", "b"], &[vec!["x".to_string()]], PLAIN);
        assert!(table.lines().last().unwrap().ends_with('-'));
    }

    #[test]
    fn states_are_colored_only_when_enabled() {
        let rows = vec![vec!["stale".to_string()]];
        let colored = render_table(
            &["state"],
            &rows,
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        assert!(colored.contains("\u{1b}[33mstale"));
        assert!(!render_table(&["state"], &rows, PLAIN).contains('\u{1b}'));
    }
}
