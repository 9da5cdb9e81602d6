//! Plain-text tables for CLI listings.

/// Column widths follow the widest cell; `max_width` truncates with "…".
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    max_width: usize,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            max_width: 40,
        }
    }

    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = width.max(2);
        self
    }

    /// Short rows are padded with empty cells; extra cells are dropped.
    pub fn add_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn cell(&self, s: &str) -> String {
        if s.chars().count() > self.max_width {
            let mut cut: String = s.chars().take(self.max_width - 1).collect();
            cut.push('…');
            cut
        } else {
            s.to_string()
        }
    }

    pub fn render(&self) -> String {
        let cells: Vec<Vec<String>> = std::iter::once(&self.headers)
            .chain(self.rows.iter())
            .map(|r| r.iter().map(|c| self.cell(c)).collect())
            .collect();

        let widths: Vec<usize> = (0..self.headers.len())
            .map(|i| {
                cells
                    .iter()
                    .map(|r| r[i].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        for (n, row) in cells.iter().enumerate() {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{c:<w$}"))
                .collect();
            out.push_str(line.join("  ").trim_end());
            out.push('\n');

            if n == 0 {
                let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
                out.push_str(&rule.join("  "));
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_fit_widest_cell() {
        let mut t = Table::new(["Name", "Hours"]);
        t.add_row(vec!["Ana".into(), "8.0".into()]);
        t.add_row(vec!["Bartolomeu".into()]);

        let out = t.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Name        Hours");
        assert_eq!(lines[1], "----------  -----");
        assert_eq!(lines[2], "Ana         8.0");
        assert_eq!(lines[3], "Bartolomeu");
    }

    #[test]
    fn long_cells_are_truncated() {
        let mut t = Table::new(["Sector"]).max_width(5);
        t.add_row(vec!["Kitchen".into()]);
        assert!(t.render().contains("Kitc…"));
    }
}
