use crate::db::log::{LogEntry, load_log};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use ansi_term::Colour;
use regex::Regex;
use rusqlite::Connection;

const ANSI_PATTERN: &str = r"\x1B\[[0-9;]*[mK]";
const OP_WIDTH: usize = 48;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "employee_add" | "company_set" | "import" => Colour::Green,
        "employee_del" | "company_clear" | "clear_all" | "schedule_clear" => Colour::Red,
        "employee_edit" | "schedule_mark" => Colour::Yellow,
        "migration_applied" | "migrate_legacy" => Colour::Purple,
        "backup" | "restore" | "export" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// "operation (target)", cut to `width` visible characters.
fn op_label(entry: &LogEntry, width: usize) -> String {
    let full = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    if full.chars().count() > width {
        let mut cut: String = full.chars().take(width - 3).collect();
        cut.push_str("...");
        cut
    } else {
        full
    }
}

/// Local time with offset; stored text is kept when it does not parse.
fn display_date(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%F %T%:z").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(conn: &Connection) -> AppResult<()> {
        let entries = load_log(conn)?;
        if entries.is_empty() {
            info("The internal log is empty.");
            return Ok(());
        }

        let ansi = Regex::new(ANSI_PATTERN).map_err(|e| AppError::Other(e.to_string()))?;

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let op_w = entries
            .iter()
            .map(|e| op_label(e, OP_WIDTH).chars().count())
            .max()
            .unwrap_or(10);

        println!("📜 Internal log:\n");

        for entry in &entries {
            let label = op_label(entry, OP_WIDTH);
            let colour = color_for_operation(&entry.operation);

            // only the operation word is coloured
            let painted = match label.split_once(' ') {
                Some((op, rest)) => format!("{} {rest}", colour.paint(op)),
                None => colour.paint(label.as_str()).to_string(),
            };
            let visible = ansi.replace_all(&painted, "").chars().count();
            let padding = " ".repeat(op_w.saturating_sub(visible));

            println!(
                "{:>id_w$}: {} | {painted}{padding} => {}",
                entry.id,
                display_date(&entry.date),
                entry.message,
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(op: &str, target: &str) -> LogEntry {
        LogEntry {
            id: 1,
            date: "2025-03-01T10:00:00+00:00".into(),
            operation: op.into(),
            target: target.into(),
            message: "m".into(),
        }
    }

    #[test]
    fn labels_are_truncated() {
        let long = "x".repeat(80);
        let label = op_label(&entry("backup", &long), 20);
        assert_eq!(label.chars().count(), 20);
        assert!(label.ends_with("..."));
        assert_eq!(op_label(&entry("init", ""), 20), "init");
    }

    #[test]
    fn unparsable_dates_are_kept() {
        assert_eq!(display_date("yesterday"), "yesterday");
        assert_eq!(
            display_date("2025-03-01T10:00:00+00:00"),
            "2025-03-01 10:00:00+00:00"
        );
    }
}
