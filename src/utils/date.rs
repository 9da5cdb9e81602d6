use chrono::{DateTime, NaiveDate};

/// Strict `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// `YYYY-MM-DD`, `DD/MM/YYYY`, or a full RFC 3339 timestamp (date part kept).
pub fn parse_flexible_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Some(d) = parse_date(s) {
        return Some(d);
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%d/%m/%Y") {
        return Some(d);
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flexible_date_formats() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(parse_flexible_date("2024-03-01"), Some(d));
        assert_eq!(parse_flexible_date("01/03/2024"), Some(d));
        assert_eq!(parse_flexible_date("2024-03-01T00:00:00.000Z"), Some(d));
        assert_eq!(parse_flexible_date("March 1st"), None);
    }
}
