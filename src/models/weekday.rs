use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Day of the week a schedule belongs to.
///
/// Persisted under its uppercase Portuguese name, which is also part of the
/// schedule storage key (`schedule_<sector>_<DAY>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "SEGUNDA-FEIRA",
            Weekday::Tuesday => "TERÇA-FEIRA",
            Weekday::Wednesday => "QUARTA-FEIRA",
            Weekday::Thursday => "QUINTA-FEIRA",
            Weekday::Friday => "SEXTA-FEIRA",
            Weekday::Saturday => "SÁBADO",
            Weekday::Sunday => "DOMINGO",
        }
    }

    fn english(&self) -> &'static str {
        match self {
            Weekday::Monday => "MONDAY",
            Weekday::Tuesday => "TUESDAY",
            Weekday::Wednesday => "WEDNESDAY",
            Weekday::Thursday => "THURSDAY",
            Weekday::Friday => "FRIDAY",
            Weekday::Saturday => "SATURDAY",
            Weekday::Sunday => "SUNDAY",
        }
    }
}

/// Uppercase and drop the two accents that appear in the day names.
fn fold(s: &str) -> String {
    s.trim()
        .to_uppercase()
        .chars()
        .map(|c| match c {
            'Ç' => 'C',
            'Á' => 'A',
            other => other,
        })
        .collect()
}

impl FromStr for Weekday {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = fold(s);
        Weekday::ALL
            .into_iter()
            .find(|d| fold(d.as_str()) == wanted || d.english() == wanted)
            .ok_or_else(|| AppError::InvalidDay(s.to_string()))
    }
}

impl TryFrom<String> for Weekday {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Weekday> for String {
    fn from(day: Weekday) -> Self {
        day.as_str().to_string()
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
