//! Time-slot utilities.
//!
//! A working day is 48 half-hour slots labelled "HH:MM", starting at 05:00
//! and wrapping past midnight up to 04:30. Slots between 00:00 and 04:30
//! belong to the end of the working day, so calculations shift them by 24h.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, Timelike};
use std::collections::BTreeMap;

pub const SLOT_COUNT: u32 = 48;
pub const SLOT_MINUTES: u32 = 30;
pub const DAY_START_HOUR: u32 = 5;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// All slot labels in working-day order: 05:00, 05:30, ..., 04:30.
pub fn time_slots() -> Vec<String> {
    (0..SLOT_COUNT)
        .map(|i| {
            let total = DAY_START_HOUR * 60 + i * SLOT_MINUTES;
            format!("{:02}:{:02}", (total / 60) % 24, total % 60)
        })
        .collect()
}

/// Normalize a user-supplied slot ("5:30" → "05:30").
pub fn parse_slot(label: &str) -> AppResult<String> {
    let t = parse_time(label).ok_or_else(|| AppError::InvalidSlot(label.to_string()))?;
    if t.minute() % SLOT_MINUTES != 0 {
        return Err(AppError::InvalidSlot(label.to_string()));
    }
    Ok(format!("{:02}:{:02}", t.hour(), t.minute()))
}

pub fn is_slot(label: &str) -> bool {
    parse_slot(label).is_ok_and(|normalized| normalized == label)
}

/// Minutes since 00:00 of the working day, with early-morning slots moved
/// past 24:00 (e.g. "01:30" → 1530).
pub fn calculation_minutes(label: &str) -> Option<u32> {
    let t = parse_time(label)?;
    let mut hours = t.hour();
    if hours < DAY_START_HOUR {
        hours += 24;
    }
    Some(hours * 60 + t.minute())
}

/// Inverse of `calculation_minutes`, for display ("25:30" → "01:30").
pub fn display_label(minutes: u32) -> String {
    let hours = (minutes / 60) % 24;
    format!("{:02}:{:02}", hours, minutes % 60)
}

/// Accumulated totals are never wrapped: 1530 → "25:30".
pub fn format_total_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Hours worked for one schedule: half an hour per marked slot.
pub fn worked_hours(schedule: &BTreeMap<String, bool>) -> f64 {
    let marked = schedule
        .iter()
        .filter(|(label, marked)| **marked && is_slot(label))
        .count();
    marked as f64 * 0.5
}

/// First and last marked slot of a shift, in working-day order.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftSpan {
    pub start: String,
    /// End of the last marked slot.
    pub end: String,
    pub hours: f64,
}

pub fn shift_span(schedule: &BTreeMap<String, bool>) -> Option<ShiftSpan> {
    let mut marked: Vec<u32> = schedule
        .iter()
        .filter(|(label, marked)| **marked && is_slot(label))
        .filter_map(|(label, _)| calculation_minutes(label))
        .collect();

    marked.sort_unstable();

    let first = *marked.first()?;
    let last = *marked.last()?;

    Some(ShiftSpan {
        start: display_label(first),
        end: display_label(last + SLOT_MINUTES),
        hours: worked_hours(schedule),
    })
}

/// Empty slot map (every slot unmarked).
pub fn blank_schedule() -> BTreeMap<String, bool> {
    time_slots().into_iter().map(|s| (s, false)).collect()
}

/// Slots from `from` (inclusive) to `to` (exclusive), in working-day order.
/// "22:00".."01:00" covers 22:00 through 00:30.
pub fn slot_range(from: &str, to: &str) -> AppResult<Vec<String>> {
    let start = calculation_minutes(&parse_slot(from)?)
        .ok_or_else(|| AppError::InvalidSlot(from.to_string()))?;
    let mut end = calculation_minutes(&parse_slot(to)?)
        .ok_or_else(|| AppError::InvalidSlot(to.to_string()))?;

    // "04:30-05:00": the day's last slot, ending at the next day's start.
    if end == DAY_START_HOUR * 60 {
        end += 24 * 60;
    }

    if end <= start {
        return Err(AppError::InvalidSlot(format!("{from}-{to}")));
    }

    Ok((start..end)
        .step_by(SLOT_MINUTES as usize)
        .map(display_label)
        .collect())
}
