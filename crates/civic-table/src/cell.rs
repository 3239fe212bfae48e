// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use time::Date;
use time::macros::format_description;

/// Opaque row identity. Unique within one data array by convention only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for RowId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RowId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Text(String),
    Integer(i64),
    Decimal(f64),
    /// Amount in paise.
    Money(i64),
    Bool(bool),
    Date(Date),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Ordering used by column sorts. Same-kind values compare by their
    /// natural order, text ignores case, and mixed kinds fall back to the
    /// lowercased display text.
    pub fn cmp_value(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Integer(left), Self::Integer(right)) => left.cmp(right),
            (Self::Money(left), Self::Money(right)) => left.cmp(right),
            (Self::Decimal(left), Self::Decimal(right)) => left.total_cmp(right),
            (Self::Integer(left), Self::Decimal(right)) => (*left as f64).total_cmp(right),
            (Self::Decimal(left), Self::Integer(right)) => left.total_cmp(&(*right as f64)),
            (Self::Date(left), Self::Date(right)) => left.cmp(right),
            (Self::Bool(left), Self::Bool(right)) => left.cmp(right),
            (Self::Text(left), Self::Text(right)) => {
                left.to_lowercase().cmp(&right.to_lowercase())
            }
            _ => self
                .to_string()
                .to_lowercase()
                .cmp(&other.to_string().to_lowercase()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(value) => f.write_str(value),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Decimal(value) => write!(f, "{value:.2}"),
            Self::Money(paise) => f.write_str(&format_rupees(*paise)),
            Self::Bool(true) => f.write_str("yes"),
            Self::Bool(false) => f.write_str("no"),
            Self::Date(value) => f.write_str(&format_iso_date(*value)),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Date> for CellValue {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// Anything the view engine can lay out as a row.
pub trait TableRow {
    fn row_id(&self) -> RowId;
    fn cell(&self, key: &str) -> CellValue;
}

/// Flat key/value row. Host screens project their records into this shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: RowId,
    cells: BTreeMap<&'static str, CellValue>,
}

impl Record {
    pub fn new(id: impl Into<RowId>) -> Self {
        Self {
            id: id.into(),
            cells: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: &'static str, value: impl Into<CellValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &'static str, value: impl Into<CellValue>) {
        self.cells.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.get(key)
    }

    pub fn id(&self) -> &RowId {
        &self.id
    }
}

impl TableRow for Record {
    fn row_id(&self) -> RowId {
        self.id.clone()
    }

    fn cell(&self, key: &str) -> CellValue {
        self.cells.get(key).cloned().unwrap_or(CellValue::Empty)
    }
}

/// Ids that appear more than once, in first-seen order.
pub fn duplicate_row_ids<R: TableRow>(rows: &[R]) -> Vec<RowId> {
    let mut seen = std::collections::BTreeSet::new();
    let mut duplicates = Vec::new();
    for row in rows {
        let id = row.row_id();
        if !seen.insert(id.clone()) && !duplicates.contains(&id) {
            duplicates.push(id);
        }
    }
    duplicates
}

/// Formats paise as rupees with Indian digit grouping, e.g. `₹12,34,567.50`.
pub fn format_rupees(paise: i64) -> String {
    let sign = if paise < 0 { "-" } else { "" };
    let absolute = paise.unsigned_abs();
    let rupees = absolute / 100;
    let fraction = absolute % 100;
    format!("{sign}₹{}.{fraction:02}", group_indian(rupees))
}

fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{last_three}", groups.join(","))
}

pub fn format_iso_date(value: Date) -> String {
    value
        .format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

pub fn format_short_date(value: Date) -> String {
    value
        .format(&format_description!(
            "[day] [month repr:short] [year]"
        ))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{
        CellValue, Record, RowId, TableRow, duplicate_row_ids, format_rupees, format_short_date,
    };
    use std::cmp::Ordering;
    use time::{Date, Month};

    #[test]
    fn rupees_use_indian_grouping() {
        assert_eq!(format_rupees(0), "₹0.00");
        assert_eq!(format_rupees(99_950), "₹999.50");
        assert_eq!(format_rupees(123_456_789), "₹12,34,567.89");
        assert_eq!(format_rupees(-10_000_000), "-₹1,00,000.00");
    }

    #[test]
    fn text_compares_without_case() {
        let alpha = CellValue::from("Alpha");
        let beta = CellValue::from("beta");
        assert_eq!(alpha.cmp_value(&beta), Ordering::Less);
        assert_eq!(
            CellValue::from("ABC").cmp_value(&CellValue::from("abc")),
            Ordering::Equal
        );
    }

    #[test]
    fn numbers_compare_numerically_not_lexically() {
        assert_eq!(
            CellValue::Integer(9).cmp_value(&CellValue::Integer(10)),
            Ordering::Less
        );
        assert_eq!(
            CellValue::Decimal(2.5).cmp_value(&CellValue::Integer(2)),
            Ordering::Greater
        );
    }

    #[test]
    fn dates_compare_chronologically() {
        let early = Date::from_calendar_date(2023, Month::December, 31).expect("valid date");
        let late = Date::from_calendar_date(2024, Month::January, 2).expect("valid date");
        assert_eq!(
            CellValue::Date(early).cmp_value(&CellValue::Date(late)),
            Ordering::Less
        );
        assert_eq!(format_short_date(late), "02 Jan 2024");
        assert_eq!(CellValue::Date(late).to_string(), "2024-01-02");
    }

    #[test]
    fn record_returns_empty_for_missing_keys() {
        let record = Record::new(7).with("name", "Alpha");
        assert_eq!(record.row_id(), RowId::Number(7));
        assert_eq!(record.cell("name"), CellValue::from("Alpha"));
        assert_eq!(record.cell("missing"), CellValue::Empty);
    }

    #[test]
    fn duplicate_ids_are_reported_once() {
        let rows = vec![
            Record::new(1),
            Record::new(2),
            Record::new(1),
            Record::new(1),
            Record::new("x"),
        ];
        assert_eq!(duplicate_row_ids(&rows), vec![RowId::Number(1)]);
    }
}
