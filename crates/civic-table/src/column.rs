// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::cell::{CellValue, format_iso_date, format_rupees, format_short_date};
use crate::view::ViewError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRule {
    Static,
    Sortable,
}

/// Semantic color of a rendered cell. Themes map tones to concrete colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    Iso,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRender {
    Plain,
    /// Text value → tone lookup; unknown values render neutral.
    Badge(&'static [(&'static str, Tone)]),
    /// Boolean rendered as one of two labels.
    Flag {
        on: (&'static str, Tone),
        off: (&'static str, Tone),
    },
    Date(DateStyle),
    Truncate(usize),
    Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCell {
    pub text: String,
    pub tone: Option<Tone>,
}

impl RenderedCell {
    fn plain(text: String) -> Self {
        Self { text, tone: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub key: &'static str,
    pub label: &'static str,
    pub header: HeaderRule,
    pub render: CellRender,
    pub hideable: bool,
}

impl ColumnDef {
    pub fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            header: HeaderRule::Static,
            render: CellRender::Plain,
            hideable: true,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.header = HeaderRule::Sortable;
        self
    }

    pub fn render(mut self, render: CellRender) -> Self {
        self.render = render;
        self
    }

    pub fn always_visible(mut self) -> Self {
        self.hideable = false;
        self
    }

    pub fn is_sortable(&self) -> bool {
        self.header == HeaderRule::Sortable
    }

    pub fn render_cell(&self, value: &CellValue) -> RenderedCell {
        match (self.render, value) {
            (_, CellValue::Empty) => RenderedCell::plain(String::new()),
            (CellRender::Badge(tones), value) => {
                let text = value.to_string();
                let tone = tones
                    .iter()
                    .find(|(label, _)| label.eq_ignore_ascii_case(&text))
                    .map_or(Tone::Neutral, |(_, tone)| *tone);
                RenderedCell {
                    text,
                    tone: Some(tone),
                }
            }
            (CellRender::Flag { on, off }, CellValue::Bool(flag)) => {
                let (text, tone) = if *flag { on } else { off };
                RenderedCell {
                    text: text.to_owned(),
                    tone: Some(tone),
                }
            }
            (CellRender::Date(DateStyle::Iso), CellValue::Date(date)) => {
                RenderedCell::plain(format_iso_date(*date))
            }
            (CellRender::Date(DateStyle::Short), CellValue::Date(date)) => {
                RenderedCell::plain(format_short_date(*date))
            }
            (CellRender::Truncate(max_chars), value) => {
                RenderedCell::plain(truncate_label(&value.to_string(), max_chars))
            }
            (CellRender::Money, CellValue::Money(paise) | CellValue::Integer(paise)) => {
                RenderedCell::plain(format_rupees(*paise))
            }
            (_, value) => RenderedCell::plain(value.to_string()),
        }
    }

    /// Text that search and column filters match against: what the cell
    /// shows, except truncated cells keep their full value.
    pub fn search_text(&self, value: &CellValue) -> String {
        match self.render {
            CellRender::Truncate(_) => value.to_string(),
            _ => self.render_cell(value).text,
        }
    }
}

/// Rejects empty schemas and repeated keys.
pub fn validate_columns(columns: &[ColumnDef]) -> Result<(), ViewError> {
    if columns.is_empty() {
        return Err(ViewError::EmptySchema);
    }
    let mut seen = BTreeSet::new();
    for column in columns {
        if !seen.insert(column.key) {
            return Err(ViewError::DuplicateColumn(column.key));
        }
    }
    Ok(())
}

pub fn truncate_label(value: &str, max_chars: usize) -> String {
    let mut chars = value.chars();
    let truncated: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{truncated}…")
    } else {
        truncated
    }
}
