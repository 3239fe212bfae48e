// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Search, sort, column visibility and pagination over a fully loaded row set.
//!
//! The engine keeps the caller's rows untouched and maintains a derived index
//! order. Every filter or sort change rebuilds that order and moves back to the
//! first page. Text matching (global search and column filters) ignores case
//! and runs against the text each cell renders as.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::debug;

use crate::cell::{CellValue, RowId, TableRow};
use crate::column::{ColumnDef, truncate_label, validate_columns};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const NO_RESULTS_TEXT: &str = "No results.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: &'static str,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub sort: Option<SortSpec>,
    pub column_filters: BTreeMap<&'static str, String>,
    pub global_filter: String,
    pub hidden_columns: BTreeSet<&'static str>,
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            sort: None,
            column_filters: BTreeMap::new(),
            global_filter: String::new(),
            hidden_columns: BTreeSet::new(),
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    EmptySchema,
    DuplicateColumn(&'static str),
    UnknownColumn(String),
    NotSortable(&'static str),
    NotHideable(&'static str),
    KeepOneColumnVisible,
    InvalidPageSize(usize),
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySchema => f.write_str("table needs at least one column"),
            Self::DuplicateColumn(key) => write!(f, "column key {key:?} is defined twice"),
            Self::UnknownColumn(key) => write!(f, "unknown column {key:?}"),
            Self::NotSortable(label) => write!(f, "column {label} is not sortable"),
            Self::NotHideable(label) => write!(f, "column {label} cannot be hidden"),
            Self::KeepOneColumnVisible => f.write_str("keep one column visible"),
            Self::InvalidPageSize(size) => write!(f, "page size must be positive, got {size}"),
        }
    }
}

impl std::error::Error for ViewError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    SearchSet(String),
    SearchCleared,
    ColumnFilterSet { column: &'static str, text: String },
    ColumnFilterCleared(&'static str),
    FiltersCleared,
    SortAsc(&'static str),
    SortDesc(&'static str),
    SortCleared,
    ColumnHidden(&'static str),
    ColumnShown(&'static str),
    ColumnsShown,
    Page { index: usize, count: usize },
}

impl ViewStatus {
    pub fn message(&self) -> String {
        match self {
            Self::SearchSet(query) => format!("search {:?}", truncate_label(query, 20)),
            Self::SearchCleared => "search cleared".to_owned(),
            Self::ColumnFilterSet { column, text } => {
                format!("filter {column} ~ {:?}", truncate_label(text, 20))
            }
            Self::ColumnFilterCleared(column) => format!("filter {column} cleared"),
            Self::FiltersCleared => "filters cleared".to_owned(),
            Self::SortAsc(column) => format!("sort {column} asc"),
            Self::SortDesc(column) => format!("sort {column} desc"),
            Self::SortCleared => "sort cleared".to_owned(),
            Self::ColumnHidden(column) => format!("column hidden: {column}"),
            Self::ColumnShown(column) => format!("column shown: {column}"),
            Self::ColumnsShown => "all columns shown".to_owned(),
            Self::Page { index, count } => format!("page {}/{}", index + 1, (*count).max(1)),
        }
    }
}

/// What the table body shows for the current page.
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody<'a, R> {
    Rows(Vec<&'a R>),
    Placeholder(&'static str),
}

#[derive(Debug, Clone)]
pub struct TableView<R> {
    columns: Vec<ColumnDef>,
    rows: Vec<R>,
    state: ViewState,
    order: Vec<usize>,
}

impl<R: TableRow> TableView<R> {
    pub fn new(columns: Vec<ColumnDef>, rows: Vec<R>) -> Result<Self, ViewError> {
        validate_columns(&columns)?;
        let mut view = Self {
            columns,
            rows,
            state: ViewState::default(),
            order: Vec::new(),
        };
        view.rebuild_order();
        Ok(view)
    }

    pub fn with_page_size(mut self, page_size: usize) -> Result<Self, ViewError> {
        if page_size == 0 {
            return Err(ViewError::InvalidPageSize(page_size));
        }
        self.state.page_size = page_size;
        self.state.page_index = 0;
        Ok(self)
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|column| column.key == key)
    }

    pub fn visible_columns(&self) -> impl Iterator<Item = &ColumnDef> + Clone + '_ {
        self.columns
            .iter()
            .filter(|column| !self.state.hidden_columns.contains(column.key))
    }

    pub fn is_hidden(&self, key: &str) -> bool {
        self.state.hidden_columns.contains(key)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The rows exactly as supplied.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn row_by_id(&self, id: &RowId) -> Option<&R> {
        self.rows.iter().find(|row| row.row_id() == *id)
    }

    pub fn total_len(&self) -> usize {
        self.rows.len()
    }

    pub fn filtered_len(&self) -> usize {
        self.order.len()
    }

    /// Filtered and sorted rows. The iterator can be cloned and restarted.
    pub fn filtered_rows(&self) -> impl Iterator<Item = &R> + Clone + '_ {
        self.order.iter().map(|index| &self.rows[*index])
    }

    pub fn page_size(&self) -> usize {
        self.state.page_size
    }

    pub fn page_index(&self) -> usize {
        self.state.page_index
    }

    pub fn page_count(&self) -> usize {
        self.order.len().div_ceil(self.state.page_size)
    }

    pub fn page_rows(&self) -> impl Iterator<Item = &R> + Clone + '_ {
        self.filtered_rows()
            .skip(self.state.page_index * self.state.page_size)
            .take(self.state.page_size)
    }

    pub fn body(&self) -> TableBody<'_, R> {
        if self.order.is_empty() {
            return TableBody::Placeholder(NO_RESULTS_TEXT);
        }
        TableBody::Rows(self.page_rows().collect())
    }

    pub fn set_global_filter(&mut self, text: impl Into<String>) -> ViewStatus {
        let text = text.into();
        self.state.global_filter = text.clone();
        self.reset_after_change();
        debug!(query = %text, rows = self.order.len(), "global filter applied");
        if text.is_empty() {
            ViewStatus::SearchCleared
        } else {
            ViewStatus::SearchSet(text)
        }
    }

    pub fn set_column_filter(
        &mut self,
        key: &str,
        text: impl Into<String>,
    ) -> Result<ViewStatus, ViewError> {
        let column = self.require_column(key)?;
        let (key, label) = (column.key, column.label);
        let text = text.into();
        let status = if text.is_empty() {
            self.state.column_filters.remove(key);
            ViewStatus::ColumnFilterCleared(label)
        } else {
            self.state.column_filters.insert(key, text.clone());
            ViewStatus::ColumnFilterSet {
                column: label,
                text,
            }
        };
        self.reset_after_change();
        debug!(column = key, rows = self.order.len(), "column filter applied");
        Ok(status)
    }

    pub fn clear_filters(&mut self) -> ViewStatus {
        self.state.global_filter.clear();
        self.state.column_filters.clear();
        self.reset_after_change();
        ViewStatus::FiltersCleared
    }

    /// Cycles none → asc → desc → none. Sorting a different column drops the
    /// previous sort.
    pub fn toggle_sort(&mut self, key: &str) -> Result<ViewStatus, ViewError> {
        let column = self.require_column(key)?;
        if !column.is_sortable() {
            return Err(ViewError::NotSortable(column.label));
        }
        let (key, label) = (column.key, column.label);

        let next = match self.state.sort {
            Some(SortSpec {
                column,
                direction: SortDirection::Asc,
            }) if column == key => Some(SortDirection::Desc),
            Some(SortSpec {
                column,
                direction: SortDirection::Desc,
            }) if column == key => None,
            _ => Some(SortDirection::Asc),
        };
        self.state.sort = next.map(|direction| SortSpec {
            column: key,
            direction,
        });
        self.reset_after_change();
        debug!(column = key, direction = ?next, "sort toggled");

        Ok(match next {
            Some(SortDirection::Asc) => ViewStatus::SortAsc(label),
            Some(SortDirection::Desc) => ViewStatus::SortDesc(label),
            None => ViewStatus::SortCleared,
        })
    }

    pub fn clear_sort(&mut self) -> ViewStatus {
        self.state.sort = None;
        self.reset_after_change();
        ViewStatus::SortCleared
    }

    /// Hidden columns leave rendering and the global search. A filter on the
    /// hidden column is dropped with it.
    pub fn toggle_column_visibility(&mut self, key: &str) -> Result<ViewStatus, ViewError> {
        let column = self.require_column(key)?;
        let (key, label, hideable) = (column.key, column.label, column.hideable);

        if self.state.hidden_columns.remove(key) {
            self.reset_after_change();
            return Ok(ViewStatus::ColumnShown(label));
        }
        if !hideable {
            return Err(ViewError::NotHideable(label));
        }
        if self.visible_columns().count() <= 1 {
            return Err(ViewError::KeepOneColumnVisible);
        }

        self.state.hidden_columns.insert(key);
        self.state.column_filters.remove(key);
        self.reset_after_change();
        debug!(column = key, "column hidden");
        Ok(ViewStatus::ColumnHidden(label))
    }

    pub fn show_all_columns(&mut self) -> ViewStatus {
        self.state.hidden_columns.clear();
        self.reset_after_change();
        ViewStatus::ColumnsShown
    }

    /// Clamps to the last page; returns the index actually selected.
    pub fn set_page_index(&mut self, index: usize) -> usize {
        self.state.page_index = index.min(self.page_count().saturating_sub(1));
        self.state.page_index
    }

    pub fn next_page(&mut self) -> ViewStatus {
        self.set_page_index(self.state.page_index.saturating_add(1));
        self.page_status()
    }

    pub fn previous_page(&mut self) -> ViewStatus {
        self.set_page_index(self.state.page_index.saturating_sub(1));
        self.page_status()
    }

    pub fn page_status(&self) -> ViewStatus {
        ViewStatus::Page {
            index: self.state.page_index,
            count: self.page_count(),
        }
    }

    /// Replaces the row set after a host mutation. View state survives; the
    /// page index is clamped rather than reset.
    pub fn set_data(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.rebuild_order();
        self.set_page_index(self.state.page_index);
    }

    pub fn header_label(&self, key: &str) -> Option<String> {
        let column = self.column(key)?;
        let mut label = column.label.to_owned();
        match self.state.sort {
            Some(sort) if sort.column == column.key => label.push_str(match sort.direction {
                SortDirection::Asc => " ↑",
                SortDirection::Desc => " ↓",
            }),
            _ if column.is_sortable() => label.push_str(" ⇅"),
            _ => {}
        }
        if self.state.column_filters.contains_key(column.key) {
            label.push_str(" ▼");
        }
        Some(label)
    }

    pub fn title(&self, name: &str) -> String {
        let visible = self.visible_columns().count();
        let mut parts = vec![format!(
            "{name} r:{}/{} c:{visible}/{}",
            self.filtered_len(),
            self.total_len(),
            self.columns.len(),
        )];
        if let Some(sort) = self.state.sort
            && let Some(column) = self.column(sort.column)
        {
            let direction = match sort.direction {
                SortDirection::Asc => "asc",
                SortDirection::Desc => "desc",
            };
            parts.push(format!("sort {}:{direction}", column.label));
        }
        if !self.state.global_filter.is_empty() {
            parts.push(format!(
                "search {:?}",
                truncate_label(&self.state.global_filter, 12)
            ));
        }
        if !self.state.column_filters.is_empty() {
            parts.push(format!("filters {}", self.state.column_filters.len()));
        }
        let hidden = self.columns.len().saturating_sub(visible);
        if hidden > 0 {
            parts.push(format!("hidden {hidden}"));
        }
        parts.push(format!(
            "page {}/{}",
            self.state.page_index + 1,
            self.page_count().max(1)
        ));
        parts.join(" | ")
    }

    fn require_column(&self, key: &str) -> Result<&ColumnDef, ViewError> {
        self.column(key)
            .ok_or_else(|| ViewError::UnknownColumn(key.to_owned()))
    }

    fn reset_after_change(&mut self) {
        self.rebuild_order();
        self.state.page_index = 0;
    }

    fn rebuild_order(&mut self) {
        let global = self.state.global_filter.to_lowercase();
        let column_filters = self
            .state
            .column_filters
            .iter()
            .filter_map(|(key, text)| Some((self.column(key)?, text.to_lowercase())))
            .collect::<Vec<_>>();
        let visible = self.visible_columns().collect::<Vec<_>>();

        let mut order = (0..self.rows.len())
            .filter(|index| {
                let row = &self.rows[*index];
                let column_match = column_filters
                    .iter()
                    .all(|(column, needle)| cell_contains(column, row, needle));
                let global_match = global.is_empty()
                    || visible
                        .iter()
                        .any(|column| cell_contains(column, row, &global));
                column_match && global_match
            })
            .collect::<Vec<_>>();

        if let Some(sort) = self.state.sort {
            // `sort_by` is stable, so equal keys keep their input order in
            // both directions.
            order.sort_by(|left, right| {
                compare_for_sort(
                    &self.rows[*left].cell(sort.column),
                    &self.rows[*right].cell(sort.column),
                    sort.direction,
                )
            });
        }

        self.order = order;
    }
}

/// Empty cells sink to the bottom regardless of direction.
fn compare_for_sort(left: &CellValue, right: &CellValue, direction: SortDirection) -> Ordering {
    match (left.is_null(), right.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match direction {
            SortDirection::Asc => left.cmp_value(right),
            SortDirection::Desc => left.cmp_value(right).reverse(),
        },
    }
}

fn cell_contains<R: TableRow>(column: &ColumnDef, row: &R, needle_lower: &str) -> bool {
    column
        .search_text(&row.cell(column.key))
        .to_lowercase()
        .contains(needle_lower)
}

#[cfg(test)]
mod tests {
    use super::{
        DEFAULT_PAGE_SIZE, NO_RESULTS_TEXT, SortDirection, SortSpec, TableBody, TableView,
        ViewError, ViewStatus,
    };
    use crate::cell::{CellValue, Record, RowId, TableRow};
    use crate::column::{CellRender, ColumnDef, DateStyle, Tone};
    use time::{Date, Month};

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("id", "ID").sortable().always_visible(),
            ColumnDef::new("name", "Name").sortable(),
            ColumnDef::new("active", "Active"),
        ]
    }

    fn scenario_rows() -> Vec<Record> {
        vec![
            Record::new(1)
                .with("id", 1)
                .with("name", "Alpha")
                .with("active", true),
            Record::new(2)
                .with("id", 2)
                .with("name", "beta")
                .with("active", false),
            Record::new(3)
                .with("id", 3)
                .with("name", "Gamma")
                .with("active", true),
        ]
    }

    fn ids<'a>(rows: impl Iterator<Item = &'a Record>) -> Vec<RowId> {
        rows.map(TableRow::row_id).collect()
    }

    fn numbered(count: i64) -> Vec<Record> {
        (1..=count)
            .map(|id| {
                Record::new(id)
                    .with("id", id)
                    .with("name", format!("row {id}"))
            })
            .collect()
    }

    #[test]
    fn global_filter_ignores_case() -> Result<(), ViewError> {
        let mut view = TableView::new(columns(), scenario_rows())?;

        view.set_global_filter("a");
        assert_eq!(view.filtered_len(), 3);

        view.set_global_filter("Gamma");
        assert_eq!(ids(view.filtered_rows()), vec![RowId::Number(3)]);

        view.set_global_filter("GAMMA");
        assert_eq!(ids(view.filtered_rows()), vec![RowId::Number(3)]);
        Ok(())
    }

    #[test]
    fn search_matches_rendered_text() -> Result<(), ViewError> {
        let columns = vec![
            ColumnDef::new("id", "ID").always_visible(),
            ColumnDef::new("status", "Status").render(CellRender::Flag {
                on: ("active", Tone::Success),
                off: ("inactive", Tone::Neutral),
            }),
            ColumnDef::new("joined", "Joined").render(CellRender::Date(DateStyle::Short)),
            ColumnDef::new("note", "Note").render(CellRender::Truncate(8)),
        ];
        let date = |month| Date::from_calendar_date(2024, month, 9).expect("valid date");
        let rows = vec![
            Record::new(1)
                .with("id", 1)
                .with("status", true)
                .with("joined", date(Month::March))
                .with("note", "streetlight outage"),
            Record::new(2)
                .with("id", 2)
                .with("status", false)
                .with("joined", date(Month::May))
                .with("note", "water supply"),
        ];
        let mut view = TableView::new(columns, rows)?;

        view.set_global_filter("inactive");
        assert_eq!(ids(view.filtered_rows()), vec![RowId::Number(2)]);

        view.set_global_filter("no");
        assert_eq!(view.filtered_len(), 0);

        view.set_global_filter("mar 2024");
        assert_eq!(ids(view.filtered_rows()), vec![RowId::Number(1)]);

        view.set_global_filter("2024-03");
        assert_eq!(view.filtered_len(), 0);

        view.set_global_filter("outage");
        assert_eq!(ids(view.filtered_rows()), vec![RowId::Number(1)]);

        view.set_global_filter("");
        view.set_column_filter("status", "INACTIVE")?;
        assert_eq!(ids(view.filtered_rows()), vec![RowId::Number(2)]);
        Ok(())
    }

    #[test]
    fn ascending_name_sort_is_case_insensitive() -> Result<(), ViewError> {
        let mut view = TableView::new(columns(), scenario_rows())?;
        assert_eq!(view.toggle_sort("name")?, ViewStatus::SortAsc("Name"));
        let names = view
            .filtered_rows()
            .map(|row| row.cell("name").to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Alpha", "beta", "Gamma"]);
        Ok(())
    }

    #[test]
    fn sort_cycles_through_three_states() -> Result<(), ViewError> {
        let mut view = TableView::new(columns(), scenario_rows())?;
        let original = ids(view.filtered_rows());

        assert_eq!(view.toggle_sort("name")?, ViewStatus::SortAsc("Name"));
        assert_eq!(view.toggle_sort("name")?, ViewStatus::SortDesc("Name"));
        assert_eq!(
            ids(view.filtered_rows()),
            vec![RowId::Number(3), RowId::Number(2), RowId::Number(1)]
        );
        assert_eq!(view.toggle_sort("name")?, ViewStatus::SortCleared);
        assert_eq!(view.state().sort, None);
        assert_eq!(ids(view.filtered_rows()), original);
        Ok(())
    }

    #[test]
    fn sorting_new_column_resets_previous() -> Result<(), ViewError> {
        let mut view = TableView::new(columns(), scenario_rows())?;
        view.toggle_sort("name")?;
        view.toggle_sort("name")?;
        assert_eq!(view.toggle_sort("id")?, ViewStatus::SortAsc("ID"));
        assert_eq!(
            view.state().sort,
            Some(SortSpec {
                column: "id",
                direction: SortDirection::Asc,
            })
        );
        Ok(())
    }

    #[test]
    fn static_headers_refuse_sorting() -> Result<(), ViewError> {
        let mut view = TableView::new(columns(), scenario_rows())?;
        assert_eq!(
            view.toggle_sort("active"),
            Err(ViewError::NotSortable("Active"))
        );
        assert_eq!(
            view.toggle_sort("nope"),
            Err(ViewError::UnknownColumn("nope".to_owned()))
        );
        Ok(())
    }

    #[test]
    fn empty_cells_sort_last_in_both_directions() -> Result<(), ViewError> {
        let rows = vec![
            Record::new(1).with("id", 1).with("name", CellValue::Empty),
            Record::new(2).with("id", 2).with("name", "b"),
            Record::new(3).with("id", 3).with("name", "a"),
        ];
        let mut view = TableView::new(columns(), rows)?;
        view.toggle_sort("name")?;
        assert_eq!(
            ids(view.filtered_rows()),
            vec![RowId::Number(3), RowId::Number(2), RowId::Number(1)]
        );
        view.toggle_sort("name")?;
        assert_eq!(
            ids(view.filtered_rows()),
            vec![RowId::Number(2), RowId::Number(3), RowId::Number(1)]
        );
        Ok(())
    }

    #[test]
    fn dates_sort_chronologically() -> Result<(), ViewError> {
        let date = |day| Date::from_calendar_date(2024, Month::May, day).expect("valid date");
        let rows = vec![
            Record::new(1).with("filed", date(20)),
            Record::new(2).with("filed", date(3)),
            Record::new(3).with("filed", date(11)),
        ];
        let mut view = TableView::new(vec![ColumnDef::new("filed", "Filed").sortable()], rows)?;
        view.toggle_sort("filed")?;
        assert_eq!(
            ids(view.filtered_rows()),
            vec![RowId::Number(2), RowId::Number(3), RowId::Number(1)]
        );
        Ok(())
    }

    #[test]
    fn column_filters_combine_with_and() -> Result<(), ViewError> {
        let mut view = TableView::new(columns(), scenario_rows())?;
        view.set_column_filter("name", "a")?;
        assert_eq!(view.filtered_len(), 3);
        view.set_column_filter("active", "yes")?;
        assert_eq!(
            ids(view.filtered_rows()),
            vec![RowId::Number(1), RowId::Number(3)]
        );
        view.set_global_filter("gam");
        assert_eq!(ids(view.filtered_rows()), vec![RowId::Number(3)]);

        assert_eq!(
            view.set_column_filter("active", "")?,
            ViewStatus::ColumnFilterCleared("Active")
        );
        assert_eq!(view.clear_filters(), ViewStatus::FiltersCleared);
        assert_eq!(view.filtered_len(), 3);
        Ok(())
    }

    #[test]
    fn hidden_columns_leave_global_search() -> Result<(), ViewError> {
        let rows = vec![
            Record::new(1)
                .with("id", 1)
                .with("name", "Alpha")
                .with("active", "zeta"),
            Record::new(2)
                .with("id", 2)
                .with("name", "beta")
                .with("active", "omega"),
        ];
        let mut view = TableView::new(columns(), rows)?;
        view.set_global_filter("zeta");
        assert_eq!(view.filtered_len(), 1);

        assert_eq!(
            view.toggle_column_visibility("active")?,
            ViewStatus::ColumnHidden("Active")
        );
        assert_eq!(view.filtered_len(), 0);
        assert_eq!(view.body(), TableBody::Placeholder(NO_RESULTS_TEXT));

        assert_eq!(
            view.toggle_column_visibility("active")?,
            ViewStatus::ColumnShown("Active")
        );
        assert_eq!(view.filtered_len(), 1);
        Ok(())
    }

    #[test]
    fn hiding_a_column_drops_its_filter() -> Result<(), ViewError> {
        let mut view = TableView::new(columns(), scenario_rows())?;
        view.set_column_filter("name", "beta")?;
        assert_eq!(view.filtered_len(), 1);
        view.toggle_column_visibility("name")?;
        assert!(view.state().column_filters.is_empty());
        assert_eq!(view.filtered_len(), 3);
        Ok(())
    }

    #[test]
    fn visibility_rules() -> Result<(), ViewError> {
        let mut view = TableView::new(columns(), scenario_rows())?;
        assert_eq!(
            view.toggle_column_visibility("id"),
            Err(ViewError::NotHideable("ID"))
        );

        let mut single = TableView::new(vec![ColumnDef::new("name", "Name")], scenario_rows())?;
        assert_eq!(
            single.toggle_column_visibility("name"),
            Err(ViewError::KeepOneColumnVisible)
        );

        view.toggle_column_visibility("name")?;
        view.toggle_column_visibility("active")?;
        assert_eq!(view.visible_columns().count(), 1);
        assert_eq!(view.show_all_columns(), ViewStatus::ColumnsShown);
        assert_eq!(view.visible_columns().count(), 3);
        Ok(())
    }

    #[test]
    fn pagination_clamps_and_counts() -> Result<(), ViewError> {
        let mut view = TableView::new(columns(), numbered(23))?;
        assert_eq!(view.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(view.page_count(), 3);
        assert_eq!(view.page_rows().count(), 10);

        assert_eq!(view.set_page_index(99), 2);
        assert_eq!(view.page_rows().count(), 3);
        assert_eq!(view.next_page(), ViewStatus::Page { index: 2, count: 3 });

        view.set_page_index(0);
        assert_eq!(
            view.previous_page(),
            ViewStatus::Page { index: 0, count: 3 }
        );
        assert_eq!(view.next_page().message(), "page 2/3");
        Ok(())
    }

    #[test]
    fn filter_and_sort_changes_reset_to_first_page() -> Result<(), ViewError> {
        let mut view = TableView::new(columns(), numbered(30))?.with_page_size(5)?;
        view.set_page_index(4);
        view.set_global_filter("row");
        assert_eq!(view.page_index(), 0);

        view.set_page_index(3);
        view.toggle_sort("id")?;
        assert_eq!(view.page_index(), 0);

        view.set_page_index(2);
        view.set_column_filter("name", "1")?;
        assert_eq!(view.page_index(), 0);

        view.set_page_index(1);
        view.toggle_column_visibility("name")?;
        assert_eq!(view.page_index(), 0);
        Ok(())
    }

    #[test]
    fn set_data_keeps_state_and_clamps_page() -> Result<(), ViewError> {
        let mut view = TableView::new(columns(), numbered(25))?;
        view.toggle_sort("id")?;
        view.toggle_sort("id")?;
        view.set_page_index(2);

        view.set_data(numbered(12));
        assert_eq!(view.page_index(), 1);
        assert_eq!(view.state().sort.map(|sort| sort.column), Some("id"));
        assert_eq!(
            view.filtered_rows().next().map(TableRow::row_id),
            Some(RowId::Number(12))
        );
        Ok(())
    }

    #[test]
    fn empty_data_renders_placeholder_on_page_zero() -> Result<(), ViewError> {
        let mut view = TableView::new(columns(), Vec::<Record>::new())?;
        assert_eq!(view.page_count(), 0);
        assert_eq!(view.set_page_index(5), 0);
        assert_eq!(view.body(), TableBody::Placeholder(NO_RESULTS_TEXT));
        Ok(())
    }

    #[test]
    fn zero_page_size_is_rejected() -> Result<(), ViewError> {
        let view = TableView::new(columns(), scenario_rows())?;
        assert_eq!(
            view.with_page_size(0).err(),
            Some(ViewError::InvalidPageSize(0))
        );
        Ok(())
    }

    #[test]
    fn input_rows_are_never_reordered() -> Result<(), ViewError> {
        let rows = scenario_rows();
        let mut view = TableView::new(columns(), rows.clone())?;
        view.toggle_sort("name")?;
        view.toggle_sort("name")?;
        view.set_global_filter("a");
        assert_eq!(view.rows(), rows.as_slice());
        Ok(())
    }

    #[test]
    fn header_and_title_reflect_state() -> Result<(), ViewError> {
        let mut view = TableView::new(columns(), scenario_rows())?;
        assert_eq!(view.header_label("name").as_deref(), Some("Name ⇅"));
        assert_eq!(view.header_label("active").as_deref(), Some("Active"));

        view.toggle_sort("name")?;
        view.set_column_filter("name", "a")?;
        view.toggle_column_visibility("active")?;
        assert_eq!(view.header_label("name").as_deref(), Some("Name ↑ ▼"));
        assert_eq!(
            view.title("users"),
            "users r:3/3 c:2/3 | sort Name:asc | filters 1 | hidden 1 | page 1/1"
        );
        Ok(())
    }
}
