// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use tracing::debug;

use crate::cell::{RowId, TableRow};

/// One entry of a row's action menu. `name` is opaque to the table; the host
/// decides what it means and whether it is currently allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowActionSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub enabled: bool,
}

impl RowActionSpec {
    pub fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            enabled: true,
        }
    }

    pub fn enabled_if(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Capabilities a host screen hands to the table for per-row actions.
pub trait RowActions {
    type Row: TableRow;

    fn actions_for(&self, row: &Self::Row) -> Vec<RowActionSpec>;

    fn invoke(&mut self, action: &'static str, row_id: &RowId) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Invoked(&'static str),
    Disabled(&'static str),
    Nothing,
}

/// Open dropdown for a single row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMenu {
    row_id: RowId,
    title: String,
    items: Vec<RowActionSpec>,
    cursor: usize,
}

impl ActionMenu {
    /// `None` when the host offers no actions for this row.
    pub fn open<A: RowActions>(row: &A::Row, host: &A, title: impl Into<String>) -> Option<Self> {
        let items = host.actions_for(row);
        if items.is_empty() {
            return None;
        }
        let cursor = items.iter().position(|item| item.enabled).unwrap_or(0);
        Some(Self {
            row_id: row.row_id(),
            title: title.into(),
            items,
            cursor,
        })
    }

    pub fn row_id(&self) -> &RowId {
        &self.row_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[RowActionSpec] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<&RowActionSpec> {
        self.items.get(self.cursor)
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.items.len() as isize;
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor as isize + delta).rem_euclid(len) as usize;
    }

    /// Runs the selected action through the host. Disabled entries never
    /// reach the host.
    pub fn activate<A: RowActions>(&self, host: &mut A) -> Result<ActionOutcome> {
        let Some(item) = self.selected() else {
            return Ok(ActionOutcome::Nothing);
        };
        if !item.enabled {
            return Ok(ActionOutcome::Disabled(item.label));
        }
        debug!(action = item.name, row = %self.row_id, "row action");
        host.invoke(item.name, &self.row_id)?;
        Ok(ActionOutcome::Invoked(item.name))
    }

    pub fn render_lines(&self) -> Vec<String> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let marker = if index == self.cursor { ">" } else { " " };
                let suffix = if item.enabled { "" } else { " (disabled)" };
                format!("{marker} {}{suffix}", item.label)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionMenu, ActionOutcome, RowActionSpec, RowActions};
    use crate::cell::{CellValue, Record, RowId, TableRow};
    use anyhow::Result;

    #[derive(Default)]
    struct Host {
        calls: Vec<(&'static str, RowId)>,
    }

    impl RowActions for Host {
        type Row = Record;

        fn actions_for(&self, row: &Record) -> Vec<RowActionSpec> {
            let protected = row.cell("protected") == CellValue::Bool(true);
            vec![
                RowActionSpec::new("view", "View"),
                RowActionSpec::new("toggle", "Toggle status").enabled_if(!protected),
            ]
        }

        fn invoke(&mut self, action: &'static str, row_id: &RowId) -> Result<()> {
            self.calls.push((action, row_id.clone()));
            Ok(())
        }
    }

    #[test]
    fn activation_forwards_row_identity() -> Result<()> {
        let mut host = Host::default();
        let row = Record::new(42).with("protected", false);
        let mut menu = ActionMenu::open(&row, &host, "row 42").expect("menu has items");

        menu.move_cursor(1);
        assert_eq!(menu.activate(&mut host)?, ActionOutcome::Invoked("toggle"));
        assert_eq!(host.calls, vec![("toggle", RowId::Number(42))]);
        Ok(())
    }

    #[test]
    fn disabled_actions_do_not_reach_host() -> Result<()> {
        let mut host = Host::default();
        let row = Record::new("sys").with("protected", true);
        let mut menu = ActionMenu::open(&row, &host, "system").expect("menu has items");

        menu.move_cursor(1);
        assert_eq!(
            menu.activate(&mut host)?,
            ActionOutcome::Disabled("Toggle status")
        );
        assert!(host.calls.is_empty());
        assert_eq!(menu.render_lines()[1], "> Toggle status (disabled)");
        Ok(())
    }

    #[test]
    fn cursor_wraps() {
        let host = Host::default();
        let row = Record::new(1);
        let mut menu = ActionMenu::open(&row, &host, "row").expect("menu has items");
        menu.move_cursor(-1);
        assert_eq!(menu.cursor(), 1);
        menu.move_cursor(1);
        assert_eq!(menu.cursor(), 0);
        assert_eq!(menu.row_id(), &row.row_id());
    }
}
