// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use civic_app::{DashboardCounts, FormPayload, PersistedTheme, Role, Screen};
use civic_db::{Store, ThemePersistence};
use civic_table::{Record, RowId};
use tracing::info;

pub struct DbRuntime<T> {
    store: Store,
    theme: T,
}

impl<T: ThemePersistence> DbRuntime<T> {
    pub fn new(store: Store, theme: T) -> Self {
        Self { store, theme }
    }
}

impl<T: ThemePersistence> civic_tui::AppRuntime for DbRuntime<T> {
    fn load_records(&mut self, screen: Screen) -> Result<Vec<Record>> {
        Ok(self.store.records(screen))
    }

    fn load_dashboard_counts(&mut self) -> Result<DashboardCounts> {
        Ok(self.store.dashboard_counts())
    }

    fn submit_form(&mut self, role: Role, payload: &FormPayload) -> Result<RowId> {
        let id = self.store.create(payload, role.label())?;
        let body = serde_json::to_string(payload).context("serialize form payload")?;
        info!(
            kind = payload.kind().label(),
            id = %id,
            role = role.label(),
            payload = %body,
            "form submitted"
        );
        Ok(id)
    }

    fn apply_row_action(
        &mut self,
        screen: Screen,
        action: &'static str,
        row_id: &RowId,
    ) -> Result<String> {
        let message = self.store.apply_action(screen, action, row_id)?;
        info!(screen = screen.slug(), action, id = %row_id, "row action applied");
        Ok(message)
    }

    fn load_theme(&mut self) -> Result<Option<PersistedTheme>> {
        self.theme.load()
    }

    fn save_theme(&mut self, theme: PersistedTheme) -> Result<()> {
        self.theme.save(theme)
    }
}
