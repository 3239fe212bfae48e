// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod render;

use anyhow::{Context, Result};
use civic_app::schema::columns_for;
use civic_app::{
    ACTION_VIEW, AppCommand, AppEvent, AppMode, AppState, DashboardCounts, FieldKind, FormErrors,
    FormKind, FormPayload, PersistedTheme, Role, Screen, ThemeStore, row_actions_for,
};
use civic_table::{
    ActionMenu, ActionOutcome, Record, RowActionSpec, RowActions, RowId, TableRow, TableView,
    ViewError, ViewStatus,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

const STATUS_TTL: Duration = Duration::from_secs(4);
const POLL_INTERVAL: Duration = Duration::from_millis(120);

/// Storage-facing operations the host screens call into.
pub trait AppRuntime {
    fn load_records(&mut self, screen: Screen) -> Result<Vec<Record>>;
    fn load_dashboard_counts(&mut self) -> Result<DashboardCounts>;
    /// Creates the record described by a validated form on behalf of `role`
    /// and returns its id.
    fn submit_form(&mut self, role: Role, payload: &FormPayload) -> Result<RowId>;
    /// Runs a lifecycle action and returns the toast text.
    fn apply_row_action(
        &mut self,
        screen: Screen,
        action: &'static str,
        row_id: &RowId,
    ) -> Result<String>;
    /// `Ok(None)` when no theme has been saved.
    fn load_theme(&mut self) -> Result<Option<PersistedTheme>>;
    fn save_theme(&mut self, theme: PersistedTheme) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiOptions {
    /// Overrides each screen's own page size.
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptTarget {
    Search,
    Column(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PromptUiState {
    target: PromptTarget,
    input: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct ColumnMenuUiState {
    cursor: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FormUiState {
    payload: FormPayload,
    field_index: usize,
    errors: FormErrors,
}

impl FormUiState {
    fn blank(kind: FormKind) -> Self {
        Self {
            payload: FormPayload::blank_for(kind),
            field_index: 0,
            errors: FormErrors::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DetailUiState {
    title: String,
    fields: Vec<(&'static str, String)>,
}

#[derive(Debug, Clone)]
struct ViewData {
    theme: ThemeStore,
    options: UiOptions,
    dashboard_counts: DashboardCounts,
    table: Option<TableView<Record>>,
    table_screen: Option<Screen>,
    selected_row: usize,
    selected_col: usize,
    prompt: Option<PromptUiState>,
    column_menu: Option<ColumnMenuUiState>,
    action_menu: Option<ActionMenu>,
    form: Option<FormUiState>,
    detail: Option<DetailUiState>,
    help_visible: bool,
    status_token: u64,
}

impl ViewData {
    fn new(theme: ThemeStore, options: UiOptions) -> Self {
        Self {
            theme,
            options,
            dashboard_counts: DashboardCounts::default(),
            table: None,
            table_screen: None,
            selected_row: 0,
            selected_col: 0,
            prompt: None,
            column_menu: None,
            action_menu: None,
            form: None,
            detail: None,
            help_visible: false,
            status_token: 0,
        }
    }

    fn selected_record(&self) -> Option<&Record> {
        self.table.as_ref()?.page_rows().nth(self.selected_row)
    }

    fn selected_column_key(&self) -> Option<&'static str> {
        self.table
            .as_ref()?
            .visible_columns()
            .nth(self.selected_col)
            .map(|column| column.key)
    }

    fn clamp_cursor(&mut self) {
        let Some(table) = &self.table else {
            self.selected_row = 0;
            self.selected_col = 0;
            return;
        };
        let rows = table.page_rows().count();
        let columns = table.visible_columns().count();
        self.selected_row = self.selected_row.min(rows.saturating_sub(1));
        self.selected_col = self.selected_col.min(columns.saturating_sub(1));
    }

    fn close_overlays(&mut self) {
        self.prompt = None;
        self.column_menu = None;
        self.action_menu = None;
        self.detail = None;
    }
}

/// Row-action capabilities for the active screen. `view` stays local and
/// opens the detail overlay; everything else goes to the runtime.
struct ScreenActions<'a, R> {
    screen: Screen,
    runtime: &'a mut R,
    detail_requested: Option<RowId>,
    message: Option<String>,
}

impl<'a, R: AppRuntime> ScreenActions<'a, R> {
    fn new(screen: Screen, runtime: &'a mut R) -> Self {
        Self {
            screen,
            runtime,
            detail_requested: None,
            message: None,
        }
    }

    fn finish(self) -> (Option<RowId>, Option<String>) {
        (self.detail_requested, self.message)
    }
}

impl<R: AppRuntime> RowActions for ScreenActions<'_, R> {
    type Row = Record;

    fn actions_for(&self, row: &Record) -> Vec<RowActionSpec> {
        row_actions_for(self.screen, row)
    }

    fn invoke(&mut self, action: &'static str, row_id: &RowId) -> Result<()> {
        if action == ACTION_VIEW {
            self.detail_requested = Some(row_id.clone());
            return Ok(());
        }
        let message = self
            .runtime
            .apply_row_action(self.screen, action, row_id)?;
        self.message = Some(message);
        Ok(())
    }
}

pub fn run_app<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    mut theme: ThemeStore,
    options: UiOptions,
) -> Result<()> {
    hydrate_if_needed(runtime, &mut theme);
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::new(theme, options);
    let (internal_tx, internal_rx) = mpsc::channel();

    if let Err(error) = refresh_view_data(state, runtime, &mut view_data) {
        state.dispatch(AppCommand::SetStatus(format!("load failed: {error:#}")));
    }

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render::render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(POLL_INTERVAL).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

/// Applies the persisted mode before the first frame when the host handed
/// over an unhydrated store.
fn hydrate_if_needed<R: AppRuntime>(runtime: &mut R, theme: &mut ThemeStore) {
    if theme.is_hydrated() {
        return;
    }
    let persisted = runtime.load_theme().unwrap_or_else(|error| {
        warn!("ignoring saved theme: {error:#}");
        None
    });
    theme.hydrate(persisted);
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_TTL);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn emit_view_result(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    result: Result<ViewStatus, ViewError>,
) {
    let message = match result {
        Ok(status) => status.message(),
        Err(error) => error.to_string(),
    };
    emit_status(state, view_data, internal_tx, message);
}

/// Returns `true` when the app should quit.
fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            view_data.help_visible = false;
        }
        return false;
    }

    if view_data.detail.is_some() {
        view_data.detail = None;
        return false;
    }

    if view_data.action_menu.is_some() {
        handle_action_menu_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    if view_data.prompt.is_some() {
        handle_prompt_key(state, view_data, internal_tx, key);
        return false;
    }

    if view_data.column_menu.is_some() {
        handle_column_menu_key(state, view_data, internal_tx, key);
        return false;
    }

    match state.mode {
        AppMode::Form(_) => {
            handle_form_key(state, runtime, view_data, internal_tx, key);
            false
        }
        AppMode::Nav => handle_nav_key(state, runtime, view_data, internal_tx, key),
    }
}

fn handle_nav_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => return true,
        (KeyCode::Char('?'), _) => view_data.help_visible = true,
        (KeyCode::Tab, KeyModifiers::NONE) => {
            dispatch_and_refresh(
                state,
                runtime,
                view_data,
                AppCommand::NextScreen,
                internal_tx,
            );
        }
        (KeyCode::BackTab, _) => {
            dispatch_and_refresh(
                state,
                runtime,
                view_data,
                AppCommand::PrevScreen,
                internal_tx,
            );
        }
        (KeyCode::Char(ch @ '1'..='9'), KeyModifiers::NONE) => {
            let index = usize::from(ch as u8 - b'1');
            match state.role.screens().get(index) {
                Some(screen) => dispatch_and_refresh(
                    state,
                    runtime,
                    view_data,
                    AppCommand::GoTo(*screen),
                    internal_tx,
                ),
                None => emit_status(state, view_data, internal_tx, format!("no screen {ch}")),
            }
        }
        (KeyCode::Char('r'), KeyModifiers::NONE) => {
            let role = next_role(state.role);
            dispatch_and_refresh(
                state,
                runtime,
                view_data,
                AppCommand::SwitchRole(role),
                internal_tx,
            );
        }
        (KeyCode::Char('t'), KeyModifiers::NONE) => {
            toggle_theme(state, runtime, view_data, internal_tx);
        }
        (KeyCode::Char('n'), KeyModifiers::NONE) => match state.active_screen.form_kind() {
            Some(kind) => {
                dispatch_and_refresh(
                    state,
                    runtime,
                    view_data,
                    AppCommand::OpenForm(kind),
                    internal_tx,
                );
            }
            None => emit_status(state, view_data, internal_tx, "no form on this screen"),
        },
        _ => handle_table_key(state, runtime, view_data, internal_tx, key),
    }
    false
}

fn next_role(role: Role) -> Role {
    let index = Role::ALL
        .iter()
        .position(|candidate| *candidate == role)
        .unwrap_or(0);
    Role::ALL[(index + 1) % Role::ALL.len()]
}

fn handle_table_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let selected_column = view_data.selected_column_key();
    let Some(table) = view_data.table.as_mut() else {
        return;
    };

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            view_data.selected_row = view_data.selected_row.saturating_add(1);
            view_data.clamp_cursor();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view_data.selected_row = view_data.selected_row.saturating_sub(1);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            view_data.selected_col = view_data.selected_col.saturating_add(1);
            view_data.clamp_cursor();
        }
        KeyCode::Char('h') | KeyCode::Left => {
            view_data.selected_col = view_data.selected_col.saturating_sub(1);
        }
        KeyCode::Char(']') | KeyCode::PageDown => {
            let status = table.next_page();
            view_data.selected_row = 0;
            emit_status(state, view_data, internal_tx, status.message());
        }
        KeyCode::Char('[') | KeyCode::PageUp => {
            let status = table.previous_page();
            view_data.selected_row = 0;
            emit_status(state, view_data, internal_tx, status.message());
        }
        KeyCode::Char('s') => {
            let Some(column) = selected_column else {
                return;
            };
            let result = table.toggle_sort(column);
            view_data.selected_row = 0;
            emit_view_result(state, view_data, internal_tx, result);
        }
        KeyCode::Char('S') => {
            let status = table.clear_sort();
            view_data.selected_row = 0;
            emit_status(state, view_data, internal_tx, status.message());
        }
        KeyCode::Char('x') => {
            let status = table.clear_filters();
            view_data.selected_row = 0;
            emit_status(state, view_data, internal_tx, status.message());
        }
        KeyCode::Char('/') => {
            view_data.prompt = Some(PromptUiState {
                target: PromptTarget::Search,
                input: table.state().global_filter.clone(),
            });
        }
        KeyCode::Char('f') => {
            let Some(column) = selected_column else {
                return;
            };
            let input = table
                .state()
                .column_filters
                .get(column)
                .cloned()
                .unwrap_or_default();
            view_data.prompt = Some(PromptUiState {
                target: PromptTarget::Column(column),
                input,
            });
        }
        KeyCode::Char('c') => {
            view_data.column_menu = Some(ColumnMenuUiState::default());
        }
        KeyCode::Enter => open_action_menu(state, runtime, view_data, internal_tx),
        _ => {}
    }
}

fn open_action_menu<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let screen = state.active_screen;
    let menu = view_data.selected_record().and_then(|row| {
        let host = ScreenActions::new(screen, runtime);
        ActionMenu::open(row, &host, format!("{} #{}", screen.label(), row.row_id()))
    });
    match menu {
        Some(menu) => view_data.action_menu = Some(menu),
        None => emit_status(state, view_data, internal_tx, "no actions for this row"),
    }
}

fn handle_action_menu_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let Some(menu) = view_data.action_menu.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => view_data.action_menu = None,
        KeyCode::Char('j') | KeyCode::Down => menu.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => menu.move_cursor(-1),
        KeyCode::Enter => {
            let Some(menu) = view_data.action_menu.take() else {
                return;
            };
            let screen = state.active_screen;
            let mut host = ScreenActions::new(screen, runtime);
            let outcome = menu.activate(&mut host);
            let (detail_requested, message) = host.finish();

            match outcome {
                Ok(ActionOutcome::Invoked(_)) => {
                    if let Some(row_id) = detail_requested {
                        open_detail(screen, view_data, &row_id);
                        return;
                    }
                    if let Err(error) = refresh_view_data(state, runtime, view_data) {
                        emit_status(
                            state,
                            view_data,
                            internal_tx,
                            format!("load failed: {error:#}"),
                        );
                        return;
                    }
                    if let Some(message) = message {
                        emit_status(state, view_data, internal_tx, message);
                    }
                }
                Ok(ActionOutcome::Disabled(label)) => {
                    view_data.action_menu = Some(menu);
                    emit_status(
                        state,
                        view_data,
                        internal_tx,
                        format!("{} is unavailable for this row", label.to_lowercase()),
                    );
                }
                Ok(ActionOutcome::Nothing) => {}
                Err(error) => {
                    warn!(screen = screen.slug(), "row action failed: {error:#}");
                    emit_status(
                        state,
                        view_data,
                        internal_tx,
                        format!("action failed: {error:#}"),
                    );
                }
            }
        }
        _ => {}
    }
}

/// Every column value of one row, hidden columns included.
fn open_detail(screen: Screen, view_data: &mut ViewData, row_id: &RowId) {
    let Some(table) = &view_data.table else {
        return;
    };
    let Some(row) = table.row_by_id(row_id) else {
        return;
    };
    let fields = table
        .columns()
        .iter()
        .map(|column| (column.label, column.render_cell(&row.cell(column.key)).text))
        .collect();
    view_data.detail = Some(DetailUiState {
        title: format!("{} #{row_id}", screen.label()),
        fields,
    });
}

fn handle_prompt_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let Some(prompt) = view_data.prompt.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => {
            prompt.input.clear();
            let result = apply_prompt(view_data);
            view_data.prompt = None;
            if let Some(result) = result {
                emit_view_result(state, view_data, internal_tx, result);
            }
        }
        KeyCode::Enter => {
            let result = apply_prompt(view_data);
            view_data.prompt = None;
            if let Some(result) = result {
                emit_view_result(state, view_data, internal_tx, result);
            }
        }
        KeyCode::Backspace => {
            prompt.input.pop();
            apply_prompt(view_data);
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            prompt.input.push(ch);
            apply_prompt(view_data);
        }
        _ => {}
    }
}

/// Filters apply on every keystroke.
fn apply_prompt(view_data: &mut ViewData) -> Option<Result<ViewStatus, ViewError>> {
    let prompt = view_data.prompt.as_ref()?;
    let table = view_data.table.as_mut()?;
    let result = match prompt.target {
        PromptTarget::Search => Ok(table.set_global_filter(prompt.input.clone())),
        PromptTarget::Column(key) => table.set_column_filter(key, prompt.input.clone()),
    };
    view_data.selected_row = 0;
    view_data.clamp_cursor();
    Some(result)
}

fn handle_column_menu_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let (Some(menu), Some(table)) = (view_data.column_menu.as_mut(), view_data.table.as_mut())
    else {
        view_data.column_menu = None;
        return;
    };
    let count = table.columns().len();
    match key.code {
        KeyCode::Esc | KeyCode::Char('c') => view_data.column_menu = None,
        KeyCode::Char('j') | KeyCode::Down => {
            menu.cursor = (menu.cursor + 1) % count.max(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            menu.cursor = (menu.cursor + count.max(1) - 1) % count.max(1);
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            let Some(column) = table.columns().get(menu.cursor).map(|column| column.key) else {
                return;
            };
            let result = table.toggle_column_visibility(column);
            view_data.clamp_cursor();
            emit_view_result(state, view_data, internal_tx, result);
        }
        KeyCode::Char('a') => {
            let status = table.show_all_columns();
            emit_status(state, view_data, internal_tx, status.message());
        }
        _ => {}
    }
}

fn handle_form_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => {
            dispatch_and_refresh(
                state,
                runtime,
                view_data,
                AppCommand::ExitToNav,
                internal_tx,
            );
            emit_status(state, view_data, internal_tx, "form canceled");
        }
        (KeyCode::Enter, _) | (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
            submit_form(state, runtime, view_data, internal_tx);
        }
        (KeyCode::Tab, _) | (KeyCode::Down, _) => move_form_field_cursor(view_data, 1),
        (KeyCode::BackTab, _) | (KeyCode::Up, _) => move_form_field_cursor(view_data, -1),
        (KeyCode::Left, _) => cycle_form_choice(view_data, -1),
        (KeyCode::Right, _) => cycle_form_choice(view_data, 1),
        (KeyCode::Backspace, _) => edit_form_field(view_data, |value| {
            value.pop();
        }),
        (KeyCode::Char(ch), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
            if current_field_kind(view_data) == Some(FieldKind::Choice) {
                if ch == ' ' {
                    cycle_form_choice(view_data, 1);
                }
                return;
            }
            edit_form_field(view_data, |value| value.push(ch));
        }
        _ => {}
    }
}

fn current_field_kind(view_data: &ViewData) -> Option<FieldKind> {
    let form = view_data.form.as_ref()?;
    form.payload
        .fields()
        .get(form.field_index)
        .map(|field| field.kind)
}

fn move_form_field_cursor(view_data: &mut ViewData, delta: isize) {
    let Some(form) = view_data.form.as_mut() else {
        return;
    };
    let len = form.payload.fields().len() as isize;
    if len == 0 {
        return;
    }
    form.field_index = (form.field_index as isize + delta).rem_euclid(len) as usize;
}

fn cycle_form_choice(view_data: &mut ViewData, delta: isize) {
    let Some(form) = view_data.form.as_mut() else {
        return;
    };
    if let Some(field) = form.payload.fields().get(form.field_index) {
        form.payload.cycle(field.key, delta);
    }
}

fn edit_form_field(view_data: &mut ViewData, edit: impl FnOnce(&mut String)) {
    let Some(form) = view_data.form.as_mut() else {
        return;
    };
    let Some(field) = form.payload.fields().get(form.field_index) else {
        return;
    };
    let Some(mut value) = form.payload.value(field.key) else {
        return;
    };
    edit(&mut value);
    form.payload.set_value(field.key, value);
}

/// Validates locally first; the runtime validates again and any
/// `FormErrors` it returns are shown inline the same way.
fn submit_form<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(form) = view_data.form.as_mut() else {
        return;
    };
    if let Err(errors) = form.payload.validate() {
        debug!(
            kind = form.payload.kind().label(),
            errors = errors.len(),
            "form rejected"
        );
        let summary = errors.summary();
        form.errors = errors;
        emit_status(state, view_data, internal_tx, summary);
        return;
    }
    form.errors = FormErrors::new();
    let payload = form.payload.clone();

    match runtime.submit_form(state.role, &payload) {
        Ok(row_id) => {
            dispatch_and_refresh(
                state,
                runtime,
                view_data,
                AppCommand::ExitToNav,
                internal_tx,
            );
            if let Err(error) = refresh_view_data(state, runtime, view_data) {
                emit_status(
                    state,
                    view_data,
                    internal_tx,
                    format!("load failed: {error:#}"),
                );
                return;
            }
            debug!(kind = payload.kind().label(), id = %row_id, "form submitted");
            emit_status(
                state,
                view_data,
                internal_tx,
                format!("{} created", payload.kind().label()),
            );
        }
        Err(error) => {
            let message = match error.downcast_ref::<FormErrors>() {
                Some(errors) => {
                    let summary = errors.summary();
                    if let Some(form) = view_data.form.as_mut() {
                        form.errors = errors.clone();
                    }
                    summary
                }
                None => format!("save failed: {error:#}"),
            };
            emit_status(state, view_data, internal_tx, message);
        }
    }
}

fn toggle_theme<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let persisted = view_data.theme.toggle();
    let message = match runtime.save_theme(persisted) {
        Ok(()) => format!("theme: {}", persisted.mode.as_str()),
        Err(error) => {
            warn!("theme save failed: {error:#}");
            format!("theme: {} (not saved: {error})", persisted.mode.as_str())
        }
    };
    emit_status(state, view_data, internal_tx, message);
}

fn dispatch_and_refresh<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    command: AppCommand,
    internal_tx: &Sender<InternalEvent>,
) {
    let events = state.dispatch(command);
    if should_refresh_view(&events) {
        view_data.close_overlays();
        if let Err(error) = refresh_view_data(state, runtime, view_data) {
            emit_status(
                state,
                view_data,
                internal_tx,
                format!("load failed: {error:#}"),
            );
        }
    }
    sync_form_ui_state(state, view_data);
    if events
        .iter()
        .any(|event| matches!(event, AppEvent::StatusUpdated(_)))
    {
        view_data.status_token = view_data.status_token.saturating_add(1);
        schedule_status_clear(internal_tx, view_data.status_token);
    }
}

fn should_refresh_view(events: &[AppEvent]) -> bool {
    events.iter().any(|event| {
        matches!(
            event,
            AppEvent::ScreenChanged(_) | AppEvent::RoleChanged(_)
        )
    })
}

fn sync_form_ui_state(state: &AppState, view_data: &mut ViewData) {
    let AppMode::Form(kind) = state.mode else {
        view_data.form = None;
        return;
    };
    if view_data
        .form
        .as_ref()
        .is_some_and(|form| form.payload.kind() == kind)
    {
        return;
    }
    view_data.form = Some(FormUiState::blank(kind));
}

fn refresh_view_data<R: AppRuntime>(
    state: &AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
) -> Result<()> {
    sync_form_ui_state(state, view_data);
    view_data.dashboard_counts = runtime
        .load_dashboard_counts()
        .context("load dashboard counts")?;

    let screen = state.active_screen;
    let Some(columns) = columns_for(screen) else {
        view_data.table = None;
        view_data.table_screen = None;
        view_data.clamp_cursor();
        return Ok(());
    };

    let records = runtime
        .load_records(screen)
        .with_context(|| format!("load {}", screen.slug()))?;
    let same_screen = view_data.table_screen == Some(screen);
    if same_screen && let Some(table) = view_data.table.as_mut() {
        table.set_data(records);
    } else {
        let page_size = view_data.options.page_size.unwrap_or(screen.page_size());
        let table = TableView::new(columns, records)?.with_page_size(page_size)?;
        view_data.table = Some(table);
        view_data.table_screen = Some(screen);
        view_data.selected_row = 0;
        view_data.selected_col = 0;
    }
    view_data.clamp_cursor();
    Ok(())
}
