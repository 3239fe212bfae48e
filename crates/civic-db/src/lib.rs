// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod seed;
pub mod theme_file;

pub use theme_file::{MemoryTheme, THEME_FILE_NAME, ThemeFile, ThemePersistence, hydrate_theme};

use anyhow::{Context, Result, anyhow, bail};
use civic_app::{
    ACTION_APPROVE, ACTION_ARCHIVE, ACTION_CLOSE_POLL, ACTION_REJECT, ACTION_RESOLVE,
    ACTION_TOGGLE_ACTIVE, Budget, BudgetId, DashboardCounts, Department, DepartmentId, District,
    DistrictId, FormPayload, Grievance, GrievanceId, GrievanceStatus, Poll, PollId, PollStatus,
    Project, ProjectId, ProjectStatus, Screen, State, StateId, User, UserId,
};
use civic_table::{Record, RowId};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use time::Date;
use tracing::info;

pub const APP_NAME: &str = "civic";

/// Record types the in-memory store can key.
pub trait Keyed: Clone {
    type Id: Copy + PartialEq + fmt::Debug + From<i64>;
    const KIND: &'static str;

    fn id(&self) -> Self::Id;
    fn raw_id(&self) -> i64;
}

macro_rules! keyed {
    ($record:ty, $id:ty, $kind:literal) => {
        impl Keyed for $record {
            type Id = $id;
            const KIND: &'static str = $kind;

            fn id(&self) -> $id {
                self.id
            }

            fn raw_id(&self) -> i64 {
                self.id.get()
            }
        }
    };
}

keyed!(User, UserId, "user");
keyed!(Department, DepartmentId, "department");
keyed!(District, DistrictId, "district");
keyed!(State, StateId, "state");
keyed!(Project, ProjectId, "project");
keyed!(Grievance, GrievanceId, "grievance");
keyed!(Poll, PollId, "poll");
keyed!(Budget, BudgetId, "budget");

/// Source of one screen's records. Host mutations go through `update` and
/// `insert`; readers only ever see whole-record snapshots.
pub trait RecordStore<T: Keyed> {
    fn list(&self) -> Vec<T>;

    fn get(&self, id: T::Id) -> Result<T>;

    fn update<F: FnOnce(&mut T) -> Result<()>>(&mut self, id: T::Id, change: F) -> Result<T>;

    /// Builds a record around the next free id and appends it.
    fn insert<F: FnOnce(T::Id) -> T>(&mut self, build: F) -> T;
}

#[derive(Debug, Clone)]
pub struct MemoryStore<T> {
    rows: Vec<T>,
    next_id: i64,
}

impl<T: Keyed> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }

    pub fn from_rows(rows: Vec<T>) -> Self {
        let next_id = rows.iter().map(Keyed::raw_id).max().unwrap_or(0) + 1;
        Self { rows, next_id }
    }
}

impl<T: Keyed> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed> RecordStore<T> for MemoryStore<T> {
    fn list(&self) -> Vec<T> {
        self.rows.clone()
    }

    fn get(&self, id: T::Id) -> Result<T> {
        self.rows
            .iter()
            .find(|row| row.id() == id)
            .cloned()
            .ok_or_else(|| anyhow!("{} {id:?} not found", T::KIND))
    }

    fn update<F: FnOnce(&mut T) -> Result<()>>(&mut self, id: T::Id, change: F) -> Result<T> {
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or_else(|| anyhow!("{} {id:?} not found", T::KIND))?;
        let mut updated = row.clone();
        change(&mut updated)?;
        *row = updated.clone();
        Ok(updated)
    }

    fn insert<F: FnOnce(T::Id) -> T>(&mut self, build: F) -> T {
        let record = build(T::Id::from(self.next_id));
        self.next_id = self.next_id.max(record.raw_id()) + 1;
        self.rows.push(record.clone());
        record
    }
}

/// Picks the record source behind each screen.
pub trait Backend {
    type Users: RecordStore<User>;
    type Departments: RecordStore<Department>;
    type Districts: RecordStore<District>;
    type States: RecordStore<State>;
    type Projects: RecordStore<Project>;
    type Grievances: RecordStore<Grievance>;
    type Polls: RecordStore<Poll>;
    type Budgets: RecordStore<Budget>;
}

/// Every screen held in a [`MemoryStore`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryBackend;

impl Backend for MemoryBackend {
    type Users = MemoryStore<User>;
    type Departments = MemoryStore<Department>;
    type Districts = MemoryStore<District>;
    type States = MemoryStore<State>;
    type Projects = MemoryStore<Project>;
    type Grievances = MemoryStore<Grievance>;
    type Polls = MemoryStore<Poll>;
    type Budgets = MemoryStore<Budget>;
}

/// The record sources a [`Store`] is assembled from.
pub struct Tables<B: Backend> {
    pub users: B::Users,
    pub departments: B::Departments,
    pub districts: B::Districts,
    pub states: B::States,
    pub projects: B::Projects,
    pub grievances: B::Grievances,
    pub polls: B::Polls,
    pub budgets: B::Budgets,
}

impl Tables<MemoryBackend> {
    /// The built-in constituency dataset.
    pub fn demo() -> Self {
        Self {
            users: MemoryStore::from_rows(seed::users()),
            departments: MemoryStore::from_rows(seed::departments()),
            districts: MemoryStore::from_rows(seed::districts()),
            states: MemoryStore::from_rows(seed::states()),
            projects: MemoryStore::from_rows(seed::projects()),
            grievances: MemoryStore::from_rows(seed::grievances()),
            polls: MemoryStore::from_rows(seed::polls()),
            budgets: MemoryStore::from_rows(seed::budgets()),
        }
    }
}

/// All screen data for one session. Reads and writes go through the
/// [`RecordStore`] seam of each table.
pub struct Store<B: Backend = MemoryBackend> {
    tables: Tables<B>,
    today: Date,
}

impl Store {
    /// Store preloaded with the built-in constituency dataset.
    pub fn with_demo_data(today: Date) -> Self {
        Self::new(Tables::demo(), today)
    }
}

impl<B: Backend> Store<B> {
    pub fn new(tables: Tables<B>, today: Date) -> Self {
        Self { tables, today }
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn users(&self) -> &B::Users {
        &self.tables.users
    }

    pub fn grievances(&self) -> &B::Grievances {
        &self.tables.grievances
    }

    pub fn polls(&self) -> &B::Polls {
        &self.tables.polls
    }

    pub fn projects(&self) -> &B::Projects {
        &self.tables.projects
    }

    pub fn budgets(&self) -> &B::Budgets {
        &self.tables.budgets
    }

    /// Table rows for a screen, in store order.
    pub fn records(&self, screen: Screen) -> Vec<Record> {
        let tables = &self.tables;
        match screen {
            Screen::Dashboard => Vec::new(),
            Screen::Users => tables.users.list().iter().map(Record::from).collect(),
            Screen::Departments => tables.departments.list().iter().map(Record::from).collect(),
            Screen::Districts => tables.districts.list().iter().map(Record::from).collect(),
            Screen::States => tables.states.list().iter().map(Record::from).collect(),
            Screen::Projects => tables.projects.list().iter().map(Record::from).collect(),
            Screen::Grievances => tables.grievances.list().iter().map(Record::from).collect(),
            Screen::Polls => tables.polls.list().iter().map(Record::from).collect(),
            Screen::Budgets => tables.budgets.list().iter().map(Record::from).collect(),
        }
    }

    /// Validates and stores a submitted form. Validation failures surface as
    /// [`civic_app::FormErrors`] inside the returned error.
    pub fn create(&mut self, payload: &FormPayload, author: &str) -> Result<RowId> {
        payload.validate()?;
        let today = self.today;
        let id = match payload {
            FormPayload::Department(form) => {
                let department = self.tables.departments.insert(|id| Department {
                    id,
                    name: form.name.trim().to_owned(),
                    code: form.code.trim().to_uppercase(),
                    head: form.head.trim().to_owned(),
                    description: form.description.trim().to_owned(),
                    active: true,
                    created_on: today,
                });
                RowId::from(department.id)
            }
            FormPayload::District(form) => {
                let population = form
                    .population_value()
                    .ok_or_else(|| anyhow!("population did not parse after validation"))?;
                let district = self.tables.districts.insert(|id| District {
                    id,
                    name: form.name.trim().to_owned(),
                    state_code: form.state_code.trim().to_uppercase(),
                    population,
                    active: true,
                });
                RowId::from(district.id)
            }
            FormPayload::State(form) => {
                let state = self.tables.states.insert(|id| State {
                    id,
                    name: form.name.trim().to_owned(),
                    code: form.code.trim().to_uppercase(),
                    capital: form.capital.trim().to_owned(),
                    active: true,
                });
                RowId::from(state.id)
            }
            FormPayload::Grievance(form) => {
                let grievance = self.tables.grievances.insert(|id| Grievance {
                    id,
                    title: form.title.trim().to_owned(),
                    citizen: author.to_owned(),
                    district: form.district.trim().to_owned(),
                    category: form.category.trim().to_owned(),
                    priority: form.priority,
                    status: GrievanceStatus::Open,
                    description: form.description.trim().to_owned(),
                    filed_on: today,
                });
                RowId::from(grievance.id)
            }
        };
        info!(kind = payload.kind().label(), id = %id, "record created");
        Ok(id)
    }

    /// Runs a lifecycle action against one row and returns the status line
    /// to show.
    pub fn apply_action(&mut self, screen: Screen, action: &str, row_id: &RowId) -> Result<String> {
        let id = numeric_id(row_id)?;
        let message = match (screen, action) {
            (Screen::Users, ACTION_TOGGLE_ACTIVE) => {
                let user = self.tables.users.update(UserId::new(id), |user| {
                    if user.system_protected {
                        bail!("{} is a protected account", user.name);
                    }
                    user.active = !user.active;
                    Ok(())
                })?;
                toggled_message("user", &user.name, user.active)
            }
            (Screen::Departments, ACTION_TOGGLE_ACTIVE) => {
                let department = self.tables.departments.update(DepartmentId::new(id), |row| {
                    row.active = !row.active;
                    Ok(())
                })?;
                toggled_message("department", &department.name, department.active)
            }
            (Screen::Districts, ACTION_TOGGLE_ACTIVE) => {
                let district = self.tables.districts.update(DistrictId::new(id), |row| {
                    row.active = !row.active;
                    Ok(())
                })?;
                toggled_message("district", &district.name, district.active)
            }
            (Screen::States, ACTION_TOGGLE_ACTIVE) => {
                let state = self.tables.states.update(StateId::new(id), |row| {
                    row.active = !row.active;
                    Ok(())
                })?;
                toggled_message("state", &state.name, state.active)
            }
            (Screen::Projects, ACTION_ARCHIVE) => {
                let project = self.tables.projects.update(ProjectId::new(id), |project| {
                    if project.status == ProjectStatus::Archived {
                        bail!("project {id} is already archived");
                    }
                    project.status = ProjectStatus::Archived;
                    Ok(())
                })?;
                format!("project {} archived", project.id.get())
            }
            (Screen::Grievances, ACTION_RESOLVE | ACTION_REJECT) => {
                let target = if action == ACTION_RESOLVE {
                    GrievanceStatus::Resolved
                } else {
                    GrievanceStatus::Rejected
                };
                let grievance = self.tables.grievances.update(GrievanceId::new(id), |grievance| {
                    if grievance.status.is_closed() {
                        bail!(
                            "grievance {id} is already {}",
                            grievance.status.as_str()
                        );
                    }
                    grievance.status = target;
                    Ok(())
                })?;
                format!(
                    "grievance {} {}",
                    grievance.id.get(),
                    grievance.status.as_str()
                )
            }
            (Screen::Polls, ACTION_CLOSE_POLL) => {
                let poll = self.tables.polls.update(PollId::new(id), |poll| {
                    if poll.status != PollStatus::Active {
                        bail!("poll {id} is not active");
                    }
                    poll.status = PollStatus::Closed;
                    Ok(())
                })?;
                format!("poll {} closed", poll.id.get())
            }
            (Screen::Budgets, ACTION_APPROVE) => {
                let budget = self.tables.budgets.update(BudgetId::new(id), |budget| {
                    if budget.approved {
                        bail!("budget {id} is already approved");
                    }
                    budget.approved = true;
                    Ok(())
                })?;
                format!("budget {} approved", budget.id.get())
            }
            (screen, action) => bail!("action {action:?} is not available on {}", screen.slug()),
        };
        info!(screen = screen.slug(), action, row = id, "row action applied");
        Ok(message)
    }

    /// Summary tiles for the dashboard.
    pub fn dashboard_counts(&self) -> DashboardCounts {
        let tables = &self.tables;
        let budgets = tables.budgets.list();
        DashboardCounts {
            grievances_open: tables
                .grievances
                .list()
                .iter()
                .filter(|grievance| !grievance.status.is_closed())
                .count(),
            projects_active: tables
                .projects
                .list()
                .iter()
                .filter(|project| {
                    matches!(
                        project.status,
                        ProjectStatus::Approved | ProjectStatus::InProgress
                    )
                })
                .count(),
            polls_active: tables
                .polls
                .list()
                .iter()
                .filter(|poll| poll.status == PollStatus::Active)
                .count(),
            users_active: tables
                .users
                .list()
                .iter()
                .filter(|user| user.active)
                .count(),
            budget_allocated_paise: budgets.iter().map(|budget| budget.allocated_paise).sum(),
            budget_utilized_paise: budgets.iter().map(|budget| budget.utilized_paise).sum(),
        }
    }
}

fn numeric_id(row_id: &RowId) -> Result<i64> {
    match row_id {
        RowId::Number(id) => Ok(*id),
        RowId::Text(text) => bail!("row id {text:?} is not a record id"),
    }
}

fn toggled_message(kind: &str, name: &str, active: bool) -> String {
    let state = if active { "activated" } else { "deactivated" };
    format!("{kind} {name} {state}")
}

/// State directory: `CIVIC_STATE_DIR`, then the configured path, then the
/// platform data directory. Created if missing.
pub fn resolve_state_dir(configured: Option<&Path>) -> Result<PathBuf> {
    let dir = if let Some(override_path) = env::var_os("CIVIC_STATE_DIR") {
        PathBuf::from(override_path)
    } else if let Some(configured) = configured {
        configured.to_path_buf()
    } else {
        let data_root = dirs::data_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set CIVIC_STATE_DIR to a writable directory")
        })?;
        data_root.join(APP_NAME)
    };
    validate_state_dir(&dir.to_string_lossy())?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("create state directory {}", dir.display()))?;
    Ok(dir)
}

pub fn validate_state_dir(path: &str) -> Result<()> {
    if path.trim().is_empty() {
        bail!("state directory must not be empty");
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!(
                "state directory {path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
            );
        }
    }

    if path.starts_with("file:") {
        bail!("state directory {path:?} uses file: URI syntax; pass a plain filesystem path");
    }
    Ok(())
}
