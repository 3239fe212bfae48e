// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Column schemas for each data screen and the projection of domain records
//! into table rows.

use civic_table::{CellRender, CellValue, ColumnDef, DateStyle, Record, Tone};

use crate::{Budget, Department, District, Grievance, Poll, Project, Screen, State, User};

pub const PROJECT_STATUS_TONES: &[(&str, Tone)] = &[
    ("proposed", Tone::Info),
    ("approved", Tone::Info),
    ("in progress", Tone::Warning),
    ("completed", Tone::Success),
    ("archived", Tone::Neutral),
];

pub const GRIEVANCE_STATUS_TONES: &[(&str, Tone)] = &[
    ("open", Tone::Warning),
    ("in review", Tone::Info),
    ("resolved", Tone::Success),
    ("rejected", Tone::Danger),
];

pub const PRIORITY_TONES: &[(&str, Tone)] = &[
    ("low", Tone::Neutral),
    ("medium", Tone::Info),
    ("high", Tone::Warning),
    ("urgent", Tone::Danger),
];

pub const POLL_STATUS_TONES: &[(&str, Tone)] = &[
    ("draft", Tone::Neutral),
    ("active", Tone::Success),
    ("closed", Tone::Neutral),
];

pub const ROLE_TONES: &[(&str, Tone)] = &[
    ("admin", Tone::Danger),
    ("mla", Tone::Info),
    ("staff", Tone::Neutral),
    ("citizen", Tone::Neutral),
];

const ACTIVE_FLAG: CellRender = CellRender::Flag {
    on: ("active", Tone::Success),
    off: ("inactive", Tone::Neutral),
};

const APPROVED_FLAG: CellRender = CellRender::Flag {
    on: ("approved", Tone::Success),
    off: ("pending", Tone::Warning),
};

/// Row key carrying the protection flag for built-in users; not a column.
pub const PROTECTED_KEY: &str = "protected";

fn id_column() -> ColumnDef {
    ColumnDef::new("id", "ID").sortable().always_visible()
}

fn date_column(key: &'static str, label: &'static str) -> ColumnDef {
    ColumnDef::new(key, label)
        .sortable()
        .render(CellRender::Date(DateStyle::Short))
}

/// `None` for screens without a table.
pub fn columns_for(screen: Screen) -> Option<Vec<ColumnDef>> {
    let columns = match screen {
        Screen::Dashboard => return None,
        Screen::Users => vec![
            id_column(),
            ColumnDef::new("name", "Name").sortable().always_visible(),
            ColumnDef::new("email", "Email"),
            ColumnDef::new("role", "Role")
                .sortable()
                .render(CellRender::Badge(ROLE_TONES)),
            ColumnDef::new("department", "Department").sortable(),
            ColumnDef::new("active", "Status")
                .sortable()
                .render(ACTIVE_FLAG),
            date_column("joined", "Joined"),
        ],
        Screen::Departments => vec![
            id_column(),
            ColumnDef::new("name", "Name").sortable(),
            ColumnDef::new("code", "Code").sortable(),
            ColumnDef::new("head", "Head"),
            ColumnDef::new("description", "Description").render(CellRender::Truncate(32)),
            ColumnDef::new("active", "Status")
                .sortable()
                .render(ACTIVE_FLAG),
            date_column("created", "Created"),
        ],
        Screen::Districts => vec![
            id_column(),
            ColumnDef::new("name", "Name").sortable(),
            ColumnDef::new("state_code", "State").sortable(),
            ColumnDef::new("population", "Population").sortable(),
            ColumnDef::new("active", "Status")
                .sortable()
                .render(ACTIVE_FLAG),
        ],
        Screen::States => vec![
            id_column(),
            ColumnDef::new("name", "Name").sortable(),
            ColumnDef::new("code", "Code").sortable(),
            ColumnDef::new("capital", "Capital").sortable(),
            ColumnDef::new("active", "Status")
                .sortable()
                .render(ACTIVE_FLAG),
        ],
        Screen::Projects => vec![
            id_column(),
            ColumnDef::new("title", "Title")
                .sortable()
                .render(CellRender::Truncate(30)),
            ColumnDef::new("district", "District").sortable(),
            ColumnDef::new("department", "Department").sortable(),
            ColumnDef::new("status", "Status")
                .sortable()
                .render(CellRender::Badge(PROJECT_STATUS_TONES)),
            ColumnDef::new("budget", "Budget")
                .sortable()
                .render(CellRender::Money),
            ColumnDef::new("spent", "Spent")
                .sortable()
                .render(CellRender::Money),
            date_column("start", "Start"),
        ],
        Screen::Grievances => vec![
            id_column(),
            ColumnDef::new("title", "Title")
                .sortable()
                .render(CellRender::Truncate(28)),
            ColumnDef::new("citizen", "Citizen").sortable(),
            ColumnDef::new("district", "District").sortable(),
            ColumnDef::new("category", "Category").sortable(),
            ColumnDef::new("priority", "Priority")
                .sortable()
                .render(CellRender::Badge(PRIORITY_TONES)),
            ColumnDef::new("status", "Status")
                .sortable()
                .render(CellRender::Badge(GRIEVANCE_STATUS_TONES)),
            date_column("filed", "Filed"),
        ],
        Screen::Polls => vec![
            id_column(),
            ColumnDef::new("question", "Question").render(CellRender::Truncate(40)),
            ColumnDef::new("created_by", "Created by").sortable(),
            ColumnDef::new("yes", "Yes").sortable(),
            ColumnDef::new("no", "No").sortable(),
            ColumnDef::new("total", "Total").sortable(),
            ColumnDef::new("status", "Status")
                .sortable()
                .render(CellRender::Badge(POLL_STATUS_TONES)),
            date_column("closes", "Closes"),
        ],
        Screen::Budgets => vec![
            id_column(),
            ColumnDef::new("department", "Department").sortable(),
            ColumnDef::new("fiscal_year", "FY").sortable(),
            ColumnDef::new("allocated", "Allocated")
                .sortable()
                .render(CellRender::Money),
            ColumnDef::new("utilized", "Utilized")
                .sortable()
                .render(CellRender::Money),
            ColumnDef::new("used_pct", "Used %").sortable(),
            ColumnDef::new("approved", "Approval")
                .sortable()
                .render(APPROVED_FLAG),
        ],
    };
    Some(columns)
}

impl From<&User> for Record {
    fn from(user: &User) -> Self {
        Record::new(user.id)
            .with("id", user.id.get())
            .with("name", user.name.as_str())
            .with("email", user.email.as_str())
            .with("role", user.role.as_str())
            .with("department", user.department.as_str())
            .with("active", user.active)
            .with("joined", user.joined_on)
            .with(PROTECTED_KEY, user.system_protected)
    }
}

impl From<&Department> for Record {
    fn from(department: &Department) -> Self {
        Record::new(department.id)
            .with("id", department.id.get())
            .with("name", department.name.as_str())
            .with("code", department.code.as_str())
            .with("head", department.head.as_str())
            .with("description", department.description.as_str())
            .with("active", department.active)
            .with("created", department.created_on)
    }
}

impl From<&District> for Record {
    fn from(district: &District) -> Self {
        Record::new(district.id)
            .with("id", district.id.get())
            .with("name", district.name.as_str())
            .with("state_code", district.state_code.as_str())
            .with("population", district.population)
            .with("active", district.active)
    }
}

impl From<&State> for Record {
    fn from(state: &State) -> Self {
        Record::new(state.id)
            .with("id", state.id.get())
            .with("name", state.name.as_str())
            .with("code", state.code.as_str())
            .with("capital", state.capital.as_str())
            .with("active", state.active)
    }
}

impl From<&Project> for Record {
    fn from(project: &Project) -> Self {
        Record::new(project.id)
            .with("id", project.id.get())
            .with("title", project.title.as_str())
            .with("district", project.district.as_str())
            .with("department", project.department.as_str())
            .with("status", project.status.as_str())
            .with("budget", CellValue::Money(project.budget_paise))
            .with("spent", CellValue::Money(project.spent_paise))
            .with("start", project.start_date)
    }
}

impl From<&Grievance> for Record {
    fn from(grievance: &Grievance) -> Self {
        Record::new(grievance.id)
            .with("id", grievance.id.get())
            .with("title", grievance.title.as_str())
            .with("citizen", grievance.citizen.as_str())
            .with("district", grievance.district.as_str())
            .with("category", grievance.category.as_str())
            .with("priority", grievance.priority.as_str())
            .with("status", grievance.status.as_str())
            .with("filed", grievance.filed_on)
    }
}

impl From<&Poll> for Record {
    fn from(poll: &Poll) -> Self {
        Record::new(poll.id)
            .with("id", poll.id.get())
            .with("question", poll.question.as_str())
            .with("created_by", poll.created_by.as_str())
            .with("yes", poll.votes_yes)
            .with("no", poll.votes_no)
            .with("total", poll.total_votes())
            .with("status", poll.status.as_str())
            .with("closes", poll.closes_on)
    }
}

impl From<&Budget> for Record {
    fn from(budget: &Budget) -> Self {
        Record::new(budget.id)
            .with("id", budget.id.get())
            .with("department", budget.department.as_str())
            .with("fiscal_year", budget.fiscal_year.as_str())
            .with("allocated", CellValue::Money(budget.allocated_paise))
            .with("utilized", CellValue::Money(budget.utilized_paise))
            .with("used_pct", budget.utilization_percent())
            .with("approved", budget.approved)
    }
}
