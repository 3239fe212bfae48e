// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::Date;

use crate::ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Mla,
    Staff,
    Citizen,
}

impl Role {
    pub const ALL: [Self; 4] = [Self::Admin, Self::Mla, Self::Staff, Self::Citizen];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Mla => "mla",
            Self::Staff => "staff",
            Self::Citizen => "citizen",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "mla" => Some(Self::Mla),
            "staff" => Some(Self::Staff),
            "citizen" => Some(Self::Citizen),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Mla => "MLA",
            Self::Staff => "Staff",
            Self::Citizen => "Citizen",
        }
    }

    /// Screens reachable from this role's navigation, in tab order.
    pub const fn screens(self) -> &'static [Screen] {
        match self {
            Self::Admin => &[
                Screen::Dashboard,
                Screen::Users,
                Screen::Departments,
                Screen::Districts,
                Screen::States,
                Screen::Projects,
                Screen::Grievances,
                Screen::Polls,
                Screen::Budgets,
            ],
            Self::Mla => &[
                Screen::Dashboard,
                Screen::Projects,
                Screen::Grievances,
                Screen::Polls,
                Screen::Budgets,
            ],
            Self::Staff => &[
                Screen::Dashboard,
                Screen::Grievances,
                Screen::Projects,
                Screen::Departments,
            ],
            Self::Citizen => &[Screen::Dashboard, Screen::Grievances, Screen::Polls],
        }
    }

    pub fn can_view(self, screen: Screen) -> bool {
        self.screens().contains(&screen)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Dashboard,
    Users,
    Departments,
    Districts,
    States,
    Projects,
    Grievances,
    Polls,
    Budgets,
}

impl Screen {
    pub const ALL: [Self; 9] = [
        Self::Dashboard,
        Self::Users,
        Self::Departments,
        Self::Districts,
        Self::States,
        Self::Projects,
        Self::Grievances,
        Self::Polls,
        Self::Budgets,
    ];

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Users => "users",
            Self::Departments => "departments",
            Self::Districts => "districts",
            Self::States => "states",
            Self::Projects => "projects",
            Self::Grievances => "grievances",
            Self::Polls => "polls",
            Self::Budgets => "budgets",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Users => "users",
            Self::Departments => "depts",
            Self::Districts => "districts",
            Self::States => "states",
            Self::Projects => "projects",
            Self::Grievances => "grievances",
            Self::Polls => "polls",
            Self::Budgets => "budgets",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|screen| screen.slug() == value)
    }

    pub fn path(self, role: Role) -> String {
        format!("/{}/{}", role.as_str(), self.slug())
    }

    /// Creation form offered on this screen, if any.
    pub const fn form_kind(self) -> Option<FormKind> {
        match self {
            Self::Departments => Some(FormKind::Department),
            Self::Districts => Some(FormKind::District),
            Self::States => Some(FormKind::State),
            Self::Grievances => Some(FormKind::Grievance),
            _ => None,
        }
    }

    pub const fn page_size(self) -> usize {
        match self {
            Self::Polls | Self::Budgets => 5,
            _ => 10,
        }
    }
}

/// Splits a role-prefixed path such as `/mla/grievances`. Screens outside
/// the role's navigation are rejected.
pub fn parse_path(path: &str) -> Option<(Role, Screen)> {
    let mut parts = path.trim_matches('/').split('/');
    let role = Role::parse(parts.next()?)?;
    let screen = match parts.next() {
        Some("") | None => Screen::Dashboard,
        Some(slug) => Screen::parse(slug)?,
    };
    if parts.next().is_some() || !role.can_view(screen) {
        return None;
    }
    Some((role, screen))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Proposed,
    Approved,
    InProgress,
    Completed,
    Archived,
}

impl ProjectStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Proposed => "proposed",
            Self::Approved => "approved",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "proposed" => Some(Self::Proposed),
            "approved" => Some(Self::Approved),
            "in progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrievanceStatus {
    Open,
    InReview,
    Resolved,
    Rejected,
}

impl GrievanceStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InReview => "in review",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(Self::Open),
            "in review" => Some(Self::InReview),
            "resolved" => Some(Self::Resolved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Resolved | Self::Rejected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }

    pub fn rotate(self, delta: isize) -> Self {
        let current = Self::ALL
            .iter()
            .position(|priority| *priority == self)
            .unwrap_or(0) as isize;
        let len = Self::ALL.len() as isize;
        Self::ALL[(current + delta).rem_euclid(len) as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollStatus {
    Draft,
    Active,
    Closed,
}

impl PollStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "active" => Some(Self::Active),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormKind {
    Department,
    District,
    State,
    Grievance,
}

impl FormKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::District => "district",
            Self::State => "state",
            Self::Grievance => "grievance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppMode {
    Nav,
    Form(FormKind),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: String,
    pub active: bool,
    /// Built-in accounts the UI refuses to deactivate.
    pub system_protected: bool,
    pub joined_on: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub code: String,
    pub head: String,
    pub description: String,
    pub active: bool,
    pub created_on: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub id: DistrictId,
    pub name: String,
    pub state_code: String,
    pub population: i64,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub id: StateId,
    pub name: String,
    pub code: String,
    pub capital: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub district: String,
    pub department: String,
    pub status: ProjectStatus,
    pub budget_paise: i64,
    pub spent_paise: i64,
    pub start_date: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grievance {
    pub id: GrievanceId,
    pub title: String,
    pub citizen: String,
    pub district: String,
    pub category: String,
    pub priority: Priority,
    pub status: GrievanceStatus,
    pub description: String,
    pub filed_on: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    pub id: PollId,
    pub question: String,
    pub created_by: String,
    pub votes_yes: i64,
    pub votes_no: i64,
    pub status: PollStatus,
    pub closes_on: Date,
}

impl Poll {
    pub fn total_votes(&self) -> i64 {
        self.votes_yes + self.votes_no
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    pub department: String,
    pub fiscal_year: String,
    pub allocated_paise: i64,
    pub utilized_paise: i64,
    pub approved: bool,
}

impl Budget {
    /// Whole-percent utilisation; zero allocations report zero.
    pub fn utilization_percent(&self) -> i64 {
        if self.allocated_paise <= 0 {
            return 0;
        }
        self.utilized_paise.saturating_mul(100) / self.allocated_paise
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DashboardCounts {
    pub grievances_open: usize,
    pub projects_active: usize,
    pub polls_active: usize,
    pub users_active: usize,
    pub budget_allocated_paise: i64,
    pub budget_utilized_paise: i64,
}

impl DashboardCounts {
    pub fn utilization_percent(&self) -> i64 {
        if self.budget_allocated_paise <= 0 {
            return 0;
        }
        self.budget_utilized_paise.saturating_mul(100) / self.budget_allocated_paise
    }
}

#[cfg(test)]
mod tests {
    use super::{Budget, Priority, Role, Screen, parse_path};
    use crate::BudgetId;

    #[test]
    fn screen_paths_are_role_prefixed() {
        assert_eq!(Screen::Grievances.path(Role::Mla), "/mla/grievances");
        assert_eq!(Screen::Users.path(Role::Admin), "/admin/users");
    }

    #[test]
    fn parse_path_round_trips_navigable_screens() {
        for role in Role::ALL {
            for screen in role.screens() {
                assert_eq!(parse_path(&screen.path(role)), Some((role, *screen)));
            }
        }
    }

    #[test]
    fn parse_path_rejects_screens_outside_role() {
        assert_eq!(parse_path("/citizen/users"), None);
        assert_eq!(parse_path("/guest/users"), None);
        assert_eq!(parse_path("/admin/users/extra"), None);
        assert_eq!(parse_path("/staff"), Some((Role::Staff, Screen::Dashboard)));
    }

    #[test]
    fn every_role_starts_on_dashboard() {
        for role in Role::ALL {
            assert_eq!(role.screens().first(), Some(&Screen::Dashboard));
        }
    }

    #[test]
    fn priority_rotation_wraps() {
        assert_eq!(Priority::Urgent.rotate(1), Priority::Low);
        assert_eq!(Priority::Low.rotate(-1), Priority::Urgent);
    }

    #[test]
    fn budget_utilization_handles_zero_allocation() {
        let budget = Budget {
            id: BudgetId::new(1),
            department: "Health".to_owned(),
            fiscal_year: "2024-25".to_owned(),
            allocated_paise: 0,
            utilized_paise: 10,
            approved: false,
        };
        assert_eq!(budget.utilization_percent(), 0);

        let budget = Budget {
            allocated_paise: 400,
            utilized_paise: 100,
            ..budget
        };
        assert_eq!(budget.utilization_percent(), 25);
    }
}
