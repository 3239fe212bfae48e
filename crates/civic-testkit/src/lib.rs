// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use civic_app::{
    Budget, BudgetId, Department, DepartmentFormInput, DepartmentId, District, DistrictId,
    Grievance, GrievanceFormInput, GrievanceId, GrievanceStatus, Poll, PollId, PollStatus, Priority,
    Project, ProjectId, ProjectStatus, Role, State, StateId, User, UserId,
};
use std::path::PathBuf;
use time::{Date, Duration, Month};

const FIRST_NAMES: [&str; 16] = [
    "Aarav", "Priya", "Rohan", "Ananya", "Vikram", "Meera", "Kabir", "Sneha", "Arjun", "Divya",
    "Farhan", "Lakshmi", "Nikhil", "Pooja", "Sanjay", "Zoya",
];
const LAST_NAMES: [&str; 14] = [
    "Sharma", "Iyer", "Reddy", "Nair", "Patel", "Khan", "Das", "Menon", "Gupta", "Rao", "Singh",
    "Joshi", "Bose", "Kulkarni",
];

const DEPARTMENTS: [(&str, &str); 10] = [
    ("Public Works", "PWD"),
    ("Health and Family Welfare", "HFW"),
    ("School Education", "EDU"),
    ("Water Resources", "WRD"),
    ("Rural Development", "RDD"),
    ("Urban Development", "UDD"),
    ("Revenue", "REV"),
    ("Transport", "TRN"),
    ("Agriculture", "AGR"),
    ("Social Welfare", "SWD"),
];

const STATES: [(&str, &str, &str); 12] = [
    ("Maharashtra", "MH", "Mumbai"),
    ("Karnataka", "KA", "Bengaluru"),
    ("Kerala", "KL", "Thiruvananthapuram"),
    ("Tamil Nadu", "TN", "Chennai"),
    ("Gujarat", "GJ", "Gandhinagar"),
    ("Rajasthan", "RJ", "Jaipur"),
    ("West Bengal", "WB", "Kolkata"),
    ("Uttar Pradesh", "UP", "Lucknow"),
    ("Odisha", "OD", "Bhubaneswar"),
    ("Punjab", "PB", "Chandigarh"),
    ("Telangana", "TS", "Hyderabad"),
    ("Assam", "AS", "Dispur"),
];

const DISTRICTS: [&str; 16] = [
    "Pune", "Nashik", "Mysuru", "Ernakulam", "Madurai", "Surat", "Udaipur", "Howrah", "Varanasi",
    "Cuttack", "Ludhiana", "Warangal", "Kamrup", "Thrissur", "Nagpur", "Belagavi",
];

const GRIEVANCE_TITLES: [(&str, &str); 12] = [
    ("Streetlight not working", "electricity"),
    ("Irregular water supply", "water"),
    ("Pothole on main road", "roads"),
    ("Garbage not collected", "sanitation"),
    ("Ration card delayed", "civil supplies"),
    ("Drain overflowing", "sanitation"),
    ("Pension not credited", "social welfare"),
    ("School building leaking", "education"),
    ("Bus stop shelter damaged", "transport"),
    ("Clinic short of staff", "health"),
    ("Encroachment on footpath", "roads"),
    ("Low voltage in ward", "electricity"),
];

const PROJECT_TITLES: [&str; 10] = [
    "Ring road widening",
    "Primary health centre upgrade",
    "Smart classroom rollout",
    "Lake rejuvenation",
    "Rural road connectivity",
    "Solar streetlights",
    "Drinking water pipeline",
    "Bus depot modernisation",
    "Community hall construction",
    "Stormwater drain network",
];

const POLL_QUESTIONS: [&str; 8] = [
    "Should the weekly market move to Sunday?",
    "Prioritise road repair over new parks?",
    "Extend library hours to 9 pm?",
    "Introduce ward-level waste segregation?",
    "Add an evening bus route to the hospital?",
    "Convert the old school into a skills centre?",
    "Ban single-use plastic at the bazaar?",
    "Fund a new public toilet block?",
];

const PROJECT_STATUSES: [ProjectStatus; 5] = [
    ProjectStatus::Proposed,
    ProjectStatus::Approved,
    ProjectStatus::InProgress,
    ProjectStatus::Completed,
    ProjectStatus::Archived,
];
const GRIEVANCE_STATUSES: [GrievanceStatus; 4] = [
    GrievanceStatus::Open,
    GrievanceStatus::InReview,
    GrievanceStatus::Resolved,
    GrievanceStatus::Rejected,
];
const POLL_STATUSES: [PollStatus; 3] = [PollStatus::Draft, PollStatus::Active, PollStatus::Closed];

const REFERENCE_YEAR: i32 = 2026;

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator for constituency records. The same seed always yields
/// the same sequence.
#[derive(Debug, Clone)]
pub struct CivicFaker {
    rng: DeterministicRng,
}

impl CivicFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn person_name(&mut self) -> String {
        format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES))
    }

    pub fn user(&mut self, id: i64) -> User {
        let name = self.person_name();
        let email = format!(
            "{}@civic.gov.in",
            name.to_ascii_lowercase().replace(' ', ".")
        );
        let role = Role::ALL[self.rng.int_n(Role::ALL.len())];
        let department = DEPARTMENTS[self.rng.int_n(DEPARTMENTS.len())].0;
        User {
            id: UserId::new(id),
            name,
            email,
            role,
            department: department.to_owned(),
            active: self.int_range_i64(1, 10) <= 8,
            system_protected: false,
            joined_on: self.date_in_year(REFERENCE_YEAR - 1),
        }
    }

    pub fn department(&mut self, id: i64) -> Department {
        let (name, code) = DEPARTMENTS[self.rng.int_n(DEPARTMENTS.len())];
        Department {
            id: DepartmentId::new(id),
            name: name.to_owned(),
            code: code.to_owned(),
            head: self.person_name(),
            description: format!("Oversees {} across the constituency", name.to_lowercase()),
            active: self.int_range_i64(1, 4) > 1,
            created_on: self.date_in_year(REFERENCE_YEAR - 2),
        }
    }

    pub fn state(&mut self, id: i64) -> State {
        let (name, code, capital) = STATES[self.rng.int_n(STATES.len())];
        State {
            id: StateId::new(id),
            name: name.to_owned(),
            code: code.to_owned(),
            capital: capital.to_owned(),
            active: true,
        }
    }

    pub fn district(&mut self, id: i64) -> District {
        let (_, state_code, _) = STATES[self.rng.int_n(STATES.len())];
        District {
            id: DistrictId::new(id),
            name: self.pick(&DISTRICTS).to_owned(),
            state_code: state_code.to_owned(),
            population: self.int_range_i64(250_000, 9_000_000),
            active: self.int_range_i64(1, 10) <= 9,
        }
    }

    pub fn project(&mut self, id: i64) -> Project {
        let status = PROJECT_STATUSES[self.rng.int_n(PROJECT_STATUSES.len())];
        let budget_paise = self.int_range_i64(50, 5_000) * 10_000_000;
        let spent_paise = match status {
            ProjectStatus::Proposed | ProjectStatus::Approved => 0,
            _ => budget_paise * self.int_range_i64(10, 100) / 100,
        };
        Project {
            id: ProjectId::new(id),
            title: self.pick(&PROJECT_TITLES).to_owned(),
            district: self.pick(&DISTRICTS).to_owned(),
            department: DEPARTMENTS[self.rng.int_n(DEPARTMENTS.len())].0.to_owned(),
            status,
            budget_paise,
            spent_paise,
            start_date: self.date_in_year(REFERENCE_YEAR - 1),
        }
    }

    pub fn grievance(&mut self, id: i64) -> Grievance {
        let (title, category) = GRIEVANCE_TITLES[self.rng.int_n(GRIEVANCE_TITLES.len())];
        Grievance {
            id: GrievanceId::new(id),
            title: title.to_owned(),
            citizen: self.person_name(),
            district: self.pick(&DISTRICTS).to_owned(),
            category: category.to_owned(),
            priority: Priority::ALL[self.rng.int_n(Priority::ALL.len())],
            status: GRIEVANCE_STATUSES[self.rng.int_n(GRIEVANCE_STATUSES.len())],
            description: format!("{title}; reported by residents of the ward for over a week."),
            filed_on: self.date_in_year(REFERENCE_YEAR),
        }
    }

    pub fn poll(&mut self, id: i64) -> Poll {
        let status = POLL_STATUSES[self.rng.int_n(POLL_STATUSES.len())];
        let (votes_yes, votes_no) = match status {
            PollStatus::Draft => (0, 0),
            _ => (self.int_range_i64(0, 4_000), self.int_range_i64(0, 4_000)),
        };
        Poll {
            id: PollId::new(id),
            question: self.pick(&POLL_QUESTIONS).to_owned(),
            created_by: self.person_name(),
            votes_yes,
            votes_no,
            status,
            closes_on: self.date_in_year(REFERENCE_YEAR),
        }
    }

    pub fn budget(&mut self, id: i64) -> Budget {
        let allocated_paise = self.int_range_i64(10, 500) * 100_000_000;
        Budget {
            id: BudgetId::new(id),
            department: DEPARTMENTS[self.rng.int_n(DEPARTMENTS.len())].0.to_owned(),
            fiscal_year: format!("{}-{:02}", REFERENCE_YEAR - 1, REFERENCE_YEAR % 100),
            allocated_paise,
            utilized_paise: allocated_paise * self.int_range_i64(0, 100) / 100,
            approved: self.rng.bool(),
        }
    }

    /// A department form that passes validation.
    pub fn department_form(&mut self) -> DepartmentFormInput {
        let (name, code) = DEPARTMENTS[self.rng.int_n(DEPARTMENTS.len())];
        DepartmentFormInput {
            name: name.to_owned(),
            code: code.to_owned(),
            head: self.person_name(),
            description: format!("Handles {} requests", name.to_lowercase()),
        }
    }

    /// A grievance form that passes validation.
    pub fn grievance_form(&mut self) -> GrievanceFormInput {
        let (title, category) = GRIEVANCE_TITLES[self.rng.int_n(GRIEVANCE_TITLES.len())];
        GrievanceFormInput {
            title: title.to_owned(),
            category: category.to_owned(),
            district: self.pick(&DISTRICTS).to_owned(),
            priority: Priority::ALL[self.rng.int_n(Priority::ALL.len())],
            description: format!("{title} near the market since last Monday."),
        }
    }

    pub fn date_in_year(&mut self, year: i32) -> Date {
        let start = Date::from_calendar_date(year, Month::January, 1).expect("valid year start");
        let days = if time::util::is_leap_year(year) {
            366
        } else {
            365
        };
        start + Duration::days(self.int_range_i64(0, days - 1))
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range_i64(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }
}

/// Temporary state directory; the guard must outlive every use of the path.
pub fn temp_state_dir() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let state_dir = dir.path().join("state");
    std::fs::create_dir_all(&state_dir)
        .with_context(|| format!("create state dir {}", state_dir.display()))?;
    Ok((dir, state_dir))
}

pub fn fixture_date() -> Date {
    Date::from_calendar_date(REFERENCE_YEAR, Month::February, 19).expect("valid fixture date")
}
