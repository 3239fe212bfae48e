// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Built-in constituency dataset loaded at startup.

use civic_app::{
    Budget, BudgetId, Department, DepartmentId, District, DistrictId, Grievance, GrievanceId,
    GrievanceStatus, Poll, PollId, PollStatus, Priority, Project, ProjectId, ProjectStatus, Role,
    State, StateId, User, UserId,
};
use time::macros::date;

const LAKH_RUPEES: i64 = 100_000 * 100;
const CRORE_RUPEES: i64 = 100 * LAKH_RUPEES;

pub fn users() -> Vec<User> {
    let rows = [
        (
            "System Administrator",
            "admin@civic.gov.in",
            Role::Admin,
            "Revenue",
            true,
            true,
            date!(2023 - 04 - 01),
        ),
        (
            "Ramesh Kulkarni",
            "ramesh.kulkarni@civic.gov.in",
            Role::Mla,
            "Legislature",
            true,
            false,
            date!(2024 - 06 - 12),
        ),
        (
            "Anita Menon",
            "anita.menon@civic.gov.in",
            Role::Staff,
            "Public Works",
            true,
            false,
            date!(2024 - 07 - 03),
        ),
        (
            "Farhan Qureshi",
            "farhan.qureshi@civic.gov.in",
            Role::Staff,
            "Water Resources",
            false,
            false,
            date!(2024 - 09 - 18),
        ),
        (
            "Lakshmi Iyer",
            "lakshmi.iyer@civic.gov.in",
            Role::Staff,
            "Health and Family Welfare",
            true,
            false,
            date!(2024 - 11 - 02),
        ),
        ("Vikram Rao", "vikram.rao@mail.in", Role::Citizen, "", true, false, date!(2025 - 01 - 21)),
        (
            "Sneha Patil",
            "sneha.patil@mail.in",
            Role::Citizen,
            "",
            true,
            false,
            date!(2025 - 02 - 14),
        ),
        (
            "Arjun Reddy",
            "arjun.reddy@civic.gov.in",
            Role::Admin,
            "Revenue",
            true,
            false,
            date!(2025 - 03 - 05),
        ),
        ("Meera Das", "meera.das@mail.in", Role::Citizen, "", false, false, date!(2025 - 05 - 30)),
        (
            "Kabir Singh",
            "kabir.singh@civic.gov.in",
            Role::Staff,
            "Transport",
            true,
            false,
            date!(2025 - 08 - 11),
        ),
        ("Priya Nair", "priya.nair@mail.in", Role::Citizen, "", true, false, date!(2025 - 10 - 07)),
        (
            "Election Office Bot",
            "eo-bot@civic.gov.in",
            Role::Admin,
            "Revenue",
            true,
            true,
            date!(2023 - 04 - 01),
        ),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            let (name, email, role, department, active, system_protected, joined_on) = row;
            User {
                id: UserId::new(index as i64 + 1),
                name: name.to_owned(),
                email: email.to_owned(),
                role,
                department: department.to_owned(),
                active,
                system_protected,
                joined_on,
            }
        })
        .collect()
}

pub fn departments() -> Vec<Department> {
    let rows = [
        (
            "Public Works",
            "PWD",
            "S. Deshpande",
            "Roads, bridges and government buildings",
            true,
            date!(2022 - 04 - 01),
        ),
        (
            "Health and Family Welfare",
            "HFW",
            "Dr. K. Raman",
            "Primary health centres and district hospitals",
            true,
            date!(2022 - 04 - 01),
        ),
        (
            "School Education",
            "EDU",
            "M. Fernandes",
            "Government schools, midday meals and scholarships",
            true,
            date!(2022 - 04 - 01),
        ),
        (
            "Water Resources",
            "WRD",
            "P. Chatterjee",
            "Drinking water supply, tanks and canals",
            true,
            date!(2022 - 06 - 15),
        ),
        (
            "Transport",
            "TRN",
            "H. Gill",
            "City bus depots and road safety drives",
            false,
            date!(2023 - 01 - 10),
        ),
        (
            "Social Welfare",
            "SWD",
            "R. Banu",
            "Pensions, hostels and welfare schemes",
            true,
            date!(2023 - 08 - 21),
        ),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(index, (name, code, head, description, active, created_on))| Department {
            id: DepartmentId::new(index as i64 + 1),
            name: name.to_owned(),
            code: code.to_owned(),
            head: head.to_owned(),
            description: description.to_owned(),
            active,
            created_on,
        })
        .collect()
}

pub fn districts() -> Vec<District> {
    let rows = [
        ("Pune", "MH", 9_429_408, true),
        ("Nashik", "MH", 6_107_187, true),
        ("Nagpur", "MH", 4_653_570, true),
        ("Mysuru", "KA", 3_001_127, true),
        ("Belagavi", "KA", 4_779_661, false),
        ("Ernakulam", "KL", 3_282_388, true),
        ("Madurai", "TN", 3_038_252, true),
        ("Surat", "GJ", 6_081_322, true),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(index, (name, state_code, population, active))| District {
            id: DistrictId::new(index as i64 + 1),
            name: name.to_owned(),
            state_code: state_code.to_owned(),
            population,
            active,
        })
        .collect()
}

pub fn states() -> Vec<State> {
    let rows = [
        ("Maharashtra", "MH", "Mumbai", true),
        ("Karnataka", "KA", "Bengaluru", true),
        ("Kerala", "KL", "Thiruvananthapuram", true),
        ("Tamil Nadu", "TN", "Chennai", true),
        ("Gujarat", "GJ", "Gandhinagar", true),
        ("Goa", "GA", "Panaji", false),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(index, (name, code, capital, active))| State {
            id: StateId::new(index as i64 + 1),
            name: name.to_owned(),
            code: code.to_owned(),
            capital: capital.to_owned(),
            active,
        })
        .collect()
}

pub fn projects() -> Vec<Project> {
    let rows = [
        (
            "Ring road widening, phase 2",
            "Pune",
            "Public Works",
            ProjectStatus::InProgress,
            45 * CRORE_RUPEES,
            18 * CRORE_RUPEES,
            date!(2025 - 01 - 15),
        ),
        (
            "Primary health centre upgrade",
            "Nashik",
            "Health and Family Welfare",
            ProjectStatus::Approved,
            3 * CRORE_RUPEES,
            0,
            date!(2025 - 06 - 01),
        ),
        (
            "Smart classrooms for 40 schools",
            "Nagpur",
            "School Education",
            ProjectStatus::Completed,
            2 * CRORE_RUPEES,
            190 * LAKH_RUPEES,
            date!(2024 - 07 - 01),
        ),
        (
            "Lake rejuvenation",
            "Mysuru",
            "Water Resources",
            ProjectStatus::Proposed,
            12 * CRORE_RUPEES,
            0,
            date!(2026 - 04 - 01),
        ),
        (
            "Rural road connectivity",
            "Belagavi",
            "Public Works",
            ProjectStatus::InProgress,
            27 * CRORE_RUPEES,
            9 * CRORE_RUPEES,
            date!(2024 - 11 - 20),
        ),
        (
            "Solar streetlights",
            "Pune",
            "Public Works",
            ProjectStatus::Completed,
            80 * LAKH_RUPEES,
            76 * LAKH_RUPEES,
            date!(2024 - 02 - 10),
        ),
        (
            "Drinking water pipeline",
            "Madurai",
            "Water Resources",
            ProjectStatus::InProgress,
            15 * CRORE_RUPEES,
            11 * CRORE_RUPEES,
            date!(2024 - 09 - 05),
        ),
        (
            "Bus depot modernisation",
            "Surat",
            "Transport",
            ProjectStatus::Archived,
            6 * CRORE_RUPEES,
            45 * LAKH_RUPEES,
            date!(2023 - 03 - 14),
        ),
        (
            "Community hall construction",
            "Ernakulam",
            "Social Welfare",
            ProjectStatus::Approved,
            CRORE_RUPEES,
            0,
            date!(2025 - 12 - 01),
        ),
        (
            "Stormwater drain network",
            "Nashik",
            "Public Works",
            ProjectStatus::Proposed,
            9 * CRORE_RUPEES,
            0,
            date!(2026 - 06 - 15),
        ),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            let (title, district, department, status, budget_paise, spent_paise, start_date) = row;
            Project {
                id: ProjectId::new(index as i64 + 1),
                title: title.to_owned(),
                district: district.to_owned(),
                department: department.to_owned(),
                status,
                budget_paise,
                spent_paise,
                start_date,
            }
        })
        .collect()
}

pub fn grievances() -> Vec<Grievance> {
    let rows = [
        (
            "Streetlight not working on FC Road",
            "Vikram Rao",
            "Pune",
            "electricity",
            Priority::Medium,
            GrievanceStatus::Open,
            date!(2026 - 01 - 04),
        ),
        (
            "Irregular water supply in ward 14",
            "Sneha Patil",
            "Nashik",
            "water",
            Priority::High,
            GrievanceStatus::InReview,
            date!(2026 - 01 - 09),
        ),
        (
            "Pothole near bus stand",
            "Priya Nair",
            "Ernakulam",
            "roads",
            Priority::Urgent,
            GrievanceStatus::Open,
            date!(2026 - 01 - 12),
        ),
        (
            "Garbage not collected for a week",
            "Meera Das",
            "Madurai",
            "sanitation",
            Priority::High,
            GrievanceStatus::Resolved,
            date!(2025 - 12 - 28),
        ),
        (
            "Ration card application delayed",
            "Vikram Rao",
            "Pune",
            "civil supplies",
            Priority::Low,
            GrievanceStatus::Rejected,
            date!(2025 - 11 - 30),
        ),
        (
            "Drain overflowing onto school road",
            "Sneha Patil",
            "Nagpur",
            "sanitation",
            Priority::Urgent,
            GrievanceStatus::Open,
            date!(2026 - 01 - 20),
        ),
        (
            "Old age pension not credited",
            "Meera Das",
            "Mysuru",
            "social welfare",
            Priority::Medium,
            GrievanceStatus::InReview,
            date!(2026 - 01 - 22),
        ),
        (
            "School roof leaking",
            "Priya Nair",
            "Surat",
            "education",
            Priority::High,
            GrievanceStatus::Open,
            date!(2026 - 02 - 01),
        ),
        (
            "Bus shelter damaged",
            "Vikram Rao",
            "Belagavi",
            "transport",
            Priority::Low,
            GrievanceStatus::Resolved,
            date!(2025 - 10 - 17),
        ),
        (
            "Clinic short of nurses",
            "Sneha Patil",
            "Nashik",
            "health",
            Priority::High,
            GrievanceStatus::Open,
            date!(2026 - 02 - 06),
        ),
        (
            "Encroachment on footpath",
            "Priya Nair",
            "Pune",
            "roads",
            Priority::Medium,
            GrievanceStatus::Open,
            date!(2026 - 02 - 11),
        ),
        (
            "Low voltage in evenings",
            "Meera Das",
            "Madurai",
            "electricity",
            Priority::Medium,
            GrievanceStatus::InReview,
            date!(2026 - 02 - 15),
        ),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            let (title, citizen, district, category, priority, status, filed_on) = row;
            Grievance {
                id: GrievanceId::new(index as i64 + 1),
                title: title.to_owned(),
                citizen: citizen.to_owned(),
                district: district.to_owned(),
                category: category.to_owned(),
                priority,
                status,
                description: format!("{title}. Reported by {citizen} from {district}."),
                filed_on,
            }
        })
        .collect()
}

pub fn polls() -> Vec<Poll> {
    let rows = [
        (
            "Should the weekly market move to Sunday?",
            "Ramesh Kulkarni",
            1_284,
            911,
            PollStatus::Active,
            date!(2026 - 03 - 31),
        ),
        (
            "Prioritise road repair over new parks?",
            "Ramesh Kulkarni",
            2_310,
            704,
            PollStatus::Closed,
            date!(2025 - 12 - 31),
        ),
        (
            "Extend library hours to 9 pm?",
            "Anita Menon",
            0,
            0,
            PollStatus::Draft,
            date!(2026 - 05 - 15),
        ),
        (
            "Introduce ward-level waste segregation?",
            "Lakshmi Iyer",
            3_015,
            1_122,
            PollStatus::Active,
            date!(2026 - 04 - 30),
        ),
        (
            "Add an evening bus route to the hospital?",
            "Kabir Singh",
            845,
            97,
            PollStatus::Active,
            date!(2026 - 02 - 28),
        ),
        (
            "Convert the old school into a skills centre?",
            "Ramesh Kulkarni",
            1_560,
            1_498,
            PollStatus::Closed,
            date!(2025 - 09 - 30),
        ),
        (
            "Fund a new public toilet block?",
            "Anita Menon",
            0,
            0,
            PollStatus::Draft,
            date!(2026 - 06 - 30),
        ),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            let (question, created_by, votes_yes, votes_no, status, closes_on) = row;
            Poll {
                id: PollId::new(index as i64 + 1),
                question: question.to_owned(),
                created_by: created_by.to_owned(),
                votes_yes,
                votes_no,
                status,
                closes_on,
            }
        })
        .collect()
}

pub fn budgets() -> Vec<Budget> {
    let rows = [
        ("Public Works", "2025-26", 120 * CRORE_RUPEES, 74 * CRORE_RUPEES, true),
        ("Health and Family Welfare", "2025-26", 85 * CRORE_RUPEES, 61 * CRORE_RUPEES, true),
        ("School Education", "2025-26", 64 * CRORE_RUPEES, 22 * CRORE_RUPEES, true),
        ("Water Resources", "2025-26", 48 * CRORE_RUPEES, 40 * CRORE_RUPEES, true),
        ("Transport", "2025-26", 30 * CRORE_RUPEES, 4 * CRORE_RUPEES, false),
        ("Social Welfare", "2025-26", 52 * CRORE_RUPEES, 39 * CRORE_RUPEES, true),
        ("Public Works", "2026-27", 135 * CRORE_RUPEES, 0, false),
        ("Water Resources", "2026-27", 55 * CRORE_RUPEES, 0, false),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            let (department, fiscal_year, allocated_paise, utilized_paise, approved) = row;
            Budget {
                id: BudgetId::new(index as i64 + 1),
                department: department.to_owned(),
                fiscal_year: fiscal_year.to_owned(),
                allocated_paise,
                utilized_paise,
                approved,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{budgets, grievances, projects, users};
    use crate::Store;
    use civic_app::Screen;
    use civic_table::duplicate_row_ids;
    use time::macros::date;

    #[test]
    fn dataset_ids_are_unique_per_screen() {
        let store = Store::with_demo_data(date!(2026 - 03 - 01));
        for screen in Screen::ALL {
            let rows = store.records(screen);
            assert!(duplicate_row_ids(&rows).is_empty(), "{}", screen.slug());
        }
    }

    #[test]
    fn spending_stays_within_allocation() {
        for project in projects() {
            assert!(
                project.spent_paise <= project.budget_paise,
                "{}",
                project.title
            );
        }
        for budget in budgets() {
            assert!(budget.utilized_paise <= budget.allocated_paise);
        }
    }

    #[test]
    fn built_in_accounts_are_protected() {
        let protected = users()
            .into_iter()
            .filter(|user| user.system_protected)
            .count();
        assert_eq!(protected, 2);
    }

    #[test]
    fn seeded_grievance_descriptions_pass_form_minimum() {
        for grievance in grievances() {
            assert!(grievance.description.chars().count() >= 20);
        }
    }
}
