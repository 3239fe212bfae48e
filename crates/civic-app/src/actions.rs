// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use civic_table::{CellValue, Record, RowActionSpec, TableRow};

use crate::schema::PROTECTED_KEY;
use crate::{GrievanceStatus, PollStatus, ProjectStatus, Screen};

pub const ACTION_VIEW: &str = "view";
pub const ACTION_TOGGLE_ACTIVE: &str = "toggle_active";
pub const ACTION_ARCHIVE: &str = "archive";
pub const ACTION_RESOLVE: &str = "resolve";
pub const ACTION_REJECT: &str = "reject";
pub const ACTION_CLOSE_POLL: &str = "close_poll";
pub const ACTION_APPROVE: &str = "approve";

fn flag(row: &Record, key: &str) -> bool {
    row.cell(key) == CellValue::Bool(true)
}

fn text(row: &Record, key: &str) -> String {
    row.cell(key).to_string()
}

/// Menu entries for one row of a screen's table. Enablement is derived from
/// the row's own values.
pub fn row_actions_for(screen: Screen, row: &Record) -> Vec<RowActionSpec> {
    let view = RowActionSpec::new(ACTION_VIEW, "View details");
    match screen {
        Screen::Dashboard => Vec::new(),
        Screen::Users => vec![
            view,
            RowActionSpec::new(ACTION_TOGGLE_ACTIVE, toggle_label(row))
                .enabled_if(!flag(row, PROTECTED_KEY)),
        ],
        Screen::Departments | Screen::Districts | Screen::States => vec![
            view,
            RowActionSpec::new(ACTION_TOGGLE_ACTIVE, toggle_label(row)),
        ],
        Screen::Projects => {
            let archived =
                ProjectStatus::parse(&text(row, "status")) == Some(ProjectStatus::Archived);
            vec![
                view,
                RowActionSpec::new(ACTION_ARCHIVE, "Archive").enabled_if(!archived),
            ]
        }
        Screen::Grievances => {
            let closed = GrievanceStatus::parse(&text(row, "status"))
                .is_some_and(GrievanceStatus::is_closed);
            vec![
                view,
                RowActionSpec::new(ACTION_RESOLVE, "Mark resolved").enabled_if(!closed),
                RowActionSpec::new(ACTION_REJECT, "Reject").enabled_if(!closed),
            ]
        }
        Screen::Polls => {
            let active = PollStatus::parse(&text(row, "status")) == Some(PollStatus::Active);
            vec![
                view,
                RowActionSpec::new(ACTION_CLOSE_POLL, "Close poll").enabled_if(active),
            ]
        }
        Screen::Budgets => vec![
            view,
            RowActionSpec::new(ACTION_APPROVE, "Approve").enabled_if(!flag(row, "approved")),
        ],
    }
}

fn toggle_label(row: &Record) -> &'static str {
    if flag(row, "active") {
        "Deactivate"
    } else {
        "Activate"
    }
}

#[cfg(test)]
mod tests {
    use super::{ACTION_RESOLVE, ACTION_TOGGLE_ACTIVE, ACTION_VIEW, row_actions_for};
    use crate::Screen;
    use crate::schema::PROTECTED_KEY;
    use civic_table::{Record, RowActionSpec};

    fn enabled(actions: &[RowActionSpec], name: &str) -> Option<bool> {
        actions
            .iter()
            .find(|action| action.name == name)
            .map(|action| action.enabled)
    }

    #[test]
    fn protected_users_cannot_be_toggled() {
        let row = Record::new(1)
            .with("active", true)
            .with(PROTECTED_KEY, true);
        let actions = row_actions_for(Screen::Users, &row);
        assert_eq!(enabled(&actions, ACTION_VIEW), Some(true));
        assert_eq!(enabled(&actions, ACTION_TOGGLE_ACTIVE), Some(false));
        assert_eq!(actions[1].label, "Deactivate");
    }

    #[test]
    fn closed_grievances_disable_transitions() {
        let open = Record::new(1).with("status", "in review");
        assert_eq!(
            enabled(&row_actions_for(Screen::Grievances, &open), ACTION_RESOLVE),
            Some(true)
        );

        let rejected = Record::new(2).with("status", "rejected");
        let actions = row_actions_for(Screen::Grievances, &rejected);
        assert!(actions.iter().skip(1).all(|action| !action.enabled));
    }

    #[test]
    fn polls_close_only_while_active() {
        let draft = Record::new(1).with("status", "draft");
        let active = Record::new(2).with("status", "active");
        assert!(!row_actions_for(Screen::Polls, &draft)[1].enabled);
        assert!(row_actions_for(Screen::Polls, &active)[1].enabled);
    }

    #[test]
    fn dashboard_has_no_row_actions() {
        assert!(row_actions_for(Screen::Dashboard, &Record::new(1)).is_empty());
    }
}
