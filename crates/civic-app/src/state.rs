// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{AppMode, FormKind, Role, Screen};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub role: Role,
    pub mode: AppMode,
    pub active_screen: Screen,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::for_role(Role::Admin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextScreen,
    PrevScreen,
    GoTo(Screen),
    SwitchRole(Role),
    OpenForm(FormKind),
    ExitToNav,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    ScreenChanged(Screen),
    RoleChanged(Role),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn for_role(role: Role) -> Self {
        Self {
            role,
            mode: AppMode::Nav,
            active_screen: Screen::Dashboard,
            status_line: None,
        }
    }

    pub fn path(&self) -> String {
        self.active_screen.path(self.role)
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextScreen => self.rotate_screen(1),
            AppCommand::PrevScreen => self.rotate_screen(-1),
            AppCommand::GoTo(screen) => {
                if !self.role.can_view(screen) {
                    let message = format!(
                        "{} is not available to {}",
                        screen.slug(),
                        self.role.label()
                    );
                    return vec![self.set_status(&message)];
                }
                self.active_screen = screen;
                self.mode = AppMode::Nav;
                vec![AppEvent::ScreenChanged(screen)]
            }
            AppCommand::SwitchRole(role) => {
                self.role = role;
                self.mode = AppMode::Nav;
                let mut events = vec![AppEvent::RoleChanged(role)];
                if !role.can_view(self.active_screen) {
                    self.active_screen = Screen::Dashboard;
                    events.push(AppEvent::ScreenChanged(self.active_screen));
                }
                let message = format!("role: {}", role.label());
                events.push(self.set_status(&message));
                events
            }
            AppCommand::OpenForm(kind) => {
                if self.active_screen.form_kind() != Some(kind) {
                    return vec![self.set_status("no form on this screen")];
                }
                self.mode = AppMode::Form(kind);
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::ExitToNav => {
                self.mode = AppMode::Nav;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn rotate_screen(&mut self, delta: isize) -> Vec<AppEvent> {
        let screens = self.role.screens();
        let current = screens
            .iter()
            .position(|screen| *screen == self.active_screen)
            .unwrap_or(0) as isize;
        let len = screens.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.active_screen = screens[next];
        self.mode = AppMode::Nav;
        vec![AppEvent::ScreenChanged(self.active_screen)]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppState};
    use crate::{AppMode, FormKind, Role, Screen};

    #[test]
    fn screen_rotation_wraps_within_role() {
        let mut state = AppState {
            active_screen: Screen::Polls,
            ..AppState::for_role(Role::Citizen)
        };

        let events = state.dispatch(AppCommand::NextScreen);
        assert_eq!(state.active_screen, Screen::Dashboard);
        assert_eq!(events, vec![AppEvent::ScreenChanged(Screen::Dashboard)]);

        state.dispatch(AppCommand::PrevScreen);
        assert_eq!(state.active_screen, Screen::Polls);
        assert_eq!(state.path(), "/citizen/polls");
    }

    #[test]
    fn switching_role_leaves_unavailable_screen() {
        let mut state = AppState {
            active_screen: Screen::Users,
            ..AppState::for_role(Role::Admin)
        };

        let events = state.dispatch(AppCommand::SwitchRole(Role::Staff));
        assert_eq!(state.active_screen, Screen::Dashboard);
        assert_eq!(
            events,
            vec![
                AppEvent::RoleChanged(Role::Staff),
                AppEvent::ScreenChanged(Screen::Dashboard),
                AppEvent::StatusUpdated("role: Staff".to_owned()),
            ],
        );
    }

    #[test]
    fn switching_role_keeps_shared_screen() {
        let mut state = AppState {
            active_screen: Screen::Grievances,
            ..AppState::for_role(Role::Admin)
        };
        state.dispatch(AppCommand::SwitchRole(Role::Citizen));
        assert_eq!(state.active_screen, Screen::Grievances);
    }

    #[test]
    fn goto_refuses_screens_outside_role() {
        let mut state = AppState::for_role(Role::Citizen);
        let events = state.dispatch(AppCommand::GoTo(Screen::Budgets));
        assert_eq!(state.active_screen, Screen::Dashboard);
        assert_eq!(
            events,
            vec![AppEvent::StatusUpdated(
                "budgets is not available to Citizen".to_owned()
            )],
        );
    }

    #[test]
    fn forms_open_only_on_their_screen() {
        let mut state = AppState::for_role(Role::Admin);
        state.dispatch(AppCommand::OpenForm(FormKind::State));
        assert_eq!(state.mode, AppMode::Nav);

        state.dispatch(AppCommand::GoTo(Screen::States));
        state.dispatch(AppCommand::OpenForm(FormKind::State));
        assert_eq!(state.mode, AppMode::Form(FormKind::State));

        state.dispatch(AppCommand::ExitToNav);
        assert_eq!(state.mode, AppMode::Nav);
    }

    #[test]
    fn status_set_and_clear() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::SetStatus("state created".to_owned()));
        assert_eq!(state.status_line.as_deref(), Some("state created"));
        assert_eq!(
            state.dispatch(AppCommand::ClearStatus),
            vec![AppEvent::StatusCleared]
        );
        assert_eq!(state.status_line, None);
    }
}
