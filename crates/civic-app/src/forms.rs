// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::{FormKind, Priority};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentFormInput {
    pub name: String,
    pub code: String,
    pub head: String,
    pub description: String,
}

/// Population stays as typed text until validation so bad input can be
/// reported against the field instead of being silently coerced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistrictFormInput {
    pub name: String,
    pub state_code: String,
    pub population: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateFormInput {
    pub name: String,
    pub code: String,
    pub capital: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrievanceFormInput {
    pub title: String,
    pub category: String,
    pub district: String,
    pub priority: Priority,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormPayload {
    Department(DepartmentFormInput),
    District(DistrictFormInput),
    State(StateFormInput),
    Grievance(GrievanceFormInput),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    Number,
    Choice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormFieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

const fn field(key: &'static str, label: &'static str, kind: FieldKind) -> FormFieldSpec {
    FormFieldSpec { key, label, kind }
}

const DEPARTMENT_FIELDS: &[FormFieldSpec] = &[
    field("name", "Name", FieldKind::Text),
    field("code", "Code", FieldKind::Text),
    field("head", "Head of department", FieldKind::Text),
    field("description", "Description", FieldKind::Multiline),
];

const DISTRICT_FIELDS: &[FormFieldSpec] = &[
    field("name", "Name", FieldKind::Text),
    field("state_code", "State code", FieldKind::Text),
    field("population", "Population", FieldKind::Number),
];

const STATE_FIELDS: &[FormFieldSpec] = &[
    field("name", "Name", FieldKind::Text),
    field("code", "Code", FieldKind::Text),
    field("capital", "Capital", FieldKind::Text),
];

const GRIEVANCE_FIELDS: &[FormFieldSpec] = &[
    field("title", "Title", FieldKind::Text),
    field("category", "Category", FieldKind::Text),
    field("district", "District", FieldKind::Text),
    field("priority", "Priority", FieldKind::Choice),
    field("description", "Description", FieldKind::Multiline),
];

pub const DEPARTMENT_CODE_LEN: (usize, usize) = (2, 10);
pub const DEPARTMENT_DESCRIPTION_MIN: usize = 10;
pub const GRIEVANCE_DESCRIPTION_MIN: usize = 20;

/// Field-level validation failures keyed by field key. Every failing field is
/// reported, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.fields
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    /// Toast text for a rejected submit.
    pub fn summary(&self) -> String {
        let count = self.len();
        let noun = if count == 1 { "field" } else { "fields" };
        format!("fix {count} {noun}")
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())?;
        for (field, message) in &self.fields {
            write!(f, "; {field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

fn require(errors: &mut FormErrors, key: &'static str, label: &str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(key, format!("{label} is required"));
    }
}

fn require_min_chars(errors: &mut FormErrors, key: &'static str, value: &str, min: usize) {
    let len = value.trim().chars().count();
    if len == 0 {
        errors.insert(key, "description is required");
    } else if len < min {
        let message = format!("description must be at least {min} characters");
        errors.insert(key, message);
    }
}

fn require_two_letter_code(errors: &mut FormErrors, key: &'static str, label: &str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        errors.insert(key, format!("{label} is required"));
    } else if value.chars().count() != 2 || !value.chars().all(|ch| ch.is_ascii_alphabetic()) {
        errors.insert(key, format!("{label} must be exactly 2 letters"));
    }
}

impl FormPayload {
    pub fn kind(&self) -> FormKind {
        match self {
            Self::Department(_) => FormKind::Department,
            Self::District(_) => FormKind::District,
            Self::State(_) => FormKind::State,
            Self::Grievance(_) => FormKind::Grievance,
        }
    }

    pub fn blank_for(kind: FormKind) -> Self {
        match kind {
            FormKind::Department => Self::Department(DepartmentFormInput {
                name: String::new(),
                code: String::new(),
                head: String::new(),
                description: String::new(),
            }),
            FormKind::District => Self::District(DistrictFormInput {
                name: String::new(),
                state_code: String::new(),
                population: String::new(),
            }),
            FormKind::State => Self::State(StateFormInput {
                name: String::new(),
                code: String::new(),
                capital: String::new(),
            }),
            FormKind::Grievance => Self::Grievance(GrievanceFormInput {
                title: String::new(),
                category: String::new(),
                district: String::new(),
                priority: Priority::Medium,
                description: String::new(),
            }),
        }
    }

    pub fn fields(&self) -> &'static [FormFieldSpec] {
        match self {
            Self::Department(_) => DEPARTMENT_FIELDS,
            Self::District(_) => DISTRICT_FIELDS,
            Self::State(_) => STATE_FIELDS,
            Self::Grievance(_) => GRIEVANCE_FIELDS,
        }
    }

    pub fn value(&self, key: &str) -> Option<String> {
        let value = match (self, key) {
            (Self::Department(form), "name") => &form.name,
            (Self::Department(form), "code") => &form.code,
            (Self::Department(form), "head") => &form.head,
            (Self::Department(form), "description") => &form.description,
            (Self::District(form), "name") => &form.name,
            (Self::District(form), "state_code") => &form.state_code,
            (Self::District(form), "population") => &form.population,
            (Self::State(form), "name") => &form.name,
            (Self::State(form), "code") => &form.code,
            (Self::State(form), "capital") => &form.capital,
            (Self::Grievance(form), "title") => &form.title,
            (Self::Grievance(form), "category") => &form.category,
            (Self::Grievance(form), "district") => &form.district,
            (Self::Grievance(form), "priority") => return Some(form.priority.as_str().to_owned()),
            (Self::Grievance(form), "description") => &form.description,
            _ => return None,
        };
        Some(value.clone())
    }

    /// Returns `false` for unknown keys and choice fields.
    pub fn set_value(&mut self, key: &str, value: String) -> bool {
        let slot = match (self, key) {
            (Self::Department(form), "name") => &mut form.name,
            (Self::Department(form), "code") => &mut form.code,
            (Self::Department(form), "head") => &mut form.head,
            (Self::Department(form), "description") => &mut form.description,
            (Self::District(form), "name") => &mut form.name,
            (Self::District(form), "state_code") => &mut form.state_code,
            (Self::District(form), "population") => &mut form.population,
            (Self::State(form), "name") => &mut form.name,
            (Self::State(form), "code") => &mut form.code,
            (Self::State(form), "capital") => &mut form.capital,
            (Self::Grievance(form), "title") => &mut form.title,
            (Self::Grievance(form), "category") => &mut form.category,
            (Self::Grievance(form), "district") => &mut form.district,
            (Self::Grievance(form), "description") => &mut form.description,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// Steps a choice field through its options.
    pub fn cycle(&mut self, key: &str, delta: isize) -> bool {
        match (self, key) {
            (Self::Grievance(form), "priority") => {
                form.priority = form.priority.rotate(delta);
                true
            }
            _ => false,
        }
    }

    pub fn validate(&self) -> Result<(), FormErrors> {
        match self {
            Self::Department(form) => form.validate(),
            Self::District(form) => form.validate(),
            Self::State(form) => form.validate(),
            Self::Grievance(form) => form.validate(),
        }
    }
}

impl DepartmentFormInput {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        require(&mut errors, "name", "name", &self.name);
        let code = self.code.trim();
        let (min, max) = DEPARTMENT_CODE_LEN;
        if code.is_empty() {
            errors.insert("code", "code is required");
        } else if !(min..=max).contains(&code.chars().count()) {
            errors.insert("code", format!("code must be {min}-{max} characters"));
        }
        require(&mut errors, "head", "head of department", &self.head);
        require_min_chars(
            &mut errors,
            "description",
            &self.description,
            DEPARTMENT_DESCRIPTION_MIN,
        );
        errors.into_result()
    }
}

impl DistrictFormInput {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        require(&mut errors, "name", "name", &self.name);
        require_two_letter_code(&mut errors, "state_code", "state code", &self.state_code);
        let population = self.population.trim();
        if population.is_empty() {
            errors.insert("population", "population is required");
        } else {
            match population.parse::<i64>() {
                Ok(value) if value < 0 => {
                    errors.insert("population", "population cannot be negative")
                }
                Ok(_) => {}
                Err(_) => errors.insert("population", "population must be a whole number"),
            }
        }
        errors.into_result()
    }

    /// Parsed population; `None` until the input validates.
    pub fn population_value(&self) -> Option<i64> {
        self.population
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|value| *value >= 0)
    }
}

impl StateFormInput {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        require(&mut errors, "name", "name", &self.name);
        require_two_letter_code(&mut errors, "code", "code", &self.code);
        require(&mut errors, "capital", "capital", &self.capital);
        errors.into_result()
    }
}

impl GrievanceFormInput {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        require(&mut errors, "title", "title", &self.title);
        require(&mut errors, "category", "category", &self.category);
        require(&mut errors, "district", "district", &self.district);
        require_min_chars(
            &mut errors,
            "description",
            &self.description,
            GRIEVANCE_DESCRIPTION_MIN,
        );
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::{DistrictFormInput, FormErrors, FormPayload, GrievanceFormInput, StateFormInput};
    use crate::{FormKind, Priority};

    #[test]
    fn blank_department_reports_every_field() {
        let errors = FormPayload::blank_for(FormKind::Department)
            .validate()
            .expect_err("blank form is invalid");
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("code"), Some("code is required"));
        assert_eq!(errors.summary(), "fix 4 fields");
    }

    #[test]
    fn department_code_length_is_bounded() {
        let mut payload = FormPayload::blank_for(FormKind::Department);
        payload.set_value("name", "Public Works".to_owned());
        payload.set_value("head", "R. Iyer".to_owned());
        payload.set_value("description", "Roads, bridges and drains".to_owned());

        payload.set_value("code", "P".to_owned());
        let errors = payload.validate().expect_err("code too short");
        assert_eq!(errors.get("code"), Some("code must be 2-10 characters"));
        assert_eq!(errors.summary(), "fix 1 field");

        payload.set_value("code", "PWD".to_owned());
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn state_code_must_be_two_letters() {
        let mut form = StateFormInput {
            name: "Kerala".to_owned(),
            code: "KER".to_owned(),
            capital: "Thiruvananthapuram".to_owned(),
        };
        let errors = form.validate().expect_err("three letters");
        assert_eq!(errors.get("code"), Some("code must be exactly 2 letters"));

        form.code = "K1".to_owned();
        assert!(form.validate().is_err());

        form.code = "KL".to_owned();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn district_population_must_be_a_non_negative_integer() {
        let mut form = DistrictFormInput {
            name: "Ernakulam".to_owned(),
            state_code: "KL".to_owned(),
            population: "lots".to_owned(),
        };
        assert_eq!(
            form.validate().expect_err("not a number").get("population"),
            Some("population must be a whole number")
        );

        form.population = "-4".to_owned();
        assert_eq!(
            form.validate().expect_err("negative").get("population"),
            Some("population cannot be negative")
        );
        assert_eq!(form.population_value(), None);

        form.population = " 3282388 ".to_owned();
        assert!(form.validate().is_ok());
        assert_eq!(form.population_value(), Some(3_282_388));
    }

    #[test]
    fn grievance_description_has_minimum_length() {
        let mut form = GrievanceFormInput {
            title: "Streetlight out".to_owned(),
            category: "electricity".to_owned(),
            district: "Pune".to_owned(),
            priority: Priority::High,
            description: "dark street".to_owned(),
        };
        assert_eq!(
            form.validate()
                .expect_err("short description")
                .get("description"),
            Some("description must be at least 20 characters")
        );

        form.description = "The lamp at the corner has been out for a week".to_owned();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn choice_fields_cycle_and_reject_text() {
        let mut payload = FormPayload::blank_for(FormKind::Grievance);
        assert!(!payload.set_value("priority", "urgent".to_owned()));
        assert!(payload.cycle("priority", 1));
        assert_eq!(payload.value("priority").as_deref(), Some("high"));
        assert!(!payload.cycle("title", 1));
    }

    #[test]
    fn payload_serializes_with_kind_tag() {
        let payload = FormPayload::State(StateFormInput {
            name: "Goa".to_owned(),
            code: "GA".to_owned(),
            capital: "Panaji".to_owned(),
        });
        let json = serde_json::to_value(&payload).expect("serialize payload");
        assert_eq!(json["kind"], "state");
        assert_eq!(json["code"], "GA");
    }

    #[test]
    fn form_errors_display_lists_fields() {
        let mut errors = FormErrors::new();
        errors.insert("name", "name is required");
        errors.insert("name", "ignored second message");
        assert_eq!(errors.to_string(), "fix 1 field; name: name is required");
    }
}
