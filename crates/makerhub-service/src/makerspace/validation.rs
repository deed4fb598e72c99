//! Makerspace profile validation.
//!
//! Payloads arrive as loose JSON. Validation walks the whole payload and
//! collects every problem before failing, so a client sees all missing
//! and malformed fields in one response instead of one at a time.

use serde::Serialize;
use serde_json::{Map, Value};

use makerhub_core::error::AppError;
use makerhub_entity::makerspace::{MakerspaceProfile, WEEKDAYS};

/// Fields that must be present and non-empty.
pub const REQUIRED_FIELDS: [&str; 12] = [
    "type",
    "usage",
    "name",
    "email",
    "number",
    "inChargeName",
    "timings",
    "city",
    "state",
    "address",
    "zipcode",
    "country",
];

/// Required fields whose value is a plain string.
const REQUIRED_STRING_FIELDS: [&str; 10] = [
    "type",
    "name",
    "email",
    "number",
    "inChargeName",
    "city",
    "state",
    "address",
    "zipcode",
    "country",
];

const OPTIONAL_STRING_FIELDS: [&str; 7] = [
    "websiteLink",
    "organizationName",
    "organizationEmail",
    "description",
    "googleMapLink",
    "instructions",
    "additionalInformation",
];

/// Fields holding a list of strings.
const STRING_LIST_FIELDS: [&str; 5] = [
    "usage",
    "imageLinks",
    "logoImageLinks",
    "howToReach",
    "amenities",
];

const MENTOR_FIELDS: [&str; 4] = ["name", "designation", "linkedin", "image"];

/// Problems found in a profile payload, reported as error details.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileIssues {
    /// Required fields that are absent, null, or blank.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<String>,
    /// Fields present with the wrong shape.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub invalid_fields: Vec<String>,
    /// Weekdays without opening hours.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_timings: Vec<String>,
}

impl ProfileIssues {
    fn is_empty(&self) -> bool {
        self.missing_fields.is_empty()
            && self.invalid_fields.is_empty()
            && self.missing_timings.is_empty()
    }

    fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.missing_fields.is_empty() {
            parts.push(format!(
                "Missing required fields: {}",
                self.missing_fields.join(", ")
            ));
        }
        if !self.invalid_fields.is_empty() {
            parts.push(format!("Invalid fields: {}", self.invalid_fields.join(", ")));
        }
        if !self.missing_timings.is_empty() {
            parts.push(format!(
                "Missing timings for: {}",
                self.missing_timings.join(", ")
            ));
        }
        parts.join("; ")
    }

    fn into_error(self) -> AppError {
        let message = self.summary();
        match serde_json::to_value(&self) {
            Ok(details) => AppError::validation(message).with_details(details),
            Err(_) => AppError::validation(message),
        }
    }
}

/// Absent, null, or a blank string.
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn is_string_list(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| items.iter().all(Value::is_string))
}

fn check_mentors(mentors: &Value, issues: &mut ProfileIssues) {
    let Some(items) = mentors.as_array() else {
        issues.invalid_fields.push("mentors".to_string());
        return;
    };

    for (i, item) in items.iter().enumerate() {
        let Some(mentor) = item.as_object() else {
            issues.invalid_fields.push(format!("mentors[{i}]"));
            continue;
        };
        for field in MENTOR_FIELDS {
            let value = mentor.get(field);
            if is_missing(value) || !value.is_some_and(Value::is_string) {
                issues.invalid_fields.push(format!("mentors[{i}].{field}"));
            }
        }
    }
}

fn check_timings(timings: &Value, issues: &mut ProfileIssues) {
    let Some(days) = timings.as_object() else {
        issues.invalid_fields.push("timings".to_string());
        return;
    };

    for day in WEEKDAYS {
        let value = days.get(day);
        if is_missing(value) || !value.is_some_and(Value::is_string) {
            issues.missing_timings.push(day.to_string());
        }
    }
}

/// Collect every problem in a profile object.
fn inspect(fields: &Map<String, Value>) -> ProfileIssues {
    let mut issues = ProfileIssues::default();

    for field in REQUIRED_FIELDS {
        if is_missing(fields.get(field)) {
            issues.missing_fields.push(field.to_string());
        }
    }

    for field in REQUIRED_STRING_FIELDS.iter().chain(OPTIONAL_STRING_FIELDS.iter()) {
        match fields.get(*field) {
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(_) => issues.invalid_fields.push(field.to_string()),
        }
    }

    for field in STRING_LIST_FIELDS {
        match fields.get(field) {
            None | Some(Value::Null) => {}
            Some(value) if is_string_list(value) => {}
            Some(_) => issues.invalid_fields.push(field.to_string()),
        }
    }

    if let Some(timings) = fields.get("timings").filter(|v| !v.is_null()) {
        check_timings(timings, &mut issues);
    }

    if let Some(mentors) = fields.get("mentors").filter(|v| !v.is_null()) {
        check_mentors(mentors, &mut issues);
    }

    match fields.get("rating") {
        None | Some(Value::Null) | Some(Value::Number(_)) => {}
        Some(_) => issues.invalid_fields.push("rating".to_string()),
    }

    match fields.get("listed") {
        None | Some(Value::Null) | Some(Value::Bool(_)) => {}
        Some(_) => issues.invalid_fields.push("listed".to_string()),
    }

    issues
}

/// Validate a profile payload and convert it into a typed profile.
///
/// Unknown keys are ignored and null values count as absent. On failure
/// the error carries a [`ProfileIssues`] object as its details.
pub fn validate_profile(payload: &Value) -> Result<MakerspaceProfile, AppError> {
    let Some(fields) = payload.as_object() else {
        return Err(AppError::validation("Makerspace profile must be a JSON object"));
    };

    let issues = inspect(fields);
    if !issues.is_empty() {
        return Err(issues.into_error());
    }

    let cleaned: Map<String, Value> = fields
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    serde_json::from_value(Value::Object(cleaned))
        .map_err(|e| AppError::validation(format!("Invalid makerspace profile: {e}")))
}
