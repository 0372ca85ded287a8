//! Field validation for create/edit submissions.

use chrono::NaiveDate;
use serde::Serialize;

use super::data::TodoInput;

pub const TITLE_MAX_CHARS: usize = 200;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldErrorKind {
    MissingField,
    FieldTooLong,
    InvalidDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, kind: FieldErrorKind, message: impl Into<String>) -> FieldError {
        FieldError {
            field,
            kind,
            message: message.into(),
        }
    }
}

/// Field values that passed validation. `title` is trimmed; the
/// description is carried over verbatim, whitespace included.
#[derive(Debug, Clone)]
pub struct ValidFields {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// Checks a submission and either accepts all fields or reports every
/// field error at once. Never partially applies.
pub fn validate(input: &TodoInput) -> Result<ValidFields, Vec<FieldError>> {
    let mut errors = Vec::new();

    let title = input.title.trim();
    if title.is_empty() {
        errors.push(FieldError::new(
            "title",
            FieldErrorKind::MissingField,
            "Title is required",
        ));
    } else if title.chars().count() > TITLE_MAX_CHARS {
        errors.push(FieldError::new(
            "title",
            FieldErrorKind::FieldTooLong,
            format!("Title must be at most {TITLE_MAX_CHARS} characters"),
        ));
    }

    let due_date = match input.due_date.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push(FieldError::new(
                    "due_date",
                    FieldErrorKind::InvalidDate,
                    "Enter a valid date in YYYY-MM-DD format",
                ));
                None
            }
        },
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidFields {
        title: title.to_string(),
        description: input.description.clone(),
        due_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, due_date: Option<&str>) -> TodoInput {
        TodoInput {
            title: title.to_string(),
            description: None,
            due_date: due_date.map(str::to_string),
        }
    }

    #[test]
    fn accepts_plain_title() {
        let fields = validate(&input("Buy milk", None)).unwrap();
        assert_eq!(fields.title, "Buy milk");
        assert_eq!(fields.due_date, None);
    }

    #[test]
    fn trims_surrounding_whitespace_from_title() {
        let fields = validate(&input("  Buy milk  ", None)).unwrap();
        assert_eq!(fields.title, "Buy milk");
    }

    #[test]
    fn rejects_empty_title() {
        let errors = validate(&input("", None)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");
        assert_eq!(errors[0].kind, FieldErrorKind::MissingField);
    }

    #[test]
    fn rejects_whitespace_only_title() {
        let errors = validate(&input("   ", None)).unwrap_err();
        assert_eq!(errors[0].kind, FieldErrorKind::MissingField);
    }

    #[test]
    fn title_limit_counts_characters_not_bytes() {
        let accepted = "é".repeat(TITLE_MAX_CHARS);
        assert!(validate(&input(&accepted, None)).is_ok());

        let rejected = "é".repeat(TITLE_MAX_CHARS + 1);
        let errors = validate(&input(&rejected, None)).unwrap_err();
        assert_eq!(errors[0].kind, FieldErrorKind::FieldTooLong);
    }

    #[test]
    fn title_limit_applies_after_trim() {
        let padded = format!("  {}  ", "a".repeat(TITLE_MAX_CHARS));
        assert!(validate(&input(&padded, None)).is_ok());
    }

    #[test]
    fn empty_date_string_means_no_due_date() {
        let fields = validate(&input("Task", Some(""))).unwrap();
        assert_eq!(fields.due_date, None);
    }

    #[test]
    fn parses_iso_date() {
        let fields = validate(&input("Task", Some("2031-05-04"))).unwrap();
        assert_eq!(fields.due_date, NaiveDate::from_ymd_opt(2031, 5, 4));
    }

    #[test]
    fn rejects_unparseable_dates() {
        for raw in ["not-a-date", "2024-13-01", "2024-02-30", "04/05/2031"] {
            let errors = validate(&input("Task", Some(raw))).unwrap_err();
            assert_eq!(errors[0].field, "due_date");
            assert_eq!(errors[0].kind, FieldErrorKind::InvalidDate, "{raw}");
        }
    }

    #[test]
    fn reports_all_field_errors_at_once() {
        let errors = validate(&input("", Some("nope"))).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn description_is_kept_verbatim() {
        let submitted = TodoInput {
            title: "Task".to_string(),
            description: Some("  line one\n\n  line two  ".to_string()),
            due_date: None,
        };
        let fields = validate(&submitted).unwrap();
        assert_eq!(fields.description.as_deref(), Some("  line one\n\n  line two  "));
    }

    #[test]
    fn absent_and_empty_description_stay_distinct() {
        let absent = validate(&input("Task", None)).unwrap();
        assert_eq!(absent.description, None);

        let empty = TodoInput {
            title: "Task".to_string(),
            description: Some(String::new()),
            due_date: None,
        };
        let fields = validate(&empty).unwrap();
        assert_eq!(fields.description.as_deref(), Some(""));
    }
}
