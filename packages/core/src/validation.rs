// ABOUTME: Field-level validation for create and update inputs
// ABOUTME: Length limits, required fields, and the registration age floor

use chrono::NaiveDate;
use thiserror::Error;

use crate::constants::{MAX_NAME_LENGTH, MAX_PROJECT_DESCRIPTION_LENGTH, MIN_USER_AGE};
use crate::types::{
    CommentInput, IssueCreateInput, IssueUpdateInput, ProjectCreateInput, ProjectUpdateInput,
    UserCreateInput, UserUpdateInput,
};
use crate::utils::age_on;

/// A rejected input, naming the offending field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

type ValidationResult = Result<(), ValidationError>;

fn require_text(field: &str, value: &str, max: usize) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "This field may not be blank."));
    }
    if value.chars().count() > max {
        return Err(ValidationError::new(
            field,
            format!("Ensure this field has no more than {} characters.", max),
        ));
    }
    Ok(())
}

fn limit_text(field: &str, value: &str, max: usize) -> ValidationResult {
    if value.chars().count() > max {
        return Err(ValidationError::new(
            field,
            format!("Ensure this field has no more than {} characters.", max),
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> ValidationResult {
    let trimmed = email.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::new("email", "Enter a valid email address.")),
    }
}

fn validate_age(date_of_birth: NaiveDate, today: NaiveDate) -> ValidationResult {
    if age_on(date_of_birth, today) < MIN_USER_AGE {
        return Err(ValidationError::new(
            "date_of_birth",
            format!("You must be at least {} years old to register.", MIN_USER_AGE),
        ));
    }
    Ok(())
}

pub fn validate_project_create(input: &ProjectCreateInput) -> ValidationResult {
    require_text("name", &input.name, MAX_NAME_LENGTH)?;
    if let Some(ref description) = input.description {
        limit_text("description", description, MAX_PROJECT_DESCRIPTION_LENGTH)?;
    }
    Ok(())
}

pub fn validate_project_update(input: &ProjectUpdateInput) -> ValidationResult {
    if let Some(ref name) = input.name {
        require_text("name", name, MAX_NAME_LENGTH)?;
    }
    if let Some(ref description) = input.description {
        limit_text("description", description, MAX_PROJECT_DESCRIPTION_LENGTH)?;
    }
    Ok(())
}

pub fn validate_issue_create(input: &IssueCreateInput) -> ValidationResult {
    require_text("title", &input.title, MAX_NAME_LENGTH)
}

pub fn validate_issue_update(input: &IssueUpdateInput) -> ValidationResult {
    if let Some(ref title) = input.title {
        require_text("title", title, MAX_NAME_LENGTH)?;
    }
    Ok(())
}

pub fn validate_comment_input(input: &CommentInput) -> ValidationResult {
    if input.description.trim().is_empty() {
        return Err(ValidationError::new(
            "description",
            "This field may not be blank.",
        ));
    }
    Ok(())
}

/// Validates a registration; `today` anchors the age computation
pub fn validate_user_create(input: &UserCreateInput, today: NaiveDate) -> ValidationResult {
    require_text("username", &input.username, 150)?;
    validate_email(&input.email)?;
    if let Some(dob) = input.date_of_birth {
        validate_age(dob, today)?;
    }
    Ok(())
}

pub fn validate_user_update(input: &UserUpdateInput, today: NaiveDate) -> ValidationResult {
    if let Some(ref username) = input.username {
        require_text("username", username, 150)?;
    }
    if let Some(ref email) = input.email {
        validate_email(email)?;
    }
    if let Some(dob) = input.date_of_birth {
        validate_age(dob, today)?;
    }
    Ok(())
}
