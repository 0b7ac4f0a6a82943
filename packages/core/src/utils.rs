// ABOUTME: Shared utility functions for Tracker
// ABOUTME: Comment identity generation and age computation

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

/// Generate the primary identity of a new comment (UUID v4, hyphenated)
pub fn generate_comment_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Whole years elapsed between `date_of_birth` and `today`
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    years.max(0) as u32
}
