use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::server::response::ApiError;

const MIN_NAME_LEN: usize = 2;
const MAX_NAME_LEN: usize = 100;
const MIN_PASSWORD_LEN: usize = 8;

/// Trims `value` and checks its length in characters.
fn validate_name(value: &str, entity: &str, min_len: usize) -> Result<String, ApiError> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();

    if len < min_len {
        return Err(ApiError::bad_request(if min_len <= 1 {
            format!("{entity} cannot be empty")
        } else {
            format!("{entity} must be at least {min_len} characters")
        }));
    }
    if len > MAX_NAME_LEN {
        return Err(ApiError::bad_request(format!(
            "{entity} cannot exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Display names of users and teams.
pub fn validate_display_name(value: &str, entity: &str) -> Result<String, ApiError> {
    validate_name(value, entity, MIN_NAME_LEN)
}

/// First and last names of pitchers.
pub fn validate_person_name(value: &str, entity: &str) -> Result<String, ApiError> {
    validate_name(value, entity, 1)
}

/// Trims an optional free-text field; blank becomes `None`.
#[must_use]
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Accepts `local@domain.tld`: one `@`, no whitespace, a dot inside the domain.
pub fn validate_email(email: &str) -> Result<String, ApiError> {
    let email = email.trim();
    let invalid = || ApiError::bad_request("Invalid email address");

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let inner_dot = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i < domain.len() - 1);
    if !inner_dot {
        return Err(invalid());
    }

    Ok(email.to_string())
}

pub fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    if !password.chars().any(char::is_uppercase) {
        return Err(ApiError::bad_request(
            "Password must contain at least one uppercase letter",
        ));
    }
    Ok(())
}

pub fn validate_inning(inning: i64) -> Result<(), ApiError> {
    if inning < 1 {
        return Err(ApiError::bad_request("Inning must be at least 1"));
    }
    Ok(())
}

pub fn validate_velocity(velocity: Option<f64>) -> Result<(), ApiError> {
    match velocity {
        Some(v) if !v.is_finite() || v < 0.0 => {
            Err(ApiError::bad_request("Velocity must be a non-negative number"))
        }
        _ => Ok(()),
    }
}

/// Combines a `dd/mm/yyyy` date and an `HH:MM` time into a UTC timestamp.
/// Returns the timestamp and the normalized time string.
pub fn parse_schedule(date: &str, time: &str) -> Result<(DateTime<Utc>, String), ApiError> {
    let invalid = || ApiError::bad_request("Invalid date or time format");

    let date = NaiveDate::parse_from_str(date.trim(), "%d/%m/%Y").map_err(|_| invalid())?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M").map_err(|_| invalid())?;

    Ok((
        date.and_time(time).and_utc(),
        time.format("%H:%M").to_string(),
    ))
}
