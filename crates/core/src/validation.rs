//! Field-validation rules for films and users.
//!
//! These are the domain rules the storage layer relies on having been
//! checked; structural checks (email shape, lengths, ranges) are expressed
//! on the DTOs themselves via `validator` derives, while the date rules
//! below need a reference point and live here.

use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// Maximum film description length, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// No film predates the first public screening (1895-12-28).
pub fn earliest_release_date() -> Date {
    Date::from_ymd_opt(1895, 12, 28).unwrap()
}

/// Reject release dates earlier than the first public screening.
pub fn check_release_date(release_date: Date) -> CoreResult<()> {
    if release_date < earliest_release_date() {
        return Err(CoreError::Validation(format!(
            "release date {release_date} predates the first film screening"
        )));
    }
    Ok(())
}

/// Reject birthdays in the future.
pub fn check_birthday(birthday: Date) -> CoreResult<()> {
    let today = chrono::Utc::now().date_naive();
    if birthday > today {
        return Err(CoreError::Validation(format!(
            "birthday {birthday} is in the future"
        )));
    }
    Ok(())
}

/// Reject logins containing whitespace.
pub fn check_login(login: &str) -> CoreResult<()> {
    if login.trim().is_empty() || login.contains(' ') {
        return Err(CoreError::Validation(
            "login must be non-empty and contain no spaces".to_string(),
        ));
    }
    Ok(())
}
