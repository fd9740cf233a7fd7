use chrono::{Datelike, Days};
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{entity::prelude::*, NotSet, Set};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::ModelError;

pub const FIRST_NAME_MAX: usize = 50;
pub const LAST_NAME_MAX: usize = 50;
pub const EMAIL_MAX: usize = 255;
pub const PHONE_NUMBER_MAX: usize = 20;
pub const ADDITIONAL_INFO_MAX: usize = 255;

/// Days after `today` that still count as an upcoming birthday.
pub const BIRTHDAY_WINDOW_DAYS: u64 = 7;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone_number: String,
    pub birth_date: Option<Date>,
    pub additional_info: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ModelError> {
    let len = value.chars().count();
    if len > max {
        return Err(ModelError::validation(field, format!("at most {max} characters allowed, got {len}")));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    check_len("email", email, EMAIL_MAX)?;
    if !EMAIL_RE.is_match(email) {
        return Err(ModelError::validation("email", "not a valid email address"));
    }
    Ok(())
}

/// Fields supplied by the caller when creating a contact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactBase {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(default)]
    pub birth_date: Option<Date>,
    #[serde(default)]
    pub additional_info: Option<String>,
}

impl ContactBase {
    pub fn validate(&self) -> Result<(), ModelError> {
        check_len("first_name", &self.first_name, FIRST_NAME_MAX)?;
        check_len("last_name", &self.last_name, LAST_NAME_MAX)?;
        validate_email(&self.email)?;
        check_len("phone_number", &self.phone_number, PHONE_NUMBER_MAX)?;
        if let Some(info) = &self.additional_info {
            check_len("additional_info", info, ADDITIONAL_INFO_MAX)?;
        }
        Ok(())
    }

    /// Active model for insertion; `id` is left to the database.
    pub fn into_active_model(self, now: DateTimeWithTimeZone) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            first_name: Set(self.first_name),
            last_name: Set(self.last_name),
            email: Set(self.email),
            phone_number: Set(self.phone_number),
            birth_date: Set(self.birth_date),
            additional_info: Set(self.additional_info),
            created_at: Set(now),
            updated_at: Set(None),
        }
    }
}

// Distinguishes an explicit `null` (Some(None)) from an absent field (None).
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Partial update: `None` leaves a column untouched.
///
/// Nullable columns take `Option<Option<T>>`; `Some(None)` clears the value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "explicit_null", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<Option<Date>>,
    #[serde(default, deserialize_with = "explicit_null", skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<Option<String>>,
}

impl ContactUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(v) = &self.first_name {
            check_len("first_name", v, FIRST_NAME_MAX)?;
        }
        if let Some(v) = &self.last_name {
            check_len("last_name", v, LAST_NAME_MAX)?;
        }
        if let Some(v) = &self.email {
            validate_email(v)?;
        }
        if let Some(v) = &self.phone_number {
            check_len("phone_number", v, PHONE_NUMBER_MAX)?;
        }
        if let Some(Some(v)) = &self.additional_info {
            check_len("additional_info", v, ADDITIONAL_INFO_MAX)?;
        }
        Ok(())
    }

    /// Overwrite only the supplied fields of `am`.
    pub fn apply(self, am: &mut ActiveModel) {
        if let Some(v) = self.first_name {
            am.first_name = Set(v);
        }
        if let Some(v) = self.last_name {
            am.last_name = Set(v);
        }
        if let Some(v) = self.email {
            am.email = Set(v);
        }
        if let Some(v) = self.phone_number {
            am.phone_number = Set(v);
        }
        if let Some(v) = self.birth_date {
            am.birth_date = Set(v);
        }
        if let Some(v) = self.additional_info {
            am.additional_info = Set(v);
        }
    }
}

/// A full body replaces every field, including clearing the nullable ones.
impl From<ContactBase> for ContactUpdate {
    fn from(body: ContactBase) -> Self {
        Self {
            first_name: Some(body.first_name),
            last_name: Some(body.last_name),
            email: Some(body.email),
            phone_number: Some(body.phone_number),
            birth_date: Some(body.birth_date),
            additional_info: Some(body.additional_info),
        }
    }
}

/// Month/day range of upcoming birthdays, inclusive on both ends.
///
/// The year is ignored. A window spans at most two calendar months, so it
/// is either one `(month, day..=day)` range or a tail of the start month
/// plus a head of the end month (which also covers December to January).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BirthdayWindow {
    pub start_month: u32,
    pub start_day: u32,
    pub end_month: u32,
    pub end_day: u32,
}

impl BirthdayWindow {
    pub fn starting(today: Date) -> Self {
        let end = today
            .checked_add_days(Days::new(BIRTHDAY_WINDOW_DAYS))
            .unwrap_or(Date::MAX);
        Self {
            start_month: today.month(),
            start_day: today.day(),
            end_month: end.month(),
            end_day: end.day(),
        }
    }

    pub fn crosses_month(&self) -> bool {
        self.start_month != self.end_month
    }

    pub fn contains(&self, birth_date: Date) -> bool {
        let (month, day) = (birth_date.month(), birth_date.day());
        if self.crosses_month() {
            (month == self.start_month && day >= self.start_day)
                || (month == self.end_month && day <= self.end_day)
        } else {
            month == self.start_month && (self.start_day..=self.end_day).contains(&day)
        }
    }
}

/// Search filter; a contact matches when ANY supplied field is a
/// case-insensitive substring of the corresponding column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl SearchCriteria {
    pub fn new(first_name: Option<&str>, last_name: Option<&str>, email: Option<&str>) -> Self {
        Self {
            first_name: first_name.map(str::to_owned),
            last_name: last_name.map(str::to_owned),
            email: email.map(str::to_owned),
        }
    }

    /// Drop empty strings; they are treated as "not supplied".
    pub fn normalized(self) -> Self {
        let keep = |v: Option<String>| v.filter(|s| !s.is_empty());
        Self {
            first_name: keep(self.first_name),
            last_name: keep(self.last_name),
            email: keep(self.email),
        }
    }

    pub fn is_empty(&self) -> bool {
        [&self.first_name, &self.last_name, &self.email]
            .iter()
            .all(|v| v.as_deref().map_or(true, str::is_empty))
    }

    /// Supplied criteria paired with the column they filter.
    pub fn terms(&self) -> Vec<(Column, &str)> {
        [
            (Column::FirstName, &self.first_name),
            (Column::LastName, &self.last_name),
            (Column::Email, &self.email),
        ]
        .into_iter()
        .filter_map(|(col, v)| v.as_deref().filter(|s| !s.is_empty()).map(|s| (col, s)))
        .collect()
    }

    /// True when every supplied term is ASCII, so SQL `LOWER` folds it the
    /// same way on every backend (SQLite folds ASCII only).
    pub fn is_ascii(&self) -> bool {
        self.terms().iter().all(|(_, value)| value.is_ascii())
    }

    /// Unicode-aware in-memory equivalent of the SQL search condition.
    pub fn matches(&self, contact: &Model) -> bool {
        if self.is_empty() {
            return true;
        }
        [
            (&self.first_name, &contact.first_name),
            (&self.last_name, &contact.last_name),
            (&self.email, &contact.email),
        ]
        .into_iter()
        .filter_map(|(needle, hay)| needle.as_deref().filter(|s| !s.is_empty()).map(|s| (s, hay)))
        .any(|(needle, hay)| hay.to_lowercase().contains(&needle.to_lowercase()))
    }
}

/// Character used to escape LIKE wildcards in `like_pattern`.
pub const LIKE_ESCAPE: char = '\\';

/// Lowercased `%value%` pattern with LIKE wildcards in `value` escaped.
pub fn like_pattern(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('%');
    for c in value.to_lowercase().chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out.push('%');
    out
}
