//! Validated field types for contact and class records.
//!
//! # Responsibility
//! - Wrap every user-entered field in an immutable, self-validating type.
//! - Keep each format rule next to its user-facing constraint message.
//!
//! # Invariants
//! - A constructed value is always valid; downstream code never re-validates.
//! - `Display` output is canonical and re-parses through the constructor.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FieldResult<T> = Result<T, FieldError>;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[[:alnum:]][[:alnum:] ]*$").expect("valid name regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{3,}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[[:alnum:]+_.-]+@[[:alnum:]]([[:alnum:]-]*[[:alnum:]])?(\.[[:alnum:]]([[:alnum:]-]*[[:alnum:]])?)*$")
        .expect("valid email regex")
});
static TELE_HANDLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@[A-Za-z0-9_]{5,32}$").expect("valid handle regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[[:alnum:]]+$").expect("valid tag regex"));
static MODULE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{2,4}[0-9]{4}[A-Za-z]{0,2}$").expect("valid code regex"));
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]?[0-9]|2[0-3]):[0-5][0-9]$").expect("valid time regex"));

/// Validation failure for one field value.
///
/// Carries the field kind, the offending raw input and the constraint text
/// shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub value: String,
    pub constraint: &'static str,
}

impl FieldError {
    fn new(field: &'static str, value: &str, constraint: &'static str) -> Self {
        Self {
            field,
            value: value.to_string(),
            constraint,
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid {} `{}`: {}",
            self.field, self.value, self.constraint
        )
    }
}

impl Error for FieldError {}

/// Contact name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(String);

impl Name {
    pub const CONSTRAINT: &'static str =
        "names should contain only alphanumeric characters and spaces, and must not be blank";

    pub fn new(value: &str) -> FieldResult<Self> {
        if !NAME_RE.is_match(value) {
            return Err(FieldError::new("Name", value, Self::CONSTRAINT));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison used by the duplicate-contact policy.
    pub fn eq_ignore_case(&self, other: &Name) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }

    /// Sort key for alphabetical ordering of contacts.
    pub fn sort_key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contact phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phone(String);

impl Phone {
    pub const CONSTRAINT: &'static str =
        "phone numbers should contain only digits and be at least 3 digits long";

    pub fn new(value: &str) -> FieldResult<Self> {
        if !PHONE_RE.is_match(value) {
            return Err(FieldError::new("Phone", value, Self::CONSTRAINT));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Phone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contact email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub const CONSTRAINT: &'static str =
        "emails should be of the form local@domain, with dot-separated alphanumeric domain labels";

    pub fn new(value: &str) -> FieldResult<Self> {
        if !EMAIL_RE.is_match(value) {
            return Err(FieldError::new("Email", value, Self::CONSTRAINT));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Telegram handle, `@` followed by 5 to 32 word characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeleHandle(String);

impl TeleHandle {
    pub const CONSTRAINT: &'static str =
        "telegram handles should start with `@` followed by 5 to 32 letters, digits or underscores";

    pub fn new(value: &str) -> FieldResult<Self> {
        if !TELE_HANDLE_RE.is_match(value) {
            return Err(FieldError::new("TeleHandle", value, Self::CONSTRAINT));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TeleHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form remark. Any content is allowed, including the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Remark(String);

impl Remark {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Remark {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Class-group qualifier attached to a module code, e.g. `T12`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Tag(String);

impl Tag {
    pub const CONSTRAINT: &'static str = "tags should be a single alphanumeric word";

    pub fn new(value: &str) -> FieldResult<Self> {
        if !TAG_RE.is_match(value) {
            return Err(FieldError::new("Tag", value, Self::CONSTRAINT));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive keyword match used by tag search.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.0.eq_ignore_ascii_case(keyword)
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Academic module identifier with optional class-group tags.
///
/// The code itself is case-normalized to upper case; tags keep their input
/// casing and are held in a `BTreeSet` so rendering order is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ModuleCode {
    code: String,
    tags: BTreeSet<Tag>,
}

impl ModuleCode {
    pub const CONSTRAINT: &'static str =
        "module codes should be 2-4 letters, 4 digits and up to 2 trailing letters, e.g. CS2103T";

    pub fn new(code: &str, tags: BTreeSet<Tag>) -> FieldResult<Self> {
        if !MODULE_CODE_RE.is_match(code) {
            return Err(FieldError::new("ModuleCode", code, Self::CONSTRAINT));
        }
        Ok(Self {
            code: code.to_ascii_uppercase(),
            tags,
        })
    }

    /// Parses one `m/` argument: the first whitespace-separated token is the
    /// code, every following token is a class-group tag.
    pub fn parse(entry: &str) -> FieldResult<Self> {
        let mut tokens = entry.split_whitespace();
        let code = tokens.next().ok_or_else(|| {
            FieldError::new("ModuleCode", entry, Self::CONSTRAINT)
        })?;
        let tags = tokens.map(Tag::new).collect::<FieldResult<BTreeSet<_>>>()?;
        Self::new(code, tags)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// Case-insensitive keyword match against the bare code.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.code.eq_ignore_ascii_case(keyword)
    }
}

impl Display for ModuleCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code)?;
        for tag in &self.tags {
            write!(f, " {tag}")?;
        }
        Ok(())
    }
}

/// Weekday a class meets on, 1 (Monday) through 7 (Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Day(u8);

impl Day {
    pub const CONSTRAINT: &'static str = "days should be an integer from 1 (Monday) to 7 (Sunday)";

    pub fn new(value: &str) -> FieldResult<Self> {
        match value.parse::<u8>() {
            Ok(day @ 1..=7) => Ok(Self(day)),
            _ => Err(FieldError::new("Day", value, Self::CONSTRAINT)),
        }
    }

    pub fn as_number(&self) -> u8 {
        self.0
    }

    pub fn weekday_name(&self) -> &'static str {
        match self.0 {
            1 => "Monday",
            2 => "Tuesday",
            3 => "Wednesday",
            4 => "Thursday",
            5 => "Friday",
            6 => "Saturday",
            _ => "Sunday",
        }
    }
}

impl Display for Day {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Time of day a class starts, 24-hour clock.
///
/// The permissive pattern tolerates a one-digit hour, but the strict parse
/// step only accepts the canonical two-digit `HH:MM` form, so `9:30` is
/// rejected while `09:30` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Time {
    hour: u8,
    minute: u8,
}

impl Time {
    pub const CONSTRAINT: &'static str = "times should be in 24-hour HH:MM format, e.g. 09:30";

    pub fn new(value: &str) -> FieldResult<Self> {
        if !TIME_RE.is_match(value) {
            return Err(FieldError::new("Time", value, Self::CONSTRAINT));
        }
        Self::parse_strict(value).ok_or_else(|| FieldError::new("Time", value, Self::CONSTRAINT))
    }

    fn parse_strict(value: &str) -> Option<Self> {
        let (hour_text, minute_text) = value.split_once(':')?;
        if hour_text.len() != 2 || minute_text.len() != 2 {
            return None;
        }
        let hour = hour_text.parse::<u8>().ok()?;
        let minute = minute_text.parse::<u8>().ok()?;
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
