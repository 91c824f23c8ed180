//! JSON persistence for the address book.
//!
//! # Responsibility
//! - Map between the in-memory entities and the persisted wire shape.
//! - Own the data-file path and the full-file rewrite on save.
//!
//! # Invariants
//! - Saving is a pure, total mapping; entities are valid by construction so
//!   no validation runs on the way out.
//! - Loading surfaces every constraint violation; corrupt data is never
//!   silently repaired.
//! - Wire scalars are `Option` so a missing field is distinguishable from an
//!   empty one and reported with its owning entity.

use crate::model::book::{AddressBook, BookError};
use crate::model::field::{Day, Email, FieldError, ModuleCode, Name, Phone, Remark, Tag, TeleHandle, Time};
use crate::model::module_class::ModuleClass;
use crate::model::person::Person;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type StorageResult<T> = Result<T, StorageError>;

/// Load/save failure taxonomy for the JSON store.
#[derive(Debug)]
pub enum StorageError {
    /// A required scalar was absent from the persisted record.
    MissingField {
        entity: &'static str,
        field: &'static str,
    },
    /// A present value failed its field constructor.
    Field(FieldError),
    /// The persisted data violates a model uniqueness invariant.
    Book(BookError),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { entity, field } => {
                write!(f, "{entity}'s {field} field is missing")
            }
            Self::Field(err) => write!(f, "{err}"),
            Self::Book(err) => write!(f, "persisted data is inconsistent: {err}"),
            Self::Io { path, source } => write!(f, "io error on `{}`: {source}", path.display()),
            Self::Json(err) => write!(f, "malformed data file: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(err) => Some(err),
            Self::Book(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::MissingField { .. } => None,
        }
    }
}

impl From<FieldError> for StorageError {
    fn from(value: FieldError) -> Self {
        Self::Field(value)
    }
}

impl From<BookError> for StorageError {
    fn from(value: BookError) -> Self {
        Self::Book(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

fn missing(entity: &'static str, field: &'static str) -> StorageError {
    StorageError::MissingField { entity, field }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct JsonAddressBook {
    #[serde(default)]
    persons: Vec<JsonPerson>,
    #[serde(default)]
    classes: Vec<JsonModuleClass>,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonPerson {
    name: Option<String>,
    email: Option<String>,
    #[serde(default)]
    module_codes: Vec<JsonModuleCode>,
    phone: Option<String>,
    tele_handle: Option<String>,
    remark: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonModuleCode {
    code: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonModuleClass {
    #[serde(default)]
    module_codes: Vec<JsonModuleCode>,
    day: Option<String>,
    time: Option<String>,
    remark: Option<String>,
}

fn module_code_to_wire(code: &ModuleCode) -> JsonModuleCode {
    JsonModuleCode {
        code: Some(code.code().to_string()),
        tags: code.tags().iter().map(|tag| tag.as_str().to_string()).collect(),
    }
}

fn module_code_from_wire(wire: &JsonModuleCode, entity: &'static str) -> StorageResult<ModuleCode> {
    let code = wire.code.as_deref().ok_or_else(|| missing(entity, "ModuleCode"))?;
    let tags = wire
        .tags
        .iter()
        .map(|tag| Tag::new(tag))
        .collect::<Result<BTreeSet<_>, _>>()?;
    Ok(ModuleCode::new(code, tags)?)
}

fn person_to_wire(person: &Person) -> JsonPerson {
    JsonPerson {
        name: Some(person.name.to_string()),
        email: Some(person.email.to_string()),
        module_codes: person.module_codes.iter().map(module_code_to_wire).collect(),
        phone: Some(person.phone.to_string()),
        tele_handle: Some(person.tele_handle.to_string()),
        remark: Some(person.remark.to_string()),
    }
}

fn person_from_wire(wire: &JsonPerson) -> StorageResult<Person> {
    const ENTITY: &str = "Person";
    let name = Name::new(wire.name.as_deref().ok_or_else(|| missing(ENTITY, "Name"))?)?;
    let email = Email::new(wire.email.as_deref().ok_or_else(|| missing(ENTITY, "Email"))?)?;
    let phone = Phone::new(wire.phone.as_deref().ok_or_else(|| missing(ENTITY, "Phone"))?)?;
    let tele_handle = TeleHandle::new(
        wire.tele_handle
            .as_deref()
            .ok_or_else(|| missing(ENTITY, "TeleHandle"))?,
    )?;
    let remark = Remark::new(
        wire.remark
            .as_deref()
            .ok_or_else(|| missing(ENTITY, "Remark"))?,
    );
    let module_codes = wire
        .module_codes
        .iter()
        .map(|code| module_code_from_wire(code, ENTITY))
        .collect::<StorageResult<BTreeSet<_>>>()?;
    Ok(Person::new(name, email, module_codes, phone, tele_handle, remark))
}

fn class_to_wire(class: &ModuleClass) -> JsonModuleClass {
    JsonModuleClass {
        module_codes: class.module_codes.iter().map(module_code_to_wire).collect(),
        day: Some(class.day.to_string()),
        time: Some(class.time.to_string()),
        remark: Some(class.remark.to_string()),
    }
}

fn class_from_wire(wire: &JsonModuleClass) -> StorageResult<ModuleClass> {
    const ENTITY: &str = "ModuleClass";
    let module_codes = wire
        .module_codes
        .iter()
        .map(|code| module_code_from_wire(code, ENTITY))
        .collect::<StorageResult<BTreeSet<_>>>()?;
    let day = Day::new(wire.day.as_deref().ok_or_else(|| missing(ENTITY, "Day"))?)?;
    let time = Time::new(wire.time.as_deref().ok_or_else(|| missing(ENTITY, "Time"))?)?;
    let remark = Remark::new(
        wire.remark
            .as_deref()
            .ok_or_else(|| missing(ENTITY, "Remark"))?,
    );
    Ok(ModuleClass::new(module_codes, day, time, remark))
}

fn book_to_wire(book: &AddressBook) -> JsonAddressBook {
    JsonAddressBook {
        persons: book.persons().iter().map(person_to_wire).collect(),
        classes: book.classes().iter().map(class_to_wire).collect(),
    }
}

fn book_from_wire(wire: &JsonAddressBook) -> StorageResult<AddressBook> {
    let mut book = AddressBook::new();
    for person in &wire.persons {
        book.add_person(person_from_wire(person)?)?;
    }
    for class in &wire.classes {
        book.add_class(class_from_wire(class)?)?;
    }
    // A freshly loaded book is in sync with its file.
    let _ = book.take_dirty();
    Ok(book)
}

/// File-backed JSON store for one address book.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and converts the persisted book.
    ///
    /// Returns `Ok(None)` when the data file does not exist yet, so callers
    /// can distinguish first launch from a load failure.
    pub fn load(&self) -> StorageResult<Option<AddressBook>> {
        let started_at = Instant::now();
        if !self.path.exists() {
            info!(
                "event=store_load module=storage status=absent path={}",
                self.path.display()
            );
            return Ok(None);
        }

        let outcome = self.read_book();
        match &outcome {
            Ok(book) => info!(
                "event=store_load module=storage status=ok duration_ms={} persons={} classes={}",
                started_at.elapsed().as_millis(),
                book.persons().len(),
                book.classes().len()
            ),
            Err(err) => error!(
                "event=store_load module=storage status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        outcome.map(Some)
    }

    fn read_book(&self) -> StorageResult<AddressBook> {
        let raw = fs::read_to_string(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        let wire: JsonAddressBook = serde_json::from_str(&raw)?;
        book_from_wire(&wire)
    }

    /// Rewrites the whole data file from the current book state.
    pub fn save(&self, book: &AddressBook) -> StorageResult<()> {
        let started_at = Instant::now();
        let outcome = self.write_book(book);
        match &outcome {
            Ok(()) => info!(
                "event=store_save module=storage status=ok duration_ms={} persons={} classes={}",
                started_at.elapsed().as_millis(),
                book.persons().len(),
                book.classes().len()
            ),
            Err(err) => error!(
                "event=store_save module=storage status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        outcome
    }

    fn write_book(&self, book: &AddressBook) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let wire = book_to_wire(book);
        let rendered = serde_json::to_string_pretty(&wire)?;
        fs::write(&self.path, rendered).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
