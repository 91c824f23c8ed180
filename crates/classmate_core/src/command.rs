//! Typed commands and their execution semantics.
//!
//! # Responsibility
//! - Define the closed set of command variants the parser can produce.
//! - Apply each command to the address book and produce user feedback.
//!
//! # Invariants
//! - Command payloads are fully validated at parse time; execution only
//!   deals with model-level failures (duplicates, missing targets, ranges).
//! - Index payloads resolve against the currently filtered view, matching
//!   what the user sees on screen.

use crate::model::book::{AddressBook, BookError, ClassFilter, PersonFilter};
use crate::model::field::{Email, ModuleCode, Name, Phone, Remark, TeleHandle};
use crate::model::module_class::ModuleClass;
use crate::model::person::Person;
use log::info;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const ADD_USAGE: &str = "add: adds a contact.\n\
     usage: add n/NAME p/PHONE e/EMAIL th/TELEGRAM m/MODULE [m/MODULE]... [r/REMARK]\n\
     example: add n/Alice Tan p/91234567 e/alice@example.com th/@alicetan m/CS2040 T05";
pub const ADD_CLASS_USAGE: &str = "addclass: adds a scheduled class.\n\
     usage: addclass m/MODULE [m/MODULE]... d/DAY t/TIME [r/REMARK]\n\
     example: addclass m/CS2040 T05 d/2 t/10:00 r/COM1-113";
pub const DELETE_USAGE: &str = "delete: removes the contact at the shown index.\n\
     usage: delete INDEX\n\
     example: delete 2";
pub const DELETE_CLASS_USAGE: &str = "deleteclass: removes the class at the shown index.\n\
     usage: deleteclass INDEX\n\
     example: deleteclass 1";
pub const EDIT_USAGE: &str = "edit: edits fields of the contact at the shown index.\n\
     usage: edit INDEX [n/NAME] [p/PHONE] [e/EMAIL] [th/TELEGRAM] [m/MODULE]... [r/REMARK]\n\
     example: edit 1 p/98765432 r/exchange semester";
pub const FIND_USAGE: &str = "find: lists contacts matching one search field.\n\
     usage: find n/KEYWORD [KEYWORD]... | m/KEYWORD [KEYWORD]... | t/KEYWORD [KEYWORD]...\n\
     example: find n/Alice Bob";
pub const FIND_CLASS_USAGE: &str = "findclass: lists classes matching module keywords.\n\
     usage: findclass m/KEYWORD [KEYWORD]...\n\
     example: findclass m/CS2040";
pub const SINGLE_PREFIX_SEARCH: &str =
    "find accepts exactly one of n/, m/ or t/ per search";

pub const SORT_SUCCESS_MESSAGE: &str = "Address book sorted.";
pub const CLEAR_SUCCESS_MESSAGE: &str = "Address book has been cleared.";
pub const EXIT_MESSAGE: &str = "Bye!";

pub const HELP_TEXT: &str = "commands:\n\
     add n/NAME p/PHONE e/EMAIL th/TELEGRAM m/MODULE... [r/REMARK]  add a contact\n\
     addclass m/MODULE... d/DAY t/TIME [r/REMARK]                   add a class\n\
     edit INDEX [fields]...                                         edit a contact\n\
     delete INDEX / deleteclass INDEX                               remove an entry\n\
     find n/... | m/... | t/...                                     search contacts\n\
     findclass m/...                                                search classes\n\
     list                                                           show everything\n\
     sort                                                           sort contacts by name\n\
     clear                                                          remove all entries\n\
     exit                                                           leave the app";

pub type CommandOutcome = Result<CommandResult, CommandError>;

/// One-based position into the currently displayed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index(usize);

impl Index {
    /// Accepts only positive values; zero has no on-screen meaning.
    pub fn from_one_based(value: usize) -> Option<Self> {
        if value == 0 {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn one_based(&self) -> usize {
        self.0
    }

    pub fn zero_based(&self) -> usize {
        self.0 - 1
    }
}

/// Optional field replacements applied by the edit command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonEdits {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub tele_handle: Option<TeleHandle>,
    pub module_codes: Option<BTreeSet<ModuleCode>>,
    pub remark: Option<Remark>,
}

impl PersonEdits {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.tele_handle.is_none()
            && self.module_codes.is_none()
            && self.remark.is_none()
    }

    /// Builds the edited contact, keeping original values for absent fields.
    pub fn apply(&self, original: &Person) -> Person {
        Person::new(
            self.name.clone().unwrap_or_else(|| original.name.clone()),
            self.email.clone().unwrap_or_else(|| original.email.clone()),
            self.module_codes
                .clone()
                .unwrap_or_else(|| original.module_codes.clone()),
            self.phone.clone().unwrap_or_else(|| original.phone.clone()),
            self.tele_handle
                .clone()
                .unwrap_or_else(|| original.tele_handle.clone()),
            self.remark.clone().unwrap_or_else(|| original.remark.clone()),
        )
    }
}

/// Every command the text surface can express.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddPerson(Person),
    AddClass(ModuleClass),
    DeletePerson(Index),
    DeleteClass(Index),
    EditPerson { index: Index, edits: PersonEdits },
    FindPersons(PersonFilter),
    FindClasses(ClassFilter),
    ListAll,
    Sort,
    Clear,
    Help,
    Exit,
}

/// Feedback from one executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub message: String,
    pub exit: bool,
}

impl CommandResult {
    fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit: false,
        }
    }
}

/// Execution failure surfaced to the user without terminating the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Book(BookError),
    IndexOutOfRange { index: usize, shown: usize },
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Book(err) => write!(f, "{err}"),
            Self::IndexOutOfRange { index, shown } => write!(
                f,
                "index {index} is out of range; the shown list has {shown} entries"
            ),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Book(err) => Some(err),
            Self::IndexOutOfRange { .. } => None,
        }
    }
}

impl From<BookError> for CommandError {
    fn from(value: BookError) -> Self {
        Self::Book(value)
    }
}

impl Command {
    /// Applies this command to the address book.
    ///
    /// # Errors
    /// - `CommandError::Book` for duplicate or missing entries.
    /// - `CommandError::IndexOutOfRange` when an index points past the
    ///   currently filtered view.
    pub fn execute(&self, book: &mut AddressBook) -> CommandOutcome {
        match self {
            Self::AddPerson(person) => {
                book.add_person(person.clone())?;
                info!("event=command_executed module=command kind=add");
                Ok(CommandResult::message(format!("Added contact: {person}")))
            }
            Self::AddClass(class) => {
                book.add_class(class.clone())?;
                info!("event=command_executed module=command kind=addclass");
                Ok(CommandResult::message(format!("Added class: {class}")))
            }
            Self::DeletePerson(index) => {
                let target = resolve_person(book, *index)?;
                book.remove_person(&target)?;
                info!("event=command_executed module=command kind=delete");
                Ok(CommandResult::message(format!("Deleted contact: {target}")))
            }
            Self::DeleteClass(index) => {
                let target = resolve_class(book, *index)?;
                book.remove_class(&target)?;
                info!("event=command_executed module=command kind=deleteclass");
                Ok(CommandResult::message(format!("Deleted class: {target}")))
            }
            Self::EditPerson { index, edits } => {
                let target = resolve_person(book, *index)?;
                let edited = edits.apply(&target);
                book.replace_person(&target, edited.clone())?;
                info!("event=command_executed module=command kind=edit");
                Ok(CommandResult::message(format!("Edited contact: {edited}")))
            }
            Self::FindPersons(filter) => {
                book.set_person_filter(filter.clone());
                let shown = book.filtered_persons().len();
                info!("event=command_executed module=command kind=find shown={shown}");
                Ok(CommandResult::message(format!("{shown} contacts listed")))
            }
            Self::FindClasses(filter) => {
                book.set_class_filter(filter.clone());
                let shown = book.filtered_classes().len();
                info!("event=command_executed module=command kind=findclass shown={shown}");
                Ok(CommandResult::message(format!("{shown} classes listed")))
            }
            Self::ListAll => {
                book.reset_filters();
                let persons = book.persons().len();
                let classes = book.classes().len();
                info!("event=command_executed module=command kind=list");
                Ok(CommandResult::message(format!(
                    "Listed {persons} contacts and {classes} classes"
                )))
            }
            Self::Sort => {
                book.sort_persons();
                info!("event=command_executed module=command kind=sort");
                Ok(CommandResult::message(SORT_SUCCESS_MESSAGE))
            }
            Self::Clear => {
                book.clear();
                info!("event=command_executed module=command kind=clear");
                Ok(CommandResult::message(CLEAR_SUCCESS_MESSAGE))
            }
            Self::Help => Ok(CommandResult::message(HELP_TEXT)),
            Self::Exit => Ok(CommandResult {
                message: EXIT_MESSAGE.to_string(),
                exit: true,
            }),
        }
    }
}

fn resolve_person(book: &AddressBook, index: Index) -> Result<Person, CommandError> {
    let shown = book.filtered_persons();
    shown
        .get(index.zero_based())
        .copied()
        .cloned()
        .ok_or(CommandError::IndexOutOfRange {
            index: index.one_based(),
            shown: shown.len(),
        })
}

fn resolve_class(book: &AddressBook, index: Index) -> Result<ModuleClass, CommandError> {
    let shown = book.filtered_classes();
    shown
        .get(index.zero_based())
        .copied()
        .cloned()
        .ok_or(CommandError::IndexOutOfRange {
            index: index.one_based(),
            shown: shown.len(),
        })
}
