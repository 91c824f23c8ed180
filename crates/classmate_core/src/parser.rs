//! Text line to typed command parsing.
//!
//! # Responsibility
//! - Tokenize one input line into a command word and prefixed arguments.
//! - Validate prefix presence, exclusivity and argument formats per command.
//!
//! # Invariants
//! - A prefix only starts an argument at the beginning of the argument text
//!   or after whitespace; values may contain spaces.
//! - An empty value after a required prefix is always a parse failure.
//! - Field validation is delegated to the field constructors; the parser
//!   never duplicates a format rule.

use crate::command::{
    Command, Index, PersonEdits, ADD_CLASS_USAGE, ADD_USAGE, DELETE_CLASS_USAGE, DELETE_USAGE,
    EDIT_USAGE, FIND_CLASS_USAGE, FIND_USAGE, SINGLE_PREFIX_SEARCH,
};
use crate::model::book::{ClassFilter, PersonFilter};
use crate::model::field::{
    Day, Email, FieldError, ModuleCode, Name, Phone, Remark, TeleHandle, Time,
};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const PREFIXES: &[&str] = &["n/", "p/", "e/", "th/", "m/", "r/", "d/", "t/"];

pub type ParseResult<T> = Result<T, ParseError>;

/// Parse failure carrying enough context to teach the correct syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    EmptyInput,
    UnknownCommand(String),
    InvalidFormat { usage: &'static str },
    ExclusivePrefixes { usage: &'static str },
    InvalidIndex { given: String },
    Field(FieldError),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => f.write_str("no command given; try `help`"),
            Self::UnknownCommand(word) => write!(f, "unknown command `{word}`; try `help`"),
            Self::InvalidFormat { usage } => write!(f, "invalid command format\n{usage}"),
            Self::ExclusivePrefixes { usage } => {
                write!(f, "{SINGLE_PREFIX_SEARCH}\n{usage}")
            }
            Self::InvalidIndex { given } => {
                write!(f, "index must be a positive integer, got `{given}`")
            }
            Self::Field(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FieldError> for ParseError {
    fn from(value: FieldError) -> Self {
        Self::Field(value)
    }
}

/// Parses one raw input line into a typed command.
pub fn parse_command(line: &str) -> ParseResult<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let (word, args) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };
    let args = tokenize(args);

    match word {
        "add" => parse_add(&args),
        "addclass" => parse_add_class(&args),
        "delete" => parse_delete(&args),
        "deleteclass" => parse_delete_class(&args),
        "edit" => parse_edit(&args),
        "find" => parse_find(&args),
        "findclass" => parse_find_class(&args),
        "list" => Ok(Command::ListAll),
        "sort" => Ok(Command::Sort),
        "clear" => Ok(Command::Clear),
        "help" => Ok(Command::Help),
        "exit" => Ok(Command::Exit),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

/// Argument text split into a preamble and ordered prefixed values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ArgMap {
    preamble: String,
    values: Vec<(&'static str, String)>,
}

impl ArgMap {
    fn contains(&self, prefix: &str) -> bool {
        self.values.iter().any(|(p, _)| *p == prefix)
    }

    fn all(&self, prefix: &str) -> Vec<&str> {
        self.values
            .iter()
            .filter(|(p, _)| *p == prefix)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// The prefix's value, required to occur at most once.
    fn unique(&self, prefix: &str, usage: &'static str) -> ParseResult<Option<&str>> {
        let mut occurrences = self.all(prefix);
        match occurrences.len() {
            0 => Ok(None),
            1 => Ok(occurrences.pop()),
            _ => Err(ParseError::InvalidFormat { usage }),
        }
    }

    /// The prefix's value, required to occur exactly once and be non-empty.
    fn require(&self, prefix: &str, usage: &'static str) -> ParseResult<&str> {
        match self.unique(prefix, usage)? {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(ParseError::InvalidFormat { usage }),
        }
    }
}

/// Splits argument text on prefix occurrences.
///
/// A prefix match only counts at position 0 or after whitespace, so text
/// like `e/a/b@c.d` stays a single value. Values are whitespace-trimmed.
fn tokenize(args: &str) -> ArgMap {
    let bytes = args.as_bytes();
    let mut starts: Vec<(usize, &'static str)> = Vec::new();
    for position in 0..args.len() {
        if !args.is_char_boundary(position) {
            continue;
        }
        if position > 0 && !bytes[position - 1].is_ascii_whitespace() {
            continue;
        }
        if let Some(prefix) = PREFIXES
            .iter()
            .copied()
            .find(|prefix| args[position..].starts_with(prefix))
        {
            starts.push((position, prefix));
        }
    }

    let preamble_end = starts.first().map_or(args.len(), |(position, _)| *position);
    let mut map = ArgMap {
        preamble: args[..preamble_end].trim().to_string(),
        values: Vec::new(),
    };

    for (slot, (position, prefix)) in starts.iter().enumerate() {
        let value_start = position + prefix.len();
        let value_end = starts
            .get(slot + 1)
            .map_or(args.len(), |(next, _)| *next);
        map.values
            .push((*prefix, args[value_start..value_end].trim().to_string()));
    }
    map
}

fn keywords(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}

fn parse_index(text: &str) -> ParseResult<Index> {
    text.parse::<usize>()
        .ok()
        .and_then(Index::from_one_based)
        .ok_or_else(|| ParseError::InvalidIndex {
            given: text.to_string(),
        })
}

fn parse_module_codes(args: &ArgMap, usage: &'static str) -> ParseResult<BTreeSet<ModuleCode>> {
    let entries = args.all("m/");
    if entries.is_empty() || entries.iter().any(|entry| entry.is_empty()) {
        return Err(ParseError::InvalidFormat { usage });
    }
    entries
        .into_iter()
        .map(|entry| ModuleCode::parse(entry).map_err(ParseError::from))
        .collect()
}

fn parse_add(args: &ArgMap) -> ParseResult<Command> {
    if !args.preamble.is_empty() {
        return Err(ParseError::InvalidFormat { usage: ADD_USAGE });
    }
    let name = Name::new(args.require("n/", ADD_USAGE)?)?;
    let phone = Phone::new(args.require("p/", ADD_USAGE)?)?;
    let email = Email::new(args.require("e/", ADD_USAGE)?)?;
    let tele_handle = TeleHandle::new(args.require("th/", ADD_USAGE)?)?;
    let module_codes = parse_module_codes(args, ADD_USAGE)?;
    let remark = args
        .unique("r/", ADD_USAGE)?
        .map(Remark::new)
        .unwrap_or_default();

    Ok(Command::AddPerson(crate::model::person::Person::new(
        name,
        email,
        module_codes,
        phone,
        tele_handle,
        remark,
    )))
}

fn parse_add_class(args: &ArgMap) -> ParseResult<Command> {
    if !args.preamble.is_empty() {
        return Err(ParseError::InvalidFormat {
            usage: ADD_CLASS_USAGE,
        });
    }
    let module_codes = parse_module_codes(args, ADD_CLASS_USAGE)?;
    let day = Day::new(args.require("d/", ADD_CLASS_USAGE)?)?;
    let time = Time::new(args.require("t/", ADD_CLASS_USAGE)?)?;
    let remark = args
        .unique("r/", ADD_CLASS_USAGE)?
        .map(Remark::new)
        .unwrap_or_default();

    Ok(Command::AddClass(crate::model::module_class::ModuleClass::new(
        module_codes,
        day,
        time,
        remark,
    )))
}

fn parse_delete(args: &ArgMap) -> ParseResult<Command> {
    if !args.values.is_empty() || args.preamble.is_empty() {
        return Err(ParseError::InvalidFormat {
            usage: DELETE_USAGE,
        });
    }
    Ok(Command::DeletePerson(parse_index(&args.preamble)?))
}

fn parse_delete_class(args: &ArgMap) -> ParseResult<Command> {
    if !args.values.is_empty() || args.preamble.is_empty() {
        return Err(ParseError::InvalidFormat {
            usage: DELETE_CLASS_USAGE,
        });
    }
    Ok(Command::DeleteClass(parse_index(&args.preamble)?))
}

fn parse_edit(args: &ArgMap) -> ParseResult<Command> {
    if args.preamble.is_empty() {
        return Err(ParseError::InvalidFormat { usage: EDIT_USAGE });
    }
    let index = parse_index(&args.preamble)?;

    let mut edits = PersonEdits::default();
    if let Some(value) = args.unique("n/", EDIT_USAGE)? {
        edits.name = Some(Name::new(value)?);
    }
    if let Some(value) = args.unique("p/", EDIT_USAGE)? {
        edits.phone = Some(Phone::new(value)?);
    }
    if let Some(value) = args.unique("e/", EDIT_USAGE)? {
        edits.email = Some(Email::new(value)?);
    }
    if let Some(value) = args.unique("th/", EDIT_USAGE)? {
        edits.tele_handle = Some(TeleHandle::new(value)?);
    }
    if args.contains("m/") {
        edits.module_codes = Some(parse_module_codes(args, EDIT_USAGE)?);
    }
    // An empty r/ value deliberately clears the remark.
    if let Some(value) = args.unique("r/", EDIT_USAGE)? {
        edits.remark = Some(Remark::new(value));
    }

    if edits.is_empty() {
        return Err(ParseError::InvalidFormat { usage: EDIT_USAGE });
    }
    Ok(Command::EditPerson { index, edits })
}

fn parse_find(args: &ArgMap) -> ParseResult<Command> {
    let present: Vec<&str> = ["n/", "m/", "t/"]
        .into_iter()
        .filter(|prefix| args.contains(prefix))
        .collect();
    match present.as_slice() {
        [] => Err(ParseError::InvalidFormat { usage: FIND_USAGE }),
        [prefix] => {
            let words: Vec<String> = args
                .all(prefix)
                .into_iter()
                .flat_map(|value| keywords(value))
                .collect();
            if words.is_empty() {
                return Err(ParseError::InvalidFormat { usage: FIND_USAGE });
            }
            let filter = match *prefix {
                "n/" => PersonFilter::NameKeywords(words),
                "m/" => PersonFilter::ModuleKeywords(words),
                _ => PersonFilter::TagKeywords(words),
            };
            Ok(Command::FindPersons(filter))
        }
        _ => Err(ParseError::ExclusivePrefixes { usage: FIND_USAGE }),
    }
}

fn parse_find_class(args: &ArgMap) -> ParseResult<Command> {
    if !args.contains("m/") {
        return Err(ParseError::InvalidFormat {
            usage: FIND_CLASS_USAGE,
        });
    }
    let words: Vec<String> = args
        .all("m/")
        .into_iter()
        .flat_map(keywords)
        .collect();
    if words.is_empty() {
        return Err(ParseError::InvalidFormat {
            usage: FIND_CLASS_USAGE,
        });
    }
    Ok(Command::FindClasses(ClassFilter::ModuleKeywords(words)))
}

#[cfg(test)]
mod tests {
    use super::tokenize;

    #[test]
    fn tokenize_splits_preamble_and_prefixed_values() {
        let map = tokenize("1 n/Alice Tan p/123456");
        assert_eq!(map.preamble, "1");
        assert_eq!(map.all("n/"), vec!["Alice Tan"]);
        assert_eq!(map.all("p/"), vec!["123456"]);
    }

    #[test]
    fn tokenize_keeps_embedded_slashes_in_values() {
        let map = tokenize("e/a/b@example.com");
        assert_eq!(map.all("e/"), vec!["a/b@example.com"]);
    }

    #[test]
    fn tokenize_collects_repeated_prefixes_in_order() {
        let map = tokenize("m/CS2030S T10 m/CS2040 T05");
        assert_eq!(map.all("m/"), vec!["CS2030S T10", "CS2040 T05"]);
    }

    #[test]
    fn tokenize_does_not_match_prefix_mid_word() {
        let map = tokenize("n/Bob t/here");
        assert_eq!(map.all("n/"), vec!["Bob"]);
        assert_eq!(map.all("t/"), vec!["here"]);
        let glued = tokenize("n/Bobt/here");
        assert_eq!(glued.all("n/"), vec!["Bobt/here"]);
        assert!(glued.all("t/").is_empty());
    }
}
