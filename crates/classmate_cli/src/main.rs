//! Interactive command-line front end.
//!
//! # Responsibility
//! - Own the read-eval loop: one text line in, one feedback message out.
//! - Drive persistence after every dispatched command.
//!
//! # Invariants
//! - Parse and execution errors are printed and the loop continues; only
//!   `exit` (or end of input) ends the session.
//! - A load failure at startup falls back to an empty book; corrupt data is
//!   reported, never repaired in place.

use classmate_core::{
    core_version, default_log_level, init_logging, parse_command, sample_book, AddressBook,
    JsonStore,
};
use log::warn;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const DATA_FILE_ENV: &str = "CLASSMATE_DATA_FILE";
const LOG_DIR_ENV: &str = "CLASSMATE_LOG_DIR";
const DEFAULT_DATA_FILE: &str = "data/classmate.json";
const DEFAULT_LOG_DIR: &str = "logs";

fn main() {
    if let Err(message) = run() {
        eprintln!("classmate: {message}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let log_dir = resolve_log_dir()?;
    init_logging(default_log_level(), &log_dir)?;

    let store = JsonStore::new(resolve_data_file());
    let mut book = open_book(&store);

    println!(
        "classmate v{} ({} contacts, {} classes). Type `help` to get started.",
        core_version(),
        book.persons().len(),
        book.classes().len()
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout()
            .flush()
            .map_err(|err| format!("cannot flush stdout: {err}"))?;

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(err)) => return Err(format!("cannot read input: {err}")),
            None => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let exit = dispatch(&line, &mut book, &store);
        if exit {
            break;
        }
    }
    Ok(())
}

/// Runs one line through parse, execute and save; returns the exit flag.
fn dispatch(line: &str, book: &mut AddressBook, store: &JsonStore) -> bool {
    let command = match parse_command(line) {
        Ok(command) => command,
        Err(err) => {
            println!("{err}");
            return false;
        }
    };

    let result = match command.execute(book) {
        Ok(result) => result,
        Err(err) => {
            println!("{err}");
            return false;
        }
    };

    if book.take_dirty() {
        if let Err(err) = store.save(book) {
            println!("warning: changes were not saved: {err}");
        }
    }

    println!("{}", result.message);
    result.exit
}

fn open_book(store: &JsonStore) -> AddressBook {
    match store.load() {
        Ok(Some(book)) => book,
        Ok(None) => {
            // First launch: seed the starter data so the UI has something to
            // show, and persist it immediately.
            let book = sample_book();
            if let Err(err) = store.save(&book) {
                warn!("event=seed_save_failed module=cli error={err}");
                eprintln!("warning: could not write starter data: {err}");
            }
            book
        }
        Err(err) => {
            warn!("event=store_load_fallback module=cli error={err}");
            eprintln!(
                "warning: could not load `{}` ({err}); starting with an empty address book",
                store.path().display()
            );
            AddressBook::new()
        }
    }
}

fn resolve_data_file() -> PathBuf {
    std::env::var_os(DATA_FILE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
}

/// Logging requires an absolute directory; anchor the default at the
/// current working directory.
fn resolve_log_dir() -> Result<String, String> {
    if let Some(dir) = std::env::var_os(LOG_DIR_ENV) {
        let dir = PathBuf::from(dir);
        return path_to_string(dir);
    }
    let cwd = std::env::current_dir().map_err(|err| format!("cannot resolve working directory: {err}"))?;
    path_to_string(cwd.join(DEFAULT_LOG_DIR))
}

fn path_to_string(path: PathBuf) -> Result<String, String> {
    path.into_os_string()
        .into_string()
        .map_err(|raw| format!("path is not valid UTF-8: {}", PathBuf::from(raw).display()))
}
