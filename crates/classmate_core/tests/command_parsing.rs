use classmate_core::command::{ADD_USAGE, EDIT_USAGE, FIND_USAGE};
use classmate_core::{
    parse_command, ClassFilter, Command, Index, ParseError, PersonFilter, Remark,
};

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| word.to_string()).collect()
}

#[test]
fn find_by_name_parses_keywords() {
    let command = parse_command("find n/Alice Bob").unwrap();
    assert_eq!(
        command,
        Command::FindPersons(PersonFilter::NameKeywords(keywords(&["Alice", "Bob"])))
    );
}

#[test]
fn find_is_insensitive_to_keyword_whitespace() {
    let plain = parse_command("find n/Alice Bob").unwrap();
    let noisy = parse_command("find n/ \n Alice \t Bob  \t").unwrap();
    assert_eq!(plain, noisy);
}

#[test]
fn find_with_empty_name_fails_with_usage() {
    let err = parse_command("find n/ ").unwrap_err();
    assert_eq!(err, ParseError::InvalidFormat { usage: FIND_USAGE });
}

#[test]
fn find_with_empty_module_or_tag_fails_with_usage() {
    for line in ["find m/", "find t/", "find", "find   "] {
        let err = parse_command(line).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidFormat { usage: FIND_USAGE },
            "`{line}` should fail with the find usage"
        );
    }
}

#[test]
fn find_by_module_parses_keywords() {
    let command = parse_command("find m/cs2040").unwrap();
    assert_eq!(
        command,
        Command::FindPersons(PersonFilter::ModuleKeywords(keywords(&["cs2040"])))
    );
}

#[test]
fn find_by_tag_parses_keywords() {
    let command = parse_command("find t/T12 T05").unwrap();
    assert_eq!(
        command,
        Command::FindPersons(PersonFilter::TagKeywords(keywords(&["T12", "T05"])))
    );
}

#[test]
fn find_with_two_prefixes_fails_as_exclusive() {
    let err = parse_command("find n/ben m/cs2100").unwrap_err();
    assert_eq!(err, ParseError::ExclusivePrefixes { usage: FIND_USAGE });
}

#[test]
fn find_with_three_prefixes_fails_as_exclusive() {
    let err = parse_command("find n/ben m/cs2100 t/UwU").unwrap_err();
    assert_eq!(err, ParseError::ExclusivePrefixes { usage: FIND_USAGE });
}

#[test]
fn add_parses_full_contact() {
    let command = parse_command(
        "add n/Alice Tan p/91234567 e/alice@example.com th/@alicetan m/CS2040 T05 m/CS2103T r/exchange",
    )
    .unwrap();
    let person = match command {
        Command::AddPerson(person) => person,
        other => panic!("expected add, got {other:?}"),
    };
    assert_eq!(person.name.as_str(), "Alice Tan");
    assert_eq!(person.phone.as_str(), "91234567");
    assert_eq!(person.email.as_str(), "alice@example.com");
    assert_eq!(person.tele_handle.as_str(), "@alicetan");
    assert_eq!(person.module_codes.len(), 2);
    assert_eq!(person.remark.as_str(), "exchange");
}

#[test]
fn add_without_remark_defaults_to_empty() {
    let command =
        parse_command("add n/Bob p/123456 e/bob@example.com th/@bobbyb m/CS1231").unwrap();
    match command {
        Command::AddPerson(person) => assert!(person.remark.is_empty()),
        other => panic!("expected add, got {other:?}"),
    }
}

#[test]
fn add_with_missing_required_prefix_fails_with_usage() {
    for line in [
        "add n/Alice p/123 e/a@b.com th/@aliceta",
        "add n/Alice p/123 th/@aliceta m/CS2040",
        "add p/123 e/a@b.com th/@aliceta m/CS2040",
    ] {
        let err = parse_command(line).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidFormat { usage: ADD_USAGE },
            "`{line}` should fail with the add usage"
        );
    }
}

#[test]
fn add_with_duplicate_scalar_prefix_fails() {
    let err =
        parse_command("add n/Alice n/Alicia p/123 e/a@b.com th/@aliceta m/CS2040").unwrap_err();
    assert_eq!(err, ParseError::InvalidFormat { usage: ADD_USAGE });
}

#[test]
fn add_with_invalid_field_reports_field_error() {
    let err =
        parse_command("add n/Alice p/123 e/not-an-email th/@aliceta m/CS2040").unwrap_err();
    match err {
        ParseError::Field(field_err) => assert_eq!(field_err.field, "Email"),
        other => panic!("expected field error, got {other:?}"),
    }
}

#[test]
fn addclass_parses_slot_and_modules() {
    let command = parse_command("addclass m/CS2040 T05 d/2 t/10:00 r/COM1-113").unwrap();
    let class = match command {
        Command::AddClass(class) => class,
        other => panic!("expected addclass, got {other:?}"),
    };
    assert_eq!(class.day.to_string(), "2");
    assert_eq!(class.time.to_string(), "10:00");
    assert_eq!(class.remark.as_str(), "COM1-113");
    assert_eq!(class.module_codes.len(), 1);
}

#[test]
fn addclass_with_invalid_day_reports_field_error() {
    let err = parse_command("addclass m/CS2040 d/9 t/10:00").unwrap_err();
    match err {
        ParseError::Field(field_err) => assert_eq!(field_err.field, "Day"),
        other => panic!("expected field error, got {other:?}"),
    }
}

#[test]
fn delete_parses_one_based_index() {
    let command = parse_command("delete 2").unwrap();
    assert_eq!(
        command,
        Command::DeletePerson(Index::from_one_based(2).unwrap())
    );
}

#[test]
fn delete_rejects_non_positive_or_non_numeric_index() {
    for line in ["delete 0", "delete -1", "delete two"] {
        let err = parse_command(line).unwrap_err();
        assert!(
            matches!(err, ParseError::InvalidIndex { .. }),
            "`{line}` should fail as an invalid index, got {err:?}"
        );
    }
}

#[test]
fn edit_requires_at_least_one_field() {
    let err = parse_command("edit 1").unwrap_err();
    assert_eq!(err, ParseError::InvalidFormat { usage: EDIT_USAGE });
}

#[test]
fn edit_parses_partial_field_set() {
    let command = parse_command("edit 1 p/98765432 r/").unwrap();
    let (index, edits) = match command {
        Command::EditPerson { index, edits } => (index, edits),
        other => panic!("expected edit, got {other:?}"),
    };
    assert_eq!(index.one_based(), 1);
    assert_eq!(edits.phone.as_ref().map(|p| p.as_str()), Some("98765432"));
    // An explicitly empty r/ clears the remark rather than keeping it.
    assert_eq!(edits.remark, Some(Remark::empty()));
    assert!(edits.name.is_none());
    assert!(edits.module_codes.is_none());
}

#[test]
fn findclass_parses_module_keywords() {
    let command = parse_command("findclass m/CS2040 CS2100").unwrap();
    assert_eq!(
        command,
        Command::FindClasses(ClassFilter::ModuleKeywords(keywords(&[
            "CS2040", "CS2100"
        ])))
    );
}

#[test]
fn bare_words_parse_to_simple_commands() {
    assert_eq!(parse_command("list").unwrap(), Command::ListAll);
    assert_eq!(parse_command("sort").unwrap(), Command::Sort);
    assert_eq!(parse_command("sort -a").unwrap(), Command::Sort);
    assert_eq!(parse_command("clear").unwrap(), Command::Clear);
    assert_eq!(parse_command("help").unwrap(), Command::Help);
    assert_eq!(parse_command("exit").unwrap(), Command::Exit);
}

#[test]
fn unknown_and_empty_input_fail() {
    assert_eq!(
        parse_command("frobnicate now").unwrap_err(),
        ParseError::UnknownCommand("frobnicate".to_string())
    );
    assert_eq!(parse_command("   ").unwrap_err(), ParseError::EmptyInput);
}
