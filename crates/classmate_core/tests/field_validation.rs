use classmate_core::{Day, Email, ModuleCode, Name, Phone, Remark, Tag, TeleHandle, Time};

#[test]
fn time_accepts_canonical_hhmm_and_round_trips() {
    for value in ["00:00", "09:30", "10:00", "23:59"] {
        let time = Time::new(value).unwrap();
        assert_eq!(time.to_string(), value, "canonical form should round-trip");
    }
}

#[test]
fn time_rejects_one_digit_hour() {
    // The permissive pattern matches, but the strict HH:MM parse does not.
    let err = Time::new("9:30").unwrap_err();
    assert_eq!(err.field, "Time");
    assert_eq!(err.value, "9:30");
}

#[test]
fn time_rejects_out_of_range_and_garbage() {
    for value in ["24:00", "10:60", "1000", "aa:bb", "10-00", "", " "] {
        assert!(Time::new(value).is_err(), "`{value}` should be rejected");
    }
}

#[test]
fn day_accepts_one_through_seven() {
    for (value, name) in [("1", "Monday"), ("5", "Friday"), ("7", "Sunday")] {
        let day = Day::new(value).unwrap();
        assert_eq!(day.to_string(), value);
        assert_eq!(day.weekday_name(), name);
    }
}

#[test]
fn day_rejects_out_of_range_values() {
    for value in ["0", "8", "-1", "x", ""] {
        assert!(Day::new(value).is_err(), "`{value}` should be rejected");
    }
}

#[test]
fn name_accepts_alphanumeric_words() {
    assert!(Name::new("Alice Tan").is_ok());
    assert!(Name::new("Roy Balakrishnan 2").is_ok());
    for value in ["", " ", "Alice*", "-lead"] {
        assert!(Name::new(value).is_err(), "`{value}` should be rejected");
    }
}

#[test]
fn phone_requires_at_least_three_digits() {
    assert!(Phone::new("123").is_ok());
    assert!(Phone::new("91234567").is_ok());
    for value in ["12", "9123x", "", "+6591234567"] {
        assert!(Phone::new(value).is_err(), "`{value}` should be rejected");
    }
}

#[test]
fn email_requires_local_at_domain_shape() {
    assert!(Email::new("alexyeoh@example.com").is_ok());
    assert!(Email::new("a+b_c.d@u.nus.edu").is_ok());
    for value in ["plain", "@example.com", "user@", "user@.com", "user@-bad"] {
        assert!(Email::new(value).is_err(), "`{value}` should be rejected");
    }
}

#[test]
fn tele_handle_requires_at_and_length() {
    assert!(TeleHandle::new("@alexyeoh").is_ok());
    assert!(TeleHandle::new("@irfan").is_ok());
    for value in ["@abcd", "alexyeoh", "@has space", ""] {
        assert!(TeleHandle::new(value).is_err(), "`{value}` should be rejected");
    }
}

#[test]
fn tag_is_one_alphanumeric_word() {
    assert!(Tag::new("T12").is_ok());
    for value in ["", "T 12", "T-12"] {
        assert!(Tag::new(value).is_err(), "`{value}` should be rejected");
    }
}

#[test]
fn module_code_parse_splits_code_and_tags() {
    let code = ModuleCode::parse("CS2040 T05 L02").unwrap();
    assert_eq!(code.code(), "CS2040");
    assert_eq!(code.tags().len(), 2);
    assert_eq!(code.to_string(), "CS2040 L02 T05");
}

#[test]
fn module_code_normalizes_to_upper_case() {
    let lower = ModuleCode::parse("cs2103t").unwrap();
    let upper = ModuleCode::parse("CS2103T").unwrap();
    assert_eq!(lower, upper);
    assert_eq!(lower.code(), "CS2103T");
}

#[test]
fn module_code_rejects_malformed_codes() {
    for value in ["C2040", "CS20", "2040CS", "CS2040TTT", ""] {
        assert!(ModuleCode::parse(value).is_err(), "`{value}` should be rejected");
    }
}

#[test]
fn remark_allows_anything_including_empty() {
    assert!(Remark::empty().is_empty());
    assert_eq!(Remark::new("lab5 done").as_str(), "lab5 done");
}

#[test]
fn field_error_names_field_value_and_constraint() {
    let err = Day::new("9").unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.contains("Day"));
    assert!(rendered.contains("`9`"));
    assert!(rendered.contains("1 (Monday) to 7 (Sunday)"));
}
