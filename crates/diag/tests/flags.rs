//! Trace flag parsing and level mapping.

use diag::{Level, TraceFlags};

#[test]
fn test_parse_off_values() {
    for s in ["", "0", "false", "OFF", " no "] {
        assert_eq!(TraceFlags::parse(s), Ok(TraceFlags::empty()), "{s:?}");
    }
}

#[test]
fn test_parse_verbose_values() {
    for s in ["1", "true", "ON", "yes", "all"] {
        let flags = TraceFlags::parse(s).unwrap();
        assert!(flags.is_verbose(), "{s:?}");
    }
}

#[test]
fn test_parse_event_list() {
    let flags = TraceFlags::parse("dup, close").unwrap();
    assert_eq!(flags, TraceFlags::DUP | TraceFlags::CLOSE);

    let flags = TraceFlags::parse("no-wrapper|OPEN").unwrap();
    assert_eq!(flags, TraceFlags::NO_WRAPPER | TraceFlags::OPEN);
    assert!(!flags.is_verbose());
}

#[test]
fn test_parse_unknown_event() {
    assert!(TraceFlags::parse("dup,bogus").is_err());
}

#[test]
fn test_level_ordering_and_log_mapping() {
    assert!(Level::Error < Level::Warning);
    assert!(Level::Info < Level::Debug);
    assert_eq!(log::Level::from(Level::Warning), log::Level::Warn);
    assert_eq!(Level::Debug.to_string(), "DEBUG");
}
