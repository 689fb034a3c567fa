use super::*;

#[test]
fn test_single_partial_row_pads_to_columns() {
    let dump = HexDump::new(b"Hi\x00").columns(4);
    let lines: Vec<_> = dump.lines().collect();
    assert_eq!(lines, vec!["48 69 00    | Hi.".to_string()]);
}

#[test]
fn test_offset_prefix_and_label() {
    let data: Vec<u8> = (0u8..20).collect();
    let dump = HexDump::new(&data)
        .prefix("ioctl: ")
        .prefix_type(DumpPrefix::Offset)
        .ascii(false);
    let lines: Vec<_> = dump.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "ioctl: 00000000: 00 01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f"
    );
    assert!(lines[1].starts_with("ioctl: 00000010: 10 11 12 13"));
}

#[test]
fn test_non_printable_bytes_become_dots() {
    let dump = HexDump::new(&[0x41, 0x7f, 0x0a, 0x20]).columns(4);
    let line = dump.lines().next().unwrap();
    assert!(line.ends_with(" | A.. "));
}

#[test]
fn test_address_prefix_uses_row_start() {
    let data = [0u8; 8];
    let dump = HexDump::new(&data).columns(4).prefix_type(DumpPrefix::Address);
    let lines: Vec<_> = dump.lines().collect();
    let second = alloc::format!("{:p}: ", data.as_ptr().wrapping_add(4));
    assert!(lines[1].starts_with(&second));
}

#[test]
fn test_display_matches_lines() {
    let data = b"0123456789abcdefXYZ";
    let dump = HexDump::new(data);
    let mut joined = dump.lines().collect::<Vec<_>>().join("\n");
    joined.push('\n');
    assert_eq!(dump.to_string(), joined);
}

#[test]
fn test_empty_input_produces_no_lines() {
    let dump = HexDump::new(&[]);
    assert_eq!(dump.line_count(), 0);
    assert_eq!(dump.to_string(), "");
}

#[test]
fn test_zero_columns_treated_as_one() {
    let dump = HexDump::new(b"ab").columns(0).ascii(false);
    let lines: Vec<_> = dump.lines().collect();
    assert_eq!(lines, vec!["61".to_string(), "62".to_string()]);
}

#[test]
fn test_no_separator_without_ascii_column() {
    let dump = HexDump::new(b"Hi").columns(4).ascii(false);
    let line = dump.lines().next().unwrap();
    assert_eq!(line, "48 69      ");
    assert!(!line.contains('|'));
}
