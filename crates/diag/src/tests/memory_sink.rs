use super::*;

#[test]
fn test_lines_kept_in_order() {
    let sink = MemorySink::new(8);
    sink.write_line(Level::Info, "first");
    sink.emit(Level::Error, format_args!("second {}", 2));

    assert_eq!(sink.lines(), vec!["first".to_string(), "second 2".to_string()]);
    assert_eq!(sink.lines_at(Level::Error), vec!["second 2".to_string()]);
}

#[test]
fn test_overflow_drops_oldest() {
    let sink = MemorySink::new(3);
    for i in 0..5 {
        sink.emit(Level::Debug, format_args!("line {}", i));
    }

    assert_eq!(sink.len(), 3);
    assert_eq!(sink.dropped(), 2);
    assert_eq!(sink.lines()[0], "line 2");
}

#[test]
fn test_take_empties_buffer() {
    let sink = MemorySink::default();
    sink.write_line(Level::Warning, "x");
    let taken = sink.take();
    assert_eq!(taken.len(), 1);
    assert_eq!(taken[0].0, Level::Warning);
    assert!(sink.is_empty());
}

#[test]
fn test_dump_writes_one_line_per_row() {
    let sink = MemorySink::default();
    let data = [0xffu8; 40];
    sink.dump(Level::Debug, &HexDump::new(&data));
    assert_eq!(sink.len(), 3);
    assert_eq!(sink.count_containing("ff ff"), 3);
}

#[test]
fn test_null_sink_accepts_everything() {
    let sink = NullSink;
    sink.write_line(Level::Error, "ignored");
    sink.emit(Level::Debug, format_args!("{}", 1));
}
