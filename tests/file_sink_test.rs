use std::fs;

use chrono::NaiveDateTime;
use logfan::{FileSink, Level, Sink};
use tempfile::tempdir;

#[test]
fn test_default_target_is_log_dot_log() {
    // The default target is resolved relative to the working directory, so
    // point the working directory at a scratch dir first. The other test in
    // this binary only uses absolute paths and is immune to the change.
    let dir = tempdir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let sink = FileSink::new(Level::Debug, None).unwrap();
    assert_eq!(sink.path().to_str(), Some("log.log"));

    sink.send_message("Hello world", Level::Debug).unwrap();

    let contents = fs::read_to_string(dir.path().join("log.log")).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1);

    let parts: Vec<&str> = lines[0].splitn(4, " - ").collect();
    assert_eq!(parts.len(), 4);
    assert!(NaiveDateTime::parse_from_str(parts[0], "%Y-%m-%d %H:%M:%S%.3f").is_ok());
    assert_eq!(parts[1], "FileSink");
    assert_eq!(parts[2], "DEBUG");
    assert_eq!(parts[3], "Hello world");
}

#[test]
fn test_two_sinks_may_share_a_directory() {
    let dir = tempdir().unwrap();
    let first = FileSink::new(Level::Debug, Some(dir.path().join("a.log"))).unwrap();
    let second = FileSink::new(Level::Debug, Some(dir.path().join("b.log"))).unwrap();

    first.send_message("to a", Level::Info).unwrap();
    second.send_message("to b", Level::Info).unwrap();

    assert!(fs::read_to_string(dir.path().join("a.log"))
        .unwrap()
        .contains("to a"));
    assert!(fs::read_to_string(dir.path().join("b.log"))
        .unwrap()
        .contains("to b"));
}
