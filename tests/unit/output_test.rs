use std::io::Write;

use dbjson::output::{
    open_output, print_summary, print_truncation_warning, summary_line, truncation_message,
    MemoryUsage,
};

#[test]
fn summary_line_reports_time_and_records() {
    assert_eq!(summary_line(42, 3, None), "elapsed time: 42 ms, 3 records read");
}

#[test]
fn summary_line_reports_memory_in_mb() {
    let memory = MemoryUsage {
        physical_bytes: 3 * 1024 * 1024 / 2,
        virtual_bytes: 64 * 1024 * 1024,
    };
    assert_eq!(
        summary_line(7, 1000, Some(memory)),
        "elapsed time: 7 ms, 1000 records read, physical = 1.500 MB, virtual = 64.000 MB"
    );
}

#[test]
fn current_memory_usage_is_nonzero_when_reported() {
    if let Some(memory) = MemoryUsage::current() {
        assert!(memory.physical_bytes > 0);
    }
}

#[test]
fn truncation_message_mentions_limit_and_flag() {
    let msg = truncation_message(500);
    assert!(msg.contains("500"), "Got: {}", msg);
    assert!(msg.contains("--no-limit"), "Got: {}", msg);
}

#[test]
fn print_summary_does_not_panic() {
    print_summary(10, 3);
}

#[test]
fn print_truncation_warning_does_not_panic() {
    print_truncation_warning(&truncation_message(500));
}

#[test]
fn open_output_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rows.json");
    {
        let mut out = open_output(Some(path.as_path())).unwrap();
        out.write_all(b"[{\"id\":1}]").unwrap();
        out.flush().unwrap();
    }
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[{\"id\":1}]");
}

#[test]
fn open_output_missing_parent_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("rows.json");
    let err = open_output(Some(path.as_path())).err().expect("missing parent should fail");
    assert!(
        err.to_string().contains("parent directory does not exist"),
        "Got: {}",
        err
    );
}

#[test]
fn open_output_truncates_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rows.jsonl");
    std::fs::write(&path, "stale content that is long").unwrap();
    {
        let mut out = open_output(Some(path.as_path())).unwrap();
        out.write_all(b"{}\n").unwrap();
        out.flush().unwrap();
    }
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}\n");
}

#[test]
fn default_log_filter_keeps_info_and_adds_debug_when_verbose() {
    use dbjson::verbose::default_filter;
    assert_eq!(default_filter(false), "info");
    assert_eq!(default_filter(true), "info,dbjson=debug");
}
