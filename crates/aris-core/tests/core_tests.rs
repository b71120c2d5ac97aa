use aris_core::{Extension, FileRecord, ScanConfig, format_size};
use std::path::PathBuf;
use std::time::SystemTime;

#[test]
fn test_file_record_extension() {
    let record = FileRecord::new("photo.JPG", "/pics/photo.JPG", 2048, SystemTime::now());
    assert_eq!(record.extension(), Extension::Named("JPG".into()));
    assert_eq!(record.extension().label(), "JPG");

    let record = FileRecord::new("Makefile", "/src/Makefile", 10, SystemTime::now());
    assert_eq!(record.extension(), Extension::None);
}

#[test]
fn test_file_record_equality() {
    let now = SystemTime::now();
    let a = FileRecord::new("a.txt", "/x/a.txt", 1, now);
    let b = FileRecord::new("a.txt", "/x/a.txt", 1, now);
    let c = FileRecord::new("a.txt", "/y/a.txt", 1, now);

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_extension_display() {
    assert_eq!(Extension::of("notes.md").to_string(), ".md");
    assert_eq!(Extension::of("notes").to_string(), "no extension");
}

#[test]
fn test_scan_config_defaults() {
    let config = ScanConfig::default();
    assert_eq!(config.root, PathBuf::from("."));
    assert!(!config.follow_symlinks);
    assert!(config.cross_filesystems);
    assert!(config.include_hidden);
    assert_eq!(config.max_depth, None);
    assert!(config.ignore_patterns.is_empty());
    assert!(config.ignore_matcher().unwrap().is_empty());
}

#[test]
fn test_scan_config_builder_full() {
    let config = ScanConfig::builder()
        .root("/data")
        .follow_symlinks(true)
        .cross_filesystems(false)
        .max_depth(Some(4u32))
        .ignore_patterns(vec![".git".to_string(), "*.tmp".to_string()])
        .threads(2usize)
        .include_hidden(false)
        .build()
        .unwrap();

    assert_eq!(config.root, PathBuf::from("/data"));
    assert!(config.follow_symlinks);
    assert!(!config.cross_filesystems);
    assert_eq!(config.max_depth, Some(4));
    assert_eq!(config.threads, 2);
    assert!(!config.include_hidden);

    let matcher = config.ignore_matcher().unwrap();
    assert!(matcher.is_match(".git"));
    assert!(matcher.is_match("scratch.tmp"));
    assert!(!matcher.is_match("main.rs"));
}

#[test]
fn test_format_size_boundaries() {
    assert_eq!(format_size(1024 * 1024 - 1), "1023 KB");
    assert_eq!(format_size(1024 * 1024), "1 MB");
    assert_eq!(format_size(1024 * 1024 * 1024 - 1), "1023 MB");
}
