use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};

use aris_analyze::{
    AnalyzeConfig, CSV_HEADER, Extension, SortOrder, StorageAnalyzer, export_csv,
};
use tempfile::TempDir;

/// a.txt (100 bytes), b.TXT (200 bytes), sub/c.log (50 bytes)
fn scenario_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("sub")).unwrap();
    fs::write(temp.path().join("a.txt"), vec![b'a'; 100]).unwrap();
    fs::write(temp.path().join("b.TXT"), vec![b'b'; 200]).unwrap();
    fs::write(temp.path().join("sub/c.log"), vec![b'c'; 50]).unwrap();
    temp
}

fn set_age(path: &Path, secs_ago: u64) {
    let file = File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() - Duration::from_secs(secs_ago))
        .unwrap();
}

#[test]
fn test_scenario_by_size() {
    let temp = scenario_tree();
    let report = StorageAnalyzer::new().analyze(temp.path()).unwrap();

    let names: Vec<&str> = report.ranked().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["b.TXT", "a.txt", "c.log"]);
    assert_eq!(report.total_size, 350);
    assert_eq!(report.total_files, 3);

    let upper = report.extension(&Extension::Named("TXT".into())).unwrap();
    let lower = report.extension(&Extension::Named("txt".into())).unwrap();
    let log = report.extension(&Extension::Named("log".into())).unwrap();
    assert_eq!((upper.count, upper.total_size), (1, 200));
    assert_eq!((lower.count, lower.total_size), (1, 100));
    assert_eq!((log.count, log.total_size), (1, 50));
}

#[test]
fn test_scenario_folded_extensions() {
    let temp = scenario_tree();
    let config = AnalyzeConfig::builder()
        .fold_extension_case(true)
        .build()
        .unwrap();
    let report = StorageAnalyzer::with_config(config)
        .analyze(temp.path())
        .unwrap();

    assert_eq!(report.extensions.len(), 2);
    let txt = report.extension(&Extension::Named("txt".into())).unwrap();
    assert_eq!((txt.count, txt.total_size), (2, 300));
}

#[test]
fn test_rank_by_modification_time() {
    let temp = scenario_tree();
    set_age(&temp.path().join("a.txt"), 300);
    set_age(&temp.path().join("b.TXT"), 3_600);
    set_age(&temp.path().join("sub/c.log"), 60);

    let config = AnalyzeConfig::builder()
        .order(SortOrder::ByTimeDesc)
        .build()
        .unwrap();
    let report = StorageAnalyzer::with_config(config)
        .analyze(temp.path())
        .unwrap();

    let names: Vec<&str> = report.ranked().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["c.log", "a.txt", "b.TXT"]);
    for pair in report.records.windows(2) {
        assert!(pair[0].modified >= pair[1].modified);
    }
}

#[test]
fn test_limit_smaller_than_file_count() {
    let temp = scenario_tree();
    let config = AnalyzeConfig::builder().limit(1usize).build().unwrap();
    let report = StorageAnalyzer::with_config(config)
        .analyze(temp.path())
        .unwrap();

    assert_eq!(report.ranked().len(), 1);
    assert_eq!(report.ranked()[0].name, "b.TXT");
    assert_eq!(report.total_size, 350);
}

#[test]
fn test_empty_directory() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("empty")).unwrap();

    let report = StorageAnalyzer::new().analyze(temp.path()).unwrap();
    assert!(report.is_empty());
    assert_eq!(report.total_size, 0);
    assert!(report.extensions.is_empty());
}

#[test]
fn test_invalid_path_is_error() {
    let temp = TempDir::new().unwrap();
    let analyzer = StorageAnalyzer::new();

    let missing = analyzer.analyze(temp.path().join("missing")).unwrap_err();
    assert!(missing.is_invalid_root());

    let file = temp.path().join("plain.txt");
    fs::write(&file, "x").unwrap();
    let not_dir = analyzer.analyze(&file).unwrap_err();
    assert!(not_dir.is_invalid_root());
}

#[test]
fn test_export_rows_match_records() {
    let temp = scenario_tree();
    let report = StorageAnalyzer::new().analyze(temp.path()).unwrap();

    let out = TempDir::new().unwrap();
    let dest = out.path().join("report.csv");
    let rows = export_csv(&report.records, &dest).unwrap();
    assert_eq!(rows, 3);

    let text = fs::read_to_string(&dest).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), report.records.len() + 1);
    assert_eq!(lines[0], CSV_HEADER);

    for (line, record) in lines[1..].iter().zip(&report.records) {
        let mut fields = line.rsplitn(3, ',');
        let modified = fields.next().unwrap();
        let size: u64 = fields.next().unwrap().parse().unwrap();
        let quoted = fields.next().unwrap();

        assert_eq!(size, record.size);
        assert_eq!(modified.len(), "YYYY-MM-DD HH:MM".len());
        assert_eq!(
            quoted,
            format!("\"{}\",\"{}\"", record.name, record.path.display())
        );
    }
}

#[test]
fn test_export_overwrites_existing_file() {
    let temp = scenario_tree();
    let report = StorageAnalyzer::new().analyze(temp.path()).unwrap();

    let out = TempDir::new().unwrap();
    let dest = out.path().join("report.csv");
    fs::write(&dest, "stale\nstale\nstale\nstale\nstale\nstale\n").unwrap();

    export_csv(report.ranked(), &dest).unwrap();
    let text = fs::read_to_string(&dest).unwrap();
    assert_eq!(text.lines().count(), 4);
    assert!(!text.contains("stale"));
}
