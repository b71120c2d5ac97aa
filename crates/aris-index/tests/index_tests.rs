use std::fs;
use std::path::{Path, PathBuf};

use aris_index::{FileIndex, FileRecord};
use aris_scan::JwalkCollector;
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

fn sorted_paths<'a>(records: impl IntoIterator<Item = &'a FileRecord>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = records.into_iter().map(|r| r.path.clone()).collect();
    paths.sort();
    paths
}

#[test]
fn test_scenario_search() {
    let temp = scenario_tree();
    let mut index = FileIndex::new();
    index.rebuild([temp.path()]);

    let hits = index.search("a");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "a.txt");
    assert_eq!(hits[0].size, 100);

    assert_eq!(index.search("").len(), 3);
    assert_eq!(index.search("B").len(), 1);
}

#[test]
fn test_empty_query_is_union_of_roots() {
    let first = scenario_tree();
    let second = TempDir::new().unwrap();
    fs::write(second.path().join("z.bin"), "zz").unwrap();
    let roots: Vec<&Path> = vec![first.path(), second.path(), first.path()];

    let mut index = FileIndex::new();
    index.rebuild(&roots);

    let collector = JwalkCollector::new();
    let collected: Vec<FileRecord> = roots
        .iter()
        .flat_map(|root| collector.collect(root))
        .collect();
    let expected = sorted_paths(&collected);

    assert_eq!(expected.len(), 7);
    assert_eq!(sorted_paths(index.search("")), expected);
}

#[test]
fn test_search_case_variants_match() {
    let temp = scenario_tree();
    let mut index = FileIndex::new();
    index.rebuild([temp.path()]);

    for (upper, lower) in [("A", "a"), ("B.T", "b.t"), ("C.LOG", "c.log")] {
        assert_eq!(
            sorted_paths(index.search(upper)),
            sorted_paths(index.search(lower))
        );
    }
}

#[test]
fn test_results_start_with_query() {
    let temp = scenario_tree();
    fs::write(temp.path().join("image.png"), "png").unwrap();
    let mut index = FileIndex::new();
    index.rebuild([temp.path()]);

    assert_eq!(index.search("im").len(), 1);
    assert!(index.search("mage").is_empty());
    for record in index.search("b") {
        assert!(record.name.to_lowercase().starts_with('b'));
    }
}

#[test]
fn test_missing_root_reported() {
    let temp = scenario_tree();
    let mut index = FileIndex::new();
    let report = index.rebuild([temp.path().join("nope"), temp.path().to_path_buf()]);

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, temp.path().join("nope"));
    assert!(report.skipped[0].reason.is_invalid_root());
    assert_eq!(report.records, 3);
}

#[test]
fn test_progress_per_root() {
    let first = scenario_tree();
    let second = scenario_tree();
    let mut index = FileIndex::new();
    let mut rx = index.subscribe();

    index.rebuild([first.path(), second.path()]);

    let mut finished = 0;
    while let Ok(progress) = rx.try_recv() {
        if progress.finished {
            finished += 1;
            assert_eq!(progress.files_scanned, 3);
        }
    }
    assert_eq!(finished, 2);
}

#[cfg(unix)]
#[test]
fn test_unreadable_subtree_keeps_other_roots() {
    use std::os::unix::fs::PermissionsExt;

    let first = scenario_tree();
    let second = scenario_tree();
    let locked = first.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("a.txt"), "x").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not bind root
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let mut index = FileIndex::new();
    let report = index.rebuild([first.path(), second.path()]);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(report.skipped.is_empty());
    assert_eq!(report.indexed.len(), 2);
    assert!(!report.warnings.is_empty());
    assert_eq!(index.len(), 6);
    assert_eq!(index.search("a").len(), 2);
}
