//! Case-insensitive prefix search over index keys.

use aris_core::FileRecord;

use crate::index::FileIndex;

/// Fold a name or query to the form used for matching.
pub fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

impl FileIndex {
    /// Records whose file name starts with `query`, ignoring case.
    ///
    /// Matching is anchored at the first character of the name. An empty
    /// query matches every record. Results follow index order, grouped by
    /// name; nothing is printed.
    pub fn search(&self, query: &str) -> Vec<&FileRecord> {
        let query = fold_case(query);
        self.buckets
            .values()
            .filter(|bucket| bucket.folded.starts_with(&query))
            .flat_map(|bucket| bucket.records.iter())
            .collect()
    }

    /// Number of records [`search`](Self::search) would return.
    pub fn count_matches(&self, query: &str) -> usize {
        let query = fold_case(query);
        self.buckets
            .values()
            .filter(|bucket| bucket.folded.starts_with(&query))
            .map(|bucket| bucket.records.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn build_index() -> (TempDir, FileIndex) {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("pics")).unwrap();
        fs::write(temp.path().join("image.png"), "png").unwrap();
        fs::write(temp.path().join("pics/IMG_0001.jpg"), "jpg").unwrap();
        fs::write(temp.path().join("pics/img_0002.jpg"), "jpg2").unwrap();
        fs::write(temp.path().join("readme"), "r").unwrap();

        let mut index = FileIndex::new();
        index.rebuild([temp.path()]);
        (temp, index)
    }

    fn sorted_names(records: &[&FileRecord]) -> Vec<String> {
        let mut names: Vec<String> = records.iter().map(|r| r.name.to_string()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_fold_case() {
        assert_eq!(fold_case("IMG_0001.JPG"), "img_0001.jpg");
        assert_eq!(fold_case(""), "");
    }

    #[test]
    fn test_prefix_not_substring() {
        let (_temp, index) = build_index();

        assert_eq!(sorted_names(&index.search("im")).len(), 3);
        assert!(index.search("mage").is_empty());
        assert!(index.search("0001").is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        let (_temp, index) = build_index();

        let upper = sorted_names(&index.search("IMG"));
        let lower = sorted_names(&index.search("img"));
        assert_eq!(upper, lower);
        assert_eq!(upper, vec!["IMG_0001.jpg", "img_0002.jpg"]);
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let (_temp, index) = build_index();

        assert_eq!(index.search("").len(), index.len());
        assert_eq!(index.count_matches(""), 4);
    }

    #[test]
    fn test_no_match_is_empty() {
        let (_temp, index) = build_index();
        assert!(index.search("zzz").is_empty());
        assert_eq!(index.count_matches("zzz"), 0);
    }

    #[test]
    fn test_search_empty_index() {
        let index = FileIndex::new();
        assert!(index.search("").is_empty());
    }
}
