//! File name extraction from the metadata lines between `diff` and `@@`.

const NULL_PATH: &str = "/dev/null";

/// Old and new file names of the diff being parsed.
///
/// An empty name means the file does not exist on that side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileLabels {
    /// Name before the change.
    pub old: String,
    /// Name after the change.
    pub new: String,
}

impl FileLabels {
    /// Forget both names.
    pub fn clear(&mut self) {
        self.old.clear();
        self.new.clear();
    }

    /// Update the names from one metadata line. Unrecognized lines are
    /// ignored.
    pub fn scan(&mut self, line: &str) {
        if let Some(rest) = line.strip_prefix("diff --git ") {
            if let Some((old, new)) = split_symmetric(rest) {
                self.old = old;
                self.new = new;
            }
        } else if let Some(rest) = line
            .strip_prefix("diff --cc ")
            .or_else(|| line.strip_prefix("diff --combined "))
        {
            self.old = rest.to_string();
            self.new = rest.to_string();
        } else if let Some(rest) = line.strip_prefix("--- ") {
            self.old = path_label(rest, "a/");
        } else if let Some(rest) = line.strip_prefix("+++ ") {
            self.new = path_label(rest, "b/");
        } else if let Some(rest) = line
            .strip_prefix("rename from ")
            .or_else(|| line.strip_prefix("copy from "))
        {
            self.old = rest.to_string();
        } else if let Some(rest) = line
            .strip_prefix("rename to ")
            .or_else(|| line.strip_prefix("copy to "))
        {
            self.new = rest.to_string();
        } else if let Some((old, new)) = parse_binary_files(line) {
            self.old = old;
            self.new = new;
        }
    }
}

/// `a/<path>` → `<path>`, `/dev/null` → empty. A tab-separated timestamp, as
/// written by plain `diff -u`, is dropped.
fn path_label(raw: &str, prefix: &str) -> String {
    let path = raw.split('\t').next().unwrap_or(raw);
    if path == NULL_PATH {
        return String::new();
    }
    path.strip_prefix(prefix).unwrap_or(path).to_string()
}

fn is_side(path: &str, prefix: &str) -> bool {
    path == NULL_PATH || path.starts_with(prefix)
}

/// `Binary files a/X and b/Y differ`.
///
/// Paths may themselves contain ` and `; the first split that gives an
/// `a/`-side and a `b/`-side wins.
fn parse_binary_files(line: &str) -> Option<(String, String)> {
    let rest = line.strip_prefix("Binary files ")?.strip_suffix(" differ")?;
    rest.match_indices(" and ").find_map(|(idx, sep)| {
        let (old, new) = (&rest[..idx], &rest[idx + sep.len()..]);
        (is_side(old, "a/") && is_side(new, "b/"))
            .then(|| (path_label(old, "a/"), path_label(new, "b/")))
    })
}

/// `a/<p> b/<p>` with the same path on both sides.
///
/// Renames put different paths here, but those are followed by
/// `rename from`/`rename to` lines which override this guess.
fn split_symmetric(rest: &str) -> Option<(String, String)> {
    let old = rest.strip_prefix("a/")?;
    let half = old.len().checked_sub(3)? / 2;
    let (path, tail) = (old.get(..half)?, old.get(half..)?);
    (tail.strip_prefix(" b/")? == path).then(|| (path.to_string(), path.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_all(lines: &[&str]) -> FileLabels {
        let mut labels = FileLabels::default();
        for line in lines {
            labels.scan(line);
        }
        labels
    }

    #[test]
    fn test_modified_file() {
        let labels = scan_all(&[
            "diff --git a/src/lib.rs b/src/lib.rs",
            "index 1234567..89abcde 100644",
            "--- a/src/lib.rs",
            "+++ b/src/lib.rs",
        ]);
        assert_eq!(labels.old, "src/lib.rs");
        assert_eq!(labels.new, "src/lib.rs");
    }

    #[test]
    fn test_added_file_has_no_old_side() {
        let labels = scan_all(&[
            "diff --git a/new.txt b/new.txt",
            "new file mode 100644",
            "--- /dev/null",
            "+++ b/new.txt",
        ]);
        assert_eq!(labels.old, "");
        assert_eq!(labels.new, "new.txt");
    }

    #[test]
    fn test_rename() {
        let labels = scan_all(&[
            "diff --git a/old name.rs b/new name.rs",
            "similarity index 90%",
            "rename from old name.rs",
            "rename to new name.rs",
        ]);
        assert_eq!(labels.old, "old name.rs");
        assert_eq!(labels.new, "new name.rs");
    }

    #[test]
    fn test_mode_change_uses_diff_line() {
        let labels = scan_all(&[
            "diff --git a/has space.sh b/has space.sh",
            "old mode 100644",
            "new mode 100755",
        ]);
        assert_eq!(labels.old, "has space.sh");
        assert_eq!(labels.new, "has space.sh");
    }

    #[test]
    fn test_binary_files() {
        let labels = scan_all(&["Binary files a/logo.png and b/logo.png differ"]);
        assert_eq!((labels.old.as_str(), labels.new.as_str()), ("logo.png", "logo.png"));

        let added = scan_all(&["Binary files /dev/null and b/img.png differ"]);
        assert_eq!((added.old.as_str(), added.new.as_str()), ("", "img.png"));
    }

    #[test]
    fn test_binary_files_with_and_in_path() {
        let labels = scan_all(&["Binary files a/salt and pepper.bin and b/salt and pepper.bin differ"]);
        assert_eq!(labels.old, "salt and pepper.bin");
        assert_eq!(labels.new, "salt and pepper.bin");
    }

    #[test]
    fn test_combined_diff_line() {
        let labels = scan_all(&["diff --cc src/merge.rs"]);
        assert_eq!(labels.old, "src/merge.rs");
        assert_eq!(labels.new, "src/merge.rs");
    }

    #[test]
    fn test_plain_diff_timestamps_dropped() {
        let labels = scan_all(&[
            "--- old.txt\t2024-01-01 00:00:00",
            "+++ new.txt\t2024-01-02 00:00:00",
        ]);
        assert_eq!(labels.old, "old.txt");
        assert_eq!(labels.new, "new.txt");
    }
}
