//! File path completion for the import popup

use std::fs;
use std::path::{Path, PathBuf};

const SPREADSHEET_EXT: &str = "xlsx";

/// Expand a leading `~` to the home directory
pub fn expand_home(input: &str) -> String {
    if let Some(rest) = input.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{}", home.to_string_lossy(), rest);
        }
    }
    input.to_string()
}

fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(SPREADSHEET_EXT))
}

/// Complete `input` against the file system. Directories and `.xlsx` files
/// are offered first; other files only when nothing else matches, since the
/// extension is a hint and not a rule.
pub fn autocomplete(input: &str) -> Option<String> {
    let expanded = expand_home(input);
    let path = PathBuf::from(&expanded);

    if path.is_dir() && !expanded.ends_with('/') {
        return Some(format!("{}/", expanded));
    }

    let (parent, prefix) = if expanded.ends_with('/') {
        (PathBuf::from(&expanded), String::new())
    } else {
        let prefix = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        (parent, prefix)
    };

    let entries: Vec<(String, bool, bool)> = fs::read_dir(&parent)
        .ok()?
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let path = e.path();
            let name = e.file_name().into_string().ok()?;
            Some((name, path.is_dir(), is_spreadsheet(&path)))
        })
        .filter(|(name, _, _)| name.starts_with(&prefix) && !name.starts_with('.'))
        .collect();

    let mut matches: Vec<&(String, bool, bool)> =
        entries.iter().filter(|(_, dir, sheet)| *dir || *sheet).collect();
    if matches.is_empty() {
        matches = entries.iter().collect();
    }
    matches.sort_by(|a, b| a.0.cmp(&b.0));

    let join = |name: &str| {
        if parent == Path::new(".") && !expanded.starts_with("./") {
            PathBuf::from(name)
        } else {
            parent.join(name)
        }
    };

    match matches.as_slice() {
        [] => None,
        [(name, is_dir, _)] => {
            let completed = join(name.as_str()).to_string_lossy().to_string();
            Some(if *is_dir { format!("{}/", completed) } else { completed })
        }
        many => {
            let names: Vec<String> = many.iter().map(|(n, _, _)| n.clone()).collect();
            let common = common_prefix(&names)?;
            if common.len() > prefix.len() {
                Some(join(common.as_str()).to_string_lossy().to_string())
            } else {
                None
            }
        }
    }
}

/// Find common prefix among strings
fn common_prefix(strings: &[String]) -> Option<String> {
    let first = strings.first()?;
    let mut prefix_len = first.len();

    for s in strings.iter().skip(1) {
        prefix_len = first
            .char_indices()
            .zip(s.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map(|((i, a), _)| i + a.len_utf8())
            .unwrap_or(0)
            .min(prefix_len);
    }

    if prefix_len > 0 {
        Some(first[..prefix_len].to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_completes_single_spreadsheet() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("courses.xlsx")).unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();

        let input = format!("{}/c", dir.path().display());
        let completed = autocomplete(&input).unwrap();
        assert!(completed.ends_with("/courses.xlsx"));
    }

    #[test]
    fn test_spreadsheets_preferred_over_other_files() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("data.xlsx")).unwrap();
        File::create(dir.path().join("data.csv")).unwrap();

        let input = format!("{}/da", dir.path().display());
        assert!(autocomplete(&input).unwrap().ends_with("/data.xlsx"));
    }

    #[test]
    fn test_falls_back_to_any_file() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("export.csv")).unwrap();

        let input = format!("{}/ex", dir.path().display());
        assert!(autocomplete(&input).unwrap().ends_with("/export.csv"));
    }

    #[test]
    fn test_directory_gets_trailing_slash() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("imports")).unwrap();

        let input = format!("{}/imp", dir.path().display());
        assert!(autocomplete(&input).unwrap().ends_with("/imports/"));
    }

    #[test]
    fn test_common_prefix() {
        let names = vec!["course_a.xlsx".to_string(), "course_b.xlsx".to_string()];
        assert_eq!(common_prefix(&names), Some("course_".to_string()));
        assert_eq!(common_prefix(&["x".to_string(), "y".to_string()]), None);
    }
}
