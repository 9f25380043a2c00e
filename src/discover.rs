//! FIT file discovery.
//!
//! Resolves one user-supplied path into an ordered list of candidate files:
//! a pattern with `*`/`?` wildcards is matched against its parent directory,
//! a plain directory yields every `.fit` file inside it, anything else is
//! tried as a single file. Names are sorted so discovery order (and with it
//! import order) stays deterministic across runs.

use std::fs;
use std::path::{Component, Path, PathBuf};

use log::debug;

use crate::error::{ActivityError, Result};

/// True if the file name has the `.fit` extension (case-insensitive).
fn is_fit_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("fit"))
}

/// Resolve `path` into an ordered list of FIT files.
///
/// Zero matches is an error: startup has nothing to import and the caller
/// should say so once, rather than render an empty list.
pub fn find_fit_files(path: &Path) -> Result<Vec<PathBuf>> {
    let pattern = path.to_string_lossy();

    let mut files = if pattern.contains(['*', '?', '[']) {
        matches_for_pattern(path, &pattern)?
    } else if path.is_dir() {
        fit_files_in_dir(path)?
    } else if path.is_file() && is_fit_file(path) {
        vec![path.to_path_buf()]
    } else {
        Vec::new()
    };

    files.sort();
    debug!("discovered {} FIT files for '{}'", files.len(), pattern);

    if files.is_empty() {
        return Err(ActivityError::NoFilesFound {
            path: pattern.into_owned(),
        });
    }
    Ok(files)
}

/// Expand a wildcard pattern. Wildcards are only allowed in the final path
/// component; character classes are not supported.
fn matches_for_pattern(path: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let invalid = |message: &str| ActivityError::InvalidPattern {
        pattern: pattern.to_string(),
        message: message.to_string(),
    };

    if pattern.contains('[') {
        return Err(invalid("character classes are not supported"));
    }

    let name_pattern = match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => name,
        None => return Err(invalid("pattern has no file name component")),
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if dir
        .components()
        .any(|component| matches!(component, Component::Normal(c) if c.to_string_lossy().contains(['*', '?'])))
    {
        return Err(invalid("wildcards are only allowed in the file name"));
    }

    let entries = fs::read_dir(&dir).map_err(|err| ActivityError::io(&dir, &err))?;
    let mut matches = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| ActivityError::io(&dir, &err))?;
        let candidate = entry.path();
        let name = entry.file_name();
        let matched = name
            .to_str()
            .is_some_and(|name| wildcard_match(name_pattern, name));
        if matched && candidate.is_file() && is_fit_file(&candidate) {
            matches.push(candidate);
        }
    }
    Ok(matches)
}

/// Every `.fit` file directly inside `dir` (no recursion).
fn fit_files_in_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|err| ActivityError::io(dir, &err))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| ActivityError::io(dir, &err))?;
        let candidate = entry.path();
        if candidate.is_file() && is_fit_file(&candidate) {
            files.push(candidate);
        }
    }
    Ok(files)
}

/// Match `name` against a pattern of literals, `*` (any run) and `?` (any
/// single char). Iterative with single-star backtracking.
fn wildcard_match(pattern: &str, name: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();

    let (mut p, mut n) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while n < name.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == name[n]) {
            p += 1;
            n += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star = Some((p, n));
            p += 1;
        } else if let Some((star_p, star_n)) = star {
            // widen the last star by one character and retry
            p = star_p + 1;
            n = star_n + 1;
            star = Some((star_p, star_n + 1));
        } else {
            return false;
        }
    }
    while p < pattern.len() && pattern[p] == '*' {
        p += 1;
    }
    p == pattern.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        File::create(&path).unwrap();
        path
    }

    #[test]
    fn test_wildcard_match() {
        assert!(wildcard_match("*.fit", "ride.fit"));
        assert!(wildcard_match("2025-11*.fit", "2025-11-02-morning.fit"));
        assert!(wildcard_match("ride?.fit", "ride1.fit"));
        assert!(!wildcard_match("ride?.fit", "ride12.fit"));
        assert!(!wildcard_match("*.fit", "ride.gpx"));
        assert!(wildcard_match("*", "anything"));
    }

    #[test]
    fn test_directory_discovery_is_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "b.fit");
        touch(dir.path(), "a.fit");
        touch(dir.path(), "notes.txt");

        let files = find_fit_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.fit", "b.fit"]);
    }

    #[test]
    fn test_single_file_discovery() {
        let dir = tempdir().unwrap();
        let file = touch(dir.path(), "solo.fit");
        assert_eq!(find_fit_files(&file).unwrap(), vec![file]);
    }

    #[test]
    fn test_pattern_discovery() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "2025-11-01.fit");
        touch(dir.path(), "2025-11-02.fit");
        touch(dir.path(), "2025-12-01.fit");

        let pattern = dir.path().join("2025-11*.fit");
        let files = find_fit_files(&pattern).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_zero_matches_is_an_error() {
        let dir = tempdir().unwrap();
        let err = find_fit_files(dir.path()).unwrap_err();
        assert!(matches!(err, ActivityError::NoFilesFound { .. }));
    }

    #[test]
    fn test_character_classes_are_rejected() {
        let dir = tempdir().unwrap();
        let pattern = dir.path().join("ride[0-9].fit");
        let err = find_fit_files(&pattern).unwrap_err();
        assert!(matches!(err, ActivityError::InvalidPattern { .. }));
    }
}
