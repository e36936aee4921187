//! Extract file discovery.

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{DataFiles, LoadError, LoadResult};

/// Discovers the extract files in a data directory.
///
/// Looks in `path` itself, then in `path/data`. File names start with
/// `concept`, `patient` or `obs` and end in `.txt`; an optional
/// `_YYYYMMDD` suffix is reported as the extract date.
pub fn discover_data_files<P: AsRef<Path>>(path: P) -> LoadResult<DataFiles> {
    let path = path.as_ref();

    if !path.is_dir() {
        return Err(LoadError::DirectoryNotFound {
            path: path.display().to_string(),
        });
    }

    let data_dir = find_data_dir(path);
    let mut files = DataFiles::new();

    for entry in fs::read_dir(&data_dir)? {
        let entry = entry?;
        let filename = entry.file_name();
        let filename_str = filename.to_string_lossy();

        if !filename_str.ends_with(".txt") {
            continue;
        }

        if filename_str.starts_with("concept") {
            files.concept_file = Some(entry.path());
        } else if filename_str.starts_with("patient") {
            files.patient_file = Some(entry.path());
        } else if filename_str.starts_with("obs") {
            files.observation_file = Some(entry.path());
            if let Some(date) = extract_date(&filename_str) {
                files.extract_date = Some(date);
            }
        }
    }

    if !files.has_required_files() {
        let missing = files.missing_files();
        return Err(LoadError::RequiredFileMissing {
            file_type: missing.join(", "),
            directory: data_dir.display().to_string(),
        });
    }

    Ok(files)
}

/// Prefers a `data` sub-directory when one exists.
fn find_data_dir(base: &Path) -> PathBuf {
    let nested = base.join("data");
    if nested.is_dir() {
        nested
    } else {
        base.to_path_buf()
    }
}

/// Extracts the date suffix from an extract filename.
///
/// Extract files have names like `obs_20240301.txt`.
fn extract_date(filename: &str) -> Option<String> {
    let without_ext = filename.trim_end_matches(".txt");
    let last = without_ext.rsplit('_').next()?;

    if last.len() == 8 && last.chars().all(|c| c.is_ascii_digit()) {
        return Some(last.to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "").unwrap();
    }

    #[test]
    fn test_extract_date() {
        assert_eq!(extract_date("obs_20240301.txt"), Some("20240301".to_string()));
        assert_eq!(extract_date("obs_site_A_20240301.txt"), Some("20240301".to_string()));
        assert_eq!(extract_date("obs.txt"), None);
        assert_eq!(extract_date("obs_2024.txt"), None);
    }

    #[test]
    fn test_discover_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "concept.txt");
        touch(dir.path(), "patient.txt");
        touch(dir.path(), "obs_20240301.txt");
        touch(dir.path(), "notes.md");

        let files = discover_data_files(dir.path()).unwrap();
        assert!(files.has_required_files());
        assert_eq!(files.extract_date.as_deref(), Some("20240301"));
        assert_eq!(files.concept_file, Some(dir.path().join("concept.txt")));
    }

    #[test]
    fn test_discover_in_data_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        fs::create_dir(&data).unwrap();
        touch(&data, "concept.txt");
        touch(&data, "patient.txt");
        touch(&data, "obs.txt");

        let files = discover_data_files(dir.path()).unwrap();
        assert_eq!(files.observation_file, Some(data.join("obs.txt")));
        assert_eq!(files.extract_date, None);
    }

    #[test]
    fn test_missing_files_reported() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "patient.txt");

        let err = discover_data_files(dir.path()).unwrap_err();
        match err {
            LoadError::RequiredFileMissing { file_type, .. } => {
                assert_eq!(file_type, "Concept, Observation");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_data_files(dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, LoadError::DirectoryNotFound { .. }));
    }
}
