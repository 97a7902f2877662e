use crate::error::{Error, Result};
use jwalk::WalkDir;
use std::path::{Path, PathBuf};

/// A member record file and the name it is reported under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFile {
    pub path: PathBuf,
    /// Path relative to the walked directory, or the path as given
    pub filename: String,
}

/// Records found under the inputs, plus walk failures that dropped records
#[derive(Debug, Default)]
pub struct Discovered {
    pub records: Vec<RecordFile>,
    pub errors: Vec<Error>,
}

/// Expand files and directories into the member records to process.
///
/// Files are taken as given. Directories are walked recursively for
/// `*.json` files, reported relative to the directory and sorted.
/// Unreadable entries are collected in `errors` so callers can count them.
pub fn discover_records<P: AsRef<Path>>(inputs: &[P]) -> Result<Discovered> {
    let mut discovered = Discovered::default();

    for input in inputs {
        let input = input.as_ref();
        if input.is_file() {
            discovered.records.push(RecordFile {
                path: input.to_path_buf(),
                filename: input.to_string_lossy().to_string(),
            });
        } else if input.is_dir() {
            walk_dir(input, &mut discovered)?;
        } else {
            return Err(Error::Path(format!(
                "Input does not exist: {}",
                input.display()
            )));
        }
    }

    Ok(discovered)
}

fn walk_dir(dir: &Path, discovered: &mut Discovered) -> Result<()> {
    let mut found = Vec::new();

    for entry_result in WalkDir::new(dir).sort(true) {
        let mut entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                discovered.errors.push(e.into());
                continue;
            }
        };

        // jwalk yields an unreadable directory as Ok with the read error attached
        if let Some(e) = entry.read_children_error.take() {
            discovered.errors.push(e.into());
            continue;
        }

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }

        let filename = relative_name(&path, dir)?;
        found.push(RecordFile { path, filename });
    }

    found.sort_by(|a, b| a.filename.cmp(&b.filename));
    discovered.records.extend(found);
    Ok(())
}

fn relative_name(path: &Path, base: &Path) -> Result<String> {
    let relative = pathdiff::diff_paths(path, base).ok_or_else(|| {
        Error::Path(format!(
            "Failed to calculate relative path for {}",
            path.display()
        ))
    })?;
    Ok(relative.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_walks_directories_for_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("house")).unwrap();
        fs::write(dir.path().join("house").join("B000001.json"), "{}").unwrap();
        fs::write(dir.path().join("A000001.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "skip me").unwrap();

        let discovered = discover_records(&[dir.path()]).unwrap();
        assert!(discovered.errors.is_empty());
        let names: Vec<_> = discovered.records.iter().map(|r| r.filename.as_str()).collect();
        let nested = Path::new("house").join("B000001.json");
        assert_eq!(names, vec!["A000001.json", nested.to_str().unwrap()]);
    }

    #[test]
    fn test_files_are_taken_as_given() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("member.txt");
        fs::write(&file, "{}").unwrap();

        let records = discover_records(&[&file]).unwrap().records;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, file);
    }

    #[test]
    fn test_missing_input_is_error() {
        let err = discover_records(&["/no/such/record.json"]).unwrap_err();
        assert!(matches!(err, Error::Path(_)));
    }

    #[test]
    fn test_walk_failure_is_collected() {
        let dir = tempfile::tempdir().unwrap();
        let mut discovered = Discovered::default();
        walk_dir(&dir.path().join("vanished"), &mut discovered).unwrap();

        assert!(discovered.records.is_empty());
        assert_eq!(discovered.errors.len(), 1);
        assert!(matches!(discovered.errors[0], Error::Walk(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_collected() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::write(locked.join("L000001.json"), "{}").unwrap();
        fs::write(dir.path().join("A000001.json"), "{}").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can still read the directory
        let readable = fs::read_dir(&locked).is_ok();
        let discovered = discover_records(&[dir.path()]).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if readable {
            assert_eq!(discovered.records.len(), 2);
            return;
        }
        assert_eq!(discovered.records.len(), 1);
        assert_eq!(discovered.errors.len(), 1);
        assert!(matches!(discovered.errors[0], Error::Walk(_)));
    }
}
