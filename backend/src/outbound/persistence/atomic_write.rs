//! Replace-by-rename writes for the booking document.
//!
//! The new contents go to a hidden sibling file which is synced and then
//! renamed over the target, so readers observe either the previous document
//! or the new one.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Component, Utf8Path};
use cap_std::fs::{Dir, OpenOptions};

use crate::domain::ports::BookingStoreError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Write `contents` to `file_name` inside `dir` atomically.
///
/// `file_name` must be a single path component.
pub(super) fn replace_file(
    dir: &Dir,
    file_name: &Utf8Path,
    contents: &[u8],
) -> Result<(), BookingStoreError> {
    let mut components = file_name.components();
    let (Some(Utf8Component::Normal(name)), None) = (components.next(), components.next())
    else {
        return Err(BookingStoreError::unavailable(format!(
            "document path {file_name} must name a file"
        )));
    };
    let tmp_name = temp_name(name);

    write_temp(dir, &tmp_name, contents).map_err(|err| {
        BookingStoreError::unavailable(format!("write {tmp_name}: {err}"))
    })?;
    if let Err(err) = rename_over(dir, &tmp_name, name) {
        if dir.remove_file(&tmp_name).is_err() {
            // Leftover temp files are hidden and harmless.
        }
        return Err(BookingStoreError::unavailable(format!(
            "replace {name}: {err}"
        )));
    }
    sync_dir(dir);
    Ok(())
}

fn temp_name(target: &str) -> String {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    format!(".{target}.tmp.{}.{nanos}.{counter}", std::process::id())
}

fn write_temp(dir: &Dir, tmp_name: &str, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    let written = file.write_all(contents).and_then(|()| file.sync_all());
    if written.is_err() {
        drop(file);
        drop(dir.remove_file(tmp_name));
    }
    written
}

#[cfg(windows)]
fn rename_over(dir: &Dir, tmp_name: &str, target: &str) -> io::Result<()> {
    match dir.remove_file(target) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target)
}

#[cfg(not(windows))]
fn rename_over(dir: &Dir, tmp_name: &str, target: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target)
}

fn sync_dir(dir: &Dir) {
    // Best effort.
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use cap_std::ambient_authority;
    use rstest::rstest;

    fn open(tmp: &tempfile::TempDir) -> Dir {
        Dir::open_ambient_dir(tmp.path(), ambient_authority()).expect("open temp dir")
    }

    #[rstest]
    fn replaces_existing_contents_and_leaves_no_temp_files() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = open(&tmp);
        let path = Utf8Path::new("db.json");

        replace_file(&dir, path, b"{\"v\":1}").expect("first write");
        replace_file(&dir, path, b"{\"v\":2}").expect("second write");

        assert_eq!(dir.read_to_string(path).expect("read"), "{\"v\":2}");
        let names: Vec<String> = dir
            .entries()
            .expect("entries")
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["db.json".to_owned()]);
    }

    #[rstest]
    #[case("nested/db.json")]
    #[case("../db.json")]
    fn rejects_paths_that_are_not_a_single_file_name(#[case] raw: &str) {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = open(&tmp);

        let err = replace_file(&dir, Utf8Path::new(raw), b"{}").expect_err("must reject");

        assert!(matches!(err, BookingStoreError::Unavailable { .. }));
    }
}
