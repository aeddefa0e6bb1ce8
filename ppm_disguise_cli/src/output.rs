use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process;

use tracing::debug;

/// What to do when the destination already exists at commit time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overwrite {
  Refuse,
  Replace,
}

// Removes the temporary file when dropped, unless it was renamed into place.
struct TempPath {
  path: PathBuf,
  armed: bool,
}

impl Drop for TempPath {
  fn drop(&mut self) {
    if self.armed {
      let _ = fs::remove_file(&self.path);
    }
  }
}

/// A destination file that only appears once it is complete.
///
/// Bytes go to a hidden sibling of the destination, which `commit` renames
/// over the destination. Dropping an `AtomicOutput` without committing, as
/// happens on every error path, deletes the sibling and leaves the
/// destination untouched.
pub struct AtomicOutput {
  dest: PathBuf,
  tmp: TempPath,
  writer: BufWriter<File>,
}

impl AtomicOutput {
  pub fn create(dest: &Path) -> io::Result<Self> {
    let file_name = dest
      .file_name()
      .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "output path has no file name"))?;

    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(format!(".{}.tmp", process::id()));

    let path = dest.with_file_name(tmp_name);
    let file = OpenOptions::new().write(true).create_new(true).open(&path)?;

    debug!(tmp = %path.display(), "writing to temporary file");

    Ok(Self {
      dest: dest.to_path_buf(),
      tmp: TempPath { path, armed: true },
      writer: BufWriter::new(file),
    })
  }

  pub fn writer(&mut self) -> &mut BufWriter<File> {
    &mut self.writer
  }

  /// Flushes and syncs the temporary file, then moves it to the destination.
  pub fn commit(self, overwrite: Overwrite) -> io::Result<()> {
    let AtomicOutput { dest, mut tmp, writer } = self;

    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    drop(file);

    if overwrite == Overwrite::Refuse && dest.exists() {
      return Err(already_exists(&dest));
    }

    fs::rename(&tmp.path, &dest)?;
    tmp.armed = false;

    Ok(())
  }
}

pub fn already_exists(path: &Path) -> io::Error {
  io::Error::new(
    io::ErrorKind::AlreadyExists,
    format!("{} already exists", path.display()),
  )
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;

  fn tmp_files(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
      .expect("Failed to list directory")
      .map(|entry| entry.expect("Failed to read entry").path())
      .filter(|path| path.to_string_lossy().ends_with(".tmp"))
      .collect()
  }

  #[test]
  fn test_commit_moves_file_into_place() {
    let dir = tempfile::tempdir().expect("Failed to create directory");
    let dest = dir.path().join("out.ppm");

    let mut output = AtomicOutput::create(&dest).expect("Failed to create output");
    output.writer().write_all(b"P6").expect("Failed to write");
    assert!(!dest.exists());

    output.commit(Overwrite::Refuse).expect("Failed to commit");

    assert_eq!(fs::read(&dest).expect("Failed to read output"), b"P6");
    assert!(tmp_files(dir.path()).is_empty());
  }

  #[test]
  fn test_drop_discards_output() {
    let dir = tempfile::tempdir().expect("Failed to create directory");
    let dest = dir.path().join("out.bin");

    {
      let mut output = AtomicOutput::create(&dest).expect("Failed to create output");
      output.writer().write_all(b"partial").expect("Failed to write");
    }

    assert!(!dest.exists());
    assert!(tmp_files(dir.path()).is_empty());
  }

  #[test]
  fn test_commit_refuses_existing_destination() {
    let dir = tempfile::tempdir().expect("Failed to create directory");
    let dest = dir.path().join("out.ppm");

    let output = AtomicOutput::create(&dest).expect("Failed to create output");
    fs::write(&dest, b"keep").expect("Failed to write");

    let err = output.commit(Overwrite::Refuse).expect_err("Commit should fail");

    assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    assert_eq!(fs::read(&dest).expect("Failed to read output"), b"keep");
    assert!(tmp_files(dir.path()).is_empty());
  }

  #[test]
  fn test_commit_replaces_existing_destination() {
    let dir = tempfile::tempdir().expect("Failed to create directory");
    let dest = dir.path().join("out.bin");
    fs::write(&dest, b"old").expect("Failed to write");

    let mut output = AtomicOutput::create(&dest).expect("Failed to create output");
    output.writer().write_all(b"new").expect("Failed to write");
    output.commit(Overwrite::Replace).expect("Failed to commit");

    assert_eq!(fs::read(&dest).expect("Failed to read output"), b"new");
  }
}
