//! Locating `.jack` inputs and naming their outputs

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const SOURCE_EXTENSION: &str = "jack";

/// Why an input path could not be turned into a list of sources
#[derive(Debug)]
pub enum SourceError {
    /// The path does not exist or is neither a `.jack` file nor a directory
    InvalidInput(PathBuf),
    /// A directory with no `.jack` files in it
    NoSources(PathBuf),
    Io { path: PathBuf, err: io::Error },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::InvalidInput(path) => write!(
                f,
                "'{}' is not a .{} file or a directory",
                path.display(),
                SOURCE_EXTENSION
            ),
            SourceError::NoSources(path) => write!(
                f,
                "no .{} files found in '{}'",
                SOURCE_EXTENSION,
                path.display()
            ),
            SourceError::Io { path, err } => write!(f, "{}: {}", path.display(), err),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Io { err, .. } => Some(err),
            _ => None,
        }
    }
}

fn is_source(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// The sources named by `path`: the file itself, or the `.jack` files
/// directly inside a directory, sorted by name.
pub fn discover(path: &Path) -> Result<Vec<PathBuf>, SourceError> {
    if path.is_file() && is_source(path) {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(SourceError::InvalidInput(path.to_path_buf()));
    }

    let io_err = |err| SourceError::Io {
        path: path.to_path_buf(),
        err,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(path).map_err(io_err)? {
        let entry_path = entry.map_err(io_err)?.path();
        if entry_path.is_file() && is_source(&entry_path) {
            files.push(entry_path);
        }
    }

    if files.is_empty() {
        return Err(SourceError::NoSources(path.to_path_buf()));
    }
    files.sort();
    Ok(files)
}

/// `Foo.jack` → `<dir>/Foo<suffix>.xml`, where `<dir>` is `out_dir` or the
/// source's own directory.
pub fn output_path(source: &Path, out_dir: Option<&Path>, suffix: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!("{}{}.xml", stem, suffix);

    match out_dir {
        Some(dir) => dir.join(file_name),
        None => source.with_file_name(file_name),
    }
}
