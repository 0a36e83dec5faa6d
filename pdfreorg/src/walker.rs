//! Input discovery.
//!
//! Batch runs walk an input tree and map every PDF in it onto the mirrored
//! location under the output root. Single-file runs expand glob patterns.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::error::{ReorgError, Result};

const PDF_SUFFIX: &[u8] = b".pdf";

/// One PDF found under the input root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfJob {
    /// Path of the source file.
    pub input: PathBuf,
    /// Directory containing the file, relative to the input root.
    pub relative_dir: PathBuf,
    /// Where the transformed file is written.
    pub output: PathBuf,
}

/// Result of walking an input tree.
#[derive(Debug, Default)]
pub struct Discovery {
    /// PDF files in walk order.
    pub jobs: Vec<PdfJob>,
    /// Entries that could not be read.
    pub errors: Vec<ReorgError>,
}

/// Whether `name` ends with the literal, lowercase `.pdf` suffix.
///
/// `Report.PDF` does not match.
pub fn is_pdf_file_name(name: &OsStr) -> bool {
    name.as_encoded_bytes().ends_with(PDF_SUFFIX)
}

/// Walk `input_root` and plan one job per PDF file.
///
/// Entries are visited in file-name order. If `output_root` lies inside
/// `input_root` its subtree is not visited.
///
/// # Errors
///
/// Returns `FileNotFound` if `input_root` does not exist, `NotADirectory`
/// if it is a file, and `InvalidConfig` if `output_root` names the same
/// directory under any spelling. Unreadable entries below the root are
/// collected in [`Discovery::errors`] instead.
#[instrument(level = "debug", skip_all, fields(input_root = %input_root.display(), output_root = %output_root.display()))]
pub fn discover(input_root: &Path, output_root: &Path) -> Result<Discovery> {
    if !input_root.try_exists()? {
        return Err(ReorgError::file_not_found(input_root));
    }
    if !input_root.is_dir() {
        return Err(ReorgError::not_a_directory(input_root));
    }
    if same_directory(input_root, output_root) {
        return Err(ReorgError::invalid_config(format!(
            "Output directory cannot be the same as the input directory: {}",
            input_root.display()
        )));
    }

    let excluded = nested_output_dir(input_root, output_root);
    let mut discovery = Discovery::default();

    let walker = WalkDir::new(input_root)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()))
        .into_iter()
        .filter_entry(|entry| excluded.as_deref() != Some(entry.path()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                discovery.errors.push(traversal_error(err, input_root));
                continue;
            }
        };

        if !is_regular_file(&entry) || !is_pdf_file_name(entry.file_name()) {
            continue;
        }

        let input = entry.into_path();
        let relative_dir = input
            .parent()
            .and_then(|parent| parent.strip_prefix(input_root).ok())
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let Some(file_name) = input.file_name() else {
            continue;
        };
        let output = output_root.join(&relative_dir).join(file_name);

        discovery.jobs.push(PdfJob {
            input,
            relative_dir,
            output,
        });
    }

    debug!(
        jobs = discovery.jobs.len(),
        errors = discovery.errors.len(),
        "Walked input tree"
    );
    Ok(discovery)
}

/// True when both paths exist and resolve to the same directory.
///
/// `in`, `./in` and `sib/../in` all name one directory.
pub fn same_directory(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Entry errors without a path of their own are charged to `input_root`.
fn traversal_error(err: walkdir::Error, input_root: &Path) -> ReorgError {
    let path = err.path().unwrap_or(input_root).to_path_buf();
    ReorgError::Traversal { path, source: err }
}

fn is_regular_file(entry: &walkdir::DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

/// The walk path of `output_root` when it sits strictly inside `input_root`.
fn nested_output_dir(input_root: &Path, output_root: &Path) -> Option<PathBuf> {
    let input = input_root.canonicalize().ok()?;
    let output = output_root.canonicalize().ok()?;
    let relative = output.strip_prefix(&input).ok()?;
    if relative.as_os_str().is_empty() {
        return None;
    }
    Some(input_root.join(relative))
}

/// Expand glob patterns into input paths, preserving pattern order.
///
/// A pattern without glob metacharacters that matches nothing is returned
/// as-is so the reader can report the missing file.
///
/// # Errors
///
/// Returns `InvalidPattern` if a pattern cannot be parsed or a wildcard
/// pattern matches nothing.
pub fn resolve_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();

        let paths = glob::glob(pattern).map_err(|e| ReorgError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        let before = resolved_paths.len();
        for entry in paths {
            let path = entry.map_err(|e| ReorgError::Io(e.into_error()))?;
            resolved_paths.push(path);
        }

        if resolved_paths.len() == before {
            if has_glob_meta(pattern) {
                return Err(ReorgError::InvalidPattern {
                    pattern: pattern.to_string(),
                    reason: "no files matched".to_string(),
                });
            }
            resolved_paths.push(PathBuf::from(pattern));
        }
    }

    Ok(resolved_paths)
}

fn has_glob_meta(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}
