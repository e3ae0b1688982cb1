//! Filter-definition scaffolding.
//!
//! Renders `templates/filter.stub` into a new source file. The filter path
//! uses Rust path syntax: all segments but the last become snake_cased
//! directories under the base dir, the last segment is the type name.
//! `blog::Post` lands at `<dir>/blog/post.rs` with a `post_filter()`
//! definition.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const FILTER_STUB: &str = include_str!("../templates/filter.stub");

/// Errors surfaced by the generator. Expected conditions (existing file, bad
/// path) get their own variants; filesystem failures propagate untouched.
#[derive(Debug)]
pub enum ScaffoldError {
    /// The filter path had no usable segments.
    InvalidPath(String),
    /// The target file already exists; nothing was written.
    AlreadyExists(PathBuf),
    /// Directory creation or file write failed.
    Io(io::Error),
}

impl fmt::Display for ScaffoldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPath(path) => write!(f, "invalid filter path '{path}'"),
            Self::AlreadyExists(path) => {
                write!(f, "filter {} already exists", path.display())
            }
            Self::Io(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for ScaffoldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(error) => Some(error),
            _ => None,
        }
    }
}

impl From<io::Error> for ScaffoldError {
    fn from(error: io::Error) -> Self {
        Self::Io(error)
    }
}

/// Create a new filter definition file and return its path.
///
/// # Errors
///
/// [`ScaffoldError::AlreadyExists`] when the target file is present (the
/// existing file is left untouched), [`ScaffoldError::InvalidPath`] for an
/// empty path, [`ScaffoldError::Io`] for filesystem failures.
pub fn generate(filter_path: &str, base_dir: &Path) -> Result<PathBuf, ScaffoldError> {
    let segments: Vec<&str> = filter_path
        .split("::")
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect();
    let Some((type_name, modules)) = segments.split_last() else {
        return Err(ScaffoldError::InvalidPath(filter_path.to_owned()));
    };

    let mut dir = base_dir.to_path_buf();
    for module in modules {
        dir.push(to_snake_case(module));
    }
    let file = dir.join(format!("{}.rs", to_snake_case(type_name)));
    if file.exists() {
        return Err(ScaffoldError::AlreadyExists(file));
    }

    fs::create_dir_all(&dir)?;
    let rendered = FILTER_STUB
        .replace("{{ filter }}", type_name)
        .replace("{{ snake }}", &to_snake_case(type_name));
    fs::write(&file, rendered)?;
    Ok(file)
}

fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (index, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if index > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
