//! Normalization of raw registry `Root` values into install path components.
//!
//! Registry values are Windows paths, so this works on `\` regardless of the host
//! platform and never touches the filesystem.

/// Separator used in registry root values and in derived full paths.
pub const PATH_SEPARATOR: char = '\\';

/// Extended-length path prefix sometimes present on `Root` values.
pub const EXTENDED_PREFIX: &str = r"\\?\";

/// Components derived from a raw root value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedPath {
    pub install_path: String,
    pub drive: String,
    pub directory: String,
    pub folder: String,
}

impl NormalizedPath {
    /// `directory` + separator + `folder`.
    pub fn full_path(&self) -> String {
        format!("{}{}{}", self.directory, PATH_SEPARATOR, self.folder)
    }
}

/// Normalize a raw registry root value.
///
/// Strips one `\\?\` prefix (only if something remains after it) and one trailing
/// separator, then splits at the last remaining separator. A value without any
/// separator yields empty `directory` and `folder`.
pub fn normalize(raw: &str) -> NormalizedPath {
    let mut path = match raw.strip_prefix(EXTENDED_PREFIX) {
        Some(rest) if !rest.is_empty() => rest,
        _ => raw,
    };
    if let Some(trimmed) = path.strip_suffix(PATH_SEPARATOR) {
        path = trimmed;
    }

    let (directory, folder) = match path.rfind(PATH_SEPARATOR) {
        Some(idx) => (&path[..idx], &path[idx + PATH_SEPARATOR.len_utf8()..]),
        None => ("", ""),
    };

    NormalizedPath {
        install_path: path.to_string(),
        drive: drive_of(path),
        directory: directory.to_string(),
        folder: folder.to_string(),
    }
}

fn drive_of(path: &str) -> String {
    match path.char_indices().nth(2) {
        Some((end, _)) => path[..end].to_string(),
        None if path.chars().count() == 2 => path.to_string(),
        None => String::new(),
    }
}
