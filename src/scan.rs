use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Extensions accepted by [`scan_folder`], compared ignoring ASCII case.
pub const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// Returns `true` when the file name ends in `.` plus one of
/// [`JPEG_EXTENSIONS`]. A bare `.jpg` counts, unlike with `Path::extension`.
pub fn is_jpeg_name(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let name = name.to_ascii_lowercase();
    JPEG_EXTENSIONS
        .iter()
        .any(|ext| name.strip_suffix(ext).is_some_and(|stem| stem.ends_with('.')))
}

/// List the JPEG files directly inside `dir`, sorted by file name.
///
/// Sub-directories are not descended into, and entries that are not regular
/// files (after following symlinks) are ignored even when their name matches.
pub fn scan_folder(dir: &Path) -> Result<Vec<PathBuf>> {
    let access = |source: std::io::Error| Error::InputAccess {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(access)? {
        let entry = entry.map_err(access)?;
        let path = entry.path();
        if !is_jpeg_name(&path) {
            continue;
        }
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => files.push(path),
            Ok(_) => log::debug!("ignoring non-file entry {}", path.display()),
            Err(e) => log::debug!("ignoring unreadable entry {}: {e}", path.display()),
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    log::debug!("found {} JPEG files in {}", files.len(), dir.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_filter_ignores_case() {
        assert!(is_jpeg_name(Path::new("a.jpg")));
        assert!(is_jpeg_name(Path::new("b.JPEG")));
        assert!(is_jpeg_name(Path::new("dir/c.JpG")));
        assert!(is_jpeg_name(Path::new(".jpg")));
        assert!(is_jpeg_name(Path::new(".JPEG")));
        assert!(!is_jpeg_name(Path::new("notes.txt")));
        assert!(!is_jpeg_name(Path::new("image.png")));
        assert!(!is_jpeg_name(Path::new("jpg")));
        assert!(!is_jpeg_name(Path::new("archive.jpg.zip")));
    }

    #[test]
    fn test_scan_folder_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.jpeg", "a.jpg", "C.JPG", ".jpg", "notes.txt", "d.png"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("nested.jpg")).unwrap();

        let files = scan_folder(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec![".jpg", "C.JPG", "a.jpg", "b.jpeg"]);
    }

    #[test]
    fn test_scan_folder_does_not_recurse() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("inner.jpg"), b"").unwrap();

        assert!(scan_folder(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_folder_is_input_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = scan_folder(&missing).unwrap_err();
        assert!(matches!(err, Error::InputAccess { ref path, .. } if path == &missing));
    }
}
