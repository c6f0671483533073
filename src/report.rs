use std::fs;
use std::path::Path;

use palette::Srgb;
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{Error, Result};

/// One integer RGB color as it appears in the output file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorTriple {
    #[serde(rename = "R")]
    pub r: u8,
    #[serde(rename = "G")]
    pub g: u8,
    #[serde(rename = "B")]
    pub b: u8,
}

impl ColorTriple {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Srgb<u8>> for ColorTriple {
    fn from(c: Srgb<u8>) -> Self {
        Self::new(c.red, c.green, c.blue)
    }
}

/// Dominant colors of a single image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageColors {
    /// File name without its directory.
    #[serde(rename = "image")]
    pub image_name: String,
    pub dominant_colors: Vec<ColorTriple>,
}

/// All processed images, in processing order.
pub type ResultSet = Vec<ImageColors>;

/// Render `results` as JSON indented by four spaces.
pub fn to_json(results: &[ImageColors]) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    results.serialize(&mut ser)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Serialize `results` and replace whatever is at `path`.
pub fn write_results(path: &Path, results: &[ImageColors]) -> Result<()> {
    let json = to_json(results)?;
    let output = |source: std::io::Error| Error::Output {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(output)?;
    }
    fs::write(path, json).map_err(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultSet {
        vec![ImageColors {
            image_name: "leaf.jpg".to_string(),
            dominant_colors: vec![ColorTriple::new(200, 120, 30), ColorTriple::new(5, 6, 7)],
        }]
    }

    #[test]
    fn test_empty_result_set_is_empty_array() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_json_layout() {
        let expected = r#"[
    {
        "image": "leaf.jpg",
        "dominant_colors": [
            {
                "R": 200,
                "G": 120,
                "B": 30
            },
            {
                "R": 5,
                "G": 6,
                "B": 7
            }
        ]
    }
]"#;
        assert_eq!(to_json(&sample()).unwrap(), expected);
    }

    #[test]
    fn test_non_ascii_names_stay_utf8() {
        let results = vec![ImageColors {
            image_name: "érable.jpg".to_string(),
            dominant_colors: vec![ColorTriple::new(1, 2, 3)],
        }];

        let json = to_json(&results).unwrap();

        assert!(json.contains("\"image\": \"érable.jpg\""));
    }

    #[test]
    fn test_json_reads_back() {
        let json = to_json(&sample()).unwrap();
        let parsed: ResultSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("colors.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stale contents that are longer than the new ones").unwrap();

        write_results(&path, &[]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("colors.json");

        write_results(&path, &sample()).unwrap();

        assert!(path.is_file());
    }

    #[test]
    fn test_write_into_directory_is_output_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = write_results(dir.path(), &sample()).unwrap_err();
        assert!(matches!(err, Error::Output { .. }));
    }
}
