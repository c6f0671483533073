//! Dominant colors for a folder of JPEG images.
//!
//! The pipeline is linear: [`scan_folder`] lists the `.jpg`/`.jpeg` files,
//! [`load_pixels`] flattens each one to RGB triples, [`dominant_colors`]
//! runs seeded k-means over them, and [`write_results`] stores the palettes
//! as indented JSON.
//!
//! ```no_run
//! use std::path::Path;
//! use dominant_colors::{ExtractOptions, export_folder, extract_folder, write_results};
//!
//! let results = extract_folder(Path::new("colors"), &ExtractOptions::default(), |_| {})?;
//! write_results(Path::new("fall_colors_by_image.json"), &results)?;
//!
//! // or both steps at once
//! export_folder(
//!     Path::new("colors"),
//!     Path::new("fall_colors_by_image.json"),
//!     &ExtractOptions::default(),
//!     |name| println!("Processing file: {name}"),
//! )?;
//! # Ok::<(), dominant_colors::Error>(())
//! ```

use std::path::{Path, PathBuf};

pub mod cluster;
pub mod error;
pub mod load;
pub mod report;
pub mod scan;

pub use cluster::{ClusterOptions, DegeneratePolicy, MAX_CLUSTERS, dominant_colors};
pub use error::{Error, Result};
pub use load::load_pixels;
pub use report::{ColorTriple, ImageColors, ResultSet, to_json, write_results};
pub use scan::{JPEG_EXTENSIONS, scan_folder};

/// What a per-image failure (decode or clustering) does to the batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop at the first failing image; nothing gets written.
    #[default]
    Abort,
    /// Log a warning and leave the image out of the results.
    Skip,
}

/// Everything [`extract_folder`] needs besides the folder itself.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtractOptions {
    pub cluster: ClusterOptions,
    pub on_error: ErrorPolicy,
    /// Shrink images so their longest side is at most this many pixels.
    pub downscale: Option<u32>,
}

/// Dominant colors of the image at `path`.
pub fn image_colors(path: &Path, opts: &ExtractOptions) -> Result<ImageColors> {
    let pixels = load_pixels(path, opts.downscale)?;
    let dominant_colors = dominant_colors(&pixels, &opts.cluster)?;

    Ok(ImageColors {
        image_name: file_name(path),
        dominant_colors,
    })
}

/// Process `files` in order, calling `on_file` with each file name before it
/// is opened.
pub fn collect_palettes<F>(files: &[PathBuf], opts: &ExtractOptions, mut on_file: F) -> Result<ResultSet>
where
    F: FnMut(&str),
{
    let mut results = ResultSet::with_capacity(files.len());

    for path in files {
        let name = file_name(path);
        on_file(&name);

        match image_colors(path, opts) {
            Ok(colors) => {
                log::info!("{name}: {:?}", colors.dominant_colors);
                results.push(colors);
            }
            Err(e) if opts.on_error == ErrorPolicy::Skip => {
                log::warn!("skipping {}: {e}", path.display());
            }
            Err(e) => return Err(e),
        }
    }

    Ok(results)
}

/// Scan `dir` and collect the dominant colors of every JPEG in it.
pub fn extract_folder<F>(dir: &Path, opts: &ExtractOptions, on_file: F) -> Result<ResultSet>
where
    F: FnMut(&str),
{
    let files = scan_folder(dir)?;
    collect_palettes(&files, opts, on_file)
}

/// Scan `dir`, process every JPEG, then write the results to `output`.
///
/// The output file is only touched once every image has been handled, so a
/// failed scan or an aborted batch leaves any existing file as it was.
pub fn export_folder<F>(dir: &Path, output: &Path, opts: &ExtractOptions, on_file: F) -> Result<ResultSet>
where
    F: FnMut(&str),
{
    let results = extract_folder(dir, opts, on_file)?;
    write_results(output, &results)?;
    Ok(results)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
