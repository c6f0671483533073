use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageReader, imageops::FilterType};
use palette::Srgb;

use crate::error::{Error, Result};

/// Decode `path` and flatten it to one RGB triple per pixel, row-major.
///
/// The format is sniffed from the file contents first, so a PNG that was
/// renamed to `.jpg` still loads. Alpha and any extra channels are dropped.
/// With `downscale` set, the image is first resized so that its longest side
/// equals that many pixels (nearest-neighbour, aspect ratio kept).
pub fn load_pixels(path: &Path, downscale: Option<u32>) -> Result<Vec<Srgb<u8>>> {
    let decode = |source: image::ImageError| Error::Decode {
        path: path.to_path_buf(),
        source,
    };

    let img = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|source| Error::ImageAccess {
            path: path.to_path_buf(),
            source,
        })?
        .decode()
        .map_err(decode)?;

    let img = match downscale {
        Some(side) => shrink(img, side),
        None => img,
    };

    let pixels = flatten_rgb(&img);
    if pixels.is_empty() {
        return Err(Error::EmptyImage {
            path: path.to_path_buf(),
        });
    }

    log::debug!(
        "{}: {}x{} -> {} pixels",
        path.display(),
        img.width(),
        img.height(),
        pixels.len()
    );
    Ok(pixels)
}

/// Convert any decoded image to packed RGB8 and reinterpret it as triples.
pub fn flatten_rgb(img: &DynamicImage) -> Vec<Srgb<u8>> {
    let rgb = img.to_rgb8();
    palette::cast::from_component_slice::<Srgb<u8>>(rgb.as_raw()).to_vec()
}

// Longest side becomes `side`; never upscales.
fn shrink(img: DynamicImage, side: u32) -> DynamicImage {
    let (orig_w, orig_h) = img.dimensions();
    let max_side = orig_w.max(orig_h);
    if side == 0 || max_side <= side {
        return img;
    }

    let ratio = side as f32 / max_side as f32;
    let w = ((orig_w as f32) * ratio).round().max(1.0) as u32;
    let h = ((orig_h as f32) * ratio).round().max(1.0) as u32;
    img.resize_exact(w, h, FilterType::Nearest)
}
