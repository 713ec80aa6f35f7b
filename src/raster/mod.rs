//! Raster input: page images handed to OCR engines.
//!
//! PDF rendering is an external concern behind [`PageRasterizer`]; this crate
//! only decodes images and selects page ranges.

#[cfg(feature = "preprocess")]
pub mod preprocess;

use crate::error::Result;
use image::DynamicImage;
use std::path::Path;

#[cfg(feature = "preprocess")]
pub use preprocess::preprocess;

/// Converts a PDF byte stream into one raster per page, in page order.
pub trait PageRasterizer: Send + Sync {
    /// Render every page of `pdf`.
    fn rasterize(&self, pdf: &[u8]) -> Result<Vec<DynamicImage>>;
}

/// Keep pages `start..=end` (1-based, inclusive).
///
/// `end` is clamped to the page count and a `start` of 0 is treated as 1.
/// The result is empty when `start` is past the last page or after `end`.
///
/// # Examples
///
/// ```
/// use ocr_markdown::raster::select_page_range;
///
/// let pages = vec!["p1", "p2", "p3", "p4"];
/// assert_eq!(select_page_range(pages.clone(), 2, 3), vec!["p2", "p3"]);
/// assert_eq!(select_page_range(pages.clone(), 3, 99), vec!["p3", "p4"]);
/// assert!(select_page_range(pages, 5, 9).is_empty());
/// ```
pub fn select_page_range<T>(pages: Vec<T>, start: usize, end: usize) -> Vec<T> {
    let first = start.max(1) - 1;
    let last = end.min(pages.len());
    if first >= last {
        return Vec::new();
    }
    pages.into_iter().skip(first).take(last - first).collect()
}

/// Decode an image from memory (PNG, JPEG or TIFF).
pub fn load_image(bytes: &[u8]) -> Result<DynamicImage> {
    Ok(image::load_from_memory(bytes)?)
}

/// Decode an image file.
pub fn load_image_file(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let bytes = std::fs::read(path.as_ref())?;
    load_image(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use image::ImageFormat;
    use std::io::Cursor;

    fn make_png(width: u32, height: u32) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::new_rgb8(width, height)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_select_page_range() {
        let pages: Vec<u32> = (1..=5).collect();
        assert_eq!(select_page_range(pages.clone(), 1, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(select_page_range(pages.clone(), 0, 2), vec![1, 2]);
        assert_eq!(select_page_range(pages.clone(), 4, 4), vec![4]);
        assert!(select_page_range(pages.clone(), 4, 3).is_empty());
        assert!(select_page_range(Vec::<u32>::new(), 1, 3).is_empty());
    }

    #[test]
    fn test_load_image_roundtrip_dimensions() {
        let image = load_image(&make_png(7, 3)).unwrap();
        assert_eq!((image.width(), image.height()), (7, 3));
    }

    #[test]
    fn test_load_image_rejects_garbage() {
        assert!(matches!(load_image(b"not an image"), Err(Error::Image(_))));
    }

    #[test]
    fn test_load_image_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.png");
        std::fs::write(&path, make_png(4, 4)).unwrap();
        assert_eq!(load_image_file(&path).unwrap().width(), 4);
        assert!(matches!(
            load_image_file(dir.path().join("missing.png")),
            Err(Error::Io(_))
        ));
    }
}
