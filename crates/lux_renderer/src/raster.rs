//! Image source for texture lookups.
//!
//! Decodes any format the `image` crate understands into tightly packed
//! 8-bit RGB, addressed by integer pixel coordinates.

use crate::error::{RenderError, RenderResult};
use std::path::Path;

/// An RGB8 raster, row-major with the origin at the top-left.
#[derive(Clone, Debug, Default)]
pub struct Image {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Image {
    /// Load `name` from `base_dir`. Absolute names ignore the base directory.
    pub fn load(name: impl AsRef<Path>, base_dir: impl AsRef<Path>) -> RenderResult<Self> {
        let name = name.as_ref();
        let path = if name.is_absolute() {
            name.to_path_buf()
        } else {
            base_dir.as_ref().join(name)
        };

        let rgb = ::image::open(&path)
            .map_err(|source| RenderError::ImageLoad {
                path: path.clone(),
                source,
            })?
            .to_rgb8();
        let (width, height) = rgb.dimensions();

        log::debug!("Loaded texture image {} ({}x{})", path.display(), width, height);

        Ok(Self {
            width,
            height,
            data: rgb.into_raw(),
        })
    }

    /// Wrap raw RGB8 bytes. Returns an empty image if the buffer length
    /// does not match the dimensions.
    pub fn from_rgb8(width: u32, height: u32, data: Vec<u8>) -> Self {
        if data.len() != (width as usize) * (height as usize) * 3 {
            log::warn!(
                "RGB buffer of {} bytes does not match {}x{}; using an empty image",
                data.len(),
                width,
                height
            );
            return Self::default();
        }
        Self { width, height, data }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// RGB bytes of pixel `(i, j)`, coordinates clamped into the image.
    /// An empty image yields magenta.
    pub fn pixel_data(&self, i: i64, j: i64) -> [u8; 3] {
        if self.is_empty() {
            return [255, 0, 255];
        }
        let x = i.clamp(0, self.width as i64 - 1) as usize;
        let y = j.clamp(0, self.height as i64 - 1) as usize;
        let idx = (y * self.width as usize + x) * 3;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> Image {
        #[rustfmt::skip]
        let data = vec![
            255, 0, 0,    0, 255, 0,
            0, 0, 255,    255, 255, 255,
        ];
        Image::from_rgb8(2, 2, data)
    }

    #[test]
    fn test_pixel_data() {
        let img = two_by_two();
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 2);
        assert_eq!(img.pixel_data(0, 0), [255, 0, 0]);
        assert_eq!(img.pixel_data(1, 0), [0, 255, 0]);
        assert_eq!(img.pixel_data(0, 1), [0, 0, 255]);
    }

    #[test]
    fn test_pixel_data_clamps() {
        let img = two_by_two();
        assert_eq!(img.pixel_data(-5, -5), [255, 0, 0]);
        assert_eq!(img.pixel_data(9, 9), [255, 255, 255]);
    }

    #[test]
    fn test_mismatched_buffer_is_empty() {
        let img = Image::from_rgb8(4, 4, vec![0; 5]);
        assert!(img.is_empty());
        assert_eq!(img.pixel_data(0, 0), [255, 0, 255]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Image::load("does-not-exist.png", std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, RenderError::ImageLoad { .. }));
    }

    #[test]
    fn test_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("lux-image-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let buf = ::image::RgbImage::from_raw(2, 1, vec![10, 20, 30, 40, 50, 60]).unwrap();
        buf.save(dir.join("tiny.png")).unwrap();

        let img = Image::load("tiny.png", &dir).unwrap();
        assert_eq!(img.pixel_data(1, 0), [40, 50, 60]);

        std::fs::remove_dir_all(&dir).ok();
    }
}
