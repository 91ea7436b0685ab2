//! Image writers: plain PPM and a grayscale ASCII-art preview.

use crate::error::{RenderError, RenderResult};
use crate::renderer::{color_to_rgb8, ImageBuffer};
use crate::{Camera, Color, Hittable};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Characters from darkest to brightest.
const ASCII_RAMP: &[u8] = b" .:-=+*#%@";

/// File format written by [`write_image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain-text PPM (`P3`)
    #[default]
    Ppm,
    /// One character per pixel, brightness mapped onto a ramp
    Ascii,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Ppm => "ppm",
            OutputFormat::Ascii => "txt",
        }
    }
}

/// Write `image` as PPM: header, then one `r g b` line per pixel.
pub fn write_ppm<W: Write>(image: &ImageBuffer, out: &mut W) -> io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", image.width, image.height)?;
    writeln!(out, "255")?;

    for color in &image.pixels {
        let [r, g, b] = color_to_rgb8(*color);
        writeln!(out, "{} {} {}", r, g, b)?;
    }
    Ok(())
}

/// Ramp character for a color's luminance.
fn ascii_char(color: Color) -> char {
    let [r, g, b] = color_to_rgb8(color);
    let luminance = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    let last = ASCII_RAMP.len() - 1;
    let index = ((luminance / 255.0) * last as f32).round() as usize;
    ASCII_RAMP[index.min(last)] as char
}

/// Write `image` as ASCII art, one text line per pixel row.
pub fn write_ascii<W: Write>(image: &ImageBuffer, out: &mut W) -> io::Result<()> {
    for row in image.pixels.chunks(image.width.max(1) as usize) {
        let line: String = row.iter().map(|c| ascii_char(*c)).collect();
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Write `image` to `dir/name.<ext>`, creating `dir` if needed.
pub fn write_image(
    image: &ImageBuffer,
    dir: impl AsRef<Path>,
    name: &str,
    format: OutputFormat,
) -> RenderResult<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| RenderError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(format!("{}.{}", name, format.extension()));
    let mut out = BufWriter::new(File::create(&path)?);
    match format {
        OutputFormat::Ppm => write_ppm(image, &mut out)?,
        OutputFormat::Ascii => write_ascii(image, &mut out)?,
    }
    out.flush()?;

    log::info!("Wrote {}", path.display());
    Ok(path)
}

impl Camera {
    /// Render `world` and write the result to `dir/name.<ext>`.
    pub fn render_to_file(
        &self,
        world: &dyn Hittable,
        dir: impl AsRef<Path>,
        name: &str,
        format: OutputFormat,
    ) -> RenderResult<PathBuf> {
        let image = self.render(world)?;
        write_image(&image, dir, name, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Background, HittableList, Vec3};

    fn scratch_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lux-output-{}-{}", tag, std::process::id()))
    }

    fn gradient() -> ImageBuffer {
        let mut image = ImageBuffer::new(3, 2);
        image.set(0, 0, Color::ZERO);
        image.set(1, 0, Color::splat(0.5));
        image.set(2, 0, Color::ONE);
        image.set(0, 1, Color::new(1.0, 0.0, 0.0));
        image.set(1, 1, Color::new(0.0, 1.0, 0.0));
        image.set(2, 1, Color::new(0.0, 0.0, 2.0));
        image
    }

    #[test]
    fn test_ppm_layout() {
        let mut out = Vec::new();
        write_ppm(&gradient(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let expected = "P3\n3 2\n255\n0 0 0\n127 127 127\n255 255 255\n255 0 0\n0 255 0\n0 0 255\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_ascii_ramp() {
        let mut out = Vec::new();
        write_ascii(&gradient(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].chars().count(), 3);
        assert_eq!(lines[0].chars().next(), Some(' '));
        assert_eq!(lines[0].chars().last(), Some('@'));
        // Green reads brighter than red, red brighter than blue
        let row: Vec<usize> = lines[1]
            .bytes()
            .map(|c| ASCII_RAMP.iter().position(|&r| r == c).unwrap())
            .collect();
        assert!(row[1] > row[0] && row[0] > row[2]);
    }

    #[test]
    fn test_write_image_creates_directory() {
        let dir = scratch_dir("create").join("nested");
        let path = write_image(&gradient(), &dir, "frame", OutputFormat::Ppm).unwrap();

        assert_eq!(path, dir.join("frame.ppm"));
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("P3\n3 2\n255\n"));

        fs::remove_dir_all(scratch_dir("create")).ok();
    }

    #[test]
    fn test_write_image_reports_bad_directory() {
        // A regular file where the directory should be
        let blocker = scratch_dir("blocked");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = write_image(&gradient(), blocker.join("sub"), "x", OutputFormat::Ascii).unwrap_err();
        assert!(matches!(err, RenderError::CreateDir { .. }));

        fs::remove_file(&blocker).ok();
    }

    #[test]
    fn test_render_to_file() {
        let mut camera = Camera::new(6, 1.5, 60.0, -Vec3::Z, Vec3::ZERO, 0.0);
        camera.set_background(Background::Solid(Color::ONE));
        camera.set_sample_count(1);
        camera.set_seed(Some(3));

        let dir = scratch_dir("render");
        let path = camera
            .render_to_file(&HittableList::new(), &dir, "blank", OutputFormat::Ascii)
            .unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "@@@@@@\n@@@@@@\n@@@@@@\n@@@@@@\n");

        fs::remove_dir_all(&dir).ok();
    }
}
