use crate::compare::PixelBuffer;
use anyhow::Result;
use image::ImageReader;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use walkdir::WalkDir;

/// One scanned image, decoded and held in memory for the comparison pass.
#[derive(Debug)]
pub struct ImageRecord {
    pub path: PathBuf,
    pub pixels: PixelBuffer,
}

/// Recursively walk `dir` and decode every readable image into an
/// [`ImageRecord`]. Files are probed by content, not extension; anything the
/// decoder rejects is silently excluded.
pub fn scan_directory(dir: &Path) -> Result<Vec<ImageRecord>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
    spinner.set_message("Scanning for images…");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let mut images = Vec::new();
    for entry in WalkDir::new(dir).into_iter().filter_map(Result::ok) {
        let path = entry.path();
        if path.is_file() {
            if let Some(pixels) = load_pixels(path) {
                images.push(ImageRecord {
                    path: path.to_path_buf(),
                    pixels,
                });
            }
        }
        spinner.tick();
    }
    spinner.finish_with_message("Scan complete");
    Ok(images)
}

/// Decode `path` into an 8-bit RGB buffer, or `None` if it is not a readable
/// image.
fn load_pixels(path: &Path) -> Option<PixelBuffer> {
    let img = ImageReader::open(path)
        .ok()?
        .with_guessed_format()
        .ok()?
        .decode()
        .ok()?;
    Some(PixelBuffer::from_image(img.to_rgb8()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::fs;

    #[test]
    fn scan_keeps_decodable_files_and_skips_the_rest() {
        let dir = tempfile::tempdir().unwrap();

        RgbImage::from_pixel(2, 2, Rgb([10, 20, 30]))
            .save(dir.path().join("photo.png"))
            .unwrap();
        // Image content behind a misleading extension still counts.
        RgbImage::from_pixel(2, 2, Rgb([40, 50, 60]))
            .save_with_format(dir.path().join("notes.txt"), image::ImageFormat::Png)
            .unwrap();
        // Image extension over junk bytes does not.
        fs::write(dir.path().join("broken.png"), b"not an image").unwrap();

        let mut found: Vec<String> = scan_directory(dir.path())
            .unwrap()
            .into_iter()
            .map(|rec| {
                rec.path
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        found.sort();
        assert_eq!(found, vec!["notes.txt", "photo.png"]);
    }

    #[test]
    fn scan_recurses_into_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        RgbImage::from_pixel(1, 1, Rgb([0, 0, 0]))
            .save(nested.join("deep.png"))
            .unwrap();

        let found = scan_directory(dir.path()).unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].path.ends_with("a/b/deep.png"));
        assert_eq!(found[0].pixels.width, 1);
        assert_eq!(found[0].pixels.height, 1);
        assert_eq!(found[0].pixels.data.len(), 3);
    }
}
