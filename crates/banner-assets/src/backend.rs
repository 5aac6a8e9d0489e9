//! Image backend trait and the `image`-crate implementation

use crate::{AssetError, Result};
use banner_core::ResizeFilter;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// What to do with a source image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Resize to exactly `width x height`, ignoring the source aspect ratio
    Resize { width: u32, height: u32 },
    /// Keep the source size, only normalise to RGBA and re-encode
    Convert,
}

/// One source image turned into one RGBA PNG
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageJob {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub operation: Operation,
}

pub trait ImageBackend: Send + Sync {
    /// Read pixel dimensions without a full decode
    fn identify(&self, path: &Path) -> Result<Dimensions>;

    /// Run a job and return the dimensions of the written image
    fn run(&self, job: &ImageJob) -> Result<Dimensions>;
}

/// Pure Rust backend: content-sniffed decode, RGBA8, PNG out
#[derive(Debug, Clone, Copy)]
pub struct RustBackend {
    filter: FilterType,
}

impl RustBackend {
    pub fn new(filter: ResizeFilter) -> Self {
        let filter = match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        };
        Self { filter }
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new(ResizeFilter::default())
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions> {
        let (width, height) = open(path)?
            .into_dimensions()
            .map_err(|source| AssetError::Decode {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Dimensions { width, height })
    }

    fn run(&self, job: &ImageJob) -> Result<Dimensions> {
        let decoded = open(&job.source)?
            .decode()
            .map_err(|source| AssetError::Decode {
                path: job.source.clone(),
                source,
            })?;

        // Always carry an alpha channel, whatever the source had
        let rgba = DynamicImage::ImageRgba8(decoded.to_rgba8());
        let output = match job.operation {
            Operation::Resize { width, height } => rgba.resize_exact(width, height, self.filter),
            Operation::Convert => rgba,
        };

        output
            .save_with_format(&job.dest, ImageFormat::Png)
            .map_err(|source| AssetError::Encode {
                path: job.dest.clone(),
                source,
            })?;

        tracing::debug!(
            "{} -> {} ({}x{})",
            job.source.display(),
            job.dest.display(),
            output.width(),
            output.height()
        );

        Ok(Dimensions {
            width: output.width(),
            height: output.height(),
        })
    }
}

/// Open with the format sniffed from content, so a mislabelled extension still decodes
fn open(path: &Path) -> Result<ImageReader<std::io::BufReader<std::fs::File>>> {
    let io_err = |source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    };
    ImageReader::open(path)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ColorType, Rgb, RgbImage, Rgba, RgbaImage};

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(width, height, Rgba([200, 40, 10, 128]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_resize_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let backend = RustBackend::default();

        for (i, (w, h)) in [(1000, 600), (64, 64), (200, 900)].into_iter().enumerate() {
            let source = write_png(dir.path(), &format!("src{}.png", i), w, h);
            let dest = dir.path().join(format!("out{}.png", i));
            let job = ImageJob {
                source,
                dest: dest.clone(),
                operation: Operation::Resize {
                    width: 320,
                    height: 480,
                },
            };

            let dims = backend.run(&job).unwrap();
            assert_eq!(dims, Dimensions { width: 320, height: 480 });
            assert_eq!(image::image_dimensions(&dest).unwrap(), (320, 480));
        }
    }

    #[test]
    fn test_convert_keeps_size_and_adds_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("camera.jpg");
        // Opaque RGB source, deliberately saved as PNG under a .jpg name
        RgbImage::from_pixel(37, 21, Rgb([1, 2, 3]))
            .save_with_format(&source, ImageFormat::Png)
            .unwrap();
        let dest = dir.path().join("camara.png");

        let backend = RustBackend::default();
        let dims = backend
            .run(&ImageJob {
                source,
                dest: dest.clone(),
                operation: Operation::Convert,
            })
            .unwrap();

        assert_eq!(dims, Dimensions { width: 37, height: 21 });
        let written = image::open(&dest).unwrap();
        assert_eq!(written.color(), ColorType::Rgba8);
        assert_eq!((written.width(), written.height()), (37, 21));
    }

    #[test]
    fn test_identify() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_png(dir.path(), "src.png", 12, 34);
        let dims = RustBackend::default().identify(&source).unwrap();
        assert_eq!(dims, Dimensions { width: 12, height: 34 });
    }

    #[test]
    fn test_decode_error_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("broken.webp");
        std::fs::write(&source, b"definitely not an image").unwrap();

        let err = RustBackend::default()
            .run(&ImageJob {
                source: source.clone(),
                dest: dir.path().join("out.png"),
                operation: Operation::Convert,
            })
            .unwrap_err();

        assert!(matches!(&err, AssetError::Decode { path, .. } if *path == source));
        assert!(err.to_string().contains("broken.webp"));
    }
}
