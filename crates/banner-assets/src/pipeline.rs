//! Per-banner asset pipeline

use crate::{Dimensions, ImageBackend, ImageJob, Operation, Result, SourceSet};
use banner_core::{BannerConfig, BundleFile};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// An image written into a bundle directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedAsset {
    pub file: BundleFile,
    pub path: PathBuf,
    pub dimensions: Dimensions,
}

#[derive(Clone)]
pub struct AssetPipeline {
    backend: Arc<dyn ImageBackend>,
}

impl AssetPipeline {
    pub fn new(backend: Arc<dyn ImageBackend>) -> Self {
        Self { backend }
    }

    /// Pixel dimensions of a source image
    pub fn identify(&self, path: &Path) -> Result<Dimensions> {
        self.backend.identify(path)
    }

    /// Jobs for one banner: both layers resized to the banner, camera icon converted as-is
    pub fn jobs(sources: &SourceSet, banner: &BannerConfig, dest_dir: &Path) -> Vec<(BundleFile, ImageJob)> {
        let resize = Operation::Resize {
            width: banner.width,
            height: banner.height,
        };

        [
            (BundleFile::Normal, &sources.normal, resize),
            (BundleFile::Thermal, &sources.thermal, resize),
            (BundleFile::Camera, &sources.camera, Operation::Convert),
        ]
        .into_iter()
        .map(|(file, source, operation)| {
            let job = ImageJob {
                source: source.clone(),
                dest: dest_dir.join(file.file_name()),
                operation,
            };
            (file, job)
        })
        .collect()
    }

    /// Write the three bundle images for `banner` into `dest_dir`
    ///
    /// Stops at the first failing job.
    pub fn process(
        &self,
        sources: &SourceSet,
        banner: &BannerConfig,
        dest_dir: &Path,
    ) -> Result<Vec<ProcessedAsset>> {
        let mut processed = Vec::with_capacity(3);

        for (file, job) in Self::jobs(sources, banner, dest_dir) {
            let dimensions = self.backend.run(&job)?;
            processed.push(ProcessedAsset {
                file,
                path: job.dest,
                dimensions,
            });
        }

        tracing::debug!("Processed {} images for {}", processed.len(), banner.name);
        Ok(processed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AssetError;
    use std::sync::Mutex;

    /// Records jobs instead of touching pixels
    #[derive(Default)]
    struct MockBackend {
        jobs: Mutex<Vec<ImageJob>>,
        fail_on: Option<PathBuf>,
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, _path: &Path) -> Result<Dimensions> {
            Ok(Dimensions {
                width: 64,
                height: 64,
            })
        }

        fn run(&self, job: &ImageJob) -> Result<Dimensions> {
            if self.fail_on.as_ref() == Some(&job.source) {
                return Err(AssetError::SourceMissing {
                    role: "test".to_string(),
                    path: job.source.clone(),
                });
            }
            self.jobs.lock().unwrap().push(job.clone());
            Ok(match job.operation {
                Operation::Resize { width, height } => Dimensions { width, height },
                Operation::Convert => Dimensions {
                    width: 64,
                    height: 64,
                },
            })
        }
    }

    fn sources() -> SourceSet {
        SourceSet {
            normal: PathBuf::from("/src/normal.webp"),
            thermal: PathBuf::from("/src/thermal.webp"),
            camera: PathBuf::from("/src/camara.webp"),
        }
    }

    #[test]
    fn test_jobs_for_banner() {
        let banner = BannerConfig::new("landscape", 480, 320);
        let jobs = AssetPipeline::jobs(&sources(), &banner, Path::new("/tmp/work"));

        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0].0, BundleFile::Normal);
        assert_eq!(jobs[0].1.dest, PathBuf::from("/tmp/work/normal.png"));
        assert_eq!(
            jobs[1].1.operation,
            Operation::Resize {
                width: 480,
                height: 320
            }
        );
        assert_eq!(jobs[2].0, BundleFile::Camera);
        assert_eq!(jobs[2].1.operation, Operation::Convert);
        assert_eq!(jobs[2].1.dest, PathBuf::from("/tmp/work/camara.png"));
    }

    #[test]
    fn test_process_runs_every_job() {
        let backend = Arc::new(MockBackend::default());
        let pipeline = AssetPipeline::new(backend.clone());
        let banner = BannerConfig::new("portrait", 320, 480);

        let processed = pipeline.process(&sources(), &banner, Path::new("/tmp/work")).unwrap();

        assert_eq!(processed.len(), 3);
        assert_eq!(processed[0].dimensions, Dimensions { width: 320, height: 480 });
        assert_eq!(processed[2].dimensions, Dimensions { width: 64, height: 64 });
        assert_eq!(backend.jobs.lock().unwrap().len(), 3);
        assert_eq!(
            pipeline.identify(Path::new("/src/camara.webp")).unwrap(),
            Dimensions { width: 64, height: 64 }
        );
    }

    #[test]
    fn test_process_stops_at_first_failure() {
        let backend = Arc::new(MockBackend {
            fail_on: Some(PathBuf::from("/src/thermal.webp")),
            ..Default::default()
        });
        let pipeline = AssetPipeline::new(backend.clone());
        let banner = BannerConfig::new("portrait", 320, 480);

        let err = pipeline
            .process(&sources(), &banner, Path::new("/tmp/work"))
            .unwrap_err();

        assert!(err.to_string().contains("thermal.webp"));
        assert_eq!(backend.jobs.lock().unwrap().len(), 1);
    }
}
