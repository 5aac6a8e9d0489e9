//! Build orchestration
//!
//! One banner is fully processed (images, index.html, archive, temp dir
//! removal) before the next one starts. CPU-heavy steps run on the blocking
//! pool but are awaited in sequence.

pub mod error;
pub mod report;

use banner_archive::Archiver;
use banner_assets::{AssetPipeline, ImageBackend, RustBackend, SourceRole, SourceSet};
use banner_config::{FailurePolicy, LoadedConfig};
use banner_core::{BannerConfig, BundleFile, TemplateRenderer};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use error::{BuildError, Result};
pub use report::{BuildReport, BuiltBanner, BuiltImage, SkippedBanner};

pub struct Builder {
    config: LoadedConfig,
    pipeline: AssetPipeline,
    renderer: TemplateRenderer,
    archiver: Archiver,
    only: Vec<String>,
}

impl Builder {
    pub fn new(config: LoadedConfig) -> Result<Self> {
        config.config.validate()?;
        let backend = Arc::new(RustBackend::new(config.config.build.filter));

        Ok(Self {
            config,
            pipeline: AssetPipeline::new(backend),
            renderer: TemplateRenderer::new()?,
            archiver: Archiver::new(),
            only: Vec::new(),
        })
    }

    /// Swap the image backend
    pub fn with_backend(mut self, backend: Arc<dyn ImageBackend>) -> Self {
        self.pipeline = AssetPipeline::new(backend);
        self
    }

    /// Restrict the build to these banners (by name or `<w>x<h>`)
    pub fn only(mut self, names: Vec<String>) -> Self {
        self.only = names;
        self
    }

    /// Banners to build, in configured order
    pub fn selected(&self) -> Result<Vec<&BannerConfig>> {
        if self.only.is_empty() {
            return Ok(self.config.config.banners.iter().collect());
        }

        for name in &self.only {
            self.config.banner(name)?;
        }

        Ok(self
            .config
            .config
            .banners
            .iter()
            .filter(|b| {
                self.only
                    .iter()
                    .any(|name| *name == b.name || *name == b.size_name())
            })
            .collect())
    }

    pub async fn build(&self) -> Result<BuildReport> {
        let settings = &self.config.config.build;
        let names = &self.config.config.sources;
        let banners = self.selected()?;

        // Sources are checked before the output directory is touched
        let source_dir = self.config.source_dir();
        let sources = SourceSet::locate(&source_dir, &names.normal, &names.thermal, &names.camera)?;
        self.check_source_sizes(&sources, &banners)?;

        let output_dir = self.config.output_dir();
        prepare_output(&output_dir, &source_dir, settings.clean_output).await?;

        tracing::info!(
            "Generating {} banner(s) in '{}'",
            banners.len(),
            output_dir.display()
        );

        let mut report = BuildReport::new(output_dir.clone());
        for banner in banners {
            tracing::info!("Processing: {}...", banner.size_name());

            match self.build_banner(banner, &sources, &output_dir).await {
                Ok(built) => {
                    tracing::info!("  -> Generated: {}", banner.archive_name(&settings.archive_prefix));
                    report.archives.push(built);
                }
                Err(err) => {
                    let err = BuildError::Banner {
                        banner: banner.name.clone(),
                        source: Box::new(err),
                    };
                    match settings.on_error {
                        FailurePolicy::Abort => return Err(err),
                        FailurePolicy::Skip => {
                            tracing::warn!("Skipping: {}", err);
                            report.skipped.push(SkippedBanner {
                                banner: banner.name.clone(),
                                error: err.to_string(),
                            });
                        }
                    }
                }
            }
        }

        Ok(report)
    }

    /// Read source headers up front and warn when a layer will be upscaled
    fn check_source_sizes(&self, sources: &SourceSet, banners: &[&BannerConfig]) -> Result<()> {
        for (role, path) in sources.iter() {
            let dims = self.pipeline.identify(path)?;
            tracing::debug!("{} source {}: {}x{}", role, path.display(), dims.width, dims.height);

            if role == SourceRole::Camera {
                continue;
            }
            for banner in banners {
                if dims.width < banner.width || dims.height < banner.height {
                    tracing::warn!(
                        "{} source is {}x{}, smaller than {}; it will be upscaled",
                        role,
                        dims.width,
                        dims.height,
                        banner.size_name()
                    );
                }
            }
        }
        Ok(())
    }

    /// Build one banner in its own temp dir inside `output_dir`
    ///
    /// The temp dir is removed on every path out of this function: explicitly
    /// on success, by drop on failure.
    async fn build_banner(
        &self,
        banner: &BannerConfig,
        sources: &SourceSet,
        output_dir: &Path,
    ) -> Result<BuiltBanner> {
        let settings = &self.config.config.build;
        let work = tempfile::Builder::new()
            .prefix(&format!("temp_{}_", banner.size_name()))
            .tempdir_in(output_dir)
            .map_err(BuildError::io(output_dir))?;
        let work_dir = work.path().to_path_buf();

        let pipeline = self.pipeline.clone();
        let (job_sources, job_banner, job_dir) = (sources.clone(), banner.clone(), work_dir.clone());
        let images =
            tokio::task::spawn_blocking(move || pipeline.process(&job_sources, &job_banner, &job_dir))
                .await??;
        let images: Vec<BuiltImage> = images
            .into_iter()
            .map(|asset| {
                tracing::debug!(
                    "  {} ({}x{})",
                    asset.path.display(),
                    asset.dimensions.width,
                    asset.dimensions.height
                );
                BuiltImage {
                    file: asset.file.file_name().to_string(),
                    width: asset.dimensions.width,
                    height: asset.dimensions.height,
                }
            })
            .collect();

        let html = self.renderer.render(banner, &self.config.config.creative)?;
        let index = work_dir.join(BundleFile::Index.file_name());
        tokio::fs::write(&index, html)
            .await
            .map_err(BuildError::io(&index))?;

        let dest = output_dir.join(banner.archive_name(&settings.archive_prefix));
        let archiver = self.archiver;
        let summary = tokio::task::spawn_blocking(move || archiver.archive_dir(&work_dir, &dest)).await??;

        work.close().map_err(BuildError::io(output_dir))?;

        Ok(BuiltBanner {
            banner: banner.name.clone(),
            size: banner.size_name(),
            images,
            archive: summary,
        })
    }
}

/// Make sure `output_dir` exists, emptying it first when `clean` is set
async fn prepare_output(output_dir: &Path, source_dir: &Path, clean: bool) -> Result<()> {
    if clean && output_dir.exists() {
        let output = canonical(output_dir);
        if canonical(source_dir).starts_with(&output) {
            return Err(BuildError::UnsafeOutput(output_dir.to_path_buf()));
        }
        tokio::fs::remove_dir_all(output_dir)
            .await
            .map_err(BuildError::io(output_dir))?;
    }

    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(BuildError::io(output_dir))
}

fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
