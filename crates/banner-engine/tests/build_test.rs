use banner_archive::verify_bundle;
use banner_assets::{AssetError, Dimensions, ImageBackend, ImageJob, Operation, RustBackend};
use banner_config::{Config, ConfigOrigin, FailurePolicy, LoadedConfig};
use banner_engine::{BuildError, Builder, BuiltImage};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A project dir with the default source layout; sources are PNG data
/// behind the default .webp names, which the decoder sniffs.
fn project() -> (tempfile::TempDir, LoadedConfig) {
    let dir = tempfile::tempdir().unwrap();
    let sources = dir.path().join("source_images");
    std::fs::create_dir_all(&sources).unwrap();

    let layers = [
        ("normal_highres.webp", 1200, 900),
        ("thermal_highres.webp", 1000, 1000),
        ("camara.webp", 50, 40),
    ];
    for (name, w, h) in layers {
        RgbaImage::from_pixel(w, h, Rgba([10, 200, 30, 255]))
            .save_with_format(sources.join(name), ImageFormat::Png)
            .unwrap();
    }

    let loaded = LoadedConfig {
        root: dir.path().to_path_buf(),
        origin: ConfigOrigin::Defaults,
        config: Config::default(),
    };
    (dir, loaded)
}

fn read_entry(zip_path: &Path, name: &str) -> Vec<u8> {
    let file = std::fs::File::open(zip_path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut bytes = Vec::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_end(&mut bytes)
        .unwrap();
    bytes
}

fn output_listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Delegates to the real backend but fails every resize to `fail_width`
struct FailingBackend {
    fail_width: u32,
}

impl ImageBackend for FailingBackend {
    fn identify(&self, path: &Path) -> banner_assets::Result<Dimensions> {
        RustBackend::default().identify(path)
    }

    fn run(&self, job: &ImageJob) -> banner_assets::Result<Dimensions> {
        if let Operation::Resize { width, .. } = job.operation
            && width == self.fail_width
        {
            return Err(AssetError::Io {
                path: job.dest.clone(),
                source: std::io::Error::other("disk full"),
            });
        }
        RustBackend::default().run(job)
    }
}

#[tokio::test]
async fn test_end_to_end_default_banners() {
    let (dir, loaded) = project();
    let output = dir.path().join("output_banners_png_standard");

    let report = Builder::new(loaded).unwrap().build().await.unwrap();

    assert!(report.is_complete());
    assert_eq!(report.archives.len(), 2);
    assert_eq!(
        output_listing(&output),
        vec![
            "FLIR_Standard_PNG_320x480.zip".to_string(),
            "FLIR_Standard_PNG_480x320.zip".to_string(),
        ]
    );

    for (built, (w, h)) in report.archives.iter().zip([(320, 480), (480, 320)]) {
        assert_eq!(built.size, format!("{}x{}", w, h));
        assert_eq!(
            built.images,
            vec![
                BuiltImage { file: "normal.png".to_string(), width: w, height: h },
                BuiltImage { file: "thermal.png".to_string(), width: w, height: h },
                BuiltImage { file: "camara.png".to_string(), width: 50, height: 40 },
            ]
        );
        let entries = verify_bundle(&built.archive.path).unwrap();
        assert_eq!(entries.len(), 4);
        assert!(entries.iter().all(|e| !e.contains('/')));

        let html = String::from_utf8(read_entry(&built.archive.path, "index.html")).unwrap();
        assert!(html.contains(&format!(
            r#"<meta name="ad.size" content="width={},height={}">"#,
            w, h
        )));
        assert!(html.contains("const screenW = 108;"));
        assert!(html.contains("const screenH = 78;"));

        for layer in ["normal.png", "thermal.png"] {
            let png = image::load_from_memory(&read_entry(&built.archive.path, layer)).unwrap();
            assert_eq!((png.width(), png.height()), (w, h), "{} in {}", layer, built.size);
        }

        let camera = image::load_from_memory(&read_entry(&built.archive.path, "camara.png")).unwrap();
        assert_eq!((camera.width(), camera.height()), (50, 40));
        assert_eq!(camera.color(), image::ColorType::Rgba8);
    }
}

#[tokio::test]
async fn test_missing_source_dir_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = LoadedConfig {
        root: dir.path().to_path_buf(),
        origin: ConfigOrigin::Defaults,
        config: Config::default(),
    };

    let err = Builder::new(loaded).unwrap().build().await.unwrap_err();

    assert!(matches!(
        err,
        BuildError::Assets(AssetError::SourceDirMissing(_))
    ));
    assert!(!dir.path().join("output_banners_png_standard").exists());
}

#[tokio::test]
async fn test_abort_policy_stops_and_cleans_temp() {
    let (dir, loaded) = project();
    let output = dir.path().join("output_banners_png_standard");

    let err = Builder::new(loaded)
        .unwrap()
        .with_backend(Arc::new(FailingBackend { fail_width: 480 }))
        .build()
        .await
        .unwrap_err();

    assert!(matches!(&err, BuildError::Banner { banner, .. } if banner == "landscape"));
    assert!(err.to_string().contains("disk full"));
    // Portrait was finished before landscape failed; no temp dir survives
    assert_eq!(
        output_listing(&output),
        vec!["FLIR_Standard_PNG_320x480.zip".to_string()]
    );
}

#[tokio::test]
async fn test_skip_policy_builds_the_rest() {
    let (dir, mut loaded) = project();
    loaded.config.build.on_error = FailurePolicy::Skip;
    let output = dir.path().join("output_banners_png_standard");

    let report = Builder::new(loaded)
        .unwrap()
        .with_backend(Arc::new(FailingBackend { fail_width: 320 }))
        .build()
        .await
        .unwrap();

    assert!(!report.is_complete());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].banner, "portrait");
    assert_eq!(report.archives.len(), 1);
    assert_eq!(report.archives[0].banner, "landscape");
    assert_eq!(
        output_listing(&output),
        vec!["FLIR_Standard_PNG_480x320.zip".to_string()]
    );
}

#[tokio::test]
async fn test_only_filter() {
    let (dir, loaded) = project();

    let builder = Builder::new(loaded.clone())
        .unwrap()
        .only(vec!["480x320".to_string()]);
    let report = builder.build().await.unwrap();
    assert_eq!(report.archives.len(), 1);
    assert_eq!(report.archives[0].banner, "landscape");
    assert!(
        dir.path()
            .join("output_banners_png_standard")
            .join("FLIR_Standard_PNG_480x320.zip")
            .exists()
    );

    let err = Builder::new(loaded)
        .unwrap()
        .only(vec!["skyscraper".to_string()])
        .build()
        .await
        .unwrap_err();
    assert!(matches!(err, BuildError::Core(banner_core::Error::BannerNotFound(_))));
}

#[tokio::test]
async fn test_rebuild_is_deterministic() {
    let (_dir, loaded) = project();

    let first = Builder::new(loaded.clone()).unwrap().build().await.unwrap();
    let second = Builder::new(loaded).unwrap().build().await.unwrap();

    let digests = |report: &banner_engine::BuildReport| -> Vec<String> {
        report.archives.iter().map(|a| a.archive.blake3.clone()).collect()
    };
    assert_eq!(digests(&first), digests(&second));
}

#[tokio::test]
async fn test_custom_banner_list_and_prefix() {
    let (dir, mut loaded) = project();
    loaded.config.build.archive_prefix = "Promo".to_string();
    loaded.config.build.output_dir = PathBuf::from("dist");
    loaded.config.banners = vec![banner_core::BannerConfig::new("rectangle", 300, 250).with_reveal(60, 40)];

    let report = Builder::new(loaded).unwrap().build().await.unwrap();

    let zip_path = dir.path().join("dist").join("Promo_300x250.zip");
    assert_eq!(report.archives[0].archive.path, zip_path);
    let html = String::from_utf8(read_entry(&zip_path, "index.html")).unwrap();
    assert!(html.contains("const screenW = 60;"));
    assert!(html.contains("const screenH = 40;"));
}

#[tokio::test]
async fn test_refuses_to_clean_over_sources() {
    let (dir, mut loaded) = project();
    loaded.config.build.output_dir = PathBuf::from(".");

    let err = Builder::new(loaded).unwrap().build().await.unwrap_err();

    assert!(matches!(err, BuildError::UnsafeOutput(_)));
    assert!(dir.path().join("source_images").join("camara.webp").exists());
}

#[tokio::test]
async fn test_unreadable_source_fails_before_output() {
    let (dir, loaded) = project();
    let thermal = dir.path().join("source_images").join("thermal_highres.webp");
    std::fs::write(&thermal, b"this is not an image, only a text file").unwrap();

    let err = Builder::new(loaded).unwrap().build().await.unwrap_err();

    assert!(
        matches!(&err, BuildError::Assets(AssetError::Decode { path, .. }) if *path == thermal),
        "unexpected error: {}",
        err
    );
    assert!(!dir.path().join("output_banners_png_standard").exists());
}

#[tokio::test]
async fn test_small_sources_are_upscaled_to_banner_size() {
    let (dir, loaded) = project();
    let sources = dir.path().join("source_images");
    for name in ["normal_highres.webp", "thermal_highres.webp"] {
        RgbaImage::from_pixel(100, 80, Rgba([200, 20, 20, 255]))
            .save_with_format(sources.join(name), ImageFormat::Png)
            .unwrap();
    }

    let report = Builder::new(loaded).unwrap().build().await.unwrap();

    assert!(report.is_complete());
    for (built, (w, h)) in report.archives.iter().zip([(320, 480), (480, 320)]) {
        for layer in ["normal.png", "thermal.png"] {
            let png = image::load_from_memory(&read_entry(&built.archive.path, layer)).unwrap();
            assert_eq!((png.width(), png.height()), (w, h), "{} in {}", layer, built.size);
        }
    }
}
