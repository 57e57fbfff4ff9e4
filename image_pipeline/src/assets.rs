use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use valentine_core::natural_cmp;

use crate::settings::{PipelineSettings, ThumbSpec};
use crate::thumbnail::render_thumbnail;
use crate::PipelineError;

pub const PORTRAIT_SOURCES: [&str; 2] = ["me.jpeg", "me.jpg"];
pub const GALLERY_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];
pub const HERO_OUTPUT: &str = "me-hero.avif";
pub const GALLERY_DIR: &str = "carousel";

/// Where sources are read from and derivatives are written to.
#[derive(Debug, Clone)]
pub struct AssetLayout {
    pub assets_dir: PathBuf,
    pub out_dir: PathBuf,
}

impl AssetLayout {
    pub fn new(assets_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
            out_dir: out_dir.into(),
        }
    }

    pub fn gallery_dir(&self) -> PathBuf {
        self.assets_dir.join(GALLERY_DIR)
    }

    pub fn hero_output(&self) -> PathBuf {
        self.out_dir.join(HERO_OUTPUT)
    }

    pub fn gallery_output_dir(&self) -> PathBuf {
        self.out_dir.join(GALLERY_DIR)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    MissingPortrait { searched: PathBuf },
    MissingGallery { dir: PathBuf },
    EmptyGallery { dir: PathBuf },
    UnreadableGallery { dir: PathBuf, reason: String },
    Skipped { source: PathBuf, reason: String },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildWarning::MissingPortrait { searched } => write!(
                f,
                "no {} found in {}, skipping hero",
                PORTRAIT_SOURCES.join("/"),
                searched.display()
            ),
            BuildWarning::MissingGallery { dir } => {
                write!(f, "gallery dir {} not found, skipping carousel", dir.display())
            }
            BuildWarning::EmptyGallery { dir } => {
                write!(f, "no images in {}, skipping carousel", dir.display())
            }
            BuildWarning::UnreadableGallery { dir, reason } => {
                write!(f, "cannot list {}: {reason}, skipping carousel", dir.display())
            }
            BuildWarning::Skipped { source, reason } => {
                write!(f, "skipped {}: {reason}", source.display())
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub hero: Option<PathBuf>,
    pub thumbnails: Vec<PathBuf>,
    pub warnings: Vec<BuildWarning>,
}

impl BuildReport {
    fn warn(&mut self, warning: BuildWarning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }
}

pub fn find_portrait(assets_dir: &Path) -> Option<PathBuf> {
    PORTRAIT_SOURCES
        .iter()
        .map(|name| assets_dir.join(name))
        .find(|path| path.is_file())
}

pub fn is_gallery_source(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    if name.starts_with('.') {
        return false;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| GALLERY_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Gallery sources in natural file-name order.
pub fn list_gallery_sources(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let io_err = |source| PipelineError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut sources = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && is_gallery_source(&path) {
            sources.push(path);
        }
    }
    sources.sort_by(|a, b| natural_cmp(&file_name(a), &file_name(b)));
    Ok(sources)
}

/// Renders the hero and every gallery thumbnail. Bad inputs are recorded as
/// warnings; only failing to prepare the output tree is an error.
pub fn build_assets(
    layout: &AssetLayout,
    settings: &PipelineSettings,
) -> Result<BuildReport, PipelineError> {
    let mut report = BuildReport::default();
    create_dir(&layout.out_dir)?;

    match find_portrait(&layout.assets_dir) {
        Some(source) => {
            let output = layout.hero_output();
            match render_to(&source, &output, settings.hero, settings.speed) {
                Ok(()) => {
                    tracing::info!(source = %source.display(), output = %output.display(), "hero rendered");
                    report.hero = Some(output);
                }
                Err(err) => report.warn(BuildWarning::Skipped {
                    source,
                    reason: err.to_string(),
                }),
            }
        }
        None => report.warn(BuildWarning::MissingPortrait {
            searched: layout.assets_dir.clone(),
        }),
    }

    let gallery_dir = layout.gallery_dir();
    if !gallery_dir.is_dir() {
        report.warn(BuildWarning::MissingGallery { dir: gallery_dir });
        return Ok(report);
    }
    let sources = match list_gallery_sources(&gallery_dir) {
        Ok(sources) => sources,
        Err(err) => {
            report.warn(BuildWarning::UnreadableGallery {
                dir: gallery_dir,
                reason: err.to_string(),
            });
            return Ok(report);
        }
    };
    if sources.is_empty() {
        report.warn(BuildWarning::EmptyGallery { dir: gallery_dir });
        return Ok(report);
    }

    let thumbs_dir = layout.gallery_output_dir();
    create_dir(&thumbs_dir)?;
    for source in sources {
        let stem = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output = thumbs_dir.join(format!("{stem}.avif"));
        match render_to(&source, &output, settings.carousel, settings.speed) {
            Ok(()) => {
                tracing::info!(source = %file_name(&source), output = %output.display(), "thumbnail rendered");
                report.thumbnails.push(output);
            }
            Err(err) => report.warn(BuildWarning::Skipped {
                source,
                reason: err.to_string(),
            }),
        }
    }

    tracing::info!(
        count = report.thumbnails.len(),
        dir = %thumbs_dir.display(),
        "carousel thumbnails built"
    );
    Ok(report)
}

fn render_to(source: &Path, output: &Path, spec: ThumbSpec, speed: u8) -> Result<(), PipelineError> {
    let bytes = fs::read(source).map_err(|err| PipelineError::Io {
        path: source.to_path_buf(),
        source: err,
    })?;
    let thumbnail = render_thumbnail(&bytes, spec, speed)?;
    fs::write(output, &thumbnail.bytes).map_err(|err| PipelineError::Io {
        path: output.to_path_buf(),
        source: err,
    })
}

fn create_dir(dir: &Path) -> Result<(), PipelineError> {
    fs::create_dir_all(dir).map_err(|source| PipelineError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
