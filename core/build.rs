use std::env;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

#[path = "src/natural.rs"]
#[allow(dead_code)]
mod natural;

const GALLERY_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "avif"];
const DEFAULT_GALLERY_DIR: &str = "assets/generated/carousel";
const DEFAULT_GALLERY_URL: &str = "generated/carousel";
const DEFAULT_HERO_PATH: &str = "assets/generated/me-hero.avif";
const DEFAULT_HERO_URL: &str = "generated/me-hero.avif";

struct DiscoveredImage {
    name: String,
    src: String,
}

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("missing CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir.parent().unwrap_or(&manifest_dir);
    let env_path = workspace_root.join(".env");
    let env_local_path = workspace_root.join(".env.local");

    let _ = dotenvy::from_filename(&env_local_path);
    let _ = dotenvy::from_filename(&env_path);

    println!("cargo:rerun-if-env-changed=VALENTINE_GALLERY_DIR");
    println!("cargo:rerun-if-env-changed=VALENTINE_GALLERY_URL");
    println!("cargo:rerun-if-env-changed=VALENTINE_HERO_PATH");
    println!("cargo:rerun-if-env-changed=VALENTINE_HERO_URL");
    println!("cargo:rerun-if-changed={}", env_path.display());
    println!("cargo:rerun-if-changed={}", env_local_path.display());

    let gallery_dir = resolve_path(workspace_root, "VALENTINE_GALLERY_DIR", DEFAULT_GALLERY_DIR);
    let gallery_url = env_or("VALENTINE_GALLERY_URL", DEFAULT_GALLERY_URL);
    let hero_path = resolve_path(workspace_root, "VALENTINE_HERO_PATH", DEFAULT_HERO_PATH);
    let hero_url = env_or("VALENTINE_HERO_URL", DEFAULT_HERO_URL);

    // Watching the parent picks up the directory being created later.
    if let Some(parent) = gallery_dir.parent() {
        println!("cargo:rerun-if-changed={}", parent.display());
    }
    println!("cargo:rerun-if-changed={}", gallery_dir.display());
    println!("cargo:rerun-if-changed={}", hero_path.display());

    let images = discover_gallery(&gallery_dir, &gallery_url);
    if images.is_empty() {
        println!(
            "cargo:warning=no gallery images found in {}; the marquee will show its placeholder",
            gallery_dir.display()
        );
    }

    let hero_src = if hero_path.is_file() {
        Some(hero_url)
    } else {
        println!(
            "cargo:warning=hero image {} not found; the question screen renders without a photo",
            hero_path.display()
        );
        None
    };

    let mut output = String::new();
    match &hero_src {
        Some(src) => writeln!(
            &mut output,
            "pub const HERO_SRC: Option<&str> = Some({});",
            rust_string(src)
        )
        .unwrap(),
        None => writeln!(&mut output, "pub const HERO_SRC: Option<&str> = None;").unwrap(),
    }
    writeln!(&mut output).unwrap();
    writeln!(&mut output, "pub const GALLERY: &[GalleryEntry] = &[").unwrap();
    for image in &images {
        writeln!(&mut output, "    GalleryEntry {{").unwrap();
        writeln!(&mut output, "        name: {},", rust_string(&image.name)).unwrap();
        writeln!(&mut output, "        src: {},", rust_string(&image.src)).unwrap();
        writeln!(&mut output, "    }},").unwrap();
    }
    writeln!(&mut output, "];").unwrap();

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("missing OUT_DIR"));
    let out_path = out_dir.join("gallery_catalog.rs");
    fs::write(&out_path, output).unwrap_or_else(|err| {
        panic!("failed to write {}: {err}", out_path.display())
    });
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => default.to_string(),
    }
}

fn resolve_path(workspace_root: &Path, key: &str, default: &str) -> PathBuf {
    let raw_path = PathBuf::from(env_or(key, default));
    if raw_path.is_relative() {
        workspace_root.join(raw_path)
    } else {
        raw_path
    }
}

fn discover_gallery(dir: &Path, url_prefix: &str) -> Vec<DiscoveredImage> {
    if !dir.is_dir() {
        return Vec::new();
    }
    let entries = fs::read_dir(dir).unwrap_or_else(|err| {
        panic!("failed to read gallery dir {}: {err}", dir.display())
    });

    let mut images = Vec::new();
    for entry in entries {
        let entry = entry.unwrap_or_else(|err| {
            panic!("failed to read entry in {}: {err}", dir.display())
        });
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            println!(
                "cargo:warning=skipping non-UTF-8 gallery file {}",
                path.display()
            );
            continue;
        };
        if name.starts_with('.') || !has_gallery_extension(&path) {
            continue;
        }
        let prefix = url_prefix.trim_end_matches('/');
        images.push(DiscoveredImage {
            name: name.to_string(),
            src: format!("{prefix}/{name}"),
        });
    }
    images.sort_by(|a, b| natural::natural_cmp(&a.name, &b.name));
    images
}

fn has_gallery_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            GALLERY_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

fn rust_string(value: &str) -> String {
    format!("{:?}", value)
}
