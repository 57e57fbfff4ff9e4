use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};
use img_parts::jpeg::Jpeg;
use img_parts::{Bytes, ImageEXIF};
use valentine_image_pipeline::assets::list_gallery_sources;
use valentine_image_pipeline::thumbnail::is_avif;
use valentine_image_pipeline::{
    build_assets, decode_oriented, render_thumbnail, AssetLayout, BuildWarning, PipelineSettings,
    ThumbSpec,
};

fn fast_settings() -> PipelineSettings {
    PipelineSettings {
        hero: ThumbSpec {
            size: 24,
            quality: 85,
        },
        carousel: ThumbSpec {
            size: 16,
            quality: 80,
        },
        speed: 10,
    }
}

fn write_image(path: &Path, width: u32, height: u32) {
    let image = RgbImage::from_fn(width, height, |x, y| Rgb([(x * 7) as u8, (y * 5) as u8, 128]));
    image.save(path).expect("write fixture");
}

#[test]
fn missing_inputs_only_warn() {
    let root = tempfile::tempdir().expect("tempdir");
    let layout = AssetLayout::new(root.path().join("assets"), root.path().join("generated"));

    let report = build_assets(&layout, &fast_settings()).expect("build");
    assert!(report.hero.is_none());
    assert!(report.thumbnails.is_empty());
    assert!(matches!(report.warnings[0], BuildWarning::MissingPortrait { .. }));
    assert!(matches!(report.warnings[1], BuildWarning::MissingGallery { .. }));
    assert!(layout.out_dir.is_dir());
}

#[test]
fn empty_gallery_only_warns() {
    let root = tempfile::tempdir().expect("tempdir");
    let layout = AssetLayout::new(root.path().join("assets"), root.path().join("generated"));
    fs::create_dir_all(layout.gallery_dir()).expect("gallery dir");
    fs::write(layout.gallery_dir().join("readme.txt"), "not a photo").expect("write");

    let report = build_assets(&layout, &fast_settings()).expect("build");
    assert!(report.thumbnails.is_empty());
    assert!(report
        .warnings
        .iter()
        .any(|warning| matches!(warning, BuildWarning::EmptyGallery { .. })));
}

#[test]
fn renders_hero_and_thumbnails() {
    let root = tempfile::tempdir().expect("tempdir");
    let layout = AssetLayout::new(root.path().join("assets"), root.path().join("generated"));
    let gallery = layout.gallery_dir();
    fs::create_dir_all(&gallery).expect("gallery dir");

    write_image(&layout.assets_dir.join("me.jpg"), 40, 30);
    write_image(&gallery.join("photo10.png"), 30, 20);
    write_image(&gallery.join("photo2.jpg"), 20, 30);
    write_image(&gallery.join(".hidden.png"), 8, 8);
    fs::write(gallery.join("notes.txt"), "skip me").expect("write");
    fs::write(gallery.join("broken.webp"), b"RIFF....WEBPnope").expect("write");

    let report = build_assets(&layout, &fast_settings()).expect("build");

    let hero = report.hero.as_ref().expect("hero");
    assert_eq!(hero, &layout.hero_output());
    assert!(is_avif(&fs::read(hero).expect("read hero")));

    let names: Vec<String> = report
        .thumbnails
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["photo2.avif", "photo10.avif"]);
    for thumb in &report.thumbnails {
        assert!(is_avif(&fs::read(thumb).expect("read thumb")));
    }

    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(
        &report.warnings[0],
        BuildWarning::Skipped { source, .. } if source.ends_with("broken.webp")
    ));
}

#[test]
fn gallery_listing_is_natural_and_filtered() {
    let root = tempfile::tempdir().expect("tempdir");
    for name in ["img10.jpg", "img2.JPEG", "img1.webp", ".DS_Store", "clip.mov"] {
        fs::write(root.path().join(name), b"x").expect("write");
    }
    let sources = list_gallery_sources(root.path()).expect("list");
    let names: Vec<&str> = sources
        .iter()
        .map(|path| path.file_name().unwrap().to_str().unwrap())
        .collect();
    assert_eq!(names, vec!["img1.webp", "img2.JPEG", "img10.jpg"]);
}

/// Little-endian TIFF header with a single orientation entry.
fn orientation_exif(value: u16) -> Vec<u8> {
    let mut blob = b"II".to_vec();
    blob.extend_from_slice(&42u16.to_le_bytes());
    blob.extend_from_slice(&8u32.to_le_bytes());
    blob.extend_from_slice(&1u16.to_le_bytes());
    blob.extend_from_slice(&0x0112u16.to_le_bytes());
    blob.extend_from_slice(&3u16.to_le_bytes());
    blob.extend_from_slice(&1u32.to_le_bytes());
    blob.extend_from_slice(&value.to_le_bytes());
    blob.extend_from_slice(&[0, 0]);
    blob.extend_from_slice(&0u32.to_le_bytes());
    blob
}

/// 40x30 JPEG, red on the left half and blue on the right, tagged with `orientation`.
fn oriented_jpeg(orientation: u16) -> Vec<u8> {
    let image = RgbImage::from_fn(40, 30, |x, _| {
        if x < 20 {
            Rgb([230, 20, 20])
        } else {
            Rgb([20, 20, 230])
        }
    });
    let mut plain = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut plain), image::ImageFormat::Jpeg)
        .expect("encode jpeg");
    let mut jpeg = Jpeg::from_bytes(Bytes::from(plain)).expect("parse jpeg");
    jpeg.set_exif(Some(Bytes::from(orientation_exif(orientation))));
    let mut tagged = Vec::new();
    jpeg.encoder().write_to(&mut tagged).expect("write jpeg");
    tagged
}

#[test]
fn portrait_orientation_is_applied_before_cropping() {
    let bytes = oriented_jpeg(6);

    let decoded = decode_oriented(&bytes).expect("decode");
    assert_eq!(decoded.orientation, Some(6));
    assert_eq!(decoded.pixels.dimensions(), (30, 40));
    // Rotated a quarter turn clockwise: the red half ends up on top.
    let top = decoded.pixels.get_pixel(15, 5);
    let bottom = decoded.pixels.get_pixel(15, 34);
    assert!(top[0] > top[2], "top should be red, got {top:?}");
    assert!(bottom[2] > bottom[0], "bottom should be blue, got {bottom:?}");

    let thumb = render_thumbnail(&bytes, fast_settings().hero, 10).expect("render");
    assert_eq!((thumb.source_width, thumb.source_height), (30, 40));

    let root = tempfile::tempdir().expect("tempdir");
    let layout = AssetLayout::new(root.path().join("assets"), root.path().join("generated"));
    fs::create_dir_all(&layout.assets_dir).expect("assets dir");
    fs::write(layout.assets_dir.join("me.jpeg"), &bytes).expect("write portrait");
    let report = build_assets(&layout, &fast_settings()).expect("build");
    assert_eq!(report.hero.as_deref(), Some(layout.hero_output().as_path()));
}

#[cfg(unix)]
#[test]
fn unreadable_gallery_only_warns() {
    use std::os::unix::fs::PermissionsExt;

    let root = tempfile::tempdir().expect("tempdir");
    let layout = AssetLayout::new(root.path().join("assets"), root.path().join("generated"));
    let gallery = layout.gallery_dir();
    fs::create_dir_all(&gallery).expect("gallery dir");
    fs::set_permissions(&gallery, fs::Permissions::from_mode(0o000)).expect("chmod");
    let listable = fs::read_dir(&gallery).is_ok();

    let report = build_assets(&layout, &fast_settings());
    fs::set_permissions(&gallery, fs::Permissions::from_mode(0o755)).expect("restore");

    // Privileged users can list the directory anyway.
    if listable {
        return;
    }
    let report = report.expect("build should not fail on an unreadable gallery");
    assert!(report.thumbnails.is_empty());
    assert!(report
        .warnings
        .iter()
        .any(|warning| matches!(warning, BuildWarning::UnreadableGallery { .. })));
}
