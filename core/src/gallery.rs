use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GalleryEntry {
    pub name: &'static str,
    pub src: &'static str,
}

// Generated by build.rs: `HERO_SRC` and `GALLERY`, naturally sorted by name.
include!(concat!(env!("OUT_DIR"), "/gallery_catalog.rs"));

pub const CAROUSEL_SPEED_SECONDS: u32 = 18;

pub fn gallery_sources() -> Vec<&'static str> {
    GALLERY.iter().map(|entry| entry.src).collect()
}

/// The sequence rendered by the marquee: every item twice, back to back.
pub fn loop_sequence<T: Clone>(items: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len() * 2);
    out.extend_from_slice(items);
    out.extend_from_slice(items);
    out
}

pub fn memory_alt(rendered_index: usize, distinct: usize) -> String {
    format!("Valentine memory {}", rendered_index % distinct.max(1) + 1)
}

/// Tracks which distinct sources have finished loading, successfully or not.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadGate {
    expected: HashSet<String>,
    loaded: HashSet<String>,
}

impl LoadGate {
    pub fn new<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            expected: sources.into_iter().map(Into::into).collect(),
            loaded: HashSet::new(),
        }
    }

    /// Returns true only the first time a known source reports.
    pub fn mark_loaded(&mut self, src: &str) -> bool {
        if !self.expected.contains(src) || self.loaded.contains(src) {
            return false;
        }
        self.loaded.insert(src.to_string())
    }

    pub fn is_revealed(&self) -> bool {
        self.loaded.len() == self.expected.len()
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn expected_count(&self) -> usize {
        self.expected.len()
    }
}
