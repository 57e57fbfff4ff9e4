pub mod dodge;
pub mod gallery;
pub mod natural;
pub mod prompt;
pub mod session;

pub use dodge::{
    candidate_regions, place_avoid_button, place_avoid_button_with, placeable_bounds, DodgeInput,
    DodgeParams, Point, Rect, Region,
};
pub use gallery::{GalleryEntry, LoadGate, CAROUSEL_SPEED_SECONDS, GALLERY, HERO_SRC};
pub use natural::natural_cmp;
pub use session::{Session, SessionAction, Stage};
