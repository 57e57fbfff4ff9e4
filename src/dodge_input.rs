use js_sys::{Date, Math};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use valentine_core::{DodgeInput, Point, Rect};
use web_sys::{DomRect, Element, TouchEvent};
use yew::NodeRef;

pub(crate) fn rect_from_dom(rect: &DomRect) -> Rect {
    Rect::new(rect.left(), rect.top(), rect.right(), rect.bottom())
}

pub(crate) fn viewport_size() -> Option<(f64, f64)> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width, height))
}

pub(crate) fn first_touch(event: &TouchEvent) -> Option<Point> {
    let touch = event.touches().item(0)?;
    Some(Point::new(touch.client_x() as f64, touch.client_y() as f64))
}

/// Geometry for one trigger, or `None` while the avoid button is unmounted.
pub(crate) fn measure(avoid: &NodeRef, affirm: &NodeRef, touch: Option<Point>) -> Option<DodgeInput> {
    let avoid = avoid.cast::<Element>()?;
    let button = avoid.get_bounding_client_rect();
    let (viewport_width, viewport_height) = viewport_size()?;
    let affirm_box = affirm
        .cast::<Element>()
        .map(|element| rect_from_dom(&element.get_bounding_client_rect()));
    Some(DodgeInput {
        viewport_width,
        viewport_height,
        button_width: button.width(),
        button_height: button.height(),
        affirm_box,
        touch,
    })
}

fn splitmix64(mut value: u64) -> u64 {
    value = value.wrapping_add(0x9e37_79b9_7f4a_7c15);
    value = (value ^ (value >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    value = (value ^ (value >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    value ^ (value >> 31)
}

pub(crate) fn session_rng() -> SmallRng {
    let now = Date::now() as u64;
    let jitter = (Math::random() * u32::MAX as f64) as u64;
    SmallRng::seed_from_u64(splitmix64(now ^ jitter.rotate_left(32)))
}
