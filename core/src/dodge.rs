use rand::Rng;

pub const DODGE_EDGE_PADDING: f64 = 16.0;
pub const AFFIRM_ZONE_PADDING: f64 = 20.0;
pub const TOUCH_OFFSET: f64 = 64.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box in viewport pixels, matching `DOMRect` edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn inflate(&self, padding: f64) -> Self {
        Self::new(
            self.left - padding,
            self.top - padding,
            self.right + padding,
            self.bottom + padding,
        )
    }

    /// Strict overlap; boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

/// Range of allowed top-left corners for the avoid button.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Region {
    fn is_valid(&self) -> bool {
        self.max_x > self.min_x && self.max_y > self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    // Per-axis uniform draw; not uniform over the union of regions.
    fn sample<R: Rng>(&self, rng: &mut R) -> Point {
        let range_x = (self.max_x - self.min_x).max(0.0);
        let range_y = (self.max_y - self.min_y).max(0.0);
        Point::new(
            self.min_x + rng.random::<f64>() * range_x,
            self.min_y + rng.random::<f64>() * range_y,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DodgeParams {
    pub edge_padding: f64,
    pub zone_padding: f64,
    pub touch_offset: f64,
}

impl Default for DodgeParams {
    fn default() -> Self {
        Self {
            edge_padding: DODGE_EDGE_PADDING,
            zone_padding: AFFIRM_ZONE_PADDING,
            touch_offset: TOUCH_OFFSET,
        }
    }
}

/// Measured geometry for one avoidance trigger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DodgeInput {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub button_width: f64,
    pub button_height: f64,
    /// `None` until the affirmative button has been laid out.
    pub affirm_box: Option<Rect>,
    pub touch: Option<Point>,
}

impl DodgeInput {
    fn button_center(&self, origin: Point) -> Point {
        Point::new(
            origin.x + self.button_width * 0.5,
            origin.y + self.button_height * 0.5,
        )
    }
}

/// The full placeable rectangle. Collapses onto the margin instead of going
/// negative when the viewport is smaller than the button.
pub fn placeable_bounds(input: &DodgeInput, params: &DodgeParams) -> Region {
    let margin = params.edge_padding;
    Region {
        min_x: margin,
        max_x: margin.max(input.viewport_width - input.button_width - margin),
        min_y: margin,
        max_y: margin.max(input.viewport_height - input.button_height - margin),
    }
}

pub fn exclusion_zone(input: &DodgeInput, params: &DodgeParams) -> Option<Rect> {
    input
        .affirm_box
        .map(|rect| rect.inflate(params.zone_padding))
}

/// Bands above, below, left and right of the exclusion zone that still fit
/// the whole button, clipped to the placeable rectangle. Collapsed bands are
/// dropped.
pub fn candidate_regions(input: &DodgeInput, params: &DodgeParams) -> Vec<Region> {
    let Some(zone) = exclusion_zone(input, params) else {
        return Vec::new();
    };
    let margin = params.edge_padding;
    let bounds = placeable_bounds(input, params);
    let width = input.button_width;
    let height = input.button_height;

    let mut regions = Vec::with_capacity(4);
    if zone.top - height > margin {
        regions.push(Region {
            min_x: margin,
            max_x: bounds.max_x,
            min_y: margin,
            max_y: (zone.top - height - margin).min(bounds.max_y),
        });
    }
    if zone.bottom + margin < bounds.max_y {
        regions.push(Region {
            min_x: margin,
            max_x: bounds.max_x,
            min_y: (zone.bottom + margin).max(margin),
            max_y: bounds.max_y,
        });
    }
    if zone.left - width > margin {
        regions.push(Region {
            min_x: margin,
            max_x: (zone.left - width - margin).min(bounds.max_x),
            min_y: margin,
            max_y: bounds.max_y,
        });
    }
    if zone.right + margin < bounds.max_x {
        regions.push(Region {
            min_x: (zone.right + margin).max(margin),
            max_x: bounds.max_x,
            min_y: margin,
            max_y: bounds.max_y,
        });
    }
    regions.retain(Region::is_valid);
    regions
}

pub fn place_avoid_button<R: Rng>(input: &DodgeInput, rng: &mut R) -> Point {
    place_avoid_button_with(input, &DodgeParams::default(), rng)
}

pub fn place_avoid_button_with<R: Rng>(
    input: &DodgeInput,
    params: &DodgeParams,
    rng: &mut R,
) -> Point {
    let regions = candidate_regions(input, params);
    if regions.is_empty() {
        return placeable_bounds(input, params).sample(rng);
    }

    let mut point = pick_region(&regions, rng).sample(rng);

    if let Some(touch) = input.touch {
        let center = input.button_center(point);
        let offset = params.touch_offset;
        let near_finger =
            (center.x - touch.x).abs() < offset && (center.y - touch.y).abs() < offset;
        if near_finger && regions.len() > 1 {
            let away: Vec<Region> = regions
                .iter()
                .copied()
                .filter(|region| {
                    let c = region.center();
                    (c.x - touch.x).abs() > offset || (c.y - touch.y).abs() > offset
                })
                .collect();
            let pool = if away.is_empty() { &regions } else { &away };
            point = pick_region(pool, rng).sample(rng);
        }
    }

    point
}

fn pick_region<'a, R: Rng>(regions: &'a [Region], rng: &mut R) -> &'a Region {
    &regions[rng.random_range(0..regions.len())]
}
