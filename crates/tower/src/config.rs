use std::ops::RangeInclusive;

// ---------------------------------------------------------------------------
// Form controls (slider ranges exposed by the controls panel)
// ---------------------------------------------------------------------------

pub const FLOORS_RANGE: RangeInclusive<u32> = 10..=60;
pub const FLOOR_HEIGHT_RANGE: RangeInclusive<f32> = 2.5..=6.0;
pub const TAPER_RANGE: RangeInclusive<f32> = 0.0..=0.6;
pub const TWIST_RANGE: RangeInclusive<f32> = 0.0..=360.0;
pub const FIN_COUNT_RANGE: RangeInclusive<u32> = 0..=12;
pub const FIN_DEPTH_RANGE: RangeInclusive<f32> = 0.2..=2.2;
pub const ROTATION_SPEED_RANGE: RangeInclusive<f32> = 0.0..=2.0;
pub const SEED_RANGE: RangeInclusive<u32> = 1..=999;
/// Upper bound for preset footprint dimensions (width, depth, core radius).
pub const MAX_FOOTPRINT: f32 = 60.0;

// ---------------------------------------------------------------------------
// Floor geometry
// ---------------------------------------------------------------------------

/// Slab thickness as a fraction of the floor height.
pub const SLAB_HEIGHT_RATIO: f32 = 0.16;
/// Extra width/depth of a slab beyond the facade it carries.
pub const SLAB_MARGIN: f32 = 0.4;
/// Depth shrinks slightly faster than width toward the top.
pub const DEPTH_TAPER_FACTOR: f32 = 1.15;

pub const CORE_TOP_RATIO: f32 = 0.75;
pub const CORE_HEIGHT_RATIO: f32 = 0.86;
/// The core turns slower than the floors around it.
pub const CORE_TWIST_RATIO: f32 = 0.65;
pub const CORE_SEGMENTS: u32 = 16;

// ---------------------------------------------------------------------------
// Crown and fins
// ---------------------------------------------------------------------------

pub const CROWN_HEIGHT_RATIO: f32 = 0.12;
pub const CROWN_RADIUS_RATIO: f32 = 0.22;
pub const CROWN_LIFT_RATIO: f32 = 0.2;
pub const CROWN_SEGMENTS: u32 = 5;

pub const FIN_RING_RATIO: f32 = 0.65;
pub const FIN_DEPTH_RING_RATIO: f32 = 1.4;
pub const FIN_HEIGHT_RATIO: f32 = 1.02;
pub const FIN_THICKNESS: f32 = 0.6;

/// The whole tower sits slightly above the ground grid.
pub const ROOT_LIFT: f32 = 0.01;

// ---------------------------------------------------------------------------
// Window lighting
// ---------------------------------------------------------------------------

/// Scale applied to a facade's height before hashing it with the seed.
pub const WINDOW_HASH_HEIGHT_SCALE: f64 = 0.13;
pub const WINDOW_HASH_SCALE: f64 = 10000.0;

pub const WINDOW_HUE_BASE: f32 = 0.12;
pub const WINDOW_HUE_SPAN: f32 = 0.08;
pub const WINDOW_SATURATION: f32 = 0.8;
pub const WINDOW_LIGHTNESS_BASE: f32 = 0.6;
pub const WINDOW_LIGHTNESS_SPAN: f32 = 0.2;
pub const WINDOW_INTENSITY_BASE: f32 = 0.7;
pub const WINDOW_INTENSITY_SPAN: f32 = 0.5;

// ---------------------------------------------------------------------------
// Walk mode
// ---------------------------------------------------------------------------

/// Minimum time between two accepted lights-on toggles.
pub const LIGHTS_TOGGLE_DEBOUNCE_SECS: f64 = 0.5;
/// Window light planes sit this far outside the facade glass.
pub const LIGHT_PLANE_OFFSET: f32 = 0.05;
/// Light planes cover this fraction of the facade face.
pub const LIGHT_PLANE_COVERAGE: f32 = 0.8;

pub const PROP_COUNT: usize = 24;
pub const PROP_RING_INNER: f32 = 30.0;
pub const PROP_RING_OUTER: f32 = 110.0;
pub const PALM_TRUNK_MIN: f32 = 15.0;
pub const PALM_TRUNK_MAX: f32 = 30.0;

// ---------------------------------------------------------------------------
// Ground
// ---------------------------------------------------------------------------

pub const GROUND_RADIUS: f32 = 140.0;
pub const GROUND_SEGMENTS: u32 = 80;
pub const GRID_SIZE: f32 = 280.0;
pub const GRID_DIVISIONS: u32 = 80;

/// Environment variable naming a JSON parameter preset to load at startup.
pub const PARAMS_ENV_VAR: &str = "SKYLINE_PARAMS";
