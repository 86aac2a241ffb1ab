pub mod geometry;
pub mod types;

pub use geometry::{
    TAU, angle_from_point, ease_in_out_sine, lerp, normalize_angle, point_on_circle, polar, rotate,
    smoothstep, to_degrees, to_radians,
};
pub use types::{Point, Viewport};
