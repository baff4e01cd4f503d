//! The two triangles and their colors

use glam::Vec3;

use super::vertex::Vertex;

/// An immutable triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub name: &'static str,
    /// Three xyz vertices, counterclockwise
    pub vertices: [f32; 9],
    /// Index into [`PALETTE`]
    pub color_index: usize,
}

impl Shape {
    pub fn positions(&self) -> [Vec3; 3] {
        let v = &self.vertices;
        [
            Vec3::new(v[0], v[1], v[2]),
            Vec3::new(v[3], v[4], v[5]),
            Vec3::new(v[6], v[7], v[8]),
        ]
    }

    /// GPU vertices for this shape
    pub fn to_vertices(&self) -> [Vertex; 3] {
        self.positions().map(|p| Vertex::new(p.x, p.y, p.z))
    }
}

/// Everything that gets drawn, in draw order
pub const SHAPES: [Shape; 2] = [
    Shape {
        name: "outer",
        vertices: [
            0.0, 0.622008459, 0.0, // top
            -0.5, -0.311004243, 0.0, // bottom left
            0.5, -0.311004243, 0.0, // bottom right
        ],
        color_index: 0,
    },
    Shape {
        name: "inner",
        vertices: [
            -0.1, 0.05, 0.0, // top left
            0.1, 0.05, 0.0, // top right
            0.0, -0.1, 0.0, // bottom
        ],
        color_index: 1,
    },
];

/// Base colors (RGBA)
pub const PALETTE: [[f32; 4]; 2] = [
    [0.636_718_75, 0.769_531_25, 0.222_656_25, 1.0], // Android green
    [0.95, 0.45, 0.15, 1.0],                           // Orange hub
];

/// Angular velocity at which the tint reaches full brightness
pub const TINT_FULL_VELOCITY: f32 = 2.0;
/// Brightness at rest when tinting is enabled
const TINT_MIN_BRIGHTNESS: f32 = 0.5;

/// Color for a shape spinning at `velocity`
///
/// With `tint` off the velocity is ignored and the palette color is used.
pub fn shade(color_index: usize, velocity: f32, tint: bool) -> [f32; 4] {
    let [r, g, b, a] = PALETTE[color_index % PALETTE.len()];
    if !tint {
        return [r, g, b, a];
    }

    let t = (velocity / TINT_FULL_VELOCITY).clamp(0.0, 1.0);
    let brightness = TINT_MIN_BRIGHTNESS + (1.0 - TINT_MIN_BRIGHTNESS) * t;
    [r * brightness, g * brightness, b * brightness, a]
}
