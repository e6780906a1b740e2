//! Non-indexed triangle geometry, line lists and the built-in geometry sources.
//!
//! Every three consecutive vertices of a [`Geometry`] form one triangle, every
//! two of a [`LineSegments`] one segment. Positions are fixed once built;
//! nothing downstream mutates them.

use fnv::FnvHashMap;
use glam::Vec3;

use crate::error::{Result, SketchError};

#[derive(Clone, Debug)]
pub struct Geometry {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
}

impl Geometry {
    /// Build from a flat triangle list, computing flat per-face normals.
    pub fn new(positions: Vec<Vec3>) -> Result<Self> {
        if positions.len() % 3 != 0 {
            return Err(SketchError::VertexCountNotTriangles {
                vertex_count: positions.len(),
            });
        }
        Ok(Self::from_triangles(positions))
    }

    // Sources whose triangle count is correct by construction skip the check.
    fn from_triangles(positions: Vec<Vec3>) -> Self {
        let normals = flat_normals(&positions);
        Self { positions, normals }
    }

    /// Replace the flat normals with the normalized position of each vertex.
    /// Only meaningful for shapes centred on the origin (spheres, polyhedra).
    pub fn with_radial_normals(mut self) -> Self {
        for (n, p) in self.normals.iter_mut().zip(&self.positions) {
            *n = p.normalize_or_zero();
        }
        self
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.positions
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }
}

/// Independent line segments, two vertices each.
#[derive(Clone, Debug, Default)]
pub struct LineSegments {
    positions: Vec<Vec3>,
}

impl LineSegments {
    pub fn from_segments(segments: impl IntoIterator<Item = [Vec3; 2]>) -> Self {
        Self {
            positions: segments.into_iter().flatten().collect(),
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn segment_count(&self) -> usize {
        self.positions.len() / 2
    }
}

const ICOSAHEDRON_INDICES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

fn icosahedron_corners() -> [Vec3; 12] {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
}

/// Split one face into `(detail + 1)^2` triangles, appending them to `out`.
fn subdivide_face(a: Vec3, b: Vec3, c: Vec3, detail: u32, out: &mut Vec<Vec3>) {
    let cols = detail as usize + 1;
    let mut grid: Vec<Vec<Vec3>> = Vec::with_capacity(cols + 1);
    for i in 0..=cols {
        let t = i as f32 / cols as f32;
        let aj = a.lerp(c, t);
        let bj = b.lerp(c, t);
        let rows = cols - i;
        let row = (0..=rows)
            .map(|j| {
                if j == 0 && i == cols {
                    aj
                } else {
                    aj.lerp(bj, j as f32 / rows as f32)
                }
            })
            .collect();
        grid.push(row);
    }
    for i in 0..cols {
        for j in 0..(2 * (cols - i) - 1) {
            let k = j / 2;
            if j % 2 == 0 {
                out.extend([grid[i][k + 1], grid[i + 1][k], grid[i][k]]);
            } else {
                out.extend([grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]);
            }
        }
    }
}

fn icosahedron_soup(radius: f32, detail: u32) -> Vec<Vec3> {
    let corners = icosahedron_corners();
    let per_face = (detail as usize + 1).pow(2) * 3;
    let mut positions = Vec::with_capacity(ICOSAHEDRON_INDICES.len() * per_face);
    for [a, b, c] in ICOSAHEDRON_INDICES {
        subdivide_face(corners[a], corners[b], corners[c], detail, &mut positions);
    }
    for p in &mut positions {
        *p = p.normalize() * radius;
    }
    positions
}

/// Subdivided icosahedron projected onto a sphere of `radius`.
pub fn icosahedron(radius: f32, detail: u32) -> Geometry {
    Geometry::from_triangles(icosahedron_soup(radius, detail))
}

/// Unique vertices of [`icosahedron`], in first-seen order.
pub fn icosahedron_points(radius: f32, detail: u32) -> Vec<Vec3> {
    // quantize so that shared edge vertices collapse despite float noise
    const QUANT: f32 = 1.0e4;
    let mut seen: FnvHashMap<[i32; 3], ()> = FnvHashMap::default();
    let mut points = Vec::new();
    for p in icosahedron_soup(radius, detail) {
        let key = [
            (p.x * QUANT).round() as i32,
            (p.y * QUANT).round() as i32,
            (p.z * QUANT).round() as i32,
        ];
        if seen.insert(key, ()).is_none() {
            points.push(p);
        }
    }
    points
}

/// Latitude/longitude sphere; pole rows emit a single triangle per quad.
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> Geometry {
    let ws = width_segments.max(3) as usize;
    let hs = height_segments.max(2) as usize;
    let grid: Vec<Vec<Vec3>> = (0..=hs)
        .map(|iy| {
            let v = iy as f32 / hs as f32;
            (0..=ws)
                .map(|ix| {
                    let u = ix as f32 / ws as f32;
                    let phi = u * std::f32::consts::TAU;
                    let theta = v * std::f32::consts::PI;
                    Vec3::new(
                        -radius * phi.cos() * theta.sin(),
                        radius * theta.cos(),
                        radius * phi.sin() * theta.sin(),
                    )
                })
                .collect()
        })
        .collect();

    let mut positions = Vec::with_capacity(ws * (2 * hs - 2) * 3);
    for iy in 0..hs {
        for ix in 0..ws {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];
            if iy != 0 {
                positions.extend([a, b, d]);
            }
            if iy != hs - 1 {
                positions.extend([b, c, d]);
            }
        }
    }
    Geometry::from_triangles(positions).with_radial_normals()
}

/// Axis-aligned box centred on the origin, 12 triangles.
pub fn cuboid(width: f32, height: f32, depth: f32) -> Geometry {
    let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);
    // each quad is wound counter-clockwise seen from outside
    let quads = [
        [
            Vec3::new(hx, -hy, hz),
            Vec3::new(hx, -hy, -hz),
            Vec3::new(hx, hy, -hz),
            Vec3::new(hx, hy, hz),
        ],
        [
            Vec3::new(-hx, -hy, -hz),
            Vec3::new(-hx, -hy, hz),
            Vec3::new(-hx, hy, hz),
            Vec3::new(-hx, hy, -hz),
        ],
        [
            Vec3::new(-hx, hy, hz),
            Vec3::new(hx, hy, hz),
            Vec3::new(hx, hy, -hz),
            Vec3::new(-hx, hy, -hz),
        ],
        [
            Vec3::new(-hx, -hy, -hz),
            Vec3::new(hx, -hy, -hz),
            Vec3::new(hx, -hy, hz),
            Vec3::new(-hx, -hy, hz),
        ],
        [
            Vec3::new(-hx, -hy, hz),
            Vec3::new(hx, -hy, hz),
            Vec3::new(hx, hy, hz),
            Vec3::new(-hx, hy, hz),
        ],
        [
            Vec3::new(hx, -hy, -hz),
            Vec3::new(-hx, -hy, -hz),
            Vec3::new(-hx, hy, -hz),
            Vec3::new(hx, hy, -hz),
        ],
    ];
    let positions = quads
        .iter()
        .flat_map(|[a, b, c, d]| [*a, *b, *c, *a, *c, *d])
        .collect();
    Geometry::from_triangles(positions)
}

/// Unique grid points on the surface of a box centred on the origin, each face
/// split into `segments` x `segments` cells. Ordered by x, then y, then z.
pub fn box_lattice_points(width: f32, height: f32, depth: f32, segments: u32) -> Vec<Vec3> {
    let n = segments.max(1);
    let size = Vec3::new(width, height, depth);
    let mut points = Vec::new();
    for i in 0..=n {
        for j in 0..=n {
            for k in 0..=n {
                let on_surface = [i, j, k].iter().any(|&c| c == 0 || c == n);
                if !on_surface {
                    continue;
                }
                let t = Vec3::new(i as f32, j as f32, k as f32) / n as f32;
                points.push((t - 0.5) * size);
            }
        }
    }
    points
}

fn flat_normals(positions: &[Vec3]) -> Vec<Vec3> {
    positions
        .chunks_exact(3)
        .flat_map(|tri| {
            let n = (tri[1] - tri[0]).cross(tri[2] - tri[0]).normalize_or_zero();
            [n, n, n]
        })
        .collect()
}
