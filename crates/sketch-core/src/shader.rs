//! Shader programs and the uniform/attribute ABI they share with the host.
//!
//! Field order and sizes of the `#[repr(C)]` types below must match the WGSL
//! structs in `shaders/common.wgsl` and the vertex inputs of each program.

use glam::Vec3;

use crate::error::{Result, SketchError};
use crate::{COMMON_WGSL, EXPLODE_WGSL, LINES_WGSL, MESH_WGSL, PROXIMITY_WGSL};

/// `Camera` in WGSL, group 0 binding 0.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub position: [f32; 4],
}

/// `Lights` in WGSL, group 0 binding 1. Colors are premultiplied by intensity.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniforms {
    pub ambient: [f32; 4],
    pub directional_color: [f32; 4],
    pub directional_direction: [f32; 4],
}

/// `Material` in WGSL, group 1 binding 0. Holds the `color` and `time` uniforms.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub color: [f32; 3],
    pub time: f32,
}

/// Vertex stream of the explode program: `position`, `randDirection`, `randStrength`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ExplodeVertex {
    pub position: [f32; 3],
    pub rand_direction: [f32; 3],
    pub rand_strength: f32,
}

/// Vertex stream of the normal and lambert programs.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Vertex stream of the line program.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
}

/// One named per-vertex input: shader location, byte offset and float count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    pub name: &'static str,
    pub location: u32,
    pub offset: u64,
    pub components: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VertexLayout {
    Explode,
    Mesh,
    Line,
}

/// How the vertex stream is assembled.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Every three vertices form a triangle.
    Triangles,
    /// Every two vertices form a segment.
    Lines,
}

const EXPLODE_ATTRIBUTES: [VertexAttribute; 3] = [
    VertexAttribute {
        name: "position",
        location: 0,
        offset: 0,
        components: 3,
    },
    VertexAttribute {
        name: "randDirection",
        location: 1,
        offset: 12,
        components: 3,
    },
    VertexAttribute {
        name: "randStrength",
        location: 2,
        offset: 24,
        components: 1,
    },
];

const MESH_ATTRIBUTES: [VertexAttribute; 2] = [
    VertexAttribute {
        name: "position",
        location: 0,
        offset: 0,
        components: 3,
    },
    VertexAttribute {
        name: "normal",
        location: 1,
        offset: 12,
        components: 3,
    },
];

const LINE_ATTRIBUTES: [VertexAttribute; 1] = [VertexAttribute {
    name: "position",
    location: 0,
    offset: 0,
    components: 3,
}];

impl VertexLayout {
    pub fn stride(self) -> u64 {
        match self {
            VertexLayout::Explode => std::mem::size_of::<ExplodeVertex>() as u64,
            VertexLayout::Mesh => std::mem::size_of::<MeshVertex>() as u64,
            VertexLayout::Line => std::mem::size_of::<LineVertex>() as u64,
        }
    }

    pub fn attributes(self) -> &'static [VertexAttribute] {
        match self {
            VertexLayout::Explode => &EXPLODE_ATTRIBUTES,
            VertexLayout::Mesh => &MESH_ATTRIBUTES,
            VertexLayout::Line => &LINE_ATTRIBUTES,
        }
    }

    pub fn primitive(self) -> Primitive {
        match self {
            VertexLayout::Line => Primitive::Lines,
            _ => Primitive::Triangles,
        }
    }
}

/// Which program a renderable object is drawn with.
#[derive(Clone, Debug, PartialEq)]
pub enum ShaderVariant {
    /// Per-triangle explosion driven by `randDirection`/`randStrength`.
    Explode,
    /// Nearest-point mask; the point count becomes a compile-time constant.
    ProximityMask { points: Vec<Vec3> },
    /// View-space normal coloring.
    Normal,
    /// Ambient + directional diffuse.
    Lambert,
    /// Unlit segments in the object color.
    Line,
}

impl ShaderVariant {
    pub fn vertex_layout(&self) -> VertexLayout {
        match self {
            ShaderVariant::Explode => VertexLayout::Explode,
            ShaderVariant::Line => VertexLayout::Line,
            _ => VertexLayout::Mesh,
        }
    }

    pub fn primitive(&self) -> Primitive {
        self.vertex_layout().primitive()
    }
}

/// A built program: final WGSL text plus everything the backend needs to
/// create a pipeline for it.
#[derive(Clone, Debug, PartialEq)]
pub struct ShaderProgram {
    label: &'static str,
    source: String,
    layout: VertexLayout,
    fragment_entry: &'static str,
    points: Option<Vec<[f32; 4]>>,
}

impl ShaderProgram {
    pub const VERTEX_ENTRY: &'static str = "vs_main";

    pub fn build(variant: &ShaderVariant) -> Result<Self> {
        let (label, body, fragment_entry, points) = match variant {
            ShaderVariant::Explode => ("explode", EXPLODE_WGSL.to_owned(), "fs_main", None),
            ShaderVariant::ProximityMask { points } => {
                if points.is_empty() {
                    // WGSL arrays need at least one element
                    return Err(SketchError::PointCountMismatch {
                        expected: 1,
                        actual: 0,
                    });
                }
                let body = PROXIMITY_WGSL.replace("{{POINT_COUNT}}", &points.len().to_string());
                let packed = points.iter().map(|p| p.extend(0.0).to_array()).collect();
                ("proximity", body, "fs_main", Some(packed))
            }
            ShaderVariant::Normal => ("mesh_normal", MESH_WGSL.to_owned(), "fs_normal", None),
            ShaderVariant::Lambert => ("mesh_lambert", MESH_WGSL.to_owned(), "fs_lambert", None),
            ShaderVariant::Line => ("lines", LINES_WGSL.to_owned(), "fs_main", None),
        };
        Ok(Self {
            label,
            source: format!("{COMMON_WGSL}\n{body}"),
            layout: variant.vertex_layout(),
            fragment_entry,
            points,
        })
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn vertex_layout(&self) -> VertexLayout {
        self.layout
    }

    pub fn primitive(&self) -> Primitive {
        self.layout.primitive()
    }

    pub fn fragment_entry(&self) -> &'static str {
        self.fragment_entry
    }

    /// Reference points padded to `vec4` for the uniform array stride.
    pub fn points(&self) -> Option<&[[f32; 4]]> {
        self.points.as_deref()
    }

    /// `POINT_COUNT` the program was compiled with.
    pub fn point_count(&self) -> Option<usize> {
        self.points.as_ref().map(Vec::len)
    }

    /// A program only accepts point sets of the size it was compiled for.
    pub fn validate_points(&self, count: usize) -> Result<()> {
        match self.point_count() {
            Some(expected) if expected != count => Err(SketchError::PointCountMismatch {
                expected,
                actual: count,
            }),
            None if count != 0 => Err(SketchError::PointCountMismatch {
                expected: 0,
                actual: count,
            }),
            _ => Ok(()),
        }
    }
}
