//! Core of the shader sketches: procedural per-triangle attributes, the
//! explode, proximity-mask and line programs, scene composition and the
//! setup/resize/render/unload lifecycle. Nothing here touches a GPU; the
//! renderer is reached only through [`RenderContext`].

pub mod attributes;
pub mod camera;
pub mod constants;
pub mod context;
pub mod error;
pub mod geometry;
pub mod input;
pub mod lifecycle;
pub mod playback;
pub mod scene;
pub mod shader;
pub mod sketches;
pub mod stages;

pub static COMMON_WGSL: &str = include_str!("../shaders/common.wgsl");
pub static EXPLODE_WGSL: &str = include_str!("../shaders/explode.wgsl");
pub static PROXIMITY_WGSL: &str = include_str!("../shaders/proximity.wgsl");
pub static MESH_WGSL: &str = include_str!("../shaders/mesh.wgsl");
pub static LINES_WGSL: &str = include_str!("../shaders/lines.wgsl");

pub use attributes::ExplodeAttributes;
pub use camera::{Camera, Projection, Viewport};
pub use context::{FrameUniforms, RenderContext};
pub use error::{Result, SketchError};
pub use geometry::{Geometry, LineSegments};
pub use input::{InputEvent, InputState};
pub use lifecycle::{LifecycleState, Sketch, SketchProgram};
pub use playback::{ContextKind, FramePacer, FrameState, Playback, Settings};
pub use scene::{Light, ObjectId, Scene, SceneComposer, SceneObject, SceneResources, Transform};
pub use shader::{Primitive, ShaderProgram, ShaderVariant, VertexLayout};
pub use sketches::SketchKind;
