//! Scene composition.
//!
//! [`SceneComposer`] runs once during setup and splits its output in two:
//! [`SceneResources`] (vertex data and programs, uploaded once and never
//! touched again) and [`Scene`] (transforms, colors and clock values, the only
//! things the per-frame path is allowed to change).

use glam::{Mat4, Quat, Vec3};
use smallvec::SmallVec;

use crate::attributes::ExplodeAttributes;
use crate::camera::Camera;
use crate::error::{Result, SketchError};
use crate::geometry::{Geometry, LineSegments};
use crate::shader::{
    LightUniforms, LineVertex, MeshVertex, ObjectUniforms, ShaderProgram, ShaderVariant,
    VertexLayout,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Rotate about the local X axis.
    pub fn rotate_x(&mut self, angle: f32) {
        self.rotation = (self.rotation * Quat::from_rotation_x(angle)).normalize();
    }

    /// Rotate about the local Y axis.
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotation = (self.rotation * Quat::from_rotation_y(angle)).normalize();
    }

    pub fn set_rotation_y(&mut self, angle: f32) {
        self.rotation = Quat::from_rotation_y(angle);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    Ambient {
        color: Vec3,
        intensity: f32,
    },
    /// Shines from `position` towards the origin.
    Directional {
        color: Vec3,
        intensity: f32,
        position: Vec3,
    },
}

/// Fold lights into the single ambient + single directional slot of the shader.
/// Ambient lights add up; the last directional light wins.
pub fn light_uniforms(lights: &[Light]) -> LightUniforms {
    let mut ambient = Vec3::ZERO;
    let mut directional = (Vec3::ZERO, Vec3::Y);
    for light in lights {
        match *light {
            Light::Ambient { color, intensity } => ambient += color * intensity,
            Light::Directional {
                color,
                intensity,
                position,
            } => directional = (color * intensity, position.normalize_or_zero()),
        }
    }
    LightUniforms {
        ambient: ambient.extend(1.0).to_array(),
        directional_color: directional.0.extend(1.0).to_array(),
        directional_direction: directional.1.extend(0.0).to_array(),
    }
}

/// Vertex bytes for one uploaded mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshData {
    pub layout: VertexLayout,
    pub bytes: Vec<u8>,
    pub vertex_count: u32,
}

/// Which mesh and program an object draws with (indices into [`SceneResources`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObjectBinding {
    pub mesh: usize,
    pub program: usize,
}

/// Everything the render context uploads once during setup.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneResources {
    pub meshes: Vec<MeshData>,
    pub programs: Vec<ShaderProgram>,
    /// Indexed like [`Scene::objects`].
    pub objects: Vec<ObjectBinding>,
    /// Object indices in the order they are drawn.
    pub draw_order: Vec<usize>,
    pub clear_color: [f32; 3],
}

/// Handle to an object, stable for the lifetime of the scene it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub transform: Transform,
    pub color: Vec3,
    pub time: f32,
}

/// Mutable per-frame state.
#[derive(Clone, Debug)]
pub struct Scene {
    pub camera: Camera,
    /// Parent transform of every object.
    pub root: Transform,
    pub lights: LightUniforms,
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// `None` for an id minted by another composer.
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.0)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Push the clock value into every program's `time` uniform.
    pub fn set_time(&mut self, time: f32) {
        for obj in &mut self.objects {
            obj.time = time;
        }
    }

    /// Fill a preallocated slice (one entry per object) with this frame's uniforms.
    pub fn write_uniforms(&self, out: &mut [ObjectUniforms]) {
        debug_assert_eq!(out.len(), self.objects.len());
        let root = self.root.matrix();
        for (dst, obj) in out.iter_mut().zip(&self.objects) {
            let model = root * obj.transform.matrix();
            *dst = ObjectUniforms {
                model: model.to_cols_array_2d(),
                normal_matrix: model.inverse().transpose().to_cols_array_2d(),
                color: obj.color.to_array(),
                time: obj.time,
            };
        }
    }
}

/// One-shot builder for a [`Scene`] and its [`SceneResources`].
#[derive(Default)]
pub struct SceneComposer {
    meshes: Vec<MeshData>,
    programs: Vec<ShaderProgram>,
    variants: Vec<ShaderVariant>,
    bindings: Vec<ObjectBinding>,
    objects: Vec<SceneObject>,
    lights: SmallVec<[Light; 4]>,
    clear_color: [f32; 3],
    draw_key: Option<fn(&SceneObject) -> f32>,
}

impl SceneComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add geometry animated by the explode program. The attribute arrays must
    /// cover every vertex.
    pub fn add_procedural(
        &mut self,
        geometry: &Geometry,
        attributes: &ExplodeAttributes,
        color: Vec3,
    ) -> Result<ObjectId> {
        let vertices = attributes.interleave(geometry)?;
        let mesh = self.push_mesh(
            VertexLayout::Explode,
            bytemuck::cast_slice(&vertices).to_vec(),
            geometry.vertex_count(),
        );
        let program = self.program_for(ShaderVariant::Explode)?;
        Ok(self.push_object(mesh, program, color))
    }

    /// Add geometry drawn with a variant that needs no generated attributes.
    pub fn add_mesh(
        &mut self,
        geometry: &Geometry,
        variant: ShaderVariant,
        color: Vec3,
    ) -> Result<ObjectId> {
        match variant.vertex_layout() {
            VertexLayout::Mesh => {}
            VertexLayout::Explode => {
                return Err(SketchError::AttributeLengthMismatch {
                    attribute: "randDirection",
                    expected: geometry.vertex_count(),
                    actual: 0,
                })
            }
            VertexLayout::Line => {
                return Err(SketchError::WrongPrimitive {
                    program: "lines",
                    primitive: "triangles",
                })
            }
        }
        let vertices: Vec<MeshVertex> = geometry
            .positions()
            .iter()
            .zip(geometry.normals())
            .map(|(p, n)| MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect();
        let mesh = self.push_mesh(
            VertexLayout::Mesh,
            bytemuck::cast_slice(&vertices).to_vec(),
            geometry.vertex_count(),
        );
        let program = self.program_for(variant)?;
        Ok(self.push_object(mesh, program, color))
    }

    /// Add a line list drawn unlit in `color`.
    pub fn add_lines(&mut self, lines: &LineSegments, color: Vec3) -> Result<ObjectId> {
        let vertices: Vec<LineVertex> = lines
            .positions()
            .iter()
            .map(|p| LineVertex {
                position: p.to_array(),
            })
            .collect();
        let mesh = self.push_mesh(
            VertexLayout::Line,
            bytemuck::cast_slice(&vertices).to_vec(),
            lines.vertex_count(),
        );
        let program = self.program_for(ShaderVariant::Line)?;
        Ok(self.push_object(mesh, program, color))
    }

    /// Another object sharing the mesh and program of `source`.
    pub fn add_instance(&mut self, source: ObjectId, color: Vec3) -> Result<ObjectId> {
        let binding = *self
            .bindings
            .get(source.0)
            .ok_or(SketchError::UnknownObject { index: source.0 })?;
        Ok(self.push_object(binding.mesh, binding.program, color))
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn set_clear_color(&mut self, rgb: [f32; 3]) {
        self.clear_color = rgb;
    }

    pub fn transform_mut(&mut self, id: ObjectId) -> Result<&mut Transform> {
        self.objects
            .get_mut(id.0)
            .map(|o| &mut o.transform)
            .ok_or(SketchError::UnknownObject { index: id.0 })
    }

    /// Draw objects in ascending `key` order, evaluated on their state at
    /// [`finish`](Self::finish). Ties keep insertion order. Ids are unaffected.
    pub fn sort_objects_by(&mut self, key: fn(&SceneObject) -> f32) {
        self.draw_key = Some(key);
    }

    pub fn finish(self, camera: Camera) -> (Scene, SceneResources) {
        log::debug!(
            "composed scene: {} objects, {} meshes, {} programs, {} lights",
            self.objects.len(),
            self.meshes.len(),
            self.programs.len(),
            self.lights.len()
        );
        let mut draw_order: Vec<usize> = (0..self.objects.len()).collect();
        if let Some(key) = self.draw_key {
            let objects = &self.objects;
            draw_order.sort_by(|&a, &b| key(&objects[a]).total_cmp(&key(&objects[b])));
        }
        let scene = Scene {
            camera,
            root: Transform::default(),
            lights: light_uniforms(&self.lights),
            objects: self.objects,
        };
        let resources = SceneResources {
            meshes: self.meshes,
            programs: self.programs,
            objects: self.bindings,
            draw_order,
            clear_color: self.clear_color,
        };
        (scene, resources)
    }

    fn push_mesh(&mut self, layout: VertexLayout, bytes: Vec<u8>, vertex_count: usize) -> usize {
        self.meshes.push(MeshData {
            layout,
            bytes,
            vertex_count: vertex_count as u32,
        });
        self.meshes.len() - 1
    }

    // Identical variants share one program.
    fn program_for(&mut self, variant: ShaderVariant) -> Result<usize> {
        if let Some(i) = self.variants.iter().position(|v| *v == variant) {
            return Ok(i);
        }
        let program = ShaderProgram::build(&variant)?;
        self.programs.push(program);
        self.variants.push(variant);
        Ok(self.programs.len() - 1)
    }

    fn push_object(&mut self, mesh: usize, program: usize, color: Vec3) -> ObjectId {
        self.bindings.push(ObjectBinding { mesh, program });
        self.objects.push(SceneObject {
            transform: Transform::default(),
            color,
            time: 0.0,
        });
        ObjectId(self.objects.len() - 1)
    }
}
