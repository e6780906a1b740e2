//! wgpu implementation of [`RenderContext`], shared by the native and web
//! front-ends. Everything is created in `upload`; `draw` only writes uniform
//! buffers and records one render pass.

use sketch_core::shader::{CameraUniforms, LightUniforms, ObjectUniforms};
use sketch_core::{FrameUniforms, RenderContext, SceneResources, SketchError, Viewport};
use wgpu::util::DeviceExt;

pub mod helpers;

use helpers::{create_depth_texture, make_sketch_pipeline, uniform_entry};

struct GpuMesh {
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

struct GpuObject {
    mesh: usize,
    program: usize,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

struct UploadedScene {
    meshes: Vec<GpuMesh>,
    pipelines: Vec<wgpu::RenderPipeline>,
    point_buffers: Vec<wgpu::Buffer>,
    objects: Vec<GpuObject>,
    draw_order: Vec<usize>,
    clear: wgpu::Color,
}

impl UploadedScene {
    fn destroy(self) {
        for mesh in &self.meshes {
            mesh.buffer.destroy();
        }
        for buffer in &self.point_buffers {
            buffer.destroy();
        }
        for obj in &self.objects {
            obj.uniforms.destroy();
        }
    }
}

pub struct GpuContext<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: (wgpu::Texture, wgpu::TextureView),
    camera_buffer: wgpu::Buffer,
    light_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    frame_layout: wgpu::BindGroupLayout,
    object_layout: wgpu::BindGroupLayout,
    points_layout: wgpu::BindGroupLayout,
    scene: Option<UploadedScene>,
    released: bool,
}

fn unavailable(what: &str, err: impl std::fmt::Debug) -> SketchError {
    SketchError::ContextUnavailable(format!("{what}: {err:?}"))
}

impl<'w> GpuContext<'w> {
    /// Acquire adapter, device and surface for `target` at `width`x`height` device pixels.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'w>>,
        width: u32,
        height: u32,
    ) -> Result<Self, SketchError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(target)
            .map_err(|e| unavailable("create_surface", e))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| SketchError::ContextUnavailable("no GPU adapter".into()))?;
        let required_limits = if cfg!(target_arch = "wasm32") {
            wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits())
        } else {
            wgpu::Limits::default()
        };
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits,
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| unavailable("request_device", e))?;
        device.on_uncaptured_error(Box::new(|e| log::error!("wgpu: {e}")));

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| SketchError::ContextUnavailable("surface has no formats".into()))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth = create_depth_texture(&device, config.width, config.height);

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_bgl"),
            entries: &[uniform_entry(0), uniform_entry(1)],
        });
        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bgl"),
            entries: &[uniform_entry(0)],
        });
        let points_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_points_bgl"),
            entries: &[uniform_entry(0), uniform_entry(1)],
        });

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera"),
            size: std::mem::size_of::<CameraUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let light_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lights"),
            size: std::mem::size_of::<LightUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bg"),
            layout: &frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: light_buffer.as_entire_binding(),
                },
            ],
        });

        log::info!(
            "gpu context ready: {:?} {}x{} ({:?})",
            adapter.get_info().backend,
            config.width,
            config.height,
            format
        );
        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth,
            camera_buffer,
            light_buffer,
            frame_bind_group,
            frame_layout,
            object_layout,
            points_layout,
            scene: None,
            released: false,
        })
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.depth = create_depth_texture(&self.device, self.config.width, self.config.height);
    }
}

impl RenderContext for GpuContext<'_> {
    fn upload(&mut self, resources: &SceneResources) -> Result<(), SketchError> {
        if self.released {
            return Err(SketchError::AfterUnload {
                operation: "upload",
            });
        }
        if let Some(old) = self.scene.take() {
            old.destroy();
        }

        let meshes = resources
            .meshes
            .iter()
            .enumerate()
            .map(|(i, mesh)| GpuMesh {
                buffer: self
                    .device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some(&format!("mesh_{i}")),
                        contents: &mesh.bytes,
                        usage: wgpu::BufferUsages::VERTEX,
                    }),
                vertex_count: mesh.vertex_count,
            })
            .collect();

        // one points buffer per program that declares points, indexed by program
        let mut point_buffers = Vec::new();
        let mut point_slots = Vec::with_capacity(resources.programs.len());
        let mut pipelines = Vec::with_capacity(resources.programs.len());
        for program in &resources.programs {
            let object_layout = match program.points() {
                Some(points) => {
                    let buffer =
                        self.device
                            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                                label: Some("points"),
                                contents: bytemuck::cast_slice(points),
                                usage: wgpu::BufferUsages::UNIFORM,
                            });
                    point_slots.push(Some(point_buffers.len()));
                    point_buffers.push(buffer);
                    &self.points_layout
                }
                None => {
                    point_slots.push(None);
                    &self.object_layout
                }
            };
            let layout = self
                .device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some(program.label()),
                    bind_group_layouts: &[&self.frame_layout, object_layout],
                    push_constant_ranges: &[],
                });
            pipelines.push(make_sketch_pipeline(
                &self.device,
                &layout,
                program,
                self.config.format,
            ));
        }

        let mut objects = Vec::with_capacity(resources.objects.len());
        for binding in &resources.objects {
            let uniforms = self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("object_uniforms"),
                size: std::mem::size_of::<ObjectUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let points = point_slots
                .get(binding.program)
                .copied()
                .flatten()
                .map(|slot| &point_buffers[slot]);
            let bind_group = match points {
                Some(points) => self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("object_points_bg"),
                    layout: &self.points_layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: uniforms.as_entire_binding(),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: points.as_entire_binding(),
                        },
                    ],
                }),
                None => self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("object_bg"),
                    layout: &self.object_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniforms.as_entire_binding(),
                    }],
                }),
            };
            objects.push(GpuObject {
                mesh: binding.mesh,
                program: binding.program,
                uniforms,
                bind_group,
            });
        }

        let [r, g, b] = resources.clear_color;
        log::debug!(
            "uploaded {} meshes, {} pipelines, {} objects",
            resources.meshes.len(),
            pipelines.len(),
            objects.len()
        );
        self.scene = Some(UploadedScene {
            meshes,
            pipelines,
            point_buffers,
            objects,
            draw_order: resources.draw_order.clone(),
            clear: wgpu::Color {
                r: f64::from(r),
                g: f64::from(g),
                b: f64::from(b),
                a: 1.0,
            },
        });
        Ok(())
    }

    fn resize(&mut self, viewport: &Viewport) {
        let (width, height) = viewport.physical_size();
        if (width, height) == (self.config.width, self.config.height) || self.released {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
    }

    fn draw(&mut self, frame: &FrameUniforms<'_>) -> Result<(), SketchError> {
        if self.scene.is_none() {
            return Err(SketchError::Gpu("draw before upload".into()));
        }

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost; reconfiguring and skipping frame");
                self.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timeout; skipping frame");
                return Ok(());
            }
            Err(e) => return Err(SketchError::Gpu(format!("{e:?}"))),
        };
        let Some(scene) = self.scene.as_ref() else {
            return Err(SketchError::Gpu("draw before upload".into()));
        };
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(frame.camera));
        self.queue
            .write_buffer(&self.light_buffer, 0, bytemuck::bytes_of(frame.lights));
        for (obj, uniforms) in scene.objects.iter().zip(frame.objects) {
            self.queue
                .write_buffer(&obj.uniforms, 0, bytemuck::bytes_of(uniforms));
        }

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("sketch_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sketch_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(scene.clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.1,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.frame_bind_group, &[]);
            for obj in scene.draw_order.iter().filter_map(|&i| scene.objects.get(i)) {
                let mesh = &scene.meshes[obj.mesh];
                rpass.set_pipeline(&scene.pipelines[obj.program]);
                rpass.set_bind_group(1, &obj.bind_group, &[]);
                rpass.set_vertex_buffer(0, mesh.buffer.slice(..));
                rpass.draw(0..mesh.vertex_count, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        if let Some(scene) = self.scene.take() {
            scene.destroy();
        }
        self.camera_buffer.destroy();
        self.light_buffer.destroy();
        self.depth.0.destroy();
        self.released = true;
        log::info!("gpu resources released");
    }
}
