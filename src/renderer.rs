use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use glam::Mat4;
use log::{debug, info, warn};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::camera::CameraPose;
use crate::geometry::MeshGeometry;
use crate::panel::{PanelStats, ParameterPanel};
use crate::params::{ParamChange, ParamSnapshot};
use crate::scene::{SceneRegistry, Shading};
use crate::shading::{ResolvedUniforms, SmokeMaterial};
use crate::traits::RenderDelegate;
use crate::types::{CameraUniform, LightData, LightsUniform, ModelUniform, SmokeUniform, Vertex, MAX_LIGHTS};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const INITIAL_DRAW_CAPACITY: usize = 64;

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

struct DrawCall {
    mesh_id: u64,
    model_slot: u32,
    smoke_slot: Option<u32>,
}

/// Growable uniform buffer addressed by dynamic offset, one slot per draw
struct DynamicUniforms {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    stride: u64,
    capacity: usize,
    label: &'static str,
    item_size: u64,
}

impl DynamicUniforms {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &'static str,
        item_size: u64,
        capacity: usize,
    ) -> Self {
        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let stride = item_size.div_ceil(alignment) * alignment;
        let (buffer, bind_group) = Self::allocate(device, layout, label, item_size, stride, capacity);
        Self {
            buffer,
            bind_group,
            stride,
            capacity,
            label,
            item_size,
        }
    }

    fn allocate(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &'static str,
        item_size: u64,
        stride: u64,
        capacity: usize,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(item_size),
                }),
            }],
        });
        (buffer, bind_group)
    }

    /// Uploads `items` packed at `stride`, growing the buffer first if needed
    fn upload<T: bytemuck::Pod>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        items: &[T],
    ) {
        if items.is_empty() {
            return;
        }
        if items.len() > self.capacity {
            let capacity = items.len().next_power_of_two();
            debug!("Growing {} to {} slots", self.label, capacity);
            let (buffer, bind_group) =
                Self::allocate(device, layout, self.label, self.item_size, self.stride, capacity);
            self.buffer = buffer;
            self.bind_group = bind_group;
            self.capacity = capacity;
        }

        let mut bytes = vec![0u8; self.stride as usize * items.len()];
        for (i, item) in items.iter().enumerate() {
            let start = i * self.stride as usize;
            let data = bytemuck::bytes_of(item);
            bytes[start..start + data.len()].copy_from_slice(data);
        }
        queue.write_buffer(&self.buffer, 0, &bytes);
    }

    fn offset(&self, slot: u32) -> u32 {
        (slot as u64 * self.stride) as u32
    }
}

/// wgpu render delegate: lit opaque pass, translucent smoke pass, then the panel
pub struct SceneRenderer {
    window: Arc<Window>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    frame_bind_group: wgpu::BindGroup,
    camera_buffer: wgpu::Buffer,
    lights_buffer: wgpu::Buffer,
    model_layout: wgpu::BindGroupLayout,
    smoke_layout: wgpu::BindGroupLayout,
    models: DynamicUniforms,
    smokes: DynamicUniforms,
    lit_pipeline: wgpu::RenderPipeline,
    smoke_pipeline: wgpu::RenderPipeline,
    meshes: HashMap<u64, GpuMesh>,
    egui_renderer: egui_wgpu::Renderer,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,
    panel: ParameterPanel,
    show_panel: bool,
    param_changes: Vec<ParamChange>,
}

impl SceneRenderer {
    pub async fn new(window: Arc<Window>, vsync: bool, show_panel: bool) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create surface")?;
        let adapter = Self::request_adapter(&instance, &surface).await?;
        let (device, queue) = Self::request_device(&adapter).await?;

        let surface_config = Self::create_surface_config(&surface, &adapter, size, vsync)?;
        surface.configure(&device, &surface_config);
        let depth_view = Self::create_depth_view(&device, &surface_config);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                eye: [0.0; 3],
                _pad: 0.0,
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let lights_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lights Buffer"),
            contents: bytemuck::cast_slice(&[LightsUniform::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT, false),
                uniform_entry(1, wgpu::ShaderStages::FRAGMENT, false),
            ],
            label: Some("frame_bind_group_layout"),
        });
        let model_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT, true)],
            label: Some("model_bind_group_layout"),
        });
        let smoke_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT, true)],
            label: Some("smoke_bind_group_layout"),
        });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lights_buffer.as_entire_binding(),
                },
            ],
            label: Some("frame_bind_group"),
        });

        let models = DynamicUniforms::new(
            &device,
            &model_layout,
            "Model Uniforms",
            std::mem::size_of::<ModelUniform>() as u64,
            INITIAL_DRAW_CAPACITY,
        );
        let smokes = DynamicUniforms::new(
            &device,
            &smoke_layout,
            "Smoke Uniforms",
            std::mem::size_of::<SmokeUniform>() as u64,
            INITIAL_DRAW_CAPACITY,
        );

        let lit_pipeline = Self::create_lit_pipeline(&device, &frame_layout, &model_layout, surface_config.format);
        let smoke_pipeline = Self::create_smoke_pipeline(
            &device,
            &frame_layout,
            &model_layout,
            &smoke_layout,
            surface_config.format,
        );

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &device,
            surface_config.format,
            egui_wgpu::RendererOptions::default(),
        );

        info!(
            "Renderer initialized: {}x{} {:?}",
            surface_config.width, surface_config.height, surface_config.format
        );

        Ok(Self {
            window,
            device,
            queue,
            surface,
            surface_config,
            depth_view,
            frame_bind_group,
            camera_buffer,
            lights_buffer,
            model_layout,
            smoke_layout,
            models,
            smokes,
            lit_pipeline,
            smoke_pipeline,
            meshes: HashMap::new(),
            egui_renderer,
            egui_state,
            egui_ctx,
            panel: ParameterPanel::default(),
            show_panel,
            param_changes: Vec::new(),
        })
    }

    async fn request_adapter(instance: &wgpu::Instance, surface: &wgpu::Surface<'_>) -> Result<wgpu::Adapter> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| anyhow!("Failed to find appropriate adapter: {e}"))
    }

    async fn request_device(adapter: &wgpu::Adapter) -> Result<(wgpu::Device, wgpu::Queue)> {
        adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("Failed to create device")
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        size: winit::dpi::PhysicalSize<u32>,
        vsync: bool,
    ) -> Result<wgpu::SurfaceConfiguration> {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("Surface reports no formats")?;

        let present_mode = if vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        })
    }

    fn create_depth_view(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_lit_pipeline(
        device: &wgpu::Device,
        frame_layout: &wgpu::BindGroupLayout,
        model_layout: &wgpu::BindGroupLayout,
        format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Lit Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/lit.wgsl").into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Lit Pipeline Layout"),
            bind_group_layouts: &[frame_layout, model_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Lit Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    fn create_smoke_pipeline(
        device: &wgpu::Device,
        frame_layout: &wgpu::BindGroupLayout,
        model_layout: &wgpu::BindGroupLayout,
        smoke_layout: &wgpu::BindGroupLayout,
        format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        let state = SmokeMaterial::STATE;
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Smoke Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/smoke.wgsl").into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Smoke Pipeline Layout"),
            bind_group_layouts: &[frame_layout, model_layout, smoke_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Smoke Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(if state.alpha_blend {
                        wgpu::BlendState::ALPHA_BLENDING
                    } else {
                        wgpu::BlendState::REPLACE
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: if state.double_sided { None } else { Some(wgpu::Face::Back) },
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: state.depth_write,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_view = Self::create_depth_view(&self.device, &self.surface_config);
        debug!("Resized to {}x{}", width, height);
    }

    /// Returns true when the panel consumed the event
    pub fn handle_event(&mut self, event: &winit::event::WindowEvent) -> bool {
        self.show_panel && self.egui_state.on_window_event(&self.window, event).consumed
    }

    /// Values and stats the panel shows on the next frame
    pub fn set_panel_state(&mut self, values: ParamSnapshot, stats: PanelStats) {
        self.panel.set_state(values, stats);
    }

    /// Edits made in the panel since the last call
    pub fn take_param_changes(&mut self) -> Vec<ParamChange> {
        std::mem::take(&mut self.param_changes)
    }

    fn aspect(&self) -> f32 {
        self.surface_config.width as f32 / self.surface_config.height.max(1) as f32
    }

    fn ensure_mesh(&mut self, geometry: &MeshGeometry) {
        if self.meshes.contains_key(&geometry.id()) {
            return;
        }
        let vertex_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(geometry.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(geometry.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });
        debug!(
            "Uploaded mesh {} ({} triangles)",
            geometry.id(),
            geometry.triangle_count()
        );
        self.meshes.insert(
            geometry.id(),
            GpuMesh {
                vertex_buffer,
                index_buffer,
                index_count: geometry.indices().len() as u32,
            },
        );
    }

    fn upload_lights(&self, scene: &SceneRegistry) {
        let mut uniform = LightsUniform::default();
        for (slot, entry) in uniform.lights.iter_mut().zip(scene.lights()) {
            *slot = LightData {
                position: entry.light.position.to_array(),
                intensity: entry.light.intensity,
                color: entry.light.color,
                range: entry.light.range,
            };
        }
        uniform.count = scene.lights().len().min(MAX_LIGHTS) as u32;
        if scene.lights().len() > MAX_LIGHTS {
            debug!("{} lights in scene, only {} uploaded", scene.lights().len(), MAX_LIGHTS);
        }
        self.queue.write_buffer(&self.lights_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Builds the opaque and translucent draw lists and uploads their per-draw uniforms
    fn prepare_draws(&mut self, scene: &SceneRegistry) -> (Vec<DrawCall>, Vec<DrawCall>) {
        let mut model_data = Vec::new();
        let mut smoke_data = Vec::new();
        let mut opaque = Vec::new();
        let mut translucent = Vec::new();

        for object in scene.drawables() {
            let smoke_slot = match &object.shading {
                Shading::Standard => None,
                Shading::Smoke(uniforms) => {
                    let missing = uniforms.missing();
                    if !missing.is_empty() {
                        debug!("'{}' drawn with default {:?}", object.name, missing);
                    }
                    let resolved: ResolvedUniforms = uniforms.resolve();
                    smoke_data.push(resolved.to_gpu());
                    Some(smoke_data.len() as u32 - 1)
                }
            };

            let object_matrix = object.transform.matrix();
            for surface in &object.surfaces {
                self.ensure_mesh(&surface.geometry);

                let model = object_matrix * surface.local;
                model_data.push(ModelUniform {
                    model: model.to_cols_array_2d(),
                    normal_matrix: model.inverse().transpose().to_cols_array_2d(),
                    color: surface.material.base_color,
                });
                let draw = DrawCall {
                    mesh_id: surface.geometry.id(),
                    model_slot: model_data.len() as u32 - 1,
                    smoke_slot,
                };
                if smoke_slot.is_some() {
                    translucent.push(draw);
                } else {
                    opaque.push(draw);
                }
            }
        }

        self.models.upload(&self.device, &self.queue, &self.model_layout, &model_data);
        self.smokes.upload(&self.device, &self.queue, &self.smoke_layout, &smoke_data);
        (opaque, translucent)
    }

    fn run_panel(&mut self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let raw_input = self.egui_state.take_egui_input(&self.window);
        let panel = &mut self.panel;
        let mut changes = Vec::new();
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            changes = panel.show(ctx);
        });
        self.param_changes.extend(changes);

        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, self.egui_ctx.pixels_per_point());
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        self.egui_renderer
            .update_buffers(&self.device, &self.queue, encoder, &tris, &screen_descriptor);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.egui_renderer
                .render(&mut render_pass.forget_lifetime(), &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

impl RenderDelegate for SceneRenderer {
    fn render(&mut self, scene: &SceneRegistry, camera: &CameraPose) -> Result<()> {
        let camera_uniform = camera.to_uniform(self.aspect());
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[camera_uniform]));
        self.upload_lights(scene);
        let (opaque, translucent) = self.prepare_draws(scene);

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                return Ok(());
            }
            Err(e) => return Err(anyhow!("Failed to acquire frame: {e}")),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Encoder"),
            });

        {
            let [r, g, b] = scene.clear_color;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, &self.frame_bind_group, &[]);

            render_pass.set_pipeline(&self.lit_pipeline);
            for draw in &opaque {
                let Some(mesh) = self.meshes.get(&draw.mesh_id) else {
                    continue;
                };
                render_pass.set_bind_group(1, &self.models.bind_group, &[self.models.offset(draw.model_slot)]);
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }

            render_pass.set_pipeline(&self.smoke_pipeline);
            for draw in &translucent {
                let (Some(mesh), Some(smoke_slot)) = (self.meshes.get(&draw.mesh_id), draw.smoke_slot) else {
                    continue;
                };
                render_pass.set_bind_group(1, &self.models.bind_group, &[self.models.offset(draw.model_slot)]);
                render_pass.set_bind_group(2, &self.smokes.bind_group, &[self.smokes.offset(smoke_slot)]);
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        if self.show_panel {
            self.run_panel(&mut encoder, &view);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages, dynamic: bool) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: dynamic,
            min_binding_size: None,
        },
        count: None,
    }
}
