use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::assets::DecodedImage;
use crate::error::GridError;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{CellAppearance, FramePlan, WrapMode};

use super::program::{ProgramSource, build_program};
use super::quad::{QuadGeometry, QuadSpec, VERTEX_COUNT};

/// Cells the uniform buffer holds before it has to grow.
const INITIAL_CELL_CAPACITY: usize = 16;

/// Row textures are sampled without decoding so texels reach a unorm surface as stored.
const ROW_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

type SamplerKey = (WrapMode, WrapMode);
type TextureBindingKey = (usize, WrapMode, WrapMode);

// ── uniforms ──────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CellUniform {
    model: [f32; 16],
    tint: [f32; 4],
    uv_scale: [f32; 4],
}

fn cell_ubo_min_binding_size() -> Option<std::num::NonZeroU64> {
    std::num::NonZeroU64::new(std::mem::size_of::<CellUniform>() as u64)
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Draws a 4×4 grid of one shared quad, one 4-vertex strip per cell.
///
/// Per-cell state (model matrix, tint, UV scale) lives in a single uniform
/// buffer addressed with dynamic offsets, so a frame is one buffer write plus
/// sixteen draws. Textured renderers also bind one texture and one sampler per
/// draw; bind groups are cached per `(texture, wrap_s, wrap_t)`.
pub struct GridRenderer {
    geometry: QuadGeometry,
    shader: wgpu::ShaderModule,

    // pipeline
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    cell_bgl: wgpu::BindGroupLayout,
    texture_bgl: Option<wgpu::BindGroupLayout>,

    // per-cell uniforms
    cell_ubo: wgpu::Buffer,
    cell_bind_group: wgpu::BindGroup,
    cell_stride: u64,
    cell_capacity: usize,
    staging: Vec<u8>,

    quad_vbo: wgpu::Buffer,

    // textures
    textures: Vec<wgpu::TextureView>,
    samplers: HashMap<SamplerKey, wgpu::Sampler>,
    texture_bind_groups: HashMap<TextureBindingKey, wgpu::BindGroup>,

    warned_mismatch: bool,
}

impl GridRenderer {
    /// Builds the program and uploads the quad. Failures are fatal.
    pub fn initialize(ctx: &RenderCtx<'_>, spec: &QuadSpec) -> Result<Self, GridError> {
        let geometry = spec.build()?;

        let program = if geometry.is_textured() {
            ProgramSource::TEXTURED
        } else {
            ProgramSource::COLORED
        };
        let shader = build_program(ctx.device, &program)?;

        let align = ctx.device.limits().min_uniform_buffer_offset_alignment as u64;
        if align == 0 || !align.is_power_of_two() {
            return Err(GridError::fatal(format!(
                "unusable uniform offset alignment {align}"
            )));
        }
        let cell_stride = wgpu::util::align_to(std::mem::size_of::<CellUniform>() as u64, align);

        let cell_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("quadgrid cell bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: cell_ubo_min_binding_size(),
                },
                count: None,
            }],
        });

        let texture_bgl = geometry.is_textured().then(|| {
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("quadgrid texture bgl"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            })
        });

        let (cell_ubo, cell_bind_group) =
            create_cell_buffer(ctx, &cell_bgl, cell_stride, INITIAL_CELL_CAPACITY);

        let quad_vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quadgrid quad vbo"),
            contents: geometry.bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });

        log::info!(
            "grid renderer ready ({}, half-extent {}, uniform stride {cell_stride})",
            program.label,
            spec.half_extent
        );

        let mut renderer = Self {
            geometry,
            shader,
            pipeline_format: None,
            pipeline: None,
            cell_bgl,
            texture_bgl,
            cell_ubo,
            cell_bind_group,
            cell_stride,
            cell_capacity: INITIAL_CELL_CAPACITY,
            staging: Vec::new(),
            quad_vbo,
            textures: Vec::new(),
            samplers: HashMap::new(),
            texture_bind_groups: HashMap::new(),
            warned_mismatch: false,
        };
        renderer.ensure_pipeline(ctx);
        Ok(renderer)
    }

    /// Uploads one texture per image, in order. Replaces previous uploads.
    pub fn upload_textures(
        &mut self,
        ctx: &RenderCtx<'_>,
        images: &[DecodedImage],
    ) -> Result<(), GridError> {
        if self.texture_bgl.is_none() {
            return Err(GridError::fatal("textures uploaded to a colored grid renderer"));
        }

        let max_dim = ctx.device.limits().max_texture_dimension_2d;
        let mut views = Vec::with_capacity(images.len());

        for (i, img) in images.iter().enumerate() {
            if img.width == 0 || img.height == 0 || img.width > max_dim || img.height > max_dim {
                return Err(GridError::fatal(format!(
                    "image #{i} is {}x{}; textures must be 1..={max_dim} on each side",
                    img.width, img.height
                )));
            }
            if img.pixels.len() as u64 != img.bytes_per_row() as u64 * img.height as u64 {
                return Err(GridError::fatal(format!("image #{i} has a truncated pixel buffer")));
            }

            let size = wgpu::Extent3d {
                width: img.width,
                height: img.height,
                depth_or_array_layers: 1,
            };
            let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("quadgrid row texture"),
                size,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: ROW_TEXTURE_FORMAT,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });

            ctx.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &img.pixels,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(img.bytes_per_row()),
                    rows_per_image: Some(img.height),
                },
                size,
            );

            views.push(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        }

        log::info!("uploaded {} row textures", views.len());
        self.textures = views;
        self.texture_bind_groups.clear();
        Ok(())
    }

    /// Draws every command in `plan` over `target`. The caller clears.
    ///
    /// Returns the number of draws issued. Commands that do not match the
    /// renderer's vertex format, or name a texture that was never uploaded,
    /// are skipped (one-time debug message).
    pub fn render_frame(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        plan: &FramePlan,
    ) -> usize {
        if plan.draws.is_empty() {
            return 0;
        }

        self.ensure_pipeline(ctx);
        self.ensure_cell_capacity(ctx, plan.draws.len());

        // Resolve texture bindings before the pass borrows `self` immutably.
        let textured = self.geometry.is_textured();
        let mut bindings: Vec<Option<TextureBindingKey>> = Vec::with_capacity(plan.draws.len());
        let mut skip = vec![false; plan.draws.len()];

        for (i, cmd) in plan.draws.iter().enumerate() {
            let key = match (cmd.appearance, textured) {
                (CellAppearance::Tint(_), false) => None,
                (CellAppearance::Texture { slot, wrap }, true) if slot < self.textures.len() => {
                    let (s, t) = wrap.sampler_key();
                    self.ensure_texture_binding(ctx, (slot, s, t));
                    Some((slot, s, t))
                }
                _ => {
                    if !self.warned_mismatch {
                        log::debug!(
                            "GridRenderer: {:?} cannot be drawn by this renderer; skipped",
                            cmd.appearance
                        );
                        self.warned_mismatch = true;
                    }
                    skip[i] = true;
                    None
                }
            };
            bindings.push(key);
        }

        self.write_cell_uniforms(ctx, plan);

        let Some(pipeline) = self.pipeline.as_ref() else { return 0 };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("quadgrid grid pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, self.quad_vbo.slice(..));

        let mut issued = 0;
        for (i, key) in bindings.iter().enumerate() {
            if skip[i] {
                continue;
            }
            if let Some(key) = key {
                let Some(bg) = self.texture_bind_groups.get(key) else { continue };
                rpass.set_bind_group(1, bg, &[]);
            }
            let offset = (i as u64 * self.cell_stride) as u32;
            rpass.set_bind_group(0, &self.cell_bind_group, &[offset]);
            rpass.draw(0..VERTEX_COUNT, 0..1);
            issued += 1;
        }
        issued
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let mut layouts = vec![&self.cell_bgl];
        if let Some(tex) = self.texture_bgl.as_ref() {
            layouts.push(tex);
        }

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("quadgrid pipeline layout"),
            bind_group_layouts: &layouts,
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("quadgrid pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &self.shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[self.geometry.layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &self.shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
    }

    fn ensure_cell_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.cell_capacity {
            return;
        }
        let new_cap = required.next_power_of_two();
        let (ubo, bg) = create_cell_buffer(ctx, &self.cell_bgl, self.cell_stride, new_cap);
        self.cell_ubo = ubo;
        self.cell_bind_group = bg;
        self.cell_capacity = new_cap;
    }

    fn ensure_sampler(&mut self, ctx: &RenderCtx<'_>, key: SamplerKey) {
        if self.samplers.contains_key(&key) {
            return;
        }
        let (s, t) = key;
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("quadgrid row sampler"),
            address_mode_u: s.to_wgpu(),
            address_mode_v: t.to_wgpu(),
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });
        self.samplers.insert(key, sampler);
    }

    fn ensure_texture_binding(&mut self, ctx: &RenderCtx<'_>, key: TextureBindingKey) {
        if self.texture_bind_groups.contains_key(&key) {
            return;
        }
        let (slot, s, t) = key;
        self.ensure_sampler(ctx, (s, t));

        let Some(bgl) = self.texture_bgl.as_ref() else { return };
        let Some(view) = self.textures.get(slot) else { return };
        let Some(sampler) = self.samplers.get(&(s, t)) else { return };

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("quadgrid texture bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        self.texture_bind_groups.insert(key, bind_group);
    }

    fn write_cell_uniforms(&mut self, ctx: &RenderCtx<'_>, plan: &FramePlan) {
        let stride = self.cell_stride as usize;
        self.staging.clear();
        self.staging.resize(stride * plan.draws.len(), 0);

        for (i, cmd) in plan.draws.iter().enumerate() {
            let tint = match cmd.appearance {
                CellAppearance::Tint(c) => c,
                CellAppearance::Texture { .. } => Color::WHITE,
            };
            let [su, sv] = cmd.appearance.uv_scale();
            let u = CellUniform {
                model: cmd.transform.to_cols_array(),
                tint: tint.to_array(),
                uv_scale: [su, sv, 0.0, 0.0],
            };
            let bytes = bytemuck::bytes_of(&u);
            let at = i * stride;
            self.staging[at..at + bytes.len()].copy_from_slice(bytes);
        }

        ctx.queue.write_buffer(&self.cell_ubo, 0, &self.staging);
    }
}

fn create_cell_buffer(
    ctx: &RenderCtx<'_>,
    bgl: &wgpu::BindGroupLayout,
    stride: u64,
    capacity: usize,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("quadgrid cell ubo"),
        size: stride * capacity as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("quadgrid cell bind group"),
        layout: bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &ubo,
                offset: 0,
                size: cell_ubo_min_binding_size(),
            }),
        }],
    });

    (ubo, bind_group)
}
