use std::ops::Range;

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{premul_alpha_blend, ColorVertex};

/// Topology a batch of vertices is drawn with.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Topology {
    Points,
    Lines,
    Triangles,
}

impl Topology {
    const ALL: [Topology; 3] = [Topology::Points, Topology::Lines, Topology::Triangles];

    fn index(self) -> usize {
        match self {
            Topology::Points => 0,
            Topology::Lines => 1,
            Topology::Triangles => 2,
        }
    }

    fn wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            Topology::Points => wgpu::PrimitiveTopology::PointList,
            Topology::Lines => wgpu::PrimitiveTopology::LineList,
            Topology::Triangles => wgpu::PrimitiveTopology::TriangleList,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Topology::Points => "ductus points pipeline",
            Topology::Lines => "ductus lines pipeline",
            Topology::Triangles => "ductus triangles pipeline",
        }
    }
}

/// Consecutive vertices sharing one pipeline.
#[derive(Debug, Clone, PartialEq)]
struct Batch {
    topology: Topology,
    range: Range<u32>,
}

/// Flattens a draw list into one vertex stream plus ordered batches.
///
/// Adjacent commands with the same topology are merged so that paint order is
/// preserved with the fewest pipeline switches.
fn tessellate(draw_list: &DrawList) -> (Vec<ColorVertex>, Vec<Batch>) {
    let mut vertices = Vec::new();
    let mut batches: Vec<Batch> = Vec::new();

    for cmd in draw_list.items() {
        let start = vertices.len() as u32;
        let topology = match cmd {
            DrawCmd::Points(c) => {
                vertices.extend(c.points.iter().map(|&p| ColorVertex::new(p, c.color)));
                Topology::Points
            }
            DrawCmd::Lines(c) => {
                for (a, b) in c.segments() {
                    vertices.push(ColorVertex::new(a, c.color));
                    vertices.push(ColorVertex::new(b, c.color));
                }
                Topology::Lines
            }
            DrawCmd::Fan(c) => {
                for tri in c.triangles() {
                    vertices.extend(tri.iter().map(|&p| ColorVertex::new(p, c.color)));
                }
                Topology::Triangles
            }
        };
        let end = vertices.len() as u32;
        if end == start {
            continue;
        }
        match batches.last_mut() {
            Some(last) if last.topology == topology && last.range.end == start => {
                last.range.end = end;
            }
            _ => batches.push(Batch { topology, range: start..end }),
        }
    }

    (vertices, batches)
}

/// Renders points, lines and triangle fans from a [`DrawList`].
///
/// One pipeline per topology, created lazily for the current surface format.
/// Positions are NDC; colors are linear premultiplied RGBA.
#[derive(Default)]
pub struct PrimitiveRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipelines: [Option<wgpu::RenderPipeline>; 3],

    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,
}

impl PrimitiveRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders every command of `draw_list` into `target`, in recording order.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
    ) {
        let (vertices, batches) = tessellate(draw_list);
        if vertices.is_empty() {
            return;
        }

        self.ensure_pipelines(ctx);
        self.ensure_capacity(ctx, vertices.len());

        let Some(vbo) = self.vbo.as_ref() else { return };
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&vertices));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("ductus primitive pass"),
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

        rpass.set_vertex_buffer(0, vbo.slice(..));

        for batch in &batches {
            let Some(pipeline) = self.pipelines[batch.topology.index()].as_ref() else {
                continue;
            };
            rpass.set_pipeline(pipeline);
            rpass.draw(batch.range.clone(), 0..1);
        }
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format)
            && self.pipelines.iter().all(Option::is_some)
        {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ductus primitive shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/primitive.wgsl").into()),
        });

        let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("ductus primitive pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        for topology in Topology::ALL {
            let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(topology.label()),
                layout: Some(&layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[ColorVertex::layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(premul_alpha_blend()),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: topology.wgpu(),
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
            self.pipelines[topology.index()] = Some(pipeline);
        }

        self.pipeline_format = Some(ctx.surface_format);
    }

    fn ensure_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.vbo_capacity && self.vbo.is_some() {
            return;
        }

        let new_cap = required.next_power_of_two().max(256);
        let new_size = (new_cap * std::mem::size_of::<ColorVertex>()) as u64;

        self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ductus primitive vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vbo_capacity = new_cap;
    }
}
