/// Render graph builder.
///
/// Resolves a `DeclarativeGraph` against a `FrameInfo` and an executor
/// lookup, and emits the resulting resources, passes and outputs into a
/// `RenderGraphApi` implementation.
///
/// Two ordered phases: every resource is materialized first, then every
/// pass, then the outputs. Pass references are looked up by expanded name
/// among the resources materialized by this build, so a resource skipped
/// by its condition (or by a zero repeat count) cannot be referenced.
///
/// The builder keeps no state between builds. The first failure aborts the
/// build; calls already issued are not rolled back and the caller is
/// expected to discard the partially declared graph.

use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::{graph_bail, graph_debug, graph_err, graph_trace};
use super::declaration::{
    AttachmentDecl, DeclarativeGraph, PassDecl, ResourceDecl, ResourceKind, ResourceUse,
    UseAccess, ITERATION_TOKEN,
};
use super::executor_registry::ExecutorLookup;
use super::frame_info::FrameInfo;
use super::graph_api::{
    AttachmentDesc, AttachmentRange, BufferDesc, ImageDesc, RenderGraphApi, UseBinding,
};
use super::types::{ImageAccess, Repeat};

const SOURCE: &str = "galaxy3d::GraphBuilder";

/// State of every imported image when the graph starts: external images
/// (the acquired swapchain image in particular) come from the presentation
/// engine
pub const IMPORTED_IMAGE_ACCESS: ImageAccess = ImageAccess::Present;

/// Counters of one build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Images created or imported (one per repeat iteration)
    pub images: u32,
    /// Buffers created (one per repeat iteration)
    pub buffers: u32,
    /// Passes added (one per repeat iteration)
    pub passes: u32,
    /// Resource declarations skipped by their condition
    pub skipped_resources: u32,
    /// Pass declarations skipped by their condition
    pub skipped_passes: u32,
}

/// Replace every `${i}` in `template` by `iteration`
///
/// A template without the token is returned unchanged.
pub fn expand_name(template: &str, iteration: u32) -> String {
    if template.contains(ITERATION_TOKEN) {
        template.replace(ITERATION_TOKEN, &iteration.to_string())
    } else {
        template.to_string()
    }
}

/// Number of instances of a declaration for this frame
fn repeat_count(repeat: &Repeat, frame: &FrameInfo) -> u32 {
    repeat.count_source.map_or(1, |source| frame.resolve_count(source))
}

/// Resources materialized so far, by expanded name
struct Materialized<I, B> {
    images: FxHashMap<String, I>,
    buffers: FxHashMap<String, B>,
}

impl<I: Copy, B: Copy> Materialized<I, B> {
    fn new() -> Self {
        Self {
            images: FxHashMap::default(),
            buffers: FxHashMap::default(),
        }
    }

    fn image(&self, name: &str, path: &str) -> Result<I> {
        self.images.get(name).copied()
            .ok_or_else(|| graph_err!(Semantic, SOURCE, path,
                "image '{}' is not materialized in this build (skipped by its condition or repeat)",
                name))
    }

    fn buffer(&self, name: &str, path: &str) -> Result<B> {
        self.buffers.get(name).copied()
            .ok_or_else(|| graph_err!(Semantic, SOURCE, path,
                "buffer '{}' is not materialized in this build (skipped by its condition or repeat)",
                name))
    }
}

/// Build a declarative graph into `api`
///
/// # Arguments
///
/// * `graph` - Validated declarative graph
/// * `frame` - Frame parameters (sizes, formats, cascade count, editor flag)
/// * `executors` - Lookup of the executors named by the passes
/// * `api` - Execution engine receiving the resolved declarations
///
/// # Errors
///
/// Returns a semantic error when a pass names an unknown executor or
/// references a resource that was not materialized, and forwards any error
/// returned by `api`.
pub fn build<A, L>(
    graph: &DeclarativeGraph,
    frame: &FrameInfo,
    executors: &L,
    api: &mut A,
) -> Result<BuildStats>
where
    A: RenderGraphApi,
    L: ExecutorLookup<A::Executor> + ?Sized,
{
    let mut stats = BuildStats::default();
    let mut materialized = Materialized::new();

    for (index, decl) in graph.resources().iter().enumerate() {
        if !decl.condition.evaluate(frame.editor_enabled) {
            graph_trace!(SOURCE, "Skipping resource '{}' ({:?})", decl.name, decl.condition);
            stats.skipped_resources += 1;
            continue;
        }
        build_resource(decl, index, frame, api, &mut materialized, &mut stats)?;
    }

    for (index, decl) in graph.passes().iter().enumerate() {
        if !decl.condition.evaluate(frame.editor_enabled) {
            graph_trace!(SOURCE, "Skipping pass '{}' ({:?})", decl.name, decl.condition);
            stats.skipped_passes += 1;
            continue;
        }
        build_pass(decl, index, frame, executors, api, &materialized, &mut stats)?;
    }

    let outputs = graph.outputs();
    if let Some(name) = &outputs.present {
        let image = materialized.image(name, "outputs.present")?;
        api.set_present_image(image)?;
    }
    for (i, name) in outputs.export_images.iter().enumerate() {
        let image = materialized.image(name, &format!("outputs.export_images[{}]", i))?;
        api.export_image(image)?;
    }
    for (i, name) in outputs.export_buffers.iter().enumerate() {
        let buffer = materialized.buffer(name, &format!("outputs.export_buffers[{}]", i))?;
        api.export_buffer(buffer)?;
    }

    graph_debug!(SOURCE,
        "Built render graph '{}': {} images, {} buffers, {} passes ({} resources and {} passes skipped)",
        graph.name(), stats.images, stats.buffers, stats.passes,
        stats.skipped_resources, stats.skipped_passes);

    Ok(stats)
}

// ===== RESOURCES =====

fn build_resource<A: RenderGraphApi>(
    decl: &ResourceDecl,
    index: usize,
    frame: &FrameInfo,
    api: &mut A,
    materialized: &mut Materialized<A::Image, A::Buffer>,
    stats: &mut BuildStats,
) -> Result<()> {
    let count = repeat_count(&decl.repeat, frame);

    for i in 0..count {
        let name = expand_name(&decl.name, i);

        match &decl.kind {
            ResourceKind::Image(image) => {
                let layers = frame.resolve_layers(image.layers);
                if layers == 0 {
                    graph_bail!(Semantic, SOURCE, format!("resources[{}].layers_source", index),
                        "image '{}' resolves to 0 layers", name);
                }
                let desc = ImageDesc {
                    extent: frame.resolve_extent(image.extent),
                    layers,
                    format: frame.resolve_format(image.format),
                    usage: image.usage,
                    flags: decl.flags,
                };

                let handle = match &image.import_name {
                    Some(import_name) => {
                        api.import_image(&name, import_name, IMPORTED_IMAGE_ACCESS, &desc)?
                    }
                    None => api.create_image(&name, &desc)?,
                };
                graph_trace!(SOURCE, "Image '{}': {}x{}x{} {:?}",
                    name, desc.extent.x, desc.extent.y, desc.layers, desc.format);

                materialized.images.insert(name, handle);
                stats.images += 1;
            }
            ResourceKind::Buffer(buffer) => {
                let desc = BufferDesc {
                    size: buffer.size,
                    usage: buffer.usage,
                    flags: decl.flags,
                };
                let handle = api.create_buffer(&name, &desc)?;
                graph_trace!(SOURCE, "Buffer '{}': {} bytes", name, desc.size);

                materialized.buffers.insert(name, handle);
                stats.buffers += 1;
            }
        }
    }

    Ok(())
}

// ===== PASSES =====

fn build_pass<A, L>(
    decl: &PassDecl,
    index: usize,
    frame: &FrameInfo,
    executors: &L,
    api: &mut A,
    materialized: &Materialized<A::Image, A::Buffer>,
    stats: &mut BuildStats,
) -> Result<()>
where
    A: RenderGraphApi,
    L: ExecutorLookup<A::Executor> + ?Sized,
{
    let path = format!("passes[{}]", index);
    let count = repeat_count(&decl.repeat, frame);

    for i in 0..count {
        let name = expand_name(&decl.name, i);

        let Some(executor) = executors.find(&decl.execute) else {
            graph_bail!(Semantic, SOURCE, format!("{}.execute", path),
                "no executor registered under '{}' (pass '{}')", decl.execute, name);
        };

        let pass = api.add_pass(decl.pass_type, &name)?;
        api.pass_set_flags(pass, decl.flags)?;
        if let Some(domain) = decl.domain {
            api.pass_set_domain(pass, domain)?;
        }
        api.pass_set_execute(pass, executor)?;

        for (c, color) in decl.attachments.colors.iter().enumerate() {
            let attachment_path = format!("{}.attachments.color[{}]", path, c);
            let image = materialized.image(&expand_name(&color.image, i), &attachment_path)?;
            api.pass_add_color_attachment(pass, image, &attachment_desc(color, i))?;
        }
        if let Some(depth) = &decl.attachments.depth {
            let attachment_path = format!("{}.attachments.depth", path);
            let image = materialized.image(&expand_name(&depth.image, i), &attachment_path)?;
            api.pass_set_depth_attachment(pass, image, &attachment_desc(depth, i), depth.read_only)?;
        }

        for (u, read) in decl.reads.iter().enumerate() {
            let use_path = format!("{}.reads[{}]", path, u);
            emit_use(api, pass, read, i, frame, materialized, &use_path, false)?;
        }
        for (u, write) in decl.writes.iter().enumerate() {
            let use_path = format!("{}.writes[{}]", path, u);
            emit_use(api, pass, write, i, frame, materialized, &use_path, true)?;
        }

        graph_trace!(SOURCE, "Pass '{}' ({:?}) -> executor '{}'", name, decl.pass_type, decl.execute);
        stats.passes += 1;
    }

    Ok(())
}

fn attachment_desc(decl: &AttachmentDecl, iteration: u32) -> AttachmentDesc {
    AttachmentDesc {
        load_op: decl.load_op,
        store_op: decl.store_op,
        clear: decl.clear,
        range: decl.slice.map(|slice| AttachmentRange {
            mip_level: slice.mip_level,
            base_layer: slice.base_layer.resolve(iteration),
            layer_count: slice.layer_count,
        }),
    }
}

/// Emit one resource use, once per instance of its own repeat
///
/// A use without its own repeat is emitted once, indexed by the pass
/// iteration.
#[allow(clippy::too_many_arguments)]
fn emit_use<A: RenderGraphApi>(
    api: &mut A,
    pass: A::Pass,
    decl: &ResourceUse,
    pass_iteration: u32,
    frame: &FrameInfo,
    materialized: &Materialized<A::Image, A::Buffer>,
    path: &str,
    write: bool,
) -> Result<()> {
    let iterations: Vec<u32> = if decl.repeat.is_enabled() {
        (0..repeat_count(&decl.repeat, frame)).collect()
    } else {
        vec![pass_iteration]
    };

    for i in iterations {
        let name = expand_name(&decl.name, i);
        let binding = UseBinding {
            binding: decl.binding.map(|b| b.resolve(i)),
            array_index: decl.array_index.map(|a| a.resolve(i)),
        };

        match decl.access {
            UseAccess::Image(access) => {
                let image = materialized.image(&name, path)?;
                if write {
                    api.pass_write_image(pass, image, access, binding)?;
                } else {
                    api.pass_read_image(pass, image, access, binding)?;
                }
            }
            UseAccess::Buffer(access) => {
                let buffer = materialized.buffer(&name, path)?;
                if write {
                    api.pass_write_buffer(pass, buffer, access, binding)?;
                } else {
                    api.pass_read_buffer(pass, buffer, access, binding)?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
