/// Tests for the render graph builder
///
/// Graphs are loaded from inline JSON and built into a `RecordedGraph`,
/// which is then inspected.

use super::*;
use glam::UVec2;
use serde_json::{json, Value};
use crate::render_graph::executor_registry::ExecutorRegistry;
use crate::render_graph::recorded_graph::{BufferKey, ImageKey, PassKey, RecordedGraph};
use crate::render_graph::types::{
    BufferAccess, ClearValue, Format, ImageAccess, LoadOp, PassDomain, PassFlags, PassType,
    StoreOp,
};

type Recorded = RecordedGraph<&'static str>;

fn graph(value: Value) -> DeclarativeGraph {
    DeclarativeGraph::from_json_str(&value.to_string()).unwrap()
}

fn executors(names: &[&'static str]) -> ExecutorRegistry<&'static str> {
    let mut registry = ExecutorRegistry::new();
    for &name in names {
        registry.register(name, name).unwrap();
    }
    registry
}

fn build_recorded(
    graph: &DeclarativeGraph,
    frame: &FrameInfo,
    registry: &ExecutorRegistry<&'static str>,
) -> Result<(Recorded, BuildStats)> {
    let mut recorded = Recorded::new();
    let stats = build(graph, frame, registry, &mut recorded)?;
    Ok((recorded, stats))
}

/// Records like `RecordedGraph` and counts output calls
#[derive(Default)]
struct CallCounter {
    recorded: Recorded,
    present_calls: u32,
    import_calls: u32,
}

impl RenderGraphApi for CallCounter {
    type Image = ImageKey;
    type Buffer = BufferKey;
    type Pass = PassKey;
    type Executor = &'static str;

    fn create_image(&mut self, name: &str, desc: &ImageDesc) -> Result<ImageKey> {
        self.recorded.create_image(name, desc)
    }

    fn import_image(
        &mut self,
        name: &str,
        import_name: &str,
        initial_access: ImageAccess,
        desc: &ImageDesc,
    ) -> Result<ImageKey> {
        self.import_calls += 1;
        self.recorded.import_image(name, import_name, initial_access, desc)
    }

    fn create_buffer(&mut self, name: &str, desc: &BufferDesc) -> Result<BufferKey> {
        self.recorded.create_buffer(name, desc)
    }

    fn add_pass(&mut self, pass_type: PassType, name: &str) -> Result<PassKey> {
        self.recorded.add_pass(pass_type, name)
    }

    fn pass_set_flags(&mut self, pass: PassKey, flags: PassFlags) -> Result<()> {
        self.recorded.pass_set_flags(pass, flags)
    }

    fn pass_set_domain(&mut self, pass: PassKey, domain: PassDomain) -> Result<()> {
        self.recorded.pass_set_domain(pass, domain)
    }

    fn pass_set_execute(&mut self, pass: PassKey, executor: &'static str) -> Result<()> {
        self.recorded.pass_set_execute(pass, executor)
    }

    fn pass_add_color_attachment(
        &mut self,
        pass: PassKey,
        image: ImageKey,
        desc: &AttachmentDesc,
    ) -> Result<()> {
        self.recorded.pass_add_color_attachment(pass, image, desc)
    }

    fn pass_set_depth_attachment(
        &mut self,
        pass: PassKey,
        image: ImageKey,
        desc: &AttachmentDesc,
        read_only: bool,
    ) -> Result<()> {
        self.recorded.pass_set_depth_attachment(pass, image, desc, read_only)
    }

    fn pass_read_image(
        &mut self,
        pass: PassKey,
        image: ImageKey,
        access: ImageAccess,
        binding: UseBinding,
    ) -> Result<()> {
        self.recorded.pass_read_image(pass, image, access, binding)
    }

    fn pass_write_image(
        &mut self,
        pass: PassKey,
        image: ImageKey,
        access: ImageAccess,
        binding: UseBinding,
    ) -> Result<()> {
        self.recorded.pass_write_image(pass, image, access, binding)
    }

    fn pass_read_buffer(
        &mut self,
        pass: PassKey,
        buffer: BufferKey,
        access: BufferAccess,
        binding: UseBinding,
    ) -> Result<()> {
        self.recorded.pass_read_buffer(pass, buffer, access, binding)
    }

    fn pass_write_buffer(
        &mut self,
        pass: PassKey,
        buffer: BufferKey,
        access: BufferAccess,
        binding: UseBinding,
    ) -> Result<()> {
        self.recorded.pass_write_buffer(pass, buffer, access, binding)
    }

    fn set_present_image(&mut self, image: ImageKey) -> Result<()> {
        self.present_calls += 1;
        self.recorded.set_present_image(image)
    }

    fn export_image(&mut self, image: ImageKey) -> Result<()> {
        self.recorded.export_image(image)
    }

    fn export_buffer(&mut self, buffer: BufferKey) -> Result<()> {
        self.recorded.export_buffer(buffer)
    }
}

fn clear_graph() -> DeclarativeGraph {
    graph(json!({
        "version": 1,
        "name": "clear",
        "resources": [
            {"name": "Swapchain", "type": "image", "import": "swapchain"}
        ],
        "passes": [
            {
                "name": "clear_pass",
                "type": "graphics",
                "domain": "post",
                "attachments": {
                    "color": [{"image": "Swapchain", "load": "clear", "store": "store",
                               "clear": [0.2, 0.3, 0.4, 1.0]}]
                },
                "execute": "clear"
            }
        ],
        "outputs": {"present": "Swapchain"}
    }))
}

fn shadow_graph() -> DeclarativeGraph {
    graph(json!({
        "version": 1,
        "name": "shadows",
        "resources": [
            {
                "name": "Shadow${i}",
                "type": "image",
                "repeat": {"count_source": "shadow_cascade_count"},
                "extent": {"mode": "square", "size_source": "shadow_map_size"},
                "format": "shadow_depth",
                "usage": ["depth_stencil_attachment", "sampled"]
            },
            {
                "name": "Lighting",
                "type": "image",
                "extent": {"mode": "viewport"},
                "format": "R16_SFLOAT",
                "usage": ["color_attachment"]
            }
        ],
        "passes": [
            {
                "name": "shadow_${i}",
                "type": "graphics",
                "domain": "shadow",
                "repeat": {"count_source": "shadow_cascade_count"},
                "attachments": {
                    "depth": {"image": "Shadow${i}", "load": "clear", "store": "store", "clear": 1.0}
                },
                "execute": "shadow"
            },
            {
                "name": "lighting",
                "type": "graphics",
                "domain": "world",
                "reads": [
                    {"image": "Shadow${i}", "access": "sampled",
                     "repeat": {"count_source": "shadow_cascade_count"},
                     "binding": 3, "array_index": "${i}"}
                ],
                "attachments": {
                    "color": [{"image": "Lighting", "load": "dont_care", "store": "store"}]
                },
                "execute": "lighting"
            }
        ]
    }))
}

// ============================================================================
// Tests: Name expansion
// ============================================================================

#[test]
fn test_expand_name() {
    assert_eq!(expand_name("Shadow${i}", 2), "Shadow2");
    assert_eq!(expand_name("cascade_${i}_layer_${i}", 3), "cascade_3_layer_3");
    assert_eq!(expand_name("Depth", 7), "Depth");
    assert_eq!(expand_name("${i}", 10), "10");
}

// ============================================================================
// Tests: End to end
// ============================================================================

#[test]
fn test_build_swapchain_clear_pass() {
    let frame = FrameInfo {
        window_size: UVec2::new(1920, 1080),
        swapchain_format: Format::B8G8R8A8_UNORM,
        ..FrameInfo::default()
    };
    let (recorded, stats) = build_recorded(&clear_graph(), &frame, &executors(&["clear"])).unwrap();

    assert_eq!(stats, BuildStats { images: 1, buffers: 0, passes: 1, skipped_resources: 0, skipped_passes: 0 });

    let swapchain = recorded.image_by_name("Swapchain").unwrap();
    assert!(swapchain.is_import());
    assert_eq!(swapchain.initial_access, Some(IMPORTED_IMAGE_ACCESS));
    assert_eq!(swapchain.desc.extent, UVec2::new(1920, 1080));
    assert_eq!(swapchain.desc.format, Format::B8G8R8A8_UNORM);

    let pass = recorded.pass_by_name("clear_pass").unwrap();
    assert_eq!(pass.pass_type, PassType::Graphics);
    assert_eq!(pass.domain, Some(PassDomain::Post));
    assert_eq!(pass.executor, Some("clear"));
    assert_eq!(pass.color_attachments.len(), 1);

    let color = pass.color_attachments[0];
    assert_eq!(Some(color.image), recorded.image_key("Swapchain"));
    assert_eq!(color.desc.load_op, LoadOp::Clear);
    assert_eq!(color.desc.store_op, StoreOp::Store);
    assert_eq!(color.desc.clear, Some(ClearValue::Color([0.2, 0.3, 0.4, 1.0])));
    assert_eq!(color.desc.range, None);

    assert_eq!(recorded.present_image().unwrap().name, "Swapchain");
}

#[test]
fn test_build_swapchain_clear_pass_presents_once() {
    let mut api = CallCounter::default();
    build(&clear_graph(), &FrameInfo::default(), &executors(&["clear"]), &mut api).unwrap();

    assert_eq!(api.import_calls, 1);
    assert_eq!(api.present_calls, 1);
    let pass = api.recorded.pass_by_name("clear_pass").unwrap();
    assert_eq!(Some(pass.color_attachments[0].image), api.recorded.image_key("Swapchain"));
}

#[test]
fn test_build_is_deterministic() {
    let graph = shadow_graph();
    let frame = FrameInfo::default();
    let registry = executors(&["shadow", "lighting"]);

    let (a, stats_a) = build_recorded(&graph, &frame, &registry).unwrap();
    let (b, stats_b) = build_recorded(&graph, &frame, &registry).unwrap();

    assert_eq!(stats_a, stats_b);
    assert_eq!(a.pass_names(), b.pass_names());
    let images_a: Vec<_> = a.images().cloned().collect();
    let images_b: Vec<_> = b.images().cloned().collect();
    assert_eq!(images_a, images_b);
}

// ============================================================================
// Tests: Repeat
// ============================================================================

#[test]
fn test_build_repeats_resources_and_passes() {
    let frame = FrameInfo { shadow_cascade_count: 4, shadow_map_size: 1024, ..FrameInfo::default() };
    let (recorded, stats) =
        build_recorded(&shadow_graph(), &frame, &executors(&["shadow", "lighting"])).unwrap();

    assert_eq!(stats.images, 5);
    assert_eq!(stats.passes, 5);
    assert_eq!(recorded.pass_names(),
        vec!["shadow_0", "shadow_1", "shadow_2", "shadow_3", "lighting"]);

    for i in 0..4 {
        let name = format!("Shadow{}", i);
        let image = recorded.image_by_name(&name).unwrap();
        assert_eq!(image.desc.extent, UVec2::new(1024, 1024));
        assert_eq!(image.desc.format, frame.shadow_depth_format);

        let pass = recorded.pass_by_name(&format!("shadow_{}", i)).unwrap();
        let depth = pass.depth_attachment.unwrap();
        assert_eq!(Some(depth.image), recorded.image_key(&name));
        assert_eq!(depth.desc.clear, Some(ClearValue::DepthStencil { depth: 1.0, stencil: 0 }));
    }
    assert!(recorded.image_by_name("Shadow4").is_none());
}

#[test]
fn test_build_use_with_own_repeat() {
    let frame = FrameInfo { shadow_cascade_count: 3, ..FrameInfo::default() };
    let (recorded, _) =
        build_recorded(&shadow_graph(), &frame, &executors(&["shadow", "lighting"])).unwrap();

    let lighting = recorded.pass_by_name("lighting").unwrap();
    assert_eq!(lighting.image_reads.len(), 3);
    for (i, read) in lighting.image_reads.iter().enumerate() {
        assert_eq!(Some(read.resource), recorded.image_key(&format!("Shadow{}", i)));
        assert_eq!(read.access, ImageAccess::Sampled);
        assert_eq!(read.binding.binding, Some(3));
        assert_eq!(read.binding.array_index, Some(i as u32));
    }
}

#[test]
fn test_build_use_follows_pass_iteration() {
    let graph = graph(json!({
        "version": 1,
        "name": "blur",
        "resources": [
            {"name": "Blur${i}", "type": "image", "repeat": {"count_source": "shadow_cascade_count"},
             "extent": {"mode": "fixed", "width": 64, "height": 64},
             "format": "R8G8B8A8_UNORM", "usage": ["sampled", "color_attachment"]}
        ],
        "passes": [
            {"name": "blur_${i}", "type": "compute",
             "repeat": {"count_source": "shadow_cascade_count"},
             "writes": [{"image": "Blur${i}", "access": "storage_write", "binding": "${i}"}],
             "execute": "blur"}
        ]
    }));
    let frame = FrameInfo { shadow_cascade_count: 2, ..FrameInfo::default() };
    let (recorded, _) = build_recorded(&graph, &frame, &executors(&["blur"])).unwrap();

    for i in 0..2u32 {
        let pass = recorded.pass_by_name(&format!("blur_{}", i)).unwrap();
        assert_eq!(pass.image_writes.len(), 1);
        assert_eq!(Some(pass.image_writes[0].resource), recorded.image_key(&format!("Blur{}", i)));
        assert_eq!(pass.image_writes[0].binding.binding, Some(i));
        assert_eq!(pass.image_writes[0].binding.array_index, None);
    }
}

#[test]
fn test_build_slice_base_layer_follows_iteration() {
    let graph = graph(json!({
        "version": 1,
        "name": "csm",
        "resources": [
            {"name": "ShadowMap", "type": "image",
             "extent": {"mode": "square", "size_source": "shadow_map_size"},
             "layers_source": "shadow_cascade_count",
             "format": "shadow_depth", "usage": ["depth_stencil_attachment", "sampled"]}
        ],
        "passes": [
            {"name": "cascade_${i}", "type": "graphics", "domain": "shadow",
             "repeat": {"count_source": "shadow_cascade_count"},
             "attachments": {"depth": {"image": "ShadowMap", "load": "clear", "store": "store",
                                       "slice": {"base_layer": "${i}"}}},
             "execute": "shadow"}
        ]
    }));
    let frame = FrameInfo { shadow_cascade_count: 4, ..FrameInfo::default() };
    let (recorded, _) = build_recorded(&graph, &frame, &executors(&["shadow"])).unwrap();

    assert_eq!(recorded.image_by_name("ShadowMap").unwrap().desc.layers, 4);
    for i in 0..4u32 {
        let pass = recorded.pass_by_name(&format!("cascade_{}", i)).unwrap();
        let range = pass.depth_attachment.unwrap().desc.range.unwrap();
        assert_eq!(range, AttachmentRange { mip_level: 0, base_layer: i, layer_count: 1 });
    }
}

#[test]
fn test_build_zero_cascades_instantiates_nothing() {
    let frame = FrameInfo { shadow_cascade_count: 0, ..FrameInfo::default() };
    let (recorded, stats) =
        build_recorded(&shadow_graph(), &frame, &executors(&["shadow", "lighting"])).unwrap();

    assert_eq!(stats.images, 1);
    assert_eq!(recorded.pass_names(), vec!["lighting"]);
    assert!(recorded.pass_by_name("lighting").unwrap().image_reads.is_empty());
}

// ============================================================================
// Tests: Conditions
// ============================================================================

fn editor_graph() -> DeclarativeGraph {
    graph(json!({
        "version": 1,
        "name": "editor",
        "resources": [
            {"name": "Swapchain", "type": "image", "import": "swapchain"},
            {"name": "EditorIds", "type": "image", "condition": "editor_enabled",
             "extent": {"mode": "viewport"}, "format": "R32_UINT", "usage": ["color_attachment"]}
        ],
        "passes": [
            {"name": "game_ui", "type": "graphics", "domain": "ui", "condition": "!editor_enabled",
             "attachments": {"color": [{"image": "Swapchain", "load": "load", "store": "store"}]},
             "execute": "ui"},
            {"name": "picking", "type": "graphics", "domain": "world", "condition": "editor_enabled",
             "attachments": {"color": [{"image": "EditorIds", "load": "clear", "store": "store"}]},
             "execute": "picking"}
        ],
        "outputs": {"present": "Swapchain"}
    }))
}

#[test]
fn test_build_condition_editor_disabled() {
    let frame = FrameInfo { editor_enabled: false, ..FrameInfo::default() };
    let (recorded, stats) =
        build_recorded(&editor_graph(), &frame, &executors(&["ui", "picking"])).unwrap();

    assert_eq!(stats.skipped_resources, 1);
    assert_eq!(stats.skipped_passes, 1);
    assert!(recorded.image_by_name("EditorIds").is_none());
    assert_eq!(recorded.pass_names(), vec!["game_ui"]);
}

#[test]
fn test_build_condition_editor_enabled() {
    let frame = FrameInfo {
        editor_enabled: true,
        viewport_size: UVec2::new(1000, 700),
        ..FrameInfo::default()
    };
    let (recorded, stats) =
        build_recorded(&editor_graph(), &frame, &executors(&["ui", "picking"])).unwrap();

    assert_eq!(stats.skipped_resources, 0);
    assert_eq!(stats.skipped_passes, 1);
    assert_eq!(recorded.image_by_name("EditorIds").unwrap().desc.extent, UVec2::new(1000, 700));
    assert_eq!(recorded.pass_names(), vec!["picking"]);
}

#[test]
fn test_build_reference_to_skipped_resource_fails() {
    let graph = graph(json!({
        "version": 1,
        "name": "broken",
        "resources": [
            {"name": "EditorIds", "type": "image", "condition": "editor_enabled",
             "extent": {"mode": "viewport"}, "format": "R32_UINT", "usage": ["sampled"]}
        ],
        "passes": [
            {"name": "resolve", "type": "compute",
             "reads": [{"image": "EditorIds", "access": "sampled"}],
             "execute": "resolve"}
        ]
    }));
    let frame = FrameInfo { editor_enabled: false, ..FrameInfo::default() };
    let err = build_recorded(&graph, &frame, &executors(&["resolve"])).unwrap_err();

    assert!(err.is_semantic());
    assert_eq!(err.path(), "passes[0].reads[0]");
    assert!(err.reason().contains("EditorIds"));
}

#[test]
fn test_build_present_of_skipped_resource_fails() {
    let graph = graph(json!({
        "version": 1,
        "name": "broken",
        "resources": [
            {"name": "Preview", "type": "image", "condition": "editor_enabled",
             "extent": {"mode": "window"}, "format": "swapchain", "usage": ["color_attachment"]}
        ],
        "outputs": {"present": "Preview"}
    }));
    let err = build_recorded(&graph, &FrameInfo::default(), &executors(&[])).unwrap_err();

    assert!(err.is_semantic());
    assert_eq!(err.path(), "outputs.present");
}

// ============================================================================
// Tests: Resolution
// ============================================================================

#[test]
fn test_build_resolves_extents_and_formats() {
    let graph = graph(json!({
        "version": 1,
        "name": "extents",
        "resources": [
            {"name": "A", "type": "image", "extent": {"mode": "window"},
             "format": "swapchain", "usage": ["sampled"]},
            {"name": "B", "type": "image", "extent": {"mode": "viewport"},
             "format": "swapchain_depth", "usage": ["depth_stencil_attachment"]},
            {"name": "C", "type": "image", "extent": {"mode": "fixed", "width": 512, "height": 256},
             "layers": 6, "format": "R8G8B8A8_SRGB", "usage": ["sampled"], "flags": ["persistent"]},
            {"name": "D", "type": "buffer", "size": 1024, "usage": ["storage"], "flags": ["transient"]}
        ]
    }));
    let frame = FrameInfo {
        window_size: UVec2::new(1600, 900),
        viewport_size: UVec2::new(1200, 700),
        swapchain_format: Format::B8G8R8A8_SRGB,
        swapchain_depth_format: Format::D24_UNORM_S8_UINT,
        ..FrameInfo::default()
    };
    let (recorded, stats) = build_recorded(&graph, &frame, &executors(&[])).unwrap();

    assert_eq!(stats.images, 3);
    assert_eq!(stats.buffers, 1);

    let a = recorded.image_by_name("A").unwrap().desc;
    assert_eq!((a.extent, a.format, a.layers), (UVec2::new(1600, 900), Format::B8G8R8A8_SRGB, 1));

    let b = recorded.image_by_name("B").unwrap().desc;
    assert_eq!((b.extent, b.format), (UVec2::new(1200, 700), Format::D24_UNORM_S8_UINT));

    let c = recorded.image_by_name("C").unwrap().desc;
    assert_eq!((c.extent, c.format, c.layers), (UVec2::new(512, 256), Format::R8G8B8A8_SRGB, 6));
    assert_eq!(c.flags, crate::render_graph::types::ResourceFlags::PERSISTENT);

    let d = recorded.buffer_by_name("D").unwrap().desc;
    assert_eq!(d.size, 1024);
    assert_eq!(d.flags, crate::render_graph::types::ResourceFlags::TRANSIENT);
}

#[test]
fn test_build_resize_changes_window_extent_only() {
    let graph = clear_graph();
    let registry = executors(&["clear"]);
    let small = FrameInfo { window_size: UVec2::new(800, 600), ..FrameInfo::default() };
    let large = FrameInfo { window_size: UVec2::new(2560, 1440), ..FrameInfo::default() };

    let (a, _) = build_recorded(&graph, &small, &registry).unwrap();
    let (b, _) = build_recorded(&graph, &large, &registry).unwrap();

    assert_eq!(a.image_by_name("Swapchain").unwrap().desc.extent, UVec2::new(800, 600));
    assert_eq!(b.image_by_name("Swapchain").unwrap().desc.extent, UVec2::new(2560, 1440));
}

#[test]
fn test_build_layers_source_with_zero_cascades_fails() {
    let graph = graph(json!({
        "version": 1,
        "name": "csm",
        "resources": [
            {"name": "ShadowMap", "type": "image",
             "extent": {"mode": "square", "size_source": "shadow_map_size"},
             "layers_source": "shadow_cascade_count",
             "format": "shadow_depth", "usage": ["depth_stencil_attachment"]}
        ]
    }));
    let frame = FrameInfo { shadow_cascade_count: 0, ..FrameInfo::default() };
    let err = build_recorded(&graph, &frame, &executors(&[])).unwrap_err();

    assert!(err.is_semantic());
    assert_eq!(err.path(), "resources[0].layers_source");
}

// ============================================================================
// Tests: Executors, uses and outputs
// ============================================================================

#[test]
fn test_build_missing_executor_fails() {
    let err = build_recorded(&clear_graph(), &FrameInfo::default(), &executors(&["other"]))
        .unwrap_err();

    assert!(err.is_semantic());
    assert_eq!(err.path(), "passes[0].execute");
    assert!(err.reason().contains("clear"));
}

#[test]
fn test_build_compute_pass_with_attachment() {
    let graph = graph(json!({
        "version": 1,
        "name": "resolve",
        "resources": [
            {"name": "Swapchain", "type": "image", "import": "swapchain"}
        ],
        "passes": [{
            "name": "resolve",
            "type": "compute",
            "attachments": {"color": [{"image": "Swapchain", "load": "load", "store": "store"}]},
            "execute": "resolve"
        }]
    }));
    let (recorded, _) = build_recorded(&graph, &FrameInfo::default(), &executors(&["resolve"])).unwrap();

    let pass = recorded.pass_by_name("resolve").unwrap();
    assert_eq!(pass.pass_type, PassType::Compute);
    assert_eq!(pass.domain, None);
    assert_eq!(Some(pass.color_attachments[0].image), recorded.image_key("Swapchain"));
}

#[test]
fn test_build_with_closure_lookup() {
    let lookup = |name: &str| if name == "clear" { Some("from_closure") } else { None };
    let mut recorded = Recorded::new();
    build(&clear_graph(), &FrameInfo::default(), &lookup, &mut recorded).unwrap();

    assert_eq!(recorded.pass_by_name("clear_pass").unwrap().executor, Some("from_closure"));
}

#[test]
fn test_build_buffer_uses_and_exports() {
    let graph = graph(json!({
        "version": 1,
        "name": "culling",
        "resources": [
            {"name": "Depth", "type": "image", "extent": {"mode": "window"},
             "format": "D32_SFLOAT", "usage": ["depth_stencil_attachment", "sampled"]},
            {"name": "Instances", "type": "buffer", "size": 65536, "usage": ["storage"]},
            {"name": "DrawArgs", "type": "buffer", "size": 4096, "usage": ["storage", "indirect"]}
        ],
        "passes": [
            {"name": "cull", "type": "compute",
             "reads": [
                 {"buffer": "Instances", "access": "storage_read", "binding": 0},
                 {"image": "Depth", "access": "sampled", "binding": 1}
             ],
             "writes": [{"buffer": "DrawArgs", "access": "storage_write", "binding": 2}],
             "execute": "cull"}
        ],
        "outputs": {"export_images": ["Depth"], "export_buffers": ["DrawArgs"]}
    }));
    let (recorded, _) = build_recorded(&graph, &FrameInfo::default(), &executors(&["cull"])).unwrap();

    let pass = recorded.pass_by_name("cull").unwrap();
    assert_eq!(pass.domain, None);
    assert_eq!(pass.buffer_reads.len(), 1);
    assert_eq!(pass.buffer_reads[0].access, BufferAccess::StorageRead);
    assert_eq!(pass.buffer_reads[0].binding.binding, Some(0));
    assert_eq!(pass.image_reads.len(), 1);
    assert_eq!(pass.buffer_writes.len(), 1);
    assert_eq!(Some(pass.buffer_writes[0].resource), recorded.buffer_key("DrawArgs"));

    assert_eq!(recorded.exported_images().len(), 1);
    assert_eq!(Some(recorded.exported_buffers()[0]), recorded.buffer_key("DrawArgs"));
    assert!(recorded.present_image().is_none());
}
