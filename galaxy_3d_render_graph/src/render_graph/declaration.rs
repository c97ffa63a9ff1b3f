/// Declarative graph: the parsed, file-independent form of a render graph.
///
/// Produced once by the loader and read-only afterwards. A single
/// `DeclarativeGraph` can be built any number of times against different
/// `FrameInfo`s (resize, editor toggle, cascade count change) without
/// touching the JSON again.

use rustc_hash::FxHashMap;
use super::types::{
    BufferAccess, BufferUsage, ClearValue, Condition, Extent, FormatSource, ImageAccess,
    Index, Layers, LoadOp, PassDomain, PassFlags, PassType, Repeat, ResourceFlags,
    ResourceType, StoreOp, TextureUsage,
};

/// Only supported file version
pub const GRAPH_VERSION: u32 = 1;

/// Token substituted by the repeat iteration index in names
pub const ITERATION_TOKEN: &str = "${i}";

// ===== RESOURCES =====

/// Image-specific part of a resource declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDecl {
    /// Name of the external image when imported (e.g. "swapchain")
    pub import_name: Option<String>,
    pub extent: Extent,
    pub layers: Layers,
    pub format: FormatSource,
    pub usage: TextureUsage,
}

impl ImageDecl {
    pub fn is_import(&self) -> bool {
        self.import_name.is_some()
    }
}

/// Buffer-specific part of a resource declaration
#[derive(Debug, Clone, PartialEq)]
pub struct BufferDecl {
    /// Size in bytes (> 0)
    pub size: u64,
    pub usage: BufferUsage,
}

/// Type-specific body of a resource declaration
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceKind {
    Image(ImageDecl),
    Buffer(BufferDecl),
}

/// One entry of the `resources` array
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDecl {
    /// Name template, may contain `${i}`
    pub name: String,
    pub condition: Condition,
    pub repeat: Repeat,
    pub flags: ResourceFlags,
    pub kind: ResourceKind,
}

impl ResourceDecl {
    pub fn resource_type(&self) -> ResourceType {
        match self.kind {
            ResourceKind::Image(_) => ResourceType::Image,
            ResourceKind::Buffer(_) => ResourceType::Buffer,
        }
    }

    pub fn image(&self) -> Option<&ImageDecl> {
        match &self.kind {
            ResourceKind::Image(image) => Some(image),
            ResourceKind::Buffer(_) => None,
        }
    }

    pub fn buffer(&self) -> Option<&BufferDecl> {
        match &self.kind {
            ResourceKind::Buffer(buffer) => Some(buffer),
            ResourceKind::Image(_) => None,
        }
    }
}

// ===== PASSES =====

/// Access of a resource use, typed by resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseAccess {
    Image(ImageAccess),
    Buffer(BufferAccess),
}

/// One entry of a pass `reads` / `writes` array
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceUse {
    /// Referenced resource name template
    pub name: String,
    pub access: UseAccess,
    /// Own repeat of the use (independent of the pass repeat)
    pub repeat: Repeat,
    pub binding: Option<Index>,
    pub array_index: Option<Index>,
}

impl ResourceUse {
    pub fn is_image(&self) -> bool {
        matches!(self.access, UseAccess::Image(_))
    }
}

/// Sub-resource range bound by an attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentSlice {
    pub mip_level: u32,
    pub base_layer: Index,
    pub layer_count: u32,
}

impl Default for AttachmentSlice {
    fn default() -> Self {
        Self {
            mip_level: 0,
            base_layer: Index::Literal(0),
            layer_count: 1,
        }
    }
}

/// Color or depth attachment of a graphics pass
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentDecl {
    /// Referenced image name template
    pub image: String,
    pub load_op: LoadOp,
    pub store_op: StoreOp,
    pub clear: Option<ClearValue>,
    /// Depth attachments only
    pub read_only: bool,
    pub slice: Option<AttachmentSlice>,
}

/// Attachments of a graphics pass
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attachments {
    pub colors: Vec<AttachmentDecl>,
    pub depth: Option<AttachmentDecl>,
}

impl Attachments {
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.depth.is_none()
    }
}

/// One entry of the `passes` array
#[derive(Debug, Clone, PartialEq)]
pub struct PassDecl {
    /// Name template, may contain `${i}`
    pub name: String,
    pub pass_type: PassType,
    pub flags: PassFlags,
    pub condition: Condition,
    pub repeat: Repeat,
    /// Set iff `pass_type` is Graphics
    pub domain: Option<PassDomain>,
    pub reads: Vec<ResourceUse>,
    pub writes: Vec<ResourceUse>,
    pub attachments: Attachments,
    /// Executor name, looked up at build time
    pub execute: String,
}

// ===== OUTPUTS =====

/// Graph outputs (not subject to repeat or condition)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outputs {
    pub present: Option<String>,
    pub export_images: Vec<String>,
    pub export_buffers: Vec<String>,
}

// ===== GRAPH =====

/// Root of a parsed render graph
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarativeGraph {
    version: u32,
    name: String,
    resources: Vec<ResourceDecl>,
    passes: Vec<PassDecl>,
    outputs: Outputs,
    resource_names: FxHashMap<String, usize>,
    pass_names: FxHashMap<String, usize>,
}

impl DeclarativeGraph {
    /// Created by the loader after validation
    pub(crate) fn new(
        version: u32,
        name: String,
        resources: Vec<ResourceDecl>,
        passes: Vec<PassDecl>,
        outputs: Outputs,
        resource_names: FxHashMap<String, usize>,
        pass_names: FxHashMap<String, usize>,
    ) -> Self {
        Self { version, name, resources, passes, outputs, resource_names, pass_names }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resources in declaration order
    pub fn resources(&self) -> &[ResourceDecl] {
        &self.resources
    }

    /// Passes in declaration order
    pub fn passes(&self) -> &[PassDecl] {
        &self.passes
    }

    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    /// Get a resource declaration by (template) name
    pub fn resource(&self, name: &str) -> Option<&ResourceDecl> {
        self.resource_names.get(name).map(|&i| &self.resources[i])
    }

    /// Get a pass declaration by (template) name
    pub fn pass(&self, name: &str) -> Option<&PassDecl> {
        self.pass_names.get(name).map(|&i| &self.passes[i])
    }
}
