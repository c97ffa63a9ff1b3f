/// Typed values produced by the scalar parsers.
///
/// Every JSON token of the render graph format maps to one of these
/// enums or flag sets. Symbolic tokens (`${i}`, `shadow_cascade_count`,
/// `shadow_map_size`, `SWAPCHAIN`...) are closed enums resolved once at
/// parse time; the builder never compares strings to resolve them.

use bitflags::bitflags;

// ===== RESOURCE / PASS KINDS =====

/// Kind of a declared resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Image,
    Buffer,
}

/// Kind of a declared pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassType {
    Graphics,
    Compute,
    Transfer,
}

/// Render domain of a graphics pass (selects which draw lists it consumes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassDomain {
    World,
    Ui,
    Shadow,
    Post,
    Skybox,
}

// ===== FLAG SETS =====

bitflags! {
    /// Lifetime / ownership flags of a resource
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ResourceFlags: u32 {
        const TRANSIENT = 1 << 0;
        const PERSISTENT = 1 << 1;
        const EXTERNAL = 1 << 2;
        const PER_IMAGE = 1 << 3;
        const RESIZABLE = 1 << 4;
    }
}

bitflags! {
    /// Scheduling flags of a pass
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PassFlags: u32 {
        /// Never removed by the execution engine, even without consumers
        const NO_CULL = 1 << 0;
        const DISABLED = 1 << 1;
    }
}

bitflags! {
    /// Image usage flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextureUsage: u32 {
        const SAMPLED = 1 << 0;
        const COLOR_ATTACHMENT = 1 << 1;
        const DEPTH_STENCIL_ATTACHMENT = 1 << 2;
        const TRANSFER_SRC = 1 << 3;
        const TRANSFER_DST = 1 << 4;
    }
}

bitflags! {
    /// Buffer usage flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BufferUsage: u32 {
        const VERTEX_BUFFER = 1 << 0;
        const INDEX_BUFFER = 1 << 1;
        const GLOBAL_UNIFORM_BUFFER = 1 << 2;
        const UNIFORM = 1 << 3;
        const STORAGE = 1 << 4;
        const TRANSFER_SRC = 1 << 5;
        const TRANSFER_DST = 1 << 6;
        const INDIRECT = 1 << 7;
    }
}

// ===== ACCESS =====

/// How a pass accesses an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageAccess {
    Sampled,
    StorageRead,
    StorageWrite,
    ColorAttachment,
    DepthAttachment,
    DepthReadOnly,
    TransferSrc,
    TransferDst,
    Present,
}

/// How a pass accesses a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferAccess {
    Vertex,
    Index,
    Uniform,
    StorageRead,
    StorageWrite,
    TransferSrc,
    TransferDst,
}

// ===== FORMATS =====

/// Explicit image format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum Format {
    R8G8B8A8_UNORM,
    R8G8B8A8_SRGB,
    R8G8B8A8_UINT,
    R8G8B8A8_SNORM,
    R8G8B8A8_SINT,
    B8G8R8A8_UNORM,
    B8G8R8A8_SRGB,
    R8_UNORM,
    R16_SFLOAT,
    R32_SFLOAT,
    R32_UINT,
    R8G8_UNORM,
    D16_UNORM,
    D32_SFLOAT,
    D24_UNORM_S8_UINT,
}

impl Format {
    /// True for depth (and depth/stencil) formats
    pub fn is_depth(&self) -> bool {
        matches!(self, Format::D16_UNORM | Format::D32_SFLOAT | Format::D24_UNORM_S8_UINT)
    }
}

/// Where the format of an image comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatSource {
    /// Literal format written in the file
    Explicit(Format),
    /// Current swapchain color format
    Swapchain,
    /// Depth format paired with the swapchain
    SwapchainDepth,
    /// Shadow map depth format
    ShadowDepth,
}

// ===== ATTACHMENT OPS =====

/// Attachment load operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOp {
    Load,
    Clear,
    DontCare,
}

/// Attachment store operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Store,
    DontCare,
}

/// Attachment clear value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClearValue {
    Color([f32; 4]),
    DepthStencil { depth: f32, stencil: u32 },
}

// ===== SYMBOLIC VALUES =====

/// Runtime predicate gating a resource or pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Condition {
    /// Always included
    #[default]
    None,
    /// Included only when the editor is enabled
    EditorEnabled,
    /// Included only when the editor is disabled
    EditorDisabled,
}

impl Condition {
    /// Evaluate against the frame's editor flag
    pub fn evaluate(&self, editor_enabled: bool) -> bool {
        match self {
            Condition::None => true,
            Condition::EditorEnabled => editor_enabled,
            Condition::EditorDisabled => !editor_enabled,
        }
    }
}

/// Frame value that drives a repeat count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountSource {
    ShadowCascadeCount,
}

/// Templated repetition of a resource, pass or resource use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Repeat {
    /// None = not repeated
    pub count_source: Option<CountSource>,
}

impl Repeat {
    /// Repeat driven by the given frame value
    pub fn from_source(source: CountSource) -> Self {
        Self { count_source: Some(source) }
    }

    /// True if this declaration is instantiated several times
    pub fn is_enabled(&self) -> bool {
        self.count_source.is_some()
    }
}

/// Frame value that drives a square extent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSource {
    ShadowMapSize,
}

/// Frame value that drives an image layer count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayersSource {
    ShadowCascadeCount,
}

/// Image layer count: literal or frame-driven
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layers {
    Fixed(u32),
    Source(LayersSource),
}

impl Default for Layers {
    fn default() -> Self {
        Layers::Fixed(1)
    }
}

/// Image extent, resolved against the frame at build time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    /// Window size
    Window,
    /// Viewport size
    Viewport,
    /// Literal size
    Fixed { width: u32, height: u32 },
    /// size x size, size taken from the frame
    Square(SizeSource),
}

/// Literal index or the current repeat iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Index {
    Literal(u32),
    /// `${i}` or `i`
    Iteration,
}

impl Index {
    /// Resolve against the current iteration
    pub fn resolve(&self, iteration: u32) -> u32 {
        match self {
            Index::Literal(value) => *value,
            Index::Iteration => iteration,
        }
    }
}
