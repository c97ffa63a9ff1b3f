/// Render graph execution API (builder output boundary)
///
/// The builder never records GPU work itself. It resolves a declarative
/// graph against a `FrameInfo` and forwards fully resolved declarations
/// to an implementation of `RenderGraphApi` (the execution engine, or
/// `RecordedGraph` for dry runs and tests).

use glam::UVec2;
use crate::error::Result;
use super::types::{
    BufferAccess, BufferUsage, ClearValue, Format, ImageAccess, LoadOp, PassDomain, PassFlags,
    PassType, ResourceFlags, StoreOp, TextureUsage,
};

// ============================================================================
// Resolved descriptors
// ============================================================================

/// Fully resolved image description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDesc {
    /// Size in pixels
    pub extent: UVec2,
    /// Array layer count (>= 1)
    pub layers: u32,
    pub format: Format,
    pub usage: TextureUsage,
    pub flags: ResourceFlags,
}

/// Fully resolved buffer description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferDesc {
    /// Size in bytes
    pub size: u64,
    pub usage: BufferUsage,
    pub flags: ResourceFlags,
}

/// Mip level and layer range bound by an attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentRange {
    pub mip_level: u32,
    pub base_layer: u32,
    pub layer_count: u32,
}

/// Fully resolved attachment description
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttachmentDesc {
    pub load_op: LoadOp,
    pub store_op: StoreOp,
    pub clear: Option<ClearValue>,
    /// None = whole image
    pub range: Option<AttachmentRange>,
}

/// Shader binding slot of a resource use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UseBinding {
    pub binding: Option<u32>,
    pub array_index: Option<u32>,
}

// ============================================================================
// RenderGraphApi trait
// ============================================================================

/// Execution-engine side of the render graph
///
/// Handles are opaque `Copy` values chosen by the implementation. Every
/// method may fail; the builder aborts on the first error and the caller
/// discards the partially declared graph.
pub trait RenderGraphApi {
    /// Image handle
    type Image: Copy;
    /// Buffer handle
    type Buffer: Copy;
    /// Pass handle
    type Pass: Copy;
    /// Callable that records the GPU work of a pass
    type Executor;

    /// Declare a graph-owned image
    fn create_image(&mut self, name: &str, desc: &ImageDesc) -> Result<Self::Image>;

    /// Declare an external image (e.g. the swapchain image)
    ///
    /// # Arguments
    ///
    /// * `name` - Graph-local name
    /// * `import_name` - Name of the external image on the engine side
    /// * `initial_access` - State the external image is in when the graph starts
    /// * `desc` - Resolved description of the external image
    fn import_image(
        &mut self,
        name: &str,
        import_name: &str,
        initial_access: ImageAccess,
        desc: &ImageDesc,
    ) -> Result<Self::Image>;

    /// Declare a graph-owned buffer
    fn create_buffer(&mut self, name: &str, desc: &BufferDesc) -> Result<Self::Buffer>;

    /// Declare a pass
    fn add_pass(&mut self, pass_type: PassType, name: &str) -> Result<Self::Pass>;

    fn pass_set_flags(&mut self, pass: Self::Pass, flags: PassFlags) -> Result<()>;

    /// Graphics passes only
    fn pass_set_domain(&mut self, pass: Self::Pass, domain: PassDomain) -> Result<()>;

    fn pass_set_execute(&mut self, pass: Self::Pass, executor: Self::Executor) -> Result<()>;

    fn pass_add_color_attachment(
        &mut self,
        pass: Self::Pass,
        image: Self::Image,
        desc: &AttachmentDesc,
    ) -> Result<()>;

    fn pass_set_depth_attachment(
        &mut self,
        pass: Self::Pass,
        image: Self::Image,
        desc: &AttachmentDesc,
        read_only: bool,
    ) -> Result<()>;

    fn pass_read_image(
        &mut self,
        pass: Self::Pass,
        image: Self::Image,
        access: ImageAccess,
        binding: UseBinding,
    ) -> Result<()>;

    fn pass_write_image(
        &mut self,
        pass: Self::Pass,
        image: Self::Image,
        access: ImageAccess,
        binding: UseBinding,
    ) -> Result<()>;

    fn pass_read_buffer(
        &mut self,
        pass: Self::Pass,
        buffer: Self::Buffer,
        access: BufferAccess,
        binding: UseBinding,
    ) -> Result<()>;

    fn pass_write_buffer(
        &mut self,
        pass: Self::Pass,
        buffer: Self::Buffer,
        access: BufferAccess,
        binding: UseBinding,
    ) -> Result<()>;

    /// Image presented at the end of the frame
    fn set_present_image(&mut self, image: Self::Image) -> Result<()>;

    /// Keep the image alive (and its content valid) after the graph runs
    fn export_image(&mut self, image: Self::Image) -> Result<()>;

    /// Keep the buffer alive (and its content valid) after the graph runs
    fn export_buffer(&mut self, buffer: Self::Buffer) -> Result<()>;
}
