/// Recorded graph: an in-memory `RenderGraphApi` implementation.
///
/// Stores every declaration the builder emits without touching a GPU.
/// Used to dry-run a render graph against frame parameters (editor
/// validation, hot-reload checks) and by the test-suite.
///
/// Entries are never removed, so slot map iteration follows declaration
/// order.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use crate::error::Result;
use crate::graph_bail;
use super::graph_api::{AttachmentDesc, BufferDesc, ImageDesc, RenderGraphApi, UseBinding};
use super::types::{BufferAccess, ImageAccess, PassDomain, PassFlags, PassType};

const SOURCE: &str = "galaxy3d::RecordedGraph";

// ===== SLOT MAP KEYS =====

new_key_type! {
    /// Key of an image declared in a RecordedGraph
    pub struct ImageKey;
    /// Key of a buffer declared in a RecordedGraph
    pub struct BufferKey;
    /// Key of a pass declared in a RecordedGraph
    pub struct PassKey;
}

// ===== RECORDS =====

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedImage {
    pub name: String,
    /// External image name for imported images
    pub import_name: Option<String>,
    /// State the external image is in when the graph starts
    pub initial_access: Option<ImageAccess>,
    pub desc: ImageDesc,
}

impl RecordedImage {
    pub fn is_import(&self) -> bool {
        self.import_name.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedBuffer {
    pub name: String,
    pub desc: BufferDesc,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedAttachment {
    pub image: ImageKey,
    pub desc: AttachmentDesc,
    /// Depth attachments only
    pub read_only: bool,
}

/// Read or write of a resource by a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedUse<K, A> {
    pub resource: K,
    pub access: A,
    pub binding: UseBinding,
}

/// A pass and everything attached to it
#[derive(Debug, Clone)]
pub struct RecordedPass<E> {
    pub name: String,
    pub pass_type: PassType,
    pub flags: PassFlags,
    pub domain: Option<PassDomain>,
    pub executor: Option<E>,
    pub color_attachments: Vec<RecordedAttachment>,
    pub depth_attachment: Option<RecordedAttachment>,
    pub image_reads: Vec<RecordedUse<ImageKey, ImageAccess>>,
    pub image_writes: Vec<RecordedUse<ImageKey, ImageAccess>>,
    pub buffer_reads: Vec<RecordedUse<BufferKey, BufferAccess>>,
    pub buffer_writes: Vec<RecordedUse<BufferKey, BufferAccess>>,
}

impl<E> RecordedPass<E> {
    fn new(name: &str, pass_type: PassType) -> Self {
        Self {
            name: name.to_string(),
            pass_type,
            flags: PassFlags::empty(),
            domain: None,
            executor: None,
            color_attachments: Vec::new(),
            depth_attachment: None,
            image_reads: Vec::new(),
            image_writes: Vec::new(),
            buffer_reads: Vec::new(),
            buffer_writes: Vec::new(),
        }
    }
}

// ===== RECORDED GRAPH =====

/// Render graph recorded in memory
///
/// Image, buffer and pass names must be unique; setting the present image
/// twice is an error.
#[derive(Debug)]
pub struct RecordedGraph<E> {
    images: SlotMap<ImageKey, RecordedImage>,
    buffers: SlotMap<BufferKey, RecordedBuffer>,
    passes: SlotMap<PassKey, RecordedPass<E>>,
    image_names: FxHashMap<String, ImageKey>,
    buffer_names: FxHashMap<String, BufferKey>,
    pass_names: FxHashMap<String, PassKey>,
    present: Option<ImageKey>,
    exported_images: Vec<ImageKey>,
    exported_buffers: Vec<BufferKey>,
}

impl<E> RecordedGraph<E> {
    /// Create an empty recorded graph
    pub fn new() -> Self {
        Self {
            images: SlotMap::with_key(),
            buffers: SlotMap::with_key(),
            passes: SlotMap::with_key(),
            image_names: FxHashMap::default(),
            buffer_names: FxHashMap::default(),
            pass_names: FxHashMap::default(),
            present: None,
            exported_images: Vec::new(),
            exported_buffers: Vec::new(),
        }
    }

    // ===== IMAGES =====

    pub fn image(&self, key: ImageKey) -> Option<&RecordedImage> {
        self.images.get(key)
    }

    pub fn image_key(&self, name: &str) -> Option<ImageKey> {
        self.image_names.get(name).copied()
    }

    pub fn image_by_name(&self, name: &str) -> Option<&RecordedImage> {
        self.image_key(name).and_then(|key| self.images.get(key))
    }

    /// Images in declaration order
    pub fn images(&self) -> impl Iterator<Item = &RecordedImage> + '_ {
        self.images.values()
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    // ===== BUFFERS =====

    pub fn buffer(&self, key: BufferKey) -> Option<&RecordedBuffer> {
        self.buffers.get(key)
    }

    pub fn buffer_key(&self, name: &str) -> Option<BufferKey> {
        self.buffer_names.get(name).copied()
    }

    pub fn buffer_by_name(&self, name: &str) -> Option<&RecordedBuffer> {
        self.buffer_key(name).and_then(|key| self.buffers.get(key))
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    // ===== PASSES =====

    pub fn pass(&self, key: PassKey) -> Option<&RecordedPass<E>> {
        self.passes.get(key)
    }

    pub fn pass_by_name(&self, name: &str) -> Option<&RecordedPass<E>> {
        self.pass_names.get(name).and_then(|&key| self.passes.get(key))
    }

    /// Passes in declaration order
    pub fn passes(&self) -> impl Iterator<Item = &RecordedPass<E>> + '_ {
        self.passes.values()
    }

    /// Pass names in declaration order
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.values().map(|p| p.name.as_str()).collect()
    }

    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    // ===== OUTPUTS =====

    pub fn present_image(&self) -> Option<&RecordedImage> {
        self.present.and_then(|key| self.images.get(key))
    }

    pub fn exported_images(&self) -> &[ImageKey] {
        &self.exported_images
    }

    pub fn exported_buffers(&self) -> &[BufferKey] {
        &self.exported_buffers
    }

    fn pass_mut(&mut self, key: PassKey) -> Result<&mut RecordedPass<E>> {
        match self.passes.get_mut(key) {
            Some(pass) => Ok(pass),
            None => graph_bail!(Semantic, SOURCE, "pass", "invalid pass key {:?}", key),
        }
    }

    fn insert_image(
        &mut self,
        name: &str,
        import: Option<(&str, ImageAccess)>,
        desc: &ImageDesc,
    ) -> Result<ImageKey> {
        if self.image_names.contains_key(name) {
            graph_bail!(Semantic, SOURCE, name, "image '{}' is already declared", name);
        }
        let key = self.images.insert(RecordedImage {
            name: name.to_string(),
            import_name: import.map(|(import_name, _)| import_name.to_string()),
            initial_access: import.map(|(_, access)| access),
            desc: *desc,
        });
        self.image_names.insert(name.to_string(), key);
        Ok(key)
    }
}

impl<E> Default for RecordedGraph<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> RenderGraphApi for RecordedGraph<E> {
    type Image = ImageKey;
    type Buffer = BufferKey;
    type Pass = PassKey;
    type Executor = E;

    fn create_image(&mut self, name: &str, desc: &ImageDesc) -> Result<ImageKey> {
        self.insert_image(name, None, desc)
    }

    fn import_image(
        &mut self,
        name: &str,
        import_name: &str,
        initial_access: ImageAccess,
        desc: &ImageDesc,
    ) -> Result<ImageKey> {
        self.insert_image(name, Some((import_name, initial_access)), desc)
    }

    fn create_buffer(&mut self, name: &str, desc: &BufferDesc) -> Result<BufferKey> {
        if self.buffer_names.contains_key(name) {
            graph_bail!(Semantic, SOURCE, name, "buffer '{}' is already declared", name);
        }
        let key = self.buffers.insert(RecordedBuffer { name: name.to_string(), desc: *desc });
        self.buffer_names.insert(name.to_string(), key);
        Ok(key)
    }

    fn add_pass(&mut self, pass_type: PassType, name: &str) -> Result<PassKey> {
        if self.pass_names.contains_key(name) {
            graph_bail!(Semantic, SOURCE, name, "pass '{}' is already declared", name);
        }
        let key = self.passes.insert(RecordedPass::new(name, pass_type));
        self.pass_names.insert(name.to_string(), key);
        Ok(key)
    }

    fn pass_set_flags(&mut self, pass: PassKey, flags: PassFlags) -> Result<()> {
        self.pass_mut(pass)?.flags = flags;
        Ok(())
    }

    fn pass_set_domain(&mut self, pass: PassKey, domain: PassDomain) -> Result<()> {
        self.pass_mut(pass)?.domain = Some(domain);
        Ok(())
    }

    fn pass_set_execute(&mut self, pass: PassKey, executor: E) -> Result<()> {
        self.pass_mut(pass)?.executor = Some(executor);
        Ok(())
    }

    fn pass_add_color_attachment(
        &mut self,
        pass: PassKey,
        image: ImageKey,
        desc: &AttachmentDesc,
    ) -> Result<()> {
        self.pass_mut(pass)?.color_attachments.push(RecordedAttachment {
            image,
            desc: *desc,
            read_only: false,
        });
        Ok(())
    }

    fn pass_set_depth_attachment(
        &mut self,
        pass: PassKey,
        image: ImageKey,
        desc: &AttachmentDesc,
        read_only: bool,
    ) -> Result<()> {
        self.pass_mut(pass)?.depth_attachment = Some(RecordedAttachment {
            image,
            desc: *desc,
            read_only,
        });
        Ok(())
    }

    fn pass_read_image(
        &mut self,
        pass: PassKey,
        image: ImageKey,
        access: ImageAccess,
        binding: UseBinding,
    ) -> Result<()> {
        self.pass_mut(pass)?.image_reads.push(RecordedUse { resource: image, access, binding });
        Ok(())
    }

    fn pass_write_image(
        &mut self,
        pass: PassKey,
        image: ImageKey,
        access: ImageAccess,
        binding: UseBinding,
    ) -> Result<()> {
        self.pass_mut(pass)?.image_writes.push(RecordedUse { resource: image, access, binding });
        Ok(())
    }

    fn pass_read_buffer(
        &mut self,
        pass: PassKey,
        buffer: BufferKey,
        access: BufferAccess,
        binding: UseBinding,
    ) -> Result<()> {
        self.pass_mut(pass)?.buffer_reads.push(RecordedUse { resource: buffer, access, binding });
        Ok(())
    }

    fn pass_write_buffer(
        &mut self,
        pass: PassKey,
        buffer: BufferKey,
        access: BufferAccess,
        binding: UseBinding,
    ) -> Result<()> {
        self.pass_mut(pass)?.buffer_writes.push(RecordedUse { resource: buffer, access, binding });
        Ok(())
    }

    fn set_present_image(&mut self, image: ImageKey) -> Result<()> {
        if self.present.is_some() {
            graph_bail!(Semantic, SOURCE, "present", "present image is already set");
        }
        self.present = Some(image);
        Ok(())
    }

    fn export_image(&mut self, image: ImageKey) -> Result<()> {
        self.exported_images.push(image);
        Ok(())
    }

    fn export_buffer(&mut self, buffer: BufferKey) -> Result<()> {
        self.exported_buffers.push(buffer);
        Ok(())
    }
}

#[cfg(test)]
#[path = "recorded_graph_tests.rs"]
mod tests;
