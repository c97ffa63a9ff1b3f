/// Per-frame parameters a declarative graph is built against.

use glam::UVec2;
use super::types::{Extent, Format, FormatSource, Layers, LayersSource, SizeSource, CountSource};

/// Runtime values that drive extents, formats, repeat counts and conditions
///
/// A graph only needs to be rebuilt when one of these changes
/// (see `FrameInfo::requires_rebuild`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Window (swapchain) size in pixels
    pub window_size: UVec2,
    /// Scene viewport size in pixels (smaller than the window when the editor is shown)
    pub viewport_size: UVec2,
    pub swapchain_format: Format,
    pub swapchain_depth_format: Format,
    pub shadow_depth_format: Format,
    pub shadow_cascade_count: u32,
    /// Edge length of a square shadow map
    pub shadow_map_size: u32,
    pub editor_enabled: bool,
}

impl Default for FrameInfo {
    fn default() -> Self {
        Self {
            window_size: UVec2::new(1280, 720),
            viewport_size: UVec2::new(1280, 720),
            swapchain_format: Format::B8G8R8A8_SRGB,
            swapchain_depth_format: Format::D32_SFLOAT,
            shadow_depth_format: Format::D32_SFLOAT,
            shadow_cascade_count: 4,
            shadow_map_size: 2048,
            editor_enabled: false,
        }
    }
}

impl FrameInfo {
    /// Resolve an extent to a size in pixels
    pub fn resolve_extent(&self, extent: Extent) -> UVec2 {
        match extent {
            Extent::Window => self.window_size,
            Extent::Viewport => self.viewport_size,
            Extent::Fixed { width, height } => UVec2::new(width, height),
            Extent::Square(SizeSource::ShadowMapSize) => UVec2::splat(self.shadow_map_size),
        }
    }

    /// Resolve a format source to a concrete format
    pub fn resolve_format(&self, format: FormatSource) -> Format {
        match format {
            FormatSource::Explicit(format) => format,
            FormatSource::Swapchain => self.swapchain_format,
            FormatSource::SwapchainDepth => self.swapchain_depth_format,
            FormatSource::ShadowDepth => self.shadow_depth_format,
        }
    }

    pub fn resolve_layers(&self, layers: Layers) -> u32 {
        match layers {
            Layers::Fixed(count) => count,
            Layers::Source(LayersSource::ShadowCascadeCount) => self.shadow_cascade_count,
        }
    }

    pub fn resolve_count(&self, source: CountSource) -> u32 {
        match source {
            CountSource::ShadowCascadeCount => self.shadow_cascade_count,
        }
    }

    /// True if a graph built against `previous` is stale for this frame
    pub fn requires_rebuild(&self, previous: &FrameInfo) -> bool {
        self != previous
    }
}

#[cfg(test)]
#[path = "frame_info_tests.rs"]
mod tests;
