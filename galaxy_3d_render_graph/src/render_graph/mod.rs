//! Render graph declarative compiler
//!
//! Parses a JSON description of a frame's GPU work into an immutable
//! `DeclarativeGraph`, then resolves it against per-frame parameters
//! (window/viewport size, formats, cascade count, editor flag) into calls
//! on a `RenderGraphApi` implementation.

mod builder;
mod declaration;
mod declaration_parser;
mod executor_registry;
mod frame_info;
mod graph_api;
mod json_reader;
mod loader;
mod recorded_graph;
mod render_graph_manager;
mod scalar_parser;
mod types;

pub use builder::{build, expand_name, BuildStats, IMPORTED_IMAGE_ACCESS};
pub use declaration::{
    AttachmentDecl, AttachmentSlice, Attachments, BufferDecl, DeclarativeGraph, ImageDecl,
    Outputs, PassDecl, ResourceDecl, ResourceKind, ResourceUse, UseAccess, GRAPH_VERSION,
    ITERATION_TOKEN,
};
pub use executor_registry::{ExecutorLookup, ExecutorRegistry};
pub use frame_info::FrameInfo;
pub use graph_api::{
    AttachmentDesc, AttachmentRange, BufferDesc, ImageDesc, RenderGraphApi, UseBinding,
};
pub use recorded_graph::{
    BufferKey, ImageKey, PassKey, RecordedAttachment, RecordedBuffer, RecordedGraph,
    RecordedImage, RecordedPass, RecordedUse,
};
pub use render_graph_manager::RenderGraphManager;
pub use types::*;
