/*!
# Galaxy 3D Render Graph

Declarative render graph compiler for the Galaxy 3D engine.

A render graph is described in a JSON file: resources (images and buffers)
and passes (graphics, compute, transfer) with their attachments, reads and
writes. The file is parsed once into an immutable `DeclarativeGraph`, which
is then built against per-frame parameters whenever they change (resize,
editor toggle, shadow cascade count change).

## Architecture

- **Loader**: JSON file -> validated `DeclarativeGraph`
- **Builder**: `DeclarativeGraph` + `FrameInfo` + executors -> `RenderGraphApi` calls
- **RenderGraphApi**: Boundary trait implemented by the execution engine
- **RecordedGraph**: In-memory `RenderGraphApi` for dry runs and tests
- **RenderGraphManager**: Named graphs, hot reload and rebuild tracking
*/

// Internal modules
mod error;
pub mod log;
pub mod render_graph;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Manager
    pub use crate::render_graph::RenderGraphManager;

    // Logging sub-module (types and logger installation, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, set_logger, reset_logger};
        // Note: graph_* macros are NOT re-exported here - they are internal only
    }

    // Render graph sub-module with all compiler types
    pub mod render_graph {
        pub use crate::render_graph::*;
    }
}

// Re-export math library at crate root
pub use glam;
