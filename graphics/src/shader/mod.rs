//! Shader programs.
//!
//! Shader compilation happens in the backend; this module only resolves named
//! programs from a [`ShaderLibrary`] and checks that they expose the entry
//! points every full-screen program in this crate uses.

pub mod library;

use crate::error::GraphicsError;

pub use library::{HAZE_BACKGROUND_PROGRAM, HAZE_PROGRAM, ShaderLibrary};

/// Vertex stage entry point every program must define.
pub const VERTEX_ENTRY_POINT: &str = "vs_main";

/// Fragment stage entry point every program must define.
pub const FRAGMENT_ENTRY_POINT: &str = "fs_main";

/// An immutable, linked shader program.
///
/// Programs are created by [`GraphicsDevice::create_shader_program`](crate::device::GraphicsDevice::create_shader_program)
/// and shared between pipelines via `Arc`.
pub struct ShaderProgram {
    name: String,
    source: &'static str,
}

impl ShaderProgram {
    /// Resolve and validate a program from the library.
    pub(crate) fn from_library(library: &ShaderLibrary, name: &str) -> Result<Self, GraphicsError> {
        let source = library
            .source(name)
            .ok_or_else(|| GraphicsError::ShaderCreationFailed {
                program: name.to_string(),
                reason: "not found in shader library".to_string(),
            })?;

        for entry_point in [VERTEX_ENTRY_POINT, FRAGMENT_ENTRY_POINT] {
            if !source.contains(&format!("fn {entry_point}")) {
                return Err(GraphicsError::ShaderCreationFailed {
                    program: name.to_string(),
                    reason: format!("missing entry point `{entry_point}`"),
                });
            }
        }

        Ok(Self {
            name: name.to_string(),
            source,
        })
    }

    /// Get the program name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the program source.
    pub fn source(&self) -> &'static str {
        self.source
    }
}

impl std::fmt::Debug for ShaderProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("name", &self.name)
            .field("source_len", &self.source.len())
            .finish()
    }
}

static_assertions::assert_impl_all!(ShaderProgram: Send, Sync);
