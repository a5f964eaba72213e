//! Built-in shader program library.
//!
//! Program sources are stored as `.wgsl` files in `shaders/` and embedded at
//! compile time. Each program is the shared haze declarations followed by a
//! program-specific fragment stage.
//!
//! | Program | Description |
//! |---------|-------------|
//! | `haze` | Haze composited over shaded geometry |
//! | `haze_background` | Haze composited over the background region |

/// Name of the haze program used by the unified and foreground passes.
pub const HAZE_PROGRAM: &str = "haze";

/// Name of the background haze program.
pub const HAZE_BACKGROUND_PROGRAM: &str = "haze_background";

const HAZE_SOURCE: &str = concat!(
    include_str!("../../shaders/haze_common.wgsl"),
    include_str!("../../shaders/haze.wgsl"),
);

const HAZE_BACKGROUND_SOURCE: &str = concat!(
    include_str!("../../shaders/haze_common.wgsl"),
    include_str!("../../shaders/haze_background.wgsl"),
);

/// Collection of named shader programs a device can create.
#[derive(Debug, Clone)]
pub struct ShaderLibrary {
    programs: Vec<(&'static str, &'static str)>,
}

impl ShaderLibrary {
    /// Create the standard library with the built-in haze programs.
    pub fn standard() -> Self {
        Self {
            programs: vec![
                (HAZE_PROGRAM, HAZE_SOURCE),
                (HAZE_BACKGROUND_PROGRAM, HAZE_BACKGROUND_SOURCE),
            ],
        }
    }

    /// Create an empty shader library.
    pub fn empty() -> Self {
        Self {
            programs: Vec::new(),
        }
    }

    /// Add a program to the library. A later entry shadows an earlier one
    /// with the same name.
    pub fn with_program(mut self, name: &'static str, source: &'static str) -> Self {
        self.programs.push((name, source));
        self
    }

    /// Look up a program source by name.
    pub fn source(&self, name: &str) -> Option<&'static str> {
        self.programs
            .iter()
            .rev()
            .find(|(program, _)| *program == name)
            .map(|(_, source)| *source)
    }

    /// Get an iterator over all programs (name, source).
    pub fn programs(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.programs.iter().copied()
    }
}

impl Default for ShaderLibrary {
    fn default() -> Self {
        Self::standard()
    }
}
