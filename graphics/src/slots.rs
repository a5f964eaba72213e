//! Binding slots shared between the haze programs and the code that binds them.
//!
//! Indices match the `@binding` declarations in `shaders/haze_common.wgsl`.

/// Uniform buffer slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum UniformSlot {
    /// Haze parameter block of the active haze.
    HazeParams = 0,
    /// Per-frame camera and projection data.
    DeferredFrameTransform = 1,
    /// Lighting model toggles and parameters.
    LightModel = 2,
    /// Light schema of the frame's key light.
    KeyLight = 3,
}

impl UniformSlot {
    /// Binding index of this slot.
    pub const fn index(self) -> u32 {
        self as u32
    }
}

/// Texture slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum TextureSlot {
    /// Linear scene depth.
    HazeLinearDepth = 0,
}

impl TextureSlot {
    /// Binding index of this slot.
    pub const fn index(self) -> u32 {
        self as u32
    }
}
