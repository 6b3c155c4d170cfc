pub mod camera;
pub mod hotspot;
pub mod narration;
pub mod orientation;

pub use camera::*;
pub use hotspot::*;
pub use narration::*;
pub use orientation::*;

// Shaders bundled as string constants
pub static PANORAMA_WGSL: &str = include_str!("../../shaders/panorama.wgsl");
pub static MARKER_WGSL: &str = include_str!("../../shaders/marker.wgsl");
