/// Viewer tuning constants and the DOM contract with `web/index.html`.
///
/// These keep magic numbers and element ids out of the wiring code.
// ---- DOM contract ----
pub const MOUNT_ID: &str = "viewer-mount";
pub const MARKERS_LAYER_ID: &str = "markers-layer";
pub const INFO_PANEL_ID: &str = "info-panel";
pub const ARTIFACT_TITLE_ID: &str = "artifact-title";
pub const ARTIFACT_DESC_ID: &str = "artifact-description";
pub const SPEAK_BTN_ID: &str = "speak-btn";
pub const CLOSE_PANEL_ID: &str = "close-panel-btn";
pub const ENTER_OVERLAY_ID: &str = "enter-overlay";
pub const ENTER_BTN_ID: &str = "enter-btn";
pub const EXIT_BTN_ID: &str = "exit-btn";
pub const LOST_OVERLAY_ID: &str = "lost-overlay";
pub const REENTER_BTN_ID: &str = "reenter-btn";

// ---- External collaborators ----
pub const NARRATION_ENDPOINT: &str = "/api/narration";
pub const PANORAMA_TEXTURE_URL: &str = "assets/panorama.jpg";

// Speech fallback voice hints
pub const SPEECH_LANG: &str = "ar-EG";
pub const SPEECH_RATE: f32 = 0.85;
pub const SPEECH_PITCH: f32 = 1.1;

// ---- Backdrop sphere ----
pub const BACKDROP_RADIUS: f32 = 100.0;
pub const BACKDROP_LON_SEGMENTS: u32 = 48;
pub const BACKDROP_LAT_SEGMENTS: u32 = 32;

// Lighting
pub const LIGHT_POSITION: [f32; 3] = [0.0, 50.0, 0.0];
pub const LIGHT_INTENSITY: f32 = 1.5;
pub const AMBIENT_RGB: [f32; 3] = [0.75, 0.75, 0.75];
pub const WALL_TINT: [f32; 3] = [0.55, 0.47, 0.33]; // untextured fallback

// ---- Hotspot markers ----
pub const MARKER_WORLD_SCALE: f32 = 5.0; // billboard quad edge in world units
pub const MARKER_COLOR: [f32; 3] = [1.0, 0.84, 0.0];
pub const MARKER_SELECTED_GLOW: f32 = 1.0;
