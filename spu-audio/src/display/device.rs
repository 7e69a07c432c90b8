use super::{DispEnv, DrawEnv, Rect, VideoMode};

/// Access to the graphics processor and its debug font.
pub trait GraphicsDevice {
    /// Reset the GPU and drawing queue.
    fn reset(&mut self);

    fn set_video_mode(&mut self, mode: VideoMode);

    /// Select the VRAM area scanned out from the next vertical blank.
    fn put_disp_env(&mut self, env: &DispEnv);

    /// Select the drawing area; clears it if the environment asks for it.
    fn put_draw_env(&mut self, env: &DrawEnv);

    /// Block until queued drawing has finished.
    fn draw_sync(&mut self);

    /// Block until the next vertical blank.
    fn vsync(&mut self);

    /// Enable (`true`) or blank (`false`) the video output.
    fn set_display_mask(&mut self, enabled: bool);

    /// Upload the debug font texture to VRAM at (`x`, `y`).
    fn load_font(&mut self, x: u16, y: u16);

    /// Render `text` into `window` of the current drawing area.
    fn draw_text(&mut self, window: &Rect, text: &str);
}
