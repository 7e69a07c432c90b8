//! Double-buffered display and debug text overlay.
//!
//! ```ignore
//! let mut display = Display::new(gpu, VideoMode::default());
//! display.init();
//! loop {
//!     display.write_line(format_args!("Counter : {}", n));
//!     display.flush_text();
//!     display.present();
//! }
//! ```

mod console;
mod device;
mod env;
mod presenter;

pub use console::TextConsole;
pub use device::GraphicsDevice;
pub use env::{DispEnv, DrawEnv, Rect, Rgb, VideoMode};
pub use presenter::Display;
