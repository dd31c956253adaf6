//! kalkcore - presentation plumbing for the kalkulacka calculator
//!
//! Theme palettes, key press animations, repaint scheduling, the keypad
//! widget and startup configuration. None of it knows about arithmetic.

pub mod animation;
pub mod config;
pub mod repaint;
pub mod theme;
pub mod widgets;

pub use config::Config;
pub use repaint::RepaintController;
pub use theme::{KalkTheme, ThemeMode};
