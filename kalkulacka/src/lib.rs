//! kalkulacka - a desktop calculator
//!
//! [`engine`] holds the entry and evaluation state machine and has no GUI
//! dependencies; [`app`] is the egui window driving it.

pub mod app;
pub mod engine;
pub mod format;

pub use engine::{CalcKey, Engine, Operator};
