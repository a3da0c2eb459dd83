//! Presentation layer: navigation, screens and the command-driven app.

mod app;
/// Session-gated navigation.
pub mod navigation;
/// Screens.
pub mod screens;

pub use app::{App, AppContext};
pub use navigation::{Navigator, Route};
