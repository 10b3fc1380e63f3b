//! UI layer for the desktop client: app shell and palette.

pub mod app;
pub mod theme;

pub use app::HeartGuardApp;
