//! Application module
//!
//! The demo application hosting the piano roll widget.

pub mod roll_app;

pub use roll_app::RollApp;
