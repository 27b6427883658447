//! Content management: draft editing and the admin workflow.

pub use controller::*;
pub use editor::*;

mod controller;
mod editor;
