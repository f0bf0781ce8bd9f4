//! celpad — a frame-by-frame sketchpad for the terminal.
//!
//! Strokes drawn with the mouse accumulate on the active frame of an
//! [`animation::Animation`]; a [`player::Player`] replays the frames at a
//! target rate. The terminal front end lives in [`editor`].

pub mod animation;
pub mod cel;
pub mod editor;
pub mod error;
pub mod pen;
pub mod player;
pub mod renderer;
pub mod session;
pub mod types;

pub use error::{CelError, CelResult};
