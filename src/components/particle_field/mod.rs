//! Animated particle backdrops.
//!
//! Two motion models share one lifecycle:
//! - **Network**: particles burst from the center, bounce past the edges, get
//!   pulled toward the pointer and are linked by distance-faded lines
//! - **Starfield**: stars fly toward the camera with a perspective projection
//!   and recycle at far depth
//!
//! The simulation is plain data stepped by [`FieldState::tick`], which returns
//! a [`Frame`] of draw commands. [`FieldController`] adds the frame loop and
//! visibility gates; [`ParticleFieldCanvas`] binds it all to a browser canvas.
//!
//! # Example
//!
//! ```ignore
//! use particle_backdrop::{FieldConfig, FieldMode, ParticleFieldCanvas};
//!
//! let config = FieldConfig { mode: FieldMode::Starfield, ..Default::default() };
//!
//! view! { <ParticleFieldCanvas config=config /> }
//! ```

mod component;
pub mod controller;
pub mod draw;
mod error;
pub mod geometry;
pub mod host;
pub mod network;
mod render;
mod rng;
pub mod scheduler;
pub mod starfield;
pub mod state;
pub mod theme;
pub mod types;

pub use component::ParticleFieldCanvas;
pub use controller::FieldController;
pub use draw::{DrawCommand, Frame};
pub use error::FieldError;
pub use geometry::{Pointer, Surface};
pub use rng::FieldRng;
pub use state::{FieldState, Particles};
pub use theme::Theme;
pub use types::{FieldConfig, FieldMode, NetworkConfig, StarfieldConfig};
