//! Snowfall: a software-rasterized falling-particle renderer.
//!
//! The host owns the window, the clock, and the pixel storage; this crate
//! owns everything that happens inside one frame. Build a [`State`] once,
//! then hand it a writable [`FrameBuffer`] view and the elapsed seconds every
//! frame:
//!
//! ```
//! use snowfall::{FrameBuffer, State, DEFAULT_CAPACITY, PIXEL_BYTES};
//!
//! let (width, height) = (320, 180);
//! let mut pixels = vec![0u8; width * height * PIXEL_BYTES];
//! let mut state = State::new(DEFAULT_CAPACITY);
//!
//! let mut fb = FrameBuffer::new(&mut pixels, width, height, width * PIXEL_BYTES)?;
//! state.update_and_render(&mut fb, 1.0 / 60.0);
//! # Ok::<(), snowfall::Error>(())
//! ```

pub mod color;
pub mod error;
pub mod particle;
pub mod raster;
pub mod sim;

pub use color::{Color, DoubleColor};
pub use error::Error;
pub use particle::{Particle, ParticlePool};
pub use raster::{FrameBuffer, PIXEL_BYTES};
pub use sim::{State, DEFAULT_SEED};

/// Pool size the demo host uses. Spawning every other tick with 200-tick
/// lifetimes needs 100 live slots at steady state; this leaves headroom.
pub const DEFAULT_CAPACITY: usize = 256;
