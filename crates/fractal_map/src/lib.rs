//! # FRACTAL Map
//!
//! A session over the infinite block hierarchy: one focus block, moved by
//! zooming and panning, with procedural elevation filled in as blocks
//! appear.
//!
//! ## Example
//!
//! ```rust,ignore
//! use fractal_map::{MapConfig, MapSession};
//! use fractal_core::Direction;
//!
//! let config = MapConfig::load(Path::new("map.toml"))?;
//! let mut session = MapSession::new(&config)?;
//! session.zoom_out()?;
//! session.pan(Direction::Right)?;
//! session.shutdown();
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod session;

pub use config::MapConfig;
pub use error::SessionError;
pub use session::{MapSession, SessionStats};
