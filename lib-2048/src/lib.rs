//! Rules engine for a sliding-tile merge puzzle on a `rows × cols` grid.
//!
//! The [`Engine`] owns the grid, the score and the set of empty cells. Every
//! state change is announced on a typed [`Channel`]; presentation code
//! subscribes to the channels in [`Events`] and never touches engine state
//! directly.
//!
//! ```
//! use std::{cell::Cell, rc::Rc};
//!
//! use lib_2048::{Config, Engine};
//!
//! let engine = Engine::new(Config::new(4, 4).with_seed(7)).unwrap();
//! let spawned = Rc::new(Cell::new(0));
//!
//! let counter = Rc::clone(&spawned);
//! engine.events().cell_created.subscribe(move |_, _| {
//!     counter.set(counter.get() + 1);
//!     Ok(())
//! });
//!
//! engine.restart().unwrap();
//! assert_eq!(spawned.get(), 2);
//! assert_eq!(engine.score(), 0);
//! ```

pub use core_2048::*;

pub mod channel;
pub mod config;
pub mod error;
pub mod events;
pub mod logic;

pub use channel::{BoxError, Channel, HandlerResult};
pub use config::Config;
pub use error::EngineError;
pub use events::{CellCreated, CellsMoved, Events, Restarted, ScoreUpdated};
pub use logic::{Engine, MoveOutcome};
