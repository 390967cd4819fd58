//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the daemon is up.
//!
//! # Tasks
//! - Sweep: removes expired cached images and shared carts at configured intervals

mod cleanup;

pub use cleanup::{run_sweep, spawn_sweep_task};
