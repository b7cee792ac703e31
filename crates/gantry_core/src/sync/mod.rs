//! # Synchronization Primitives for the Render Handoff
//!
//! ## The Problem
//!
//! ```text
//! Update thread:  mutates the widget tree, records draw commands
//! Render thread:  submits draw commands to the GPU
//!
//! Without synchronization: render observes a half-built frame
//! With one big lock:       render stalls on every tree mutation
//! ```
//!
//! ## The Solution: Double Buffering
//!
//! ```text
//! Frame N:
//!   Update writes into the back buffer
//!   Render reads the published front snapshot (last frame)
//!
//! End of frame N:
//!   SWAP - publish the back buffer only if it was written (dirty)
//! ```
//!
//! The render thread never observes a frame mid-write, and steady-state
//! frames that did not change are not copied at all.

mod double_buffer;

pub use double_buffer::{DoubleBuffer, ReadHandle, WriteHandle};
