//! # GANTRY Core
//!
//! Storage primitives shared by the UI toolkit:
//! - Generational handles that stay valid until their slot is freed
//! - A slot pool that owns every widget node of a tree
//! - A double buffer that publishes finished frames to the render thread
//!
//! ## Architecture Rules
//!
//! 1. **Handles, not pointers** - nodes refer to each other by [`Handle`]
//! 2. **Stale handles are detected** - a freed slot bumps its generation
//! 3. **One writer** - only the update thread mutates; the render thread reads
//!    published snapshots
//!
//! ## Example
//!
//! ```rust
//! use gantry_core::Pool;
//!
//! let mut pool = Pool::with_capacity(16);
//! let a = pool.insert("panel");
//! assert_eq!(pool.get(a), Some(&"panel"));
//!
//! pool.remove(a);
//! assert!(pool.get(a).is_none());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod handle;
pub mod pool;
pub mod sync;

pub use handle::Handle;
pub use pool::Pool;
pub use sync::{DoubleBuffer, ReadHandle, WriteHandle};
