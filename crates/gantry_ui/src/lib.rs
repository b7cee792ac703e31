//! # GANTRY UI
//!
//! Retained-mode widget toolkit for the engine's sprite renderer:
//! - Integer bounds with dock margins and clip padding
//! - Hit testing that respects clipping, visibility and compound parts
//! - Per-node subscribers instead of a global event bus
//! - Render commands batched per clip rectangle
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          UI PIPELINE                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  InputState → Dispatcher → Widget hooks → Subscribers        │
//! │                   ↓              ↓                           │
//! │              Hit testing    Responses (move, relayout, ...)  │
//! │                                  ↓                           │
//! │                Bounds engine → Render commands → FrameExchange│
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use gantry_ui::{Button, EventKind, Rect, UiTree};
//!
//! let mut tree = UiTree::new(Rect::new(0, 0, 640, 480));
//! let ok = tree.create("ok", Button::new("OK"));
//! tree.set_local_bounds(ok, Rect::new(10, 10, 80, 24)).unwrap();
//! tree.add_child(tree.root(), ok).unwrap();
//! tree.subscribe(ok, EventKind::ClickEnd, |_| println!("clicked")).unwrap();
//!
//! assert_eq!(tree.global_bounds(ok), Some(Rect::new(10, 10, 80, 24)));
//! assert_eq!(tree.child_by_name(tree.root(), "ok"), Some(ok));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod content;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod frame;
pub mod input;
pub mod layout;
pub mod render;
pub mod services;
pub mod style;
pub mod tree;
pub mod widget;

pub use config::{FontConfig, UiConfig};
pub use content::{ContentError, ContentLoader, Texture, TextureId, TextureSource};
pub use error::{UiError, UiResult};
pub use event::{EventKind, InputValue, SubscriptionId, UiEvent};
pub use frame::{FrameExchange, FrameReader};
pub use input::{InputState, Key, Modifiers, MouseButton};
pub use layout::{Margin, Padding, Point, Rect};
pub use render::{RenderBatch, RenderCommand, UIBatch, UIRenderer, UIVertex};
pub use services::{Clipboard, FontMetrics, MemoryClipboard, MonospaceMetrics, Services};
pub use style::{Color, Theme};
pub use tree::{NodeId, UiTree};
pub use widget::{
    Button, ButtonState, CheckBox, ComboBox, Graph, Image, Label, ListBox, Panel, PartRole,
    ScrollArea, ScrollBar, TextBox, Widget, WidgetResponse, Window,
};
