#![warn(clippy::all, rust_2018_idioms)]

pub mod action;
pub mod app;
pub mod command;
pub mod components;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod geometry;
pub mod input;
pub mod panels;
pub mod preview;
pub mod renderer;
pub mod stamp;
pub mod state;
pub mod stroke;
pub mod surface;
pub mod tools;

pub use action::{Action, Drawable};
pub use app::SketchApp;
pub use command::{ActionHistory, Command};
pub use config::SketchConfig;
pub use error::{SketchError, SketchResult};
pub use event::{EventBus, EventHandler, SketchEvent};
pub use export::ExportBackground;
pub use geometry::{Point, Segment};
pub use input::{InputEvent, InputHandler};
pub use preview::PreviewOverlay;
pub use renderer::Renderer;
pub use stamp::Stamp;
pub use state::SketchContext;
pub use stroke::Stroke;
pub use surface::{GlyphMetrics, MonospaceMetrics, PaintOp, RasterSurface, RecordingSurface, Surface};
pub use tools::{ToolKind, ToolState};
