pub mod context;

pub use context::SketchContext;
