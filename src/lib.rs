//! Pathview displays one or more parametric curve paths inside a bounded
//! screen region, redrawing them every animation frame while avoiding
//! redundant rasterization when nothing has changed.
//!
//! # Render loop overview
//!
//! 1. **Detect**: each registered path carries a monotonically increasing
//!    sequence number; a cheap O(n) scan plus a coordinate-map identity check
//!    decides whether the cached raster output is stale.
//! 2. **Buffer**: when buffering is enabled, an offscreen surface sized
//!    exactly to the screen region holds the last full rasterization; it is
//!    reallocated lazily and released deterministically whenever it becomes
//!    invalid.
//! 3. **Rasterize**: stale frames walk every path's bounded sample cursor
//!    through the coordinate map and emit one stroke (`LINES`) or one fill
//!    (`DOTS`) per path via `vello_cpu`.
//! 4. **Composite**: the buffer (or the freshly rasterized frame, when
//!    unbuffered) is premultiplied-over composited onto the caller's target
//!    at the region origin.
//!
//! The engine is single-threaded and cooperative: [`DisplayPath::render`] is
//! invoked synchronously once per frame by an external frame driver, and all
//! mutating calls happen from that same context.
#![forbid(unsafe_code)]

mod foundation;
mod model;
mod render;
mod view;

// Target surfaces are `vello_cpu::Pixmap`s; re-exported so callers can name
// the types appearing in public signatures without a separate dependency.
pub use vello_cpu;

pub use foundation::core::{Point, Rect, Rgba8, ScreenRect, Vec2};
pub use foundation::error::{PathviewError, PathviewResult};
pub use model::path::{Path, SampledPath};
pub use view::coord_map::{CoordMap, MapId};
pub use view::display::DisplayObject;
pub use view::display_path::{DRAW_POINTS, DisplayPath, DisplayPathOpts, RenderStats};
pub use view::style::{DrawMode, DrawingStyle};
