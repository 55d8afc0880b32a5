use std::fmt;
use std::sync::Arc;

use crate::foundation::core::{Point, ScreenRect};
use crate::foundation::error::{PathviewError, PathviewResult};
use crate::model::path::Path;
use crate::render::composite::blit_over;
use crate::render::surface::{alloc_pixmap, clear_to_transparent, matches_rect};
use crate::view::coord_map::{CoordMap, MapId};
use crate::view::display::DisplayObject;
use crate::view::style::{DrawMode, DrawingStyle};

/// Default per-path cap on sample points consumed per rasterization pass.
pub const DRAW_POINTS: usize = 3000;

/// Construction-time options for [`DisplayPath`].
#[derive(Clone, Debug)]
pub struct DisplayPathOpts {
    /// Style used by [`DisplayPath::add_path`] when the caller supplies none.
    pub default_style: DrawingStyle,
    /// Per-path cap on sample points per rasterization pass.
    pub max_draw_points: usize,
    /// Whether to cache rasterized output in an offscreen buffer. For paths
    /// that change every frame it saves time *not* to buffer.
    pub use_buffer: bool,
}

impl Default for DisplayPathOpts {
    fn default() -> Self {
        Self {
            default_style: DrawingStyle::default(),
            max_draw_points: DRAW_POINTS,
            use_buffer: true,
        }
    }
}

/// Aggregated rendering counters.
///
/// Counters only ever increase; callers diff snapshots across renders to
/// observe cache behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Full rasterization passes over all registered paths.
    pub raster_passes: u64,
    /// Stroke operations issued (one per `Lines` path per pass).
    pub stroke_ops: u64,
    /// Fill operations issued (one per `Dots` path per pass).
    pub fill_ops: u64,
    /// Offscreen buffer (re)allocations.
    pub buffer_reallocs: u64,
}

/// Displays one or more [`Path`]s within a screen rectangle, re-rasterizing
/// only when something changed.
///
/// The screen rectangle starts out empty, so it must be set with
/// [`DisplayPath::set_screen_rect`] before anything is visible. Paths are
/// added and removed by handle identity; registration order is paint order
/// (later paths paint over earlier ones).
///
/// Per frame, [`DisplayPath::render`] compares each path's sequence number
/// against the value cached at the previous render and the coordinate map
/// against the previous map by identity. Only when something differs (or the
/// buffer was just reallocated) does it pay for a full rasterization pass;
/// otherwise the cached buffer is composited as-is. Redraw cost is
/// proportional to the total sample count across paths, so this check is the
/// main performance lever.
///
/// Single-threaded contract: all mutating calls happen from the same context
/// that calls `render`, never concurrently with an in-flight render.
pub struct DisplayPath {
    paths: Vec<Arc<dyn Path>>,
    styles: Vec<DrawingStyle>,
    /// Sequence number of each path as of the last render, index-aligned
    /// with `paths` and `styles`.
    sequence: Vec<u64>,
    /// True when the next render must re-rasterize all paths.
    redraw: bool,
    screen_rect: ScreenRect,
    /// Identity of the map used on the previous render.
    last_map: Option<MapId>,
    use_buffer: bool,
    /// Cached raster output; present only when buffering is enabled, and
    /// always sized exactly to `screen_rect` when present.
    offscreen: Option<vello_cpu::Pixmap>,
    /// Reused rasterizer context, rebuilt when the region size changes.
    ctx: Option<vello_cpu::RenderContext>,
    opts: DisplayPathOpts,
    stats: RenderStats,
}

impl DisplayPath {
    /// A display with default options: gray 1px lines, buffering on.
    pub fn new() -> Self {
        Self::with_opts(DisplayPathOpts::default())
    }

    /// A display with explicit options.
    pub fn with_opts(opts: DisplayPathOpts) -> Self {
        Self {
            paths: Vec::new(),
            styles: Vec::new(),
            sequence: Vec::new(),
            redraw: true,
            screen_rect: ScreenRect::EMPTY,
            last_map: None,
            use_buffer: opts.use_buffer,
            offscreen: None,
            ctx: None,
            opts,
            stats: RenderStats::default(),
        }
    }

    /// Add a path with the default style. No-op if the same handle is
    /// already registered.
    pub fn add_path(&mut self, path: Arc<dyn Path>) {
        let style = self.opts.default_style.clone();
        self.add_path_with_style(path, style);
    }

    /// Add a path with an explicit style. No-op if the same handle is
    /// already registered; the first registration's style wins.
    pub fn add_path_with_style(&mut self, path: Arc<dyn Path>, style: DrawingStyle) {
        if self.contains_path(&path) {
            return;
        }
        self.sequence.push(path.sequence());
        self.paths.push(path);
        self.styles.push(style);
        self.redraw = true;
        self.flush();
    }

    /// Remove a path by handle identity. No-op if absent.
    pub fn remove_path(&mut self, path: &Arc<dyn Path>) {
        let Some(idx) = self.index_of(path) else {
            return;
        };
        self.paths.remove(idx);
        self.styles.remove(idx);
        self.sequence.remove(idx);
        self.redraw = true;
        self.flush();
    }

    /// Whether this exact handle is registered.
    pub fn contains_path(&self, path: &Arc<dyn Path>) -> bool {
        self.index_of(path).is_some()
    }

    /// Number of registered paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether no paths are registered.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Clones of the registered path handles, in paint order.
    pub fn sim_objects(&self) -> Vec<Arc<dyn Path>> {
        self.paths.clone()
    }

    /// Style of the path at `idx` (registration order).
    pub fn style(&self, idx: usize) -> PathviewResult<&DrawingStyle> {
        self.styles.get(idx).ok_or(PathviewError::IndexOutOfRange {
            index: idx,
            len: self.styles.len(),
        })
    }

    /// Replace the style of the path at `idx`. Marks the display dirty but
    /// keeps the buffer; the next full redraw resolves the difference.
    pub fn set_style(&mut self, idx: usize, style: DrawingStyle) -> PathviewResult<()> {
        let len = self.styles.len();
        let slot = self
            .styles
            .get_mut(idx)
            .ok_or(PathviewError::IndexOutOfRange { index: idx, len })?;
        *slot = style;
        self.redraw = true;
        Ok(())
    }

    /// The screen rectangle this display paints into.
    pub fn screen_rect(&self) -> ScreenRect {
        self.screen_rect
    }

    /// Set the screen rectangle. Any existing buffer is released
    /// unconditionally: its contents are keyed to the previous geometry.
    pub fn set_screen_rect(&mut self, rect: ScreenRect) {
        self.screen_rect = rect;
        self.redraw = true;
        self.flush();
    }

    /// Whether rasterized output is cached in an offscreen buffer.
    pub fn use_buffer(&self) -> bool {
        self.use_buffer
    }

    /// Toggle offscreen buffering. Disabling releases the buffer
    /// immediately; enabling defers allocation until the next render.
    pub fn set_use_buffer(&mut self, use_buffer: bool) {
        self.use_buffer = use_buffer;
        self.redraw = true;
        if !use_buffer {
            self.flush();
        }
    }

    /// Snapshot of the rendering counters.
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Dimensions of the offscreen buffer, if one is currently allocated.
    pub fn buffer_size(&self) -> Option<(u32, u32)> {
        self.offscreen
            .as_ref()
            .map(|b| (u32::from(b.width()), u32::from(b.height())))
    }

    /// Render all registered paths onto `target`.
    ///
    /// Invoked once per frame by the frame driver. Skips rasterization when
    /// nothing changed since the previous render; skips everything when the
    /// screen rectangle is empty.
    #[tracing::instrument(skip_all, fields(paths = self.paths.len()))]
    pub fn render(
        &mut self,
        target: &mut vello_cpu::Pixmap,
        map: &CoordMap,
    ) -> PathviewResult<()> {
        // A change in sequence number means the path's geometry changed; any
        // one change forces a full redraw of all paths.
        for (cached, path) in self.sequence.iter_mut().zip(&self.paths) {
            let seq = path.sequence();
            if seq != *cached {
                *cached = seq;
                self.redraw = true;
            }
        }

        let rect = self.screen_rect;
        if rect.is_empty() {
            return Ok(());
        }

        if self.last_map != Some(map.id()) {
            self.last_map = Some(map.id());
            tracing::debug!("full redraw: coordinate map changed");
            self.redraw = true;
        }

        if self.use_buffer {
            if self.offscreen.as_ref().is_some_and(|b| !matches_rect(b, rect)) {
                self.flush();
            }
            if self.offscreen.is_none() {
                self.offscreen = Some(alloc_pixmap(rect)?);
                self.stats.buffer_reallocs += 1;
                // A fresh buffer is logically blank and must be fully painted.
                self.redraw = true;
                tracing::debug!(
                    width = rect.width,
                    height = rect.height,
                    "full redraw: buffer reallocated"
                );
            }
            if self.redraw {
                let mut buf = self
                    .offscreen
                    .take()
                    .ok_or_else(|| PathviewError::validation("offscreen buffer missing"))?;
                clear_to_transparent(&mut buf);
                self.rasterize(&mut buf, map)?;
                self.offscreen = Some(buf);
                self.redraw = false;
            }
            if let Some(buf) = &self.offscreen {
                blit_over(target, buf, 0, 0)?;
            }
        } else {
            // No cache to protect: every frame is a full redraw, composited
            // over whatever the caller has already painted.
            let mut scratch = alloc_pixmap(rect)?;
            self.rasterize(&mut scratch, map)?;
            blit_over(target, &scratch, 0, 0)?;
        }
        Ok(())
    }

    fn index_of(&self, path: &Arc<dyn Path>) -> Option<usize> {
        self.paths.iter().position(|p| Arc::ptr_eq(p, path))
    }

    /// Release the offscreen buffer now. The next buffered render
    /// reallocates and repaints from scratch.
    fn flush(&mut self) {
        self.offscreen = None;
    }

    /// One full pass: rasterize every registered path into `dst`.
    fn rasterize(&mut self, dst: &mut vello_cpu::Pixmap, map: &CoordMap) -> PathviewResult<()> {
        self.stats.raster_passes += 1;
        let (w, h) = (dst.width(), dst.height());
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        for idx in 0..self.paths.len() {
            let path = Arc::clone(&self.paths[idx]);
            let style = self.styles[idx].clone();
            self.draw_path(&mut ctx, path.as_ref(), map, &style);
        }
        ctx.flush();
        ctx.render_to_pixmap(dst);
        self.ctx = Some(ctx);
        Ok(())
    }

    /// Draw one path: accumulate geometry from its sample cursor, then issue
    /// a single stroke or fill. Paint state is set per path, so one path's
    /// style never leaks into the next.
    fn draw_path(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        path: &dyn Path,
        map: &CoordMap,
        style: &DrawingStyle,
    ) {
        let mut geometry = vello_cpu::kurbo::BezPath::new();
        let mut first = true;
        for p in path.samples(self.opts.max_draw_points) {
            let x = map.to_device_x(p.x);
            let y = map.to_device_y(p.y);
            match style.mode {
                DrawMode::Lines => {
                    if first {
                        geometry.move_to((x, y));
                        first = false;
                    } else {
                        geometry.line_to((x, y));
                    }
                }
                DrawMode::Dots => {
                    push_square(&mut geometry, x, y, style.line_width);
                }
            }
        }
        if geometry.is_empty() {
            return;
        }

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            style.color.r,
            style.color.g,
            style.color.b,
            style.color.a,
        ));
        match style.mode {
            DrawMode::Lines => {
                let mut stroke = vello_cpu::kurbo::Stroke::new(style.line_width);
                if !style.line_dash.is_empty() {
                    stroke = stroke.with_dashes(0.0, style.line_dash.iter().copied());
                }
                ctx.set_stroke(stroke);
                ctx.stroke_path(&geometry);
                self.stats.stroke_ops += 1;
            }
            DrawMode::Dots => {
                ctx.fill_path(&geometry);
                self.stats.fill_ops += 1;
            }
        }
    }
}

impl Default for DisplayPath {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DisplayPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayPath")
            .field("paths", &self.paths.len())
            .field("screen_rect", &self.screen_rect)
            .field("use_buffer", &self.use_buffer)
            .field("redraw", &self.redraw)
            .finish()
    }
}

impl DisplayObject for DisplayPath {
    fn draw(&mut self, target: &mut vello_cpu::Pixmap, map: &CoordMap) -> PathviewResult<()> {
        self.render(target, map)
    }

    /// Always false: relating the screen rectangle to simulation
    /// coordinates would need the current coordinate map, which this query
    /// does not receive.
    fn contains(&self, _point: Point) -> bool {
        false
    }

    /// Fixed sentinel; a path display has no meaningful single position.
    fn position(&self) -> Point {
        Point::ZERO
    }

    fn set_position(&mut self, _position: Point) {}

    fn is_dragable(&self) -> bool {
        false
    }

    fn set_dragable(&mut self, _dragable: bool) {}
}

/// Append an axis-aligned square of side `side` anchored at `(x, y)` as a
/// closed subpath.
fn push_square(out: &mut vello_cpu::kurbo::BezPath, x: f64, y: f64, side: f64) {
    out.move_to((x, y));
    out.line_to((x + side, y));
    out.line_to((x + side, y + side));
    out.line_to((x, y + side));
    out.close_path();
}

#[cfg(test)]
#[path = "../../tests/unit/view/display_path.rs"]
mod tests;
