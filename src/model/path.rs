use std::cell::{Cell, RefCell};
use std::fmt;

use crate::foundation::core::Point;

/// An externally computed curve that a display can draw.
///
/// The display never computes geometry itself; it only consumes two
/// capabilities from each path:
///
/// - a **sequence number** that increases monotonically on every geometric
///   mutation, used for cheap change detection across frames, and
/// - a bounded, restartable **sample cursor**: every call to
///   [`Path::samples`] returns a fresh iterator over at most `max_count`
///   points, with no cross-frame state retained in the path.
///
/// Paths are registered as `Arc<dyn Path>` handles and compared by identity
/// (`Arc::ptr_eq`), never by structural equality: two distinct path objects
/// with identical geometry are distinct registrations.
pub trait Path: fmt::Debug {
    /// Current change-sequence number. Must never decrease.
    fn sequence(&self) -> u64;

    /// A fresh cursor over at most `max_count` sample points in simulation
    /// coordinates.
    fn samples(&self, max_count: usize) -> Box<dyn Iterator<Item = Point> + '_>;
}

/// A [`Path`] backed by an explicit list of sample points.
///
/// Mutators take `&self` (interior mutability) so a path can be updated while
/// registered under a shared handle, matching the single-threaded contract of
/// the display: all mutation happens from the render thread, never during an
/// in-flight render. Every mutation bumps the sequence number.
#[derive(Debug, Default)]
pub struct SampledPath {
    points: RefCell<Vec<Point>>,
    sequence: Cell<u64>,
}

impl SampledPath {
    /// An empty path at sequence 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// A path seeded with `points`, starting at sequence 1.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            points: RefCell::new(points),
            sequence: Cell::new(1),
        }
    }

    /// Append one point.
    pub fn push(&self, point: Point) {
        self.points.borrow_mut().push(point);
        self.bump();
    }

    /// Replace the whole point list.
    pub fn set_points(&self, points: Vec<Point>) {
        *self.points.borrow_mut() = points;
        self.bump();
    }

    /// Remove all points.
    pub fn clear(&self) {
        self.points.borrow_mut().clear();
        self.bump();
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.points.borrow().len()
    }

    /// Whether the path has no points.
    pub fn is_empty(&self) -> bool {
        self.points.borrow().is_empty()
    }

    fn bump(&self) {
        self.sequence.set(self.sequence.get() + 1);
    }
}

impl Path for SampledPath {
    fn sequence(&self) -> u64 {
        self.sequence.get()
    }

    fn samples(&self, max_count: usize) -> Box<dyn Iterator<Item = Point> + '_> {
        // Snapshot up to the cap so the cursor stays valid even if the path
        // is mutated while an iterator is alive.
        let pts: Vec<Point> = self.points.borrow().iter().copied().take(max_count).collect();
        Box::new(pts.into_iter())
    }
}
