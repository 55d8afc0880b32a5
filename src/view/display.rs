use crate::foundation::core::Point;
use crate::foundation::error::PathviewResult;
use crate::view::coord_map::CoordMap;

/// Contract for entities a canvas can display and compose.
///
/// A canvas owns an ordered set of display objects and drives them once per
/// frame with a target surface and the current coordinate map. The position
/// and drag queries exist so a canvas can offer uniform hit-testing and
/// mouse-drag wiring; objects that are not interactive answer with fixed
/// degenerate responses rather than opting out of the trait.
pub trait DisplayObject {
    /// Draw this object onto `target` using `map` for coordinate conversion.
    fn draw(&mut self, target: &mut vello_cpu::Pixmap, map: &CoordMap) -> PathviewResult<()>;

    /// Whether the given simulation-coordinate point lies inside this object.
    fn contains(&self, point: Point) -> bool;

    /// Nominal position of this object in simulation coordinates.
    fn position(&self) -> Point;

    /// Move this object, if it supports being moved.
    fn set_position(&mut self, position: Point);

    /// Whether the object can currently be dragged.
    fn is_dragable(&self) -> bool;

    /// Enable or disable dragging, if the object supports it.
    fn set_dragable(&mut self, dragable: bool);
}
