use super::*;
use crate::foundation::core::Rgba8;
use crate::model::path::SampledPath;

fn seg(points: &[(f64, f64)]) -> Arc<SampledPath> {
    Arc::new(SampledPath::from_points(
        points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
    ))
}

fn target() -> vello_cpu::Pixmap {
    vello_cpu::Pixmap::new(128, 128)
}

#[test]
fn parallel_fields_stay_aligned_across_add_remove() {
    let mut d = DisplayPath::new();
    let a: Arc<dyn Path> = seg(&[(0.0, 0.0), (1.0, 1.0)]);
    let b: Arc<dyn Path> = seg(&[(2.0, 2.0)]);
    let c: Arc<dyn Path> = seg(&[(3.0, 3.0)]);

    d.add_path(a.clone());
    d.add_path_with_style(b.clone(), DrawingStyle::dots(Rgba8::BLUE, 2.0));
    d.add_path(c.clone());
    assert_eq!(d.paths.len(), 3);
    assert_eq!(d.styles.len(), 3);
    assert_eq!(d.sequence.len(), 3);

    d.remove_path(&b);
    assert_eq!(d.paths.len(), 2);
    assert_eq!(d.styles.len(), 2);
    assert_eq!(d.sequence.len(), 2);
    assert!(d.contains_path(&a));
    assert!(!d.contains_path(&b));
    assert!(d.contains_path(&c));
    // Registration order survives removal.
    assert!(Arc::ptr_eq(&d.paths[0], &a));
    assert!(Arc::ptr_eq(&d.paths[1], &c));
}

#[test]
fn add_path_is_idempotent_and_first_style_wins() {
    let mut d = DisplayPath::new();
    let p: Arc<dyn Path> = seg(&[(0.0, 0.0)]);
    let first = DrawingStyle::line(Rgba8::RED, 1.0);

    d.add_path_with_style(p.clone(), first.clone());
    d.add_path_with_style(p.clone(), DrawingStyle::dots(Rgba8::BLUE, 4.0));
    d.add_path(p.clone());

    assert_eq!(d.len(), 1);
    assert_eq!(*d.style(0).unwrap(), first);
}

#[test]
fn remove_absent_path_is_a_noop() {
    let mut d = DisplayPath::new();
    let p: Arc<dyn Path> = seg(&[(0.0, 0.0)]);
    let other: Arc<dyn Path> = seg(&[(0.0, 0.0)]);
    d.add_path(p);

    d.remove_path(&other);
    assert_eq!(d.len(), 1);
}

#[test]
fn style_access_is_bounds_checked() {
    let mut d = DisplayPath::new();
    assert!(matches!(
        d.style(0),
        Err(PathviewError::IndexOutOfRange { index: 0, len: 0 })
    ));

    d.add_path(seg(&[(0.0, 0.0)]));
    assert!(d.style(0).is_ok());
    assert!(matches!(
        d.set_style(5, DrawingStyle::default()),
        Err(PathviewError::IndexOutOfRange { index: 5, len: 1 })
    ));
}

#[test]
fn buffer_is_sized_exactly_to_the_screen_rect() {
    let mut d = DisplayPath::new();
    d.add_path(seg(&[(0.0, 0.0), (10.0, 10.0)]));
    d.set_screen_rect(ScreenRect::new(100, 50));

    let map = CoordMap::unit();
    d.render(&mut target(), &map).unwrap();
    assert_eq!(d.buffer_size(), Some((100, 50)));
}

#[test]
fn resizing_the_rect_releases_and_reallocates_the_buffer() {
    let mut d = DisplayPath::new();
    d.add_path(seg(&[(0.0, 0.0), (10.0, 10.0)]));
    d.set_screen_rect(ScreenRect::new(20, 20));

    let map = CoordMap::unit();
    d.render(&mut target(), &map).unwrap();
    assert_eq!(d.stats().buffer_reallocs, 1);

    d.set_screen_rect(ScreenRect::new(30, 10));
    assert_eq!(d.buffer_size(), None);

    d.render(&mut target(), &map).unwrap();
    assert_eq!(d.buffer_size(), Some((30, 10)));
    assert_eq!(d.stats().buffer_reallocs, 2);
}

#[test]
fn unchanged_frames_skip_rasterization() {
    let mut d = DisplayPath::new();
    d.add_path(seg(&[(0.0, 0.0), (10.0, 10.0)]));
    d.set_screen_rect(ScreenRect::new(32, 32));

    let map = CoordMap::unit();
    d.render(&mut target(), &map).unwrap();
    let after_first = d.stats().raster_passes;
    assert_eq!(after_first, 1);

    d.render(&mut target(), &map).unwrap();
    d.render(&mut target(), &map).unwrap();
    assert_eq!(d.stats().raster_passes, after_first);
}

#[test]
fn a_changed_sequence_re_renders_all_paths() {
    let mut d = DisplayPath::new();
    let p1 = seg(&[(0.0, 0.0), (10.0, 10.0)]);
    let p2 = seg(&[(5.0, 5.0)]);
    d.add_path_with_style(p1.clone(), DrawingStyle::line(Rgba8::RED, 1.0));
    d.add_path_with_style(p2.clone() as Arc<dyn Path>, DrawingStyle::dots(Rgba8::BLUE, 2.0));
    d.set_screen_rect(ScreenRect::new(32, 32));

    let map = CoordMap::unit();
    d.render(&mut target(), &map).unwrap();
    d.render(&mut target(), &map).unwrap();
    let before = d.stats();

    p1.push(Point::new(12.0, 12.0));
    d.render(&mut target(), &map).unwrap();
    let after = d.stats();

    // Exactly one extra pass, and it covered both paths.
    assert_eq!(after.raster_passes, before.raster_passes + 1);
    assert_eq!(after.stroke_ops, before.stroke_ops + 1);
    assert_eq!(after.fill_ops, before.fill_ops + 1);
}

#[test]
fn a_new_map_instance_forces_a_redraw_even_if_numerically_equal() {
    let mut d = DisplayPath::new();
    d.add_path(seg(&[(0.0, 0.0), (10.0, 10.0)]));
    d.set_screen_rect(ScreenRect::new(32, 32));

    let map_a = CoordMap::unit();
    d.render(&mut target(), &map_a).unwrap();
    d.render(&mut target(), &map_a).unwrap();
    let before = d.stats().raster_passes;

    let map_b = CoordMap::unit();
    d.render(&mut target(), &map_b).unwrap();
    assert_eq!(d.stats().raster_passes, before + 1);
}

#[test]
fn set_style_marks_dirty_without_touching_the_buffer() {
    let mut d = DisplayPath::new();
    d.add_path(seg(&[(0.0, 0.0), (10.0, 10.0)]));
    d.set_screen_rect(ScreenRect::new(32, 32));

    let map = CoordMap::unit();
    d.render(&mut target(), &map).unwrap();
    let before = d.stats();

    d.set_style(0, DrawingStyle::line(Rgba8::GREEN, 2.0)).unwrap();
    assert_eq!(d.buffer_size(), Some((32, 32)));

    d.render(&mut target(), &map).unwrap();
    let after = d.stats();
    assert_eq!(after.raster_passes, before.raster_passes + 1);
    assert_eq!(after.buffer_reallocs, before.buffer_reallocs);
}

#[test]
fn empty_region_renders_nothing() {
    let mut d = DisplayPath::new();
    d.add_path(seg(&[(0.0, 0.0), (10.0, 10.0)]));

    let map = CoordMap::unit();
    let mut t = target();
    d.render(&mut t, &map).unwrap();

    assert_eq!(d.stats(), RenderStats::default());
    assert_eq!(d.buffer_size(), None);
    assert!(t.data_as_u8_slice().iter().all(|&b| b == 0));

    d.set_screen_rect(ScreenRect::new(32, 0));
    d.render(&mut t, &map).unwrap();
    assert_eq!(d.stats(), RenderStats::default());
}

#[test]
fn unbuffered_mode_redraws_every_frame() {
    let mut d = DisplayPath::with_opts(DisplayPathOpts {
        use_buffer: false,
        ..DisplayPathOpts::default()
    });
    d.add_path(seg(&[(0.0, 0.0), (10.0, 10.0)]));
    d.set_screen_rect(ScreenRect::new(32, 32));

    let map = CoordMap::unit();
    d.render(&mut target(), &map).unwrap();
    d.render(&mut target(), &map).unwrap();

    assert_eq!(d.stats().raster_passes, 2);
    assert_eq!(d.stats().buffer_reallocs, 0);
    assert_eq!(d.buffer_size(), None);
}

#[test]
fn toggling_buffering_releases_now_and_allocates_lazily() {
    let mut d = DisplayPath::new();
    d.add_path(seg(&[(0.0, 0.0), (10.0, 10.0)]));
    d.set_screen_rect(ScreenRect::new(32, 32));

    let map = CoordMap::unit();
    d.render(&mut target(), &map).unwrap();
    assert!(d.buffer_size().is_some());

    d.set_use_buffer(false);
    assert_eq!(d.buffer_size(), None);

    d.set_use_buffer(true);
    // Lazy: nothing allocated until the next render.
    assert_eq!(d.buffer_size(), None);
    d.render(&mut target(), &map).unwrap();
    assert_eq!(d.buffer_size(), Some((32, 32)));
}

#[test]
fn display_object_contract_is_fixed_and_degenerate() {
    let mut d = DisplayPath::new();
    assert_eq!(d.position(), Point::ZERO);
    assert!(!d.is_dragable());
    assert!(!DisplayObject::contains(&d, Point::new(0.0, 0.0)));

    // Drag mutators are deliberate no-ops.
    d.set_position(Point::new(40.0, 40.0));
    d.set_dragable(true);
    assert_eq!(d.position(), Point::ZERO);
    assert!(!d.is_dragable());
}

#[test]
fn sim_objects_returns_registered_handles_in_order() {
    let mut d = DisplayPath::new();
    let a: Arc<dyn Path> = seg(&[(0.0, 0.0)]);
    let b: Arc<dyn Path> = seg(&[(1.0, 1.0)]);
    d.add_path(a.clone());
    d.add_path(b.clone());

    let objs = d.sim_objects();
    assert_eq!(objs.len(), 2);
    assert!(Arc::ptr_eq(&objs[0], &a));
    assert!(Arc::ptr_eq(&objs[1], &b));
}
