use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::error::{PathviewError, PathviewResult};

static NEXT_MAP_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity token for a [`CoordMap`] instance.
///
/// Change detection compares maps by this token, never by value: two
/// numerically identical maps constructed separately are treated as
/// different and force a full redraw. This coarse-invalidation policy is
/// deliberate; see [`CoordMap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MapId(u64);

/// Pure per-axis transform from simulation coordinates to device pixels.
///
/// `device = origin + sim * pixels_per_unit` on each axis. A negative
/// `pixels_per_y` gives the usual screen orientation with simulation y
/// increasing upward.
///
/// A `CoordMap` is not `Clone`: every constructed instance carries a fresh
/// [`MapId`], and identity is what the renderer's change detection keys on.
/// Callers that keep a map across frames get cache hits; callers that build
/// a new map each frame get (correct, but wasteful) full redraws.
#[derive(Debug)]
pub struct CoordMap {
    id: MapId,
    origin_x: f64,
    origin_y: f64,
    pixels_per_x: f64,
    pixels_per_y: f64,
}

impl CoordMap {
    /// Build a map from a device-pixel origin and per-axis scale factors.
    ///
    /// Scale factors must be finite and nonzero.
    pub fn new(
        origin_x: f64,
        origin_y: f64,
        pixels_per_x: f64,
        pixels_per_y: f64,
    ) -> PathviewResult<Self> {
        if !origin_x.is_finite() || !origin_y.is_finite() {
            return Err(PathviewError::validation("CoordMap origin must be finite"));
        }
        if !pixels_per_x.is_finite()
            || !pixels_per_y.is_finite()
            || pixels_per_x == 0.0
            || pixels_per_y == 0.0
        {
            return Err(PathviewError::validation(
                "CoordMap scale factors must be finite and nonzero",
            ));
        }
        Ok(Self {
            id: MapId(NEXT_MAP_ID.fetch_add(1, Ordering::Relaxed)),
            origin_x,
            origin_y,
            pixels_per_x,
            pixels_per_y,
        })
    }

    /// The identity transform: simulation units are device pixels.
    pub fn unit() -> Self {
        Self {
            id: MapId(NEXT_MAP_ID.fetch_add(1, Ordering::Relaxed)),
            origin_x: 0.0,
            origin_y: 0.0,
            pixels_per_x: 1.0,
            pixels_per_y: 1.0,
        }
    }

    /// This instance's identity token.
    pub fn id(&self) -> MapId {
        self.id
    }

    /// Map a simulation x coordinate to a device x coordinate.
    pub fn to_device_x(&self, sim_x: f64) -> f64 {
        self.origin_x + sim_x * self.pixels_per_x
    }

    /// Map a simulation y coordinate to a device y coordinate.
    pub fn to_device_y(&self, sim_y: f64) -> f64 {
        self.origin_y + sim_y * self.pixels_per_y
    }
}
