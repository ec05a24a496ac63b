//! Target lifecycle: placement, growth animation, hit testing
//!
//! A target reserves an axis-aligned bounding square (side `2 * max_radius`)
//! at spawn time. Overlap avoidance works against these reserved squares, not
//! the animated radius, so growth never causes overlap with a target that was
//! valid when placed.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{FALLBACK_X, FALLBACK_Y, PLACEMENT_ATTEMPTS};

/// Axis-aligned rectangle in playfield coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Square of side `2 * half` centered at `center`
    pub fn square(center: Vec2, half: f32) -> Self {
        Self {
            min: center - Vec2::splat(half),
            max: center + Vec2::splat(half),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Strict overlap test; rects that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Spawn-time parameters, derived from the active mode's profile
#[derive(Debug, Clone, Copy)]
pub struct TargetConfig {
    pub max_radius: f32,
    pub outline_margin: f32,
    /// Animate radius from zero up to the peak and back down
    pub grows: bool,
    /// Full grow+shrink cycle length; ignored when `grows` is false
    pub grow_duration_ms: f32,
}

/// What a lifecycle step reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetPhase {
    Growing,
    Shrinking,
    /// Radius collapsed to zero; remove without crediting a hit
    Expired,
}

/// A clickable circular target
#[derive(Debug, Clone)]
pub struct Target {
    pub id: u32,
    pub position: Vec2,
    pub max_radius: f32,
    pub current_radius: f32,
    pub outline_margin: f32,
    pub grows: bool,
    pub grow_duration_ms: f32,
    pub reached_max: bool,
}

impl Target {
    /// Place a new target so its bounding square avoids `forbidden`.
    ///
    /// Tries up to [`PLACEMENT_ATTEMPTS`] uniform positions inside
    /// `[max_radius, dim - max_radius]` on each axis and accepts the first
    /// free one. A saturated playfield degrades to the fixed fallback
    /// position instead of searching forever; visual overlap is accepted
    /// there, a crash is not.
    pub fn spawn(
        id: u32,
        config: &TargetConfig,
        forbidden: &[Rect],
        bounds: Vec2,
        rng: &mut Pcg32,
    ) -> Self {
        let r = config.max_radius;
        let position = if bounds.x - r <= r || bounds.y - r <= r {
            log::warn!("target radius {r} does not fit playfield {bounds}, using fallback");
            Vec2::new(FALLBACK_X, FALLBACK_Y)
        } else {
            Self::free_position(r, forbidden, bounds, rng)
        };

        Self {
            id,
            position,
            max_radius: r,
            current_radius: if config.grows { 0.0 } else { r },
            outline_margin: config.outline_margin,
            grows: config.grows,
            grow_duration_ms: config.grow_duration_ms,
            reached_max: !config.grows,
        }
    }

    fn free_position(r: f32, forbidden: &[Rect], bounds: Vec2, rng: &mut Pcg32) -> Vec2 {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let candidate = Vec2::new(
                rng.random_range(r..=bounds.x - r),
                rng.random_range(r..=bounds.y - r),
            );
            let square = Rect::square(candidate, r);
            if !forbidden.iter().any(|f| square.overlaps(f)) {
                return candidate;
            }
        }
        log::debug!("placement search exhausted after {PLACEMENT_ATTEMPTS} tries");
        Vec2::new(FALLBACK_X, FALLBACK_Y)
    }

    /// Advance the radius animation by `elapsed_ms`.
    ///
    /// Static targets sit at `max_radius` and only ever report `Growing`;
    /// they are removed externally. Growing targets expand linearly to the
    /// peak over half the cycle, then collapse at the same rate.
    pub fn update(&mut self, elapsed_ms: f32) -> TargetPhase {
        if !self.grows {
            return TargetPhase::Growing;
        }

        let rate = self.max_radius / (self.grow_duration_ms / 2.0);
        if !self.reached_max {
            self.current_radius += rate * elapsed_ms;
            if self.current_radius >= self.max_radius {
                self.current_radius = self.max_radius;
                self.reached_max = true;
            }
            TargetPhase::Growing
        } else {
            self.current_radius -= rate * elapsed_ms;
            if self.current_radius <= 0.0 {
                self.current_radius = 0.0;
                TargetPhase::Expired
            } else {
                TargetPhase::Shrinking
            }
        }
    }

    /// True iff `point` lies inside the rendered circle; the boundary counts
    pub fn hit_test(&self, point: Vec2) -> bool {
        (point - self.position).length_squared() <= self.current_radius * self.current_radius
    }

    /// The spawn-time reserved footprint used for overlap avoidance
    pub fn occupied_rect(&self) -> Rect {
        Rect::square(self.position, self.max_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn bounds() -> Vec2 {
        Vec2::new(800.0, 600.0)
    }

    fn growing_config() -> TargetConfig {
        TargetConfig {
            max_radius: 50.0,
            outline_margin: 4.0,
            grows: true,
            grow_duration_ms: 1000.0,
        }
    }

    fn static_config() -> TargetConfig {
        TargetConfig {
            max_radius: 50.0,
            outline_margin: 4.0,
            grows: false,
            grow_duration_ms: 0.0,
        }
    }

    #[test]
    fn test_static_target_full_size_from_first_frame() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut t = Target::spawn(1, &static_config(), &[], bounds(), &mut rng);
        assert!(t.hit_test(t.position + Vec2::new(50.0, 0.0)));
        for _ in 0..1000 {
            assert_eq!(t.update(16.0), TargetPhase::Growing);
        }
        assert_eq!(t.current_radius, t.max_radius);
    }

    #[test]
    fn test_growth_peaks_then_expires() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut t = Target::spawn(1, &growing_config(), &[], bounds(), &mut rng);
        assert_eq!(t.current_radius, 0.0);

        // 500 ms of a 1000 ms cycle reaches the 50 px peak
        assert_eq!(t.update(500.0), TargetPhase::Growing);
        assert!((t.current_radius - 50.0).abs() < 1e-3);
        assert!(t.reached_max);

        assert_eq!(t.update(250.0), TargetPhase::Shrinking);
        assert!((t.current_radius - 25.0).abs() < 1e-3);

        assert_eq!(t.update(250.0), TargetPhase::Expired);
        assert_eq!(t.current_radius, 0.0);
    }

    #[test]
    fn test_hit_test_boundary_counts() {
        let mut rng = Pcg32::seed_from_u64(7);
        let t = Target::spawn(1, &static_config(), &[], bounds(), &mut rng);
        assert!(t.hit_test(t.position));
        assert!(t.hit_test(t.position + Vec2::new(0.0, t.max_radius)));
        assert!(!t.hit_test(t.position + Vec2::new(0.0, t.max_radius + 0.1)));
    }

    #[test]
    fn test_radius_stays_in_bounds() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut t = Target::spawn(1, &growing_config(), &[], bounds(), &mut rng);
        for _ in 0..200 {
            t.update(7.0);
            assert!(t.current_radius >= 0.0);
            assert!(t.current_radius <= t.max_radius);
        }
    }

    #[test]
    fn test_spawned_rects_do_not_overlap() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut occupied: Vec<Rect> = Vec::new();
        // Six 50 px targets fit comfortably in 800x600
        for id in 0..6 {
            let t = Target::spawn(id, &static_config(), &occupied, bounds(), &mut rng);
            let rect = t.occupied_rect();
            for prior in &occupied {
                assert!(!rect.overlaps(prior), "target {id} overlaps a prior rect");
            }
            occupied.push(rect);
        }
    }

    #[test]
    fn test_saturated_playfield_falls_back() {
        let mut rng = Pcg32::seed_from_u64(42);
        // One rect covering the whole playfield leaves nowhere legal
        let wall = Rect::new(Vec2::ZERO, bounds());
        let t = Target::spawn(1, &static_config(), &[wall], bounds(), &mut rng);
        assert_eq!(t.position, Vec2::new(FALLBACK_X, FALLBACK_Y));
    }

    #[test]
    fn test_oversized_radius_falls_back() {
        let mut rng = Pcg32::seed_from_u64(42);
        let config = TargetConfig {
            max_radius: 500.0,
            ..static_config()
        };
        let t = Target::spawn(1, &config, &[], bounds(), &mut rng);
        assert_eq!(t.position, Vec2::new(FALLBACK_X, FALLBACK_Y));
    }

    #[test]
    fn test_edge_sharing_rects_do_not_overlap() {
        let a = Rect::square(Vec2::new(100.0, 100.0), 50.0);
        let b = Rect::square(Vec2::new(200.0, 100.0), 50.0);
        assert!(!a.overlaps(&b));
        let c = Rect::square(Vec2::new(199.0, 100.0), 50.0);
        assert!(a.overlaps(&c));
    }

    proptest! {
        /// Placement either finds a free square or lands on the fallback,
        /// for any seed and any reasonable target count.
        #[test]
        fn prop_spawn_respects_reservations(seed in 0u64..10_000, count in 1usize..12) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut occupied: Vec<Rect> = Vec::new();
            for id in 0..count {
                let t = Target::spawn(id as u32, &static_config(), &occupied, bounds(), &mut rng);
                let rect = t.occupied_rect();
                let fallback = t.position == Vec2::new(FALLBACK_X, FALLBACK_Y);
                if !fallback {
                    prop_assert!(occupied.iter().all(|prior| !rect.overlaps(prior)));
                }
                occupied.push(rect);
            }
        }
    }
}
