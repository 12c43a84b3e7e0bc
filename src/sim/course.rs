//! Procedural obstacle course
//!
//! A course is a strip of tile-wide columns resting on a shared ground
//! baseline. Only the column tags are stored; obstacle rectangles are
//! projected on demand for whatever window the caller is looking at.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::tuning::CourseTuning;

/// What occupies a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColumnKind {
    #[default]
    Empty,
    /// Full tile block standing on the baseline
    Solid,
    /// Spike on the baseline; fatal from every side
    Hazard,
}

/// Collision geometry of one non-empty column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub column: usize,
    pub kind: ColumnKind,
    pub rect: Rect,
}

/// The static layout for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    params: CourseTuning,
    ground_y: f32,
    columns: Vec<ColumnKind>,
}

impl Course {
    /// Generate a fresh random course
    ///
    /// `params` must pass [`CourseTuning::validate`]; out-of-range chances or
    /// reversed ranges panic inside the generator.
    pub fn generate<R: Rng + ?Sized>(params: CourseTuning, ground_y: f32, rng: &mut R) -> Self {
        let columns = layout(&params, rng);
        let course = Self {
            params,
            ground_y,
            columns,
        };
        course.log_summary();
        course
    }

    /// Build a course from a fixed column layout
    ///
    /// The layout is taken as-is: the safe start is not enforced.
    pub fn from_columns(params: CourseTuning, ground_y: f32, columns: Vec<ColumnKind>) -> Self {
        Self {
            params,
            ground_y,
            columns,
        }
    }

    /// Discard the current layout and roll a new one, with the same
    /// validated-params requirement as [`Course::generate`]
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.columns = layout(&self.params, rng);
        self.log_summary();
    }

    fn log_summary(&self) {
        log::info!(
            "Generated course: {} columns ({} solid, {} hazard, {} empty)",
            self.columns.len(),
            self.count(ColumnKind::Solid),
            self.count(ColumnKind::Hazard),
            self.count(ColumnKind::Empty),
        );
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[ColumnKind] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<ColumnKind> {
        self.columns.get(index).copied()
    }

    pub fn count(&self, kind: ColumnKind) -> usize {
        self.columns.iter().filter(|&&c| c == kind).count()
    }

    pub fn tile_size(&self) -> f32 {
        self.params.tile_size
    }

    pub fn ground_y(&self) -> f32 {
        self.ground_y
    }

    pub fn total_width(&self) -> f32 {
        self.columns.len() as f32 * self.params.tile_size
    }

    /// Geometry of a column, `None` for empty or out-of-range columns
    pub fn obstacle_at(&self, column: usize) -> Option<Obstacle> {
        let tile = self.params.tile_size;
        let kind = self.column(column)?;
        let rect = match kind {
            ColumnKind::Empty => return None,
            ColumnKind::Solid => Rect::new(column as f32 * tile, self.ground_y - tile, tile, tile),
            ColumnKind::Hazard => {
                let h = tile * self.params.hazard_height;
                Rect::new(
                    column as f32 * tile + tile * self.params.hazard_inset,
                    self.ground_y - h,
                    tile * self.params.hazard_width,
                    h,
                )
            }
        };
        Some(Obstacle { column, kind, rect })
    }

    /// Indices of every column whose tile overlaps
    /// `[view_start - margin * tile, view_start + view_width + margin * tile)`,
    /// clipped to the course
    pub fn column_range(
        &self,
        view_start: f32,
        view_width: f32,
        margin: usize,
    ) -> std::ops::Range<usize> {
        let tile = self.params.tile_size;
        let first = (view_start / tile).floor() as i64 - margin as i64;
        let end = ((view_start + view_width) / tile).ceil() as i64 + margin as i64;
        let first = first.max(0);
        let end = end.min(self.columns.len() as i64);
        if first >= end {
            return 0..0;
        }
        first as usize..end as usize
    }

    /// Obstacles near the view window, in column order
    ///
    /// Two columns of margin on each side keep a full frame of travel
    /// inside the query.
    pub fn active_colliders(
        &self,
        view_start: f32,
        view_width: f32,
    ) -> impl Iterator<Item = Obstacle> + '_ {
        self.colliders_with_margin(view_start, view_width, crate::consts::VIEW_MARGIN_COLUMNS)
    }

    /// Like [`Course::active_colliders`] with an explicit column margin
    pub fn colliders_with_margin(
        &self,
        view_start: f32,
        view_width: f32,
        margin: usize,
    ) -> impl Iterator<Item = Obstacle> + '_ {
        self.column_range(view_start, view_width, margin)
            .filter_map(|c| self.obstacle_at(c))
    }

    /// Refill `buf` with the obstacles near the view window
    pub fn active_colliders_into(
        &self,
        view_start: f32,
        view_width: f32,
        margin: usize,
        buf: &mut Vec<Obstacle>,
    ) {
        buf.clear();
        buf.extend(self.colliders_with_margin(view_start, view_width, margin));
    }
}

/// Roll a column layout: random gaps between short platforms, with the
/// occasional hazard in place of a block, then a guaranteed safe start
fn layout<R: Rng + ?Sized>(params: &CourseTuning, rng: &mut R) -> Vec<ColumnKind> {
    debug_assert!(params.validate().is_ok(), "course tuning must be validated");
    let count = params.column_count;
    let mut columns = vec![ColumnKind::Empty; count];

    let mut i = 0;
    while i < count {
        if rng.random_bool(params.gap_chance) {
            i += rng.random_range(params.gap_min..=params.gap_max);
        }
        if i >= count {
            break;
        }
        let len = rng.random_range(params.platform_min..=params.platform_max);
        for _ in 0..len {
            if i >= count {
                break;
            }
            columns[i] = if rng.random_bool(params.hazard_chance) {
                ColumnKind::Hazard
            } else {
                ColumnKind::Solid
            };
            i += 1;
        }
    }

    for column in columns.iter_mut().take(params.safe_start_columns) {
        *column = ColumnKind::Solid;
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const GROUND: f32 = 590.4;

    fn course(seed: u64) -> Course {
        let mut rng = Pcg32::seed_from_u64(seed);
        Course::generate(CourseTuning::default(), GROUND, &mut rng)
    }

    #[test]
    fn test_generated_course_shape() {
        let course = course(7);
        assert_eq!(course.len(), 160);
        assert!(course.columns()[..6].iter().all(|&c| c == ColumnKind::Solid));
        assert_eq!(course.total_width(), 160.0 * 64.0);
    }

    #[test]
    fn test_same_seed_same_layout() {
        assert_eq!(course(42).columns(), course(42).columns());
    }

    #[test]
    fn test_regenerate_discards_layout() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut course = Course::generate(CourseTuning::default(), GROUND, &mut rng);
        let first = course.columns().to_vec();
        course.regenerate(&mut rng);
        assert_eq!(course.len(), 160);
        // 154 random columns matching by chance is not a realistic outcome
        assert_ne!(course.columns(), &first[..]);
    }

    #[test]
    fn test_solid_geometry() {
        let course = Course::from_columns(
            CourseTuning::default(),
            GROUND,
            vec![ColumnKind::Solid, ColumnKind::Empty, ColumnKind::Hazard],
        );
        let block = course.obstacle_at(0).unwrap();
        assert_eq!(block.rect, Rect::new(0.0, GROUND - 64.0, 64.0, 64.0));
        assert!((block.rect.bottom() - GROUND).abs() < 1e-4);
        assert!(course.obstacle_at(1).is_none());
        assert!(course.obstacle_at(3).is_none());
    }

    #[test]
    fn test_hazard_geometry_is_smaller_than_block() {
        let course = Course::from_columns(
            CourseTuning::default(),
            GROUND,
            vec![ColumnKind::Empty, ColumnKind::Hazard],
        );
        let spike = course.obstacle_at(1).unwrap();
        assert_eq!(spike.kind, ColumnKind::Hazard);
        assert!((spike.rect.left() - (64.0 + 9.6)).abs() < 1e-4);
        assert!((spike.rect.size.x - 44.8).abs() < 1e-4);
        assert!((spike.rect.size.y - 28.8).abs() < 1e-4);
        assert!((spike.rect.bottom() - GROUND).abs() < 1e-4);
    }

    #[test]
    fn test_active_colliders_window() {
        let course = Course::from_columns(CourseTuning::default(), GROUND, vec![ColumnKind::Solid; 160]);
        // view 640..1280 covers columns 10..=19, plus two on each side
        let cols: Vec<usize> = course.active_colliders(640.0, 640.0).map(|o| o.column).collect();
        assert_eq!(cols, (8..=21).collect::<Vec<_>>());

        // a view edge just past a tile boundary pulls in the next column
        let cols: Vec<usize> = course.active_colliders(640.5, 640.0).map(|o| o.column).collect();
        assert_eq!(cols, (8..=22).collect::<Vec<_>>());
    }

    #[test]
    fn test_active_colliders_clip_to_course() {
        let course = Course::from_columns(CourseTuning::default(), GROUND, vec![ColumnKind::Solid; 10]);
        let cols: Vec<usize> = course.active_colliders(0.0, 128.0).map(|o| o.column).collect();
        assert_eq!(cols, vec![0, 1, 2, 3]);
        assert_eq!(course.active_colliders(100_000.0, 1280.0).count(), 0);
        assert_eq!(course.active_colliders(-10_000.0, 1280.0).count(), 0);
    }

    #[test]
    fn test_active_colliders_skip_empty() {
        let course = Course::from_columns(
            CourseTuning::default(),
            GROUND,
            vec![ColumnKind::Solid, ColumnKind::Empty, ColumnKind::Hazard, ColumnKind::Solid],
        );
        let kinds: Vec<ColumnKind> = course.active_colliders(0.0, 256.0).map(|o| o.kind).collect();
        assert_eq!(kinds, vec![ColumnKind::Solid, ColumnKind::Hazard, ColumnKind::Solid]);
    }

    #[test]
    fn test_into_buffer_is_refilled() {
        let course = course(11);
        let mut buf = Vec::new();
        course.active_colliders_into(0.0, 1280.0, 2, &mut buf);
        let first = buf.len();
        course.active_colliders_into(0.0, 1280.0, 2, &mut buf);
        assert_eq!(buf.len(), first);
        assert!(buf.windows(2).all(|w| w[0].column < w[1].column));
    }

    #[test]
    fn test_trailing_hazard_outside_margin() {
        // view end 9990.25 lands just past the start of column 156
        let course = course(626670042774888401);
        let tile = course.tile_size();
        let start = 8710.25;
        assert_eq!(course.column_range(start, 1280.0, 2), 134..159);
        for o in course.active_colliders(start, 1280.0) {
            assert!(o.column < 159);
            assert!(o.rect.left() < start + 1280.0 + 2.0 * tile + course.params.hazard_inset * tile);
        }
    }

    #[test]
    fn test_generate_rejects_unvalidated_tuning() {
        let params = CourseTuning {
            gap_min: 3,
            gap_max: 1,
            ..CourseTuning::default()
        };
        assert!(params.validate().is_err());
        let result = std::panic::catch_unwind(|| {
            let mut rng = Pcg32::seed_from_u64(1);
            Course::generate(params, GROUND, &mut rng)
        });
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn prop_course_invariants(seed in any::<u64>()) {
            let course = course(seed);
            prop_assert_eq!(course.len(), 160);
            prop_assert!(course.columns()[..6].iter().all(|&c| c == ColumnKind::Solid));
            prop_assert_eq!(
                course.count(ColumnKind::Empty) + course.count(ColumnKind::Solid) + course.count(ColumnKind::Hazard),
                160
            );
        }

        #[test]
        fn prop_colliders_stay_in_window(seed in any::<u64>(), start in -2000.0f32..12000.0) {
            let course = course(seed);
            let tile = course.tile_size();
            for o in course.active_colliders(start, 1280.0) {
                prop_assert!(o.kind != ColumnKind::Empty);
                prop_assert!(o.column < course.len());
                prop_assert!((o.column as f32 + 1.0) * tile > start - 2.0 * tile);
                prop_assert!((o.column as f32) * tile < start + 1280.0 + 2.0 * tile);
            }
        }
    }
}
