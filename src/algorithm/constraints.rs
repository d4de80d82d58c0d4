//! Per-row stereo constraints with hidden-surface removal
//!
//! For every column of a row the solver projects the surface point seen
//! there onto the two image columns that the left and right eye use for it.
//! When neither eye's line of sight is blocked by a nearer neighbor the two
//! columns are recorded as having to share a color. The sweep runs left to
//! right and later columns may re-link pairs recorded earlier, so the order
//! matters and is part of the result.
//!
//! The geometry follows Thimbleby, Inglis and Witten, "Displaying 3D Images:
//! Algorithms for Single Image Random Dot Stereograms" (IEEE Computer, 1994).

use crate::math::StereoGeometry;

/// Equivalence links between the columns of one row
///
/// Each column points at itself or at a strictly larger column. Following
/// the links from any column therefore moves right and ends at a
/// self-pointing representative, which is what lets colors be resolved in a
/// single right to left pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SameLinks {
    links: Vec<usize>,
}

impl SameLinks {
    /// Every column linked only to itself
    pub fn new(width: usize) -> Self {
        Self {
            links: (0..width).collect(),
        }
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// True for a zero-width row
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Column that `x` links to, if `x` is in range
    pub fn get(&self, x: usize) -> Option<usize> {
        self.links.get(x).copied()
    }

    /// Raw link table
    pub fn as_slice(&self) -> &[usize] {
        &self.links
    }

    /// True if `x` links only to itself
    pub fn is_representative(&self, x: usize) -> bool {
        self.get(x) == Some(x)
    }

    /// Number of columns constrained to another column
    pub fn linked_count(&self) -> usize {
        self.links
            .iter()
            .enumerate()
            .filter(|&(x, &target)| target != x)
            .count()
    }

    /// Representative of the class containing `x`
    ///
    /// Follows links rightwards until reaching a self-pointing column.
    pub fn find(&self, x: usize) -> usize {
        let mut current = x;
        while let Some(next) = self.get(current) {
            if next <= current {
                break;
            }
            current = next;
        }
        current
    }

    /// Record that columns `left` and `right` must share a color
    ///
    /// Walks the existing chain from `left`, re-pointing through any column
    /// already linked, so that every column still links to a larger one.
    /// Pairs that are out of range or not ordered `left < right` are ignored.
    pub fn link(&mut self, left: usize, right: usize) {
        if left >= right || right >= self.links.len() {
            return;
        }

        let (mut left, mut right) = (left, right);
        while let Some(k) = self.get(left) {
            if k == left || k == right {
                break;
            }
            if k < right {
                left = k;
            } else {
                left = right;
                right = k;
            }
        }

        if let Some(slot) = self.links.get_mut(left) {
            *slot = right;
        }
    }
}

/// Computes the equivalence links of one row of a depth map
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConstraintSolver {
    geometry: StereoGeometry,
}

impl ConstraintSolver {
    /// Create a solver for the given viewing geometry
    pub const fn new(geometry: StereoGeometry) -> Self {
        Self { geometry }
    }

    /// Viewing geometry in use
    pub const fn geometry(&self) -> &StereoGeometry {
        &self.geometry
    }

    /// Separation in pixels of the two image points of depth `z`
    pub fn separation(&self, z: f64) -> i64 {
        self.geometry.separation(z)
    }

    /// Link the columns of row `y` whose depth samples are `row`
    ///
    /// `y` only selects the half-pixel stagger applied to odd separations.
    pub fn solve_row(&self, row: &[f64], y: usize) -> SameLinks {
        let width = row.len() as i64;
        let mut same = SameLinks::new(row.len());

        for (x, &z) in row.iter().enumerate() {
            let separation = self.separation(z);
            let left = StereoGeometry::left_column(x, y, separation);
            let right = left + separation;

            if left < 0 || right >= width {
                continue;
            }

            if self.is_visible(row, x, z) {
                same.link(left as usize, right as usize);
            }
        }

        same
    }

    /// Whether the point at column `x` with depth `z` is seen by both eyes
    ///
    /// Steps outwards from `x` until the sight lines leave the depth range.
    /// A neighbor at or above the sight line at that distance hides the
    /// point; a neighbor beyond either end of the row counts as hiding it.
    pub fn is_visible(&self, row: &[f64], x: usize, z: f64) -> bool {
        let mut t = 1;
        loop {
            let zt = self.geometry.occlusion_threshold(z, t);
            let below_sight_line = |column: Option<usize>| {
                column
                    .and_then(|c| row.get(c))
                    .is_some_and(|&depth| depth < zt)
            };
            let visible = below_sight_line(x.checked_sub(t)) && below_sight_line(x.checked_add(t));
            t += 1;

            if !visible || zt >= 1.0 {
                return visible;
            }
        }
    }
}
