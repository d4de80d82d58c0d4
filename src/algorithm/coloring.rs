//! Resolves a row's equivalence links into palette indices

use bitvec::prelude::*;
use rand::Rng;

use crate::algorithm::constraints::SameLinks;

/// Summary of one colored row
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowStats {
    /// Columns that received a fresh random color
    pub free_pixels: usize,
    /// Columns that copied the color of their representative
    pub constrained_pixels: usize,
    /// Representatives found uncolored when a linked column needed them
    ///
    /// Links only ever point right, so this stays zero. A non-zero count
    /// means the link table was corrupted and those classes were recolored.
    pub unresolved_links: usize,
}

impl RowStats {
    /// Sum two row summaries
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        Self {
            free_pixels: self.free_pixels + other.free_pixels,
            constrained_pixels: self.constrained_pixels + other.constrained_pixels,
            unresolved_links: self.unresolved_links + other.unresolved_links,
        }
    }
}

/// Assigns palette indices to a row right to left
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorAssigner {
    num_colors: usize,
}

impl ColorAssigner {
    /// Create an assigner drawing from `num_colors` palette entries
    ///
    /// A count of zero is treated as one so every index stays valid.
    pub fn new(num_colors: usize) -> Self {
        Self {
            num_colors: num_colors.max(1),
        }
    }

    /// Number of palette entries drawn from
    pub const fn num_colors(&self) -> usize {
        self.num_colors
    }

    /// Fill `row` with palette indices that honor `same`
    ///
    /// Self-linked columns draw a uniform random index, visited from the
    /// rightmost column leftwards. Every other column copies the index of
    /// its class representative, which lies to its right and has already
    /// been colored. Only the first `min(row.len(), same.len())` columns are
    /// written.
    pub fn assign_row<R: Rng>(&self, same: &SameLinks, rng: &mut R, row: &mut [usize]) -> RowStats {
        let width = row.len().min(same.len());
        let mut colored = bitvec![0; width];
        let mut stats = RowStats::default();

        for x in (0..width).rev() {
            let representative = same.find(x);

            let index = if representative == x {
                stats.free_pixels += 1;
                rng.random_range(0..self.num_colors)
            } else if let (Some(true), Some(&index)) =
                (colored.get(representative).as_deref().copied(), row.get(representative))
            {
                stats.constrained_pixels += 1;
                index
            } else {
                stats.unresolved_links += 1;
                rng.random_range(0..self.num_colors)
            };

            if let Some(pixel) = row.get_mut(x) {
                *pixel = index;
            }
            colored.set(x, true);
        }

        stats
    }
}
