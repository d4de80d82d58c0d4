//! Depth templates in their caller-facing encodings
//!
//! A template is a small grid of depth levels that gets normalized to
//! `[0, 1]` and stretched over the output with nearest-neighbor sampling.
//! These all describe the same raised square:
//!
//! ```text
//! RowStrings(["   ", " # ", "   "])
//! RowStrings(["000", "010", "000"])
//! MultilineString("000\n010\n000")
//! NumericGrid([[0, 0, 0], [0, 1, 0], [0, 0, 0]])
//! ```

use std::convert::Infallible;
use std::str::FromStr;

use ndarray::Array2;

use crate::depth::map::DepthMap;
use crate::io::error::{Result, check_dimensions, template_format_error};

/// Depth template encodings accepted at the library boundary
#[derive(Clone, Debug, PartialEq)]
pub enum DepthTemplate {
    /// One string per row, each character one cell
    RowStrings(Vec<String>),
    /// Rows separated by newlines, each character one cell
    MultilineString(String),
    /// Numeric levels of any magnitude, rows may differ in length
    NumericGrid(Vec<Vec<f64>>),
}

impl DepthTemplate {
    /// Convert the template into a normalized grid
    ///
    /// Levels are divided by the highest level and short rows are padded
    /// with zeros to the width of the longest row.
    ///
    /// # Errors
    ///
    /// Returns an error if the template has no rows, every row is empty,
    /// or a numeric level is not finite
    pub fn normalize(&self) -> Result<Array2<f64>> {
        let levels = match self {
            Self::RowStrings(rows) => rows.iter().map(|row| text_levels(row)).collect(),
            Self::MultilineString(text) => split_rows(text).map(text_levels).collect(),
            Self::NumericGrid(grid) => grid.clone(),
        };
        normalize_levels(&levels)
    }

    /// Normalize and resample the template to `width x height`
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are zero or the template is invalid
    pub fn to_depth_map(&self, width: usize, height: usize) -> Result<DepthMap> {
        check_dimensions(width, height)?;
        let template = self.normalize()?;
        DepthMap::from_array(resample(&template, width, height))
    }
}

impl FromStr for DepthTemplate {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::MultilineString(s.to_string()))
    }
}

impl From<&str> for DepthTemplate {
    fn from(text: &str) -> Self {
        Self::MultilineString(text.to_string())
    }
}

impl From<Vec<String>> for DepthTemplate {
    fn from(rows: Vec<String>) -> Self {
        Self::RowStrings(rows)
    }
}

impl From<Vec<Vec<f64>>> for DepthTemplate {
    fn from(grid: Vec<Vec<f64>>) -> Self {
        Self::NumericGrid(grid)
    }
}

fn split_rows(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|row| row.strip_suffix('\r').unwrap_or(row))
}

// Blank is level 0, a digit is its own level, anything else is level 1
fn text_levels(row: &str) -> Vec<f64> {
    row.chars()
        .map(|c| match c {
            ' ' => 0.0,
            _ => c.to_digit(10).map_or(1.0, f64::from),
        })
        .collect()
}

fn normalize_levels(levels: &[Vec<f64>]) -> Result<Array2<f64>> {
    if levels.is_empty() {
        return Err(template_format_error(&"template has no rows"));
    }

    let template_width = levels.iter().map(Vec::len).max().unwrap_or(0);
    if template_width == 0 {
        return Err(template_format_error(&"every template row is empty"));
    }

    let mut highest = 0.0_f64;
    for (y, row) in levels.iter().enumerate() {
        for (x, &level) in row.iter().enumerate() {
            if !level.is_finite() {
                return Err(template_format_error(&format!(
                    "level at row {y}, column {x} is not a finite number"
                )));
            }
            highest = highest.max(level);
        }
    }

    // An all-zero template is a flat plane rather than 0 / 0
    let scale = if highest > 0.0 { highest } else { 1.0 };

    let mut template = Array2::zeros((levels.len(), template_width));
    for (y, row) in levels.iter().enumerate() {
        for (x, &level) in row.iter().enumerate() {
            if let Some(cell) = template.get_mut((y, x)) {
                *cell = level / scale;
            }
        }
    }

    Ok(template)
}

/// Nearest-neighbor resampling of a normalized template
///
/// Output cell `(y, x)` takes template cell
/// `(floor(y * template_height / height), floor(x * template_width / width))`.
pub fn resample(template: &Array2<f64>, width: usize, height: usize) -> Array2<f64> {
    let (template_height, template_width) = template.dim();

    Array2::from_shape_fn((height, width), |(y, x)| {
        let template_y = y * template_height / height;
        let template_x = x * template_width / width;
        template
            .get((template_y, template_x))
            .copied()
            .unwrap_or(0.0)
    })
}
