//! Ordered color palettes for the random dot fill

use std::str::FromStr;

use rand::Rng;

use crate::io::error::{Result, StereogramError, palette_error};

/// RGBA color with 8-bit channels
pub type Rgba = [u8; 4];

/// Fully opaque alpha channel value
pub const OPAQUE: u8 = u8::MAX;

/// Non-empty ordered list of colors
///
/// Pixels refer to colors by their index into the palette, so the order
/// must stay fixed for the duration of a render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Palette {
    /// Wrap an explicit list of colors
    ///
    /// # Errors
    ///
    /// Returns an error if `colors` is empty
    pub fn new(colors: Vec<Rgba>) -> Result<Self> {
        if colors.is_empty() {
            return Err(palette_error(&"palette must contain at least one color"));
        }
        Ok(Self { colors })
    }

    /// Generate `num_colors` uniformly random opaque colors
    ///
    /// # Errors
    ///
    /// Returns an error if `num_colors` is zero
    pub fn generate<R: Rng>(num_colors: usize, rng: &mut R) -> Result<Self> {
        Self::new(random_colors(num_colors, rng))
    }

    /// Replace every color with a fresh random one
    ///
    /// Keeps the current number of colors unless `num_colors` is given.
    ///
    /// # Errors
    ///
    /// Returns an error if `num_colors` is `Some(0)`; the palette is left
    /// unchanged in that case
    pub fn regenerate<R: Rng>(
        &mut self,
        num_colors: Option<usize>,
        rng: &mut R,
    ) -> Result<()> {
        let count = num_colors.unwrap_or(self.colors.len());
        *self = Self::generate(count, rng)?;
        Ok(())
    }

    /// Parse a comma separated list of hex colors such as `"0f0,#00f,ff8800"`
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or any entry is not a 3 or 6
    /// digit hex color
    pub fn from_hex_list(list: &str) -> Result<Self> {
        let colors = list
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(parse_hex_color)
            .collect::<Result<Vec<_>>>()?;
        Self::new(colors)
    }

    /// Number of colors
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false, palettes are never empty
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`, if in range
    pub fn get(&self, index: usize) -> Option<Rgba> {
        self.colors.get(index).copied()
    }

    /// All colors in order
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }
}

impl FromStr for Palette {
    type Err = StereogramError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex_list(s)
    }
}

fn random_colors<R: Rng>(num_colors: usize, rng: &mut R) -> Vec<Rgba> {
    (0..num_colors)
        .map(|_| [rng.random(), rng.random(), rng.random(), OPAQUE])
        .collect()
}

/// Parse `#rgb`, `rgb`, `#rrggbb` or `rrggbb` into an opaque color
///
/// # Errors
///
/// Returns an error if the text is not a 3 or 6 digit hex color
pub fn parse_hex_color(text: &str) -> Result<Rgba> {
    let digits = text.strip_prefix('#').unwrap_or(text);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(palette_error(&format!("'{text}' is not a hex color")));
    }

    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
    };

    let rgb = match digits.len() {
        // Shorthand digits are doubled, so "f80" is "ff8800"
        3 => [channel(0..1), channel(1..2), channel(2..3)].map(|c| c.map(|v| v * 0x11)),
        6 => [channel(0..2), channel(2..4), channel(4..6)],
        _ => {
            return Err(palette_error(&format!(
                "'{text}' must have 3 or 6 hex digits"
            )));
        }
    };

    match rgb {
        [Some(r), Some(g), Some(b)] => Ok([r, g, b, OPAQUE]),
        _ => Err(palette_error(&format!("'{text}' is not a hex color"))),
    }
}
