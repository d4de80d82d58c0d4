//! Depth sources that produce a depth map for a requested output size

use std::path::Path;

use image::DynamicImage;

use crate::depth::map::DepthMap;
use crate::depth::template::{DepthTemplate, resample};
use crate::io::configuration::DEFAULT_TEMPLATE;
use crate::io::error::{Result, check_dimensions};
use crate::io::image::{depth_levels, load_depth_image};

/// Anything that can produce a depth map at a requested size
///
/// The engine depends only on this trait, never on a concrete source.
pub trait DepthSource {
    /// Produce a `width x height` depth map with samples in `[0, 1]`
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are zero or the source data
    /// cannot be interpreted as depth
    fn produce(&self, width: usize, height: usize) -> Result<DepthMap>;
}

impl<T: DepthSource + ?Sized> DepthSource for &T {
    fn produce(&self, width: usize, height: usize) -> Result<DepthMap> {
        T::produce(self, width, height)
    }
}

impl DepthSource for DepthMap {
    /// Resamples when the requested size differs from the map's own
    fn produce(&self, width: usize, height: usize) -> Result<DepthMap> {
        if self.width() == width && self.height() == height {
            return Ok(self.clone());
        }
        check_dimensions(width, height)?;
        DepthMap::from_array(resample(self.as_array(), width, height))
    }
}

/// Depth from a text or numeric template
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateSource {
    template: DepthTemplate,
}

impl TemplateSource {
    /// Wrap a template
    pub const fn new(template: DepthTemplate) -> Self {
        Self { template }
    }

    /// The wrapped template
    pub const fn template(&self) -> &DepthTemplate {
        &self.template
    }
}

impl Default for TemplateSource {
    fn default() -> Self {
        Self::new(DepthTemplate::from(DEFAULT_TEMPLATE))
    }
}

impl DepthSource for TemplateSource {
    fn produce(&self, width: usize, height: usize) -> Result<DepthMap> {
        self.template.to_depth_map(width, height)
    }
}

/// Depth from a grayscale raster image
///
/// The red channel is taken as the depth level, so black is the far plane
/// and the brightest pixel in the image becomes depth 1.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageSource {
    template: DepthTemplate,
}

impl ImageSource {
    /// Build from an image already in memory
    pub fn from_image(image: &DynamicImage) -> Self {
        Self {
            template: DepthTemplate::NumericGrid(depth_levels(image)),
        }
    }

    /// Load an image from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoded
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let image = load_depth_image(path)?;
        Ok(Self::from_image(&image))
    }
}

impl DepthSource for ImageSource {
    fn produce(&self, width: usize, height: usize) -> Result<DepthMap> {
        self.template.to_depth_map(width, height)
    }
}

/// Constant depth over the whole output
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlatSource {
    depth: f64,
}

impl FlatSource {
    /// Plane at the given depth (clamped to `[0, 1]`)
    pub const fn new(depth: f64) -> Self {
        Self { depth }
    }
}

impl DepthSource for FlatSource {
    fn produce(&self, width: usize, height: usize) -> Result<DepthMap> {
        DepthMap::flat(width, height, self.depth)
    }
}
