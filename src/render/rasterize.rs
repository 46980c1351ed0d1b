//! Frame rasterization.
//!
//! Every output pixel is projected back onto the equirectangular grid. Ocean
//! pixels (nearest node missing) are painted white; everything else is
//! resampled bicubically and colored through the ramp. Optional blur runs
//! over the whole frame, after which the ocean pixels are painted white again.

use image::{Rgba, RgbaImage};
use tracing::debug;

use super::blur::{box_blur, BLUR_PASSES};
use super::options::{effective_blur_radius, RenderOptions};
use crate::colormaps::ColorRamp;
use crate::error::{IsothermError, Result};
use crate::grid::{grid_coords, GridView, LAT_MAX, LNG_MIN};
use crate::interpolation::{BicubicInterpolator, NearestInterpolator};

/// RGBA raster with alpha always 255
pub type FrameBuffer = RgbaImage;

const OCEAN: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A resolved, reusable rendering setup.
///
/// Holds no per-frame state, so one renderer can draw many days.
#[derive(Debug, Clone)]
pub struct Renderer {
    ramp: ColorRamp,
    blur_radius: f64,
}

impl Renderer {
    /// Resolve options, failing before any pixel is drawn.
    pub fn new(options: &RenderOptions) -> Result<Self> {
        options.validate_blur()?;
        Ok(Self {
            ramp: options.resolve_ramp()?,
            blur_radius: options.requested_blur(),
        })
    }

    pub fn ramp(&self) -> &ColorRamp {
        &self.ramp
    }

    pub fn blur_radius(&self) -> f64 {
        self.blur_radius
    }

    /// Draw one frame of `width` x `height`.
    pub fn render(&self, grid: GridView<'_>, width: u32, height: u32) -> Result<FrameBuffer> {
        if width == 0 || height == 0 {
            return Err(IsothermError::invalid_parameter(
                "size",
                format!("frame dimensions must be positive, got {}x{}", width, height),
            ));
        }

        let mut frame = RgbaImage::new(width, height);
        let mut ocean = vec![false; width as usize * height as usize];

        for (x, y, pixel) in frame.enumerate_pixels_mut() {
            let lat = LAT_MAX - (y as f64 / height as f64) * 180.0;
            let lng = (x as f64 / width as f64) * 360.0 + LNG_MIN;
            let (g_lat, g_lng) = grid_coords(lat, lng);

            if NearestInterpolator::sample(grid, g_lat, g_lng).is_none() {
                ocean[y as usize * width as usize + x as usize] = true;
                *pixel = OCEAN;
                continue;
            }

            let value = BicubicInterpolator::sample(grid, g_lat, g_lng);
            *pixel = Rgba(self.ramp.rgba_of(value));
        }

        let radius = effective_blur_radius(self.blur_radius, width);
        if radius > 0 {
            debug!(radius, width, height, "Blurring frame");
            box_blur(&mut frame, width as usize, height as usize, radius, BLUR_PASSES)?;
            restamp_ocean(&mut frame, &ocean);
        }

        Ok(frame)
    }
}

/// Paint every masked pixel opaque white.
fn restamp_ocean(frame: &mut FrameBuffer, ocean: &[bool]) {
    for (pixel, &is_ocean) in frame.pixels_mut().zip(ocean) {
        if is_ocean {
            *pixel = OCEAN;
        }
    }
}

/// Rasterize one frame at an explicit size.
pub fn rasterize(
    grid: GridView<'_>,
    options: &RenderOptions,
    width: u32,
    height: u32,
) -> Result<FrameBuffer> {
    Renderer::new(options)?.render(grid, width, height)
}

/// Rasterize one frame at the size carried by the options (1024x512 default).
pub fn render_frame(grid: GridView<'_>, options: &RenderOptions) -> Result<FrameBuffer> {
    let (width, height) = options.frame_size();
    rasterize(grid, options, width, height)
}
