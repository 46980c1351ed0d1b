//! Separable box blur over RGBA buffers.
//!
//! Each pass runs a moving average along every row and then along every
//! column. Windows shrink at the buffer edges. Repeating the pair of passes
//! approximates a Gaussian.

use crate::error::{IsothermError, Result};

/// Number of horizontal+vertical pass pairs used by the renderer
pub const BLUR_PASSES: usize = 3;

/// Blur the RGB channels of a tightly packed RGBA buffer in place.
///
/// Alpha does not take part in the averages and is written as 255. A radius
/// of zero leaves the buffer untouched. Radii reaching past the longer edge
/// average whole lines, the same as a radius of that edge length minus one.
pub fn box_blur(
    buffer: &mut [u8],
    width: usize,
    height: usize,
    radius: usize,
    passes: usize,
) -> Result<()> {
    let expected = width * height * 4;
    if buffer.len() != expected {
        return Err(IsothermError::invalid_parameter(
            "buffer",
            format!(
                "RGBA buffer for {}x{} must hold {} bytes, got {}",
                width,
                height,
                expected,
                buffer.len()
            ),
        ));
    }
    let radius = radius.min(width.max(height).saturating_sub(1));
    if radius == 0 || expected == 0 {
        return Ok(());
    }

    let mut scratch = vec![0u8; expected];
    for _ in 0..passes {
        for y in 0..height {
            blur_line(buffer, &mut scratch, y * width, 1, width, radius);
        }
        for x in 0..width {
            blur_line(&scratch, buffer, x, width, height, radius);
        }
    }
    Ok(())
}

/// Moving average along one line of `len` pixels, starting at pixel `start`
/// and advancing `stride` pixels per step.
fn blur_line(src: &[u8], dst: &mut [u8], start: usize, stride: usize, len: usize, radius: usize) {
    let offset = |i: usize| (start + i * stride) * 4;

    let mut sums = [0u32; 3];
    let mut count = 0u32;
    let add = |sums: &mut [u32; 3], count: &mut u32, i: usize| {
        let o = offset(i);
        for c in 0..3 {
            sums[c] += src[o + c] as u32;
        }
        *count += 1;
    };

    for i in 0..=radius.min(len - 1) {
        add(&mut sums, &mut count, i);
    }

    for i in 0..len {
        let o = offset(i);
        for c in 0..3 {
            dst[o + c] = ((2 * sums[c] + count) / (2 * count)) as u8;
        }
        dst[o + 3] = 255;

        if i >= radius {
            let out = offset(i - radius);
            for c in 0..3 {
                sums[c] -= src[out + c] as u32;
            }
            count -= 1;
        }
        if i + radius + 1 < len {
            add(&mut sums, &mut count, i + radius + 1);
        }
    }
}
