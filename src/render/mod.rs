//! Frame rendering: options, rasterization, blur and encoding.

pub mod blur;
pub mod encode;
pub mod options;
pub mod rasterize;

pub use blur::{box_blur, BLUR_PASSES};
pub use encode::{encode, encode_jpeg, encode_png, OutputFormat, ATLAS_JPEG_QUALITY};
pub use options::{effective_blur_radius, RenderOptions, BLUR_REFERENCE_WIDTH};
pub use rasterize::{rasterize, render_frame, FrameBuffer, Renderer};
