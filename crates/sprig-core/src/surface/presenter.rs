// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Presentation contracts implemented by host bindings.

use super::canvas::Canvas;
use crate::geometry::DisplayGeometry;
use thiserror::Error;

/// A transient presentation fault. Neither variant is fatal: the frame loop
/// skips or redraws the frame.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PresentError {
    /// The host surface is not ready (minimized, not yet mapped, detached).
    #[error("presentation surface is not available")]
    Unavailable,
    /// The presented contents were lost and must be drawn again.
    #[error("presentation surface contents were lost")]
    ContentsLost,
}

/// The visible half of the double buffer.
///
/// Used only by the frame loop thread, once per pass: [`acquire`] then
/// [`present`].
///
/// [`acquire`]: Presenter::acquire
/// [`present`]: Presenter::present
pub trait Presenter {
    /// Obtains the drawable target for this pass.
    fn acquire(&mut self) -> Result<(), PresentError>;

    /// Scale-blits `canvas` onto the acquired target and shows it.
    fn present(&mut self, canvas: &Canvas, scale: u32) -> Result<(), PresentError>;
}

/// The surface-provisioning capability every host binding supplies.
///
/// The provider is moved onto the frame loop thread, which creates its
/// presenter there and releases the host resources after shutdown.
pub trait SurfaceProvider: Send {
    /// Creates the presentable surface for `geometry`.
    fn create_presenter(&mut self, geometry: DisplayGeometry) -> anyhow::Result<Box<dyn Presenter>>;

    /// Releases host resources: disposes the window or detaches the embedded
    /// surface.
    fn release(&mut self);
}

/// Copies `src` into `dst` magnified by an integer `scale`.
///
/// `dst` is a row-major buffer `dst_width` pixels wide. Pixels of `dst`
/// outside the magnified image are left untouched, and the image is clipped
/// to `dst`.
pub fn blit_scaled(src: &Canvas, scale: u32, dst: &mut [u32], dst_width: u32) {
    let scale = scale.max(1) as usize;
    let dst_width = dst_width as usize;
    if dst_width == 0 {
        return;
    }
    let dst_height = dst.len() / dst_width;
    let src_width = src.width() as usize;
    let cols = (src_width * scale).min(dst_width);
    let rows = (src.height() as usize * scale).min(dst_height);

    for y in 0..rows {
        let src_row = &src.pixels()[(y / scale) * src_width..][..src_width];
        let dst_row = &mut dst[y * dst_width..][..cols];
        if scale == 1 {
            dst_row.copy_from_slice(&src_row[..cols]);
        } else {
            for (x, pixel) in dst_row.iter_mut().enumerate() {
                *pixel = src_row[x / scale];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_scale_is_a_copy() {
        let mut canvas = Canvas::new(3, 2);
        canvas.set_pixel(2, 1, 5);
        let mut dst = vec![0; 6];
        blit_scaled(&canvas, 1, &mut dst, 3);
        assert_eq!(dst, canvas.pixels());
    }

    #[test]
    fn double_scale_replicates_pixels() {
        let mut canvas = Canvas::new(2, 1);
        canvas.set_pixel(0, 0, 1);
        canvas.set_pixel(1, 0, 2);

        let mut dst = vec![0; 8];
        blit_scaled(&canvas, 2, &mut dst, 4);
        assert_eq!(dst, vec![1, 1, 2, 2, 1, 1, 2, 2]);
    }

    #[test]
    fn larger_target_keeps_its_margin() {
        let mut canvas = Canvas::new(1, 1);
        canvas.clear(3);

        let mut dst = vec![9; 9];
        blit_scaled(&canvas, 2, &mut dst, 3);
        assert_eq!(dst, vec![3, 3, 9, 3, 3, 9, 9, 9, 9]);
    }

    #[test]
    fn smaller_target_is_clipped() {
        let mut canvas = Canvas::new(4, 4);
        canvas.clear(1);

        let mut dst = vec![0; 3];
        blit_scaled(&canvas, 2, &mut dst, 3);
        assert_eq!(dst, vec![1, 1, 1]);
    }
}
