use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::complex::Complex;
use crate::error::CoreError;
use crate::grid::PixelCoord;

/// Multiplier bounds applied to a single zoom step. A wheel event that claims
/// a factor outside this range is clamped before it touches the scale.
const ZOOM_FACTOR_MIN: f64 = 1e-6;
const ZOOM_FACTOR_MAX: f64 = 1e6;

// ---------------------------------------------------------------------------
// Scale
// ---------------------------------------------------------------------------

/// World-units-per-pixel step along each screen axis.
///
/// `x` is positive (screen columns grow rightward, real axis grows rightward)
/// and `y` is negative in every viewport produced by [`Viewport::home`], which
/// flips the screen's downward row direction into the conventional upward
/// imaginary axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

impl Scale {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn is_valid(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.x != 0.0 && self.y != 0.0
    }
}

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// The complete view state: which rectangle of the complex plane the screen
/// shows, and how deep the escape test iterates.
///
/// `offset` is the world coordinate under pixel (0, 0) and [`Scale`] holds
/// the world step between adjacent pixels, so the pixel-to-world map is the
/// affine [`world_at`](Self::world_at). Constructed through
/// [`Viewport::home`] or validated via [`Viewport::new`]; the mutating
/// operations ([`pan`](Self::pan), [`zoom_about`](Self::zoom_about),
/// [`adjust_max_count`](Self::adjust_max_count)) keep the state valid by
/// ignoring, with a log line, any step whose input is degenerate or whose
/// resulting offset or scale would leave the finite range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    /// World coordinate under the pixel at column 0, row 0.
    pub offset: Complex,
    /// Per-axis world step between adjacent pixels.
    pub scale: Scale,
    /// Escape-test iteration cap. Points still bounded after this many
    /// iterations are treated as inside the set.
    pub max_count: u32,
}

impl Viewport {
    /// Iteration cap used by [`home`](Self::home).
    pub const DEFAULT_MAX_COUNT: u32 = 256;

    /// World extent fitted to the smaller screen dimension by
    /// [`home`](Self::home). Three units leave a margin around the radius-2
    /// escape circle on the fitted axis.
    pub const HOME_EXTENT: f64 = 3.0;

    /// Builds a viewport from raw parts, rejecting values that would make the
    /// pixel-to-world map degenerate.
    pub fn new(offset: Complex, scale: Scale, max_count: u32) -> crate::Result<Self> {
        if !offset.is_finite() {
            return Err(CoreError::InvalidOffset {
                re: offset.re,
                im: offset.im,
            });
        }
        if !scale.is_valid() {
            return Err(CoreError::InvalidScale {
                x: scale.x,
                y: scale.y,
            });
        }
        if max_count < 1 {
            return Err(CoreError::InvalidIterationCap(max_count));
        }
        Ok(Self {
            offset,
            scale,
            max_count,
        })
    }

    /// The overview framing: origin at the screen centre, y axis flipped, and
    /// [`HOME_EXTENT`](Self::HOME_EXTENT) world units spanning the smaller
    /// screen dimension so the whole set is visible regardless of aspect
    /// ratio. A zero dimension is treated as one pixel to keep the step
    /// finite.
    pub fn home(screen_width: u32, screen_height: u32) -> Self {
        let fit = screen_width.min(screen_height).max(1) as f64;
        let step = Self::HOME_EXTENT / fit;
        Self {
            offset: Complex::new(
                -(screen_width as f64) / 2.0 * step,
                (screen_height as f64) / 2.0 * step,
            ),
            scale: Scale::new(step, -step),
            max_count: Self::DEFAULT_MAX_COUNT,
        }
    }

    /// Discards pan, zoom, and cap changes and returns to the home framing
    /// for the given screen size.
    pub fn reset(&mut self, screen_width: u32, screen_height: u32) {
        *self = Self::home(screen_width, screen_height);
        debug!(
            offset = %self.offset,
            scale_x = self.scale.x,
            "viewport reset to home framing"
        );
    }

    /// World coordinate under a screen pixel. This is the map the renderer
    /// samples and the inverse the input layer needs for cursor readouts and
    /// zoom anchoring.
    #[inline]
    pub fn world_at(&self, pixel: PixelCoord) -> Complex {
        Complex::new(
            self.offset.re + pixel.col as f64 * self.scale.x,
            self.offset.im + pixel.row as f64 * self.scale.y,
        )
    }

    /// Moves the view window by a pixel-space delta: positive `dx_px` slides
    /// the window rightward across the plane and positive `dy_px` slides it
    /// down the screen, so a drag gesture that pulls the content along hands
    /// in the negated cursor delta. Non-finite deltas, and steps that would
    /// push the offset out of the finite plane, are ignored.
    pub fn pan(&mut self, dx_px: f64, dy_px: f64) {
        if !(dx_px.is_finite() && dy_px.is_finite()) {
            warn!(dx_px, dy_px, "ignoring non-finite pan delta");
            return;
        }
        let moved = self.offset + Complex::new(dx_px * self.scale.x, dy_px * self.scale.y);
        if !moved.is_finite() {
            warn!(dx_px, dy_px, "pan would overflow the offset; ignoring");
            return;
        }
        self.offset = moved;
    }

    /// Scales the view about an anchor pixel. Factors below 1 zoom in.
    ///
    /// The world coordinate under the anchor is the fixed point of the
    /// transform: after the call, `world_at(anchor)` is unchanged up to
    /// rounding, which is what makes wheel zoom track the cursor. Degenerate
    /// factors are ignored, extreme ones clamped, and a step that would push
    /// the scale out of the finite non-zero range, or the re-anchored offset
    /// out of the finite plane, is refused outright.
    pub fn zoom_about(&mut self, factor: f64, anchor: PixelCoord) {
        if !factor.is_finite() || factor <= 0.0 {
            warn!(factor, "ignoring degenerate zoom factor");
            return;
        }
        let clamped = factor.clamp(ZOOM_FACTOR_MIN, ZOOM_FACTOR_MAX);
        if clamped != factor {
            debug!(factor, clamped, "zoom factor clamped");
        }
        let scaled = Scale::new(self.scale.x * clamped, self.scale.y * clamped);
        if !scaled.is_valid() {
            warn!(
                factor = clamped,
                scale_x = self.scale.x,
                "zoom step would leave the finite scale range; ignoring"
            );
            return;
        }
        let anchor_world = self.world_at(anchor);
        let moved = Complex::new(
            anchor_world.re - anchor.col as f64 * scaled.x,
            anchor_world.im - anchor.row as f64 * scaled.y,
        );
        if !moved.is_finite() {
            warn!(
                factor = clamped,
                offset = %self.offset,
                "zoom step would overflow the offset; ignoring"
            );
            return;
        }
        self.scale = scaled;
        self.offset = moved;
    }

    /// Nudges the iteration cap. The delta is wide enough to jump between
    /// any two caps in one call; the result clamps at 1 so the escape test
    /// always runs at least one iteration.
    pub fn adjust_max_count(&mut self, delta: i64) {
        let next = i64::from(self.max_count).saturating_add(delta);
        self.max_count = next.clamp(1, i64::from(u32::MAX)) as u32;
    }
}

impl<'de> Deserialize<'de> for Viewport {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            offset: Complex,
            scale: Scale,
            max_count: u32,
        }
        let raw = Raw::deserialize(deserializer)?;
        Viewport::new(raw.offset, raw.scale, raw.max_count).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
