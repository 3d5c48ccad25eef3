//! # Renderer
//!
//! Software rasterizer for the canvas. Rendering is a pure function of a stroke sequence and
//! an owned [`Surface`]; nothing here keeps state between frames.
//!
//! Strokes are drawn with round caps and round joins, each stroke is rasterized into a coverage
//! mask first and then composited once, so overlapping segments of the same stroke never
//! double-blend a translucent color.

use rayon::{iter::IndexedParallelIterator, iter::ParallelIterator, slice::ParallelSliceMut};
use scribble_core::{Canvas, Color, Point, Stroke};

/// What the canvas shows underneath the strokes.
#[derive(Clone, Debug)]
pub enum Background {
    Solid(Color),
    /// An imported picture, scaled to cover the canvas and center-cropped.
    Image(std::sync::Arc<image::RgbaImage>),
}
impl Default for Background {
    fn default() -> Self {
        Self::Solid(Color::WHITE)
    }
}
impl Background {
    /// Load a picture from disk as a background.
    pub fn open(path: &std::path::Path) -> image::ImageResult<Self> {
        let image = image::open(path)?.into_rgba8();
        Ok(Self::Image(image.into()))
    }
}

/// Largest surface side, in pixels. Keeps a full surface around a gigabyte.
pub const MAX_SIDE: u32 = 16384;

/// An owned RGBA8 (straight alpha) pixel buffer.
#[derive(Clone)]
pub struct Surface {
    image: image::RgbaImage,
}
impl Surface {
    /// A surface of the given size, filled with the background.
    ///
    /// Dimensions are clamped to `1..=MAX_SIDE`.
    #[must_use]
    pub fn new(width: u32, height: u32, background: &Background) -> Self {
        let (width, height) = (width.clamp(1, MAX_SIDE), height.clamp(1, MAX_SIDE));
        let image = match background {
            Background::Solid(color) => {
                image::RgbaImage::from_pixel(width, height, image::Rgba(color.to_rgba()))
            }
            Background::Image(picture) => cover(picture, width, height),
        };
        Self { image }
    }
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }
    /// Color at a pixel, `None` if out of bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let image::Rgba([r, g, b, a]) = *self.image.get_pixel_checked(x, y)?;
        Some(Color::from_rgba(r, g, b, a))
    }
    #[must_use]
    pub fn image(&self) -> &image::RgbaImage {
        &self.image
    }
    #[must_use]
    pub fn into_image(self) -> image::RgbaImage {
        self.image
    }
}

/// Scale `picture` up or down to fill `width` x `height` entirely, cropping the overflow evenly.
fn cover(picture: &image::RgbaImage, width: u32, height: u32) -> image::RgbaImage {
    let (pw, ph) = picture.dimensions();
    if pw == 0 || ph == 0 {
        return image::RgbaImage::from_pixel(width, height, image::Rgba(Color::WHITE.to_rgba()));
    }
    let scale = f64::max(
        f64::from(width) / f64::from(pw),
        f64::from(height) / f64::from(ph),
    );
    // Rounding up keeps at least `width` x `height` after scaling.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (sw, sh) = (
        ((f64::from(pw) * scale).ceil() as u32).max(width),
        ((f64::from(ph) * scale).ceil() as u32).max(height),
    );
    let scaled = image::imageops::resize(picture, sw, sh, image::imageops::FilterType::Triangle);
    image::imageops::crop_imm(&scaled, (sw - width) / 2, (sh - height) / 2, width, height)
        .to_image()
}

/// Paint `strokes` onto `surface`, in order. Empty strokes are skipped.
pub fn render<'a>(strokes: impl IntoIterator<Item = &'a Stroke>, surface: &mut Surface) {
    for stroke in strokes {
        render_stroke(stroke, surface);
    }
}

/// Render a canvas' full sequence, including the in-progress stroke, on a fresh surface.
#[must_use]
pub fn snapshot(canvas: &Canvas, background: &Background, width: u32, height: u32) -> Surface {
    let mut surface = Surface::new(width, height, background);
    render(canvas.render_sequence(), &mut surface);
    surface
}

/// Pixel rectangle `[x0, x1) x [y0, y1)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct PixelRect {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}
impl PixelRect {
    /// Pixels touched by the float rectangle, clipped to a `width` x `height` surface.
    /// `None` if nothing is left after clipping.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn clipped(min: Point, max: Point, width: u32, height: u32) -> Option<Self> {
        let clamp = |v: f32, limit: u32| -> u32 { v.clamp(0.0, limit as f32) as u32 };
        let rect = Self {
            x0: clamp(min.x.floor(), width),
            y0: clamp(min.y.floor(), height),
            x1: clamp(max.x.ceil() + 1.0, width),
            y1: clamp(max.y.ceil() + 1.0, height),
        };
        (rect.x0 < rect.x1 && rect.y0 < rect.y1).then_some(rect)
    }
    fn width(self) -> u32 {
        self.x1 - self.x0
    }
    fn height(self) -> u32 {
        self.y1 - self.y0
    }
}

/// Distance from `p` to the segment `a`-`b`.
fn segment_distance(p: Point, a: Point, b: Point) -> f32 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq > 0.0 {
        (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let closest = Point {
        x: a.x + abx * t,
        y: a.y + aby * t,
    };
    p.distance_squared(closest).sqrt()
}

fn render_stroke(stroke: &Stroke, surface: &mut Surface) {
    let points = stroke.points();
    let Some((min, max)) = stroke.bounds() else {
        return;
    };
    let (width, height) = (surface.width(), surface.height());
    let Some(area) = PixelRect::clipped(min, max, width, height) else {
        log::trace!("stroke entirely off-surface");
        return;
    };
    let radius = stroke.thickness().get() / 2.0;

    // Coverage in [0, 1] for every pixel of `area`, max-combined across segments.
    let mut mask = vec![0.0f32; area.width() as usize * area.height() as usize];
    // A lone point is a zero-length segment, which paints a round dot.
    let single = [points[0], points[0]];
    let segments = if points.len() == 1 {
        &single[..]
    } else {
        points
    };
    for pair in segments.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let seg_min = Point {
            x: a.x.min(b.x) - radius,
            y: a.y.min(b.y) - radius,
        };
        let seg_max = Point {
            x: a.x.max(b.x) + radius,
            y: a.y.max(b.y) + radius,
        };
        let Some(seg) = PixelRect::clipped(seg_min, seg_max, width, height) else {
            continue;
        };
        for y in seg.y0..seg.y1 {
            let row = (y - area.y0) as usize * area.width() as usize;
            for x in seg.x0..seg.x1 {
                #[allow(clippy::cast_precision_loss)]
                let center = Point {
                    x: x as f32 + 0.5,
                    y: y as f32 + 0.5,
                };
                // One pixel wide linear falloff centered on the true edge.
                let coverage = (radius + 0.5 - segment_distance(center, a, b)).clamp(0.0, 1.0);
                let slot = &mut mask[row + (x - area.x0) as usize];
                *slot = slot.max(coverage);
            }
        }
    }

    composite(&mut surface.image, area, &mask, stroke.color());
}

/// Blend `color` over the `area` of `image`, weighted by `mask`.
fn composite(image: &mut image::RgbaImage, area: PixelRect, mask: &[f32], color: Color) {
    let stride = image.width() as usize * 4;
    let [sr, sg, sb, sa] = color.to_rgba().map(|c| f32::from(c) / 255.0);
    let area_width = area.width() as usize;
    let rows: &mut [u8] = &mut **image;

    rows.par_chunks_mut(stride)
        .enumerate()
        .skip(area.y0 as usize)
        .take(area.height() as usize)
        .for_each(|(y, row)| {
            let mask_row = &mask[(y - area.y0 as usize) * area_width..][..area_width];
            let pixels = &mut row[area.x0 as usize * 4..area.x1 as usize * 4];
            for (pixel, &coverage) in pixels.chunks_exact_mut(4).zip(mask_row) {
                if coverage <= 0.0 {
                    continue;
                }
                let alpha = sa * coverage;
                let [dr, dg, db, da] = [pixel[0], pixel[1], pixel[2], pixel[3]]
                    .map(|c| f32::from(c) / 255.0);
                let out_a = alpha + da * (1.0 - alpha);
                if out_a <= 0.0 {
                    continue;
                }
                let mix = |s: f32, d: f32| (s * alpha + d * da * (1.0 - alpha)) / out_a;
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let to_byte = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
                pixel[0] = to_byte(mix(sr, dr));
                pixel[1] = to_byte(mix(sg, dg));
                pixel[2] = to_byte(mix(sb, db));
                pixel[3] = to_byte(out_a);
            }
        });
}

#[cfg(test)]
mod test {
    use super::{render, segment_distance, snapshot, Background, PixelRect, Surface, MAX_SIDE};
    use scribble_core::{Canvas, Color, Point, RedoPolicy, Stroke, Thickness};

    fn pt(x: f32, y: f32) -> Point {
        Point { x, y }
    }
    fn line(color: Color, width: f32, points: &[(f32, f32)]) -> Stroke {
        Stroke::from_points(
            color,
            Thickness::new(width).unwrap(),
            points.iter().map(|&(x, y)| pt(x, y)),
        )
    }

    #[test]
    fn background_fills() {
        let surface = Surface::new(4, 3, &Background::default());
        assert_eq!(surface.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(surface.pixel(3, 2), Some(Color::WHITE));
        assert_eq!(surface.pixel(4, 0), None);
    }
    #[test]
    fn surface_size_is_clamped() {
        let surface = Surface::new(u32::MAX, 0, &Background::default());
        assert_eq!((surface.width(), surface.height()), (MAX_SIDE, 1));
    }
    #[test]
    fn horizontal_line_paints_core_only() {
        let mut surface = Surface::new(20, 20, &Background::default());
        render([&line(Color::RED, 4.0, &[(2.0, 10.0), (18.0, 10.0)])], &mut surface);
        // Centered on the line.
        assert_eq!(surface.pixel(10, 9), Some(Color::RED));
        assert_eq!(surface.pixel(10, 10), Some(Color::RED));
        // Well outside the radius.
        assert_eq!(surface.pixel(10, 2), Some(Color::WHITE));
        assert_eq!(surface.pixel(10, 17), Some(Color::WHITE));
    }
    #[test]
    fn single_point_draws_dot() {
        let mut surface = Surface::new(20, 20, &Background::default());
        render([&line(Color::BLACK, 6.0, &[(10.0, 10.0)])], &mut surface);
        assert_eq!(surface.pixel(10, 10), Some(Color::BLACK));
        assert_eq!(surface.pixel(0, 0), Some(Color::WHITE));
    }
    #[test]
    fn empty_and_offscreen_strokes_are_skipped() {
        let mut surface = Surface::new(8, 8, &Background::default());
        let empty = Stroke::new(Color::BLACK, Thickness::HAIRLINE);
        let far = line(Color::BLACK, 2.0, &[(-100.0, -100.0), (-50.0, -90.0)]);
        render([&empty, &far], &mut surface);
        assert!(surface
            .image()
            .pixels()
            .all(|p| p.0 == Color::WHITE.to_rgba()));
    }
    #[test]
    fn later_strokes_paint_over_earlier() {
        let mut surface = Surface::new(20, 20, &Background::default());
        render(
            [
                &line(Color::RED, 6.0, &[(0.0, 10.0), (20.0, 10.0)]),
                &line(Color::BLUE, 6.0, &[(10.0, 0.0), (10.0, 20.0)]),
            ],
            &mut surface,
        );
        assert_eq!(surface.pixel(10, 10), Some(Color::BLUE));
        assert_eq!(surface.pixel(3, 10), Some(Color::RED));
    }
    #[test]
    fn translucent_stroke_blends_once() {
        let half_black = Color::from_rgba(0, 0, 0, 128);
        let mut surface = Surface::new(20, 20, &Background::default());
        // Doubles back on itself: a naive per-segment blend would darken the overlap.
        render(
            [&line(
                half_black,
                6.0,
                &[(2.0, 10.0), (18.0, 10.0), (2.0, 10.0)],
            )],
            &mut surface,
        );
        let [r, _, _, a] = surface.pixel(10, 10).unwrap().to_rgba();
        assert_eq!(a, 255);
        assert!((126..=128).contains(&r), "got {r}");
    }
    #[test]
    fn snapshot_includes_in_progress() {
        let mut canvas = Canvas::new(
            Color::GREEN,
            Thickness::new(4.0).unwrap(),
            RedoPolicy::ClearOnCommit,
        );
        canvas.begin_stroke(pt(5.0, 5.0));
        canvas.extend_stroke(pt(15.0, 5.0));
        let surface = snapshot(&canvas, &Background::Solid(Color::BLACK), 20, 20);
        assert_eq!(surface.pixel(10, 5), Some(Color::GREEN));
        assert_eq!(surface.pixel(10, 15), Some(Color::BLACK));
    }
    #[test]
    fn image_background_covers() {
        // 2x1 picture: left red, right blue, stretched to cover a 4x4 canvas.
        let mut picture = image::RgbaImage::new(2, 1);
        picture.put_pixel(0, 0, image::Rgba(Color::RED.to_rgba()));
        picture.put_pixel(1, 0, image::Rgba(Color::BLUE.to_rgba()));
        let surface = Surface::new(4, 4, &Background::Image(picture.into()));
        assert_eq!(surface.width(), 4);
        assert_eq!(surface.height(), 4);
        let left = surface.pixel(0, 2).unwrap().to_rgba();
        let right = surface.pixel(3, 2).unwrap().to_rgba();
        assert!(left[0] > left[2], "left should lean red: {left:?}");
        assert!(right[2] > right[0], "right should lean blue: {right:?}");
    }
    #[test]
    fn rect_clipping() {
        assert_eq!(
            PixelRect::clipped(pt(-5.0, -5.0), pt(2.2, 3.0), 10, 10),
            Some(PixelRect {
                x0: 0,
                y0: 0,
                x1: 4,
                y1: 4
            })
        );
        assert_eq!(PixelRect::clipped(pt(20.0, 0.0), pt(30.0, 5.0), 10, 10), None);
    }
    #[test]
    fn distance_to_segment() {
        assert_eq!(segment_distance(pt(5.0, 3.0), pt(0.0, 0.0), pt(10.0, 0.0)), 3.0);
        assert_eq!(segment_distance(pt(13.0, 4.0), pt(0.0, 0.0), pt(10.0, 0.0)), 5.0);
        assert_eq!(segment_distance(pt(3.0, 4.0), pt(0.0, 0.0), pt(0.0, 0.0)), 5.0);
    }
}
