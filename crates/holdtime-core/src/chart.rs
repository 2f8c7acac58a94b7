//! Raster rendering of overlaid hold-time histograms.

use image::{Pixel, Rgba, RgbaImage};

use crate::config::ChartConfig;
use crate::histogram::Histogram;
use crate::summary::ChannelSummary;

/// Series colours, cycled in series order.
pub const SERIES_COLORS: [[u8; 3]; 4] = [
    [0x1f, 0x77, 0xb4],
    [0xff, 0x7f, 0x0e],
    [0x2c, 0xa0, 0x2c],
    [0xd6, 0x27, 0x28],
];

const BAR_ALPHA: u8 = 128;
const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const AXIS: Rgba<u8> = Rgba([0, 0, 0, 255]);
const GRID: Rgba<u8> = Rgba([200, 200, 200, 255]);
const GRID_LINES: u32 = 5;
const DASH: u32 = 4;

const MARGIN_LEFT: u32 = 50;
const MARGIN_RIGHT: u32 = 20;
const MARGIN_TOP: u32 = 20;
const MARGIN_BOTTOM: u32 = 40;
const SWATCH: u32 = 12;

/// Plot area in pixel coordinates.
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
}

impl PlotArea {
    fn new(width: u32, height: u32) -> Option<Self> {
        let area = Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            right: width.checked_sub(MARGIN_RIGHT)?,
            bottom: height.checked_sub(MARGIN_BOTTOM)?,
        };
        (area.right > area.left && area.bottom > area.top).then_some(area)
    }

    fn width(&self) -> f64 {
        f64::from(self.right - self.left)
    }

    fn height(&self) -> f64 {
        f64::from(self.bottom - self.top)
    }
}

/// Draws one semi-transparent histogram per summary over a shared x range,
/// with a dashed grid and a swatch legend in series order.
///
/// Summaries are expected to be non-empty; an empty slice renders only the
/// background and axes.
pub fn render_chart(summaries: &[ChannelSummary], config: &ChartConfig) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(config.width, config.height, BACKGROUND);
    let Some(area) = PlotArea::new(config.width, config.height) else {
        return image;
    };

    let histograms: Vec<Histogram> = summaries
        .iter()
        .filter_map(|s| Histogram::from_durations(&s.durations, config.bins, config.density))
        .collect();

    draw_grid(&mut image, area);

    if !histograms.is_empty() {
        let x_min = histograms.iter().map(|h| h.start).fold(f64::INFINITY, f64::min);
        let x_max = histograms.iter().map(Histogram::end).fold(f64::NEG_INFINITY, f64::max);
        let y_max = histograms.iter().map(Histogram::max_height).fold(0.0, f64::max) * 1.05;

        for (i, hist) in histograms.iter().enumerate() {
            let [r, g, b] = SERIES_COLORS[i % SERIES_COLORS.len()];
            let color = Rgba([r, g, b, BAR_ALPHA]);
            for (bin, &height) in hist.heights.iter().enumerate() {
                if height <= 0.0 {
                    continue;
                }
                let (left, right) = hist.bin_range(bin);
                let x0 = area.left + scale(left - x_min, x_max - x_min, area.width());
                let x1 = area.left + scale(right - x_min, x_max - x_min, area.width());
                let bar = scale(height, y_max, area.height());
                // Bars are at least one pixel wide so narrow bins stay visible.
                fill_rect(
                    &mut image,
                    x0,
                    area.bottom - bar,
                    x1.max(x0 + 1),
                    area.bottom,
                    color,
                );
            }
        }
    }

    draw_axes(&mut image, area);
    draw_legend(&mut image, area, histograms.len());
    image
}

/// Maps `value` in `[0, range]` to `[0, pixels]`.
fn scale(value: f64, range: f64, pixels: f64) -> u32 {
    if range <= 0.0 {
        return 0;
    }
    ((value / range).clamp(0.0, 1.0) * pixels).round() as u32
}

fn fill_rect(image: &mut RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgba<u8>) {
    let x1 = x1.min(image.width());
    let y1 = y1.min(image.height());
    for y in y0..y1 {
        for x in x0..x1 {
            image.get_pixel_mut(x, y).blend(&color);
        }
    }
}

fn draw_grid(image: &mut RgbaImage, area: PlotArea) {
    for i in 1..GRID_LINES {
        let x = area.left + (area.right - area.left) * i / GRID_LINES;
        for y in (area.top..area.bottom).filter(|y| (y / DASH) % 2 == 0) {
            image.put_pixel(x, y, GRID);
        }
        let y = area.top + (area.bottom - area.top) * i / GRID_LINES;
        for x in (area.left..area.right).filter(|x| (x / DASH) % 2 == 0) {
            image.put_pixel(x, y, GRID);
        }
    }
}

fn draw_axes(image: &mut RgbaImage, area: PlotArea) {
    for x in area.left..=area.right.min(image.width() - 1) {
        image.put_pixel(x, area.bottom, AXIS);
    }
    for y in area.top..=area.bottom {
        image.put_pixel(area.left, y, AXIS);
    }
}

fn draw_legend(image: &mut RgbaImage, area: PlotArea, series: usize) {
    let x0 = area.right.saturating_sub(SWATCH + 8);
    for i in 0..series as u32 {
        let y0 = area.top + 8 + i * (SWATCH + 4);
        if y0 + SWATCH >= area.bottom {
            break;
        }
        let [r, g, b] = SERIES_COLORS[i as usize % SERIES_COLORS.len()];
        fill_rect(image, x0, y0, x0 + SWATCH, y0 + SWATCH, Rgba([r, g, b, 255]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::LaneHolds;
    use crate::channel::MANIA_4K_CHANNELS;

    fn summary(index: usize, durations: Vec<i64>) -> ChannelSummary {
        ChannelSummary::from_lane(&LaneHolds {
            channel: MANIA_4K_CHANNELS[index],
            durations,
        })
        .unwrap()
    }

    fn config() -> ChartConfig {
        ChartConfig {
            width: 400,
            height: 200,
            bins: 10,
            density: false,
        }
    }

    fn has_color_near(image: &RgbaImage, rgb: [u8; 3]) -> bool {
        image.pixels().any(|p| {
            p.0[..3]
                .iter()
                .zip(rgb)
                .all(|(&a, b)| a.abs_diff(b) <= 2)
        })
    }

    #[test]
    fn test_image_dimensions() {
        let image = render_chart(&[summary(0, vec![10, 20, 30])], &config());
        assert_eq!(image.dimensions(), (400, 200));
    }

    #[test]
    fn test_bars_drawn_in_series_color() {
        let image = render_chart(&[summary(0, vec![10, 20, 30, 30])], &config());
        // Full-opacity legend swatch.
        assert!(has_color_near(&image, SERIES_COLORS[0]));
        // Half-transparent bar blended over white.
        assert!(has_color_near(&image, [0x8f, 0xbb, 0xd9]));
        assert!(!has_color_near(&image, SERIES_COLORS[1]));
    }

    #[test]
    fn test_each_series_gets_its_own_color() {
        let image = render_chart(
            &[summary(0, vec![10, 20]), summary(1, vec![30, 90])],
            &config(),
        );
        assert!(has_color_near(&image, SERIES_COLORS[0]));
        assert!(has_color_near(&image, SERIES_COLORS[1]));
    }

    #[test]
    fn test_empty_chart_has_axes_only() {
        let image = render_chart(&[], &config());
        assert_eq!(*image.get_pixel(MARGIN_LEFT, 100), AXIS);
        assert!(!has_color_near(&image, SERIES_COLORS[0]));
    }

    #[test]
    fn test_too_small_image_is_blank() {
        let cfg = ChartConfig {
            width: 10,
            height: 10,
            ..config()
        };
        let image = render_chart(&[summary(0, vec![10])], &cfg);
        assert!(image.pixels().all(|p| *p == BACKGROUND));
    }

    #[test]
    fn test_scale() {
        assert_eq!(scale(5.0, 10.0, 100.0), 50);
        assert_eq!(scale(20.0, 10.0, 100.0), 100);
        assert_eq!(scale(1.0, 0.0, 100.0), 0);
    }
}
