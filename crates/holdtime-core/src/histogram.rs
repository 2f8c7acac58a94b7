/// Equal-width histogram over a single duration series.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Left edge of the first bin.
    pub start: f64,
    pub bin_width: f64,
    /// Bin counts, or densities when built with `density`.
    pub heights: Vec<f64>,
}

impl Histogram {
    /// Bins `durations` into `bins` equal-width bins spanning `[min, max]`.
    ///
    /// The last bin is closed on the right. A series with a single distinct
    /// value is spread over `[v - 0.5, v + 0.5]`. With `density` the bar areas
    /// sum to 1. Returns `None` for an empty series or zero bins.
    pub fn from_durations(durations: &[i64], bins: usize, density: bool) -> Option<Self> {
        if bins == 0 {
            return None;
        }
        let min = *durations.iter().min()? as f64;
        let max = *durations.iter().max()? as f64;
        let (start, end) = if max > min {
            (min, max)
        } else {
            (min - 0.5, max + 0.5)
        };
        let bin_width = (end - start) / bins as f64;

        let mut heights = vec![0.0; bins];
        for &d in durations {
            let index = (((d as f64 - start) / bin_width) as usize).min(bins - 1);
            heights[index] += 1.0;
        }

        if density {
            let norm = durations.len() as f64 * bin_width;
            for h in &mut heights {
                *h /= norm;
            }
        }

        Some(Self {
            start,
            bin_width,
            heights,
        })
    }

    /// Right edge of the last bin.
    pub fn end(&self) -> f64 {
        self.start + self.bin_width * self.heights.len() as f64
    }

    /// Left and right edge of bin `index`.
    pub fn bin_range(&self, index: usize) -> (f64, f64) {
        let left = self.start + self.bin_width * index as f64;
        (left, left + self.bin_width)
    }

    pub fn max_height(&self) -> f64 {
        self.heights.iter().copied().fold(0.0, f64::max)
    }
}
