use tracing::debug;

/// Gap kept between placed words, in pixels.
const PADDING: u32 = 2;

/// Factor applied to a word's size each time it fails to fit.
const SHRINK: f32 = 0.9;

/// Angle increment of the placement spiral, in radians.
const SPIRAL_STEP: f32 = 0.1;

/// Side of one occupancy cell, in pixels.
const CELL: u32 = 4;

/// Measures the pixel extent of a word at a font size.
pub trait Measure {
    /// Width and height of `word` drawn at `size` pixels.
    fn measure(&self, word: &str, size: f32) -> (u32, u32);
}

/// Canvas and sizing parameters for a layout run.
#[derive(Debug, Clone)]
pub struct LayoutParams {
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
    /// Words shrink down to this size before they are dropped.
    pub min_font_size: f32,
    /// Size of the most frequent word.
    pub max_font_size: f32,
    /// Blend between rank-only sizing (0.0) and frequency-proportional sizing (1.0).
    pub relative_scaling: f32,
    /// Seed for the spiral starting angles.
    pub seed: u64,
}

/// A word with its position on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    /// The word.
    pub word: String,
    /// How often it occurred in the corpus.
    pub count: usize,
    /// Font size in pixels.
    pub size: f32,
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Measured width.
    pub width: u32,
    /// Measured height.
    pub height: u32,
}

/// Coarse occupancy of the canvas. A cell is taken once any placed word,
/// grown by the padding, touches it; a summed-area table answers box queries
/// in constant time.
struct OccupancyGrid {
    cols: usize,
    rows: usize,
    width: u32,
    height: u32,
    occupied: Vec<bool>,
    table: Vec<u32>,
}

impl OccupancyGrid {
    fn new(width: u32, height: u32) -> Self {
        let cols = width.div_ceil(CELL) as usize;
        let rows = height.div_ceil(CELL) as usize;
        Self {
            cols,
            rows,
            width,
            height,
            occupied: vec![false; cols * rows],
            table: vec![0; (cols + 1) * (rows + 1)],
        }
    }

    fn is_free(&self, x: u32, y: u32, width: u32, height: u32) -> bool {
        let (c0, c1) = ((x / CELL) as usize, ((x + width - 1) / CELL) as usize + 1);
        let (r0, r1) = ((y / CELL) as usize, ((y + height - 1) / CELL) as usize + 1);
        let at = |c: usize, r: usize| self.table[r * (self.cols + 1) + c];
        at(c1, r1) + at(c0, r0) == at(c0, r1) + at(c1, r0)
    }

    fn mark(&mut self, x: u32, y: u32, width: u32, height: u32) {
        let x0 = x.saturating_sub(PADDING) / CELL;
        let y0 = y.saturating_sub(PADDING) / CELL;
        let x1 = (x + width + PADDING).min(self.width).div_ceil(CELL);
        let y1 = (y + height + PADDING).min(self.height).div_ceil(CELL);
        for row in y0 as usize..y1 as usize {
            for col in x0 as usize..x1 as usize {
                self.occupied[row * self.cols + col] = true;
            }
        }
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let stride = self.cols + 1;
        for row in 0..self.rows {
            let mut running = 0;
            for col in 0..self.cols {
                running += u32::from(self.occupied[row * self.cols + col]);
                self.table[(row + 1) * stride + col + 1] = self.table[row * stride + col + 1] + running;
            }
        }
    }
}

/// Place words, most frequent first, along an Archimedean spiral from the
/// canvas center. A word that does not fit shrinks until it fits or falls
/// below the minimum size, in which case it is dropped. Sizes never grow
/// back for later words.
pub fn layout(
    frequencies: &[(String, usize)],
    params: &LayoutParams,
    measure: &dyn Measure,
) -> Vec<PlacedWord> {
    let Some(max_count) = frequencies.first().map(|(_, count)| *count) else {
        return Vec::new();
    };

    let mut rng = fastrand::Rng::with_seed(params.seed);
    let mut placed: Vec<PlacedWord> = Vec::with_capacity(frequencies.len());
    let mut grid = OccupancyGrid::new(params.width, params.height);
    let mut ceiling = params.max_font_size;

    for (word, count) in frequencies {
        let share = *count as f32 / max_count as f32;
        let scaling = params.relative_scaling.clamp(0.0, 1.0);
        let mut size = (params.max_font_size * (scaling * share + (1.0 - scaling))).min(ceiling);

        let mut position = None;
        while size >= params.min_font_size {
            let (width, height) = measure.measure(word, size);
            if width > 0 && height > 0 && width <= params.width && height <= params.height {
                let phase = rng.f32() * std::f32::consts::TAU;
                position = find_slot(&grid, params, width, height, phase)
                    .map(|(x, y)| (x, y, width, height));
                if position.is_some() {
                    break;
                }
            }
            size *= SHRINK;
        }

        match position {
            Some((x, y, width, height)) => {
                ceiling = size;
                grid.mark(x, y, width, height);
                placed.push(PlacedWord {
                    word: word.clone(),
                    count: *count,
                    size,
                    x,
                    y,
                    width,
                    height,
                });
            }
            None => debug!("no room for '{}', dropping it", word),
        }
    }

    placed
}

fn find_slot(
    grid: &OccupancyGrid,
    params: &LayoutParams,
    width: u32,
    height: u32,
    phase: f32,
) -> Option<(u32, u32)> {
    let center_x = params.width as f32 / 2.0;
    let center_y = params.height as f32 / 2.0;
    let max_radius = (center_x * center_x + center_y * center_y).sqrt();
    // spiral arms roughly one small glyph apart
    let spacing = (params.min_font_size / 2.0).max(1.0) / std::f32::consts::TAU;

    let mut t = 0.0f32;
    loop {
        let radius = spacing * t;
        if radius > max_radius {
            return None;
        }
        let angle = t + phase;
        let left = center_x + radius * angle.cos() - width as f32 / 2.0;
        let top = center_y + radius * angle.sin() - height as f32 / 2.0;

        if left >= 0.0 && top >= 0.0 {
            let (x, y) = (left as u32, top as u32);
            if x + width <= params.width
                && y + height <= params.height
                && grid.is_free(x, y, width, height)
            {
                return Some((x, y));
            }
        }
        t += SPIRAL_STEP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character is a square of the font size.
    struct Monospace;

    impl Measure for Monospace {
        fn measure(&self, word: &str, size: f32) -> (u32, u32) {
            let side = size.ceil() as u32;
            (side * word.chars().count() as u32, side)
        }
    }

    fn params(width: u32, height: u32) -> LayoutParams {
        LayoutParams {
            width,
            height,
            min_font_size: 4.0,
            max_font_size: 40.0,
            relative_scaling: 0.5,
            seed: 7,
        }
    }

    fn overlaps(a: &PlacedWord, b: &PlacedWord) -> bool {
        b.x < a.x + a.width + PADDING
            && a.x < b.x + b.width + PADDING
            && b.y < a.y + a.height + PADDING
            && a.y < b.y + b.height + PADDING
    }

    fn freq(words: &[(&str, usize)]) -> Vec<(String, usize)> {
        words.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn most_frequent_word_gets_the_largest_size() {
        let placed = layout(&freq(&[("cat", 4), ("sat", 2), ("mat", 1)]), &params(400, 300), &Monospace);
        assert_eq!(placed.len(), 3);
        assert_eq!(placed[0].word, "cat");
        assert!(placed[0].size >= placed[1].size);
        assert!(placed[1].size >= placed[2].size);
    }

    #[test]
    fn placed_words_stay_inside_and_do_not_overlap() {
        let words: Vec<(String, usize)> = (0..30).map(|i| (format!("word{}", i), 30 - i)).collect();
        let p = params(500, 400);
        let placed = layout(&words, &p, &Monospace);
        assert!(!placed.is_empty());

        for (i, a) in placed.iter().enumerate() {
            assert!(a.x + a.width <= p.width && a.y + a.height <= p.height);
            for b in &placed[i + 1..] {
                assert!(!overlaps(a, b), "{} overlaps {}", a.word, b.word);
            }
        }
    }

    #[test]
    fn words_too_large_for_the_canvas_are_dropped() {
        let long = "x".repeat(200);
        let placed = layout(&freq(&[(long.as_str(), 1)]), &params(100, 100), &Monospace);
        assert!(placed.is_empty());
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let words = freq(&[("alpha", 5), ("beta", 3), ("gamma", 3), ("delta", 1)]);
        let first = layout(&words, &params(300, 200), &Monospace);
        let second = layout(&words, &params(300, 200), &Monospace);
        assert_eq!(first, second);
    }

    #[test]
    fn occupied_cells_block_padded_neighbours() {
        let mut grid = OccupancyGrid::new(40, 40);
        assert!(grid.is_free(0, 0, 40, 40));

        grid.mark(10, 10, 8, 8);
        assert!(!grid.is_free(10, 10, 8, 8));
        // touching the padding ring is still blocked
        assert!(!grid.is_free(18 + PADDING - 1, 10, 4, 4));
        assert!(grid.is_free(28, 28, 12, 12));
        assert!(grid.is_free(0, 30, 40, 10));
    }

    #[test]
    fn dense_canvas_finishes_quickly() {
        let words: Vec<(String, usize)> = (0..200).map(|i| (format!("w{:03}", i), 200 - i)).collect();
        let p = LayoutParams {
            min_font_size: 4.0,
            max_font_size: 240.0,
            ..params(1000, 800)
        };
        let started = std::time::Instant::now();
        let placed = layout(&words, &p, &Monospace);
        assert!(!placed.is_empty());
        assert!(started.elapsed() < std::time::Duration::from_secs(20));
    }

    #[test]
    fn empty_input_places_nothing() {
        assert!(layout(&[], &params(100, 100), &Monospace).is_empty());
    }
}
