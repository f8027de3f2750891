//! Squarified treemap layout core.
//!
//! Partitions a pixel region into one rectangle per weighted entry,
//! row-by-row or column-by-column, greedily keeping each rectangle's
//! aspect ratio close to the golden ratio. The layout is deterministic
//! and purely arithmetic: no rounding, no I/O, no shared state.

use crate::geometry::{Rect, Region};

/// The golden ratio, the target aspect ratio for placed rectangles.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Lay out `values` into `region`, one rectangle per value, in order.
///
/// Preconditions (the treemap builder enforces both): every value is
/// strictly positive, and values are sorted descending. The region is
/// consumed in place; callers pass a fresh one per invocation.
///
/// Returns fewer rectangles than values only when the region degenerates
/// below one pixel in either dimension mid-layout.
#[must_use]
pub fn squarify(values: &[f64], mut region: Region) -> Vec<Rect> {
    let mut placed = Vec::with_capacity(values.len());
    let mut remaining_total: f64 = values.iter().sum();
    let mut pos = 0;

    while pos < values.len() && region.width() >= 1.0 && region.height() >= 1.0 {
        let box_width = region.width();
        let box_height = region.height();

        // Wide leftover space gets a column, otherwise a row. The first
        // band is always a row so a single entry fills the whole box.
        let is_row = box_width / box_height < PHI || pos == 0;

        let mut total = values[pos];
        let mut split = pos + 1;

        let total_ratio = total / remaining_total;
        let (first_width, first_height) = if is_row {
            (box_width, box_height * total_ratio)
        } else {
            (box_width * total_ratio, box_height)
        };
        let mut last_dr = PHI - first_width / first_height;

        // Extend the band while doing so moves the worst aspect ratio
        // closer to phi. Rows always test the break condition; columns
        // only once the deviation has crossed below zero.
        for &value in &values[split..] {
            let next_total = total + value;
            let band_height = box_height
                * if is_row {
                    next_total / remaining_total
                } else {
                    value / next_total
                };
            let band_width = box_width
                * if is_row {
                    value / next_total
                } else {
                    next_total / remaining_total
                };
            let d_ratio = PHI - band_width / band_height;

            if (is_row || last_dr < 0.0) && d_ratio.abs() > last_dr.abs() {
                break;
            }

            last_dr = d_ratio;
            split += 1;
            total = next_total;
        }

        // Carve the band: each member's extent along the shared axis is
        // proportional to its value within the band, the band's thickness
        // to the band total within the remaining total.
        let band_ratio = total / remaining_total;
        let mut d = if is_row { region.left } else { region.top };

        for &value in &values[pos..split] {
            let (x, y) = if is_row { (d, region.top) } else { (region.left, d) };
            let width = if is_row {
                box_width * value / total
            } else {
                box_width * band_ratio
            };
            let height = if is_row {
                box_height * band_ratio
            } else {
                box_height * value / total
            };

            d += if is_row { width } else { height };
            placed.push(Rect::new(x, y, width, height));
        }

        if is_row {
            region.top += box_height * band_ratio;
        } else {
            region.left += box_width * band_ratio;
        }

        pos = split;
        remaining_total -= total;
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn single_value_fills_box() {
        let rects = squarify(&[1.0], Region::from_size(200.0, 100.0));
        assert_eq!(rects.len(), 1);
        assert_relative_eq!(rects[0].x, 0.0);
        assert_relative_eq!(rects[0].y, 0.0);
        assert_relative_eq!(rects[0].width, 200.0);
        assert_relative_eq!(rects[0].height, 100.0);
    }

    #[test]
    fn two_values_split_proportionally() {
        let rects = squarify(&[75.0, 25.0], Region::from_size(100.0, 100.0));
        assert_eq!(rects.len(), 2);
        assert_relative_eq!(rects[0].area(), 7500.0, max_relative = 1e-9);
        assert_relative_eq!(rects[1].area(), 2500.0, max_relative = 1e-9);

        // First band is a row, so the boundary is a full-width horizontal.
        assert_relative_eq!(rects[0].width, 100.0);
        assert_relative_eq!(rects[1].width, 100.0);
        assert_relative_eq!(rects[0].height + rects[1].height, 100.0, max_relative = 1e-9);
    }

    #[test]
    fn rectangles_tile_the_box() {
        let values = [40.0, 25.0, 15.0, 10.0, 6.0, 4.0];
        let rects = squarify(&values, Region::from_size(640.0, 480.0));
        assert_eq!(rects.len(), values.len());

        let total: f64 = rects.iter().map(Rect::area).sum();
        assert_relative_eq!(total, 640.0 * 480.0, max_relative = 1e-9);

        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(!a.intersects_interior(b), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn areas_are_proportional_to_values() {
        let values = [500.0, 300.0, 120.0, 80.0];
        let sum: f64 = values.iter().sum();
        let rects = squarify(&values, Region::from_size(300.0, 200.0));

        for (value, rect) in values.iter().zip(&rects) {
            assert_relative_eq!(
                rect.area() / (300.0 * 200.0),
                value / sum,
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn layout_is_deterministic() {
        let values = [9.0, 7.0, 5.0, 3.0, 1.0];
        let a = squarify(&values, Region::from_size(512.0, 384.0));
        let b = squarify(&values, Region::from_size(512.0, 384.0));
        assert_eq!(a, b);
    }

    #[test]
    fn sub_pixel_region_places_nothing() {
        let rects = squarify(&[1.0, 1.0], Region::from_size(0.5, 100.0));
        assert!(rects.is_empty());
    }
}
