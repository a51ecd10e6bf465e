use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sparktable_model::{LogicalRow, Series, SeriesCell, SeriesPoint};

use crate::classify::ColumnRoles;
use crate::options::TransformOptions;
use crate::source::PendingRow;

/// Supplies y values for placeholder series.
pub trait PlaceholderSource {
    /// Returns a value in `[0, max)`.
    fn next_value(&mut self, max: f64) -> f64;
}

/// Placeholder values drawn from a random number generator.
#[derive(Clone, Debug)]
pub struct RandomPlaceholder<R = StdRng> {
    rng: R,
}

impl RandomPlaceholder<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Deterministic placeholders, for tests and reproducible renders.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomPlaceholder<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> PlaceholderSource for RandomPlaceholder<R> {
    fn next_value(&mut self, max: f64) -> f64 {
        self.rng.random_range(0.0..max)
    }
}

/// Finalizes one raw point sequence.
///
/// Points with a non-finite `y` are dropped and the rest keep their append order. An empty
/// result is replaced with `options.placeholder_points` synthetic points at `x = 0..n` so
/// renderers never see a zero-length series; the result is marked as a placeholder.
pub fn materialize(
    points: Vec<SeriesPoint>,
    placeholder: &mut dyn PlaceholderSource,
    options: &TransformOptions,
) -> Series {
    let points: Vec<SeriesPoint> = points.into_iter().filter(|p| p.y.is_finite()).collect();
    if !points.is_empty() {
        return Series::from_points(points);
    }

    let max = options.placeholder_upper_bound();
    let synthesized = (0..options.placeholder_len())
        .map(|index| {
            let y = placeholder.next_value(max);
            // Clamp sources that ignore the contract.
            let y = if y.is_finite() && (0.0..max).contains(&y) {
                y
            } else {
                0.0
            };
            SeriesPoint::at_index(index, y)
        })
        .collect();
    Series::placeholder(synthesized)
}

/// Materializes every sparkline series of a pending row into a [`LogicalRow`].
pub fn materialize_row(
    row: PendingRow,
    roles: &ColumnRoles,
    placeholder: &mut dyn PlaceholderSource,
    options: &TransformOptions,
) -> LogicalRow {
    let PendingRow {
        key,
        cells,
        points,
        source_rows,
        selection_id,
    } = row;

    let series = roles
        .sparkline_series
        .iter()
        .zip(points)
        .map(|(column, points)| {
            let series = materialize(points, placeholder, options);
            if series.is_placeholder() {
                log::debug!(
                    "no numeric points for {:?} in row {key:?}; using placeholder series",
                    column.key()
                );
            }
            SeriesCell {
                column: column.clone(),
                series,
            }
        })
        .collect();

    LogicalRow {
        cells,
        series,
        selection_id,
        source_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f64);

    impl PlaceholderSource for Constant {
        fn next_value(&mut self, _max: f64) -> f64 {
            self.0
        }
    }

    #[test]
    fn real_points_pass_through_in_order() {
        let points = vec![
            SeriesPoint::at_index(3, 7.0),
            SeriesPoint::at_index(1, f64::NAN),
            SeriesPoint::at_index(0, 5.0),
        ];
        let series = materialize(points, &mut Constant(1.0), &TransformOptions::default());
        assert!(!series.is_placeholder());
        assert_eq!(
            series.points,
            vec![SeriesPoint::at_index(3, 7.0), SeriesPoint::at_index(0, 5.0)]
        );
    }

    #[test]
    fn out_of_range_placeholder_values_are_clamped() {
        let series = materialize(Vec::new(), &mut Constant(250.0), &TransformOptions::default());
        assert!(series.is_placeholder());
        assert!(series.y_values().all(|y| y == 0.0));
    }

    #[test]
    fn seeded_placeholders_are_reproducible() {
        let options = TransformOptions::default();
        let a = materialize(Vec::new(), &mut RandomPlaceholder::seeded(7), &options);
        let b = materialize(Vec::new(), &mut RandomPlaceholder::seeded(7), &options);
        assert_eq!(a, b);
        assert!(a.y_values().all(|y| (0.0..100.0).contains(&y)));
    }
}
