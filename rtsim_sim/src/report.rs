// rtsim_sim/src/report.rs

//! Console summaries of a finished run.

use nalgebra::Vector3;
use rtsim_core::testbed::{Quantity, Reference, TestbedOutputs};
use std::fmt;

// =========================================================================
// == SI prefix scaling ==
// =========================================================================

/// Decimal exponents tried, smallest first, with the prefix each one implies.
///
/// A value is displayed as `value * 10^exponent` in `prefix`-units, so a
/// positive exponent means a sub-unit prefix.
const PREFIXES: [(i32, &str); 17] = [
    (-24, "Y"),
    (-21, "Z"),
    (-18, "E"),
    (-15, "P"),
    (-12, "T"),
    (-9, "G"),
    (-6, "M"),
    (-3, "k"),
    (0, ""),
    (3, "m"),
    (6, "µ"),
    (9, "n"),
    (12, "p"),
    (15, "f"),
    (18, "a"),
    (21, "z"),
    (24, "y"),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiScale {
    pub exponent: i32,
    pub prefix: &'static str,
}

impl SiScale {
    pub const UNITY: SiScale = SiScale {
        exponent: 0,
        prefix: "",
    };

    pub fn factor(&self) -> f64 {
        10f64.powi(self.exponent)
    }

    pub fn apply(&self, value: f64) -> f64 {
        value * self.factor()
    }
}

/// Picks the prefix that brings the largest component magnitude in `values`
/// to at least one.
pub fn si_scale(values: &[Vector3<f64>]) -> SiScale {
    let peak = peak_component(values);
    if peak == 0.0 || !peak.is_finite() {
        return SiScale::UNITY;
    }

    PREFIXES
        .iter()
        .find(|(exponent, _)| peak * 10f64.powi(*exponent) >= 1.0)
        .or(PREFIXES.last())
        .map(|&(exponent, prefix)| SiScale { exponent, prefix })
        .unwrap_or(SiScale::UNITY)
}

fn peak_component(values: &[Vector3<f64>]) -> f64 {
    values.iter().map(|v| v.amax()).fold(0.0, f64::max)
}

// =========================================================================
// == Summaries ==
// =========================================================================

/// Peak and final value of one output series.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantitySummary {
    pub quantity: Quantity,
    pub reference: Reference,
    /// Unit of `peak` and `last` before scaling.
    pub unit: &'static str,
    pub scale: SiScale,
    pub peak: f64,
    pub last: Vector3<f64>,
}

impl QuantitySummary {
    pub fn new(outputs: &TestbedOutputs, quantity: Quantity, reference: Reference) -> Self {
        Self::from_series(
            outputs.series(quantity, reference),
            quantity,
            reference,
            quantity.unit(),
        )
    }

    /// Linear quantities in units of local gravity. Angular quantities and
    /// runs without gravity fall back to SI units.
    pub fn in_g(outputs: &TestbedOutputs, quantity: Quantity, reference: Reference) -> Self {
        match outputs.series_in_g(quantity, reference) {
            Some(series) => Self::from_series(&series, quantity, reference, "g"),
            None => Self::new(outputs, quantity, reference),
        }
    }

    fn from_series(
        series: &[Vector3<f64>],
        quantity: Quantity,
        reference: Reference,
        unit: &'static str,
    ) -> Self {
        Self {
            quantity,
            reference,
            unit,
            scale: si_scale(series),
            peak: peak_component(series),
            last: series.last().copied().unwrap_or_else(Vector3::zeros),
        }
    }
}

impl fmt::Display for QuantitySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = format!("{}{}", self.scale.prefix, self.unit);
        let last = self.last.map(|c| self.scale.apply(c));
        write!(
            f,
            "{:<8} {:<21} peak {:>10.4} {unit:<9} final [{:>10.4}, {:>10.4}, {:>10.4}] {unit}",
            self.reference,
            self.quantity,
            self.scale.apply(self.peak),
            last.x,
            last.y,
            last.z,
        )
    }
}

/// One line per requested quantity and reference, under a header naming the run.
pub fn render(
    title: &str,
    outputs: &TestbedOutputs,
    quantities: &[Quantity],
    references: &[Reference],
    in_g: bool,
) -> String {
    let duration = match (outputs.time.first(), outputs.time.last()) {
        (Some(first), Some(last)) => last - first,
        _ => 0.0,
    };
    let mut text = format!(
        "== {title} ==\n{} samples over {duration:.3} s\n",
        outputs.len()
    );
    for &reference in references {
        for &quantity in quantities {
            let summary = if in_g {
                QuantitySummary::in_g(outputs, quantity, reference)
            } else {
                QuantitySummary::new(outputs, quantity, reference)
            };
            text.push_str(&summary.to_string());
            text.push('\n');
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn series(x: f64) -> Vec<Vector3<f64>> {
        vec![Vector3::new(0.0, -x, 0.5 * x), Vector3::zeros()]
    }

    #[test]
    fn prefix_brings_the_peak_to_at_least_one() {
        let cases = [
            (9.79, 0, ""),
            (1.0, 0, ""),
            (5_000.0, -3, "k"),
            (0.002, 3, "m"),
            (7.3e-5, 6, "µ"),
            (4.2e-10, 12, "p"),
            (3.0e8, -6, "M"),
        ];
        for (peak, exponent, prefix) in cases {
            let scale = si_scale(&series(peak));
            assert_eq!(scale, SiScale { exponent, prefix }, "peak {peak}");
            assert!(scale.apply(peak) >= 1.0);
        }
    }

    #[test]
    fn zero_data_is_left_unscaled() {
        assert_eq!(si_scale(&series(0.0)), SiScale::UNITY);
        assert_eq!(si_scale(&[]), SiScale::UNITY);
    }

    #[test]
    fn extremes_clamp_to_the_outermost_prefixes() {
        assert_eq!(si_scale(&series(1e30)).prefix, "Y");
        assert_eq!(si_scale(&series(1e-30)).prefix, "y");
    }

    #[test]
    fn summary_reports_peak_and_final_sample() {
        let data = vec![Vector3::new(0.0, 0.0, -0.004), Vector3::new(0.001, 0.0, 0.002)];
        let summary = QuantitySummary::from_series(
            &data,
            Quantity::AngularVelocity,
            Reference::Body,
            Quantity::AngularVelocity.unit(),
        );
        assert_eq!(summary.peak, 0.004);
        assert_eq!(summary.scale.prefix, "m");
        assert_relative_eq!(summary.scale.apply(summary.last.x), 1.0, max_relative = 1e-12);

        let line = summary.to_string();
        assert!(line.starts_with("body"));
        assert!(line.contains("angular_velocity"));
        assert!(line.contains("mrad/s"));
    }
}
