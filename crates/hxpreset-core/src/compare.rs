//! Structural comparison of two decoded presets.
//!
//! Parameters are compared by position only. Integer-typed slots must match
//! exactly; Float slots match within [`FLOAT_EPSILON`]. A slot present on one
//! side only, or whose type differs, is always reported as different.

use serde::{Deserialize, Serialize};

use crate::preset::{Parameter, ParameterValue, Preset};

/// Absolute tolerance for Float parameter equality.
pub const FLOAT_EPSILON: f64 = 1e-6;

/// Result of comparing two presets. Borrows both inputs.
#[derive(Debug, Clone, Serialize)]
pub struct PresetComparison<'a> {
    pub preset_a: &'a Preset,
    pub preset_b: &'a Preset,
    pub same_effect: bool,
    pub same_name: bool,
    /// Ascending indices of differing parameters.
    pub different_parameters: Vec<usize>,
    /// Ascending indices of matching parameters.
    pub same_parameters: Vec<usize>,
}

impl PresetComparison<'_> {
    pub fn summary(&self) -> ComparisonSummary {
        summarize(self)
    }

    pub fn is_identical(&self) -> bool {
        self.same_effect && self.same_name && self.different_parameters.is_empty()
    }
}

/// Counts derived from a [`PresetComparison`].
///
/// # Examples
/// ```
/// use hxpreset_core::ComparisonSummary;
///
/// let summary = ComparisonSummary {
///     total_parameters: 2,
///     changed_parameters: 1,
///     unchanged_parameters: 1,
///     effect_changed: false,
///     name_changed: false,
/// };
/// assert_eq!(summary.total_parameters, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub total_parameters: usize,
    pub changed_parameters: usize,
    pub unchanged_parameters: usize,
    pub effect_changed: bool,
    pub name_changed: bool,
}

/// Compares two presets slot by slot.
///
/// # Examples
/// ```
/// use hxpreset_core::{ParameterValue, PresetBuilder, compare_presets, parse_preset};
///
/// let a = parse_preset(
///     &PresetBuilder::new(500, "70s Chorus")
///         .with_parameter(ParameterValue::Float(0.5))
///         .with_parameter(ParameterValue::Integer(10))
///         .build()?,
/// )?;
/// let b = parse_preset(
///     &PresetBuilder::new(500, "70s Chorus")
///         .with_parameter(ParameterValue::Float(0.75))
///         .with_parameter(ParameterValue::Integer(10))
///         .build()?,
/// )?;
///
/// let comparison = compare_presets(&a, &b);
/// assert!(comparison.same_effect && comparison.same_name);
/// assert_eq!(comparison.different_parameters, vec![0]);
/// assert_eq!(comparison.same_parameters, vec![1]);
/// # Ok::<(), hxpreset_core::PresetError>(())
/// ```
pub fn compare_presets<'a>(preset_a: &'a Preset, preset_b: &'a Preset) -> PresetComparison<'a> {
    let params_a = preset_a.parameters();
    let params_b = preset_b.parameters();
    let total = params_a.len().max(params_b.len());

    let mut different_parameters = Vec::new();
    let mut same_parameters = Vec::new();
    for index in 0..total {
        match (params_a.get(index), params_b.get(index)) {
            (Some(a), Some(b)) if parameters_match(a, b) => same_parameters.push(index),
            _ => different_parameters.push(index),
        }
    }

    PresetComparison {
        preset_a,
        preset_b,
        same_effect: preset_a.effect_id() == preset_b.effect_id(),
        same_name: preset_a.name() == preset_b.name(),
        different_parameters,
        same_parameters,
    }
}

pub fn summarize(comparison: &PresetComparison<'_>) -> ComparisonSummary {
    ComparisonSummary {
        total_parameters: comparison
            .preset_a
            .parameters()
            .len()
            .max(comparison.preset_b.parameters().len()),
        changed_parameters: comparison.different_parameters.len(),
        unchanged_parameters: comparison.same_parameters.len(),
        effect_changed: !comparison.same_effect,
        name_changed: !comparison.same_name,
    }
}

fn parameters_match(a: &Parameter, b: &Parameter) -> bool {
    match (a.value, b.value) {
        (ParameterValue::Float(x), ParameterValue::Float(y)) => {
            (f64::from(x) - f64::from(y)).abs() < FLOAT_EPSILON
        }
        (x, y) => x.kind() == y.kind() && x.to_bits() == y.to_bits(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::{Parameter, ParameterValue, Preset};

    fn preset(effect_id: u32, name: &str, values: &[ParameterValue]) -> Preset {
        Preset {
            effect_id,
            name: name.to_string(),
            data_size: (values.len() * 8) as u32,
            parameters: values
                .iter()
                .enumerate()
                .map(|(index, value)| Parameter {
                    offset: 0x18 + index * 8,
                    value: *value,
                })
                .collect(),
            header_words: [0, 1, 0, 1],
            raw: Vec::new(),
        }
    }

    fn floats(values: &[f32]) -> Vec<ParameterValue> {
        values.iter().copied().map(ParameterValue::Float).collect()
    }

    #[test]
    fn identical_presets() {
        let a = preset(500, "Test", &floats(&[0.5, 0.6, 0.7]));
        let b = preset(500, "Test", &floats(&[0.5, 0.6, 0.7]));
        let comparison = compare_presets(&a, &b);
        assert!(comparison.same_effect);
        assert!(comparison.same_name);
        assert!(comparison.different_parameters.is_empty());
        assert_eq!(comparison.same_parameters, vec![0, 1, 2]);
        assert!(comparison.is_identical());
    }

    #[test]
    fn different_effect_and_name() {
        let a = preset(500, "Test1", &[]);
        let b = preset(501, "Test2", &[]);
        let comparison = compare_presets(&a, &b);
        assert!(!comparison.same_effect);
        assert!(!comparison.same_name);
        assert!(!comparison.is_identical());
    }

    #[test]
    fn different_lengths_mark_missing_slots() {
        let a = preset(500, "Test", &floats(&[0.5, 0.6]));
        let b = preset(500, "Test", &floats(&[0.5, 0.6, 0.7, 0.8]));
        let comparison = compare_presets(&a, &b);
        assert_eq!(comparison.same_parameters, vec![0, 1]);
        assert_eq!(comparison.different_parameters, vec![2, 3]);

        let reversed = compare_presets(&b, &a);
        assert_eq!(reversed.different_parameters, vec![2, 3]);
    }

    #[test]
    fn float_epsilon_tolerance() {
        let a = preset(500, "Test", &floats(&[0.5]));
        let b = preset(500, "Test", &floats(&[0.500_000_1]));
        assert_eq!(compare_presets(&a, &b).same_parameters, vec![0]);

        let c = preset(500, "Test", &floats(&[0.6]));
        assert_eq!(compare_presets(&a, &c).different_parameters, vec![0]);
    }

    #[test]
    fn nan_floats_never_match() {
        let a = preset(500, "Test", &floats(&[f32::NAN]));
        let b = preset(500, "Test", &floats(&[f32::NAN]));
        assert_eq!(compare_presets(&a, &b).different_parameters, vec![0]);
    }

    #[test]
    fn type_mismatch_is_different() {
        let a = preset(
            500,
            "Test",
            &[ParameterValue::Float(0.0), ParameterValue::Integer(1)],
        );
        let b = preset(
            500,
            "Test",
            &[ParameterValue::Flag(0), ParameterValue::Integer(1)],
        );
        let comparison = compare_presets(&a, &b);
        assert_eq!(comparison.different_parameters, vec![0]);
        assert_eq!(comparison.same_parameters, vec![1]);
    }

    #[test]
    fn integer_types_compare_exactly() {
        let a = preset(500, "Test", &[ParameterValue::Integer(10)]);
        let b = preset(500, "Test", &[ParameterValue::Integer(11)]);
        assert_eq!(compare_presets(&a, &b).different_parameters, vec![0]);

        let c = preset(500, "Test", &[ParameterValue::BoolOrIndex(10)]);
        assert_eq!(compare_presets(&a, &c).different_parameters, vec![0]);
    }

    #[test]
    fn empty_parameter_lists() {
        let a = preset(500, "Test", &[]);
        let comparison = compare_presets(&a, &a);
        assert!(comparison.different_parameters.is_empty());
        assert!(comparison.same_parameters.is_empty());
        assert_eq!(comparison.summary().total_parameters, 0);
    }

    #[test]
    fn comparison_borrows_inputs() {
        let a = preset(500, "Test1", &floats(&[0.5]));
        let b = preset(500, "Test2", &floats(&[0.5]));
        let comparison = compare_presets(&a, &b);
        assert!(std::ptr::eq(comparison.preset_a, &a));
        assert!(std::ptr::eq(comparison.preset_b, &b));
    }

    #[test]
    fn summary_counts() {
        let a = preset(500, "Test", &floats(&[0.5, 0.6, 0.7]));
        let b = preset(600, "Other", &floats(&[0.5, 0.9, 0.7, 0.1, 0.2]));
        let summary = summarize(&compare_presets(&a, &b));
        assert_eq!(
            summary,
            ComparisonSummary {
                total_parameters: 5,
                changed_parameters: 3,
                unchanged_parameters: 2,
                effect_changed: true,
                name_changed: true,
            }
        );
    }

    #[test]
    fn comparison_json_omits_raw_bytes() {
        let a = preset(500, "Test", &floats(&[0.5]));
        let comparison = compare_presets(&a, &a);
        let value = serde_json::to_value(&comparison).expect("comparison json");
        assert_eq!(value["same_parameters"][0], 0);
        assert_eq!(value["preset_a"]["name"], "Test");
        assert!(value["preset_a"].get("raw").is_none());
    }
}
