use hxpreset_core::{
    ComparisonSummary, ParameterValue, Preset, PresetBuilder, compare_presets, parse_preset,
    summarize,
};

fn preset(effect_id: i64, name: &str, values: &[ParameterValue]) -> Preset {
    let builder = values
        .iter()
        .fold(PresetBuilder::new(effect_id, name), |builder, value| {
            builder.with_parameter(*value)
        });
    parse_preset(&builder.build().expect("build")).expect("parse")
}

#[test]
fn chorus_example() {
    let a = preset(
        500,
        "70s Chorus",
        &[ParameterValue::Float(0.5), ParameterValue::Integer(10)],
    );
    let b = preset(
        500,
        "70s Chorus",
        &[ParameterValue::Float(0.75), ParameterValue::Integer(10)],
    );

    let comparison = compare_presets(&a, &b);
    assert!(comparison.same_effect);
    assert!(comparison.same_name);
    assert_eq!(comparison.different_parameters, vec![0]);
    assert_eq!(comparison.same_parameters, vec![1]);

    assert_eq!(
        summarize(&comparison),
        ComparisonSummary {
            total_parameters: 2,
            changed_parameters: 1,
            unchanged_parameters: 1,
            effect_changed: false,
            name_changed: false,
        }
    );
}

#[test]
fn float_epsilon_classification() {
    let base = preset(1, "Eps", &[ParameterValue::Float(0.25)]);
    let near = preset(1, "Eps", &[ParameterValue::Float(0.250_000_1)]);
    let far = preset(1, "Eps", &[ParameterValue::Float(0.35)]);

    assert_eq!(compare_presets(&base, &near).same_parameters, vec![0]);
    assert_eq!(compare_presets(&base, &far).different_parameters, vec![0]);
}

#[test]
fn comparison_covers_every_index_once() {
    let shapes: [&[ParameterValue]; 4] = [
        &[],
        &[ParameterValue::Flag(1)],
        &[
            ParameterValue::Flag(1),
            ParameterValue::Float(0.5),
            ParameterValue::Integer(3),
        ],
        &[
            ParameterValue::BoolOrIndex(1),
            ParameterValue::Float(0.5),
            ParameterValue::Integer(4),
            ParameterValue::Integer(4),
            ParameterValue::Float(0.1),
        ],
    ];
    let presets: Vec<Preset> = shapes.iter().map(|values| preset(7, "Cover", values)).collect();

    for a in &presets {
        for b in &presets {
            let comparison = compare_presets(a, b);
            let total = a.parameters().len().max(b.parameters().len());

            let mut all: Vec<usize> = comparison
                .different_parameters
                .iter()
                .chain(comparison.same_parameters.iter())
                .copied()
                .collect();
            all.sort_unstable();
            assert_eq!(all, (0..total).collect::<Vec<_>>());

            assert!(comparison.different_parameters.windows(2).all(|w| w[0] < w[1]));
            assert!(comparison.same_parameters.windows(2).all(|w| w[0] < w[1]));
            assert_eq!(comparison.summary().total_parameters, total);
        }
    }
}

#[test]
fn comparison_does_not_mutate_inputs() {
    let a = preset(500, "A", &[ParameterValue::Float(0.5)]);
    let b = preset(600, "B", &[ParameterValue::Integer(2)]);
    let (a_before, b_before) = (a.clone(), b.clone());

    let summary = compare_presets(&a, &b).summary();
    assert!(summary.effect_changed);
    assert!(summary.name_changed);
    assert_eq!(a, a_before);
    assert_eq!(b, b_before);
}
