//! Human-readable rendering for inspect and compare output.

use std::fmt::Write;

use hxpreset_core::{Parameter, Preset, PresetComparison};

pub fn render_inspect(path: &str, preset: &Preset) -> String {
    let mut out = String::new();
    let header = preset
        .header_words()
        .iter()
        .map(|word| word.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let _ = writeln!(out, "Preset: {path}");
    let _ = writeln!(out, "  Size:       {} bytes", preset.raw().len());
    let _ = writeln!(
        out,
        "  Effect ID:  {} (0x{:X})",
        preset.effect_id(),
        preset.effect_id()
    );
    let _ = writeln!(out, "  Name:       {}", display_name(preset.name()));
    let _ = writeln!(
        out,
        "  Data size:  {} bytes ({} parameters)",
        preset.data_size(),
        preset.parameters().len()
    );
    let _ = writeln!(out, "  Header:     {header}");
    let _ = writeln!(out);

    if preset.parameters().is_empty() {
        let _ = writeln!(out, "No parameters.");
        return out;
    }

    let _ = writeln!(out, "Parameters:");
    let _ = writeln!(out, "  Idx  Offset  Type         Value");
    let _ = writeln!(out, "  ---  ------  -----------  -------------");
    for (index, param) in preset.parameters().iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>3}  0x{:04X}  {:<11}  {}",
            index,
            param.offset,
            param.kind().name(),
            param.value
        );
    }
    out
}

pub fn render_comparison(path_a: &str, path_b: &str, comparison: &PresetComparison<'_>) -> String {
    let mut out = String::new();
    let summary = comparison.summary();
    let (a, b) = (comparison.preset_a, comparison.preset_b);

    let _ = writeln!(out, "Preset Comparison:");
    let _ = writeln!(out, "  File 1:   {path_a}");
    let _ = writeln!(out, "  File 2:   {path_b}");
    let _ = writeln!(out);
    let _ = writeln!(out, "  Name 1:   {}", display_name(a.name()));
    let _ = writeln!(out, "  Name 2:   {}", display_name(b.name()));
    let _ = writeln!(
        out,
        "            {}",
        if comparison.same_name {
            "same name"
        } else {
            "different names"
        }
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "  Effect 1: {} (0x{:X})", a.effect_id(), a.effect_id());
    let _ = writeln!(out, "  Effect 2: {} (0x{:X})", b.effect_id(), b.effect_id());
    let _ = writeln!(
        out,
        "            {}",
        if comparison.same_effect {
            "same effect"
        } else {
            "different effects"
        }
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Parameter Summary:");
    let _ = writeln!(out, "  Total:      {}", summary.total_parameters);
    let _ = writeln!(out, "  Same:       {}", summary.unchanged_parameters);
    let _ = writeln!(out, "  Different:  {}", summary.changed_parameters);
    let _ = writeln!(out);

    if comparison.different_parameters.is_empty() {
        let _ = writeln!(out, "All parameters are identical.");
        return out;
    }

    let _ = writeln!(out, "Different Parameters:");
    let _ = writeln!(out, "  Idx  Type         Value 1        Value 2");
    let _ = writeln!(out, "  ---  -----------  -------------  -------------");
    for &index in &comparison.different_parameters {
        let param_a = a.parameters().get(index);
        let param_b = b.parameters().get(index);
        let kind = param_a
            .or(param_b)
            .map(|param| param.kind().name())
            .unwrap_or("Missing");
        let _ = writeln!(
            out,
            "  {:>3}  {:<11}  {:<13}  {}",
            index,
            kind,
            display_value(param_a),
            display_value(param_b)
        );
    }
    out
}

fn display_value(param: Option<&Parameter>) -> String {
    param
        .map(|param| param.value.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn display_name(name: &str) -> &str {
    if name.is_empty() { "(unnamed)" } else { name }
}
