use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::models::{MacroSpec, PlanInput, PlanResult};

/// Export format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// `.csv` (any case) is CSV; everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ExportFormat::Csv,
            _ => ExportFormat::Json,
        }
    }
}

/// Round a float to n decimal places.
fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn macro_method(spec: &MacroSpec) -> String {
    match spec {
        MacroSpec::Ratios {
            protein_g_per_kg,
            fat_g_per_kg,
        } => format!("ratios (P {:.2} g/kg, F {:.2} g/kg)", protein_g_per_kg, fat_g_per_kg),
        MacroSpec::Percentages { protein, carb, fat } => {
            format!("percentages (P {:.0}%, C {:.0}%, F {:.0}%)", protein, carb, fat)
        }
    }
}

/// (field, value) rows shared by both formats' human-facing summary.
fn summary_rows(input: &PlanInput, result: &PlanResult) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("weight_kg", format!("{:.1}", input.body.weight_kg)),
        ("height_cm", format!("{:.1}", input.body.height_cm)),
        ("age_years", input.body.age_years.to_string()),
        ("sex", input.body.sex.to_string()),
        ("activity", input.activity.key().to_string()),
        ("goal", input.goal.key().to_string()),
        ("adjustment_percent", format!("{:.0}", result.adjustment_percent)),
        ("macro_method", macro_method(&input.macros)),
        ("bmr_kcal", format!("{:.0}", result.bmr)),
        ("tdee_kcal", format!("{:.0}", result.tdee)),
        ("target_kcal", format!("{:.0}", result.target_kcal)),
        ("protein_g", format!("{:.1}", result.macros.protein_g)),
        ("carb_g", format!("{:.1}", result.macros.carb_g)),
        ("fat_g", format!("{:.1}", result.macros.fat_g)),
        ("protein_kcal", format!("{:.0}", result.protein_kcal)),
        ("carb_kcal", format!("{:.0}", result.carb_kcal)),
        ("fat_kcal", format!("{:.0}", result.fat_kcal)),
        ("water_l", format!("{:.2}", result.water_liters())),
    ];
    for notice in &result.notices {
        rows.push(("notice", notice.message()));
    }
    rows
}

/// Write the plan summary as `field,value` CSV rows.
pub fn write_plan_csv(input: &PlanInput, result: &PlanResult, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["field", "value"])?;
    for (field, value) in summary_rows(input, result) {
        wtr.write_record([field, value.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the plan summary as JSON with rounded numbers.
pub fn write_plan_json(input: &PlanInput, result: &PlanResult, path: &Path) -> Result<()> {
    let json = serde_json::json!({
        "input": input,
        "result": {
            "bmr_kcal": truncate(result.bmr, 1),
            "tdee_kcal": truncate(result.tdee, 1),
            "adjustment_percent": result.adjustment_percent,
            "target_kcal": truncate(result.target_kcal, 1),
            "water_l": truncate(result.water_liters(), 2),
            "macros_g": {
                "protein": truncate(result.macros.protein_g, 1),
                "carb": truncate(result.macros.carb_g, 1),
                "fat": truncate(result.macros.fat_g, 1),
            },
            "macros_kcal": {
                "protein": truncate(result.protein_kcal, 1),
                "carb": truncate(result.carb_kcal, 1),
                "fat": truncate(result.fat_kcal, 1),
            },
        },
        "notices": result.notices.iter().map(|n| n.message()).collect::<Vec<_>>(),
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    Ok(())
}

/// Export in the format implied by `path`.
pub fn export_plan(input: &PlanInput, result: &PlanResult, path: &Path) -> Result<ExportFormat> {
    let format = ExportFormat::from_path(path);
    match format {
        ExportFormat::Csv => write_plan_csv(input, result, path)?,
        ExportFormat::Json => write_plan_json(input, result, path)?,
    }
    info!(path = %path.display(), ?format, "Exported plan");
    Ok(format)
}
