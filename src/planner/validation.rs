use crate::error::{CaloriaError, Result};
use crate::models::{MacroSpec, PlanInput};
use crate::planner::constants::*;

/// `value` if it is finite and within `[min, max]`.
pub fn check_range(label: &str, value: f64, min: f64, max: f64) -> Result<f64> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(CaloriaError::InvalidInput(format!(
            "{} must be between {} and {}, got {}",
            label, min, max, value
        )))
    }
}

pub fn check_age(age: u32) -> Result<u32> {
    if (AGE_MIN..=AGE_MAX).contains(&age) {
        Ok(age)
    } else {
        Err(CaloriaError::InvalidInput(format!(
            "age must be between {} and {}, got {}",
            AGE_MIN, AGE_MAX, age
        )))
    }
}

/// Range-check a macro prescription against the UI bounds.
pub fn check_macro_spec(spec: MacroSpec) -> Result<MacroSpec> {
    match spec {
        MacroSpec::Ratios {
            protein_g_per_kg,
            fat_g_per_kg,
        } => Ok(MacroSpec::Ratios {
            protein_g_per_kg: check_range(
                "protein g/kg",
                protein_g_per_kg,
                PROTEIN_G_PER_KG_MIN,
                PROTEIN_G_PER_KG_MAX,
            )?,
            fat_g_per_kg: check_range(
                "fat g/kg",
                fat_g_per_kg,
                FAT_G_PER_KG_MIN,
                FAT_G_PER_KG_MAX,
            )?,
        }),
        MacroSpec::Percentages { protein, carb, fat } => Ok(MacroSpec::Percentages {
            protein: check_range("protein %", protein, PERCENT_MIN, PERCENT_MAX)?,
            carb: check_range("carb %", carb, PERCENT_MIN, PERCENT_MAX)?,
            fat: check_range("fat %", fat, PERCENT_MIN, PERCENT_MAX)?,
        }),
    }
}

/// Reject NaN and infinite values anywhere in a plan input.
///
/// Finite values outside the UI bounds are accepted.
pub fn ensure_finite(input: &PlanInput) -> Result<()> {
    let mut values = vec![
        ("weight", input.body.weight_kg),
        ("height", input.body.height_cm),
    ];
    if let Some(adjustment) = input.adjustment_percent {
        values.push(("adjustment", adjustment));
    }
    match input.macros {
        MacroSpec::Ratios {
            protein_g_per_kg,
            fat_g_per_kg,
        } => {
            values.push(("protein g/kg", protein_g_per_kg));
            values.push(("fat g/kg", fat_g_per_kg));
        }
        MacroSpec::Percentages { protein, carb, fat } => {
            values.push(("protein %", protein));
            values.push(("carb %", carb));
            values.push(("fat %", fat));
        }
    }

    match values.into_iter().find(|(_, v)| !v.is_finite()) {
        Some((label, v)) => Err(CaloriaError::InvalidInput(format!(
            "{} must be a finite number, got {}",
            label, v
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, BodyProfile, Goal, Sex};

    fn input(adjustment_percent: Option<f64>, macros: MacroSpec) -> PlanInput {
        PlanInput {
            body: BodyProfile::new(75.0, 175.0, 30, Sex::Male),
            activity: ActivityLevel::Moderate,
            goal: Goal::Maintenance,
            adjustment_percent,
            macros,
        }
    }

    #[test]
    fn test_check_range_rejects_nan_and_infinity() {
        assert!(check_range("adjustment", f64::NAN, -40.0, 40.0).is_err());
        assert!(check_range("adjustment", f64::INFINITY, -40.0, 40.0).is_err());
        assert!(check_range("adjustment", 41.0, -40.0, 40.0).is_err());
        assert_eq!(check_range("adjustment", -40.0, -40.0, 40.0).unwrap(), -40.0);
    }

    #[test]
    fn test_check_macro_spec_bounds() {
        let ok = MacroSpec::Ratios {
            protein_g_per_kg: 2.0,
            fat_g_per_kg: 0.8,
        };
        assert_eq!(check_macro_spec(ok).unwrap(), ok);

        assert!(check_macro_spec(MacroSpec::Ratios {
            protein_g_per_kg: f64::NAN,
            fat_g_per_kg: 0.8,
        })
        .is_err());
        assert!(check_macro_spec(MacroSpec::Percentages {
            protein: 30.0,
            carb: f64::INFINITY,
            fat: 30.0,
        })
        .is_err());
        assert!(check_macro_spec(MacroSpec::Percentages {
            protein: 130.0,
            carb: 0.0,
            fat: 0.0,
        })
        .is_err());
    }

    #[test]
    fn test_ensure_finite() {
        let ratios = MacroSpec::Ratios {
            protein_g_per_kg: 2.0,
            fat_g_per_kg: 0.8,
        };
        assert!(ensure_finite(&input(Some(-60.0), ratios)).is_ok());
        assert!(ensure_finite(&input(Some(f64::NAN), ratios)).is_err());
        assert!(ensure_finite(&input(
            None,
            MacroSpec::Ratios {
                protein_g_per_kg: 2.0,
                fat_g_per_kg: f64::NEG_INFINITY,
            }
        ))
        .is_err());

        let mut bad_body = input(None, ratios);
        bad_body.body.weight_kg = f64::NAN;
        assert!(ensure_finite(&bad_body).is_err());
    }
}
