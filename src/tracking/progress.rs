use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{CaloriaError, Result};
use crate::models::{
    Checkin, CheckinNotes, CheckinScores, Circumferences, FastingLog, Measurement,
};

/// Highest allowed check-in score.
pub const SCORE_MAX: u8 = 10;

/// Build a check-in, rejecting scores above `SCORE_MAX`.
pub fn new_checkin(
    ref_date: NaiveDate,
    weight_kg: Option<f64>,
    scores: CheckinScores,
    notes: CheckinNotes,
    now: NaiveDateTime,
) -> Result<Checkin> {
    for (name, value) in CheckinScores::NAMES.iter().zip(scores.values()) {
        if value > SCORE_MAX {
            return Err(CaloriaError::InvalidInput(format!(
                "{} score must be 0-{}, got {}",
                name, SCORE_MAX, value
            )));
        }
    }
    if let Some(w) = weight_kg {
        if !(w.is_finite() && w > 0.0) {
            return Err(CaloriaError::InvalidInput(format!(
                "weight must be positive, got {}",
                w
            )));
        }
    }

    Ok(Checkin {
        id: Uuid::new_v4(),
        ref_date,
        weight_kg,
        scores,
        notes,
        created_at: now,
    })
}

/// Build a measurement; zero sites are stored as missing.
pub fn new_measurement(
    ref_date: NaiveDate,
    sites: Circumferences,
    now: NaiveDateTime,
) -> Measurement {
    let keep = |v: Option<f64>| v.filter(|x| *x > 0.0);
    Measurement {
        id: Uuid::new_v4(),
        ref_date,
        sites: Circumferences {
            chest_cm: keep(sites.chest_cm),
            arm_cm: keep(sites.arm_cm),
            waist_cm: keep(sites.waist_cm),
            abdomen_cm: keep(sites.abdomen_cm),
            hip_cm: keep(sites.hip_cm),
            thigh_cm: keep(sites.thigh_cm),
            calf_cm: keep(sites.calf_cm),
        },
        created_at: now,
    }
}

/// Start (and optionally close) a fasting window.
pub fn new_fasting(start: NaiveDateTime, end: Option<NaiveDateTime>) -> Result<FastingLog> {
    if let Some(end) = end {
        if end < start {
            return Err(CaloriaError::InvalidInput(
                "fasting end is before its start".to_string(),
            ));
        }
    }
    Ok(FastingLog {
        id: Uuid::new_v4(),
        start,
        end,
    })
}

/// Weight evolution from check-ins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightTrend {
    /// Chronological (date, kg) points.
    pub points: Vec<(NaiveDate, f64)>,
    pub initial_kg: f64,
    pub current_kg: f64,
    pub delta_kg: f64,
}

/// Trend over check-ins that carry a weight; `None` when there are none.
pub fn weight_trend(checkins: &[Checkin]) -> Option<WeightTrend> {
    let mut points: Vec<(NaiveDate, f64)> = checkins
        .iter()
        .filter_map(|c| c.weight_kg.map(|w| (c.ref_date, w)))
        .collect();
    points.sort_by_key(|(d, _)| *d);

    let initial_kg = points.first()?.1;
    let current_kg = points.last()?.1;

    Some(WeightTrend {
        points,
        initial_kg,
        current_kg,
        delta_kg: current_kg - initial_kg,
    })
}

/// A measurement with per-site change against the previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementDelta<'a> {
    pub measurement: &'a Measurement,
    /// Same order as `Circumferences::SITES`, rounded to 0.1 cm.
    pub deltas: [Option<f64>; 7],
}

/// Deltas between consecutive measurements, newest first.
///
/// A site delta exists only when both measurements recorded it.
pub fn measurement_deltas(measurements: &[Measurement]) -> Vec<MeasurementDelta<'_>> {
    let mut sorted: Vec<&Measurement> = measurements.iter().collect();
    sorted.sort_by_key(|m| (m.ref_date, m.created_at));

    let mut out: Vec<MeasurementDelta> = Vec::with_capacity(sorted.len());
    for (i, m) in sorted.iter().enumerate() {
        let mut deltas = [None; 7];
        if i > 0 {
            let prev = sorted[i - 1].sites.values();
            for (slot, (now, before)) in deltas.iter_mut().zip(m.sites.values().iter().zip(prev)) {
                if let (Some(a), Some(b)) = (now, before) {
                    *slot = Some(((a - b) * 10.0).round() / 10.0);
                }
            }
        }
        out.push(MeasurementDelta {
            measurement: m,
            deltas,
        });
    }

    out.reverse();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    fn at(d: u32) -> NaiveDateTime {
        date(d).and_hms_opt(8, 0, 0).unwrap()
    }

    fn checkin(d: u32, w: Option<f64>) -> Checkin {
        new_checkin(date(d), w, CheckinScores::default(), CheckinNotes::default(), at(d)).unwrap()
    }

    #[test]
    fn test_checkin_rejects_out_of_range_score() {
        let scores = CheckinScores {
            stress: 11,
            ..Default::default()
        };
        let err = new_checkin(date(1), None, scores, CheckinNotes::default(), at(1)).unwrap_err();
        assert!(err.to_string().contains("stress"));
    }

    #[test]
    fn test_checkin_rejects_bad_weight() {
        assert!(
            new_checkin(
                date(1),
                Some(-3.0),
                CheckinScores::default(),
                CheckinNotes::default(),
                at(1)
            )
            .is_err()
        );
    }

    #[test]
    fn test_weight_trend_sorted_and_skips_missing() {
        let checkins = vec![checkin(15, Some(79.0)), checkin(1, Some(81.5)), checkin(8, None)];
        let trend = weight_trend(&checkins).unwrap();
        assert_eq!(trend.points.len(), 2);
        assert_eq!(trend.initial_kg, 81.5);
        assert_eq!(trend.current_kg, 79.0);
        assert!((trend.delta_kg + 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_weight_trend_empty() {
        assert!(weight_trend(&[checkin(1, None)]).is_none());
        assert!(weight_trend(&[]).is_none());
    }

    #[test]
    fn test_measurement_deltas() {
        let first = new_measurement(
            date(1),
            Circumferences {
                waist_cm: Some(90.0),
                arm_cm: Some(35.0),
                ..Default::default()
            },
            at(1),
        );
        let second = new_measurement(
            date(15),
            Circumferences {
                waist_cm: Some(88.7),
                hip_cm: Some(100.0),
                ..Default::default()
            },
            at(15),
        );
        let all = vec![second.clone(), first.clone()];
        let deltas = measurement_deltas(&all);

        assert_eq!(deltas.len(), 2);
        assert_eq!(deltas[0].measurement.id, second.id);
        assert_eq!(deltas[0].deltas[2], Some(-1.3));
        assert_eq!(deltas[0].deltas[1], None);
        assert_eq!(deltas[0].deltas[4], None);
        assert!(deltas[1].deltas.iter().all(Option::is_none));
    }

    #[test]
    fn test_measurement_zero_is_missing() {
        let m = new_measurement(
            date(1),
            Circumferences {
                chest_cm: Some(0.0),
                ..Default::default()
            },
            at(1),
        );
        assert_eq!(m.sites.chest_cm, None);
    }

    #[test]
    fn test_fasting_end_before_start() {
        assert!(new_fasting(at(2), Some(at(1))).is_err());
        assert!(new_fasting(at(1), None).is_ok());
    }
}
