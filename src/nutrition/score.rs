//! Daily adherence score.
//!
//! Compares actual calorie intake to the computed target on an asymmetric
//! curve: proximity to the target is rewarded, moderate undereating decays
//! gently, overshoot beyond 20% decays steeply.

use serde::Serialize;

use crate::error::EngineError;

/// Below this intake/target ratio the gentle under-eating slope applies.
const UNDER_KNEE: f64 = 0.8;
/// At and above this ratio the steep overshoot slope applies.
const OVER_KNEE: f64 = 1.2;
const UNDER_SLOPE: f64 = 125.0;
const OVER_SLOPE: f64 = 150.0;

/// Adherence score in [0, 100].
///
/// Returns 0 when nothing was logged. The ratio-1.2 boundary belongs to the
/// overshoot branch, so eating exactly 120% of target still scores 100 before
/// the steep decay starts.
pub fn score(total_calories: f64, target_calories: i32) -> Result<u8, EngineError> {
    if target_calories <= 0 {
        return Err(EngineError::InvalidArgument(
            "target_calories must be positive",
        ));
    }
    if total_calories <= 0.0 {
        return Ok(0);
    }

    let ratio = total_calories / f64::from(target_calories);
    let raw = if ratio < UNDER_KNEE {
        ratio * UNDER_SLOPE
    } else if ratio >= OVER_KNEE {
        100.0 - (ratio - OVER_KNEE) * OVER_SLOPE
    } else {
        100.0 - (1.0 - ratio).abs() * 100.0
    };

    Ok(raw.clamp(0.0, 100.0).round() as u8)
}

/// Presentation badge for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Badge {
    #[serde(rename = "Excellent")]
    Excellent,
    #[serde(rename = "Très bien")]
    TresBien,
    #[serde(rename = "Bien")]
    Bien,
    #[serde(rename = "À améliorer")]
    AAmeliorer,
}

impl Badge {
    pub fn for_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => Badge::Excellent,
            80..=89 => Badge::TresBien,
            60..=79 => Badge::Bien,
            _ => Badge::AAmeliorer,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Badge::Excellent => "Excellent",
            Badge::TresBien => "Très bien",
            Badge::Bien => "Bien",
            Badge::AAmeliorer => "À améliorer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_scores() {
        assert_eq!(score(0.0, 2000), Ok(0));
        assert_eq!(score(2000.0, 2000), Ok(100));
        // ratio 1.2 sits on the overshoot branch: 100 - 0 * 150
        assert_eq!(score(2400.0, 2000), Ok(100));
        // ratio 1.5: 100 - 0.3 * 150 = 55
        assert_eq!(score(3000.0, 2000), Ok(55));
        // ratio 0.5: 0.5 * 125 = 62.5 -> 63 (round half away from zero)
        assert_eq!(score(1000.0, 2000), Ok(63));
    }

    #[test]
    fn near_target_band_uses_distance() {
        // ratio 0.9 -> 100 - 10 = 90
        assert_eq!(score(1800.0, 2000), Ok(90));
        // ratio 1.1 -> 100 - 10 = 90
        assert_eq!(score(2200.0, 2000), Ok(90));
    }

    #[test]
    fn large_overshoot_clamps_to_zero() {
        // ratio 2.0: 100 - 0.8 * 150 = -20 -> 0
        assert_eq!(score(4000.0, 2000), Ok(0));
        assert_eq!(score(10_000.0, 2000), Ok(0));
    }

    #[test]
    fn negative_intake_scores_zero() {
        assert_eq!(score(-100.0, 2000), Ok(0));
    }

    #[test]
    fn non_positive_target_is_rejected() {
        assert_eq!(
            score(1800.0, 0),
            Err(EngineError::InvalidArgument("target_calories must be positive"))
        );
        assert!(score(1800.0, -2000).is_err());
    }

    #[test]
    fn badge_thresholds() {
        assert_eq!(Badge::for_score(100), Badge::Excellent);
        assert_eq!(Badge::for_score(90), Badge::Excellent);
        assert_eq!(Badge::for_score(89), Badge::TresBien);
        assert_eq!(Badge::for_score(80), Badge::TresBien);
        assert_eq!(Badge::for_score(79), Badge::Bien);
        assert_eq!(Badge::for_score(60), Badge::Bien);
        assert_eq!(Badge::for_score(59), Badge::AAmeliorer);
        assert_eq!(Badge::for_score(0), Badge::AAmeliorer);
    }

    #[test]
    fn window_totals_reproduce_direct_badges() {
        use crate::meals::repo_types::{MealNutrition, MealRecord};
        use crate::nutrition::aggregate::totals_for_window;
        use time::macros::{date, datetime};
        use uuid::Uuid;

        let meal = MealRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "plat du jour".to_string(),
            nutrition: MealNutrition {
                calories: 900.0,
                protein_g: 50.0,
                fat_g: 30.0,
                carbs_g: 95.0,
            },
            ingredients: Vec::new(),
            completions: vec![
                datetime!(2026-08-05 12:00 UTC),
                datetime!(2026-08-05 19:00 UTC),
                datetime!(2026-08-06 12:30 UTC),
            ],
        };
        let target = 2000;
        let days = totals_for_window(&[meal], date!(2026 - 08 - 06), 3).expect("window");

        // 2026-08-05 holds two completions: 1800/2000 -> 90 -> Excellent
        let busy = &days[1];
        assert_eq!(busy.calories, 1800.0);
        let s = score(busy.calories, target).expect("score");
        assert_eq!(s, 90);
        assert_eq!(Badge::for_score(s), Badge::Excellent);
        // the empty day scores 0 -> À améliorer
        let empty = &days[0];
        assert_eq!(score(empty.calories, target), Ok(0));
        assert_eq!(Badge::for_score(0), Badge::AAmeliorer);
    }

    #[test]
    fn badge_serializes_as_label() {
        let json = serde_json::to_string(&Badge::AAmeliorer).expect("serialize badge");
        assert_eq!(json, "\"À améliorer\"");
        assert_eq!(Badge::TresBien.label(), "Très bien");
    }
}
