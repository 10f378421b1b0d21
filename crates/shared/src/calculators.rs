//! Deterministic health calculators. Inputs arrive through the `*Form` types,
//! which clamp every field to the bounds the input widgets allow before the
//! arithmetic runs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BMI_FACTOR: f64 = 703.0;
const OUNCES_PER_CUP: f64 = 8.0;
const LITERS_PER_OUNCE: f64 = 0.0295735;
const KG_PER_LB: f64 = 0.453592;
const CM_PER_INCH: f64 = 2.54;
const CALORIE_GOAL_DELTA: f64 = 500.0;

pub const HEIGHT_FEET_BOUNDS: (u32, u32) = (1, 8);
pub const HEIGHT_INCHES_BOUNDS: (u32, u32) = (0, 11);
pub const WEIGHT_LBS_BOUNDS: (f64, f64) = (50.0, 500.0);
pub const AGE_BOUNDS: (u32, u32) = (10, 100);
pub const TOTAL_HEIGHT_INCHES_BOUNDS: (f64, f64) = (36.0, 96.0);

#[derive(Debug, Error, PartialEq)]
pub enum CalculatorError {
    #[error("height must be greater than zero")]
    ZeroHeight,
    #[error("height of {feet} ft {inches} in is out of range")]
    HeightOutOfRange { feet: u32, inches: u32 },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    NormalWeight,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub const ALL: [BmiCategory; 4] = [
        Self::Underweight,
        Self::NormalWeight,
        Self::Overweight,
        Self::Obese,
    ];

    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::NormalWeight
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::NormalWeight => "Normal weight",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }

    pub const fn range_label(self) -> &'static str {
        match self {
            Self::Underweight => "Below 18.5",
            Self::NormalWeight => "18.5 - 24.9",
            Self::Overweight => "25.0 - 29.9",
            Self::Obese => "30.0 and above",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BmiCategoryRow {
    pub range: &'static str,
    pub category: &'static str,
    pub current: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
    pub category_label: &'static str,
    pub categories: Vec<BmiCategoryRow>,
    pub caveat: &'static str,
}

pub fn calculate_bmi(
    height_ft: u32,
    height_in: u32,
    weight_lbs: f64,
) -> Result<BmiResult, CalculatorError> {
    ensure_finite("weight_lbs", weight_lbs)?;
    let total_inches = height_ft
        .checked_mul(12)
        .and_then(|inches| inches.checked_add(height_in))
        .map(f64::from)
        .ok_or(CalculatorError::HeightOutOfRange {
            feet: height_ft,
            inches: height_in,
        })?;
    if total_inches <= 0.0 {
        return Err(CalculatorError::ZeroHeight);
    }

    let bmi = weight_lbs * BMI_FACTOR / (total_inches * total_inches);
    let category = BmiCategory::from_bmi(bmi);

    Ok(BmiResult {
        bmi,
        category,
        category_label: category.label(),
        categories: BmiCategory::ALL
            .iter()
            .map(|row| BmiCategoryRow {
                range: row.range_label(),
                category: row.label(),
                current: *row == category,
            })
            .collect(),
        caveat: "BMI is a screening tool. Consult healthcare providers for comprehensive health assessment.",
    })
}

#[derive(Debug, Clone, Copy)]
struct ZoneBand {
    name: &'static str,
    description: &'static str,
    lower_pct: u32,
    upper_pct: u32,
}

const HEART_RATE_ZONES: [ZoneBand; 5] = [
    ZoneBand {
        name: "Zone 1: Active Recovery",
        description: "Light activity, warm-up",
        lower_pct: 50,
        upper_pct: 60,
    },
    ZoneBand {
        name: "Zone 2: Base Endurance",
        description: "Aerobic base building",
        lower_pct: 60,
        upper_pct: 70,
    },
    ZoneBand {
        name: "Zone 3: Aerobic",
        description: "Moderate intensity",
        lower_pct: 70,
        upper_pct: 80,
    },
    ZoneBand {
        name: "Zone 4: Threshold",
        description: "Hard intensity",
        lower_pct: 80,
        upper_pct: 90,
    },
    ZoneBand {
        name: "Zone 5: Neuromuscular",
        description: "Maximum effort",
        lower_pct: 90,
        upper_pct: 95,
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct HeartRateZone {
    pub name: &'static str,
    pub description: &'static str,
    pub lower_pct: u32,
    pub upper_pct: u32,
    pub lower_bpm: u32,
    pub upper_bpm: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeartRateZones {
    pub max_hr: u32,
    pub zones: Vec<HeartRateZone>,
}

pub fn calculate_heart_rate_zones(age: u32) -> HeartRateZones {
    let max_hr = 220_u32.saturating_sub(age);

    HeartRateZones {
        max_hr,
        zones: HEART_RATE_ZONES
            .iter()
            .map(|band| HeartRateZone {
                name: band.name,
                description: band.description,
                lower_pct: band.lower_pct,
                upper_pct: band.upper_pct,
                lower_bpm: max_hr * band.lower_pct / 100,
                upper_bpm: max_hr * band.upper_pct / 100,
            })
            .collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HydrationActivity {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
}

impl HydrationActivity {
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 1.0,
            Self::LightlyActive => 1.2,
            Self::ModeratelyActive => 1.4,
            Self::VeryActive => 1.6,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Sedentary => "Sedentary",
            Self::LightlyActive => "Lightly Active",
            Self::ModeratelyActive => "Moderately Active",
            Self::VeryActive => "Very Active",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HydrationResult {
    pub ounces: f64,
    pub cups: f64,
    pub liters: f64,
    pub note: &'static str,
}

pub fn calculate_hydration(
    weight_lbs: f64,
    activity: HydrationActivity,
) -> Result<HydrationResult, CalculatorError> {
    ensure_finite("weight_lbs", weight_lbs)?;
    let ounces = weight_lbs / 2.0 * activity.multiplier();

    Ok(HydrationResult {
        ounces,
        cups: ounces / OUNCES_PER_CUP,
        liters: ounces * LITERS_PER_OUNCE,
        note: "This is a general guideline. Adjust based on climate, health conditions, and individual needs.",
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalorieActivity {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl CalorieActivity {
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Active => 1.725,
            Self::VeryActive => 1.9,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Sedentary => "Sedentary (little/no exercise)",
            Self::Light => "Light (light exercise 1-3 days/week)",
            Self::Moderate => "Moderate (moderate exercise 3-5 days/week)",
            Self::Active => "Active (hard exercise 6-7 days/week)",
            Self::VeryActive => "Very Active (very hard exercise, physical job)",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CalorieGoal {
    pub goal: &'static str,
    pub calories: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalorieResult {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub bmr: f64,
    pub total: f64,
    pub goals: Vec<CalorieGoal>,
    pub caveat: &'static str,
}

/// Mifflin-St Jeor estimate of daily calorie needs.
pub fn calculate_calories(
    sex: Sex,
    age: u32,
    weight_lbs: f64,
    height_in: f64,
    activity: CalorieActivity,
) -> Result<CalorieResult, CalculatorError> {
    ensure_finite("weight_lbs", weight_lbs)?;
    ensure_finite("height_in", height_in)?;

    let weight_kg = weight_lbs * KG_PER_LB;
    let height_cm = height_in * CM_PER_INCH;
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    let bmr = match sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    };
    let total = bmr * activity.multiplier();

    Ok(CalorieResult {
        weight_kg,
        height_cm,
        bmr,
        total,
        goals: vec![
            CalorieGoal {
                goal: "Weight Loss",
                calories: total - CALORIE_GOAL_DELTA,
            },
            CalorieGoal {
                goal: "Maintenance",
                calories: total,
            },
            CalorieGoal {
                goal: "Weight Gain",
                calories: total + CALORIE_GOAL_DELTA,
            },
        ],
        caveat: "Consult with a healthcare provider or registered dietitian for personalized nutrition advice.",
    })
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BmiForm {
    pub height_ft: u32,
    pub height_in: u32,
    pub weight_lbs: f64,
}

impl BmiForm {
    pub fn evaluate(self) -> Result<BmiResult, CalculatorError> {
        calculate_bmi(
            self.height_ft.clamp(HEIGHT_FEET_BOUNDS.0, HEIGHT_FEET_BOUNDS.1),
            self.height_in
                .clamp(HEIGHT_INCHES_BOUNDS.0, HEIGHT_INCHES_BOUNDS.1),
            clamp_f64("weight_lbs", self.weight_lbs, WEIGHT_LBS_BOUNDS)?,
        )
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HeartRateForm {
    pub age: u32,
}

impl HeartRateForm {
    pub fn evaluate(self) -> HeartRateZones {
        calculate_heart_rate_zones(self.age.clamp(AGE_BOUNDS.0, AGE_BOUNDS.1))
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HydrationForm {
    pub weight_lbs: f64,
    pub activity: HydrationActivity,
}

impl HydrationForm {
    pub fn evaluate(self) -> Result<HydrationResult, CalculatorError> {
        calculate_hydration(
            clamp_f64("weight_lbs", self.weight_lbs, WEIGHT_LBS_BOUNDS)?,
            self.activity,
        )
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CalorieForm {
    pub sex: Sex,
    pub age: u32,
    pub weight_lbs: f64,
    pub height_in: f64,
    pub activity: CalorieActivity,
}

impl CalorieForm {
    pub fn evaluate(self) -> Result<CalorieResult, CalculatorError> {
        calculate_calories(
            self.sex,
            self.age.clamp(AGE_BOUNDS.0, AGE_BOUNDS.1),
            clamp_f64("weight_lbs", self.weight_lbs, WEIGHT_LBS_BOUNDS)?,
            clamp_f64("height_in", self.height_in, TOTAL_HEIGHT_INCHES_BOUNDS)?,
            self.activity,
        )
    }
}

fn ensure_finite(field: &'static str, value: f64) -> Result<(), CalculatorError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalculatorError::NotFinite { field })
    }
}

fn clamp_f64(field: &'static str, value: f64, bounds: (f64, f64)) -> Result<f64, CalculatorError> {
    ensure_finite(field, value)?;
    Ok(value.clamp(bounds.0, bounds.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: f64, expected: f64, tolerance: f64) -> bool {
        (actual - expected).abs() <= tolerance
    }

    #[test]
    fn bmi_for_average_adult_is_normal_weight() {
        let result = calculate_bmi(5, 8, 150.0).expect("bmi should compute");
        assert!(approx(result.bmi, 22.8, 0.05), "bmi was {}", result.bmi);
        assert_eq!(result.category, BmiCategory::NormalWeight);
        assert_eq!(result.category_label, "Normal weight");

        let current = result
            .categories
            .iter()
            .filter(|row| row.current)
            .map(|row| row.category)
            .collect::<Vec<_>>();
        assert_eq!(current, vec!["Normal weight"]);
    }

    #[test]
    fn bmi_rejects_heights_that_overflow() {
        assert_eq!(
            calculate_bmi(u32::MAX, 0, 150.0).err(),
            Some(CalculatorError::HeightOutOfRange {
                feet: u32::MAX,
                inches: 0
            })
        );
        assert!(calculate_bmi(357_913_941, u32::MAX, 150.0).is_err());
    }

    #[test]
    fn bmi_for_heavy_short_adult_is_obese() {
        let result = calculate_bmi(5, 0, 250.0).expect("bmi should compute");
        assert_eq!(result.category_label, "Obese");
    }

    #[test]
    fn bmi_category_boundaries_are_half_open() {
        assert_eq!(BmiCategory::from_bmi(18.49), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::NormalWeight);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn bmi_rejects_zero_height() {
        assert_eq!(
            calculate_bmi(0, 0, 150.0).expect_err("zero height should fail"),
            CalculatorError::ZeroHeight
        );
    }

    #[test]
    fn heart_rate_zones_floor_their_bounds() {
        let zones = calculate_heart_rate_zones(30);
        assert_eq!(zones.max_hr, 190);
        assert_eq!(zones.zones.len(), 5);
        assert_eq!((zones.zones[0].lower_bpm, zones.zones[0].upper_bpm), (95, 114));
        assert_eq!((zones.zones[4].lower_bpm, zones.zones[4].upper_bpm), (171, 180));
    }

    #[test]
    fn hydration_scales_with_activity() {
        let result =
            calculate_hydration(150.0, HydrationActivity::ModeratelyActive).expect("should compute");
        assert!(approx(result.ounces, 105.0, 1e-9));
        assert!(approx(result.cups, 13.125, 1e-9));
        assert!(approx(result.liters, 3.1052, 1e-3));
    }

    #[test]
    fn calories_follow_mifflin_st_jeor() {
        let result = calculate_calories(Sex::Male, 30, 150.0, 68.0, CalorieActivity::Sedentary)
            .expect("should compute");
        assert!(approx(result.weight_kg, 68.04, 0.01));
        assert!(approx(result.height_cm, 172.72, 0.01));
        assert!(approx(result.bmr, 1614.89, 0.5), "bmr was {}", result.bmr);
        assert!(approx(result.total, 1937.87, 1.0), "total was {}", result.total);

        let goals = result
            .goals
            .iter()
            .map(|goal| (goal.goal, goal.calories.round() as i64))
            .collect::<Vec<_>>();
        assert_eq!(
            goals,
            vec![("Weight Loss", 1438), ("Maintenance", 1938), ("Weight Gain", 2438)]
        );
    }

    #[test]
    fn female_bmr_uses_lower_constant() {
        let male = calculate_calories(Sex::Male, 30, 150.0, 68.0, CalorieActivity::Moderate)
            .expect("should compute");
        let female = calculate_calories(Sex::Female, 30, 150.0, 68.0, CalorieActivity::Moderate)
            .expect("should compute");
        assert!(approx(male.bmr - female.bmr, 166.0, 1e-9));
    }

    #[test]
    fn forms_clamp_inputs_to_widget_bounds() {
        let zones = HeartRateForm { age: 400 }.evaluate();
        assert_eq!(zones.max_hr, 120);

        let bmi = BmiForm {
            height_ft: 5,
            height_in: 30,
            weight_lbs: 10.0,
        }
        .evaluate()
        .expect("clamped bmi should compute");
        let expected = 50.0 * 703.0 / (71.0 * 71.0);
        assert!(approx(bmi.bmi, expected, 1e-9));
    }

    #[test]
    fn forms_reject_non_finite_numbers() {
        let err = HydrationForm {
            weight_lbs: f64::NAN,
            activity: HydrationActivity::Sedentary,
        }
        .evaluate()
        .expect_err("nan weight should fail");
        assert_eq!(err, CalculatorError::NotFinite { field: "weight_lbs" });
    }
}
