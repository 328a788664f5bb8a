//! Daily macronutrient targets via the Mifflin-St Jeor equation

/// Activity multipliers (BMR multipliers)
const ACTIVITY_SEDENTARY: f64 = 1.2; // Little to no exercise
const ACTIVITY_LIGHT: f64 = 1.375; // Light exercise 1-3 days/week
const ACTIVITY_MODERATE: f64 = 1.55; // Moderate exercise 3-5 days/week
const ACTIVITY_ACTIVE: f64 = 1.725; // Hard exercise 6-7 days/week
const ACTIVITY_VERY_ACTIVE: f64 = 1.9; // Very hard exercise, physical job

/// Goal adjustments (calorie multipliers)
const GOAL_LOSE_WEIGHT: f64 = -0.20; // 20% deficit
const GOAL_BUILD_MUSCLE: f64 = 0.10; // 10% surplus
const GOAL_MAINTAIN: f64 = 0.0;
const GOAL_IMPROVE_ENDURANCE: f64 = 0.05; // 5% surplus
const GOAL_GENERAL_FITNESS: f64 = 0.0;

/// Protein ranges (g per lb bodyweight)
const PROTEIN_MIN: f64 = 0.8;
const PROTEIN_MAINTENANCE: f64 = 0.8;
const PROTEIN_LOSE_WEIGHT: f64 = 1.0;
const PROTEIN_BUILD_MUSCLE: f64 = 1.2; // 1.2-1.6g per lb for muscle building
const PROTEIN_ENDURANCE: f64 = 0.9;
const PROTEIN_GENERAL: f64 = 0.8;

/// Fat constants
const FAT_PERCENT_MIN: f64 = 0.20; // Minimum 20% of calories
const FAT_PERCENT_MAX: f64 = 0.30; // Maximum 30% of calories
const FAT_MIN_PER_LB: f64 = 0.3; // Minimum 0.3g per lb bodyweight

/// Calories per gram
const CALORIES_PER_GRAM_PROTEIN: f64 = 4.0;
const CALORIES_PER_GRAM_CARB: f64 = 4.0;
const CALORIES_PER_GRAM_FAT: f64 = 9.0;

/// Computed daily targets
#[derive(Debug, Clone, PartialEq)]
pub struct MacroBreakdown {
    pub calories: i32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Basal Metabolic Rate (calories/day), Mifflin-St Jeor
pub fn calculate_bmr_mifflin_st_jeor(
    weight_lbs: f64,
    height_inches: i32,
    age: i32,
    is_male: bool,
) -> f64 {
    let weight_kg = weight_lbs * 0.453592;
    let height_cm = height_inches as f64 * 2.54;

    let base = (10.0 * weight_kg) + (6.25 * height_cm) - (5.0 * age as f64);
    if is_male {
        base + 5.0
    } else {
        base - 161.0
    }
}

fn activity_multiplier(training_days_per_week: i32) -> f64 {
    match training_days_per_week {
        0 => ACTIVITY_SEDENTARY,
        1..=2 => ACTIVITY_LIGHT,
        3..=4 => ACTIVITY_MODERATE,
        5..=6 => ACTIVITY_ACTIVE,
        _ => ACTIVITY_VERY_ACTIVE,
    }
}

fn goal_adjustment(goal: &str) -> f64 {
    match goal {
        "lose_weight" => GOAL_LOSE_WEIGHT,
        "build_muscle" => GOAL_BUILD_MUSCLE,
        "maintain" => GOAL_MAINTAIN,
        "improve_endurance" => GOAL_IMPROVE_ENDURANCE,
        "general_fitness" => GOAL_GENERAL_FITNESS,
        _ => GOAL_MAINTAIN,
    }
}

fn protein_per_lb(goal: &str) -> f64 {
    match goal {
        "lose_weight" => PROTEIN_LOSE_WEIGHT,
        "build_muscle" => PROTEIN_BUILD_MUSCLE,
        "maintain" => PROTEIN_MAINTENANCE,
        "improve_endurance" => PROTEIN_ENDURANCE,
        "general_fitness" => PROTEIN_GENERAL,
        _ => PROTEIN_MIN,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Compute daily macro targets.
///
/// BMR → activity multiplier → goal adjustment → protein by goal → fat
/// clamped to 20-30% of calories with a 0.3 g/lb floor → carbs fill the
/// remainder. If protein and fat alone exceed the calorie target, carbs go
/// to zero and fat absorbs the shortfall.
pub fn calculate_macros(
    weight_lbs: f64,
    height_inches: i32,
    age: i32,
    is_male: bool,
    goal: &str,
    training_days_per_week: i32,
) -> MacroBreakdown {
    let bmr = calculate_bmr_mifflin_st_jeor(weight_lbs, height_inches, age, is_male);

    let maintenance_calories = bmr * activity_multiplier(training_days_per_week);
    let target_calories = maintenance_calories * (1.0 + goal_adjustment(goal));

    let protein_g = weight_lbs * protein_per_lb(goal);
    let protein_calories = protein_g * CALORIES_PER_GRAM_PROTEIN;

    // Fat: the higher of 0.3 g/lb and 20% of calories, capped at 30%
    let fat_min_calories = weight_lbs * FAT_MIN_PER_LB * CALORIES_PER_GRAM_FAT;
    let fat_floor_calories = fat_min_calories.max(target_calories * FAT_PERCENT_MIN);
    let fat_target_calories = fat_floor_calories.min(target_calories * FAT_PERCENT_MAX);

    let mut fat_g = fat_target_calories / CALORIES_PER_GRAM_FAT;
    let fat_calories = fat_g * CALORIES_PER_GRAM_FAT;

    let mut carbs_g = (target_calories - protein_calories - fat_calories) / CALORIES_PER_GRAM_CARB;

    if carbs_g < 0.0 {
        carbs_g = 0.0;
        fat_g = (target_calories - protein_calories) / CALORIES_PER_GRAM_FAT;
    }

    MacroBreakdown {
        calories: target_calories.round() as i32,
        protein_g: round1(protein_g),
        carbs_g: round1(carbs_g),
        fat_g: round1(fat_g),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmr_male_vs_female_offset() {
        let male = calculate_bmr_mifflin_st_jeor(180.0, 70, 30, true);
        let female = calculate_bmr_mifflin_st_jeor(180.0, 70, 30, false);
        assert!((male - female - 166.0).abs() < 1e-9);
    }

    #[test]
    fn test_activity_multiplier_buckets() {
        assert_eq!(activity_multiplier(0), ACTIVITY_SEDENTARY);
        assert_eq!(activity_multiplier(2), ACTIVITY_LIGHT);
        assert_eq!(activity_multiplier(4), ACTIVITY_MODERATE);
        assert_eq!(activity_multiplier(6), ACTIVITY_ACTIVE);
        assert_eq!(activity_multiplier(7), ACTIVITY_VERY_ACTIVE);
    }

    #[test]
    fn test_unknown_goal_falls_back_to_maintenance() {
        assert_eq!(goal_adjustment("swim_the_channel"), GOAL_MAINTAIN);
        assert_eq!(protein_per_lb("swim_the_channel"), PROTEIN_MIN);
    }

    #[test]
    fn test_macros_add_up_to_calorie_target() {
        let result = calculate_macros(205.0, 72, 28, true, "build_muscle", 5);

        let total = result.protein_g * CALORIES_PER_GRAM_PROTEIN
            + result.carbs_g * CALORIES_PER_GRAM_CARB
            + result.fat_g * CALORIES_PER_GRAM_FAT;
        assert!((total - result.calories as f64).abs() < 10.0);
    }

    #[test]
    fn test_carbs_never_negative() {
        // Tiny calorie budget relative to bodyweight-driven protein
        let result = calculate_macros(300.0, 60, 80, false, "lose_weight", 0);
        assert!(result.carbs_g >= 0.0);
        assert!(result.fat_g >= 0.0);
    }
}
