//! 宏量计算测试
//!
//! 对 Mifflin-St Jeor 计算管线的端到端断言

use fitai_service::services::macros::calculate_macros;

#[test]
fn test_macro_calculation_lean_bulk_205lb() {
    // 205 lb 男性增肌：蛋白按 1.2 g/lb 落在增肌区间
    let result = calculate_macros(205.0, 72, 28, true, "build_muscle", 5);

    // 增肌蛋白区间 1.2-1.6 g/lb
    assert!(
        (205.0..=330.0).contains(&result.protein_g),
        "Protein {}g not in expected range for muscle building (205-330g)",
        result.protein_g
    );

    // 增肌热量应是盈余
    assert!(result.calories > 2500, "Calories should be substantial for 205lb male");

    assert!(result.protein_g > 0.0);
    assert!(result.carbs_g > 0.0);
    assert!(result.fat_g > 0.0);

    // 脂肪占热量 20-30%
    let fat_calories = result.fat_g * 9.0;
    let fat_percent = fat_calories / result.calories as f64 * 100.0;
    assert!(
        (20.0..=30.0).contains(&fat_percent),
        "Fat {:.1}% not in range 20-30%",
        fat_percent
    );

    // 脂肪不低于 0.3 g/lb
    let fat_min = 205.0 * 0.3;
    assert!(result.fat_g >= fat_min, "Fat {}g below minimum {}g", result.fat_g, fat_min);

    // 三大营养素折算热量与目标一致
    let total = result.protein_g * 4.0 + result.carbs_g * 4.0 + result.fat_g * 9.0;
    assert!(
        (total - result.calories as f64).abs() < 10.0,
        "Total calculated calories don't match"
    );
}

#[test]
fn test_macro_calculation_weight_loss() {
    // 减脂：热量缺口 + 充足蛋白
    let result = calculate_macros(180.0, 70, 35, true, "lose_weight", 4);

    // 减脂蛋白约 1.0 g/lb
    assert!(
        (175.0..=185.0).contains(&result.protein_g),
        "Protein {}g not around 180g",
        result.protein_g
    );

    assert!(result.calories > 1500, "Calories too low");
    assert!(result.calories < 3000, "Calories too high for weight loss");

    assert!(result.protein_g > 0.0);
    assert!(result.carbs_g >= 0.0); // 减脂时碳水可以很低
    assert!(result.fat_g > 0.0);

    let fat_min = 180.0 * 0.3;
    assert!(result.fat_g >= fat_min, "Fat below minimum");
}

#[test]
fn test_macro_calculation_maintenance_female() {
    // 女性维持
    let result = calculate_macros(140.0, 65, 30, false, "maintain", 3);

    // 维持蛋白约 0.8 g/lb（112 g）
    assert!(
        (100.0..=120.0).contains(&result.protein_g),
        "Protein {}g not around 112g",
        result.protein_g
    );

    assert!(result.calories > 1500, "Calories too low");
    assert!(result.calories < 2500, "Calories too high for maintenance");

    assert!(result.protein_g > 0.0);
    assert!(result.carbs_g > 0.0);
    assert!(result.fat_g > 0.0);

    // 脂肪不低于 0.3 g/lb（42 g）
    let fat_min = 140.0 * 0.3;
    assert!(result.fat_g >= fat_min, "Fat below minimum");

    let total = result.protein_g * 4.0 + result.carbs_g * 4.0 + result.fat_g * 9.0;
    assert!(
        (total - result.calories as f64).abs() < 10.0,
        "Total calculated calories don't match"
    );
}
