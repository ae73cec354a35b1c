//! 成绩换算：百分比、字母等级、GPA

use crate::utils::round_to;

/// 及格线
pub const PASSING_PERCENTAGE: f64 = 60.0;

// (下限, 等级)，从高到低
const LETTER_GRADE_CUTOFFS: [(f64, &str); 12] = [
    (97.0, "A+"),
    (93.0, "A"),
    (90.0, "A-"),
    (87.0, "B+"),
    (83.0, "B"),
    (80.0, "B-"),
    (77.0, "C+"),
    (73.0, "C"),
    (70.0, "C-"),
    (67.0, "D+"),
    (63.0, "D"),
    (60.0, "D-"),
];

/// 分数按两位小数定点表示
fn to_hundredths(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

/// 总分大于 0 时返回保留两位小数的百分比
///
/// 在定点整数上计算，两位小数处恰好一半时取偶
pub fn compute_percentage(marks_obtained: f64, total_marks: f64) -> Option<f64> {
    let total = i128::from(to_hundredths(total_marks));
    if total <= 0 {
        return None;
    }
    // 百分比 * 100 = marks / total * 10000
    let numerator = i128::from(to_hundredths(marks_obtained)) * 10_000;
    let quotient = numerator.div_euclid(total);
    let twice_remainder = numerator.rem_euclid(total) * 2;
    let rounded = if twice_remainder > total || (twice_remainder == total && quotient % 2 != 0) {
        quotient + 1
    } else {
        quotient
    };
    Some(rounded as f64 / 100.0)
}

pub fn letter_grade(percentage: f64) -> &'static str {
    LETTER_GRADE_CUTOFFS
        .iter()
        .find(|(cutoff, _)| percentage >= *cutoff)
        .map(|(_, grade)| *grade)
        .unwrap_or("F")
}

pub fn is_passing(percentage: Option<f64>) -> bool {
    percentage.is_some_and(|p| p >= PASSING_PERCENTAGE)
}

/// 展示用的成绩档位
pub fn performance_band(percentage: Option<f64>) -> &'static str {
    match percentage {
        None => "ungraded",
        Some(p) if p >= 90.0 => "excellent",
        Some(p) if p >= 80.0 => "good",
        Some(p) if p >= 70.0 => "fair",
        Some(p) if p >= PASSING_PERCENTAGE => "pass",
        Some(_) => "fail",
    }
}

/// 校验分数，返回错误信息
pub fn validate_marks(marks_obtained: f64, total_marks: f64) -> Result<(), &'static str> {
    if !marks_obtained.is_finite() || !total_marks.is_finite() {
        return Err("Marks must be finite numbers");
    }
    if marks_obtained < 0.0 {
        return Err("Marks obtained cannot be negative");
    }
    if total_marks <= 0.0 {
        return Err("Total marks must be greater than 0");
    }
    if marks_obtained > total_marks {
        return Err("Marks obtained cannot exceed total marks");
    }
    Ok(())
}

/// 平均百分比，忽略未计算百分比的记录
pub fn average_percentage<I>(percentages: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = percentages
        .into_iter()
        .flatten()
        .fold((0.0, 0u64), |(sum, count), p| (sum + p, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// 4.0 制 GPA = 平均百分比 / 25，保留两位小数
pub fn gpa_from_percentages<I>(percentages: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    match average_percentage(percentages) {
        Some(avg) if avg > 0.0 => round_to(avg / 25.0, 2),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(compute_percentage(45.0, 50.0), Some(90.0));
        assert_eq!(compute_percentage(2.0, 3.0), Some(66.67));
        assert_eq!(compute_percentage(10.0, 0.0), None);
    }

    #[test]
    fn test_percentage_ties_round_to_even() {
        // 1/800 = 0.125%，3/800 = 0.375%
        assert_eq!(compute_percentage(1.0, 800.0), Some(0.12));
        assert_eq!(compute_percentage(3.0, 800.0), Some(0.38));
        assert_eq!(compute_percentage(86.25, 100.0), Some(86.25));
        assert_eq!(compute_percentage(0.01, 0.001), None);
    }

    #[test]
    fn test_letter_grade_boundaries() {
        let cases = [
            (100.0, "A+"),
            (97.0, "A+"),
            (96.99, "A"),
            (93.0, "A"),
            (90.0, "A-"),
            (89.99, "B+"),
            (87.0, "B+"),
            (83.0, "B"),
            (80.0, "B-"),
            (77.0, "C+"),
            (73.0, "C"),
            (70.0, "C-"),
            (67.0, "D+"),
            (63.0, "D"),
            (60.0, "D-"),
            (59.99, "F"),
            (0.0, "F"),
        ];
        for (percentage, expected) in cases {
            assert_eq!(letter_grade(percentage), expected, "percentage {percentage}");
        }
    }

    #[test]
    fn test_passing_and_bands() {
        assert!(is_passing(Some(60.0)));
        assert!(!is_passing(Some(59.9)));
        assert!(!is_passing(None));
        assert_eq!(performance_band(Some(91.0)), "excellent");
        assert_eq!(performance_band(Some(80.0)), "good");
        assert_eq!(performance_band(Some(75.5)), "fair");
        assert_eq!(performance_band(Some(60.0)), "pass");
        assert_eq!(performance_band(Some(12.0)), "fail");
        assert_eq!(performance_band(None), "ungraded");
    }

    #[test]
    fn test_validate_marks() {
        assert!(validate_marks(0.0, 10.0).is_ok());
        assert!(validate_marks(10.0, 10.0).is_ok());
        assert_eq!(
            validate_marks(-1.0, 10.0),
            Err("Marks obtained cannot be negative")
        );
        assert_eq!(
            validate_marks(5.0, 0.0),
            Err("Total marks must be greater than 0")
        );
        assert_eq!(
            validate_marks(11.0, 10.0),
            Err("Marks obtained cannot exceed total marks")
        );
    }

    #[test]
    fn test_gpa() {
        assert_eq!(gpa_from_percentages([Some(90.0), Some(80.0)]), 3.4);
        assert_eq!(gpa_from_percentages([Some(100.0), None]), 4.0);
        assert_eq!(gpa_from_percentages(Vec::<Option<f64>>::new()), 0.0);
        assert_eq!(gpa_from_percentages([Some(77.77)]), 3.11);
    }
}
