//! Derived financial metrics, ratings, and the recommended allocation split.

use super::intake::IntakeRecord;

const EQUITY_SPLIT: f64 = 0.60;
const DEBT_SPLIT: f64 = 0.30;
const GOLD_SPLIT: f64 = 0.10;

/// Months of expenses the emergency-fund target covers.
const EMERGENCY_FUND_MONTHS: f64 = 6.0;

/// Numbers derived from a raw intake record. All figures are monthly unless
/// named otherwise; `savings_rate` is a percentage, not a fraction.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMetrics {
    pub income: f64,
    pub savings: f64,
    pub assets: f64,
    pub liabilities: f64,
    pub savings_rate: f64,
    pub net_worth: f64,
    pub monthly_expenses: f64,
}

/// Lenient numeric interpretation shared by every intake field: parse as a
/// float, treat anything unparsable or non-finite as 0.
pub fn parse_or_zero(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

impl DerivedMetrics {
    pub fn compute(record: &IntakeRecord) -> Self {
        let income = parse_or_zero(&record.monthly_income);
        let savings = parse_or_zero(&record.monthly_savings);
        let assets = parse_or_zero(&record.total_assets);
        let liabilities = parse_or_zero(&record.total_liabilities);

        let savings_rate = if income > 0.0 {
            savings / income * 100.0
        } else {
            0.0
        };

        DerivedMetrics {
            income,
            savings,
            assets,
            liabilities,
            savings_rate,
            net_worth: assets - liabilities,
            monthly_expenses: income - savings,
        }
    }

    pub fn emergency_fund_target(&self) -> f64 {
        self.monthly_expenses * EMERGENCY_FUND_MONTHS
    }
}

/// Savings-rate rating shown on the financial-health panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavingsBadge {
    Excellent,
    Good,
    NeedsWork,
}

impl SavingsBadge {
    pub fn from_rate(rate: f64) -> Self {
        if rate >= 30.0 {
            SavingsBadge::Excellent
        } else if rate >= 20.0 {
            SavingsBadge::Good
        } else {
            SavingsBadge::NeedsWork
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SavingsBadge::Excellent => "Excellent",
            SavingsBadge::Good => "Good",
            SavingsBadge::NeedsWork => "Needs Work",
        }
    }
}

/// Metric-card one-liner for the savings rate. Deliberately a different
/// threshold than [`SavingsBadge`]: the card cheers at 20%, the health badge
/// holds out for 30%.
pub fn savings_comment(rate: f64) -> &'static str {
    if rate >= 20.0 { "Excellent!" } else { "Can improve" }
}

/// Progress-bar value for the savings-rate health row. A 40% rate fills the
/// bar; the value is capped at 100 but not floored, negative rates stay
/// negative for the renderer to clamp.
pub fn savings_progress(rate: f64) -> f64 {
    (rate * 2.5).min(100.0)
}

/// Fixed progress shown for the emergency-fund health row. The intake never
/// asks for a current emergency balance, so the panel shows a constant
/// "building" state against the six-month target.
pub const EMERGENCY_FUND_PROGRESS: f64 = 45.0;

/// Debt rating shown on the financial-health panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebtBadge {
    DebtFree,
    InProgress,
}

impl DebtBadge {
    pub fn from_liabilities(liabilities: f64) -> Self {
        if liabilities == 0.0 {
            DebtBadge::DebtFree
        } else {
            DebtBadge::InProgress
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DebtBadge::DebtFree => "Debt Free",
            DebtBadge::InProgress => "In Progress",
        }
    }

    pub fn progress(&self) -> f64 {
        match self {
            DebtBadge::DebtFree => 100.0,
            DebtBadge::InProgress => 60.0,
        }
    }
}

/// Recommended split of the monthly savings across asset classes.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationPlan {
    pub equity: f64,
    pub debt: f64,
    pub gold: f64,
}

impl AllocationPlan {
    /// 60/30/10 equity/debt/gold split of the monthly savings amount.
    pub fn from_savings(savings: f64) -> Self {
        AllocationPlan {
            equity: savings * EQUITY_SPLIT,
            debt: savings * DEBT_SPLIT,
            gold: savings * GOLD_SPLIT,
        }
    }
}

/// One row of the goals panel.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalSummary {
    pub name: &'static str,
    pub target: f64,
    pub note: String,
}

/// Goal rows for every target the user actually entered. Presence is decided
/// on the raw text, so a non-numeric entry still produces a row with a zero
/// target.
pub fn goal_summaries(record: &IntakeRecord) -> Vec<GoalSummary> {
    let mut goals = Vec::new();

    if !record.retirement_corpus.trim().is_empty() {
        let age = record.retirement_age.trim();
        let age = if age.is_empty() { "60" } else { age };
        goals.push(GoalSummary {
            name: "Retirement Fund",
            target: parse_or_zero(&record.retirement_corpus),
            note: format!("Target by age {age}"),
        });
    }

    if !record.education_fund.trim().is_empty() {
        goals.push(GoalSummary {
            name: "Education Fund",
            target: parse_or_zero(&record.education_fund),
            note: "For future education needs".to_string(),
        });
    }

    if !record.home_purchase.trim().is_empty() {
        goals.push(GoalSummary {
            name: "Home Purchase",
            target: parse_or_zero(&record.home_purchase),
            note: "Dream home target amount".to_string(),
        });
    }

    goals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(income: &str, savings: &str, assets: &str, liabilities: &str) -> IntakeRecord {
        IntakeRecord {
            monthly_income: income.to_string(),
            monthly_savings: savings.to_string(),
            total_assets: assets.to_string(),
            total_liabilities: liabilities.to_string(),
            ..IntakeRecord::default()
        }
    }

    #[test]
    fn parse_or_zero_reads_plain_numbers() {
        assert!((parse_or_zero("50000") - 50_000.0).abs() < f64::EPSILON);
        assert!((parse_or_zero(" 42.5 ") - 42.5).abs() < f64::EPSILON);
        assert!((parse_or_zero("-1200") - (-1200.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_or_zero_maps_junk_to_zero() {
        assert!((parse_or_zero("") - 0.0).abs() < f64::EPSILON);
        assert!((parse_or_zero("abc") - 0.0).abs() < f64::EPSILON);
        assert!((parse_or_zero("12,000") - 0.0).abs() < f64::EPSILON);
        assert!((parse_or_zero("NaN") - 0.0).abs() < f64::EPSILON);
        assert!((parse_or_zero("1e999") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn compute_typical_household() {
        let record = make_record("50000", "15000", "1000000", "500000");
        let metrics = DerivedMetrics::compute(&record);

        assert!((metrics.savings_rate - 30.0).abs() < 1e-9);
        assert!((metrics.net_worth - 500_000.0).abs() < f64::EPSILON);
        assert!((metrics.monthly_expenses - 35_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn compute_zero_income_has_zero_rate() {
        let record = make_record("0", "5000", "", "");
        let metrics = DerivedMetrics::compute(&record);

        assert!((metrics.savings_rate - 0.0).abs() < f64::EPSILON);
        assert!((metrics.monthly_expenses - (-5000.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn compute_negative_income_has_zero_rate() {
        let record = make_record("-100", "50", "", "");
        let metrics = DerivedMetrics::compute(&record);

        assert!((metrics.savings_rate - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn compute_unparsable_fields_count_as_zero() {
        let record = make_record("fifty", "15000", "abc", "");
        let metrics = DerivedMetrics::compute(&record);

        assert!((metrics.income - 0.0).abs() < f64::EPSILON);
        assert!((metrics.savings_rate - 0.0).abs() < f64::EPSILON);
        assert!((metrics.net_worth - 0.0).abs() < f64::EPSILON);
        assert!((metrics.monthly_expenses - (-15_000.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn compute_savings_above_income_exceeds_hundred() {
        let record = make_record("1000", "1500", "", "");
        let metrics = DerivedMetrics::compute(&record);

        assert!((metrics.savings_rate - 150.0).abs() < 1e-9);
        assert!((metrics.monthly_expenses - (-500.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn emergency_fund_target_is_six_months() {
        let record = make_record("50000", "15000", "", "");
        let metrics = DerivedMetrics::compute(&record);

        assert!((metrics.emergency_fund_target() - 210_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn savings_badge_thresholds() {
        assert_eq!(SavingsBadge::from_rate(30.0), SavingsBadge::Excellent);
        assert_eq!(SavingsBadge::from_rate(45.0), SavingsBadge::Excellent);
        assert_eq!(SavingsBadge::from_rate(29.9), SavingsBadge::Good);
        assert_eq!(SavingsBadge::from_rate(20.0), SavingsBadge::Good);
        assert_eq!(SavingsBadge::from_rate(19.9), SavingsBadge::NeedsWork);
        assert_eq!(SavingsBadge::from_rate(0.0), SavingsBadge::NeedsWork);
    }

    #[test]
    fn savings_comment_thresholds() {
        assert_eq!(savings_comment(20.0), "Excellent!");
        assert_eq!(savings_comment(19.9), "Can improve");
    }

    #[test]
    fn savings_progress_scales_and_caps() {
        assert!((savings_progress(20.0) - 50.0).abs() < f64::EPSILON);
        assert!((savings_progress(40.0) - 100.0).abs() < f64::EPSILON);
        assert!((savings_progress(80.0) - 100.0).abs() < f64::EPSILON);
        assert!((savings_progress(0.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn debt_badge_zero_liabilities_is_debt_free() {
        let badge = DebtBadge::from_liabilities(0.0);
        assert_eq!(badge, DebtBadge::DebtFree);
        assert_eq!(badge.label(), "Debt Free");
        assert!((badge.progress() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn debt_badge_any_liability_is_in_progress() {
        let badge = DebtBadge::from_liabilities(0.01);
        assert_eq!(badge, DebtBadge::InProgress);
        assert!((badge.progress() - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn allocation_split_is_sixty_thirty_ten() {
        let plan = AllocationPlan::from_savings(15_000.0);

        assert!((plan.equity - 9000.0).abs() < f64::EPSILON);
        assert!((plan.debt - 4500.0).abs() < f64::EPSILON);
        assert!((plan.gold - 1500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn allocation_of_zero_savings_is_all_zero() {
        let plan = AllocationPlan::from_savings(0.0);

        assert!((plan.equity - 0.0).abs() < f64::EPSILON);
        assert!((plan.debt - 0.0).abs() < f64::EPSILON);
        assert!((plan.gold - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn goal_summaries_empty_without_targets() {
        let record = make_record("50000", "15000", "", "");
        assert!(goal_summaries(&record).is_empty());
    }

    #[test]
    fn goal_summaries_include_entered_targets() {
        let mut record = make_record("50000", "15000", "", "");
        record.retirement_corpus = "20000000".to_string();
        record.retirement_age = "55".to_string();
        record.home_purchase = "7500000".to_string();

        let goals = goal_summaries(&record);
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[0].name, "Retirement Fund");
        assert!((goals[0].target - 20_000_000.0).abs() < f64::EPSILON);
        assert_eq!(goals[0].note, "Target by age 55");
        assert_eq!(goals[1].name, "Home Purchase");
    }

    #[test]
    fn goal_summaries_default_retirement_age() {
        let mut record = make_record("50000", "15000", "", "");
        record.retirement_corpus = "20000000".to_string();

        let goals = goal_summaries(&record);
        assert_eq!(goals[0].note, "Target by age 60");
    }

    #[test]
    fn goal_summaries_keep_non_numeric_targets_at_zero() {
        let mut record = make_record("50000", "15000", "", "");
        record.education_fund = "lots".to_string();

        let goals = goal_summaries(&record);
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].name, "Education Fund");
        assert!((goals[0].target - 0.0).abs() < f64::EPSILON);
    }
}
