use crate::models::{AggregateDrain, Demographics, DrainEstimate, FeeModel, Town};

const DAYS_PER_WEEK: f64 = 7.0;
const DAYS_PER_MONTH: f64 = 30.0;
const DAYS_PER_YEAR: f64 = 365.0;

/// Fee-drain estimator
///
/// Estimation formula:
/// ```text
/// daily_spend  = income * local_spending_ratio / household_size / 365
///                (fallback_daily_spend when income is unknown)
/// card_volume  = population * daily_spend * card_share
/// transactions = round(card_volume / average_transaction_size)
/// fees_daily   = card_volume * fee_percent + transactions * fee_fixed
/// ```
/// Weekly, monthly and yearly figures are `fees_daily` times 7, 30 and 365.
#[derive(Debug, Clone, Copy, Default)]
pub struct Estimator {
    model: FeeModel,
}

impl Estimator {
    pub fn new(model: FeeModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &FeeModel {
        &self.model
    }

    /// Average local spending per resident per day
    #[inline]
    pub fn daily_spend_per_person(&self, median_household_income: Option<u64>) -> f64 {
        match median_household_income {
            Some(income) if income > 0 => {
                income as f64 * self.model.local_spending_ratio
                    / self.model.average_household_size
                    / DAYS_PER_YEAR
            }
            _ => self.model.fallback_daily_spend,
        }
    }

    /// Project the processing fees paid by a community
    pub fn estimate<D: Demographics + ?Sized>(&self, subject: &D) -> DrainEstimate {
        let population = subject.population();
        let daily_spend_per_person = self.daily_spend_per_person(subject.median_household_income());

        let total_card_volume = population as f64 * daily_spend_per_person * self.model.card_share;
        // Transaction count stays integral because it drives the fixed fee
        let estimated_daily_transactions =
            (total_card_volume / self.model.average_transaction_size).round() as u64;

        let fees_daily = total_card_volume * self.model.fee_percent
            + estimated_daily_transactions as f64 * self.model.fee_fixed;
        let fees_yearly = fees_daily * DAYS_PER_YEAR;

        let yearly_fees_per_person = if population > 0 {
            fees_yearly / population as f64
        } else {
            0.0
        };

        DrainEstimate {
            daily_spend_per_person,
            total_card_volume,
            estimated_daily_transactions,
            fees_daily,
            fees_weekly: fees_daily * DAYS_PER_WEEK,
            fees_monthly: fees_daily * DAYS_PER_MONTH,
            fees_yearly,
            yearly_fees_per_person,
        }
    }

    /// Combined projection for several towns
    ///
    /// Daily fees are summed first and the sum is scaled to longer periods.
    pub fn aggregate(&self, towns: &[Town]) -> AggregateDrain {
        let fees_daily: f64 = towns.iter().map(|town| self.estimate(town).fees_daily).sum();
        let total_population = towns
            .iter()
            .map(|town| town.population)
            .fold(0u64, u64::saturating_add);

        AggregateDrain {
            town_count: towns.len(),
            total_population,
            fees_daily,
            fees_weekly: fees_daily * DAYS_PER_WEEK,
            fees_monthly: fees_daily * DAYS_PER_MONTH,
            fees_yearly: fees_daily * DAYS_PER_YEAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StateCode, TownCandidate};

    fn candidate(population: u64, income: Option<u64>) -> TownCandidate {
        TownCandidate {
            name: "Test".to_string(),
            state: StateCode::AZ,
            population,
            median_household_income: income,
            is_manual_entry: false,
        }
    }

    #[test]
    fn test_fallback_spend_without_income() {
        let estimator = Estimator::default();

        assert_eq!(estimator.daily_spend_per_person(None), 75.0);
        assert_eq!(estimator.daily_spend_per_person(Some(0)), 75.0);
        assert_eq!(estimator.estimate(&candidate(100, None)).daily_spend_per_person, 75.0);
    }

    #[test]
    fn test_spend_from_income() {
        let estimator = Estimator::default();
        let expected = 75520.0 * 0.65 / 2.53 / 365.0;

        assert_eq!(estimator.daily_spend_per_person(Some(75520)), expected);
    }

    #[test]
    fn test_sedona_estimate() {
        let estimator = Estimator::default();
        let estimate = estimator.estimate(&candidate(9684, Some(75520)));

        assert!((estimate.daily_spend_per_person - 53.157).abs() < 0.01);
        assert!((estimate.total_card_volume - 370_637.39).abs() < 0.5);
        assert_eq!(estimate.estimated_daily_transactions, 8825);
        assert!((estimate.fees_daily - 10_633.78).abs() < 0.01);
        assert!((estimate.fees_yearly - 3_881_329.06).abs() < 1.0);
        assert!((estimate.yearly_fees_per_person - 400.80).abs() < 0.01);
    }

    #[test]
    fn test_period_multipliers() {
        let estimator = Estimator::default();
        let estimate = estimator.estimate(&candidate(12_345, Some(61_000)));

        assert_eq!(estimate.fees_weekly, estimate.fees_daily * 7.0);
        assert_eq!(estimate.fees_monthly, estimate.fees_daily * 30.0);
        assert_eq!(estimate.fees_yearly, estimate.fees_daily * 365.0);
    }

    #[test]
    fn test_zero_population() {
        let estimate = Estimator::default().estimate(&candidate(0, Some(50_000)));

        assert_eq!(estimate.fees_daily, 0.0);
        assert_eq!(estimate.estimated_daily_transactions, 0);
        assert_eq!(estimate.yearly_fees_per_person, 0.0);
    }

    #[test]
    fn test_aggregate_sums_daily_fees() {
        let estimator = Estimator::default();
        let towns = vec![
            Town::from_candidate(candidate(9684, Some(75520))),
            Town::from_candidate(candidate(1000, None)),
        ];

        let aggregate = estimator.aggregate(&towns);
        let expected: f64 = towns.iter().map(|t| estimator.estimate(t).fees_daily).sum();

        assert_eq!(aggregate.town_count, 2);
        assert_eq!(aggregate.total_population, 10_684);
        assert_eq!(aggregate.fees_daily, expected);
        assert_eq!(aggregate.fees_yearly, expected * 365.0);
    }

    #[test]
    fn test_aggregate_population_saturates() {
        let towns = vec![
            Town::from_candidate(candidate(u64::MAX, None)),
            Town::from_candidate(candidate(2, None)),
        ];

        assert_eq!(Estimator::default().aggregate(&towns).total_population, u64::MAX);
    }

    #[test]
    fn test_substitute_model() {
        let model = FeeModel {
            fee_percent: 0.0,
            fee_fixed: 1.0,
            average_transaction_size: 10.0,
            card_share: 1.0,
            fallback_daily_spend: 10.0,
            ..FeeModel::default()
        };
        let estimate = Estimator::new(model).estimate(&candidate(50, None));

        // 50 people * $10 = $500 volume = 50 transactions at $1 each
        assert_eq!(estimate.total_card_volume, 500.0);
        assert_eq!(estimate.estimated_daily_transactions, 50);
        assert_eq!(estimate.fees_daily, 50.0);
    }
}
