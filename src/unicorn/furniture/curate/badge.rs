use crate::unicorn::furniture::model::Badge;

/// Picks the merchandising badge. Rules are checked in order and the first
/// match wins; the fall-through is [`Badge::New`].
pub fn assign(cost_usd: f64, score: u8, orders: u64) -> Badge {
    if cost_usd > 500.0 && score >= 75 {
        Badge::Premium
    } else if cost_usd > 800.0 {
        Badge::Exclusive
    } else if orders > 100 {
        Badge::BestSeller
    } else {
        Badge::New
    }
}

/// Whether a product earns the featured strip before the minimum-count
/// backfill runs.
pub fn is_featured(score: u8, badge: Badge) -> bool {
    score >= 65 || badge.is_headline()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premium_needs_cost_and_score() {
        assert_eq!(assign(600.0, 80, 0), Badge::Premium);
        assert_eq!(assign(600.0, 70, 0), Badge::New);
    }

    #[test]
    fn exclusive_on_high_cost_alone() {
        assert_eq!(assign(900.0, 50, 500), Badge::Exclusive);
    }

    #[test]
    fn demand_gives_best_seller() {
        assert_eq!(assign(180.0, 85, 250), Badge::BestSeller);
        assert_eq!(assign(180.0, 85, 100), Badge::New);
    }

    #[test]
    fn featured_by_score_or_headline_badge() {
        assert!(is_featured(65, Badge::New));
        assert!(is_featured(40, Badge::BestSeller));
        assert!(!is_featured(64, Badge::New));
    }
}
