use super::{error::MatchError, pairing::Pairing};

pub type TCost = f64;

/// Prices the ways an element can end up in a matching.
///
/// Implementations must be pure: the parallel matchers call them from several threads and in no
/// particular order.
pub trait CostModel<T>: Sync {
    fn gap_cost_a(&self, item: &T) -> TCost;
    fn gap_cost_b(&self, item: &T) -> TCost;
    fn diff_cost(&self, item_a: &T, item_b: &T) -> TCost;

    fn checked_gap_cost_a(&self, item: &T) -> Result<TCost, MatchError> {
        check_cost(self.gap_cost_a(item))
    }

    fn checked_gap_cost_b(&self, item: &T) -> Result<TCost, MatchError> {
        check_cost(self.gap_cost_b(item))
    }

    fn checked_diff_cost(&self, item_a: &T, item_b: &T) -> Result<TCost, MatchError> {
        check_cost(self.diff_cost(item_a, item_b))
    }

    fn pairing_cost(&self, list_a: &[T], list_b: &[T], pairing: Pairing) -> TCost {
        match pairing {
            Pairing::Both(a, b) => self.diff_cost(&list_a[a], &list_b[b]),
            Pairing::OnlyA(a) => self.gap_cost_a(&list_a[a]),
            Pairing::OnlyB(b) => self.gap_cost_b(&list_b[b]),
            Pairing::Empty => 0.0,
        }
    }

    fn total_cost(&self, list_a: &[T], list_b: &[T], pairings: &[Pairing]) -> TCost {
        pairings
            .iter()
            .map(|&pairing| self.pairing_cost(list_a, list_b, pairing))
            .sum()
    }
}

pub fn check_cost(cost: TCost) -> Result<TCost, MatchError> {
    if cost.is_finite() && cost >= 0.0 {
        Ok(cost)
    } else {
        Err(MatchError::InvalidCost { cost })
    }
}

/// A `CostModel` made of plain closures.
#[derive(Clone, Copy)]
pub struct CostFns<GA, GB, D> {
    gap_a: GA,
    gap_b: GB,
    diff: D,
}

impl<GA, GB, D> CostFns<GA, GB, D> {
    pub fn new(gap_a: GA, gap_b: GB, diff: D) -> Self {
        CostFns { gap_a, gap_b, diff }
    }
}

impl<G: Clone, D> CostFns<G, G, D> {
    pub fn symmetric(gap: G, diff: D) -> Self {
        CostFns {
            gap_a: gap.clone(),
            gap_b: gap,
            diff,
        }
    }
}

impl<T, GA, GB, D> CostModel<T> for CostFns<GA, GB, D>
where
    GA: Fn(&T) -> TCost + Sync,
    GB: Fn(&T) -> TCost + Sync,
    D: Fn(&T, &T) -> TCost + Sync,
{
    fn gap_cost_a(&self, item: &T) -> TCost {
        (self.gap_a)(item)
    }

    fn gap_cost_b(&self, item: &T) -> TCost {
        (self.gap_b)(item)
    }

    fn diff_cost(&self, item_a: &T, item_b: &T) -> TCost {
        (self.diff)(item_a, item_b)
    }
}
