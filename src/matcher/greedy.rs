use float_ord::FloatOrd;
use rayon::prelude::*;
use tracing::debug;

use super::{
    cost::{CostModel, TCost},
    error::MatchError,
    pairing::Pairing,
    Matcher, MIN_PARALLEL_CHUNK,
};

/// Repeatedly commits the cheapest correspondence whose elements are still free.
///
/// Candidates are every pair `(a, b)` priced by the diff cost, and every single element priced by
/// its gap cost. Equal costs are resolved in canonical `Pairing` order. This is a heuristic; see
/// `MinCostFlowMatcher` for the optimal assignment.
pub struct GreedyMatcher<C> {
    costs: C,
}

impl<C> GreedyMatcher<C> {
    pub fn new(costs: C) -> Self {
        GreedyMatcher { costs }
    }
}

type Candidate = (FloatOrd<TCost>, Pairing);

fn candidates<T: Sync, C: CostModel<T>>(
    costs: &C,
    list_a: &[T],
    list_b: &[T],
) -> Result<Vec<Candidate>, MatchError> {
    let size_b = list_b.len();
    let pairs = (0..list_a.len() * size_b)
        .into_par_iter()
        .with_min_len(MIN_PARALLEL_CHUNK)
        .map(|index| -> Result<Candidate, MatchError> {
            let (a, b) = (index / size_b, index % size_b);
            let cost = costs.checked_diff_cost(&list_a[a], &list_b[b])?;
            Ok((FloatOrd(cost), Pairing::Both(a, b)))
        });
    let gaps_a = list_a
        .par_iter()
        .enumerate()
        .map(|(a, item)| -> Result<Candidate, MatchError> {
            Ok((FloatOrd(costs.checked_gap_cost_a(item)?), Pairing::OnlyA(a)))
        });
    let gaps_b = list_b
        .par_iter()
        .enumerate()
        .map(|(b, item)| -> Result<Candidate, MatchError> {
            Ok((FloatOrd(costs.checked_gap_cost_b(item)?), Pairing::OnlyB(b)))
        });
    pairs.chain(gaps_a).chain(gaps_b).collect()
}

impl<T: Sync, C: CostModel<T>> Matcher<T> for GreedyMatcher<C> {
    fn match_nonempty(&self, list_a: &[T], list_b: &[T]) -> Result<Vec<Pairing>, MatchError> {
        let sizes = [list_a.len(), list_b.len()];
        let mut candidates = candidates(&self.costs, list_a, list_b)?;
        // Keys are unique, so an unstable sort is still deterministic.
        candidates.par_sort_unstable();

        let mut used = sizes.map(|size| vec![false; size]);
        let mut remaining = sizes[0] + sizes[1];
        let mut result = vec![];
        for (_, pairing) in candidates {
            let sides = pairing.sides();
            let free = (0..2).all(|side| sides[side].map_or(true, |index| !used[side][index]));
            if !free {
                continue;
            }
            for side in 0..2 {
                if let Some(index) = sides[side] {
                    used[side][index] = true;
                    remaining -= 1;
                }
            }
            result.push(pairing);
            if remaining == 0 {
                break;
            }
        }
        result.sort_unstable();

        debug!(
            size_a = sizes[0],
            size_b = sizes[1],
            pairs = result.iter().filter(|pairing| pairing.is_paired()).count(),
            "greedy matching done"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::matcher::{CostFns, MinCostFlowMatcher};

    fn numeric_costs() -> impl CostModel<i32> {
        CostFns::symmetric(|_: &i32| 2.0, |a: &i32, b: &i32| (a - b).abs() as TCost)
    }

    #[test]
    fn commits_cheapest_first() {
        let actual = GreedyMatcher::new(numeric_costs()).match_lists(&[10, 20], &[21, 11]).unwrap();
        assert_eq!(actual, vec![Pairing::Both(0, 1), Pairing::Both(1, 0)]);
    }

    #[test]
    fn gap_cheaper_than_pair() {
        let actual = GreedyMatcher::new(numeric_costs()).match_lists(&[0, 50], &[3]).unwrap();
        assert_eq!(actual, vec![Pairing::OnlyA(0), Pairing::OnlyA(1), Pairing::OnlyB(0)]);
    }

    #[test]
    fn ties_resolve_by_index() {
        let costs = CostFns::symmetric(|_: &char| 5.0, |_: &char, _: &char| 1.0);
        let actual = GreedyMatcher::new(costs).match_lists(&['a', 'b'], &['c', 'd', 'e']).unwrap();
        assert_eq!(actual, vec![Pairing::Both(0, 0), Pairing::Both(1, 1), Pairing::OnlyB(2)]);
    }

    #[test]
    fn worse_than_optimum() {
        // Greedy takes (1, 0) at cost 0, after which 0 and 4 are cheaper left unmatched.
        let a = [0, 1];
        let b = [1, 4];
        let costs = CostFns::symmetric(|_: &i32| 10.0, |a: &i32, b: &i32| ((a - b) * (a - b)) as TCost);
        let greedy = GreedyMatcher::new(costs).match_lists(&a, &b).unwrap();
        let optimal = MinCostFlowMatcher::new(costs).match_lists(&a, &b).unwrap();
        assert_eq!(greedy, vec![Pairing::Both(1, 0), Pairing::OnlyA(0), Pairing::OnlyB(1)]);
        assert_eq!(costs.total_cost(&a, &b, &greedy), 20.0);
        assert_eq!(optimal, vec![Pairing::Both(0, 0), Pairing::Both(1, 1)]);
        assert_eq!(costs.total_cost(&a, &b, &optimal), 10.0);
    }

    #[test]
    fn invalid_cost_is_reported() {
        let costs = CostFns::symmetric(|_: &i32| 1.0, |_: &i32, _: &i32| -1.0);
        let actual = GreedyMatcher::new(costs).match_lists(&[1], &[2]);
        assert_eq!(actual, Err(MatchError::InvalidCost { cost: -1.0 }));
    }
}
