use rayon::prelude::*;
use tracing::debug;

use super::{
    cost::{CostModel, TCost},
    error::MatchError,
    pairing::Pairing,
    Matcher, MIN_PARALLEL_CHUNK,
};

/// Aligns two sequences along a single monotonic path of minimum cost (Levenshtein-style).
///
/// Results are returned in alignment order rather than canonical order.
pub struct EditDistanceMatcher<C> {
    costs: C,
}

impl<C> EditDistanceMatcher<C> {
    pub fn new(costs: C) -> Self {
        EditDistanceMatcher { costs }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditStep {
    GapA,
    GapB,
    Pair,
}

impl EditStep {
    fn movement(&self) -> [usize; 2] {
        match self {
            EditStep::GapA => [1, 0],
            EditStep::GapB => [0, 1],
            EditStep::Pair => [1, 1],
        }
    }
}

/// Cells of the edit graph are addressed by how many elements of each side are still to be
/// aligned, so cell `[p, q]` holds the cheapest way to align the last `p` elements of A with the
/// last `q` elements of B. An anti-diagonal is the set of cells with `p + q` fixed; each one only
/// depends on the two before it.
struct Diagonal {
    first: usize,
    costs: Vec<TCost>,
}

impl Diagonal {
    fn cost(&self, remaining_a: usize) -> TCost {
        self.costs[remaining_a - self.first]
    }
}

struct EditGraph<'a, T, C> {
    costs: &'a C,
    list_a: &'a [T],
    list_b: &'a [T],
    gap_costs: [Vec<TCost>; 2],
    size: [usize; 2],
}

impl<'a, T: Sync, C: CostModel<T>> EditGraph<'a, T, C> {
    fn new(costs: &'a C, list_a: &'a [T], list_b: &'a [T]) -> Result<Self, MatchError> {
        let gap_costs_a = list_a
            .par_iter()
            .map(|item| costs.checked_gap_cost_a(item))
            .collect::<Result<Vec<TCost>, MatchError>>()?;
        let gap_costs_b = list_b
            .par_iter()
            .map(|item| costs.checked_gap_cost_b(item))
            .collect::<Result<Vec<TCost>, MatchError>>()?;
        Ok(EditGraph {
            costs,
            list_a,
            list_b,
            gap_costs: [gap_costs_a, gap_costs_b],
            size: [list_a.len(), list_b.len()],
        })
    }

    fn diagonal_range(&self, diagonal: usize) -> (usize, usize) {
        (diagonal.saturating_sub(self.size[1]), usize::min(diagonal, self.size[0]))
    }

    /// Ties prefer leaving A's element unmatched, then B's; pairing only wins when strictly cheaper.
    fn compute_cell(
        &self,
        remaining: [usize; 2],
        previous: &Diagonal,
        before_previous: &Diagonal,
    ) -> Result<(TCost, EditStep), MatchError> {
        let [p, q] = remaining;
        let index = [self.size[0] - p, self.size[1] - q];
        let mut best: Option<(TCost, EditStep)> = None;
        if p > 0 {
            best = Some((previous.cost(p - 1) + self.gap_costs[0][index[0]], EditStep::GapA));
        }
        if q > 0 {
            let cost = previous.cost(p) + self.gap_costs[1][index[1]];
            if best.map_or(true, |(best_cost, _)| cost < best_cost) {
                best = Some((cost, EditStep::GapB));
            }
        }
        if p > 0 && q > 0 {
            let diff = self.costs.checked_diff_cost(&self.list_a[index[0]], &self.list_b[index[1]])?;
            let cost = before_previous.cost(p - 1) + diff;
            if best.map_or(true, |(best_cost, _)| cost < best_cost) {
                best = Some((cost, EditStep::Pair));
            }
        }
        Ok(best.unwrap_or((0.0, EditStep::Pair)))
    }

    /// Sweeps the anti-diagonals in order. Cells of one diagonal are computed in parallel and the
    /// sweep waits for all of them before starting the next. Returns the optimal cost and the chosen
    /// step of every cell, by diagonal.
    fn sweep(&self) -> Result<(TCost, Vec<Vec<EditStep>>), MatchError> {
        let mut before_previous = Diagonal {
            first: 0,
            costs: vec![],
        };
        let mut previous = Diagonal {
            first: 0,
            costs: vec![0.0],
        };
        let mut steps = vec![vec![]];

        for diagonal in 1..=self.size[0] + self.size[1] {
            let (first, last) = self.diagonal_range(diagonal);
            let cells = (first..last + 1)
                .into_par_iter()
                .with_min_len(MIN_PARALLEL_CHUNK)
                .map(|p| self.compute_cell([p, diagonal - p], &previous, &before_previous))
                .collect::<Result<Vec<(TCost, EditStep)>, MatchError>>()?;

            steps.push(cells.iter().map(|&(_, step)| step).collect());
            let current = Diagonal {
                first,
                costs: cells.into_iter().map(|(cost, _)| cost).collect(),
            };
            before_previous = std::mem::replace(&mut previous, current);
        }

        Ok((previous.cost(self.size[0]), steps))
    }

    fn trace(&self, steps: &[Vec<EditStep>]) -> Vec<Pairing> {
        let mut result = vec![];
        let mut remaining = self.size;
        while remaining[0] + remaining[1] > 0 {
            let diagonal = remaining[0] + remaining[1];
            let (first, _) = self.diagonal_range(diagonal);
            let step = steps[diagonal][remaining[0] - first];
            let index = [0, 1].map(|side| self.size[side] - remaining[side]);
            result.push(match step {
                EditStep::GapA => Pairing::OnlyA(index[0]),
                EditStep::GapB => Pairing::OnlyB(index[1]),
                EditStep::Pair => Pairing::Both(index[0], index[1]),
            });
            for side in 0..2 {
                remaining[side] -= step.movement()[side];
            }
        }
        result
    }
}

impl<T: Sync, C: CostModel<T>> Matcher<T> for EditDistanceMatcher<C> {
    fn match_nonempty(&self, list_a: &[T], list_b: &[T]) -> Result<Vec<Pairing>, MatchError> {
        let graph = EditGraph::new(&self.costs, list_a, list_b)?;
        let (cost, steps) = graph.sweep()?;
        debug!(size_a = list_a.len(), size_b = list_b.len(), cost, "edit distance matching done");
        Ok(graph.trace(&steps))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::matcher::CostFns;

    fn char_costs() -> impl CostModel<char> + Copy {
        CostFns::symmetric(|_: &char| 1.0, |a: &char, b: &char| if a == b { 0.0 } else { 3.0 })
    }

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[test]
    fn kitten_sitting() {
        let a = chars("KITTEN");
        let b = chars("SITTING");
        let actual = EditDistanceMatcher::new(char_costs()).match_lists(&a, &b).unwrap();
        use Pairing::*;
        assert_eq!(
            actual,
            vec![OnlyA(0), OnlyB(0), Both(1, 1), Both(2, 2), Both(3, 3), OnlyA(4), OnlyB(4), Both(5, 5), OnlyB(6)]
        );
        assert_eq!(char_costs().total_cost(&a, &b, &actual), 5.0);
    }

    #[test]
    fn substitution_when_cheaper_than_two_gaps() {
        let costs = CostFns::symmetric(|_: &char| 2.0, |a: &char, b: &char| if a == b { 0.0 } else { 3.0 });
        let actual = EditDistanceMatcher::new(costs).match_lists(&chars("abc"), &chars("axc")).unwrap();
        assert_eq!(actual, vec![Pairing::Both(0, 0), Pairing::Both(1, 1), Pairing::Both(2, 2)]);
    }

    #[test]
    fn tie_prefers_gap_in_a() {
        let costs = CostFns::symmetric(|_: &char| 1.0, |a: &char, b: &char| if a == b { 0.0 } else { 2.0 });
        let actual = EditDistanceMatcher::new(costs).match_lists(&chars("a"), &chars("b")).unwrap();
        assert_eq!(actual, vec![Pairing::OnlyA(0), Pairing::OnlyB(0)]);
    }

    #[test]
    fn asymmetric_gap_costs() {
        let costs = CostFns::new(
            |_: &char| 10.0,
            |_: &char| 1.0,
            |a: &char, b: &char| if a == b { 0.0 } else { 3.0 },
        );
        let actual = EditDistanceMatcher::new(costs).match_lists(&chars("x"), &chars("axb")).unwrap();
        assert_eq!(actual, vec![Pairing::OnlyB(0), Pairing::Both(0, 1), Pairing::OnlyB(2)]);
    }

    #[test]
    fn keeps_order() {
        let a = chars("abcd");
        let b = chars("dcba");
        let actual = EditDistanceMatcher::new(char_costs()).match_lists(&a, &b).unwrap();
        assert_eq!(actual.iter().filter(|pairing| pairing.is_paired()).collect::<Vec<_>>(), vec![&Pairing::Both(3, 0)]);
        assert_eq!(char_costs().total_cost(&a, &b, &actual), 6.0);
    }

    #[test]
    fn wide_input_uses_several_chunks() {
        let a: Vec<u32> = (0..1000).collect();
        let b: Vec<u32> = (0..1000).filter(|x| x % 7 != 3).collect();
        let costs = CostFns::symmetric(|_: &u32| 1.0, |x: &u32, y: &u32| if x == y { 0.0 } else { 3.0 });
        let actual = EditDistanceMatcher::new(costs).match_lists(&a, &b).unwrap();
        let unmatched: Vec<Pairing> = actual.iter().copied().filter(|pairing| !pairing.is_paired()).collect();
        let expected: Vec<Pairing> = (0..1000).filter(|x| x % 7 == 3).map(Pairing::OnlyA).collect();
        assert_eq!(unmatched, expected);
    }

    #[test]
    fn invalid_diff_cost() {
        let costs = CostFns::symmetric(|_: &char| 1.0, |_: &char, _: &char| TCost::INFINITY);
        let actual = EditDistanceMatcher::new(costs).match_lists(&chars("a"), &chars("b"));
        assert_eq!(actual, Err(MatchError::InvalidCost { cost: TCost::INFINITY }));
    }
}
