use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{
    cost::{CostFns, CostModel, TCost},
    edit_distance::EditDistanceMatcher,
    error::MatchError,
    greedy::GreedyMatcher,
    min_cost_flow::MinCostFlowMatcher,
    pairing::Pairing,
    Matcher,
};

pub type Element = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Greedy,
    EditDistance,
    MinCostFlow,
}

pub const ALL_STRATEGIES: [Strategy; 3] = [Strategy::Greedy, Strategy::EditDistance, Strategy::MinCostFlow];

#[derive(Debug, Clone)]
pub struct Testcase {
    pub list_a: Vec<Element>,
    pub list_b: Vec<Element>,
}

impl Testcase {
    /// Two independent sequences of values below `alphabet`.
    pub fn random(seed: u64, size: [usize; 2], alphabet: Element) -> Testcase {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let [list_a, list_b] = size.map(|len| (0..len).map(|_| rng.gen_range(0..alphabet)).collect());
        Testcase { list_a, list_b }
    }

    /// A random sequence and a copy of it with `edits` random deletions, insertions and replacements.
    pub fn mutated(seed: u64, size: usize, edits: usize, alphabet: Element) -> Testcase {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let list_a: Vec<Element> = (0..size).map(|_| rng.gen_range(0..alphabet)).collect();
        let mut list_b = list_a.clone();
        for _ in 0..edits {
            let position = rng.gen_range(0..=list_b.len());
            match rng.gen_range(0..3) {
                0 if position < list_b.len() => {
                    list_b.remove(position);
                }
                1 if position < list_b.len() => list_b[position] = rng.gen_range(0..alphabet),
                _ => list_b.insert(position, rng.gen_range(0..alphabet)),
            }
        }
        Testcase { list_a, list_b }
    }

    pub fn total_cost(&self, pairings: &[Pairing]) -> TCost {
        testcase_costs().total_cost(&self.list_a, &self.list_b, pairings)
    }
}

/// Leaving a value unmatched costs between 1 and 4; pairing two values costs their distance.
pub fn testcase_costs() -> impl CostModel<Element> + Copy {
    CostFns::symmetric(
        |x: &Element| 1.0 + (x % 4) as TCost,
        |x: &Element, y: &Element| x.abs_diff(*y) as TCost,
    )
}

pub fn run_strategy(testcase: &Testcase, strategy: Strategy) -> Result<Vec<Pairing>, MatchError> {
    let costs = testcase_costs();
    let (list_a, list_b) = (&testcase.list_a, &testcase.list_b);
    match strategy {
        Strategy::Greedy => GreedyMatcher::new(costs).match_lists(list_a, list_b),
        Strategy::EditDistance => EditDistanceMatcher::new(costs).match_lists(list_a, list_b),
        Strategy::MinCostFlow => MinCostFlowMatcher::new(costs).match_lists(list_a, list_b),
    }
}

/// Cost of the best pairing over all possible ones.
pub fn compute_optimal_cost(testcase: &Testcase) -> Result<TCost, MatchError> {
    let pairings = run_strategy(testcase, Strategy::MinCostFlow)?;
    Ok(testcase.total_cost(&pairings))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn generation_is_reproducible() {
        let first = Testcase::random(7, [20, 30], 50);
        let second = Testcase::random(7, [20, 30], 50);
        assert_eq!(first.list_a, second.list_a);
        assert_eq!(first.list_b, second.list_b);
        assert_eq!(first.list_b.len(), 30);
        assert!(first.list_a.iter().all(|&x| x < 50));
    }

    #[test]
    fn mutation_without_edits_is_a_copy() {
        let testcase = Testcase::mutated(3, 25, 0, 10);
        assert_eq!(testcase.list_a, testcase.list_b);
        assert_eq!(compute_optimal_cost(&testcase), Ok(0.0));
    }
}
