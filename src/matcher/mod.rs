pub mod benchmark;
mod combined;
mod cost;
mod edit_distance;
mod error;
mod greedy;
mod identity;
mod indices;
mod min_cost_flow;
mod pairing;
mod positional;
mod string_distance;

pub use self::{
    combined::CombinedMatcher,
    cost::{check_cost, CostFns, CostModel, TCost},
    edit_distance::EditDistanceMatcher,
    error::{MatchError, Side},
    greedy::GreedyMatcher,
    identity::{IdentityMatcher, KeyedIdentityMatcher},
    min_cost_flow::MinCostFlowMatcher,
    pairing::{make_pairs, Pairing},
    positional::PositionalMatcher,
    string_distance::levenshtein_distance,
};

/// Parallel loops hand out at least this many items per rayon job.
pub(crate) const MIN_PARALLEL_CHUNK: usize = 256;

/// Computes a correspondence between the elements of two sequences.
///
/// Implementors provide `match_nonempty`; callers use `match_lists`, which first handles the cases
/// every matcher treats the same way.
///
/// "The same sequence" means the same memory, not equal contents. Equal constant slices such as
/// `&[1]` written twice may be promoted to one static and then count as the same sequence.
pub trait Matcher<T> {
    /// Both lists are non-empty and are not the same slice.
    fn match_nonempty(&self, list_a: &[T], list_b: &[T]) -> Result<Vec<Pairing>, MatchError>;

    fn match_lists(&self, list_a: &[T], list_b: &[T]) -> Result<Vec<Pairing>, MatchError> {
        if list_a.is_empty() && list_b.is_empty() {
            return Ok(vec![]);
        }
        if std::ptr::eq(list_a, list_b) {
            return Ok(identity_pairing(list_a.len()));
        }
        if list_a.is_empty() || list_b.is_empty() {
            return Ok(one_sided_pairing(list_a.len(), list_b.len()));
        }
        self.match_nonempty(list_a, list_b)
    }

    fn match_pairs<'a>(
        &self,
        list_a: &'a [T],
        list_b: &'a [T],
    ) -> Result<Vec<(Option<&'a T>, Option<&'a T>)>, MatchError> {
        let pairings = self.match_lists(list_a, list_b)?;
        Ok(make_pairs(list_a, list_b, &pairings))
    }
}

impl<T, M: Matcher<T> + ?Sized> Matcher<T> for Box<M> {
    fn match_nonempty(&self, list_a: &[T], list_b: &[T]) -> Result<Vec<Pairing>, MatchError> {
        (**self).match_nonempty(list_a, list_b)
    }

    fn match_lists(&self, list_a: &[T], list_b: &[T]) -> Result<Vec<Pairing>, MatchError> {
        (**self).match_lists(list_a, list_b)
    }
}

pub fn identity_pairing(len: usize) -> Vec<Pairing> {
    (0..len).map(|i| Pairing::Both(i, i)).collect()
}

/// All of A unmatched, then all of B unmatched.
pub fn one_sided_pairing(len_a: usize, len_b: usize) -> Vec<Pairing> {
    (0..len_a)
        .map(Pairing::OnlyA)
        .chain((0..len_b).map(Pairing::OnlyB))
        .collect()
}
