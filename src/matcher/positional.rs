use super::{error::MatchError, pairing::Pairing, Matcher};

/// Pairs elements that sit at the same position.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalMatcher;

impl PositionalMatcher {
    pub fn new() -> Self {
        PositionalMatcher
    }
}

impl<T> Matcher<T> for PositionalMatcher {
    fn match_nonempty(&self, list_a: &[T], list_b: &[T]) -> Result<Vec<Pairing>, MatchError> {
        let common = usize::min(list_a.len(), list_b.len());
        Ok((0..common)
            .map(|i| Pairing::Both(i, i))
            .chain((common..list_a.len()).map(Pairing::OnlyA))
            .chain((common..list_b.len()).map(Pairing::OnlyB))
            .collect())
    }
}
