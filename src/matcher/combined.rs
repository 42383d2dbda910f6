use tracing::{debug, trace};

use super::{error::MatchError, pairing::Pairing, Matcher};

/// Runs several matchers in sequence, each over the elements the earlier ones left unmatched.
///
/// Only the `Both` results of each round are kept; everything still unmatched after the last round
/// comes out as `OnlyA` / `OnlyB`.
pub struct CombinedMatcher<'m, T> {
    matchers: Vec<Box<dyn Matcher<T> + 'm>>,
}

impl<'m, T> CombinedMatcher<'m, T> {
    pub fn new(matchers: Vec<Box<dyn Matcher<T> + 'm>>) -> Self {
        CombinedMatcher { matchers }
    }

    pub fn push(&mut self, matcher: impl Matcher<T> + 'm) -> &mut Self {
        self.matchers.push(Box::new(matcher));
        self
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

/// The not yet matched elements of one side, with their indices in the original sequence.
struct Residue<T> {
    items: Vec<T>,
    original: Vec<usize>,
}

impl<T: Clone> Residue<T> {
    fn new(list: &[T]) -> Self {
        Residue {
            items: list.to_vec(),
            original: (0..list.len()).collect(),
        }
    }

    fn retain_unmatched(&mut self, matched: &[bool]) {
        let (items, original): (Vec<T>, Vec<usize>) = self
            .items
            .drain(..)
            .zip(self.original.drain(..))
            .zip(matched)
            .filter(|&(_, matched)| !matched)
            .map(|(entry, _)| entry)
            .unzip();
        self.items = items;
        self.original = original;
    }
}

impl<'m, T: Clone> Matcher<T> for CombinedMatcher<'m, T> {
    fn match_nonempty(&self, list_a: &[T], list_b: &[T]) -> Result<Vec<Pairing>, MatchError> {
        let mut residues = [Residue::new(list_a), Residue::new(list_b)];
        let mut result = vec![];

        for (round, matcher) in self.matchers.iter().enumerate() {
            if residues.iter().any(|residue| residue.items.is_empty()) {
                break;
            }
            let pairings = matcher.match_lists(&residues[0].items, &residues[1].items)?;
            let mut matched = [0, 1].map(|side| vec![false; residues[side].items.len()]);
            let before = result.len();
            for pairing in pairings {
                if let Pairing::Both(a, b) = pairing {
                    matched[0][a] = true;
                    matched[1][b] = true;
                    result.push(pairing.remap(&residues[0].original, &residues[1].original));
                }
            }
            trace!(round, paired = result.len() - before, "combined matching round");
            for side in 0..2 {
                residues[side].retain_unmatched(&matched[side]);
            }
        }

        let paired = result.len();
        result.extend(residues[0].original.iter().map(|&a| Pairing::OnlyA(a)));
        result.extend(residues[1].original.iter().map(|&b| Pairing::OnlyB(b)));
        result.sort_unstable();
        debug!(size_a = list_a.len(), size_b = list_b.len(), paired, "combined matching done");
        Ok(result)
    }
}
