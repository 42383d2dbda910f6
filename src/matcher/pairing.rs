/// One entry of a matching: which element of each side (if any) takes part in it.
///
/// The derived ordering is the canonical output order of the matchers: every `Both` comes before
/// every `OnlyA`, which come before every `OnlyB`, and entries of the same kind are ordered by
/// the A index, then by the B index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pairing {
    Both(usize, usize),
    OnlyA(usize),
    OnlyB(usize),
    /// Neither side. Matchers never produce it; it only comes out of `from_options(None, None)`.
    Empty,
}

impl Pairing {
    pub fn from_options(a: Option<usize>, b: Option<usize>) -> Pairing {
        match (a, b) {
            (Some(a), Some(b)) => Pairing::Both(a, b),
            (Some(a), None) => Pairing::OnlyA(a),
            (None, Some(b)) => Pairing::OnlyB(b),
            (None, None) => Pairing::Empty,
        }
    }

    pub fn a(&self) -> Option<usize> {
        match *self {
            Pairing::Both(a, _) | Pairing::OnlyA(a) => Some(a),
            Pairing::OnlyB(_) | Pairing::Empty => None,
        }
    }

    pub fn b(&self) -> Option<usize> {
        match *self {
            Pairing::Both(_, b) | Pairing::OnlyB(b) => Some(b),
            Pairing::OnlyA(_) | Pairing::Empty => None,
        }
    }

    pub fn sides(&self) -> [Option<usize>; 2] {
        [self.a(), self.b()]
    }

    pub fn is_paired(&self) -> bool {
        matches!(self, Pairing::Both(..))
    }

    pub fn is_only_a(&self) -> bool {
        matches!(self, Pairing::OnlyA(_))
    }

    pub fn is_only_b(&self) -> bool {
        matches!(self, Pairing::OnlyB(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Pairing::Empty)
    }

    /// The same correspondence seen from the other side.
    pub fn swap(&self) -> Pairing {
        Pairing::from_options(self.b(), self.a())
    }

    /// Translates local indices through the given maps (used when a matcher ran over a subsequence).
    pub fn remap(&self, map_a: &[usize], map_b: &[usize]) -> Pairing {
        Pairing::from_options(self.a().map(|a| map_a[a]), self.b().map(|b| map_b[b]))
    }
}

/// Turns index pairings into pairs of the original elements, `None` standing for a missing side.
pub fn make_pairs<'a, T>(
    list_a: &'a [T],
    list_b: &'a [T],
    pairings: &[Pairing],
) -> Vec<(Option<&'a T>, Option<&'a T>)> {
    pairings
        .iter()
        .map(|pairing| (pairing.a().map(|a| &list_a[a]), pairing.b().map(|b| &list_b[b])))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn canonical_order() {
        let mut pairings = vec![
            Pairing::OnlyB(0),
            Pairing::Empty,
            Pairing::OnlyA(3),
            Pairing::Both(2, 0),
            Pairing::OnlyA(1),
            Pairing::Both(0, 5),
            Pairing::Both(0, 1),
        ];
        pairings.sort();
        assert_eq!(
            pairings,
            vec![
                Pairing::Both(0, 1),
                Pairing::Both(0, 5),
                Pairing::Both(2, 0),
                Pairing::OnlyA(1),
                Pairing::OnlyA(3),
                Pairing::OnlyB(0),
                Pairing::Empty,
            ]
        );
    }

    #[test]
    fn accessors() {
        assert_eq!(Pairing::Both(4, 4).sides(), [Some(4), Some(4)]);
        assert_eq!(Pairing::OnlyA(2).sides(), [Some(2), None]);
        assert_eq!(Pairing::OnlyB(7).sides(), [None, Some(7)]);
        assert_eq!(Pairing::Empty.sides(), [None, None]);
        assert!(Pairing::Both(0, 3).is_paired());
        assert!(Pairing::OnlyA(0).is_only_a());
        assert!(Pairing::OnlyB(0).is_only_b());
        assert!(Pairing::Empty.is_empty());
    }

    #[test]
    fn from_options_and_swap() {
        assert_eq!(Pairing::from_options(None, None), Pairing::Empty);
        assert_eq!(Pairing::from_options(Some(1), None), Pairing::OnlyA(1));
        assert_eq!(Pairing::Both(1, 2).swap(), Pairing::Both(2, 1));
        assert_eq!(Pairing::OnlyA(5).swap(), Pairing::OnlyB(5));
        assert_eq!(Pairing::Empty.swap(), Pairing::Empty);
    }

    #[test]
    fn remap_to_original_indices() {
        let map_a = [1, 4, 6];
        let map_b = [0, 2];
        assert_eq!(Pairing::Both(2, 1).remap(&map_a, &map_b), Pairing::Both(6, 2));
        assert_eq!(Pairing::OnlyA(0).remap(&map_a, &map_b), Pairing::OnlyA(1));
        assert_eq!(Pairing::OnlyB(1).remap(&map_a, &map_b), Pairing::OnlyB(2));
    }

    #[test]
    fn pairs_of_elements() {
        let a = ["x", "y"];
        let b = ["y", "z"];
        let pairs = make_pairs(&a, &b, &[Pairing::Both(1, 0), Pairing::OnlyA(0), Pairing::OnlyB(1)]);
        assert_eq!(pairs, vec![(Some(&"y"), Some(&"y")), (Some(&"x"), None), (None, Some(&"z"))]);
    }
}
