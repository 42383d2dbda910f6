use crate::matcher::Pairing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingOrder {
    /// Sorted by the derived `Pairing` order.
    Canonical,
    /// A walk through both sequences: the indices of each side only grow.
    Alignment,
    Any,
}

/// Checks that `pairings` is a total matching of sequences of lengths `len`: every index of each side
/// appears exactly once. Returns a description of every problem found.
pub fn validate(pairings: &[Pairing], len: [usize; 2], order: PairingOrder) -> Vec<String> {
    let mut errors = vec![];
    let side_name = |side: usize| ["A", "B"][side];

    let mut used: [Vec<Option<usize>>; 2] = len.map(|len| vec![None; len]);
    for (position, pairing) in pairings.iter().enumerate() {
        if pairing.is_empty() {
            errors.push(format!("Entry #{position} is Empty"));
        }
        for (side, index) in pairing.sides().into_iter().enumerate() {
            let Some(index) = index else {
                continue;
            };
            if index >= len[side] {
                errors.push(format!(
                    "{pairing:?} at entry #{position} refers to {}[{index}], but side {} has {} elements",
                    side_name(side),
                    side_name(side),
                    len[side]
                ));
                continue;
            }
            match used[side][index] {
                Some(first) => errors.push(format!(
                    "{}[{index}] is used by entry #{first} and again by entry #{position}",
                    side_name(side)
                )),
                None => used[side][index] = Some(position),
            }
        }
    }

    for side in 0..2 {
        let missing: Vec<String> = (0..len[side])
            .filter(|&index| used[side][index].is_none())
            .map(|index| index.to_string())
            .collect();
        if !missing.is_empty() {
            errors.push(format!("{} indices never used: {}", side_name(side), missing.join(", ")));
        }
    }

    match order {
        PairingOrder::Canonical => {
            for position in 1..pairings.len() {
                if pairings[position - 1] >= pairings[position] {
                    errors.push(format!(
                        "{:?} at entry #{} is not ordered before {:?} at entry #{position}",
                        pairings[position - 1],
                        position - 1,
                        pairings[position]
                    ));
                }
            }
        }
        PairingOrder::Alignment => {
            let mut last: [Option<usize>; 2] = [None; 2];
            for (position, pairing) in pairings.iter().enumerate() {
                for (side, index) in pairing.sides().into_iter().enumerate() {
                    let Some(index) = index else {
                        continue;
                    };
                    if last[side].map_or(false, |last| last >= index) {
                        errors.push(format!(
                            "{pairing:?} at entry #{position} goes back on side {}",
                            side_name(side)
                        ));
                    }
                    last[side] = Some(index);
                }
            }
        }
        PairingOrder::Any => {}
    }

    errors
}

pub fn print_errors(errors: &[String]) {
    if !errors.is_empty() {
        eprintln!("Matching validation errors:");
        for error in errors {
            eprintln!("  {error}");
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use Pairing::*;

    #[test]
    fn total_matching_is_valid() {
        let pairings = [Both(0, 1), Both(2, 0), OnlyA(1)];
        assert!(validate(&pairings, [3, 2], PairingOrder::Canonical).is_empty());
    }

    #[test]
    fn reports_duplicates_and_missing() {
        let errors = validate(&[Both(0, 0), OnlyA(0)], [2, 2], PairingOrder::Any);
        assert_eq!(
            errors,
            vec![
                "A[0] is used by entry #0 and again by entry #1",
                "A indices never used: 1",
                "B indices never used: 1",
            ]
        );
    }

    #[test]
    fn reports_out_of_range_and_empty() {
        let errors = validate(&[OnlyB(3), Empty], [0, 1], PairingOrder::Any);
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("refers to B[3]"));
        assert_eq!(errors[1], "Entry #1 is Empty");
        assert_eq!(errors[2], "B indices never used: 0");
    }

    #[test]
    fn canonical_order() {
        let pairings = [OnlyA(0), Both(1, 0)];
        assert!(validate(&pairings, [2, 1], PairingOrder::Any).is_empty());
        assert_eq!(validate(&pairings, [2, 1], PairingOrder::Canonical).len(), 1);
    }

    #[test]
    fn alignment_order() {
        let path = [OnlyA(0), OnlyB(0), Both(1, 1), OnlyB(2)];
        assert!(validate(&path, [2, 3], PairingOrder::Alignment).is_empty());
        let crossing = [Both(0, 1), Both(1, 0)];
        assert_eq!(
            validate(&crossing, [2, 2], PairingOrder::Alignment),
            vec!["Both(1, 0) at entry #1 goes back on side B"]
        );
    }
}
