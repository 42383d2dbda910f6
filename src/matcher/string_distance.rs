use super::{cost::CostFns, edit_distance::EditDistanceMatcher, Matcher};

/// Number of characters left unmatched by the cheapest alignment of `a` and `b`, where dropping a
/// character costs 1 and substituting one costs 3. A substitution therefore never beats a drop on
/// each side, so the result counts one drop per side for each differing position.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    if std::ptr::eq(a, b) || a == b {
        return 0;
    }
    if a.is_empty() || b.is_empty() {
        return a.chars().count() + b.chars().count();
    }
    let chars = [a, b].map(|text| text.chars().collect::<Vec<char>>());
    let costs = CostFns::symmetric(|_: &char| 1.0, |x: &char, y: &char| if x == y { 0.0 } else { 3.0 });
    EditDistanceMatcher::new(costs)
        .match_lists(&chars[0], &chars[1])
        .expect("constant costs are valid")
        .iter()
        .filter(|pairing| !pairing.is_paired())
        .count()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn same_string() {
        let text = "identical";
        assert_eq!(levenshtein_distance(text, text), 0);
        assert_eq!(levenshtein_distance("abc", &String::from("abc")), 0);
    }

    #[test]
    fn against_empty() {
        assert_eq!(levenshtein_distance("", "abcd"), 4);
        assert_eq!(levenshtein_distance("žlté", ""), 4);
        assert_eq!(levenshtein_distance("", ""), 0);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(levenshtein_distance("abc💩def👨ghi", "abcdef👨ghi"), 1);
    }

    #[test]
    fn kitten_sitting() {
        assert_eq!(levenshtein_distance("KITTEN", "SITTING"), 5);
    }

    #[test]
    fn symmetric() {
        assert_eq!(levenshtein_distance("flaw", "lawn"), levenshtein_distance("lawn", "flaw"));
        assert_eq!(levenshtein_distance("flaw", "lawn"), 2);
    }
}
