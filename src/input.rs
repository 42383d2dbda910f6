use anyhow::Context as _;
use string_interner::{DefaultStringInterner, DefaultSymbol};

use crate::config::Unit;

pub struct ProgramInput {
    pub file_input: [String; 2],
    pub file_names: [String; 2],
}

pub fn read_files(old_name: &str, new_name: &str) -> anyhow::Result<ProgramInput> {
    let file_names = [old_name.to_owned(), new_name.to_owned()];
    let mut file_input = [String::new(), String::new()];
    for side in 0..2 {
        let bytes = std::fs::read(&file_names[side]).with_context(|| format!("reading {}", file_names[side]))?;
        file_input[side] = String::from_utf8_lossy(&bytes).into_owned();
    }
    Ok(ProgramInput { file_input, file_names })
}

/// Byte offsets where words start, plus `text.len()`. A word is a run of letters, a run of digits,
/// or any other single character.
pub fn partition_into_words(text: &str) -> Vec<usize> {
    let mut word_bounds = vec![];
    let mut was_last_alphabetic = false;
    let mut was_last_numeric = false;
    for (i, c) in text.char_indices() {
        if c.is_alphabetic() && was_last_alphabetic {
            continue;
        }
        if c.is_numeric() && was_last_numeric {
            continue;
        }
        was_last_alphabetic = c.is_alphabetic();
        was_last_numeric = c.is_numeric();
        word_bounds.push(i);
    }
    word_bounds.push(text.len());
    word_bounds
}

/// Byte offsets where lines start, plus `text.len()`. Lines keep their `'\n'`.
pub fn partition_into_lines(text: &str) -> Vec<usize> {
    let mut line_bounds: Vec<usize> = vec![0];
    for (i, c) in text.char_indices() {
        if c == '\n' {
            line_bounds.push(i + 1);
        }
    }
    if line_bounds.last() != Some(&text.len()) {
        line_bounds.push(text.len());
    }
    line_bounds
}

pub fn partition_into_chars(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect()
}

/// Splits `text` into tokens of the given unit. Whitespace-only words are dropped.
pub fn tokenize(text: &str, unit: Unit) -> Vec<&str> {
    let bounds = match unit {
        Unit::Lines => partition_into_lines(text),
        Unit::Words => partition_into_words(text),
        Unit::Chars => partition_into_chars(text),
    };
    bounds
        .windows(2)
        .map(|bound| &text[bound[0]..bound[1]])
        .filter(|token| unit != Unit::Words || !token.trim().is_empty())
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub struct Token<'a> {
    pub text: &'a str,
    pub symbol: DefaultSymbol,
}

/// Interns the tokens of both sides into one table, so equal texts get equal symbols.
pub fn intern_tokens<'a>(tokens: [Vec<&'a str>; 2]) -> [Vec<Token<'a>>; 2] {
    let mut interner = DefaultStringInterner::default();
    tokens.map(|side| {
        side.into_iter()
            .map(|text| Token {
                text,
                symbol: interner.get_or_intern(text),
            })
            .collect()
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lines() {
        assert_eq!(tokenize("a\nbc\n\nd", Unit::Lines), vec!["a\n", "bc\n", "\n", "d"]);
        assert_eq!(tokenize("a\n", Unit::Lines), vec!["a\n"]);
        assert!(tokenize("", Unit::Lines).is_empty());
    }

    #[test]
    fn words() {
        assert_eq!(tokenize("foo(12, bar)  x", Unit::Words), vec!["foo", "(", "12", ",", "bar", ")", "x"]);
    }

    #[test]
    fn chars() {
        assert_eq!(tokenize("ab💩", Unit::Chars), vec!["a", "b", "💩"]);
    }

    #[test]
    fn interning_across_sides() {
        let [a, b] = intern_tokens([vec!["x", "y"], vec!["y", "z", "x"]]);
        assert_eq!(a[0].symbol, b[2].symbol);
        assert_eq!(a[1].symbol, b[0].symbol);
        assert_ne!(a[0].symbol, a[1].symbol);
        assert_eq!(b[1].text, "z");
    }
}
