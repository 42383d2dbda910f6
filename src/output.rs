use std::io;

use crate::{
    config::OutputMode,
    input::Token,
    matcher::{Pairing, TCost},
};

const SIDE_WIDTH: usize = 30;

fn display(token: &Token) -> String {
    token.text.trim_end_matches('\n').escape_debug().to_string()
}

fn marker(tokens: &[Vec<Token>; 2], pairing: Pairing) -> char {
    match pairing {
        Pairing::Both(a, b) if tokens[0][a].symbol == tokens[1][b].symbol => '=',
        Pairing::Both(..) => '~',
        Pairing::OnlyA(_) => '-',
        Pairing::OnlyB(_) => '+',
        Pairing::Empty => '?',
    }
}

fn index_column(index: Option<usize>) -> String {
    index.map_or(String::new(), |index| (index + 1).to_string())
}

/// One line per pairing: a marker, the 1-based positions on both sides, and the token texts.
pub fn print_pairs(tokens: &[Vec<Token>; 2], pairings: &[Pairing], output: &mut impl io::Write) -> io::Result<()> {
    for &pairing in pairings {
        let [a, b] = pairing.sides();
        let text = match pairing {
            Pairing::Both(a, b) if marker(tokens, pairing) == '~' => {
                format!("{} -> {}", display(&tokens[0][a]), display(&tokens[1][b]))
            }
            _ => a.map(|a| display(&tokens[0][a])).or(b.map(|b| display(&tokens[1][b]))).unwrap_or_default(),
        };
        writeln!(
            output,
            "{} {:>5} {:>5}  {text}",
            marker(tokens, pairing),
            index_column(a),
            index_column(b)
        )?;
    }
    Ok(())
}

fn fit(text: &str, width: usize) -> String {
    let mut result: String = text.chars().take(width).collect();
    let padding = width - result.chars().count();
    result.push_str(&" ".repeat(padding));
    result
}

pub fn print_side_by_side(
    tokens: &[Vec<Token>; 2],
    pairings: &[Pairing],
    output: &mut impl io::Write,
) -> io::Result<()> {
    for &pairing in pairings {
        let [left, right] = [0, 1].map(|side| {
            pairing.sides()[side].map_or(String::new(), |index| display(&tokens[side][index]))
        });
        let line = format!("{} {} | {}", marker(tokens, pairing), fit(&left, SIDE_WIDTH), right);
        writeln!(output, "{}", line.trim_end())?;
    }
    Ok(())
}

pub fn print_summary(
    tokens: &[Vec<Token>; 2],
    pairings: &[Pairing],
    cost: TCost,
    output: &mut impl io::Write,
) -> io::Result<()> {
    let count = |wanted: char| pairings.iter().filter(|&&pairing| marker(tokens, pairing) == wanted).count();
    writeln!(output, "old tokens: {}, new tokens: {}", tokens[0].len(), tokens[1].len())?;
    writeln!(output, "equal: {}, changed: {}", count('='), count('~'))?;
    writeln!(output, "only old: {}, only new: {}", count('-'), count('+'))?;
    writeln!(output, "total cost: {cost}")?;
    Ok(())
}

pub fn print(
    mode: OutputMode,
    tokens: &[Vec<Token>; 2],
    pairings: &[Pairing],
    cost: TCost,
    output: &mut impl io::Write,
) -> io::Result<()> {
    match mode {
        OutputMode::Debug => writeln!(output, "{pairings:#?}"),
        OutputMode::Pairs => print_pairs(tokens, pairings, output),
        OutputMode::Side => print_side_by_side(tokens, pairings, output),
        OutputMode::Summary => print_summary(tokens, pairings, cost, output),
    }
}
