use crate::{
    config::Config,
    input::Token,
    matcher::{levenshtein_distance, CostModel, TCost},
};

/// Prices tokens by their text: an unmatched token costs its length plus one, a pair of different
/// tokens costs the character edit distance between them.
#[derive(Debug, Clone, Copy)]
pub struct TokenCosts {
    gap_weight: TCost,
    distance_weight: TCost,
}

impl TokenCosts {
    pub fn new(gap_weight: TCost, distance_weight: TCost) -> Self {
        TokenCosts {
            gap_weight,
            distance_weight,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        TokenCosts::new(config.gap_weight, config.distance_weight)
    }

    fn gap(&self, token: &Token) -> TCost {
        self.gap_weight * (token.text.chars().count() + 1) as TCost
    }

    /// The same gap costs, but only equal tokens are ever worth pairing.
    pub fn exact_only(self) -> ExactCosts {
        ExactCosts(self)
    }
}

impl<'a> CostModel<Token<'a>> for TokenCosts {
    fn gap_cost_a(&self, token: &Token<'a>) -> TCost {
        self.gap(token)
    }

    fn gap_cost_b(&self, token: &Token<'a>) -> TCost {
        self.gap(token)
    }

    fn diff_cost(&self, token_a: &Token<'a>, token_b: &Token<'a>) -> TCost {
        if token_a.symbol == token_b.symbol {
            0.0
        } else {
            self.distance_weight * levenshtein_distance(token_a.text, token_b.text) as TCost
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ExactCosts(TokenCosts);

impl<'a> CostModel<Token<'a>> for ExactCosts {
    fn gap_cost_a(&self, token: &Token<'a>) -> TCost {
        self.0.gap(token)
    }

    fn gap_cost_b(&self, token: &Token<'a>) -> TCost {
        self.0.gap(token)
    }

    fn diff_cost(&self, token_a: &Token<'a>, token_b: &Token<'a>) -> TCost {
        if token_a.symbol == token_b.symbol {
            0.0
        } else {
            self.0.gap(token_a) + self.0.gap(token_b) + 1.0
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::input::intern_tokens;

    #[test]
    fn token_costs() {
        let [a, b] = intern_tokens([vec!["kitten", "x"], vec!["sitting", "x"]]);
        let costs = TokenCosts::new(2.0, 0.5);
        assert_eq!(costs.gap_cost_a(&a[0]), 14.0);
        assert_eq!(costs.diff_cost(&a[1], &b[1]), 0.0);
        assert_eq!(costs.diff_cost(&a[0], &b[0]), 2.5);
        let exact = costs.exact_only();
        assert_eq!(exact.diff_cost(&a[1], &b[1]), 0.0);
        assert_eq!(exact.diff_cost(&a[0], &b[0]), 14.0 + 16.0 + 1.0);
    }
}
