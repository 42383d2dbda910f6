use clap::Parser;
use gridmatch::{
    config::{read_config_file, Config, ConfigOpt, Strategy},
    costs::TokenCosts,
    input::{intern_tokens, read_files, tokenize, Token},
    matcher::{
        CombinedMatcher, CostModel, EditDistanceMatcher, GreedyMatcher, KeyedIdentityMatcher, Matcher,
        MinCostFlowMatcher, PositionalMatcher,
    },
    output::print,
    validate::{print_errors, validate, PairingOrder},
};
use std::io::stdout;
use string_interner::DefaultSymbol;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Pairs up the lines, words or characters of two files")]
struct Args {
    #[command(flatten)]
    config: ConfigOpt,

    /// Log what the matchers do.
    #[arg(short, long)]
    verbose: bool,

    #[arg(value_name = "OLD")]
    old: String,

    #[arg(value_name = "NEW")]
    new: String,
}

fn token_symbol(token: &Token) -> DefaultSymbol {
    token.symbol
}

fn build_matcher<'a>(config: &Config) -> Box<dyn Matcher<Token<'a>> + 'a> {
    let costs = TokenCosts::from_config(config);
    match config.strategy {
        Strategy::Positional => Box::new(PositionalMatcher::new()),
        Strategy::Identity => Box::new(KeyedIdentityMatcher::new(token_symbol)),
        Strategy::Greedy => Box::new(GreedyMatcher::new(costs)),
        Strategy::EditDistance => Box::new(EditDistanceMatcher::new(costs)),
        Strategy::MinCostFlow => Box::new(MinCostFlowMatcher::new(costs)),
        Strategy::Combined => {
            let mut combined: CombinedMatcher<Token> = CombinedMatcher::new(vec![]);
            combined
                .push(MinCostFlowMatcher::new(costs.exact_only()))
                .push(GreedyMatcher::new(costs));
            Box::new(combined)
        }
    }
}

fn try_main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("gridmatch=debug")
    } else {
        EnvFilter::new("gridmatch=warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let config = Config::default().update(read_config_file()?).update(args.config);
    debug!(?config, "configuration");
    if config.threads > 0 {
        rayon::ThreadPoolBuilder::new().num_threads(config.threads).build_global()?;
    }

    let input = read_files(&args.old, &args.new)?;
    let tokens = intern_tokens([0, 1].map(|side| tokenize(&input.file_input[side], config.unit)));
    debug!(old = tokens[0].len(), new = tokens[1].len(), "tokenized");

    let pairings = build_matcher(&config).match_lists(&tokens[0], &tokens[1])?;
    let cost = TokenCosts::from_config(&config).total_cost(&tokens[0], &tokens[1], &pairings);

    if config.validate {
        let order = match config.strategy {
            Strategy::EditDistance => PairingOrder::Alignment,
            _ => PairingOrder::Canonical,
        };
        print_errors(&validate(&pairings, [tokens[0].len(), tokens[1].len()], order));
    }

    print(config.mode, &tokens, &pairings, cost, &mut stdout())?;

    Ok(())
}

fn main() {
    // Returning the error from main() would print it with Debug instead of Display.
    if let Err(e) = try_main() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
