use anyhow::{bail, Context};
use blackjack_ev::{evaluate_many, Hand, Rank, Rule};
use blackjack_ev_drivers::{parse_config_from_file, Config};
use clap::Parser;
use log::{info, warn};

const DEFAULT_CONFIG_PATH: &str = "~/.blackjack_ev.yml";

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    /// A hand to evaluate, e.g. "A,7". Can be repeated; replaces the hands of the config
    #[arg(long = "hand")]
    hands: Vec<String>,

    /// The dealer's up card; replaces the one of the config
    #[arg(short, long)]
    up_card: Option<String>,

    /// Print the expectation of every available decision
    #[arg(short, long)]
    all: bool,
}

/// Loads the config file. Only the default path may be missing, in which case
/// the default rule is used.
fn load_config(path: &str) -> anyhow::Result<Config> {
    if path != DEFAULT_CONFIG_PATH {
        return parse_config_from_file(path);
    }
    let home_dir = home::home_dir().context("Cannot find home directory")?;
    let config_file_path = home_dir.join(".blackjack_ev.yml");
    if !config_file_path.exists() {
        info!("{} not found, using the default rule", DEFAULT_CONFIG_PATH);
        return Ok(Config::default());
    }
    if config_file_path.is_dir() {
        bail!("{} should be a file rather than a directory", config_file_path.display());
    }
    let config_file_path = config_file_path
        .to_str()
        .context("Config path is not valid UTF-8")?;
    parse_config_from_file(config_file_path)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CommandLineArgs::parse();
    let mut config = load_config(&args.config)?;
    if !args.hands.is_empty() {
        config.evaluation.hands = args.hands;
    }
    if let Some(up_card) = args.up_card {
        config.evaluation.dealer_up_card = up_card;
    }
    let show_all = args.all || config.evaluation.show_all;

    let rule: Rule = config.rule.try_into()?;
    let dealer_up_card: Rank = config.evaluation.dealer_up_card()?;
    let hands: Vec<Hand> = config.evaluation.hands()?;
    if hands.is_empty() {
        warn!("No hands to evaluate");
        return Ok(());
    }

    let solution = evaluate_many(&hands, dealer_up_card, &rule)?;
    for (hand, hand_solution) in hands.iter().zip(&solution.per_hand) {
        println!(
            "{} vs {}: {} {:+.6}",
            hand, dealer_up_card, hand_solution.best_decision, hand_solution.best_expectation
        );
        if show_all {
            print!("{}", hand_solution.table);
        }
    }
    if hands.len() > 1 {
        println!("Total: {:+.6}", solution.total_expectation);
    }

    Ok(())
}
