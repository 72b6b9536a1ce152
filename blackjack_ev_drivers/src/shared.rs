use anyhow::Context;
use blackjack_ev::{Hand, Rank, Rule};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub rule: ConfigRule,
    pub evaluation: ConfigEvaluation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigRule {
    pub number_of_decks: u8,
    pub dealer_hit_on_soft17: bool,
    pub allow_double: bool,
    pub allow_das: bool,
    pub allow_late_surrender: bool,
    pub resplit_limits: u8,
    pub allow_decisions_after_split_aces: bool,
    pub allow_resplit_aces: bool,

    pub payout_blackjack: f64,
}

impl Default for ConfigRule {
    fn default() -> Self {
        let rule = Rule::default();
        ConfigRule {
            number_of_decks: rule.number_of_decks,
            dealer_hit_on_soft17: rule.dealer_hit_on_soft17,
            allow_double: rule.allow_double,
            allow_das: rule.allow_das,
            allow_late_surrender: rule.allow_late_surrender,
            resplit_limits: rule.resplit_limits,
            allow_decisions_after_split_aces: rule.allow_decisions_after_split_aces,
            allow_resplit_aces: rule.allow_resplit_aces,
            payout_blackjack: rule.payout_blackjack,
        }
    }
}

impl TryFrom<ConfigRule> for Rule {
    type Error = blackjack_ev::Error;

    fn try_from(config_rule: ConfigRule) -> Result<Rule, Self::Error> {
        let rule = Rule {
            number_of_decks: config_rule.number_of_decks,
            dealer_hit_on_soft17: config_rule.dealer_hit_on_soft17,
            payout_blackjack: config_rule.payout_blackjack,
            allow_late_surrender: config_rule.allow_late_surrender,
            allow_double: config_rule.allow_double,
            allow_das: config_rule.allow_das,
            resplit_limits: config_rule.resplit_limits,
            allow_decisions_after_split_aces: config_rule.allow_decisions_after_split_aces,
            allow_resplit_aces: config_rule.allow_resplit_aces,
        };
        rule.validate()?;

        Ok(rule)
    }
}

/// Which hands to evaluate. Cards are written the way `Hand` parses them,
/// e.g. "A,K" or "10 6".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigEvaluation {
    pub dealer_up_card: String,
    pub hands: Vec<String>,
    #[serde(default)]
    pub show_all: bool,
}

impl ConfigEvaluation {
    pub fn dealer_up_card(&self) -> Result<Rank, blackjack_ev::Error> {
        Rank::parse(&self.dealer_up_card)
    }

    pub fn hands(&self) -> Result<Vec<Hand>, blackjack_ev::Error> {
        self.hands.iter().map(|hand| hand.parse()).collect()
    }
}

/// Reads the content of a given config file and parses it to a Config.
pub fn parse_config_from_file(filename: &str) -> anyhow::Result<Config> {
    let file_content =
        fs::read_to_string(filename).with_context(|| format!("Cannot read {}", filename))?;
    parse_config(&file_content).with_context(|| format!("Cannot parse {}", filename))
}

pub fn parse_config(content: &str) -> anyhow::Result<Config> {
    Ok(serde_yaml::from_str(content)?)
}
