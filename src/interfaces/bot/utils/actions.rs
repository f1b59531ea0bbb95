use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref ACTION_ID_REGEX: Regex =
        Regex::new(r"^(poll_vote|task_participate|giveaway_participate)_(\d+)$").unwrap();
}

/// Callback payload attached to inline buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionId {
    PollVote(usize),
    TaskParticipate(u64),
    GiveawayParticipate(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized action identifier '{0}'")]
pub struct UnknownAction(pub String);

impl FromStr for ActionId {
    type Err = UnknownAction;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownAction(data.to_string());
        let captures = ACTION_ID_REGEX.captures(data).ok_or_else(unknown)?;
        let index = &captures[2];

        let parsed = match &captures[1] {
            "poll_vote" => index.parse().map(ActionId::PollVote),
            "task_participate" => index.parse().map(ActionId::TaskParticipate),
            "giveaway_participate" => index.parse().map(ActionId::GiveawayParticipate),
            _ => return Err(unknown()),
        };
        parsed.map_err(|_| unknown())
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionId::PollVote(option) => write!(f, "poll_vote_{}", option),
            ActionId::TaskParticipate(id) => write!(f, "task_participate_{}", id),
            ActionId::GiveawayParticipate(id) => write!(f, "giveaway_participate_{}", id),
        }
    }
}

impl ActionId {
    /// Text for the callback answer; positions are shown 1-based.
    pub fn acknowledgment(&self) -> String {
        match self {
            ActionId::PollVote(option) => format!("You voted for option {}!", option + 1),
            ActionId::TaskParticipate(id) => {
                format!("You are participating in task #{}!", id + 1)
            }
            ActionId::GiveawayParticipate(id) => {
                format!("You are participating in giveaway #{}!", id + 1)
            }
        }
    }
}
