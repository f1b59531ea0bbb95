use serde::{Deserialize, Serialize};

/// Persisted records carry a stable id decoupled from their array position.
/// Files written before ids existed fall back to the record's position.
pub trait Record {
    fn id(&self) -> Option<u64>;
    fn assign_id(&mut self, id: u64);
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub title: String,
    pub description: String,
    pub reward: f64,
}

impl Task {
    pub fn new(title: impl Into<String>, description: impl Into<String>, reward: f64) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            reward,
        }
    }
}

impl Record for Task {
    fn id(&self) -> Option<u64> {
        self.id
    }

    fn assign_id(&mut self, id: u64) {
        self.id = Some(id);
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Giveaway {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub title: String,
    #[serde(rename = "winners", alias = "winnerCount")]
    pub winner_count: u32,
    #[serde(rename = "reward", alias = "rewardPerWinner")]
    pub reward_per_winner: f64,
}

impl Giveaway {
    pub fn new(title: impl Into<String>, winner_count: u32, reward_per_winner: f64) -> Self {
        Self {
            id: None,
            title: title.into(),
            winner_count,
            reward_per_winner,
        }
    }
}

impl Record for Giveaway {
    fn id(&self) -> Option<u64> {
        self.id
    }

    fn assign_id(&mut self, id: u64) {
        self.id = Some(id);
    }
}

/// Polls are rendered once and never stored.
#[derive(Clone, Debug, PartialEq)]
pub struct Poll {
    pub question: String,
    pub options: Vec<String>,
}
