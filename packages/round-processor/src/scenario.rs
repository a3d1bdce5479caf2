use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use lms_engine::models::{game::GameConfig, pick::MatchResult};
use serde::{Deserialize, Serialize};

/// A whole game described up front: who plays, which teams they pick from,
/// and what happened in each round.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub name: String,
    #[serde(default = "default_group_name")]
    pub group: String,
    pub teams: Vec<String>,
    pub players: Vec<String>,
    #[serde(default)]
    pub config: GameConfig,
    pub rounds: Vec<ScenarioRound>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioRound {
    /// Player name to team name. Players left out are auto-assigned.
    #[serde(default)]
    pub picks: BTreeMap<String, String>,
    /// Team name to the result of its fixture.
    pub results: BTreeMap<String, MatchResult>,
}

fn default_group_name() -> String {
    "Teams".to_string()
}

#[derive(Debug)]
pub enum ScenarioError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScenarioError::Io(e) => write!(f, "Could not read scenario: {}", e),
            ScenarioError::Parse(e) => write!(f, "Invalid scenario: {}", e),
        }
    }
}

impl std::error::Error for ScenarioError {}

impl From<std::io::Error> for ScenarioError {
    fn from(error: std::io::Error) -> Self {
        ScenarioError::Io(error)
    }
}

impl From<serde_json::Error> for ScenarioError {
    fn from(error: serde_json::Error) -> Self {
        ScenarioError::Parse(error)
    }
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
