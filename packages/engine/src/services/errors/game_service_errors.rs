use crate::repositories::errors::repository_errors::RepositoryError;

#[derive(Debug, PartialEq)]
pub enum GameServiceError {
    /// The game or round is in the wrong lifecycle state for the operation.
    InvalidState {
        game_id: String,
        reason: String,
    },
    DuplicatePick {
        game_id: String,
        round_number: u32,
        participant_id: String,
    },
    TeamAlreadyUsed {
        game_id: String,
        round_number: u32,
        participant_id: String,
        team_id: String,
    },
    RoundClosed {
        game_id: String,
        round_number: u32,
    },
    ParticipantInactive {
        game_id: String,
        participant_id: String,
        eliminated_in_round: Option<u32>,
    },
    NoTeamsAvailable {
        game_id: String,
        round_number: u32,
        participant_id: String,
    },
    MissingResult {
        game_id: String,
        round_number: u32,
        team_id: String,
    },
    DuplicateParticipant {
        game_id: String,
        player_name: String,
    },
    NotFound(String),
    ValidationError(String),
    RepositoryError(RepositoryError),
}

impl GameServiceError {
    pub fn invalid_state(game_id: &str, reason: impl Into<String>) -> Self {
        GameServiceError::InvalidState {
            game_id: game_id.to_string(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for GameServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameServiceError::InvalidState { game_id, reason } => {
                write!(f, "Invalid state for game {}: {}", game_id, reason)
            }
            GameServiceError::DuplicatePick {
                game_id,
                round_number,
                participant_id,
            } => write!(
                f,
                "Participant {} already has a pick for round {} of game {}",
                participant_id, round_number, game_id
            ),
            GameServiceError::TeamAlreadyUsed {
                game_id,
                round_number,
                participant_id,
                team_id,
            } => write!(
                f,
                "Participant {} already used team {} in game {} (round {})",
                participant_id, team_id, game_id, round_number
            ),
            GameServiceError::RoundClosed {
                game_id,
                round_number,
            } => write!(f, "Round {} of game {} is closed", round_number, game_id),
            GameServiceError::ParticipantInactive {
                game_id,
                participant_id,
                eliminated_in_round,
            } => match eliminated_in_round {
                Some(round_number) => write!(
                    f,
                    "Participant {} was eliminated from game {} in round {}",
                    participant_id, game_id, round_number
                ),
                None => write!(
                    f,
                    "Participant {} is not active in game {}",
                    participant_id, game_id
                ),
            },
            GameServiceError::NoTeamsAvailable {
                game_id,
                round_number,
                participant_id,
            } => write!(
                f,
                "No unused teams left for participant {} in round {} of game {}",
                participant_id, round_number, game_id
            ),
            GameServiceError::MissingResult {
                game_id,
                round_number,
                team_id,
            } => write!(
                f,
                "Missing result for team {} in round {} of game {}",
                team_id, round_number, game_id
            ),
            GameServiceError::DuplicateParticipant {
                game_id,
                player_name,
            } => write!(
                f,
                "Player {} is already a participant in game {}",
                player_name, game_id
            ),
            GameServiceError::NotFound(msg) => write!(f, "Not found: {}", msg),
            GameServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            GameServiceError::RepositoryError(err) => write!(f, "Repository error: {}", err),
        }
    }
}

impl std::error::Error for GameServiceError {}

impl From<RepositoryError> for GameServiceError {
    fn from(err: RepositoryError) -> Self {
        GameServiceError::RepositoryError(err)
    }
}
