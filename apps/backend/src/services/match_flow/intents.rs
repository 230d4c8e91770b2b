//! Player intents accepted by the coordinator.

use serde::{Deserialize, Serialize};

use crate::domain::{discard, go, play_card, try_parse_cards, Card, MatchState, ScoreEvent, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

/// A move a seat wants to make. Cards travel as tokens (`"AS"`, `"10H"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchIntent {
    Discard { cards: Vec<Card> },
    PlayCard { card: Card },
    Go,
}

impl MatchIntent {
    /// Build an intent from its name and card tokens, as a transport would
    /// receive them.
    pub fn from_tokens<S: AsRef<str>>(kind: &str, tokens: &[S]) -> Result<Self, DomainError> {
        match kind {
            "discard" => Ok(Self::Discard {
                cards: try_parse_cards(tokens)?,
            }),
            "play_card" => match try_parse_cards(tokens)?.as_slice() {
                [card] => Ok(Self::PlayCard { card: *card }),
                other => Err(DomainError::validation(
                    ValidationKind::Other("INTENT".into()),
                    format!("play_card takes exactly one card, got {}", other.len()),
                )),
            },
            "go" if tokens.is_empty() => Ok(Self::Go),
            "go" => Err(DomainError::validation(
                ValidationKind::Other("INTENT".into()),
                "go takes no cards",
            )),
            other => Err(DomainError::validation(
                ValidationKind::Other("INTENT".into()),
                format!("unknown intent '{other}'"),
            )),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Discard { .. } => "discard",
            Self::PlayCard { .. } => "play_card",
            Self::Go => "go",
        }
    }

    /// Run the matching rule transition on `state`.
    pub(super) fn apply(
        &self,
        state: &mut MatchState,
        seat: Seat,
    ) -> Result<Vec<ScoreEvent>, DomainError> {
        match self {
            Self::Discard { cards } => discard(state, seat, cards),
            Self::PlayCard { card } => play_card(state, seat, *card),
            Self::Go => go(state, seat),
        }
    }
}
