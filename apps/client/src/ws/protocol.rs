//! Coordinator wire protocol.
//!
//! Every frame is one JSON value. Inbound frames are classified by shape
//! (bare string literal or single-key object), not by a type field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Card, CardFormat, CompactCard, RoundPayload};
use crate::error::ClientError;
use crate::state::PlayerId;

/// Object keys in classification precedence order.
const KEYED_SHAPES: [&str; 6] = [
    "YourCards",
    "YourTurn",
    "YouMadeStep",
    "ID",
    "StepError",
    "Message",
];

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMsg {
    Pong,
    YourCards {
        hand: Vec<Card>,
        deck_size: usize,
    },
    YourTurn {
        round: RoundPayload,
        hand: Vec<Card>,
        deck_size: usize,
        opponent_deck_size: usize,
        timeout_seconds: i64,
    },
    YouMadeStep {
        round: RoundPayload,
        hand: Vec<Card>,
        deck_size: usize,
        /// Card count of the player now stepping, when the coordinator sends it.
        opponent_deck_size: Option<usize>,
    },
    GameWinner,
    GameLoser,
    Id(PlayerId),
    YouArePlaying,
    StepError(StepErrorKind),
    Message(String),
    JsonError,
}

impl InboundMsg {
    /// Classifies a raw text frame. Unknown or malformed shapes yield `None`.
    pub fn decode(text: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(text).ok()?;
        match value {
            Value::String(tag) => match tag.as_str() {
                "Pong" => Some(InboundMsg::Pong),
                "GameWinner" => Some(InboundMsg::GameWinner),
                "GameLoser" => Some(InboundMsg::GameLoser),
                "YouArePlaying" => Some(InboundMsg::YouArePlaying),
                "JsonError" => Some(InboundMsg::JsonError),
                _ => None,
            },
            Value::Object(mut map) => {
                let key = KEYED_SHAPES.iter().find(|k| map.contains_key(**k))?;
                let payload = map.remove(*key)?;
                Self::decode_keyed(key, payload)
            }
            _ => None,
        }
    }

    fn decode_keyed(key: &str, payload: Value) -> Option<Self> {
        match key {
            "YourCards" => {
                let (hand, deck_size) = serde_json::from_value(payload).ok()?;
                Some(InboundMsg::YourCards { hand, deck_size })
            }
            "YourTurn" => {
                let (round, hand, deck_size, opponent_deck_size, timeout_seconds) =
                    serde_json::from_value(payload).ok()?;
                Some(InboundMsg::YourTurn {
                    round,
                    hand,
                    deck_size,
                    opponent_deck_size,
                    timeout_seconds,
                })
            }
            "YouMadeStep" => {
                if let Ok((round, hand, deck_size, opponent)) =
                    serde_json::from_value::<(RoundPayload, Vec<Card>, usize, usize)>(
                        payload.clone(),
                    )
                {
                    return Some(InboundMsg::YouMadeStep {
                        round,
                        hand,
                        deck_size,
                        opponent_deck_size: Some(opponent),
                    });
                }
                let (round, hand, deck_size) = serde_json::from_value(payload).ok()?;
                Some(InboundMsg::YouMadeStep {
                    round,
                    hand,
                    deck_size,
                    opponent_deck_size: None,
                })
            }
            "ID" => match payload {
                Value::Number(n) => Some(InboundMsg::Id(PlayerId(n.to_string()))),
                Value::String(s) => Some(InboundMsg::Id(PlayerId(s))),
                _ => None,
            },
            "StepError" => match payload {
                Value::String(s) => Some(InboundMsg::StepError(StepErrorKind::from_wire(&s))),
                _ => None,
            },
            "Message" => match payload {
                Value::String(s) => Some(InboundMsg::Message(s)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Short tag for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            InboundMsg::Pong => "Pong",
            InboundMsg::YourCards { .. } => "YourCards",
            InboundMsg::YourTurn { .. } => "YourTurn",
            InboundMsg::YouMadeStep { .. } => "YouMadeStep",
            InboundMsg::GameWinner => "GameWinner",
            InboundMsg::GameLoser => "GameLoser",
            InboundMsg::Id(_) => "ID",
            InboundMsg::YouArePlaying => "YouArePlaying",
            InboundMsg::StepError(_) => "StepError",
            InboundMsg::Message(_) => "Message",
            InboundMsg::JsonError => "JsonError",
        }
    }
}

/// Why the coordinator refused a submitted step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepErrorKind {
    /// Not this player's turn.
    InvalidPid,
    InvalidStepType,
    InvalidCards,
    InvalidComb,
    WeakComb,
    Other(String),
}

impl StepErrorKind {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "InvalidPID" => StepErrorKind::InvalidPid,
            "InvalidStepType" => StepErrorKind::InvalidStepType,
            "InvalidCards" => StepErrorKind::InvalidCards,
            "InvalidComb" => StepErrorKind::InvalidComb,
            "WeakComb" => StepErrorKind::WeakComb,
            other => StepErrorKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StepErrorKind::InvalidPid => "InvalidPID",
            StepErrorKind::InvalidStepType => "InvalidStepType",
            StepErrorKind::InvalidCards => "InvalidCards",
            StepErrorKind::InvalidComb => "InvalidComb",
            StepErrorKind::WeakComb => "WeakComb",
            StepErrorKind::Other(s) => s,
        }
    }
}

/// Move kinds the player can trigger.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StepKind {
    GetCard,
    GiveComb,
    TransComb,
    GetComb,
}

/// Move payload; combination steps carry the selection in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    GetCard,
    GiveComb(Vec<Card>),
    TransComb(Vec<Card>),
    GetComb,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutboundMsg {
    Ping,
    MakeStep(Step),
    SendMessage(String),
    Exit,
}

impl OutboundMsg {
    pub fn encode(&self) -> Result<String, ClientError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Like [`encode`](Self::encode), with combination cards in `format`.
    pub fn encode_with(&self, format: CardFormat) -> Result<String, ClientError> {
        let compact = match (format, self) {
            (CardFormat::Compact, OutboundMsg::MakeStep(Step::GiveComb(cards))) => {
                CompactStep::GiveComb(cards.iter().map(CompactCard).collect())
            }
            (CardFormat::Compact, OutboundMsg::MakeStep(Step::TransComb(cards))) => {
                CompactStep::TransComb(cards.iter().map(CompactCard).collect())
            }
            _ => return self.encode(),
        };
        Ok(serde_json::to_string(&CompactOutbound::MakeStep(compact))?)
    }
}

#[derive(Serialize)]
enum CompactOutbound<'a> {
    MakeStep(CompactStep<'a>),
}

#[derive(Serialize)]
enum CompactStep<'a> {
    GiveComb(Vec<CompactCard<'a>>),
    TransComb(Vec<CompactCard<'a>>),
}
