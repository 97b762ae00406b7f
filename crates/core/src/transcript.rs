//! Scenario Transcript
//!
//! The what-if chat is an ordered list of turns. A turn starts `Pending` when
//! the query is sent and either becomes `Resolved` in place or is removed if
//! the request fails. Turns are addressed by id, never by position.

use serde::{Deserialize, Serialize};

/// Reply shown for a turn whose request has not settled.
pub const PENDING_REPLY: &str = "Thinking...";

/// Identity of a scenario turn within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TurnId(u64);

impl TurnId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// One user query and its assistant reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScenarioTurn {
    Pending { id: TurnId, query: String },
    Resolved { id: TurnId, query: String, reply: String },
}

impl ScenarioTurn {
    pub fn id(&self) -> TurnId {
        match self {
            ScenarioTurn::Pending { id, .. } | ScenarioTurn::Resolved { id, .. } => *id,
        }
    }

    pub fn query(&self) -> &str {
        match self {
            ScenarioTurn::Pending { query, .. } | ScenarioTurn::Resolved { query, .. } => query,
        }
    }

    /// Reply to display; pending turns show the placeholder.
    pub fn reply_text(&self) -> &str {
        match self {
            ScenarioTurn::Pending { .. } => PENDING_REPLY,
            ScenarioTurn::Resolved { reply, .. } => reply,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ScenarioTurn::Pending { .. })
    }
}

/// Append-only list of scenario turns with id-addressed settlement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<ScenarioTurn>,
    next_id: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pending turn and return its id.
    pub fn push_pending(&mut self, query: impl Into<String>) -> TurnId {
        let id = TurnId::new(self.next_id);
        self.next_id += 1;
        self.turns.push(ScenarioTurn::Pending {
            id,
            query: query.into(),
        });
        id
    }

    /// Resolve the pending turn with `id`. Returns false if no such pending
    /// turn exists.
    pub fn resolve(&mut self, id: TurnId, reply: impl Into<String>) -> bool {
        let Some(turn) = self.turns.iter_mut().find(|t| t.id() == id) else {
            return false;
        };
        let query = match &mut *turn {
            ScenarioTurn::Pending { query, .. } => std::mem::take(query),
            ScenarioTurn::Resolved { .. } => return false,
        };
        *turn = ScenarioTurn::Resolved {
            id,
            query,
            reply: reply.into(),
        };
        true
    }

    /// Remove the pending turn with `id`. Resolved turns are never removed.
    pub fn discard(&mut self, id: TurnId) -> Option<ScenarioTurn> {
        let index = self
            .turns
            .iter()
            .position(|t| t.id() == id && t.is_pending())?;
        Some(self.turns.remove(index))
    }

    pub fn has_pending(&self) -> bool {
        self.turns.iter().any(ScenarioTurn::is_pending)
    }

    pub fn turns(&self) -> &[ScenarioTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
