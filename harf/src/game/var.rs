//! VAR challenges: dispute the last accepted move and put it to a vote.
//!
//! A challenge freezes normal play (phase moves to `Var`), gives the accused
//! a window to explain, then opens a vote among everyone except the accused.
//! All timing is swept by the room actor's tick against `expires_at`; no
//! timer tasks are spawned, so a session that has been discarded can never
//! fire.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    MIN_VAR_PLAYERS, deck,
    engine::Room,
    entities::{GameError, GameEvent, GamePhase, MoveRecord, PlayerId, VarReason},
};

/// A single voter's verdict on the disputed move.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteChoice {
    Accept,
    Reject,
}

/// Where the session currently is in its two-stage flow.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VarStatus {
    AwaitingExplanation,
    Voting,
}

/// An open challenge against the last accepted move.
///
/// The eligible voter set and the threshold are snapshotted at creation and
/// never change, even if the roster does. The challenger's reject vote is
/// recorded at creation; opening a challenge is itself a vote against the
/// move.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct VarSession {
    pub id: Uuid,
    pub challenger_id: PlayerId,
    pub accused_id: PlayerId,
    /// The disputed move, copied out of history so a rollback does not
    /// depend on the log staying put.
    pub disputed: MoveRecord,
    pub status: VarStatus,
    pub explanation: Option<String>,
    pub eligible_voter_ids: Vec<PlayerId>,
    pub votes: HashMap<PlayerId, VoteChoice>,
    /// Votes on one side needed for an outright majority:
    /// `eligible / 2 + 1`.
    pub needed_to_win: usize,
    pub started_at: DateTime<Utc>,
    /// Deadline of the current stage, re-armed when voting opens.
    pub expires_at: DateTime<Utc>,
}

impl VarSession {
    fn tally(&self) -> (usize, usize) {
        let accept = self
            .votes
            .values()
            .filter(|v| **v == VoteChoice::Accept)
            .count();
        (accept, self.votes.len() - accept)
    }
}

impl Room {
    /// Open a challenge against the last accepted move. Spends the
    /// challenger's once-per-game token and moves the room into the `Var`
    /// phase, freezing the turn clock.
    pub fn start_challenge(
        &mut self,
        challenger_id: PlayerId,
        now: DateTime<Utc>,
    ) -> Result<(), GameError> {
        if self.players.len() < MIN_VAR_PLAYERS {
            return Err(GameError::NotEnoughPlayers(MIN_VAR_PLAYERS));
        }
        if self.state.phase != GamePhase::InGame {
            return Err(GameError::NotRunning);
        }
        if self.state.var_session.is_some() {
            return Err(GameError::VarActive);
        }
        if !self.state.settings.allow_var {
            return Err(GameError::VarDisabled);
        }
        let challenger = self
            .player(challenger_id)
            .ok_or(GameError::PlayerNotFound)?;
        let disputed = self
            .state
            .last_valid_move()
            .cloned()
            .ok_or(GameError::NoChallengeableMove)?;
        if disputed.player_id == challenger_id {
            return Err(GameError::OwnMove);
        }
        if challenger.has_used_var {
            return Err(GameError::VarTokenSpent);
        }

        let accused_id = disputed.player_id;
        let eligible_voter_ids: Vec<PlayerId> = self
            .players
            .iter()
            .map(|p| p.id)
            .filter(|id| *id != accused_id)
            .collect();
        let needed_to_win = eligible_voter_ids.len() / 2 + 1;
        let mut votes = HashMap::new();
        votes.insert(challenger_id, VoteChoice::Reject);

        if let Some(challenger) = self.players.iter_mut().find(|p| p.id == challenger_id) {
            challenger.has_used_var = true;
        }
        self.state.var_session = Some(VarSession {
            id: Uuid::new_v4(),
            challenger_id,
            accused_id,
            disputed,
            status: VarStatus::AwaitingExplanation,
            explanation: None,
            eligible_voter_ids,
            votes,
            needed_to_win,
            started_at: now,
            expires_at: now
                + Duration::seconds(self.state.settings.var_explanation_duration as i64),
        });
        self.state.phase = GamePhase::Var;
        self.state.push_event(GameEvent::VarStarted {
            challenger_id,
            accused_id,
        });
        log::info!(
            "room {}: {challenger_id} challenged {accused_id}'s move",
            self.code
        );
        Ok(())
    }

    /// The accused defends their move. Closes the explanation window early
    /// and opens voting with a fresh deadline.
    pub fn submit_explanation(
        &mut self,
        player_id: PlayerId,
        explanation: String,
        now: DateTime<Utc>,
    ) -> Result<(), GameError> {
        let vote_duration = self.state.settings.var_vote_duration;
        let session = self
            .state
            .var_session
            .as_mut()
            .ok_or(GameError::NoVarSession)?;
        if session.accused_id != player_id {
            return Err(GameError::NotAccused);
        }
        if session.status != VarStatus::AwaitingExplanation {
            return Err(GameError::NotAwaitingExplanation);
        }
        if now >= session.expires_at {
            return Err(GameError::VarExpired);
        }
        session.explanation = Some(explanation);
        session.status = VarStatus::Voting;
        session.expires_at = now + Duration::seconds(vote_duration as i64);
        self.state.push_event(GameEvent::VarVotingOpened);
        Ok(())
    }

    /// Record a vote and resolve the session as soon as the outcome is
    /// certain: an outright majority either way, or the full eligible set
    /// having voted (ties uphold the move).
    pub fn vote(
        &mut self,
        player_id: PlayerId,
        choice: VoteChoice,
        now: DateTime<Utc>,
    ) -> Result<(), GameError> {
        let session = self
            .state
            .var_session
            .as_mut()
            .ok_or(GameError::NoVarSession)?;
        if session.status != VarStatus::Voting {
            return Err(GameError::NotVoting);
        }
        if now >= session.expires_at {
            return Err(GameError::VarExpired);
        }
        if !session.eligible_voter_ids.contains(&player_id) {
            return Err(GameError::NotEligible);
        }
        if session.votes.contains_key(&player_id) {
            return Err(GameError::AlreadyVoted);
        }
        session.votes.insert(player_id, choice);

        let (accept, reject) = session.tally();
        let needed = session.needed_to_win;
        let all_voted = session.votes.len() == session.eligible_voter_ids.len();
        if accept >= needed {
            self.resolve_var(true, VarReason::Majority, now);
        } else if reject >= needed {
            self.resolve_var(false, VarReason::Majority, now);
        } else if all_voted {
            self.resolve_var(true, VarReason::AllVoted, now);
        }
        Ok(())
    }

    /// Advance an expired session stage. Explanation expiry opens voting;
    /// voting expiry resolves with whatever votes are in (ties uphold).
    /// Returns whether anything fired.
    pub fn sweep_var_timer(&mut self, now: DateTime<Utc>) -> bool {
        if self.state.phase != GamePhase::Var {
            return false;
        }
        let vote_duration = self.state.settings.var_vote_duration;
        let Some(session) = self.state.var_session.as_mut() else {
            return false;
        };
        if now < session.expires_at {
            return false;
        }
        match session.status {
            VarStatus::AwaitingExplanation => {
                session.status = VarStatus::Voting;
                session.expires_at = now + Duration::seconds(vote_duration as i64);
                self.state.push_event(GameEvent::VarVotingOpened);
            }
            VarStatus::Voting => {
                let (_, reject) = session.tally();
                let accepted = reject < session.needed_to_win;
                self.resolve_var(accepted, VarReason::Timeout, now);
            }
        }
        true
    }

    /// Close out the session: record the verdict, roll back on rejection,
    /// and resume play with a fresh turn clock. Taking the session out of
    /// the state makes resolution single-shot.
    fn resolve_var(&mut self, accepted: bool, reason: VarReason, now: DateTime<Utc>) {
        let Some(session) = self.state.var_session.take() else {
            return;
        };
        let (accept_votes, reject_votes) = session.tally();

        if !accepted {
            self.state.center_word = Some(session.disputed.before.clone());
            if let Some(accused) = self
                .players
                .iter_mut()
                .find(|p| p.id == session.accused_id)
            {
                // Return the disputed card by identity, never as a copy.
                if !accused.hand.iter().any(|c| c.id == session.disputed.card.id) {
                    accused.hand.push(session.disputed.card);
                }
                accused.hand.push(deck::draw_card());
            }
        }

        self.state.history.push(
            super::entities::HistoryEntry::VarResult {
                accepted,
                reason,
                accept_votes,
                reject_votes,
                disputed: session.disputed,
                at: now,
            },
        );
        self.state.phase = GamePhase::InGame;
        self.state.turn_started_at = Some(now);
        self.state.push_event(GameEvent::VarResolved { accepted });
        log::info!(
            "room {}: VAR resolved, move {}",
            self.code,
            if accepted { "upheld" } else { "rejected" }
        );
    }
}
