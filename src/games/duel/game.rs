//! Duel turn controller.

use std::collections::VecDeque;

use tracing::info;

use super::battle::{AttackStatus, Battle};
use super::view::BattleView;
use crate::cards::VariantRegistry;
use crate::core::{BattleConfig, Board, CardId, EngineError, EngineResult, GameRng, PlayerId, PlayerMap};
use crate::stack::AckTicket;

/// Result of a finished duel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// The other hero fell.
    Winner(PlayerId),
    /// Nobody has a card left.
    Draw,
}

/// What the duel needs next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DuelStatus {
    /// The view must acknowledge this ticket.
    AwaitingAck(AckTicket),
    /// The turn is over and the other seat is up.
    TurnEnded,
    /// The duel is decided.
    Over(GameResult),
}

/// Builder for creating a Duel.
#[derive(Clone, Debug, Default)]
pub struct DuelBuilder {
    config: BattleConfig,
    decks: PlayerMap<Vec<String>>,
}

impl DuelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    /// Set a seat's deck as variant keys, top first.
    pub fn deck<I, S>(mut self, player: PlayerId, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.decks[player] = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Deal the decks and build the duel.
    pub fn build<V: BattleView>(self, variants: VariantRegistry, view: V) -> EngineResult<Duel<V>> {
        let mut board = Board::new(self.config, variants);
        for (player, keys) in self.decks.iter() {
            for key in keys {
                board.deal(player, key)?;
            }
        }

        if board.config().shuffle_decks {
            let rng = GameRng::new(board.config().seed);
            for player in PlayerId::all() {
                let mut stream = rng.for_context(&format!("deck-{}", player.index()));
                stream.shuffle(board.seats[player].deck.make_contiguous());
            }
        }

        Ok(Duel {
            battle: Battle::new(board, view),
            current: PlayerId::FIRST,
            turn: 1,
            attackers: VecDeque::new(),
            in_turn: false,
            result: None,
        })
    }
}

/// A two-seat duel.
pub struct Duel<V> {
    battle: Battle<V>,
    current: PlayerId,
    turn: u32,
    /// Cards still to attack this turn, in slot order.
    attackers: VecDeque<CardId>,
    in_turn: bool,
    result: Option<GameResult>,
}

impl<V: BattleView> Duel<V> {
    /// The battle being played.
    #[must_use]
    pub fn battle(&self) -> &Battle<V> {
        &self.battle
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        self.battle.board()
    }

    /// The view.
    #[must_use]
    pub fn view(&self) -> &V {
        self.battle.view()
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Turn number, starting at 1.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn
    }

    /// The result, once decided.
    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Play until the view has to acknowledge something or the turn ends.
    pub fn advance(&mut self) -> EngineResult<DuelStatus> {
        if let Some(result) = &self.result {
            return Ok(DuelStatus::Over(result.clone()));
        }
        if let Some(ticket) = self.battle.outstanding() {
            return Ok(DuelStatus::AwaitingAck(ticket));
        }
        if !self.in_turn {
            if let Some(result) = self.out_of_cards() {
                return Ok(DuelStatus::Over(result));
            }
            self.begin_turn()?;
        }
        self.continue_turn()
    }

    /// Acknowledge the outstanding ticket and keep playing.
    pub fn acknowledge(&mut self, ticket: AckTicket) -> EngineResult<DuelStatus> {
        if self.result.is_some() {
            return Err(EngineError::DuelOver);
        }
        match self.battle.acknowledge(ticket)? {
            AttackStatus::Pending(ticket) => Ok(DuelStatus::AwaitingAck(ticket)),
            AttackStatus::Resolved => match self.check_heroes() {
                Some(result) => Ok(DuelStatus::Over(result)),
                None => self.continue_turn(),
            },
        }
    }

    /// Play to the end, acknowledging every request at once.
    ///
    /// Returns `None` if the duel is still undecided after `max_turns`.
    pub fn play_to_end(&mut self, max_turns: u32) -> EngineResult<Option<GameResult>> {
        let mut status = self.advance()?;
        loop {
            status = match status {
                DuelStatus::Over(result) => return Ok(Some(result)),
                DuelStatus::AwaitingAck(ticket) => self.acknowledge(ticket)?,
                DuelStatus::TurnEnded if self.turn > max_turns => return Ok(None),
                DuelStatus::TurnEnded => self.advance()?,
            };
        }
    }

    fn begin_turn(&mut self) -> EngineResult<()> {
        let player = self.current;
        let board = self.battle.board_mut();

        let top = board.seats[player].deck.front().copied();
        let has_room = board.seats[player].first_empty_slot().is_some();
        if let (Some(card), true) = (top, has_room) {
            board.put_into_play(card)?;
        }

        self.attackers = board.seats[player].cards_in_play().collect();
        self.in_turn = true;
        info!(turn = self.turn, %player, attackers = self.attackers.len(), "turn started");
        Ok(())
    }

    fn continue_turn(&mut self) -> EngineResult<DuelStatus> {
        while let Some(attacker) = self.attackers.pop_front() {
            if !self.battle.board().in_play(attacker) {
                continue;
            }
            match self.battle.attack(attacker)? {
                AttackStatus::Pending(ticket) => return Ok(DuelStatus::AwaitingAck(ticket)),
                AttackStatus::Resolved => {
                    if let Some(result) = self.check_heroes() {
                        return Ok(DuelStatus::Over(result));
                    }
                }
            }
        }

        info!(turn = self.turn, player = %self.current, "turn ended");
        self.in_turn = false;
        self.current = self.current.opponent();
        self.turn += 1;
        Ok(DuelStatus::TurnEnded)
    }

    fn check_heroes(&mut self) -> Option<GameResult> {
        let fallen = PlayerId::all().find(|&player| self.battle.board().hero_power(player) == 0)?;
        let result = GameResult::Winner(fallen.opponent());
        info!(?result, "duel decided");
        self.result = Some(result.clone());
        Some(result)
    }

    fn out_of_cards(&mut self) -> Option<GameResult> {
        let board = self.battle.board();
        let empty = PlayerId::all().all(|player| {
            let seat = &board.seats[player];
            seat.deck.is_empty() && seat.cards_in_play().next().is_none()
        });
        if !empty {
            return None;
        }
        info!("no cards left, duel drawn");
        self.result = Some(GameResult::Draw);
        Some(GameResult::Draw)
    }
}
