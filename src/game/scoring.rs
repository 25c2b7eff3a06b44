use super::constants::{NUM_PLAYERS, WAITING_HAND_SIZE};
use super::hand_state::HandState;
use super::payment::{PaymentLine, PaymentReason, Role};
use super::rules::{ChangchunRules, WinRules};
use super::settlement::SettlementResult;
use crate::error::ValidationError;
use crate::tile::{Tile, WinChecker};

/// 夹胡（坎张）的判定方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum ClosedWaitCheck {
    /// 宽松：和牌张为数牌，且手中有它的上下两张
    #[default]
    Presence,
    /// 严格：存在一种胡牌拆法，和牌张是某个顺子的中张
    Partition,
}

/// 一次胡牌
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinEvent {
    pub winner: u8,
    pub winning_tile: Tile,
    pub is_self_draw: bool,
    pub dealer: u8,
    /// 点炮者（自摸时为 None）
    pub discarder: Option<u8>,
}

impl WinEvent {
    /// 自摸
    pub fn self_drawn(winner: u8, winning_tile: Tile, dealer: u8) -> Self {
        Self {
            winner,
            winning_tile,
            is_self_draw: true,
            dealer,
            discarder: None,
        }
    }

    /// 点炮
    pub fn discard(winner: u8, winning_tile: Tile, dealer: u8, discarder: u8) -> Self {
        Self {
            winner,
            winning_tile,
            is_self_draw: false,
            dealer,
            discarder: Some(discarder),
        }
    }
}

/// 倍数 G：门清、夹胡各翻一倍
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Multiplier {
    pub concealed: bool,
    pub closed_wait: bool,
}

impl Multiplier {
    /// 1、2 或 4
    pub fn value(&self) -> i32 {
        let mut g = 1;
        if self.concealed {
            g *= 2;
        }
        if self.closed_wait {
            g *= 2;
        }
        g
    }
}

/// 胡牌结算
///
/// 只读取手牌，不修改累计分数；调用方用 `SettlementResult::apply` 记分
#[derive(Debug, Clone, Default)]
pub struct ScoreCalculator<R: WinRules = ChangchunRules> {
    closed_wait: ClosedWaitCheck,
    checker: WinChecker<R>,
}

impl ScoreCalculator<ChangchunRules> {
    pub fn new() -> Self {
        Self::with_check(ClosedWaitCheck::default())
    }

    pub fn with_check(closed_wait: ClosedWaitCheck) -> Self {
        Self { closed_wait, checker: WinChecker::new() }
    }
}

impl<R: WinRules> ScoreCalculator<R> {
    pub fn with_checker(closed_wait: ClosedWaitCheck, checker: WinChecker<R>) -> Self {
        Self { closed_wait, checker }
    }

    pub fn closed_wait_check(&self) -> ClosedWaitCheck {
        self.closed_wait
    }

    /// 计算一次胡牌的结算
    ///
    /// # 参数
    ///
    /// - `event`: 胡牌事件
    /// - `hands`: 四家的牌；胡牌者的暗牌可以已含和牌张（14 张），也可以不含（13 张）
    ///
    /// # 规则
    ///
    /// - 自摸：其他三家各付，胜者或付款者是庄家时 4G，否则 2G
    /// - 点炮：只有放炮者付，胜者是庄家 8G，放炮者是庄家 6G，否则 5G
    pub fn calculate(&self, event: &WinEvent, hands: &[HandState; 4]) -> Result<SettlementResult, ValidationError> {
        check_seat(event.winner)?;
        check_seat(event.dealer)?;
        let discarder = if event.is_self_draw {
            None
        } else {
            let discarder = event.discarder.ok_or(ValidationError::MissingDiscarder)?;
            check_seat(discarder)?;
            if discarder == event.winner {
                return Err(ValidationError::MissingDiscarder);
            }
            Some(discarder)
        };

        let winner_state = self.winning_state(&hands[event.winner as usize], event.winning_tile)?;
        let multiplier = self.multiplier(&winner_state, event.winning_tile);
        let g = multiplier.value();
        crate::debug!(
            "seat {} wins on {}: concealed={} closed_wait={} G={}",
            event.winner,
            event.winning_tile,
            multiplier.concealed,
            multiplier.closed_wait,
            g
        );

        let winner_is_dealer = event.winner == event.dealer;
        let mut breakdown = Vec::with_capacity(3);
        match discarder {
            None => {
                for seat in (0..NUM_PLAYERS).filter(|&s| s != event.winner) {
                    let payer_is_dealer = seat == event.dealer;
                    let base = if winner_is_dealer || payer_is_dealer { 4 } else { 2 };
                    breakdown.push(PaymentLine {
                        seat,
                        role: Role::of(seat, event.dealer),
                        amount: base * g,
                        reason: PaymentReason::SelfDrawn,
                    });
                }
            }
            Some(discarder) => {
                let base = if winner_is_dealer {
                    8
                } else if discarder == event.dealer {
                    6
                } else {
                    5
                };
                breakdown.push(PaymentLine {
                    seat: discarder,
                    role: Role::of(discarder, event.dealer),
                    amount: base * g,
                    reason: PaymentReason::DealIn,
                });
            }
        }

        Ok(SettlementResult::from_lines(event.winner, breakdown, multiplier))
    }

    /// 胡牌时的倍数
    pub fn multiplier(&self, state: &HandState, winning_tile: Tile) -> Multiplier {
        Multiplier {
            concealed: state.is_concealed(),
            closed_wait: self.is_closed_wait(state, winning_tile),
        }
    }

    /// 夹胡判定，`state` 为含和牌张的 14 张
    pub fn is_closed_wait(&self, state: &HandState, winning_tile: Tile) -> bool {
        if !winning_tile.is_number() {
            return false;
        }
        match self.closed_wait {
            ClosedWaitCheck::Presence => {
                let below = winning_tile.offset(-1);
                let above = winning_tile.offset(1);
                match (below, above) {
                    (Some(below), Some(above)) => state.hand.has_tile(below) && state.hand.has_tile(above),
                    _ => false,
                }
            }
            ClosedWaitCheck::Partition => self
                .checker
                .winning_partitions(&state.hand, &state.melds)
                .iter()
                .any(|p| p.groups.iter().any(|g| g.has_middle(winning_tile))),
        }
    }

    /// 补齐和牌张；14 张时和牌张必须已在暗牌中
    fn winning_state(&self, state: &HandState, winning_tile: Tile) -> Result<HandState, ValidationError> {
        if !winning_tile.is_valid() {
            return Err(ValidationError::InvalidRank { suit: winning_tile.suit(), rank: winning_tile.rank() });
        }
        if state.logical_count() == WAITING_HAND_SIZE {
            let full = state.with_tile(winning_tile);
            full.validate_complete()?;
            return Ok(full);
        }
        state.validate_complete()?;
        if !state.hand.has_tile(winning_tile) {
            return Err(ValidationError::MissingTiles { tile: winning_tile, needed: 1, held: 0 });
        }
        Ok(state.clone())
    }
}

fn check_seat(seat: u8) -> Result<(), ValidationError> {
    if seat >= NUM_PLAYERS {
        return Err(ValidationError::InvalidSeat(seat));
    }
    Ok(())
}
