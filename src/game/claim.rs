use super::action::Action;
use super::chow::ChowHandler;
use super::constants::NUM_PLAYERS;
use super::hand_state::HandState;
use super::kong::KongHandler;
use super::pong::PongHandler;
use super::rules::WinRules;
use crate::error::ValidationError;
use crate::tile::{Tile, WinChecker};
use smallvec::SmallVec;

/// 某个座位针对一张打出的牌的全部可选动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimOptions {
    pub seat: u8,
    pub win: bool,
    pub exposed_quad: bool,
    pub triplet: bool,
    /// 可吃的顺子（最小牌）；只有下家才可能非空
    pub sequences: SmallVec<[Tile; 3]>,
}

impl ClaimOptions {
    /// 依次调用各个判定
    ///
    /// # 参数
    ///
    /// - `state`: 该座位的牌（13 张逻辑牌）
    /// - `tile`: 打出的牌
    /// - `seat`: 该座位
    /// - `discarder`: 打出者
    pub fn for_seat<R: WinRules>(
        checker: &WinChecker<R>,
        state: &HandState,
        tile: Tile,
        seat: u8,
        discarder: u8,
    ) -> Self {
        let hand = &state.hand;
        let sequences = if seat == next_seat(discarder) {
            ChowHandler::chow_options(hand, &tile)
        } else {
            SmallVec::new()
        };
        Self {
            seat,
            win: checker.is_winning_hand(&hand.with_tile(tile), &state.melds),
            exposed_quad: KongHandler::can_direct_kong(hand, &tile),
            triplet: PongHandler::can_pong(hand, &tile),
            sequences,
        }
    }

    /// 按优先级排列的可选动作
    pub fn actions(&self) -> SmallVec<[Action; 6]> {
        let mut actions = SmallVec::new();
        if self.win {
            actions.push(Action::Win);
        }
        if self.exposed_quad {
            actions.push(Action::ExposedQuad);
        }
        if self.triplet {
            actions.push(Action::Triplet);
        }
        for &low in &self.sequences {
            actions.push(Action::Sequence { low });
        }
        actions
    }

    /// 优先级最高的动作
    pub fn best(&self) -> Option<Action> {
        self.actions().first().copied()
    }

    pub fn is_empty(&self) -> bool {
        !self.win && !self.exposed_quad && !self.triplet && self.sequences.is_empty()
    }
}

/// 多家同时声明时的裁决
///
/// 只负责排序：谁可以声明由 `ClaimOptions` 给出，是否真的声明由调用方决定
pub struct ClaimResolver;

impl ClaimResolver {
    /// 打出者之后的三家，按行牌顺序（座位号按 4 取模）
    pub fn seat_order(discarder: u8) -> [u8; 3] {
        let seat = discarder % NUM_PLAYERS;
        [
            (seat + 1) % NUM_PLAYERS,
            (seat + 2) % NUM_PLAYERS,
            (seat + 3) % NUM_PLAYERS,
        ]
    }

    /// 收集其他三家的可选动作（按行牌顺序，跳过没有动作的座位）
    pub fn collect<R: WinRules>(
        checker: &WinChecker<R>,
        states: &[HandState; 4],
        tile: Tile,
        discarder: u8,
    ) -> Result<Vec<ClaimOptions>, ValidationError> {
        if discarder >= NUM_PLAYERS {
            return Err(ValidationError::InvalidSeat(discarder));
        }
        Ok(Self::seat_order(discarder)
            .iter()
            .map(|&seat| ClaimOptions::for_seat(checker, &states[seat as usize], tile, seat, discarder))
            .filter(|options| !options.is_empty())
            .collect())
    }

    /// 在已声明的动作中选出生效的一个
    ///
    /// 优先级高者胜；同优先级时离打出者更近（行牌顺序在前）者胜。
    /// 打出者本人的声明和下家以外的吃会被忽略。
    pub fn resolve(claims: &[(u8, Action)], discarder: u8) -> Option<(u8, Action)> {
        if discarder >= NUM_PLAYERS {
            return None;
        }
        let order = Self::seat_order(discarder);
        let distance = |seat: u8| order.iter().position(|&s| s == seat);

        let mut best: Option<(usize, u8, Action)> = None;
        for &(seat, action) in claims {
            let d = match distance(seat) {
                Some(d) => d,
                None => continue,
            };
            if matches!(action, Action::Sequence { .. }) && d != 0 {
                continue;
            }
            let better = match best {
                None => true,
                Some((best_d, _, best_action)) => {
                    action.priority() > best_action.priority()
                        || (action.priority() == best_action.priority() && d < best_d)
                }
            };
            if better {
                best = Some((d, seat, action));
            }
        }
        best.map(|(_, seat, action)| (seat, action))
    }
}

/// 下家
pub fn next_seat(seat: u8) -> u8 {
    (seat % NUM_PLAYERS + 1) % NUM_PLAYERS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_order() {
        assert_eq!(ClaimResolver::seat_order(0), [1, 2, 3]);
        assert_eq!(ClaimResolver::seat_order(2), [3, 0, 1]);
        // 大座位号不会溢出
        assert_eq!(ClaimResolver::seat_order(255), [0, 1, 2]);
        assert_eq!(next_seat(255), 0);
    }

    #[test]
    fn test_resolve_rejects_invalid_discarder() {
        let claims = [(1, Action::Win)];
        assert_eq!(ClaimResolver::resolve(&claims, 4), None);
        assert_eq!(ClaimResolver::resolve(&claims, 255), None);
    }

    #[test]
    fn test_win_beats_triplet() {
        let claims = [(2, Action::Triplet), (3, Action::Win)];
        assert_eq!(ClaimResolver::resolve(&claims, 1), Some((3, Action::Win)));
    }

    #[test]
    fn test_triplet_beats_sequence() {
        let claims = [(1, Action::Sequence { low: Tile::Wan(2) }), (3, Action::Triplet)];
        assert_eq!(ClaimResolver::resolve(&claims, 0), Some((3, Action::Triplet)));
    }

    #[test]
    fn test_tie_goes_to_nearer_seat() {
        // 打出者为 2：行牌顺序 3, 0, 1
        let claims = [(1, Action::Win), (0, Action::Win)];
        assert_eq!(ClaimResolver::resolve(&claims, 2), Some((0, Action::Win)));
    }

    #[test]
    fn test_ignores_invalid_claims() {
        let chow = Action::Sequence { low: Tile::Tong(4) };
        // 对家不能吃，打出者自己不能声明
        assert_eq!(ClaimResolver::resolve(&[(2, chow), (0, Action::Triplet)], 0), None);
        assert_eq!(ClaimResolver::resolve(&[(1, chow)], 0), Some((1, chow)));
    }
}
