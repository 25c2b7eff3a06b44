use super::hand_state::HandState;
use super::meld::Meld;
use crate::error::ValidationError;
use crate::tile::{Hand, Tile};

/// 碰牌操作器
pub struct PongHandler;

impl PongHandler {
    /// 检查是否可以碰牌
    ///
    /// 碰牌条件：
    /// 1. 手牌中有两张相同的牌
    /// 2. 别人打出了第三张相同的牌
    ///
    /// # 参数
    ///
    /// - `hand`: 暗牌
    /// - `tile`: 别人打出的牌
    pub fn can_pong(hand: &Hand, tile: &Tile) -> bool {
        hand.tile_count(*tile) >= 2
    }

    /// 碰牌后的状态副本：手中移除两张，加入刻子
    ///
    /// 不修改 `state`
    pub fn after_pong(state: &HandState, tile: Tile, from: u8) -> Result<HandState, ValidationError> {
        let held = state.hand.tile_count(tile);
        let mut next = state.clone();
        if !next.hand.remove_n(tile, 2) {
            return Err(ValidationError::MissingTiles { tile, needed: 2, held });
        }
        next.melds.push(Meld::triplet(tile, Some(from))?);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::meld::MeldKind;

    #[test]
    fn test_can_pong() {
        let mut hand = Hand::new();

        // 手牌中有两张 1 万
        hand.add_tile(Tile::Wan(1));
        hand.add_tile(Tile::Wan(1));

        // 可以碰
        assert!(PongHandler::can_pong(&hand, &Tile::Wan(1)));

        // 只有一张，不能碰
        hand.remove_tile(Tile::Wan(1));
        assert!(!PongHandler::can_pong(&hand, &Tile::Wan(1)));
    }

    #[test]
    fn test_after_pong() {
        let mut state = HandState::new();
        state.hand.add_tile(Tile::Zi(Tile::BAI));
        state.hand.add_tile(Tile::Zi(Tile::BAI));
        state.hand.add_tile(Tile::Wan(9));

        let next = PongHandler::after_pong(&state, Tile::Zi(Tile::BAI), 2).unwrap();
        assert_eq!(next.melds[0].kind(), MeldKind::Triplet);
        assert_eq!(next.melds[0].source_seat(), Some(2));
        assert_eq!(next.hand.to_sorted_vec(), vec![Tile::Wan(9)]);

        assert_eq!(
            PongHandler::after_pong(&state, Tile::Wan(9), 2),
            Err(ValidationError::MissingTiles { tile: Tile::Wan(9), needed: 2, held: 1 })
        );
    }
}
