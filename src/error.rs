use std::fmt;

use crate::game::meld::MeldKind;
use crate::tile::{Suit, Tile};

/// 输入校验错误
///
/// 只有格式错误的输入（非法牌、错误的牌组、牌数不符）才会返回此错误；
/// "不能胡"、"不听牌"等正常结果一律以 `false` / 空集合表示。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// 牌的点数超出该花色范围
    InvalidRank { suit: Suit, rank: u8 },
    /// 牌组张数与类型不符
    InvalidMeldSize { kind: MeldKind, tile_count: usize },
    /// 牌组形状不合法（刻子不同牌、顺子不连续等）
    InvalidMeldShape { kind: MeldKind },
    /// 暗杠不能带来源座位
    ConcealedQuadWithSource { seat: u8 },
    /// 逻辑牌数不符（牌组按 3 张计）
    InvalidTileCount { logical: usize, expected: usize },
    /// 牌组超过 4 组
    TooManyMelds(usize),
    /// 某种牌超过 4 张
    TooManyCopies { tile: Tile, count: usize },
    /// 全场牌的构成不是 34 种各 4 张
    CompositionMismatch { tile: Tile, count: u8 },
    /// 座位号超出 0-3
    InvalidSeat(u8),
    /// 点炮胡缺少（或等于胡牌者的）放炮者
    MissingDiscarder,
    /// 手牌中没有足够的牌完成操作
    MissingTiles { tile: Tile, needed: u8, held: u8 },
    /// 无法解析的牌面写法
    InvalidNotation(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidRank { suit, rank } => {
                write!(f, "invalid rank {} for suit {:?}", rank, suit)
            }
            ValidationError::InvalidMeldSize { kind, tile_count } => {
                write!(f, "meld {:?} cannot hold {} tiles", kind, tile_count)
            }
            ValidationError::InvalidMeldShape { kind } => {
                write!(f, "tiles do not form a {:?}", kind)
            }
            ValidationError::ConcealedQuadWithSource { seat } => {
                write!(f, "concealed quad cannot be claimed from seat {}", seat)
            }
            ValidationError::InvalidTileCount { logical, expected } => {
                write!(f, "hand holds {} logical tiles, expected {}", logical, expected)
            }
            ValidationError::TooManyMelds(count) => write!(f, "{} melds exceed the limit of 4", count),
            ValidationError::TooManyCopies { tile, count } => {
                write!(f, "{} appears {} times, at most 4 allowed", tile, count)
            }
            ValidationError::CompositionMismatch { tile, count } => {
                write!(f, "{} appears {} times across the table, expected 4", tile, count)
            }
            ValidationError::InvalidSeat(seat) => write!(f, "seat {} out of range", seat),
            ValidationError::MissingDiscarder => write!(f, "discard win needs a discarder other than the winner"),
            ValidationError::MissingTiles { tile, needed, held } => {
                write!(f, "need {} copies of {}, hand holds {}", needed, tile, held)
            }
            ValidationError::InvalidNotation(text) => write!(f, "cannot parse tiles from {:?}", text),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_values() {
        let err = ValidationError::InvalidRank { suit: Suit::Zi, rank: 8 };
        assert!(err.to_string().contains('8'));

        let err = ValidationError::InvalidTileCount { logical: 12, expected: 14 };
        assert_eq!(err.to_string(), "hand holds 12 logical tiles, expected 14");
    }
}
