use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// 麻将牌类型
///
/// 长春麻将使用 136 张牌：万、条、筒各 36 张（1-9 各 4 张），字牌 28 张（东南西北中发白各 4 张）
///
/// 变体顺序即排序顺序：先按花色（万、条、筒、字），再按点数
///
/// 反序列化经过 `Tile::new` 校验点数
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "TileRepr")]
pub enum Tile {
    /// 万子（1-9）
    Wan(u8),
    /// 条子（1-9）
    Tiao(u8),
    /// 筒子（1-9）
    Tong(u8),
    /// 字牌（1-7：东南西北中发白）
    Zi(u8),
}

/// 反序列化的中间形式，与 `Tile` 的序列化格式相同
#[derive(serde::Deserialize)]
enum TileRepr {
    Wan(u8),
    Tiao(u8),
    Tong(u8),
    Zi(u8),
}

impl TryFrom<TileRepr> for Tile {
    type Error = ValidationError;

    fn try_from(repr: TileRepr) -> Result<Self, Self::Error> {
        match repr {
            TileRepr::Wan(rank) => Tile::new(Suit::Wan, rank),
            TileRepr::Tiao(rank) => Tile::new(Suit::Tiao, rank),
            TileRepr::Tong(rank) => Tile::new(Suit::Tong, rank),
            TileRepr::Zi(rank) => Tile::new(Suit::Zi, rank),
        }
    }
}

impl Tile {
    /// 总牌数：136 张
    pub const TOTAL_COUNT: usize = 136;

    /// 牌的种类数：34 种
    pub const KIND_COUNT: usize = 34;

    /// 每种牌的张数
    pub const COPIES: u8 = 4;

    pub const MIN_RANK: u8 = 1;
    pub const MAX_RANK: u8 = 9;
    pub const MAX_HONOR_RANK: u8 = 7;

    pub const EAST: u8 = 1;
    pub const SOUTH: u8 = 2;
    pub const WEST: u8 = 3;
    pub const NORTH: u8 = 4;
    /// 红中
    pub const ZHONG: u8 = 5;
    /// 发财
    pub const FA: u8 = 6;
    /// 白板
    pub const BAI: u8 = 7;

    /// 创建一张牌，验证点数范围
    pub fn new(suit: Suit, rank: u8) -> Result<Self, ValidationError> {
        if rank < Self::MIN_RANK || rank > suit.max_rank() {
            return Err(ValidationError::InvalidRank { suit, rank });
        }
        Ok(Self::from_parts(suit, rank))
    }

    /// 不做校验的构造，仅供内部在已知合法的点数上使用
    pub(crate) fn from_parts(suit: Suit, rank: u8) -> Self {
        match suit {
            Suit::Wan => Tile::Wan(rank),
            Suit::Tiao => Tile::Tiao(rank),
            Suit::Tong => Tile::Tong(rank),
            Suit::Zi => Tile::Zi(rank),
        }
    }

    /// 获取花色
    pub fn suit(&self) -> Suit {
        match self {
            Tile::Wan(_) => Suit::Wan,
            Tile::Tiao(_) => Suit::Tiao,
            Tile::Tong(_) => Suit::Tong,
            Tile::Zi(_) => Suit::Zi,
        }
    }

    /// 获取点数
    pub fn rank(&self) -> u8 {
        match self {
            Tile::Wan(r) | Tile::Tiao(r) | Tile::Tong(r) | Tile::Zi(r) => *r,
        }
    }

    /// 点数是否在花色范围内
    pub fn is_valid(&self) -> bool {
        self.rank() >= Self::MIN_RANK && self.rank() <= self.suit().max_rank()
    }

    /// 是否为数牌（万、条、筒）
    pub fn is_number(&self) -> bool {
        self.suit().is_number()
    }

    /// 是否为字牌
    pub fn is_honor(&self) -> bool {
        !self.is_number()
    }

    /// 是否为三元牌（中、发、白）
    pub fn is_dragon(&self) -> bool {
        matches!(self, Tile::Zi(r) if (Self::ZHONG..=Self::BAI).contains(r))
    }

    /// 是否为幺九牌（1、9 或字牌）
    pub fn is_terminal_or_honor(&self) -> bool {
        match self {
            Tile::Zi(_) => true,
            _ => self.rank() == 1 || self.rank() == 9,
        }
    }

    /// 同花色中点数偏移 `offset` 的牌；字牌、非法牌或越界返回 None
    pub fn offset(&self, offset: i8) -> Option<Tile> {
        if !self.is_number() || !self.is_valid() {
            return None;
        }
        let rank = self.rank() as i8 + offset;
        if rank < Self::MIN_RANK as i8 || rank > Self::MAX_RANK as i8 {
            return None;
        }
        Some(Self::from_parts(self.suit(), rank as u8))
    }

    /// 同花色的下一张（9 和字牌没有）
    #[inline]
    pub fn next_in_suit(&self) -> Option<Tile> {
        self.offset(1)
    }

    /// 转换为种类索引（0-33）
    ///
    /// - 万子：0-8
    /// - 条子：9-17
    /// - 筒子：18-26
    /// - 字牌：27-33
    ///
    /// 只对 `is_valid()` 的牌有意义
    pub fn kind_index(&self) -> usize {
        self.suit() as usize * 9 + (self.rank() - 1) as usize
    }

    /// 从种类索引创建牌
    pub fn from_kind_index(index: usize) -> Option<Self> {
        if index >= Self::KIND_COUNT {
            return None;
        }
        let suit = Suit::all()[index / 9];
        Some(Self::from_parts(suit, (index % 9) as u8 + 1))
    }

    /// 全部 34 种牌（按排序顺序）
    pub fn all_kinds() -> impl Iterator<Item = Tile> {
        (0..Self::KIND_COUNT).filter_map(Tile::from_kind_index)
    }

    /// 检查三张牌是否可以组成顺子
    pub fn can_form_sequence(&self, other1: &Tile, other2: &Tile) -> bool {
        if !self.is_number() || self.suit() != other1.suit() || self.suit() != other2.suit() {
            return false;
        }
        let mut ranks = [self.rank(), other1.rank(), other2.rank()];
        ranks.sort();
        ranks[0] + 1 == ranks[1] && ranks[1] + 1 == ranks[2]
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit().notation())
    }
}

impl FromStr for Tile {
    type Err = ValidationError;

    /// 解析 `5m` / `7s` / `3p` / `6z` 形式
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 || !bytes[0].is_ascii_digit() {
            return Err(ValidationError::InvalidNotation(s.to_string()));
        }
        let suit = Suit::from_notation(bytes[1] as char)
            .ok_or_else(|| ValidationError::InvalidNotation(s.to_string()))?;
        Tile::new(suit, bytes[0] - b'0')
    }
}

/// 解析紧凑写法的一组牌，例如 `"123m456s789p11z"`
pub fn parse_tiles(notation: &str) -> Result<Vec<Tile>, ValidationError> {
    let mut tiles = Vec::new();
    let mut pending: Vec<u8> = Vec::new();
    for c in notation.chars().filter(|c| !c.is_whitespace()) {
        if let Some(d) = c.to_digit(10) {
            pending.push(d as u8);
            continue;
        }
        let suit = Suit::from_notation(c).ok_or_else(|| ValidationError::InvalidNotation(notation.to_string()))?;
        if pending.is_empty() {
            return Err(ValidationError::InvalidNotation(notation.to_string()));
        }
        for rank in pending.drain(..) {
            tiles.push(Tile::new(suit, rank)?);
        }
    }
    if !pending.is_empty() {
        return Err(ValidationError::InvalidNotation(notation.to_string()));
    }
    Ok(tiles)
}

/// 花色枚举
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Suit {
    Wan = 0,
    Tiao = 1,
    Tong = 2,
    Zi = 3,
}

impl Suit {
    /// 所有花色
    pub fn all() -> [Suit; 4] {
        [Suit::Wan, Suit::Tiao, Suit::Tong, Suit::Zi]
    }

    /// 三种数牌花色
    pub fn numbers() -> [Suit; 3] {
        [Suit::Wan, Suit::Tiao, Suit::Tong]
    }

    pub fn is_number(&self) -> bool {
        *self != Suit::Zi
    }

    /// 该花色的最大点数
    pub fn max_rank(&self) -> u8 {
        if self.is_number() {
            Tile::MAX_RANK
        } else {
            Tile::MAX_HONOR_RANK
        }
    }

    fn notation(&self) -> char {
        match self {
            Suit::Wan => 'm',
            Suit::Tiao => 's',
            Suit::Tong => 'p',
            Suit::Zi => 'z',
        }
    }

    fn from_notation(c: char) -> Option<Suit> {
        match c {
            'm' => Some(Suit::Wan),
            's' => Some(Suit::Tiao),
            'p' => Some(Suit::Tong),
            'z' => Some(Suit::Zi),
            _ => None,
        }
    }
}
