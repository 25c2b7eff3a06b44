use crate::error::ValidationError;
use crate::tile::Tile;
use smallvec::SmallVec;

/// 牌组类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum MeldKind {
    /// 吃（顺子，只能吃上家）
    Sequence,
    /// 碰（刻子）
    Triplet,
    /// 明杠（别人打出第四张）
    ExposedQuad,
    /// 补杠（已碰的刻子摸到第四张）
    AddedQuad,
    /// 暗杠（手中四张）
    ConcealedQuad,
}

impl MeldKind {
    /// 该类型应有的实际张数
    pub fn tile_count(&self) -> usize {
        if self.is_quad() {
            4
        } else {
            3
        }
    }

    /// 是否为杠
    pub fn is_quad(&self) -> bool {
        matches!(self, MeldKind::ExposedQuad | MeldKind::AddedQuad | MeldKind::ConcealedQuad)
    }

    /// 是否为刻子类（碰或杠），满足"至少一个刻子"的胡牌条件
    pub fn is_triplet_like(&self) -> bool {
        !matches!(self, MeldKind::Sequence)
    }

    /// 是否为明牌（除暗杠以外都算明牌，会破坏门清）
    pub fn is_exposed(&self) -> bool {
        !matches!(self, MeldKind::ConcealedQuad)
    }
}

/// 碰/吃/杠形成的牌组
///
/// 构造时校验并排序，`anchor()` 为最小的一张；反序列化同样经过 `Meld::new`
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "MeldRepr")]
pub struct Meld {
    kind: MeldKind,
    tiles: SmallVec<[Tile; 4]>,
    /// 供牌者座位（暗杠为 None）
    source_seat: Option<u8>,
}

#[derive(serde::Deserialize)]
struct MeldRepr {
    kind: MeldKind,
    tiles: Vec<Tile>,
    source_seat: Option<u8>,
}

impl TryFrom<MeldRepr> for Meld {
    type Error = ValidationError;

    fn try_from(repr: MeldRepr) -> Result<Self, Self::Error> {
        Meld::new(repr.kind, &repr.tiles, repr.source_seat)
    }
}

impl Meld {
    /// 创建牌组并校验张数与形状
    pub fn new(kind: MeldKind, tiles: &[Tile], source_seat: Option<u8>) -> Result<Self, ValidationError> {
        if tiles.len() != kind.tile_count() {
            return Err(ValidationError::InvalidMeldSize { kind, tile_count: tiles.len() });
        }
        for tile in tiles {
            if !tile.is_valid() {
                return Err(ValidationError::InvalidRank { suit: tile.suit(), rank: tile.rank() });
            }
        }
        if let Some(seat) = source_seat {
            if seat >= super::constants::NUM_PLAYERS {
                return Err(ValidationError::InvalidSeat(seat));
            }
            if kind == MeldKind::ConcealedQuad {
                return Err(ValidationError::ConcealedQuadWithSource { seat });
            }
        }

        let mut sorted: SmallVec<[Tile; 4]> = tiles.iter().copied().collect();
        sorted.sort();

        let shape_ok = match kind {
            MeldKind::Sequence => sorted[0].can_form_sequence(&sorted[1], &sorted[2]),
            _ => sorted.iter().all(|t| *t == sorted[0]),
        };
        if !shape_ok {
            return Err(ValidationError::InvalidMeldShape { kind });
        }

        Ok(Self { kind, tiles: sorted, source_seat })
    }

    /// 以最小牌创建顺子
    pub fn sequence(low: Tile, source_seat: Option<u8>) -> Result<Self, ValidationError> {
        let mid = low.offset(1).ok_or(ValidationError::InvalidMeldShape { kind: MeldKind::Sequence })?;
        let high = low.offset(2).ok_or(ValidationError::InvalidMeldShape { kind: MeldKind::Sequence })?;
        Self::new(MeldKind::Sequence, &[low, mid, high], source_seat)
    }

    /// 碰
    pub fn triplet(tile: Tile, source_seat: Option<u8>) -> Result<Self, ValidationError> {
        Self::new(MeldKind::Triplet, &[tile; 3], source_seat)
    }

    /// 明杠
    pub fn exposed_quad(tile: Tile, source_seat: Option<u8>) -> Result<Self, ValidationError> {
        Self::new(MeldKind::ExposedQuad, &[tile; 4], source_seat)
    }

    /// 暗杠
    pub fn concealed_quad(tile: Tile) -> Result<Self, ValidationError> {
        Self::new(MeldKind::ConcealedQuad, &[tile; 4], None)
    }

    /// 把碰升级为补杠，保留原供牌者
    pub fn upgraded_to_quad(&self) -> Result<Self, ValidationError> {
        if self.kind != MeldKind::Triplet {
            return Err(ValidationError::InvalidMeldShape { kind: MeldKind::AddedQuad });
        }
        Self::new(MeldKind::AddedQuad, &[self.anchor(); 4], self.source_seat)
    }

    pub fn kind(&self) -> MeldKind {
        self.kind
    }

    /// 排序后的牌
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn source_seat(&self) -> Option<u8> {
        self.source_seat
    }

    /// 锚牌：最小的一张，用于牌组排序显示
    pub fn anchor(&self) -> Tile {
        self.tiles[0]
    }

    /// 计算牌数时按 3 张计（杠也算 3 张）
    pub fn logical_size(&self) -> usize {
        3
    }

    /// 是否包含某种牌
    pub fn contains(&self, tile: Tile) -> bool {
        self.tiles.contains(&tile)
    }
}
