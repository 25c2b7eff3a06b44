use crate::tile::Tile;

/// 针对别人打出的牌可以声明的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// 点炮胡
    Win,
    /// 明杠
    ExposedQuad,
    /// 碰（刻子）
    Triplet,
    /// 吃（顺子），`low` 为顺子最小牌
    Sequence { low: Tile },
}

impl Action {
    /// 优先级：胡 > 杠 = 碰 > 吃
    pub fn priority(&self) -> u8 {
        match self {
            Action::Win => 3,
            Action::ExposedQuad | Action::Triplet => 2,
            Action::Sequence { .. } => 1,
        }
    }

    /// 是否形成牌组
    pub fn forms_meld(&self) -> bool {
        !matches!(self, Action::Win)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        let chow = Action::Sequence { low: Tile::Wan(1) };
        assert!(Action::Win.priority() > Action::Triplet.priority());
        assert_eq!(Action::Triplet.priority(), Action::ExposedQuad.priority());
        assert!(Action::Triplet.priority() > chow.priority());
        assert!(!Action::Win.forms_meld());
        assert!(chow.forms_meld());
    }
}
