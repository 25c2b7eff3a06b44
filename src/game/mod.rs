/// 规则引擎模块
///
/// 牌组与手牌状态、胡牌规则、吃碰杠判定、听牌分析、结算和出牌建议

pub mod constants;
pub mod meld;
pub mod hand_state;
pub mod rules;
pub mod chow;
pub mod pong;
pub mod kong;
pub mod action;
pub mod claim;
pub mod ready;
pub mod payment;
pub mod settlement;
pub mod scoring;
pub mod advisor;
