use crate::game::advisor::AdvisorWeights;
pub use crate::game::scoring::ClosedWaitCheck;

/// 规则选项
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// 夹胡判定方式
    pub closed_wait: ClosedWaitCheck,
    /// AI 持有这么多牌组后不再吃碰（胡牌除外）
    pub max_open_melds: usize,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            closed_wait: ClosedWaitCheck::Presence,
            max_open_melds: 3,
        }
    }
}

/// 引擎配置
///
/// 所有字段都有默认值，JSON 中可以只写需要覆盖的部分：
///
/// ```
/// use changchun_engine::config::{EngineConfig, ClosedWaitCheck};
///
/// let config = EngineConfig::from_json_str(r#"{"rules": {"closed_wait": "Partition"}}"#).unwrap();
/// assert_eq!(config.rules.closed_wait, ClosedWaitCheck::Partition);
/// assert_eq!(config.rules.max_open_melds, 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rules: RuleConfig,
    pub weights: AdvisorWeights,
}

impl EngineConfig {
    /// 从 JSON 读取
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 序列化为 JSON
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
