use phf::phf_map;
use serde::{Deserialize, Serialize};

/// 实体标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityLabel {
    /// 人物（人名、称谓）
    #[serde(rename = "人物")]
    Person,
    /// 地名（国名、地方名）
    #[serde(rename = "地名")]
    Place,
    /// 时间（年代、季节、时辰）
    #[serde(rename = "时间")]
    Time,
    /// 器物（工具、物品、建筑）
    #[serde(rename = "器物")]
    Artifact,
    /// 概念（抽象概念、思想、制度）
    #[serde(rename = "概念")]
    Concept,
}

/// 标签名 → 标签，英文别名归一到同一标签
static LABELS: phf::Map<&'static str, EntityLabel> = phf_map! {
    "人物" => EntityLabel::Person,
    "地名" => EntityLabel::Place,
    "时间" => EntityLabel::Time,
    "器物" => EntityLabel::Artifact,
    "概念" => EntityLabel::Concept,
    "person" => EntityLabel::Person,
    "place" => EntityLabel::Place,
    "time" => EntityLabel::Time,
    "artifact" => EntityLabel::Artifact,
    "concept" => EntityLabel::Concept,
};

impl EntityLabel {
    pub const ALL: [EntityLabel; 5] = [
        EntityLabel::Person,
        EntityLabel::Place,
        EntityLabel::Time,
        EntityLabel::Artifact,
        EntityLabel::Concept,
    ];

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            EntityLabel::Person => "人物",
            EntityLabel::Place => "地名",
            EntityLabel::Time => "时间",
            EntityLabel::Artifact => "器物",
            EntityLabel::Concept => "概念",
        }
    }

    /// 从字符串解析标签（精确匹配，不在标签集合内返回 None）
    pub fn parse(s: &str) -> Option<Self> {
        LABELS.get(s).copied()
    }
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_localized_names() {
        for label in EntityLabel::ALL {
            assert_eq!(EntityLabel::parse(label.name()), Some(label));
        }
    }

    #[test]
    fn test_parse_english_alias() {
        assert_eq!(EntityLabel::parse("person"), Some(EntityLabel::Person));
        assert_eq!(EntityLabel::parse("artifact"), Some(EntityLabel::Artifact));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(EntityLabel::parse("unknown"), None);
        assert_eq!(EntityLabel::parse("人名"), None);
        assert_eq!(EntityLabel::parse(" 人物"), None);
        assert_eq!(EntityLabel::parse(""), None);
    }

    #[test]
    fn test_serializes_as_localized_name() {
        let json = serde_json::to_string(&EntityLabel::Place).unwrap();
        assert_eq!(json, "\"地名\"");
    }
}
