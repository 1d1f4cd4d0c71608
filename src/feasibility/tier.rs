use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 리모델링 전략. 선언 순서가 곧 평가/출력 순서다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenovationTier {
    /// 리모델링 없이 재매각
    NoRenovation,
    /// 도배/도장 수준의 가벼운 손질
    LightTouch,
    /// 저가 전면 리모델링
    BudgetFullRenovation,
    /// 일반 전면 리모델링
    StandardFullRenovation,
}

impl RenovationTier {
    pub const ALL: [RenovationTier; 4] = [
        RenovationTier::NoRenovation,
        RenovationTier::LightTouch,
        RenovationTier::BudgetFullRenovation,
        RenovationTier::StandardFullRenovation,
    ];

    /// 기본 리모델링 단가 [€/m², VAT 별도]
    pub fn cost_per_m2(&self) -> f64 {
        match self {
            RenovationTier::NoRenovation => 0.0,
            RenovationTier::LightTouch => 500.0,
            RenovationTier::BudgetFullRenovation => 750.0,
            RenovationTier::StandardFullRenovation => 1000.0,
        }
    }

    /// 리모델링 후 매도 단가를 적용하는지 여부.
    pub fn is_renovated(&self) -> bool {
        !matches!(self, RenovationTier::NoRenovation)
    }

    /// CLI 인자와 JSON 키에 쓰는 고정 문자열.
    pub fn key(&self) -> &'static str {
        match self {
            RenovationTier::NoRenovation => "no_renovation",
            RenovationTier::LightTouch => "light_touch",
            RenovationTier::BudgetFullRenovation => "budget_full_renovation",
            RenovationTier::StandardFullRenovation => "standard_full_renovation",
        }
    }
}

impl fmt::Display for RenovationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("알 수 없는 리모델링 등급: {0}")]
pub struct UnknownTier(pub String);

impl FromStr for RenovationTier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_lowercase().replace('-', "_");
        match norm.as_str() {
            "no_renovation" | "none" | "0" => Ok(RenovationTier::NoRenovation),
            "light_touch" | "light" | "1" => Ok(RenovationTier::LightTouch),
            "budget_full_renovation" | "budget" | "2" => Ok(RenovationTier::BudgetFullRenovation),
            "standard_full_renovation" | "standard" | "3" => {
                Ok(RenovationTier::StandardFullRenovation)
            }
            _ => Err(UnknownTier(s.to_string())),
        }
    }
}
