use serde::Serialize;

use super::constants::INVESTOR_EXCESS_SHARE;

/// 투자자/운용사 간 이익 배분 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfitSplit {
    pub investor: f64,
    pub management: f64,
}

/// 우선 수익(preferred return)까지는 투자자에게 전액, 초과분은 75/25로 나눈다.
///
/// 손실(0 이하)은 투자자가 그대로 부담하고 운용사 몫은 0이다.
pub fn split_profit(net_profit: f64, preferred_threshold: f64) -> ProfitSplit {
    if net_profit <= 0.0 {
        return ProfitSplit {
            investor: net_profit,
            management: 0.0,
        };
    }
    if net_profit <= preferred_threshold {
        return ProfitSplit {
            investor: net_profit,
            management: 0.0,
        };
    }
    let excess = net_profit - preferred_threshold;
    let investor = preferred_threshold + INVESTOR_EXCESS_SHARE * excess;
    ProfitSplit {
        investor,
        management: net_profit - investor,
    }
}
