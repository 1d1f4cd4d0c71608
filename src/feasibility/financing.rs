use super::constants::{AMORTIZATION_MONTHS, DAYS_PER_MONTH, DAYS_PER_YEAR};

/// 원리금 균등 상환 월 납입액. `annual_rate`는 소수(0.035 = 3.5%).
///
/// 금리가 0이면 원금을 기간으로 나누고, 기간이 0이면 0을 반환한다.
pub fn monthly_payment(annual_rate: f64, months: u32, principal: f64) -> f64 {
    if months == 0 {
        return 0.0;
    }
    let n = f64::from(months);
    if annual_rate == 0.0 {
        return principal / n;
    }
    let monthly_rate = annual_rate / 12.0;
    let denom = 1.0 - (1.0 + monthly_rate).powf(-n);
    if denom == 0.0 {
        0.0
    } else {
        monthly_rate * principal / denom
    }
}

/// 레버리지 계산 입력.
#[derive(Debug, Clone)]
pub struct FinancingInput {
    /// 매입가 [€]
    pub purchase_price: f64,
    /// 총 투자액 [€]
    pub total_investment: f64,
    /// 대출 비율 [%, 매입가 기준]
    pub financed_pct: f64,
    /// 연 금리 [%]
    pub annual_interest_rate_pct: f64,
    /// 보유 기간 [일]
    pub holding_period_days: u32,
}

#[derive(Debug, Clone, Default)]
pub struct FinancingResult {
    /// 대출 금액 [€]
    pub financed_amount: f64,
    /// 자기자본 투입액 [€]
    pub down_payment: f64,
    /// 보유 기간 이자 (단리 근사) [€]
    pub interest_cost: f64,
    /// 300개월 상환 기준 월 납입액 [€]
    pub monthly_payment: f64,
    /// 보유 기간 동안의 납입 총액 [€]
    pub holding_payments: f64,
}

/// 대출 금액, 자기자본, 보유 기간 이자를 계산한다.
pub fn financing(input: &FinancingInput) -> FinancingResult {
    if input.financed_pct <= 0.0 {
        return FinancingResult {
            down_payment: input.total_investment,
            ..FinancingResult::default()
        };
    }
    let years = f64::from(input.holding_period_days) / DAYS_PER_YEAR;
    let annual_rate = input.annual_interest_rate_pct / 100.0;
    let financed_amount = input.purchase_price * input.financed_pct / 100.0;
    let monthly = if financed_amount > 0.0 {
        monthly_payment(annual_rate, AMORTIZATION_MONTHS, financed_amount)
    } else {
        0.0
    };
    FinancingResult {
        financed_amount,
        down_payment: input.total_investment - financed_amount,
        interest_cost: financed_amount * annual_rate * years,
        monthly_payment: monthly,
        holding_payments: monthly * (f64::from(input.holding_period_days) / DAYS_PER_MONTH),
    }
}
