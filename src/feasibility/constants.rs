//! 타당성 계산에 쓰이는 정책 상수.

/// 부가가치세율 (리모델링 비용, 매도 수수료, 중개 수수료에 적용)
pub const VAT_RATE: f64 = 0.21;

/// 공증 비용 [€, 고정]
pub const NOTARY_FEE: f64 = 800.0;

/// 등기 비용 [€, 고정]
pub const REGISTRY_FEE: f64 = 200.0;

/// 대출 상환 기간 [개월]
pub const AMORTIZATION_MONTHS: u32 = 300;

pub const DAYS_PER_YEAR: f64 = 365.0;

/// 보유 기간 중 납입 횟수 환산용 월 일수
pub const DAYS_PER_MONTH: f64 = 30.0;

/// 우선 수익률 (총 투자액 기준)
pub const PREFERRED_RETURN_RATE: f64 = 0.08;

/// 우선 수익 초과분 중 투자자 몫. 나머지는 운용사 몫.
pub const INVESTOR_EXCESS_SHARE: f64 = 0.75;

/// 연환산 ROI 기준 사업 타당성 임계값
pub const VIABILITY_THRESHOLD: f64 = 0.20;

/// VAT 포함 계수 (1 + VAT)
pub fn with_vat(amount: f64) -> f64 {
    amount * (1.0 + VAT_RATE)
}
