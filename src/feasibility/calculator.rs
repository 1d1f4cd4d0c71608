use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::constants::{
    with_vat, DAYS_PER_YEAR, NOTARY_FEE, PREFERRED_RETURN_RATE, REGISTRY_FEE, VAT_RATE,
    VIABILITY_THRESHOLD,
};
use super::financing::{financing, FinancingInput};
use super::tier::RenovationTier;
use super::waterfall::split_profit;

/// 한 매물에 대한 시나리오 입력 값. 모든 금액은 €, 비율은 % 단위.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    /// 전용 면적 [m²]
    pub floor_area_m2: f64,
    /// 리모델링 후 매도 단가 [€/m²]
    pub sale_price_per_m2_renovated: f64,
    /// 리모델링 없이 매도할 때의 단가 [€/m²]
    pub sale_price_per_m2_unrenovated: f64,
    /// 공증/등기 외 일회성 취득 비용 [€]
    pub special_expenses: f64,
    /// 매도 중개 수수료 [%, 매도가 기준, VAT 별도]
    pub sale_commission_pct: f64,
    /// 매물 소싱 브로커 수수료 [%, 매입가 기준, VAT 별도]
    pub broker_fee_pct: f64,
    /// 대출 비율 [%, 0~100]
    pub financed_pct: f64,
    /// 연 금리 [%]
    pub annual_interest_rate_pct: f64,
    /// 보유 기간 [일]
    pub holding_period_days: u32,
    /// 목표 연 ROI [%]. `fixed_purchase_price`가 없을 때 매입가 역산에 쓴다.
    pub target_annual_roi_pct: f64,
    /// 고정 매입가 [€]. 있으면 목표 ROI 역산을 하지 않는다.
    pub fixed_purchase_price: Option<f64>,
    /// 모든 등급에 공통 적용하는 리모델링 단가 [€/m²]. 민감도 분석용.
    pub custom_renovation_cost_per_m2: Option<f64>,
}

/// 매입가를 결정하는 방식.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PurchaseMode {
    /// 목표 연 ROI [%]를 만족하는 최대 매입가를 역산
    TargetRoi(f64),
    /// 주어진 매입가를 그대로 사용
    FixedPrice(f64),
}

/// 입력 검증 오류. 계산기 자체는 검증하지 않으므로 호출 측에서 사용한다.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{field} 값이 유한한 숫자가 아닙니다")]
    NotFinite { field: &'static str },
    #[error("{field} 값은 0 이상이어야 합니다 (입력: {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("면적은 0보다 커야 합니다 (입력: {0})")]
    NonPositiveArea(f64),
    #[error("대출 비율은 0~100% 범위여야 합니다 (입력: {0})")]
    FinancedOutOfRange(f64),
}

impl ScenarioInput {
    pub fn purchase_mode(&self) -> PurchaseMode {
        match self.fixed_purchase_price {
            Some(price) => PurchaseMode::FixedPrice(price),
            None => PurchaseMode::TargetRoi(self.target_annual_roi_pct),
        }
    }

    /// 보유 기간을 연 단위로 환산한다.
    pub fn holding_years(&self) -> f64 {
        f64::from(self.holding_period_days) / DAYS_PER_YEAR
    }

    /// 공증 + 등기 + 특별 비용. 등급과 무관하다.
    pub fn fixed_acquisition_costs(&self) -> f64 {
        NOTARY_FEE + REGISTRY_FEE + self.special_expenses
    }

    /// 사용자 입력 단계에서 쓰는 범위 검증.
    pub fn validate(&self) -> Result<(), InputError> {
        let non_negative = [
            ("sale_price_per_m2_renovated", self.sale_price_per_m2_renovated),
            ("sale_price_per_m2_unrenovated", self.sale_price_per_m2_unrenovated),
            ("special_expenses", self.special_expenses),
            ("sale_commission_pct", self.sale_commission_pct),
            ("broker_fee_pct", self.broker_fee_pct),
            ("annual_interest_rate_pct", self.annual_interest_rate_pct),
        ];
        if !self.floor_area_m2.is_finite() {
            return Err(InputError::NotFinite {
                field: "floor_area_m2",
            });
        }
        if self.floor_area_m2 <= 0.0 {
            return Err(InputError::NonPositiveArea(self.floor_area_m2));
        }
        for (field, value) in non_negative {
            if !value.is_finite() {
                return Err(InputError::NotFinite { field });
            }
            if value < 0.0 {
                return Err(InputError::Negative { field, value });
            }
        }
        if !self.target_annual_roi_pct.is_finite() {
            return Err(InputError::NotFinite {
                field: "target_annual_roi_pct",
            });
        }
        if !(0.0..=100.0).contains(&self.financed_pct) {
            return Err(InputError::FinancedOutOfRange(self.financed_pct));
        }
        if let Some(price) = self.fixed_purchase_price {
            if !price.is_finite() {
                return Err(InputError::NotFinite {
                    field: "fixed_purchase_price",
                });
            }
            if price < 0.0 {
                return Err(InputError::Negative {
                    field: "fixed_purchase_price",
                    value: price,
                });
            }
        }
        if let Some(cost) = self.custom_renovation_cost_per_m2 {
            if !cost.is_finite() {
                return Err(InputError::NotFinite {
                    field: "custom_renovation_cost_per_m2",
                });
            }
            if cost < 0.0 {
                return Err(InputError::Negative {
                    field: "custom_renovation_cost_per_m2",
                    value: cost,
                });
            }
        }
        Ok(())
    }
}

/// 등급 하나에 대한 계산 결과. 모든 비율은 소수(0.25 = 25%).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub tier: RenovationTier,
    /// 매도가 (수수료 차감 전)
    pub sale_price_gross: f64,
    /// 매도 수수료 (VAT 포함)
    pub sale_commission: f64,
    /// 순 매도 대금
    pub sale_price_net: f64,
    /// 결정된 매입가 (목표 ROI 모드에서는 최대 매입가)
    pub purchase_price: f64,
    /// 브로커 수수료 (VAT 포함)
    pub broker_fee: f64,
    /// 공증 + 등기 + 특별 비용
    pub fixed_acquisition_costs: f64,
    pub renovation_cost_base: f64,
    pub renovation_vat: f64,
    pub renovation_cost_total: f64,
    pub total_investment: f64,
    pub financed_amount: f64,
    pub down_payment: f64,
    /// 보유 기간 이자 (단리)
    pub interest_cost: f64,
    pub monthly_payment: f64,
    pub holding_payments: f64,
    /// 이자 차감 전 이익
    pub gross_profit: f64,
    /// 이자 차감 후 이익
    pub net_profit: f64,
    pub roi_unleveraged_abs: f64,
    pub roi_unleveraged_annual: f64,
    pub roi_leveraged_abs: f64,
    pub roi_leveraged_annual: f64,
    /// 우선 수익 기준액 (총 투자액의 8%)
    pub preferred_return: f64,
    pub distrib_investor: f64,
    pub distrib_management: f64,
    /// 대출 비율이 0보다 큰 시나리오인지. 타당성 판정 ROI를 고른다.
    pub leveraged: bool,
    pub viable: bool,
}

impl ScenarioResult {
    /// 타당성 판정에 쓰인 연환산 ROI.
    pub fn applicable_annual_roi(&self) -> f64 {
        applicable_roi(
            self.leveraged,
            self.roi_leveraged_annual,
            self.roi_unleveraged_annual,
        )
    }
}

/// 등급별 결과. 키 순서는 `RenovationTier` 선언 순서를 따른다.
pub type Evaluation = BTreeMap<RenovationTier, ScenarioResult>;

fn applicable_roi(leveraged: bool, leveraged_roi: f64, unleveraged_roi: f64) -> f64 {
    if leveraged {
        leveraged_roi
    } else {
        unleveraged_roi
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// 목표 ROI를 만족하는 최대 매입가를 역산한다. 음수는 0으로 자른다.
fn solve_purchase_price(
    sale_net: f64,
    years: f64,
    target_roi_pct: f64,
    broker_factor: f64,
    committed_costs: f64,
) -> f64 {
    let required_return = (target_roi_pct / 100.0) * years;
    let investment_ceiling = ratio(sale_net, 1.0 + required_return);
    let price = ratio(investment_ceiling - committed_costs, 1.0 + broker_factor);
    if price < 0.0 {
        warn!(
            "목표 ROI {target_roi_pct}%를 만족하는 매입가가 음수({price:.2})여서 0으로 제한합니다"
        );
        0.0
    } else {
        price
    }
}

/// 지정한 등급 하나에 대해 타당성을 계산한다.
pub fn evaluate_tier(input: &ScenarioInput, tier: RenovationTier) -> ScenarioResult {
    let years = input.holding_years();
    let area = input.floor_area_m2;

    let cost_per_m2 = input
        .custom_renovation_cost_per_m2
        .unwrap_or_else(|| tier.cost_per_m2());
    let renovation_cost_base = cost_per_m2 * area;
    let renovation_vat = renovation_cost_base * VAT_RATE;
    let renovation_cost_total = renovation_cost_base + renovation_vat;

    let price_per_m2 = if tier.is_renovated() {
        input.sale_price_per_m2_renovated
    } else {
        input.sale_price_per_m2_unrenovated
    };
    let sale_price_gross = price_per_m2 * area;
    let sale_commission = with_vat(sale_price_gross * input.sale_commission_pct / 100.0);
    let sale_price_net = sale_price_gross - sale_commission;

    let fixed_acquisition_costs = input.fixed_acquisition_costs();
    let broker_factor = with_vat(input.broker_fee_pct / 100.0);

    let purchase_price = match input.purchase_mode() {
        PurchaseMode::FixedPrice(price) => price,
        PurchaseMode::TargetRoi(target) => solve_purchase_price(
            sale_price_net,
            years,
            target,
            broker_factor,
            fixed_acquisition_costs + renovation_cost_total,
        ),
    };
    let broker_fee = purchase_price * broker_factor;
    let total_investment =
        purchase_price + fixed_acquisition_costs + renovation_cost_total + broker_fee;

    let gross_profit = sale_price_net - total_investment;
    let roi_unleveraged_abs = ratio(gross_profit, total_investment);
    let roi_unleveraged_annual = ratio(roi_unleveraged_abs, years);

    let loan = financing(&FinancingInput {
        purchase_price,
        total_investment,
        financed_pct: input.financed_pct,
        annual_interest_rate_pct: input.annual_interest_rate_pct,
        holding_period_days: input.holding_period_days,
    });

    let net_profit = gross_profit - loan.interest_cost;
    let roi_leveraged_abs = ratio(net_profit, loan.down_payment);
    let roi_leveraged_annual = ratio(roi_leveraged_abs, years);

    let preferred_return = PREFERRED_RETURN_RATE * total_investment;
    let split = split_profit(net_profit, preferred_return);

    let leveraged = input.financed_pct > 0.0;
    let roi = applicable_roi(leveraged, roi_leveraged_annual, roi_unleveraged_annual);
    let viable = roi >= VIABILITY_THRESHOLD;

    debug!(
        "{tier}: 매입가 {purchase_price:.2}, 총투자 {total_investment:.2}, 순이익 {net_profit:.2}, ROI {roi:.4}"
    );

    ScenarioResult {
        tier,
        sale_price_gross,
        sale_commission,
        sale_price_net,
        purchase_price,
        broker_fee,
        fixed_acquisition_costs,
        renovation_cost_base,
        renovation_vat,
        renovation_cost_total,
        total_investment,
        financed_amount: loan.financed_amount,
        down_payment: loan.down_payment,
        interest_cost: loan.interest_cost,
        monthly_payment: loan.monthly_payment,
        holding_payments: loan.holding_payments,
        gross_profit,
        net_profit,
        roi_unleveraged_abs,
        roi_unleveraged_annual,
        roi_leveraged_abs,
        roi_leveraged_annual,
        preferred_return,
        distrib_investor: split.investor,
        distrib_management: split.management,
        leveraged,
        viable,
    }
}

/// 네 가지 리모델링 등급 전체를 계산한다.
pub fn evaluate(input: &ScenarioInput) -> Evaluation {
    RenovationTier::ALL
        .iter()
        .map(|&tier| (tier, evaluate_tier(input, tier)))
        .collect()
}
