//! 외부 렌더러(표, KPI 카드, 스프레드시트)가 소비하는 요약 테이블.
//! 서식(통화 기호, 천 단위 구분)은 렌더러 책임이다.

use serde::Serialize;

use crate::feasibility::{Evaluation, RenovationTier, ScenarioResult};

/// 등급 비교표의 한 행. ROI는 % 단위.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub tier: RenovationTier,
    pub sale_price_gross: f64,
    pub purchase_price: f64,
    pub total_investment: f64,
    pub gross_profit: f64,
    pub net_profit: f64,
    pub roi_unleveraged_annual_pct: f64,
    pub roi_leveraged_annual_pct: f64,
    pub viable: bool,
}

impl From<&ScenarioResult> for SummaryRow {
    fn from(r: &ScenarioResult) -> Self {
        Self {
            tier: r.tier,
            sale_price_gross: r.sale_price_gross,
            purchase_price: r.purchase_price,
            total_investment: r.total_investment,
            gross_profit: r.gross_profit,
            net_profit: r.net_profit,
            roi_unleveraged_annual_pct: r.roi_unleveraged_annual * 100.0,
            roi_leveraged_annual_pct: r.roi_leveraged_annual * 100.0,
            viable: r.viable,
        }
    }
}

pub fn summary(evaluation: &Evaluation) -> Vec<SummaryRow> {
    evaluation.values().map(SummaryRow::from).collect()
}

/// 이름이 붙은 결과 값 하나.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metric {
    pub key: &'static str,
    pub value: f64,
}

/// 결과의 모든 수치 필드를 고정 순서로 나열한다. `viable`은 1/0으로 표기.
pub fn metric_breakdown(r: &ScenarioResult) -> Vec<Metric> {
    let fields = [
        ("sale_price_gross", r.sale_price_gross),
        ("sale_commission", r.sale_commission),
        ("sale_price_net", r.sale_price_net),
        ("purchase_price", r.purchase_price),
        ("broker_fee", r.broker_fee),
        ("fixed_acquisition_costs", r.fixed_acquisition_costs),
        ("renovation_cost_base", r.renovation_cost_base),
        ("renovation_vat", r.renovation_vat),
        ("renovation_cost_total", r.renovation_cost_total),
        ("total_investment", r.total_investment),
        ("down_payment", r.down_payment),
        ("financed_amount", r.financed_amount),
        ("interest_cost", r.interest_cost),
        ("monthly_payment", r.monthly_payment),
        ("holding_payments", r.holding_payments),
        ("gross_profit", r.gross_profit),
        ("net_profit", r.net_profit),
        ("roi_unleveraged_abs", r.roi_unleveraged_abs),
        ("roi_unleveraged_annual", r.roi_unleveraged_annual),
        ("roi_leveraged_abs", r.roi_leveraged_abs),
        ("roi_leveraged_annual", r.roi_leveraged_annual),
        ("preferred_return", r.preferred_return),
        ("distrib_investor", r.distrib_investor),
        ("distrib_management", r.distrib_management),
        ("viable", if r.viable { 1.0 } else { 0.0 }),
    ];
    fields
        .into_iter()
        .map(|(key, value)| Metric { key, value })
        .collect()
}

/// 총 투자액 구성 항목과 비중.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Share {
    pub key: &'static str,
    pub amount: f64,
    /// 총 투자액 대비 비중 (0~1). 총 투자액이 0이면 0.
    pub fraction: f64,
}

pub fn investment_breakdown(r: &ScenarioResult) -> Vec<Share> {
    let total = r.total_investment;
    [
        ("purchase_price", r.purchase_price),
        ("fixed_acquisition_costs", r.fixed_acquisition_costs),
        ("renovation_cost_total", r.renovation_cost_total),
        ("broker_fee", r.broker_fee),
    ]
    .into_iter()
    .map(|(key, amount)| Share {
        key,
        amount,
        fraction: if total > 0.0 { amount / total } else { 0.0 },
    })
    .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("JSON 직렬화 오류: {0}")]
    Json(#[from] serde_json::Error),
}

/// 등급별 전체 결과를 JSON 객체로 직렬화한다. 키는 등급의 snake_case 이름.
pub fn to_json(evaluation: &Evaluation) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(evaluation)?)
}

pub fn summary_to_json(rows: &[SummaryRow]) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(rows)?)
}
