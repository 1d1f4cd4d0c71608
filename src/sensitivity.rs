//! 입력 변수 하나를 일정 구간에서 바꿔가며 결과 지표의 변화를 계산한다.
//! 결과 점열은 외부 차트 렌더러가 소비한다.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::feasibility::{
    evaluate_tier, InputError, RenovationTier, ScenarioInput, ScenarioResult,
};

/// 구간 끝 포함 판정 허용 오차 (step 대비 비율)
const RANGE_EPSILON: f64 = 1e-9;

/// 한 번의 스윕에서 허용하는 최대 점 개수
pub const MAX_SWEEP_POINTS: usize = 100_000;

/// 스윕 대상 변수.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    /// 리모델링 후 매도 단가 [€/m²]
    SalePricePerM2Renovated,
    /// 리모델링 단가 [€/m²]. 시나리오 공통 단가로 덮어쓴다.
    RenovationCostPerM2,
    /// 보유 기간 [일]. 반올림 후 0 미만은 0.
    HoldingDays,
}

impl SweepParameter {
    /// 기준 입력에 스윕 값을 적용한 사본을 만든다.
    pub fn apply(&self, base: &ScenarioInput, value: f64) -> ScenarioInput {
        let mut input = base.clone();
        match self {
            SweepParameter::SalePricePerM2Renovated => input.sale_price_per_m2_renovated = value,
            SweepParameter::RenovationCostPerM2 => {
                input.custom_renovation_cost_per_m2 = Some(value)
            }
            SweepParameter::HoldingDays => {
                input.holding_period_days = value.round().max(0.0) as u32
            }
        }
        input
    }
}

/// 점마다 추출할 결과 지표.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepMetric {
    UnleveragedAnnualRoi,
    LeveragedAnnualRoi,
    GrossProfit,
    NetProfit,
    PurchasePrice,
}

impl SweepMetric {
    pub fn extract(&self, result: &ScenarioResult) -> f64 {
        match self {
            SweepMetric::UnleveragedAnnualRoi => result.roi_unleveraged_annual,
            SweepMetric::LeveragedAnnualRoi => result.roi_leveraged_annual,
            SweepMetric::GrossProfit => result.gross_profit,
            SweepMetric::NetProfit => result.net_profit,
            SweepMetric::PurchasePrice => result.purchase_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SweepError {
    #[error("스윕 간격은 0보다 큰 유한한 값이어야 합니다 (입력: {0})")]
    InvalidStep(f64),
    #[error("스윕 구간 경계가 유한한 값이 아닙니다")]
    NonFiniteBound,
    #[error("스윕 점 개수가 최대 {max}개를 넘습니다")]
    TooManyPoints { max: usize },
}

/// 끝점을 포함하는 등간격 구간. `new`로만 만들 수 있다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepRange {
    start: f64,
    end: f64,
    step: f64,
}

impl SweepRange {
    pub fn new(start: f64, end: f64, step: f64) -> Result<Self, SweepError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(SweepError::NonFiniteBound);
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(SweepError::InvalidStep(step));
        }
        let range = Self { start, end, step };
        match range.point_count() {
            Some(_) => Ok(range),
            None => Err(SweepError::TooManyPoints {
                max: MAX_SWEEP_POINTS,
            }),
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// 점 개수를 f64로 계산한다. 유한하지 않거나 상한을 넘으면 None.
    fn point_count(&self) -> Option<usize> {
        if self.end < self.start {
            return Some(0);
        }
        let count = ((self.end - self.start) / self.step + RANGE_EPSILON).floor() + 1.0;
        if count.is_finite() && count <= MAX_SWEEP_POINTS as f64 {
            Some(count as usize)
        } else {
            None
        }
    }

    /// 구간에 포함되는 점의 개수. `start > end`이면 0, 최대 `MAX_SWEEP_POINTS`.
    pub fn len(&self) -> usize {
        self.point_count().unwrap_or(MAX_SWEEP_POINTS)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 구간의 값을 차례로 돌려준다. 누적 오차가 없도록 `start + i*step`으로 계산한다.
    pub fn values(&self) -> SweepValues {
        SweepValues {
            range: *self,
            index: 0,
            len: self.len(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SweepValues {
    range: SweepRange,
    index: usize,
    len: usize,
}

impl Iterator for SweepValues {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            return None;
        }
        let value = self.range.start + self.index as f64 * self.range.step;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.len.saturating_sub(self.index);
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for SweepValues {}

/// 스윕 결과 한 점.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub value: f64,
    pub metric_value: f64,
}

/// 민감도 분석 정의. `iter()`를 다시 호출하면 처음부터 재시작한다.
#[derive(Debug, Clone)]
pub struct Sweep {
    pub base: ScenarioInput,
    pub parameter: SweepParameter,
    pub range: SweepRange,
    pub tier: RenovationTier,
    pub metric: SweepMetric,
}

impl Sweep {
    pub fn iter(&self) -> SweepIter<'_> {
        debug!(
            "스윕 시작: {:?} {}..={} step {} ({}개 점)",
            self.parameter,
            self.range.start,
            self.range.end,
            self.range.step,
            self.range.len()
        );
        SweepIter {
            sweep: self,
            values: self.range.values(),
        }
    }

    pub fn run(&self) -> Vec<SweepPoint> {
        self.iter().collect()
    }
}

pub struct SweepIter<'a> {
    sweep: &'a Sweep,
    values: SweepValues,
}

impl Iterator for SweepIter<'_> {
    type Item = SweepPoint;

    fn next(&mut self) -> Option<SweepPoint> {
        let value = self.values.next()?;
        let input = self.sweep.parameter.apply(&self.sweep.base, value);
        let result = evaluate_tier(&input, self.sweep.tier);
        Some(SweepPoint {
            value,
            metric_value: self.sweep.metric.extract(&result),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

/// 기본 차트 세트. 모두 고정 매입가 모드의 LightTouch 등급을 기준으로 한다.
pub mod presets {
    use super::*;

    /// 레버리지 차트에서 가정하는 대출 비율 [%]
    pub const LEVERAGED_FINANCED_PCT: f64 = 75.0;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Preset {
        /// 연 ROI vs 매도 단가 (1000~5000 €/m², 100 간격)
        SalePriceRoi,
        /// 이익 vs 리모델링 단가 (0~1500 €/m², 50 간격)
        RenovationCostProfit,
        /// 이익 vs 보유 기간 (10~365일, 10일 간격)
        HoldingDaysProfit,
    }

    impl Preset {
        pub fn build(&self, base: &ScenarioInput, purchase_price: f64, leveraged: bool) -> Sweep {
            match self {
                Preset::SalePriceRoi => sale_price_roi(base, purchase_price, leveraged),
                Preset::RenovationCostProfit => {
                    renovation_cost_profit(base, purchase_price, leveraged)
                }
                Preset::HoldingDaysProfit => holding_days_profit(base, purchase_price, leveraged),
            }
        }

        /// 기준 입력과 매입가를 검증한 뒤 스윕을 만든다.
        pub fn try_build(
            &self,
            base: &ScenarioInput,
            purchase_price: f64,
            leveraged: bool,
        ) -> Result<Sweep, InputError> {
            base.validate()?;
            let sweep = self.build(base, purchase_price, leveraged);
            sweep.base.validate()?;
            Ok(sweep)
        }
    }

    fn fixed_price_base(
        base: &ScenarioInput,
        purchase_price: f64,
        leveraged: bool,
        keep_interest: bool,
    ) -> ScenarioInput {
        let mut input = base.clone();
        input.fixed_purchase_price = Some(purchase_price);
        input.custom_renovation_cost_per_m2 = None;
        if leveraged {
            input.financed_pct = LEVERAGED_FINANCED_PCT;
            if !keep_interest {
                input.annual_interest_rate_pct = 0.0;
            }
        } else {
            input.financed_pct = 0.0;
            input.annual_interest_rate_pct = 0.0;
        }
        input
    }

    fn profit_metric(leveraged: bool) -> SweepMetric {
        if leveraged {
            SweepMetric::NetProfit
        } else {
            SweepMetric::GrossProfit
        }
    }

    fn sweep(
        base: ScenarioInput,
        parameter: SweepParameter,
        range: SweepRange,
        metric: SweepMetric,
    ) -> Sweep {
        Sweep {
            base,
            parameter,
            range,
            tier: RenovationTier::LightTouch,
            metric,
        }
    }

    pub fn sale_price_roi(base: &ScenarioInput, purchase_price: f64, leveraged: bool) -> Sweep {
        let metric = if leveraged {
            SweepMetric::LeveragedAnnualRoi
        } else {
            SweepMetric::UnleveragedAnnualRoi
        };
        sweep(
            fixed_price_base(base, purchase_price, leveraged, false),
            SweepParameter::SalePricePerM2Renovated,
            SweepRange {
                start: 1000.0,
                end: 5000.0,
                step: 100.0,
            },
            metric,
        )
    }

    pub fn renovation_cost_profit(
        base: &ScenarioInput,
        purchase_price: f64,
        leveraged: bool,
    ) -> Sweep {
        sweep(
            fixed_price_base(base, purchase_price, leveraged, false),
            SweepParameter::RenovationCostPerM2,
            SweepRange {
                start: 0.0,
                end: 1500.0,
                step: 50.0,
            },
            profit_metric(leveraged),
        )
    }

    pub fn holding_days_profit(base: &ScenarioInput, purchase_price: f64, leveraged: bool) -> Sweep {
        sweep(
            fixed_price_base(base, purchase_price, leveraged, true),
            SweepParameter::HoldingDays,
            SweepRange {
                start: 10.0,
                end: 365.0,
                step: 10.0,
            },
            profit_metric(leveraged),
        )
    }
}
