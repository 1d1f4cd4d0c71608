use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::feasibility::ScenarioInput;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 계산기 입력 기본값. "기본값으로 초기화" 시 이 값으로 돌아간다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioDefaults {
    /// 목표 연 ROI [%]
    pub target_annual_roi_pct: f64,
    /// 보유 기간 [일]
    pub holding_period_days: u32,
    /// 면적 [m²]
    pub floor_area_m2: f64,
    /// 리모델링 후 매도 단가 [€/m²]
    pub sale_price_per_m2_renovated: f64,
    /// 리모델링 전 매도 단가 [€/m²]
    pub sale_price_per_m2_unrenovated: f64,
    /// 특별 비용 [€]
    pub special_expenses: f64,
    /// 매도 수수료 [%]
    pub sale_commission_pct: f64,
    /// 브로커 수수료 [%]
    pub broker_fee_pct: f64,
    /// 대출 비율 [%]
    pub financed_pct: f64,
    /// 연 금리 [%]
    pub annual_interest_rate_pct: f64,
    /// 민감도 차트에 쓰는 예상 매입가 [€]
    pub estimated_purchase_price: f64,
}

impl Default for ScenarioDefaults {
    fn default() -> Self {
        Self {
            target_annual_roi_pct: 25.0,
            holding_period_days: 200,
            floor_area_m2: 80.0,
            sale_price_per_m2_renovated: 3000.0,
            sale_price_per_m2_unrenovated: 2500.0,
            special_expenses: 0.0,
            sale_commission_pct: 3.0,
            broker_fee_pct: 0.0,
            financed_pct: 75.0,
            annual_interest_rate_pct: 0.0,
            estimated_purchase_price: 200_000.0,
        }
    }
}

impl ScenarioDefaults {
    /// 목표 ROI 모드의 시나리오 입력을 만든다.
    pub fn to_input(&self) -> ScenarioInput {
        ScenarioInput {
            floor_area_m2: self.floor_area_m2,
            sale_price_per_m2_renovated: self.sale_price_per_m2_renovated,
            sale_price_per_m2_unrenovated: self.sale_price_per_m2_unrenovated,
            special_expenses: self.special_expenses,
            sale_commission_pct: self.sale_commission_pct,
            broker_fee_pct: self.broker_fee_pct,
            financed_pct: self.financed_pct,
            annual_interest_rate_pct: self.annual_interest_rate_pct,
            holding_period_days: self.holding_period_days,
            target_annual_roi_pct: self.target_annual_roi_pct,
            fixed_purchase_price: None,
            custom_renovation_cost_per_m2: None,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// UI 언어 코드 (auto/en/es/ko)
    pub language: String,
    pub defaults: ScenarioDefaults,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            defaults: ScenarioDefaults::default(),
            path: None,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 지정한 경로의 설정을 로드한다. 파일이 없으면 기본값을 그 경로에 기록한다.
pub fn load_or_create(path: &Path) -> Result<Config, ConfigError> {
    let mut cfg = if path.exists() {
        let content = fs::read_to_string(path)?;
        info!("설정 로드: {}", path.display());
        toml::from_str::<Config>(&content)?
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        cfg
    };
    cfg.path = Some(path.to_path_buf());
    Ok(cfg)
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    info!("설정 저장: {}", path.display());
    Ok(())
}

impl Config {
    /// 설정을 로드했던 경로(없으면 config.toml)에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        save_config(self, &path)
    }

    /// 입력 기본값을 초기값으로 되돌린다.
    pub fn reset_defaults(&mut self) {
        self.defaults = ScenarioDefaults::default();
    }
}
