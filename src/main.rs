//! 타당성 계산기 CLI. 서브커맨드가 없으면 대화형 메뉴를 실행한다.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use feasibility_toolbox::{
    app, config,
    feasibility::{self, RenovationTier, ScenarioInput},
    i18n::{self, Translator},
    report,
    sensitivity::{presets::Preset, Sweep, SweepMetric, SweepParameter, SweepRange},
    ui_cli,
};

#[derive(Parser)]
#[command(name = "feasibility_toolbox")]
#[command(about = "Fix-and-flip feasibility calculator")]
struct Cli {
    /// UI language (auto/en/es/ko)
    #[arg(short = 'L', long, global = true, default_value = "auto")]
    lang: String,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate all renovation tiers for one scenario
    Evaluate {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Print only this tier in detail
        #[arg(short, long)]
        tier: Option<RenovationTier>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,

        /// With --json, emit only the per-tier summary rows
        #[arg(long, requires = "json")]
        summary: bool,
    },

    /// Sweep one input over a range and report a metric
    Sweep {
        #[command(flatten)]
        scenario: ScenarioArgs,

        #[arg(short, long, value_enum)]
        parameter: ParameterArg,

        #[arg(long)]
        start: f64,

        #[arg(long)]
        end: f64,

        #[arg(long)]
        step: f64,

        #[arg(short, long, default_value = "light_touch")]
        tier: RenovationTier,

        #[arg(short, long, value_enum, default_value = "unleveraged-roi")]
        metric: MetricArg,

        #[arg(long)]
        json: bool,
    },

    /// Run one of the standard fixed-price sensitivity charts
    ///
    /// `--fixed-price` sets the held purchase price (defaults to the configured
    /// estimate). Financing and renovation-cost overrides are replaced by the chart.
    Preset {
        #[command(flatten)]
        scenario: ScenarioArgs,

        #[arg(value_enum)]
        preset: PresetArg,

        /// Assume 75% financing
        #[arg(long)]
        leveraged: bool,

        #[arg(long)]
        json: bool,
    },
}

/// 설정 기본값을 덮어쓰는 시나리오 인자.
#[derive(Args)]
struct ScenarioArgs {
    #[arg(long)]
    floor_area: Option<f64>,
    #[arg(long)]
    price_renovated: Option<f64>,
    #[arg(long)]
    price_unrenovated: Option<f64>,
    #[arg(long)]
    special_expenses: Option<f64>,
    #[arg(long)]
    commission_pct: Option<f64>,
    #[arg(long)]
    broker_pct: Option<f64>,
    #[arg(long)]
    financed_pct: Option<f64>,
    #[arg(long)]
    interest_pct: Option<f64>,
    #[arg(long)]
    holding_days: Option<u32>,
    #[arg(long)]
    target_roi_pct: Option<f64>,
    /// Hold the purchase price fixed instead of solving it from the target ROI
    #[arg(long)]
    fixed_price: Option<f64>,
    /// Renovation cost per m2 applied to every tier
    #[arg(long)]
    renovation_cost: Option<f64>,
}

impl ScenarioArgs {
    fn apply(&self, defaults: &config::ScenarioDefaults) -> ScenarioInput {
        let mut input = defaults.to_input();
        let overrides = [
            (self.floor_area, &mut input.floor_area_m2),
            (self.price_renovated, &mut input.sale_price_per_m2_renovated),
            (self.price_unrenovated, &mut input.sale_price_per_m2_unrenovated),
            (self.special_expenses, &mut input.special_expenses),
            (self.commission_pct, &mut input.sale_commission_pct),
            (self.broker_pct, &mut input.broker_fee_pct),
            (self.financed_pct, &mut input.financed_pct),
            (self.interest_pct, &mut input.annual_interest_rate_pct),
            (self.target_roi_pct, &mut input.target_annual_roi_pct),
        ];
        for (value, field) in overrides {
            if let Some(v) = value {
                *field = v;
            }
        }
        if let Some(days) = self.holding_days {
            input.holding_period_days = days;
        }
        input.fixed_purchase_price = self.fixed_price;
        input.custom_renovation_cost_per_m2 = self.renovation_cost;
        input
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ParameterArg {
    SalePrice,
    RenovationCost,
    HoldingDays,
}

impl From<ParameterArg> for SweepParameter {
    fn from(value: ParameterArg) -> Self {
        match value {
            ParameterArg::SalePrice => SweepParameter::SalePricePerM2Renovated,
            ParameterArg::RenovationCost => SweepParameter::RenovationCostPerM2,
            ParameterArg::HoldingDays => SweepParameter::HoldingDays,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MetricArg {
    UnleveragedRoi,
    LeveragedRoi,
    GrossProfit,
    NetProfit,
    PurchasePrice,
}

impl From<MetricArg> for SweepMetric {
    fn from(value: MetricArg) -> Self {
        match value {
            MetricArg::UnleveragedRoi => SweepMetric::UnleveragedAnnualRoi,
            MetricArg::LeveragedRoi => SweepMetric::LeveragedAnnualRoi,
            MetricArg::GrossProfit => SweepMetric::GrossProfit,
            MetricArg::NetProfit => SweepMetric::NetProfit,
            MetricArg::PurchasePrice => SweepMetric::PurchasePrice,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    SalePrice,
    RenovationCost,
    HoldingDays,
}

impl From<PresetArg> for Preset {
    fn from(value: PresetArg) -> Self {
        match value {
            PresetArg::SalePrice => Preset::SalePriceRoi,
            PresetArg::RenovationCost => Preset::RenovationCostProfit,
            PresetArg::HoldingDays => Preset::HoldingDaysProfit,
        }
    }
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 서브커맨드 또는 대화형 메뉴를 실행한다.
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut cfg = config::load_or_create(&cli.config)?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = Translator::new_with_pack(&lang, None);
    log::debug!("언어: {}", tr.language_code());

    match cli.command {
        None => app::run(&mut cfg, &tr)?,
        Some(Commands::Evaluate {
            scenario,
            tier,
            json,
            summary,
        }) => {
            let input = scenario.apply(&cfg.defaults);
            input.validate()?;
            let evaluation = feasibility::evaluate(&input);
            match (json, tier) {
                (true, _) if summary => {
                    println!("{}", report::summary_to_json(&report::summary(&evaluation))?)
                }
                (true, _) => println!("{}", report::to_json(&evaluation)?),
                (false, Some(tier)) => {
                    if let Some(result) = evaluation.get(&tier) {
                        ui_cli::print_detail(&tr, result);
                    }
                }
                (false, None) => ui_cli::print_summary(&tr, &evaluation),
            }
        }
        Some(Commands::Sweep {
            scenario,
            parameter,
            start,
            end,
            step,
            tier,
            metric,
            json,
        }) => {
            let base = scenario.apply(&cfg.defaults);
            base.validate()?;
            let sweep = Sweep {
                base,
                parameter: parameter.into(),
                range: SweepRange::new(start, end, step)?,
                tier,
                metric: metric.into(),
            };
            let points = sweep.run();
            if json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                ui_cli::print_sweep(&tr, &points, sweep.metric);
            }
        }
        Some(Commands::Preset {
            scenario,
            preset,
            leveraged,
            json,
        }) => {
            let base = scenario.apply(&cfg.defaults);
            let price = base
                .fixed_purchase_price
                .unwrap_or(cfg.defaults.estimated_purchase_price);
            let sweep = Preset::from(preset).try_build(&base, price, leveraged)?;
            let points = sweep.run();
            if json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                ui_cli::print_sweep(&tr, &points, sweep.metric);
            }
        }
    }
    Ok(())
}
