use std::io::{self, BufRead, Write};

use crate::app::AppError;
use crate::config::{Config, ScenarioDefaults};
use crate::feasibility::{self, Evaluation, RenovationTier, ScenarioInput, ScenarioResult};
use crate::i18n::{keys, resolve_language, Translator};
use crate::report;
use crate::sensitivity::{
    presets::Preset, Sweep, SweepMetric, SweepParameter, SweepPoint, SweepRange,
};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Evaluate,
    Sweep,
    Presets,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    main_menu_from(tr, &mut io::stdin().lock())
}

/// `reader`에서 메뉴 선택을 읽는다. 입력이 끝나면 `UnexpectedEof` 입출력 오류.
pub fn main_menu_from<R: BufRead>(
    tr: &Translator,
    reader: &mut R,
) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_EVALUATE,
        keys::MAIN_MENU_SWEEP,
        keys::MAIN_MENU_PRESETS,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line_from(reader, tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Evaluate),
            "2" => return Ok(MenuChoice::Sweep),
            "3" => return Ok(MenuChoice::Presets),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 시나리오 평가 메뉴를 처리한다.
pub fn handle_evaluate(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::EVALUATE_HEADING));
    println!("{}", tr.t(keys::EVALUATE_KEEP_HINT));
    let mut input = read_scenario(tr, &cfg.defaults)?;
    input.fixed_purchase_price = read_optional_f64(tr, tr.t(keys::PROMPT_FIXED_PRICE))?;
    input.validate()?;

    let evaluation = feasibility::evaluate(&input);
    print_summary(tr, &evaluation);

    let sel = read_line(tr.t(keys::PROMPT_SHOW_DETAIL))?;
    if sel.trim().is_empty() {
        return Ok(());
    }
    let tier: RenovationTier = sel.trim().parse()?;
    if let Some(result) = evaluation.get(&tier) {
        print_detail(tr, result);
    }
    Ok(())
}

/// 사용자 정의 민감도 분석 메뉴를 처리한다.
pub fn handle_sweep(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SWEEP_HEADING));
    println!("{}", tr.t(keys::EVALUATE_KEEP_HINT));
    let mut base = read_scenario(tr, &cfg.defaults)?;
    base.fixed_purchase_price = read_optional_f64(tr, tr.t(keys::PROMPT_FIXED_PRICE))?;
    base.validate()?;

    println!("{}", tr.t(keys::SWEEP_PARAMETER_OPTIONS));
    let parameter = match read_line(tr.t(keys::PROMPT_SELECT))?.trim() {
        "1" => SweepParameter::SalePricePerM2Renovated,
        "2" => SweepParameter::RenovationCostPerM2,
        "3" => SweepParameter::HoldingDays,
        _ => {
            println!("{}", tr.t(keys::INVALID_SELECTION));
            return Ok(());
        }
    };
    println!("{}", tr.t(keys::SWEEP_METRIC_OPTIONS));
    let metric = match read_line(tr.t(keys::PROMPT_SELECT))?.trim() {
        "1" => SweepMetric::UnleveragedAnnualRoi,
        "2" => SweepMetric::LeveragedAnnualRoi,
        "3" => SweepMetric::GrossProfit,
        "4" => SweepMetric::NetProfit,
        "5" => SweepMetric::PurchasePrice,
        _ => {
            println!("{}", tr.t(keys::INVALID_SELECTION));
            return Ok(());
        }
    };
    println!("{}", tr.t(keys::SWEEP_TIER_OPTIONS));
    let tier: RenovationTier = read_line(tr.t(keys::PROMPT_SELECT))?.trim().parse()?;

    let start = read_f64(tr, tr.t(keys::PROMPT_SWEEP_START))?;
    let end = read_f64(tr, tr.t(keys::PROMPT_SWEEP_END))?;
    let step = read_f64(tr, tr.t(keys::PROMPT_SWEEP_STEP))?;
    let sweep = Sweep {
        base,
        parameter,
        range: SweepRange::new(start, end, step)?,
        tier,
        metric,
    };
    print_sweep(tr, &sweep.run(), metric);
    Ok(())
}

/// 기본 민감도 차트 메뉴를 처리한다.
pub fn handle_presets(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::PRESET_HEADING));
    println!("{}", tr.t(keys::PRESET_FIXED_PRICE_NOTE));
    println!("{}", tr.t(keys::PRESET_OPTIONS));
    let preset = match read_line(tr.t(keys::PROMPT_SELECT))?.trim() {
        "1" => Preset::SalePriceRoi,
        "2" => Preset::RenovationCostProfit,
        "3" => Preset::HoldingDaysProfit,
        _ => {
            println!("{}", tr.t(keys::INVALID_SELECTION));
            return Ok(());
        }
    };
    let answer = read_line(tr.t(keys::PROMPT_LEVERAGED))?;
    let leveraged = matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "si" | "sí"
    );
    let sweep = preset.try_build(
        &cfg.defaults.to_input(),
        cfg.defaults.estimated_purchase_price,
        leveraged,
    )?;
    print_sweep(tr, &sweep.run(), sweep.metric);
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::PROMPT_SELECT))?;
    match sel.trim() {
        "" => {}
        "1" => {
            let lang = read_line(tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
            let lang = lang.trim();
            cfg.language = if lang.eq_ignore_ascii_case("auto") {
                "auto".to_string()
            } else {
                resolve_language(lang, None)
            };
        }
        "2" => {
            println!("{}", tr.t(keys::EVALUATE_KEEP_HINT));
            let input = read_scenario(tr, &cfg.defaults)?;
            input.validate()?;
            let estimated = read_f64_or(
                tr,
                tr.t(keys::PROMPT_ESTIMATED_PRICE),
                cfg.defaults.estimated_purchase_price,
            )?;
            cfg.defaults = ScenarioDefaults {
                target_annual_roi_pct: input.target_annual_roi_pct,
                holding_period_days: input.holding_period_days,
                floor_area_m2: input.floor_area_m2,
                sale_price_per_m2_renovated: input.sale_price_per_m2_renovated,
                sale_price_per_m2_unrenovated: input.sale_price_per_m2_unrenovated,
                special_expenses: input.special_expenses,
                sale_commission_pct: input.sale_commission_pct,
                broker_fee_pct: input.broker_fee_pct,
                financed_pct: input.financed_pct,
                annual_interest_rate_pct: input.annual_interest_rate_pct,
                estimated_purchase_price: estimated,
            };
        }
        "3" => {
            cfg.reset_defaults();
            println!("{}", tr.t(keys::SETTINGS_RESET_DONE));
        }
        _ => println!("{}", tr.t(keys::INVALID_SELECTION)),
    }
    Ok(())
}

/// 등급 비교표를 출력한다.
pub fn print_summary(tr: &Translator, evaluation: &Evaluation) {
    println!("{}", tr.t(keys::RESULT_SUMMARY_HEADER));
    for row in report::summary(evaluation) {
        println!(
            "{:<26} {:>12.0} {:>12.0} {:>12.0} {:>8.1}% {:>8.1}%  {}",
            row.tier.key(),
            row.purchase_price,
            row.total_investment,
            row.net_profit,
            row.roi_unleveraged_annual_pct,
            row.roi_leveraged_annual_pct,
            viable_label(tr, row.viable)
        );
    }
}

/// 한 등급의 전체 수치와 투자 구성을 출력한다.
pub fn print_detail(tr: &Translator, result: &ScenarioResult) {
    println!("{} {}", tr.t(keys::RESULT_DETAIL_HEADING), result.tier.key());
    for m in report::metric_breakdown(result) {
        println!("{:<26} {:>14.2}", m.key, m.value);
    }
    println!();
    for share in report::investment_breakdown(result) {
        println!(
            "{:<26} {:>14.2} ({:>5.1}%)",
            share.key,
            share.amount,
            share.fraction * 100.0
        );
    }
}

/// 스윕 결과를 출력한다. ROI 지표는 % 단위로 바꿔 표시한다.
pub fn print_sweep(tr: &Translator, points: &[SweepPoint], metric: SweepMetric) {
    println!("{}", tr.t(keys::SWEEP_RESULT_HEADER));
    let is_ratio = matches!(
        metric,
        SweepMetric::UnleveragedAnnualRoi | SweepMetric::LeveragedAnnualRoi
    );
    for p in points {
        if is_ratio {
            println!("{:>10.1} {:>10.2}%", p.value, p.metric_value * 100.0);
        } else {
            println!("{:>10.1} {:>14.2}", p.value, p.metric_value);
        }
    }
}

fn viable_label<'a>(tr: &'a Translator, viable: bool) -> &'a str {
    if viable {
        tr.t(keys::RESULT_VIABLE)
    } else {
        tr.t(keys::RESULT_NOT_VIABLE)
    }
}

/// 기본값을 보여주며 시나리오 입력을 차례로 받는다.
fn read_scenario(tr: &Translator, d: &ScenarioDefaults) -> Result<ScenarioInput, AppError> {
    let mut input = d.to_input();
    input.floor_area_m2 = read_f64_or(tr, tr.t(keys::PROMPT_FLOOR_AREA), d.floor_area_m2)?;
    input.sale_price_per_m2_renovated = read_f64_or(
        tr,
        tr.t(keys::PROMPT_PRICE_RENOVATED),
        d.sale_price_per_m2_renovated,
    )?;
    input.sale_price_per_m2_unrenovated = read_f64_or(
        tr,
        tr.t(keys::PROMPT_PRICE_UNRENOVATED),
        d.sale_price_per_m2_unrenovated,
    )?;
    input.special_expenses =
        read_f64_or(tr, tr.t(keys::PROMPT_SPECIAL_EXPENSES), d.special_expenses)?;
    input.sale_commission_pct =
        read_f64_or(tr, tr.t(keys::PROMPT_COMMISSION), d.sale_commission_pct)?;
    input.broker_fee_pct = read_f64_or(tr, tr.t(keys::PROMPT_BROKER), d.broker_fee_pct)?;
    input.financed_pct = read_f64_or(tr, tr.t(keys::PROMPT_FINANCED), d.financed_pct)?;
    input.annual_interest_rate_pct =
        read_f64_or(tr, tr.t(keys::PROMPT_INTEREST), d.annual_interest_rate_pct)?;
    let days = read_f64_or(
        tr,
        tr.t(keys::PROMPT_HOLDING_DAYS),
        f64::from(d.holding_period_days),
    )?;
    input.holding_period_days = days.round().max(0.0) as u32;
    input.target_annual_roi_pct =
        read_f64_or(tr, tr.t(keys::PROMPT_TARGET_ROI), d.target_annual_roi_pct)?;
    Ok(input)
}

/// 프롬프트를 출력하고 한 줄을 읽는다. 0바이트를 읽으면 입력 끝으로 본다.
pub fn read_line_from<R: BufRead>(reader: &mut R, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if reader.read_line(&mut buf)? == 0 {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }
    Ok(buf)
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    read_line_from(&mut io::stdin().lock(), prompt)
}

/// 숫자가 나올 때까지 다시 묻는다.
pub fn read_f64_from<R: BufRead>(
    tr: &Translator,
    reader: &mut R,
    prompt: &str,
) -> Result<f64, AppError> {
    loop {
        let s = read_line_from(reader, prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    read_f64_from(tr, &mut io::stdin().lock(), prompt)
}

/// 빈 입력이면 기본값을 그대로 쓴다.
fn read_f64_or(tr: &Translator, label: &str, default: f64) -> Result<f64, AppError> {
    let prompt = format!("{label} [{default}]: ");
    loop {
        let s = read_line(&prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_optional_f64(tr: &Translator, prompt: &str) -> Result<Option<f64>, AppError> {
    loop {
        let s = read_line(prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        match s.parse::<f64>() {
            Ok(v) => return Ok(Some(v)),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
