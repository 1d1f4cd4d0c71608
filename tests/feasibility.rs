//! 타당성 계산기 회귀 테스트. 기본 매물(80m², 3000/2500 €/m²)을 기준으로 한다.
use feasibility_toolbox::feasibility::{
    evaluate, evaluate_tier, InputError, RenovationTier, ScenarioInput,
};

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {tol})"
    );
}

fn scenario_a() -> ScenarioInput {
    ScenarioInput {
        floor_area_m2: 80.0,
        sale_price_per_m2_renovated: 3000.0,
        sale_price_per_m2_unrenovated: 2500.0,
        special_expenses: 0.0,
        sale_commission_pct: 3.0,
        broker_fee_pct: 0.0,
        financed_pct: 75.0,
        annual_interest_rate_pct: 0.0,
        holding_period_days: 200,
        target_annual_roi_pct: 25.0,
        fixed_purchase_price: None,
        custom_renovation_cost_per_m2: None,
    }
}

#[test]
fn light_touch_sale_and_renovation_figures() {
    let r = evaluate_tier(&scenario_a(), RenovationTier::LightTouch);
    assert_close("renovation base", r.renovation_cost_base, 40_000.0, 1e-9);
    assert_close("renovation vat", r.renovation_vat, 8_400.0, 1e-9);
    assert_close("renovation total", r.renovation_cost_total, 48_400.0, 1e-9);
    assert_close("fixed costs", r.fixed_acquisition_costs, 1_000.0, 1e-9);
    assert_close("gross sale", r.sale_price_gross, 240_000.0, 1e-9);
    assert_close("commission", r.sale_commission, 8_712.0, 1e-6);
    assert_close("net sale", r.sale_price_net, 231_288.0, 1e-6);
}

#[test]
fn target_roi_mode_solves_purchase_price() {
    let input = scenario_a();
    let r = evaluate_tier(&input, RenovationTier::LightTouch);
    let t = 200.0 / 365.0;
    let expected_price = 231_288.0 / (1.0 + 0.25 * t) - 1_000.0 - 48_400.0;
    assert_close("purchase price", r.purchase_price, expected_price, 1e-6);
    assert_close("broker fee", r.broker_fee, 0.0, 1e-12);
    assert_close(
        "total investment",
        r.total_investment,
        expected_price + 49_400.0,
        1e-6,
    );
    assert_close(
        "gross profit",
        r.gross_profit,
        231_288.0 - r.total_investment,
        1e-6,
    );
    // 매입가를 목표 ROI로 역산했으므로 무레버리지 연 ROI는 목표치와 같다.
    assert_close("unleveraged annual", r.roi_unleveraged_annual, 0.25, 1e-9);
    assert!(r.roi_leveraged_annual > r.roi_unleveraged_annual);
    assert!(r.viable);
}

#[test]
fn no_renovation_uses_unrenovated_price() {
    let r = evaluate_tier(&scenario_a(), RenovationTier::NoRenovation);
    assert_close("gross sale", r.sale_price_gross, 200_000.0, 1e-9);
    assert_close("renovation", r.renovation_cost_total, 0.0, 1e-12);
    let expected_price = 192_740.0 / (1.0 + 0.25 * 200.0 / 365.0) - 1_000.0;
    assert_close("purchase price", r.purchase_price, expected_price, 1e-6);
}

#[test]
fn evaluate_returns_every_tier_in_order() {
    let evaluation = evaluate(&scenario_a());
    let tiers: Vec<RenovationTier> = evaluation.keys().copied().collect();
    assert_eq!(tiers, RenovationTier::ALL.to_vec());
    for (tier, result) in &evaluation {
        assert_eq!(*tier, result.tier);
    }
}

#[test]
fn accounting_identity_holds_for_all_tiers() {
    let mut input = scenario_a();
    input.broker_fee_pct = 2.5;
    input.special_expenses = 3_500.0;
    input.annual_interest_rate_pct = 4.0;
    for fixed in [None, Some(150_000.0)] {
        input.fixed_purchase_price = fixed;
        for r in evaluate(&input).values() {
            let sum = r.purchase_price
                + r.fixed_acquisition_costs
                + r.renovation_cost_total
                + r.broker_fee;
            assert_close("total investment", r.total_investment, sum, 1e-6);
            assert_close(
                "net sale",
                r.sale_price_net,
                r.sale_price_gross - r.sale_commission,
                1e-6,
            );
            assert_close(
                "down payment",
                r.down_payment,
                r.total_investment - r.financed_amount,
                1e-6,
            );
        }
    }
}

#[test]
fn broker_fee_includes_vat() {
    let mut input = scenario_a();
    input.broker_fee_pct = 2.0;
    input.fixed_purchase_price = Some(100_000.0);
    let r = evaluate_tier(&input, RenovationTier::LightTouch);
    assert_close("broker fee", r.broker_fee, 100_000.0 * 0.02 * 1.21, 1e-9);
}

#[test]
fn resolved_price_is_never_negative() {
    let mut input = scenario_a();
    input.sale_price_per_m2_renovated = 500.0;
    input.sale_price_per_m2_unrenovated = 10.0;
    input.target_annual_roi_pct = 200.0;
    input.special_expenses = 50_000.0;
    for r in evaluate(&input).values() {
        assert!(r.purchase_price >= 0.0, "{}: {}", r.tier, r.purchase_price);
    }
    let r = evaluate_tier(&input, RenovationTier::StandardFullRenovation);
    assert_eq!(r.purchase_price, 0.0);
    assert!(r.gross_profit < 0.0);
}

#[test]
fn zero_financing_matches_unleveraged_figures() {
    let mut input = scenario_a();
    input.financed_pct = 0.0;
    input.annual_interest_rate_pct = 5.0;
    for r in evaluate(&input).values() {
        assert_eq!(r.financed_amount, 0.0);
        assert_eq!(r.interest_cost, 0.0);
        assert_eq!(r.monthly_payment, 0.0);
        assert_close("down payment", r.down_payment, r.total_investment, 1e-9);
        assert_close("lev abs", r.roi_leveraged_abs, r.roi_unleveraged_abs, 1e-12);
        assert_close(
            "lev annual",
            r.roi_leveraged_annual,
            r.roi_unleveraged_annual,
            1e-12,
        );
        assert_eq!(r.viable, r.roi_unleveraged_annual >= 0.20);
    }
}

#[test]
fn interest_reduces_net_profit() {
    let mut input = scenario_a();
    input.annual_interest_rate_pct = 4.0;
    let r = evaluate_tier(&input, RenovationTier::LightTouch);
    let t = 200.0 / 365.0;
    let financed = r.purchase_price * 0.75;
    assert_close("financed", r.financed_amount, financed, 1e-6);
    assert_close("interest", r.interest_cost, financed * 0.04 * t, 1e-6);
    assert_close(
        "net profit",
        r.net_profit,
        r.gross_profit - r.interest_cost,
        1e-6,
    );
    assert_close(
        "lev annual",
        r.roi_leveraged_annual,
        r.net_profit / r.down_payment / t,
        1e-9,
    );
}

#[test]
fn profit_split_conserves_positive_net_profit() {
    let mut input = scenario_a();
    input.target_annual_roi_pct = 60.0;
    for fixed in [None, Some(120_000.0), Some(60_000.0)] {
        input.fixed_purchase_price = fixed;
        for r in evaluate(&input).values() {
            if r.net_profit > 0.0 {
                assert_close(
                    "split",
                    r.distrib_investor + r.distrib_management,
                    r.net_profit,
                    1e-6,
                );
            }
            assert_close(
                "preferred",
                r.preferred_return,
                0.08 * r.total_investment,
                1e-9,
            );
        }
    }
}

#[test]
fn viability_follows_applicable_roi() {
    let mut input = scenario_a();
    for (financed, target, fixed) in [
        (75.0, 25.0, None),
        (0.0, 25.0, None),
        (0.0, 10.0, None),
        (50.0, 5.0, None),
        (75.0, 0.0, Some(200_000.0)),
        (0.0, 0.0, Some(150_000.0)),
    ] {
        input.financed_pct = financed;
        input.target_annual_roi_pct = target;
        input.fixed_purchase_price = fixed;
        for r in evaluate(&input).values() {
            let roi = if financed > 0.0 {
                r.roi_leveraged_annual
            } else {
                r.roi_unleveraged_annual
            };
            assert_eq!(r.viable, roi >= 0.20, "{} financed={financed}", r.tier);
            assert_eq!(r.applicable_annual_roi(), roi);
        }
    }
}

#[test]
fn zero_price_with_financing_stays_leveraged() {
    let mut input = scenario_a();
    input.fixed_purchase_price = Some(0.0);
    input.annual_interest_rate_pct = 4.0;
    for r in evaluate(&input).values() {
        assert_eq!(r.financed_amount, 0.0);
        assert!(r.leveraged);
        assert_eq!(r.applicable_annual_roi(), r.roi_leveraged_annual);
        assert_eq!(r.viable, r.applicable_annual_roi() >= 0.20, "{}", r.tier);
    }

    input.financed_pct = 0.0;
    for r in evaluate(&input).values() {
        assert!(!r.leveraged);
        assert_eq!(r.applicable_annual_roi(), r.roi_unleveraged_annual);
    }
}

/// 총투자 100,000 €, 순매도 120,000 €, 보유 365일 → 연 ROI 정확히 20%.
fn threshold_scenario(price_unrenovated: f64) -> ScenarioInput {
    ScenarioInput {
        floor_area_m2: 100.0,
        sale_price_per_m2_renovated: 0.0,
        sale_price_per_m2_unrenovated: price_unrenovated,
        special_expenses: 0.0,
        sale_commission_pct: 0.0,
        broker_fee_pct: 0.0,
        financed_pct: 0.0,
        annual_interest_rate_pct: 0.0,
        holding_period_days: 365,
        target_annual_roi_pct: 0.0,
        fixed_purchase_price: Some(99_000.0),
        custom_renovation_cost_per_m2: None,
    }
}

#[test]
fn viability_threshold_is_inclusive() {
    let r = evaluate_tier(&threshold_scenario(1200.0), RenovationTier::NoRenovation);
    assert_eq!(r.total_investment, 100_000.0);
    assert_eq!(r.gross_profit, 20_000.0);
    assert_eq!(r.roi_unleveraged_annual, 0.20);
    assert!(r.viable);

    let r = evaluate_tier(&threshold_scenario(1199.9), RenovationTier::NoRenovation);
    assert!(r.roi_unleveraged_annual < 0.20);
    assert!(!r.viable);
}

#[test]
fn fixed_price_mode_uses_given_price() {
    let mut input = scenario_a();
    input.fixed_purchase_price = Some(200_000.0);
    let r = evaluate_tier(&input, RenovationTier::LightTouch);
    assert_eq!(r.purchase_price, 200_000.0);
    assert_close("total investment", r.total_investment, 249_400.0, 1e-6);
    assert_close("gross profit", r.gross_profit, 231_288.0 - 249_400.0, 1e-6);
    // 손실은 투자자가 전액 부담한다.
    assert_close("investor", r.distrib_investor, r.net_profit, 1e-9);
    assert_eq!(r.distrib_management, 0.0);
    assert!(!r.viable);
}

#[test]
fn zero_holding_period_degrades_to_zero() {
    let mut input = scenario_a();
    input.holding_period_days = 0;
    input.annual_interest_rate_pct = 3.0;
    for fixed in [None, Some(200_000.0)] {
        input.fixed_purchase_price = fixed;
        for r in evaluate(&input).values() {
            assert_eq!(r.roi_unleveraged_annual, 0.0);
            assert_eq!(r.roi_leveraged_annual, 0.0);
            assert_eq!(r.interest_cost, 0.0);
            assert!(r.roi_unleveraged_abs.is_finite());
            assert!(r.roi_leveraged_abs.is_finite());
            assert!(r.purchase_price.is_finite());
            assert!(!r.viable);
        }
    }
}

#[test]
fn zero_investment_yields_zero_ratios() {
    let input = ScenarioInput {
        floor_area_m2: 0.0,
        sale_price_per_m2_renovated: 0.0,
        sale_price_per_m2_unrenovated: 0.0,
        special_expenses: -1_000.0,
        sale_commission_pct: 0.0,
        broker_fee_pct: 0.0,
        financed_pct: 50.0,
        annual_interest_rate_pct: 0.0,
        holding_period_days: 100,
        target_annual_roi_pct: 0.0,
        fixed_purchase_price: Some(0.0),
        custom_renovation_cost_per_m2: None,
    };
    let r = evaluate_tier(&input, RenovationTier::NoRenovation);
    assert_eq!(r.total_investment, 0.0);
    assert_eq!(r.roi_unleveraged_abs, 0.0);
    assert_eq!(r.roi_leveraged_abs, 0.0);
    assert_eq!(r.distrib_investor, 0.0);
}

#[test]
fn custom_renovation_cost_overrides_every_tier() {
    let mut input = scenario_a();
    input.custom_renovation_cost_per_m2 = Some(300.0);
    for r in evaluate(&input).values() {
        assert_close("renovation base", r.renovation_cost_base, 24_000.0, 1e-9);
    }
}

#[test]
fn validate_rejects_out_of_range_inputs() {
    assert!(scenario_a().validate().is_ok());

    let mut input = scenario_a();
    input.floor_area_m2 = 0.0;
    assert_eq!(input.validate(), Err(InputError::NonPositiveArea(0.0)));

    let mut input = scenario_a();
    input.financed_pct = 120.0;
    assert_eq!(input.validate(), Err(InputError::FinancedOutOfRange(120.0)));

    let mut input = scenario_a();
    input.special_expenses = -5.0;
    assert!(matches!(
        input.validate(),
        Err(InputError::Negative {
            field: "special_expenses",
            ..
        })
    ));

    let mut input = scenario_a();
    input.fixed_purchase_price = Some(f64::NAN);
    assert!(matches!(input.validate(), Err(InputError::NotFinite { .. })));
}

#[test]
fn tier_parsing_accepts_keys_and_aliases() {
    assert_eq!(
        "light-touch".parse::<RenovationTier>().ok(),
        Some(RenovationTier::LightTouch)
    );
    assert_eq!(
        "3".parse::<RenovationTier>().ok(),
        Some(RenovationTier::StandardFullRenovation)
    );
    for tier in RenovationTier::ALL {
        assert_eq!(tier.key().parse::<RenovationTier>().ok(), Some(tier));
    }
    assert!("penthouse".parse::<RenovationTier>().is_err());
    assert!(RenovationTier::NoRenovation < RenovationTier::LightTouch);
}
