use feasibility_toolbox::config::ScenarioDefaults;
use feasibility_toolbox::feasibility::{evaluate, RenovationTier};
use feasibility_toolbox::report::{
    investment_breakdown, metric_breakdown, summary, summary_to_json, to_json,
};

#[test]
fn summary_has_one_row_per_tier() {
    let evaluation = evaluate(&ScenarioDefaults::default().to_input());
    let rows = summary(&evaluation);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].tier, RenovationTier::NoRenovation);
    assert_eq!(rows[3].tier, RenovationTier::StandardFullRenovation);
    let light = &evaluation[&RenovationTier::LightTouch];
    let diff = rows[1].roi_unleveraged_annual_pct - light.roi_unleveraged_annual * 100.0;
    assert!(diff.abs() < 1e-9);
}

#[test]
fn metric_breakdown_lists_every_field() {
    let evaluation = evaluate(&ScenarioDefaults::default().to_input());
    let light = &evaluation[&RenovationTier::LightTouch];
    let metrics = metric_breakdown(light);
    assert_eq!(metrics.len(), 25);
    let total = metrics
        .iter()
        .find(|m| m.key == "total_investment")
        .expect("total_investment metric");
    assert_eq!(total.value, light.total_investment);
    let viable = metrics.last().expect("viable metric");
    assert_eq!(viable.key, "viable");
    assert_eq!(viable.value, if light.viable { 1.0 } else { 0.0 });
}

#[test]
fn investment_shares_sum_to_one() {
    let mut input = ScenarioDefaults::default().to_input();
    input.broker_fee_pct = 2.0;
    let evaluation = evaluate(&input);
    for result in evaluation.values() {
        let shares = investment_breakdown(result);
        assert_eq!(shares.len(), 4);
        let sum: f64 = shares.iter().map(|s| s.fraction).sum();
        assert!((sum - 1.0).abs() < 1e-9, "{}: {sum}", result.tier);
    }
}

#[test]
fn json_export_is_keyed_by_tier() {
    let evaluation = evaluate(&ScenarioDefaults::default().to_input());
    let json = to_json(&evaluation).expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
    let obj = value.as_object().expect("object");
    for tier in RenovationTier::ALL {
        let entry = obj.get(tier.key()).expect("tier entry");
        assert_eq!(entry["tier"], tier.key());
        assert!(entry["total_investment"].is_f64());
        assert!(entry["viable"].is_boolean());
    }

    let rows = summary_to_json(&summary(&evaluation)).expect("summary json");
    let rows: serde_json::Value = serde_json::from_str(&rows).expect("parse rows");
    assert_eq!(rows.as_array().map(Vec::len), Some(4));
}
