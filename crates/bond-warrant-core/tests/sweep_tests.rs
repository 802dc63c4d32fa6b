use bond_warrant_core::derivatives::warrant::WarrantType;
use bond_warrant_core::fixed_income::bond::BondParams;
use bond_warrant_core::simulation::{
    compare, payoff_curve, run_simulation, sweep, CostParams, EngineConfig, MarketParams,
    SavedOperation, SimulatorInput, Sweep, SweepAxis, SweepMetric, TimeParams, WarrantParams,
};
use bond_warrant_core::WarrantSimError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn operation(id: &str, warrant_type: WarrantType, strike: Decimal) -> SavedOperation {
    SavedOperation {
        id: id.to_string(),
        name: format!("{warrant_type:?} {strike}"),
        input: SimulatorInput {
            warrant: WarrantParams {
                warrant_type,
                strike,
                premium: dec!(4),
                ratio: dec!(0.5),
                expiry_years: dec!(1.5),
                volatility: dec!(0.12),
                quantity: 200,
            },
            bond: BondParams {
                face_value: dec!(100),
                coupon_rate: dec!(0.035),
                maturity_years: 7,
            },
            market: MarketParams {
                current_rate: dec!(0.04),
                simulated_rate: dec!(0.045),
                risk_free_rate: None,
            },
            time: TimeParams {
                elapsed_days: dec!(30),
            },
            costs: CostParams {
                flat_fee: dec!(5),
                proportional_fee: dec!(0.001),
            },
        },
    }
}

fn book() -> Vec<SavedOperation> {
    vec![
        operation("put-100", WarrantType::Put, dec!(100)),
        operation("call-95", WarrantType::Call, dec!(95)),
    ]
}

// ===========================================================================
// Sweeps
// ===========================================================================

#[test]
fn test_rate_sweep_has_25_defined_points() {
    let ops = vec![operation("a", WarrantType::Put, dec!(100))];
    let points = sweep(&ops, SweepAxis::Rate, SweepMetric::Roi, &EngineConfig::default()).unwrap();

    assert_eq!(points.len(), 25);
    assert_eq!(points[0].label, "1%");
    assert_eq!(points[1].label, "1.25%");
    assert_eq!(points[24].label, "7%");
    for p in &points {
        assert!(p.values["a"].is_some(), "undefined ROI at {}", p.label);
    }
}

#[test]
fn test_time_and_vol_grids() {
    let config = EngineConfig::default();
    let time = sweep(&book(), SweepAxis::Time, SweepMetric::Pnl, &config).unwrap();
    assert_eq!(time.len(), 25);
    assert_eq!(time[0].label, "+0d");
    assert_eq!(time[24].label, "+360d");
    assert_eq!(time[24].x_points, dec!(360));

    let vol = sweep(&book(), SweepAxis::Vol, SweepMetric::Delta, &config).unwrap();
    assert_eq!(vol.len(), 19);
    assert_eq!(vol[0].label, "10%");
    assert_eq!(vol[18].label, "100%");
}

#[test]
fn test_sweep_point_matches_direct_simulation() {
    let ops = book();
    let config = EngineConfig::default();
    let points = sweep(&ops, SweepAxis::Rate, SweepMetric::Pnl, &config).unwrap();

    // 2.5% is the seventh grid value
    let mut input = ops[1].input.clone();
    input.market.simulated_rate = dec!(0.025);
    let direct = run_simulation(&input, &config).unwrap();
    let swept = points[6].values["call-95"].unwrap();
    assert!((swept - direct.adjusted_pnl.profit_loss).abs() < dec!(0.0000001));
}

#[test]
fn test_time_sweep_adds_to_elapsed_days() {
    let ops = book();
    let config = EngineConfig::default();
    let points = sweep(&ops, SweepAxis::Time, SweepMetric::Delta, &config).unwrap();

    let mut input = ops[0].input.clone();
    input.time.elapsed_days = dec!(30) + dec!(45);
    let direct = run_simulation(&input, &config).unwrap();
    assert_eq!(points[3].values["put-100"], Some(direct.greeks.delta));
}

#[test]
fn test_sweep_leaves_operations_untouched() {
    let ops = book();
    let before = ops.clone();
    sweep(&ops, SweepAxis::Vol, SweepMetric::Roi, &EngineConfig::default()).unwrap();
    assert_eq!(ops, before);
}

#[test]
fn test_put_roi_rises_along_rate_axis() {
    let points = sweep(
        &book(),
        SweepAxis::Rate,
        SweepMetric::Roi,
        &EngineConfig::default(),
    )
    .unwrap();
    let first = points[0].values["put-100"].unwrap();
    let last = points[24].values["put-100"].unwrap();
    assert!(last > first);
    let call_first = points[0].values["call-95"].unwrap();
    let call_last = points[24].values["call-95"].unwrap();
    assert!(call_first > call_last);
}

#[test]
fn test_lazy_sweep_is_restartable() {
    let ops = book();
    let config = EngineConfig::default();
    let mut iter = Sweep::new(&ops, SweepAxis::Vol, SweepMetric::Pnl, &config).unwrap();
    assert_eq!(iter.len(), 19);

    iter.next().unwrap().unwrap();
    let replay = iter.clone();
    assert_eq!(iter.len(), 18);

    let rest: Vec<_> = iter.map(Result::unwrap).collect();
    let again: Vec<_> = replay.map(Result::unwrap).collect();
    assert_eq!(rest, again);
    assert_eq!(rest[0].label, "15%");
}

#[test]
fn test_duplicate_ids_rejected() {
    let ops = vec![
        operation("dup", WarrantType::Put, dec!(100)),
        operation("dup", WarrantType::Call, dec!(95)),
    ];
    let err = sweep(&ops, SweepAxis::Rate, SweepMetric::Pnl, &EngineConfig::default())
        .unwrap_err();
    assert!(matches!(err, WarrantSimError::InvalidInput { .. }));
}

#[test]
fn test_reserved_ids_rejected() {
    for id in ["label", "xPoints"] {
        let ops = vec![operation(id, WarrantType::Put, dec!(100))];
        assert!(Sweep::new(&ops, SweepAxis::Time, SweepMetric::Pnl, &EngineConfig::default())
            .is_err());
    }
}

#[test]
fn test_empty_book_yields_labels_only() {
    let points = sweep(&[], SweepAxis::Rate, SweepMetric::Roi, &EngineConfig::default()).unwrap();
    assert_eq!(points.len(), 25);
    assert!(points.iter().all(|p| p.values.is_empty()));
}

#[test]
fn test_invalid_operation_fails_sweep() {
    let mut op = operation("bad", WarrantType::Put, dec!(100));
    op.input.warrant.ratio = Decimal::ZERO;
    let result = sweep(&[op], SweepAxis::Rate, SweepMetric::Pnl, &EngineConfig::default());
    assert!(result.is_err());
}

#[test]
fn test_chart_point_json_shape() {
    let points = sweep(&book(), SweepAxis::Rate, SweepMetric::Roi, &EngineConfig::default())
        .unwrap();
    let json = serde_json::to_value(&points[4]).unwrap();
    assert_eq!(json["label"], "2%");
    assert!(json.get("xPoints").is_some());
    assert!(json.get("put-100").is_some());
    assert!(json.get("call-95").is_some());
}

// ===========================================================================
// Comparison and payoff
// ===========================================================================

#[test]
fn test_compare_preserves_order() {
    let ops = book();
    let results = compare(&ops, &EngineConfig::default()).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].id, "put-100");
    assert_eq!(results[1].id, "call-95");
    assert_eq!(results[1].input, ops[1].input);
    assert!(results[0].result.greeks.delta < Decimal::ZERO);
    assert!(results[1].result.greeks.delta > Decimal::ZERO);
}

#[test]
fn test_compare_fails_on_any_invalid_operation() {
    let mut ops = book();
    ops[1].input.bond.face_value = dec!(-1);
    assert!(compare(&ops, &EngineConfig::default()).is_err());
}

#[test]
fn test_payoff_uses_its_own_decay() {
    let op = operation("p", WarrantType::Put, dec!(100));
    let base = payoff_curve(&op.input, &EngineConfig::default()).unwrap();

    let mut config = EngineConfig::default();
    config.payoff_time_decay = dec!(0.9);
    let longer = payoff_curve(&op.input, &config).unwrap();

    assert_eq!(base.len(), 25);
    assert_eq!(base[10].bond_price, longer[10].bond_price);
    assert!(base[10].warrant_value != longer[10].warrant_value);
}

#[test]
fn test_payoff_ignores_simulated_rate() {
    let op = operation("p", WarrantType::Call, dec!(95));
    let mut moved = op.input.clone();
    moved.market.simulated_rate = dec!(0.06);
    let config = EngineConfig::default();
    assert_eq!(
        payoff_curve(&op.input, &config).unwrap(),
        payoff_curve(&moved, &config).unwrap()
    );
}
