use alloy_primitives::Address;
use env_logger::Env as EnvLog;
use proptest::prelude::*;
use uniswap_v3_math::tick_math::get_sqrt_ratio_at_tick;
use v3charts_liquidity::{reconstruct, reconstruct_with_walk, ActiveLiquidity, DescendingWalk, TickLedger};
use v3charts_types::{CoreError, PoolSnapshot, RawTick, Token};

fn init_log() {
    let _ = env_logger::try_init_from_env(EnvLog::default().default_filter_or("info"));
}

fn snapshot(current_tick: i32, tick_spacing: i32, liquidity: u128) -> PoolSnapshot {
    PoolSnapshot {
        token0: Token::new_with_data(Address::repeat_byte(0x0a), Some("TA".to_string()), Some(18)),
        token1: Token::new_with_data(Address::repeat_byte(0x0b), Some("TB".to_string()), Some(18)),
        fee: 3000,
        tick_spacing,
        current_tick,
        sqrt_price_x96: get_sqrt_ratio_at_tick(current_tick).unwrap(),
        liquidity,
    }
}

fn ledger(ticks: &[(i32, i128)]) -> TickLedger {
    TickLedger::new(ticks.iter().copied().map(RawTick::from).collect())
}

fn profile(active: &ActiveLiquidity) -> Vec<(i32, u128)> {
    active.ticks.iter().map(|tick| (tick.tick, tick.liquidity_active)).collect()
}

#[test]
fn test_scenario_ascending_and_descending_walks() {
    init_log();

    let ledger = ledger(&[(-60, 100), (0, -50), (60, -50)]);
    let result = reconstruct(&snapshot(0, 60, 100), &ledger).unwrap().unwrap();

    assert_eq!(result.active_tick, 0);
    assert_eq!(result.active_index, 1);
    // ascending applies the crossed tick, descending undoes the tick above
    assert_eq!(profile(&result), vec![(-60, 150), (0, 100), (60, 50)]);
    assert_eq!(result.ticks[1].liquidity_net, -50);
}

#[test]
fn test_empty_ledger_is_no_data() {
    init_log();
    assert_eq!(reconstruct(&snapshot(0, 60, 100), &TickLedger::default()).unwrap(), None);
}

#[test]
fn test_active_tick_below_ledger() {
    init_log();

    let ledger = ledger(&[(-60, 100), (60, -100)]);
    let err = reconstruct(&snapshot(-61, 60, 0), &ledger).unwrap_err();

    assert_eq!(err, CoreError::PivotNotFound { active_tick: -120, lowest: Some(-60) });
}

#[test]
fn test_single_tick_at_active_tick() {
    init_log();

    let result = reconstruct(&snapshot(0, 60, 100), &ledger(&[(0, 100)])).unwrap().unwrap();
    assert_eq!(profile(&result), vec![(0, 100)]);
    assert_eq!(result.ticks[0].liquidity_net, 100);

    let result = reconstruct(&snapshot(30, 60, 80), &ledger(&[(-60, 50), (0, 30), (60, -80)])).unwrap().unwrap();
    assert_eq!(profile(&result), vec![(-60, 50), (0, 80), (60, 0)]);
}

#[test]
fn test_negative_current_tick_rounds_down() {
    init_log();

    let ledger = ledger(&[(-120, 70), (-60, 30), (0, -100)]);
    let result = reconstruct(&snapshot(-1, 60, 100), &ledger).unwrap().unwrap();

    assert_eq!(result.active_tick, -60);
    assert_eq!(result.current_tick, -1);
    assert_eq!(profile(&result), vec![(-120, 70), (-60, 100), (0, 0)]);
}

#[test]
fn test_uninitialized_active_tick_skips_pivot() {
    init_log();

    let ledger = ledger(&[(-120, 100), (-60, 50), (60, -150)]);
    let snapshot = snapshot(10, 60, 150);

    let result = reconstruct(&snapshot, &ledger).unwrap().unwrap();
    assert_eq!(result.active_tick, 0);
    // the active delta is zero so the first tick below inherits the pool liquidity
    assert_eq!(profile(&result), vec![(-120, 150), (0, 150), (60, 0)]);

    let result = reconstruct_with_walk(&snapshot, &ledger, DescendingWalk::FromPivot).unwrap().unwrap();
    assert_eq!(profile(&result), vec![(-120, 100), (-60, 150), (0, 150), (60, 0)]);
}

#[test]
fn test_reconstruct_is_idempotent() {
    init_log();

    let ledger = ledger(&[(-600, 10), (-120, 1_000), (60, -10), (600, -1_000)]);
    let snapshot = snapshot(75, 60, 1_010);

    let first = reconstruct(&snapshot, &ledger).unwrap();
    let second = reconstruct(&snapshot, &ledger).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_inconsistent_ledger_saturates() {
    init_log();

    let ledger = ledger(&[(-60, -500), (0, 10), (60, -500)]);
    let result = reconstruct(&snapshot(0, 60, 100), &ledger).unwrap().unwrap();

    assert_eq!(profile(&result), vec![(-60, 90), (0, 100), (60, 0)]);
}

#[derive(Clone, Debug)]
struct Position {
    lower: i32,
    upper: i32,
    liquidity: u128,
}

fn in_range_liquidity(positions: &[Position], tick: i32) -> u128 {
    positions.iter().filter(|p| p.lower <= tick && tick < p.upper).map(|p| p.liquidity).sum()
}

prop_compose! {
    fn position_strategy(spacing: i32)(
        lower in -200i32..200i32,
        width in 1i32..40i32,
        liquidity in 1u128..1_000_000_000_000_000_000_000u128,
    ) -> Position {
        Position { lower: lower * spacing, upper: (lower + width) * spacing, liquidity }
    }
}

prop_compose! {
    fn pool_strategy()(spacing in prop::sample::select(vec![1i32, 10, 60, 200]))(
        positions in prop::collection::vec(position_strategy(spacing), 1..12),
        current_offset in 0i32..100_000i32,
        spacing in Just(spacing),
    ) -> (i32, Vec<Position>, i32) {
        (spacing, positions, current_offset)
    }
}

fn ledger_for(positions: &[Position]) -> TickLedger {
    let ticks = positions.iter().flat_map(|p| [RawTick::new(p.lower, p.liquidity as i128), RawTick::new(p.upper, -(p.liquidity as i128))]).collect();
    TickLedger::new(ticks)
}

proptest! {
    #[test]
    fn reconstructs_in_range_liquidity((spacing, positions, current_offset) in pool_strategy()) {
        let ledger = ledger_for(&positions);
        prop_assert_eq!(ledger.net_sum(), 0);

        let lowest = ledger.lowest().unwrap().index;
        let highest = ledger.highest().unwrap().index;
        let current_tick = lowest + current_offset % (highest - lowest + spacing);

        let active_tick = current_tick.div_euclid(spacing) * spacing;
        let snapshot = snapshot(current_tick, spacing, in_range_liquidity(&positions, active_tick));

        let result = reconstruct_with_walk(&snapshot, &ledger, DescendingWalk::FromPivot).unwrap().unwrap();

        for tick in &result.ticks {
            prop_assert_eq!(tick.liquidity_active, in_range_liquidity(&positions, tick.tick), "tick {}", tick.tick);
        }
        prop_assert!(result.ticks.windows(2).all(|pair| pair[0].tick < pair[1].tick));
    }

    #[test]
    fn default_walk_leaves_out_uninitialized_pivot((spacing, positions, current_offset) in pool_strategy()) {
        let ledger = ledger_for(&positions);
        let lowest = ledger.lowest().unwrap().index;
        let highest = ledger.highest().unwrap().index;
        let current_tick = lowest + current_offset % (highest - lowest + spacing);
        let active_tick = current_tick.div_euclid(spacing) * spacing;
        let liquidity = in_range_liquidity(&positions, active_tick);

        let result = reconstruct(&snapshot(current_tick, spacing, liquidity), &ledger).unwrap().unwrap();
        let pivot = ledger.find_pivot(active_tick).unwrap();
        let pivot_is_active = ledger.get(pivot).unwrap().index == active_tick;

        // the active tick takes the place of the pivot entry whether or not it is initialized
        prop_assert_eq!(result.ticks.len(), ledger.len());
        prop_assert_eq!(result.active_index, pivot);

        // above the active tick both walks agree with the positions
        for tick in &result.ticks[result.active_index..] {
            prop_assert_eq!(tick.liquidity_active, in_range_liquidity(&positions, tick.tick), "tick {}", tick.tick);
        }
        if !pivot_is_active && pivot > 0 {
            prop_assert_eq!(result.ticks[pivot - 1].tick, ledger.get(pivot - 1).unwrap().index);
            prop_assert_eq!(result.ticks[pivot - 1].liquidity_active, liquidity);
        }
    }

    #[test]
    fn walking_back_reproduces_pool_liquidity((spacing, positions, current_offset) in pool_strategy()) {
        let ledger = ledger_for(&positions);
        let lowest = ledger.lowest().unwrap().index;
        let highest = ledger.highest().unwrap().index;
        let current_tick = lowest + current_offset % (highest - lowest + spacing);
        let active_tick = current_tick.div_euclid(spacing) * spacing;
        let liquidity = in_range_liquidity(&positions, active_tick);

        let result = reconstruct(&snapshot(current_tick, spacing, liquidity), &ledger).unwrap().unwrap();
        let ticks = &result.ticks;
        let pivot = result.active_index;

        // from the lowest tick upwards every crossed tick adds its net
        let from_below = ticks[1..=pivot].iter().fold(ticks[0].liquidity_active as i128, |acc, tick| acc + tick.liquidity_net);
        prop_assert_eq!(from_below, liquidity as i128);

        // from the highest tick downwards every crossed tick removes its net
        let last = ticks.len() - 1;
        let from_above = ticks[pivot + 1..].iter().rev().fold(ticks[last].liquidity_active as i128, |acc, tick| acc - tick.liquidity_net);
        prop_assert_eq!(from_above, liquidity as i128);
    }

    #[test]
    fn inconsistent_ledgers_never_panic(
        nets in prop::collection::vec(any::<i128>(), 1..20),
        liquidity in any::<u128>(),
        current_index in 0usize..20,
    ) {
        let ticks: Vec<RawTick> = nets.iter().enumerate().map(|(i, net)| RawTick::new(i as i32 * 60 - 600, *net)).collect();
        let current_tick = ticks[current_index % ticks.len()].index;
        let ledger = TickLedger::new(ticks);

        let result = reconstruct(&snapshot(current_tick, 60, liquidity), &ledger).unwrap().unwrap();
        prop_assert_eq!(result.ticks.len(), ledger.len());
        prop_assert_eq!(result.ticks[result.active_index].liquidity_active, liquidity);
    }
}
