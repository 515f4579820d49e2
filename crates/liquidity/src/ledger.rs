use v3charts_types::{CoreError, RawTick};

/// Initialized ticks of a pool, ascending by index with one entry per index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickLedger {
    ticks: Vec<RawTick>,
}

impl TickLedger {
    /// Sorts the ticks and merges repeated indexes, which appear when scanned bitmap words overlap.
    pub fn new(mut ticks: Vec<RawTick>) -> Self {
        ticks.sort_by_key(|tick| tick.index);

        let mut merged: Vec<RawTick> = Vec::with_capacity(ticks.len());
        for tick in ticks {
            match merged.last_mut() {
                Some(last) if last.index == tick.index => {
                    last.liquidity_net = last.liquidity_net.saturating_add(tick.liquidity_net);
                }
                _ => merged.push(tick),
            }
        }

        Self { ticks: merged }
    }

    /// Position of the greatest tick at or below `active_tick`.
    pub fn find_pivot(&self, active_tick: i32) -> Result<usize, CoreError> {
        match self.ticks.partition_point(|tick| tick.index <= active_tick) {
            0 => Err(CoreError::PivotNotFound { active_tick, lowest: self.lowest().map(|tick| tick.index) }),
            above => Ok(above - 1),
        }
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&RawTick> {
        self.ticks.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawTick> {
        self.ticks.iter()
    }

    pub fn as_slice(&self) -> &[RawTick] {
        &self.ticks
    }

    /// Sum of all net liquidity, zero for a consistent pool.
    pub fn net_sum(&self) -> i128 {
        self.ticks.iter().fold(0i128, |acc, tick| acc.saturating_add(tick.liquidity_net))
    }

    pub fn lowest(&self) -> Option<&RawTick> {
        self.ticks.first()
    }

    pub fn highest(&self) -> Option<&RawTick> {
        self.ticks.last()
    }
}

impl From<Vec<RawTick>> for TickLedger {
    fn from(value: Vec<RawTick>) -> Self {
        Self::new(value)
    }
}
