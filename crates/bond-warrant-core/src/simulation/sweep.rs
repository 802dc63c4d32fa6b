//! One-axis scenario sweeps across saved operations, the data behind the
//! comparison chart.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::error::WarrantSimError;
use crate::WarrantSimResult;

use super::config::EngineConfig;
use super::engine::run_simulation;
use super::inputs::{SavedOperation, SimulatorInput, SimulatorOutput};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input dimension varied along the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepAxis {
    /// Simulated yield, 1% to 7%
    Rate,
    /// Days added to each operation's elapsed time, 0 to 365
    Time,
    /// Volatility, 10% to 100%
    Vol,
}

/// Output plotted on the y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SweepMetric {
    /// `profitLossPercent`
    Roi,
    /// `profitLoss`
    Pnl,
    /// `greeks.delta`
    Delta,
}

/// One x-axis position with a value per operation id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataPoint {
    pub label: String,
    /// Grid value in display units: percent for rate and vol, days for time
    pub x_points: Decimal,
    #[serde(flatten)]
    pub values: BTreeMap<String, Option<Decimal>>,
}

const RESERVED_KEYS: [&str; 2] = ["label", "xPoints"];

// ---------------------------------------------------------------------------
// Axis grids
// ---------------------------------------------------------------------------

impl SweepAxis {
    /// (first, last, step) in display units, both ends inclusive.
    fn bounds(self) -> (Decimal, Decimal, Decimal) {
        match self {
            SweepAxis::Rate => (dec!(1), dec!(7), dec!(0.25)),
            SweepAxis::Time => (dec!(0), dec!(365), dec!(15)),
            SweepAxis::Vol => (dec!(10), dec!(100), dec!(5)),
        }
    }

    /// Number of grid points.
    pub fn len(self) -> usize {
        let (first, last, step) = self.bounds();
        ((last - first) / step).floor().to_usize().unwrap_or(0) + 1
    }

    /// The `index`-th grid value, computed from the start to avoid drift.
    pub fn grid_value(self, index: usize) -> Decimal {
        let (first, _, step) = self.bounds();
        first + step * Decimal::from(index)
    }

    pub fn grid(self) -> Vec<Decimal> {
        (0..self.len()).map(|i| self.grid_value(i)).collect()
    }

    pub fn label(self, x: Decimal) -> String {
        match self {
            SweepAxis::Rate | SweepAxis::Vol => format!("{}%", x.normalize()),
            SweepAxis::Time => format!("+{}d", x.normalize()),
        }
    }

    /// Overwrite the swept field of `input` with grid value `x`.
    pub fn apply(self, input: &mut SimulatorInput, x: Decimal) {
        match self {
            SweepAxis::Rate => input.market.simulated_rate = x / dec!(100),
            SweepAxis::Time => input.time.elapsed_days += x,
            SweepAxis::Vol => input.warrant.volatility = x / dec!(100),
        }
    }
}

impl SweepMetric {
    pub fn select(self, output: &SimulatorOutput) -> Option<Decimal> {
        match self {
            SweepMetric::Roi => output.adjusted_pnl.profit_loss_percent,
            SweepMetric::Pnl => Some(output.adjusted_pnl.profit_loss),
            SweepMetric::Delta => Some(output.greeks.delta),
        }
    }
}

// ---------------------------------------------------------------------------
// Lazy sweep
// ---------------------------------------------------------------------------

/// Iterator over the points of one sweep. Each item runs one simulation per
/// operation on a fresh clone of its input. Clone it to replay from the
/// current position.
#[derive(Debug, Clone)]
pub struct Sweep<'a> {
    operations: &'a [SavedOperation],
    axis: SweepAxis,
    metric: SweepMetric,
    config: &'a EngineConfig,
    next: usize,
}

impl<'a> Sweep<'a> {
    pub fn new(
        operations: &'a [SavedOperation],
        axis: SweepAxis,
        metric: SweepMetric,
        config: &'a EngineConfig,
    ) -> WarrantSimResult<Self> {
        config.validate()?;
        let mut seen = HashSet::new();
        for op in operations {
            if RESERVED_KEYS.contains(&op.id.as_str()) {
                return Err(WarrantSimError::invalid(
                    "operations.id",
                    format!("'{}' is reserved for chart point fields", op.id),
                ));
            }
            if !seen.insert(op.id.as_str()) {
                return Err(WarrantSimError::invalid(
                    "operations.id",
                    format!("duplicate operation id '{}'", op.id),
                ));
            }
        }
        Ok(Sweep {
            operations,
            axis,
            metric,
            config,
            next: 0,
        })
    }

    fn point(&self, index: usize) -> WarrantSimResult<ChartDataPoint> {
        let x = self.axis.grid_value(index);
        let mut values = BTreeMap::new();
        for op in self.operations {
            let mut input = op.input.clone();
            self.axis.apply(&mut input, x);
            let output = run_simulation(&input, self.config)?;
            values.insert(op.id.clone(), self.metric.select(&output));
        }
        Ok(ChartDataPoint {
            label: self.axis.label(x),
            x_points: x,
            values,
        })
    }
}

impl Iterator for Sweep<'_> {
    type Item = WarrantSimResult<ChartDataPoint>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.axis.len() {
            return None;
        }
        let index = self.next;
        self.next += 1;
        tracing::trace!(axis = ?self.axis, index, "sweep point");
        Some(self.point(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.axis.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Sweep<'_> {}

/// Evaluate a full sweep: one chart point per grid value, each holding the
/// chosen metric for every operation.
pub fn sweep(
    operations: &[SavedOperation],
    axis: SweepAxis,
    metric: SweepMetric,
    config: &EngineConfig,
) -> WarrantSimResult<Vec<ChartDataPoint>> {
    let points = Sweep::new(operations, axis, metric, config)?.collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(
        axis = ?axis,
        metric = ?metric,
        operations = operations.len(),
        points = points.len(),
        "sweep complete"
    );
    Ok(points)
}
