//! Chart-ready aggregations over table columns.
//!
//! Builders return plain label/count/point vectors; rendering is the
//! client's business. Missing cells are excluded from every aggregation.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WorkbenchError};
use crate::table::{Column, ColumnType, Table};

/// Bin count used when a histogram request does not specify one.
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// The supported chart families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Pie,
    Bar,
    Histogram,
    Scatter,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Pie,
        ChartKind::Bar,
        ChartKind::Histogram,
        ChartKind::Scatter,
    ];

    /// Whether a column of the given type can feed this chart kind.
    ///
    /// Pie charts want label-like columns, histograms and scatter plots
    /// want numeric ones, bar charts count occurrences of anything.
    pub fn accepts(&self, dtype: ColumnType) -> bool {
        match self {
            ChartKind::Pie => matches!(dtype, ColumnType::Text | ColumnType::Categorical),
            ChartKind::Bar => true,
            ChartKind::Histogram | ChartKind::Scatter => dtype.is_numeric(),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::Pie => "pie",
            ChartKind::Bar => "bar",
            ChartKind::Histogram => "histogram",
            ChartKind::Scatter => "scatter",
        };
        write!(f, "{}", name)
    }
}

/// One histogram bin over `[start, end)`; the last bin includes `end`.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Chart payloads, tagged by kind for the JSON consumer.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartData {
    Pie {
        labels: Vec<String>,
        counts: Vec<usize>,
    },
    Bar {
        labels: Vec<String>,
        counts: Vec<usize>,
    },
    Histogram {
        bins: Vec<HistogramBin>,
    },
    Scatter {
        x: Vec<f64>,
        y: Vec<f64>,
    },
}

/// Names of the columns usable for the given chart kind, in table order.
pub fn eligible_columns(table: &Table, kind: ChartKind) -> Vec<String> {
    table
        .columns()
        .iter()
        .filter(|col| kind.accepts(col.column_type()))
        .map(|col| col.name.clone())
        .collect()
}

/// Look up a column and check its type against the chart kind.
fn eligible_column<'t>(table: &'t Table, name: &str, kind: ChartKind) -> Result<&'t Column> {
    let col = table.column(name)?;
    if !kind.accepts(col.column_type()) {
        return Err(WorkbenchError::ChartColumn {
            column: name.to_string(),
            kind,
        });
    }
    Ok(col)
}

/// Occurrence counts of the non-missing values, most frequent first,
/// ties broken by label.
fn value_counts(column: &Column) -> (Vec<String>, Vec<usize>) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in &column.values {
        if let Some(text) = value.display() {
            *counts.entry(text).or_insert(0) += 1;
        }
    }
    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.into_iter().unzip()
}

/// Share-of-category data for a label-like column.
pub fn pie_data(table: &Table, column: &str) -> Result<ChartData> {
    let col = eligible_column(table, column, ChartKind::Pie)?;
    let (labels, counts) = value_counts(col);
    Ok(ChartData::Pie { labels, counts })
}

/// Occurrence counts for any column.
pub fn bar_data(table: &Table, column: &str) -> Result<ChartData> {
    let col = eligible_column(table, column, ChartKind::Bar)?;
    let (labels, counts) = value_counts(col);
    Ok(ChartData::Bar { labels, counts })
}

/// Equal-width bins over the numeric values of a column.
///
/// A constant column widens its range by 0.5 on both sides so the single
/// spike still gets a drawable bin. No numeric data yields an empty bin
/// list. `bins` is clamped to at least 1.
pub fn histogram_data(table: &Table, column: &str, bins: usize) -> Result<ChartData> {
    let col = eligible_column(table, column, ChartKind::Histogram)?;
    let values: Vec<f64> = col.values.iter().filter_map(|v| v.as_f64()).collect();
    if values.is_empty() {
        return Ok(ChartData::Histogram { bins: Vec::new() });
    }
    let bins = bins.max(1);
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in &values {
        min = min.min(v);
        max = max.max(v);
    }
    if min == max {
        min -= 0.5;
        max += 0.5;
    }
    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in &values {
        // Values on the upper edge fall into the last bin.
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + width * i as f64,
            // The last edge is pinned to max to dodge float accumulation.
            end: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count,
        })
        .collect();
    Ok(ChartData::Histogram { bins })
}

/// Paired numeric values for rows where both columns are non-missing.
pub fn scatter_data(table: &Table, x: &str, y: &str) -> Result<ChartData> {
    let xcol = eligible_column(table, x, ChartKind::Scatter)?;
    let ycol = eligible_column(table, y, ChartKind::Scatter)?;
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for (xv, yv) in xcol.values.iter().zip(&ycol.values) {
        if let (Some(a), Some(b)) = (xv.as_f64(), yv.as_f64()) {
            xs.push(a);
            ys.push(b);
        }
    }
    Ok(ChartData::Scatter { x: xs, y: ys })
}
