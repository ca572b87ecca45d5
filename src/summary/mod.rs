//! Category summaries of the expense list.
//!
//! Expenses are grouped into case-insensitive category buckets with
//! subtotals and a grand total, then drawn as a bar chart and a pie chart.

mod aggregation;
mod charts;

pub use aggregation::{CategoryBucket, ExpenseSummary, summarize};
pub use charts::{ChartImages, ChartTheme, render_charts};
