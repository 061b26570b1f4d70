pub mod rollup;

pub use rollup::{
    daily_total, grand_total, month_to_date, monthly_total, period_total, salesperson_rollup,
    weekly_total, SalespersonTotals,
};
