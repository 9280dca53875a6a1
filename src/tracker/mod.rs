//! Budget tracking engine: spend aggregation, budget status, and the quarter
//! carousel, tied together by an explicit per-client session.

pub mod carousel;
pub mod client;
pub mod manager;
pub mod session;
pub mod spend;
pub mod status;

pub use carousel::{Carousel, Direction, Transition};
pub use client::{ClientBudget, ClientDirectory, ClientRecord};
pub use manager::TrackerManager;
pub use session::{TrackerSession, TrackerSnapshot};
pub use spend::{month_spend, monthly_breakdown, quarter_spend, SpendRecord};
pub use status::{
    month_status, progress_percent, quarter_status, rollover_for, BudgetStatus, Granularity,
    Rollover, PERIODS_PER_QUARTER,
};
