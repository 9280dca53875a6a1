use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::{Month, Quarter, QuarterWindow, WINDOW_LEN};

use super::{
    carousel::{Carousel, Direction, Transition},
    client::ClientBudget,
    spend::{month_spend, monthly_breakdown, quarter_spend, SpendRecord},
    status::{month_status, quarter_status, rollover_for, BudgetStatus, Rollover},
};

/// State of one open tracker view: the client snapshot, the spend records
/// loaded for it, and the carousel position.
///
/// The session is owned by the view layer and replaced wholesale when another
/// client is opened. Month status is recomputed on every transition; quarter
/// status only depends on the loaded records.
#[derive(Debug, Clone)]
pub struct TrackerSession {
    client: ClientBudget,
    records: Vec<SpendRecord>,
    window: QuarterWindow,
    carousel: Carousel,
    month_status: BudgetStatus,
    quarter_status: BudgetStatus,
}

impl TrackerSession {
    pub fn open(client: ClientBudget, records: Vec<SpendRecord>, today: NaiveDate) -> Self {
        let window = QuarterWindow::for_quarter(client.quarter_label);
        let carousel = Carousel::reset(&window, today);
        let quarter_status = quarter_status(&client, quarter_spend(&records, &window));
        let mut session = Self {
            month_status: BudgetStatus::compute(client.committed_monthly, 0.0),
            quarter_status,
            client,
            records,
            window,
            carousel,
        };
        session.refresh_month_status();
        tracing::debug!(
            client = %session.client.code,
            records = session.records.len(),
            month = %session.active_month(),
            "tracker session opened"
        );
        session
    }

    pub fn client(&self) -> &ClientBudget {
        &self.client
    }

    pub fn records(&self) -> &[SpendRecord] {
        &self.records
    }

    pub fn window(&self) -> &QuarterWindow {
        &self.window
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn active_index(&self) -> usize {
        self.carousel.index()
    }

    pub fn active_month(&self) -> Month {
        // The carousel index is always within the window.
        self.window.months()[self.carousel.index()]
    }

    pub fn month_status(&self) -> BudgetStatus {
        self.month_status
    }

    pub fn quarter_status(&self) -> BudgetStatus {
        self.quarter_status
    }

    pub fn rollover(&self) -> Option<Rollover> {
        rollover_for(&self.client)
    }

    pub fn dots(&self) -> [bool; WINDOW_LEN] {
        self.carousel.dots()
    }

    pub fn select_index(&mut self, index: usize) -> Option<Transition> {
        let transition = self.carousel.select_index(index)?;
        self.refresh_month_status();
        Some(transition)
    }

    pub fn swipe(&mut self, delta_x: f64, threshold: f64) -> Option<Transition> {
        let transition = self.carousel.swipe(delta_x, threshold)?;
        self.refresh_month_status();
        Some(transition)
    }

    pub fn swipe_between(&mut self, start_x: f64, end_x: f64, threshold: f64) -> Option<Transition> {
        let transition = self.carousel.swipe_between(start_x, end_x, threshold)?;
        self.refresh_month_status();
        Some(transition)
    }

    /// Everything the view needs to draw the tracker.
    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot {
            client_code: self.client.code.clone(),
            client_name: self.client.name.clone(),
            quarter_label: self.window.quarter(),
            quarter_range: self.window.range_label(),
            months: *self.window.months(),
            monthly_spend: monthly_breakdown(&self.records, &self.window),
            active_index: self.carousel.index(),
            active_month: self.active_month(),
            direction: self.carousel.last_direction(),
            dots: self.carousel.dots(),
            month: self.month_status,
            quarter: self.quarter_status,
            rollover: self.rollover(),
        }
    }

    fn refresh_month_status(&mut self) {
        let spent = month_spend(&self.records, self.active_month());
        self.month_status = month_status(&self.client, spent);
    }
}

/// Read-only view model produced from a [`TrackerSession`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerSnapshot {
    pub client_code: String,
    pub client_name: String,
    pub quarter_label: Quarter,
    pub quarter_range: String,
    pub months: [Month; WINDOW_LEN],
    pub monthly_spend: [f64; WINDOW_LEN],
    pub active_index: usize,
    pub active_month: Month,
    pub direction: Option<Direction>,
    pub dots: [bool; WINDOW_LEN],
    pub month: BudgetStatus,
    pub quarter: BudgetStatus,
    pub rollover: Option<Rollover>,
}
