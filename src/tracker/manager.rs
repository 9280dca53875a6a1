use crate::{
    calendar::Clock,
    errors::{TrackerError, TrackerResult},
    source::TrackerSource,
};

use super::{
    carousel::Transition,
    client::ClientDirectory,
    session::{TrackerSession, TrackerSnapshot},
};

/// Facade that owns the client cache, the data source, and the single active
/// tracker session.
pub struct TrackerManager {
    directory: ClientDirectory,
    session: Option<TrackerSession>,
    source: Box<dyn TrackerSource>,
    clock: Box<dyn Clock>,
    swipe_threshold: f64,
}

impl TrackerManager {
    pub fn new(source: Box<dyn TrackerSource>, clock: Box<dyn Clock>, swipe_threshold: f64) -> Self {
        Self {
            directory: ClientDirectory::default(),
            session: None,
            source,
            clock,
            swipe_threshold,
        }
    }

    pub fn directory(&self) -> &ClientDirectory {
        &self.directory
    }

    pub fn session(&self) -> Option<&TrackerSession> {
        self.session.as_ref()
    }

    pub fn swipe_threshold(&self) -> f64 {
        self.swipe_threshold
    }

    pub fn set_swipe_threshold(&mut self, threshold: f64) {
        self.swipe_threshold = threshold;
    }

    /// Reloads the client list. On failure the previous list stays cached and
    /// the error is returned for reporting.
    pub fn refresh_clients(&mut self) -> TrackerResult<usize> {
        match self.source.load_clients() {
            Ok(records) => {
                self.directory.replace_all(records, self.clock.today());
                tracing::info!(clients = self.directory.len(), "tracker clients loaded");
                Ok(self.directory.len())
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load tracker clients; keeping previous list");
                Err(err)
            }
        }
    }

    /// Opens the tracker for `code`, replacing any previous session.
    ///
    /// The client list is fetched first when the code is not cached. A failed
    /// spend fetch yields an empty record set rather than an error.
    pub fn open_client(&mut self, code: &str) -> TrackerResult<&TrackerSession> {
        self.session = None;
        if !self.directory.contains(code) {
            // A failed refresh is already logged; the lookup below decides.
            let _ = self.refresh_clients();
        }
        let client = self
            .directory
            .get(code)
            .cloned()
            .ok_or_else(|| TrackerError::ClientNotFound(code.to_string()))?;

        let records = match self.source.load_spend(code) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(client = code, error = %err, "failed to load spend records; using none");
                Vec::new()
            }
        };
        tracing::info!(client = code, records = records.len(), "tracker opened");

        let session = self
            .session
            .insert(TrackerSession::open(client, records, self.clock.today()));
        Ok(&*session)
    }

    pub fn close(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::debug!(client = %session.client().code, "tracker closed");
        }
    }

    /// No-op (returns `None`) when no tracker is open or the index is out of
    /// range.
    pub fn select_index(&mut self, index: usize) -> Option<Transition> {
        self.session.as_mut()?.select_index(index)
    }

    /// Swipe using the configured threshold.
    pub fn swipe(&mut self, delta_x: f64) -> Option<Transition> {
        let threshold = self.swipe_threshold;
        self.session.as_mut()?.swipe(delta_x, threshold)
    }

    pub fn snapshot(&self) -> Option<TrackerSnapshot> {
        self.session.as_ref().map(TrackerSession::snapshot)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    };

    use chrono::NaiveDate;

    use super::*;
    use crate::{
        calendar::{FixedClock, Month, Quarter},
        tracker::{client::ClientRecord, spend::SpendRecord},
    };

    struct StubSource {
        fail_clients: Arc<AtomicBool>,
        fail_spend: bool,
    }

    impl TrackerSource for StubSource {
        fn load_clients(&self) -> TrackerResult<Vec<ClientRecord>> {
            if self.fail_clients.load(Ordering::SeqCst) {
                return Err(TrackerError::Config("clients feed offline".into()));
            }
            Ok(vec![ClientRecord {
                code: "ACME".into(),
                name: "Acme".into(),
                committed: 1000.0,
                rollover: Some(300.0),
                current_quarter: Some(Quarter::Q2),
            }])
        }

        fn load_spend(&self, client_code: &str) -> TrackerResult<Vec<SpendRecord>> {
            if self.fail_spend {
                return Err(TrackerError::Config(format!("spend feed offline for {client_code}")));
            }
            Ok(vec![SpendRecord::new("April", 1200.0)])
        }
    }

    fn manager(fail_spend: bool) -> (TrackerManager, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        let source = StubSource {
            fail_clients: Arc::clone(&flag),
            fail_spend,
        };
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2025, 4, 18).unwrap());
        (
            TrackerManager::new(Box::new(source), Box::new(clock), 50.0),
            flag,
        )
    }

    #[test]
    fn open_client_fetches_directory_on_demand() {
        let (mut manager, _) = manager(false);
        let session = manager.open_client("ACME").unwrap();
        assert_eq!(session.active_month(), Month::April);
        assert!(session.month_status().over);
        assert_eq!(manager.directory().len(), 1);
    }

    #[test]
    fn unknown_client_reports_not_found_and_clears_session() {
        let (mut manager, _) = manager(false);
        manager.open_client("ACME").unwrap();
        let err = manager.open_client("NOPE").unwrap_err();
        assert!(matches!(err, TrackerError::ClientNotFound(code) if code == "NOPE"));
        assert!(manager.session().is_none());
    }

    #[test]
    fn failed_spend_fetch_yields_empty_records() {
        let (mut manager, _) = manager(true);
        let session = manager.open_client("ACME").unwrap();
        assert!(session.records().is_empty());
        assert_eq!(session.quarter_status().spent, 0.0);
    }

    #[test]
    fn failed_client_refresh_keeps_previous_cache() {
        let (mut manager, flag) = manager(false);
        manager.refresh_clients().unwrap();
        flag.store(true, Ordering::SeqCst);
        assert!(manager.refresh_clients().is_err());
        assert!(manager.directory().contains("ACME"));
    }

    #[test]
    fn navigation_without_session_is_a_no_op() {
        let (mut manager, _) = manager(false);
        assert!(manager.select_index(1).is_none());
        assert!(manager.swipe(120.0).is_none());
        assert!(manager.snapshot().is_none());
    }

    #[test]
    fn swipe_uses_configured_threshold() {
        let (mut manager, _) = manager(false);
        manager.open_client("ACME").unwrap();
        assert!(manager.swipe(30.0).is_none());
        let transition = manager.swipe(60.0).unwrap();
        assert_eq!(transition.to, 1);
        manager.close();
        assert!(manager.session().is_none());
    }
}
