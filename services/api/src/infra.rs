use fatmos::workflows::shift::{EscalationAlert, NotifyError, SupervisorNotifier};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Alerts retained by the in-process notifier before the oldest are dropped.
pub(crate) const MAX_RETAINED_ALERTS: usize = 256;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Supervisor notifier that logs every escalation and keeps the most recent ones.
///
/// The log line is the durable record; the buffer only holds the newest `capacity` alerts.
#[derive(Clone)]
pub(crate) struct InMemorySupervisorNotifier {
    capacity: usize,
    alerts: Arc<Mutex<VecDeque<EscalationAlert>>>,
}

impl InMemorySupervisorNotifier {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            alerts: Arc::default(),
        }
    }

    /// Notifier that only writes the log line and retains nothing.
    pub(crate) fn logging_only() -> Self {
        Self::with_capacity(0)
    }

    pub(crate) fn alerts(&self) -> Vec<EscalationAlert> {
        self.alerts
            .lock()
            .map(|guard| guard.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for InMemorySupervisorNotifier {
    fn default() -> Self {
        Self::with_capacity(MAX_RETAINED_ALERTS)
    }
}

impl SupervisorNotifier for InMemorySupervisorNotifier {
    fn notify(&self, alert: EscalationAlert) -> Result<(), NotifyError> {
        warn!(
            session_id = %alert.session_id,
            checkin_session_id = %alert.checkin_session_id,
            total_score = alert.total_score,
            classification = %alert.classification,
            delta = alert.delta_total,
            critical = ?alert.critical_components,
            "supervisor alert raised"
        );

        if self.capacity == 0 {
            return Ok(());
        }

        let mut guard = self
            .alerts
            .lock()
            .map_err(|_| NotifyError::Transport("alert mutex poisoned".to_string()))?;
        while guard.len() >= self.capacity {
            guard.pop_front();
        }
        guard.push_back(alert);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fatmos::workflows::shift::{Classification, SessionId};

    fn alert(session: &str) -> EscalationAlert {
        EscalationAlert {
            session_id: SessionId(session.to_string()),
            checkin_session_id: SessionId(session.to_string()),
            total_score: 16,
            classification: Classification::SevereFatigue,
            delta_total: 10,
            critical_components: Vec::new(),
            raised_at: Utc::now(),
        }
    }

    #[test]
    fn retains_only_the_newest_alerts() {
        let notifier = InMemorySupervisorNotifier::with_capacity(2);

        for session in ["first", "second", "third"] {
            notifier.notify(alert(session)).expect("notify succeeds");
        }

        let sessions: Vec<String> = notifier
            .alerts()
            .into_iter()
            .map(|alert| alert.session_id.0)
            .collect();
        assert_eq!(sessions, vec!["second", "third"]);
    }

    #[test]
    fn logging_only_notifier_drops_alerts() {
        let notifier = InMemorySupervisorNotifier::logging_only();

        notifier.notify(alert("dropped")).expect("notify succeeds");

        assert!(notifier.alerts().is_empty());
    }

    #[test]
    fn default_capacity_is_bounded() {
        let notifier = InMemorySupervisorNotifier::default();

        for index in 0..MAX_RETAINED_ALERTS + 5 {
            notifier
                .notify(alert(&format!("shift-{index}")))
                .expect("notify succeeds");
        }

        let alerts = notifier.alerts();
        assert_eq!(alerts.len(), MAX_RETAINED_ALERTS);
        assert_eq!(alerts[0].session_id, SessionId("shift-5".to_string()));
    }
}
