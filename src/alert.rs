//! Operational alerts.
//!
//! Every local problem that stops a certificate from being checked (unparseable certificate,
//! unreadable trust store, unknown issuer, unencodable request) is posted once as an alert.
//! Responder-side failures and confirmed revocations are never alerted.

use std::collections::BTreeSet;
use std::sync::Arc;

/// Target used by [`LogAlerts`].
pub const ALERT_TARGET: &str = "ocsp_verifier::alert";

/// Fire-and-forget notification channel to the operators.
pub trait AlertSink {
    /// Post an alert. Must not block on delivery or panic.
    fn post_alert(&self, title: &str, details: &BTreeSet<String>);
}

impl<T: AlertSink + ?Sized> AlertSink for &T {
    fn post_alert(&self, title: &str, details: &BTreeSet<String>) {
        (**self).post_alert(title, details)
    }
}

impl<T: AlertSink + ?Sized> AlertSink for Arc<T> {
    fn post_alert(&self, title: &str, details: &BTreeSet<String>) {
        (**self).post_alert(title, details)
    }
}

impl<T: AlertSink + ?Sized> AlertSink for Box<T> {
    fn post_alert(&self, title: &str, details: &BTreeSet<String>) {
        (**self).post_alert(title, details)
    }
}

/// Alert sink that emits `ERROR` events under the [`ALERT_TARGET`] target.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogAlerts;

impl AlertSink for LogAlerts {
    fn post_alert(&self, title: &str, details: &BTreeSet<String>) {
        tracing::error!(target: ALERT_TARGET, ?details, "{title}");
    }
}
