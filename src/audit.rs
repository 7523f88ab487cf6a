//! Security audit trail.
//!
//! Trust store reads and confirmed revocations are recorded here. Auditing is best effort: an
//! implementation must not panic and nothing it does can change a verdict.

use std::sync::Arc;

/// Target used by [`TracingAudit`].
pub const AUDIT_TARGET: &str = "ocsp_verifier::audit";

/// Receiver of security-relevant facts.
pub trait AuditLog {
    /// Record one audit message.
    fn audit(&self, message: &str);
}

impl<T: AuditLog + ?Sized> AuditLog for &T {
    fn audit(&self, message: &str) {
        (**self).audit(message)
    }
}

impl<T: AuditLog + ?Sized> AuditLog for Arc<T> {
    fn audit(&self, message: &str) {
        (**self).audit(message)
    }
}

impl<T: AuditLog + ?Sized> AuditLog for Box<T> {
    fn audit(&self, message: &str) {
        (**self).audit(message)
    }
}

/// Audit log that emits `INFO` events under the [`AUDIT_TARGET`] target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingAudit;

impl AuditLog for TracingAudit {
    fn audit(&self, message: &str) {
        tracing::info!(target: AUDIT_TARGET, "{message}");
    }
}
