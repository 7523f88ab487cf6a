//! Revocation check over a certificate chain.
//!
//! Certificates are checked one at a time in input order, and each certificate's responders one
//! at a time. A confirmed revocation ends the whole check. Every other failure is recovered
//! locally: the certificate (or responder) it hit is treated as unverified and the check goes on.

use std::collections::{BTreeMap, BTreeSet};

use der::asn1::GeneralizedTime;
use der::Decode;
use tracing::{debug, warn};
use url::Url;
use x509_cert::ext::pkix::CrlReason;
use x509_cert::serial_number::SerialNumber;
use x509_cert::Certificate;
use x509_ocsp::OcspRequest;

use crate::aia::responder_urls;
use crate::alert::{AlertSink, LogAlerts};
use crate::audit::{AuditLog, TracingAudit};
use crate::client::ResponderClient;
use crate::config::OcspConfig;
use crate::request::build_request;
use crate::status::{status_for, CertificateStatus};
use crate::trace;
use crate::transport::ResponderTransport;
use crate::trust_store::{TrustStore, TrustStoreIndex};
use crate::{Error, Result};

/// Title of every alert the verifier posts.
pub const ALERT_TITLE: &str = "Problem checking the revocation status of the Certificate through OCSP.";

const ALERT_IMPACT: &str = "An error occurred while checking the revocation status of a \
    Certificate against an Online Certificate Status Protocol (OCSP) server. Please resolve the \
    error to resume validating certificates against the OCSP server.";

const NOT_VERIFIED: &str = " The certificate status could not be verified.";

/// Outcome of [`RevocationVerifier::check`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// No certificate was found revoked. This includes certificates that could not be checked.
    Pass,

    /// A responder reported a certificate as revoked.
    Revoked {
        /// Position of the certificate in the input.
        index: usize,
        /// Serial number of the revoked certificate.
        serial: SerialNumber,
        /// First responder, in URL order, that reported the revocation.
        responder: Url,
        /// Revocation time reported by that responder.
        revoked_at: GeneralizedTime,
        /// Revocation reason reported by that responder, if any.
        reason: Option<CrlReason>,
    },
}

impl Verdict {
    /// Whether the connection may proceed.
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// Fail-open OCSP revocation verifier.
///
/// Issuers are resolved through the trust store `S`, responders are reached through the
/// transport `T`, local failures are posted to `A` and security-relevant facts are recorded in
/// `L`.
#[derive(Clone, Debug)]
pub struct RevocationVerifier<S, T, A = LogAlerts, L = TracingAudit> {
    enabled: bool,
    static_urls: BTreeSet<Url>,
    store: S,
    client: ResponderClient<T>,
    alerts: A,
    audit: L,
}

impl<S, T> RevocationVerifier<S, T>
where
    S: TrustStore,
    T: ResponderTransport,
{
    /// Verifier configured by `config`, alerting and auditing through `tracing`.
    pub fn new(config: &OcspConfig, store: S, transport: T) -> Self {
        Self {
            enabled: config.enabled,
            static_urls: config.static_urls(),
            store,
            client: ResponderClient::new(transport),
            alerts: LogAlerts,
            audit: TracingAudit,
        }
    }
}

impl<S, T, A, L> RevocationVerifier<S, T, A, L> {
    /// Replace the alert sink.
    pub fn with_alerts<B: AlertSink>(self, alerts: B) -> RevocationVerifier<S, T, B, L> {
        RevocationVerifier {
            enabled: self.enabled,
            static_urls: self.static_urls,
            store: self.store,
            client: self.client,
            alerts,
            audit: self.audit,
        }
    }

    /// Replace the audit log.
    pub fn with_audit<M: AuditLog>(self, audit: M) -> RevocationVerifier<S, T, A, M> {
        RevocationVerifier {
            enabled: self.enabled,
            static_urls: self.static_urls,
            store: self.store,
            client: self.client,
            alerts: self.alerts,
            audit,
        }
    }

    /// Whether checks are performed at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Responders queried for every certificate.
    pub fn static_urls(&self) -> &BTreeSet<Url> {
        &self.static_urls
    }
}

impl<S, T, A, L> RevocationVerifier<S, T, A, L>
where
    S: TrustStore,
    T: ResponderTransport,
    A: AlertSink,
    L: AuditLog,
{
    /// Whether none of the DER encoded `certificates` has been revoked.
    ///
    /// Returns `true` when the check is disabled, when `certificates` is empty, and when a
    /// certificate could not be checked. Never fails.
    pub fn passes_check<C: AsRef<[u8]>>(&self, certificates: &[C]) -> bool {
        self.check(certificates).is_pass()
    }

    /// Check the DER encoded `certificates` in order, stopping at the first revocation.
    pub fn check<C: AsRef<[u8]>>(&self, certificates: &[C]) -> Verdict {
        if !self.enabled {
            return Verdict::Pass;
        }

        for (index, der) in certificates.iter().enumerate() {
            match self.check_one(index, der.as_ref()) {
                Ok(Some(verdict)) => return verdict,
                Ok(None) => {}
                Err(err) => self.post_error(&err),
            }
        }
        Verdict::Pass
    }

    fn check_one(&self, index: usize, der: &[u8]) -> Result<Option<Verdict>> {
        let certificate = Certificate::from_der(der).map_err(Error::Conversion)?;
        let issuers = TrustStoreIndex::with_audit(&self.store, &self.audit);
        let request = build_request(&certificate, &issuers)?;

        let statuses = self.query_responders(&certificate, &request);
        let revoked = statuses.into_iter().find_map(|(url, status)| match status {
            CertificateStatus::Revoked {
                revocation_time,
                reason,
            } => Some((url, revocation_time, reason)),
            _ => None,
        });

        let Some((responder, revoked_at, reason)) = revoked else {
            return Ok(None);
        };

        let tbs = &certificate.tbs_certificate;
        let message = format!(
            "Certificate {} has been revoked by the OCSP server at URL {responder}.",
            tbs.subject
        );
        warn!(serial = %tbs.serial_number, "{message}");
        self.audit.audit(&message);

        Ok(Some(Verdict::Revoked {
            index,
            serial: tbs.serial_number.clone(),
            responder,
            revoked_at,
            reason,
        }))
    }

    /// Send `request` to every responder for `certificate` and collect the status each reports.
    ///
    /// Responders are the static URLs plus the ones `certificate` advertises in its Authority
    /// Information Access extension. A responder that cannot be reached or answers with
    /// something undecodable is recorded as [`CertificateStatus::Unknown`].
    pub fn query_responders(
        &self,
        certificate: &Certificate,
        request: &OcspRequest,
    ) -> BTreeMap<Url, CertificateStatus> {
        let mut urls = self.static_urls.clone();
        urls.extend(responder_urls(certificate));

        trace::log_request(request);
        let serial = &certificate.tbs_certificate.serial_number;
        urls.into_iter()
            .map(|url| {
                let status = match self.client.send(&url, request) {
                    Ok(response) => {
                        trace::log_response(&response);
                        status_for(&response, serial)
                    }
                    Err(err) => {
                        debug!(
                            %url,
                            error = %err,
                            "Problem with the response from the OCSP Server at URL. Continuing OCSP check."
                        );
                        CertificateStatus::Unknown
                    }
                };
                (url, status)
            })
            .collect()
    }

    fn post_error(&self, err: &Error) {
        let message = format!("{err}.{NOT_VERIFIED}");
        if !err.is_local() {
            debug!("{message}");
            return;
        }

        let details = BTreeSet::from([ALERT_IMPACT.to_owned(), message.clone()]);
        self.alerts.post_alert(ALERT_TITLE, &details);
        self.audit.audit(ALERT_TITLE);
        self.audit.audit(&message);
        debug!("{message}");
    }
}
