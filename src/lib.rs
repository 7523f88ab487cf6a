#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Policy
//!
//! The check is fail-open. Only a responder confirming that a certificate is revoked fails it;
//! every other outcome (unparseable certificate, unknown issuer, unreadable trust store,
//! unreachable or misbehaving responder, no responders at all) lets the connection proceed.
//! Local problems are posted to an [`AlertSink`]. Responder-side problems are only logged.
//!
//! Across responders the status of one certificate is revoked-dominant: a single `revoked`
//! answer outweighs any number of `good` or `unknown` ones.
//!
//! # Usage
//!
//! ```
//! use ocsp_verifier::{
//!     MemoryTrustStore, OcspConfig, ResponderTransport, RevocationVerifier, TransportError,
//!     TransportResponse,
//! };
//! use url::Url;
//!
//! struct Offline;
//!
//! impl ResponderTransport for Offline {
//!     fn post(&self, _: &Url, _: &[u8]) -> Result<TransportResponse, TransportError> {
//!         Err(TransportError::Request("offline".into()))
//!     }
//! }
//!
//! let config = OcspConfig::enabled(["http://ocsp.example.com"]);
//! let verifier = RevocationVerifier::new(&config, MemoryTrustStore::new("memory"), Offline);
//!
//! // Nothing could be verified, so the chain passes.
//! let chain: [&[u8]; 1] = [b"not a certificate"];
//! assert!(verifier.passes_check(&chain));
//! ```
//!
//! # Logging
//!
//! Everything goes through [`tracing`]. Audit records use the [`AUDIT_TARGET`] target and
//! alerts from [`LogAlerts`] use [`ALERT_TARGET`]. Complete request and response dumps are
//! emitted at `TRACE`.

pub mod aia;
pub mod alert;
pub mod audit;
pub mod client;
pub mod config;
pub mod errors;
pub mod ocsp;
pub mod request;
pub mod status;
pub mod transport;
pub mod trust_store;
pub mod verifier;

mod trace;

pub use der;
pub use url;
pub use x509_cert;
pub use x509_ocsp;

pub use crate::{
    aia::responder_urls,
    alert::{AlertSink, LogAlerts, ALERT_TARGET},
    audit::{AuditLog, TracingAudit, AUDIT_TARGET},
    client::ResponderClient,
    config::{OcspConfig, TrustStoreSettings},
    errors::{Error, Result},
    request::{build_request, cert_id, CertIdDigest, IssuerLookup},
    status::{status_for, CertificateStatus},
    transport::{ResponderTransport, TransportError, TransportResponse},
    trust_store::{MemoryTrustStore, TrustStore, TrustStoreEntry, TrustStoreIndex},
    verifier::{RevocationVerifier, Verdict, ALERT_TITLE},
};

#[cfg(feature = "http")]
pub use crate::transport::HttpTransport;

#[cfg(feature = "pem")]
pub use crate::trust_store::PemTrustStore;
