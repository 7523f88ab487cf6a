//! Trusted issuer certificates.
//!
//! A [`TrustStore`] only enumerates aliased, DER encoded certificates; [`TrustStoreIndex`]
//! decodes them and finds the one whose subject matches an issuer name. Nothing is cached:
//! every lookup enumerates the store again.

use std::sync::Arc;

use der::Decode;
use tracing::debug;
use x509_cert::name::Name;
use x509_cert::Certificate;

use crate::audit::{AuditLog, TracingAudit};
use crate::request::IssuerLookup;
use crate::{Error, Result};

#[cfg(feature = "pem")]
use crate::config::TrustStoreSettings;

/// One aliased certificate held by a [`TrustStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrustStoreEntry {
    /// Name of the entry within its store.
    pub alias: String,
    /// DER encoded certificate.
    pub der: Vec<u8>,
}

/// Read-only, enumerable set of trusted certificates.
pub trait TrustStore {
    /// Where the store lives, for audit messages.
    fn location(&self) -> String;

    /// Enumerate every entry, in the store's own order.
    ///
    /// # Errors
    ///
    /// [`Error::TrustStore`] if the store cannot be opened or enumerated.
    fn entries(&self) -> Result<Vec<TrustStoreEntry>>;
}

impl<T: TrustStore + ?Sized> TrustStore for &T {
    fn location(&self) -> String {
        (**self).location()
    }

    fn entries(&self) -> Result<Vec<TrustStoreEntry>> {
        (**self).entries()
    }
}

impl<T: TrustStore + ?Sized> TrustStore for Arc<T> {
    fn location(&self) -> String {
        (**self).location()
    }

    fn entries(&self) -> Result<Vec<TrustStoreEntry>> {
        (**self).entries()
    }
}

/// Trust store held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryTrustStore {
    name: String,
    entries: Vec<TrustStoreEntry>,
}

impl MemoryTrustStore {
    /// Empty store called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Add a DER encoded certificate under `alias`. The bytes are not checked here.
    pub fn insert_der(&mut self, alias: impl Into<String>, der: impl Into<Vec<u8>>) {
        self.entries.push(TrustStoreEntry {
            alias: alias.into(),
            der: der.into(),
        });
    }

    /// Add `certificate` under `alias`.
    pub fn insert(&mut self, alias: impl Into<String>, certificate: &Certificate) -> Result<()> {
        let der = der::Encode::to_der(certificate).map_err(Error::Encoding)?;
        self.insert_der(alias, der);
        Ok(())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TrustStore for MemoryTrustStore {
    fn location(&self) -> String {
        self.name.clone()
    }

    fn entries(&self) -> Result<Vec<TrustStoreEntry>> {
        Ok(self.entries.clone())
    }
}

/// Trust store backed by a bundle of PEM encoded certificates on disk.
///
/// The file is read on every enumeration. Every block in the bundle must be a `CERTIFICATE`;
/// anything else makes the whole store unreadable.
#[cfg(feature = "pem")]
#[derive(Clone, Debug)]
pub struct PemTrustStore {
    settings: TrustStoreSettings,
}

#[cfg(feature = "pem")]
impl PemTrustStore {
    /// Store reading the bundle named by `settings`.
    pub fn new(settings: TrustStoreSettings) -> Self {
        Self { settings }
    }
}

#[cfg(feature = "pem")]
impl TrustStore for PemTrustStore {
    fn location(&self) -> String {
        self.settings.path.display().to_string()
    }

    fn entries(&self) -> Result<Vec<TrustStoreEntry>> {
        if self.settings.is_blank() {
            return Err(Error::trust_store(
                self.location(),
                "no truststore path configured",
            ));
        }

        let bundle = std::fs::read(&self.settings.path)
            .map_err(|err| Error::trust_store(self.location(), err))?;
        // `load_pem_chain` does not accept an empty input.
        if bundle.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let certificates = Certificate::load_pem_chain(&bundle)
            .map_err(|err| Error::trust_store(self.location(), err))?;
        certificates
            .iter()
            .enumerate()
            .map(|(index, certificate)| {
                Ok(TrustStoreEntry {
                    alias: format!("{}#{index}", self.location()),
                    der: der::Encode::to_der(certificate)
                        .map_err(|err| Error::trust_store(self.location(), err))?,
                })
            })
            .collect()
    }
}

/// Finds issuer certificates in a [`TrustStore`], auditing every read.
#[derive(Clone, Debug)]
pub struct TrustStoreIndex<S, L = TracingAudit> {
    store: S,
    audit: L,
}

impl<S: TrustStore> TrustStoreIndex<S> {
    /// Index over `store`, auditing through `tracing`.
    pub fn new(store: S) -> Self {
        Self::with_audit(store, TracingAudit)
    }
}

impl<S: TrustStore, L: AuditLog> TrustStoreIndex<S, L> {
    /// Index over `store`, auditing through `audit`.
    pub fn with_audit(store: S, audit: L) -> Self {
        Self { store, audit }
    }

    /// Return the first trusted certificate whose subject equals `issuer`.
    ///
    /// Names are compared structurally, so attribute order and string encoding matter.
    /// Entries that fail to decode are skipped.
    pub fn find(&self, issuer: &Name) -> Result<Certificate> {
        let entries = self.store.entries()?;
        self.audit.audit(&format!(
            "Truststore at {} was read by the OCSP verifier.",
            self.store.location()
        ));

        for entry in entries {
            match Certificate::from_der(&entry.der) {
                Ok(certificate) if certificate.tbs_certificate.subject == *issuer => {
                    debug!(alias = %entry.alias, %issuer, "Found issuer in truststore.");
                    return Ok(certificate);
                }
                Ok(_) => {}
                Err(err) => debug!(
                    alias = %entry.alias,
                    error = %err,
                    "Problem loading truststore certificate. Continuing OCSP check."
                ),
            }
        }

        Err(Error::IssuerNotFound {
            issuer: issuer.to_string(),
        })
    }
}

impl<S: TrustStore, L: AuditLog> IssuerLookup for TrustStoreIndex<S, L> {
    fn find_issuer(&self, issuer: &Name) -> Result<Certificate> {
        self.find(issuer)
    }
}
