//! Reading a certificate's status out of an OCSP response.

use core::fmt;

use der::asn1::GeneralizedTime;
use tracing::debug;
use x509_cert::ext::pkix::CrlReason;
use x509_cert::serial_number::SerialNumber;
use x509_ocsp::{CertStatus, OcspResponse};

use crate::ocsp::basic_response;

/// Revocation status of one certificate as reported by one responder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CertificateStatus {
    /// The responder vouches for the certificate.
    Good,

    /// The responder has revoked the certificate.
    Revoked {
        /// When the revocation took effect.
        revocation_time: GeneralizedTime,
        /// Why, if the responder said.
        reason: Option<CrlReason>,
    },

    /// Nothing could be learned; the responder said so, or never said anything usable.
    Unknown,
}

impl CertificateStatus {
    /// Whether this is [`CertificateStatus::Revoked`].
    pub fn is_revoked(&self) -> bool {
        matches!(self, CertificateStatus::Revoked { .. })
    }
}

impl fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CertificateStatus::Good => f.write_str("good"),
            CertificateStatus::Revoked {
                revocation_time,
                reason: Some(reason),
            } => write!(
                f,
                "revoked at {} ({reason:?})",
                revocation_time.to_date_time()
            ),
            CertificateStatus::Revoked {
                revocation_time, ..
            } => write!(f, "revoked at {}", revocation_time.to_date_time()),
            CertificateStatus::Unknown => f.write_str("unknown"),
        }
    }
}

impl From<&CertStatus> for CertificateStatus {
    fn from(status: &CertStatus) -> Self {
        match status {
            CertStatus::Good(_) => CertificateStatus::Good,
            CertStatus::Revoked(info) => CertificateStatus::Revoked {
                revocation_time: info.revocation_time.0,
                reason: info.revocation_reason,
            },
            CertStatus::Unknown(_) => CertificateStatus::Unknown,
        }
    }
}

/// Status the response reports for the certificate with serial number `serial`.
///
/// The first single response whose `CertID` carries `serial` decides. Everything else,
/// including a response that cannot be decoded, is [`CertificateStatus::Unknown`]; this never
/// fails.
pub fn status_for(response: &OcspResponse, serial: &SerialNumber) -> CertificateStatus {
    let basic = match basic_response(response) {
        Ok(Some(basic)) => basic,
        Ok(None) => {
            debug!(
                status = ?response.response_status,
                "OCSP response carries no basic response."
            );
            return CertificateStatus::Unknown;
        }
        Err(err) => {
            debug!(error = %err, "Problem decoding the basic OCSP response.");
            return CertificateStatus::Unknown;
        }
    };

    match basic
        .tbs_response_data
        .responses
        .iter()
        .find(|single| single.cert_id.serial_number == *serial)
    {
        Some(single) => {
            let status = CertificateStatus::from(&single.cert_status);
            debug!(%serial, %status, "Certificate status from OCSP response.");
            status
        }
        None => {
            debug!(%serial, "Certificate status from OCSP response is unknown.");
            CertificateStatus::Unknown
        }
    }
}
