//! Error types.

use crate::transport::TransportError;

/// Alias for [`core::result::Result`] with the `ocsp-verifier` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
///
/// None of these ever escape [`RevocationVerifier::passes_check`]: they end the check of a
/// single certificate (or a single responder URL) and the batch carries on.
///
/// [`RevocationVerifier::passes_check`]: crate::RevocationVerifier::passes_check
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The certificate could not be parsed into its X.509 structure.
    #[error("unable to parse the X.509 certificate: {0}")]
    Conversion(der::Error),

    /// The trust store could not be located, opened or enumerated.
    #[error("problem loading truststore at {location}: {reason}")]
    TrustStore {
        /// Where the store was expected to be.
        location: String,
        /// What went wrong.
        reason: String,
    },

    /// No trusted certificate has a subject equal to the issuer name.
    #[error("could not find a truststore certificate matching issuer {issuer}")]
    IssuerNotFound {
        /// Issuer distinguished name, RFC 4514 rendering.
        issuer: String,
    },

    /// The OCSP request (or one of its digests) could not be encoded.
    #[error("unable to create an OCSP request: {0}")]
    Encoding(der::Error),

    /// The responder could not be reached.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The responder answered with something that is not an OCSP response.
    #[error("problem decoding the OCSP response: {reason}")]
    Decode {
        /// Why the body was rejected.
        reason: String,
    },
}

impl Error {
    /// Whether this error is a local problem the operators must hear about.
    ///
    /// Responder-side failures (`Transport`, `Decode`) only degrade one URL to `Unknown` and are
    /// not alerted.
    pub fn is_local(&self) -> bool {
        !matches!(self, Error::Transport(_) | Error::Decode { .. })
    }

    pub(crate) fn decode(reason: impl Into<String>) -> Self {
        Error::Decode {
            reason: reason.into(),
        }
    }

    pub(crate) fn trust_store(location: impl Into<String>, reason: impl ToString) -> Self {
        Error::TrustStore {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn responder_side_errors_are_not_local() {
        assert!(!Error::decode("empty body").is_local());
        assert!(!Error::Transport(TransportError::Timeout).is_local());
        assert!(Error::IssuerNotFound {
            issuer: "CN=Missing".into()
        }
        .is_local());
        assert!(Error::trust_store("", "no path configured").is_local());
        assert!(Error::Conversion(der::ErrorKind::Failed.into()).is_local());
    }

    #[test]
    fn messages_name_the_failure() {
        let err = Error::IssuerNotFound {
            issuer: "CN=Test CA".into(),
        };
        assert_eq!(
            err.to_string(),
            "could not find a truststore certificate matching issuer CN=Test CA"
        );
        let err = Error::trust_store("/etc/pki/ca.pem", "No such file or directory");
        assert_eq!(
            err.to_string(),
            "problem loading truststore at /etc/pki/ca.pem: No such file or directory"
        );
    }
}
