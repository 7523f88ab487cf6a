//! Responder URLs advertised by a certificate's Authority Information Access extension.

use tracing::debug;
use url::Url;
use x509_cert::ext::pkix::name::GeneralName;
use x509_cert::ext::pkix::AuthorityInfoAccessSyntax;
use x509_cert::Certificate;

/// OCSP responder URLs listed in `certificate`'s Authority Information Access extension.
///
/// Every access description with a URI location counts, whatever its access method, so a
/// `caIssuers` location is queried as a responder too. A missing or malformed extension, and
/// locations that do not parse as URLs, contribute nothing.
pub fn responder_urls(certificate: &Certificate) -> Vec<Url> {
    let aia = match certificate
        .tbs_certificate
        .get::<AuthorityInfoAccessSyntax>()
    {
        Ok(Some((_, aia))) => aia,
        Ok(None) => return Vec::new(),
        Err(err) => {
            debug!(
                error = %err,
                "Problem retrieving the OCSP server url(s) from the certificate. Continuing OCSP check."
            );
            return Vec::new();
        }
    };

    aia.0
        .iter()
        .filter_map(|description| match &description.access_location {
            GeneralName::UniformResourceIdentifier(uri) => Some(uri.to_string()),
            _ => None,
        })
        .filter_map(|uri| match Url::parse(&uri) {
            Ok(url) => Some(url),
            Err(err) => {
                debug!(%uri, error = %err, "Location is not a URI.");
                None
            }
        })
        .collect()
}
