//! Building OCSP requests.
//!
//! A request names the certificate by its [`CertId`]: digests of the issuer's name and public
//! key plus the certificate serial number. The digest is [`CertIdDigest`] (SHA-1), which is what
//! responders expect regardless of the algorithms used elsewhere in the chain.

use const_oid::AssociatedOid;
use der::asn1::{Any, AnyRef, OctetString};
use der::Encode;
use digest::Digest;
use spki::AlgorithmIdentifierOwned;
use x509_cert::name::Name;
use x509_cert::Certificate;
use x509_ocsp::{CertId, OcspRequest};

use crate::ocsp::single_request;
use crate::{Error, Result};

/// Digest used for the issuer name and key hashes of every [`CertId`] this crate builds.
pub type CertIdDigest = sha1::Sha1;

/// Source of issuer certificates.
pub trait IssuerLookup {
    /// Find the certificate whose subject is `issuer`.
    ///
    /// # Errors
    ///
    /// [`Error::IssuerNotFound`] when nothing matches, [`Error::TrustStore`] when the backing
    /// store cannot be read.
    fn find_issuer(&self, issuer: &Name) -> Result<Certificate>;
}

impl<T: IssuerLookup + ?Sized> IssuerLookup for &T {
    fn find_issuer(&self, issuer: &Name) -> Result<Certificate> {
        (**self).find_issuer(issuer)
    }
}

/// Derive the [`CertId`] of `certificate` issued by `issuer` using [`CertIdDigest`].
pub fn cert_id(certificate: &Certificate, issuer: &Certificate) -> Result<CertId> {
    cert_id_with_digest::<CertIdDigest>(certificate, issuer)
}

/// Derive the [`CertId`] of `certificate` issued by `issuer` using the digest `D`.
///
/// The name hash covers the DER encoding of the issuer's subject name; the key hash covers the
/// issuer's `subjectPublicKey` bits, without tag, length or unused-bits octet.
pub fn cert_id_with_digest<D>(certificate: &Certificate, issuer: &Certificate) -> Result<CertId>
where
    D: Digest + AssociatedOid,
{
    let issuer_tbs = &issuer.tbs_certificate;
    let name = issuer_tbs.subject.to_der().map_err(Error::Encoding)?;
    let key = issuer_tbs
        .subject_public_key_info
        .subject_public_key
        .raw_bytes();

    Ok(CertId {
        hash_algorithm: AlgorithmIdentifierOwned {
            oid: D::OID,
            parameters: Some(Any::from(AnyRef::NULL)),
        },
        issuer_name_hash: OctetString::new(D::digest(&name).to_vec()).map_err(Error::Encoding)?,
        issuer_key_hash: OctetString::new(D::digest(key).to_vec()).map_err(Error::Encoding)?,
        serial_number: certificate.tbs_certificate.serial_number.clone(),
    })
}

/// Build the OCSP request for `certificate`, resolving its issuer through `issuers`.
///
/// The request holds exactly one [`CertId`] and is neither signed nor extended.
pub fn build_request<I>(certificate: &Certificate, issuers: &I) -> Result<OcspRequest>
where
    I: IssuerLookup + ?Sized,
{
    let issuer = issuers.find_issuer(&certificate.tbs_certificate.issuer)?;
    Ok(single_request(cert_id(certificate, &issuer)?))
}
