//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use core::str::FromStr;
use core::time::Duration;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use const_oid::db::rfc5912::{ID_AD_OCSP, SHA_256_WITH_RSA_ENCRYPTION};
use const_oid::AssociatedOid;
use der::asn1::{BitString, GeneralizedTime, Ia5String, Null, OctetString, UtcTime};
use der::Encode;
use ocsp_verifier::ocsp::successful_response;
use ocsp_verifier::{AlertSink, AuditLog, ResponderTransport, TransportError, TransportResponse};
use spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned};
use url::Url;
use x509_cert::certificate::{TbsCertificate, Version as CertVersion};
use x509_cert::ext::pkix::name::GeneralName;
use x509_cert::ext::pkix::{AccessDescription, AuthorityInfoAccessSyntax, CrlReason};
use x509_cert::ext::Extension;
use x509_cert::name::Name;
use x509_cert::serial_number::SerialNumber;
use x509_cert::time::{Time, Validity};
use x509_cert::Certificate;
use x509_ocsp::{
    BasicOcspResponse, CertId, CertStatus, OcspGeneralizedTime, ResponderId, ResponseData,
    RevokedInfo, SingleResponse, Version,
};

pub const CA: &str = "CN=Test CA,O=Example";

fn algorithm() -> AlgorithmIdentifierOwned {
    AlgorithmIdentifierOwned {
        oid: SHA_256_WITH_RSA_ENCRYPTION,
        parameters: None,
    }
}

pub fn time(secs: u64) -> GeneralizedTime {
    GeneralizedTime::from_unix_duration(Duration::from_secs(secs)).unwrap()
}

fn utc(secs: u64) -> Time {
    Time::UtcTime(UtcTime::from_unix_duration(Duration::from_secs(secs)).unwrap())
}

/// Authority Information Access extension listing `locations` under `method`.
pub fn aia_extension(method: const_oid::ObjectIdentifier, locations: &[&str]) -> Extension {
    let aia = AuthorityInfoAccessSyntax(
        locations
            .iter()
            .map(|uri| AccessDescription {
                access_method: method,
                access_location: GeneralName::UniformResourceIdentifier(
                    Ia5String::new(uri).unwrap(),
                ),
            })
            .collect(),
    );
    Extension {
        extn_id: AuthorityInfoAccessSyntax::OID,
        critical: false,
        extn_value: OctetString::new(aia.to_der().unwrap()).unwrap(),
    }
}

/// Unsigned certificate with the given names, serial and public key bits.
pub fn certificate_with(
    subject: &str,
    issuer: &str,
    serial: u64,
    key: &[u8],
    extensions: Option<Vec<Extension>>,
) -> Certificate {
    Certificate {
        tbs_certificate: TbsCertificate {
            version: CertVersion::V3,
            serial_number: SerialNumber::from(serial),
            signature: algorithm(),
            issuer: Name::from_str(issuer).unwrap(),
            validity: Validity {
                not_before: utc(1_600_000_000),
                not_after: utc(1_900_000_000),
            },
            subject: Name::from_str(subject).unwrap(),
            subject_public_key_info: SubjectPublicKeyInfoOwned {
                algorithm: algorithm(),
                subject_public_key: BitString::from_bytes(key).unwrap(),
            },
            issuer_unique_id: None,
            subject_unique_id: None,
            extensions,
        },
        signature_algorithm: algorithm(),
        signature: BitString::from_bytes(&[0u8; 32]).unwrap(),
    }
}

/// Self-issued certificate for the test CA.
pub fn issuer() -> Certificate {
    certificate_with(CA, CA, 1, b"issuer public key", None)
}

/// Leaf issued by [`CA`] advertising `ocsp_urls` in its AIA extension.
pub fn leaf(serial: u64, ocsp_urls: &[&str]) -> Certificate {
    let extensions = (!ocsp_urls.is_empty()).then(|| vec![aia_extension(ID_AD_OCSP, ocsp_urls)]);
    certificate_with(
        &format!("CN=leaf{serial},O=Example"),
        CA,
        serial,
        b"leaf public key",
        extensions,
    )
}

pub fn der(certificate: &Certificate) -> Vec<u8> {
    certificate.to_der().unwrap()
}

pub fn good() -> CertStatus {
    CertStatus::Good(Null)
}

pub fn unknown() -> CertStatus {
    CertStatus::Unknown(Null)
}

pub fn revoked(at: u64, reason: Option<CrlReason>) -> CertStatus {
    CertStatus::Revoked(RevokedInfo {
        revocation_time: OcspGeneralizedTime(time(at)),
        revocation_reason: reason,
    })
}

/// Encoded successful response reporting `status` for `serial`.
pub fn response_body(serial: u64, status: CertStatus) -> Vec<u8> {
    let single = SingleResponse {
        cert_id: CertId {
            hash_algorithm: AlgorithmIdentifierOwned {
                oid: const_oid::db::rfc5912::ID_SHA_1,
                parameters: None,
            },
            issuer_name_hash: OctetString::new(vec![0xaa; 20]).unwrap(),
            issuer_key_hash: OctetString::new(vec![0xbb; 20]).unwrap(),
            serial_number: SerialNumber::from(serial),
        },
        cert_status: status,
        this_update: OcspGeneralizedTime(time(1_700_000_000)),
        next_update: Some(OcspGeneralizedTime(time(1_700_086_400))),
        single_extensions: None,
    };
    let basic = BasicOcspResponse {
        tbs_response_data: ResponseData {
            version: Version::V1,
            responder_id: ResponderId::ByName(Name::from_str("CN=Responder").unwrap()),
            produced_at: OcspGeneralizedTime(time(1_700_000_000)),
            responses: vec![single],
            response_extensions: None,
        },
        signature_algorithm: algorithm(),
        signature: BitString::from_bytes(&[0u8; 32]).unwrap(),
        certs: None,
    };
    successful_response(&basic).unwrap().to_der().unwrap()
}

/// What a scripted responder does when asked.
#[derive(Clone, Debug)]
pub enum Reply {
    Body(Vec<u8>),
    Http(u16),
    HttpBody(u16, Vec<u8>),
    Timeout,
}

/// Transport answering from a script keyed by URL and recording every call.
///
/// URLs missing from the script fail with a connection error.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: BTreeMap<String, Reply>,
    pub calls: RefCell<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, url: &str, reply: Reply) -> Self {
        self.replies.insert(Url::parse(url).unwrap().to_string(), reply);
        self
    }

    pub fn status(self, url: &str, serial: u64, status: CertStatus) -> Self {
        self.reply(url, Reply::Body(response_body(serial, status)))
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn called(&self) -> BTreeSet<String> {
        self.calls.borrow().iter().cloned().collect()
    }
}

impl ResponderTransport for ScriptedTransport {
    fn post(&self, url: &Url, body: &[u8]) -> Result<TransportResponse, TransportError> {
        assert!(!body.is_empty(), "empty request body");
        self.calls.borrow_mut().push(url.to_string());
        match self.replies.get(url.as_str()) {
            Some(Reply::Body(body)) => Ok(TransportResponse::ok(body.clone())),
            Some(Reply::Http(status)) => Ok(TransportResponse {
                status: *status,
                body: None,
            }),
            Some(Reply::HttpBody(status, body)) => Ok(TransportResponse {
                status: *status,
                body: Some(body.clone()),
            }),
            Some(Reply::Timeout) => Err(TransportError::Timeout),
            None => Err(TransportError::Request(format!("connection refused: {url}"))),
        }
    }
}

#[derive(Default)]
pub struct RecordingAlerts {
    pub posted: RefCell<Vec<(String, BTreeSet<String>)>>,
}

impl RecordingAlerts {
    pub fn count(&self) -> usize {
        self.posted.borrow().len()
    }
}

impl AlertSink for RecordingAlerts {
    fn post_alert(&self, title: &str, details: &BTreeSet<String>) {
        self.posted
            .borrow_mut()
            .push((title.to_owned(), details.clone()));
    }
}

#[derive(Default)]
pub struct RecordingAudit {
    pub messages: RefCell<Vec<String>>,
}

impl RecordingAudit {
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.borrow().iter().any(|m| m.contains(needle))
    }
}

impl AuditLog for RecordingAudit {
    fn audit(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_owned());
    }
}
