//! TRACE level dumps of requests and responses.

use core::fmt::{self, Write};

use der::{Decode, Encode};
use tracing::{trace, Level};
use x509_cert::Certificate;
use x509_ocsp::{CertId, OcspRequest, OcspResponse, ResponderId};

use crate::ocsp::{basic_response, cert_ids};
use crate::status::CertificateStatus;

fn hex(bytes: &[u8]) -> String {
    base16ct::lower::encode_string(bytes)
}

fn write_cert_id(out: &mut String, indent: &str, id: &CertId) -> fmt::Result {
    writeln!(out, "{indent}hashAlgorithm: {}", id.hash_algorithm.oid)?;
    writeln!(out, "{indent}issuerNameHash: {}", hex(id.issuer_name_hash.as_bytes()))?;
    writeln!(out, "{indent}issuerKeyHash: {}", hex(id.issuer_key_hash.as_bytes()))?;
    writeln!(out, "{indent}cert serial number: {}", id.serial_number)
}

fn describe_request(request: &OcspRequest) -> Result<String, fmt::Error> {
    let tbs = &request.tbs_request;
    let mut out = String::from("OCSP Request:\n  TBSRequest:\n");
    writeln!(out, "    version: {:?}", tbs.version)?;
    match &tbs.requestor_name {
        Some(name) => writeln!(out, "    requestorName: {name:?}")?,
        None => writeln!(out, "    requestorName:")?,
    }
    writeln!(out, "    requestList:")?;
    for (i, id) in cert_ids(request).enumerate() {
        writeln!(out, "      Certificate {i}")?;
        write_cert_id(&mut out, "        ", id)?;
    }
    Ok(out)
}

fn describe_response(response: &OcspResponse) -> Result<String, String> {
    let mut out = String::from("OCSP Response:\n");
    let w = |e: fmt::Error| e.to_string();
    writeln!(out, "  responseStatus: {:?}", response.response_status).map_err(w)?;
    let Some(bytes) = &response.response_bytes else {
        writeln!(out, "  responseBytes:").map_err(w)?;
        return Ok(out);
    };
    writeln!(out, "  responseType: {}", bytes.response_type).map_err(w)?;

    let basic = match basic_response(response) {
        Ok(Some(basic)) => basic,
        Ok(None) => return Ok(out),
        Err(err) => return Err(err.to_string()),
    };
    let data = &basic.tbs_response_data;
    writeln!(out, "    tbsResponseData:").map_err(w)?;
    writeln!(out, "      version: {:?}", data.version).map_err(w)?;
    match &data.responder_id {
        ResponderId::ByName(name) => writeln!(out, "      responderId byName: {name}"),
        ResponderId::ByKey(key) => {
            writeln!(out, "      responderId byKey: {}", hex(key.as_bytes()))
        }
    }
    .map_err(w)?;
    writeln!(out, "      producedAt: {}", data.produced_at.0.to_date_time()).map_err(w)?;
    writeln!(out, "      responses:").map_err(w)?;
    for (i, single) in data.responses.iter().enumerate() {
        writeln!(out, "      certID #: {i}").map_err(w)?;
        write_cert_id(&mut out, "        ", &single.cert_id).map_err(w)?;
        writeln!(
            out,
            "      certStatus: {}",
            CertificateStatus::from(&single.cert_status)
        )
        .map_err(w)?;
        writeln!(out, "      thisUpdate: {}", single.this_update.0.to_date_time()).map_err(w)?;
        match &single.next_update {
            Some(next) => writeln!(out, "      nextUpdate: {}", next.0.to_date_time()),
            None => writeln!(out, "      nextUpdate:"),
        }
        .map_err(w)?;
    }
    writeln!(out, "    signatureAlgorithm: {}", basic.signature_algorithm.oid).map_err(w)?;
    writeln!(out, "    certs:").map_err(w)?;
    for (i, embedded) in basic.certs.iter().flatten().enumerate() {
        let cert = embedded
            .to_der()
            .and_then(|der| Certificate::from_der(&der))
            .map_err(|e| e.to_string())?;
        let tbs = &cert.tbs_certificate;
        writeln!(out, "      certificate: {i}").map_err(w)?;
        writeln!(out, "        issuer: {}", tbs.issuer).map_err(w)?;
        writeln!(out, "        subject: {}", tbs.subject).map_err(w)?;
        writeln!(out, "        cert serial number: {}", tbs.serial_number).map_err(w)?;
    }
    Ok(out)
}

/// Dump `request` at TRACE level.
pub(crate) fn log_request(request: &OcspRequest) {
    if !tracing::enabled!(Level::TRACE) {
        return;
    }
    match describe_request(request) {
        Ok(dump) => trace!("{dump}"),
        Err(err) => trace!(error = %err, "Could not log request."),
    }
}

/// Dump `response` at TRACE level.
pub(crate) fn log_response(response: &OcspResponse) {
    if !tracing::enabled!(Level::TRACE) {
        return;
    }
    match describe_response(response) {
        Ok(dump) => trace!("{dump}"),
        Err(err) => trace!(error = %err, "Could not log response, issue decoding the basic response."),
    }
}
