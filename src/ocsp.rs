//! Request and response envelopes over the [RFC 6960] types from [`x509_ocsp`].
//!
//! [RFC 6960]: https://datatracker.ietf.org/doc/html/rfc6960

use const_oid::db::rfc6960::ID_PKIX_OCSP_BASIC;
use der::asn1::OctetString;
use der::{Decode, Encode};
use x509_ocsp::{
    BasicOcspResponse, CertId, OcspRequest, OcspResponse, OcspResponseStatus, Request,
    ResponseBytes, TbsRequest, Version,
};

/// Media type of an encoded [`OcspRequest`] body.
pub const OCSP_REQUEST_CONTENT_TYPE: &str = "application/ocsp-request";

/// Media type of an encoded [`OcspResponse`] body.
pub const OCSP_RESPONSE_CONTENT_TYPE: &str = "application/ocsp-response";

/// Unsigned request for exactly one certificate, without extensions (and so without a nonce).
pub fn single_request(cert_id: CertId) -> OcspRequest {
    OcspRequest {
        tbs_request: TbsRequest {
            version: Version::V1,
            requestor_name: None,
            request_list: vec![Request {
                req_cert: cert_id,
                single_request_extensions: None,
            }],
            request_extensions: None,
        },
        optional_signature: None,
    }
}

/// Certificate identifiers `request` asks about.
pub fn cert_ids(request: &OcspRequest) -> impl Iterator<Item = &CertId> {
    request.tbs_request.request_list.iter().map(|r| &r.req_cert)
}

/// Wrap `basic` in a `successful` envelope.
pub fn successful_response(basic: &BasicOcspResponse) -> der::Result<OcspResponse> {
    Ok(OcspResponse {
        response_status: OcspResponseStatus::Successful,
        response_bytes: Some(ResponseBytes {
            response_type: ID_PKIX_OCSP_BASIC,
            response: OctetString::new(basic.to_der()?)?,
        }),
    })
}

/// Envelope carrying only an error status.
pub fn unsuccessful_response(status: OcspResponseStatus) -> OcspResponse {
    OcspResponse {
        response_status: status,
        response_bytes: None,
    }
}

/// Decode the `id-pkix-ocsp-basic` response object carried by `response`.
///
/// Returns `Ok(None)` when the status is not `successful`, when `responseBytes` is absent,
/// or when the response type is something other than the basic response.
pub fn basic_response(response: &OcspResponse) -> der::Result<Option<BasicOcspResponse>> {
    if response.response_status != OcspResponseStatus::Successful {
        return Ok(None);
    }
    match &response.response_bytes {
        Some(bytes) if bytes.response_type == ID_PKIX_OCSP_BASIC => {
            BasicOcspResponse::from_der(bytes.response.as_bytes()).map(Some)
        }
        _ => Ok(None),
    }
}
