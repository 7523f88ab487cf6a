//! Responder client: one request, one URL, one attempt.

use der::{Decode, Encode};
use tracing::debug;
use url::Url;
use x509_ocsp::{OcspRequest, OcspResponse};

use crate::transport::{ResponderTransport, TransportError};
use crate::{Error, Result};

/// Sends [`OcspRequest`]s over a [`ResponderTransport`] and decodes the answers.
#[derive(Clone, Debug)]
pub struct ResponderClient<T> {
    transport: T,
}

impl<T: ResponderTransport> ResponderClient<T> {
    /// Client over `transport`.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Send `request` to `url` and decode the response envelope.
    ///
    /// A body is decoded whatever the HTTP status code, so a responder that reports a
    /// revocation under an error status is still heard.
    ///
    /// # Errors
    ///
    /// - [`Error::Encoding`] if the request cannot be serialized.
    /// - [`Error::Transport`] if the exchange fails, or if the status code is not 2xx and there
    ///   is no body.
    /// - [`Error::Decode`] if a 2xx response has no body, or the body is not an `OCSPResponse`.
    pub fn send(&self, url: &Url, request: &OcspRequest) -> Result<OcspResponse> {
        let body = request.to_der().map_err(Error::Encoding)?;

        debug!(%url, "Sending OCSP request.");
        let response = self.transport.post(url, &body)?;
        let success = response.is_success();
        let body = match response.body {
            Some(body) => body,
            None if success => return Err(Error::decode("response did not contain a body")),
            None => return Err(TransportError::Status(response.status).into()),
        };
        if !success {
            debug!(%url, status = response.status, "Decoding OCSP response sent with an HTTP error status.");
        }

        OcspResponse::from_der(&body).map_err(|err| {
            Error::decode(format!(
                "problem converting the HTTP response to an OCSP response: {err}"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocsp::{single_request, unsuccessful_response};
    use crate::transport::TransportResponse;
    use der::asn1::OctetString;
    use spki::AlgorithmIdentifierOwned;
    use x509_cert::serial_number::SerialNumber;
    use x509_ocsp::{CertId, OcspResponseStatus};

    struct Fixed(TransportResponse);

    impl ResponderTransport for Fixed {
        fn post(
            &self,
            _: &Url,
            _: &[u8],
        ) -> core::result::Result<TransportResponse, TransportError> {
            Ok(self.0.clone())
        }
    }

    fn request() -> OcspRequest {
        single_request(CertId {
            hash_algorithm: AlgorithmIdentifierOwned {
                oid: const_oid::db::rfc5912::ID_SHA_1,
                parameters: None,
            },
            issuer_name_hash: OctetString::new(vec![1; 20]).unwrap(),
            issuer_key_hash: OctetString::new(vec![2; 20]).unwrap(),
            serial_number: SerialNumber::from(1u64),
        })
    }

    fn send(status: u16, body: Option<Vec<u8>>) -> Result<OcspResponse> {
        let url = Url::parse("http://ocsp.example.com/").unwrap();
        ResponderClient::new(Fixed(TransportResponse { status, body })).send(&url, &request())
    }

    #[test]
    fn body_is_decoded_under_error_status() {
        let envelope = unsuccessful_response(OcspResponseStatus::InternalError);
        let response = send(500, Some(envelope.to_der().unwrap())).unwrap();
        assert_eq!(response, envelope);
    }

    #[test]
    fn missing_body() {
        assert!(matches!(
            send(503, None),
            Err(Error::Transport(TransportError::Status(503)))
        ));
        assert!(matches!(send(200, None), Err(Error::Decode { .. })));
    }

    #[test]
    fn garbage_body_is_a_decode_error() {
        assert!(matches!(
            send(404, Some(b"<html>".to_vec())),
            Err(Error::Decode { .. })
        ));
    }
}
