// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::canonical::canonical_request_string;
use crate::constants::{ALGORITHM, PARA_REGION, PARA_SERVICE, X_AMZ_DATE};
use crate::Credential;
use http::header::{self, HeaderName};
use http::HeaderValue;
use log::debug;
use para_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use para_core::time::{format_date, format_iso8601, now, DateTime};
use para_core::{Error, Result, SignRequest, SigningCredential, SigningRequest};
use std::fmt::Write;

/// RequestSigner that implements the para flavour of SigV4.
///
/// Only `host` and `x-amz-date` are added before signing, the body is
/// covered through [`SigningRequest::payload_digest`].
#[derive(Debug)]
pub struct RequestSigner {
    service: String,
    region: String,

    time: Option<DateTime>,
}

impl Default for RequestSigner {
    fn default() -> Self {
        Self::new(PARA_SERVICE, PARA_REGION)
    }
}

impl RequestSigner {
    /// Create a new signer for the given service and region.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),

            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Credential scope: `20160315/us-east-1/para/aws4_request`
    fn scope(&self, time: DateTime) -> String {
        format!(
            "{}/{}/{}/aws4_request",
            format_date(time),
            self.region,
            self.service
        )
    }

    /// Compute the hex signature of a request that already carries its
    /// `host` and `x-amz-date` headers.
    pub fn signature(&self, req: &SigningRequest, cred: &Credential) -> Result<String> {
        let date = req.header_get_or_default(&HeaderName::from_static(X_AMZ_DATE))?;
        if date.len() < 8 {
            return Err(Error::request_invalid(format!(
                "{X_AMZ_DATE} header is missing or malformed: {date:?}"
            )));
        }
        let time = para_core::time::parse_iso8601(date)?;

        let creq = canonical_request_string(req)?;
        debug!("calculated canonical request: {creq}");
        let encoded_req = hex_sha256(creq.as_bytes());

        let scope = self.scope(time);
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20160315T120000Z
        // 20160315/us-east-1/para/aws4_request
        // <hashed_canonical_request>
        let string_to_sign = {
            let mut f = String::new();
            writeln!(f, "{ALGORITHM}")?;
            writeln!(f, "{date}")?;
            writeln!(f, "{scope}")?;
            write!(f, "{encoded_req}")?;
            f
        };
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = generate_signing_key(&cred.secret_key, time, &self.region, &self.service);
        Ok(hex_hmac_sha256(&signing_key, string_to_sign.as_bytes()))
    }
}

impl SignRequest for RequestSigner {
    type Credential = Credential;

    fn sign_request(&self, req: &mut SigningRequest, cred: &Self::Credential) -> Result<()> {
        if !cred.is_valid() {
            return Err(Error::credential_invalid(
                "access key or secret key is empty, request must not be signed",
            ));
        }
        let now = self.time.unwrap_or_else(now);

        let host = req.host.clone();
        req.header_insert(header::HOST, &host)?;
        req.header_insert(HeaderName::from_static(X_AMZ_DATE), &format_iso8601(now))?;

        let signature = self.signature(req, cred)?;

        let mut authorization = HeaderValue::from_str(&format!(
            "{ALGORITHM} Credential={}/{}, SignedHeaders={}, Signature={}",
            cred.access_key,
            self.scope(now),
            req.header_name_to_vec_sorted().join(";"),
            signature
        ))?;
        authorization.set_sensitive(true);
        req.headers.insert(header::AUTHORIZATION, authorization);

        Ok(())
    }
}

/// Derive the signing key through the HMAC chain
/// `"AWS4" + secret -> date -> region -> service -> "aws4_request"`.
pub fn generate_signing_key(secret: &str, time: DateTime, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), format_date(time).as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), "aws4_request".as_bytes())
}
