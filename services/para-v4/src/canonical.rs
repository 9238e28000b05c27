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

//! Canonical request construction.

use crate::constants::PARA_URI_COMPONENT_ENCODE_SET;
use para_core::{Error, Result, SigningRequest};
use percent_encoding::utf8_percent_encode;
use std::fmt::Write;

/// Percent encode a single url component.
///
/// Only ascii alphanumerics and `-_.~` are left as is.
pub fn encode_uri_component(s: &str) -> String {
    utf8_percent_encode(s, &PARA_URI_COMPONENT_ENCODE_SET).to_string()
}

/// Canonical form of a raw url path.
///
/// The path is split on literal `/` and every non-empty segment is encoded
/// on its own. Nothing is decoded first: `a%2Fb` stays one segment and is
/// rendered as `a%252Fb`, the same way the server rebuilds it.
pub fn canonical_path(raw: &str) -> String {
    let segments = raw
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(encode_uri_component)
        .collect::<Vec<_>>();

    format!("/{}", segments.join("/"))
}

/// Build the canonical request string that gets hashed into the signature.
///
/// ```text
/// GET
/// /v1/users/123
/// limit=5
/// host:api.example.com
/// x-amz-date:20160315T120000Z
///
/// host;x-amz-date
/// e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855
/// ```
pub fn canonical_request_string(req: &SigningRequest) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    // Insert method
    writeln!(f, "{}", req.method)?;
    // Insert encoded path
    writeln!(f, "{}", canonical_path(&req.path))?;
    // Insert query, already encoded by the caller
    writeln!(f, "{}", req.query)?;
    // Insert signed headers
    let signed_headers = req.header_name_to_vec_sorted();
    for name in signed_headers.iter() {
        let value = req.headers[*name].to_str().map_err(|e| {
            Error::request_invalid(format!("header {name} is not visible ascii")).with_source(e)
        })?;
        writeln!(f, "{name}:{value}")?;
    }
    writeln!(f)?;
    writeln!(f, "{}", signed_headers.join(";"))?;
    write!(f, "{}", req.payload_digest)?;

    Ok(f)
}
