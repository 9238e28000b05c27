//! Para request signing.
//!
//! Para verifies requests with a SigV4 style signature: a canonical request
//! is hashed, a signing key is derived from the app's secret key through an
//! HMAC chain and the final signature is carried in the `Authorization`
//! header together with `x-amz-date`.
//!
//! ```
//! use para_core::{SignRequest, SigningRequest};
//! use para_core::hash::EMPTY_STRING_SHA256;
//! use para_v4::{Credential, RequestSigner};
//!
//! # fn main() -> para_core::Result<()> {
//! let uri: http::Uri = "https://paraio.com/v1/_me".parse()?;
//! let mut req = SigningRequest::build(http::Method::GET, &uri, EMPTY_STRING_SHA256)?;
//!
//! RequestSigner::default().sign_request(&mut req, &Credential::new("app:para", "secret"))?;
//! assert!(req.headers.contains_key(http::header::AUTHORIZATION));
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{ALGORITHM, PARA_REGION, PARA_SERVICE, X_AMZ_DATE};

mod canonical;
pub use canonical::{canonical_path, canonical_request_string, encode_uri_component};

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{generate_signing_key, RequestSigner};
