use crate::{Result, SigningRequest};
use std::fmt::Debug;

/// SigningCredential is the trait used by signer as the signing key.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is able to sign a request.
    fn is_valid(&self) -> bool;
}

/// SignRequest is the trait used by the dispatcher to sign requests.
///
/// Signing is pure and synchronous: no I/O happens here and the only way to
/// fail is a malformed request.
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Credential used by this signer.
    type Credential: SigningCredential;

    /// Sign the request in place, adding every header the service needs to
    /// verify it.
    fn sign_request(&self, req: &mut SigningRequest, credential: &Self::Credential) -> Result<()>;
}
