//! Network association

use crate::config::Credentials;

/// Network the transport runs over
pub trait NetworkInterface {
    /// Start joining with the given credentials (non-blocking)
    fn begin_join(&mut self, credentials: &Credentials);

    /// Whether the device currently holds an association
    fn is_joined(&self) -> bool;
}
