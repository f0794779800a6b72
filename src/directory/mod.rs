//! Access to the identity directory.
//!
//! - [`model`] - application registrations as returned by Microsoft Graph
//! - [`graph`] - client-credentials authentication and the listing call

mod error;
mod graph;
mod model;

pub use error::DirectoryError;
pub use graph::GraphClient;
pub use model::{ApplicationRegistration, PasswordCredential};

/// Lists every application registration in the directory.
///
/// One call per run; the returned order is the directory's listing order.
pub trait DirectoryClient: Send + Sync {
    fn list_applications(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ApplicationRegistration>, DirectoryError>> + Send;
}
