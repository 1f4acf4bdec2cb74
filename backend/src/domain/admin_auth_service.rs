//! Credential verification for admins.

use std::sync::Arc;

use crate::domain::ports::AdminRepository;
use crate::domain::{AdminIdentity, Error};

/// One message for both unknown email and wrong password, so responses never
/// leak which half failed.
const INVALID_CREDENTIALS: &str = "Invalid email or password.";

/// Verifies admin credentials against stored bcrypt hashes.
#[derive(Clone)]
pub struct AdminAuthService {
    repository: Arc<dyn AdminRepository>,
}

impl AdminAuthService {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<dyn AdminRepository>) -> Self {
        Self { repository }
    }

    /// Check an email/password pair and return the admin identity.
    ///
    /// The email is lower-cased before lookup. Unknown email and wrong
    /// password both fail with the same Unauthorized error.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AdminIdentity, Error> {
        let email = email.trim().to_lowercase();
        let Some(admin) = self.repository.find_by_email(&email).await? else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = bcrypt::verify(password, &admin.password_hash)
            .map_err(|err| Error::internal(format!("password verification failed: {err}")))?;
        if !matches {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        Ok(AdminIdentity {
            id: admin.id,
            email: admin.email,
        })
    }
}
