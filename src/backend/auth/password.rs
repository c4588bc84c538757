//! bcrypt hashing, run on the blocking pool so it never stalls the runtime.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::backend::error::BackendError;

pub async fn hash_password(password: String) -> Result<String, BackendError> {
    tokio::task::spawn_blocking(move || hash(password, DEFAULT_COST))
        .await
        .map_err(|e| BackendError::state(format!("Password hashing task failed: {}", e)))?
        .map_err(BackendError::from)
}

pub async fn verify_password(password: String, password_hash: String) -> Result<bool, BackendError> {
    tokio::task::spawn_blocking(move || verify(password, &password_hash))
        .await
        .map_err(|e| BackendError::state(format!("Password verification task failed: {}", e)))?
        .map_err(BackendError::from)
}
