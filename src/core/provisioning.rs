//! Account provisioning through the backend callables.
//!
//! Seller callables assert the admin role themselves; the client only
//! validates input before issuing the call. Client registration is open to
//! anyone.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::backend::{CREATE_CLIENT_FN, CREATE_SELLER_FN, DELETE_SELLER_FN};
use crate::core::backend::Backend;
use crate::core::error::ProvisioningError;

/// Firebase-style auth rejects shorter passwords.
const MIN_PASSWORD_LEN: usize = 6;

/// Admin form for a new seller account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NewSeller {
    pub name: String,
    pub whatsapp: String,
    pub email: String,
    pub password: String,
}

impl NewSeller {
    pub fn validate(&self) -> Result<(), ProvisioningError> {
        let fields = [&self.name, &self.whatsapp, &self.email, &self.password];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ProvisioningError::InvalidArgument(
                "All fields are required.".to_string(),
            ));
        }
        if !self.email.contains('@') {
            return Err(ProvisioningError::InvalidArgument(
                "Enter a valid e-mail address.".to_string(),
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ProvisioningError::InvalidArgument(format!(
                "Password must have at least {} characters.",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }

    fn payload(&self) -> serde_json::Value {
        json!({
            "name": self.name.trim(),
            "whatsapp": self.whatsapp.trim(),
            "email": self.email.trim(),
            "password": self.password,
        })
    }
}

/// Self-service registration form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub accepted_terms: bool,
}

impl NewClient {
    pub fn validate(&self) -> Result<(), ProvisioningError> {
        let fields = [&self.name, &self.email, &self.password, &self.phone];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ProvisioningError::InvalidArgument(
                "All fields are required.".to_string(),
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ProvisioningError::InvalidArgument(format!(
                "Password must have at least {} characters.",
                MIN_PASSWORD_LEN
            )));
        }
        if !self.accepted_terms {
            return Err(ProvisioningError::InvalidArgument(
                "You must accept the terms of use.".to_string(),
            ));
        }
        Ok(())
    }

    fn payload(&self) -> serde_json::Value {
        json!({
            "name": self.name.trim(),
            "email": self.email.trim(),
            "password": self.password,
            "phone": self.phone.trim(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct CallResult {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    uid: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl CallResult {
    fn into_result(self) -> Result<Self, ProvisioningError> {
        if self.success {
            Ok(self)
        } else {
            Err(ProvisioningError::Internal(
                self.message.unwrap_or_else(|| "Unknown error".to_string()),
            ))
        }
    }
}

async fn invoke<B: Backend>(
    backend: &B,
    name: &str,
    data: &serde_json::Value,
) -> Result<CallResult, ProvisioningError> {
    let value = backend
        .call(name, data)
        .await
        .map_err(|e| ProvisioningError::from_backend(&e))?;
    let result: CallResult = serde_json::from_value(value)
        .map_err(|e| ProvisioningError::Internal(e.to_string()))?;
    result.into_result()
}

/// Create a seller account; returns the new user id.
pub async fn create_seller<B: Backend>(
    backend: &B,
    seller: &NewSeller,
) -> Result<String, ProvisioningError> {
    seller.validate()?;
    let result = invoke(backend, CREATE_SELLER_FN, &seller.payload()).await?;
    Ok(result.uid.unwrap_or_default())
}

/// Remove a seller account and its profile.
pub async fn delete_seller<B: Backend>(backend: &B, uid: &str) -> Result<(), ProvisioningError> {
    if uid.trim().is_empty() {
        return Err(ProvisioningError::InvalidArgument(
            "Seller id is required.".to_string(),
        ));
    }
    invoke(backend, DELETE_SELLER_FN, &json!({ "uid": uid })).await?;
    Ok(())
}

/// Register a client account; returns the new user id.
///
/// The account is created signed out; callers sign in with the same
/// credentials afterwards.
pub async fn register_client<B: Backend>(
    backend: &B,
    client: &NewClient,
) -> Result<String, ProvisioningError> {
    client.validate()?;
    let result = invoke(backend, CREATE_CLIENT_FN, &client.payload()).await?;
    Ok(result.uid.unwrap_or_default())
}
