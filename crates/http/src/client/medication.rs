//! Medication API client methods

use super::{AuthenticatedHttpClient, ClientError};
use crate::types::{Medication, MedicationInput, MedicationQuery, MessageResponse};
use reqwest::Method;

impl AuthenticatedHttpClient {
    /// Register a medication for the signed-in user
    pub async fn create_medication(
        &self,
        medication: &MedicationInput,
    ) -> Result<Medication, ClientError> {
        self.post("/medication/", medication).await
    }

    /// List medications, optionally filtered by name or category
    pub async fn list_medications(
        &self,
        query: &MedicationQuery,
    ) -> Result<Vec<Medication>, ClientError> {
        let request = self.request(Method::GET, "/medication/").query(query);
        self.execute(request).await
    }

    pub async fn get_medication(&self, id: i64) -> Result<Medication, ClientError> {
        self.get(&format!("/medication/{id}")).await
    }

    /// Replace every field of a medication
    pub async fn update_medication(
        &self,
        id: i64,
        medication: &MedicationInput,
    ) -> Result<Medication, ClientError> {
        self.put(&format!("/medication/{id}"), medication).await
    }

    pub async fn delete_medication(&self, id: i64) -> Result<MessageResponse, ClientError> {
        self.delete(&format!("/medication/{id}")).await
    }
}
