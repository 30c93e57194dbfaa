use leadflow_domain::{
    BulkDeleteLeadsPayload, CreateLeadPayload, DownloadLeadsParams, GenericResponse, Lead,
    LeadsListParams, LeadsSummary, LeadsSummaryParams, UpdateLeadPayload,
};
use serde_json::Value;
use tracing::{debug, instrument};

use super::ApiCommands;
use crate::api::endpoints;
use crate::api::errors::ApiError;
use crate::http::{QueryParams, RequestDescriptor};

impl ApiCommands {
    /// Fetch one page of leads
    ///
    /// # Arguments
    ///
    /// * `params` - Owner plus optional filters; unset filters are not sent
    ///
    /// # Returns
    ///
    /// The envelope with the page of leads and top-level pagination counters
    #[instrument(skip(self, params), fields(user_id = %params.user_id))]
    pub async fn list_leads(
        &self,
        params: &LeadsListParams,
    ) -> Result<GenericResponse<Vec<Lead>>, ApiError> {
        let response: GenericResponse<Vec<Lead>> =
            self.client.get(&endpoints::leads::list(params)).await?;
        debug!(count = response.data.len(), "leads listed");
        Ok(response)
    }

    #[instrument(skip(self, params), fields(user_id = %params.user_id))]
    pub async fn leads_summary(
        &self,
        params: &LeadsSummaryParams,
    ) -> Result<GenericResponse<LeadsSummary>, ApiError> {
        self.client.get(&endpoints::leads::summary(params)).await
    }

    /// Export matching leads. The body is returned as raw bytes (CSV).
    #[instrument(skip(self, params), fields(user_id = %params.user_id))]
    pub async fn download_leads(&self, params: &DownloadLeadsParams) -> Result<Vec<u8>, ApiError> {
        self.client.download(RequestDescriptor::get(endpoints::leads::download(params))).await
    }

    #[instrument(skip(self, payload))]
    pub async fn create_lead(
        &self,
        payload: &CreateLeadPayload,
    ) -> Result<GenericResponse<Lead>, ApiError> {
        self.client.post(endpoints::leads::CREATE, payload).await
    }

    #[instrument(skip(self, payload), fields(lead_id = %payload.lead_id))]
    pub async fn update_lead(
        &self,
        payload: &UpdateLeadPayload,
    ) -> Result<GenericResponse<Lead>, ApiError> {
        self.client.post(endpoints::leads::UPDATE, payload).await
    }

    /// Delete a single lead; the id travels in the query string.
    #[instrument(skip(self))]
    pub async fn delete_lead(&self, lead_id: &str) -> Result<GenericResponse<Value>, ApiError> {
        let request = RequestDescriptor::delete(endpoints::leads::DELETE)
            .with_query(QueryParams::new().with("lead_id", lead_id));
        self.client.send(request).await
    }

    #[instrument(skip(self, lead_ids), fields(count = lead_ids.len()))]
    pub async fn bulk_delete_leads(
        &self,
        lead_ids: Vec<String>,
    ) -> Result<GenericResponse<Value>, ApiError> {
        let payload = BulkDeleteLeadsPayload { lead_ids };
        let request = RequestDescriptor::delete(endpoints::leads::BULK_DELETE).with_json(&payload)?;
        self.client.send(request).await
    }
}
