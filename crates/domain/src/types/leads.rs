//! Lead types
//!
//! Leads are contacts captured from social channels or entered by hand.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

/// Channel a lead was captured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeadType {
    Instagram,
    Linkedin,
    Manual,
}

impl_domain_status_conversions!(LeadType {
    Instagram => "INSTAGRAM",
    Linkedin => "LINKEDIN",
    Manual => "MANUAL",
});

/// A lead as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub phones: Vec<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub message: Option<String>,
    /// Either a folder id or the populated folder document
    #[serde(default)]
    pub folder_id: Option<serde_json::Value>,
    /// Either a user id or the populated user document
    #[serde(default)]
    pub user_id: serde_json::Value,
    #[serde(rename = "type")]
    pub lead_type: Option<LeadType>,
    pub is_converted: Option<bool>,
    pub converted_at: Option<DateTime<Utc>>,
    pub is_deleted: Option<bool>,
    pub scrape_status: Option<bool>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filters for the paginated lead list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadsListParams {
    pub user_id: String,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub lead_type: Option<LeadType>,
    pub folder_id: Option<String>,
    /// `None` means "no filter", not "not converted"
    pub is_converted: Option<bool>,
}

/// Filters for the lead statistics endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadsSummaryParams {
    pub user_id: String,
    pub days: Option<u32>,
    pub lead_type: Option<LeadType>,
    pub folder_id: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

/// Filters for the CSV export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadLeadsParams {
    pub user_id: String,
    pub search: Option<String>,
    pub lead_type: Option<LeadType>,
    pub folder_id: Option<String>,
    pub is_converted: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLeadPayload {
    pub first_name: String,
    pub last_name: String,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    pub user_id: String,
    #[serde(rename = "type")]
    pub lead_type: LeadType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_converted: Option<bool>,
}

/// Partial update; the backend identifies the lead by `lead_id` in the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLeadPayload {
    pub lead_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phones: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub lead_type: Option<LeadType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_converted: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteLeadsPayload {
    pub lead_ids: Vec<String>,
}

/// Aggregated counters and chart series for the lead dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadsSummary {
    #[serde(default)]
    pub stats: Option<LeadStats>,
    #[serde(default)]
    pub charts: Option<LeadCharts>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadStats {
    pub total: u64,
    pub converted: u64,
    pub deleted: u64,
    pub by_type: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadCharts {
    pub daily_total: DailySeries,
    pub daily_by_type: DailySeriesByType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailySeries {
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailySeriesByType {
    pub labels: Vec<String>,
    pub counts_by_type: BTreeMap<String, Vec<u64>>,
}
