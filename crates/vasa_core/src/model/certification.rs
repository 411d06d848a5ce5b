//! Compliance credential held by a producer.

use super::{deserialize_some, Document, EntityId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CertificationScheme {
    /// Organic.
    Bio,
    Fairtrade,
}

impl CertificationScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            CertificationScheme::Bio => "BIO",
            CertificationScheme::Fairtrade => "FAIRTRADE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "BIO" => Some(CertificationScheme::Bio),
            "FAIRTRADE" => Some(CertificationScheme::Fairtrade),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificationStatus {
    Pending,
    Valid,
    Suspended,
    Revoked,
    Expired,
}

impl CertificationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CertificationStatus::Pending => "pending",
            CertificationStatus::Valid => "valid",
            CertificationStatus::Suspended => "suspended",
            CertificationStatus::Revoked => "revoked",
            CertificationStatus::Expired => "expired",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(CertificationStatus::Pending),
            "valid" => Some(CertificationStatus::Valid),
            "suspended" => Some(CertificationStatus::Suspended),
            "revoked" => Some(CertificationStatus::Revoked),
            "expired" => Some(CertificationStatus::Expired),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub id: EntityId,
    pub producer_id: EntityId,
    pub scheme: CertificationScheme,
    pub status: CertificationStatus,
    pub cert_number: Option<String>,
    pub org_name: Option<String>,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    /// Attachment metadata (file names, URLs, checksums) stored verbatim.
    pub attachments: Option<Document>,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCertification {
    pub producer_id: EntityId,
    pub scheme: CertificationScheme,
    /// `None` lets the store apply its default (`pending`).
    #[serde(default)]
    pub status: Option<CertificationStatus>,
    #[serde(default)]
    pub cert_number: Option<String>,
    #[serde(default)]
    pub org_name: Option<String>,
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
    #[serde(default)]
    pub attachments: Option<Document>,
}

impl NewCertification {
    pub fn new(producer_id: EntityId, scheme: CertificationScheme) -> Self {
        Self {
            producer_id,
            scheme,
            status: None,
            cert_number: None,
            org_name: None,
            valid_from: None,
            valid_to: None,
            attachments: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CertificationPatch {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub scheme: Option<Option<CertificationScheme>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub status: Option<Option<CertificationStatus>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub cert_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub org_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub valid_from: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub valid_to: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub attachments: Option<Option<Document>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CertificationFilter {
    #[serde(default)]
    pub producer_id: Option<EntityId>,
    #[serde(default)]
    pub status: Option<CertificationStatus>,
}
