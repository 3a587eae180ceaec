use crate::{Audience, Backend, Family, OperationKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Additional context captured for email-family transformations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailMetadata {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub recipient: String,
    /// The email subtype without its wire prefix (e.g. "professional").
    pub email_type: String,
}

/// One persisted transformation. Created atomically once the generation
/// backend has returned; the only mutation path afterwards is the saved
/// toggle.
///
/// Invariants:
/// - `transformation_type` is immutable after creation;
/// - `analysis_data` is populated only for the insight family,
///   `email_metadata` only for the email family, never both;
/// - `last_modified` is non-decreasing and bumped on every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub original_text: String,
    pub transformed_text: String,
    pub transformation_type: OperationKind,
    #[serde(default)]
    pub audience: Audience,
    #[serde(default)]
    pub saved: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Structured analysis payload for insight transformations. Schemaless
    /// on purpose: whatever JSON the backend returned is stored as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_metadata: Option<EmailMetadata>,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    #[serde(default)]
    pub service_used: Backend,
}

/// Input for [`crate::TransformationStore::create`]. Field gating mirrors
/// the record invariants: the builders refuse payloads whose family does
/// not match the kind.
#[derive(Debug, Clone)]
pub struct NewTransformation {
    pub user_id: Uuid,
    pub original_text: String,
    pub transformed_text: String,
    pub transformation_type: OperationKind,
    pub audience: Audience,
    pub tags: Vec<String>,
    pub analysis_data: Option<serde_json::Value>,
    pub email_metadata: Option<EmailMetadata>,
    pub service_used: Backend,
}

impl NewTransformation {
    pub fn new(
        user_id: Uuid,
        original_text: String,
        transformed_text: String,
        transformation_type: OperationKind,
    ) -> Self {
        Self {
            user_id,
            original_text,
            transformed_text,
            transformation_type,
            audience: Audience::default(),
            tags: Vec::new(),
            analysis_data: None,
            email_metadata: None,
            service_used: Backend::default(),
        }
    }

    pub fn with_audience(mut self, audience: Audience) -> Self {
        self.audience = audience;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Attach an analysis payload. Ignored unless the kind is in the
    /// insight family.
    pub fn with_analysis_data(mut self, data: serde_json::Value) -> Self {
        if self.transformation_type.family() == Family::Insight {
            self.analysis_data = Some(data);
        }
        self
    }

    /// Attach email metadata. Ignored unless the kind is in the email
    /// family.
    pub fn with_email_metadata(mut self, metadata: EmailMetadata) -> Self {
        if self.transformation_type.family() == Family::Email {
            self.email_metadata = Some(metadata);
        }
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.service_used = backend;
        self
    }

    /// Materialize the record with fresh id and timestamps.
    pub fn into_record(self, now: DateTime<Utc>) -> TransformationRecord {
        TransformationRecord {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            original_text: self.original_text,
            transformed_text: self.transformed_text,
            transformation_type: self.transformation_type,
            audience: self.audience,
            saved: false,
            tags: self.tags,
            analysis_data: self.analysis_data,
            email_metadata: self.email_metadata,
            created_at: now,
            last_modified: now,
            service_used: self.service_used,
        }
    }
}
