//! Partnership: CRM-style record progressed through a fixed pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pipeline stage, progressed manually in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnershipStage {
    Analysis,
    Visit,
    Negotiation,
    Installation,
    Closed,
}

impl PartnershipStage {
    /// All stages in pipeline order. Kanban columns render in this order.
    pub const ALL: [PartnershipStage; 5] = [
        PartnershipStage::Analysis,
        PartnershipStage::Visit,
        PartnershipStage::Negotiation,
        PartnershipStage::Installation,
        PartnershipStage::Closed,
    ];

    /// Human-readable stage label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Analysis => "Under analysis",
            Self::Visit => "Site visit",
            Self::Negotiation => "In negotiation",
            Self::Installation => "Installation",
            Self::Closed => "Partnership closed",
        }
    }
}

/// Freeform task attached to a partnership
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnershipTask {
    pub id: Uuid,
    pub partnership_id: Uuid,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A prospective or closed site partnership
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Partnership {
    pub id: Uuid,
    pub company_name: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    /// Establishment category, freeform (matches the prospect's own wording)
    pub category: String,
    pub potential_screens: u32,
    pub stage: PartnershipStage,
    pub stage_updated_at: DateTime<Utc>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Id of the user responsible for this prospect
    pub assigned_to: String,
    pub tasks: Vec<PartnershipTask>,
}
