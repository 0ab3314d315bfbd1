//! Activity log entries shown on the dashboard feed.
//!
//! Append-only; rows are written by the services that perform the mutation
//! they describe.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Kind of event, the `activity_type` PostgreSQL enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    ShipmentCreated,
    ShipmentDelivered,
    ShipmentAssigned,
    VehicleMaintenance,
    MaintenanceAlert,
    DriverStatusChange,
    InvoiceCreated,
    InvoicePaid,
}

impl ActivityType {
    pub const ALL: [ActivityType; 8] = [
        Self::ShipmentCreated,
        Self::ShipmentDelivered,
        Self::ShipmentAssigned,
        Self::VehicleMaintenance,
        Self::MaintenanceAlert,
        Self::DriverStatusChange,
        Self::InvoiceCreated,
        Self::InvoicePaid,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShipmentCreated => "shipment_created",
            Self::ShipmentDelivered => "shipment_delivered",
            Self::ShipmentAssigned => "shipment_assigned",
            Self::VehicleMaintenance => "vehicle_maintenance",
            Self::MaintenanceAlert => "maintenance_alert",
            Self::DriverStatusChange => "driver_status_change",
            Self::InvoiceCreated => "invoice_created",
            Self::InvoicePaid => "invoice_paid",
        }
    }

    /// Table the `reference_id` of this kind of entry points into.
    pub fn reference_type(&self) -> &'static str {
        match self {
            Self::ShipmentCreated | Self::ShipmentDelivered | Self::ShipmentAssigned => "shipment",
            Self::VehicleMaintenance | Self::MaintenanceAlert => "vehicle",
            Self::DriverStatusChange => "driver",
            Self::InvoiceCreated | Self::InvoicePaid => "invoice",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: i32,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub title: String,
    pub description: String,
    pub user_id: Option<i32>,
    pub reference_id: Option<i32>,
    pub reference_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub activity_type: ActivityType,
    pub title: String,
    pub description: String,
    pub user_id: Option<i32>,
    pub reference_id: Option<i32>,
    pub reference_type: Option<String>,
}

impl NewActivity {
    /// Entry referencing the row `reference_id` of the kind's table.
    pub fn new(
        activity_type: ActivityType,
        title: impl Into<String>,
        description: impl Into<String>,
        reference_id: i32,
    ) -> Self {
        Self {
            activity_type,
            title: title.into(),
            description: description.into(),
            user_id: None,
            reference_id: Some(reference_id),
            reference_type: Some(activity_type.reference_type().to_string()),
        }
    }

    pub fn by_user(mut self, user_id: Option<i32>) -> Self {
        self.user_id = user_id;
        self
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Most recent entries first.
    async fn recent(&self, limit: i64) -> Result<Vec<Activity>, AppError>;

    async fn create(&self, activity: &NewActivity) -> Result<Activity, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_type_roundtrip() {
        for kind in ActivityType::ALL {
            assert_eq!(ActivityType::parse(kind.as_str()), Some(kind));
            assert_eq!(
                serde_json::to_value(kind).unwrap(),
                serde_json::Value::String(kind.as_str().to_string())
            );
        }
        assert_eq!(ActivityType::parse("user_login"), None);
    }

    #[test]
    fn test_new_activity_sets_reference() {
        let activity = NewActivity::new(ActivityType::InvoicePaid, "Invoice paid", "#12", 12)
            .by_user(Some(4));

        assert_eq!(activity.reference_id, Some(12));
        assert_eq!(activity.reference_type.as_deref(), Some("invoice"));
        assert_eq!(activity.user_id, Some(4));
    }
}
