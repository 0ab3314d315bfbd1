//! Shipment entity, lifecycle rules and repository trait.
//!
//! Maps to the `shipments` table. A shipment is created `pending`, moves to
//! `in_transit` once dispatched and ends `delivered` or `canceled`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Page;
use crate::shared::error::AppError;

/// Shipment status, the `shipment_status` PostgreSQL enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    #[default]
    Pending,
    InTransit,
    Delivered,
    Canceled,
}

impl ShipmentStatus {
    pub const ALL: [ShipmentStatus; 4] = [
        Self::Pending,
        Self::InTransit,
        Self::Delivered,
        Self::Canceled,
    ];

    /// Statuses counted as open on the dashboard.
    pub const OPEN: [ShipmentStatus; 2] = [Self::Pending, Self::InTransit];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "in_transit" => Some(Self::InTransit),
            "delivered" => Some(Self::Delivered),
            "canceled" => Some(Self::Canceled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
            Self::Canceled => "canceled",
        }
    }

    /// Delivered and canceled shipments never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Canceled)
    }

    /// Drivers and vehicles can only be (re)assigned while the shipment is open.
    pub fn accepts_assignment(&self) -> bool {
        !self.is_terminal()
    }

    /// Whether the lifecycle allows moving from `self` to `next`.
    pub fn can_transition_to(&self, next: ShipmentStatus) -> bool {
        use ShipmentStatus::*;
        matches!(
            (self, next),
            (Pending, InTransit) | (InTransit, Delivered) | (Pending, Canceled) | (InTransit, Canceled)
        )
    }
}

impl std::fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A shipment row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: i32,
    pub client_id: i32,
    pub driver_id: Option<i32>,
    pub vehicle_id: Option<i32>,
    pub origin: String,
    pub destination: String,
    pub status: ShipmentStatus,
    pub weight: Option<Decimal>,
    pub description: Option<String>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub proof_of_delivery: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shipment {
    pub fn route(&self) -> String {
        format!("{} → {}", self.origin, self.destination)
    }
}

/// A shipment joined with its client and driver names.
///
/// Names are empty strings when the relation is absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentSummary {
    #[serde(flatten)]
    pub shipment: Shipment,
    pub client_name: String,
    pub driver_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewShipment {
    pub client_id: i32,
    pub driver_id: Option<i32>,
    pub vehicle_id: Option<i32>,
    pub origin: String,
    pub destination: String,
    pub weight: Option<Decimal>,
    pub description: Option<String>,
    pub delivery_date: Option<DateTime<Utc>>,
}

/// A requested status change, applied only if the row still has `from`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusTransition {
    pub from: ShipmentStatus,
    pub to: ShipmentStatus,
    pub proof_of_delivery: Option<String>,
}

/// Result of a dispatch attempt, decided under row locks.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignOutcome {
    Assigned(Shipment),
    /// The shipment is missing, delivered or canceled.
    NotOpen,
    /// The driver is missing or already out on another shipment.
    DriverBusy,
}

/// Repository trait for shipments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShipmentRepository: Send + Sync {
    /// Count of shipments whose status is pending or in transit.
    async fn count_open(&self) -> Result<i64, AppError>;

    /// Newest open shipments with client and driver names.
    async fn find_active_with_names(&self, limit: i64) -> Result<Vec<ShipmentSummary>, AppError>;

    async fn list(&self, page: Page) -> Result<Vec<ShipmentSummary>, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<ShipmentSummary>, AppError>;

    async fn find_by_client(&self, client_id: i32) -> Result<Vec<Shipment>, AppError>;

    async fn find_by_driver(&self, driver_id: i32) -> Result<Vec<Shipment>, AppError>;

    async fn find_by_vehicle(&self, vehicle_id: i32) -> Result<Vec<Shipment>, AppError>;

    async fn create(&self, shipment: &NewShipment) -> Result<Shipment, AppError>;

    /// Set driver and vehicle and mark the driver `on_mission` in one
    /// transaction. The driver must be `available` unless they already hold
    /// this shipment.
    async fn assign(
        &self,
        id: i32,
        driver_id: i32,
        vehicle_id: i32,
    ) -> Result<AssignOutcome, AppError>;

    /// Apply a status change guarded on the current status. Terminal states
    /// release the driver back to `available` in the same transaction, unless
    /// they still hold another open shipment.
    /// Returns `None` when the row no longer has `transition.from`.
    async fn transition(
        &self,
        id: i32,
        transition: &StatusTransition,
    ) -> Result<Option<Shipment>, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;
    use ShipmentStatus::*;

    #[test_case(Pending, InTransit => true)]
    #[test_case(Pending, Canceled => true)]
    #[test_case(InTransit, Delivered => true)]
    #[test_case(InTransit, Canceled => true)]
    #[test_case(Pending, Delivered => false ; "cannot skip transit")]
    #[test_case(InTransit, Pending => false ; "no going back")]
    #[test_case(Delivered, Canceled => false ; "delivered is terminal")]
    #[test_case(Canceled, Pending => false ; "canceled is terminal")]
    #[test_case(Pending, Pending => false ; "self transition")]
    fn test_can_transition_to(from: ShipmentStatus, to: ShipmentStatus) -> bool {
        from.can_transition_to(to)
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        for from in ShipmentStatus::ALL.into_iter().filter(|s| s.is_terminal()) {
            for to in ShipmentStatus::ALL {
                assert!(!from.can_transition_to(to), "{from} -> {to}");
            }
            assert!(!from.accepts_assignment());
        }
    }

    #[test]
    fn test_parse_roundtrip() {
        for status in ShipmentStatus::ALL {
            pretty_assertions::assert_eq!(ShipmentStatus::parse(status.as_str()), Some(status));
        }
        pretty_assertions::assert_eq!(ShipmentStatus::parse("cancelled"), None);
    }

    #[test]
    fn test_summary_flattens_shipment() {
        let now = Utc::now();
        let summary = ShipmentSummary {
            shipment: Shipment {
                id: 3,
                client_id: 1,
                driver_id: None,
                vehicle_id: None,
                origin: "Riyadh".into(),
                destination: "Jeddah".into(),
                status: InTransit,
                weight: Some(Decimal::new(120050, 2)),
                description: None,
                delivery_date: None,
                delivered_at: None,
                proof_of_delivery: None,
                created_at: now,
                updated_at: now,
            },
            client_name: "Al Faisal Trading".into(),
            driver_name: String::new(),
        };

        let value = serde_json::to_value(&summary).unwrap();
        pretty_assertions::assert_eq!(value["id"], 3);
        pretty_assertions::assert_eq!(value["status"], "in_transit");
        pretty_assertions::assert_eq!(value["weight"], "1200.50");
        pretty_assertions::assert_eq!(value["clientName"], "Al Faisal Trading");
        pretty_assertions::assert_eq!(value["driverName"], "");
        pretty_assertions::assert_eq!(summary.shipment.route(), "Riyadh → Jeddah");
    }
}
