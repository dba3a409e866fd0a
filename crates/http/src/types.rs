//! Request and response bodies of the Farmacinha API

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Login credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Issued access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Account registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
}

/// Public user profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOut {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

/// Medication fields sent on create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationInput {
    pub name: String,
    pub dosage: String,
    pub category: String,
    pub frequency: String,
    pub schedules: Vec<String>,
    pub stock: u32,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Stored medication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub id: i64,
    pub user_id: i64,
    #[serde(flatten)]
    pub fields: MedicationInput,
}

/// Filters for listing medications
#[derive(Debug, Clone, Default, Serialize)]
pub struct MedicationQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// New shopping list entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingItemCreate {
    pub name: String,
}

/// Shopping list entry state change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingItemUpdate {
    pub checked: bool,
}

/// Shopping list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: i64,
    pub name: String,
    pub checked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    MedicationReminder,
    LowStockAlert,
    MedicationExpiry,
    RefillReminder,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationStatus {
    Pending,
    Sent,
    Read,
    Failed,
}

/// Notification as listed for the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub status: NotificationStatus,
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub scheduled_for: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub sent_at: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "timestamp::optional")]
    pub read_at: Option<DateTime<FixedOffset>>,
    #[serde(deserialize_with = "timestamp::required")]
    pub created_at: DateTime<FixedOffset>,
    #[serde(default)]
    pub medication_name: Option<String>,
}

/// Filters for listing notifications
#[derive(Debug, Clone, Default, Serialize)]
pub struct NotificationQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<NotificationStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    pub unread_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAllReadResponse {
    pub message: String,
    pub notifications_marked: u64,
}

/// Plain confirmation returned by delete endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Timestamps as the API writes them
///
/// PostgreSQL columns come back with an offset, SQLite ones without. Naive
/// values are read as UTC.
mod timestamp {
    use super::{DateTime, FixedOffset, NaiveDateTime};
    use serde::{Deserialize, Deserializer};

    fn parse<E: serde::de::Error>(raw: &str) -> Result<DateTime<FixedOffset>, E> {
        DateTime::parse_from_rfc3339(raw)
            .or_else(|_| {
                raw.parse::<NaiveDateTime>()
                    .map(|naive| naive.and_utc().fixed_offset())
            })
            .map_err(|err| E::custom(format!("invalid timestamp {raw:?}: {err}")))
    }

    pub fn required<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<FixedOffset>, D::Error> {
        parse(&String::deserialize(deserializer)?)
    }

    pub fn optional<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<FixedOffset>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse(&raw))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn medication_flattens_fields() {
        let medication: Medication = serde_json::from_value(json!({
            "id": 3,
            "user_id": 7,
            "name": "Losartana",
            "dosage": "50mg",
            "category": "pressao",
            "frequency": "daily",
            "schedules": ["08:00", "20:00"],
            "stock": 28,
            "duration": null,
            "notes": null,
            "icon": null
        }))
        .unwrap();

        assert_eq!(medication.fields.name, "Losartana");
        assert_eq!(medication.fields.schedules.len(), 2);
        assert_eq!(medication.fields.duration, None);
    }

    #[test]
    fn notification_decodes_naive_timestamps() {
        let notification: Notification = serde_json::from_value(json!({
            "id": 1,
            "title": "Hora do remédio",
            "message": "Tomar Losartana",
            "notification_type": "MEDICATION_REMINDER",
            "status": "SENT",
            "scheduled_for": "2024-05-01T08:00:00",
            "sent_at": null,
            "read_at": null,
            "created_at": "2024-05-01T07:59:12.512345",
            "medication_name": "Losartana"
        }))
        .unwrap();

        assert_eq!(
            notification.notification_type,
            NotificationType::MedicationReminder
        );
        assert_eq!(notification.status, NotificationStatus::Sent);
        assert_eq!(
            notification.scheduled_for.unwrap().to_rfc3339(),
            "2024-05-01T08:00:00+00:00"
        );
    }

    #[test]
    fn notification_decodes_offset_timestamps() {
        let notification: Notification = serde_json::from_value(json!({
            "id": 2,
            "title": "Estoque baixo",
            "message": "Restam 2 comprimidos",
            "notification_type": "LOW_STOCK_ALERT",
            "status": "READ",
            "scheduled_for": null,
            "sent_at": "2024-05-01T08:00:00+00:00",
            "read_at": "2024-05-01T09:30:00-03:00",
            "created_at": "2024-05-01T07:59:12.512345+00:00",
            "medication_name": null
        }))
        .unwrap();

        assert_eq!(notification.read_at.unwrap().offset().local_minus_utc(), -3 * 3600);
        assert_eq!(
            notification.read_at.unwrap().naive_utc(),
            "2024-05-01T12:30:00".parse::<NaiveDateTime>().unwrap()
        );
        assert_eq!(
            notification.created_at.naive_utc(),
            "2024-05-01T07:59:12.512345".parse::<NaiveDateTime>().unwrap()
        );
    }

    #[test]
    fn notification_rejects_garbage_timestamp() {
        let result = serde_json::from_value::<Notification>(json!({
            "id": 3,
            "title": "Hora do remédio",
            "message": "Tomar Losartana",
            "notification_type": "GENERAL",
            "status": "PENDING",
            "created_at": "ontem"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn empty_queries_serialize_to_nothing() {
        assert_eq!(
            serde_json::to_value(MedicationQuery::default()).unwrap(),
            json!({})
        );
    }
}
