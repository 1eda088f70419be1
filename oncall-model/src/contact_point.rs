//! Grafana Alerting contact points connected to an integration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPointRef {
    pub name: String,
    #[serde(default)]
    pub notification_connected: bool,
}

/// One alerting datasource and the contact points it routes to the integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedContactPointsPayload {
    pub uid: String,
    pub name: String,
    #[serde(default)]
    pub contact_points: Vec<ContactPointRef>,
}

/// Flattened (datasource, contact point) row kept in the client cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPoint {
    pub data_source_name: String,
    pub data_source_id: String,
    pub contact_point: String,
    pub notification_connected: bool,
}

/// Expands per-datasource payloads into one row per contact point,
/// preserving server order.
pub fn flatten_contact_points(payloads: &[ConnectedContactPointsPayload]) -> Vec<ContactPoint> {
    payloads
        .iter()
        .flat_map(|payload| {
            payload.contact_points.iter().map(move |point| ContactPoint {
                data_source_name: payload.name.clone(),
                data_source_id: payload.uid.clone(),
                contact_point: point.name.clone(),
                notification_connected: point.notification_connected,
            })
        })
        .collect()
}
