//! Policy types as returned by the workload-protection API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Key holding server-managed list associations, rejected on policy creation
pub const LISTS_KEY: &str = "lists";

/// Opaque numeric policy identifier (`ID` / `parentID` on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyId(pub u64);

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PolicyId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Keys that may be absent or an explicit `null`, kept apart on round-trip.
///
/// `None` is an absent key, `Some(None)` an explicit `null`.
mod nullable {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

/// A present key, `null` included, becomes `Some`
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Scan schedule and configuration identifiers of the `antiMalware` block.
///
/// Only the four identifiers copied between parents are typed; the rest of
/// the block is carried through `extra` untouched. An explicit `null` id is
/// `Some(Value::Null)` and is written back as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AntiMalware {
    #[serde(
        rename = "realTimeScanConfigurationID",
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub real_time_scan_configuration_id: Option<Value>,
    #[serde(
        rename = "realTimeScanScheduleID",
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub real_time_scan_schedule_id: Option<Value>,
    #[serde(
        rename = "manualScanConfigurationID",
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub manual_scan_configuration_id: Option<Value>,
    #[serde(
        rename = "scheduledScanConfigurationID",
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub scheduled_scan_configuration_id: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AntiMalware {
    /// Replace the four scan identifiers with the ones from `other`
    pub fn adopt_scan_ids(&mut self, other: &AntiMalware) {
        self.real_time_scan_configuration_id = other.real_time_scan_configuration_id.clone();
        self.real_time_scan_schedule_id = other.real_time_scan_schedule_id.clone();
        self.manual_scan_configuration_id = other.manual_scan_configuration_id.clone();
        self.scheduled_scan_configuration_id = other.scheduled_scan_configuration_id.clone();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PolicyId>,
    #[serde(default)]
    pub name: String,
    /// Absent for roots; `Some(None)` keeps an explicit `null`
    #[serde(
        rename = "parentID",
        default,
        with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_id: Option<Option<PolicyId>>,
    #[serde(rename = "antiMalware", default, skip_serializing_if = "Option::is_none")]
    pub anti_malware: Option<AntiMalware>,
    /// Every other field, passed through verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Policy {
    pub fn new(id: impl Into<PolicyId>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<PolicyId>) -> Self {
        self.set_parent(parent_id.into());
        self
    }

    /// Parent id, if the policy has one
    pub fn parent(&self) -> Option<PolicyId> {
        self.parent_id.flatten()
    }

    pub fn set_parent(&mut self, parent_id: PolicyId) {
        self.parent_id = Some(Some(parent_id));
    }

    pub fn with_anti_malware(mut self, anti_malware: AntiMalware) -> Self {
        self.anti_malware = Some(anti_malware);
        self
    }

    /// Remove every `key` entry from the passthrough fields, at any depth
    pub fn strip_key(&mut self, key: &str) {
        strip_map(&mut self.extra, key);
        if let Some(anti_malware) = self.anti_malware.as_mut() {
            strip_map(&mut anti_malware.extra, key);
        }
    }
}

/// Recursively remove object entries named `key`, descending into arrays.
///
/// Only object keys are removed; array elements are kept and searched.
pub fn strip_key(value: &mut Value, key: &str) {
    match value {
        Value::Object(map) => strip_map(map, key),
        Value::Array(items) => items.iter_mut().for_each(|item| strip_key(item, key)),
        _ => {}
    }
}

fn strip_map(map: &mut Map<String, Value>, key: &str) {
    map.remove(key);
    for value in map.values_mut() {
        strip_key(value, key);
    }
}
