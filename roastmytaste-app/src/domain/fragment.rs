use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Per-source profile data, or explicit absence. An adapter either produces a
/// complete profile or nothing at all; "empty map" is never a half-filled
/// record.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment<T> {
    Present(T),
    Absent,
}

impl<T> Fragment<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Fragment::Present(_))
    }

    pub fn is_absent(&self) -> bool {
        !self.is_present()
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Fragment::Present(data) => Some(data),
            Fragment::Absent => None,
        }
    }
}

impl<T> Default for Fragment<T> {
    fn default() -> Self {
        Fragment::Absent
    }
}

impl<T> From<Option<T>> for Fragment<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(data) => Fragment::Present(data),
            None => Fragment::Absent,
        }
    }
}

// Absent serializes as `{}` so persisted snapshots keep the empty-map
// sentinel the rest of the pipeline expects.
impl<T: Serialize> Serialize for Fragment<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Fragment::Present(data) => data.serialize(serializer),
            Fragment::Absent => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Fragment<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.as_object().is_some_and(|map| map.is_empty()) {
            return Ok(Fragment::Absent);
        }
        serde_json::from_value(value)
            .map(Fragment::Present)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
    }

    #[test]
    fn absent_serializes_as_empty_map() {
        let fragment: Fragment<Sample> = Fragment::Absent;
        assert_eq!(serde_json::to_value(&fragment).unwrap(), json!({}));
    }

    #[test]
    fn present_serializes_as_inner_value() {
        let fragment = Fragment::Present(Sample {
            name: "jett".to_owned(),
        });
        assert_eq!(
            serde_json::to_value(&fragment).unwrap(),
            json!({"name": "jett"})
        );
    }

    #[test]
    fn round_trips_through_json() {
        let absent: Fragment<Sample> = serde_json::from_value(json!({})).unwrap();
        assert!(absent.is_absent());

        let present: Fragment<Sample> = serde_json::from_value(json!({"name": "sova"})).unwrap();
        assert_eq!(present.as_ref().map(|s| s.name.as_str()), Some("sova"));
    }
}
