pub mod contact;
pub mod post;

use bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use std::{
    fmt::{self, Display},
    marker::PhantomData,
};

/// Store-assigned identifier, typed by the record it belongs to.
///
/// Backed by a BSON `ObjectId`; serialized as the plain 24-char hex form on
/// the JSON wire rather than extended-JSON `{"$oid": …}`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct Id<Marker>(ObjectId, PhantomData<Marker>);

impl<Marker> Id<Marker> {
    #[must_use]
    pub fn new(object_id: ObjectId) -> Self {
        Self(object_id, PhantomData)
    }
}

impl<Marker> Display for Id<Marker> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0.to_hex(), f)
    }
}

impl<Marker> From<ObjectId> for Id<Marker> {
    fn from(value: ObjectId) -> Self {
        Self::new(value)
    }
}

impl<Marker> From<Id<Marker>> for ObjectId {
    fn from(value: Id<Marker>) -> Self {
        value.0
    }
}

impl<Marker> Serialize for Id<Marker> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de, Marker> Deserialize<'de> for Id<Marker> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        ObjectId::parse_str(&hex)
            .map(Self::new)
            .map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{Id, post::PostMarker};
    use bson::oid::ObjectId;

    #[test]
    fn id_round_trips_as_hex_string() {
        let object_id = ObjectId::new();
        let id = Id::<PostMarker>::new(object_id);

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", object_id.to_hex()));

        let back: Id<PostMarker> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn id_rejects_non_hex_input() {
        assert!(serde_json::from_str::<Id<PostMarker>>("\"not-an-id\"").is_err());
    }
}
