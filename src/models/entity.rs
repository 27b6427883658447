use serde::de::DeserializeOwned;
use serde::Serialize;

use super::EntityKind;

/// Raw record as exchanged with an entity backend.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// A typed record stored in one entity collection.
///
/// `id` is `None` until the backend has assigned one, which is how drafts
/// for new records are represented.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> Option<&str>;
}

pub fn to_record<T: Entity>(entity: &T) -> Result<Record, serde_json::Error> {
    let mut record = match serde_json::to_value(entity)? {
        serde_json::Value::Object(map) => map,
        other => {
            let mut map = Record::new();
            map.insert("value".to_string(), other);
            map
        }
    };
    // The id travels in the URL, never in the body.
    record.remove("id");
    Ok(record)
}

pub fn from_record<T: Entity>(record: Record) -> Result<T, serde_json::Error> {
    serde_json::from_value(serde_json::Value::Object(record))
}
