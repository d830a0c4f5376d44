//! Domain entity base type
//!
//! An [`Entity`] pairs a stable identifier with a property bag `P`. Identity is
//! fixed at construction and equality is decided by id alone.
//!
//! # Example
//!
//! ```rust
//! use searchable_repository::entity::Entity;
//! use serde::Serialize;
//!
//! #[derive(Debug, Clone, Serialize)]
//! struct Product {
//!     name: String,
//!     price: i64,
//! }
//!
//! let product = Entity::new(Product { name: "lamp".into(), price: 10 });
//! let restored = Entity::with_id(
//!     Product { name: "renamed".into(), price: 12 },
//!     product.id().to_string(),
//! );
//!
//! // Same id, different props: still the same entity
//! assert_eq!(product, restored);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// A domain object with a stable identity and a property bag
#[derive(Debug, Clone)]
pub struct Entity<P> {
    id: String,
    props: P,
}

impl<P> Entity<P> {
    /// Create an entity with a freshly generated UUID v4 identifier
    pub fn new(props: P) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            props,
        }
    }

    /// Reconstruct an entity with a pre-existing identifier (e.g. loaded from storage)
    pub fn with_id(props: P, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            props,
        }
    }

    /// Create an entity from props and an optional identifier
    ///
    /// A missing id is generated the same way as [`Entity::new`].
    pub fn from_parts(props: P, id: Option<String>) -> Self {
        match id {
            Some(id) => Self::with_id(props, id),
            None => Self::new(props),
        }
    }

    /// The entity identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Read access to the property bag
    pub fn props(&self) -> &P {
        &self.props
    }

    /// Mutable access to the property bag
    ///
    /// Intended for named domain operations defined on concrete entity types;
    /// the identifier itself is never exposed mutably.
    pub fn props_mut(&mut self) -> &mut P {
        &mut self.props
    }

    /// Consume the entity, returning the identifier and props
    pub fn into_parts(self) -> (String, P) {
        (self.id, self.props)
    }
}

impl<P: Serialize> Entity<P> {
    /// Flatten the entity into a single JSON object: `{ id, ...props }`
    ///
    /// Props that do not serialize to a JSON object are placed under a `props` key.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("id".to_string(), Value::String(self.id.clone()));
        match serde_json::to_value(&self.props) {
            Ok(Value::Object(fields)) => object.extend(fields),
            Ok(other) => {
                object.insert("props".to_string(), other);
            }
            Err(error) => {
                tracing::warn!(entity_id = %self.id, %error, "entity props failed to serialize");
            }
        }
        Value::Object(object)
    }
}

impl<P> PartialEq for Entity<P> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<P> Eq for Entity<P> {}

impl<P> Hash for Entity<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<P> fmt::Display for Entity<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct StubProps {
        prop1: String,
        prop2: i64,
    }

    fn stub_props() -> StubProps {
        StubProps {
            prop1: "value1".to_string(),
            prop2: 2,
        }
    }

    #[test]
    fn test_sets_props_and_generates_uuid() {
        let entity = Entity::new(stub_props());
        assert_eq!(entity.props(), &stub_props());
        assert!(Uuid::parse_str(entity.id()).is_ok());
    }

    #[test]
    fn test_accepts_existing_id() {
        let id = "3803b5ac-b2f3-4302-b87c-18bf57e5b18f";
        let entity = Entity::with_id(stub_props(), id);
        assert_eq!(entity.id(), id);
        assert!(Uuid::parse_str(entity.id()).is_ok());
    }

    #[test]
    fn test_from_parts() {
        let generated = Entity::from_parts(stub_props(), None);
        assert!(Uuid::parse_str(generated.id()).is_ok());

        let restored = Entity::from_parts(stub_props(), Some("fixed".to_string()));
        assert_eq!(restored.id(), "fixed");
    }

    #[test]
    fn test_to_json_flattens_props() {
        let id = "3803b5ac-b2f3-4302-b87c-18bf57e5b18f";
        let entity = Entity::with_id(stub_props(), id);
        assert_eq!(
            entity.to_json(),
            json!({ "id": id, "prop1": "value1", "prop2": 2 })
        );
    }

    #[test]
    fn test_to_json_non_object_props() {
        let entity = Entity::with_id(42_i64, "n");
        assert_eq!(entity.to_json(), json!({ "id": "n", "props": 42 }));
    }

    #[test]
    fn test_equality_is_by_id() {
        let a = Entity::with_id(stub_props(), "same");
        let mut b = Entity::with_id(stub_props(), "same");
        b.props_mut().prop2 = 99;
        assert_eq!(a, b);

        let c = Entity::with_id(stub_props(), "other");
        assert_ne!(a, c);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Entity::new(stub_props());
        let b = Entity::new(stub_props());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_into_parts() {
        let (id, props) = Entity::with_id(stub_props(), "x").into_parts();
        assert_eq!(id, "x");
        assert_eq!(props, stub_props());
    }
}
