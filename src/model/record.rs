//! The demo record inspected by the diagnostics sequence.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::model::descriptor::{
    Describe, FieldDescriptor, MethodDescriptor, PropertyDescriptor, ResolvedType, TypeDescriptor,
    Visibility,
};
use crate::observability::LogSink;
use crate::proxy::Component;

/// One entry of the record's list.
pub type Entry = BTreeMap<String, Value>;

/// Holds an ordered list of string-keyed maps. A `None` list is the "null"
/// state that the invariant check rejects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoRecord {
    list: Option<Vec<Entry>>,
}

impl DemoRecord {
    /// A record with an empty list.
    pub fn new() -> Self {
        Self {
            list: Some(Vec::new()),
        }
    }

    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            list: Some(entries),
        }
    }

    pub fn list(&self) -> Option<&[Entry]> {
        self.list.as_deref()
    }

    pub fn set_list(&mut self, list: Option<Vec<Entry>>) {
        self.list = list;
    }

    fn construct() -> Result<Self> {
        Ok(Self::new())
    }
}

impl Default for DemoRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for DemoRecord {
    fn record(&self) -> &DemoRecord {
        self
    }

    fn begin(&self, sink: &dyn LogSink) {
        sink.info("lifecycle", "Begin : ");
    }

    fn target_type(&self) -> &'static str {
        DESCRIPTOR.name
    }
}

const ENTRY_TYPE: ResolvedType = ResolvedType {
    name: "BTreeMap",
    generics: &[ResolvedType::simple("String"), ResolvedType::simple("Value")],
};

const LIST_TYPE: ResolvedType = ResolvedType {
    name: "Option",
    generics: &[ResolvedType {
        name: "Vec",
        generics: &[ENTRY_TYPE],
    }],
};

static DESCRIPTOR: TypeDescriptor<DemoRecord> = TypeDescriptor {
    name: "DemoRecord",
    properties: &[PropertyDescriptor {
        name: "list",
        readable: true,
        writable: true,
    }],
    fields: &[FieldDescriptor {
        owner: "DemoRecord",
        name: "list",
        visibility: Visibility::Private,
        ty: LIST_TYPE,
    }],
    methods: &[
        MethodDescriptor {
            name: "new",
            signature: "pub fn new() -> DemoRecord",
        },
        MethodDescriptor {
            name: "with_entries",
            signature: "pub fn with_entries(entries: Vec<Entry>) -> DemoRecord",
        },
        MethodDescriptor {
            name: "list",
            signature: "pub fn list(&self) -> Option<&[Entry]>",
        },
        MethodDescriptor {
            name: "set_list",
            signature: "pub fn set_list(&mut self, list: Option<Vec<Entry>>)",
        },
        MethodDescriptor {
            name: "begin",
            signature: "fn begin(&self, sink: &dyn LogSink)",
        },
    ],
    constructor: Some(("fn construct() -> Result<DemoRecord>", DemoRecord::construct)),
};

impl Describe for DemoRecord {
    fn descriptor() -> &'static TypeDescriptor<Self> {
        &DESCRIPTOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_record_has_empty_list() {
        let record = DemoRecord::new();
        assert!(record.list().unwrap().is_empty());
        assert_eq!(record, DemoRecord::default());
    }

    #[test]
    fn test_set_list_to_none() {
        let mut record = DemoRecord::new();
        record.set_list(None);
        assert!(record.list().is_none());
    }

    #[test]
    fn test_descriptor_has_exactly_one_field() {
        let descriptor = DemoRecord::descriptor();
        assert_eq!(descriptor.fields.len(), 1);
        let field = descriptor.find_field("list").unwrap();
        assert_eq!(field.ty.to_string(), "Option<Vec<BTreeMap<String, Value>>>");
        assert_eq!(field.to_string(), "DemoRecord::list: Option<Vec<BTreeMap<String, Value>>>");
        assert!(descriptor.find_field("other").is_none());
    }

    #[test]
    fn test_descriptor_methods_match_impl() {
        let descriptor = DemoRecord::descriptor();
        for name in ["new", "with_entries", "list", "set_list", "begin"] {
            assert!(descriptor.find_method(name).is_some(), "missing {name}");
        }
        assert_eq!(descriptor.properties[0].name, "list");
    }

    #[test]
    fn test_descriptor_constructor() {
        let built = DemoRecord::descriptor().instantiate().unwrap().unwrap();
        assert_eq!(built, DemoRecord::new());
    }

    #[test]
    fn test_record_serializes_list_of_maps() {
        let mut entry = Entry::new();
        entry.insert("name".into(), json!("alice"));
        entry.insert("age".into(), json!(42));
        let record = DemoRecord::with_entries(vec![entry]);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({ "list": [{ "age": 42, "name": "alice" }] }));

        let null: DemoRecord = serde_json::from_value(json!({ "list": null })).unwrap();
        assert!(null.list().is_none());
    }
}
