// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Descriptor registry backed by prost-reflect.
//!
//! Turns a serialized `FileDescriptorSet` into queryable message type
//! information without code generation. The registry is an explicit
//! instance: construct it at startup, load schemas once, then share it
//! by reference with the decoder and pipeline. It is never a hidden
//! process-wide global, so independent pipelines and tests stay isolated.

use std::fs;
use std::path::Path;

use prost::Message;
use prost_reflect::{DescriptorPool, MessageDescriptor};
use prost_types::FileDescriptorSet;

use crate::core::{Error, Result};

/// Registry of message types loaded from compiled descriptor sets.
///
/// Only the **first** file entry of each descriptor set is registered;
/// that entry must be self-contained. A first entry whose fields reference
/// a type from a different, unloaded unit fails at load time, because the
/// descriptor pool validates type references when the file is added.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    pool: DescriptorPool,
}

impl SchemaRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            pool: DescriptorPool::new(),
        }
    }

    /// Load a serialized `FileDescriptorSet` from a file and register its
    /// first entry.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            Error::schema(
                path.to_string_lossy(),
                format!("failed to read descriptor set: {e}"),
            )
        })?;
        self.load_bytes(&bytes)
    }

    /// Register the first entry of a serialized `FileDescriptorSet`.
    ///
    /// Fails when the bytes are not a valid descriptor set, the set is
    /// empty, a file with the same name is already registered, or the
    /// entry references types the pool does not know.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let set = FileDescriptorSet::decode(bytes).map_err(|e| {
            Error::schema(
                "descriptor set",
                format!("failed to decode FileDescriptorSet: {e}"),
            )
        })?;

        // Only the first compilation unit is consulted; trailing entries
        // are ignored rather than auto-loaded.
        let file = set
            .file
            .into_iter()
            .next()
            .ok_or_else(|| Error::schema("descriptor set", "contains no file entries"))?;

        let name = file.name().to_string();
        if self.pool.get_file_by_name(&name).is_some() {
            return Err(Error::schema(&name, "file is already registered"));
        }

        self.pool.add_file_descriptor_proto(file).map_err(|e| {
            Error::schema(&name, format!("failed to register descriptor: {e}"))
        })?;

        tracing::debug!(file = %name, "registered schema file");
        Ok(())
    }

    /// Resolve a message type by fully qualified name (e.g. "pkg.Person").
    pub fn resolve(&self, message_name: &str) -> Result<MessageDescriptor> {
        self.pool
            .get_message_by_name(message_name)
            .ok_or_else(|| Error::schema(message_name, "message type not registered"))
    }

    /// Check whether a message type is registered.
    pub fn contains(&self, message_name: &str) -> bool {
        self.pool.get_message_by_name(message_name).is_some()
    }

    /// Names of all registered message types, including nested ones.
    pub fn message_names(&self) -> Vec<String> {
        self.pool
            .all_messages()
            .map(|m| m.full_name().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost_types::field_descriptor_proto::{Label, Type as ProtoType};
    use prost_types::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto};

    fn person_fds() -> Vec<u8> {
        let fds = FileDescriptorSet {
            file: vec![FileDescriptorProto {
                name: Some("person.proto".to_string()),
                package: Some("pkg".to_string()),
                message_type: vec![DescriptorProto {
                    name: Some("Person".to_string()),
                    field: vec![
                        FieldDescriptorProto {
                            name: Some("name".to_string()),
                            number: Some(1),
                            label: Some(Label::Optional as i32),
                            r#type: Some(ProtoType::String as i32),
                            ..Default::default()
                        },
                        FieldDescriptorProto {
                            name: Some("age".to_string()),
                            number: Some(2),
                            label: Some(Label::Optional as i32),
                            r#type: Some(ProtoType::Int32 as i32),
                            ..Default::default()
                        },
                    ],
                    ..Default::default()
                }],
                ..Default::default()
            }],
        };
        fds.encode_to_vec()
    }

    /// A set whose first entry depends on a second entry that is never
    /// registered (only the first entry is consulted).
    fn dangling_fds() -> Vec<u8> {
        let fds = FileDescriptorSet {
            file: vec![
                FileDescriptorProto {
                    name: Some("outer.proto".to_string()),
                    package: Some("pkg".to_string()),
                    dependency: vec!["inner.proto".to_string()],
                    message_type: vec![DescriptorProto {
                        name: Some("Outer".to_string()),
                        field: vec![FieldDescriptorProto {
                            name: Some("inner".to_string()),
                            number: Some(1),
                            label: Some(Label::Optional as i32),
                            r#type: Some(ProtoType::Message as i32),
                            type_name: Some(".pkg.Inner".to_string()),
                            ..Default::default()
                        }],
                        ..Default::default()
                    }],
                    ..Default::default()
                },
                FileDescriptorProto {
                    name: Some("inner.proto".to_string()),
                    package: Some("pkg".to_string()),
                    message_type: vec![DescriptorProto {
                        name: Some("Inner".to_string()),
                        ..Default::default()
                    }],
                    ..Default::default()
                },
            ],
        };
        fds.encode_to_vec()
    }

    #[test]
    fn test_load_and_resolve() {
        let mut registry = SchemaRegistry::new();
        registry.load_bytes(&person_fds()).unwrap();

        let descriptor = registry.resolve("pkg.Person").unwrap();
        assert_eq!(descriptor.full_name(), "pkg.Person");
        assert_eq!(descriptor.fields().count(), 2);
        assert!(registry.contains("pkg.Person"));
    }

    #[test]
    fn test_resolve_unknown_type_fails() {
        let mut registry = SchemaRegistry::new();
        registry.load_bytes(&person_fds()).unwrap();

        let err = registry.resolve("pkg.Unknown").unwrap_err();
        assert!(matches!(err, Error::Schema { .. }));
        assert!(!registry.contains("pkg.Unknown"));
    }

    #[test]
    fn test_load_invalid_bytes_fails() {
        let mut registry = SchemaRegistry::new();
        let err = registry.load_bytes(&[0xFF, 0xFF, 0xFF, 0xFF]).unwrap_err();
        assert!(matches!(err, Error::Schema { .. }));
    }

    #[test]
    fn test_load_empty_set_fails() {
        let mut registry = SchemaRegistry::new();
        let empty = FileDescriptorSet { file: vec![] }.encode_to_vec();
        let err = registry.load_bytes(&empty).unwrap_err();
        assert!(err.to_string().contains("no file entries"));
    }

    #[test]
    fn test_duplicate_registration_conflicts() {
        let mut registry = SchemaRegistry::new();
        registry.load_bytes(&person_fds()).unwrap();

        let err = registry.load_bytes(&person_fds()).unwrap_err();
        assert!(err.to_string().contains("already registered"));
    }

    #[test]
    fn test_first_entry_with_unresolved_dependency_fails_at_load() {
        let mut registry = SchemaRegistry::new();
        let err = registry.load_bytes(&dangling_fds()).unwrap_err();
        assert!(matches!(err, Error::Schema { .. }));
        assert!(!registry.contains("pkg.Outer"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let mut registry = SchemaRegistry::new();
        let err = registry.load("/nonexistent/schema.pb").unwrap_err();
        assert!(matches!(err, Error::Schema { .. }));
    }

    #[test]
    fn test_message_names() {
        let mut registry = SchemaRegistry::new();
        registry.load_bytes(&person_fds()).unwrap();

        let names = registry.message_names();
        assert!(names.contains(&"pkg.Person".to_string()));
    }
}
