// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Shared fixtures for integration tests.

#![allow(dead_code)]

use prost::Message as _;
use prost_types::field_descriptor_proto::{Label, Type as ProtoType};
use prost_types::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto, FileDescriptorSet};

/// Serialized descriptor set declaring `pkg.Person { string name = 1; int32 age = 2; }`.
pub fn person_descriptor_set() -> Vec<u8> {
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

fn put_varint(buf: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            return;
        }
        buf.push(byte | 0x80);
    }
}

/// Wire-encode a `pkg.Person` payload by hand.
pub fn encode_person(name: &str, age: i32) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.push(0x0A); // field 1, length-delimited
    put_varint(&mut buf, name.len() as u64);
    buf.extend_from_slice(name.as_bytes());
    buf.push(0x10); // field 2, varint
    put_varint(&mut buf, age as u64);
    buf
}

/// Hex text of an encoded `pkg.Person` payload.
pub fn person_hex(name: &str, age: i32) -> String {
    hex::encode(encode_person(name, age))
}
