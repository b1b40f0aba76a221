// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Runtime schema handling.
//!
//! Schemas arrive as compiled descriptor sets (the standard protobuf
//! `FileDescriptorSet` encoding), not generated code. The
//! [`SchemaRegistry`] loads them once at startup and serves read-only
//! type lookups to all decode workers.

pub mod registry;

pub use registry::SchemaRegistry;
