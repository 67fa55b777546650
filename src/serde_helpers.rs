//! Serde helpers for the host-facing JSON output
//!
//! Hosts expect a plain integer completion offset where `-1` means
//! "no completion", so `Option<usize>` cannot use serde's default `null`.

use serde::Serializer;

/// Serialize `Some(offset)` as the offset and `None` as `-1`
pub fn serialize_offset<S>(offset: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match offset {
        Some(offset) => serializer.serialize_u64(*offset as u64),
        None => serializer.serialize_i64(-1),
    }
}
