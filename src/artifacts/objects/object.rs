use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use std::io::BufRead;

/// Serialize a value into its stored payload form
pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

/// Reconstruct a value from its stored payload form
pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

/// A value addressable by its content hash
///
/// The ID is the hash of the serialized payload, so identical content always
/// yields the identical ID regardless of which object produced it.
pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        Ok(ObjectId::hash_bytes(&content))
    }
}
