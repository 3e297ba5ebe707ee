//! Blob object
//!
//! Blobs store file content. They contain only the raw file data,
//! without any metadata like filename or permissions (those live in trees and the index).
//!
//! ## Format
//!
//! On disk: `blob <size>\0<content>`
//! Identity: SHA-1 of the content alone

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

/// Blob object representing file content
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    #[new(into)]
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn into_content(self) -> Bytes {
        self.content
    }
}

impl Packable for Blob {
    fn pack(&self) -> anyhow::Result<Bytes> {
        Ok(self.content.clone())
    }
}

impl Unpackable for Blob {
    fn unpack(mut reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        Ok(Self::new(content))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }

    fn object_id(&self) -> anyhow::Result<ObjectId> {
        Ok(ObjectId::from_content(&self.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blob_id_is_hash_of_content() {
        let blob = Blob::new("hello\n");

        assert_eq!(
            blob.object_id().unwrap().as_ref(),
            "f572d396fae9206628714fb2ce00f72e94f2258f"
        );
    }

    #[test]
    fn envelope_carries_type_tag() {
        let blob = Blob::new("abc");

        assert_eq!(&blob.envelope().unwrap()[..], b"blob 3\0abc");
    }
}
