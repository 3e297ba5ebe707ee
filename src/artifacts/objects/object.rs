use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use anyhow::Result;
use bytes::Bytes;
use std::io::BufRead;

/// Encode the object body (everything after the envelope header)
pub trait Packable {
    fn pack(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn unpack(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    /// Content address of the object
    ///
    /// Each kind decides which canonical bytes feed the hash.
    fn object_id(&self) -> Result<ObjectId>;

    /// Full stored form: `<type> <size>\0<body>`
    fn envelope(&self) -> Result<Bytes> {
        let body = self.pack()?;
        let header = self.object_type().header(body.len());

        let mut bytes = Vec::with_capacity(header.len() + body.len());
        bytes.extend_from_slice(header.as_bytes());
        bytes.extend_from_slice(&body);

        Ok(Bytes::from(bytes))
    }
}

/// Any stored object, tagged by kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectBox {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
}

impl ObjectBox {
    pub fn object_type(&self) -> ObjectType {
        match self {
            ObjectBox::Blob(_) => ObjectType::Blob,
            ObjectBox::Tree(_) => ObjectType::Tree,
            ObjectBox::Commit(_) => ObjectType::Commit,
        }
    }

    pub fn object_id(&self) -> Result<ObjectId> {
        match self {
            ObjectBox::Blob(blob) => blob.object_id(),
            ObjectBox::Tree(tree) => tree.object_id(),
            ObjectBox::Commit(commit) => commit.object_id(),
        }
    }

    pub fn display(&self) -> String {
        match self {
            ObjectBox::Blob(blob) => blob.display(),
            ObjectBox::Tree(tree) => tree.display(),
            ObjectBox::Commit(commit) => commit.display(),
        }
    }

    /// Decode a body whose type is already known from the envelope tag
    pub fn unpack(object_type: ObjectType, reader: impl BufRead) -> Result<Self> {
        match object_type {
            ObjectType::Blob => Ok(ObjectBox::Blob(Blob::unpack(reader)?)),
            ObjectType::Tree => Ok(ObjectBox::Tree(Tree::unpack(reader)?)),
            ObjectType::Commit => Ok(ObjectBox::Commit(Commit::unpack(reader)?)),
        }
    }
}

impl From<Blob> for ObjectBox {
    fn from(blob: Blob) -> Self {
        ObjectBox::Blob(blob)
    }
}

impl From<Tree> for ObjectBox {
    fn from(tree: Tree) -> Self {
        ObjectBox::Tree(tree)
    }
}

impl From<Commit> for ObjectBox {
    fn from(commit: Commit) -> Self {
        ObjectBox::Commit(commit)
    }
}
