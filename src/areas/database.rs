//! Object store
//!
//! Every object lives in its own zlib-compressed file at
//! `objects/<id[0..2]>/<id[2..]>`. The file holds the envelope
//! `<type> <size>\0<body>`; identity is recomputed on load, so a file whose
//! content does not hash back to its name is reported as corrupt.

use crate::areas::write_atomically;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::artifacts::status::inspector::BlobReader;
use crate::errors::GotError;
use anyhow::Context;
use bytes::Bytes;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::Path;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    /// Persist an object and return its ID
    ///
    /// Storing the same content twice leaves the existing file untouched.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object_id.to_path());

        if object_path.exists() {
            tracing::trace!(id = %object_id, "object already stored");
            return Ok(object_id);
        }

        let content = Self::compress(object.envelope()?)?;
        write_atomically(&object_path, &content)
            .with_context(|| format!("unable to store {} {object_id}", object.object_type()))?;

        tracing::debug!(id = %object_id, kind = %object.object_type(), "stored object");
        Ok(object_id)
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    /// Load any object by ID
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<ObjectBox> {
        let content = self.read_object(object_id)?;
        let object = Self::decode(content)
            .with_context(|| format!("unable to decode object {object_id}"))?;

        let actual_id = object.object_id()?;
        if &actual_id != object_id {
            return Err(GotError::corrupt(
                "object",
                format!("{object_id} hashes to {actual_id}"),
            )
            .into());
        }

        tracing::trace!(id = %object_id, kind = %object.object_type(), "loaded object");
        Ok(object)
    }

    pub fn get_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        match self.load(object_id)? {
            ObjectBox::Blob(blob) => Ok(blob),
            other => Err(Self::wrong_type(object_id, ObjectType::Blob, other.object_type())),
        }
    }

    pub fn get_tree(&self, object_id: &ObjectId) -> anyhow::Result<Tree> {
        match self.load(object_id)? {
            ObjectBox::Tree(tree) => Ok(tree),
            other => Err(Self::wrong_type(object_id, ObjectType::Tree, other.object_type())),
        }
    }

    pub fn get_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        match self.load(object_id)? {
            ObjectBox::Commit(commit) => Ok(commit),
            other => Err(Self::wrong_type(object_id, ObjectType::Commit, other.object_type())),
        }
    }

    /// Tree of the commit `commit_id` points at
    pub fn get_commit_tree(&self, commit_id: &ObjectId) -> anyhow::Result<Tree> {
        let commit = self.get_commit(commit_id)?;

        self.get_tree(commit.tree_oid())
            .with_context(|| format!("unable to load the tree of commit {commit_id}"))
    }

    /// Kind of a stored object
    ///
    /// Reads the envelope tag; a file without a readable tag is probed as a
    /// tree, then a commit, and finally taken as a blob.
    pub fn type_of(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        let content = self.read_object(object_id)?;

        match ObjectType::parse_header(&mut Cursor::new(&content)) {
            Ok((object_type, _)) => Ok(object_type),
            Err(_) => Ok(Self::probe(content).object_type()),
        }
    }

    /// Find all objects whose ID starts with the given prefix.
    ///
    /// With a prefix of at least two characters only the matching fan-out
    /// directory is listed.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        if !ObjectId::is_valid_prefix(prefix) {
            return Err(GotError::invalid(format!("'{prefix}' is not an object id prefix")).into());
        }

        let mut matches = Vec::new();

        if prefix.len() < 2 {
            for entry in std::fs::read_dir(&self.path)
                .with_context(|| format!("unable to list {}", self.path.display()))?
            {
                let dir_name = entry?.file_name().to_string_lossy().to_string();
                if dir_name.len() == 2 && dir_name.starts_with(prefix) {
                    matches.extend(self.objects_in(&dir_name, "")?);
                }
            }
        } else {
            let (dir_name, file_prefix) = prefix.split_at(2);
            matches.extend(self.objects_in(dir_name, file_prefix)?);
        }

        matches.sort();
        Ok(matches)
    }

    fn objects_in(&self, dir_name: &str, file_prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let dir_path = self.path.join(dir_name);
        if !dir_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut matches = Vec::new();
        for entry in std::fs::read_dir(&dir_path)
            .with_context(|| format!("unable to list {}", dir_path.display()))?
        {
            let file_name = entry?.file_name().to_string_lossy().to_string();
            if file_name.starts_with(file_prefix)
                && let Ok(object_id) = ObjectId::try_parse(format!("{dir_name}{file_name}"))
            {
                matches.push(object_id);
            }
        }

        Ok(matches)
    }

    fn read_object(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        let content = match std::fs::read(&object_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(GotError::not_found("object", object_id.to_string()).into());
            }
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("unable to read object file {}", object_path.display())));
            }
        };

        Self::decompress(content.into())
            .map_err(|_| GotError::corrupt("object", format!("{object_id} is not zlib data")).into())
    }

    fn decode(content: Bytes) -> anyhow::Result<ObjectBox> {
        let mut reader = Cursor::new(content.clone());

        let Ok((object_type, size)) = ObjectType::parse_header(&mut reader) else {
            return Ok(Self::probe(content));
        };

        let body_len = reader.fill_buf()?.len();
        if body_len != size {
            return Err(GotError::corrupt(
                "object",
                format!("declared size {size} but found {body_len} bytes"),
            )
            .into());
        }

        ObjectBox::unpack(object_type, reader)
    }

    /// Best-effort decoding of an untagged body
    fn probe(content: Bytes) -> ObjectBox {
        if let Ok(tree) = Tree::unpack(Cursor::new(&content)) {
            return ObjectBox::Tree(tree);
        }
        if let Ok(commit) = Commit::unpack(Cursor::new(&content)) {
            return ObjectBox::Commit(commit);
        }

        ObjectBox::Blob(Blob::new(content))
    }

    fn wrong_type(object_id: &ObjectId, expected: ObjectType, actual: ObjectType) -> anyhow::Error {
        GotError::not_found(
            match expected {
                ObjectType::Blob => "blob",
                ObjectType::Tree => "tree",
                ObjectType::Commit => "commit",
            },
            format!("{object_id} is a {actual}"),
        )
        .into()
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }
}

impl BlobReader for Database {
    fn read_blob(&self, id: &ObjectId) -> anyhow::Result<Bytes> {
        Ok(self.get_blob(id)?.into_content())
    }
}
