use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GotError;
use std::io::Write;

impl Repository {
    /// Pretty-print any stored object
    pub fn cat_file(&self, object_id: &str) -> anyhow::Result<()> {
        let object_id = self.find_object_id(object_id)?;
        let object = self.database().load(&object_id)?;

        writeln!(self.writer(), "{}", object.display())?;

        Ok(())
    }

    /// Full ID of a stored object given its full or abbreviated form
    pub fn find_object_id(&self, raw: &str) -> anyhow::Result<ObjectId> {
        if ObjectId::is_valid(raw) {
            return ObjectId::try_parse(raw);
        }

        match self.database().find_objects_by_prefix(raw)?.as_slice() {
            [] => Err(GotError::not_found("object", raw).into()),
            [object_id] => Ok(object_id.clone()),
            _ => Err(GotError::invalid(format!("short object id {raw} is ambiguous")).into()),
        }
    }
}
