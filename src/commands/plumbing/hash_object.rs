use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use std::io::Write;

impl Repository {
    /// Hash a file as a blob, optionally storing it in the object database
    pub fn hash_object(&mut self, path: &str, write: bool) -> anyhow::Result<()> {
        let relative = self.relativize_arg(path)?;
        let data = self.workspace().read_file(&relative)?;
        let blob = Blob::new(data);

        let object_id = blob.object_id()?;
        writeln!(self.writer(), "{}", object_id)?;

        if write {
            self.database().store(&blob)?;
        }

        Ok(())
    }
}
