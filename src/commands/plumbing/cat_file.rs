use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Decompress a stored object and print its payload verbatim
    pub fn cat_file(&mut self, sha: &str) -> anyhow::Result<()> {
        let oid = ObjectId::try_parse(sha.to_string())?;
        let payload = self.database().load(&oid)?;

        self.writer().write_all(&payload)?;

        Ok(())
    }
}
