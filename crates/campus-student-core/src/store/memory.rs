//! In-memory Student Store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use campus_student_model::student::{Student, StudentFields};

use super::{StoreError, StudentStore};

/// Student records held in a concurrent map, keyed by `StudentID`.
#[derive(Debug, Default)]
pub struct InMemoryStudentStore {
    students: DashMap<String, Student>,
}

impl InMemoryStudentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStore for InMemoryStudentStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, student_id: &str) -> Result<Option<Student>, StoreError> {
        Ok(self.students.get(student_id).map(|entry| entry.value().clone()))
    }

    async fn put(&self, student: Student) -> Result<(), StoreError> {
        tracing::debug!(student_id = %student.student_id, "putting student");
        self.students.insert(student.student_id.clone(), student);
        Ok(())
    }

    async fn update(&self, student_id: &str, fields: StudentFields) -> Result<(), StoreError> {
        tracing::debug!(student_id, "updating student");
        match self.students.entry(student_id.to_owned()) {
            Entry::Occupied(mut entry) => entry.get_mut().replace_fields(fields),
            Entry::Vacant(entry) => {
                entry.insert(Student::from_fields(student_id, fields));
            }
        }
        Ok(())
    }

    async fn delete(&self, student_id: &str) -> Result<(), StoreError> {
        tracing::debug!(student_id, "deleting student");
        self.students.remove(student_id);
        Ok(())
    }
}
