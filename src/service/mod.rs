use crate::{
    dto::{CreateNoteRequest, NoteResponse, UpdateNoteRequest},
    error::ApiError,
    repository::Repository,
};

/// CRUD operations over the notes table. The sole mutator of note records;
/// enforces the one required-field invariant (non-empty title).
#[derive(Clone)]
pub struct NoteService {
    repo: Repository,
}

impl NoteService {
    pub const fn new(repo: Repository) -> Self {
        Self { repo }
    }

    // Presence check only; whitespace-only titles are accepted.
    fn require_title(title: Option<String>) -> Result<String, ApiError> {
        match title {
            Some(title) if !title.is_empty() => Ok(title),
            _ => Err(ApiError::Validation("Title is required".to_string())),
        }
    }

    pub async fn create_note(
        &self,
        request: CreateNoteRequest,
    ) -> Result<NoteResponse, ApiError> {
        let title = Self::require_title(request.title)?;
        let content = request.content.unwrap_or_default();

        let note = self.repo.create_note(title, content).await?;

        Ok(note.into())
    }

    pub async fn update_note(
        &self,
        id: i64,
        request: UpdateNoteRequest,
    ) -> Result<NoteResponse, ApiError> {
        let title = Self::require_title(request.title)?;
        let content = request.content.unwrap_or_default();

        self.repo
            .update_note(id, title, content)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))
    }

    pub async fn delete_note(&self, id: i64) -> Result<(), ApiError> {
        if self.repo.delete_note(id).await? {
            Ok(())
        } else {
            Err(ApiError::NotFound("Note not found".to_string()))
        }
    }

    pub async fn get_one_note(&self, id: i64) -> Result<NoteResponse, ApiError> {
        self.repo
            .get_one_note(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, ApiError> {
        let notes = self.repo.get_all_notes().await?;

        Ok(notes.into_iter().map(Into::into).collect())
    }
}
