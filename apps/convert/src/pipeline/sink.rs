//! Artifact writer: every checkpoint is saved as Markdown and as rendered HTML.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::AppError;
use crate::pipeline::render::to_html;

/// Named intermediate results of a run, in the order they are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    ResumeRaw,
    ResumePrompt,
    Resume,
    CoverLetterPrompt,
    CoverLetter,
}

impl Checkpoint {
    #[cfg(test)]
    pub const ALL: [Checkpoint; 5] = [
        Checkpoint::ResumeRaw,
        Checkpoint::ResumePrompt,
        Checkpoint::Resume,
        Checkpoint::CoverLetterPrompt,
        Checkpoint::CoverLetter,
    ];

    pub fn file_stem(self) -> &'static str {
        match self {
            Checkpoint::ResumeRaw => "resume_raw",
            Checkpoint::ResumePrompt => "resume_prompt",
            Checkpoint::Resume => "resume",
            Checkpoint::CoverLetterPrompt => "cover_letter_prompt",
            Checkpoint::CoverLetter => "cover_letter",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArtifactSink {
    folder: PathBuf,
}

impl ArtifactSink {
    /// Creates the output folder (and parents) if it does not exist yet.
    pub fn create(folder: impl Into<PathBuf>) -> Result<Self, AppError> {
        let folder = folder.into();
        std::fs::create_dir_all(&folder).map_err(|e| AppError::io(&folder, e))?;
        info!("Writing artifacts to {}", folder.display());
        Ok(Self { folder })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn path_for(&self, checkpoint: Checkpoint, extension: &str) -> PathBuf {
        self.folder
            .join(format!("{}.{extension}", checkpoint.file_stem()))
    }

    /// Writes `<stem>.md` with `text` verbatim and `<stem>.html` with its rendering.
    pub fn write(&self, checkpoint: Checkpoint, text: &str) -> Result<(), AppError> {
        let md_path = self.path_for(checkpoint, "md");
        std::fs::write(&md_path, text).map_err(|e| AppError::io(&md_path, e))?;

        let html_path = self.path_for(checkpoint, "html");
        std::fs::write(&html_path, to_html(text)).map_err(|e| AppError::io(&html_path, e))?;

        debug!(
            "Wrote {} ({} bytes of markdown)",
            checkpoint.file_stem(),
            text.len()
        );
        Ok(())
    }
}
