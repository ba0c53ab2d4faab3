//! Document Pipeline — orchestrates a full conversion run.
//!
//! Flow: extract PDF text → résumé prompt → complete → strip <response> tags →
//!       cover-letter prompt (built from the reformatted résumé) → complete →
//!       strip tags. Every intermediate text is persisted through the sink.
//!
//! The two completion calls run strictly one after another: the second prompt
//! depends on the first reply. Any error aborts the run.

pub mod extract;
pub mod prompts;
pub mod render;
pub mod sink;
pub mod tags;

use std::path::Path;

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::Completer;
use crate::pipeline::prompts::{cover_letter_prompt, resume_prompt, DEFAULT_JOB_DESCRIPTION};
use crate::pipeline::sink::{ArtifactSink, Checkpoint};

/// Tag the prompts ask the model to wrap its answer in.
pub const RESPONSE_TAG: &str = "response";

/// Generated texts of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOutput {
    pub resume: String,
    pub cover_letter: String,
}

/// Runs the full pipeline on a PDF file.
pub async fn run(
    completer: &dyn Completer,
    sink: &ArtifactSink,
    input: &Path,
    job_description: Option<&str>,
) -> Result<ConversionOutput, AppError> {
    info!("Extracting resume from {}", input.display());
    let text = extract::extract(input)?;
    run_from_text(completer, sink, &text, job_description).await
}

/// Runs the pipeline on already-extracted résumé text.
pub async fn run_from_text(
    completer: &dyn Completer,
    sink: &ArtifactSink,
    resume_text: &str,
    job_description: Option<&str>,
) -> Result<ConversionOutput, AppError> {
    sink.write(Checkpoint::ResumeRaw, resume_text)?;

    info!("Generating formatted resume");
    let prompt = resume_prompt(resume_text);
    sink.write(Checkpoint::ResumePrompt, &prompt)?;
    let resume = complete_tagged(completer, &prompt).await?;
    sink.write(Checkpoint::Resume, &resume)?;

    info!("Generating cover letter");
    let job = job_description.unwrap_or(DEFAULT_JOB_DESCRIPTION);
    let prompt = cover_letter_prompt(&resume, job);
    sink.write(Checkpoint::CoverLetterPrompt, &prompt)?;
    let cover_letter = complete_tagged(completer, &prompt).await?;
    sink.write(Checkpoint::CoverLetter, &cover_letter)?;

    info!("Conversion complete: {}", sink.folder().display());
    Ok(ConversionOutput {
        resume,
        cover_letter,
    })
}

async fn complete_tagged(completer: &dyn Completer, prompt: &str) -> Result<String, AppError> {
    let raw = completer.complete(prompt).await?;
    tags::between(&raw, RESPONSE_TAG)
}
