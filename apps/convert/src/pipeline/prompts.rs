// Prompt templates for the two completion calls.
// Both ask the model to wrap its answer in <response></response> tags,
// which `tags::between` strips afterwards.

/// Résumé reformatting prompt. Replace `{resume}` before sending.
pub const RESUME_PROMPT_TEMPLATE: &str = "\
You are a recruiter for a Fortune-500 IT department.
Reformat this resume to be easy to read.
Use only information provided in this resume. Do not add information or use information from other sources.
Include four sections: A two-paragraph summary; Education; Experience; Familiar Technologies
Format your response as Markdown with the first header at level 1. Enclose your response in <response></response> tags.
<resume>
{resume}
</resume>";

/// Cover letter prompt. Replace `{job}` and `{resume}` before sending.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = "\
You are a recruiter for a Fortune-500 IT department.
Write a 1000 word cover letter explaining why this candidate is the perfect person for the job described below.
This job does not yet exist, so you will need to also explain why this job position would benefit Peace Health.
Format your response as Markdown with the first header at level 1. Enclose your response in <response></response> tags.

<job>{job}</job>

<resume>
{resume}
</resume>";

/// Job posting used when no `--job` file is given.
pub const DEFAULT_JOB_DESCRIPTION: &str = "Peace Health in Eugene, Oregon is looking for the right \
person to manage their Artificial Intelligence practice. The ideal candidate will have recent \
experience working with Generative AI, Machine Learning, and Data Science.";

pub fn resume_prompt(resume: &str) -> String {
    fill(RESUME_PROMPT_TEMPLATE, &[("{resume}", resume)])
}

pub fn cover_letter_prompt(resume: &str, job: &str) -> String {
    fill(COVER_LETTER_PROMPT_TEMPLATE, &[("{job}", job), ("{resume}", resume)])
}

/// Substitutes placeholders in a single left-to-right pass over `template`.
/// Inserted values are never rescanned, so text containing `{job}` or
/// `{resume}` is copied verbatim.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;
    loop {
        let next = values
            .iter()
            .filter_map(|&(placeholder, value)| {
                rest.find(placeholder).map(|at| (at, placeholder, value))
            })
            .min_by_key(|&(at, _, _)| at);
        let Some((at, placeholder, value)) = next else {
            break;
        };
        out.push_str(&rest[..at]);
        out.push_str(value);
        rest = &rest[at + placeholder.len()..];
    }
    out.push_str(rest);
    out
}
