//! Beta CV matching: compares an uploaded document against every posting through an
//! external keyword scorer.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};

use super::domain::{Posting, PostingId};

/// Times each desired skill name is repeated in the reference text to boost its weight.
const SKILL_EMPHASIS: usize = 3;

/// Opaque document scorer.
pub trait DocumentScorer: Send + Sync {
    fn score(&self, document: &Path, reference_text: &str)
        -> Result<DocumentScore, DocumentScorerError>;
}

/// Score returned by a document scorer, on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentScore {
    pub score: f64,
    pub matches: Vec<String>,
    pub message: String,
}

/// One posting's result in a CV matching run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvMatch {
    pub posting_id: PostingId,
    pub posting_title: String,
    pub score: f64,
    pub message: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentScorerError {
    #[error("failed to launch document scorer: {0}")]
    Launch(#[from] std::io::Error),
    #[error("document scorer reported an error: {0}")]
    Stderr(String),
    #[error("document scorer returned no output")]
    EmptyOutput,
    #[error("document scorer returned invalid JSON: {output}")]
    InvalidJson {
        output: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("document scorer rejected the document: {0}")]
    Rejected(String),
    #[error("document scorer command is empty")]
    EmptyCommand,
}

/// Text the scorer compares a CV against: title, description, then each skill name
/// repeated for emphasis.
pub fn reference_text(posting: &Posting) -> String {
    let mut text = format!("{} {}", posting.title, posting.description);
    for desired in &posting.desired_skills {
        for _ in 0..SKILL_EMPHASIS {
            text.push(' ');
            text.push_str(&desired.skill.name);
        }
    }
    text
}

/// Runs an external program as `<program> [args..] <document> <reference text>` and
/// reads a JSON verdict from its standard output.
#[derive(Debug, Clone)]
pub struct ProcessDocumentScorer {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessDocumentScorer {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Builds a scorer from a whitespace separated command line.
    pub fn from_command_line(command: &str) -> Result<Self, DocumentScorerError> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(DocumentScorerError::EmptyCommand)?;
        Ok(Self::new(program, parts.collect()))
    }
}

impl DocumentScorer for ProcessDocumentScorer {
    fn score(
        &self,
        document: &Path,
        reference_text: &str,
    ) -> Result<DocumentScore, DocumentScorerError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(document)
            .arg(reference_text.replace('"', "'"))
            .output()?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        parse_scorer_output(&stdout, &stderr)
    }
}

#[derive(Debug, Deserialize)]
struct ScorerResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    matches: Vec<String>,
    #[serde(default)]
    message: String,
}

pub(crate) fn parse_scorer_output(
    stdout: &str,
    stderr: &str,
) -> Result<DocumentScore, DocumentScorerError> {
    if !stderr.trim().is_empty() {
        return Err(DocumentScorerError::Stderr(stderr.trim().to_string()));
    }

    let stdout = stdout.trim();
    if stdout.is_empty() {
        return Err(DocumentScorerError::EmptyOutput);
    }

    let response: ScorerResponse =
        serde_json::from_str(stdout).map_err(|source| DocumentScorerError::InvalidJson {
            output: stdout.to_string(),
            source,
        })?;

    if !response.success {
        return Err(DocumentScorerError::Rejected(response.message));
    }

    Ok(DocumentScore {
        score: response.score,
        matches: response.matches,
        message: response.message,
    })
}
