//! CSV import of a candidate pool, used by the offline ranking command.

mod parser;

use crate::workflows::recruiting::catalog::SkillCatalog;
use crate::workflows::recruiting::domain::{AcquiredSkill, Candidate, CandidateId};
use std::io::Read;
use std::path::Path;

use parser::{parse_date, parse_skills, CandidateRecord};

#[derive(Debug)]
pub enum CandidateImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: u64, reason: String },
}

impl std::fmt::Display for CandidateImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateImportError::Io(err) => write!(f, "failed to read candidate export: {}", err),
            CandidateImportError::Csv(err) => write!(f, "invalid candidate CSV data: {}", err),
            CandidateImportError::InvalidRow { line, reason } => {
                write!(f, "invalid candidate on line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for CandidateImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CandidateImportError::Io(err) => Some(err),
            CandidateImportError::Csv(err) => Some(err),
            CandidateImportError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for CandidateImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CandidateImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads candidates from a CSV export with the columns
/// `id,first_name,last_name,email,birth_date,city,experience_years,skills`.
///
/// The skills column lists `Name:level` pairs separated by `;`. Skill names are
/// resolved through `catalog` so candidates and postings share identifiers.
pub struct CandidatePoolImporter;

impl CandidatePoolImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        catalog: &mut SkillCatalog,
    ) -> Result<Vec<Candidate>, CandidateImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, catalog)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        catalog: &mut SkillCatalog,
    ) -> Result<Vec<Candidate>, CandidateImportError> {
        parser::parse_records(reader)?
            .into_iter()
            .map(|record| build_candidate(record, catalog))
            .collect()
    }
}

fn build_candidate(
    record: CandidateRecord,
    catalog: &mut SkillCatalog,
) -> Result<Candidate, CandidateImportError> {
    let CandidateRecord { line, row } = record;
    let invalid = |reason: String| CandidateImportError::InvalidRow { line, reason };

    let birth_date = parse_date(&row.birth_date).map_err(invalid)?;
    let experience_years = row
        .experience_years
        .as_deref()
        .map(|raw| {
            raw.trim()
                .parse::<u32>()
                .map_err(|_| invalid(format!("invalid experience years '{raw}'")))
        })
        .transpose()?;

    let mut skills: Vec<AcquiredSkill> = Vec::new();
    if let Some(raw) = row.skills.as_deref() {
        for entry in parse_skills(raw).map_err(invalid)? {
            let Some(skill) = catalog.intern(entry.name) else {
                continue;
            };
            if skills.iter().any(|held| held.skill.id == skill.id) {
                continue;
            }
            skills.push(AcquiredSkill {
                skill,
                level: entry.level,
            });
        }
    }

    Ok(Candidate {
        id: CandidateId(row.id),
        first_name: row.first_name,
        last_name: row.last_name,
        email: row.email,
        birth_date,
        city: row.city,
        postal_code: None,
        phone: None,
        current_job_title: None,
        description: None,
        experience_years,
        skills,
    })
}
