use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct CandidateRecord {
    pub(crate) line: u64,
    pub(crate) row: CandidateRow,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<CandidateRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut record = csv::StringRecord::new();
    let mut records = Vec::new();

    // Quoted cells may span lines, so take the line from the reader position.
    while csv_reader.read_record(&mut record)? {
        let line = record
            .position()
            .map(csv::Position::line)
            .unwrap_or_default();
        let row: CandidateRow = record.deserialize(Some(&headers))?;
        records.push(CandidateRecord { line, row });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateRow {
    pub(crate) id: u32,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) email: String,
    pub(crate) birth_date: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) city: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) experience_years: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) skills: Option<String>,
}

/// `Name:level` pair as written in the skills column; the level is optional.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct SkillEntry<'a> {
    pub(crate) name: &'a str,
    pub(crate) level: Option<u8>,
}

pub(crate) fn parse_skills(raw: &str) -> Result<Vec<SkillEntry<'_>>, String> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.rsplit_once(':') {
            Some((name, level)) => {
                let level = level.trim();
                if level.is_empty() {
                    return Ok(SkillEntry {
                        name: name.trim(),
                        level: None,
                    });
                }
                level
                    .parse::<u8>()
                    .map(|level| SkillEntry {
                        name: name.trim(),
                        level: Some(level),
                    })
                    .map_err(|_| format!("invalid level '{level}' for skill '{}'", name.trim()))
            }
            None => Ok(SkillEntry {
                name: entry,
                level: None,
            }),
        })
        .collect()
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{value}' as YYYY-MM-DD ({err})"))
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_skill_levels_and_bare_names() {
        let entries = parse_skills("Rust:4; SQL ; Docker:").expect("valid skills");
        assert_eq!(
            entries,
            vec![
                SkillEntry {
                    name: "Rust",
                    level: Some(4)
                },
                SkillEntry {
                    name: "SQL",
                    level: None
                },
                SkillEntry {
                    name: "Docker",
                    level: None
                },
            ]
        );
    }

    #[test]
    fn rejects_non_numeric_levels() {
        let error = parse_skills("Rust:expert").expect_err("invalid level");
        assert!(error.contains("Rust"));
    }

    #[test]
    fn blank_optional_cells_become_none() {
        let csv = "id,first_name,last_name,email,birth_date,city,experience_years,skills\n\
                   7,Ada,Lovelace,ada@example.com,1990-12-10,,,\n";
        let records = parse_records(csv.as_bytes()).expect("parses");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line, 2);
        assert!(records[0].row.city.is_none());
        assert!(records[0].row.experience_years.is_none());
        assert!(records[0].row.skills.is_none());
    }

    #[test]
    fn multi_line_cells_keep_physical_line_numbers() {
        let csv = "id,first_name,last_name,email,birth_date,city,experience_years,skills\n\
                   1,Ada,Lovelace,ada@example.com,1990-12-10,Lyon,4,\"Rust:4;\nSQL:3\"\n\
                   2,Alan,Turing,alan@example.com,1991-06-23,Paris,2,Python:5\n";
        let records = parse_records(csv.as_bytes()).expect("parses");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line, 2);
        assert_eq!(records[1].line, 4);
        assert_eq!(records[0].row.skills.as_deref(), Some("Rust:4;\nSQL:3"));
    }
}
