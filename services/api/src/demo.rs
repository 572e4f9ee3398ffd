use crate::infra::{InMemoryNotificationCenter, InMemoryRecruitingRepository};
use clap::Args;
use nexascore::config::{AppConfig, MatchingConfig};
use nexascore::error::AppError;
use nexascore::workflows::import::{CandidateImportError, CandidatePoolImporter};
use nexascore::workflows::recruiting::{
    Candidate, CvMatch, DesiredSkill, ExperienceTarget, JobRoleId, MatchReport, Posting,
    PostingDraft, ProcessDocumentScorer, RecruitingService, RecruitingServiceError,
    ScoringParameters, SkillCatalog,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

type LocalRecruitingService =
    RecruitingService<InMemoryRecruitingRepository, InMemoryNotificationCenter>;

const SAMPLE_POOL: &str = "\
id,first_name,last_name,email,birth_date,city,experience_years,skills
1,Ada,Lovelace,ada.lovelace@example.com,1990-12-10,Lyon,4,Rust:4;SQL:3;Docker:2
2,Alan,Turing,alan.turing@example.com,1988-06-23,Paris,9,Rust:5;SQL:2;Python:4
3,Grace,Hopper,grace.hopper@example.com,1985-01-01,Lyon,12,SQL:5;COBOL:5
4,Linus,Torvalds,linus.torvalds@example.com,1995-12-28,,1,Rust:1;Docker:4
5,Margaret,Hamilton,margaret.hamilton@example.com,1992-08-17,Lyon,6,Rust:4;SQL:4;Docker:3
6,Barbara,Liskov,barbara.liskov@example.com,1983-11-07,Paris,15,SQL:4;Python:3;Kafka:3
7,Edsger,Dijkstra,edsger.dijkstra@example.com,1991-05-11,Paris,3,SQL:3;Python:5
8,Ken,Thompson,ken.thompson@example.com,1993-02-04,Marseille,,
";

/// Posting as written in a JSON file; skills are referenced by name.
#[derive(Debug, Deserialize)]
pub(crate) struct PostingFile {
    title: String,
    #[serde(default)]
    description: String,
    target_city: String,
    #[serde(default)]
    target_postal_code: Option<String>,
    #[serde(default)]
    job_role_id: u32,
    #[serde(default)]
    desired_skills: Vec<DesiredSkillEntry>,
    #[serde(default)]
    scoring: Option<ScoringParameters>,
}

#[derive(Debug, Deserialize)]
struct DesiredSkillEntry {
    name: String,
    #[serde(default)]
    required_level: Option<u8>,
}

impl PostingFile {
    fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Resolves skill names through `catalog` so they share ids with imported candidates.
    pub(crate) fn into_draft(self, catalog: &mut SkillCatalog) -> PostingDraft {
        let desired_skills = self
            .desired_skills
            .into_iter()
            .filter_map(|entry| {
                catalog.intern(&entry.name).map(|skill| DesiredSkill {
                    skill,
                    required_level: entry.required_level,
                })
            })
            .collect();

        PostingDraft {
            title: self.title,
            description: self.description,
            target_city: self.target_city,
            target_postal_code: self.target_postal_code,
            job_role_id: JobRoleId(self.job_role_id),
            desired_skills,
            scoring: self.scoring,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Posting JSON file (title, target_city, desired_skills, optional scoring)
    #[arg(long)]
    pub(crate) posting: PathBuf,
    /// Candidate CSV export
    #[arg(long)]
    pub(crate) candidates: PathBuf,
    /// Number of results to show (defaults to NEXASCORE_TOP_N)
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// Print the match report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CvArgs {
    /// CV document handed to the scorer
    #[arg(long)]
    pub(crate) document: PathBuf,
    /// Posting JSON files to compare against (defaults to the sample postings)
    #[arg(long = "posting")]
    pub(crate) postings: Vec<PathBuf>,
    /// Scorer command line (defaults to NEXASCORE_CV_SCORER)
    #[arg(long)]
    pub(crate) scorer: Option<String>,
    /// Number of postings to show (defaults to NEXASCORE_CV_TOP_N)
    #[arg(long)]
    pub(crate) top: Option<usize>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Number of candidates listed per posting
    #[arg(long)]
    pub(crate) top: Option<usize>,
}

pub(crate) fn seed_pool(catalog: &mut SkillCatalog) -> Result<Vec<Candidate>, CandidateImportError> {
    CandidatePoolImporter::from_reader(SAMPLE_POOL.as_bytes(), catalog)
}

pub(crate) fn seed_postings(catalog: &mut SkillCatalog) -> Vec<PostingDraft> {
    let backend = PostingFile {
        title: "Backend Engineer".to_string(),
        description: "Design and operate the candidate matching services".to_string(),
        target_city: "Lyon".to_string(),
        target_postal_code: Some("69003".to_string()),
        job_role_id: 1,
        desired_skills: skills(&[("Rust", 4), ("SQL", 3), ("Docker", 2)]),
        scoring: None,
    };
    let data_lead = PostingFile {
        title: "Data Platform Lead".to_string(),
        description: "Lead the streaming and warehousing team".to_string(),
        target_city: "Paris".to_string(),
        target_postal_code: Some("75011".to_string()),
        job_role_id: 2,
        desired_skills: skills(&[("SQL", 4), ("Python", 3), ("Kafka", 2)]),
        scoring: Some(ScoringParameters {
            weight_skills: 50,
            weight_experience: 30,
            weight_location: 20,
            exclude_if_city_mismatch: true,
            experience_target: ExperienceTarget::Senior,
        }),
    };

    vec![backend.into_draft(catalog), data_lead.into_draft(catalog)]
}

fn skills(entries: &[(&str, u8)]) -> Vec<DesiredSkillEntry> {
    entries
        .iter()
        .map(|(name, level)| DesiredSkillEntry {
            name: name.to_string(),
            required_level: Some(*level),
        })
        .collect()
}

fn local_service(
    pool: Vec<Candidate>,
    config: MatchingConfig,
) -> (LocalRecruitingService, Arc<InMemoryNotificationCenter>) {
    let notifications = Arc::new(InMemoryNotificationCenter::default());
    let service = RecruitingService::new(
        Arc::new(InMemoryRecruitingRepository::with_candidates(pool)),
        notifications.clone(),
        config,
    );
    (service, notifications)
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        posting,
        candidates,
        top,
        json,
    } = args;

    let config = AppConfig::load()?;
    let mut catalog = SkillCatalog::new();
    let draft = PostingFile::load(&posting)?.into_draft(&mut catalog);
    let pool = CandidatePoolImporter::from_path(&candidates, &mut catalog)?;

    let (service, _) = local_service(pool, config.matching);
    let posting = service.open_posting(draft)?;
    let report = service.rank_candidates(posting.id, top)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_match_report(&posting, &report);
    }
    Ok(())
}

pub(crate) fn run_cv(args: CvArgs) -> Result<(), AppError> {
    let CvArgs {
        document,
        postings,
        scorer,
        top,
    } = args;

    let config = AppConfig::load()?;
    let command = scorer
        .or(config.cv_scoring.command)
        .ok_or(RecruitingServiceError::ScorerUnavailable)?;
    let scorer = ProcessDocumentScorer::from_command_line(&command)
        .map_err(RecruitingServiceError::from)?;

    let mut catalog = SkillCatalog::new();
    let drafts = if postings.is_empty() {
        seed_postings(&mut catalog)
    } else {
        postings
            .iter()
            .map(|path| PostingFile::load(path).map(|file| file.into_draft(&mut catalog)))
            .collect::<Result<Vec<_>, _>>()?
    };

    let (service, _) = local_service(Vec::new(), config.matching);
    let service = service.with_document_scorer(Arc::new(scorer));
    for draft in drafts {
        service.open_posting(draft)?;
    }

    let matches = service.score_cv(&document, top.unwrap_or(config.cv_scoring.top_n))?;
    render_cv_matches(&document, &matches);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("NexaScore demo");

    let mut catalog = SkillCatalog::new();
    let pool = seed_pool(&mut catalog)?;
    let drafts = seed_postings(&mut catalog);
    println!(
        "Sample pool: {} candidates | skill catalog: {}",
        pool.len(),
        catalog
            .skills()
            .iter()
            .map(|skill| skill.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let (service, notifications) = local_service(pool, MatchingConfig::default());
    let mut opened = Vec::new();
    for draft in drafts {
        let posting = service.open_posting(draft)?;
        let report = service.rank_candidates(posting.id, args.top)?;
        render_match_report(&posting, &report);
        opened.push(posting);
    }

    if let Some(last) = opened.last() {
        service.close_posting(last.id)?;
    }

    println!("\nNotification feed ({} unread)", notifications.unread());
    for notification in notifications.list() {
        println!(
            "- [{}] {}: {}",
            notification.created_at.format("%H:%M:%S"),
            notification.title,
            notification.message
        );
    }

    Ok(())
}

fn render_match_report(posting: &Posting, report: &MatchReport) {
    let scoring = posting.scoring_or_default();
    println!(
        "\n{} ({}) | {} evaluated | {} strong matches",
        report.posting_title, posting.target_city, report.evaluated, report.strong_matches
    );
    println!(
        "Weights: skills {} / experience {} / location {} | target: {} | city veto: {}",
        scoring.weight_skills,
        scoring.weight_experience,
        scoring.weight_location,
        scoring.experience_target.label(),
        if scoring.exclude_if_city_mismatch {
            "on"
        } else {
            "off"
        }
    );

    for (rank, result) in report.results.iter().enumerate() {
        println!(
            "{:>2}. {:<22} {:>3}  skills {:>3} | experience {:>3} | location {:>3} ({})",
            rank + 1,
            result.display_name,
            result.composite_score,
            result.skill_score,
            result.experience_score,
            result.location_score,
            result.city
        );
        for reason in &result.positives {
            println!("      + {reason}");
        }
        for reason in &result.negatives {
            println!("      - {reason}");
        }
    }
}

fn render_cv_matches(document: &Path, matches: &[CvMatch]) {
    println!("CV matches for {}", document.display());
    for (rank, entry) in matches.iter().enumerate() {
        println!(
            "{:>2}. {:<28} {:>5.1}  {}",
            rank + 1,
            entry.posting_title,
            entry.score,
            entry.message
        );
        if !entry.keywords.is_empty() {
            println!("      keywords: {}", entry.keywords.join(", "));
        }
    }
}
