//! Lead funnel: ranks scored profiles and cuts them into exportable segments.
//!
//! Stateless: callers send back the profiles and score records they got from a scoring
//! batch. Profiles whose scoring failed carry no record and rank as 0.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::profile::Profile;
use crate::models::score::ScoreRecord;
use crate::scoring::scorer::ProfileOutcome;

/// A profile together with its score record, when scoring succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub profile: Profile,
    #[serde(default)]
    pub score: Option<ScoreRecord>,
}

impl Lead {
    pub fn relevance_score(&self) -> u8 {
        self.score.as_ref().map_or(0, ScoreRecord::relevance_score)
    }

    pub fn is_warm(&self) -> bool {
        self.score.as_ref().is_some_and(ScoreRecord::is_warm)
    }

    pub fn has_email(&self) -> bool {
        !self.profile.email.trim().is_empty()
    }
}

/// Pairs each profile with its outcome from [`score_batch`](crate::scoring::scorer::score_batch).
/// `outcomes` must be in input order, as `score_batch` returns them.
pub fn leads_from_outcomes(profiles: &[Profile], outcomes: &[ProfileOutcome]) -> Vec<Lead> {
    profiles
        .iter()
        .zip(outcomes)
        .map(|(profile, outcome)| Lead {
            profile: profile.clone(),
            score: outcome.result.as_ref().ok().cloned(),
        })
        .collect()
}

/// Highest score first. Ties keep their input order.
pub fn rank_leads(mut leads: Vec<Lead>) -> Vec<Lead> {
    leads.sort_by(|a, b| b.relevance_score().cmp(&a.relevance_score()));
    leads
}

/// Positions of `leads` in rank order, without moving them.
pub fn ranked_indices(leads: &[Lead]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..leads.len()).collect();
    indices.sort_by(|&a, &b| leads[b].relevance_score().cmp(&leads[a].relevance_score()));
    indices
}

/// Exportable slices of a ranked lead list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    All,
    WithEmail,
    Warm,
}

impl Segment {
    pub fn includes(&self, lead: &Lead) -> bool {
        match self {
            Segment::All => true,
            Segment::WithEmail => lead.has_email(),
            Segment::Warm => lead.is_warm(),
        }
    }

    /// Download name for the segment's CSV.
    pub fn file_name(&self) -> &'static str {
        match self {
            Segment::All => "all_profiles.csv",
            Segment::WithEmail => "profiles_with_email.csv",
            Segment::Warm => "warm_leads.csv",
        }
    }
}

impl FromStr for Segment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Segment::All),
            "with-email" => Ok(Segment::WithEmail),
            "warm" => Ok(Segment::Warm),
            other => Err(format!("unknown export segment '{other}'")),
        }
    }
}

/// Ranks `leads` and keeps those in `segment`.
pub fn segment_leads(leads: Vec<Lead>, segment: Segment) -> Vec<Lead> {
    rank_leads(leads)
        .into_iter()
        .filter(|lead| segment.includes(lead))
        .collect()
}

/// Sizes of each segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FunnelCounts {
    pub all: usize,
    pub with_email: usize,
    pub warm: usize,
}

impl FunnelCounts {
    pub fn from_leads(leads: &[Lead]) -> Self {
        FunnelCounts {
            all: leads.len(),
            with_email: leads.iter().filter(|l| l.has_email()).count(),
            warm: leads.iter().filter(|l| l.is_warm()).count(),
        }
    }
}

const CSV_HEADERS: [&str; 15] = [
    "First Name",
    "Last Name",
    "Headline",
    "Company",
    "Country",
    "City",
    "Email",
    "LinkedIn URL",
    "Connections",
    "Hiring",
    "Relevance Score",
    "Activity Level",
    "Key Topics",
    "Recommendation",
    "Reasoning",
];

/// Renders leads as CSV with a header row, in the order given.
pub fn write_csv(leads: &[Lead]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for lead in leads {
        let p = &lead.profile;
        let score = lead.score.as_ref();
        writer.write_record([
            p.first_name.as_str(),
            p.last_name.as_str(),
            p.headline.as_str(),
            p.company.as_str(),
            p.location.country.as_str(),
            p.location.city.as_str(),
            p.email.as_str(),
            p.linkedin_url.as_str(),
            p.connections.to_string().as_str(),
            if p.is_hiring { "Yes" } else { "No" },
            lead.relevance_score().to_string().as_str(),
            score.map_or("", |s| s.activity_level().as_str()),
            score
                .map(|s| s.key_topics().join("; "))
                .unwrap_or_default()
                .as_str(),
            score.map_or("", ScoreRecord::recommendation),
            score.map_or("", ScoreRecord::reasoning),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}
