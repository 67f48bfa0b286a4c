//! Normalizes raw profile-scraper dataset items into [`Profile`] / [`Post`] values.
//!
//! Scraper output is loosely typed: fields go missing, come back `null`, or change shape
//! between scrape modes. Everything here reads through `serde_json::Value` and falls back
//! to empty values instead of failing.

use std::collections::HashSet;

use serde_json::Value;
use tracing::info;

use crate::models::profile::{truncate_chars, Location, Post, Profile};

const MAX_EXPERIENCE_ENTRIES: usize = 6;
const MAX_EXPERIENCE_DESCRIPTION_CHARS: usize = 300;
const MAX_EXPERIENCE_SKILLS: usize = 6;
const MAX_EDUCATION_ENTRIES: usize = 4;
const MAX_CERTIFICATIONS: usize = 6;

fn str_field<'a>(item: &'a Value, key: &str) -> &'a str {
    item.get(key).and_then(Value::as_str).unwrap_or("")
}

fn u32_field(item: &Value, key: &str) -> u32 {
    item.get(key)
        .and_then(Value::as_u64)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

fn bool_field(item: &Value, key: &str) -> bool {
    item.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn array_field<'a>(item: &'a Value, key: &str) -> &'a [Value] {
    item.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn extract_email(item: &Value) -> String {
    let direct = item
        .get("email")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .or_else(|| item.get("Email").and_then(Value::as_str));
    if let Some(email) = direct.filter(|s| !s.trim().is_empty()) {
        return email.trim().to_string();
    }

    let list = match array_field(item, "emails") {
        [] => array_field(item, "emailAddresses"),
        emails => emails,
    };
    match list.first() {
        Some(Value::Object(_)) => {
            let first = &list[0];
            let email = str_field(first, "email");
            if email.is_empty() {
                str_field(first, "address").to_string()
            } else {
                email.to_string()
            }
        }
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// `(company, company_url)` for the member's current role.
fn extract_current_position(item: &Value) -> (String, String) {
    let company_of = |entry: &Value| {
        (
            str_field(entry, "companyName").to_string(),
            str_field(entry, "companyLinkedinUrl").to_string(),
        )
    };

    if let Some(position) = array_field(item, "currentPosition").first() {
        return company_of(position);
    }

    let experience = array_field(item, "experience");
    let current = experience.iter().find(|exp| match exp.get("endDate") {
        Some(end) if end.as_object().is_some_and(|o| !o.is_empty()) => {
            str_field(end, "text") == "Present" || end.get("year").map_or(true, Value::is_null)
        }
        _ => false,
    });

    current
        .or_else(|| experience.first())
        .map(company_of)
        .unwrap_or_default()
}

fn extract_experience_summary(item: &Value) -> String {
    array_field(item, "experience")
        .iter()
        .take(MAX_EXPERIENCE_ENTRIES)
        .map(|exp| {
            let title = str_field(exp, "position");
            let company = str_field(exp, "companyName");
            let start = exp
                .get("startDate")
                .map(|d| str_field(d, "text"))
                .unwrap_or("");
            let end = exp
                .get("endDate")
                .and_then(|d| d.get("text"))
                .and_then(Value::as_str)
                .unwrap_or("Present");
            let dates = if start.is_empty() {
                str_field(exp, "duration").to_string()
            } else {
                format!("{start} – {end}")
            };

            let mut lines = vec![format!("{title} at {company} ({dates})")];
            let description =
                truncate_chars(str_field(exp, "description"), MAX_EXPERIENCE_DESCRIPTION_CHARS).trim();
            if !description.is_empty() {
                lines.push(format!("  {description}"));
            }
            let skills: Vec<&str> = array_field(exp, "skills")
                .iter()
                .filter_map(Value::as_str)
                .take(MAX_EXPERIENCE_SKILLS)
                .collect();
            if !skills.is_empty() {
                lines.push(format!("  Skills: {}", skills.join(", ")));
            }
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn extract_education_summary(item: &Value) -> String {
    array_field(item, "education")
        .iter()
        .take(MAX_EDUCATION_ENTRIES)
        .map(|edu| {
            let school = str_field(edu, "schoolName");
            let qualification = [str_field(edu, "degree"), str_field(edu, "fieldOfStudy")]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            let mut entry = if qualification.is_empty() {
                school.to_string()
            } else {
                format!("{qualification} — {school}")
            };
            let period = str_field(edu, "period");
            if !period.is_empty() {
                entry.push_str(&format!(" ({period})"));
            }
            entry
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn extract_certifications_summary(item: &Value) -> String {
    array_field(item, "certifications")
        .iter()
        .take(MAX_CERTIFICATIONS)
        .map(|cert| {
            let mut parts = vec![str_field(cert, "title").to_string()];
            let issued_by = str_field(cert, "issuedBy");
            if !issued_by.is_empty() {
                parts.push(format!("by {issued_by}"));
            }
            let issued_at = str_field(cert, "issuedAt");
            if !issued_at.is_empty() {
                parts.push(format!("({issued_at})"));
            }
            parts.join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn extract_skills(item: &Value) -> Vec<String> {
    if let Some(skills) = item.get("skills").and_then(Value::as_array) {
        return skills
            .iter()
            .filter_map(|s| match s {
                Value::Object(_) => s.get("name").and_then(Value::as_str).map(str::to_string),
                Value::String(name) => Some(name.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .filter(|s| !s.trim().is_empty())
            .collect();
    }

    str_field(item, "topSkills")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn extract_location(item: &Value) -> Location {
    match item.get("location") {
        Some(loc @ Value::Object(_)) => {
            let parsed = loc.get("parsed").cloned().unwrap_or(Value::Null);
            let country = match str_field(&parsed, "countryFull") {
                "" => str_field(&parsed, "country"),
                full => full,
            };
            Location {
                text: str_field(loc, "linkedinText").to_string(),
                country: country.to_string(),
                city: str_field(&parsed, "city").to_string(),
            }
        }
        Some(Value::String(text)) => Location {
            text: text.clone(),
            ..Default::default()
        },
        _ => Location::default(),
    }
}

/// Maps one raw profile-search dataset item to a [`Profile`] with no posts.
pub fn parse_profile(item: &Value) -> Profile {
    let (company, company_url) = extract_current_position(item);
    let first_name = str_field(item, "firstName").to_string();
    let last_name = str_field(item, "lastName").to_string();

    Profile {
        name: format!("{first_name} {last_name}").trim().to_string(),
        first_name,
        last_name,
        headline: str_field(item, "headline").to_string(),
        company,
        company_url,
        location: extract_location(item),
        about: str_field(item, "about").to_string(),
        skills: extract_skills(item),
        linkedin_url: str_field(item, "linkedinUrl").to_string(),
        email: extract_email(item),
        photo: str_field(item, "photo").to_string(),
        connections: u32_field(item, "connectionsCount"),
        followers: u32_field(item, "followerCount"),
        is_open_to_work: bool_field(item, "openToWork"),
        is_hiring: bool_field(item, "hiring"),
        is_premium: bool_field(item, "premium"),
        experience_summary: extract_experience_summary(item),
        education_summary: extract_education_summary(item),
        certifications_summary: extract_certifications_summary(item),
        posts: Vec::new(),
    }
}

/// Maps one raw posts-scraper dataset item to a [`Post`].
pub fn parse_post(item: &Value) -> Post {
    let stats = item.get("stats").cloned().unwrap_or(Value::Null);
    let posted_at = item.get("posted_at").cloned().unwrap_or(Value::Null);
    let media = item.get("media").cloned().unwrap_or(Value::Null);
    // "2w • Edited • 🌐" -> "2w"
    let relative = str_field(&posted_at, "relative")
        .split('•')
        .next()
        .unwrap_or("")
        .trim();
    let media_images = array_field(&media, "images")
        .iter()
        .map(|img| str_field(img, "url"))
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect();

    Post {
        text: str_field(item, "text").to_string(),
        date: str_field(&posted_at, "date").to_string(),
        likes: u32_field(&stats, "total_reactions"),
        comments: u32_field(&stats, "comments"),
        reposts: u32_field(&stats, "reposts"),
        post_url: str_field(item, "url").to_string(),
        relative: relative.to_string(),
        media_type: str_field(&media, "type").to_string(),
        media_url: str_field(&media, "url").to_string(),
        media_thumbnail: str_field(&media, "thumbnail").to_string(),
        media_images,
    }
}

/// Drops profiles whose LinkedIn URL was already seen. Profiles without a URL are kept.
pub fn dedup_by_url(profiles: Vec<Profile>) -> Vec<Profile> {
    let mut seen = HashSet::new();
    profiles
        .into_iter()
        .filter(|p| p.linkedin_url.is_empty() || seen.insert(p.linkedin_url.clone()))
        .collect()
}

/// Parses a full dataset and deduplicates it.
pub fn parse_profiles(items: &[Value]) -> Vec<Profile> {
    let profiles = dedup_by_url(items.iter().map(parse_profile).collect());
    let with_email = profiles.iter().filter(|p| !p.email.is_empty()).count();
    info!(
        "Normalized {} raw items into {} profiles, {} with emails",
        items.len(),
        profiles.len(),
        with_email
    );
    profiles
}
