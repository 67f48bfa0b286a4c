// Prompt construction for profile chat and outreach emails.

use crate::config::SenderIdentity;
use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, NO_FABRICATION_INSTRUCTION};
use crate::models::profile::{truncate_chars, Profile};
use crate::models::score::ScoreRecord;
use crate::scoring::prompts::format_posts;

pub const MAX_CHAT_POSTS: usize = 80;
pub const MAX_HISTORY_TURNS: usize = 10;
pub const CHAT_TEMPERATURE: f64 = 0.7;
pub const CHAT_MAX_TOKENS: u32 = 600;

pub const MAX_EMAIL_POSTS: usize = 5;
pub const MAX_EMAIL_POST_CHARS: usize = 200;
pub const MAX_EMAIL_ABOUT_CHARS: usize = 400;
pub const EMAIL_TEMPERATURE: f64 = 0.8;
pub const EMAIL_MAX_TOKENS: u32 = 500;

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

/// System prompt giving the model the whole profile to answer questions from.
/// Optional sections are included only when they carry data.
pub fn build_chat_system_prompt(profile: &Profile) -> String {
    let mut lines: Vec<String> = vec![
        "You are a knowledgeable assistant with complete access to a specific LinkedIn \
         professional's data. Answer questions ONLY based on the information provided below."
            .to_string(),
        format!("{NO_FABRICATION_INSTRUCTION} Be concise, conversational, and helpful."),
        String::new(),
        "=== PROFILE ===".to_string(),
        format!("Name: {}", or_na(&profile.name)),
        format!("Headline: {}", or_na(&profile.headline)),
        format!("Current Company: {}", or_na(&profile.company)),
        format!("Location: {}", or_na(profile.location.display())),
        format!(
            "Connections: {}  |  Followers: {}",
            profile.connections, profile.followers
        ),
        format!(
            "Premium Member: {}  |  Hiring: {}",
            profile.is_premium,
            profile.hiring_status()
        ),
    ];

    let sections = [
        ("About:", profile.about.as_str()),
        ("Work Experience:", profile.experience_summary.as_str()),
        ("Education:", profile.education_summary.as_str()),
        ("Certifications:", profile.certifications_summary.as_str()),
    ];
    for (heading, body) in sections {
        if !body.trim().is_empty() {
            lines.extend([String::new(), heading.to_string(), body.to_string()]);
        }
    }

    if !profile.skills.is_empty() {
        lines.extend([String::new(), format!("Skills: {}", profile.skills.join(", "))]);
    }

    lines.extend([
        String::new(),
        format!("=== LINKEDIN POSTS ({} total) ===", profile.posts.len()),
        format_posts(&profile.posts, MAX_CHAT_POSTS),
    ]);

    lines.join("\n")
}

/// Bulleted sample of the most recent non-empty posts, or a placeholder.
pub fn format_recent_posts(profile: &Profile) -> String {
    let bullets: Vec<String> = profile
        .posts
        .iter()
        .take(MAX_EMAIL_POSTS)
        .map(|p| truncate_chars(p.text.trim(), MAX_EMAIL_POST_CHARS).trim())
        .filter(|text| !text.is_empty())
        .map(|text| format!("- {text}"))
        .collect();

    if bullets.is_empty() {
        "No recent posts available.".to_string()
    } else {
        bullets.join("\n")
    }
}

/// Single-message prompt asking for a `{subject, body}` email draft.
pub fn build_outreach_prompt(
    sender: &SenderIdentity,
    profile: &Profile,
    analysis: Option<&ScoreRecord>,
) -> String {
    let key_topics = analysis.map(|a| a.key_topics().join(", ")).unwrap_or_default();
    let activity = analysis
        .map(|a| a.recent_activity_summary())
        .unwrap_or_default();

    let SenderIdentity {
        name: sender_name,
        email: sender_email,
        company,
        pitch,
    } = sender;

    format!(
        "You are helping {sender_name} of {company} write a short personalised cold outreach email.

ABOUT {company_upper}:
{pitch}

SENDER:
Name: {sender_name}
Email: {sender_email}
Company: {company}

RECIPIENT PROFILE:
Name: {name}
Title: {headline}
Company: {recipient_company}
Location: {location}
About: {about}
Key Topics they post about: {topics}
Recent Activity: {activity}
Sample recent posts:
{posts}

TASK:
Write a concise, personalised cold outreach email (120-160 words max).
Rules:
- Open with a specific, genuine observation about their role or recent activity, not generic flattery
- Briefly explain what {company} does and why it is relevant to them or their company
- End with a single soft call-to-action, such as a 20-minute call
- Tone: warm, professional, peer-to-peer. Not salesy or templated
- Sign off with {sender_name}, {company}

{JSON_ONLY_INSTRUCTION} Use this exact format:
{{\"subject\": \"<compelling subject line>\", \"body\": \"<full email body with line breaks as \\n>\"}}",
        company_upper = company.to_uppercase(),
        pitch = or_na(pitch),
        sender_email = or_na(sender_email),
        name = or_na(&profile.name),
        headline = or_na(&profile.headline),
        recipient_company = or_na(&profile.company),
        location = or_na(profile.location.display()),
        about = or_na(truncate_chars(&profile.about, MAX_EMAIL_ABOUT_CHARS)),
        topics = or_na(&key_topics),
        activity = or_na(activity),
        posts = format_recent_posts(profile),
    )
}
