// Prompt construction for relevance scoring.
// Rendering is deterministic: same query, filters and profile always give the same text.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{ChatMessage, CompletionRequest};
use crate::models::filters::FilterSet;
use crate::models::profile::{truncate_chars, Post, Profile};

pub const MAX_POSTS_IN_PROMPT: usize = 25;
pub const MAX_POST_CHARS: usize = 500;
pub const SCORING_TEMPERATURE: f64 = 0.0;
pub const SCORING_MAX_TOKENS: u32 = 500;

const SCORING_ROLE: &str = "You are a LinkedIn profile analyst. Your job is to analyze a LinkedIn \
profile and their recent posts to determine how well they match the user's search intent.";

/// Response schema shown to the model. Field names must match `RawScoreResponse`.
pub const SCORING_RESPONSE_SCHEMA: &str = r#"{
  "relevance_score": <integer 0-100>,
  "activity_level": "<High|Medium|Low|Inactive>",
  "key_topics": ["topic1", "topic2", "topic3"],
  "areas_of_interest": ["area1", "area2", "area3"],
  "recent_activity_summary": "<2-3 sentences about what they post about>",
  "engagement_metrics": "<summary of posting frequency and engagement>",
  "recommendation": "<1-2 sentences: is this a strong match and why>",
  "reasoning": "<brief explanation of the relevance score>"
}"#;

/// Renders the populated filter fields as a bullet list, or `None` when nothing is set.
pub fn render_filter_summary(filters: &FilterSet) -> String {
    let lines: Vec<String> = filters
        .populated_fields()
        .into_iter()
        .map(|(label, values)| format!("- {label}: {}", values.join(", ")))
        .collect();

    if lines.is_empty() {
        "None".to_string()
    } else {
        lines.join("\n")
    }
}

/// System instruction for one scoring batch. The raw query is embedded verbatim.
pub fn build_system_prompt(query: &str, filters: &FilterSet) -> String {
    let filters_text = render_filter_summary(filters);

    format!(
        "{SCORING_ROLE}

THE USER'S SEARCH INTENT:
Search Query: {query}
Filters Applied:
{filters_text}

ANALYSIS INSTRUCTIONS:
1. Relevance Score (0-100): How well does this person match \"{query}\"? Consider their job title, headline, company, skills, and activity.
2. Activity Level: Based on their posts — how active are they on LinkedIn? (High = posts weekly+, Medium = posts monthly, Low = posts rarely, Inactive = no recent posts)
3. Key Topics: What are the main themes they discuss in their posts? List at most 3.
4. Areas of Interest: What professional domains are they engaged with?
5. Recent Activity Summary: What have they been posting about recently?
6. Engagement Metrics: Summarize their posting patterns — avg likes, comments, how often they post.
7. Recommendation: Is this a strong match for \"{query}\"? Why or why not?

{JSON_ONLY_INSTRUCTION} Use this exact format:
{SCORING_RESPONSE_SCHEMA}"
    )
}

/// Renders up to `max_posts` posts, each truncated to [`MAX_POST_CHARS`].
/// Posts are expected newest first, as the posts scraper returns them.
pub fn format_posts(posts: &[Post], max_posts: usize) -> String {
    if posts.is_empty() {
        return "No posts available.".to_string();
    }

    posts
        .iter()
        .take(max_posts)
        .enumerate()
        .map(|(i, post)| {
            let date = if post.date.is_empty() {
                "unknown date"
            } else {
                post.date.as_str()
            };
            format!(
                "Post {} ({}) — {} likes, {} comments, {} reposts:\n{}",
                i + 1,
                date,
                post.likes,
                post.comments,
                post.reposts,
                truncate_chars(&post.text, MAX_POST_CHARS)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

/// User message carrying the profile and its recent posts.
pub fn build_user_message(profile: &Profile) -> String {
    let skills = profile.skills.join(", ");

    format!(
        "Profile:
Name: {}
Headline: {}
Company: {}
Location: {}
LinkedIn URL: {}
About: {}
Skills: {}
Connections: {}
Followers: {}
Hiring: {}
Premium Member: {}

Recent LinkedIn Posts ({} total):
{}",
        or_na(&profile.name),
        or_na(&profile.headline),
        or_na(&profile.company),
        or_na(profile.location.display()),
        or_na(&profile.linkedin_url),
        or_na(&profile.about),
        or_na(&skills),
        profile.connections,
        profile.followers,
        profile.hiring_status(),
        profile.is_premium,
        profile.posts.len(),
        format_posts(&profile.posts, MAX_POSTS_IN_PROMPT)
    )
}

/// The full scoring call: deterministic, bounded output, JSON mode.
pub fn build_scoring_request(system_prompt: &str, profile: &Profile) -> CompletionRequest {
    CompletionRequest {
        system: Some(system_prompt.to_string()),
        messages: vec![ChatMessage::user(build_user_message(profile))],
        temperature: SCORING_TEMPERATURE,
        max_tokens: SCORING_MAX_TOKENS,
        json_mode: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::Location;

    fn post(text: &str) -> Post {
        Post {
            text: text.to_string(),
            date: "2025-05-01".to_string(),
            likes: 10,
            comments: 2,
            reposts: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_system_prompt_embeds_query_verbatim() {
        let query = r#""brand manager" AND marketing NOT intern"#;
        let prompt = build_system_prompt(query, &FilterSet::new());
        assert!(prompt.contains(&format!("Search Query: {query}\n")));
        assert!(prompt.contains("Filters Applied:\nNone\n"));
    }

    #[test]
    fn test_system_prompt_lists_only_populated_filters_in_order() {
        let filters = FilterSet::new()
            .with_industry(["Retail"])
            .with_job_titles(["Brand Manager", "Marketing Director"])
            .with_locations(["London"]);
        let prompt = build_system_prompt("brand", &filters);

        let expected = "Filters Applied:\n- Locations: London\n- Job Titles: Brand Manager, Marketing Director\n- Industry: Retail\n";
        assert!(prompt.contains(expected), "prompt was:\n{prompt}");
        assert!(!prompt.contains("Companies"));
        assert!(!prompt.contains("Seniority:"));
    }

    #[test]
    fn test_system_prompt_is_deterministic() {
        let filters = FilterSet::new().with_companies(["Acme"]);
        assert_eq!(
            build_system_prompt("cmo", &filters),
            build_system_prompt("cmo", &filters)
        );
    }

    #[test]
    fn test_system_prompt_carries_schema() {
        let prompt = build_system_prompt("cmo", &FilterSet::new());
        for field in [
            "relevance_score",
            "activity_level",
            "key_topics",
            "areas_of_interest",
            "recent_activity_summary",
            "engagement_metrics",
            "recommendation",
            "reasoning",
        ] {
            assert!(prompt.contains(&format!("\"{field}\"")), "missing {field}");
        }
    }

    #[test]
    fn test_format_posts_caps_count_and_length() {
        let long = "x".repeat(800);
        let posts: Vec<Post> = (0..30).map(|_| post(&long)).collect();
        let rendered = format_posts(&posts, MAX_POSTS_IN_PROMPT);

        assert!(rendered.contains("Post 25 (2025-05-01)"));
        assert!(!rendered.contains("Post 26"));
        let first_body = rendered.split('\n').nth(1).unwrap();
        assert_eq!(first_body.chars().count(), MAX_POST_CHARS);
    }

    #[test]
    fn test_format_posts_handles_empty_and_missing_date() {
        assert_eq!(format_posts(&[], 25), "No posts available.");
        let mut p = post("Hello");
        p.date.clear();
        assert_eq!(
            format_posts(&[p], 25),
            "Post 1 (unknown date) — 10 likes, 2 comments, 1 reposts:\nHello"
        );
    }

    #[test]
    fn test_user_message_serializes_profile() {
        let profile = Profile {
            name: "Ada Lovelace".to_string(),
            headline: "Head of Brand".to_string(),
            company: "Acme".to_string(),
            location: Location {
                text: "London, UK".to_string(),
                ..Default::default()
            },
            linkedin_url: "https://www.linkedin.com/in/ada".to_string(),
            skills: vec!["Branding".to_string(), "SEO".to_string()],
            connections: 500,
            followers: 1200,
            is_hiring: true,
            posts: vec![post("Our rebrand is live")],
            ..Default::default()
        };
        let message = build_user_message(&profile);

        assert!(message.starts_with("Profile:\nName: Ada Lovelace\nHeadline: Head of Brand\n"));
        assert!(message.contains("Location: London, UK\n"));
        assert!(message.contains("LinkedIn URL: https://www.linkedin.com/in/ada\n"));
        assert!(message.contains("About: N/A\n"));
        assert!(message.contains("Skills: Branding, SEO\n"));
        assert!(message.contains("Connections: 500\nFollowers: 1200\n"));
        assert!(message.contains("Hiring: YES — actively hiring\n"));
        assert!(message.contains("Premium Member: false\n"));
        assert!(message.contains("Recent LinkedIn Posts (1 total):\nPost 1 (2025-05-01)"));
    }

    #[test]
    fn test_scoring_request_is_deterministic_json_call() {
        let request = build_scoring_request("system", &Profile::default());
        assert_eq!(request.temperature, 0.0);
        assert_eq!(request.max_tokens, 500);
        assert!(request.json_mode);
        assert_eq!(request.system.as_deref(), Some("system"));
        assert_eq!(request.messages.len(), 1);
    }
}
