use serde::{Deserialize, Deserializer, Serialize};

/// Reads an explicit `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Where a member says they are. `text` is LinkedIn's own rendering
/// ("Greater London, England, United Kingdom"); country and city come from the
/// scraper's parsed form and are often empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
}

impl Location {
    /// Location line shown to the LLM. Falls back to the country when LinkedIn
    /// did not return its free-text location.
    pub fn display(&self) -> &str {
        if self.text.trim().is_empty() {
            &self.country
        } else {
            &self.text
        }
    }
}

/// A single LinkedIn post from the posts scraper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub likes: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub comments: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub reposts: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub post_url: String,
    /// LinkedIn's relative age ("2w"), without the trailing visibility marker.
    #[serde(deserialize_with = "null_as_default")]
    pub relative: String,
    /// Attachment kind as the scraper reports it ("image", "video", ...); empty for text posts.
    #[serde(deserialize_with = "null_as_default")]
    pub media_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub media_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub media_thumbnail: String,
    #[serde(deserialize_with = "null_as_default")]
    pub media_images: Vec<String>,
}

/// A scraped LinkedIn member profile plus whatever recent posts the caller fetched for it.
///
/// Every field defaults so that sparse scraper output (short-mode searches return
/// little more than a name and headline) still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub headline: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: Location,
    #[serde(deserialize_with = "null_as_default")]
    pub about: String,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub linkedin_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub photo: String,
    #[serde(deserialize_with = "null_as_default")]
    pub connections: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub followers: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub is_open_to_work: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_hiring: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_premium: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub experience_summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub education_summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub certifications_summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub posts: Vec<Post>,
}

impl Profile {
    /// Text the boolean query filter runs against: name, headline, company,
    /// about and skills, space-joined.
    pub fn searchable_text(&self) -> String {
        let skills = self.skills.join(", ");
        [
            self.name.as_str(),
            self.headline.as_str(),
            self.company.as_str(),
            self.about.as_str(),
            skills.as_str(),
        ]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// "YES — actively hiring", "Open to work" or "No". Hiring wins when both flags are set.
    pub fn hiring_status(&self) -> &'static str {
        if self.is_hiring {
            "YES — actively hiring"
        } else if self.is_open_to_work {
            "Open to work"
        } else {
            "No"
        }
    }

    /// Display name, never empty.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Unknown"
        } else {
            &self.name
        }
    }
}

/// Truncates `text` to at most `max_chars` characters without splitting a UTF-8 sequence.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_searchable_text_joins_fields_and_skips_empty() {
        let profile = Profile {
            name: "Ada Lovelace".to_string(),
            headline: "Brand Manager".to_string(),
            company: String::new(),
            about: "Marketing lead".to_string(),
            skills: vec!["SEO".to_string(), "Branding".to_string()],
            ..Default::default()
        };
        assert_eq!(
            profile.searchable_text(),
            "Ada Lovelace Brand Manager Marketing lead SEO, Branding"
        );
    }

    #[test]
    fn test_location_display_falls_back_to_country() {
        let location = Location {
            text: String::new(),
            country: "Sri Lanka".to_string(),
            city: "Colombo".to_string(),
        };
        assert_eq!(location.display(), "Sri Lanka");

        let location = Location {
            text: "Colombo, Western Province".to_string(),
            ..location
        };
        assert_eq!(location.display(), "Colombo, Western Province");
    }

    #[test]
    fn test_hiring_status_prefers_hiring_over_open_to_work() {
        let profile = Profile {
            is_hiring: true,
            is_open_to_work: true,
            ..Default::default()
        };
        assert_eq!(profile.hiring_status(), "YES — actively hiring");

        let profile = Profile {
            is_open_to_work: true,
            ..Default::default()
        };
        assert_eq!(profile.hiring_status(), "Open to work");
        assert_eq!(Profile::default().hiring_status(), "No");
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 4), "héll");
        assert_eq!(truncate_chars("short", 500), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_null_fields_read_as_defaults() {
        let json = r#"{
            "name": "A",
            "connections": null,
            "about": null,
            "skills": null,
            "location": {"text": null, "country": "UK"},
            "posts": [{"text": "Hi", "likes": null, "media_images": null}]
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.name, "A");
        assert_eq!(profile.connections, 0);
        assert_eq!(profile.about, "");
        assert!(profile.skills.is_empty());
        assert_eq!(profile.location.display(), "UK");
        assert_eq!(profile.posts[0].likes, 0);
        assert!(profile.posts[0].media_images.is_empty());

        let profile: Profile = serde_json::from_str(r#"{"location": null, "posts": null}"#).unwrap();
        assert_eq!(profile.location, Location::default());
        assert!(profile.posts.is_empty());
    }

    #[test]
    fn test_profile_deserializes_from_sparse_json() {
        let json = r#"{"name": "Grace Hopper", "headline": "Rear Admiral"}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.name, "Grace Hopper");
        assert!(profile.posts.is_empty());
        assert_eq!(profile.connections, 0);
    }
}
