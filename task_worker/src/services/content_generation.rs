use redact::Secret;
use thiserror::Error;

use pm_db::models::Episode;
use types::{
    BlogPostDraft, NewsletterDraft, ShowNotes, SocialMediaContent,
    SocialPost, TimeStamp,
};

#[derive(Error, Debug)]
pub enum ContentGenerationError {
    #[error("content provider request failed: {0}")]
    Provider(#[from] reqwest::Error),
}

/// Generates the derivative content formats from an episode transcript.
/// All methods currently return templated placeholder output; the HTTP
/// client and provider credentials are held so the real AI calls can be
/// added behind the same signatures.
pub struct ContentGenerationService {
    #[allow(dead_code)]
    http_client: reqwest::Client,
    #[allow(dead_code)]
    openai_api_key: Option<Secret<String>>,
    #[allow(dead_code)]
    anthropic_api_key: Option<Secret<String>>,
}

impl ContentGenerationService {
    pub fn new(config: &pm_app::Config) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            openai_api_key: config.openai_api_key.clone(),
            anthropic_api_key: config.anthropic_api_key.clone(),
        }
    }

    /// Generate a blog post from the episode transcript.
    pub async fn generate_blog_post(
        &self,
        episode: &Episode,
        transcript: &str,
    ) -> Result<BlogPostDraft, ContentGenerationError> {
        let content = format!(
            "This is a generated blog post based on the episode '{}'. \
             The transcript was: {}...",
            episode.title,
            truncate(transcript, 100)
        );

        Ok(BlogPostDraft {
            title: format!("Blog Post for {}", episode.title),
            excerpt: format!("Summary of the episode '{}'", episode.title),
            seo_title: format!("Blog Post for {}", episode.title),
            seo_description: format!(
                "Discover key insights from {}",
                episode.title
            ),
            seo_keywords: "podcast, blog, content".to_string(),
            word_count: content.split_whitespace().count() as i32,
            content,
        })
    }

    /// Generate social media content from the episode transcript.
    pub async fn generate_social_media_content(
        &self,
        episode: &Episode,
        _transcript: &str,
    ) -> Result<SocialMediaContent, ContentGenerationError> {
        Ok(SocialMediaContent {
            twitter_thread: vec![
                SocialPost {
                    text: format!("Thread about {}", episode.title),
                },
                SocialPost {
                    text: "Key insight 1 from the episode...".to_string(),
                },
                SocialPost {
                    text: "Key insight 2 from the episode...".to_string(),
                },
            ],
            linkedin_post: format!(
                "Insights from {}: Key takeaways...",
                episode.title
            ),
            instagram_caption: format!(
                "New episode alert! {} - Key quote: 'Placeholder quote'",
                episode.title
            ),
        })
    }

    /// Generate newsletter content from the episode transcript.
    pub async fn generate_newsletter_content(
        &self,
        episode: &Episode,
        _transcript: &str,
    ) -> Result<NewsletterDraft, ContentGenerationError> {
        Ok(NewsletterDraft {
            subject: format!("New episode: {}", episode.title),
            html_content: format!(
                "<h1>{}</h1><p>Check out our latest episode...</p>",
                episode.title
            ),
            plain_text: format!(
                "{}\n\nCheck out our latest episode...",
                episode.title
            ),
            call_to_action: "Listen Now".to_string(),
        })
    }

    /// Generate show notes from the episode transcript.
    pub async fn generate_show_notes(
        &self,
        episode: &Episode,
        _transcript: &str,
    ) -> Result<ShowNotes, ContentGenerationError> {
        Ok(ShowNotes {
            summary: format!("Summary of {}", episode.title),
            key_topics: vec![
                "Topic 1".to_string(),
                "Topic 2".to_string(),
                "Topic 3".to_string(),
            ],
            time_stamps: vec![
                TimeStamp {
                    time: "00:00".to_string(),
                    topic: "Introduction".to_string(),
                },
                TimeStamp {
                    time: "05:30".to_string(),
                    topic: "Main discussion".to_string(),
                },
                TimeStamp {
                    time: "20:15".to_string(),
                    topic: "Key insights".to_string(),
                },
            ],
            resources: vec![
                "Resource 1".to_string(),
                "Resource 2".to_string(),
            ],
        })
    }
}

/// First `max_chars` characters of the transcript, for excerpt-style
/// templating. Splits on character boundaries, not bytes.
fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn service() -> ContentGenerationService {
        ContentGenerationService {
            http_client: reqwest::Client::new(),
            openai_api_key: None,
            anthropic_api_key: None,
        }
    }

    fn episode(title: &str) -> Episode {
        Episode {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            title: title.to_string(),
            audio_url: "uploads/example.mp3".to_string(),
            duration: None,
            status: "processing".to_string(),
            file_size: Some(1024),
            file_format: Some("mp3".to_string()),
            processed_at: None,
            generate_blog: true,
            generate_social: true,
            generate_newsletter: true,
            generate_show_notes: true,
            generate_quote_graphics: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn blog_post_references_the_episode() {
        let draft = service()
            .generate_blog_post(&episode("Deep Work"), "transcript text")
            .await
            .unwrap();

        assert_eq!(draft.title, "Blog Post for Deep Work");
        assert!(draft.content.contains("transcript text"));
        assert_eq!(
            draft.word_count,
            draft.content.split_whitespace().count() as i32
        );
    }

    #[tokio::test]
    async fn social_content_covers_all_platforms() {
        let content = service()
            .generate_social_media_content(&episode("Deep Work"), "t")
            .await
            .unwrap();

        assert!(!content.twitter_thread.is_empty());
        assert!(content.linkedin_post.contains("Deep Work"));
        assert!(content.instagram_caption.contains("Deep Work"));
    }

    #[tokio::test]
    async fn newsletter_has_both_renderings() {
        let draft = service()
            .generate_newsletter_content(&episode("Deep Work"), "t")
            .await
            .unwrap();

        assert_eq!(draft.subject, "New episode: Deep Work");
        assert!(draft.html_content.contains("<h1>Deep Work</h1>"));
        assert!(draft.plain_text.starts_with("Deep Work"));
    }

    #[test]
    fn truncate_respects_character_boundaries() {
        assert_eq!(truncate("héllo wörld", 5), "héllo");
        assert_eq!(truncate("short", 100), "short");
    }
}
