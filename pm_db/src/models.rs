use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub hashed_password: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub subscription_tier: String,
    pub brand_config: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::episodes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Episode {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub audio_url: String,
    pub duration: Option<i32>,
    pub status: String,
    pub file_size: Option<i64>,
    pub file_format: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    pub generate_blog: bool,
    pub generate_social: bool,
    pub generate_newsletter: bool,
    pub generate_show_notes: bool,
    pub generate_quote_graphics: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::transcripts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Transcript {
    pub id: Uuid,
    pub episode_id: Uuid,
    pub text: String,
    pub segments: Option<serde_json::Value>,
    pub speakers: Option<serde_json::Value>,
    pub word_count: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::processing_jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProcessingJob {
    pub id: Uuid,
    pub episode_id: Uuid,
    pub job_type: String,
    pub status: String,
    pub progress: i32,
    pub error_log: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::blog_posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BlogPost {
    pub id: Uuid,
    pub episode_id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub word_count: Option<i32>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
    pub status: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::social_threads)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SocialThread {
    pub id: Uuid,
    pub episode_id: Uuid,
    pub platform: String,
    pub thread: serde_json::Value,
    pub status: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::newsletters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Newsletter {
    pub id: Uuid,
    pub episode_id: Uuid,
    pub subject: String,
    pub html_content: String,
    pub plain_text: String,
    pub variant: String,
    pub status: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
