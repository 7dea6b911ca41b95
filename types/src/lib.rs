use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle of an uploaded episode.
///
/// An episode starts as `Uploaded` and only ever moves forward:
/// `Uploaded -> Processing -> {Completed, Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeStatus {
    Uploaded,
    Processing,
    Completed,
    Failed,
}

impl EpisodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EpisodeStatus::Uploaded => "uploaded",
            EpisodeStatus::Processing => "processing",
            EpisodeStatus::Completed => "completed",
            EpisodeStatus::Failed => "failed",
        }
    }
}

impl FromStr for EpisodeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uploaded" => Ok(EpisodeStatus::Uploaded),
            "processing" => Ok(EpisodeStatus::Processing),
            "completed" => Ok(EpisodeStatus::Completed),
            "failed" => Ok(EpisodeStatus::Failed),
            _ => Err(format!("invalid episode status: {}", s)),
        }
    }
}

impl fmt::Display for EpisodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle of a processing job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(JobStatus::Pending),
            "processing" => Ok(JobStatus::Processing),
            "completed" => Ok(JobStatus::Completed),
            "failed" => Ok(JobStatus::Failed),
            _ => Err(format!("invalid job status: {}", s)),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Publication state of a generated content record (blog post, social
/// thread, newsletter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Draft,
    Scheduled,
    Published,
    Sent,
    Failed,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Scheduled => "scheduled",
            ContentStatus::Published => "published",
            ContentStatus::Sent => "sent",
            ContentStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Social platform a thread is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Linkedin,
    Instagram,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
            Platform::Instagram => "instagram",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An individual segment of a transcript with start and end offsets in
/// seconds, the text of the segment, and the speaker it is attributed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
}

/// Full output of the transcription adapter for one audio file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResult {
    pub text: String,
    pub segments: Vec<Segment>,
    pub speakers: Vec<String>,
    pub word_count: i32,
    pub confidence: f64,
}

/// A generated blog post draft, before persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPostDraft {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub seo_title: String,
    pub seo_description: String,
    pub seo_keywords: String,
    pub word_count: i32,
}

/// One post within a social thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    pub text: String,
}

/// Generated social media content across the supported platforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialMediaContent {
    pub twitter_thread: Vec<SocialPost>,
    pub linkedin_post: String,
    pub instagram_caption: String,
}

/// A generated newsletter draft, before persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsletterDraft {
    pub subject: String,
    pub html_content: String,
    pub plain_text: String,
    pub call_to_action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeStamp {
    pub time: String,
    pub topic: String,
}

/// Generated show notes. These have no table of their own; they are
/// computed per episode and surfaced through logs only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowNotes {
    pub summary: String,
    pub key_topics: Vec<String>,
    pub time_stamps: Vec<TimeStamp>,
    pub resources: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn episode_status_round_trips_through_strings() {
        for status in [
            EpisodeStatus::Uploaded,
            EpisodeStatus::Processing,
            EpisodeStatus::Completed,
            EpisodeStatus::Failed,
        ] {
            assert_eq!(status.as_str().parse::<EpisodeStatus>(), Ok(status));
        }
    }

    #[test]
    fn job_status_rejects_unknown_values() {
        assert!("cancelled".parse::<JobStatus>().is_err());
    }

    #[test]
    fn terminal_job_statuses() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::Processing.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }

    #[test]
    fn segment_omits_missing_speaker() {
        let segment = Segment {
            start: 0.0,
            end: 10.0,
            text: "This is a sample segment.".to_string(),
            speaker: None,
        };

        let value = serde_json::to_value(&segment).unwrap();
        assert!(value.get("speaker").is_none());
    }
}
