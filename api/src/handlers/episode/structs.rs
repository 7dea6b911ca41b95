use diesel::AsChangeset;
use serde::{Deserialize, Serialize};

use pm_db::models::Episode;
use pm_db::schema::episodes;

#[derive(Debug, Serialize)]
pub struct EpisodeView {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub audio_url: String,
    pub duration: Option<i32>,
    pub status: String,
    pub file_size: Option<i64>,
    pub file_format: Option<String>,
    pub processed_at: Option<String>,
    pub generate_blog: bool,
    pub generate_social: bool,
    pub generate_newsletter: bool,
    pub generate_show_notes: bool,
    pub generate_quote_graphics: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<Episode> for EpisodeView {
    fn from(episode: Episode) -> Self {
        EpisodeView {
            id: episode.id.to_string(),
            user_id: episode.user_id.to_string(),
            title: episode.title,
            audio_url: episode.audio_url,
            duration: episode.duration,
            status: episode.status,
            file_size: episode.file_size,
            file_format: episode.file_format,
            processed_at: episode
                .processed_at
                .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()),
            generate_blog: episode.generate_blog,
            generate_social: episode.generate_social,
            generate_newsletter: episode.generate_newsletter,
            generate_show_notes: episode.generate_show_notes,
            generate_quote_graphics: episode.generate_quote_graphics,
            created_at: episode
                .created_at
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
            updated_at: episode
                .updated_at
                .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateEpisodeRequest {
    pub title: Option<String>,
    pub status: Option<String>,
    pub generate_blog: Option<bool>,
    pub generate_social: Option<bool>,
    pub generate_newsletter: Option<bool>,
    pub generate_show_notes: Option<bool>,
    pub generate_quote_graphics: Option<bool>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = episodes)]
pub struct UpdateEpisodeChangeset {
    pub title: Option<String>,
    pub status: Option<String>,
    pub generate_blog: Option<bool>,
    pub generate_social: Option<bool>,
    pub generate_newsletter: Option<bool>,
    pub generate_show_notes: Option<bool>,
    pub generate_quote_graphics: Option<bool>,
}

impl UpdateEpisodeChangeset {
    pub fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.status.is_some()
            || self.generate_blog.is_some()
            || self.generate_social.is_some()
            || self.generate_newsletter.is_some()
            || self.generate_show_notes.is_some()
            || self.generate_quote_graphics.is_some()
    }
}

impl From<UpdateEpisodeRequest> for UpdateEpisodeChangeset {
    fn from(body: UpdateEpisodeRequest) -> Self {
        UpdateEpisodeChangeset {
            title: body.title,
            status: body.status,
            generate_blog: body.generate_blog,
            generate_social: body.generate_social,
            generate_newsletter: body.generate_newsletter,
            generate_show_notes: body.generate_show_notes,
            generate_quote_graphics: body.generate_quote_graphics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_update_has_no_changes() {
        let changeset = UpdateEpisodeChangeset::from(UpdateEpisodeRequest {
            title: None,
            status: None,
            generate_blog: None,
            generate_social: None,
            generate_newsletter: None,
            generate_show_notes: None,
            generate_quote_graphics: None,
        });

        assert!(!changeset.has_changes());
    }

    #[test]
    fn any_field_counts_as_a_change() {
        let changeset = UpdateEpisodeChangeset::from(UpdateEpisodeRequest {
            title: None,
            status: None,
            generate_blog: Some(false),
            generate_social: None,
            generate_newsletter: None,
            generate_show_notes: None,
            generate_quote_graphics: None,
        });

        assert!(changeset.has_changes());
    }
}
