use anyhow::{Result, bail};
use civicboard_core::event::parse_date;
use civicboard_core::store::RecordStore;
use civicboard_core::{Board, BoardResult, Media, MediaContent, MediaKind};
use clap::{Args, Subcommand};
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::utils::prompt;

#[derive(Subcommand, Debug)]
pub enum MediaItem {
    /// Add a photo
    Photo {
        /// Image URL
        url: Option<String>,

        #[arg(long)]
        caption: Option<String>,
    },
    /// Add a video (YouTube, Vimeo or a direct file URL)
    Video {
        url: Option<String>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Add a presentation
    Presentation {
        url: Option<String>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Presentation date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// File format, e.g. PDF or PowerPoint
        #[arg(long)]
        format: Option<String>,
    },
}

/// Media fields that can be given on the command line. Which ones apply
/// depends on the item's kind.
#[derive(Args, Debug, Default)]
pub struct MediaFields {
    #[arg(long)]
    pub url: Option<String>,

    /// Photos only
    #[arg(long)]
    pub caption: Option<String>,

    /// Videos and presentations
    #[arg(long)]
    pub title: Option<String>,

    /// Videos and presentations
    #[arg(long)]
    pub description: Option<String>,

    /// Presentations only (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Presentations only
    #[arg(long)]
    pub format: Option<String>,
}

impl MediaFields {
    pub fn is_empty(&self) -> bool {
        self.url.is_none()
            && self.caption.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.format.is_none()
    }

    /// Overwrite the fields of `content` that were given. Fields that do
    /// not belong to the content's kind are rejected.
    pub fn apply_to(self, content: &mut MediaContent) -> Result<()> {
        let kind = content.kind();
        let misplaced = match kind {
            MediaKind::Photo => [
                ("title", self.title.is_some()),
                ("description", self.description.is_some()),
                ("date", self.date.is_some()),
                ("format", self.format.is_some()),
            ]
            .into_iter()
            .find(|(_, given)| *given),
            MediaKind::Video => [
                ("caption", self.caption.is_some()),
                ("date", self.date.is_some()),
                ("format", self.format.is_some()),
            ]
            .into_iter()
            .find(|(_, given)| *given),
            MediaKind::Presentation => [("caption", self.caption.is_some())]
                .into_iter()
                .find(|(_, given)| *given),
        };
        if let Some((field, _)) = misplaced {
            bail!("A {} has no {} field", kind, field);
        }

        match content {
            MediaContent::Photo { url, caption } => {
                set_url(url, self.url)?;
                set_text(caption, self.caption);
            }
            MediaContent::Video {
                url,
                title,
                description,
            } => {
                set_url(url, self.url)?;
                set_text(title, self.title);
                set_text(description, self.description);
            }
            MediaContent::Presentation {
                url,
                title,
                description,
                date,
                format,
            } => {
                set_url(url, self.url)?;
                set_text(title, self.title);
                set_text(description, self.description);
                if let Some(value) = self.date {
                    *date = check_optional_date(&value)?;
                }
                set_text(format, self.format);
            }
        }
        Ok(())
    }
}

fn set_url(target: &mut String, value: Option<String>) -> Result<()> {
    if let Some(value) = value {
        let value = value.trim();
        if value.is_empty() {
            bail!("The url cannot be empty");
        }
        *target = value.to_string();
    }
    Ok(())
}

fn set_text(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value.trim().to_string();
    }
}

/// An empty presentation date is allowed; anything else must be a valid date.
fn check_optional_date(input: &str) -> BoardResult<String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(String::new());
    }
    parse_date(input)?;
    Ok(input.to_string())
}

pub fn list(board: &Board, kind: Option<MediaKind>, json: bool) -> Result<()> {
    let items = board.media().list()?;
    let kinds: Vec<MediaKind> = match kind {
        Some(kind) => vec![kind],
        None => MediaKind::ALL.to_vec(),
    };

    if json {
        let selected: Vec<&Media> = items
            .iter()
            .filter(|m| kinds.contains(&m.kind()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    for (i, kind) in kinds.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let section: Vec<&Media> = items.iter().filter(|m| m.kind() == *kind).collect();
        println!("{}", section_title(*kind).bold());

        if section.is_empty() {
            println!("  {}", kind.empty_message().dimmed());
            continue;
        }
        for media in section {
            println!("{}", media.render());
        }
    }

    Ok(())
}

fn section_title(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Photo => "Photos",
        MediaKind::Video => "Videos",
        MediaKind::Presentation => "Presentations",
    }
}

pub fn add(board: &Board, item: MediaItem) -> Result<()> {
    let content = match item {
        MediaItem::Photo { url, caption } => {
            let interactive = url.is_none();
            MediaContent::Photo {
                url: required_or_prompt(url, "Image URL")?,
                caption: optional_or_prompt(caption, "Caption", interactive)?,
            }
        }
        MediaItem::Video {
            url,
            title,
            description,
        } => {
            let interactive = url.is_none();
            MediaContent::Video {
                url: required_or_prompt(url, "Video URL")?,
                title: required_or_prompt(title, "Title")?,
                description: optional_or_prompt(description, "Description", interactive)?,
            }
        }
        MediaItem::Presentation {
            url,
            title,
            description,
            date,
            format,
        } => {
            let interactive = url.is_none();
            let url = required_or_prompt(url, "File URL")?;
            let title = required_or_prompt(title, "Title")?;
            let description = optional_or_prompt(description, "Description", interactive)?;
            let date = match date {
                Some(d) => check_optional_date(&d)?,
                None if interactive => {
                    prompt::prompt_with_retry("Date (YYYY-MM-DD, skip)", "", check_optional_date)?
                }
                None => String::new(),
            };
            MediaContent::Presentation {
                url,
                title,
                description,
                date,
                format: optional_or_prompt(format, "Format (PDF, PowerPoint…)", interactive)?,
            }
        }
    };

    let created = board.media().create(Media::new(content))?;
    println!("{}", format!("  Added {}: {}", created.kind(), created.label()).green());
    println!("  {}", created.id.dimmed());

    Ok(())
}

pub fn edit(board: &Board, id: &str, fields: MediaFields) -> Result<()> {
    let store = board.media();
    let mut media = store.get(id)?;

    if fields.is_empty() {
        prompt_content(&mut media.content)?;
        println!();
    } else {
        fields.apply_to(&mut media.content)?;
    }

    let updated = store.update(media)?;
    println!("{}", format!("  Updated {}: {}", updated.kind(), updated.label()).green());

    Ok(())
}

pub fn delete(board: &Board, id: &str, yes: bool) -> Result<()> {
    let store = board.media();
    let media = store.get(id)?;

    println!("{}", media.render());
    println!();

    if !prompt::confirm("Are you sure you want to delete this item?", yes)? {
        return Ok(());
    }

    let removed = store.delete(id)?;
    println!("{}", format!("  Deleted {}: {}", removed.kind(), removed.label()).red());

    Ok(())
}

/// Walk through every field of `content`, offering the current values as defaults.
fn prompt_content(content: &mut MediaContent) -> Result<()> {
    match content {
        MediaContent::Photo { url, caption } => {
            *url = prompt::required("Image URL", url)?;
            *caption = prompt::optional("Caption", caption)?;
        }
        MediaContent::Video {
            url,
            title,
            description,
        } => {
            *url = prompt::required("Video URL", url)?;
            *title = prompt::required("Title", title)?;
            *description = prompt::optional("Description", description)?;
        }
        MediaContent::Presentation {
            url,
            title,
            description,
            date,
            format,
        } => {
            *url = prompt::required("File URL", url)?;
            *title = prompt::required("Title", title)?;
            *description = prompt::optional("Description", description)?;
            *date = prompt::prompt_with_retry("Date (YYYY-MM-DD, skip)", date, check_optional_date)?;
            *format = prompt::optional("Format", format)?;
        }
    }
    Ok(())
}

fn required_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        Some(_) => bail!("{} cannot be empty", prompt),
        None => prompt::required(prompt, ""),
    }
}

fn optional_or_prompt(value: Option<String>, prompt: &str, interactive: bool) -> Result<String> {
    match value {
        Some(v) => Ok(v.trim().to_string()),
        None if interactive => prompt::optional(prompt, ""),
        None => Ok(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presentation() -> MediaContent {
        MediaContent::Presentation {
            url: "https://example.org/civics.pdf".to_string(),
            title: "Civics 101".to_string(),
            description: String::new(),
            date: "2025-09-01".to_string(),
            format: "PDF".to_string(),
        }
    }

    #[test]
    fn test_apply_fields_to_presentation() {
        let mut content = presentation();
        MediaFields {
            title: Some("Civics 102".to_string()),
            date: Some("2025-10-01".to_string()),
            ..Default::default()
        }
        .apply_to(&mut content)
        .unwrap();

        let MediaContent::Presentation {
            title, date, format, ..
        } = content
        else {
            panic!("kind changed");
        };
        assert_eq!(title, "Civics 102");
        assert_eq!(date, "2025-10-01");
        assert_eq!(format, "PDF");
    }

    #[test]
    fn test_fields_of_other_kinds_are_rejected() {
        let mut photo = MediaContent::Photo {
            url: "https://example.org/a.jpg".to_string(),
            caption: String::new(),
        };
        let err = MediaFields {
            format: Some("PDF".to_string()),
            ..Default::default()
        }
        .apply_to(&mut photo)
        .unwrap_err();
        assert!(err.to_string().contains("format"));

        let mut content = presentation();
        assert!(
            MediaFields {
                caption: Some("hi".to_string()),
                ..Default::default()
            }
            .apply_to(&mut content)
            .is_err()
        );
    }

    #[test]
    fn test_bad_values_are_rejected() {
        let mut content = presentation();
        assert!(
            MediaFields {
                date: Some("September".to_string()),
                ..Default::default()
            }
            .apply_to(&mut content)
            .is_err()
        );
        assert!(
            MediaFields {
                url: Some(" ".to_string()),
                ..Default::default()
            }
            .apply_to(&mut content)
            .is_err()
        );
    }

    #[test]
    fn test_empty_presentation_date_is_allowed() {
        assert_eq!(check_optional_date("  ").unwrap(), "");
        assert_eq!(check_optional_date("2025-09-01").unwrap(), "2025-09-01");
    }
}
