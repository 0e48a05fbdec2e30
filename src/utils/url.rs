//! Listing video embeds and contact links.

use url::Url;

use crate::config::APP_NAME;

/// How a listing's video URL is rendered on its card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoEmbed {
    /// YouTube player iframe (embed URL).
    YouTube(String),
    /// Direct mp4 file rendered with a `<video>` element.
    Video(String),
    /// Google Drive preview iframe.
    Drive(String),
    /// No playable preview; carries the placeholder text.
    Unavailable(&'static str),
}

impl VideoEmbed {
    /// Classify a listing video URL.
    ///
    /// Supported sources:
    /// 1. YouTube (`youtube.com/watch?v=…`, `youtu.be/…`)
    /// 2. Discord CDN mp4 attachments
    /// 3. Google Drive file links (`drive.google.com/file/d/<id>/…`)
    pub fn classify(video_url: Option<&str>) -> Self {
        let Some(raw) = video_url.map(str::trim).filter(|u| !u.is_empty()) else {
            return Self::Unavailable("Video preview unavailable");
        };

        if raw.contains("youtube.com") || raw.contains("youtu.be") {
            return match youtube_embed_url(raw) {
                Some(embed) => Self::YouTube(embed),
                None => Self::Unavailable("Invalid YouTube URL"),
            };
        }

        if raw.contains("cdn.discordapp.com") && raw.contains(".mp4") {
            return Self::Video(raw.to_string());
        }

        if let Some((_, rest)) = raw.split_once("drive.google.com/file/d/") {
            let file_id = rest.split(['/', '?']).next().unwrap_or_default();
            if file_id.is_empty() {
                return Self::Unavailable("Invalid Google Drive URL");
            }
            return Self::Drive(format!("https://drive.google.com/file/d/{}/preview", file_id));
        }

        Self::Unavailable("Video preview unavailable")
    }
}

/// Extract the YouTube embed URL for a watch or short link.
fn youtube_embed_url(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw).ok()?;
    let host = parsed.host_str()?;

    let video_id = if host == "youtu.be" {
        parsed
            .path_segments()?
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    } else if host.ends_with("youtube.com") {
        parsed
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.into_owned())
            .filter(|v| !v.is_empty())
    } else {
        None
    }?;

    Some(format!("https://www.youtube.com/embed/{}", video_id))
}

/// WhatsApp deep link with a prefilled purchase message.
pub fn whatsapp_link(phone: &str, seller_name: &str, title: &str, price: &str) -> Option<String> {
    let phone: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if phone.is_empty() {
        return None;
    }

    let message = format!(
        "Hi, {}! I'm interested in the account \"{}\" priced at {}, which I saw on {}.",
        seller_name, title, price, APP_NAME
    );
    Url::parse_with_params(
        "https://api.whatsapp.com/send",
        &[("phone", phone.as_str()), ("text", message.as_str())],
    )
    .ok()
    .map(String::from)
}
