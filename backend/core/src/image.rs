//! Image references: a remote URL or an inline base64 `data:` payload.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::OravisionError;

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";
const REMOTE_SCHEMES: [&str; 3] = ["http://", "https://", "gs://"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// `http(s)://` or `gs://` location the vision service fetches itself.
    Remote(String),
    /// Base64 payload carried in the request body.
    Inline { mime_type: String, data: String },
}

impl ImageRef {
    /// Parse a caller-supplied reference. Anything prefixed with `data:` is
    /// treated as inline and must decode as base64.
    pub fn parse(raw: &str) -> Result<Self, OravisionError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(OravisionError::InvalidImage("empty image reference".into()));
        }

        if let Some(rest) = raw.strip_prefix(DATA_PREFIX) {
            let (mime_type, payload) = rest.split_once(BASE64_MARKER).ok_or_else(|| {
                OravisionError::InvalidImage("data URL is not base64-encoded".into())
            })?;
            let data: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
            if data.is_empty() {
                return Err(OravisionError::InvalidImage("data URL has an empty payload".into()));
            }
            STANDARD
                .decode(&data)
                .map_err(|e| OravisionError::InvalidImage(format!("bad base64 payload: {e}")))?;
            return Ok(Self::Inline {
                mime_type: mime_type.to_string(),
                data,
            });
        }

        if REMOTE_SCHEMES.iter().any(|scheme| raw.starts_with(scheme)) {
            Ok(Self::Remote(raw.to_string()))
        } else {
            Err(OravisionError::InvalidImage(format!(
                "expected an http(s)/gs URL or a data: URL, got `{}`",
                truncate(raw, 48)
            )))
        }
    }

    /// Wrap raw image bytes as an inline reference.
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self::Inline {
            mime_type: mime_type.into(),
            data: STANDARD.encode(bytes),
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Self::Inline { .. })
    }

    /// Render back to the string form accepted by [`ImageRef::parse`].
    pub fn to_uri(&self) -> String {
        match self {
            Self::Remote(url) => url.clone(),
            Self::Inline { mime_type, data } => {
                format!("{DATA_PREFIX}{mime_type}{BASE64_MARKER}{data}")
            }
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => f.write_str(url),
            Self::Inline { mime_type, data } => {
                write!(f, "inline {} ({} base64 chars)", mime_type, data.len())
            }
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max).collect();
        format!("{head}…")
    }
}
