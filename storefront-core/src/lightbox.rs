//! Lightbox state: which image, if any, is currently enlarged.
use crate::keys::Key;

/// The enlarged image shown by the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxImage {
    pub src: String,
    pub alt: String,
}

impl LightboxImage {
    pub fn new(src: impl Into<String>, alt: Option<&str>) -> Self {
        Self {
            src: src.into(),
            alt: alt.unwrap_or_default().to_string(),
        }
    }

    /// Resolve the image to show for a clicked thumbnail, preferring the
    /// full-resolution attribute over the thumbnail's own source.
    #[must_use]
    pub fn from_thumbnail(full: Option<&str>, src: &str, alt: Option<&str>) -> Self {
        let source = full.filter(|url| !url.is_empty()).unwrap_or(src);
        Self::new(source, alt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKeyAction {
    Close,
    Ignore,
}

/// Map a key pressed while the overlay is open.
///
/// Only Escape does anything: the overlay shows a single image, so arrow keys
/// are recognised and deliberately ignored.
#[must_use]
pub const fn key_action(key: Key) -> LightboxKeyAction {
    match key {
        Key::Escape => LightboxKeyAction::Close,
        Key::Enter | Key::Space | Key::ArrowLeft | Key::ArrowRight | Key::Other => {
            LightboxKeyAction::Ignore
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LightboxState {
    #[default]
    Closed,
    Open(LightboxImage),
}

impl LightboxState {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    #[must_use]
    pub const fn image(&self) -> Option<&LightboxImage> {
        match self {
            Self::Open(image) => Some(image),
            Self::Closed => None,
        }
    }

    /// Show `image`, replacing whatever was shown before.
    pub fn open(&mut self, image: LightboxImage) {
        *self = Self::Open(image);
    }

    /// Returns whether the overlay was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        *self = Self::Closed;
        was_open
    }
}
