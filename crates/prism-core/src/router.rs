//! Routing decision — maps a message to one of the three backends
//!
//! Pure and side-effect-free: an explicit hint wins outright, long or
//! keyword-bearing messages go to gradient, everything else falls through
//! to the local LM Studio backend.

use tracing::debug;

/// Messages longer than this (after trimming) are considered heavyweight
/// and routed to gradient.
const MAX_DIRECT_MESSAGE_LEN: usize = 120;

/// The backend selected for a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Local OpenAI-compatible backend (default)
    Lmstudio,
    /// Hosted gradient inference endpoint
    Gradient,
    /// DigitalOcean fallback endpoint
    Do,
}

impl Route {
    /// Parse a caller-supplied hint, trimming and lowercasing first.
    /// Unrecognized hints yield `None` and are ignored by the router.
    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint.trim().to_lowercase().as_str() {
            "lmstudio" => Some(Self::Lmstudio),
            "gradient" => Some(Self::Gradient),
            "do" => Some(Self::Do),
            _ => None,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lmstudio => write!(f, "lmstudio"),
            Self::Gradient => write!(f, "gradient"),
            Self::Do => write!(f, "do"),
        }
    }
}

/// Decide which backend should handle `message`.
///
/// In order: an explicit recognized hint always wins; messages longer than
/// 120 characters go to gradient; messages containing any configured
/// keyword (substring, case-insensitive) go to gradient; everything else
/// goes to lmstudio. Every input yields a route.
///
/// Keywords are trimmed and lowercased before matching, so callers may
/// pass them raw; empty entries never match.
pub fn decide_route(message: &str, explicit_hint: Option<&str>, keywords: &[String]) -> Route {
    if let Some(hint) = explicit_hint {
        if let Some(route) = Route::from_hint(hint) {
            debug!("Explicit hint '{}' selected route {}", hint.trim(), route);
            return route;
        }
    }

    let text = message.trim().to_lowercase();

    // Character count, not bytes — multibyte text should not route early
    if text.chars().count() > MAX_DIRECT_MESSAGE_LEN {
        debug!("Message length exceeds direct limit of {}", MAX_DIRECT_MESSAGE_LEN);
        return Route::Gradient;
    }

    let keyword_match = keywords.iter().any(|kw| {
        let kw = kw.trim().to_lowercase();
        !kw.is_empty() && text.contains(kw.as_str())
    });
    if keyword_match {
        debug!("Keyword match routed message to gradient");
        return Route::Gradient;
    }

    Route::Lmstudio
}
