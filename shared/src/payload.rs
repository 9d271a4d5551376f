use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

pub const MAX_NAME_LEN: usize = 64;
pub const MAX_MESSAGE_LEN: usize = 280;
pub const MAX_PATH_LEN: usize = 64 * 1024;

/// The one boundary-crossing contract: what a completed hold hands to the
/// submission endpoint. Name and message are trimmed before they get here.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SignaturePayload {
    pub path: String,
    #[serde(rename = "viewBox")]
    pub view_box: String,
    pub name: String,
    pub message: String,
}

/// A stored guestbook entry as the server persists and lists it.
#[derive(Serialize, Deserialize, Encode, Decode, Clone, Debug, PartialEq)]
pub struct SignatureEntry {
    pub id: String,
    pub name: String,
    pub message: String,
    pub path: String,
    #[serde(rename = "viewBox")]
    pub view_box: String,
    pub created_at_ms: u64,
}

/// `"0 0 <w> <h>"` for the drawing surface's rendered size. Degenerate
/// surfaces yield nothing; a commit without a viewBox must not fire.
pub fn view_box_string(width: f64, height: f64) -> Option<String> {
    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some(format!("0 0 {width:.0} {height:.0}"))
}

pub fn parse_view_box(view_box: &str) -> Option<(f64, f64)> {
    let mut parts = view_box.split_whitespace();
    if parts.next()? != "0" || parts.next()? != "0" {
        return None;
    }
    let width: f64 = parts.next()?.parse().ok()?;
    let height: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Some((width, height))
    } else {
        None
    }
}
