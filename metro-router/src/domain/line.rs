//! Line types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric line identifier, the `route_id` of the feed's `routes` table.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LineId(pub i32);

impl From<i32> for LineId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A metro line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub id: LineId,
    /// Display name, conventionally "<Color> Line".
    pub name: String,
    /// Colour code as given by the feed. Opaque and possibly empty.
    pub color: String,
}

impl Line {
    /// Create a new line.
    pub fn new(id: impl Into<LineId>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }

    /// The colour token of this line's name. See [`color_token`].
    pub fn color_token(&self) -> String {
        color_token(&self.name)
    }
}

/// Extract the colour token from a line name.
///
/// The token is the part of the name before the first space, lowercased.
/// A name without a space is its own token and is returned unchanged, not
/// lowercased, so single-word lines such as "Airport" and "airport" keep the
/// distinct colours they have always had and count as an interchange.
///
/// # Examples
///
/// ```
/// use metro_router::domain::color_token;
///
/// assert_eq!(color_token("Magenta Line"), "magenta");
/// assert_eq!(color_token("Red Line Extension"), "red");
/// assert_eq!(color_token("Airport"), "Airport");
/// ```
pub fn color_token(name: &str) -> String {
    match name.split_once(' ') {
        Some((head, _)) => head.to_lowercase(),
        None => name.to_string(),
    }
}
