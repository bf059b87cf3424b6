//! Report question model.

use serde::{Deserialize, Serialize};

/// A question athletes answer when reporting an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub question: String,
    /// Answer kind, e.g. "text" or "radio:range"
    #[serde(rename = "type")]
    pub kind: String,
}
