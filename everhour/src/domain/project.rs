use serde::{Deserialize, Serialize};

/// Referenced by id from [`super::Task`]; used for display enrichment only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}
