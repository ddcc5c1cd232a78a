//! Capsule template under verification

use serde::{Deserialize, Serialize};
use std::fmt;

/// The capsule whose procedures contain the analyzed transferring sites
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapsuleTemplate {
    qualified_name: String,
}

impl CapsuleTemplate {
    /// `qualified_name` uses `/` as package separator (e.g. "org/demo/Master")
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
        }
    }

    #[inline]
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// File name of the JSON report log: "org.demo.Master.json"
    pub fn log_file_name(&self) -> String {
        format!("{}.json", self.qualified_name.replace('/', "."))
    }
}

impl fmt::Display for CapsuleTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name)
    }
}
