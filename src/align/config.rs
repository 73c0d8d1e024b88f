//! Configuration for alignment operations

use serde::{Deserialize, Serialize};

/// How element borders are treated by canvas alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderMode {
    /// Align the element's box edge, border included
    #[default]
    Include,
    /// Shift each element by its border on the aligned edge so the border
    /// sits outside the canvas edge
    Exclude,
}

impl std::str::FromStr for BorderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "include" => Ok(Self::Include),
            "exclude" => Ok(Self::Exclude),
            other => Err(format!("unknown border mode '{}'", other)),
        }
    }
}

/// Options shared by every operation of an [`Aligner`](super::Aligner)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    /// Attach the element handle to each position-change record
    pub include_node: bool,

    /// Border mode used by canvas operations that do not pass one explicitly
    pub border: BorderMode,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            include_node: true,
            border: BorderMode::Include,
        }
    }
}

impl AlignConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether records carry the element handle
    pub fn with_include_node(mut self, include: bool) -> Self {
        self.include_node = include;
        self
    }

    /// Set the default border mode for canvas operations
    pub fn with_border(mut self, border: BorderMode) -> Self {
        self.border = border;
        self
    }
}
