use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of contract a salary is paid under. Selects the formula branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    /// Umowa o pracę.
    #[serde(rename = "uop")]
    EmploymentContract,
    /// Self-employed contractor invoicing a client.
    #[serde(rename = "b2b")]
    BusinessContract,
    /// Umowa zlecenie for students and young workers.
    #[serde(rename = "uz")]
    YouthContract,
}

impl ContractType {
    pub const ALL: [ContractType; 3] = [
        Self::EmploymentContract,
        Self::BusinessContract,
        Self::YouthContract,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmploymentContract => "uop",
            Self::BusinessContract => "b2b",
            Self::YouthContract => "uz",
        }
    }

    /// Parses a short contract code. Matching ignores case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uop" => Some(Self::EmploymentContract),
            "b2b" => Some(Self::BusinessContract),
            "uz" => Some(Self::YouthContract),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::EmploymentContract => "UoP",
            Self::BusinessContract => "B2B",
            Self::YouthContract => "UoP (Student)",
        }
    }

    pub fn is_business(&self) -> bool {
        matches!(self, Self::BusinessContract)
    }
}

impl fmt::Display for ContractType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
