use serde::{Deserialize, Serialize};

/// How business costs are reflected in a B2B net figure.
///
/// Contracts other than B2B always report [`DisplayMode::RealCash`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Invoice net minus the business costs actually paid.
    #[default]
    #[serde(rename = "real")]
    RealCash,
    /// Accounting net: costs lower the tax but are not subtracted from cash.
    #[serde(rename = "invoice")]
    InvoiceNet,
    /// As if there were no business costs at all.
    #[serde(rename = "zero")]
    IgnoringCosts,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [Self::RealCash, Self::InvoiceNet, Self::IgnoringCosts];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RealCash => "real",
            Self::InvoiceNet => "invoice",
            Self::IgnoringCosts => "zero",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "real" => Some(Self::RealCash),
            "invoice" => Some(Self::InvoiceNet),
            "zero" => Some(Self::IgnoringCosts),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::RealCash => "Real Cash",
            Self::InvoiceNet => "Invoice Net",
            Self::IgnoringCosts => "Ignoring Costs",
        }
    }
}
