use crate::error::Error;
use crate::model::Node;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which nodes are eligible for display. A failing node hides its whole subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Filter {
    #[default]
    All,
    HasAlerts,
    HasMisconfigurations,
}

impl Filter {
    /// Selector options in display order.
    pub const ALL: [Filter; 3] = [
        Filter::All,
        Filter::HasAlerts,
        Filter::HasMisconfigurations,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::HasAlerts => "Alerts",
            Filter::HasMisconfigurations => "Misconfigurations",
        }
    }

    pub fn passes(self, node: &Node) -> bool {
        match self {
            Filter::All => true,
            Filter::HasAlerts => node.alert_count >= 1,
            Filter::HasMisconfigurations => node.misconfig_count >= 1,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "all" => Ok(Filter::All),
            "alerts" | "hasalerts" => Ok(Filter::HasAlerts),
            "misconfigurations" | "misconfigs" | "hasmisconfigurations" => {
                Ok(Filter::HasMisconfigurations)
            }
            _ => Err(Error::InvalidFilter {
                name: s.to_string(),
            }),
        }
    }
}
