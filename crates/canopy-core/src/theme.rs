//! Category colors and icons.

use crate::layout::PositionedNode;
use crate::visibility::VisibleEdge;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Cloud,
    Server,
    Database,
    Box,
}

/// Pure category lookups. Unknown categories fall back to a default.
pub trait Theme {
    fn node_color(&self, category: &str) -> &str;
    fn edge_color(&self, category: &str) -> &str;
    fn icon(&self, category: &str) -> Icon;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTheme;

impl DefaultTheme {
    pub const FALLBACK_NODE_COLOR: &'static str = "#D1D5DB";
    pub const FALLBACK_EDGE_COLOR: &'static str = "#9CA3AF";
    /// Badge icon tint.
    pub const BADGE_COLOR: &'static str = "#C74137";
}

impl Theme for DefaultTheme {
    fn node_color(&self, category: &str) -> &str {
        match category {
            "cloud" => "#60A5FA",
            "aws" => "#FB923C",
            "gcp" => "#22C55E",
            "saas" => "#A855F7",
            "service" => "#9CA3AF",
            "database" => "#FACC15",
            _ => Self::FALLBACK_NODE_COLOR,
        }
    }

    fn edge_color(&self, category: &str) -> &str {
        match category {
            "cloud" => "#3B82F6",
            "aws" => "#F97316",
            "gcp" => "#22C55E",
            "saas" => "#A855F7",
            "service" => "#6B7280",
            "database" => "#FBBF24",
            _ => Self::FALLBACK_EDGE_COLOR,
        }
    }

    fn icon(&self, category: &str) -> Icon {
        match category {
            "cloud" | "gcp" => Icon::Cloud,
            "aws" | "service" => Icon::Server,
            "rds" | "database" => Icon::Database,
            _ => Icon::Box,
        }
    }
}

/// Everything a renderer needs to draw one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeVisualStyle {
    pub label: String,
    pub color: String,
    pub icon: Icon,
    pub alert_badge: u32,
    pub misconfig_badge: u32,
    pub collapsed: bool,
    pub collapsible: bool,
}

impl NodeVisualStyle {
    pub fn for_node(node: &PositionedNode, theme: &dyn Theme) -> Self {
        let n = &node.visible.node;
        Self {
            label: n.label.clone(),
            color: theme.node_color(&n.category).to_string(),
            icon: theme.icon(&n.category),
            alert_badge: n.alert_count,
            misconfig_badge: n.misconfig_count,
            collapsed: node.visible.collapsed,
            collapsible: node.visible.collapsible,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeVisualStyle {
    pub color: String,
    pub stroke_width: f64,
    pub animated: bool,
}

impl EdgeVisualStyle {
    pub fn for_edge(edge: &VisibleEdge, theme: &dyn Theme) -> Self {
        Self {
            color: theme.edge_color(&edge.target_category).to_string(),
            stroke_width: 2.0,
            animated: true,
        }
    }
}
