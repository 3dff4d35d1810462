//! Tool registry
//!
//! Read-only list of the toolkit's pages, consumed by the index page and the
//! `/api/tools` endpoint.

use serde::Serialize;

/// One toolkit page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tool {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub route: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

/// All registered tools, in menu order
pub static TOOLS: &[Tool] = &[
    Tool {
        id: "hp-mandarin",
        name: "hp Mandarin AI Translator",
        description: "AI-powered translator for Mandarin, English, and Thai translations",
        route: "/tools/hp-mandarin",
        icon: "🌐",
        color: "#7a9eb8",
    },
    Tool {
        id: "hp-email-drafter",
        name: "hp Email Drafter",
        description: "Professional client email drafting with customizable tone and language",
        route: "/tools/hp-email-drafter",
        icon: "✉️",
        color: "#9caf88",
    },
    Tool {
        id: "hp-music-profile",
        name: "hp Music Profile Viewer",
        description: "Upload and view music profile files with detailed track information",
        route: "/tools/hp-music-profile",
        icon: "🎵",
        color: "#c9a9a6",
    },
    Tool {
        id: "hp-replacement-form",
        name: "hp Replacement Form",
        description: "Generate a system replacement request table for email",
        route: "/tools/hp-replacement-form",
        icon: "📋",
        color: "#e8c07d",
    },
    Tool {
        id: "hp-track-extractor",
        name: "hp Track Extractor",
        description: "Extract played tracks from DVJ log files",
        route: "/tools/hp-track-extractor",
        icon: "📜",
        color: "#b5a3c9",
    },
];

/// All registered tools
pub fn all() -> &'static [Tool] {
    TOOLS
}

/// Look up a tool by id
pub fn find(id: &str) -> Option<&'static Tool> {
    TOOLS.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_has_five_tools() {
        assert_eq!(all().len(), 5);
    }

    #[test]
    fn test_ids_and_routes_unique() {
        let ids: HashSet<_> = all().iter().map(|t| t.id).collect();
        let routes: HashSet<_> = all().iter().map(|t| t.route).collect();
        assert_eq!(ids.len(), all().len());
        assert_eq!(routes.len(), all().len());
    }

    #[test]
    fn test_route_matches_id() {
        for tool in all() {
            assert_eq!(tool.route, format!("/tools/{}", tool.id));
        }
    }

    #[test]
    fn test_serializes_flat() {
        let json = serde_json::to_value(find("hp-mandarin").unwrap()).unwrap();
        assert_eq!(json["id"], "hp-mandarin");
        assert_eq!(json["route"], "/tools/hp-mandarin");
        assert_eq!(json["color"], "#7a9eb8");
    }

    #[test]
    fn test_find() {
        assert_eq!(find("hp-music-profile").unwrap().name, "hp Music Profile Viewer");
        assert!(find("nope").is_none());
    }
}
