//! Built-in demo graphs

use crate::config::LayoutConfig;
use crate::graph::{EdgeSpec, NodeMeta, NodeSpec};
use crate::io::GraphDocument;
use crate::placement::DEFAULT_SPREAD;

/// Names accepted by [`preset`]
pub const PRESET_NAMES: [&str; 2] = ["frameworks", "knowledge"];

/// Look up a built-in graph by name
pub fn preset(name: &str) -> Option<GraphDocument> {
    match name {
        "frameworks" => Some(frameworks()),
        "knowledge" => Some(knowledge()),
        _ => None,
    }
}

/// One-line summary of a preset, for listings
pub fn describe(name: &str) -> Option<&'static str> {
    match name {
        "frameworks" => Some("3D star of five delivery frameworks around Agile"),
        "knowledge" => Some("2D knowledge network of seven topics around Business Value"),
        _ => None,
    }
}

/// Five agile frameworks, all unplaced, linked around a hub
///
/// Repulsion only reaches as far as the scatter cube is wide.
pub fn frameworks() -> GraphDocument {
    const GREEN: &str = "#4aff4a";
    let node = |id: &str, label: &str| NodeSpec {
        meta: NodeMeta {
            color: Some(GREEN.to_string()),
            ..NodeMeta::default()
        },
        ..NodeSpec::new(id, label)
    };

    GraphDocument {
        config: LayoutConfig {
            repulsion_range: Some(DEFAULT_SPREAD),
            ..LayoutConfig::default()
        },
        nodes: vec![
            node("safe", "SAFe"),
            node("less", "LeSS"),
            node("cynefin", "Cynefin"),
            node("agile", "Agile"),
            node("devops", "DevOps"),
        ],
        edges: vec![
            EdgeSpec::new("safe", "agile"),
            EdgeSpec::new("less", "agile"),
            EdgeSpec::new("cynefin", "agile"),
            EdgeSpec::new("devops", "agile"),
            EdgeSpec::new("safe", "devops"),
            EdgeSpec::new("less", "devops"),
        ],
    }
}

/// Seven grouped topics on the z = 0 plane, with descriptions
pub fn knowledge() -> GraphDocument {
    let node = |id: &str, label: &str, group: &str, x: f32, y: f32, description: &str| {
        NodeSpec {
            meta: NodeMeta {
                color: None,
                group: Some(group.to_string()),
                description: Some(description.to_string()),
            },
            ..NodeSpec::new(id, label).at([x, y, 0.0])
        }
    };

    GraphDocument {
        config: LayoutConfig {
            selection_gated_on_freeze: false,
            ..LayoutConfig::default()
        },
        nodes: vec![
            node(
                "business-value",
                "Business Value",
                "core",
                0.0,
                0.0,
                "Focusing on measurable outcomes and sustainable growth through value stream optimization",
            ),
            node(
                "digital-tetrahedron",
                "Digital Tetrahedron",
                "core",
                -2.0,
                -2.0,
                "Four interconnected aspects: Complexity thinking, Business Agility, Agile Delivery, and UI/UX",
            ),
            node(
                "complexity",
                "Complexity",
                "core",
                2.0,
                -2.0,
                "Understanding and navigating complex adaptive systems in organizational transformation",
            ),
            node(
                "cynefin",
                "Cynefin",
                "framework",
                0.0,
                -4.0,
                "Framework for decision-making in different contexts: Clear, Complicated, Complex, Chaotic",
            ),
            node(
                "product-management",
                "Product Management",
                "framework",
                -2.0,
                2.0,
                "Agile product development and management practices for sustainable growth",
            ),
            node(
                "europe",
                "Europe",
                "region",
                -4.0,
                2.0,
                "Strategic market entry and scaling in European markets, considering cultural and regulatory aspects",
            ),
            node(
                "latin-america",
                "Latin America",
                "region",
                4.0,
                2.0,
                "Market expansion and cultural adaptation strategies for Latin American regions",
            ),
        ],
        edges: vec![
            EdgeSpec::new("business-value", "digital-tetrahedron"),
            EdgeSpec::new("business-value", "complexity"),
            EdgeSpec::new("complexity", "cynefin"),
            EdgeSpec::new("digital-tetrahedron", "product-management"),
            EdgeSpec::new("europe", "business-value"),
            EdgeSpec::new("latin-america", "business-value"),
        ],
    }
}
