use egui::Color32;
use serde::{Deserialize, Serialize};

pub const DEFAULT_NODE_BACKGROUND: Color32 = Color32::from_rgb(0xd3, 0xd3, 0xd3);
pub const DEFAULT_NODE_BORDER: Color32 = Color32::from_rgb(0xa0, 0xa0, 0xa0);
pub const NODE_HIGHLIGHT_BACKGROUND: Color32 = Color32::from_rgb(0xd2, 0xe5, 0xff);
pub const NODE_HIGHLIGHT_BORDER: Color32 = Color32::from_rgb(0x2b, 0x7c, 0xe9);

pub const DEFAULT_EDGE: Color32 = Color32::from_rgb(0x84, 0x84, 0x84);
pub const EDGE_HIGHLIGHT: Color32 = Color32::from_rgb(0xf0, 0x4a, 0x4a);

pub const HIGHLIGHT_BFS: Color32 = Color32::from_rgb(0xff, 0x8c, 0x00);
pub const HIGHLIGHT_DFS: Color32 = Color32::from_rgb(0x93, 0x70, 0xdb);
pub const HIGHLIGHT_CYCLE_EDGE: Color32 = Color32::from_rgb(0xe5, 0x1c, 0x23);

pub const SELECTED_FOR_ALGORITHM: Color32 = Color32::from_rgb(0xad, 0xd8, 0xe6);
pub const SELECTED_FOR_ALGORITHM_BORDER: Color32 = Color32::from_rgb(0x00, 0x7b, 0xff);
pub const SELECTED_FOR_EDGE: Color32 = Color32::from_rgb(0xff, 0xda, 0xb9);
pub const SELECTED_FOR_EDGE_BORDER: Color32 = Color32::from_rgb(0xff, 0x7f, 0x50);
pub const RUNNING_START: Color32 = Color32::from_rgb(0x90, 0xee, 0x90);
pub const RUNNING_START_BORDER: Color32 = Color32::from_rgb(0x00, 0x80, 0x00);

/// Cyclic palette used to paint connected components.
pub const COMPONENT_PALETTE: [Color32; 10] = [
    Color32::from_rgb(0x1f, 0x77, 0xb4),
    Color32::from_rgb(0xff, 0x7f, 0x0e),
    Color32::from_rgb(0x2c, 0xa0, 0x2c),
    Color32::from_rgb(0xd6, 0x27, 0x28),
    Color32::from_rgb(0x94, 0x67, 0xbd),
    Color32::from_rgb(0x8c, 0x56, 0x4b),
    Color32::from_rgb(0xe3, 0x77, 0xc2),
    Color32::from_rgb(0x7f, 0x7f, 0x7f),
    Color32::from_rgb(0xbc, 0xbd, 0x22),
    Color32::from_rgb(0x17, 0xbe, 0xcf),
];

/// Display colors of a node: plain state plus the colors used while it is hovered or selected
/// by the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeColor {
    pub background: Color32,
    pub border: Color32,
    pub highlight_background: Color32,
    pub highlight_border: Color32,
}

impl Default for NodeColor {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_BACKGROUND, DEFAULT_NODE_BORDER)
    }
}

impl NodeColor {
    /// Background and border as given, highlight colors left at the renderer defaults.
    pub const fn new(background: Color32, border: Color32) -> Self {
        Self {
            background,
            border,
            highlight_background: NODE_HIGHLIGHT_BACKGROUND,
            highlight_border: NODE_HIGHLIGHT_BORDER,
        }
    }

    /// Same color for every state.
    pub const fn solid(c: Color32) -> Self {
        Self {
            background: c,
            border: c,
            highlight_background: c,
            highlight_border: c,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeColor {
    pub color: Color32,
    pub highlight: Color32,
}

impl Default for EdgeColor {
    fn default() -> Self {
        Self {
            color: DEFAULT_EDGE,
            highlight: EDGE_HIGHLIGHT,
        }
    }
}

impl EdgeColor {
    pub const fn solid(c: Color32) -> Self {
        Self {
            color: c,
            highlight: c,
        }
    }
}
