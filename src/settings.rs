use std::time::Duration;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::elements::color::{
    COMPONENT_PALETTE, HIGHLIGHT_BFS, HIGHLIGHT_CYCLE_EDGE, HIGHLIGHT_DFS, RUNNING_START,
    RUNNING_START_BORDER, SELECTED_FOR_ALGORITHM, SELECTED_FOR_ALGORITHM_BORDER,
    SELECTED_FOR_EDGE, SELECTED_FOR_EDGE_BORDER,
};
use crate::{EdgeColor, NodeColor};

pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(550);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsEngine {
    /// Pause between two algorithm steps. Presentation only, results do not depend on it.
    pub step_interval: Duration,
}

impl Default for SettingsEngine {
    fn default() -> Self {
        Self {
            step_interval: DEFAULT_STEP_INTERVAL,
        }
    }
}

impl SettingsEngine {
    pub fn with_step_interval(mut self, step_interval: Duration) -> Self {
        self.step_interval = step_interval;
        self
    }
}

/// Colors painted by the algorithms and the selection controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsStyle {
    pub node_default: NodeColor,
    pub edge_default: EdgeColor,

    pub bfs_visited: NodeColor,
    pub dfs_visited: NodeColor,
    pub cycle_visited: NodeColor,
    pub cycle_edge: EdgeColor,

    /// Cycled through by component number. An empty palette paints components with
    /// `node_default`.
    pub component_palette: Vec<Color32>,

    pub selected_for_algorithm: NodeColor,
    pub selected_for_edge: NodeColor,
    pub running_start: NodeColor,
}

impl Default for SettingsStyle {
    fn default() -> Self {
        Self {
            node_default: NodeColor::default(),
            edge_default: EdgeColor::default(),
            bfs_visited: NodeColor::solid(HIGHLIGHT_BFS),
            dfs_visited: NodeColor::solid(HIGHLIGHT_DFS),
            cycle_visited: NodeColor::new(HIGHLIGHT_DFS, HIGHLIGHT_DFS),
            cycle_edge: EdgeColor::solid(HIGHLIGHT_CYCLE_EDGE),
            component_palette: COMPONENT_PALETTE.to_vec(),
            selected_for_algorithm: NodeColor::new(
                SELECTED_FOR_ALGORITHM,
                SELECTED_FOR_ALGORITHM_BORDER,
            ),
            selected_for_edge: NodeColor::new(SELECTED_FOR_EDGE, SELECTED_FOR_EDGE_BORDER),
            running_start: NodeColor::new(RUNNING_START, RUNNING_START_BORDER),
        }
    }
}

impl SettingsStyle {
    /// Color of the component with the given palette index.
    pub fn component_color(&self, palette_index: usize) -> NodeColor {
        if self.component_palette.is_empty() {
            return self.node_default;
        }

        let c = self.component_palette[palette_index % self.component_palette.len()];
        NodeColor::new(c, c)
    }
}
