use serde::{Deserialize, Serialize};

use crate::{Completion, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// One line of user facing feedback about the last action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMsg {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMsg {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    pub fn stopped() -> Self {
        Self::info("Algorithm run stopped by user.")
    }

    pub fn missing_start() -> Self {
        Self::error("Please select a start node for this algorithm.")
    }
}

/// Renders a finished run for the status line.
pub fn describe(c: &Completion) -> StatusMsg {
    match &c.result {
        Err(err) => StatusMsg::error(err.to_string()),
        Ok(Outcome::Traversal) => StatusMsg::success(format!("{} finished.", c.kind)),
        Ok(Outcome::Components { component_count }) => {
            StatusMsg::success(format!("Found {component_count} connected component(s)."))
        }
        Ok(Outcome::Cycle { found: true, .. }) => StatusMsg::success("Cycle detected!"),
        Ok(Outcome::Cycle { found: false, .. }) => {
            StatusMsg::info("No cycle reachable from the start node.")
        }
    }
}
