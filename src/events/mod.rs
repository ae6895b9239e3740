mod event;

pub use event::{
    Event, PayloadEdge, PayloadNodeVisited, PayloadRunCancelled, PayloadRunCompleted,
    PayloadRunRejected, PayloadRunStarted,
};
