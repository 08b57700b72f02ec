mod delta;
mod kind;
mod planner;

pub use {
  delta::ResourceDelta,
  kind::{Error as ResourceKindError, ResourceKind},
  planner::{
    parse_target,
    Error as PlannerError,
    ResourceLimit,
    ResourceSnapshot,
    Targets,
  },
};
