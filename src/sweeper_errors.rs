use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweeperError {
    #[error("Propagation failed: {0}")]
    PropagationFailed(String),

    #[error("Propagation produced a degenerate position (NaN, infinite or zero vector)")]
    DegeneratePosition,

    #[error("No propagator is available for two-line element records")]
    PropagatorUnavailable,

    #[error("Invalid orbit record: {0}")]
    InvalidOrbitRecord(String),

    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("At least two targets are required, got {0}")]
    NotEnoughTargets(usize),

    #[error("No rendezvous sample propagated successfully over the search horizon")]
    NoValidRendezvous,

    #[error("Transfer path is degenerate (fewer than two valid points)")]
    DegenerateTransfer,

    #[error("Replanning requested too soon after the previous plan")]
    ReplanThrottled,

    #[error("Unknown object: {0}")]
    UnknownObject(String),

    #[error("CSV reader error: {0}")]
    Csv(#[from] csv::Error),
}

impl PartialEq for SweeperError {
    fn eq(&self, other: &Self) -> bool {
        use SweeperError::*;
        match (self, other) {
            (PropagationFailed(a), PropagationFailed(b)) => a == b,
            (InvalidOrbitRecord(a), InvalidOrbitRecord(b)) => a == b,
            (InvalidPolicy(a), InvalidPolicy(b)) => a == b,
            (InvalidParameter(a), InvalidParameter(b)) => a == b,
            (NotEnoughTargets(a), NotEnoughTargets(b)) => a == b,
            (UnknownObject(a), UnknownObject(b)) => a == b,

            // csv errors are not comparable: same variant is enough
            (Csv(_), Csv(_)) => true,

            (DegeneratePosition, DegeneratePosition) => true,
            (PropagatorUnavailable, PropagatorUnavailable) => true,
            (NoValidRendezvous, NoValidRendezvous) => true,
            (DegenerateTransfer, DegenerateTransfer) => true,
            (ReplanThrottled, ReplanThrottled) => true,

            _ => false,
        }
    }
}
