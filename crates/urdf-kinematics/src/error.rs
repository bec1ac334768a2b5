//! Build and solver errors

/// Errors that abort building a kinematic tree
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("Duplicate link name: {0}")]
    DuplicateLinkName(String),

    #[error("Duplicate joint name: {0}")]
    DuplicateJointName(String),

    #[error("Joint '{joint}' references unknown link '{link}'")]
    UnresolvedLinkReference { joint: String, link: String },

    #[error("Link '{link}' is the child of both '{first_joint}' and '{second_joint}'")]
    MultipleParentsError {
        link: String,
        first_joint: String,
        second_joint: String,
    },

    #[error("No root link found: every link has a parent joint")]
    NoRootFound,

    #[error("Multiple root links found: {}", roots.join(", "))]
    MultipleRootsFound { roots: Vec<String> },

    #[error("Joint '{joint}' has a zero-length axis")]
    DegenerateAxis { joint: String },

    #[error("Links not reachable from the root: {}", links.join(", "))]
    UnreachableLinks { links: Vec<String> },
}

/// Errors from a forward-kinematics update
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolverError {
    #[error("Configuration has {actual} values, expected {expected}")]
    ConfigurationLengthMismatch { expected: usize, actual: usize },

    #[error("No robot loaded")]
    NotLoaded,
}

/// Non-fatal conditions found while building a tree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildWarning {
    /// The joint's mobility type has no single-value pose; it is posed as fixed
    #[error("Joint '{joint}' has unsupported type {joint_type}, treated as fixed")]
    UnsupportedJointType {
        joint: String,
        joint_type: crate::types::JointType,
    },
}
