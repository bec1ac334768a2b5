//! URDF Kinematics
//!
//! Kinematic tree and forward kinematics for URDF robot descriptions:
//! - Description: plain link/joint records, built by hand or imported from URDF
//! - KinematicTree: validated link/joint arena with a cached world transform per link
//! - Forward kinematics: atomic pose updates from a joint configuration
//! - Visuals: world placement of every visual element for a renderer
//! - Session: the currently loaded robot, shareable across threads

pub mod controls;
pub mod description;
pub mod error;
pub mod import;
pub mod session;
pub mod stl;
pub mod tree;
pub mod types;

pub use controls::*;
pub use description::*;
pub use error::*;
pub use import::*;
pub use session::*;
pub use stl::*;
pub use tree::{Joint, JointId, KinematicTree, Link, LinkId, LinkVisuals, PlacedVisual};
pub use types::*;
