//! urdf-pose - headless URDF poser
//!
//! Loads a URDF, applies a joint configuration and prints the world pose of
//! every link and visual.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use urdf_kinematics::{AngleDisplayMode, ImportOptions, KinematicTree, RobotSession, import_urdf};

mod config;
mod report;

use config::{OutputFormat, PoseConfig};
use report::PoseReport;

#[derive(Parser)]
#[command(name = "urdf-pose")]
#[command(about = "Pose a URDF robot and print link and visual world transforms", long_about = None)]
struct Cli {
    /// Path to the URDF file
    urdf: PathBuf,

    /// Joint value as NAME=VALUE (degrees or radians for angular joints, per config)
    #[arg(short, long = "joint", value_parser = parse_assignment)]
    joints: Vec<(String, f32)>,

    /// RON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// List actuated joints with their ranges and exit
    #[arg(long)]
    list_joints: bool,
}

fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "urdf_pose=info,urdf_kinematics=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => PoseConfig::load(path)?,
        None => PoseConfig::default(),
    };
    let mode = config.angle_display_mode;

    let options = ImportOptions {
        load_meshes: config.load_meshes,
        ..Default::default()
    };
    let description = import_urdf(&cli.urdf, &options)
        .with_context(|| format!("Failed to import {:?}", cli.urdf))?;

    let mut session = RobotSession::new();
    session.set_base_pose(config.base_pose.to_mat4());
    session.load(&description)?;
    let tree = session.tree().context("No robot loaded")?;

    if cli.list_joints {
        print_joints(tree, mode);
        return Ok(());
    }

    let configuration = build_configuration(tree, &cli.joints, mode)?;
    session.update(&configuration)?;
    let tree = session.tree().context("No robot loaded")?;

    let report = PoseReport::from_tree(tree, mode);
    match cli.format.unwrap_or(config.output_format) {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn parse_assignment(s: &str) -> Result<(String, f32), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing joint name in '{}'", s));
    }
    let value = value
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("invalid value in '{}': {}", s, e))?;
    Ok((name.to_string(), value))
}

/// Zero configuration with the given joint values applied, converted from
/// the display unit and clamped to each joint's range
fn build_configuration(
    tree: &KinematicTree,
    assignments: &[(String, f32)],
    mode: AngleDisplayMode,
) -> Result<Vec<f32>> {
    let controls = tree.joint_controls();
    let mut configuration = vec![0.0; tree.dof()];

    for (name, value) in assignments {
        let Some(joint) = tree.joint(name) else {
            bail!("Unknown joint '{}'", name);
        };
        let Some(index) = tree.actuated_index(name) else {
            bail!("Joint '{}' is {} and cannot be set", name, joint.joint_type());
        };

        let control = &controls[index];
        let raw = control.from_display(*value, mode);
        let clamped = control.clamp(raw);
        if clamped != raw {
            tracing::warn!(
                "Joint '{}' value {} {} is outside its range, clamped",
                name,
                value,
                control.unit(mode)
            );
        }
        configuration[index] = clamped;
    }

    Ok(configuration)
}

fn print_joints(tree: &KinematicTree, mode: AngleDisplayMode) {
    for control in tree.joint_controls() {
        println!(
            "{} ({}): {:.4} .. {:.4} {}",
            control.name,
            control.joint_type,
            control.to_display(control.min, mode),
            control.to_display(control.max, mode),
            control.unit(mode)
        );
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use urdf_kinematics::{JointDescriptor, LinkDescriptor, RobotDescription};

    use super::*;

    fn tree() -> KinematicTree {
        let description = RobotDescription::new("arm")
            .with_link(LinkDescriptor::new("base"))
            .with_link(LinkDescriptor::new("upper"))
            .with_link(LinkDescriptor::new("carriage"))
            .with_link(LinkDescriptor::new("tool"))
            .with_joint(
                JointDescriptor::builder("shoulder", "base", "upper")
                    .revolute()
                    .limits_range(-2.0, 2.0)
                    .build(),
            )
            .with_joint(
                JointDescriptor::builder("slide", "upper", "carriage")
                    .prismatic()
                    .limits_range(0.0, 0.5)
                    .build(),
            )
            .with_joint(JointDescriptor::builder("mount", "carriage", "tool").build());
        urdf_kinematics::load(&description).unwrap()
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("shoulder=45"), Ok(("shoulder".to_string(), 45.0)));
        assert_eq!(parse_assignment(" slide = -0.1 "), Ok(("slide".to_string(), -0.1)));
        assert!(parse_assignment("shoulder").is_err());
        assert!(parse_assignment("=1").is_err());
        assert!(parse_assignment("shoulder=abc").is_err());
    }

    #[test]
    fn test_build_configuration_converts_degrees() {
        let tree = tree();
        let assignments = vec![("shoulder".to_string(), 90.0), ("slide".to_string(), 0.25)];
        let configuration =
            build_configuration(&tree, &assignments, AngleDisplayMode::Degrees).unwrap();
        approx::assert_relative_eq!(configuration[0], FRAC_PI_2, epsilon = 1e-5);
        assert_eq!(configuration[1], 0.25);
    }

    #[test]
    fn test_build_configuration_clamps() {
        let tree = tree();
        let assignments = vec![("slide".to_string(), 3.0)];
        let configuration =
            build_configuration(&tree, &assignments, AngleDisplayMode::Radians).unwrap();
        assert_eq!(configuration, vec![0.0, 0.5]);
    }

    #[test]
    fn test_unknown_and_fixed_joints_rejected() {
        let tree = tree();
        let unknown = vec![("elbow".to_string(), 1.0)];
        assert!(build_configuration(&tree, &unknown, AngleDisplayMode::Radians).is_err());

        let fixed = vec![("mount".to_string(), 1.0)];
        let err = build_configuration(&tree, &fixed, AngleDisplayMode::Radians).unwrap_err();
        assert!(err.to_string().contains("cannot be set"));
    }

    #[test]
    fn test_cli_parses_repeated_joints() {
        let cli = Cli::try_parse_from([
            "urdf-pose",
            "robot.urdf",
            "--joint",
            "shoulder=10",
            "-j",
            "slide=0.1",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.joints.len(), 2);
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(!cli.list_joints);
    }
}
