//! # Map Session Integration Test
//!
//! Walks a filled map the way a viewer would and checks what the viewer sees.

use fractal_core::{ChildPosition, Direction, HierarchyConfig, HierarchyError, ReleaseOutcome};
use fractal_map::{MapConfig, MapSession, SessionError};
use fractal_procedural::RandomFillConfig;

const FILLED: &str = "
[hierarchy]
default_elevation = -500.0

[fill]
seed = 11
low = 0.0
high = 10.0
";

/// Test: Every block the walk generated carries filled elevation.
#[test]
fn test_every_generated_block_is_filled() {
    let config = MapConfig::from_toml_str(FILLED).unwrap();
    let mut session = MapSession::new(&config).unwrap();

    session.zoom_out().unwrap();
    session.pan(Direction::Up).unwrap();
    session.pan(Direction::Up).unwrap();
    session.zoom_in(ChildPosition::BottomLeft).unwrap();

    for (id, node) in session.builder().registry().iter() {
        let cells = node.elevation().as_slice();
        assert!(
            cells.iter().all(|v| (0.0..=10.0).contains(v)),
            "block {} kept its default elevation",
            id
        );
    }
}

/// Test: Without a fill section, blocks keep the configured default.
#[test]
fn test_unfilled_session_keeps_default() {
    let config = MapConfig::from_toml_str("[hierarchy]\ndefault_elevation = 3.0\n").unwrap();
    let mut session = MapSession::new(&config).unwrap();
    session.pan(Direction::Right).unwrap();

    assert_eq!(session.focus_node().unwrap().elevation().get(5, 5), Some(3.0));
}

/// Test: Zooming and panning track levels and return to known blocks.
#[test]
fn test_navigation_levels() {
    let mut session = MapSession::new(&MapConfig::default()).unwrap();
    let origin = session.origin();

    session.zoom_out().unwrap();
    session.zoom_out().unwrap();
    let stats = session.stats().unwrap();
    assert_eq!(stats.focus_level, 2);
    assert_eq!(stats.top_level, 2);

    session.pan(Direction::Left).unwrap();
    session.pan(Direction::Right).unwrap();
    session.zoom_in(ChildPosition::CenterCenter).unwrap();
    session.zoom_in(ChildPosition::CenterCenter).unwrap();
    assert_eq!(session.focus(), origin);

    let stats = session.stats().unwrap();
    assert_eq!(stats.focus_level, 0);
    assert!(stats.top_level >= 3);
    assert_eq!(stats.blocks, session.builder().registry().len());
}

/// Test: A failed move leaves the focus where it was.
#[test]
fn test_failed_move_keeps_focus() {
    let config = MapConfig::from_toml_str("[hierarchy]\nmax_blocks = 10\n").unwrap();
    let mut session = MapSession::new(&config).unwrap();
    session.zoom_out().unwrap();
    let focus = session.focus();

    let err = session.zoom_out().unwrap_err();
    assert!(matches!(err, HierarchyError::AllocationFailure { .. }));
    assert_eq!(session.focus(), focus);
}

/// Test: Configs built in code are checked before anything is generated.
#[test]
fn test_invalid_config_is_an_error() {
    let configs = [
        MapConfig {
            hierarchy: HierarchyConfig {
                registry_chunk_capacity: 0,
                ..HierarchyConfig::default()
            },
            fill: None,
        },
        MapConfig {
            hierarchy: HierarchyConfig {
                default_elevation: f32::NAN,
                ..HierarchyConfig::default()
            },
            fill: None,
        },
        MapConfig {
            hierarchy: HierarchyConfig::default(),
            fill: Some(RandomFillConfig {
                high: f32::NAN,
                ..RandomFillConfig::default()
            }),
        },
    ];
    for config in &configs {
        let err = MapSession::new(config).unwrap_err();
        assert!(matches!(err, SessionError::Config(_)), "{}", err);
    }

    let config = MapConfig::from_toml_str("[hierarchy]\nmax_blocks = 10\n").unwrap();
    assert!(MapSession::new(&config).is_ok());
}

/// Test: Shutdown releases everything exactly once.
#[test]
fn test_shutdown() {
    let mut session = MapSession::new(&MapConfig::default()).unwrap();
    session.zoom_out().unwrap();

    assert_eq!(
        session.shutdown(),
        ReleaseOutcome::Released {
            blocks: 10,
            chunks: 1
        }
    );
    assert_eq!(session.shutdown(), ReleaseOutcome::Empty);
    assert!(session.focus_node().is_err());
}
