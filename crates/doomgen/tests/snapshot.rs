use doomgen::color::Rgb;
use doomgen::colorize::GradientDirection;
use doomgen::figlet::LayoutMode;
use doomgen::snapshot;
use doomgen::test_support::solid_grid;
use doomgen::{BannerError, BannerState};
use pretty_assertions::assert_eq;

fn loud_state() -> BannerState {
    BannerState {
        text: "RIP AND TEAR".to_string(),
        font_id: "Doom".to_string(),
        layout: LayoutMode::Fitted,
        palette_id: "cyberdemon".to_string(),
        gradient_direction: GradientDirection::Diagonal,
        palette_start: 10.0,
        palette_end: 90.0,
        normalize_brightness: true,
        glow_intensity: 42.0,
        shadow_offset: 3.0,
        drip_density: 25.0,
        distress_intensity: 12.0,
        pixelation: 2.0,
        crt_enabled: true,
        crt_curvature: 30.0,
        crt_flicker: 55.0,
        crt_blip: 20.0,
        crt_power_loss: 15.0,
        screen_shake: 35.0,
        color_shift_speed: 60.0,
        bg_color: Rgb::from_hex(0x170808),
        animations_enabled: false,
    }
}

#[test]
fn round_trip_restores_state_and_grid() {
    let state = loud_state();
    let grid = solid_grid(&["##  ##", " #### "], Rgb::from_hex(0x00ffff));

    let json = snapshot::to_json(&state, Some(&grid)).unwrap();
    let parsed = snapshot::from_json(&json).unwrap();

    let mut restored = BannerState::default();
    restored.apply(parsed.state);
    assert_eq!(restored, state);
    assert_eq!(parsed.colored_lines, Some(grid));
}

#[test]
fn import_failure_leaves_state_untouched() {
    let mut state = loud_state();
    let before = state.clone();

    for bad in [
        "{broken",
        r#"{"version": 7, "state": {"glowIntensity": 1}}"#,
    ] {
        match snapshot::from_json(bad) {
            Err(BannerError::Snapshot(_)) | Err(BannerError::SnapshotVersion(_)) => {}
            other => panic!("expected parse failure, got {other:?}"),
        }
    }
    // nothing was applied
    state.apply(Default::default());
    assert_eq!(state, before);
}

#[test]
fn partial_snapshot_patches_only_present_keys() {
    let json = r#"{"version": 1, "state": {"glowIntensity": 5}}"#;
    let parsed = snapshot::from_json(json).unwrap();

    let mut state = loud_state();
    state.apply(parsed.state);

    let mut expected = loud_state();
    expected.glow_intensity = 5.0;
    assert_eq!(state, expected);
    assert_eq!(parsed.colored_lines, None);
}

#[test]
fn legacy_animations_key_round_trips() {
    let json = snapshot::to_json(&loud_state(), None).unwrap();
    assert!(json.contains("\"animationsEnabled\": false"));
    let parsed = snapshot::from_json(&json).unwrap();
    assert_eq!(parsed.state.animations_enabled, Some(false));
}
