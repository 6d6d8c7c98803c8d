#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::commands::PlayerCommand;
    use crate::config::{Settings, SettingsPatch};
    use crate::enums::*;
    use crate::events::GameEvent;
    use crate::profile::PlayerProfile;
    use crate::state::GameStateSnapshot;
    use crate::types::*;

    #[test]
    fn test_weapon_keys() {
        assert_eq!(WeaponKind::from_key("1"), Some(WeaponKind::Rifle));
        assert_eq!(WeaponKind::from_key(" Railgun "), Some(WeaponKind::Railgun));
        assert_eq!(WeaponKind::from_key("3"), Some(WeaponKind::Launcher));
        assert_eq!(WeaponKind::from_key("cryo"), Some(WeaponKind::Cryo));
        assert_eq!(WeaponKind::from_key("9"), None);
    }

    #[test]
    fn test_turret_and_ability_keys() {
        assert_eq!(TurretKind::from_key("T"), Some(TurretKind::Basic));
        assert_eq!(TurretKind::from_key("explosive"), Some(TurretKind::Explosive));
        assert_eq!(TurretKind::from_key("x"), None);
        assert_eq!(AbilityKind::from_key("q"), Some(AbilityKind::Airstrike));
        assert_eq!(AbilityKind::from_key("Repair"), Some(AbilityKind::Repair));
        assert_eq!(AbilityKind::from_key(""), None);
    }

    #[test]
    fn test_camera_cycle_returns_to_start() {
        let start = CameraMode::default();
        assert_eq!(start, CameraMode::ThirdPersonFollow);
        assert_eq!(start.next(), CameraMode::TopDown);
        assert_eq!(start.next().next(), CameraMode::FirstPerson);
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn test_settings_patch_clamps_and_reports_change() {
        let mut s = Settings::default();
        let patch = SettingsPatch {
            fov_degrees: Some(500.0),
            invert_y: Some(true),
            ..Default::default()
        };
        assert!(s.apply(&patch));
        assert_eq!(s.fov_degrees, 120.0);
        assert!(s.invert_y);
        // Same patch again changes nothing.
        assert!(!s.apply(&patch));
        assert!(!s.apply(&SettingsPatch::default()));
    }

    #[test]
    fn test_settings_partial_json() {
        let s: Settings = serde_json::from_str(r#"{"invert_y":true}"#).unwrap();
        assert!(s.invert_y);
        assert_eq!(s.mouse_sensitivity, 1.0);
    }

    #[test]
    fn test_facing_helpers() {
        let f = facing_forward(0.0);
        assert!((f - Vec2::new(0.0, 1.0)).length() < 1e-6);
        let r = facing_right(0.0);
        assert!((r - Vec2::new(1.0, 0.0)).length() < 1e-6);
        let a = facing_toward(Vec2::ZERO, Vec2::new(1.0, 0.0)).unwrap();
        assert!((a - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!((facing_forward(a) - Vec2::new(1.0, 0.0)).length() < 1e-6);
        assert!(facing_toward(Vec2::ONE, Vec2::ONE).is_none());
    }

    #[test]
    fn test_world_ground_mapping() {
        let w = to_world(Vec2::new(3.0, -2.0), 1.5);
        assert_eq!(w.y, 1.5);
        assert_eq!(to_ground(w), Vec2::new(3.0, -2.0));
    }

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        t.advance(0.5);
        t.advance(0.25);
        assert_eq!(t.tick, 2);
        assert!((t.elapsed_secs - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_command_tagged_json() {
        let cmd: PlayerCommand =
            serde_json::from_str(r#"{"type":"UseAbility","key":"q"}"#).unwrap();
        assert!(matches!(cmd, PlayerCommand::UseAbility { ref key } if key == "q"));

        let json = serde_json::to_string(&PlayerCommand::StartGame { endless: true }).unwrap();
        assert!(json.contains("\"type\":\"StartGame\""));
    }

    #[test]
    fn test_event_tagged_json() {
        let ev = GameEvent::WaveCompleted {
            wave: 3,
            bonus: 75,
            perfect: true,
            clutch: false,
        };
        let json = serde_json::to_string(&ev).unwrap();
        assert!(json.contains("\"type\":\"WaveCompleted\""));
        assert!(json.contains("\"bonus\":75"));
    }

    #[test]
    fn test_profile_tolerates_missing_fields() {
        let p: PlayerProfile =
            serde_json::from_str(r#"{"unlocked_achievements":["FirstBlood"]}"#).unwrap();
        assert_eq!(p.unlocked_achievements, vec![AchievementId::FirstBlood]);
        assert_eq!(p.lifetime.total_kills, 0);
        assert_eq!(p.settings, Settings::default());
    }

    #[test]
    fn test_snapshot_default_serializes() {
        let snap = GameStateSnapshot::default();
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"phase\":\"MainMenu\""));
    }

    #[test]
    fn test_placement_feedback_validity() {
        assert!(PlacementFeedback::Valid.is_valid());
        assert!(!PlacementFeedback::TooClose.is_valid());
        assert!(!PlacementFeedback::LimitReached.is_valid());
    }
}
