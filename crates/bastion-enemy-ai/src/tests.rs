#[cfg(test)]
mod tests {
    use glam::Vec2;

    use bastion_core::constants::*;
    use bastion_core::enums::EnemyKind;

    use crate::behavior::{aura_heal, boss_phase_for, step, EnemyContext};
    use crate::profiles::*;

    fn make_context(kind: EnemyKind, position: Vec2) -> EnemyContext {
        let e = build_enemy(kind, 1);
        EnemyContext {
            kind,
            position,
            health: e.health,
            max_health: e.max_health,
            base_speed: e.base_speed,
            scale: e.scale,
            contact_damage: e.contact_damage,
            slow_multiplier: 1.0,
            freeze_factor: 1.0,
            boss_phase: 0,
            attack_cooldown: 0.0,
            player: None,
        }
    }

    #[test]
    fn test_health_scales_with_wave() {
        assert_eq!(health_multiplier(1), 1.0);
        assert!((health_multiplier(11) - 2.2).abs() < 1e-5);
        let w1 = build_enemy(EnemyKind::Tank, 1);
        let w6 = build_enemy(EnemyKind::Tank, 6);
        assert!(w6.max_health > w1.max_health);
        assert_eq!(w6.health, w6.max_health);
    }

    #[test]
    fn test_seeks_structure() {
        let ctx = make_context(EnemyKind::Standard, Vec2::new(0.0, 40.0));
        let s = step(&ctx, DT);
        assert!(s.velocity.y < 0.0, "should move toward origin");
        assert!((s.velocity.length() - 3.0).abs() < 1e-4);
        assert_eq!(s.structure_damage, 0.0);
    }

    #[test]
    fn test_does_not_overshoot_engage_ring() {
        let runner = get_profile(EnemyKind::Runner);
        let stop = engage_radius(runner.scale);
        let ctx = make_context(EnemyKind::Runner, Vec2::new(stop + 0.01, 0.0));
        let s = step(&ctx, 0.1);
        let next = ctx.position + s.velocity * 0.1;
        assert!(next.length() >= stop - 1e-4);
    }

    #[test]
    fn test_attacks_structure_on_cadence() {
        let mut ctx = make_context(EnemyKind::Standard, Vec2::new(STRUCTURE_RADIUS, 0.0));
        let s = step(&ctx, DT);
        assert_eq!(s.velocity, Vec2::ZERO);
        assert_eq!(s.structure_damage, 5.0);
        assert_eq!(s.attack_cooldown, ENEMY_ATTACK_INTERVAL);

        ctx.attack_cooldown = s.attack_cooldown;
        let s2 = step(&ctx, DT);
        assert_eq!(s2.structure_damage, 0.0);
        assert!(s2.attack_cooldown < ENEMY_ATTACK_INTERVAL);
    }

    #[test]
    fn test_freeze_nearly_stops_movement() {
        let mut ctx = make_context(EnemyKind::Runner, Vec2::new(0.0, 40.0));
        ctx.freeze_factor = FREEZE_SPEED_FACTOR;
        let s = step(&ctx, DT);
        assert!(s.velocity.length() < 0.5);
    }

    #[test]
    fn test_slow_reduces_speed() {
        let mut ctx = make_context(EnemyKind::Standard, Vec2::new(0.0, 40.0));
        ctx.slow_multiplier = 0.5;
        let s = step(&ctx, DT);
        assert!((s.velocity.length() - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_strikes_nearby_player() {
        let mut ctx = make_context(EnemyKind::Tank, Vec2::new(0.0, 20.0));
        ctx.player = Some(Vec2::new(0.0, 19.5));
        let s = step(&ctx, DT);
        assert!((s.player_damage - 15.0 * PLAYER_DAMAGE_RATIO).abs() < 1e-5);

        ctx.player = None;
        let s = step(&ctx, DT);
        assert_eq!(s.player_damage, 0.0);
    }

    #[test]
    fn test_boss_phases_at_thirds() {
        assert_eq!(boss_phase_for(100.0, 100.0), 0);
        assert_eq!(boss_phase_for(70.0, 100.0), 0);
        assert_eq!(boss_phase_for(66.0, 100.0), 1);
        assert_eq!(boss_phase_for(33.0, 100.0), 2);
        assert_eq!(boss_phase_for(1.0, 100.0), 2);
    }

    #[test]
    fn test_boss_phase_change_reported_once() {
        let mut ctx = make_context(EnemyKind::Boss, Vec2::new(0.0, 40.0));
        ctx.health = ctx.max_health * 0.5;
        let s = step(&ctx, DT);
        assert_eq!(s.new_boss_phase, Some(1));

        ctx.boss_phase = 1;
        let s = step(&ctx, DT);
        assert_eq!(s.new_boss_phase, None);
        assert!(s.velocity.length() > 1.2);
    }

    #[test]
    fn test_only_bosses_change_phase() {
        let mut ctx = make_context(EnemyKind::Tank, Vec2::new(0.0, 40.0));
        ctx.health = 1.0;
        assert_eq!(step(&ctx, DT).new_boss_phase, None);
    }

    #[test]
    fn test_split_children() {
        let parent = build_enemy(EnemyKind::Splitter, 4);
        assert!(can_split(&parent));
        let child = split_child(&parent);
        assert!(child.already_split);
        assert!(!can_split(&child));
        assert!(child.value * 2 <= parent.value);
        assert!((child.scale - parent.scale * 0.5).abs() < 1e-6);
        assert!(!can_split(&build_enemy(EnemyKind::Tank, 1)));
    }

    #[test]
    fn test_healer_aura_range() {
        let h = aura_heal(Vec2::ZERO, Vec2::new(HEALER_RADIUS - 0.1, 0.0), 1.0);
        assert_eq!(h, HEALER_RATE);
        assert_eq!(aura_heal(Vec2::ZERO, Vec2::new(HEALER_RADIUS + 0.1, 0.0), 1.0), 0.0);
    }
}
