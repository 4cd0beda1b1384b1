//! Tests for TankWeapon and fire processing.

#[cfg(test)]
mod tests {
    use super::super::turret::TurretMount;
    use super::super::weapon::*;
    use crate::physics::HullBody;
    use approx::assert_relative_eq;
    use bevy::prelude::*;

    #[test]
    fn test_weapon_defaults() {
        let weapon = TankWeapon::default();
        assert!(weapon.can_fire());
        assert_eq!(weapon.fire_rate, 0.5);
        assert_eq!(weapon.shell_speed, 20.0);
        assert_eq!(weapon.shot_kind, ShotKind::Single);
        assert_eq!(TankWeapon::ricochet().shot_kind, ShotKind::Ricochet);
    }

    #[test]
    fn test_weapon_cooldown() {
        let mut weapon = TankWeapon::default();
        weapon.start_cooldown();
        assert!(!weapon.can_fire());

        weapon.tick_cooldown(0.25);
        assert!(!weapon.can_fire());

        weapon.tick_cooldown(0.25);
        assert!(weapon.can_fire());

        // Не уходит в минус
        weapon.tick_cooldown(1.0);
        assert_eq!(weapon.cooldown_timer, 0.0);
    }

    #[test]
    fn test_fire_follows_turret_not_hull() {
        // Корпус смотрит вдоль +X, башня повёрнута на 90° (CCW) → ствол вдоль +Y
        let hull = HullBody::new(Vec2::new(2.0, 1.0), 0.0);
        let turret = TurretMount { local_angle: 90.0 };
        let mut weapon = TankWeapon::default();

        let shell = fire_shell(Entity::PLACEHOLDER, &hull, &turret, &mut weapon).unwrap();
        assert_relative_eq!(shell.direction.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(shell.direction.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(shell.origin.x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(shell.origin.y, 1.0 + weapon.muzzle_offset, epsilon = 1e-5);
        assert_eq!(shell.speed, 20.0);
        assert_eq!(shell.lifetime, 3.0);
    }

    #[test]
    fn test_custom_muzzle_offset_moves_origin() {
        let hull = HullBody::new(Vec2::ZERO, 0.0);
        let turret = TurretMount::default();
        let mut weapon = TankWeapon::default().with_muzzle_offset(1.5);

        let shell = fire_shell(Entity::PLACEHOLDER, &hull, &turret, &mut weapon).unwrap();
        assert_relative_eq!(shell.origin.x, 1.5, epsilon = 1e-5);
        assert_relative_eq!(shell.origin.y, 0.0, epsilon = 1e-5);

        assert_eq!(TankWeapon::default().with_muzzle_offset(-2.0).muzzle_offset, 0.0);
    }

    #[test]
    fn test_fire_rate_limits_commands() {
        let hull = HullBody::new(Vec2::ZERO, 0.0);
        let turret = TurretMount::default();
        let mut weapon = TankWeapon::default();
        let dt = 1.0 / 60.0;

        // Секунда fire trigger каждый тик → не больше 3 выстрелов при fire_rate 0.5
        let mut shots = 0;
        for _ in 0..60 {
            weapon.tick_cooldown(dt);
            if fire_shell(Entity::PLACEHOLDER, &hull, &turret, &mut weapon).is_some() {
                shots += 1;
            }
        }
        assert!((2..=3).contains(&shots), "shots = {}", shots);
    }

    #[test]
    fn test_process_fire_commands_system() {
        let mut app = App::new();
        app.add_event::<FireCommand>().add_event::<ShellFired>();
        app.add_systems(Update, process_fire_commands);

        let shooter = app
            .world_mut()
            .spawn((HullBody::new(Vec2::ZERO, 0.0), TurretMount::default(), TankWeapon::ricochet()))
            .id();

        // Два trigger'а в одном тике: второй съедает cooldown
        app.world_mut().send_event(FireCommand { shooter });
        app.world_mut().send_event(FireCommand { shooter });
        app.update();

        let events = app.world().resource::<Events<ShellFired>>();
        let fired: Vec<_> = events.get_cursor().read(events).cloned().collect();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].shooter, shooter);
        assert_eq!(fired[0].kind, ShotKind::Ricochet);
    }
}
