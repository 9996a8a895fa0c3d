#[cfg(test)]
mod tests {
    use glam::DVec3;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use rumguard_core::constants::*;
    use rumguard_core::enums::{CombatRole, EnemyKind, SpecialAbility, TargetKind};
    use rumguard_core::error::ControlSignal;
    use rumguard_core::health::{DamageOutcome, Health};
    use rumguard_core::types::{ActorRef, Position};

    use crate::attack::{perturb_aim, AttackOutcome, AttackProfile, Cooldown};
    use crate::decision::{decide, AgentAction, AgentContext, TargetInfo};
    use crate::policy::{policy_for, AbilityEffect};
    use crate::targeting::{nearest, TargetBias, TargetCandidate, TargetSelector};

    /// An rng whose every `gen::<f64>()` returns exactly `v`.
    fn fixed_roll(v: f64) -> StepRng {
        StepRng::new(((v * (1u64 << 53) as f64) as u64) << 11, 0)
    }

    fn player_at(x: f64) -> TargetCandidate {
        TargetCandidate {
            actor: ActorRef(1),
            position: Position::new(x, 0.0, 0.0),
            kind: TargetKind::Player,
        }
    }

    fn barrels() -> Vec<TargetCandidate> {
        vec![
            TargetCandidate {
                actor: ActorRef(10),
                position: Position::new(20.0, 0.0, 0.0),
                kind: TargetKind::Objective,
            },
            TargetCandidate {
                actor: ActorRef(11),
                position: Position::new(5.0, 0.0, 0.0),
                kind: TargetKind::Objective,
            },
        ]
    }

    fn context(kind: EnemyKind, distance: f64, target_kind: TargetKind) -> AgentContext {
        AgentContext {
            kind,
            position: Position::new(0.0, 0.0, 0.0),
            target: Some(TargetInfo {
                kind: target_kind,
                position: Position::new(distance, 0.0, 0.0),
            }),
            speed_multiplier: 1.0,
            stumble_probability: 0.0,
            stumble_roll: 0.99,
            stumbling: false,
            immobilized: false,
            special_ready: false,
        }
    }

    // ---- Targeting ----

    #[test]
    fn test_fixed_roll_helper() {
        use rand::Rng;
        let mut rng = fixed_roll(0.59);
        let roll: f64 = rng.gen();
        assert!((roll - 0.59).abs() < 1e-12, "got {roll}");
    }

    #[test]
    fn test_low_roll_prefers_nearest_objective() {
        let selector = TargetSelector::default();
        let player = player_at(3.0);
        let target = selector
            .select(
                Position::new(0.0, 0.0, 0.0),
                Some(&player),
                &barrels(),
                &mut fixed_roll(0.59),
            )
            .unwrap();
        assert_eq!(target.actor, ActorRef(11), "nearest barrel should win");
    }

    #[test]
    fn test_high_roll_prefers_player() {
        let selector = TargetSelector::default();
        let player = player_at(30.0);
        let target = selector
            .select(
                Position::new(0.0, 0.0, 0.0),
                Some(&player),
                &barrels(),
                &mut fixed_roll(0.6),
            )
            .unwrap();
        assert_eq!(target.kind, TargetKind::Player);
    }

    #[test]
    fn test_empty_category_falls_back() {
        let selector = TargetSelector::default();
        let origin = Position::new(0.0, 0.0, 0.0);

        let target = selector
            .select(origin, None, &barrels(), &mut fixed_roll(0.9))
            .unwrap();
        assert_eq!(target.kind, TargetKind::Objective);

        let player = player_at(3.0);
        let target = selector
            .select(origin, Some(&player), &[], &mut fixed_roll(0.1))
            .unwrap();
        assert_eq!(target.kind, TargetKind::Player);
    }

    #[test]
    fn test_nothing_to_target() {
        let selector = TargetSelector::default();
        let result = selector.select(Position::new(0.0, 0.0, 0.0), None, &[], &mut fixed_roll(0.1));
        assert_eq!(result, Err(ControlSignal::NoTarget));
    }

    #[test]
    fn test_soldier_bias_hunts_player() {
        let selector = TargetSelector::new(TargetBias::player_hunter());
        let origin = Position::new(0.0, 0.0, 0.0);
        let player = player_at(40.0);

        let target = selector
            .select(origin, Some(&player), &barrels(), &mut fixed_roll(0.5))
            .unwrap();
        assert_eq!(target.kind, TargetKind::Player);

        // Second roll of 0.8 is above the objective preference, so still the player.
        let target = selector
            .select(origin, Some(&player), &barrels(), &mut fixed_roll(0.8))
            .unwrap();
        assert_eq!(target.kind, TargetKind::Player);

        let target = selector
            .select(origin, None, &barrels(), &mut fixed_roll(0.5))
            .unwrap();
        assert_eq!(target.actor, ActorRef(11));
    }

    #[test]
    fn test_nearest_tie_keeps_first() {
        let candidates = vec![
            TargetCandidate {
                actor: ActorRef(1),
                position: Position::new(4.0, 0.0, 0.0),
                kind: TargetKind::Objective,
            },
            TargetCandidate {
                actor: ActorRef(2),
                position: Position::new(-4.0, 0.0, 0.0),
                kind: TargetKind::Objective,
            },
        ];
        let best = nearest(Position::new(0.0, 0.0, 0.0), &candidates).unwrap();
        assert_eq!(best.actor, ActorRef(1));
        assert!(nearest(Position::new(0.0, 0.0, 0.0), &[]).is_none());
    }

    // ---- Attacks ----

    #[test]
    fn test_first_attack_is_immediately_eligible() {
        let mut attack = AttackProfile::new(15.0, 1.2, MELEE_RANGE);
        assert_eq!(attack.last_fired(), None);
        let outcome = attack.try_attack(0.0, 1.0, &mut fixed_roll(0.3));
        assert_eq!(outcome, AttackOutcome::Hit { damage: 15.0 });
        assert_eq!(attack.last_fired(), Some(0.0));
    }

    #[test]
    fn test_cooldown_gates_attacks() {
        let mut attack = AttackProfile::new(15.0, 1.2, MELEE_RANGE);
        let mut rng = fixed_roll(0.3);
        attack.try_attack(10.0, 1.0, &mut rng);

        assert_eq!(attack.try_attack(11.0, 1.0, &mut rng), AttackOutcome::OnCooldown);
        assert_eq!(attack.last_fired(), Some(10.0), "blocked attempt must not move the gate");
        assert_eq!(
            attack.try_attack(11.25, 1.0, &mut rng),
            AttackOutcome::Hit { damage: 15.0 }
        );
    }

    #[test]
    fn test_miss_still_spends_cooldown() {
        let mut attack = AttackProfile::new(15.0, 1.0, MELEE_RANGE);
        let outcome = attack.try_attack(5.0, 0.2, &mut fixed_roll(0.5));
        assert_eq!(outcome, AttackOutcome::Missed);
        assert_eq!(attack.last_fired(), Some(5.0));
        assert_eq!(
            attack.try_attack(5.5, 0.2, &mut fixed_roll(0.1)),
            AttackOutcome::OnCooldown
        );
    }

    #[test]
    fn test_resolve_against_health() {
        let mut attack = AttackProfile::new(30.0, 1.0, MELEE_RANGE);
        let mut target = Health::new(CombatRole::Enemy, 50.0);
        let mut rng = fixed_roll(0.0);

        let (_, first) = attack.resolve_against(0.0, 1.0, &mut rng, &mut target);
        assert_eq!(first, Some(DamageOutcome::Wounded { remaining: 20.0 }));

        let (_, second) = attack.resolve_against(1.0, 1.0, &mut rng, &mut target);
        assert_eq!(second, Some(DamageOutcome::Killed));

        let (outcome, third) = attack.resolve_against(2.0, 1.0, &mut rng, &mut target);
        assert_eq!(outcome, AttackOutcome::Hit { damage: 30.0 });
        assert_eq!(third, None, "dead targets absorb further hits");
    }

    #[test]
    fn test_cooldown_remaining() {
        let mut gate = Cooldown::new(10.0);
        assert_eq!(gate.remaining(0.0), 0.0);
        gate.trigger(2.0).unwrap();
        assert!((gate.remaining(5.0) - 7.0).abs() < 1e-12);
        assert_eq!(gate.trigger(5.0), Err(ControlSignal::OnCooldown));
        assert!(gate.ready(12.0));
    }

    #[test]
    fn test_perturb_aim() {
        let dir = DVec3::new(0.0, 3.0, 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(perturb_aim(dir, 1.0, &mut rng), DVec3::new(0.0, 1.0, 0.0));

        let mut wobbled = 0;
        for _ in 0..50 {
            let aim = perturb_aim(dir, 0.2, &mut rng);
            assert!((aim.length() - 1.0).abs() < 1e-9);
            if aim.dot(DVec3::Y) < 0.999 {
                wobbled += 1;
            }
        }
        assert!(wobbled > 0, "a drunk aim should wander");
    }

    // ---- Policies ----

    #[test]
    fn test_policy_table() {
        let expected = [
            (EnemyKind::Pirate, 4.0, 15.0, 1.2),
            (EnemyKind::EmpireSoldier, 3.0, 12.0, 2.0),
            (EnemyKind::Kraken, 2.0, 25.0, 2.5),
            (EnemyKind::Merfolk, 4.5, 15.0, 1.0),
            (EnemyKind::CursedSailor, 3.0, 20.0, 1.5),
        ];
        for (kind, speed, damage, cooldown) in expected {
            let policy = policy_for(kind);
            let stats = policy.stats();
            assert_eq!(policy.kind(), kind);
            assert_eq!(stats.base_speed, speed, "{kind:?} speed");
            assert_eq!(stats.damage, damage, "{kind:?} damage");
            assert_eq!(stats.attack_cooldown, cooldown, "{kind:?} cooldown");
            assert_eq!(stats.attack_range, MELEE_RANGE);
            assert_eq!(stats.max_health, ENEMY_MAX_HEALTH);
        }

        assert!(policy_for(EnemyKind::Pirate).steal().is_some());
        assert!(policy_for(EnemyKind::EmpireSoldier).ranged().is_some());
        assert!(policy_for(EnemyKind::Pirate).special().is_none());
    }

    #[test]
    fn test_special_ability_effects() {
        let slam = policy_for(EnemyKind::Kraken).on_special_ability();
        assert_eq!(slam.player_damage, 37.5);
        assert_eq!(slam.objective_damage, 25.0);

        let scream = policy_for(EnemyKind::Merfolk).on_special_ability();
        assert_eq!(scream.player_damage, 7.5);
        assert_eq!(scream.objective_damage, 0.0);
        assert_eq!(scream.stun_secs, SONIC_SCREAM_STUN_SECS);

        assert_eq!(
            policy_for(EnemyKind::CursedSailor).on_special_ability(),
            AbilityEffect::NONE
        );
    }

    #[test]
    fn test_policy_selects_through_bias() {
        let player = player_at(50.0);
        let soldier = policy_for(EnemyKind::EmpireSoldier);
        let target = soldier
            .select_target(Position::new(0.0, 0.0, 0.0), Some(&player), &barrels(), &mut fixed_roll(0.65))
            .unwrap();
        assert_eq!(target.kind, TargetKind::Player, "0.65 is below the soldier's 0.7");

        let pirate = policy_for(EnemyKind::Pirate);
        let target = pirate
            .select_target(Position::new(0.0, 0.0, 0.0), Some(&player), &barrels(), &mut fixed_roll(0.65))
            .unwrap();
        assert_eq!(target.kind, TargetKind::Player, "0.65 is above the pirate's 0.6");
    }

    // ---- Decisions ----

    #[test]
    fn test_no_target_idles() {
        let mut ctx = context(EnemyKind::Pirate, 10.0, TargetKind::Player);
        ctx.target = None;
        assert_eq!(decide(&ctx).action, AgentAction::Idle);
    }

    #[test]
    fn test_advance_scaled_by_intoxication() {
        let mut ctx = context(EnemyKind::Pirate, 10.0, TargetKind::Player);
        ctx.speed_multiplier = 0.7;
        match decide(&ctx).action {
            AgentAction::Advance { towards, speed } => {
                assert_eq!(towards, Position::new(10.0, 0.0, 0.0));
                assert!((speed - 2.8).abs() < 1e-12);
            }
            other => panic!("expected Advance, got {other:?}"),
        }
    }

    #[test]
    fn test_melee_in_range() {
        let ctx = context(EnemyKind::Merfolk, 1.5, TargetKind::Player);
        assert_eq!(decide(&ctx).action, AgentAction::MeleeAttack);
    }

    #[test]
    fn test_stumble_roll_and_recovery() {
        let mut ctx = context(EnemyKind::Pirate, 10.0, TargetKind::Player);
        ctx.stumble_probability = 0.3;
        ctx.stumble_roll = 0.1;
        assert_eq!(decide(&ctx).action, AgentAction::Stumble);

        ctx.stumbling = true;
        assert_eq!(decide(&ctx).action, AgentAction::Idle);

        ctx.stumbling = false;
        ctx.stumble_roll = 0.5;
        assert!(matches!(decide(&ctx).action, AgentAction::Advance { .. }));
    }

    #[test]
    fn test_immobilized_can_attack_but_not_move() {
        let mut ctx = context(EnemyKind::Pirate, 10.0, TargetKind::Player);
        ctx.immobilized = true;
        assert_eq!(decide(&ctx).action, AgentAction::Idle);

        let mut ctx = context(EnemyKind::Pirate, 1.0, TargetKind::Player);
        ctx.immobilized = true;
        assert_eq!(decide(&ctx).action, AgentAction::MeleeAttack);
    }

    #[test]
    fn test_pirate_steals_at_barrel() {
        let mut ctx = context(EnemyKind::Pirate, 1.5, TargetKind::Objective);
        ctx.stumbling = true;
        assert_eq!(decide(&ctx).action, AgentAction::Steal);

        let ctx = context(EnemyKind::Kraken, 1.5, TargetKind::Objective);
        assert_eq!(decide(&ctx).action, AgentAction::MeleeAttack);
    }

    #[test]
    fn test_soldier_fires_at_range() {
        let ctx = context(EnemyKind::EmpireSoldier, 10.0, TargetKind::Player);
        assert_eq!(decide(&ctx).action, AgentAction::RangedAttack);

        let ctx = context(EnemyKind::EmpireSoldier, 20.0, TargetKind::Player);
        assert!(matches!(decide(&ctx).action, AgentAction::Advance { .. }));

        let ctx = context(EnemyKind::EmpireSoldier, 1.0, TargetKind::Player);
        assert_eq!(decide(&ctx).action, AgentAction::MeleeAttack);
    }

    #[test]
    fn test_special_ability_trigger() {
        let mut ctx = context(EnemyKind::Kraken, 6.0, TargetKind::Player);
        assert_eq!(decide(&ctx).special, None, "not ready");

        ctx.special_ready = true;
        assert_eq!(decide(&ctx).special, Some(SpecialAbility::TentacleSlam));

        let mut far = context(EnemyKind::Kraken, 9.0, TargetKind::Player);
        far.special_ready = true;
        assert_eq!(decide(&far).special, None);

        let mut pirate = context(EnemyKind::Pirate, 6.0, TargetKind::Player);
        pirate.special_ready = true;
        assert_eq!(decide(&pirate).special, None);
    }
}
