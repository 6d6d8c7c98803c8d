//! Ability system: activation, cooldown/duration timers and effects.

use glam::Vec2;
use log::info;

use bastion_core::constants::{AIRSTRIKE_DELAY, REPAIR_FRACTION};
use bastion_core::enums::AbilityKind;
use bastion_core::error::CommandRejection;
use bastion_core::events::GameEvent;

use crate::run_state::{PendingAirstrike, RunState};

/// Activate an ability. Rejections leave all state unchanged.
pub fn use_ability(
    run: &mut RunState,
    kind: AbilityKind,
    aim_point: Vec2,
    events: &mut Vec<GameEvent>,
) -> Result<(), CommandRejection> {
    let (cost, cooldown, duration) = {
        let ability = run
            .ability(kind)
            .ok_or_else(|| CommandRejection::UnknownKey(kind.as_str().to_string()))?;
        if ability.cooldown_remaining > 0.0 {
            return Err(CommandRejection::OnCooldown {
                ability: kind,
                remaining: ability.cooldown_remaining,
            });
        }
        (ability.cost, ability.cooldown, ability.duration)
    };
    if run.currency < cost {
        return Err(CommandRejection::InsufficientFunds {
            have: run.currency,
            need: cost,
        });
    }

    run.currency -= cost;
    if let Some(ability) = run.ability_mut(kind) {
        ability.cooldown_remaining = cooldown;
        ability.duration_remaining = duration;
    }

    match kind {
        AbilityKind::Airstrike => run.pending_airstrikes.push(PendingAirstrike {
            position: aim_point,
            delay: AIRSTRIKE_DELAY,
        }),
        AbilityKind::Repair => {
            let amount = run.structure.max_health * REPAIR_FRACTION;
            run.structure.heal(amount);
            run.check_low_health(events);
        }
        AbilityKind::Freeze | AbilityKind::Rage => {}
    }

    info!("ability {} used", kind.as_str());
    events.push(GameEvent::AbilityUsed { ability: kind });
    Ok(())
}

/// Count down cooldowns and durations.
pub fn run(run: &mut RunState, dt: f32, events: &mut Vec<GameEvent>) {
    for ability in &mut run.abilities {
        ability.cooldown_remaining = (ability.cooldown_remaining - dt).max(0.0);
        if ability.duration_remaining > 0.0 {
            ability.duration_remaining = (ability.duration_remaining - dt).max(0.0);
            if ability.duration_remaining <= 0.0 {
                events.push(GameEvent::AbilityEnded {
                    ability: ability.kind,
                });
            }
        }
    }
}
