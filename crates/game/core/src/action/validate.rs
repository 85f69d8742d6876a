use std::collections::BTreeMap;

use crate::config::BattleConfig;
use crate::effect::{EffectDescriptor, EffectKind};
use crate::env::CatalogOracle;
use crate::error::Rejection;
use crate::state::{BattleSession, PlayerId, SideId};

use super::QueuedAction;

/// How many copies of each chip a player holds.
pub trait ChipInventory {
    fn owned(&self, chip: &str) -> u32;
}

impl ChipInventory for BTreeMap<String, u32> {
    fn owned(&self, chip: &str) -> u32 {
        self.get(chip).copied().unwrap_or(0)
    }
}

/// A raw action submission as typed by a player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Submission {
    pub chip: String,
    pub support: Option<String>,
}

impl Submission {
    pub fn chip(name: impl Into<String>) -> Self {
        Self {
            chip: name.into(),
            support: None,
        }
    }

    pub fn supported(support: impl Into<String>, chip: impl Into<String>) -> Self {
        Self {
            chip: chip.into(),
            support: Some(support.into()),
        }
    }
}

/// Check a submission against the session and the actor's holdings.
///
/// Checks run in a fixed order so the first failing rule decides the reason:
/// participant, stun, already queued, catalog lookup, ownership, specials,
/// usage cap. On success returns the actor's side and the action to queue,
/// spelled with canonical catalog names. Nothing is mutated.
pub fn validate_submission(
    session: &BattleSession,
    actor: PlayerId,
    submission: &Submission,
    catalog: &dyn CatalogOracle,
    inventory: &dyn ChipInventory,
    config: &BattleConfig,
) -> Result<(SideId, QueuedAction), Rejection> {
    let side_id = session.side_of(actor).ok_or(Rejection::NotParticipant)?;
    let side = session.side(side_id);

    if side.status.stunned {
        return Err(Rejection::Stunned);
    }
    if side.queued.is_some() {
        return Err(Rejection::AlreadyQueued);
    }

    let chip = catalog
        .chip(&submission.chip)
        .ok_or(Rejection::InvalidAction)?;
    let support = match submission.support.as_deref() {
        Some(name) => {
            let support = catalog.chip(name).ok_or(Rejection::InvalidAction)?;
            if !support.has(EffectKind::Support) {
                return Err(Rejection::InvalidAction);
            }
            Some(support)
        }
        None => None,
    };

    let spent: Vec<&EffectDescriptor> = support.into_iter().chain([chip]).collect();
    let mut needed: BTreeMap<&str, u32> = BTreeMap::new();
    for descriptor in &spent {
        *needed.entry(descriptor.name.as_str()).or_default() += 1;
    }

    for (&name, &count) in &needed {
        if inventory.owned(name) < count {
            return Err(Rejection::NotOwned);
        }
    }

    for descriptor in &spent {
        let repeated = needed[descriptor.name.as_str()] > 1;
        if descriptor.is_special() && (repeated || side.specials_used.contains(&descriptor.name)) {
            return Err(Rejection::SpecialAlreadyUsed);
        }
    }

    for (&name, &count) in &needed {
        if side.uses_of(name) + count > config.usage_cap {
            return Err(Rejection::CapExceeded);
        }
    }

    let queued = match support {
        Some(support) => QueuedAction::Supported {
            support: support.name.clone(),
            with: chip.name.clone(),
        },
        None => QueuedAction::Chip {
            name: chip.name.clone(),
        },
    };
    Ok((side_id, queued))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CombatStats, SessionKey, SideState};
    use crate::testing::TestCatalog;

    fn catalog() -> TestCatalog {
        TestCatalog::default()
            .with_chip(EffectDescriptor::new("Cannon", [EffectKind::Attack]).with_power(40))
            .with_chip(EffectDescriptor::new("Atk+10", [EffectKind::Support]).with_bonus(10))
            .with_chip(
                EffectDescriptor::new("Giga Cannon", [EffectKind::Attack, EffectKind::Special])
                    .with_power(120),
            )
    }

    fn session() -> BattleSession {
        BattleSession::duel(
            SessionKey::new("arena"),
            SideState::controlled(PlayerId(1), CombatStats::new(100, 0, 0)),
            SideState::controlled(PlayerId(2), CombatStats::new(100, 0, 0)),
            0,
            60_000,
        )
        .unwrap()
    }

    fn inventory() -> BTreeMap<String, u32> {
        BTreeMap::from([
            ("Cannon".to_string(), 9),
            ("Atk+10".to_string(), 1),
            ("Giga Cannon".to_string(), 2),
        ])
    }

    fn submit(
        session: &BattleSession,
        actor: u64,
        submission: Submission,
    ) -> Result<(SideId, QueuedAction), Rejection> {
        validate_submission(
            session,
            PlayerId(actor),
            &submission,
            &catalog(),
            &inventory(),
            &BattleConfig::default(),
        )
    }

    #[test]
    fn accepts_with_canonical_names() {
        let (side, queued) = submit(&session(), 2, Submission::chip("cannon")).unwrap();
        assert_eq!(side, SideId::Opponent);
        assert_eq!(
            queued,
            QueuedAction::Chip {
                name: "Cannon".to_string()
            }
        );
    }

    #[test]
    fn outsider_is_not_a_participant() {
        assert_eq!(
            submit(&session(), 7, Submission::chip("Cannon")),
            Err(Rejection::NotParticipant)
        );
    }

    #[test]
    fn stun_is_checked_before_queue() {
        let mut session = session();
        let side = session.side_mut(SideId::Challenger);
        side.status.stunned = true;
        side.queued = Some(QueuedAction::Chip {
            name: "Cannon".to_string(),
        });
        assert_eq!(
            submit(&session, 1, Submission::chip("Cannon")),
            Err(Rejection::Stunned)
        );
    }

    #[test]
    fn second_submission_in_a_round_is_rejected() {
        let mut session = session();
        session.side_mut(SideId::Challenger).queued = Some(QueuedAction::Chip {
            name: "Cannon".to_string(),
        });
        assert_eq!(
            submit(&session, 1, Submission::chip("Cannon")),
            Err(Rejection::AlreadyQueued)
        );
    }

    #[test]
    fn unknown_or_misused_chips_are_invalid() {
        assert_eq!(
            submit(&session(), 1, Submission::chip("Excalibur")),
            Err(Rejection::InvalidAction)
        );
        assert_eq!(
            submit(&session(), 1, Submission::supported("Cannon", "Cannon")),
            Err(Rejection::InvalidAction)
        );
    }

    #[test]
    fn support_chain_needs_both_chips_owned() {
        let session = session();
        let catalog = catalog();
        let inventory = BTreeMap::from([("Cannon".to_string(), 1)]);
        let result = validate_submission(
            &session,
            PlayerId(1),
            &Submission::supported("Atk+10", "Cannon"),
            &catalog,
            &inventory,
            &BattleConfig::default(),
        );
        assert_eq!(result, Err(Rejection::NotOwned));

        let (_, queued) = submit(&session, 1, Submission::supported("atk+10", "Cannon")).unwrap();
        assert_eq!(
            queued,
            QueuedAction::Supported {
                support: "Atk+10".to_string(),
                with: "Cannon".to_string()
            }
        );
    }

    #[test]
    fn spent_special_is_rejected() {
        let mut session = session();
        session
            .side_mut(SideId::Challenger)
            .specials_used
            .insert("Giga Cannon".to_string());
        assert_eq!(
            submit(&session, 1, Submission::chip("Giga Cannon")),
            Err(Rejection::SpecialAlreadyUsed)
        );
        assert!(submit(&session, 2, Submission::chip("Giga Cannon")).is_ok());
    }

    #[test]
    fn fourth_use_is_accepted_fifth_is_capped() {
        let mut session = session();
        session
            .side_mut(SideId::Challenger)
            .usage
            .insert("Cannon".to_string(), 3);
        assert!(submit(&session, 1, Submission::chip("Cannon")).is_ok());

        session
            .side_mut(SideId::Challenger)
            .usage
            .insert("Cannon".to_string(), 4);
        assert_eq!(
            submit(&session, 1, Submission::chip("Cannon")),
            Err(Rejection::CapExceeded)
        );
    }
}
