//! Bot-vs-bot battle simulation
//!
//! Runs a real runtime with stand-in autopilots on both sides (or a stand-in
//! against a catalog entity) and prints every round as it resolves.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use tokio::sync::broadcast::error::RecvError;

use battle_content::ContentFactory;
use battle_core::{
    BattleOutcome, CatalogOracle, CombatStats, PlayerId, RoundReport, SessionKey, SideId,
};
use runtime::{
    BattleEvent, CatalogOracleImpl, Event, FileSessionRepository, InMemoryPlayerRepo, Participant,
    PlayerRecord, RoundEvent, Runtime, RuntimeConfig, Topic,
};

const CHALLENGER: PlayerId = PlayerId(1);
const OPPONENT: PlayerId = PlayerId(2);

/// Run a bot-vs-bot battle
#[derive(Parser)]
pub struct Simulate {
    /// Fight this catalog entity instead of a second stand-in
    #[arg(short, long, value_name = "ENTITY")]
    entity: Option<String>,

    /// Chips the stand-ins may play
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_value = "Cannon,Sword,Guard,Recov50"
    )]
    chips: Vec<String>,

    /// Content directory (defaults to the bundled sample data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Persist sessions in this directory (in-memory when omitted)
    #[arg(long, value_name = "DIR")]
    sessions_dir: Option<PathBuf>,

    /// Seconds each round stays open
    #[arg(short, long, default_value_t = 1)]
    timeout_secs: u64,

    /// Max HP of each stand-in
    #[arg(long, default_value_t = 200)]
    hp: u32,

    /// Forfeit on the challenger's behalf after this many rounds
    #[arg(long, default_value_t = 40)]
    max_rounds: u32,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("Failed to start tokio runtime")?
            .block_on(self.run())
    }

    async fn run(self) -> Result<()> {
        let factory = match &self.data_dir {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::bundled(),
        };
        let bundle = factory.load_all().with_context(|| {
            format!("Failed to load content from {}", factory.data_dir().display())
        })?;
        let catalog = CatalogOracleImpl::from_bundle(&bundle);

        for chip in &self.chips {
            if catalog.chip(chip).is_none() {
                anyhow::bail!("Unknown chip in --chips: {}", chip);
            }
        }
        if let Some(entity) = &self.entity
            && catalog.entity(entity).is_none()
        {
            anyhow::bail!("Unknown entity: {}", entity);
        }

        let mut config = RuntimeConfig::default()
            .with_battle(bundle.config.clone())
            .with_env_overrides()?;
        config.battle.round_timeout_secs = self.timeout_secs.max(1);

        let stats = CombatStats::new(self.hp, 10, 10);
        let players = InMemoryPlayerRepo::new()
            .with_player(CHALLENGER, PlayerRecord::new(stats))
            .with_player(OPPONENT, PlayerRecord::new(stats));

        let mut builder = Runtime::builder()
            .config(config)
            .catalog(Arc::new(catalog))
            .players(Arc::new(players));
        if let Some(dir) = &self.sessions_dir {
            builder = builder.sessions(Arc::new(
                FileSessionRepository::new(dir)
                    .with_context(|| format!("Failed to open {}", dir.display()))?
                    .with_config(bundle.config.clone()),
            ));
        }
        let runtime = builder.build().await?;
        let handle = runtime.handle();

        let mut receivers = handle.subscribe_multiple(&[Topic::Round, Topic::Battle]);
        let (Some(mut rounds), Some(mut battles)) = (
            receivers.remove(&Topic::Round),
            receivers.remove(&Topic::Battle),
        ) else {
            anyhow::bail!("Event bus did not return both topic receivers");
        };

        let key = SessionKey::new("xtask:simulate");
        let challenger = Participant::stand_in(CHALLENGER, self.chips.clone());
        let session = match &self.entity {
            Some(entity) => handle.start_encounter(key.clone(), challenger, entity).await?,
            None => {
                let opponent = Participant::stand_in(OPPONENT, self.chips.clone());
                handle.start_duel(key.clone(), challenger, opponent).await?
            }
        };

        println!(
            "\n{} {} vs {}\n",
            style("⚔").bold(),
            style(session.side(SideId::Challenger).combatant.label()).cyan().bold(),
            style(session.side(SideId::Opponent).combatant.label()).magenta().bold(),
        );

        loop {
            tokio::select! {
                event = rounds.recv() => match event {
                    Ok(Event::Round(RoundEvent::Resolved { report, .. })) => {
                        print_report(&report);
                        if report.round >= self.max_rounds {
                            println!("{}", style("Round limit reached, forfeiting").yellow());
                            // The battle may already have ended on this round.
                            if let Err(err) = handle.forfeit(&key, CHALLENGER).await
                                && !err.is_rejection()
                            {
                                return Err(err.into());
                            }
                        }
                    }
                    Ok(Event::Round(RoundEvent::Extended { round, .. })) => {
                        println!("{}", style(format!("Round {round}: nobody acted, extended")).dim());
                    }
                    Ok(_) | Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => break,
                },
                event = battles.recv() => match event {
                    Ok(Event::Battle(BattleEvent::Ended { report, outcome, .. })) => {
                        print_report(&report);
                        print_outcome(&report, outcome);
                        break;
                    }
                    Ok(Event::Battle(BattleEvent::Forfeited { by, .. })) => {
                        println!("{}", style(format!("player {by} forfeited")).yellow().bold());
                        break;
                    }
                    Ok(Event::Battle(BattleEvent::RewardsGranted { grant, .. })) => {
                        println!(
                            "{} {} zenny, drop: {}, task: {}",
                            style("Rewards:").green().bold(),
                            grant.currency,
                            grant.item.as_deref().unwrap_or("none"),
                            grant.task_reward.map_or("none".to_string(), |r| r.to_string()),
                        );
                    }
                    Ok(_) | Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => break,
                },
            }
        }

        drop(handle);
        runtime.shutdown().await?;
        Ok(())
    }
}

fn print_report(report: &RoundReport) {
    println!("{}", style(format!("── Round {} ──", report.round)).bold());
    for id in SideId::BOTH {
        let side = report.side(id);
        let actions = if side.stunned {
            style("stunned".to_string()).yellow().to_string()
        } else if side.actions.is_empty() {
            style("idle".to_string()).dim().to_string()
        } else {
            side.actions.join(" + ")
        };

        let mut notes = Vec::new();
        if let Some(attack) = &side.attack {
            if attack.crit {
                notes.push("crit".to_string());
            }
            if attack.dodged {
                notes.push("dodged".to_string());
            }
            if attack.cancelled_by_barrier {
                notes.push("blocked by barrier".to_string());
            }
            if attack.absorbed > 0 {
                notes.push(format!("{} absorbed", attack.absorbed));
            }
        }
        if let Some(poison) = side.poison_inflicted {
            notes.push(format!("poisoned for {poison}/tick"));
        }
        if side.paralyzed_opponent {
            notes.push("paralyzed".to_string());
        }
        if side.recovered > 0 {
            notes.push(format!("+{} hp", side.recovered));
        }
        if side.ticks.poison_damage > 0 {
            notes.push(format!("poison -{}", side.ticks.poison_damage));
        }
        if side.ticks.holy_heal > 0 {
            notes.push(format!("holy +{}", side.ticks.holy_heal));
        }

        println!(
            "  {:<12} {:<24} dmg {:>4}  hp {:>4}/{:<4} {}",
            side.label,
            actions,
            side.damage_dealt,
            side.hp,
            side.max_hp,
            style(notes.join(", ")).dim(),
        );
    }
}

fn print_outcome(report: &RoundReport, outcome: BattleOutcome) {
    let line = match outcome.winner() {
        Some(winner) => format!("{} wins", report.side(winner).label),
        None => "Draw".to_string(),
    };
    println!("\n{}\n", style(line).green().bold());
}
