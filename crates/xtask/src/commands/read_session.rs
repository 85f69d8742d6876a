//! Read and inspect persisted session records
//!
//! Loads `<key>.json` files written by the file session repository and
//! displays their contents. Records are validated on load, so a corrupted
//! file is reported instead of printed.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use battle_core::{BattleSession, SessionKey, SideId, SideState};
use runtime::{FileSessionRepository, SessionRepository};

/// Read and inspect persisted sessions
#[derive(Parser)]
pub struct ReadSession {
    /// Location key of the session to read (e.g., "guild:1/#arena")
    #[arg(value_name = "KEY", required_unless_present = "list")]
    key: Option<String>,

    /// Sessions directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// List stored session keys instead of reading one
    #[arg(short, long)]
    list: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Summary view (round, deadline, hp and statuses per side)
    Summary,
    /// Full JSON output
    Json,
    /// Pretty-printed debug format
    Debug,
}

impl ReadSession {
    pub fn execute(self) -> Result<()> {
        let dir = self.dir.unwrap_or_else(FileSessionRepository::default_dir);
        if !dir.exists() {
            anyhow::bail!("Sessions directory not found: {}", dir.display());
        }
        let repo = FileSessionRepository::new(&dir)
            .with_context(|| format!("Failed to open sessions directory: {}", dir.display()))?;

        if self.list {
            return print_keys(&repo);
        }

        let Some(key) = self.key else {
            anyhow::bail!("A session key is required unless --list is given");
        };
        let key = SessionKey::new(key);

        let session = repo
            .load(&key)
            .with_context(|| format!("Failed to load session {key}"))?
            .with_context(|| {
                format!(
                    "No session stored for {key}\n\nHint: run with --list to see keys in {}",
                    dir.display()
                )
            })?;

        println!("{} {}", style("Session:").bold().cyan(), session.key);
        println!("{} {}", style("Directory:").bold().cyan(), dir.display());
        println!();

        match self.format {
            OutputFormat::Summary => print_summary(&session),
            OutputFormat::Json => print_json(&session)?,
            OutputFormat::Debug => println!("{:#?}", session),
        }

        Ok(())
    }
}

fn print_keys(repo: &FileSessionRepository) -> Result<()> {
    let mut keys = repo.list_keys().context("Failed to list sessions")?;
    if keys.is_empty() {
        println!("No sessions in {}", repo.base_dir().display());
        return Ok(());
    }
    keys.sort_by(|a, b| a.as_str().cmp(b.as_str()));

    println!("{}", style("Stored sessions:").bold().green());
    for key in keys {
        println!("  {key}");
    }
    Ok(())
}

fn print_summary(session: &BattleSession) {
    println!("{}", style("=== Battle Summary ===").bold().green());
    println!();

    println!("{}", style("Round:").bold().yellow());
    println!("  Kind: {:?}", session.kind);
    println!("  Round: {}", session.round);
    println!("  Started: {}", format_ms(session.started_at_ms));
    println!("  Deadline: {}", format_ms(session.round_deadline_ms));
    println!();

    for id in SideId::BOTH {
        print_side(id, session.side(id));
    }
}

fn print_side(id: SideId, side: &SideState) {
    println!(
        "{} {}",
        style(format!("{}:", id.as_str())).bold().yellow(),
        side.combatant.label()
    );
    println!("  HP: {}/{}", side.hp, side.stats.max_hp);
    println!(
        "  Dodge: {}%  Crit: {}%",
        side.stats.dodge_pct, side.stats.crit_pct
    );

    let queued = match &side.queued {
        Some(action) => action.names().join(" + "),
        None => "-".to_string(),
    };
    println!("  Queued: {}", queued);

    let mut statuses = Vec::new();
    if side.status.stunned {
        statuses.push("stunned".to_string());
    }
    if let Some(poison) = &side.status.poison {
        statuses.push(format!("poison {}x{}", poison.amount, poison.ticks_left));
    }
    if let Some(holy) = &side.status.holy {
        statuses.push(format!("holy {}x{}", holy.amount, holy.ticks_left));
    }
    if !statuses.is_empty() {
        println!("  Status: {}", statuses.join(", "));
    }

    if !side.usage.is_empty() {
        let usage: Vec<String> = side
            .usage
            .iter()
            .map(|(name, count)| format!("{name}x{count}"))
            .collect();
        println!("  Usage: {}", usage.join(", "));
    }
    if !side.specials_used.is_empty() {
        let specials: Vec<&str> = side.specials_used.iter().map(String::as_str).collect();
        println!("  Specials spent: {}", specials.join(", "));
    }
    println!();
}

fn print_json(session: &BattleSession) -> Result<()> {
    let json =
        serde_json::to_string_pretty(session).context("Failed to serialize session to JSON")?;
    println!("{}", json);
    Ok(())
}

fn format_ms(ms: u64) -> String {
    i64::try_from(ms)
        .ok()
        .and_then(chrono::DateTime::from_timestamp_millis)
        .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| format!("{ms} ms"))
}
