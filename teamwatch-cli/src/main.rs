use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use teamwatch_adapters::{import_audit_json, import_grades_json, import_mentions_json};
use teamwatch_cli::dashboard;
use teamwatch_cli::store::{default_data_dir, Store};
use teamwatch_types::Severity;

#[derive(Debug, Parser)]
#[command(name = "teamwatch", version)]
#[command(about = "Coordination health dashboard for multi-agent teams")]
struct Cli {
    /// Data directory (default: ~/.teamwatch)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the team dashboard (default when no command is given)
    Dashboard {
        /// Show compact view
        #[arg(short, long)]
        compact: bool,
    },
    /// Print the team coherence score
    Score,
    /// List registered agents
    Agents,
    /// Show one agent's metrics
    Agent {
        /// Agent name
        name: String,
    },
    /// List active alerts
    Alerts {
        /// Filter by severity (info, warning, critical)
        #[arg(short, long)]
        severity: Option<Severity>,
    },
    /// Record a mention event
    RecordMention {
        /// Agent name
        agent: String,
        /// Mark as acknowledged
        #[arg(long)]
        ack: bool,
    },
    /// Record a response latency
    RecordResponse {
        /// Agent name
        agent: String,
        /// Latency in seconds
        latency: f64,
    },
    /// Record claim accuracy
    RecordClaim {
        /// Agent name
        agent: String,
        /// Claim was correct
        #[arg(long)]
        correct: bool,
    },
    /// Register an agent
    Register {
        /// Agent name
        agent: String,
    },
    /// Import an external tool's export file
    Import {
        /// Export format
        #[arg(value_enum)]
        source: ImportSource,
        /// Path to the export file
        file: PathBuf,
    },
    /// Export all data as JSON
    Export,
    /// Reset all monitoring data
    Reset,
    /// Check all alerts and take a snapshot
    Check,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ImportSource {
    /// Mention tracker events
    Mentions,
    /// Audit tool issues
    Audit,
    /// Retrospective grading
    Grades,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("[X] Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let store = Store::new(cli.data_dir.unwrap_or_else(default_data_dir));
    let mut monitor = store.load();

    match cli.command {
        Some(Command::Dashboard { compact }) => {
            println!("{}", dashboard::render(&monitor, compact));
        }

        Some(Command::Score) => {
            let score = monitor.coherence_score();
            println!(
                "Team Coherence: {:.1}/100 {}",
                score,
                dashboard::score_icon(score)
            );
        }

        Some(Command::Agents) => {
            let names = monitor.agent_names();
            if names.is_empty() {
                println!("No agents registered");
            } else {
                let scores = monitor.agent_scores();
                println!("Registered Agents ({}):", names.len());
                for name in &names {
                    let score = scores.get(name).copied().unwrap_or(0.0);
                    println!("  {}: {:.1}", name, score);
                }
            }
        }

        Some(Command::Agent { name }) => match monitor.agent_metrics(&name) {
            Some(metrics) => {
                println!("Agent: {}", metrics.name);
                println!("  Coherence Score: {:.1}", metrics.coherence_score);
                println!("  Ack Rate: {:.1}%", metrics.ack_rate);
                println!("  Avg Latency: {:.2}s", metrics.avg_latency);
                println!("  Context Fidelity: {:.1}%", metrics.context_fidelity);
                println!(
                    "  Mentions: {}/{}",
                    metrics.mentions_acknowledged, metrics.mentions_received
                );
                println!("  Messages: {}", metrics.messages_sent);
                println!("  Errors: {}", metrics.errors_detected);
                println!(
                    "  Status: {}",
                    if metrics.is_active { "Active" } else { "Inactive" }
                );
            }
            None => {
                println!("[!] Agent not found: {}", name);
                return Ok(ExitCode::FAILURE);
            }
        },

        Some(Command::Alerts { severity }) => {
            let alerts = monitor.alerts(severity);
            if alerts.is_empty() {
                println!("[OK] No active alerts");
            } else {
                println!("Active Alerts ({}):", alerts.len());
                for alert in &alerts {
                    let icon = if alert.severity == Severity::Critical {
                        "[X]"
                    } else {
                        "[!]"
                    };
                    println!(
                        "  {} [{}] {}",
                        icon,
                        alert.agent.as_deref().unwrap_or("TEAM"),
                        alert.message
                    );
                }
            }
        }

        Some(Command::RecordMention { agent, ack }) => {
            monitor.record_mention(&agent, ack);
            store.save(&monitor)?;
            println!("[OK] Recorded mention for {}", agent.to_uppercase());
        }

        Some(Command::RecordResponse { agent, latency }) => {
            monitor.record_response(&agent, latency);
            store.save(&monitor)?;
            println!(
                "[OK] Recorded {}s response for {}",
                latency,
                agent.to_uppercase()
            );
        }

        Some(Command::RecordClaim { agent, correct }) => {
            monitor.record_claim(&agent, correct);
            store.save(&monitor)?;
            let status = if correct { "correct" } else { "incorrect" };
            println!("[OK] Recorded {} claim for {}", status, agent.to_uppercase());
        }

        Some(Command::Register { agent }) => {
            monitor.register_agent(&agent);
            store.save(&monitor)?;
            println!("[OK] Registered agent: {}", agent.to_uppercase());
        }

        Some(Command::Import { source, file }) => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let count = match source {
                ImportSource::Mentions => import_mentions_json(&mut monitor, &raw)?,
                ImportSource::Audit => import_audit_json(&mut monitor, &raw)?,
                ImportSource::Grades => import_grades_json(&mut monitor, &raw)?,
            };
            store.save(&monitor)?;
            println!("[OK] Imported {} events from {}", count, file.display());
        }

        Some(Command::Export) => {
            println!("{}", serde_json::to_string_pretty(&monitor.export())?);
        }

        Some(Command::Reset) => {
            monitor.reset();
            store.save(&monitor)?;
            println!("[OK] All monitoring data reset");
        }

        Some(Command::Check) => {
            let new_alerts = monitor.check_all_alerts();
            let snapshot = monitor.take_snapshot();
            store.save(&monitor)?;
            println!("[OK] Check complete");
            println!("  Coherence: {:.1}", snapshot.overall_score);
            println!(
                "  Active Agents: {}/{}",
                snapshot.active_agents, snapshot.total_agents
            );
            println!("  New Alerts: {}", new_alerts.len());
        }

        None => {
            println!("{}", dashboard::render(&monitor, false));
        }
    }

    Ok(ExitCode::SUCCESS)
}
