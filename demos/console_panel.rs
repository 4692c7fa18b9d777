//! Console control panel.
//!
//! Connects to a device and drives it from stdin.
//!
//! Usage: `cargo run --example console_panel -- [host] [--debug]`
//!
//! Commands:
//!
//! ```text
//! on | off                 LED switch
//! brightness <0-100>       slider release
//! timer on | timer off     timer switch
//! save <HH:MM> <HH:MM>     set on/off times and save
//! show                     print the controls
//! quit
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use ledbar_panel::{ControlPanel, ElementId, Prompt, UiEvent};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Args
// ============================================================================

/// Command-line arguments.
#[derive(Debug, Clone)]
struct Args {
    host: Option<String>,
    debug: bool,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self {
            host: args.iter().find(|a| !a.starts_with("--")).cloned(),
            debug: args.iter().any(|a| a == "--debug"),
        }
    }
}

// ============================================================================
// ConsolePrompt
// ============================================================================

struct ConsolePrompt;

impl Prompt for ConsolePrompt {
    fn alert(&self, message: &str) {
        println!(">> {message}");
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let mut builder = ControlPanel::builder().prompt(Arc::new(ConsolePrompt));
    if let Some(host) = args.host {
        builder = builder.host(host);
    }
    let panel = builder.build()?;
    panel.start()?;

    println!("Connecting to {}", panel.transport().endpoint());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let words: Vec<&str> = line.split_whitespace().collect();
        let events = match words.as_slice() {
            ["on"] => vec![UiEvent::LedSwitchChanged { checked: true }],
            ["off"] => vec![UiEvent::LedSwitchChanged { checked: false }],
            ["brightness", value] => match value.parse() {
                Ok(value) => vec![
                    UiEvent::BrightnessInput { value },
                    UiEvent::BrightnessChanged { value },
                ],
                Err(e) => {
                    println!("bad brightness: {e}");
                    continue;
                }
            },
            ["timer", "on"] => vec![UiEvent::TimerSwitchChanged { checked: true }],
            ["timer", "off"] => vec![UiEvent::TimerSwitchChanged { checked: false }],
            ["save", on, off] => vec![
                UiEvent::OnTimeEdited((*on).to_string()),
                UiEvent::OffTimeEdited((*off).to_string()),
                UiEvent::SaveTimerClicked,
            ],
            ["show"] => {
                print_controls(&panel);
                continue;
            }
            ["quit"] | ["exit"] => break,
            [] => continue,
            _ => {
                println!("unknown command: {line}");
                continue;
            }
        };

        for event in events {
            match panel.dispatch(event) {
                Ok(Some(action)) if !panel.status().is_open() => {
                    println!("not connected, dropped {}", action.name());
                }
                Ok(_) => {}
                Err(e) => println!("error: {e}"),
            }
        }
    }

    panel.shutdown().await;
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn init_logging(debug: bool) {
    let default = if debug { "ledbar_panel=debug" } else { "ledbar_panel=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_controls(panel: &ControlPanel) {
    let controls = panel.controls();
    for element in ElementId::ALL {
        println!("{:<18} {:?}", element.as_str(), controls.get(element));
    }
}
