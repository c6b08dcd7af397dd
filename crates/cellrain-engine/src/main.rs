//! Cellrain binary.
//!
//! Drives a one-dimensional cellular automaton onto a Flaschen-Taschen
//! display: each generation becomes the top row and older rows scroll
//! down.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `$CELLRAIN_CONFIG` or `cellrain-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Validate configuration
//! 4. Open the display socket
//! 5. Build the seed line, pattern set, and colour map
//! 6. Run the frame loop
//! 7. Optionally blank the display and log the result

mod error;

use std::path::PathBuf;

use cellrain_core::config::{self, CONFIG_PATH_ENV, CellrainConfig};
use cellrain_core::{AutomatonState, runner};
use cellrain_display::{FlaschenCanvas, Offset};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, display setup, or the frame loop
/// fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, config_path) = load_config()?;

    // RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("cellrain-engine starting");
    if let Some(path) = &config_path {
        info!(path = %path.display(), "Configuration loaded");
    } else {
        info!("Config file not found, using defaults");
    }

    run(&config)?;
    Ok(())
}

fn run(config: &CellrainConfig) -> Result<(), EngineError> {
    config.validate()?;
    let display_cfg = &config.display;
    info!(
        host = display_cfg.host,
        port = display_cfg.port,
        width = display_cfg.width,
        height = display_cfg.height,
        layer = display_cfg.layer,
        rule = %config.automaton.rule,
        colors = %config.automaton.colors,
        "Display configured"
    );

    let offset = Offset::new(display_cfg.x_offset, display_cfg.y_offset, display_cfg.layer)?;
    let canvas = FlaschenCanvas::connect(
        &display_cfg.host,
        display_cfg.port,
        display_cfg.width,
        display_cfg.height,
    )?
    .with_offset(offset);

    let automaton = &config.automaton;
    let mut state = AutomatonState::new(
        automaton.seed_line(display_cfg.width)?,
        automaton.pattern_set()?,
        automaton.color_map(),
        canvas,
    )?
    .with_pad_value(automaton.pad_value);

    let bounds = config.run.bounds()?;
    let summary = runner::run(&mut state, &bounds)?;

    if config.run.clear_on_exit {
        runner::clear_display(&mut state)?;
    }

    info!(
        frames = summary.frames,
        generation = summary.generation,
        elapsed_secs = summary.elapsed.as_secs_f64(),
        end_reason = ?summary.end_reason,
        datagrams = state.canvas().frames_sent(),
        "Run complete"
    );
    Ok(())
}

/// Load the configuration file, falling back to defaults when it is
/// absent. Returns the path actually read, if any.
fn load_config() -> Result<(CellrainConfig, Option<PathBuf>), EngineError> {
    let config_path = config::config_path(std::env::var_os(CONFIG_PATH_ENV).as_deref());
    if config_path.exists() {
        let config = CellrainConfig::from_file(&config_path)?;
        Ok((config, Some(config_path)))
    } else {
        let mut config = CellrainConfig::default();
        config.display.apply_env_overrides();
        Ok((config, None))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use std::net::UdpSocket;
    use std::time::Duration;

    use super::*;

    #[test]
    fn run_streams_frames_then_clears() {
        let display = UdpSocket::bind("127.0.0.1:0").unwrap();
        display
            .set_read_timeout(Some(Duration::from_secs(2)))
            .unwrap();
        let port = display.local_addr().unwrap().port();

        let yaml = format!(
            "display:\n  host: \"127.0.0.1\"\n  port: {port}\n  width: 5\n  height: 3\n  layer: 4\n\
             run:\n  duration_secs: 0.0\n  frame_delay_ms: 0\n  max_frames: 2\n  clear_on_exit: true\n"
        );
        let config = CellrainConfig::parse(&yaml).unwrap();
        run(&config).unwrap();

        let expected_len = b"P6\n5 3\n255\n".len() + 5 * 3 * 3 + b"\n0\n0\n4\n".len();
        let mut buf = [0u8; 1024];
        let mut frames = Vec::new();
        for _ in 0..4 {
            let len = display.recv(&mut buf).unwrap();
            assert_eq!(len, expected_len);
            frames.push(buf.get(..len).unwrap().to_vec());
        }
        // the two clear frames are all black
        let header_len = b"P6\n5 3\n255\n".len();
        let last = frames.last().unwrap();
        assert!(last
            .get(header_len..header_len + 45)
            .unwrap()
            .iter()
            .all(|&byte| byte == 0));
        assert!(last.ends_with(b"\n0\n0\n4\n"));
    }

    #[test]
    fn invalid_layer_is_rejected_before_connecting() {
        let config = CellrainConfig::parse("display:\n  layer: 16\n").unwrap();
        assert!(matches!(run(&config), Err(EngineError::Config { .. })));
    }
}
