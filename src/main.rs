//! Pintograph entry point
//!
//! Native: runs a linkage offline on a fixed-step clock and prints the final
//! frame as JSON. The browser build is driven through `WebPintograph`.
//!
//! Usage: `pintograph [inputs.json] [--runtime SECS] [--dt SECS] [--quality low|medium|high]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pintograph (native) starting...");

    if let Err(err) = native::run(std::env::args().skip(1).collect()) {
        log::error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_init in the library, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use pintograph::consts::{DEFAULT_RUNTIME, SIM_DT};
    use pintograph::platform::ManualClock;
    use pintograph::sim::{HostInputs, LinkageConfig, TickInput};
    use pintograph::{ConfigError, Driver, PintographError, QualityPreset, Settings};

    struct Args {
        inputs: Option<String>,
        runtime: f64,
        dt: f64,
        quality: QualityPreset,
    }

    fn parse_args(args: Vec<String>) -> Result<Args, ConfigError> {
        let mut out = Args {
            inputs: None,
            runtime: DEFAULT_RUNTIME,
            dt: SIM_DT,
            quality: QualityPreset::default(),
        };

        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--runtime" => out.runtime = number("runtime", iter.next())?,
                "--dt" => out.dt = number("dt", iter.next())?,
                "--quality" => {
                    let value = iter.next().unwrap_or_default();
                    out.quality = QualityPreset::parse(&value).ok_or_else(|| ConfigError::InvalidValue {
                        field: "quality",
                        message: format!("unknown preset {value:?}"),
                    })?;
                }
                _ => out.inputs = Some(arg),
            }
        }

        if out.dt.is_nan() || out.dt <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "dt",
                message: format!("must be positive, got {}", out.dt),
            });
        }
        Ok(out)
    }

    fn number(field: &'static str, value: Option<String>) -> Result<f64, ConfigError> {
        let value = value.unwrap_or_default();
        value.parse().map_err(|_| ConfigError::InvalidValue {
            field,
            message: format!("expected a number, got {value:?}"),
        })
    }

    pub fn run(args: Vec<String>) -> Result<(), PintographError> {
        let args = parse_args(args)?;
        let inputs = match &args.inputs {
            Some(path) => HostInputs::load(path)?,
            None => HostInputs::from(&LinkageConfig::default()),
        };

        let clock = ManualClock::new();
        let mut driver = Driver::new(inputs, clock.clone()).with_settings(Settings::from_preset(args.quality));
        let input = TickInput::running(args.runtime);

        let mut last = None;
        let mut infeasible = 0usize;
        loop {
            match driver.tick(&input) {
                Ok(Some(frame)) => last = Some(frame),
                Ok(None) => {}
                // Configuration problems never resolve on their own
                Err(PintographError::Config(err)) => return Err(err.into()),
                Err(PintographError::Solve(_)) => infeasible += 1,
            }
            if !driver.wants_tick() {
                break;
            }
            clock.advance(args.dt);
        }

        log::info!(
            "Traced {} points over {:.2}s ({} infeasible ticks, trace length {:.3})",
            driver.path().len(),
            driver.elapsed(),
            infeasible,
            driver.path().length()
        );

        if let Some(frame) = last {
            println!("{}", frame.to_json()?);
        }
        Ok(())
    }
}
