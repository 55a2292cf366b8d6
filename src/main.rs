use clap::Parser;
use detect_gps::{AppError, DetectConfig, Detector, DeviceOpener};
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Link the GPS receiver among /dev/ttyUSB* as /dev/gps and a leftover adapter as /dev/radio.",
    long_about = "Probes every /dev/ttyUSB* node at 4800 baud for NMEA $GP sentences. The first \
                  device that talks NMEA is linked as /dev/gps; the first remaining device, if any, \
                  is linked as /dev/radio. Existing links are replaced."
)]
struct Args {}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("detect_gps=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

/// Print the failure as its message, not its debug form.
fn report_failure<W: Write>(err: &AppError, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "detect-gps: {}", err)
}

fn main() -> ExitCode {
    let _args = Args::parse();
    init_logging();

    let detector = Detector::new(DetectConfig::default(), DeviceOpener);
    let stdout = std::io::stdout();
    match detector.run(&mut stdout.lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = report_failure(&e, &mut std::io::stderr());
            ExitCode::FAILURE
        }
    }
}
