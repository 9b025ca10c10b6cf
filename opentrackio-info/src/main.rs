use std::error::Error;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use log::warn;
use opentrackio::Sample;

#[derive(Parser)]
#[command(name = "opentrackio-info", about = "Decode and validate an OpenTrackIO sample")]
struct Args {
    /// Input .json, .cbor or gzip-compressed sample
    #[arg(short = 'f', long = "file")]
    file: Option<String>,

    /// Input .json, .cbor or gzip-compressed sample (positional)
    #[arg(conflicts_with = "file", required_unless_present_any = ["file", "schema", "version"])]
    input: Option<String>,

    /// Output the decoded sample as JSON
    #[arg(long)]
    json: bool,

    /// Print JSON schema for the output format and exit
    #[arg(long)]
    schema: bool,

    /// Exit with status 2 if the sample produced any diagnostics
    #[arg(long)]
    strict: bool,

    /// Display version and quit
    #[arg(long)]
    version: bool,
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    // Reset SIGPIPE to default so piped output (e.g. head/tail) exits cleanly
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();

    if args.version {
        opentrackio::version::print_cli_version_banner(
            "OpenTrackIO Info Tool",
            env!("CARGO_PKG_VERSION"),
            env!("RELEASE_VERSION"),
            env!("GIT_COMMIT"),
        );
        return Ok(ExitCode::SUCCESS);
    }

    if args.schema {
        let schema = schemars::schema_for!(Sample);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(ExitCode::SUCCESS);
    }

    let Some(file) = args.file.as_deref().or(args.input.as_deref()) else {
        return Err("an input file is required".into());
    };
    let sample = run(Path::new(file), args.json)?;

    if args.strict && !sample.is_clean() {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

fn run(path: &Path, json: bool) -> Result<Sample, Box<dyn Error>> {
    let sample = opentrackio::reader::load_sample(path)?;

    if json {
        // stdout carries the dump, so surface diagnostics on the log as well
        for error in &sample.errors {
            warn!("{error}");
        }
        println!("{}", serde_json::to_string(&sample)?);
        return Ok(sample);
    }

    print_summary(&sample);
    write_diagnostics(&mut std::io::stdout().lock(), &sample)?;

    Ok(sample)
}

/// Numbered diagnostics list for the text output. Nothing if the sample is clean.
fn write_diagnostics(out: &mut impl Write, sample: &Sample) -> std::io::Result<()> {
    if sample.errors.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "Diagnostics ({}):", sample.errors.len())?;
    for (i, error) in sample.errors.iter().enumerate() {
        writeln!(out, "{:>4}. {error}", i + 1)?;
    }
    Ok(())
}

fn present<T>(value: &Option<T>) -> &'static str {
    if value.is_some() { "present" } else { "absent" }
}

fn opt<T: std::fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_else(|| "-".to_owned())
}

fn print_summary(sample: &Sample) {
    let row = |name: &str, state: &str, detail: String| {
        println!("{name:<18} {state:<8} {detail}");
    };

    row(
        "sampleId",
        present(&sample.sample_id),
        sample.sample_id.as_ref().map(|id| id.as_str().to_owned()).unwrap_or_default(),
    );
    row(
        "streamId",
        present(&sample.stream_id),
        sample.stream_id.as_ref().map(|id| id.as_str().to_owned()).unwrap_or_default(),
    );
    row(
        "protocol",
        present(&sample.protocol),
        sample
            .protocol
            .as_ref()
            .map(|p| format!("{} {}", p.name, p.version))
            .unwrap_or_default(),
    );
    row(
        "relatedSampleIds",
        present(&sample.related_sample_ids),
        sample
            .related_sample_ids
            .as_ref()
            .map(|ids| format!("{} ids", ids.0.len()))
            .unwrap_or_default(),
    );
    row(
        "duration",
        present(&sample.duration),
        sample
            .duration
            .as_ref()
            .map(|d| format!("{}/{} s", d.rational.num, d.rational.denom))
            .unwrap_or_default(),
    );
    row(
        "camera",
        present(&sample.camera),
        sample
            .camera
            .as_ref()
            .map(|c| format!("make={} model={} shutterAngle={}", opt(&c.make), opt(&c.model), opt(&c.shutter_angle)))
            .unwrap_or_default(),
    );
    row(
        "lens",
        present(&sample.lens),
        sample
            .lens
            .as_ref()
            .map(|l| format!("make={} focalLength={} tStop={}", opt(&l.make), opt(&l.focal_length), opt(&l.t_stop)))
            .unwrap_or_default(),
    );
    row(
        "tracker",
        present(&sample.tracker),
        sample
            .tracker
            .as_ref()
            .map(|t| format!("make={} status={}", opt(&t.make), opt(&t.status)))
            .unwrap_or_default(),
    );
    row(
        "timing",
        present(&sample.timing),
        sample
            .timing
            .as_ref()
            .map(|t| {
                let rate = t
                    .frame_rate
                    .map(|r| format!("{}/{}", r.num, r.denom))
                    .unwrap_or_else(|| "-".to_owned());
                let tc = t
                    .timecode
                    .as_ref()
                    .map(|tc| format!("{:02}:{:02}:{:02}:{:02}", tc.hours, tc.minutes, tc.seconds, tc.frames))
                    .unwrap_or_else(|| "-".to_owned());
                let sync = if t.synchronization.is_some() { "synced" } else { "no sync" };
                format!("frameRate={rate} timecode={tc} {sync}")
            })
            .unwrap_or_default(),
    );
    row(
        "globalStage",
        present(&sample.global_stage),
        sample
            .global_stage
            .as_ref()
            .map(|g| format!("lat0={} lon0={} h0={}", g.lat0, g.lon0, g.h0))
            .unwrap_or_default(),
    );
    row(
        "transforms",
        present(&sample.transforms),
        sample
            .transforms
            .as_ref()
            .map(|t| {
                t.0.iter()
                    .map(|node| node.transform_id.as_deref().unwrap_or("?"))
                    .collect::<Vec<_>>()
                    .join(" > ")
            })
            .unwrap_or_default(),
    );
}
