use std::path::Path;
use std::process::exit;

#[macro_use]
extern crate log;

use clap::{App, Arg};
use same_core::{GenCtx, Header, LibcEngine, LocationCodes, LutEngine, SineEngine, TaylorEngine};

/// Copies `s` into a fixed-size field, right-padding with spaces if it is
/// shorter than `N` bytes. Exits with an error message if it is longer.
fn fixed_field<const N: usize>(name: &str, s: &str) -> [u8; N] {
    if s.len() > N {
        eprintln!("error: {} must be at most {} bytes, got {:?}", name, N, s);
        exit(1);
    }
    let mut out = [b' '; N];
    out[..s.len()].copy_from_slice(s.as_bytes());
    out
}

fn location_codes(values: clap::Values) -> LocationCodes {
    let codes: Vec<[u8; 6]> = values.map(|v| fixed_field::<6>("location", v)).collect();
    if codes.len() > 31 {
        eprintln!("error: at most 31 --location values are allowed, got {}", codes.len());
        exit(1);
    }
    LocationCodes::new(&codes)
}

fn write_wav(path: impl AsRef<Path>, sample_rate: u32, samples: &[i16]) -> Result<(), hound::Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()
}

fn run_with_engine<E: SineEngine>(
    header: &Header,
    sample_rate: u32,
    engine: E,
    out_path: &str,
) -> Result<(), String> {
    let mut ctx = GenCtx::new(header, sample_rate, engine).map_err(|e| e.to_string())?;
    info!(
        "generating with {} backend, {} total samples",
        ctx.engine_desc(),
        ctx.total_samples()
    );

    let total = ctx.total_samples() as usize;
    let mut all_samples = Vec::with_capacity(total);
    while !ctx.is_done() {
        all_samples.extend_from_slice(ctx.samples_gen());
    }
    // The final chunk may carry stale samples past the terminal state;
    // `total_samples()` is the only reliable length.
    all_samples.truncate(total);

    write_wav(out_path, sample_rate, &all_samples).map_err(|e| e.to_string())
}

fn main() {
    env_logger::init();

    let matches = App::new("same_cli")
        .version("0.1")
        .author("Joe Thill <rocketlobster42@gmail.com>")
        .about("Generates a SAME/EAS header and attention signal as a WAV file")
        .arg(
            Arg::with_name("originator")
                .long("originator")
                .value_name("CODE")
                .help("Three-letter originator code, e.g. WXR")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("event")
                .long("event")
                .value_name("CODE")
                .help("Three-letter event code, e.g. TOR")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("location")
                .long("location")
                .value_name("CODE")
                .help("Six-digit location code; repeat for up to 31 locations")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .required(true),
        )
        .arg(
            Arg::with_name("valid-time")
                .long("valid-time")
                .value_name("TTTT")
                .help("Four-digit purge time in minutes or hours+minutes")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("originator-time")
                .long("originator-time")
                .value_name("JJJHHMM")
                .help("Seven-digit Julian day and time of origin")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("callsign")
                .long("callsign")
                .value_name("CALLSIGN")
                .help("Originator's station callsign, at most 8 bytes")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("attn-duration")
                .long("attn-duration")
                .value_name("SECONDS")
                .help("Attention signal duration in seconds, 8-25")
                .takes_value(true)
                .default_value("8"),
        )
        .arg(
            Arg::with_name("sample-rate")
                .long("sample-rate")
                .value_name("HZ")
                .help("Output sample rate")
                .takes_value(true)
                .default_value("44100"),
        )
        .arg(
            Arg::with_name("engine")
                .long("engine")
                .value_name("ENGINE")
                .help("Sine backend to use")
                .possible_values(&["libc", "lut", "taylor"])
                .takes_value(true)
                .default_value("libc"),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Path to the WAV file to write")
                .required(true),
        )
        .get_matches();

    let originator = fixed_field::<3>("originator", matches.value_of("originator").unwrap());
    let event = fixed_field::<3>("event", matches.value_of("event").unwrap());
    let locations = location_codes(matches.values_of("location").unwrap());
    let valid_time = fixed_field::<4>("valid-time", matches.value_of("valid-time").unwrap());
    let originator_time =
        fixed_field::<7>("originator-time", matches.value_of("originator-time").unwrap());
    let callsign = fixed_field::<8>("callsign", matches.value_of("callsign").unwrap());

    let attn_duration: u32 = matches
        .value_of("attn-duration")
        .unwrap()
        .parse()
        .unwrap_or_else(|_| {
            eprintln!("error: attn-duration must be an integer");
            exit(1);
        });
    let sample_rate: u32 = matches
        .value_of("sample-rate")
        .unwrap()
        .parse()
        .unwrap_or_else(|_| {
            eprintln!("error: sample-rate must be an integer");
            exit(1);
        });

    let header = Header::new(
        originator,
        event,
        locations,
        valid_time,
        originator_time,
        callsign,
        attn_duration,
    );

    let out_path = matches.value_of("OUTPUT").unwrap();
    let engine_name = matches.value_of("engine").unwrap();

    let result = match engine_name {
        "libc" => run_with_engine(&header, sample_rate, LibcEngine, out_path),
        "lut" => run_with_engine(&header, sample_rate, LutEngine, out_path),
        "taylor" => run_with_engine(&header, sample_rate, TaylorEngine, out_path),
        _ => unreachable!("clap restricted possible_values"),
    };

    if let Err(msg) = result {
        error!("{}", msg);
        eprintln!("error: {}", msg);
        exit(1);
    }

    println!("wrote {}", out_path);
}
