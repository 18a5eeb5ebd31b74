/// Implementation of `resp decode`.
///
/// Drains the whole capture with `RespDecoder::decode_pipeline` and writes
/// one entry per top-level frame. Arrays appear in their flattened,
/// space-joined form.
///
/// ```text
/// $ printf '*2\r\n$3\r\nGET\r\n$1\r\nA\r\n+OK\r\n' | resp decode
/// GET A
/// OK
/// $ printf '*2\r\n$3\r\nGET\r\n$1\r\nA\r\n+OK\r\n' | resp decode --format json
/// [
///   "GET A",
///   "OK"
/// ]
/// ```
///
/// Nothing is written if any frame fails to decode.
use std::fs;
use std::io::{self, Write as _};

use anyhow::{Context, Result, anyhow};
use resp_decoder::DecoderConfig;

use crate::{DecodeArgs, input_name, open_decoder};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

/// Run the `resp decode` command.
///
/// # Errors
///
/// Returns an error if the input cannot be opened, any frame is
/// malformed or truncated, the format is unknown, or the output cannot be
/// written.
pub fn run(args: &DecodeArgs, config: &DecoderConfig) -> Result<()> {
    let format = parse_format(&args.format)?;
    let file = args.file.as_deref();

    let mut decoder = open_decoder(file, config)?;
    let pipeline = decoder
        .decode_pipeline()
        .with_context(|| format!("failed to decode {}", input_name(file)))?;

    let entries: Vec<String> = pipeline
        .iter()
        .map(|entry| String::from_utf8_lossy(entry).into_owned())
        .collect();

    let rendered = match format {
        OutputFormat::Text => render_text(&entries),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&entries).context("cannot encode JSON")?;
            json.push('\n');
            json
        }
    };

    if let Some(path) = &args.output {
        fs::write(path, rendered.as_bytes())
            .with_context(|| format!("cannot write {}", path.display()))?;
    } else {
        io::stdout()
            .lock()
            .write_all(rendered.as_bytes())
            .context("cannot write to stdout")?;
    }

    Ok(())
}

fn render_text(entries: &[String]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(entry);
        out.push('\n');
    }
    out
}

/// Parses the `--format` string.
///
/// # Errors
///
/// Returns an error for unrecognised format names.
fn parse_format(s: &str) -> Result<OutputFormat> {
    match s.to_lowercase().as_str() {
        "text" | "txt" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(anyhow!("unknown format {s:?}, expected text|json")),
    }
}
