/// Implementation of `resp inspect`.
///
/// Decodes top-level frames one by one with `RespDecoder::read_frame` and
/// prints each frame's tree together with its byte range in the capture.
///
/// # Output format
///
/// ```text
/// Frame 0 [0..22]
///   array(2)
///     bulk(3) "GET"
///     bulk(1) "A"
/// Frame 1 [22..27]
///   status "OK"
/// ---
/// 2 frames, 27 bytes
/// ```
use std::fmt::Write as _;

use anyhow::{Context, Result};
use resp_decoder::DecoderConfig;
use resp_types::{Frame, SimpleKind};

use crate::{InspectArgs, input_name, open_decoder};

/// Run the `resp inspect` command.
///
/// # Errors
///
/// Returns an error if the input cannot be opened or a frame fails to
/// decode. Frames printed before the failure stay printed.
pub fn run(args: &InspectArgs, config: &DecoderConfig) -> Result<()> {
    let file = args.file.as_deref();
    let mut decoder = open_decoder(file, config)?;

    let mut index = 0;
    loop {
        let start = decoder.position();
        let frame = decoder
            .read_frame()
            .with_context(|| format!("failed to decode frame {index} of {}", input_name(file)))?;
        let Some(frame) = frame else { break };

        if args.frame.is_none_or(|target| target == index) {
            let mut out = format!("Frame {index} [{start}..{}]\n", decoder.position());
            render_frame(&frame, 1, &mut out);
            print!("{out}");
        }
        index += 1;
    }

    println!("---");
    println!(
        "{index} frame{}, {} bytes",
        if index == 1 { "" } else { "s" },
        decoder.position()
    );
    Ok(())
}

/// Append an indented tree view of `frame` to `out`.
fn render_frame(frame: &Frame, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match frame {
        Frame::Simple { kind, payload } => {
            let label = match kind {
                SimpleKind::Status => "status",
                SimpleKind::Error => "error",
                SimpleKind::Integer => "integer",
            };
            let _ = writeln!(out, "{indent}{label} {:?}", String::from_utf8_lossy(payload));
        }
        Frame::Bulk(payload) => {
            let _ = writeln!(
                out,
                "{indent}bulk({}) {:?}",
                payload.len(),
                String::from_utf8_lossy(payload)
            );
        }
        Frame::Null => {
            let _ = writeln!(out, "{indent}null");
        }
        Frame::Array(children) => {
            let _ = writeln!(out, "{indent}array({})", children.len());
            for child in children {
                render_frame(child, depth + 1, out);
            }
        }
    }
}
