/// Implementation of `resp validate`.
///
/// Runs a full pipeline decode and reports either a success line or a
/// diagnostic. Exits with code 1 on any failure (the dispatcher in
/// `main.rs` converts `Err` to exit code 1).
///
/// ```text
/// ✓ 2 frames decoded (27 bytes)
/// ✗ Truncated: incomplete stream: input ended mid-frame at offset 18
/// ```
use anyhow::{Result, anyhow};
use resp_decoder::{DecodeError, DecoderConfig};

use crate::{ValidateArgs, open_decoder};

/// Run the `resp validate` command.
///
/// # Errors
///
/// Returns an error if the input cannot be opened or does not decode.
pub fn run(args: &ValidateArgs, config: &DecoderConfig) -> Result<()> {
    let mut decoder = open_decoder(args.file.as_deref(), config)?;

    match decoder.decode_pipeline() {
        Ok(pipeline) => {
            println!(
                "✓ {} frame{} decoded ({} bytes)",
                pipeline.len(),
                if pipeline.len() == 1 { "" } else { "s" },
                decoder.position()
            );
            Ok(())
        }
        Err(e) => {
            println!("✗ {}: {e}", error_class(&e));
            Err(anyhow!("validation failed"))
        }
    }
}

/// Short label for the failure family.
fn error_class(err: &DecodeError) -> &'static str {
    match err {
        e if e.is_invalid_syntax() => "Syntax error",
        DecodeError::Wire(_) => "Bad count",
        DecodeError::Incomplete { .. } => "Truncated",
        DecodeError::LimitExceeded { .. } => "Limit exceeded",
        DecodeError::Io(_) => "I/O error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resp_decoder::decode_bytes;

    #[test]
    fn classifies_each_failure_family() {
        let class = |wire: &[u8]| error_class(&decode_bytes(wire).unwrap_err());
        assert_eq!(class(b"+OK\n"), "Syntax error");
        assert_eq!(class(b"$x\r\n"), "Bad count");
        assert_eq!(class(b"$9\r\nab\r\n"), "Truncated");
    }
}
