//! Output formatting for command results.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use fnlog_lib::HostProfile;

/// How JSON results are rendered on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented JSON.
    #[default]
    Pretty,
    /// One JSON document per line.
    Compact,
}

/// Write `value` as JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize>(
    out: &mut W,
    value: &T,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Pretty => serde_json::to_writer_pretty(&mut *out, value)?,
        OutputFormat::Compact => serde_json::to_writer(&mut *out, value)?,
    }
    writeln!(out)?;
    Ok(())
}

/// Print `value` as JSON on stdout.
pub fn print_json<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_json(&mut out, value, format)?;
    out.flush()?;
    Ok(())
}

/// Write the known host profiles as an aligned name/description table.
pub fn write_profile_table<W: Write>(out: &mut W) -> io::Result<()> {
    let width = HostProfile::ALL
        .iter()
        .map(|p| p.name().len())
        .max()
        .unwrap_or(0);

    writeln!(out, "Host logging profiles ({}):", HostProfile::ALL.len())?;
    for profile in HostProfile::ALL {
        writeln!(
            out,
            "  {:<width$}  {}",
            profile.name(),
            profile.description(),
            width = width
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_compact_output_is_single_line() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &json!({"entriesGenerated": 20}), OutputFormat::Compact).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "{\"entriesGenerated\":20}\n");
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &json!({"version": "2.0"}), OutputFormat::Pretty).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "{\n  \"version\": \"2.0\"\n}\n"
        );
    }

    #[test]
    fn test_profile_table_lists_every_profile() {
        let mut buffer = Vec::new();
        write_profile_table(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("Host logging profiles (5):"));
        for profile in HostProfile::ALL {
            assert!(text.contains(profile.name()), "missing {}", profile);
        }
    }
}
