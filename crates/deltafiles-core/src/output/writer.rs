//! Output sinks for the named results

use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::output::computed::ComputedOutputs;

/// Base heredoc delimiter for multiline `$GITHUB_OUTPUT` values
pub const OUTPUT_DELIMITER: &str = "DELTAFILES_EOF";

/// First delimiter of the form `DELTAFILES_EOF[_n]` that occurs in no value.
///
/// Values are written verbatim, so a delimiter found inside one would end its
/// block early and let the rest of the filename inject outputs.
pub fn heredoc_delimiter(outputs: &ComputedOutputs) -> String {
    let entries = outputs.entries();
    let mut delimiter = OUTPUT_DELIMITER.to_string();
    let mut suffix = 0u32;
    while entries.iter().any(|(_, value)| value.contains(delimiter.as_str())) {
        suffix += 1;
        delimiter = format!("{OUTPUT_DELIMITER}_{suffix}");
    }
    delimiter
}

/// Writers for the supported output sinks
pub struct OutputWriter;

impl OutputWriter {
    /// Append every output to the workflow runner's output file
    pub fn append_github_output(path: &Path, outputs: &ComputedOutputs) -> Result<()> {
        let mut f = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)?;
        Self::write_github_output(&mut f, outputs)?;
        f.flush()?;
        Ok(())
    }

    /// Write outputs in `name<<DELIM` / value / `DELIM` form.
    ///
    /// The runner reads heredoc values as-is, so no escaping is applied.
    pub fn write_github_output<W: Write>(w: &mut W, outputs: &ComputedOutputs) -> Result<()> {
        let delimiter = heredoc_delimiter(outputs);
        for (name, value) in outputs.entries() {
            writeln!(w, "{name}<<{delimiter}")?;
            writeln!(w, "{value}")?;
            writeln!(w, "{delimiter}")?;
        }
        Ok(())
    }

    /// Write outputs as a single JSON object
    pub fn write_json<W: Write>(w: &mut W, outputs: &ComputedOutputs) -> Result<()> {
        let map: serde_json::Map<String, serde_json::Value> = outputs
            .entries()
            .into_iter()
            .map(|(name, value)| (name.to_string(), serde_json::Value::from(value)))
            .collect();
        serde_json::to_writer(&mut *w, &map)?;
        writeln!(w)?;
        Ok(())
    }

    /// Write outputs as `name=value` lines
    pub fn write_text<W: Write>(w: &mut W, outputs: &ComputedOutputs) -> Result<()> {
        for (name, value) in outputs.entries() {
            writeln!(w, "{name}={value}")?;
        }
        Ok(())
    }
}
