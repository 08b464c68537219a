//! Rendering of the classified groups into named string outputs

use crate::error::{Error, Result};
use crate::types::{FileGroups, OutputFormat};

/// Names of every emitted output, in emission order. `deleted` mirrors `removed`.
pub const OUTPUT_NAMES: [&str; 7] = [
    "all",
    "added",
    "modified",
    "removed",
    "renamed",
    "added_modified",
    "deleted",
];

/// Render one group in `format`
pub fn render_group<S: AsRef<str>>(paths: &[S], format: OutputFormat) -> String {
    match format {
        OutputFormat::SpaceDelimited => join(paths, " "),
        // No quoting: a comma inside a filename is indistinguishable from a separator
        OutputFormat::Csv => join(paths, ","),
        OutputFormat::Json => format_json_array(paths),
    }
}

/// Render `paths` as a JSON array of strings
pub fn format_json_array<S: AsRef<str>>(paths: &[S]) -> String {
    serde_json::Value::Array(
        paths
            .iter()
            .map(|p| serde_json::Value::from(p.as_ref()))
            .collect(),
    )
    .to_string()
}

fn join<S: AsRef<str>>(paths: &[S], separator: &str) -> String {
    let mut buf = String::with_capacity(paths.iter().map(|p| p.as_ref().len() + 1).sum());
    for (i, p) in paths.iter().enumerate() {
        if i > 0 {
            buf.push_str(separator);
        }
        buf.push_str(p.as_ref());
    }
    buf
}

/// Reject the first path the format cannot represent unambiguously
pub fn ensure_encodable<S: AsRef<str>>(paths: &[S], format: OutputFormat) -> Result<()> {
    if format != OutputFormat::SpaceDelimited {
        return Ok(());
    }
    match paths
        .iter()
        .map(AsRef::as_ref)
        .find(|p: &&str| p.contains(' '))
    {
        Some(path) => Err(Error::DataShape(format!(
            "One of your files includes a space: '{}'. Consider using a different output \
             format (csv or json) or removing spaces from your filenames.",
            path
        ))),
        None => Ok(()),
    }
}

/// Rendered values for every output, all taken from one classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedOutputs {
    /// Every accepted file
    pub all: String,
    /// Added files
    pub added: String,
    /// Modified files
    pub modified: String,
    /// Removed files
    pub removed: String,
    /// Renamed files
    pub renamed: String,
    /// Added, modified and renamed files
    pub added_modified: String,
}

impl ComputedOutputs {
    /// Validate and render `groups` in `format`
    pub fn compute(groups: &FileGroups, format: OutputFormat) -> Result<Self> {
        ensure_encodable(&groups.all, format)?;

        Ok(Self {
            all: render_group(&groups.all, format),
            added: render_group(&groups.added, format),
            modified: render_group(&groups.modified, format),
            removed: render_group(&groups.removed, format),
            renamed: render_group(&groups.renamed, format),
            added_modified: render_group(&groups.added_modified, format),
        })
    }

    /// `(name, value)` pairs in [`OUTPUT_NAMES`] order, including the `deleted` alias
    pub fn entries(&self) -> [(&'static str, &str); 7] {
        [
            (OUTPUT_NAMES[0], self.all.as_str()),
            (OUTPUT_NAMES[1], self.added.as_str()),
            (OUTPUT_NAMES[2], self.modified.as_str()),
            (OUTPUT_NAMES[3], self.removed.as_str()),
            (OUTPUT_NAMES[4], self.renamed.as_str()),
            (OUTPUT_NAMES[5], self.added_modified.as_str()),
            (OUTPUT_NAMES[6], self.removed.as_str()),
        ]
    }

    /// Value of the output called `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }
}
