//! Version command implementation.

use serde::Serialize;

use crate::Result;
use crate::format::print_json;

#[derive(Serialize)]
struct VersionOutput<'a> {
    version: &'a str,
    build: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    features: Vec<&'a str>,
}

fn version_output() -> VersionOutput<'static> {
    let build = if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    };

    VersionOutput {
        version: env!("CARGO_PKG_VERSION"),
        build,
        features: vec!["schema"],
    }
}

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<()> {
    let output = version_output();
    if json {
        return print_json(&output);
    }

    println!("ib {} ({})", output.version, output.build);
    if !output.features.is_empty() {
        println!("Features: {}", output.features.join(", "));
    }
    Ok(())
}
