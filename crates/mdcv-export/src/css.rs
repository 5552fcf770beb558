//! Stylesheet compilation.
//!
//! Runs the configured build command (the Tailwind CLI by default) and
//! reads the compiled stylesheet back for embedding.

use std::process::Command;

use mdcv_config::CssConfig;

use crate::error::ExportError;

/// Run the CSS build command and return the compiled stylesheet.
///
/// The command template has its `{input}`/`{output}` placeholders
/// substituted before being split on whitespace, so neither path may
/// contain spaces.
///
/// # Errors
///
/// Returns `ExportError::CssBuild` if the command cannot be spawned,
/// exits non-zero, or does not produce the configured output file.
pub fn build_stylesheet(css: &CssConfig) -> Result<String, ExportError> {
    let command = css.resolved_command();
    tracing::info!(command = %command, "Building stylesheet");

    let mut parts = command.split_whitespace();
    let Some(program) = parts.next() else {
        return Err(ExportError::CssBuild(
            "css.build_command is empty".to_string(),
        ));
    };

    if let Some(out_dir) = css.output.parent() {
        std::fs::create_dir_all(out_dir)
            .map_err(|e| ExportError::CssBuild(format!("cannot create output directory: {e}")))?;
    }

    let output = Command::new(program).args(parts).output().map_err(|e| {
        ExportError::CssBuild(format!(
            "failed to run `{program}`: {e} (is the Tailwind CLI installed?)"
        ))
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ExportError::CssBuild(format!(
            "`{command}` exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    std::fs::read_to_string(&css.output).map_err(|e| {
        ExportError::CssBuild(format!(
            "build command succeeded but {} is unreadable: {e}",
            css.output.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn css_config(input: PathBuf, output: PathBuf, build_command: &str) -> CssConfig {
        CssConfig {
            input,
            output,
            build_command: build_command.to_string(),
        }
    }

    #[test]
    fn test_build_reads_compiled_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("styles.css");
        let output = dir.path().join("dist/output.css");
        std::fs::write(&input, "body { margin: 0; }").unwrap();

        // cp stands in for the Tailwind CLI
        let css = css_config(input, output, "cp {input} {output}");
        let compiled = build_stylesheet(&css).unwrap();

        assert_eq!(compiled, "body { margin: 0; }");
    }

    #[test]
    fn test_build_command_nonzero_exit() {
        let dir = tempfile::tempdir().unwrap();
        let css = css_config(
            dir.path().join("styles.css"),
            dir.path().join("output.css"),
            "false",
        );

        let err = build_stylesheet(&css).unwrap_err();
        assert!(matches!(err, ExportError::CssBuild(_)));
        assert!(err.to_string().contains("exited with"));
    }

    #[test]
    fn test_build_command_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let css = css_config(
            dir.path().join("styles.css"),
            dir.path().join("output.css"),
            "mdcv-no-such-program {input} {output}",
        );

        let err = build_stylesheet(&css).unwrap_err();
        assert!(err.to_string().contains("is the Tailwind CLI installed?"));
    }

    #[test]
    fn test_build_command_produces_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let css = css_config(
            dir.path().join("styles.css"),
            dir.path().join("output.css"),
            "true",
        );

        let err = build_stylesheet(&css).unwrap_err();
        assert!(err.to_string().contains("unreadable"));
    }
}
