use std::io::Read;

pub mod branch;
pub mod expand;
pub mod notify;

pub type CmdResult<T> = sendoff::Result<(T, i32)>;

// ============================================================================
// JSON Input Parsing (CLI layer)
// ============================================================================

/// Read a JSON spec from string, file (@path), or stdin (-).
pub fn read_json_spec_to_string(spec: &str) -> sendoff::Result<String> {
    let trimmed = spec.trim();

    if trimmed == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }

    if let Some(path) = trimmed.strip_prefix('@') {
        let expanded = shellexpand::tilde(path).to_string();
        return Ok(std::fs::read_to_string(expanded)?);
    }

    Ok(spec.to_string())
}

/// Expand a leading `~` in a user-supplied path input.
pub fn expand_path(path: &str) -> String {
    shellexpand::tilde(path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_json_passes_through() {
        let spec = r#"{"to": "dev@example.com"}"#;
        assert_eq!(read_json_spec_to_string(spec).unwrap(), spec);
    }

    #[test]
    fn at_prefix_reads_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("spec.json");
        std::fs::write(&path, r#"{"subject": "Build"}"#).unwrap();

        let spec = format!("@{}", path.display());
        assert_eq!(
            read_json_spec_to_string(&spec).unwrap(),
            r#"{"subject": "Build"}"#
        );
    }

    #[test]
    fn missing_spec_file_is_an_error() {
        assert!(read_json_spec_to_string("@/nonexistent/spec.json").is_err());
    }
}
