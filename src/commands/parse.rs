use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tripcal_core::config::TripcalConfig;
use tripcal_core::parse_response;

pub fn run(file: &Path, destination: &str, output_dir: Option<PathBuf>) -> Result<()> {
    let output_dir = match output_dir {
        Some(dir) => dir,
        None => TripcalConfig::load()?.output_path(),
    };

    parse_file(file, destination, &output_dir)?;
    Ok(())
}

fn parse_file(file: &Path, destination: &str, output_dir: &Path) -> Result<PathBuf> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Could not read {}", file.display()))?;
    let result = parse_response(&raw)?;

    super::show_result(destination, &result, output_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripcal_core::provider::SAMPLE_RESPONSE;

    #[test]
    fn test_parse_saved_response() {
        let dir = tempfile::tempdir().unwrap();
        let raw_path = dir.path().join("raw.txt");
        std::fs::write(&raw_path, SAMPLE_RESPONSE).unwrap();

        let path = parse_file(&raw_path, "Kyoto", &dir.path().join("out")).unwrap();

        assert_eq!(path.file_name().unwrap(), "trip-to-Kyoto.ics");
        let ics = std::fs::read_to_string(path).unwrap();
        assert!(ics.starts_with("BEGIN:VCALENDAR"));
        assert!(ics.ends_with("END:VCALENDAR"));
    }

    #[test]
    fn test_parse_rejects_unmarked_file() {
        let dir = tempfile::tempdir().unwrap();
        let raw_path = dir.path().join("raw.txt");
        std::fs::write(&raw_path, "===TRIP_PREVIEW===only one marker").unwrap();

        let err = parse_file(&raw_path, "Kyoto", dir.path()).unwrap_err();

        assert_eq!(err.to_string(), "AI response format error: missing CALENDAR_ICS");
        assert!(!dir.path().join("trip-to-Kyoto.ics").exists());
    }

    #[test]
    fn test_parse_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_file(&dir.path().join("nope.txt"), "Kyoto", dir.path()).unwrap_err();
        assert!(err.to_string().starts_with("Could not read"));
    }
}
