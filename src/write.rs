use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::types::DeploymentRegistry;

const JSON_FILE: &str = "deployments.json";
const TS_FILE: &str = "deployments.ts";

/// Writes `deployments.json` and `deployments.ts` into `folder`.
pub fn write(
    folder: &Path,
    registry: &DeploymentRegistry,
) -> Result<(PathBuf, PathBuf), std::io::Error> {
    if !folder.exists() {
        fs::create_dir_all(folder)?;
    }

    let json_path = folder.join(JSON_FILE);
    let file = File::create(&json_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, registry)?;
    writeln!(writer)?;
    writer.flush()?;

    let ts_path = folder.join(TS_FILE);
    let file = File::create(&ts_path)?;
    let mut writer = BufWriter::new(file);
    write!(writer, "export const deployments = ")?;
    serde_json::to_writer_pretty(&mut writer, registry)?;
    writeln!(writer, " as const;")?;
    writer.flush()?;

    Ok((json_path, ts_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{chains::SupportedChain, contracts::DesiredContract, types::Address};

    fn registry() -> DeploymentRegistry {
        let mut registry = DeploymentRegistry::default();
        registry.insert(
            DesiredContract::Witness,
            SupportedChain::Goerli,
            Address::parse("0xabcdef0123456789abcdef0123456789abcdef01").unwrap(),
        );
        registry
    }

    #[test]
    fn test_write_creates_folder_and_files() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("generated");

        let (json_path, ts_path) = write(&target, &registry()).unwrap();

        let json = fs::read_to_string(json_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value["Witness"]["5"],
            "0xabcdef0123456789abcdef0123456789abcdef01"
        );

        let ts = fs::read_to_string(ts_path).unwrap();
        assert!(ts.starts_with("export const deployments = {"));
        assert!(ts.ends_with("} as const;\n"));
        assert!(ts.contains("\"5\": \"0xabcdef0123456789abcdef0123456789abcdef01\""));
    }

    #[test]
    fn test_write_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();

        let (json_path, ts_path) = write(dir.path(), &registry()).unwrap();
        let first = (
            fs::read(&json_path).unwrap(),
            fs::read(&ts_path).unwrap(),
        );

        write(dir.path(), &registry()).unwrap();
        let second = (fs::read(json_path).unwrap(), fs::read(ts_path).unwrap());

        assert_eq!(first, second);
    }
}
