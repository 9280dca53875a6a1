use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    errors::TrackerResult,
    tracker::{client::ClientRecord, spend::SpendRecord},
};

use super::TrackerSource;

const CLIENTS_FILE: &str = "clients.json";
const SPEND_DIR: &str = "spend";
const TMP_SUFFIX: &str = "tmp";

/// Reads the tracker feeds from a directory of JSON exports:
/// `clients.json` plus one `spend/<code>.json` per client.
#[derive(Debug, Clone)]
pub struct JsonSource {
    root: PathBuf,
}

impl JsonSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn clients_path(&self) -> PathBuf {
        self.root.join(CLIENTS_FILE)
    }

    pub fn spend_path(&self, client_code: &str) -> PathBuf {
        self.root
            .join(SPEND_DIR)
            .join(format!("{}.json", canonical_code(client_code)))
    }

    pub fn write_clients(&self, clients: &[ClientRecord]) -> TrackerResult<()> {
        write_json(&self.clients_path(), &serde_json::to_string_pretty(clients)?)
    }

    pub fn write_spend(&self, client_code: &str, records: &[SpendRecord]) -> TrackerResult<()> {
        write_json(
            &self.spend_path(client_code),
            &serde_json::to_string_pretty(records)?,
        )
    }
}

impl TrackerSource for JsonSource {
    fn load_clients(&self) -> TrackerResult<Vec<ClientRecord>> {
        let data = fs::read_to_string(self.clients_path())?;
        Ok(serde_json::from_str(&data)?)
    }

    /// A client without a spend export simply has no records yet.
    fn load_spend(&self, client_code: &str) -> TrackerResult<Vec<SpendRecord>> {
        let path = self.spend_path(client_code);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

/// File stem for a client code. ASCII letters, digits and `-` pass through;
/// every other byte, `_` included, becomes `_xx` (lowercase hex), so distinct
/// codes never share a file and none can leave the spend directory.
fn canonical_code(code: &str) -> String {
    let mut stem = String::with_capacity(code.len());
    for byte in code.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("_{byte:02x}"));
        }
    }
    stem
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    tmp.set_extension(format!("json.{}", TMP_SUFFIX));
    tmp
}

fn write_json(path: &Path, data: &str) -> TrackerResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}
