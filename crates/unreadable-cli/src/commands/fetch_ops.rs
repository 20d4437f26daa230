use std::fs;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;
use unreadable_core::settings::{Channel, FetchSettings};

use crate::project::Project;

/// Path of the English language file inside the client JAR.
pub const EN_US_ENTRY: &str = "assets/minecraft/lang/en_us.json";

/// Where the fetched version id is recorded, relative to the project root.
pub const VERSION_FILE: &str = "version.txt";

const JAR_LIMIT: u64 = 200 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Deserialize)]
pub struct VersionManifest {
    pub latest: Latest,
    pub versions: Vec<VersionEntry>,
}

#[derive(Debug, Deserialize)]
pub struct Latest {
    pub release: String,
    pub snapshot: String,
}

#[derive(Debug, Deserialize)]
pub struct VersionEntry {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct ClientManifest {
    downloads: Downloads,
}

#[derive(Debug, Deserialize)]
struct Downloads {
    client: Download,
}

#[derive(Debug, Deserialize)]
struct Download {
    url: String,
}

impl VersionManifest {
    /// Latest version id of `channel` and the URL of its client manifest.
    pub fn resolve(&self, channel: Channel) -> Result<(&str, &str), FetchError> {
        let id = match channel {
            Channel::Release => &self.latest.release,
            Channel::Snapshot => &self.latest.snapshot,
        };
        self.versions
            .iter()
            .find(|v| &v.id == id)
            .map(|v| (v.id.as_str(), v.url.as_str()))
            .ok_or_else(|| FetchError::Parse(format!("version {id} missing from manifest")))
    }
}

pub fn parse_manifest(json: &str) -> Result<VersionManifest, FetchError> {
    serde_json::from_str(json).map_err(|e| FetchError::Parse(format!("version manifest: {e}")))
}

fn parse_client_url(json: &str) -> Result<String, FetchError> {
    let manifest: ClientManifest = serde_json::from_str(json)
        .map_err(|e| FetchError::Parse(format!("client manifest: {e}")))?;
    Ok(manifest.downloads.client.url)
}

/// Read the English language file out of a client JAR.
pub fn extract_en_us(jar: &[u8]) -> Result<Vec<u8>, FetchError> {
    extract_entry(jar, EN_US_ENTRY, JAR_LIMIT)
}

/// Decompress one entry, refusing more than `limit` bytes whatever size the
/// entry header declares.
fn extract_entry(jar: &[u8], name: &str, limit: u64) -> Result<Vec<u8>, FetchError> {
    let zip_err = |e: zip::result::ZipError| FetchError::Parse(format!("client.jar: {e}"));
    let mut archive = zip::ZipArchive::new(Cursor::new(jar)).map_err(zip_err)?;
    let entry = archive.by_name(name).map_err(zip_err)?;
    let mut bytes = Vec::new();
    entry.take(limit + 1).read_to_end(&mut bytes)?;
    if bytes.len() as u64 > limit {
        return Err(FetchError::Parse(format!(
            "client.jar: {name} exceeds {limit} bytes"
        )));
    }
    Ok(bytes)
}

struct Client {
    agent: ureq::Agent,
}

impl Client {
    fn new(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }

    fn get_string(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "GET");
        self.agent
            .get(url)
            .call()
            .map_err(|e| FetchError::Http(format!("{url}: {e}")))?
            .into_body()
            .read_to_string()
            .map_err(|e| FetchError::Http(format!("{url}: {e}")))
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!(url, "GET");
        self.agent
            .get(url)
            .call()
            .map_err(|e| FetchError::Http(format!("{url}: {e}")))?
            .into_body()
            .with_config()
            .limit(JAR_LIMIT)
            .read_to_vec()
            .map_err(|e| FetchError::Http(format!("{url}: {e}")))
    }
}

/// Download the latest client of the configured channel and store its
/// English language file under `source_dir`. Returns the version id.
pub fn fetch_source(
    settings: &FetchSettings,
    source_dir: &Path,
    version_file: &Path,
) -> Result<String, FetchError> {
    let client = Client::new(Duration::from_secs(settings.timeout_secs));

    eprintln!("Fetching version manifest...");
    let manifest = parse_manifest(&client.get_string(&settings.manifest_url)?)?;
    let (version, client_manifest_url) = manifest.resolve(settings.channel)?;
    eprintln!("Latest {:?}: {version}", settings.channel);

    let client_url = parse_client_url(&client.get_string(client_manifest_url)?)?;
    eprintln!("Downloading client.jar...");
    let jar = client.get_bytes(&client_url)?;

    eprintln!("Extracting {EN_US_ENTRY}...");
    let en_us = extract_en_us(&jar)?;
    fs::create_dir_all(source_dir)?;
    fs::write(source_dir.join("en_us.json"), en_us)?;
    fs::write(version_file, version)?;
    Ok(version.to_string())
}

pub fn fetch(project: &Project) {
    let source_dir: PathBuf = project.settings.source_dir(&project.root);
    let version = die!(
        fetch_source(
            &project.settings.fetch,
            &source_dir,
            &project.root.join(VERSION_FILE),
        ),
        "Error fetching language file: {}"
    );
    eprintln!("Done: en_us.json from {version}");
}
