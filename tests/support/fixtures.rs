//! Fixtures: range-aware mock responders, manifest bodies and zip builders.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use wiremock::{Request, Respond, ResponseTemplate};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Deterministic, non-repeating-ish payload of `len` bytes.
pub fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| u8::try_from((i * 31 + 7) % 251).unwrap_or(0)).collect()
}

/// Serves `content`, honouring `Range: bytes=<start>-<end>` with a 206.
///
/// `end` is treated as exclusive, matching what the transfer engine asks for.
pub struct RangeResponder {
    pub content: Vec<u8>,
}

impl Respond for RangeResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let range = request
            .headers
            .get("range")
            .and_then(|value| value.to_str().ok())
            .and_then(parse_range);
        match range {
            Some((start, end)) if start <= end && end <= self.content.len() => {
                ResponseTemplate::new(206).set_body_bytes(self.content[start..end].to_vec())
            }
            Some(_) => ResponseTemplate::new(416),
            None => ResponseTemplate::new(200).set_body_bytes(self.content.clone()),
        }
    }
}

fn parse_range(value: &str) -> Option<(usize, usize)> {
    let (start, end) = value.strip_prefix("bytes=")?.split_once('-')?;
    Some((start.parse().ok()?, end.parse().ok()?))
}

/// JSON manifest body with one `(entry, [(name, url, size)])` per entry.
pub fn manifest_json(entries: &[(&str, Vec<(&str, String, usize)>)]) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for (entry, files) in entries {
        let files: Vec<serde_json::Value> = files
            .iter()
            .map(|(name, url, size)| serde_json::json!({"name": name, "url": url, "size": size}))
            .collect();
        map.insert((*entry).to_string(), serde_json::Value::Array(files));
    }
    serde_json::Value::Object(map)
}

/// Writes a zip at `path` containing the given member names.
///
/// Names ending in `/` become directory entries; others get a small body.
pub fn write_zip(path: &Path, members: &[&str]) {
    let file = File::create(path).expect("create zip file");
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for member in members {
        if let Some(dir) = member.strip_suffix('/') {
            writer.add_directory(dir, options).expect("add directory");
        } else {
            writer.start_file(*member, options).expect("start file");
            writer.write_all(b"contents").expect("write member");
        }
    }
    writer.finish().expect("finish zip");
}

/// Members of a correctly packaged entry named `stem`.
pub fn valid_members(stem: &str) -> Vec<String> {
    vec![
        format!("{stem}/"),
        format!("{stem}/run_game.py"),
        format!("{stem}/requirements.txt"),
        format!("{stem}/README.md"),
        format!("{stem}/data/"),
        format!("{stem}/data/sprite.png"),
    ]
}
