use crate::utils::error::{PersistError, Result};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::ZipArchive;

/// Name of the Lua table file inside every .miz archive.
const MISSION_ENTRY: &str = "mission";

/// Last second of the 24h mission clock.
pub const MAX_MISSION_TIME: u32 = 86_399;

/// A .miz mission archive on disk. A .miz is a plain zip; everything this
/// tool edits lives in its `mission` entry.
pub struct MizArchive {
    path: PathBuf,
}

impl MizArchive {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(PersistError::MissionError {
                message: format!("MIZ file not found: {}", path.display()),
            });
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the `mission` entry as text. Mission files occasionally carry
    /// stray non-UTF8 bytes; they are replaced rather than rejected.
    pub fn read_mission(&self) -> Result<String> {
        let file = File::open(&self.path)?;
        let mut archive = ZipArchive::new(BufReader::new(file))?;
        let mut entry = archive.by_name(MISSION_ENTRY).map_err(|_| {
            PersistError::MissionError {
                message: format!("'{}' entry missing from {}", MISSION_ENTRY, self.path.display()),
            }
        })?;

        let mut raw = Vec::new();
        entry.read_to_end(&mut raw)?;
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }

    /// Rewrite the archive with a new `mission` entry, preserving every
    /// other entry byte-for-byte. The archive is rebuilt in memory and
    /// swapped in with a rename so a failed run never leaves a truncated
    /// .miz behind.
    pub fn write_mission(&self, new_text: &str) -> Result<()> {
        let file = File::open(&self.path)?;
        let mut archive = ZipArchive::new(BufReader::new(file))?;

        let mut writer = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        for i in 0..archive.len() {
            let entry = archive.by_index(i)?;
            if entry.name() == MISSION_ENTRY {
                continue;
            }
            writer.raw_copy_file(entry)?;
        }

        writer.start_file(MISSION_ENTRY, SimpleFileOptions::default())?;
        writer.write_all(new_text.as_bytes())?;
        let rebuilt = writer.finish()?.into_inner();

        let tmp_path = self.path.with_extension("miz.tmp");
        std::fs::write(&tmp_path, rebuilt)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

/// Last `["start_time"] = N,` value in the mission text. Mission files often
/// contain several; only the last one is authoritative.
pub fn last_start_time(text: &str) -> Option<u32> {
    let mut last_value = None;
    for line in text.lines() {
        if line.contains("\"start_time\"") {
            let parsed = line
                .trim()
                .split('=')
                .nth(1)
                .and_then(|rhs| rhs.split(',').next())
                .and_then(|num| num.trim().parse::<u32>().ok());
            if let Some(value) = parsed {
                last_value = Some(value);
            }
        }
    }
    last_value
}

/// Replace only the last `start_time` occurrence with the given value.
pub fn replace_last_start_time(text: &str, new_value: u32) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();
    let last_index = lines
        .iter()
        .rposition(|line| line.contains("\"start_time\""))?;

    let mut updated: Vec<String> = lines.iter().map(|s| (*s).to_string()).collect();
    updated[last_index] = format!("\t[\"start_time\"] = {},", new_value);
    Some(updated.join("\n"))
}

/// Advance a mission start time, wrapping at the end of the day.
pub fn advance_start_time(current: u32, seconds_to_add: u32) -> u32 {
    (current + seconds_to_add) % (MAX_MISSION_TIME + 1)
}
