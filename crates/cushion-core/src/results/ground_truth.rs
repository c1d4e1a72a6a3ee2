use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Header marker in the first column of the results file.
const HEADER_FIELD: &str = "file";

/// Expected hit counts per video, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroundTruth {
    entries: Vec<(String, u32)>,
}

impl GroundTruth {
    /// Load `file,count` lines from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
        let reader = BufReader::new(file);

        let mut truth = GroundTruth::default();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line
                .with_context(|| format!("Failed to read line {} from {:?}", line_num + 1, path))?;
            truth.parse_line(&line, line_num + 1)?;
        }

        tracing::info!("Loaded {} ground truth entries from {:?}", truth.len(), path);
        Ok(truth)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut truth = GroundTruth::default();
        for (line_num, line) in text.lines().enumerate() {
            truth.parse_line(line, line_num + 1)?;
        }
        Ok(truth)
    }

    fn parse_line(&mut self, line: &str, line_num: usize) -> Result<()> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }

        let fields: Vec<&str> = line.split(',').map(|s| s.trim()).collect();
        if fields[0] == HEADER_FIELD {
            return Ok(());
        }

        if fields.len() < 2 {
            tracing::warn!(
                "Invalid line format at line {}: '{}' (expected file,count)",
                line_num,
                line
            );
            return Ok(());
        }

        // hit counts cannot be negative; a negative value is a malformed row
        let count = fields[1].parse::<u32>().with_context(|| {
            format!("Invalid hit count at line {}: '{}'", line_num, fields[1])
        })?;

        self.insert(fields[0].to_string(), count);
        Ok(())
    }

    /// Insert or overwrite an entry; an overwritten entry keeps its position.
    pub fn insert(&mut self, file: String, count: u32) {
        match self.entries.iter_mut().find(|(name, _)| *name == file) {
            Some(entry) => {
                tracing::warn!("Duplicate ground truth entry for '{}', keeping last", file);
                entry.1 = count;
            }
            None => self.entries.push((file, count)),
        }
    }

    pub fn get(&self, file: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(name, _)| name == file)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
