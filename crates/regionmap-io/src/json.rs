//! JSON artifact support
//!
//! The metadata table is written compact; the children table is pretty
//! printed for hand inspection, matching the shipped artifact formats.

use crate::error::IoResult;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Write a value as compact JSON
pub fn write_json<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> IoResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer(BufWriter::new(file), value)?;
    Ok(())
}

/// Write a value as pretty-printed JSON
pub fn write_json_pretty<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> IoResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)?;
    Ok(())
}

/// Read a JSON file
pub fn read_json<P: AsRef<Path>, T: DeserializeOwned>(path: P) -> IoResult<T> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_json_roundtrip() {
        let mut map: BTreeMap<String, Vec<u32>> = BTreeMap::new();
        map.insert("3".to_string(), vec![0, 1, 5]);

        let path = std::env::temp_dir().join("regionmap_io_json_test.json");
        write_json_pretty(&path, &map).unwrap();
        let back: BTreeMap<String, Vec<u32>> = read_json(&path).unwrap();
        assert_eq!(back, map);
        std::fs::remove_file(&path).ok();
    }
}
