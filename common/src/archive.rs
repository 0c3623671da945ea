//! ZIPアーカイブ生成

use crate::error::Result;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// アーカイブ内の1ファイル
#[derive(Debug, Clone, Copy)]
pub struct ArchiveEntry<'a> {
    pub name: &'a str,
    pub bytes: &'a [u8],
}

impl<'a> ArchiveEntry<'a> {
    pub fn new(name: &'a str, bytes: &'a [u8]) -> Self {
        Self { name, bytes }
    }
}

/// 名前付きバイト列からZIPを作る
pub fn create_archive(entries: &[ArchiveEntry<'_>]) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .compression_level(Some(6));

    for entry in entries {
        zip.start_file(entry.name, options)?;
        zip.write_all(entry.bytes)?;
    }
    zip.finish()?;

    Ok(buffer.into_inner())
}

/// 1ファイルだけのZIP（行ごとの "ZIP" ダウンロード）
pub fn single_file_archive(name: &str, bytes: &[u8]) -> Result<Vec<u8>> {
    create_archive(&[ArchiveEntry::new(name, bytes)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn test_single_file_archive() {
        let json = br#"{"name": "Panchroma PLA", "nozzle_temperature": ["220"]}"#;
        let bytes = single_file_archive("Panchroma PLA - Orca Slicer.json", json).unwrap();
        assert_eq!(&bytes[0..2], b"PK");

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 1);
        let mut file = archive.by_name("Panchroma PLA - Orca Slicer.json").unwrap();
        let mut content = Vec::new();
        file.read_to_end(&mut content).unwrap();
        assert_eq!(content, json);
    }

    #[test]
    fn test_multiple_entries_keep_order() {
        let bytes = create_archive(&[
            ArchiveEntry::new("a.json", b"{}"),
            ArchiveEntry::new("b.json", b"[]"),
        ])
        .unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.by_index(0).unwrap().name(), "a.json");
        assert_eq!(archive.by_index(1).unwrap().name(), "b.json");
    }

    #[test]
    fn test_empty_archive_is_valid() {
        let bytes = create_archive(&[]).unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert!(archive.is_empty());
    }
}
