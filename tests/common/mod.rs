//! Shared fixtures for integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rusqlite::{Connection, params};
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Unit separator between Anki note fields.
pub const SEP: char = '\u{1f}';

/// Builds an Anki collection database with one note per `flds` value.
pub fn collection(flds: &[String]) -> Vec<u8> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("collection.anki2");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE col (id INTEGER PRIMARY KEY, models TEXT);
         CREATE TABLE notes (id INTEGER PRIMARY KEY, guid TEXT, mid INTEGER, flds TEXT NOT NULL);",
    )
    .unwrap();
    for (i, value) in flds.iter().enumerate() {
        conn.execute(
            "INSERT INTO notes (guid, mid, flds) VALUES (?1, 1, ?2)",
            params![format!("guid-{i}"), value],
        )
        .unwrap();
    }
    conn.close().unwrap();
    std::fs::read(&path).unwrap()
}

/// Zips entries into an archive.
pub fn archive(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, data) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Builds a base64-encoded `.apkg` from (front, back) pairs.
pub fn apkg(cards: &[(&str, &str)]) -> String {
    let flds: Vec<String> = cards
        .iter()
        .map(|(front, back)| format!("{front}{SEP}{back}"))
        .collect();
    STANDARD.encode(archive(&[
        ("collection.anki2", collection(&flds)),
        ("media", b"{}".to_vec()),
    ]))
}
