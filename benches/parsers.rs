//! Benchmarks for the format parsers.
//!
//! Measures parse throughput for each text format at several deck sizes, and
//! whole-package extraction for Anki packages.

// Criterion macros generate items without docs - this is expected for benchmarks
#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use deckport::io::FlashcardSource;
use deckport::io::formats::apkg::ApkgSource;
use deckport::io::formats::csv::CsvSource;
use deckport::io::formats::json::JsonSource;
use deckport::io::formats::markdown::MarkdownSource;
use rusqlite::{Connection, params};
use std::hint::black_box;
use std::io::{Cursor, Write};
use std::time::Duration;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const SIZES: [usize; 3] = [10, 100, 1000];

fn csv_deck(n: usize) -> String {
    (0..n)
        .map(|i| format!("term {i}, definition number {i}, with a comma"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn json_deck(n: usize) -> String {
    let cards: Vec<_> = (0..n)
        .map(|i| serde_json::json!({ "term": format!("term {i}"), "definition": format!("definition {i}") }))
        .collect();
    serde_json::to_string(&cards).unwrap()
}

fn markdown_deck(n: usize) -> String {
    (0..n)
        .map(|i| format!("- term {i}\n- definition {i}"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn apkg_deck(n: usize) -> String {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("collection.anki2");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE notes (id INTEGER PRIMARY KEY, flds TEXT NOT NULL)")
        .unwrap();
    for i in 0..n {
        conn.execute(
            "INSERT INTO notes (flds) VALUES (?1)",
            params![format!("term {i}\u{1f}definition {i}")],
        )
        .unwrap();
    }
    conn.close().unwrap();
    let collection = std::fs::read(&path).unwrap();

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("collection.anki2", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(&collection).unwrap();
    STANDARD.encode(writer.finish().unwrap().into_inner())
}

fn bench_text_parsers(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_parsers");
    group.measurement_time(Duration::from_secs(5));

    for size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        let csv = csv_deck(size);
        group.bench_with_input(BenchmarkId::new("csv", size), &csv, |b, content| {
            b.iter(|| CsvSource::new().parse(black_box(content)).unwrap());
        });

        let json = json_deck(size);
        group.bench_with_input(BenchmarkId::new("json", size), &json, |b, content| {
            b.iter(|| JsonSource::new().parse(black_box(content)).unwrap());
        });

        let markdown = markdown_deck(size);
        group.bench_with_input(BenchmarkId::new("markdown", size), &markdown, |b, content| {
            b.iter(|| MarkdownSource::new().parse(black_box(content)).unwrap());
        });
    }

    group.finish();
}

fn bench_apkg(c: &mut Criterion) {
    let mut group = c.benchmark_group("apkg");
    group.sample_size(20);
    let source = ApkgSource::new();

    for size in SIZES {
        group.throughput(Throughput::Elements(size as u64));
        let package = apkg_deck(size);
        group.bench_with_input(BenchmarkId::new("extract", size), &package, |b, content| {
            b.iter(|| source.parse(black_box(content)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_text_parsers, bench_apkg);
criterion_main!(benches);
