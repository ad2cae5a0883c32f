use std::fs;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use folder_merge::merge::{DEFAULT_EXCLUDE_MARKER, extract_identifier, scan_folders};

fn bench_extract_identifier(c: &mut Criterion) {
    let names = [
        "ABC-1 Widgets",
        "p-100 blue chair renders",
        "SKU4242",
        "  leading whitespace name",
        "äö-7 Stuhl Eiche",
    ];
    c.bench_function("extract_identifier", |b| {
        b.iter(|| {
            for name in &names {
                black_box(extract_identifier(black_box(name)));
            }
        });
    });
}

fn bench_scan_folders(c: &mut Criterion) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    for group in 0..20 {
        for item in 0..25 {
            let name = if item % 10 == 0 {
                format!("-G{group}/ARCHIVE-{item} old")
            } else {
                format!("G{group}/P-{group}{item:02} Product {item}")
            };
            fs::create_dir_all(temp_dir.path().join(name)).expect("Failed to create directory");
        }
    }

    c.bench_function("scan_folders", |b| {
        b.iter(|| black_box(scan_folders(black_box(temp_dir.path()), DEFAULT_EXCLUDE_MARKER)));
    });
}

criterion_group!(benches, bench_extract_identifier, bench_scan_folders);
criterion_main!(benches);
