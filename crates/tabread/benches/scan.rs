// Dweve Tabread - Tabular data file reader
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Scan throughput over generated in-memory tables.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tabread::{Delimiter, Exclusion, MemorySource, ReaderConfig, TabularReader};

const COLUMNS: usize = 20;

fn generate_table(rows: usize) -> String {
    let mut out = (1..=COLUMNS)
        .map(|c| format!("var{}", c))
        .collect::<Vec<_>>()
        .join("\t");
    out.push('\n');
    for row in 0..rows {
        let line = (0..COLUMNS)
            .map(|c| format!("{:.3}", (row * COLUMNS + c) as f64 * 0.173))
            .collect::<Vec<_>>()
            .join("\t");
        out.push_str(&line);
        out.push('\n');
        if row % 100 == 0 {
            out.push_str("# checkpoint\n");
        }
    }
    out
}

fn bench_probe(c: &mut Criterion) {
    let mut group = c.benchmark_group("probe");

    for rows in [1_000, 10_000] {
        let input = generate_table(rows);
        let config = ReaderConfig::new(Delimiter::Tab).with_comment_marker("#");
        let reader = TabularReader::new(MemorySource::from(input.as_str()), config);

        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("count_rows", rows), &reader, |b, reader| {
            b.iter(|| black_box(reader.count_rows().unwrap()))
        });
    }

    group.finish();
}

fn bench_read_continuous(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_continuous");

    for rows in [1_000, 10_000] {
        let input = generate_table(rows);
        let config = ReaderConfig::new(Delimiter::Tab).with_comment_marker("#");
        let reader = TabularReader::new(MemorySource::from(input.as_str()), config);

        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &reader, |b, reader| {
            b.iter(|| black_box(reader.read_continuous(&Exclusion::None).unwrap()))
        });
    }

    group.finish();
}

fn bench_whitespace(c: &mut Criterion) {
    let input = generate_table(5_000).replace('\t', "   ");
    let config = ReaderConfig::new(Delimiter::Whitespace).with_comment_marker("#");
    let reader = TabularReader::new(MemorySource::from(input.as_str()), config);

    let mut group = c.benchmark_group("whitespace");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("read_continuous", |b| {
        b.iter(|| black_box(reader.read_continuous(&Exclusion::None).unwrap()))
    });
    group.finish();
}

criterion_group!(benches, bench_probe, bench_read_continuous, bench_whitespace);
criterion_main!(benches);
