// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the docscan-document crate.
// Measures page assembly for a short multi-page scan.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use docscan_core::{PageImage, PixelFormat};
use docscan_document::PageAssembler;

/// Assemble three 600x800 RGB pages, roughly a phone scan at reduced size.
fn bench_assemble_three_pages(c: &mut Criterion) {
    let (width, height) = (600u32, 800u32);
    let pages: Vec<PageImage> = (0..3u8)
        .map(|i| {
            let shade = 40 + i * 80;
            PageImage::new(
                width,
                height,
                PixelFormat::Rgb8,
                vec![shade; (width * height * 3) as usize],
            )
        })
        .collect();
    let assembler = PageAssembler::default();

    c.bench_function("assemble (3 x 600x800)", |b| {
        b.iter(|| {
            let artifact = assembler.assemble(black_box(&pages)).expect("assemble");
            black_box(artifact.page_count());
        });
    });
}

criterion_group!(benches, bench_assemble_three_pages);
criterion_main!(benches);
