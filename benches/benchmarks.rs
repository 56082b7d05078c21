use book_catalog::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::io::Write;
use tempfile::NamedTempFile;

const CURRENCIES: [&str; 3] = ["USD", "EUR", "YEN"];

fn write_catalog(records: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for i in 0..records {
        writeln!(
            file,
            "Title {},Author {},{}.{:02},{}",
            i,
            i % 97,
            i % 500,
            i % 100,
            CURRENCIES[i % 3]
        )
        .unwrap();
    }
    file.flush().unwrap();
    file
}

fn benchmark_stream_catalog(c: &mut Criterion) {
    let file = write_catalog(10_000);

    c.bench_function("stream_catalog_10000", |b| {
        let mut books = BookIterator::from_path(file.path());
        b.iter(|| {
            books.start_iteration().unwrap();
            let mut count = 0;
            while let Some(book) = books.next_book().unwrap() {
                black_box(book);
                count += 1;
            }
            count
        });
    });
}

fn benchmark_total_catalog(c: &mut Criterion) {
    let file = write_catalog(10_000);

    c.bench_function("total_catalog_10000", |b| {
        b.iter(|| {
            let mut total = Price::zero(Currency::USD);
            for book in BookIterator::from_path(file.path()) {
                total = total.add(&book.unwrap().price()).unwrap();
            }
            black_box(total)
        });
    });
}

fn benchmark_price_arithmetic(c: &mut Criterion) {
    let usd = Price::parse("10.99", "USD").unwrap();
    let eur = Price::parse("8.50", "EUR").unwrap();

    c.bench_function("price_add_cross_currency_1000", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                let _ = black_box(usd.add(black_box(&eur)));
            }
        });
    });
}

criterion_group!(
    benches,
    benchmark_stream_catalog,
    benchmark_total_catalog,
    benchmark_price_arithmetic
);
criterion_main!(benches);
