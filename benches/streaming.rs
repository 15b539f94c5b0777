//! Benchmarks for streaming performance.
//!
//! Measures chunked copier throughput for different buffer sizes, both into a
//! counting sink and through the bounded body channel used by the server.

use async_trait::async_trait;
use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use homestream::streaming::{copy_window, ByteWindow, ChunkSink};
use homestream::streaming::copier::SinkClosed;
use std::io::Cursor;
use tokio::sync::mpsc;

const WINDOW_SIZE: usize = 4 * 1024 * 1024;

/// Sink that only counts bytes.
struct CountingSink(u64);

#[async_trait]
impl ChunkSink for CountingSink {
    async fn send_chunk(&mut self, chunk: Bytes) -> Result<(), SinkClosed> {
        self.0 += chunk.len() as u64;
        Ok(())
    }

    async fn abort(&mut self, _error: std::io::Error) {}
}

/// Copy loop cost alone, per chunk size.
fn bench_copy_window(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("copy_window");
    let data = vec![7u8; WINDOW_SIZE];
    let window = ByteWindow {
        start: 0,
        end: WINDOW_SIZE as u64 - 1,
    };

    group.throughput(Throughput::Bytes(WINDOW_SIZE as u64));
    for chunk_size in [1024, 8192, 64 * 1024, 256 * 1024] {
        group.bench_function(format!("counting_sink_{}", chunk_size), |b| {
            b.iter(|| {
                rt.block_on(async {
                    let mut reader = Cursor::new(data.as_slice());
                    let mut sink = CountingSink(0);
                    let sent = copy_window(&mut reader, &mut sink, window, chunk_size)
                        .await
                        .unwrap();
                    black_box(sent)
                })
            });
        });
    }

    group.finish();
}

/// Copy loop plus channel hand-off, as the stream handler runs it.
fn bench_channel_body(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("channel_body");
    let data = Bytes::from(vec![7u8; WINDOW_SIZE]);
    let window = ByteWindow {
        start: 0,
        end: WINDOW_SIZE as u64 - 1,
    };

    group.throughput(Throughput::Bytes(WINDOW_SIZE as u64));
    for chunk_size in [8192, 64 * 1024] {
        group.bench_function(format!("mpsc_{}", chunk_size), |b| {
            b.iter(|| {
                rt.block_on(async {
                    let (mut tx, mut rx) = mpsc::channel::<std::io::Result<Bytes>>(4);
                    let source = data.clone();
                    let copier = tokio::spawn(async move {
                        let mut reader = Cursor::new(source);
                        copy_window(&mut reader, &mut tx, window, chunk_size).await
                    });

                    let mut received = 0usize;
                    while let Some(chunk) = rx.recv().await {
                        received += chunk.unwrap().len();
                    }
                    copier.await.unwrap().unwrap();
                    black_box(received)
                })
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_copy_window, bench_channel_body);
criterion_main!(benches);
