//! Concurrent use of one shared engine.

use std::sync::Arc;
use std::thread;

use vi_numwords::{DirectConverter, NumberConverter, VietnameseConverter, MAX_NUMBER};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const THREADS: usize = 8;
const CALLS_PER_THREAD: usize = 5_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_count_every_call_test() {
        let converter = VietnameseConverter::new();
        let direct = DirectConverter::new();

        thread::scope(|scope| {
            for t in 0..THREADS {
                let converter = &converter;
                let direct = &direct;
                scope.spawn(move || {
                    let mut rng = ChaCha8Rng::seed_from_u64(t as u64);
                    for _ in 0..CALLS_PER_THREAD {
                        let n = rng.gen_range(0..=MAX_NUMBER as i64);
                        let text = converter.convert(n, "đồng").unwrap();
                        assert_eq!(text, direct.convert(n, "đồng").unwrap());
                    }
                });
            }
        });

        let snap = converter.metrics();
        assert_eq!(snap.calls, (THREADS * CALLS_PER_THREAD) as u64);
        assert_eq!(snap.errors, 0);
        assert!(snap.peak_latency_ns >= snap.average_latency_ns);

        let pool = converter.pool_stats();
        assert_eq!(pool.reused + pool.allocated, (THREADS * CALLS_PER_THREAD) as u64);
        assert!(pool.idle <= 64);
    }

    #[test]
    fn errors_are_counted_under_load_test() {
        let converter = Arc::new(VietnameseConverter::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let converter = Arc::clone(&converter);
                thread::spawn(move || {
                    for i in 0..1_000i64 {
                        let n = if i % 2 == 0 { -(i + 1) } else { i * (t + 1) };
                        let _ = converter.convert(n, "");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snap = converter.metrics();
        assert_eq!(snap.calls, 4_000);
        assert_eq!(snap.errors, 2_000);
    }

    #[test]
    fn convert_many_keeps_order_test() {
        let converter = VietnameseConverter::new();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut numbers: Vec<i64> = (0..10_000)
            .map(|_| rng.gen_range(0..=MAX_NUMBER as i64))
            .collect();
        numbers.push(-3);
        numbers.push(MAX_NUMBER as i64 + 1);

        let parallel = converter.convert_many(&numbers, "đồng");
        assert_eq!(parallel.len(), numbers.len());
        for (n, result) in numbers.iter().zip(&parallel) {
            assert_eq!(result, &converter.convert(*n, "đồng"), "n = {n}");
        }
        assert_eq!(converter.metrics().calls, 2 * numbers.len() as u64);
    }
}
