use chunkvault_core::{CHUNK_SIZE, KEY_SIZE};
use chunkvault_crypto::{
    decrypt_chunk, derive_key, encrypt_chunk, serialize_container, ChunkKey, KdfParams,
};
use secrecy::SecretString;

fn make_data(size: usize) -> Vec<u8> {
    (0..size)
        .map(|i| (i.wrapping_mul(7) ^ (i >> 3)) as u8)
        .collect()
}

fn bench_key() -> ChunkKey {
    ChunkKey::from_bytes([0x5Au8; KEY_SIZE])
}

#[divan::bench(args = [1024, CHUNK_SIZE])]
fn bench_encrypt_chunk(bencher: divan::Bencher, size: usize) {
    let key = bench_key();
    let data = make_data(size);
    bencher
        .counter(divan::counter::BytesCount::new(size))
        .bench(|| encrypt_chunk(divan::black_box(&data), divan::black_box(&key)).unwrap());
}

#[divan::bench(args = [1024, CHUNK_SIZE])]
fn bench_decrypt_chunk(bencher: divan::Bencher, size: usize) {
    let key = bench_key();
    let record = encrypt_chunk(&make_data(size), &key).unwrap();
    bencher
        .counter(divan::counter::BytesCount::new(size))
        .bench(|| decrypt_chunk(divan::black_box(&record), divan::black_box(&key)).unwrap());
}

#[divan::bench(args = [1, 8])]
fn bench_serialize_container(bencher: divan::Bencher, chunks: usize) {
    let key = bench_key();
    let records: Vec<_> = (0..chunks)
        .map(|_| encrypt_chunk(&make_data(CHUNK_SIZE), &key).unwrap())
        .collect();
    bencher
        .counter(divan::counter::BytesCount::new(chunks * CHUNK_SIZE))
        .bench(|| serialize_container(divan::black_box(&records)));
}

#[divan::bench(sample_count = 10)]
fn bench_derive_key() {
    let password = SecretString::from("bench-password");
    let salt = [0x42u8; 16];
    let params = KdfParams {
        mem_cost_kib: 8192,
        time_cost: 1,
        parallelism: 1,
    };
    derive_key(
        divan::black_box(&password),
        divan::black_box(&salt),
        &params,
    )
    .unwrap();
}

fn main() {
    divan::main();
}
