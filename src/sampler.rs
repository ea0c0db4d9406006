use std::io;
use std::io::Write;

use indicatif::ProgressBar;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::record::FastaRecord;
use crate::writer::FastaWriter;

#[derive(Debug, Error)]
pub enum SampleError{
    #[error("failed to read record: {0}")]
    Read(#[source] io::Error),
    #[error("failed to write record: {0}")]
    Write(#[source] io::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleStats{
    pub seen: u64,
    pub kept: u64,
}

// Builds the generator for one run. Without a seed, one is drawn from the
// thread rng and returned so it can be reported.
// Negative seeds are accepted and reinterpreted bit for bit.
pub fn seeded_rng(seed: Option<i64>) -> (ChaCha8Rng, i64){
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    (ChaCha8Rng::seed_from_u64(seed as u64), seed)
}

/// Bernoulli sampler over FASTA records. The generator is owned by the
/// sampler and keeps advancing across every stream it is given, so the
/// whole run is one sequence of draws.
pub struct Sampler<G: Rng>{
    rng: G,
    percent: f64,
}

impl<G: Rng> Sampler<G>{
    // The caller is responsible for 0 < percent < 1
    pub fn new(rng: G, percent: f64) -> Self{
        Sampler{rng, percent}
    }

    // One draw per record, regardless of the record's content.
    pub fn keep_next(&mut self) -> bool{
        let r: f64 = self.rng.random();
        r <= self.percent
    }

    pub fn sample_stream<I, W>(&mut self, records: I, writer: &mut FastaWriter<W>, progress: &ProgressBar) -> Result<SampleStats, SampleError>
    where I: IntoIterator<Item = io::Result<FastaRecord>>, W: Write{
        let mut stats = SampleStats::default();
        for rec in records{
            let rec = rec.map_err(SampleError::Read)?;
            stats.seen += 1;
            if self.keep_next(){
                writer.write(&rec).map_err(SampleError::Write)?;
                stats.kept += 1;
            }
            progress.inc(1);
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests{
    use super::*;
    use crate::reader::FastaReader;
    use rand::RngCore;
    use std::cmp::min;

    // Yields a fixed script of values in [0,1), then repeats the last one.
    struct ScriptedRng{
        values: Vec<f64>,
        pos: usize,
    }

    impl RngCore for ScriptedRng{
        fn next_u32(&mut self) -> u32{
            (self.next_u64() >> 32) as u32
        }

        fn next_u64(&mut self) -> u64{
            let x = self.values[min(self.pos, self.values.len() - 1)];
            self.pos += 1;
            (x * u64::MAX as f64) as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]){
            for chunk in dest.chunks_mut(8){
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
    }

    fn run(sampler: &mut Sampler<impl Rng>, data: &[u8]) -> (SampleStats, Vec<u8>){
        let mut writer = FastaWriter::new(Vec::<u8>::new(), 60);
        let stats = sampler.sample_stream(FastaReader::new(data), &mut writer, &ProgressBar::hidden()).unwrap();
        (stats, writer.into_inner().unwrap())
    }

    fn many_records(n: usize) -> Vec<u8>{
        let mut data = Vec::new();
        for i in 0..n{
            data.extend_from_slice(format!(">seq{}\nACGT\n", i).as_bytes());
        }
        data
    }

    #[test]
    fn test_keeps_draws_at_or_below_threshold(){
        let rng = ScriptedRng{values: vec![0.05, 0.5], pos: 0};
        let mut sampler = Sampler::new(rng, 0.1);
        let (stats, out) = run(&mut sampler, b">a\nACGT\n>b\nGGGG\n");
        assert_eq!(stats, SampleStats{seen: 2, kept: 1});
        assert_eq!(out, b">a\nACGT\n");
    }

    #[test]
    fn test_header_only_record_is_sampled(){
        let rng = ScriptedRng{values: vec![0.5, 0.01], pos: 0};
        let mut sampler = Sampler::new(rng, 0.1);
        let (stats, out) = run(&mut sampler, b">a\nACGT\n>b\n");
        assert_eq!(stats, SampleStats{seen: 2, kept: 1});
        assert_eq!(out, b">b\n");
    }

    #[test]
    fn test_empty_input(){
        let (rng, _) = seeded_rng(Some(1));
        let mut sampler = Sampler::new(rng, 0.5);
        let (stats, out) = run(&mut sampler, b"");
        assert_eq!(stats, SampleStats{seen: 0, kept: 0});
        assert!(out.is_empty());
    }

    #[test]
    fn test_same_seed_same_output(){
        let data = many_records(500);
        let (rng1, seed) = seeded_rng(Some(42));
        let (rng2, _) = seeded_rng(Some(seed));
        let (stats1, out1) = run(&mut Sampler::new(rng1, 0.3), &data);
        let (stats2, out2) = run(&mut Sampler::new(rng2, 0.3), &data);
        assert_eq!(stats1, stats2);
        assert_eq!(out1, out2);
        assert!(stats1.kept > 0 && stats1.kept < stats1.seen);
    }

    #[test]
    fn test_negative_seed_is_deterministic(){
        let data = many_records(200);
        let (rng1, seed) = seeded_rng(Some(-3));
        assert_eq!(seed, -3);
        let (rng2, _) = seeded_rng(Some(-3));
        let (rng3, _) = seeded_rng(Some(3));
        let (stats1, out1) = run(&mut Sampler::new(rng1, 0.5), &data);
        let (stats2, out2) = run(&mut Sampler::new(rng2, 0.5), &data);
        let (_, out3) = run(&mut Sampler::new(rng3, 0.5), &data);
        assert_eq!(stats1, stats2);
        assert_eq!(out1, out2);
        assert_ne!(out1, out3);
    }

    #[test]
    fn test_generator_is_shared_across_streams(){
        let a = many_records(50);
        let b = many_records(70);
        let mut both = a.clone();
        both.extend_from_slice(&b);

        // Two streams through one sampler draw exactly as one concatenated stream
        let (rng, _) = seeded_rng(Some(7));
        let mut sampler = Sampler::new(rng, 0.4);
        let (stats_a, out_a) = run(&mut sampler, &a);
        let (stats_b, out_b) = run(&mut sampler, &b);

        let (rng, _) = seeded_rng(Some(7));
        let (stats_all, out_all) = run(&mut Sampler::new(rng, 0.4), &both);

        assert_eq!(stats_a.kept + stats_b.kept, stats_all.kept);
        assert_eq!([out_a, out_b].concat(), out_all);
    }

    #[test]
    fn test_threshold_monotonicity(){
        let data = many_records(300);
        let mut previous: Vec<FastaRecord> = vec![];
        for percent in [0.05, 0.2, 0.5, 0.8, 0.99]{
            let (rng, _) = seeded_rng(Some(2024));
            let (stats, out) = run(&mut Sampler::new(rng, percent), &data);
            assert!(stats.kept <= stats.seen);
            let kept = FastaReader::new(out.as_slice()).collect::<io::Result<Vec<_>>>().unwrap();
            assert_eq!(kept.len() as u64, stats.kept);
            assert!(previous.iter().all(|rec| kept.contains(rec)));
            previous = kept;
        }
    }

    #[test]
    fn test_read_error_aborts(){
        let records = vec![Ok(FastaRecord::new(b"a", b"A")),
                           Err(io::Error::new(io::ErrorKind::InvalidData, "bad bytes"))];
        let mut writer = FastaWriter::new(Vec::<u8>::new(), 60);
        let (rng, _) = seeded_rng(Some(3));
        let res = Sampler::new(rng, 0.5).sample_stream(records, &mut writer, &ProgressBar::hidden());
        assert!(matches!(res, Err(SampleError::Read(_))));
    }
}
