use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::record::FastaRecord;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const READ_BUFFER_CAPACITY: usize = 256 * 1024;

enum ParserState{
    NoRecord,
    InRecord{head: Vec<u8>, seq: Vec<u8>},
}

/// Streaming FASTA parser. Records are produced one at a time, so memory use
/// is bounded by the longest record rather than the size of the input.
pub struct FastaReader<R: BufRead>{
    input: R,
    state: ParserState,
    line_buf: Vec<u8>,
    line_number: u64,
    finished: bool,
}

impl<R: BufRead> FastaReader<R>{
    pub fn new(input: R) -> Self{
        FastaReader{input,
                    state: ParserState::NoRecord,
                    line_buf: Vec::<u8>::new(),
                    line_number: 0,
                    finished: false}
    }

    // Number of lines consumed from the input so far
    pub fn line_number(&self) -> u64{
        self.line_number
    }

    pub fn read_next(&mut self) -> io::Result<Option<FastaRecord>>{
        if self.finished {return Ok(None)}

        loop{
            self.line_buf.clear();
            let bytes_read = match self.input.read_until(b'\n', &mut self.line_buf){
                Ok(n) => n,
                Err(e) => {
                    self.finished = true;
                    return Err(e);
                }
            };

            if bytes_read == 0{
                // End of stream: flush the pending record, if any
                self.finished = true;
                return Ok(self.take_pending());
            }
            self.line_number += 1;

            let line = self.line_buf.trim_ascii_end();
            if line.is_empty() {continue}

            if let Some(head) = line.strip_prefix(b">"){
                let next = ParserState::InRecord{head: head.to_vec(), seq: Vec::new()};
                if let ParserState::InRecord{head, seq} = std::mem::replace(&mut self.state, next){
                    return Ok(Some(FastaRecord{head, seq}));
                }
            } else {
                match &mut self.state{
                    ParserState::InRecord{seq, ..} => seq.extend_from_slice(line),
                    ParserState::NoRecord => {
                        log::warn!("Ignoring text before the first FASTA header on line {}", self.line_number);
                    }
                }
            }
        }
    }

    fn take_pending(&mut self) -> Option<FastaRecord>{
        match std::mem::replace(&mut self.state, ParserState::NoRecord){
            ParserState::InRecord{head, seq} => Some(FastaRecord{head, seq}),
            ParserState::NoRecord => None,
        }
    }
}

impl<R: BufRead> Iterator for FastaReader<R>{
    type Item = io::Result<FastaRecord>;

    fn next(&mut self) -> Option<Self::Item>{
        self.read_next().transpose()
    }
}

impl FastaReader<Box<dyn BufRead>>{
    // Gzipped input is recognized by the .gz suffix or by the magic bytes.
    pub fn from_path(path: &Path) -> io::Result<Self>{
        let mut file = BufReader::with_capacity(READ_BUFFER_CAPACITY, File::open(path)?);
        let has_gz_suffix = path.extension().is_some_and(|ext| ext == "gz");
        let has_gz_magic = file.fill_buf()?.starts_with(&GZIP_MAGIC);

        let input: Box<dyn BufRead> = if has_gz_suffix || has_gz_magic{
            Box::new(BufReader::with_capacity(READ_BUFFER_CAPACITY, MultiGzDecoder::new(file)))
        } else {
            Box::new(file)
        };
        Ok(FastaReader::new(input))
    }
}
