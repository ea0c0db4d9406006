use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::record::FastaRecord;

/// Line width used when the caller does not ask for one.
pub const DEFAULT_LINE_WIDTH: usize = 60;

pub struct FastaWriter<W: Write>{
    output: BufWriter<W>,
    line_width: usize, // 0 means no wrapping
    record_buf: Vec<u8>,
}

impl<W: Write> FastaWriter<W>{
    // No need to give a buffered writer. Buffering is handled internally.
    pub fn new(output: W, line_width: usize) -> Self{
        FastaWriter{output: BufWriter::new(output),
                    line_width,
                    record_buf: Vec::new()}
    }

    // The record is assembled in full and handed over in one write_all, so
    // the internal buffer never holds half a record. Records at least as
    // large as the buffer go straight to the inner stream, where a failing
    // write can still leave a truncated record behind.
    pub fn write(&mut self, rec: &FastaRecord) -> io::Result<()>{
        self.record_buf.clear();
        self.record_buf.push(b'>');
        self.record_buf.extend_from_slice(&rec.head);
        self.record_buf.push(b'\n');

        if self.line_width == 0{
            if !rec.seq.is_empty(){
                self.record_buf.extend_from_slice(&rec.seq);
                self.record_buf.push(b'\n');
            }
        } else {
            for line in rec.seq.chunks(self.line_width){
                self.record_buf.extend_from_slice(line);
                self.record_buf.push(b'\n');
            }
        }

        self.output.write_all(&self.record_buf)
    }

    // Flushes and hands back the underlying stream
    pub fn into_inner(self) -> io::Result<W>{
        self.output.into_inner().map_err(|e| e.into_error())
    }
}

/// Output file, gzip-compressed when the file name ends in .gz.
pub enum FileOutput{
    Plain(File),
    Gzip(GzEncoder<File>),
}

impl Write for FileOutput{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>{
        match self{
            FileOutput::Plain(f) => f.write(buf),
            FileOutput::Gzip(gz) => gz.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()>{
        match self{
            FileOutput::Plain(f) => f.flush(),
            FileOutput::Gzip(gz) => gz.flush(),
        }
    }
}

impl FastaWriter<FileOutput>{
    pub fn new_to_file(path: &Path, line_width: usize) -> io::Result<Self>{
        let file = File::create(path)?;
        let output = if path.extension().is_some_and(|ext| ext == "gz"){
            FileOutput::Gzip(GzEncoder::new(file, Compression::fast()))
        } else {
            FileOutput::Plain(file)
        };
        Ok(FastaWriter::new(output, line_width))
    }

    // Flushes all buffered records, writes the gzip trailer if needed and
    // syncs the file.
    pub fn finish(self) -> io::Result<()>{
        let file = match self.into_inner()?{
            FileOutput::Plain(f) => f,
            FileOutput::Gzip(gz) => gz.finish()?,
        };
        file.sync_all()
    }
}
