use std::fmt;
use std::str;

/// One FASTA entry. The header is stored without the leading '>'.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FastaRecord{
    pub head: Vec<u8>,
    pub seq: Vec<u8>,
}

impl FastaRecord{
    pub fn new(head: &[u8], seq: &[u8]) -> Self{
        FastaRecord{head: head.to_vec(), seq: seq.to_vec()}
    }

    // The identifier is the header up to the first whitespace character
    pub fn id(&self) -> &[u8]{
        match self.head.iter().position(|c| c.is_ascii_whitespace()){
            Some(end) => &self.head[..end],
            None => &self.head,
        }
    }

    // Free text after the identifier, if any
    pub fn description(&self) -> Option<&[u8]>{
        let end = self.head.iter().position(|c| c.is_ascii_whitespace())?;
        let rest = self.head[end..].trim_ascii_start();
        if rest.is_empty() {None} else {Some(rest)}
    }

    #[inline]
    pub fn len(&self) -> usize{
        self.seq.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool{
        self.seq.is_empty()
    }
}

impl fmt::Display for FastaRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ">{}\n{}",
               String::from_utf8_lossy(&self.head),
               String::from_utf8_lossy(&self.seq))
    }
}
