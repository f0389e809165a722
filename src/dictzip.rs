//! Dictzip: a gzip file whose FEXTRA field records per-chunk compressed sizes, letting any
//! logical offset in the uncompressed stream be reached by decompressing only the chunk(s) that
//! contain it.
use byteorder::{ByteOrder, LittleEndian};
use flate2::{Decompress, FlushDecompress, Status};
use std::cell::RefCell;

use crate::errors::DictError;
use DictError::*;

const GZIP_ID1: u8 = 0x1F;
const GZIP_ID2: u8 = 0x8B;
const GZIP_DEFLATE: u8 = 8;

const GZ_FHCRC: u8 = 0b0000_0010;
const GZ_FEXTRA: u8 = 0b0000_0100;
const GZ_FNAME: u8 = 0b0000_1000;
const GZ_FCOMMENT: u8 = 0b0001_0000;

/// Offsets into the compressed data where each chunk begins; `offsets[chunk_count]` is the end
/// of the last chunk.
pub(crate) struct ChunkTable {
    pub chunk_length: usize,
    pub chunk_count: usize,
    pub offsets: Vec<u64>,
}

struct CacheSlot {
    id: Option<u64>,
    data: Vec<u8>,
}

/// A strict FIFO cache of at most three decompressed chunks.
struct ChunkCache {
    slots: [CacheSlot; 3],
    next: usize,
}

impl ChunkCache {
    fn new() -> Self {
        Self {
            slots: [
                CacheSlot { id: None, data: Vec::new() },
                CacheSlot { id: None, data: Vec::new() },
                CacheSlot { id: None, data: Vec::new() },
            ],
            next: 0,
        }
    }

    fn find(&self, chunk_id: u64) -> Option<&[u8]> {
        self.slots.iter().find(|s| s.id == Some(chunk_id)).map(|s| s.data.as_slice())
    }
}

/// A parsed dictzip header plus the mutable decompression state it needs at read time.
pub(crate) struct Dictzip {
    pub table: ChunkTable,
    cache: RefCell<ChunkCache>,
}

/// Outcome of attempting to parse a data file's header as dictzip.
pub(crate) enum DzHeader {
    /// The magic/compression-method bytes do not match, or the file is too short: treat the
    /// data file as uncompressed plaintext.
    NotDictzip,
    Dictzip(Dictzip),
}

fn skip_nul_terminated(data: &[u8], mut pos: usize) -> Result<usize, DictError> {
    while pos < data.len() && data[pos] != 0 {
        pos += 1;
    }
    pos += 1;
    if pos >= data.len() {
        return Err(InvalidFileFormat("NUL-terminated field runs past end of file".into()));
    }
    Ok(pos)
}

/// Parses `data`'s gzip + dictzip header.
pub(crate) fn parse(data: &[u8]) -> Result<DzHeader, DictError> {
    if data.len() < 12 {
        return Ok(DzHeader::NotDictzip);
    }
    if data[0] != GZIP_ID1 || data[1] != GZIP_ID2 || data[2] != GZIP_DEFLATE {
        return Ok(DzHeader::NotDictzip);
    }

    let flags = data[3];
    if flags & GZ_FEXTRA == 0 {
        return Err(InvalidFileFormat("FLG.FEXTRA not set; not a dictzip file".into()));
    }

    let xlen = LittleEndian::read_u16(&data[10..12]) as usize;
    if data.len() < 12 + xlen {
        return Err(InvalidFileFormat("XLEN exceeds file length".into()));
    }

    let fextra = &data[12..12 + xlen];
    if fextra.len() < 10 || &fextra[0..2] != b"RA" {
        return Err(InvalidFileFormat("no dictzip sub-field (SI1SI2 != 'RA')".into()));
    }

    let slen = LittleEndian::read_u16(&fextra[2..4]) as usize;
    if slen + 4 != xlen {
        return Err(InvalidFileFormat("SLEN does not match XLEN - 4".into()));
    }

    let sver = LittleEndian::read_u16(&fextra[4..6]);
    if sver != 1 {
        return Err(InvalidFileFormat("unsupported dictzip version, expected 1".into()));
    }

    let chunk_length = LittleEndian::read_u16(&fextra[6..8]) as usize;
    let chunk_count = LittleEndian::read_u16(&fextra[8..10]) as usize;

    let max_chunks = (fextra.len() - 10) / 2;
    if max_chunks != chunk_count {
        return Err(InvalidFileFormat(format!(
            "header declares {} chunks but the FEXTRA field has room for {}",
            chunk_count, max_chunks
        )));
    }

    let mut pos = 12 + xlen;
    if flags & GZ_FNAME != 0 {
        pos = skip_nul_terminated(data, pos)?;
    }
    if flags & GZ_FCOMMENT != 0 {
        pos = skip_nul_terminated(data, pos)?;
    }
    if flags & GZ_FHCRC != 0 {
        pos += 2;
    }
    if pos >= data.len() {
        return Err(InvalidFileFormat("header fields run past end of file".into()));
    }

    let chunk_sizes = &fextra[10..10 + chunk_count * 2];
    let mut offsets = Vec::with_capacity(chunk_count + 1);
    let mut offset = pos as u64;
    for size in chunk_sizes.chunks(2) {
        offsets.push(offset);
        offset += LittleEndian::read_u16(size) as u64;
    }
    offsets.push(offset);

    // The reference tolerates `data_offset == size` exactly, deliberately admitting zero-byte
    // data payloads after a header.
    if offset as usize > data.len() {
        return Err(InvalidFileFormat("computed end of compressed data exceeds file length".into()));
    }

    let table = ChunkTable { chunk_length, chunk_count, offsets };
    Ok(DzHeader::Dictzip(Dictzip { table, cache: RefCell::new(ChunkCache::new()) }))
}

/// Decompresses chunk `chunk_id` from `data` into a fresh buffer of `chunk_length` bytes.
///
/// A fresh `Decompress` handle is created per chunk rather than shared across the dictionary's
/// lifetime: each chunk is an independently terminable deflate stream, and re-initializing keeps
/// a handle reusable for interleaved validation and ordinary reads (see the design notes on
/// inflater reuse).
fn inflate_chunk(data: &[u8], table: &ChunkTable, chunk_id: u64) -> Result<Vec<u8>, DictError> {
    let start = *table.offsets.get(chunk_id as usize).ok_or(DecompressFailed(chunk_id))?;
    let end = *table.offsets.get(chunk_id as usize + 1).ok_or(DecompressFailed(chunk_id))?;
    let compressed = data
        .get(start as usize..end as usize)
        .ok_or(DecompressFailed(chunk_id))?;

    let mut decoder = Decompress::new(false);
    let mut out = vec![0u8; table.chunk_length];
    match decoder.decompress(compressed, &mut out, FlushDecompress::None) {
        Ok(Status::Ok) | Ok(Status::StreamEnd) => {
            out.truncate(decoder.total_out() as usize);
            Ok(out)
        }
        _ => {
            log::warn!("chunk {} failed to decompress", chunk_id);
            Err(DecompressFailed(chunk_id))
        }
    }
}

impl Dictzip {
    /// Reads `length` logical uncompressed bytes starting at `offset`, consulting and
    /// populating the chunk cache as needed.
    pub(crate) fn read(&self, data: &[u8], mut offset: u64, mut length: u64) -> Result<Vec<u8>, DictError> {
        let mut out = Vec::with_capacity(length as usize);

        while length > 0 {
            let chunk_id = offset / self.table.chunk_length as u64;
            let in_chunk = (offset % self.table.chunk_length as u64) as usize;

            let chunk = self.read_chunk(data, chunk_id)?;
            let available = chunk.len().checked_sub(in_chunk).ok_or(DecompressFailed(chunk_id))?;
            let to_copy = std::cmp::min(available, length as usize);
            out.extend_from_slice(&chunk[in_chunk..in_chunk + to_copy]);

            offset += to_copy as u64;
            length -= to_copy as u64;
        }

        Ok(out)
    }

    fn read_chunk(&self, data: &[u8], chunk_id: u64) -> Result<Vec<u8>, DictError> {
        if let Some(hit) = self.cache.borrow().find(chunk_id) {
            return Ok(hit.to_vec());
        }

        log::debug!("chunk cache miss for chunk {}", chunk_id);
        let decompressed = inflate_chunk(data, &self.table, chunk_id)?;

        let mut cache = self.cache.borrow_mut();
        let slot_idx = cache.next % cache.slots.len();
        cache.next = cache.next.wrapping_add(1);
        cache.slots[slot_idx] = CacheSlot { id: Some(chunk_id), data: decompressed.clone() };

        Ok(decompressed)
    }

    /// Decompresses every chunk into a throwaway buffer, used by the validator to confirm the
    /// whole stream is intact before trusting the declared uncompressed size.
    pub(crate) fn test_decompress_all(&self, data: &[u8]) -> Result<u64, DictError> {
        let mut total = 0u64;
        for chunk_id in 0..self.table.chunk_count as u64 {
            let chunk = inflate_chunk(data, &self.table, chunk_id)?;
            total += chunk.len() as u64;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn deflate_raw(input: &[u8]) -> Vec<u8> {
        let mut encoder = flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(input).unwrap();
        encoder.finish().unwrap()
    }

    fn build_dictzip(chunks: &[&[u8]]) -> Vec<u8> {
        let chunk_length = chunks.first().map(|c| c.len()).unwrap_or(0);
        let compressed: Vec<Vec<u8>> = chunks.iter().map(|c| deflate_raw(c)).collect();

        let xlen: u16 = (10 + 2 * compressed.len()) as u16;
        let mut out = vec![0u8; 12];
        out[0] = GZIP_ID1;
        out[1] = GZIP_ID2;
        out[2] = GZIP_DEFLATE;
        out[3] = GZ_FEXTRA;
        LittleEndian::write_u16(&mut out[10..12], xlen);

        let mut fextra = Vec::new();
        fextra.extend_from_slice(b"RA");
        let mut buf = [0u8; 2];
        LittleEndian::write_u16(&mut buf, xlen - 4);
        fextra.extend_from_slice(&buf);
        LittleEndian::write_u16(&mut buf, 1);
        fextra.extend_from_slice(&buf);
        LittleEndian::write_u16(&mut buf, chunk_length as u16);
        fextra.extend_from_slice(&buf);
        LittleEndian::write_u16(&mut buf, compressed.len() as u16);
        fextra.extend_from_slice(&buf);
        for c in &compressed {
            LittleEndian::write_u16(&mut buf, c.len() as u16);
            fextra.extend_from_slice(&buf);
        }
        assert_eq!(fextra.len(), xlen as usize);
        out.extend_from_slice(&fextra);

        for c in &compressed {
            out.extend_from_slice(c);
        }

        out
    }

    #[test]
    fn short_file_is_not_dictzip() {
        let data = vec![0x1F, 0x8B];
        assert!(matches!(parse(&data).unwrap(), DzHeader::NotDictzip));
    }

    #[test]
    fn wrong_magic_is_not_dictzip() {
        let data = vec![0u8; 12];
        assert!(matches!(parse(&data).unwrap(), DzHeader::NotDictzip));
    }

    #[test]
    fn missing_fextra_flag_is_malformed() {
        let mut data = vec![0u8; 12];
        data[0] = GZIP_ID1;
        data[1] = GZIP_ID2;
        data[2] = GZIP_DEFLATE;
        assert!(parse(&data).is_err());
    }

    #[test]
    fn reads_across_a_chunk_boundary() {
        let data = build_dictzip(&[b"01234567", b"89abcdef"]);
        let dz = match parse(&data).unwrap() {
            DzHeader::Dictzip(dz) => dz,
            DzHeader::NotDictzip => panic!("expected a dictzip header"),
        };
        assert_eq!(dz.table.chunk_length, 8);
        assert_eq!(dz.table.chunk_count, 2);

        let got = dz.read(&data, 6, 4).unwrap();
        assert_eq!(got, b"6789");
    }

    #[test]
    fn chunk_count_zero_yields_an_empty_readable_range() {
        // The header must be followed by at least one more byte: the reference rejects a
        // zero-chunk file whose header ends exactly at EOF, regardless of chunk count.
        let mut data = build_dictzip(&[]);
        data.push(0);
        let dz = match parse(&data).unwrap() {
            DzHeader::Dictzip(dz) => dz,
            DzHeader::NotDictzip => panic!("expected a dictzip header"),
        };
        assert_eq!(dz.table.chunk_count, 0);
        assert_eq!(dz.read(&data, 0, 0).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn cache_hit_matches_fresh_decompression() {
        let data = build_dictzip(&[b"01234567", b"89abcdef"]);
        let dz = match parse(&data).unwrap() {
            DzHeader::Dictzip(dz) => dz,
            DzHeader::NotDictzip => panic!("expected a dictzip header"),
        };
        let first = dz.read(&data, 0, 8).unwrap();
        let second = dz.read(&data, 0, 8).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, b"01234567");
    }
}
