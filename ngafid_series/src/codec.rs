/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

//! byte level encoding of series data.
//! Numeric series are written as little endian f64 arrays, text series as a u32 count followed by
//! u32 length prefixed UTF-8 strings. Both are compressed with zlib framed deflate.

use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};
use tracing::debug;

use crate::errors::{Result, SeriesError, codec_error, corrupt};

/// smallest output buffer we start with
const MIN_CAPACITY: usize = 64;

/// upper bound for preallocated inflate buffers. Size hints come from stored records and are not trusted
const MAX_INITIAL_CAPACITY: usize = 1 << 24;

/// compress `raw`, starting with an output buffer of `capacity` bytes.
/// If the compressed stream does not fit we start over with twice the capacity, we never return a
/// truncated stream
pub fn deflate_with_capacity (raw: &[u8], capacity: usize)->Result<Vec<u8>> {
    let mut capacity = capacity.max(MIN_CAPACITY);

    loop {
        let mut compressor = Compress::new( Compression::default(), true);
        let mut out: Vec<u8> = Vec::with_capacity(capacity);

        match compressor.compress_vec( raw, &mut out, FlushCompress::Finish) {
            Ok(Status::StreamEnd) => return Ok(out),
            Ok(_) => { // output buffer exhausted before the stream was finished
                debug!("deflate output of {} bytes did not fit into {} byte buffer, retrying", raw.len(), capacity);
                capacity *= 2;
            }
            Err(e) => return Err( codec_error!("deflate failed: {e}"))
        }
    }
}

pub fn deflate (raw: &[u8])->Result<Vec<u8>> {
    // sensor data usually compresses well, start with half the input size
    deflate_with_capacity( raw, raw.len() / 2)
}

/// decompress a zlib stream. `size_hint` is the expected decompressed size (if known)
pub fn inflate (compressed: &[u8], size_hint: usize)->Result<Vec<u8>> {
    let mut decompressor = Decompress::new( true);
    let mut out: Vec<u8> = Vec::with_capacity( size_hint.clamp( MIN_CAPACITY, MAX_INITIAL_CAPACITY));

    loop {
        let consumed = decompressor.total_in() as usize;
        let produced = decompressor.total_out();

        let status = decompressor.decompress_vec( &compressed[consumed..], &mut out, FlushDecompress::Finish)
            .map_err(|e| corrupt!("inflate failed: {e}"))?;

        match status {
            Status::StreamEnd => return Ok(out),
            _ => {
                if out.len() == out.capacity() {
                    out.reserve( out.capacity());
                } else if decompressor.total_in() as usize == compressed.len() || 
                          (decompressor.total_in() as usize == consumed && decompressor.total_out() == produced) {
                    return Err( corrupt!("truncated deflate stream"))
                }
            }
        }
    }
}

//--- numeric payload

pub fn encode_f64s (values: &[f64])->Result<Vec<u8>> {
    let mut raw: Vec<u8> = Vec::with_capacity( values.len() * 8);
    for v in values {
        raw.extend_from_slice( &v.to_le_bytes());
    }
    deflate( &raw)
}

pub fn decode_f64s (data: &[u8], len_hint: usize)->Result<Vec<f64>> {
    let raw = inflate( data, len_hint.saturating_mul(8))?;
    if raw.len() % 8 != 0 {
        return Err( corrupt!("numeric payload of {} bytes is not a multiple of 8", raw.len()))
    }

    let mut buf = [0u8;8];
    let values = raw.chunks_exact(8).map( |c| {
        buf.copy_from_slice(c);
        f64::from_le_bytes(buf)
    }).collect();
    Ok(values)
}

//--- text payload

pub fn encode_strings<S: AsRef<str>> (values: &[S])->Result<Vec<u8>> {
    let n_bytes: usize = values.iter().map(|s| s.as_ref().len() + 4).sum();
    let mut raw: Vec<u8> = Vec::with_capacity( n_bytes + 4);

    raw.extend_from_slice( &(values.len() as u32).to_le_bytes());
    for s in values {
        let bs = s.as_ref().as_bytes();
        raw.extend_from_slice( &(bs.len() as u32).to_le_bytes());
        raw.extend_from_slice( bs);
    }
    deflate( &raw)
}

pub fn decode_strings (data: &[u8], len_hint: usize)->Result<Vec<String>> {
    let raw = inflate( data, len_hint.saturating_mul(8))?;
    let mut reader = PrefixReader { raw: &raw, pos: 0 };

    let n = reader.read_u32()? as usize;
    if n > reader.remaining() / 4 { // each string has at least its length prefix
        return Err( corrupt!("text payload claims {n} strings in {} bytes", reader.remaining()))
    }
    let mut values: Vec<String> = Vec::with_capacity(n);
    for _ in 0..n {
        let len = reader.read_u32()? as usize;
        let bs = reader.read_bytes(len)?;
        let s = String::from_utf8( bs.to_vec()).map_err(|e| corrupt!("invalid UTF-8 in text payload: {e}"))?;
        values.push(s);
    }

    if reader.pos != raw.len() {
        return Err( corrupt!("{} trailing bytes in text payload", raw.len() - reader.pos))
    }
    Ok(values)
}

struct PrefixReader<'a> {
    raw: &'a [u8],
    pos: usize,
}

impl<'a> PrefixReader<'a> {
    fn remaining (&self)->usize { self.raw.len() - self.pos }

    fn read_bytes (&mut self, len: usize)->Result<&'a [u8]> {
        if len > self.remaining() {
            return Err( corrupt!("text payload truncated at byte {}", self.pos))
        }
        let end = self.pos + len;
        let bs = &self.raw[self.pos..end];
        self.pos = end;
        Ok(bs)
    }

    fn read_u32 (&mut self)->Result<u32> {
        let bs = self.read_bytes(4)?;
        Ok( u32::from_le_bytes( [bs[0], bs[1], bs[2], bs[3]]))
    }
}
