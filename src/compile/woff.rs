//! WOFF 1.0 container: the sfnt table directory re-expressed with per-table
//! zlib compression. All container fields are big-endian.

use crate::error::IconFontError;
use flate2::{write::ZlibEncoder, Compression};
use std::io::Write;
use write_fonts::read::FontRef;

const WOFF_SIGNATURE: u32 = 0x774F_4646; // 'wOFF'
const HEADER_SIZE: usize = 44;
const DIR_ENTRY_SIZE: usize = 20;

fn assembly<E: std::fmt::Display>(e: E) -> IconFontError {
    IconFontError::FontAssembly(e.to_string())
}

pub fn wrap(ttf: &[u8]) -> Result<Vec<u8>, IconFontError> {
    let font = FontRef::new(ttf).map_err(assembly)?;
    let records = font.table_directory.table_records();

    struct Entry {
        tag: [u8; 4],
        orig_len: u32,
        orig_checksum: u32,
        data: Vec<u8>,
    }

    let mut entries = Vec::with_capacity(records.len());
    let mut total_sfnt = 12 + 16 * records.len() as u32;
    for record in records {
        let tag = record.tag();
        let raw = font
            .table_data(tag)
            .ok_or_else(|| IconFontError::FontAssembly(format!("missing table {tag}")))?;
        let raw = raw.as_bytes();
        let compressed = zlib(raw)?;
        // keep the raw bytes when zlib does not win
        let data = if compressed.len() < raw.len() {
            compressed
        } else {
            raw.to_vec()
        };
        total_sfnt += padded(raw.len() as u32);
        entries.push(Entry {
            tag: tag.to_be_bytes(),
            orig_len: raw.len() as u32,
            orig_checksum: record.checksum(),
            data,
        });
    }

    let dir_size = DIR_ENTRY_SIZE * entries.len();
    let mut offset = (HEADER_SIZE + dir_size) as u32;
    let mut directory = Vec::with_capacity(dir_size);
    let mut body = Vec::new();
    for entry in &entries {
        directory.extend_from_slice(&entry.tag);
        push_u32(&mut directory, offset);
        push_u32(&mut directory, entry.data.len() as u32);
        push_u32(&mut directory, entry.orig_len);
        push_u32(&mut directory, entry.orig_checksum);
        body.extend_from_slice(&entry.data);
        offset += entry.data.len() as u32;
        while offset % 4 != 0 {
            body.push(0);
            offset += 1;
        }
    }

    let flavor = u32::from_be_bytes([ttf[0], ttf[1], ttf[2], ttf[3]]);
    let total_len = (HEADER_SIZE + dir_size + body.len()) as u32;
    let mut out = Vec::with_capacity(total_len as usize);
    push_u32(&mut out, WOFF_SIGNATURE);
    push_u32(&mut out, flavor);
    push_u32(&mut out, total_len);
    push_u16(&mut out, entries.len() as u16);
    push_u16(&mut out, 0); // reserved
    push_u32(&mut out, total_sfnt);
    push_u16(&mut out, 1); // majorVersion
    push_u16(&mut out, 0); // minorVersion
    push_u32(&mut out, 0); // metaOffset
    push_u32(&mut out, 0); // metaLength
    push_u32(&mut out, 0); // metaOrigLength
    push_u32(&mut out, 0); // privOffset
    push_u32(&mut out, 0); // privLength
    out.extend_from_slice(&directory);
    out.extend_from_slice(&body);
    Ok(out)
}

fn zlib(data: &[u8]) -> Result<Vec<u8>, IconFontError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn padded(len: u32) -> u32 {
    (len + 3) & !3
}

fn push_u16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn push_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_be_bytes());
}
