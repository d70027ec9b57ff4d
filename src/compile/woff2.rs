//! WOFF2 container with null table transforms: every table is carried
//! verbatim inside one brotli stream. Glyf stays untransformed (transform
//! version 3), which keeps the writer format-only and the decoder happy.

use crate::error::IconFontError;
use std::io::Read;
use write_fonts::read::FontRef;

const WOFF2_SIGNATURE: u32 = 0x774F_4632; // 'wOF2'
const HEADER_SIZE: usize = 48;
const ARBITRARY_TAG: u8 = 63;
const NULL_TRANSFORM_GLYF_LOCA: u8 = 3 << 6;

/// Known-table tags from the WOFF2 table directory format, in flag order.
const KNOWN_TAGS: [&[u8; 4]; 63] = [
    b"cmap", b"head", b"hhea", b"hmtx", b"maxp", b"name", b"OS/2", b"post", b"cvt ", b"fpgm",
    b"glyf", b"loca", b"prep", b"CFF ", b"VORG", b"EBDT", b"EBLC", b"gasp", b"hdmx", b"kern",
    b"LTSH", b"PCLT", b"VDMX", b"vhea", b"vmtx", b"BASE", b"GDEF", b"GPOS", b"GSUB", b"EBSC",
    b"JSTF", b"MATH", b"CBDT", b"CBLC", b"COLR", b"CPAL", b"SVG ", b"sbix", b"acnt", b"avar",
    b"bdat", b"bloc", b"bsln", b"cvar", b"fdsc", b"feat", b"fmtx", b"fvar", b"gvar", b"hsty",
    b"just", b"lcar", b"mort", b"morx", b"opbd", b"prop", b"trak", b"Zapf", b"Silf", b"Glat",
    b"Gloc", b"Feat", b"Sill",
];

fn assembly<E: std::fmt::Display>(e: E) -> IconFontError {
    IconFontError::FontAssembly(e.to_string())
}

pub fn wrap(ttf: &[u8]) -> Result<Vec<u8>, IconFontError> {
    let font = FontRef::new(ttf).map_err(assembly)?;

    let mut tables: Vec<([u8; 4], Vec<u8>)> = Vec::new();
    for record in font.table_directory.table_records() {
        let tag = record.tag();
        let data = font
            .table_data(tag)
            .ok_or_else(|| IconFontError::FontAssembly(format!("missing table {tag}")))?;
        tables.push((tag.to_be_bytes(), data.as_bytes().to_vec()));
    }
    // loca must immediately follow glyf in the WOFF2 directory
    if let (Some(glyf_at), Some(loca_at)) = (
        tables.iter().position(|(t, _)| t == b"glyf"),
        tables.iter().position(|(t, _)| t == b"loca"),
    ) {
        let loca = tables.remove(loca_at);
        let glyf_at = if loca_at < glyf_at { glyf_at - 1 } else { glyf_at };
        tables.insert(glyf_at + 1, loca);
    }

    let mut directory = Vec::new();
    let mut stream = Vec::new();
    let mut total_sfnt = 12 + 16 * tables.len() as u32;
    for (tag, data) in &tables {
        let transform = if tag == b"glyf" || tag == b"loca" {
            NULL_TRANSFORM_GLYF_LOCA
        } else {
            0
        };
        match KNOWN_TAGS.iter().position(|known| *known == tag) {
            Some(index) => directory.push(index as u8 | transform),
            None => {
                directory.push(ARBITRARY_TAG | transform);
                directory.extend_from_slice(tag);
            }
        }
        encode_base128(data.len() as u32, &mut directory);
        total_sfnt += padded(data.len() as u32);
        stream.extend_from_slice(data);
    }

    let compressed = compress(&stream)?;
    let total_len = (HEADER_SIZE + directory.len() + compressed.len()) as u32;
    let flavor = u32::from_be_bytes([ttf[0], ttf[1], ttf[2], ttf[3]]);

    let mut out = Vec::with_capacity(total_len as usize);
    push_u32(&mut out, WOFF2_SIGNATURE);
    push_u32(&mut out, flavor);
    push_u32(&mut out, total_len);
    push_u16(&mut out, tables.len() as u16);
    push_u16(&mut out, 0); // reserved
    push_u32(&mut out, total_sfnt);
    push_u32(&mut out, compressed.len() as u32);
    push_u16(&mut out, 1); // majorVersion
    push_u16(&mut out, 0); // minorVersion
    push_u32(&mut out, 0); // metaOffset
    push_u32(&mut out, 0); // metaLength
    push_u32(&mut out, 0); // metaOrigLength
    push_u32(&mut out, 0); // privOffset
    push_u32(&mut out, 0); // privLength
    out.extend_from_slice(&directory);
    out.extend_from_slice(&compressed);
    Ok(out)
}

fn compress(data: &[u8]) -> Result<Vec<u8>, IconFontError> {
    let mut out = Vec::new();
    let mut reader = brotli::CompressorReader::new(std::io::Cursor::new(data), 4096, 11, 22);
    reader.read_to_end(&mut out)?;
    Ok(out)
}

/// UIntBase128: 7 bits per byte, most significant first, high bit set on all
/// but the last byte.
fn encode_base128(mut value: u32, out: &mut Vec<u8>) {
    let mut chunks = [0u8; 5];
    let mut n = 0;
    loop {
        chunks[n] = (value & 0x7F) as u8;
        value >>= 7;
        n += 1;
        if value == 0 {
            break;
        }
    }
    for i in (0..n).rev() {
        let continuation = if i > 0 { 0x80 } else { 0 };
        out.push(chunks[i] | continuation);
    }
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
