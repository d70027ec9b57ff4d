//! Embedded OpenType wrapper: the EOT v2 header prepended to the raw TTF.
//!
//! Every multi-byte field in the header is little-endian, unlike the sfnt
//! payload that follows it.

use crate::{error::IconFontError, font::IconFont};

const EOT_VERSION: u32 = 0x0002_0001;
const EOT_MAGIC: u16 = 0x504C;
const DEFAULT_CHARSET: u8 = 0x01;

pub fn wrap(font: &IconFont, ttf: &[u8]) -> Result<Vec<u8>, IconFontError> {
    let family = utf16_bytes(&font.name);
    let style = utf16_bytes("Regular");
    let version = utf16_bytes("Version 1.0");
    let full_name = utf16_bytes(&font.name);

    let mut header = Vec::with_capacity(128 + family.len() + full_name.len());
    push_u32(&mut header, 0); // EOTSize, patched below
    push_u32(&mut header, ttf.len() as u32);
    push_u32(&mut header, EOT_VERSION);
    push_u32(&mut header, 0); // flags
    header.extend_from_slice(&[0u8; 10]); // PANOSE: any
    header.push(DEFAULT_CHARSET);
    header.push(0); // italic
    push_u32(&mut header, 400); // weight
    push_u16(&mut header, 0); // fsType: installable
    push_u16(&mut header, EOT_MAGIC);
    for _ in 0..4 {
        push_u32(&mut header, 0); // UnicodeRange1-4
    }
    push_u32(&mut header, 0); // CodePageRange1
    push_u32(&mut header, 0); // CodePageRange2
    push_u32(&mut header, 0); // CheckSumAdjustment
    for _ in 0..4 {
        push_u32(&mut header, 0); // Reserved1-4
    }
    for string in [&family, &style, &version, &full_name] {
        push_u16(&mut header, 0); // padding
        push_u16(&mut header, string.len() as u16);
        header.extend_from_slice(string);
    }
    push_u16(&mut header, 0); // padding
    push_u16(&mut header, 0); // RootStringSize: unrestricted

    let total = (header.len() + ttf.len()) as u32;
    header[0..4].copy_from_slice(&total.to_le_bytes());

    let mut out = header;
    out.extend_from_slice(ttf);
    Ok(out)
}

fn utf16_bytes(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
}

fn push_u16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn push_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}
