//! PNM (Portable Any Map) format support
//!
//! Reads and writes PBM (P4 binary), PGM (P5 binary) and PPM (P6 binary).
//! PGM with `maxval > 255` is stored as 16 bpp. ASCII variants (P1/P2/P3)
//! and PAM (P7) are not supported.

use crate::{IoError, IoResult};
use regionalize_core::{Pix, PixelDepth, color};
use std::io::{BufRead, Write};

/// Read the next whitespace-delimited header token, skipping `#` comments.
fn read_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = String::new();
    let mut byte = [0u8; 1];
    loop {
        if reader.read(&mut byte)? == 0 {
            break;
        }
        let c = byte[0];
        if c == b'#' && token.is_empty() {
            let mut skipped = Vec::new();
            reader.read_until(b'\n', &mut skipped)?;
            continue;
        }
        if c.is_ascii_whitespace() {
            if token.is_empty() {
                continue;
            }
            break;
        }
        token.push(c as char);
    }
    if token.is_empty() {
        return Err(IoError::InvalidData("truncated PNM header".to_string()));
    }
    Ok(token)
}

fn read_number<R: BufRead>(reader: &mut R, what: &str) -> IoResult<u32> {
    let token = read_token(reader)?;
    token
        .parse()
        .map_err(|_| IoError::InvalidData(format!("bad PNM {}: {:?}", what, token)))
}

/// Read a PNM image (P4/P5/P6) from a reader.
///
/// Returns a `Pix` at 1 bpp (PBM), 8 or 16 bpp (PGM), or 32 bpp (PPM).
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Pix> {
    let magic = read_token(&mut reader)?;
    let width = read_number(&mut reader, "width")?;
    let height = read_number(&mut reader, "height")?;
    let maxval = match magic.as_str() {
        "P4" => 1,
        "P5" | "P6" => read_number(&mut reader, "maxval")?,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM variant {} not supported",
                other
            )));
        }
    };
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!("bad PNM maxval {}", maxval)));
    }

    let wide = maxval > 255;
    let depth = match magic.as_str() {
        "P4" => PixelDepth::Bit1,
        "P5" if wide => PixelDepth::Bit16,
        "P5" => PixelDepth::Bit8,
        _ => PixelDepth::Bit32,
    };
    let mut pm = Pix::new(width, height, depth)?.to_mut();

    let bytes_per_sample = if wide { 2 } else { 1 };
    let row_bytes = match magic.as_str() {
        "P4" => width.div_ceil(8) as usize,
        "P5" => width as usize * bytes_per_sample,
        _ => width as usize * 3 * bytes_per_sample,
    };
    let mut row = vec![0u8; row_bytes];
    let sample = |row: &[u8], i: usize| -> u32 {
        if wide {
            ((row[2 * i] as u32) << 8) | row[2 * i + 1] as u32
        } else {
            row[i] as u32
        }
    };
    let to_byte = |v: u32| -> u8 { (v * 255 / maxval) as u8 };

    for y in 0..height {
        reader.read_exact(&mut row)?;
        for x in 0..width {
            let xi = x as usize;
            let val = match magic.as_str() {
                "P4" => ((row[xi / 8] >> (7 - (xi % 8))) & 1) as u32,
                "P5" => sample(&row, xi),
                _ => color::compose_rgb(
                    to_byte(sample(&row, 3 * xi)),
                    to_byte(sample(&row, 3 * xi + 1)),
                    to_byte(sample(&row, 3 * xi + 2)),
                ),
            };
            pm.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(pm.into())
}

/// Write a `Pix` as binary PNM to a writer.
///
/// Chooses P4 (1 bpp), P5 (2 to 16 bpp grayscale), or P6 (32 bpp RGB)
/// based on the pixel depth.
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();
    let depth = pix.depth();

    match depth {
        PixelDepth::Bit1 => write!(writer, "P4\n{} {}\n", width, height)?,
        PixelDepth::Bit32 => write!(writer, "P6\n{} {}\n255\n", width, height)?,
        _ => write!(writer, "P5\n{} {}\n{}\n", width, height, depth.max_value())?,
    }

    for y in 0..height {
        let mut row = Vec::with_capacity(width as usize * 3);
        match depth {
            PixelDepth::Bit1 => {
                row.resize(width.div_ceil(8) as usize, 0u8);
                for x in 0..width {
                    if pix.get_pixel_unchecked(x, y) != 0 {
                        row[(x / 8) as usize] |= 1 << (7 - (x % 8));
                    }
                }
            }
            PixelDepth::Bit16 => {
                for x in 0..width {
                    let v = pix.get_pixel_unchecked(x, y);
                    row.extend_from_slice(&[(v >> 8) as u8, v as u8]);
                }
            }
            PixelDepth::Bit32 => {
                for x in 0..width {
                    let (r, g, b) = color::extract_rgb(pix.get_pixel_unchecked(x, y));
                    row.extend_from_slice(&[r, g, b]);
                }
            }
            _ => {
                for x in 0..width {
                    row.push(pix.get_pixel_unchecked(x, y) as u8);
                }
            }
        }
        writer.write_all(&row)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_pgm_roundtrip() {
        let mut pm = Pix::new(5, 4, PixelDepth::Bit8).unwrap().to_mut();
        pm.set_pixel(4, 3, 250).unwrap();
        pm.set_pixel(1, 0, 7).unwrap();
        let pix: Pix = pm.into();

        let mut buf = Vec::new();
        write_pnm(&pix, &mut buf).unwrap();
        assert!(buf.starts_with(b"P5\n5 4\n255\n"));

        let back = read_pnm(Cursor::new(buf)).unwrap();
        assert_eq!(back.depth(), PixelDepth::Bit8);
        assert_eq!(back.get_pixel(4, 3), Some(250));
        assert_eq!(back.get_pixel(1, 0), Some(7));
    }

    #[test]
    fn test_pgm16_roundtrip() {
        let mut pm = Pix::new(2, 1, PixelDepth::Bit16).unwrap().to_mut();
        pm.set_pixel(1, 0, 40_000).unwrap();
        let pix: Pix = pm.into();
        let mut buf = Vec::new();
        write_pnm(&pix, &mut buf).unwrap();
        let back = read_pnm(Cursor::new(buf)).unwrap();
        assert_eq!(back.depth(), PixelDepth::Bit16);
        assert_eq!(back.get_pixel(1, 0), Some(40_000));
    }

    #[test]
    fn test_ppm_and_pbm_roundtrip() {
        let mut pm = Pix::new(3, 1, PixelDepth::Bit32).unwrap().to_mut();
        pm.set_rgb(2, 0, 1, 2, 3).unwrap();
        let pix: Pix = pm.into();
        let mut buf = Vec::new();
        write_pnm(&pix, &mut buf).unwrap();
        let back = read_pnm(Cursor::new(buf)).unwrap();
        assert_eq!(back.get_rgb(2, 0), Some((1, 2, 3)));

        let mut pm = Pix::new(10, 2, PixelDepth::Bit1).unwrap().to_mut();
        pm.set_pixel(9, 1, 1).unwrap();
        let pix: Pix = pm.into();
        let mut buf = Vec::new();
        write_pnm(&pix, &mut buf).unwrap();
        let back = read_pnm(Cursor::new(buf)).unwrap();
        assert_eq!(back.get_pixel(9, 1), Some(1));
        assert_eq!(back.get_pixel(8, 1), Some(0));
    }

    #[test]
    fn test_header_comments() {
        let mut data = b"P5\n# made by hand\n2 1\n255\n".to_vec();
        data.extend_from_slice(&[9, 200]);
        let pix = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(pix.get_pixel(0, 0), Some(9));
        assert_eq!(pix.get_pixel(1, 0), Some(200));
    }

    #[test]
    fn test_ascii_variant_rejected() {
        assert!(read_pnm(Cursor::new(b"P2\n1 1\n255\n0\n".to_vec())).is_err());
    }
}
